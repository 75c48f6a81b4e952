pub mod check;
pub mod dump;

#[cfg(test)]
mod dump_tests;
