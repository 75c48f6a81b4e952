//! Log output for the CLI.
//!
//! Events go to stderr. `DMPARSE_LOG` takes an `EnvFilter` directive and wins
//! over `-v`; without it the level follows the `-v` count.

use tracing_subscriber::EnvFilter;

const ENV_VAR: &str = "DMPARSE_LOG";

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,dmparse=debug",
        _ => "warn,dmparse=trace",
    }
}
