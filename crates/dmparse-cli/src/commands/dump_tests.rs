use super::dump::{parse, render};
use crate::cli::DumpView;

fn dump(text: &str, view: DumpView) -> String {
    let file = parse(text, 4).unwrap();
    render(&file, view)
}

#[test]
fn tokens_view() {
    insta::assert_snapshot!(dump("/obj\n", DumpView::Tokens), @r#"
    Slash@0..1 "/" 1:1
    Identifier@1..4 "obj" 1:2
      lead EndOfLine@4..5 "\n" 1:5
    EndOfFile@5..5 "" 2:1
    "#);
}

#[test]
fn declarations_view() {
    let file = parse("/obj\n\tvar/x\n", 2).unwrap();

    insta::assert_snapshot!(render(&file, DumpView::Declarations), @r"
    Type obj /obj @1:2
    Variable x /obj/var/x @2:7
    ");
}

#[test]
fn context_view() {
    insta::assert_snapshot!(dump("#define A 1\n#ifdef A\n", DumpView::Context), @r"
    #define A 1
    open #ifdef @2:1
    ");
}

#[test]
fn issues_do_not_stop_the_dump() {
    let file = parse("/obj +\n/mob\n", 4).unwrap();

    assert_eq!(file.diagnostics().len(), 1);
    insta::assert_snapshot!(render(&file, DumpView::Declarations), @"Type mob /mob @2:2");
}
