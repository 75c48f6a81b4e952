use std::fmt::Write;

use indoc::indoc;

use super::{DeclarationKind, ParseResult, Parser};
use crate::Error;
use crate::lexer::Lexer;
use crate::preprocessor::Preprocessor;
use crate::syntax::{SyntaxKind, TokenStream};

fn parse_stream(stream: &TokenStream) -> ParseResult {
    let preprocessed = Preprocessor::new().preprocess(stream, None);
    Parser::new(stream)
        .with_inactive(&preprocessed.inactive)
        .parse()
        .unwrap()
}

/// Declaration outline followed by parser diagnostics.
fn outline(source: &str) -> String {
    let (stream, _) = Lexer::new().lex(source);
    let result = parse_stream(&stream);
    let mut out = result.unit.dump(&stream);
    for issue in &result.diagnostics {
        writeln!(out, "{issue}").unwrap();
    }
    out
}

#[test]
fn empty_input() {
    insta::assert_snapshot!(outline(""), @"");
}

#[test]
fn keyword_splits_path_into_two_declarations() {
    let (stream, _) = Lexer::new().lex("datum/mytype/type/var/a");
    let result = parse_stream(&stream);
    let declarations = result.unit.declarations();

    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations[0].kind(), DeclarationKind::Type);
    assert_eq!(declarations[0].name(), "type");
    let path: Vec<_> = declarations[0]
        .full_path()
        .iter()
        .map(|t| stream.text(t))
        .collect();
    assert_eq!(path, ["datum", "/", "mytype", "/", "type"]);

    assert_eq!(declarations[1].kind(), DeclarationKind::Variable);
    assert_eq!(declarations[1].name(), "a");
    assert_eq!(declarations[1].head().kind, SyntaxKind::Identifier);

    insta::assert_snapshot!(result.unit.dump(&stream), @r"
    Type type datum/mytype/type @1:14
    Variable a datum/mytype/type/var/a @1:23
    ");
}

#[test]
fn indentation_builds_nested_paths() {
    let source = indoc! {r#"
        /datum/thing
            var/health = 100
            proc/attack(target)
                world << "hi"
                return
            verb/say()
        /obj
            var
                a = 1
                b
    "#};

    insta::assert_snapshot!(outline(source), @r"
    Type thing /datum/thing @1:8
    Variable health /datum/thing/var/health @2:9
    Proc attack /datum/thing/proc/attack @3:10
    Verb say /datum/thing/verb/say @6:10
    Type obj /obj @7:2
    Variable a /obj/var/a @9:9
    Variable b /obj/var/b @10:9
    ");
}

#[test]
fn tabs_indent_by_tab_width() {
    let (stream, _) = Lexer::new().with_tab_width(8).lex("/obj\n\tvar/x\n");
    let result = parse_stream(&stream);

    insta::assert_snapshot!(result.unit.dump(&stream), @r"
    Type obj /obj @1:2
    Variable x /obj/var/x @2:13
    ");
}

#[test]
fn bare_keywords_start_declarations() {
    let source = indoc! {"
        proc/helper()
            return 1
        var/global/counter = 0
        verb/wave()
    "};

    insta::assert_snapshot!(outline(source), @r"
    Proc helper proc/helper @1:6
    Variable counter var/global/counter @3:12
    Verb wave verb/wave @4:6
    ");
}

#[test]
fn initializer_spans_bracketed_lines() {
    let source = indoc! {r#"
        /obj
            var/list/items = list(
                "a",
                "b")
            var/count = 0
    "#};

    insta::assert_snapshot!(outline(source), @r"
    Type obj /obj @1:2
    Variable items /obj/var/list/items @2:14
    Variable count /obj/var/count @5:9
    ");
}

#[test]
fn type_annotation_and_list_size_end_the_declaration() {
    let source = indoc! {"
        /mob
            var/speed as num
            var/slots[10]
    "};

    insta::assert_snapshot!(outline(source), @r"
    Type mob /mob @1:2
    Variable speed /mob/var/speed @2:9
    Variable slots /mob/var/slots @3:9
    ");
}

#[test]
fn unexpected_token_skips_the_line() {
    let source = indoc! {"
        /obj/thing + 5
        if(x)
        /obj/other
    "};

    insta::assert_snapshot!(outline(source), @r"
    Type other /obj/other @3:6
    error at 1:12: unexpected token `+` [parser/unexpected-token]
    error at 2:1: unexpected token `if` [parser/unexpected-token]
    ");
}

#[test]
fn doubled_slash_is_reported_and_ignored() {
    insta::assert_snapshot!(outline("/obj/ /thing"), @r"
    Type thing /obj/thing @1:8
    error at 1:7: unexpected token `/` [parser/unexpected-token]
    ");
}

#[test]
fn keyword_without_name() {
    let source = indoc! {"
        /obj/var
        /mob/proc()
    "};

    insta::assert_snapshot!(outline(source), @r"
    Type obj /obj @1:2
    Type mob /mob @2:2
    error at 1:6: `var` declaration is missing a name [parser/expected-name]
    error at 2:6: `proc` declaration is missing a name [parser/expected-name]
    ");
}

#[test]
fn keyword_named_on_deeper_line_is_not_reported() {
    let source = indoc! {"
        /obj
            var
                a
    "};

    insta::assert_snapshot!(outline(source), @r"
    Type obj /obj @1:2
    Variable a /obj/var/a @3:9
    ");
}

#[test]
fn inactive_branches_and_directive_lines_are_invisible() {
    let source = indoc! {"
        #define A
        /obj
        #ifdef B
            var/hidden
        #else
            var/shown
        #endif
        #pragma something
    "};

    insta::assert_snapshot!(outline(source), @r"
    Type obj /obj @2:2
    Variable shown /obj/var/shown @6:9
    ");
}

#[test]
fn without_inactive_ranges_every_branch_is_parsed() {
    let (stream, _) = Lexer::new().lex(indoc! {"
        #ifdef B
        /obj/hidden
        #endif
    "});
    let result = Parser::new(&stream).parse().unwrap();

    insta::assert_snapshot!(result.unit.dump(&stream), @"Type hidden /obj/hidden @2:6");
}

#[test]
fn several_inactive_ranges_are_each_skipped() {
    let (stream, _) = Lexer::new().lex("/a\n/b\n/c\n/d\n/e\n");
    let inactive = [2..4, 6..8];

    let result = Parser::new(&stream).with_inactive(&inactive).parse().unwrap();

    insta::assert_snapshot!(result.unit.dump(&stream), @r"
    Type a /a @1:2
    Type c /c @3:2
    Type e /e @5:2
    ");
}

#[test]
fn many_dead_branches_between_live_code() {
    let source = indoc! {"
        #ifdef X
        /dead1
        #endif
        /live1
        #ifdef X
        /dead2
        #elif 0
        /dead3
        #else
        /live2
        #endif
        #ifndef Y
        /live3
        #endif
        #if 0
        /dead4
        #endif
    "};

    insta::assert_snapshot!(outline(source), @r"
    Type live1 /live1 @4:2
    Type live2 /live2 @10:2
    Type live3 /live3 @13:2
    ");
}

#[test]
fn exec_fuel_exhaustion_is_fatal() {
    let (stream, _) = Lexer::new().lex("/datum/thing");

    let result = Parser::new(&stream).with_exec_fuel(Some(2)).parse();
    assert!(matches!(result, Err(Error::ExecFuelExhausted)));

    let result = Parser::new(&stream)
        .with_exec_fuel(Some(100))
        .parse()
        .unwrap();
    assert_eq!(result.exec_fuel_consumed, 4);
    assert_eq!(result.unit.declarations().len(), 1);
}

#[test]
fn parse_helper_returns_unit_and_diagnostics() {
    let (stream, _) = Lexer::new().lex("/obj/thing +\n");

    let (unit, diagnostics) = super::parse(&stream, &[], None).unwrap();

    assert!(unit.declarations().is_empty());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn declaration_kinds_serialize_by_name() {
    let kinds = [
        DeclarationKind::Type,
        DeclarationKind::Variable,
        DeclarationKind::Proc,
        DeclarationKind::Verb,
    ];

    let json = serde_json::to_string(&kinds).unwrap();

    assert_eq!(json, r#"["Type","Variable","Proc","Verb"]"#);
}
