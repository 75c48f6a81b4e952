use indoc::indoc;

use super::Lexer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::syntax::{FilePosition, SyntaxKind, TokenStream};

fn lex(source: &str) -> (TokenStream, Diagnostics) {
    Lexer::new().lex(source)
}

fn kinds(stream: &TokenStream) -> Vec<SyntaxKind> {
    stream.tokens().iter().map(|t| t.kind).collect()
}

fn texts(stream: &TokenStream) -> Vec<&str> {
    stream.tokens().iter().map(|t| stream.text(t)).collect()
}

fn round_trip(stream: &TokenStream) -> String {
    stream.tokens().iter().map(|t| stream.full_text(t)).collect()
}

#[test]
fn empty_input_is_just_eof() {
    let (stream, diagnostics) = lex("");

    assert_eq!(kinds(&stream), [SyntaxKind::EndOfFile]);
    assert!(stream.leads(stream.eof()).is_empty());
    assert_eq!(stream.eof().position, FilePosition::START);
    assert!(diagnostics.is_empty());
}

#[test]
fn identifier_then_eof() {
    let (stream, diagnostics) = lex("literal");

    assert_eq!(stream.len(), 2);
    assert_eq!(stream.tokens()[0].kind, SyntaxKind::Identifier);
    assert_eq!(stream.text(&stream.tokens()[0]), "literal");
    assert!(diagnostics.is_empty());
}

#[test]
fn numerical_literal_keeps_dots() {
    let (stream, _) = lex("123.55");

    assert_eq!(
        kinds(&stream),
        [SyntaxKind::NumericalLiteral, SyntaxKind::EndOfFile]
    );
    assert_eq!(stream.text(&stream.tokens()[0]), "123.55");
}

#[test]
fn keywords() {
    let (stream, diagnostics) =
        lex("for new global throw catch try var verb proc in if else set as while return");

    assert_eq!(stream.len(), 17);
    assert!(
        stream.tokens()[..16]
            .iter()
            .all(|t| t.kind.is_keyword())
    );
    assert_eq!(stream.tokens()[6].kind, SyntaxKind::VarKeyword);
    assert_eq!(stream.tokens()[8].kind, SyntaxKind::ProcKeyword);
    assert!(diagnostics.is_empty());
}

#[test]
fn keyword_prefix_is_identifier() {
    let (stream, _) = lex("variable procs");

    assert_eq!(
        kinds(&stream),
        [
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFile
        ]
    );
}

#[test]
fn directives() {
    let (stream, diagnostics) = lex("#include #ifndef #ifdef #endif #define #undef");

    assert_eq!(
        kinds(&stream),
        [
            SyntaxKind::IncludeDirective,
            SyntaxKind::IfNDefDirective,
            SyntaxKind::IfDefDirective,
            SyntaxKind::EndIfDirective,
            SyntaxKind::DefineDirective,
            SyntaxKind::UndefDirective,
            SyntaxKind::EndOfFile,
        ]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn concat_directive() {
    let (stream, _) = lex("#define TEST(X) ##x");

    assert_eq!(
        kinds(&stream),
        [
            SyntaxKind::DefineDirective,
            SyntaxKind::Identifier,
            SyntaxKind::OpenParenthesis,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenthesis,
            SyntaxKind::ConcatDirective,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFile,
        ]
    );
}

#[test]
fn unknown_directive_degrades_to_identifier() {
    let (stream, diagnostics) = lex("#pragma");

    assert_eq!(kinds(&stream), [SyntaxKind::Identifier, SyntaxKind::EndOfFile]);
    assert_eq!(texts(&stream), ["#pragma", ""]);
    assert!(diagnostics.is_empty());
}

#[test]
fn compound_operators_use_maximal_munch() {
    let (stream, diagnostics) = lex(">>= >> >= > <<= == = != ~! ~= ** *= \\= ||");

    assert_eq!(
        kinds(&stream),
        [
            SyntaxKind::DoubleGreaterEqual,
            SyntaxKind::DoubleGreater,
            SyntaxKind::GreaterEqual,
            SyntaxKind::Greater,
            SyntaxKind::DoubleLesserEqual,
            SyntaxKind::DoubleEqual,
            SyntaxKind::Equal,
            SyntaxKind::ExclamationEqual,
            SyntaxKind::TildeExclamation,
            SyntaxKind::TildeEqual,
            SyntaxKind::DoubleAsterisk,
            SyntaxKind::AsteriskEqual,
            SyntaxKind::BackslashEqual,
            SyntaxKind::DoubleBar,
            SyntaxKind::EndOfFile,
        ]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn unterminated_literals() {
    for (source, sign) in [
        ("'", "'"),
        ("\"", "\""),
        ("/* Comment without end *", "/*"),
        ("{\"document", "{\""),
        ("@|raw", "@"),
    ] {
        let (stream, diagnostics) = lex(source);

        assert_eq!(diagnostics.len(), 1, "{source}");
        let issue = diagnostics.iter().next().unwrap();
        assert_eq!(issue.kind(), DiagnosticKind::MissingClosingSign);
        assert_eq!(issue.arguments(), [sign.to_string()]);
        assert_eq!(stream.eof().kind, SyntaxKind::EndOfFile);
        assert_eq!(round_trip(&stream), source);
    }
}

#[test]
fn unexpected_character() {
    let (stream, diagnostics) = lex("$token");

    assert_eq!(diagnostics.len(), 1);
    let issue = diagnostics.iter().next().unwrap();
    assert_eq!(issue.id(), "lexer/unexpected-token");
    assert_eq!(issue.message(), "unexpected token `$`");
    assert_eq!(
        kinds(&stream),
        [
            SyntaxKind::Unknown,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFile
        ]
    );
}

#[test]
fn unexpected_characters_coalesce() {
    let (stream, diagnostics) = lex("a $$` b");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(texts(&stream), ["a", "$$`", "b", ""]);
}

#[test]
fn escape_parity() {
    // Two backslashes escape each other; the quote closes.
    let (stream, _) = lex(r#""\\" x"#);
    assert_eq!(texts(&stream), [r#""\\""#, "x", ""]);

    // Three: the quote is escaped and the literal runs on.
    let (stream, _) = lex(r#""\\\" x" y"#);
    assert_eq!(texts(&stream), [r#""\\\" x""#, "y", ""]);
}

#[test]
fn interpolation_hides_quotes() {
    let (stream, diagnostics) = lex(r#""Hello [get_name("x")]!" after"#);

    assert_eq!(texts(&stream), [r#""Hello [get_name("x")]!""#, "after", ""]);
    assert!(diagnostics.is_empty());
}

#[test]
fn document_literal_nests_braces() {
    let (stream, diagnostics) = lex(indoc! {r#"
        {"<style>a {color: red}</style>
        [name]"} rest
    "#});

    assert_eq!(stream.tokens()[0].kind, SyntaxKind::TextLiteral);
    assert_eq!(
        stream.text(&stream.tokens()[0]),
        "{\"<style>a {color: red}</style>\n[name]\"}"
    );
    assert_eq!(stream.text(&stream.tokens()[1]), "rest");
    assert!(diagnostics.is_empty());
}

#[test]
fn raw_literal_uses_any_delimiter() {
    let (stream, diagnostics) = lex(r#"@|a"b| @1x1 @{with "quotes"} @"#);

    assert_eq!(
        texts(&stream),
        [r#"@|a"b|"#, "@1x1", r#"@{with "quotes"}"#, "@", ""]
    );
    assert_eq!(
        kinds(&stream),
        [
            SyntaxKind::TextLiteral,
            SyntaxKind::TextLiteral,
            SyntaxKind::TextLiteral,
            SyntaxKind::At,
            SyntaxKind::EndOfFile,
        ]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn path_literal() {
    let (stream, _) = lex("#include 'code/file1.dm'");

    assert_eq!(stream.tokens()[1].kind, SyntaxKind::PathLiteral);
    assert_eq!(stream.text(&stream.tokens()[1]), "'code/file1.dm'");
}

#[test]
fn warning_tail_is_free_text() {
    let (stream, diagnostics) = lex("#warning Don't \"quote\" me\nvar");

    assert_eq!(
        kinds(&stream),
        [
            SyntaxKind::WarningDirective,
            SyntaxKind::TextLiteral,
            SyntaxKind::VarKeyword,
            SyntaxKind::EndOfFile,
        ]
    );
    assert_eq!(stream.text(&stream.tokens()[1]), "Don't \"quote\" me");
    assert!(diagnostics.is_empty());
}

#[test]
fn error_without_tail() {
    let (stream, _) = lex("#error\nx");

    assert_eq!(
        kinds(&stream),
        [
            SyntaxKind::ErrorDirective,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFile
        ]
    );
}

#[test]
fn block_comment_ends_at_first_close() {
    let (stream, diagnostics) = lex("/* outer /* inner */ /x");

    assert!(diagnostics.is_empty());
    assert_eq!(
        kinds(&stream),
        [SyntaxKind::Slash, SyntaxKind::Identifier, SyntaxKind::EndOfFile]
    );
    assert_eq!(stream.text(&stream.leads(&stream.tokens()[0])[0]), "/* outer /* inner */");
}

#[test]
fn eof_owns_remaining_trivia() {
    let (stream, _) = lex("/* Multiline\ncomment */\n\n// Single line");

    assert_eq!(stream.len(), 1);
    let leads: Vec<_> = stream.leads(stream.eof()).iter().map(|t| t.kind).collect();
    assert_eq!(
        leads,
        [
            SyntaxKind::MultiLineComment,
            SyntaxKind::EndOfLine,
            SyntaxKind::EndOfLine,
            SyntaxKind::SingleLineComment,
        ]
    );
}

#[test]
fn indented_comment_leads_eof() {
    let (stream, _) = lex("    // Comment");

    assert_eq!(stream.leads(stream.eof()).len(), 2);
}

#[test]
fn trails_stop_at_comments_and_line_ends() {
    let (stream, _) = lex("a . // note\n  b");
    let a = stream.tokens()[0];
    let b = stream.tokens()[1];

    let trails: Vec<_> = stream.trails(&a).iter().map(|t| t.kind).collect();
    assert_eq!(
        trails,
        [SyntaxKind::Whitespace, SyntaxKind::Dot, SyntaxKind::Whitespace]
    );
    let leads: Vec<_> = stream.leads(&b).iter().map(|t| t.kind).collect();
    assert_eq!(
        leads,
        [
            SyntaxKind::SingleLineComment,
            SyntaxKind::EndOfLine,
            SyntaxKind::Whitespace
        ]
    );
    assert!(a.line_start);
    assert!(b.line_start);
}

#[test]
fn positions_expand_tabs() {
    let (stream, _) = Lexer::new().with_tab_width(4).lex("\tvar\r\n  a\rb");

    let positions: Vec<_> = stream.tokens().iter().map(|t| t.position).collect();
    assert_eq!(
        positions,
        [
            FilePosition { line: 1, column: 5 },
            FilePosition { line: 2, column: 3 },
            FilePosition { line: 3, column: 1 },
            FilePosition { line: 3, column: 2 },
        ]
    );
}

#[test]
fn issue_position() {
    let (_, diagnostics) = lex("x\n  \"abc");

    let issue = diagnostics.iter().next().unwrap();
    assert_eq!(issue.position(), FilePosition { line: 2, column: 3 });
}

#[test]
fn round_trip_reproduces_source() {
    let source = indoc! {r#"
        // Header comment
        #define DEBUG
        #warning  check this
        /datum/thing
        	var/name = "thing [src.name]" // trailing
        	proc/act(a, b)
        		if(a >= b) return @"raw"
        /* unterminated at the end
    "#};

    let (stream, _) = lex(source);
    assert_eq!(round_trip(&stream), source);
}

#[test]
fn dump() {
    let (stream, _) = lex("/datum/a = \"x\" // c\n");

    insta::assert_snapshot!(stream.dump(), @r#"
    Slash@0..1 "/" 1:1
    Identifier@1..6 "datum" 1:2
    Slash@6..7 "/" 1:7
    Identifier@7..8 "a" 1:8
      trail Whitespace@8..9 " " 1:9
    Equal@9..10 "=" 1:10
      trail Whitespace@10..11 " " 1:11
    TextLiteral@11..14 "\"x\"" 1:12
      trail Whitespace@14..15 " " 1:15
      lead SingleLineComment@15..19 "// c" 1:16
      lead EndOfLine@19..20 "\n" 1:20
    EndOfFile@20..20 "" 2:1
    "#);
}

#[test]
fn lexer_is_reusable() {
    let lexer = Lexer::new();

    let (first, first_issues) = lexer.lex("\"open");
    let (second, second_issues) = lexer.lex("closed");

    assert_eq!(first_issues.len(), 1);
    assert!(second_issues.is_empty());
    assert_eq!(texts(&second), ["closed", ""]);
    assert_eq!(first.source(), "\"open");
}
