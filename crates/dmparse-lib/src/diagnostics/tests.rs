use rowan::TextRange;

use super::*;
use crate::syntax::FilePosition;

fn report(
    diagnostics: &mut Diagnostics,
    kind: DiagnosticKind,
    start: u32,
    end: u32,
) -> DiagnosticBuilder<'_> {
    diagnostics.report_range(
        kind,
        TextRange::new(start.into(), end.into()),
        FilePosition::START,
    )
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn ids_are_namespaced() {
    assert_eq!(
        DiagnosticKind::MissingClosingSign.id(),
        "lexer/missing-closing-sign"
    );
    assert_eq!(
        DiagnosticKind::UnexpectedCharacter.id(),
        "lexer/unexpected-token"
    );
    assert_eq!(DiagnosticKind::ExtraEndIf.id(), "preprocessor/extra-endif");
    assert_eq!(DiagnosticKind::UnexpectedToken.id(), "parser/unexpected-token");
}

#[test]
fn warning_directive_is_a_warning() {
    assert_eq!(
        DiagnosticKind::WarningDirective.default_severity(),
        Severity::Warning
    );
    assert_eq!(
        DiagnosticKind::ErrorDirective.default_severity(),
        Severity::Error
    );
}

#[test]
fn report_with_fallback_message() {
    let mut diagnostics = Diagnostics::new();
    report(&mut diagnostics, DiagnosticKind::ExtraEndIf, 0, 6).emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    let issue = diagnostics.iter().next().unwrap();
    assert_eq!(issue.message(), "extra `#endif`");
    assert!(issue.arguments().is_empty());
}

#[test]
fn arguments_fill_template() {
    let mut diagnostics = Diagnostics::new();
    report(&mut diagnostics, DiagnosticKind::MissingClosingSign, 0, 1)
        .argument("\"")
        .emit();

    let issue = diagnostics.iter().next().unwrap();
    assert_eq!(issue.message(), "missing closing sign `\"`");
    assert_eq!(issue.arguments(), ["\"".to_string()]);
}

#[test]
fn message_without_placeholders_ignores_arguments() {
    assert_eq!(
        DiagnosticKind::ExpectedProc.message(&["x".to_string()]),
        "expected a left operand"
    );
}

#[test]
fn display_plain() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report_range(
            DiagnosticKind::UnknownVariable,
            TextRange::new(4.into(), 8.into()),
            FilePosition { line: 2, column: 5 },
        )
        .argument("TEST")
        .emit();

    let issue = diagnostics.iter().next().unwrap();
    insta::assert_snapshot!(
        issue.to_string(),
        @"error at 2:5: unknown preprocessor variable `TEST` [preprocessor/unknown-variable]"
    );
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    report(&mut diagnostics, DiagnosticKind::UnexpectedToken, 0, 5)
        .argument("hello")
        .emit();

    let result = diagnostics.printer("hello world").path("code.dm").render();
    insta::assert_snapshot!(result, @r"
    error: unexpected token `hello`
     --> code.dm:1:1
      |
    1 | hello world
      | ^^^^^
    ");
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    report(&mut diagnostics, DiagnosticKind::ExpectedValue, 0, 0).emit();

    let result = diagnostics.printer("hello").render();
    insta::assert_snapshot!(result, @r"
    error: expected a value
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_multiple_diagnostics() {
    let mut diagnostics = Diagnostics::new();
    report(&mut diagnostics, DiagnosticKind::ExtraEndIf, 0, 5).emit();
    report(&mut diagnostics, DiagnosticKind::WarningDirective, 6, 10)
        .argument("careful")
        .emit();

    let result = diagnostics.printer("hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: extra `#endif`
      |
    1 | hello world!
      | ^^^^^

    warning: careful
      |
    1 | hello world!
      |       ^^^^
    ");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    report(&mut diagnostics, DiagnosticKind::ExpectedName, 0, 5)
        .argument("var")
        .emit();

    let result = diagnostics.printer("hello").colored(true).render();
    assert!(result.contains("`var` declaration is missing a name"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    let result = diagnostics.printer("source").render();
    assert!(result.is_empty());
}

#[test]
fn collection_counts() {
    let mut diagnostics = Diagnostics::new();
    report(&mut diagnostics, DiagnosticKind::EndIfNotFound, 0, 1)
        .argument("#ifdef")
        .emit();
    report(&mut diagnostics, DiagnosticKind::EndIfNotFound, 2, 3).emit();
    report(&mut diagnostics, DiagnosticKind::WarningDirective, 4, 5).emit();

    assert_eq!(diagnostics.error_count(), 2);
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.count(DiagnosticKind::EndIfNotFound), 2);
    assert!(diagnostics.has_warnings());

    let mut merged = Diagnostics::new();
    merged.extend(diagnostics);
    assert_eq!(merged.len(), 3);
}
