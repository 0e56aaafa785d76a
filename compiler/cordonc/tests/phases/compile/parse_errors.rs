use cordonc::{compile, CompileError, Mode};
use cordon_ir::LineCol;
use pretty_assertions::assert_eq;

#[test]
fn parse_error_names_the_file() {
    let err = compile("(1+", Mode::Expression, "doc.vsz", false).unwrap_err();
    assert!(err.is_parse());
    assert!(!err.is_safety());
    let message = err.to_string();
    assert!(message.starts_with("Unable to parse file: doc.vsz:1:"), "{message}");
}

#[test]
fn parse_error_reports_line_and_column() {
    let err = compile("x = 1\ny = = 2\n", Mode::Statements, "cell", false).unwrap_err();
    let CompileError::Parse { location, filename, .. } = &err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(filename, "cell");
    assert_eq!(*location, LineCol { line: 2, column: 5 });
}

#[test]
fn statements_are_not_an_expression() {
    let err = compile("x = 1", Mode::Expression, "<e>", false).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn unsafe_text_that_does_not_parse_is_a_parse_error() {
    let err = compile("import", Mode::Statements, "<e>", false).unwrap_err();
    assert!(err.is_parse(), "{err:?}");
    assert!(err.violation().is_none());
}
