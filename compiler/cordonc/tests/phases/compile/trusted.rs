use cordonc::{compile, CompileOptions, Compiler, ExpressionSource, Mode};
use cordon_eval::Value;
use pretty_assertions::assert_eq;

use crate::common::{env, trust};

#[test]
fn trusted_path_accepts_forbidden_constructs() {
    for (source, mode) in [
        ("import os\n", Mode::Statements),
        ("global x\n", Mode::Statements),
        ("x.__class__", Mode::Expression),
        ("x.upper()", Mode::Expression),
        ("open", Mode::Expression),
    ] {
        let compiled = trust(source, mode).unwrap();
        assert!(!compiled.is_vetted(), "{source}");
    }
}

#[test]
fn trusted_path_still_rejects_syntax_errors() {
    let err = trust("(1+", Mode::Expression).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn trusted_sources_run_with_full_namespace() {
    let compiled = trust("'abc'.upper() + str(len(dir()) >= 0)", Mode::Expression).unwrap();
    assert_eq!(compiled.eval(&env(&[])).unwrap(), Value::str("ABCTrue"));
}

#[test]
fn compiler_options_form_matches_the_function() {
    let compiler = Compiler::new(CompileOptions::default().trusted());
    let source = ExpressionSource::expression("x.upper()").with_filename("trusted.vsz");
    assert!(compiler.compile(&source).is_ok());
    assert!(compile("x.upper()", Mode::Expression, "trusted.vsz", false).is_err());
}
