use cordonc::{Mode, SafetyViolation};
use cordon_ir::NodeKind;
use pretty_assertions::assert_eq;

use crate::common::{rejection, vet, vet_statements};

#[test]
fn arithmetic_on_caller_names_compiles() {
    let compiled = vet("x + y * 2").unwrap();
    assert!(compiled.is_vetted());
    assert_eq!(compiled.mode(), Mode::Expression);
    assert_eq!(compiled.source().text(), "x + y * 2");
}

#[test]
fn open_is_refused() {
    assert_eq!(
        rejection("open('/etc/passwd')", Mode::Expression),
        "Access to special functions not allowed: \"open\""
    );
}

#[test]
fn import_is_refused() {
    let err = vet_statements("import os").unwrap_err();
    assert_eq!(
        err.violation(),
        Some(&SafetyViolation::ForbiddenNode {
            kind: NodeKind::Import,
            span: err.span(),
        })
    );
    assert_eq!(err.to_string(), "Import not safe");
}

#[test]
fn dunder_attribute_is_refused() {
    assert_eq!(
        rejection("x.__class__", Mode::Expression),
        "Access to special attributes not allowed: \"__class__\""
    );
}

#[test]
fn method_calls_are_refused() {
    assert_eq!(rejection("x.upper()", Mode::Expression), "Function has no identifier");
}

#[test]
fn every_forbidden_statement_kind_is_refused_in_context() {
    for source in [
        "if x:\n    import os\n",
        "def f():\n    from os import path\n",
        "for i in y:\n    global z\n",
        "try:\n    pass\nexcept ValueError:\n    exec 'x = 1'\n",
    ] {
        let err = vet_statements(source).unwrap_err();
        assert!(
            matches!(err.violation(), Some(SafetyViolation::ForbiddenNode { .. })),
            "{source}: {err:?}"
        );
    }
}

#[test]
fn classic_escapes_are_refused() {
    for source in [
        "().__class__.__bases__[0].__subclasses__()",
        "[c for c in ().__class__.__base__.__subclasses__()]",
        "getattr(x, '__globals__')",
        "(lambda: 0).func_globals",
        "globals()['__builtins__']",
        "eval('1')",
        "__import__('os').system('ls')",
        "vars()",
        "dir()",
        "input()",
        "raw_input()",
        "execfile('x.py')",
        "exit()",
    ] {
        assert!(vet(source).unwrap_err().is_safety(), "{source}");
    }
}

#[test]
fn allowlisted_helpers_compile() {
    for source in [
        "sorted(map(abs, xs))[0]",
        "sum(v * w for v, w in zip(a, b))",
        "round(max(1.5, min(x, 9)), 2)",
        "isinstance(x, (int, float)) and not isinstance(x, bool)",
        "dict(zip(keys, range(len(keys))))",
        "[i for i in xrange(10) if i % 2 == 0]",
        "repr(frozenset([1, 2])) + str(hex(255))",
    ] {
        assert!(vet(source).is_ok(), "{source}");
    }
}

#[test]
fn verdicts_are_repeatable() {
    for source in ["x + 1", "open", "x.__dict__", "(1 +"] {
        let first = vet(source).map(|_| ());
        let second = vet(source).map(|_| ());
        assert_eq!(first, second, "{source}");
    }
}
