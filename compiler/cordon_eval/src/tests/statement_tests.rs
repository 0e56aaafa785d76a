use pretty_assertions::assert_eq;

use super::{exec, exec_get};
use crate::{ExceptionKind, Value};

#[test]
fn assignment_forms() {
    let env = exec("a = b = 3\nc, (d, e) = 1, [2, 3]\nf = [0, 0]\nf[1] = 9\n").unwrap();
    assert_eq!(env.get("a"), Some(Value::Int(3)));
    assert_eq!(env.get("b"), Some(Value::Int(3)));
    assert_eq!(env.get("e"), Some(Value::Int(3)));
    assert_eq!(env.get("f").unwrap().repr(), "[0, 9]");
}

#[test]
fn unpacking_length_mismatch() {
    let err = exec("a, b = [1, 2, 3]\n").unwrap_err();
    assert_eq!(err.to_string(), "ValueError: too many values to unpack");
    let err = exec("a, b = [1]\n").unwrap_err();
    assert_eq!(err.to_string(), "ValueError: need more than 1 value to unpack");
}

#[test]
fn augmented_assignment_extends_lists_in_place() {
    let env = exec("a = [1]\nb = a\nb += [2]\nn = 5\nn -= 2\n").unwrap();
    assert_eq!(env.get("a").unwrap().repr(), "[1, 2]");
    assert_eq!(env.get("n"), Some(Value::Int(3)));
}

#[test]
fn if_elif_else() {
    let source = "\
def grade(n):
    if n >= 90:
        return 'A'
    elif n >= 80:
        return 'B'
    else:
        return 'C'
out = [grade(95), grade(85), grade(10)]
";
    assert_eq!(exec_get(source, "out").repr(), "['A', 'B', 'C']");
}

#[test]
fn loops_break_and_continue() {
    let source = "\
total = 0
for i in range(10):
    if i % 2:
        continue
    if i > 6:
        break
    total += i
n = 0
while True:
    n += 1
    if n == 4:
        break
";
    let env = exec(source).unwrap();
    assert_eq!(env.get("total"), Some(Value::Int(12)));
    assert_eq!(env.get("n"), Some(Value::Int(4)));
}

#[test]
fn for_over_dict_yields_keys() {
    let source = "\
keys = []
for k in {'x': 1, 'y': 2}:
    keys.append(k)
";
    assert_eq!(exec_get(source, "keys").repr(), "['x', 'y']");
}

#[test]
fn functions_and_recursion() {
    let source = "\
def fact(n):
    if n <= 1:
        return 1
    return n * fact(n - 1)
r = fact(10)
";
    assert_eq!(exec_get(source, "r"), Value::Int(3_628_800));
}

#[test]
fn function_without_return_yields_none() {
    let source = "def f():\n    pass\nr = f()\n";
    assert!(matches!(exec_get(source, "r"), Value::None));
}

#[test]
fn closures_see_enclosing_bindings() {
    let source = "\
def make_adder(n):
    def add(x):
        return x + n
    return add
add3 = make_adder(3)
r = add3(4)
";
    assert_eq!(exec_get(source, "r"), Value::Int(7));
}

#[test]
fn global_declaration_rebinds_module_scope() {
    let source = "\
counter = 0
def bump():
    global counter
    counter += 1
bump()
bump()
";
    assert_eq!(exec_get(source, "counter"), Value::Int(2));
}

#[test]
fn locals_stay_in_the_function() {
    let env = exec("def f():\n    hidden = 1\nf()\n").unwrap();
    assert!(!env.contains("hidden"));
}

#[test]
fn delete_removes_bindings_and_items() {
    let env = exec("a = 1\nd = {'k': 1, 'j': 2}\ndel a, d['k']\n").unwrap();
    assert!(!env.contains("a"));
    assert_eq!(env.get("d").unwrap().repr(), "{'j': 2}");
    let err = exec("del missing\n").unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::NameError);
}

#[test]
fn assert_statement() {
    assert!(exec("assert 1 == 1\n").is_ok());
    let err = exec("assert 1 == 2, 'math is broken'\n").unwrap_err();
    assert_eq!(err.to_string(), "AssertionError: math is broken");
}

#[test]
fn imports_always_fail() {
    let err = exec("import os\n").unwrap_err();
    assert_eq!(err.to_string(), "ImportError: No module named os");
    let err = exec("from sys import path\n").unwrap_err();
    assert_eq!(err.to_string(), "ImportError: No module named sys");
}

#[test]
fn attribute_assignment_is_refused() {
    let err = exec("x = 1\nx.real = 2\n").unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::AttributeError);
}

#[test]
fn method_calls_mutate_shared_lists() {
    let source = "\
items = []
alias = items
for word in 'b a c'.split():
    alias.append(word)
items.sort()
";
    assert_eq!(exec_get(source, "items").repr(), "['a', 'b', 'c']");
}
