use super::*;
use crate::exceptions::ExceptionKind;
use crate::value::DictValue;
use pretty_assertions::assert_eq;

fn percent(template: &str, args: Value) -> String {
    percent_format(template, &args).unwrap_or_else(|e| format!("error: {e}"))
}

fn spec(value: Value, spec: &str) -> String {
    format_value(&value, spec).unwrap_or_else(|e| format!("error: {e}"))
}

fn strs(items: &[&str]) -> Vec<Value> {
    items.iter().map(Value::str).collect()
}

#[test]
fn percent_basic_conversions() {
    assert_eq!(percent("%d items", Value::int(3)), "3 items");
    assert_eq!(percent("%5.2f", Value::float(3.14159)), " 3.14");
    assert_eq!(percent("%-4s|", Value::str("ab")), "ab  |");
    assert_eq!(percent("%05d", Value::int(-42)), "-0042");
    assert_eq!(percent("%x %#x", Value::tuple(vec![Value::int(255), Value::int(255)])), "ff 0xff");
    assert_eq!(percent("%r", Value::str("a")), "'a'");
    assert_eq!(percent("%e", Value::float(12345.678)), "1.234568e+04");
    assert_eq!(percent("100%%", Value::tuple(vec![])), "100%");
    assert_eq!(percent("%d", Value::float(2.9)), "2");
}

#[test]
fn percent_mapping_keys() {
    let mut dict = DictValue::new();
    dict.insert(Value::str("name"), Value::str("Al")).ok();
    dict.insert(Value::str("age"), Value::int(3)).ok();
    assert_eq!(percent("%(name)s is %(age)d", Value::dict(dict)), "Al is 3");
}

#[test]
fn percent_argument_count_errors() {
    let err = percent_format("%s %s", &Value::tuple(vec![Value::int(1)])).err();
    assert_eq!(
        err.map(|e| e.message().to_owned()),
        Some("not enough arguments for format string".to_owned())
    );
    let err = percent_format("%s", &Value::tuple(vec![Value::int(1), Value::int(2)])).err();
    assert_eq!(err.map(|e| e.kind()), Some(ExceptionKind::TypeError));
    let err = percent_format("%q", &Value::int(1)).err();
    assert_eq!(
        err.map(|e| e.message().to_owned()),
        Some("unsupported format character 'q' (0x71)".to_owned())
    );
}

#[test]
fn format_specs() {
    assert_eq!(spec(Value::int(1_234_567), ",d"), "1,234,567");
    assert_eq!(spec(Value::float(3.14159), ".3f"), "3.142");
    assert_eq!(spec(Value::str("ab"), "^6"), "  ab  ");
    assert_eq!(spec(Value::str("ab"), "*>5"), "***ab");
    assert_eq!(spec(Value::float(0.5), ".1%"), "50.0%");
    assert_eq!(spec(Value::float(1e-5), "g"), "1e-05");
    assert_eq!(spec(Value::float(123.456), "g"), "123.456");
    assert_eq!(spec(Value::int(42), ""), "42");
    assert_eq!(spec(Value::int(7), "+04d"), "+007");
    assert_eq!(spec(Value::int(5), "b"), "101");
    assert_eq!(
        spec(Value::int(3), "s"),
        "error: ValueError: Unknown format code 's' for object of type 'int'"
    );
}

#[test]
fn str_format_fields() {
    let nums: Vec<Value> = [1, 2, 3].into_iter().map(Value::int).collect();
    assert_eq!(str_format("{} + {} = {}", &nums, &[]).ok(), Some("1 + 2 = 3".to_owned()));
    assert_eq!(str_format("{0}{1}{0}", &strs(&["a", "b"]), &[]).ok(), Some("aba".to_owned()));
    let kw = vec![(Rc::from("name"), Value::str("x"))];
    assert_eq!(str_format("{name!r:>6}", &[], &kw).ok(), Some("   'x'".to_owned()));
    assert_eq!(str_format("{{}}", &[], &[]).ok(), Some("{}".to_owned()));
}

#[test]
fn str_format_rejects_attribute_fields() {
    let err = str_format("{0.__class__}", &strs(&["a"]), &[]).err();
    assert_eq!(err.map(|e| e.kind()), Some(ExceptionKind::ValueError));
    let err = str_format("{0[0]}", &strs(&["a"]), &[]).err();
    assert_eq!(err.map(|e| e.kind()), Some(ExceptionKind::ValueError));
}

#[test]
fn str_format_errors() {
    assert_eq!(
        str_format("{}", &[], &[]).err().map(|e| e.kind()),
        Some(ExceptionKind::IndexError)
    );
    assert_eq!(
        str_format("{missing}", &[], &[]).err().map(|e| e.kind()),
        Some(ExceptionKind::KeyError)
    );
    assert!(str_format("{0} {}", &strs(&["a", "b"]), &[]).is_err());
    assert!(str_format("oops }", &[], &[]).is_err());
}
