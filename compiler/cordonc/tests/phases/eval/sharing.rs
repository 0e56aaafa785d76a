use std::sync::Arc;
use std::thread;

use cordon_eval::Value;
use cordonc::CompiledExpression;
use pretty_assertions::assert_eq;

use crate::common::{env, vet};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn compiled_expressions_are_send_and_sync() {
    assert_send_sync::<CompiledExpression>();
    assert_send_sync::<cordonc::NameRegistry>();
}

#[test]
fn one_expression_evaluated_from_many_threads() {
    let compiled = Arc::new(vet("n * 2 + 1").unwrap());
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let compiled = Arc::clone(&compiled);
            thread::spawn(move || {
                let bindings = env(&[("n", Value::Int(n))]);
                match compiled.eval(&bindings).unwrap() {
                    Value::Int(v) => v,
                    other => panic!("unexpected {other:?}"),
                }
            })
        })
        .collect();
    let results: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, (0..8).map(|n| n * 2 + 1).collect::<Vec<_>>());
}

#[test]
fn compiling_concurrently_gives_the_same_verdicts() {
    let sources = ["x + 1", "open('f')", "x.__class__", "abs(-x)"];
    let handles: Vec<_> = sources
        .iter()
        .map(|&source| thread::spawn(move || vet(source).is_ok()))
        .collect();
    let verdicts: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(verdicts, vec![true, false, false, true]);
}
