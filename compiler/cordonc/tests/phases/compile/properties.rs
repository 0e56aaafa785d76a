//! Verdict properties of `compile` over generated expressions.

use cordonc::{compile, Mode, NameRegistry};
use proptest::prelude::*;

use crate::common::{trust, vet, FILENAME};

/// An expression atom, and whether the guard must refuse it.
fn atom() -> impl Strategy<Value = (String, bool)> {
    let mut forbidden: Vec<String> = NameRegistry::global().iter().map(str::to_owned).collect();
    forbidden.sort_unstable();
    prop_oneof![
        prop::sample::select(vec!["x", "price", "len", "abs", "max", "True", "None"])
            .prop_map(|name| (name.to_owned(), false)),
        (0u32..1000).prop_map(|n| (n.to_string(), false)),
        "[a-z]{1,6}".prop_map(|s| (format!("'{s}'"), false)),
        prop::sample::select(forbidden).prop_map(|name| (name, true)),
        "[a-z_]{0,6}".prop_map(|suffix| (format!("__{suffix}"), true)),
    ]
}

/// Atoms joined by binary operators, optionally wrapped in a display or a
/// call to a caller-supplied function. Stray closers make some of them
/// unparseable.
fn expression() -> impl Strategy<Value = (String, bool)> {
    (
        prop::collection::vec(
            (atom(), prop::sample::select(vec![" + ", " * ", " and ", " < ", " or "])),
            1..6,
        ),
        prop::sample::select(vec![("", ""), ("[", "]"), ("f(", ")"), ("(", ")"), ("", ")")]),
    )
        .prop_map(|(parts, (open, close))| {
            let forbidden = parts.iter().any(|((_, forbidden), _)| *forbidden);
            let mut text = open.to_owned();
            for (i, ((atom, _), op)) in parts.iter().enumerate() {
                if i > 0 {
                    text.push_str(op);
                }
                text.push_str(atom);
            }
            text.push_str(close);
            (text, forbidden)
        })
}

proptest! {
    #[test]
    fn compiling_twice_gives_the_same_verdict((text, _) in expression()) {
        let first = vet(&text).err();
        let second = vet(&text).err();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn trusted_and_vetted_agree_on_syntax((text, _) in expression()) {
        let trusted = trust(&text, Mode::Expression).err();
        let vetted = vet(&text).err();
        prop_assert_eq!(trusted.is_some(), vetted.as_ref().is_some_and(|e| e.is_parse()));
        if let Some(err) = trusted {
            prop_assert_eq!(Some(err), vetted);
        }
    }

    #[test]
    fn verdict_follows_the_names_used((text, forbidden) in expression()) {
        prop_assume!(trust(&text, Mode::Expression).is_ok());
        match compile(&text, Mode::Expression, FILENAME, false) {
            Ok(compiled) => {
                prop_assert!(!forbidden, "{} was accepted", text);
                prop_assert!(compiled.is_vetted());
            }
            Err(err) => {
                prop_assert!(forbidden, "{} was rejected: {}", text, err);
                prop_assert!(err.is_safety());
            }
        }
    }
}
