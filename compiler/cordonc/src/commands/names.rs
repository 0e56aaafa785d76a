//! The `names` command.

use std::process::ExitCode;

use cordon_guard::{NameRegistry, ALLOWED_NAMES};

/// Print the forbidden builtin names, one per line, sorted. With `allowed`,
/// print the allowlist instead.
pub fn list_names(allowed: bool) -> ExitCode {
    let mut names: Vec<&str> = if allowed {
        ALLOWED_NAMES.to_vec()
    } else {
        NameRegistry::global().iter().collect()
    };
    names.sort_unstable();
    for name in names {
        println!("{name}");
    }
    ExitCode::SUCCESS
}
