//! Cordon Guard - static vetting of untrusted syntax trees.
//!
//! A source authored outside the host's control must never reach the
//! interpreter unchecked. This crate decides, before anything runs, whether a
//! parsed tree stays inside the arithmetic/data sandbox:
//!
//! - [`NameRegistry`]: the forbidden names, derived as every ambient builtin
//!   minus [`ALLOWED_NAMES`]. A builtin added later is forbidden until
//!   someone allowlists it.
//! - [`Guard`]: a pre-order walk over the tree that stops at the first
//!   [`SafetyViolation`].
//!
//! # Example
//!
//! ```ignore
//! let tree = cordon_parse::parse("open('/etc/passwd')", Mode::Expression)?;
//! assert!(cordon_guard::check(&tree).is_err());
//! ```

mod guard;
mod registry;
mod violation;

pub use guard::{Guard, FORBIDDEN_NODE_KINDS, RESERVED_ATTRIBUTE_PREFIXES};
pub use registry::{NameRegistry, ALLOWED_NAMES};
pub use violation::SafetyViolation;

use cordon_ir::SyntaxTree;

/// Vet `tree` against the process-wide registry.
pub fn check(tree: &SyntaxTree) -> Result<(), SafetyViolation> {
    Guard::new(NameRegistry::global()).check(tree)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
