//! Compile phase tests.
//!
//! - `scenarios` - accept/reject verdicts for representative sources
//! - `parse_errors` - parse failures stay distinct from safety violations
//! - `trusted` - the guard-skipping path
//! - `properties` - generated sources: repeatable verdicts, syntax errors first

mod parse_errors;
mod properties;
mod scenarios;
mod trusted;
