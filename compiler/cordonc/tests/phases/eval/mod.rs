//! Evaluation phase tests.
//!
//! - `bindings` - compiled expressions against caller-supplied environments
//! - `sharing` - one compiled expression used from many threads

mod bindings;
mod sharing;
