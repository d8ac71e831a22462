//! JSON helpers for the files Applymail reads and writes.
//!
//! Output is stable so stored files diff cleanly:
//! - 2-space indentation
//! - Trailing newline
//! - Keys in map order (`BTreeMap` sorts, `preserve_order` maps keep insertion order)

mod json;

pub use json::*;
