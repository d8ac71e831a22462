//! Application use cases.

mod render_preview;

pub use render_preview::*;
