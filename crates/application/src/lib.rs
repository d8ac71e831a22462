//! Applymail Application - Template core services and ports
//!
//! This crate defines the application layer with:
//! - Port traits (clock, key-value storage, cancellable timer, editable buffer)
//! - The token parser, substitution engine and value resolver
//! - The variable catalog controller with debounced search
//! - Cursor-aware token insertion
//! - Preview rendering of whole template documents

pub mod catalog;
pub mod debounce;
pub mod editing;
pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use catalog::{
    SEARCH_DEBOUNCE, VariableCatalog, VariablePreview, VisibleVariable, try_load_favorites,
};
pub use debounce::{ClockTimer, Debouncer};
pub use editing::insert_token;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{CancellableTimer, Clock, EditableBuffer, KeyValueStore, StorageError};
pub use use_cases::{RenderPreview, RenderPreviewInput, RenderPreviewOutput};
pub use variable_resolver::{
    DynamicValues, Escape, RenderResult, TokenReference, TokenSyntax, ValueResolver, render,
    render_content, render_style,
};
