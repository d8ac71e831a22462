//! Applymail Domain - Core template types
//!
//! This crate defines the domain model of the template core: the placeholder
//! registry, variable categories, data sources, design configuration,
//! favorites/recents state and editor selections.
//! All types here are pure Rust with no I/O dependencies.

pub mod editing;
pub mod error;
pub mod id;
pub mod template;
pub mod usage;
pub mod variable;

pub use editing::{LinePosition, Selection};
pub use error::{DomainError, DomainResult};
pub use id::generate_draft_id;
pub use template::{DesignConfig, STARTER_HTML, STARTER_SUBJECT, TemplateDocument};
pub use usage::{FAVORITES_STORAGE_KEY, FavoriteSet, MAX_RECENT, RecentlyUsed};
pub use variable::{
    Category, CategoryFilter, CategoryId, DataMap, PlaceholderRegistry, ResolvedValue,
    ValueSource, ValueSources, Variable,
};
