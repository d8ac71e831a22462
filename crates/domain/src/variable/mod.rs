//! Template variables, categories and value sources

mod category;
mod registry;
mod sources;
mod values;

pub use category::{Category, CategoryFilter, CategoryId};
pub use registry::PlaceholderRegistry;
pub use sources::{ResolvedValue, ValueSource, ValueSources};
pub use values::{DataMap, data_map, present_value, value_to_string};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A named, described content slot that can appear in a template as a
/// single-brace token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    /// Unique key of the variable (e.g. `companyName`).
    pub name: String,

    /// Human readable description shown in the catalog.
    pub description: String,

    /// Canonical token form, e.g. `{companyName}`.
    pub placeholder: String,
}

impl Variable {
    /// Creates a variable whose placeholder is the canonical `{name}` token.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let placeholder = Self::token_for(&name);
        Self {
            name,
            description: description.into(),
            placeholder,
        }
    }

    /// Creates a variable after checking that the name can be written as a token.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidVariableName`] if the name is empty or
    /// contains characters other than letters, digits, `_` or `-`.
    pub fn try_new(name: impl Into<String>, description: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if !is_valid_variable_name(&name) {
            return Err(DomainError::InvalidVariableName(name));
        }
        Ok(Self::new(name, description))
    }

    /// Returns the canonical single-brace token for a name.
    #[must_use]
    pub fn token_for(name: &str) -> String {
        format!("{{{name}}}")
    }
}

/// Validates a variable name.
/// Valid names start with a letter or underscore and continue with
/// letters, digits, underscores or hyphens.
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
