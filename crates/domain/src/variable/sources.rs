//! Data sources consulted when resolving a variable's value.

use serde::{Deserialize, Serialize};

use super::registry::PlaceholderRegistry;
use super::values::{DataMap, present_value};

/// Where a resolved value came from. Higher precedence wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// Nothing matched; the value is the bracketed name.
    Fallback = 0,
    /// Computed at resolution time (`currentDate`, `currentYear`).
    Dynamic = 1,
    /// Static sample value.
    Default = 2,
    /// The applicant's profile.
    User = 3,
    /// The company record.
    Company = 4,
}

impl ValueSource {
    /// Returns the precedence level (higher = takes priority).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        *self as u8
    }

    /// Returns a human-readable name for the source.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Fallback => "Fallback",
            Self::Dynamic => "Dynamic",
            Self::Default => "Default",
            Self::User => "User",
            Self::Company => "Company",
        }
    }
}

/// A resolved variable with its value and origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    /// The variable name (without braces).
    pub name: String,
    /// The text to substitute.
    pub value: String,
    /// Where the value came from.
    pub source: ValueSource,
}

impl ResolvedValue {
    /// Creates the bracketed fallback for a name nothing could resolve.
    #[must_use]
    pub fn fallback(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: format!("[{name}]"),
            source: ValueSource::Fallback,
        }
    }
}

/// Holds the static data sources for value resolution.
///
/// Sources are consulted in order of precedence (highest wins):
/// 1. Company record
/// 2. User profile
/// 3. Static defaults
///
/// Dynamic values and the bracketed fallback are handled by the resolver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSources {
    /// Company record fields.
    pub company: DataMap,
    /// User profile fields.
    pub user: DataMap,
    /// Static default values.
    pub defaults: DataMap,
}

impl ValueSources {
    /// Creates empty sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the company source.
    #[must_use]
    pub fn with_company(mut self, company: DataMap) -> Self {
        self.company = company;
        self
    }

    /// Sets the user source.
    #[must_use]
    pub fn with_user(mut self, user: DataMap) -> Self {
        self.user = user;
        self
    }

    /// Sets the defaults source.
    #[must_use]
    pub fn with_defaults(mut self, defaults: DataMap) -> Self {
        self.defaults = defaults;
        self
    }

    /// Uses the registry's sample values as defaults.
    #[must_use]
    pub fn with_registry_defaults(self, registry: &PlaceholderRegistry) -> Self {
        self.with_defaults(registry.default_values())
    }

    /// Looks a name up in the static sources.
    /// Returns None if no source holds a present value.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ResolvedValue> {
        [
            (&self.company, ValueSource::Company),
            (&self.user, ValueSource::User),
            (&self.defaults, ValueSource::Default),
        ]
        .into_iter()
        .find_map(|(map, source)| {
            present_value(map.get(name)).map(|value| ResolvedValue {
                name: name.to_string(),
                value,
                source,
            })
        })
    }

    /// Returns every key across all sources, first occurrence order,
    /// company keys first.
    #[must_use]
    pub fn all_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for key in self
            .company
            .keys()
            .chain(self.user.keys())
            .chain(self.defaults.keys())
        {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
        names
    }
}
