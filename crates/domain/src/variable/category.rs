//! Variable categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Variable;
use crate::error::DomainError;

/// Identifier of a variable category.
///
/// Declaration order is the display order of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    /// Variables the user starred. Computed from the favorite set.
    Favorites,
    /// Variables inserted during this session. Computed from the recents list.
    Recent,
    /// Company record fields.
    Company,
    /// The applicant's own profile fields.
    Personal,
    /// Details about the position.
    Job,
    /// Values computed at render time.
    Dynamic,
    /// People at the company.
    Contact,
}

impl CategoryId {
    /// Every category in display order.
    pub const ALL: [Self; 7] = [
        Self::Favorites,
        Self::Recent,
        Self::Company,
        Self::Personal,
        Self::Job,
        Self::Dynamic,
        Self::Contact,
    ];

    /// Returns the stable identifier used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::Recent => "recent",
            Self::Company => "company",
            Self::Personal => "personal",
            Self::Job => "job",
            Self::Dynamic => "dynamic",
            Self::Contact => "contact",
        }
    }

    /// Returns the name shown on the category button.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Favorites => "Favorites",
            Self::Recent => "Recently Used",
            Self::Company => "Company Info",
            Self::Personal => "Personal Info",
            Self::Job => "Job Details",
            Self::Dynamic => "Dynamic Content",
            Self::Contact => "Contact Info",
        }
    }

    /// Returns the icon token of the category.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Favorites => "fas fa-star",
            Self::Recent => "fas fa-history",
            Self::Company => "fas fa-building",
            Self::Personal => "fas fa-user",
            Self::Job => "fas fa-briefcase",
            Self::Dynamic => "fas fa-sync",
            Self::Contact => "fas fa-address-book",
        }
    }

    /// Returns the accent color of the category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Favorites | Self::Personal => "#f59e0b",
            Self::Recent | Self::Dynamic => "#8b5cf6",
            Self::Company => "#6366f1",
            Self::Job => "#10b981",
            Self::Contact => "#ef4444",
        }
    }

    /// Returns true for categories derived from user state instead of the registry.
    #[must_use]
    pub const fn is_computed(self) -> bool {
        matches!(self, Self::Favorites | Self::Recent)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCategory(s.to_string()))
    }
}

/// The category selection of the catalog: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Only the given category.
    Only(CategoryId),
}

impl CategoryFilter {
    /// Returns true if the filter lets the category through.
    #[must_use]
    pub fn admits(self, id: CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == id,
        }
    }
}

impl From<CategoryId> for CategoryFilter {
    fn from(id: CategoryId) -> Self {
        Self::Only(id)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(id) => id.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// A named grouping of variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Variables in declaration order.
    pub variables: Vec<Variable>,
}

impl Category {
    /// Creates a category with the given variables.
    #[must_use]
    pub const fn new(id: CategoryId, variables: Vec<Variable>) -> Self {
        Self { id, variables }
    }

    /// Returns the display name of the category.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        self.id.display_name()
    }

    /// Returns the icon token of the category.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        self.id.icon()
    }

    /// Returns the accent color of the category.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        self.id.color()
    }

    /// Returns true if the category has nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_category_id_roundtrips_through_str() {
        for id in CategoryId::ALL {
            assert_eq!(id.as_str().parse::<CategoryId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_category() {
        let err = "billing".parse::<CategoryId>().unwrap_err();
        assert_eq!(err, DomainError::UnknownCategory("billing".to_string()));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "company".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(CategoryId::Company)
        );
        assert!("everything".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_admits() {
        assert!(CategoryFilter::All.admits(CategoryId::Job));
        assert!(CategoryFilter::Only(CategoryId::Job).admits(CategoryId::Job));
        assert!(!CategoryFilter::Only(CategoryId::Job).admits(CategoryId::Contact));
    }

    #[test]
    fn test_computed_categories() {
        let computed: Vec<_> = CategoryId::ALL
            .into_iter()
            .filter(|id| id.is_computed())
            .collect();
        assert_eq!(computed, vec![CategoryId::Favorites, CategoryId::Recent]);
    }

    #[test]
    fn test_category_metadata() {
        let category = Category::new(CategoryId::Company, Vec::new());
        assert_eq!(category.display_name(), "Company Info");
        assert_eq!(category.icon(), "fas fa-building");
        assert_eq!(category.color(), "#6366f1");
        assert!(category.is_empty());
    }
}
