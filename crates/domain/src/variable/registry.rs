//! Static catalog of known template variables.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde_json::Value;

use super::category::{Category, CategoryId};
use super::values::DataMap;
use super::{Variable, is_valid_variable_name};
use crate::error::{DomainError, DomainResult};

/// Names whose values are computed at render time rather than looked up.
pub const DYNAMIC_VARIABLES: [&str; 2] = ["currentDate", "currentYear"];

static STANDARD: LazyLock<PlaceholderRegistry> = LazyLock::new(PlaceholderRegistry::standard);

/// An indexed entry of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    variable: Variable,
    category: CategoryId,
}

/// Static catalog of variables grouped into categories.
///
/// Categories and the variables within them keep declaration order, so
/// listings are deterministic. A flat name index is built once at
/// construction and serves every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRegistry {
    categories: Vec<Category>,
    index: IndexMap<String, Entry>,
    defaults: IndexMap<String, String>,
}

impl PlaceholderRegistry {
    /// Builds a registry from real categories and sample default values.
    ///
    /// # Errors
    ///
    /// Returns an error if a computed category is given, a variable name is
    /// invalid, or a name is declared by more than one category.
    pub fn new<I, K, V>(categories: Vec<Category>, defaults: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut seen = HashSet::new();
        for category in &categories {
            if category.id.is_computed() {
                return Err(DomainError::ComputedCategory(category.id.to_string()));
            }
            for variable in &category.variables {
                if !is_valid_variable_name(&variable.name) {
                    return Err(DomainError::InvalidVariableName(variable.name.clone()));
                }
                if !seen.insert(variable.name.as_str()) {
                    return Err(DomainError::DuplicateVariable(variable.name.clone()));
                }
            }
        }

        Ok(Self::assemble(categories, defaults))
    }

    fn assemble<I, K, V>(categories: Vec<Category>, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let index = categories
            .iter()
            .flat_map(|category| {
                category.variables.iter().map(|variable| {
                    (
                        variable.name.clone(),
                        Entry {
                            variable: variable.clone(),
                            category: category.id,
                        },
                    )
                })
            })
            .collect();

        Self {
            categories,
            index,
            defaults: defaults
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the shared built-in catalog.
    #[must_use]
    pub fn shared() -> &'static Self {
        &STANDARD
    }

    /// Builds the built-in catalog of job application variables.
    #[must_use]
    pub fn standard() -> Self {
        let v = Variable::new;
        let categories = vec![
            Category::new(
                CategoryId::Company,
                vec![
                    v("companyName", "Company name"),
                    v("companyEmail", "Company email"),
                    v("companyWebsite", "Company website"),
                    v("industry", "Company industry"),
                ],
            ),
            Category::new(
                CategoryId::Personal,
                vec![
                    v("userName", "Your full name"),
                    v("userEmail", "Your email"),
                    v("userTitle", "Your title"),
                    v("userPhone", "Your phone"),
                    v("userLocation", "Your location"),
                ],
            ),
            Category::new(
                CategoryId::Job,
                vec![
                    v("position", "Job position"),
                    v("jobLocation", "Job location"),
                    v("salaryRange", "Salary range"),
                ],
            ),
            Category::new(
                CategoryId::Dynamic,
                vec![
                    v("currentDate", "Current date"),
                    v("currentYear", "Current year"),
                ],
            ),
            Category::new(
                CategoryId::Contact,
                vec![
                    v("contactPerson", "Contact person"),
                    v("hiringManager", "Hiring manager"),
                ],
            ),
        ];

        let defaults = [
            ("companyName", "ABC Company"),
            ("companyEmail", "hr@company.com"),
            ("companyWebsite", "www.company.com"),
            ("industry", "Technology"),
            ("userName", "Your Name"),
            ("userEmail", "your@email.com"),
            ("userTitle", "Your Title"),
            ("userPhone", "+1234567890"),
            ("userLocation", "New York, NY"),
            ("position", "Software Developer"),
            ("jobLocation", "Remote"),
            ("salaryRange", "$70,000 - $90,000"),
            ("contactPerson", "Hiring Manager"),
            ("hiringManager", "Hiring Manager"),
        ];

        Self::assemble(categories, defaults)
    }

    /// Returns the real categories in display order.
    /// Computed categories are never part of the registry.
    #[must_use]
    pub fn all_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Returns a real category by id.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Returns the canonical token of a registered variable.
    #[must_use]
    pub fn placeholder(&self, name: &str) -> Option<&str> {
        self.variable(name).map(|v| v.placeholder.as_str())
    }

    /// Returns a registered variable by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|e| &e.variable)
    }

    /// Returns the category declaring a variable.
    #[must_use]
    pub fn category_of(&self, name: &str) -> Option<CategoryId> {
        self.index.get(name).map(|e| e.category)
    }

    /// Returns true if the name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates every registered variable in category order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.index.values().map(|e| &e.variable)
    }

    /// Returns the number of registered variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the sample value of a variable.
    #[must_use]
    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    /// Returns all sample values as a data map.
    #[must_use]
    pub fn default_values(&self) -> DataMap {
        self.defaults
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }

    /// Returns true if the name is computed at render time.
    #[must_use]
    pub fn is_dynamic(name: &str) -> bool {
        DYNAMIC_VARIABLES.contains(&name)
    }
}

impl Default for PlaceholderRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
