//! Dynamic variables
//!
//! These variables are computed from the clock each time they are resolved.

use chrono::{Datelike, NaiveDate};

/// Information about a dynamic variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicInfo {
    /// Variable name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Example output.
    pub example: &'static str,
}

/// Generates values for the reserved dynamic variables.
pub struct DynamicValues;

impl DynamicValues {
    /// Resolves a dynamic variable for the given date.
    /// Returns None if the name is not a dynamic variable.
    #[must_use]
    pub fn resolve(name: &str, today: NaiveDate) -> Option<String> {
        match name {
            "currentDate" => Some(Self::format_date(today)),
            "currentYear" => Some(Self::format_year(today)),
            _ => None,
        }
    }

    /// Returns whether the name is a dynamic variable.
    #[must_use]
    pub fn is_dynamic(name: &str) -> bool {
        Self::available().iter().any(|d| d.name == name)
    }

    /// Returns all dynamic variables with descriptions.
    #[must_use]
    pub fn available() -> Vec<DynamicInfo> {
        vec![
            DynamicInfo {
                name: "currentDate",
                description: "Current date (M/D/YYYY)",
                example: "1/26/2024",
            },
            DynamicInfo {
                name: "currentYear",
                description: "Current year (YYYY)",
                example: "2024",
            },
        ]
    }

    /// Formats a date the way US-English locales print short dates.
    fn format_date(date: NaiveDate) -> String {
        format!("{}/{}/{}", date.month(), date.day(), date.year())
    }

    /// Formats the four-digit year.
    fn format_year(date: NaiveDate) -> String {
        format!("{:04}", date.year())
    }
}
