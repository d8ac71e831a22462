//! Value resolver
//!
//! Resolves a variable name to the text shown in previews, in order of
//! precedence: company, user, static default, dynamic value, and finally
//! the bracketed `[name]` fallback.

use applymail_domain::{DataMap, ResolvedValue, ValueSource, ValueSources};
use serde_json::Value;

use super::builtins::DynamicValues;
use crate::ports::Clock;

/// Resolves variable values from the configured sources.
pub struct ValueResolver<C> {
    sources: ValueSources,
    clock: C,
    dynamic: bool,
}

impl<C: Clock> ValueResolver<C> {
    /// Creates a resolver over the given sources.
    /// Dynamic values are computed from `clock`.
    #[must_use]
    pub const fn new(sources: ValueSources, clock: C) -> Self {
        Self {
            sources,
            clock,
            dynamic: true,
        }
    }

    /// Enables or disables computed values for `currentDate` and `currentYear`.
    #[must_use]
    pub const fn with_dynamic_values(mut self, enabled: bool) -> Self {
        self.dynamic = enabled;
        self
    }

    /// Returns the current sources.
    #[must_use]
    pub const fn sources(&self) -> &ValueSources {
        &self.sources
    }

    /// Replaces the sources, e.g. when another company is selected.
    pub fn set_sources(&mut self, sources: ValueSources) {
        self.sources = sources;
    }

    /// Resolves a name to its display value. Never fails.
    #[must_use]
    pub fn resolve(&self, name: &str) -> String {
        self.resolve_detailed(name).value
    }

    /// Resolves a name and reports where the value came from.
    #[must_use]
    pub fn resolve_detailed(&self, name: &str) -> ResolvedValue {
        // 1-3. Company, user, static defaults
        if let Some(resolved) = self.sources.lookup(name) {
            return resolved;
        }

        // 4. Dynamic values, computed fresh
        if self.dynamic
            && let Some(value) = DynamicValues::resolve(name, self.clock.today())
        {
            return ResolvedValue {
                name: name.to_string(),
                value,
                source: ValueSource::Dynamic,
            };
        }

        // 5. Visible marker
        ResolvedValue::fallback(name)
    }

    /// Returns true if the name resolves to something other than the fallback.
    #[must_use]
    pub fn can_resolve(&self, name: &str) -> bool {
        self.resolve_detailed(name).source != ValueSource::Fallback
    }

    /// Resolves several names into a content map for the substitution engine.
    #[must_use]
    pub fn resolve_all<'a, I>(&self, names: I) -> DataMap
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .map(|name| (name.to_string(), Value::String(self.resolve(name))))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use applymail_domain::PlaceholderRegistry;
    use applymail_domain::variable::data_map;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde_json::json;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }

        fn today(&self) -> NaiveDate {
            self.0.date_naive()
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap())
    }

    fn full_sources() -> ValueSources {
        ValueSources::new()
            .with_company(data_map(json!({"companyName": "Acme", "position": null})))
            .with_user(data_map(json!({"companyName": "X", "userName": "Ada Lovelace"})))
            .with_registry_defaults(PlaceholderRegistry::shared())
    }

    #[test]
    fn test_company_wins_over_user_and_default() {
        let resolver = ValueResolver::new(full_sources(), clock());
        let resolved = resolver.resolve_detailed("companyName");
        assert_eq!(resolved.value, "Acme");
        assert_eq!(resolved.source, ValueSource::Company);
    }

    #[test]
    fn test_user_wins_over_default() {
        let resolver = ValueResolver::new(full_sources(), clock());
        assert_eq!(resolver.resolve("userName"), "Ada Lovelace");
    }

    #[test]
    fn test_null_company_value_falls_to_default() {
        let resolver = ValueResolver::new(full_sources(), clock());
        let resolved = resolver.resolve_detailed("position");
        assert_eq!(resolved.value, "Software Developer");
        assert_eq!(resolved.source, ValueSource::Default);
    }

    #[test]
    fn test_dynamic_values() {
        let resolver = ValueResolver::new(ValueSources::new(), clock());
        assert_eq!(resolver.resolve("currentDate"), "10/18/2026");
        assert_eq!(resolver.resolve("currentYear"), "2026");
        assert_eq!(
            resolver.resolve_detailed("currentYear").source,
            ValueSource::Dynamic
        );
    }

    #[test]
    fn test_static_value_beats_dynamic() {
        let sources =
            ValueSources::new().with_defaults(data_map(json!({"currentYear": "1999"})));
        let resolver = ValueResolver::new(sources, clock());
        assert_eq!(resolver.resolve("currentYear"), "1999");
    }

    #[test]
    fn test_unresolved_falls_back_to_brackets() {
        let resolver = ValueResolver::new(ValueSources::new(), clock());
        assert_eq!(resolver.resolve("hiringManager"), "[hiringManager]");
        assert!(!resolver.can_resolve("hiringManager"));
    }

    #[test]
    fn test_every_registered_variable_falls_back_with_empty_sources() {
        let resolver = ValueResolver::new(ValueSources::new(), clock()).with_dynamic_values(false);
        for variable in PlaceholderRegistry::shared().variables() {
            assert_eq!(
                resolver.resolve(&variable.name),
                format!("[{}]", variable.name)
            );
        }
    }

    #[test]
    fn test_resolve_all() {
        let resolver = ValueResolver::new(full_sources(), clock());
        let map = resolver.resolve_all(["companyName", "unknown"]);
        assert_eq!(map["companyName"], "Acme");
        assert_eq!(map["unknown"], "[unknown]");
    }

    #[test]
    fn test_set_sources() {
        let mut resolver = ValueResolver::new(ValueSources::new(), clock());
        assert_eq!(resolver.resolve("industry"), "[industry]");
        resolver.set_sources(
            ValueSources::new().with_company(data_map(json!({"industry": "Fintech"}))),
        );
        assert_eq!(resolver.resolve("industry"), "Fintech");
    }
}
