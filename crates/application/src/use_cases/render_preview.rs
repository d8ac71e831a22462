//! Render preview use case.

use applymail_domain::{PlaceholderRegistry, TemplateDocument, ValueSource, ValueSources};
use tracing::debug;

use crate::ports::Clock;
use crate::variable_resolver::{Escape, TokenSyntax, ValueResolver, render_detailed};

/// Input for rendering a template preview.
#[derive(Debug, Clone)]
pub struct RenderPreviewInput {
    /// The template to render.
    pub document: TemplateDocument,
    /// Company, user and default values.
    pub sources: ValueSources,
    /// HTML-escape substituted values.
    pub safe: bool,
}

/// Output from rendering a template preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPreviewOutput {
    /// The rendered subject line.
    pub subject: String,
    /// The rendered HTML body.
    pub html: String,
    /// Content tokens left as written because no value exists for them.
    pub unresolved: Vec<String>,
    /// Content tokens rendered as their `[name]` marker.
    pub placeholders: Vec<String>,
    /// Style tokens the design config does not define.
    pub unknown_styles: Vec<String>,
}

impl RenderPreviewOutput {
    /// Whether every token in the template received a real value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.placeholders.is_empty() && self.unknown_styles.is_empty()
    }
}

/// Use case for rendering the live preview of a template document.
///
/// Style tokens are substituted first from the design config, then content
/// variables from the resolved values of every registered variable and every
/// key the sources carry.
pub struct RenderPreview<C: Clock> {
    registry: PlaceholderRegistry,
    clock: C,
}

impl<C: Clock> RenderPreview<C> {
    /// Creates a new `RenderPreview` use case.
    #[must_use]
    pub const fn new(registry: PlaceholderRegistry, clock: C) -> Self {
        Self { registry, clock }
    }

    /// Renders the subject and body of the document.
    #[must_use]
    pub fn execute(&self, input: RenderPreviewInput) -> RenderPreviewOutput {
        let escape = if input.safe { Escape::Html } else { Escape::None };
        let resolver = ValueResolver::new(input.sources, &self.clock);

        let mut names: Vec<String> = self.registry.variables().map(|v| v.name.clone()).collect();
        for key in resolver.sources().all_names() {
            if !names.contains(&key) {
                names.push(key);
            }
        }
        let content = resolver.resolve_all(names.iter().map(String::as_str));

        let style_map = input.document.design_config.token_map();
        let styled = render_detailed(
            &input.document.html_content,
            TokenSyntax::Style,
            &style_map,
            escape,
        );
        let body = render_detailed(&styled.rendered, TokenSyntax::Content, &content, escape);
        let subject = render_detailed(&input.document.subject, TokenSyntax::Content, &content, escape);

        let mut unresolved = body.untouched;
        for name in subject.untouched {
            if !unresolved.contains(&name) {
                unresolved.push(name);
            }
        }

        let mut placeholders = Vec::new();
        for name in body.replaced.iter().chain(subject.replaced.iter()) {
            if !placeholders.contains(name)
                && resolver.resolve_detailed(name).source == ValueSource::Fallback
            {
                placeholders.push(name.clone());
            }
        }

        debug!(
            template = %input.document.name,
            replaced = body.replaced.len(),
            unresolved = unresolved.len(),
            "rendered preview"
        );

        RenderPreviewOutput {
            subject: subject.rendered,
            html: body.rendered,
            unresolved,
            placeholders,
            unknown_styles: styled.untouched,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use applymail_domain::DesignConfig;
    use applymail_domain::variable::data_map;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap()
        }

        fn today(&self) -> chrono::NaiveDate {
            self.now().date_naive()
        }
    }

    fn use_case() -> RenderPreview<FixedClock> {
        RenderPreview::new(PlaceholderRegistry::standard(), FixedClock)
    }

    fn input(document: TemplateDocument, sources: ValueSources, safe: bool) -> RenderPreviewInput {
        RenderPreviewInput {
            document,
            sources,
            safe,
        }
    }

    #[test]
    fn test_starter_template_with_company() {
        let registry = PlaceholderRegistry::standard();
        let sources = ValueSources::new()
            .with_company(data_map(json!({"companyName": "Acme", "position": "Engineer"})))
            .with_registry_defaults(&registry);
        let output = use_case().execute(input(TemplateDocument::starter("Default"), sources, false));

        assert_eq!(output.subject, "Job Application - Engineer");
        assert!(output.html.contains("<strong>Acme</strong>"));
        assert!(output.html.contains("<strong>Engineer</strong>"));
        assert!(output.html.contains("<strong>Your Name</strong>"));
        assert!(output.html.contains("color: #6366f1"));
        assert!(!output.html.contains("{{"));
        assert!(output.is_complete());
    }

    #[test]
    fn test_missing_values_render_markers() {
        let document = TemplateDocument::starter("t").with_html("Hi {contactPerson}");
        let output = use_case().execute(input(document, ValueSources::new(), false));
        assert_eq!(output.html, "Hi [contactPerson]");
        assert_eq!(output.placeholders, vec!["contactPerson", "position"]);
        assert!(output.unresolved.is_empty());
    }

    #[test]
    fn test_unknown_tokens_stay_literal() {
        let document = TemplateDocument::starter("t")
            .with_html("{greeting} {{shadow}} {currentYear}")
            .with_subject("{greeting}");
        let output = use_case().execute(input(document, ValueSources::new(), false));
        assert_eq!(output.html, "{greeting} {{shadow}} 2026");
        assert_eq!(output.subject, "{greeting}");
        assert_eq!(output.unresolved, vec!["greeting"]);
        assert_eq!(output.unknown_styles, vec!["shadow"]);
    }

    #[test]
    fn test_source_keys_beyond_registry_are_substituted() {
        let document = TemplateDocument::starter("t").with_html("{referral}");
        let sources = ValueSources::new().with_user(data_map(json!({"referral": "Grace"})));
        let output = use_case().execute(input(document, sources, false));
        assert_eq!(output.html, "Grace");
    }

    #[test]
    fn test_safe_preview_escapes_values() {
        let document = TemplateDocument::starter("t").with_html("<b>{companyName}</b>");
        let sources =
            ValueSources::new().with_company(data_map(json!({"companyName": "<script>x</script>"})));
        let output = use_case().execute(input(document, sources, true));
        assert_eq!(output.html, "<b>&lt;script&gt;x&lt;/script&gt;</b>");
    }

    #[test]
    fn test_custom_design() {
        let design = DesignConfig {
            primary_color: "#000000".into(),
            ..DesignConfig::default()
        };
        let document = TemplateDocument::starter("t")
            .with_html("<h1 style=\"color: {{primaryColor}}\">x</h1>")
            .with_design(design);
        let output = use_case().execute(input(document, ValueSources::new(), false));
        assert_eq!(output.html, "<h1 style=\"color: #000000\">x</h1>");
    }
}
