//! Substitution engine
//!
//! Replaces `{name}` or `{{name}}` tokens with values from a map in a single
//! pass. Substituted text is never rescanned, so a value containing braces
//! cannot trigger a second substitution.

use applymail_domain::DataMap;
use applymail_domain::variable::value_to_string;
use serde_json::Value;

use super::parser::{TokenSyntax, parse_tokens};

/// How substituted values are written into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escape {
    /// Values are inserted verbatim.
    #[default]
    None,
    /// Values are HTML-escaped before insertion.
    Html,
}

impl Escape {
    fn apply(self, value: &str) -> String {
        match self {
            Self::None => value.to_string(),
            Self::Html => escape_html(value),
        }
    }
}

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Result of substituting one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// The output text.
    pub rendered: String,

    /// Distinct token names that were replaced.
    pub replaced: Vec<String>,

    /// Distinct well-formed token names that had no value and were left as-is.
    pub untouched: Vec<String>,
}

impl RenderResult {
    /// Whether every well-formed token found a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.untouched.is_empty()
    }

    /// Returns the count of replaced names.
    #[must_use]
    pub fn replaced_count(&self) -> usize {
        self.replaced.len()
    }

    /// Returns the count of untouched names.
    #[must_use]
    pub fn untouched_count(&self) -> usize {
        self.untouched.len()
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// Substitutes tokens and reports what was and was not replaced.
///
/// Every token whose name is a key of `values` is replaced by that value's
/// text (`null` becomes the empty string). Tokens with no key are left
/// exactly as written.
#[must_use]
pub fn render_detailed(
    template: &str,
    syntax: TokenSyntax,
    values: &DataMap,
    escape: Escape,
) -> RenderResult {
    let references = parse_tokens(template, syntax);
    if references.is_empty() {
        return RenderResult {
            rendered: template.to_string(),
            replaced: Vec::new(),
            untouched: Vec::new(),
        };
    }

    let mut rendered = String::with_capacity(template.len());
    let mut replaced = Vec::new();
    let mut untouched = Vec::new();
    let mut last_end = 0;

    for reference in references {
        let Some(value) = values.get(&reference.name) else {
            if reference.has_valid_name() {
                push_unique(&mut untouched, &reference.name);
            }
            continue;
        };

        rendered.push_str(&template[last_end..reference.span.start]);
        rendered.push_str(&escape.apply(&value_to_string(value)));
        last_end = reference.span.end;
        push_unique(&mut replaced, &reference.name);
    }
    rendered.push_str(&template[last_end..]);

    RenderResult {
        rendered,
        replaced,
        untouched,
    }
}

/// Substitutes tokens of one syntax. Values are inserted verbatim.
#[must_use]
pub fn render(template: &str, syntax: TokenSyntax, values: &DataMap) -> String {
    render_detailed(template, syntax, values, Escape::None).rendered
}

/// Substitutes `{{name}}` style tokens.
#[must_use]
pub fn render_style(template: &str, values: &DataMap) -> String {
    render(template, TokenSyntax::Style, values)
}

/// Substitutes `{name}` content variables.
#[must_use]
pub fn render_content(template: &str, values: &DataMap) -> String {
    render(template, TokenSyntax::Content, values)
}

/// Coerces a loosely typed template value into text.
///
/// `null` becomes empty, strings pass through, an object carrying an
/// `htmlContent` field yields that field, anything else is serialized.
#[must_use]
pub fn normalize_template(template: &Value) -> String {
    match template {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("htmlContent")
            .map_or_else(|| value_to_string(template), normalize_template),
        other => value_to_string(other),
    }
}

/// Normalizes a loosely typed template, then substitutes it.
#[must_use]
pub fn render_loose(template: &Value, syntax: TokenSyntax, values: &DataMap) -> String {
    render(&normalize_template(template), syntax, values)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use applymail_domain::variable::data_map;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_content_replacement() {
        let values = data_map(json!({"companyName": "Acme", "position": "Engineer"}));
        assert_eq!(
            render_content("Applying to {companyName} as {position}.", &values),
            "Applying to Acme as Engineer."
        );
    }

    #[test]
    fn test_repeated_token_replaced_everywhere() {
        let values = data_map(json!({"userName": "Ada"}));
        assert_eq!(
            render_content("{userName}, {userName}!", &values),
            "Ada, Ada!"
        );
    }

    #[test]
    fn test_missing_key_left_untouched() {
        let values = data_map(json!({"companyName": "Acme"}));
        let result = render_detailed(
            "{companyName} / {hiringManager}",
            TokenSyntax::Content,
            &values,
            Escape::None,
        );
        assert_eq!(result.rendered, "Acme / {hiringManager}");
        assert_eq!(result.replaced, vec!["companyName"]);
        assert_eq!(result.untouched, vec!["hiringManager"]);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_null_and_number_values() {
        let values = data_map(json!({"a": null, "b": 42, "c": 1.5, "d": true}));
        assert_eq!(render_content("[{a}]{b}|{c}|{d}", &values), "[]42|1.5|true");
    }

    #[test]
    fn test_content_pass_ignores_style_tokens() {
        let values = data_map(json!({"primaryColor": "red"}));
        let template = "color: {{primaryColor}}";
        assert_eq!(render_content(template, &values), template);
    }

    #[test]
    fn test_style_pass_ignores_content_tokens() {
        let values = data_map(json!({"position": "#000"}));
        let template = "{position} {{position}}";
        assert_eq!(render_style(template, &values), "{position} #000");
    }

    #[test]
    fn test_style_then_content() {
        let style = data_map(json!({"fontSize": "16px"}));
        let content = data_map(json!({"userName": "Ada"}));
        let styled = render_style("<p style=\"font-size: {{fontSize}}\">{userName}</p>", &style);
        assert_eq!(
            render_content(&styled, &content),
            "<p style=\"font-size: 16px\">Ada</p>"
        );
    }

    #[test]
    fn test_idempotent_with_token_free_values() {
        let values = data_map(json!({"companyName": "Acme"}));
        let once = render_content("Dear {companyName} {unknown}", &values);
        let twice = render_content(&once, &values);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let values = data_map(json!({"a": "{b}", "b": "boom"}));
        assert_eq!(render_content("{a}", &values), "{b}");
    }

    #[test]
    fn test_css_blocks_survive() {
        let values = data_map(json!({"padding": "20px"}));
        let template = "p { margin: 0 } .x {padding: {padding}}";
        assert_eq!(
            render_content(template, &values),
            "p { margin: 0 } .x {padding: 20px}"
        );
    }

    #[test]
    fn test_no_tokens_passthrough() {
        let result = render_detailed("plain", TokenSyntax::Content, &DataMap::new(), Escape::None);
        assert_eq!(result.rendered, "plain");
        assert!(result.is_complete());
    }

    #[test]
    fn test_html_escape_applies_to_values_only() {
        let values = data_map(json!({"companyName": "<b>R&D</b>"}));
        let result = render_detailed(
            "<p>{companyName}</p>",
            TokenSyntax::Content,
            &values,
            Escape::Html,
        );
        assert_eq!(result.rendered, "<p>&lt;b&gt;R&amp;D&lt;/b&gt;</p>");
    }

    #[test]
    fn test_escape_html_quotes() {
        assert_eq!(escape_html("\"it's\""), "&quot;it&#039;s&quot;");
    }

    #[test]
    fn test_normalize_template() {
        assert_eq!(normalize_template(&Value::Null), "");
        assert_eq!(normalize_template(&json!("hi {x}")), "hi {x}");
        assert_eq!(normalize_template(&json!({"htmlContent": "<p/>"})), "<p/>");
        assert_eq!(normalize_template(&json!(7)), "7");
        assert_eq!(normalize_template(&json!({"other": 1})), "{\"other\":1}");
    }

    #[test]
    fn test_render_loose() {
        let values = data_map(json!({"position": "Engineer"}));
        assert_eq!(
            render_loose(
                &json!({"htmlContent": "<h1>{position}</h1>"}),
                TokenSyntax::Content,
                &values
            ),
            "<h1>Engineer</h1>"
        );
        assert_eq!(render_loose(&Value::Null, TokenSyntax::Content, &values), "");
    }
}
