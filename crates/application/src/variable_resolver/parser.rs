//! Token parser for `{name}` and `{{name}}` syntax
//!
//! Scans strings for token references and reports them with their positions.
//! Braces are ASCII, so scanning bytes never splits a UTF-8 character.

use std::ops::Range;

use applymail_domain::variable::is_valid_variable_name;

/// Which token namespace to scan for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSyntax {
    /// Single-brace content variables, e.g. `{position}`.
    Content,
    /// Double-brace style tokens, e.g. `{{primaryColor}}`.
    Style,
}

impl TokenSyntax {
    /// Number of braces on each side of a token.
    #[must_use]
    pub const fn brace_width(self) -> usize {
        match self {
            Self::Content => 1,
            Self::Style => 2,
        }
    }

    /// Wraps a name in this syntax's braces.
    #[must_use]
    pub fn wrap(self, name: &str) -> String {
        match self {
            Self::Content => format!("{{{name}}}"),
            Self::Style => format!("{{{{{name}}}}}"),
        }
    }
}

/// Represents a parsed token reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReference {
    /// The token name (without braces).
    pub name: String,

    /// The namespace the token belongs to.
    pub syntax: TokenSyntax,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

impl TokenReference {
    /// Creates a new token reference.
    #[must_use]
    pub fn new(name: impl Into<String>, syntax: TokenSyntax, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            syntax,
            span,
        }
    }

    /// Returns true if the name could be a registered variable.
    #[must_use]
    pub fn has_valid_name(&self) -> bool {
        is_valid_variable_name(&self.name)
    }
}

enum NameScan {
    /// A closing brace was found after this many bytes.
    Closed(usize),
    /// An opening brace was found after this many bytes.
    Reopened(usize),
    /// The input ended first.
    Unterminated,
}

fn run_length(bytes: &[u8], byte: u8) -> usize {
    bytes.iter().take_while(|&&b| b == byte).count()
}

fn scan_name(bytes: &[u8]) -> NameScan {
    for (offset, &b) in bytes.iter().enumerate() {
        match b {
            b'}' => return NameScan::Closed(offset),
            b'{' => return NameScan::Reopened(offset),
            _ => {}
        }
    }
    NameScan::Unterminated
}

/// Parses a string and extracts all token references of one syntax.
///
/// A token opens with exactly as many braces as the syntax uses, so the
/// content scan never matches inside `{{style}}` tokens and the style scan
/// never matches `{content}` tokens. Unbalanced braces are skipped.
///
/// # Examples
///
/// ```
/// use applymail_application::variable_resolver::parser::{TokenSyntax, parse_tokens};
///
/// let input = "<p style=\"color: {{textColor}}\">Hi {userName}</p>";
/// let content = parse_tokens(input, TokenSyntax::Content);
/// assert_eq!(content.len(), 1);
/// assert_eq!(content[0].name, "userName");
///
/// let style = parse_tokens(input, TokenSyntax::Style);
/// assert_eq!(style[0].name, "textColor");
/// ```
#[must_use]
pub fn parse_tokens(input: &str, syntax: TokenSyntax) -> Vec<TokenReference> {
    let bytes = input.as_bytes();
    let width = syntax.brace_width();
    let mut references = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }

        let run = run_length(&bytes[i..], b'{');
        if run != width {
            i += run;
            continue;
        }

        let name_start = i + run;
        match scan_name(&bytes[name_start..]) {
            NameScan::Closed(len) => {
                let name_end = name_start + len;
                let closing = run_length(&bytes[name_end..], b'}');
                if len > 0 && closing >= width {
                    references.push(TokenReference::new(
                        &input[name_start..name_end],
                        syntax,
                        i..name_end + width,
                    ));
                    i = name_end + width;
                } else {
                    i = name_end + closing;
                }
            }
            NameScan::Reopened(len) => i = name_start + len,
            NameScan::Unterminated => break,
        }
    }

    references
}

/// Returns true if the input contains at least one token of the syntax.
#[must_use]
pub fn has_tokens(input: &str, syntax: TokenSyntax) -> bool {
    !parse_tokens(input, syntax).is_empty()
}

/// Extracts the distinct, well-formed token names in order of first use.
///
/// Brace pairs whose content is not a valid name (CSS blocks, prose) are left out.
#[must_use]
pub fn extract_token_names(input: &str, syntax: TokenSyntax) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for reference in parse_tokens(input, syntax) {
        if reference.has_valid_name() && !names.contains(&reference.name) {
            names.push(reference.name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(input: &str, syntax: TokenSyntax) -> Vec<String> {
        parse_tokens(input, syntax)
            .into_iter()
            .map(|r| r.name)
            .collect()
    }

    #[test]
    fn test_parse_content_token() {
        let refs = parse_tokens("{position}", TokenSyntax::Content);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "position");
        assert_eq!(refs[0].span, 0..10);
    }

    #[test]
    fn test_parse_style_token() {
        let refs = parse_tokens("{{padding}}", TokenSyntax::Style);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "padding");
        assert_eq!(refs[0].span, 0..11);
    }

    #[test]
    fn test_content_scan_skips_style_tokens() {
        assert!(names("{{backgroundColor}}", TokenSyntax::Content).is_empty());
        assert_eq!(
            names("{{backgroundColor}} and {position}", TokenSyntax::Content),
            vec!["position"]
        );
    }

    #[test]
    fn test_style_scan_skips_content_tokens() {
        assert_eq!(
            names("{{backgroundColor}} and {position}", TokenSyntax::Style),
            vec!["backgroundColor"]
        );
    }

    #[test]
    fn test_adjacent_tokens() {
        assert_eq!(
            names("{a}{b}{c}", TokenSyntax::Content),
            vec!["a", "b", "c"]
        );
        assert_eq!(names("{{a}}{{b}}", TokenSyntax::Style), vec!["a", "b"]);
    }

    #[test]
    fn test_unclosed_token() {
        assert!(names("{position", TokenSyntax::Content).is_empty());
        assert!(names("{{padding}", TokenSyntax::Style).is_empty());
    }

    #[test]
    fn test_empty_token() {
        assert!(names("{}", TokenSyntax::Content).is_empty());
        assert!(names("{{}}", TokenSyntax::Style).is_empty());
    }

    #[test]
    fn test_reopened_brace_restarts_scan() {
        assert_eq!(
            names("p { margin: {padding} }", TokenSyntax::Content),
            vec!["padding"]
        );
    }

    #[test]
    fn test_triple_braces_are_ignored() {
        assert!(names("{{{a}}}", TokenSyntax::Content).is_empty());
        assert!(names("{{{a}}}", TokenSyntax::Style).is_empty());
    }

    #[test]
    fn test_multibyte_text_around_tokens() {
        let input = "Grüße {userName} · 東京 {position}";
        let refs = parse_tokens(input, TokenSyntax::Content);
        assert_eq!(refs.len(), 2);
        assert_eq!(&input[refs[0].span.clone()], "{userName}");
        assert_eq!(&input[refs[1].span.clone()], "{position}");
    }

    #[test]
    fn test_extract_token_names_dedups_and_filters() {
        let input = "{position} {position} { color: red; } {userName}";
        assert_eq!(
            extract_token_names(input, TokenSyntax::Content),
            vec!["position", "userName"]
        );
    }

    #[test]
    fn test_has_tokens() {
        assert!(has_tokens("Hi {userName}", TokenSyntax::Content));
        assert!(!has_tokens("Hi {{userName}}", TokenSyntax::Content));
        assert!(has_tokens("Hi {{userName}}", TokenSyntax::Style));
        assert!(!has_tokens("plain", TokenSyntax::Style));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(TokenSyntax::Content.wrap("a"), "{a}");
        assert_eq!(TokenSyntax::Style.wrap("a"), "{{a}}");
    }
}
