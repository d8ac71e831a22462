//! Template substitution and value resolution
//!
//! Templates carry two independent token namespaces:
//! - `{name}` content variables, resolved from company, user, default and
//!   dynamic values
//! - `{{name}}` style tokens, taken from the template's design config
//!
//! # Usage
//!
//! ```
//! use applymail_application::variable_resolver::{render_content, render_style};
//! use applymail_domain::{DesignConfig, variable::data_map};
//! use serde_json::json;
//!
//! let template = "<h1 style=\"color: {{primaryColor}}\">{position}</h1>";
//! let styled = render_style(template, &DesignConfig::default().token_map());
//! let html = render_content(&styled, &data_map(json!({"position": "Engineer"})));
//! assert_eq!(html, "<h1 style=\"color: #6366f1\">Engineer</h1>");
//! ```

pub mod builtins;
pub mod engine;
pub mod parser;
pub mod resolver;

pub use builtins::{DynamicInfo, DynamicValues};
pub use engine::{
    Escape, RenderResult, escape_html, normalize_template, render, render_content,
    render_detailed, render_loose, render_style,
};
pub use parser::{TokenReference, TokenSyntax, extract_token_names, has_tokens, parse_tokens};
pub use resolver::ValueResolver;
