//! Email template documents and their design configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::generate_draft_id;
use crate::variable::DataMap;

/// Subject line of a freshly created template.
pub const STARTER_SUBJECT: &str = "Job Application - {position}";

/// HTML body of a freshly created template.
pub const STARTER_HTML: &str = r#"<div style="font-family: {{fontFamily}}; color: {{textColor}}; background: {{backgroundColor}}; padding: {{padding}}; max-width: 600px; margin: 0 auto;">
  <div style="text-align: center; margin-bottom: 30px;">
    <h1 style="color: {{primaryColor}}; margin: 0;">Job Application</h1>
  </div>
  <div style="background: #f8f9fa; padding: {{padding}}; border-radius: {{borderRadius}}; font-size: {{fontSize}};">
    <p>Dear Hiring Team at <strong>{companyName}</strong>,</p>
    <p>I am writing to express my interest in the <strong>{position}</strong> position...</p>
    <p>Best regards,<br>
    <strong>{userName}</strong></p>
  </div>
</div>"#;

/// Style values of a template, substituted as double-brace tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignConfig {
    /// Page background color.
    pub background_color: String,
    /// Body text color.
    pub text_color: String,
    /// Accent color for headings and buttons.
    pub primary_color: String,
    /// CSS font family.
    pub font_family: String,
    /// CSS font size.
    pub font_size: String,
    /// CSS border radius.
    pub border_radius: String,
    /// CSS padding.
    pub padding: String,
}

impl DesignConfig {
    /// Token names of the style namespace, in declaration order.
    pub const TOKEN_NAMES: [&'static str; 7] = [
        "backgroundColor",
        "textColor",
        "primaryColor",
        "fontFamily",
        "fontSize",
        "borderRadius",
        "padding",
    ];

    /// Returns the style values keyed by token name.
    #[must_use]
    pub fn token_map(&self) -> DataMap {
        let values = [
            &self.background_color,
            &self.text_color,
            &self.primary_color,
            &self.font_family,
            &self.font_size,
            &self.border_radius,
            &self.padding,
        ];
        Self::TOKEN_NAMES
            .iter()
            .zip(values)
            .map(|(name, value)| ((*name).to_string(), Value::String(value.clone())))
            .collect()
    }
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            text_color: "#333333".to_string(),
            primary_color: "#6366f1".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: "16px".to_string(),
            border_radius: "8px".to_string(),
            padding: "20px".to_string(),
        }
    }
}

/// An email template as stored by the backend.
///
/// The core only reads `html_content`, `subject` and `design_config` to
/// build previews; saving is the host's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    /// Backend identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Template name.
    pub name: String,
    /// Free-form category label (e.g. "professional").
    #[serde(default)]
    pub category: String,
    /// Subject line, may contain content tokens.
    #[serde(default)]
    pub subject: String,
    /// HTML body with content and style tokens.
    #[serde(default)]
    pub html_content: String,
    /// Style values for the double-brace tokens.
    #[serde(default)]
    pub design_config: DesignConfig,
    /// Serialized visual-builder state, if the template was built visually.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder_content: Option<String>,
}

impl TemplateDocument {
    /// Creates a draft from the starter template.
    #[must_use]
    pub fn starter(name: impl Into<String>) -> Self {
        Self {
            id: generate_draft_id(),
            name: name.into(),
            category: "professional".to_string(),
            subject: STARTER_SUBJECT.to_string(),
            html_content: STARTER_HTML.to_string(),
            design_config: DesignConfig::default(),
            builder_content: None,
        }
    }

    /// Replaces the HTML body.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html_content = html.into();
        self
    }

    /// Replaces the subject line.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Replaces the design configuration.
    #[must_use]
    pub fn with_design(mut self, design: DesignConfig) -> Self {
        self.design_config = design;
        self
    }
}
