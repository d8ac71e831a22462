//! Subcommand implementations.
//!
//! Each command returns the text to print so it can be exercised without a
//! terminal.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use applymail_application::ports::{CancellableTimer, KeyValueStore};
use applymail_application::variable_resolver::{TokenSyntax, extract_token_names};
use applymail_application::{
    ClockTimer, RenderPreview, RenderPreviewInput, RenderPreviewOutput, VariableCatalog,
};
use applymail_domain::{
    CategoryFilter, DataMap, DesignConfig, PlaceholderRegistry, TemplateDocument, ValueSources,
};
use applymail_infrastructure::{
    FileKeyValueStore, ManualClock, SystemClock, from_json, read_json_file,
};
use tracing::{info, warn};

use crate::cli::{RenderArgs, VariablesArgs};
use crate::settings::AppConfig;

/// Renders a template preview.
///
/// Prints the subject and body, or writes the body to `--output` and prints
/// only the subject.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or parsed, or the output
/// cannot be written.
pub fn render(args: &RenderArgs, config: &AppConfig) -> Result<String> {
    let registry = PlaceholderRegistry::standard();

    let mut document = match &args.template {
        Some(path) => load_template(path)?,
        None => TemplateDocument::starter("Default"),
    };
    if let Some(path) = &args.design {
        document.design_config = read_json_file::<DesignConfig>(path)
            .with_context(|| format!("failed to read design config {}", path.display()))?;
    }
    if let Some(subject) = &args.subject {
        document.subject.clone_from(subject);
    }

    let sources = ValueSources::new()
        .with_company(load_data(args.company.as_deref())?)
        .with_user(load_data(args.user.as_deref())?)
        .with_registry_defaults(&registry);

    let input = RenderPreviewInput {
        document,
        sources,
        safe: args.safe || config.safe_preview,
    };
    let output = match args.date {
        Some(date) => RenderPreview::new(registry, ManualClock::at_date(date)).execute(input),
        None => RenderPreview::new(registry, SystemClock::new()).execute(input),
    };
    report_gaps(&output);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output.html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "preview written");
            Ok(format!("Subject: {}\n", output.subject))
        }
        None => Ok(format!("Subject: {}\n\n{}\n", output.subject, output.html)),
    }
}

fn report_gaps(output: &RenderPreviewOutput) {
    for name in &output.unresolved {
        warn!(name = %name, "no value for token, left as written");
    }
    for name in &output.placeholders {
        warn!(name = %name, "no value for variable, showing placeholder");
    }
    for name in &output.unknown_styles {
        warn!(name = %name, "unknown style token");
    }
}

/// Reads a template: a JSON file is a whole template document, anything else
/// an HTML body for the starter template.
fn load_template(path: &Path) -> Result<TemplateDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        return from_json(&content)
            .with_context(|| format!("invalid template document {}", path.display()));
    }

    let name = path
        .file_stem()
        .map_or_else(|| "Template".to_string(), |s| s.to_string_lossy().into_owned());
    Ok(TemplateDocument::starter(name).with_html(content))
}

fn load_data(path: Option<&Path>) -> Result<DataMap> {
    path.map_or_else(
        || Ok(DataMap::new()),
        |path| {
            read_json_file(path)
                .with_context(|| format!("failed to read data file {}", path.display()))
        },
    )
}

fn open_catalog(
    config: &AppConfig,
) -> Result<VariableCatalog<FileKeyValueStore, ClockTimer<SystemClock>>> {
    let path: PathBuf = config
        .storage_file()
        .ok_or_else(|| anyhow!("could not determine a storage location; pass --storage"))?;
    Ok(VariableCatalog::with_debounce(
        PlaceholderRegistry::standard(),
        FileKeyValueStore::new(path),
        ClockTimer::new(SystemClock::new()),
        config.search_debounce(),
    ))
}

/// Lists catalog variables matching a search and category.
///
/// Without either filter, prints the category overview instead.
///
/// # Errors
///
/// Returns an error if the category id is unknown or no storage location
/// can be determined.
pub fn variables(args: &VariablesArgs, config: &AppConfig) -> Result<String> {
    let category: CategoryFilter = args.category.parse()?;
    let mut catalog = open_catalog(config)?;
    catalog.set_category(category);
    if let Some(term) = &args.search {
        catalog.set_search(term.as_str());
        catalog.flush_search();
    }
    Ok(format_listing(&catalog)?)
}

/// Formats the visible rows of a catalog, or its category overview when
/// nothing is filtered.
///
/// # Errors
///
/// Returns an error if writing to the output buffer fails.
pub fn format_listing<S: KeyValueStore, T: CancellableTimer>(
    catalog: &VariableCatalog<S, T>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let rows = catalog.list_visible();

    if rows.is_empty() && catalog.debounced_search().is_empty() {
        writeln!(out, "Categories (pick one with --category or search with --search):")?;
        for category in catalog.categories() {
            writeln!(
                out,
                "  {:<10} {:<16} {} variable(s)",
                category.id.as_str(),
                category.display_name(),
                category.variables.len()
            )?;
        }
        return Ok(out);
    }

    if rows.is_empty() {
        writeln!(out, "No variables match \"{}\".", catalog.debounced_search())?;
        return Ok(out);
    }

    for row in rows {
        let mut marks = String::new();
        if row.is_favorite {
            marks.push_str(" *");
        }
        if row.is_recent {
            marks.push_str(" (recent)");
        }
        writeln!(
            out,
            "{:<18} {:<16} {}{}",
            row.variable.placeholder,
            row.category_name(),
            row.variable.description,
            marks
        )?;
    }
    Ok(out)
}

/// Toggles a favorite and persists it.
///
/// # Errors
///
/// Returns an error if no storage location can be determined or the
/// favorites cannot be written.
pub fn favorite(name: &str, config: &AppConfig) -> Result<String> {
    let mut catalog = open_catalog(config)?;
    if !catalog.registry().contains(name) {
        warn!(name, "not a registered variable");
    }
    let now_favorite = catalog
        .try_toggle_favorite(name)
        .with_context(|| format!("failed to save favorite {{{name}}}"))?;
    Ok(if now_favorite {
        format!("Added {{{name}}} to favorites ({} total)\n", catalog.favorites().len())
    } else {
        format!("Removed {{{name}}} from favorites ({} total)\n", catalog.favorites().len())
    })
}

/// Lists the content and style tokens a template references.
///
/// # Errors
///
/// Returns an error if the template cannot be read.
pub fn tokens(template: &Path) -> Result<String> {
    let document = load_template(template)?;
    let registry = PlaceholderRegistry::shared();
    let mut out = String::new();

    let content_names = extract_token_names(&document.html_content, TokenSyntax::Content);
    let subject_names = extract_token_names(&document.subject, TokenSyntax::Content);
    let mut names = content_names;
    for name in subject_names {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    writeln!(out, "Content variables:")?;
    for name in &names {
        let status = registry
            .category_of(name)
            .map_or("unregistered", |id| id.display_name());
        writeln!(out, "  {{{name}}}  {status}")?;
    }

    writeln!(out, "Style tokens:")?;
    for name in extract_token_names(&document.html_content, TokenSyntax::Style) {
        let status = if DesignConfig::TOKEN_NAMES.contains(&name.as_str()) {
            "design"
        } else {
            "unknown"
        };
        writeln!(out, "  {{{{{name}}}}}  {status}")?;
    }
    Ok(out)
}
