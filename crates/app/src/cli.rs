//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = "applymail")]
#[command(author, version, about = "Preview job application email templates")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to <config dir>/applymail/applymail.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Key-value storage file holding favorites
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Enable debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a template preview
    Render(RenderArgs),

    /// List catalog variables
    Variables(VariablesArgs),

    /// Toggle a favorite variable
    Favorite {
        /// Variable name, without braces
        name: String,
    },

    /// List the tokens a template references
    Tokens {
        /// Template file (HTML body or template JSON)
        #[arg(short, long)]
        template: PathBuf,
    },
}

/// Arguments of `render`.
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Template file: an HTML body or a template JSON document (starter template if omitted)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Design config JSON
    #[arg(short, long)]
    pub design: Option<PathBuf>,

    /// Company data JSON object
    #[arg(short, long)]
    pub company: Option<PathBuf>,

    /// User profile JSON object
    #[arg(short, long)]
    pub user: Option<PathBuf>,

    /// Subject line, overriding the template's
    #[arg(short, long)]
    pub subject: Option<String>,

    /// HTML-escape substituted values
    #[arg(long)]
    pub safe: bool,

    /// Pin the date used by currentDate and currentYear (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Write the HTML body to this file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments of `variables`.
#[derive(Args, Debug, Default)]
pub struct VariablesArgs {
    /// Case-insensitive search over names and descriptions
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category id: all, favorites, recent, company, personal, job, dynamic, contact
    #[arg(short, long, default_value = "all")]
    pub category: String,
}
