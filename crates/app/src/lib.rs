//! Applymail command-line front end
//!
//! Wires the template core to files, the platform config directory and the
//! terminal:
//! - [`cli`]: argument definitions
//! - [`settings`]: layered configuration
//! - [`commands`]: one function per subcommand, returning the text to print

pub mod cli;
pub mod commands;
pub mod settings;

pub use cli::{Cli, Command};
pub use settings::AppConfig;
