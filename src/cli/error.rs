//! CLI-level errors (wraps domain and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("cannot render settings: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
