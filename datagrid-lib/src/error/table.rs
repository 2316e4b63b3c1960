//! Top-level engine error

use super::ConfigError;
use super::LookupError;
use super::ParseError;

/// Any failure of a decode or encode pass.
///
/// Every variant is fatal for the pass that raised it; nothing is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// Invalid declaration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A key, index or path did not resolve.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Malformed request input or binding.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The markup writer rejected output.
    #[error("Render error: {0}")]
    Render(String),
}

impl TableError {
    /// Creates a new render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if this is a lookup error.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }

    /// Returns `true` if this is a malformed-input error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, TableError>;
