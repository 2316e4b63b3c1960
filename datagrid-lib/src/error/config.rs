//! Configuration error types

/// Errors caused by an invalid table or column declaration.
///
/// These are raised at the point of detection and abort the current
/// decode or encode pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A column declared a filter position other than `top` or `bottom`.
    #[error("{position} is an invalid option for filterPosition, valid values are 'bottom' or 'top'")]
    FilterPosition { position: String },

    /// Filter options were bound to something that is not a list of choices.
    #[error("Filter options for column {column} should be an array or collection, got {actual}")]
    FilterOptions { column: String, actual: &'static str },

    /// Selection is enabled but no row key can be derived for a row.
    #[error(
        "Data model must be able to resolve row keys when selection is enabled, or a rowKey binding must be defined"
    )]
    MissingRowKey,

    /// Single selection mode was bound to a collection value.
    #[error("Single selection mode expects one item, got a collection of {len}")]
    SingleSelectionCollection { len: usize },
}

impl ConfigError {
    /// Creates a new invalid filter position error.
    pub fn filter_position(position: impl Into<String>) -> Self {
        Self::FilterPosition {
            position: position.into(),
        }
    }

    /// Creates a new invalid filter options error.
    pub fn filter_options(column: impl Into<String>, actual: &'static str) -> Self {
        Self::FilterOptions {
            column: column.into(),
            actual,
        }
    }
}
