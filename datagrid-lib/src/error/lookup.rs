//! Lookup error types

/// Errors raised when a key, index or path does not resolve.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    /// No column (primary list or header group) has the given key.
    #[error("Cannot find column with key: {key}")]
    Column { key: String },

    /// No rendered column sits at the given cell position.
    #[error("Cannot find rendered column at cell index {index}")]
    CellIndex { index: usize },

    /// No row resolves to the given row key.
    #[error("Cannot find row with key: {key}")]
    RowKey { key: String },

    /// The row index is outside the current row window.
    #[error("Row index {index} is not available")]
    RowIndex { index: usize },

    /// A menu item path points at nothing, or through an item.
    #[error("Cannot find menu item at path: {path}")]
    MenuItem { path: String },
}

impl LookupError {
    /// Creates a new missing column error.
    pub fn column(key: impl Into<String>) -> Self {
        Self::Column { key: key.into() }
    }

    /// Creates a new missing row key error.
    pub fn row_key(key: impl Into<String>) -> Self {
        Self::RowKey { key: key.into() }
    }

    /// Creates a new missing menu item error.
    pub fn menu_item(path: impl Into<String>) -> Self {
        Self::MenuItem { path: path.into() }
    }
}
