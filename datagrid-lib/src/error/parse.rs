//! Malformed-input error types

/// Errors raised when request parameters or bound expressions cannot be read.
///
/// A malformed value fails the request; nothing is repaired.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// A required request parameter is absent.
    #[error("Missing request parameter: {name}")]
    MissingParam { name: String },

    /// A request parameter is not a valid integer.
    #[error("Parameter '{name}' is not a valid integer: '{value}'")]
    Integer { name: String, value: String },

    /// A sort direction other than ASCENDING, DESCENDING or UNSORTED.
    #[error("Unknown sort order: '{value}'")]
    SortOrder { value: String },

    /// A list-valued parameter did not have the expected shape.
    #[error("Parameter '{name}' is malformed: '{value}'")]
    Malformed { name: String, value: String },

    /// A bound expression that is neither a property nor an indexed lookup.
    #[error("Unsupported binding expression: '{expression}'")]
    Binding { expression: String },
}

impl ParseError {
    /// Creates a new missing parameter error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParam { name: name.into() }
    }

    /// Creates a new integer parse error.
    pub fn integer(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Integer {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a new malformed parameter error.
    pub fn malformed(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Malformed {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a new binding expression error.
    pub fn binding(expression: impl Into<String>) -> Self {
        Self::Binding {
            expression: expression.into(),
        }
    }
}
