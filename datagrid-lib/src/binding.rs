//! Bound expressions and their structural field descriptors.
//!
//! A binding such as `#{car.brand}` names a field of the row variable. For
//! dynamic columns the field itself is data driven: `#{car[column.property]}`
//! reads `property` from the column's backing item to learn which row field
//! to use. Bindings are parsed once into a [`FieldDescriptor`], which is then
//! applied per row without re-interpreting the expression.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ParseError;
use crate::model::Record;
use crate::model::Value;

static WRAPPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[#$]\{\s*(.*?)\s*\}$").expect("valid wrapper pattern"));

static PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([A-Za-z_$][\w$]*)\.)?([A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*)$")
        .expect("valid property pattern")
});

static INDIRECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_$][\w$]*)\[\s*([A-Za-z_$][\w$]*)\.([A-Za-z_$][\w$.]*)\s*\]$")
        .expect("valid indexed pattern")
});

/// A value expression bound to a table or column attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Binding(String);

impl Binding {
    /// Creates a binding from its expression string.
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// Returns the raw expression string.
    pub fn expression(&self) -> &str {
        &self.0
    }

    /// Extracts the structural field descriptor.
    pub fn descriptor(&self) -> Result<FieldDescriptor, ParseError> {
        FieldDescriptor::parse(&self.0)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Binding {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for Binding {
    fn from(v: String) -> Self {
        Self(v)
    }
}

/// Which row field a binding reads, extracted once from its expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDescriptor {
    /// `#{var.path}`, or a bare `path`: the field is `path`.
    Property {
        /// Row variable prefix, if the expression had one.
        var: Option<String>,
        /// Dotted field path inside the row.
        path: String,
    },
    /// `#{var[columnVar.property]}`: the field name is read from the dynamic
    /// column's backing item.
    Indirect {
        /// Row variable.
        var: String,
        /// Dynamic column variable.
        column_var: String,
        /// Path inside the column item holding the field name.
        property: String,
    },
}

impl FieldDescriptor {
    /// Parses an expression into a descriptor.
    pub fn parse(expression: &str) -> Result<Self, ParseError> {
        let trimmed = expression.trim();
        let (inner, wrapped) = match WRAPPED.captures(trimmed) {
            Some(caps) => (caps.get(1).map_or("", |m| m.as_str()), true),
            None => (trimmed, false),
        };

        if let Some(caps) = INDIRECT.captures(inner) {
            return Ok(FieldDescriptor::Indirect {
                var: caps[1].to_string(),
                column_var: caps[2].to_string(),
                property: caps[3].to_string(),
            });
        }

        if let Some(caps) = PROPERTY.captures(inner) {
            let path = caps[2].to_string();
            return Ok(match caps.get(1) {
                // A bare `#{brand}` or `brand` has no var to strip.
                Some(var) if wrapped => FieldDescriptor::Property {
                    var: Some(var.as_str().to_string()),
                    path,
                },
                Some(var) => FieldDescriptor::Property {
                    var: None,
                    path: format!("{}.{}", var.as_str(), path),
                },
                None => FieldDescriptor::Property { var: None, path },
            });
        }

        Err(ParseError::binding(expression))
    }

    /// Resolves the row field name.
    ///
    /// `column_item` is the backing item of the dynamic column the binding
    /// belongs to; indirect descriptors resolve to `None` without one.
    pub fn field(&self, column_item: Option<&Value>) -> Option<String> {
        match self {
            FieldDescriptor::Property { path, .. } => Some(path.clone()),
            FieldDescriptor::Indirect { property, .. } => column_item
                .and_then(|item| item.get_path(property))
                .filter(|v| !v.is_null())
                .map(|v| v.to_string()),
        }
    }

    /// Applies the descriptor to one row.
    pub fn value_of(&self, row: &Record, column_item: Option<&Value>) -> Value {
        self.field(column_item)
            .and_then(|field| row.get_path(&field).cloned())
            .unwrap_or_default()
    }
}
