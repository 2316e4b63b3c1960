//! Statically declared column.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::binding::Binding;
use crate::error::ConfigError;
use crate::filter::FilterMatchMode;
use crate::model::Value;
use crate::render::Component;

/// Row selection mode of a table or a selection column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// One row at a time (radio-button style).
    Single,
    /// Any number of rows (checkbox style).
    Multiple,
}

impl SelectionMode {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }
}

/// Where a column's filter sits relative to its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPosition {
    Top,
    Bottom,
}

impl FilterPosition {
    /// Parses `top` or `bottom`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(ConfigError::filter_position(value)),
        }
    }
}

/// A column declared as a direct child of the table (or of a column group
/// row, or used as the template of a dynamic column group).
#[derive(Clone)]
pub struct Column {
    /// Component id, unique among the table's children.
    pub id: String,
    /// Plain header text.
    pub header_text: Option<String>,
    /// Plain footer text.
    pub footer_text: Option<String>,
    /// Header facet, preferred over `header_text`.
    pub header: Option<Arc<dyn Component>>,
    /// Footer facet, preferred over `footer_text`.
    pub footer: Option<Arc<dyn Component>>,
    /// Cell content; when empty the cell shows `field`.
    pub children: Vec<Arc<dyn Component>>,
    /// Field displayed when the column has no children.
    pub field: Option<Binding>,
    /// Sort binding; `None` makes the column unsortable.
    pub sort_by: Option<Binding>,
    /// Filter binding; `None` makes the column unfilterable.
    pub filter_by: Option<Binding>,
    /// Bound default filter value.
    pub filter_value: Option<String>,
    /// Bound filter choices; a list selects the closed-choice filter.
    pub filter_options: Option<Value>,
    /// `top` or `bottom`; anything else fails at encode.
    pub filter_position: String,
    /// How the filter value is matched against cell values.
    pub filter_match_mode: FilterMatchMode,
    /// Maximum length of the free-text filter.
    pub filter_max_length: Option<usize>,
    /// Makes this a selection column.
    pub selection_mode: Option<SelectionMode>,
    /// Disables the selection control of a selection column.
    pub disabled_selection: bool,
    /// Whether the column takes part in rendering.
    pub rendered: bool,
    pub rowspan: u32,
    pub colspan: u32,
    /// Declared width (`120`, `20%`).
    pub width: Option<String>,
    /// Whether the column may be resized when the table allows it.
    pub resizable: bool,
    /// Whether the column has a cell editor.
    pub editable: bool,
}

impl Column {
    /// Creates a rendered column with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header_text: None,
            footer_text: None,
            header: None,
            footer: None,
            children: Vec::new(),
            field: None,
            sort_by: None,
            filter_by: None,
            filter_value: None,
            filter_options: None,
            filter_position: "bottom".to_string(),
            filter_match_mode: FilterMatchMode::default(),
            filter_max_length: None,
            selection_mode: None,
            disabled_selection: false,
            rendered: true,
            rowspan: 1,
            colspan: 1,
            width: None,
            resizable: true,
            editable: false,
        }
    }

    /// Sets the header text.
    pub fn header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = Some(text.into());
        self
    }

    /// Sets the footer text.
    pub fn footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = Some(text.into());
        self
    }

    /// Sets the header facet.
    pub fn header(mut self, facet: Arc<dyn Component>) -> Self {
        self.header = Some(facet);
        self
    }

    /// Sets the footer facet.
    pub fn footer(mut self, facet: Arc<dyn Component>) -> Self {
        self.footer = Some(facet);
        self
    }

    /// Adds a cell content child.
    pub fn child(mut self, child: Arc<dyn Component>) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the displayed field.
    pub fn field(mut self, binding: impl Into<Binding>) -> Self {
        self.field = Some(binding.into());
        self
    }

    /// Makes the column sortable by the given binding.
    pub fn sort_by(mut self, binding: impl Into<Binding>) -> Self {
        self.sort_by = Some(binding.into());
        self
    }

    /// Makes the column filterable by the given binding.
    pub fn filter_by(mut self, binding: impl Into<Binding>) -> Self {
        self.filter_by = Some(binding.into());
        self
    }

    /// Sets the bound default filter value.
    pub fn filter_value(mut self, value: impl Into<String>) -> Self {
        self.filter_value = Some(value.into());
        self
    }

    /// Sets the filter choices.
    pub fn filter_options(mut self, options: impl Into<Value>) -> Self {
        self.filter_options = Some(options.into());
        self
    }

    /// Sets the filter position (`top` or `bottom`).
    pub fn filter_position(mut self, position: impl Into<String>) -> Self {
        self.filter_position = position.into();
        self
    }

    /// Sets the filter match mode.
    pub fn filter_match_mode(mut self, mode: FilterMatchMode) -> Self {
        self.filter_match_mode = mode;
        self
    }

    /// Makes this a selection column.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = Some(mode);
        self
    }

    /// Sets whether the column is rendered.
    pub fn rendered(mut self, rendered: bool) -> Self {
        self.rendered = rendered;
        self
    }

    /// Sets the row and column span.
    pub fn span(mut self, rowspan: u32, colspan: u32) -> Self {
        self.rowspan = rowspan;
        self.colspan = colspan;
        self
    }

    /// Sets the declared width.
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Marks the column as having a cell editor.
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header_text", &self.header_text)
            .field("sort_by", &self.sort_by)
            .field("filter_by", &self.filter_by)
            .field("selection_mode", &self.selection_mode)
            .field("rendered", &self.rendered)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}
