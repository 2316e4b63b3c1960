//! Index-generated (dynamic) columns.

use crate::model::Value;

use super::Column;

/// A column group materialized once per item of a backing collection.
///
/// Every item yields one column built from `template`. The template's
/// bindings may refer to the item through `var`, e.g.
/// `#{car[column.property]}` with `var = "column"`.
#[derive(Debug, Clone)]
pub struct Columns {
    /// Component id; dynamic column keys are `{tableId}{sep}{id}{sep}{index}`.
    pub id: String,
    /// Name the template's bindings use for the current item.
    pub var: String,
    /// Backing collection, one column per item.
    pub value: Vec<Value>,
    /// Column template applied to every item.
    pub template: Column,
    /// Path inside each item holding its header text.
    pub header_property: Option<String>,
    /// Whether the group takes part in rendering.
    pub rendered: bool,
}

impl Columns {
    /// Creates an empty dynamic column group.
    pub fn new(id: impl Into<String>, var: impl Into<String>, template: Column) -> Self {
        Self {
            id: id.into(),
            var: var.into(),
            value: Vec::new(),
            template,
            header_property: None,
            rendered: true,
        }
    }

    /// Sets the backing collection.
    pub fn value(mut self, items: Vec<Value>) -> Self {
        self.value = items;
        self
    }

    /// Reads each column's header text from the given item path.
    pub fn header_property(mut self, path: impl Into<String>) -> Self {
        self.header_property = Some(path.into());
        self
    }

    /// Sets whether the group is rendered.
    pub fn rendered(mut self, rendered: bool) -> Self {
        self.rendered = rendered;
        self
    }

    /// Whether the group's columns take part in rendering.
    pub fn is_rendered(&self) -> bool {
        self.rendered && self.template.rendered
    }

    /// Number of columns this group materializes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns `true` if the backing collection is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns a view of the column at `index`.
    pub fn column_at(&self, index: usize) -> Option<DynamicColumn<'_>> {
        self.value.get(index).map(|item| DynamicColumn {
            group: self,
            index,
            item,
        })
    }
}

/// One materialized column of a [`Columns`] group.
///
/// The view pairs the template with the item at its index; nothing is
/// stored on the group, so views over different indices never interfere.
#[derive(Debug, Clone, Copy)]
pub struct DynamicColumn<'a> {
    group: &'a Columns,
    index: usize,
    item: &'a Value,
}

impl<'a> DynamicColumn<'a> {
    /// The group this column belongs to.
    pub fn group(&self) -> &'a Columns {
        self.group
    }

    /// Index of the backing item.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The backing item.
    pub fn item(&self) -> &'a Value {
        self.item
    }

    /// The column template.
    pub fn template(&self) -> &'a Column {
        &self.group.template
    }

    /// Header text, read from the item when a header property is set.
    pub fn header_text(&self) -> Option<String> {
        match &self.group.header_property {
            Some(path) => self.item.get_path(path).map(|v| v.to_string()),
            None => self.group.template.header_text.clone(),
        }
    }
}
