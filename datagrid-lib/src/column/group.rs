//! Non-column table children: column groups, sub tables, expansion and
//! summary rows.

use std::fmt;
use std::sync::Arc;

use crate::render::Component;

use super::Column;
use super::Columns;

/// Whether a column group replaces the header or the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGroupKind {
    Header,
    Footer,
}

/// Explicit multi-row header or footer layout.
#[derive(Debug, Clone)]
pub struct ColumnGroup {
    pub kind: ColumnGroupKind,
    pub rendered: bool,
    /// Rows of columns, top to bottom.
    pub rows: Vec<Vec<Column>>,
}

impl ColumnGroup {
    /// Creates an empty group.
    pub fn new(kind: ColumnGroupKind) -> Self {
        Self {
            kind,
            rendered: true,
            rows: Vec::new(),
        }
    }

    /// Appends a row of columns.
    pub fn row(mut self, columns: Vec<Column>) -> Self {
        self.rows.push(columns);
        self
    }
}

/// A nested table rendered under each row.
#[derive(Debug, Clone)]
pub struct SubTable {
    pub id: String,
    pub columns: Vec<Column>,
}

impl SubTable {
    /// Number of rendered columns.
    pub fn rendered_column_count(&self) -> usize {
        self.columns.iter().filter(|c| c.rendered).count()
    }
}

/// Content shown when a row is expanded.
#[derive(Clone, Default)]
pub struct RowExpansion {
    pub children: Vec<Arc<dyn Component>>,
}

impl fmt::Debug for RowExpansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowExpansion")
            .field("children", &self.children.len())
            .finish()
    }
}

/// Row emitted after each run of rows sharing a sort value.
#[derive(Clone, Default)]
pub struct SummaryRow {
    pub children: Vec<Arc<dyn Component>>,
}

impl fmt::Debug for SummaryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryRow")
            .field("children", &self.children.len())
            .finish()
    }
}

/// A direct child of a table.
#[derive(Debug, Clone)]
pub enum TableChild {
    Column(Column),
    Columns(Columns),
    ColumnGroup(ColumnGroup),
    SubTable(SubTable),
    RowExpansion(RowExpansion),
    SummaryRow(SummaryRow),
}

impl From<Column> for TableChild {
    fn from(v: Column) -> Self {
        TableChild::Column(v)
    }
}

impl From<Columns> for TableChild {
    fn from(v: Columns) -> Self {
        TableChild::Columns(v)
    }
}

impl From<ColumnGroup> for TableChild {
    fn from(v: ColumnGroup) -> Self {
        TableChild::ColumnGroup(v)
    }
}

impl From<SubTable> for TableChild {
    fn from(v: SubTable) -> Self {
        TableChild::SubTable(v)
    }
}
