//! Resolved column list of a table.

use std::cell::OnceCell;

use log::debug;
use log::warn;

use crate::column::ColumnGroup;
use crate::column::ColumnGroupKind;
use crate::column::ColumnRef;
use crate::column::RowExpansion;
use crate::column::SelectionMode;
use crate::column::SubTable;
use crate::column::SummaryRow;
use crate::column::TableChild;
use crate::column::UiColumn;
use crate::error::LookupError;

use super::DataTable;

impl DataTable {
    /// Key of a static column with the given id.
    pub fn static_column_key(&self, id: &str) -> String {
        format!("{}{}{}", self.client_id, self.config.separator, id)
    }

    /// Key of the dynamic column at `index` of the group with the given id.
    pub fn dynamic_column_key(&self, group_id: &str, index: usize) -> String {
        let sep = self.config.separator;
        format!("{}{}{}{}{}", self.client_id, sep, group_id, sep, index)
    }

    /// The resolved columns in declaration order.
    ///
    /// Each dynamic group contributes one entry per backing item. The list
    /// is built once and cached until [`invalidate_columns`] is called.
    ///
    /// [`invalidate_columns`]: DataTable::invalidate_columns
    pub fn columns(&self) -> &[ColumnRef] {
        self.columns.get_or_init(|| self.collect_columns())
    }

    fn collect_columns(&self) -> Vec<ColumnRef> {
        let mut columns = Vec::new();
        for (child, kid) in self.children.iter().enumerate() {
            match kid {
                TableChild::Column(column) => columns.push(ColumnRef::Static {
                    key: self.static_column_key(&column.id),
                    child,
                }),
                TableChild::Columns(group) => {
                    for index in 0..group.len() {
                        columns.push(ColumnRef::Dynamic {
                            key: self.dynamic_column_key(&group.id, index),
                            child,
                            index,
                        });
                    }
                }
                _ => {}
            }
        }
        debug!("resolved {} columns for {}", columns.len(), self.client_id);
        columns
    }

    /// Drops the cached column list and column count.
    pub fn invalidate_columns(&mut self) {
        self.columns.take();
        self.columns_count.take();
    }

    /// Replaces the column list with an explicit order.
    ///
    /// Stays in effect until the next [`invalidate_columns`].
    ///
    /// [`invalidate_columns`]: DataTable::invalidate_columns
    pub fn set_columns(&mut self, columns: Vec<ColumnRef>) {
        self.columns = OnceCell::from(columns);
    }

    /// Turns a column reference into a column view.
    pub fn column_view(&self, column: &ColumnRef) -> Option<UiColumn<'_>> {
        match column {
            ColumnRef::Static { child, .. } => match self.children.get(*child) {
                Some(TableChild::Column(c)) => Some(UiColumn::Static(c)),
                _ => None,
            },
            ColumnRef::Dynamic { child, index, .. } => match self.children.get(*child) {
                Some(TableChild::Columns(group)) => group.column_at(*index).map(UiColumn::Dynamic),
                _ => None,
            },
            ColumnRef::HeaderGroup {
                child, row, position, ..
            } => match self.children.get(*child) {
                Some(TableChild::ColumnGroup(group)) => group
                    .rows
                    .get(*row)
                    .and_then(|r| r.get(*position))
                    .map(UiColumn::Static),
                _ => None,
            },
        }
    }

    /// The resolved columns paired with their views.
    pub fn ui_columns(&self) -> Vec<(&ColumnRef, UiColumn<'_>)> {
        self.columns()
            .iter()
            .filter_map(|c| self.column_view(c).map(|view| (c, view)))
            .collect()
    }

    /// Finds a column by key.
    ///
    /// Searches the resolved column list first, then the rows of the header
    /// column group.
    pub fn find_column(&self, key: &str) -> Result<ColumnRef, LookupError> {
        if let Some(column) = self.columns().iter().find(|c| c.key() == key) {
            return Ok(column.clone());
        }

        for (child, kid) in self.children.iter().enumerate() {
            let TableChild::ColumnGroup(group) = kid else {
                continue;
            };
            if group.kind != ColumnGroupKind::Header {
                continue;
            }
            for (row, columns) in group.rows.iter().enumerate() {
                for (position, column) in columns.iter().enumerate() {
                    let column_key = self.static_column_key(&column.id);
                    if column_key == key {
                        return Ok(ColumnRef::HeaderGroup {
                            key: column_key,
                            child,
                            row,
                            position,
                        });
                    }
                }
            }
        }

        Err(LookupError::column(key))
    }

    /// Number of rendered columns, computed once per encode pass.
    ///
    /// Counts one per rendered column, the item count of every rendered
    /// dynamic group, and the rendered columns of a sub table.
    pub fn columns_count(&self) -> usize {
        *self.columns_count.get_or_init(|| {
            self.children
                .iter()
                .map(|kid| match kid {
                    TableChild::Column(c) if c.rendered => 1,
                    TableChild::Columns(group) if group.is_rendered() => group.len(),
                    TableChild::SubTable(sub) => sub.rendered_column_count(),
                    _ => 0,
                })
                .sum()
        })
    }

    /// Forgets the cached column count.
    pub fn reset_columns_count(&mut self) {
        self.columns_count.take();
    }

    /// The column group of the given kind.
    pub fn column_group(&self, kind: ColumnGroupKind) -> Option<&ColumnGroup> {
        self.children.iter().find_map(|kid| match kid {
            TableChild::ColumnGroup(group) if group.kind == kind && group.rendered => Some(group),
            _ => None,
        })
    }

    /// The sub table child.
    pub fn sub_table(&self) -> Option<&SubTable> {
        self.children.iter().find_map(|kid| match kid {
            TableChild::SubTable(sub) => Some(sub),
            _ => None,
        })
    }

    /// The row expansion child.
    pub fn row_expansion(&self) -> Option<&RowExpansion> {
        self.children.iter().find_map(|kid| match kid {
            TableChild::RowExpansion(expansion) => Some(expansion),
            _ => None,
        })
    }

    /// The summary row child.
    pub fn summary_row(&self) -> Option<&SummaryRow> {
        self.children.iter().find_map(|kid| match kid {
            TableChild::SummaryRow(summary) => Some(summary),
            _ => None,
        })
    }

    /// Returns `true` if any column declares a footer, or a footer group exists.
    pub fn has_footer_column(&self) -> bool {
        if self.column_group(ColumnGroupKind::Footer).is_some() {
            return true;
        }
        self.ui_columns().iter().any(|(_, view)| {
            let column = view.column();
            column.footer.is_some() || column.footer_text.is_some()
        })
    }

    /// Selection mode of the first selection column.
    pub fn column_selection_mode(&self) -> Option<SelectionMode> {
        self.ui_columns()
            .iter()
            .find_map(|(_, view)| view.column().selection_mode)
    }

    /// Applies a client column order given as comma-separated column keys.
    ///
    /// Columns missing from the order keep their relative position after
    /// the ordered ones. Unknown keys are ignored.
    pub fn reorder_columns(&mut self, order: &str) {
        let current = self.columns().to_vec();
        let mut ordered = Vec::with_capacity(current.len());
        for key in order.split(',').map(str::trim).filter(|k| !k.is_empty()) {
            match current.iter().find(|c| c.key() == key) {
                Some(column) if !ordered.contains(column) => ordered.push(column.clone()),
                Some(_) => {}
                None => warn!("ignoring unknown column {} in column order of {}", key, self.client_id),
            }
        }
        for column in current {
            if !ordered.contains(&column) {
                ordered.push(column);
            }
        }
        self.set_columns(ordered);
    }
}
