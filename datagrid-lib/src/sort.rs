//! Sort engine: single and multi column sort criteria, in-memory sorting
//! and the sort request decode.

use std::cmp::Ordering;
use std::fmt;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::column::ColumnRef;
use crate::error::ParseError;
use crate::error::Result;
use crate::model::Record;
use crate::model::Value;
use crate::request::RequestParams;
use crate::request::suffix;
use crate::table::DataTable;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASCENDING", alias = "ascending")]
    Ascending,
    #[serde(rename = "DESCENDING", alias = "descending")]
    Descending,
    #[serde(rename = "UNSORTED", alias = "unsorted")]
    Unsorted,
}

impl SortOrder {
    /// Parses a direction, ignoring case.
    ///
    /// Also accepts the numeric client form `1`, `-1` and `0`.
    pub fn parse(value: &str) -> std::result::Result<Self, ParseError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASCENDING" | "1" => Ok(Self::Ascending),
            "DESCENDING" | "-1" => Ok(Self::Descending),
            "UNSORTED" | "0" => Ok(Self::Unsorted),
            _ => Err(ParseError::SortOrder {
                value: value.to_string(),
            }),
        }
    }

    /// The upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ASCENDING",
            Self::Descending => "DESCENDING",
            Self::Unsorted => "UNSORTED",
        }
    }

    /// Applies this direction to an ascending comparison.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One multi sort criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct SortMeta {
    pub column: ColumnRef,
    /// Row field the column sorts by, resolved when the criterion was built.
    pub sort_field: Option<String>,
    pub order: SortOrder,
}

/// Sort criteria handed to a lazy provider.
#[derive(Debug, Clone, PartialEq)]
pub enum SortSpec {
    Single {
        field: Option<String>,
        order: SortOrder,
    },
    Multi(Vec<SortMeta>),
}

/// Stable in-place sort by a list of (field, direction) keys.
///
/// Earlier keys take priority; later keys only break ties.
pub fn sort_rows(rows: &mut [Record], keys: &[(String, SortOrder)]) {
    static NULL: Value = Value::Null;
    if keys.iter().all(|(_, order)| *order == SortOrder::Unsorted) {
        return;
    }
    rows.sort_by(|a, b| {
        keys.iter()
            .map(|(field, order)| {
                let left = a.get_path(field).unwrap_or(&NULL);
                let right = b.get_path(field).unwrap_or(&NULL);
                order.apply(left.compare(right))
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

/// Pairs keys with directions from the trailing end.
///
/// When the lists differ in length the trailing entries win and the
/// shorter list bounds the result.
fn align_trailing<'a>(keys: &[&'a str], dirs: &[&'a str]) -> Vec<(&'a str, &'a str)> {
    let n = keys.len().min(dirs.len());
    keys[keys.len() - n..]
        .iter()
        .copied()
        .zip(dirs[dirs.len() - n..].iter().copied())
        .collect()
}

fn split_list(value: &str) -> Vec<&str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

impl DataTable {
    /// Returns `true` when the sort mode is `multiple`.
    pub fn is_multi_sort(&self) -> bool {
        self.attrs.sort_mode.eq_ignore_ascii_case("multiple")
    }

    /// The current single sort direction.
    pub fn convert_sort_order(&self) -> SortOrder {
        self.state.sort_order
    }

    /// Returns `true` when sort criteria are in place.
    pub fn has_sort(&self) -> bool {
        if self.is_multi_sort() {
            !self.state.multi_sort_meta.is_empty()
        } else {
            self.state.sort_by.is_some()
        }
    }

    /// Row field of the current single sort.
    ///
    /// A dynamic sort column resolves its own binding against its item;
    /// otherwise the table's sort binding is used.
    pub fn resolve_sort_field(&self) -> Result<Option<String>> {
        let Some(binding) = self.state.sort_by.as_ref() else {
            return Ok(None);
        };
        let view = self
            .state
            .sort_column
            .as_ref()
            .and_then(|column| self.column_view(column));
        match view {
            Some(view) if view.is_dynamic() => {
                let binding = view.sort_by().unwrap_or(binding);
                Ok(view.resolve_field(binding)?)
            }
            _ => Ok(binding.descriptor()?.field(None)),
        }
    }

    /// The criteria a lazy provider receives.
    pub fn sort_spec(&self) -> Result<SortSpec> {
        if self.is_multi_sort() {
            Ok(SortSpec::Multi(self.state.multi_sort_meta.clone()))
        } else {
            Ok(SortSpec::Single {
                field: self.resolve_sort_field()?,
                order: self.convert_sort_order(),
            })
        }
    }

    /// Sorts the current rows in memory by the single sort criterion.
    pub fn single_sort(&mut self) -> Result<()> {
        let order = self.convert_sort_order();
        let Some(field) = self.resolve_sort_field()? else {
            return Ok(());
        };
        debug!("sorting {} by {} {}", self.client_id(), field, order);
        if let Some(rows) = self.value_mut() {
            sort_rows(rows, &[(field, order)]);
        }
        Ok(())
    }

    /// Sorts the current rows in memory by every multi sort criterion.
    pub fn multi_sort(&mut self) -> Result<()> {
        let keys: Vec<(String, SortOrder)> = self
            .state
            .multi_sort_meta
            .iter()
            .filter_map(|meta| meta.sort_field.clone().map(|field| (field, meta.order)))
            .collect();
        debug!("multi sorting {} by {} criteria", self.client_id(), keys.len());
        if let Some(rows) = self.value_mut() {
            sort_rows(rows, &keys);
        }
        Ok(())
    }

    /// Sorts by whichever mode is active.
    pub fn sort(&mut self) -> Result<()> {
        if self.is_multi_sort() {
            self.multi_sort()
        } else {
            self.single_sort()
        }
    }

    /// Direction shown on the header of the column with the given key.
    pub fn sort_icon_for(&self, key: &str) -> Option<SortOrder> {
        let order = if self.is_multi_sort() {
            self.state
                .multi_sort_meta
                .iter()
                .find(|meta| meta.column.key() == key)
                .map(|meta| meta.order)
        } else {
            self.state
                .sort_column
                .as_ref()
                .filter(|column| column.key() == key)
                .map(|_| self.state.sort_order)
        };
        order.filter(|o| *o != SortOrder::Unsorted)
    }

    /// Applies a sort request.
    ///
    /// Reads `{clientId}_sortKey` and `{clientId}_sortDir`, resets the page
    /// and sorts in-memory data right away.
    pub fn decode_sort(&mut self, params: &RequestParams) -> Result<()> {
        let sort_key = params.require(&self.param_name(suffix::SORT_KEY))?.to_string();
        let sort_dir = params.require(&self.param_name(suffix::SORT_DIR))?.to_string();

        if self.is_multi_sort() {
            let keys = split_list(&sort_key);
            let dirs = split_list(&sort_dir);
            let mut metas = Vec::new();
            for (key, dir) in align_trailing(&keys, &dirs) {
                let column = self.find_column(key)?;
                let sort_field = match self.column_view(&column) {
                    Some(view) => match view.sort_by() {
                        Some(binding) => view.resolve_field(binding)?,
                        None => None,
                    },
                    None => None,
                };
                metas.push(SortMeta {
                    column,
                    sort_field,
                    order: SortOrder::parse(dir)?,
                });
            }
            self.state.multi_sort_meta = metas;
        } else {
            let column = self.find_column(&sort_key)?;
            let sort_by = self
                .column_view(&column)
                .and_then(|view| view.sort_by().cloned());
            self.state.sort_order = SortOrder::parse(&sort_dir)?;
            self.state.sort_by = sort_by;
            self.state.sort_column = Some(column);
        }

        self.state.first = 0;
        if !self.is_lazy() {
            self.sort()?;
        }
        Ok(())
    }
}
