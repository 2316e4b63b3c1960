//! Filter engine: per-column filter values, filter widgets and local
//! filtering.

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::column::ColumnGroupKind;
use crate::column::FilterPosition;
use crate::column::UiColumn;
use crate::error::ConfigError;
use crate::error::Result;
use crate::model::Record;
use crate::model::Value;
use crate::request::RequestParams;
use crate::table::DataTable;

/// Suffix of the global filter parameter, `{clientId}{sep}globalFilter`.
pub const GLOBAL_FILTER: &str = "globalFilter";

/// How a filter value is matched against a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterMatchMode {
    #[default]
    StartsWith,
    EndsWith,
    Contains,
    Exact,
}

impl FilterMatchMode {
    /// Case-insensitive match of `value` against `filter`.
    pub fn matches(&self, value: &str, filter: &str) -> bool {
        let value = value.to_lowercase();
        let filter = filter.to_lowercase();
        match self {
            Self::StartsWith => value.starts_with(&filter),
            Self::EndsWith => value.ends_with(&filter),
            Self::Contains => value.contains(&filter),
            Self::Exact => value == filter,
        }
    }
}

/// One active column filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterEntry {
    /// Row field the filter applies to.
    pub field: String,
    pub value: String,
    pub match_mode: FilterMatchMode,
}

impl FilterEntry {
    /// Returns `true` if the row passes this filter.
    pub fn accepts(&self, row: &Record) -> bool {
        let cell = row.get_path(&self.field).map(|v| v.to_string()).unwrap_or_default();
        self.match_mode.matches(&cell, &self.value)
    }
}

/// Active filters keyed by filter id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterMap {
    entries: BTreeMap<String, FilterEntry>,
}

impl FilterMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, filter_id: impl Into<String>, entry: FilterEntry) {
        self.entries.insert(filter_id.into(), entry);
    }

    pub fn get(&self, filter_id: &str) -> Option<&FilterEntry> {
        self.entries.get(filter_id)
    }

    /// Filter value for a filter id.
    pub fn value(&self, filter_id: &str) -> Option<&str> {
        self.entries.get(filter_id).map(|e| e.value.as_str())
    }

    /// Filter id to value view.
    pub fn values(&self) -> BTreeMap<&str, &str> {
        self.entries
            .iter()
            .map(|(id, e)| (id.as_str(), e.value.as_str()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// One entry of a closed-choice filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChoice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Filter control of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterWidget {
    /// Free-text input.
    Text {
        id: String,
        value: String,
        max_length: Option<usize>,
    },
    /// Choice among bound options; the option matching the value is selected.
    Choice { id: String, options: Vec<FilterChoice> },
}

impl FilterWidget {
    /// Client id of the control.
    pub fn id(&self) -> &str {
        match self {
            FilterWidget::Text { id, .. } | FilterWidget::Choice { id, .. } => id,
        }
    }
}

fn choice(option: &Value, current: &str) -> FilterChoice {
    let (value, label) = match option {
        Value::Record(record) => {
            let value = record.get("value").map(|v| v.to_string()).unwrap_or_default();
            let label = record
                .get("label")
                .map(|v| v.to_string())
                .unwrap_or_else(|| value.clone());
            (value, label)
        }
        other => (other.to_string(), other.to_string()),
    };
    FilterChoice {
        selected: value == current,
        value,
        label,
    }
}

fn validate_filter(key: &str, column: &Column) -> std::result::Result<(), ConfigError> {
    if column.filter_by.is_none() {
        return Ok(());
    }
    FilterPosition::parse(&column.filter_position)?;
    match &column.filter_options {
        Some(options) if !matches!(options, Value::List(_)) => {
            Err(ConfigError::filter_options(key, options.type_name()))
        }
        _ => Ok(()),
    }
}

impl DataTable {
    /// Filter id of the column with the given key, `{columnKey}{sep}filter`.
    pub fn filter_id(&self, column_key: &str) -> String {
        format!("{}{}filter", column_key, self.config().separator)
    }

    /// Parameter name of the global filter.
    pub fn global_filter_id(&self) -> String {
        format!("{}{}{}", self.client_id(), self.config().separator, GLOBAL_FILTER)
    }

    /// Returns `true` if any column is filterable.
    pub fn is_filtering_enabled(&self) -> bool {
        self.ui_columns().iter().any(|(_, view)| view.filter_by().is_some())
    }

    /// Value a column's filter shows.
    ///
    /// The reset flag forces an empty value. Otherwise the request value wins
    /// over the bound default, which wins over the empty string.
    pub fn resolve_filter_value(&self, column_key: &str, view: &UiColumn<'_>, params: &RequestParams) -> String {
        if self.state.reset {
            return String::new();
        }
        if let Some(value) = params.get(&self.filter_id(column_key)) {
            return value.to_string();
        }
        view.column().filter_value.clone().unwrap_or_default()
    }

    /// Builds the filter control of a column.
    pub fn filter_widget(
        &self,
        column_key: &str,
        view: &UiColumn<'_>,
        params: &RequestParams,
    ) -> std::result::Result<FilterWidget, ConfigError> {
        let column = view.column();
        let id = self.filter_id(column_key);
        let value = self.resolve_filter_value(column_key, view, params);
        match &column.filter_options {
            None => Ok(FilterWidget::Text {
                id,
                value,
                max_length: column.filter_max_length,
            }),
            Some(Value::List(options)) => Ok(FilterWidget::Choice {
                id,
                options: options.iter().map(|o| choice(o, &value)).collect(),
            }),
            Some(other) => Err(ConfigError::filter_options(column_key, other.type_name())),
        }
    }

    /// Checks the options and position of every filterable column, the
    /// rows of the header column group included.
    pub fn validate_filters(&self) -> std::result::Result<(), ConfigError> {
        for (column, view) in self.ui_columns() {
            validate_filter(column.key(), view.column())?;
        }
        if let Some(group) = self.column_group(ColumnGroupKind::Header) {
            for column in group.rows.iter().flatten().filter(|c| c.rendered) {
                validate_filter(&self.static_column_key(&column.id), column)?;
            }
        }
        Ok(())
    }

    /// Applies a filter request.
    ///
    /// Collects every filterable column's non-blank request value and the
    /// global filter, resets the page and filters in-memory data.
    pub fn decode_filters(&mut self, params: &RequestParams) -> Result<()> {
        let mut columns = Vec::new();
        for (column, view) in self.ui_columns() {
            if let Some(binding) = view.filter_by() {
                let field = view.resolve_field(binding)?;
                columns.push((column.clone(), field, view.column().filter_match_mode));
            }
        }

        let mut filters = FilterMap::new();
        for (column, field, match_mode) in columns {
            let filter_id = self.filter_id(column.key());
            let Some(value) = params.get(&filter_id).map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };
            let Some(field) = field else {
                continue;
            };
            filters.insert(
                filter_id,
                FilterEntry {
                    field,
                    value: value.to_string(),
                    match_mode,
                },
            );
        }

        self.state.global_filter = params
            .get(&self.global_filter_id())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        debug!("{} active filters on {}", filters.len(), self.client_id());
        self.state.filters = filters;
        self.state.first = 0;

        if !self.is_lazy() {
            self.filter()?;
            if self.has_sort() {
                self.sort()?;
            }
        }
        Ok(())
    }

    /// Filters the unfiltered data in memory into the filtered value.
    pub fn filter(&mut self) -> Result<()> {
        if self.state.filters.is_empty() && self.state.global_filter.is_none() {
            self.state.filtered_value = None;
            return Ok(());
        }

        let global_fields = match &self.state.global_filter {
            Some(_) => self.filter_fields()?,
            None => Vec::new(),
        };
        let global = self.state.global_filter.as_deref();
        let filtered: Vec<Record> = self
            .source_rows()
            .iter()
            .filter(|row| self.state.filters.iter().all(|(_, entry)| entry.accepts(row)))
            .filter(|row| match global {
                Some(text) => global_fields.iter().any(|field| {
                    let cell = row.get_path(field).map(|v| v.to_string()).unwrap_or_default();
                    FilterMatchMode::Contains.matches(&cell, text)
                }),
                None => true,
            })
            .cloned()
            .collect();
        debug!("{} of {} rows pass the filters", filtered.len(), self.source_rows().len());
        self.state.filtered_value = Some(filtered);
        Ok(())
    }

    /// Filter fields of every filterable column.
    fn filter_fields(&self) -> Result<Vec<String>> {
        let mut fields = Vec::new();
        for (_, view) in self.ui_columns() {
            if let Some(binding) = view.filter_by()
                && let Some(field) = view.resolve_field(binding)?
            {
                fields.push(field);
            }
        }
        Ok(fields)
    }

    /// Filters as a lazy provider receives them: field to value, plus the
    /// global filter under `globalFilter`.
    pub fn lazy_filters(&self) -> BTreeMap<String, String> {
        let mut filters: BTreeMap<String, String> = self
            .state
            .filters
            .iter()
            .map(|(_, entry)| (entry.field.clone(), entry.value.clone()))
            .collect();
        if let Some(global) = &self.state.global_filter {
            filters.insert(GLOBAL_FILTER.to_string(), global.clone());
        }
        filters
    }

    /// Clears value-dependent state and raises the one-shot reset flag.
    pub fn reset(&mut self) {
        self.state.filtered_value = None;
        self.state.filters.clear();
        self.state.global_filter = None;
        self.state.selection = Default::default();
        self.state.selected_row_keys.clear();
        self.state.first = 0;
        self.state.reset = true;
        if let Some(model) = self.lazy_model_mut() {
            model.set_wrapped_data(None);
        }
    }
}
