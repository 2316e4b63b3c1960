//! Selection tracker: resolves the bound selection into row keys and
//! applies selection requests.

use log::trace;
use log::warn;

use crate::column::SelectionMode;
use crate::error::ConfigError;
use crate::error::Result;
use crate::model::Record;
use crate::model::RowKey;
use crate::model::SelectionValue;
use crate::request::RequestParams;
use crate::request::suffix;
use crate::table::DataTable;

impl DataTable {
    /// Returns `true` if the table or any column enables selection.
    pub fn is_selection_enabled(&self) -> bool {
        self.attrs.selection_mode.is_some() || self.column_selection_mode().is_some()
    }

    /// Effective selection mode.
    ///
    /// The table's mode wins; a selection column maps to `radio` for single
    /// and `checkbox` for multiple selection.
    pub fn resolve_selection_mode(&self) -> Option<&'static str> {
        if let Some(mode) = self.attrs.selection_mode {
            return Some(mode.as_str());
        }
        self.column_selection_mode().map(|mode| match mode {
            SelectionMode::Single => "radio",
            SelectionMode::Multiple => "checkbox",
        })
    }

    /// Returns `true` if at most one row can be selected.
    pub fn is_single_selection_mode(&self) -> bool {
        matches!(self.resolve_selection_mode(), Some("single") | Some("radio"))
    }

    /// Key of a row.
    ///
    /// Uses the row key binding when one is declared, otherwise the data
    /// source's row-key capability.
    pub fn row_key_for(&self, row: &Record) -> Result<RowKey> {
        if let Some(binding) = &self.attrs.row_key {
            let value = binding.descriptor()?.value_of(row, None);
            return Ok(RowKey::from(&value));
        }
        match self.row_key_model() {
            Some(model) => Ok(model.row_key(row)),
            None => Err(ConfigError::MissingRowKey.into()),
        }
    }

    /// Row with the given key.
    pub fn row_data(&self, key: &str) -> Result<Option<Record>> {
        if self.attrs.row_key.is_some() {
            for row in self.value() {
                if self.row_key_for(row)?.as_str() == key {
                    return Ok(Some(row.clone()));
                }
            }
            return Ok(None);
        }
        match self.row_key_model() {
            Some(model) => Ok(model.row_data(key)),
            None => Err(ConfigError::MissingRowKey.into()),
        }
    }

    /// Recomputes the selected row keys from the bound selection.
    pub fn find_selected_row_keys(&mut self) -> Result<()> {
        let keys = match &self.state.selection {
            SelectionValue::Empty => Vec::new(),
            SelectionValue::Array(rows) | SelectionValue::List(rows)
                if self.is_single_selection_mode() =>
            {
                return Err(ConfigError::SingleSelectionCollection { len: rows.len() }.into());
            }
            selection => selection
                .rows()
                .into_iter()
                .map(|row| self.row_key_for(row))
                .collect::<Result<Vec<_>>>()?,
        };
        trace!("{} selected row keys on {}", keys.len(), self.client_id());
        self.state.selected_row_keys = keys;
        Ok(())
    }

    /// Keys resolved by the last [`find_selected_row_keys`].
    ///
    /// [`find_selected_row_keys`]: DataTable::find_selected_row_keys
    pub fn selected_row_keys(&self) -> &[RowKey] {
        &self.state.selected_row_keys
    }

    /// Selected keys joined with commas, as the selection hidden input holds them.
    pub fn selected_row_keys_as_string(&self) -> String {
        self.state
            .selected_row_keys
            .iter()
            .map(RowKey::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Returns `true` if the key is among the selected keys.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.state.selected_row_keys.contains(key)
    }

    /// Applies the `{clientId}_selection` input.
    ///
    /// Single mode selects the row of the one key, or nothing. Multiple mode
    /// selects the rows of every key in order, keeping the bound shape.
    /// Keys no row resolves to are skipped.
    pub fn decode_selection(&mut self, params: &RequestParams) -> Result<()> {
        let Some(raw) = self.param(params, suffix::SELECTION) else {
            return Ok(());
        };
        let keys: Vec<&str> = raw.split(',').map(str::trim).filter(|k| !k.is_empty()).collect();

        let selection = if self.is_single_selection_mode() {
            match keys.first() {
                Some(key) => match self.row_data(key)? {
                    Some(row) => SelectionValue::Item(row),
                    None => {
                        warn!("selected row key {} not found in {}", key, self.client_id());
                        SelectionValue::Empty
                    }
                },
                None => SelectionValue::Empty,
            }
        } else {
            let mut rows = Vec::with_capacity(keys.len());
            for key in keys {
                match self.row_data(key)? {
                    Some(row) => rows.push(row),
                    None => warn!("selected row key {} not found in {}", key, self.client_id()),
                }
            }
            match self.state.selection {
                SelectionValue::Array(_) => SelectionValue::Array(rows),
                _ => SelectionValue::List(rows),
            }
        };
        self.state.selection = selection;
        Ok(())
    }
}
