//! Request parameters and per-request context.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::error::ParseError;
use crate::event::SynthesizedEvent;

/// Request parameter suffixes, appended to a table's client id as `{clientId}_{suffix}`.
pub mod suffix {
    pub const ENCODE_FEATURE: &str = "encodeFeature";
    pub const FIRST: &str = "first";
    pub const ROWS: &str = "rows";
    pub const PAGINATION: &str = "pagination";
    pub const SORTING: &str = "sorting";
    pub const SORT_KEY: &str = "sortKey";
    pub const SORT_DIR: &str = "sortDir";
    pub const FILTERING: &str = "filtering";
    pub const SELECTION: &str = "selection";
    pub const INSTANT_SELECTED_ROW_KEY: &str = "instantSelectedRowKey";
    pub const INSTANT_UNSELECTED_ROW_KEY: &str = "instantUnselectedRowKey";
    pub const ROW_EDIT_INDEX: &str = "rowEditIndex";
    pub const ROW_EDIT_ACTION: &str = "rowEditAction";
    pub const CELL_INFO: &str = "cellInfo";
    pub const COL_RESIZE: &str = "colResize";
    pub const COLUMN_ID: &str = "columnId";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const CHECKED: &str = "checked";
    pub const COLUMN_ORDER: &str = "columnOrder";
    pub const ROW_EXPANSION: &str = "rowExpansion";
    pub const EXPANDED_ROW_INDEX: &str = "expandedRowIndex";
    pub const COLLAPSED_ROW_INDEX: &str = "collapsedRowIndex";
    pub const SCROLLING: &str = "scrolling";
    pub const SCROLL_OFFSET: &str = "scrollOffset";
    pub const SCROLL_STATE: &str = "scrollState";
    pub const MENU_ID: &str = "menuid";
}

/// The request parameter map of one HTTP round trip.
///
/// # Example
///
/// ```
/// use datagrid_lib::request::RequestParams;
///
/// let params = RequestParams::from_query("cars_first=20&cars_rows=10");
/// assert_eq!(params.get("cars_first"), Some("20"));
/// assert_eq!(params.parse_usize("cars_rows").unwrap(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    params: HashMap<String, String>,
}

impl RequestParams {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query or body.
    ///
    /// A repeated name keeps its last value.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Adds a parameter, returning the map (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a parameter in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Returns the parameter value, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns `true` if the parameter is present (even if empty).
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns the parameter value or a missing-parameter error.
    pub fn require(&self, name: &str) -> Result<&str, ParseError> {
        self.get(name).ok_or_else(|| ParseError::missing(name))
    }

    /// Reads a required non-negative integer parameter.
    pub fn parse_usize(&self, name: &str) -> Result<usize, ParseError> {
        let value = self.require(name)?;
        value
            .trim()
            .parse()
            .map_err(|_| ParseError::integer(name, value))
    }

    /// Reads a required signed integer parameter.
    pub fn parse_i64(&self, name: &str) -> Result<i64, ParseError> {
        let value = self.require(name)?;
        value
            .trim()
            .parse()
            .map_err(|_| ParseError::integer(name, value))
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// State of one request/response cycle.
///
/// Owns the incoming parameters and collects what the response carries
/// besides markup: callback parameters for the client and the events
/// synthesized during decode.
#[derive(Debug, Default)]
pub struct RequestContext {
    params: RequestParams,
    callback_params: BTreeMap<String, serde_json::Value>,
    events: Vec<SynthesizedEvent>,
}

impl RequestContext {
    /// Creates a context for the given parameters.
    pub fn new(params: RequestParams) -> Self {
        Self {
            params,
            callback_params: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// Returns the request parameters.
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    /// Adds a callback parameter surfaced to the client with the response.
    pub fn add_callback_param(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.callback_params.insert(name.into(), value.into());
    }

    /// Returns the collected callback parameters.
    pub fn callback_params(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.callback_params
    }

    /// Queues a synthesized event for the host to deliver.
    pub fn queue_event(&mut self, event: SynthesizedEvent) {
        self.events.push(event);
    }

    /// Returns the events queued so far.
    pub fn events(&self) -> &[SynthesizedEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_decodes() {
        let params = RequestParams::from_query("?t_sortKey=t%3Abrand&t_sortDir=ASCENDING&flag=");
        assert_eq!(params.get("t_sortKey"), Some("t:brand"));
        assert!(params.contains("flag"));
        assert_eq!(params.get("flag"), Some(""));
    }

    #[test]
    fn test_parse_usize_rejects_garbage() {
        let params = RequestParams::new().with("t_first", "ten");
        let err = params.parse_usize("t_first").unwrap_err();
        assert!(matches!(err, ParseError::Integer { .. }));
        assert!(matches!(
            params.parse_usize("t_rows"),
            Err(ParseError::MissingParam { .. })
        ));
    }
}
