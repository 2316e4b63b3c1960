//! Widget bootstrap configuration.

use serde::Serialize;

use crate::table::DataTable;

/// Paginator settings of the client widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatorConfig {
    pub rows: usize,
    pub row_count: usize,
    pub page: usize,
    pub paginator_position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_per_page_template: Option<String>,
    pub always_visible: bool,
}

/// Configuration object emitted with the widget script.
///
/// Options that do not apply are left out of the serialized object.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_var: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paginator: Option<PaginatorConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrollable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_scroll: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_step: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resizable_columns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_resize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draggable_columns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_sort: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky_header: Option<bool>,
}

fn flag(enabled: bool) -> Option<bool> {
    enabled.then_some(true)
}

impl WidgetConfig {
    /// Builds the configuration of a table's widget.
    pub fn from_table(table: &DataTable) -> Self {
        let attrs = &table.attrs;
        let config = table.config();

        let paginator = attrs.paginator.then(|| PaginatorConfig {
            rows: table.rows_to_render(),
            row_count: table.row_count(),
            page: table.page(),
            paginator_position: attrs.paginator_position.clone(),
            template: attrs.paginator_template.clone(),
            rows_per_page_template: attrs.rows_per_page_template.clone(),
            always_visible: attrs.paginator_always_visible,
        });

        let filtering = table.is_filtering_enabled();
        let (filter_event, filter_delay) = if filtering {
            (
                Some(
                    attrs
                        .filter_event
                        .clone()
                        .unwrap_or_else(|| config.default_filter_event.clone()),
                ),
                Some(attrs.filter_delay.unwrap_or(config.default_filter_delay)),
            )
        } else {
            (None, None)
        };

        let (live_scroll, scroll_step, scroll_limit) = if attrs.scrollable && attrs.live_scroll {
            (
                Some(true),
                Some(attrs.scroll_rows),
                Some(attrs.scroll_limit.unwrap_or_else(|| table.row_count())),
            )
        } else {
            (None, None, None)
        };

        Self {
            id: table.client_id().to_string(),
            widget_var: attrs.widget_var.clone(),
            paginator,
            selection_mode: table.resolve_selection_mode().map(str::to_string),
            filter: flag(filtering),
            filter_event,
            filter_delay,
            expansion: flag(table.row_expansion().is_some()),
            scrollable: flag(attrs.scrollable),
            live_scroll,
            scroll_step,
            scroll_limit,
            scroll_width: attrs.scrollable.then(|| attrs.scroll_width.clone()).flatten(),
            scroll_height: attrs.scrollable.then(|| attrs.scroll_height.clone()).flatten(),
            resizable_columns: flag(attrs.resizable_columns),
            live_resize: flag(attrs.resizable_columns && attrs.live_resize),
            draggable_columns: flag(attrs.draggable_columns),
            editable: flag(attrs.editable),
            edit_mode: attrs.editable.then(|| attrs.edit_mode.clone()),
            cell_separator: attrs.cell_separator.clone(),
            multi_sort: flag(table.is_multi_sort()),
            sticky_header: flag(attrs.sticky_header),
        }
    }

    /// Serializes the configuration as a JSON object.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
