//! Table renderer: the decode/encode cycle and the table markup.

use std::sync::Arc;

use log::debug;
use log::trace;

use crate::column::Column;
use crate::column::ColumnGroupKind;
use crate::column::FilterPosition;
use crate::column::SelectionMode;
use crate::column::SubTable;
use crate::column::SummaryRow;
use crate::column::UiColumn;
use crate::error::LookupError;
use crate::error::Result;
use crate::feature::FeatureRegistry;
use crate::filter::FilterWidget;
use crate::model::Value;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::DataTable;

use super::MarkupWriter;
use super::RowContext;
use super::WidgetConfig;

/// Client widget type named in the bootstrap script.
pub const WIDGET_TYPE: &str = "DataTable";

/// Drives decoding and encoding of tables through a feature registry.
///
/// Holds no per-request state; one renderer serves every table and request.
#[derive(Clone)]
pub struct TableRenderer {
    registry: Arc<FeatureRegistry>,
}

impl TableRenderer {
    /// Creates a renderer dispatching through the given registry.
    pub fn new(registry: Arc<FeatureRegistry>) -> Self {
        Self { registry }
    }

    /// The feature registry.
    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    /// Decodes a request: every feature whose predicate holds, a context
    /// menu click, then the behavior notification.
    pub fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        for feature in self.registry.iter() {
            if feature.should_decode(table, ctx) {
                debug!("decoding {} on {}", feature.key(), table.client_id());
                feature.decode(table, ctx)?;
            }
        }
        table.decode_menu_action(ctx)?;
        table.decode_behaviors(ctx)
    }

    /// Returns `true` if the request asks for isolated feature updates.
    pub fn is_feature_request(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::ENCODE_FEATURE)
    }

    /// Encodes the response.
    ///
    /// A feature request renders only the fragments of the features whose
    /// predicate holds. Anything else renders the whole table.
    pub fn encode_end(
        &self,
        table: &mut DataTable,
        ctx: &mut RequestContext,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        if self.is_feature_request(table, ctx) {
            for feature in self.registry.iter() {
                if feature.should_encode(table, ctx) {
                    debug!("encoding {} on {}", feature.key(), table.client_id());
                    feature.encode(table, ctx, self, out)?;
                }
            }
            return Ok(());
        }

        self.pre_encode(table, ctx)?;
        self.encode_markup(table, ctx, out)?;
        self.encode_script(table, out)?;
        table.state.reset = false;
        Ok(())
    }

    /// Prepares a full render.
    ///
    /// Loads lazy data, applies the default sort to in-memory data, moves
    /// `first` back into range and recounts columns. Filter declarations are
    /// checked here so a bad one fails before any markup is written.
    pub fn pre_encode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        if table.is_lazy() {
            if table.attrs.live_scroll {
                let rows = table.attrs.scroll_rows;
                table.load_lazy_scroll_data(0, rows)?;
            } else {
                table.load_lazy_data(ctx)?;
            }
        } else if table.has_sort() {
            table.sort()?;
        }

        if table.attrs.paginator {
            table.calculate_first();
        }
        table.reset_columns_count();
        table.validate_filters()?;
        if table.is_selection_enabled() {
            table.find_selected_row_keys()?;
        }
        Ok(())
    }

    /// Renders the container and everything in it.
    pub fn encode_markup(&self, table: &DataTable, ctx: &RequestContext, out: &mut dyn MarkupWriter) -> Result<()> {
        let attrs = &table.attrs;
        out.start_element("div")?;
        out.attribute("id", table.client_id())?;
        out.attribute(
            "class",
            if attrs.scrollable {
                "datagrid datagrid-scrollable"
            } else {
                "datagrid"
            },
        )?;

        if let Some(header) = table.header() {
            out.start_element("div")?;
            out.attribute("class", "datagrid-header")?;
            header.encode_all(None, out)?;
            out.end_element("div")?;
        }

        let position = attrs.paginator_position.as_str();
        if attrs.paginator && position != "bottom" {
            self.encode_paginator(table, "top", out)?;
        }

        if attrs.scrollable {
            self.encode_scrollable_table(table, ctx, out)?;
        } else {
            self.encode_regular_table(table, ctx, out)?;
        }

        if attrs.paginator && position != "top" {
            self.encode_paginator(table, "bottom", out)?;
        }

        if let Some(footer) = table.footer() {
            out.start_element("div")?;
            out.attribute("class", "datagrid-footer")?;
            footer.encode_all(None, out)?;
            out.end_element("div")?;
        }

        if table.is_selection_enabled() {
            let keys = table.selected_row_keys_as_string();
            self.encode_state_holder(table, suffix::SELECTION, Some(&keys), out)?;
        }
        if attrs.draggable_columns {
            self.encode_state_holder(table, suffix::COLUMN_ORDER, None, out)?;
        }
        if attrs.scrollable {
            self.encode_state_holder(table, suffix::SCROLL_STATE, None, out)?;
        }

        out.end_element("div")
    }

    /// Emits the widget bootstrap script.
    pub fn encode_script(&self, table: &DataTable, out: &mut dyn MarkupWriter) -> Result<()> {
        let config = WidgetConfig::from_table(table);
        out.script(WIDGET_TYPE, &config.to_json())
    }

    fn encode_state_holder(
        &self,
        table: &DataTable,
        name: &str,
        value: Option<&str>,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        let id = table.param_name(name);
        out.start_element("input")?;
        out.attribute("type", "hidden")?;
        out.attribute("id", &id)?;
        out.attribute("name", &id)?;
        out.attribute("autocomplete", "off")?;
        if let Some(value) = value {
            out.attribute("value", value)?;
        }
        out.end_element("input")
    }

    fn encode_paginator(&self, table: &DataTable, position: &str, out: &mut dyn MarkupWriter) -> Result<()> {
        let page = table.page();
        let page_count = table.page_count();
        out.start_element("div")?;
        out.attribute("id", &format!("{}_paginator_{}", table.client_id(), position))?;
        out.attribute("class", "datagrid-paginator")?;
        out.attribute("data-page", &page.to_string())?;
        out.attribute("data-page-count", &page_count.to_string())?;
        out.attribute("data-rows", &table.rows_to_render().to_string())?;
        out.attribute("data-row-count", &table.row_count().to_string())?;
        out.text(&format!("({} of {})", page + 1, page_count))?;
        out.end_element("div")
    }

    fn encode_regular_table(&self, table: &DataTable, ctx: &RequestContext, out: &mut dyn MarkupWriter) -> Result<()> {
        out.start_element("div")?;
        out.attribute("class", "datagrid-tablewrapper")?;
        out.start_element("table")?;
        out.attribute("role", "grid")?;
        self.encode_thead(table, ctx, out)?;
        if table.has_footer_column() {
            self.encode_tfoot(table, out)?;
        }
        self.encode_tbody(table, false, out)?;
        out.end_element("table")?;
        out.end_element("div")
    }

    fn encode_scrollable_table(
        &self,
        table: &DataTable,
        ctx: &RequestContext,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        out.start_element("div")?;
        out.attribute("class", "datagrid-scrollable-header")?;
        out.start_element("table")?;
        out.attribute("role", "grid")?;
        self.encode_thead(table, ctx, out)?;
        out.end_element("table")?;
        out.end_element("div")?;

        out.start_element("div")?;
        out.attribute("class", "datagrid-scrollable-body")?;
        if let Some(height) = &table.attrs.scroll_height {
            out.attribute("style", &format!("height:{}px", height))?;
        }
        out.start_element("table")?;
        out.attribute("role", "grid")?;
        out.start_element("colgroup")?;
        for _ in 0..table.columns_count() {
            out.start_element("col")?;
            out.end_element("col")?;
        }
        out.end_element("colgroup")?;
        self.encode_tbody(table, false, out)?;
        out.end_element("table")?;
        out.end_element("div")?;

        if table.has_footer_column() {
            out.start_element("div")?;
            out.attribute("class", "datagrid-scrollable-footer")?;
            out.start_element("table")?;
            out.attribute("role", "grid")?;
            self.encode_tfoot(table, out)?;
            out.end_element("table")?;
            out.end_element("div")?;
        }
        Ok(())
    }

    fn encode_thead(&self, table: &DataTable, ctx: &RequestContext, out: &mut dyn MarkupWriter) -> Result<()> {
        out.start_element("thead")?;
        out.attribute("id", &table.param_name("head"))?;

        if let Some(group) = table.column_group(ColumnGroupKind::Header) {
            for row in &group.rows {
                out.start_element("tr")?;
                out.attribute("role", "row")?;
                for column in row.iter().filter(|c| c.rendered) {
                    let key = table.static_column_key(&column.id);
                    self.encode_column_header(table, ctx, &key, &UiColumn::Static(column), out)?;
                }
                out.end_element("tr")?;
            }
        } else {
            out.start_element("tr")?;
            out.attribute("role", "row")?;
            for (column, view) in table.ui_columns() {
                if view.is_rendered() {
                    self.encode_column_header(table, ctx, column.key(), &view, out)?;
                }
            }
            out.end_element("tr")?;
        }

        out.end_element("thead")
    }

    fn encode_column_header(
        &self,
        table: &DataTable,
        ctx: &RequestContext,
        key: &str,
        view: &UiColumn<'_>,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        let column = view.column();
        let sortable = column.sort_by.is_some();
        let sort = table.sort_icon_for(key);

        out.start_element("th")?;
        out.attribute("id", key)?;
        out.attribute("role", "columnheader")?;
        out.attribute(
            "class",
            if sortable {
                "datagrid-column datagrid-sortable-column"
            } else {
                "datagrid-column"
            },
        )?;
        if let Some(order) = sort {
            out.attribute("aria-sort", &order.as_str().to_lowercase())?;
        }
        encode_span(column, out)?;
        let width = match table.state.column_widths.get(key) {
            Some(size) => Some(format!("{}px", size.width)),
            None => column.width.clone(),
        };
        if let Some(width) = width {
            out.attribute("style", &format!("width:{}", width))?;
        }

        let filter_position = match column.filter_by {
            Some(_) => Some(FilterPosition::parse(&column.filter_position)?),
            None => None,
        };
        if filter_position == Some(FilterPosition::Top) {
            self.encode_filter(table, ctx, key, view, out)?;
        }

        out.start_element("span")?;
        out.attribute("class", "datagrid-column-title")?;
        match &column.header {
            Some(facet) => facet.encode_all(None, out)?,
            None => out.text(&view.header_text().unwrap_or_default())?,
        }
        out.end_element("span")?;

        if sortable {
            out.start_element("span")?;
            out.attribute("class", "datagrid-sortable-column-icon")?;
            if let Some(order) = sort {
                out.attribute("data-sort", order.as_str())?;
            }
            out.end_element("span")?;
        }

        if filter_position == Some(FilterPosition::Bottom) {
            self.encode_filter(table, ctx, key, view, out)?;
        }

        if column.selection_mode == Some(SelectionMode::Multiple) {
            out.start_element("input")?;
            out.attribute("type", "checkbox")?;
            out.attribute("id", &table.param_name("checkbox_all"))?;
            out.attribute("class", "datagrid-select-all")?;
            out.end_element("input")?;
        }

        out.end_element("th")
    }

    /// Renders the filter control of a column.
    pub fn encode_filter(
        &self,
        table: &DataTable,
        ctx: &RequestContext,
        key: &str,
        view: &UiColumn<'_>,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        match table.filter_widget(key, view, ctx.params())? {
            FilterWidget::Text { id, value, max_length } => {
                out.start_element("input")?;
                out.attribute("id", &id)?;
                out.attribute("name", &id)?;
                out.attribute("type", "text")?;
                out.attribute("class", "datagrid-column-filter")?;
                out.attribute("autocomplete", "off")?;
                out.attribute("value", &value)?;
                if let Some(max) = max_length {
                    out.attribute("maxlength", &max.to_string())?;
                }
                out.end_element("input")
            }
            FilterWidget::Choice { id, options } => {
                out.start_element("select")?;
                out.attribute("id", &id)?;
                out.attribute("name", &id)?;
                out.attribute("class", "datagrid-column-filter")?;
                for option in options {
                    out.start_element("option")?;
                    out.attribute("value", &option.value)?;
                    if option.selected {
                        out.attribute("selected", "selected")?;
                    }
                    out.text(&option.label)?;
                    out.end_element("option")?;
                }
                out.end_element("select")
            }
        }
    }

    fn encode_tfoot(&self, table: &DataTable, out: &mut dyn MarkupWriter) -> Result<()> {
        out.start_element("tfoot")?;
        out.attribute("id", &table.param_name("foot"))?;

        if let Some(group) = table.column_group(ColumnGroupKind::Footer) {
            for row in &group.rows {
                out.start_element("tr")?;
                for column in row.iter().filter(|c| c.rendered) {
                    encode_column_footer(column, out)?;
                }
                out.end_element("tr")?;
            }
        } else {
            out.start_element("tr")?;
            for (_, view) in table.ui_columns() {
                if view.is_rendered() {
                    encode_column_footer(view.column(), out)?;
                }
            }
            out.end_element("tr")?;
        }

        out.end_element("tfoot")
    }

    /// Renders the body rows of the current page.
    ///
    /// With `data_only` the rows are written without the enclosing `tbody`,
    /// as partial updates replace the body content.
    pub fn encode_tbody(&self, table: &DataTable, data_only: bool, out: &mut dyn MarkupWriter) -> Result<()> {
        if !data_only {
            out.start_element("tbody")?;
            out.attribute("id", &table.param_name("data"))?;
            out.attribute("class", "datagrid-data")?;
        }

        if table.row_count() == 0 {
            self.encode_empty_message(table, out)?;
        } else if let Some(sub) = table.sub_table() {
            self.encode_sub_table(table, sub, table.state.first, table.last(), out)?;
        } else {
            self.encode_rows(table, table.state.first, table.last(), out)?;
        }

        if !data_only {
            out.end_element("tbody")?;
        }
        Ok(())
    }

    /// Re-renders the body rows of a partial update.
    pub fn encode_body_update(&self, table: &mut DataTable, out: &mut dyn MarkupWriter) -> Result<()> {
        if table.is_selection_enabled() {
            table.find_selected_row_keys()?;
        }
        self.encode_tbody(table, true, out)
    }

    fn encode_empty_message(&self, table: &DataTable, out: &mut dyn MarkupWriter) -> Result<()> {
        out.start_element("tr")?;
        out.attribute("class", "datagrid-empty-message")?;
        out.start_element("td")?;
        out.attribute("colspan", &table.columns_count().to_string())?;
        match table.empty_message() {
            Some(facet) => facet.encode_all(None, out)?,
            None => out.text(&table.attrs.empty_message)?,
        }
        out.end_element("td")?;
        out.end_element("tr")
    }

    /// Renders rows `from..to`, stopping at the first missing row.
    ///
    /// With a summary row and a sort in place, a summary follows each run
    /// of rows sharing a sort value. A run may continue past `to` onto the
    /// next page, in which case no summary closes the page.
    pub fn encode_rows(&self, table: &DataTable, from: usize, to: usize, out: &mut dyn MarkupWriter) -> Result<()> {
        let summary = match table.summary_row() {
            Some(summary) => table.resolve_sort_field()?.map(|field| (summary, field)),
            None => None,
        };

        for index in from..to {
            if !self.encode_row(table, index, out)? {
                break;
            }
            if let Some((summary, field)) = &summary {
                let current = table.row_at(index).and_then(|row| row.get_path(field));
                // A lazy window holds only the rows before `to`.
                let next = if table.is_lazy() && index + 1 >= to {
                    None
                } else {
                    table.row_at(index + 1).map(|row| row.get_path(field))
                };
                let group_ends = match next {
                    Some(next) => !values_equal(current, next),
                    None => true,
                };
                if group_ends {
                    self.encode_summary_row(table, summary, index, out)?;
                }
            }
        }
        Ok(())
    }

    /// Renders rows `from..to` through the sub table's columns instead of
    /// the table's own.
    pub fn encode_sub_table(
        &self,
        table: &DataTable,
        sub: &SubTable,
        from: usize,
        to: usize,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        for index in from..to {
            let Some(row) = self.row_context(table, index)? else {
                break;
            };
            out.start_element("tr")?;
            out.attribute("data-ri", &index.to_string())?;
            if let Some(key) = &row.key {
                out.attribute("data-rk", key.as_str())?;
            }
            out.attribute("class", "datagrid-subtable-row")?;
            out.attribute("role", "row")?;
            for column in sub.columns.iter().filter(|c| c.rendered) {
                out.start_element("td")?;
                out.attribute("role", "gridcell")?;
                encode_span(column, out)?;
                self.encode_cell_content(table, &UiColumn::Static(column), &row, out)?;
                out.end_element("td")?;
            }
            out.end_element("tr")?;
        }
        Ok(())
    }

    /// Renders one row; returns `false` if no row exists at the index.
    pub fn encode_row(&self, table: &DataTable, index: usize, out: &mut dyn MarkupWriter) -> Result<bool> {
        let Some(row) = self.row_context(table, index)? else {
            return Ok(false);
        };
        trace!("encoding row {} of {}", index, table.client_id());

        out.start_element("tr")?;
        out.attribute("data-ri", &index.to_string())?;
        if let Some(key) = &row.key {
            out.attribute("data-rk", key.as_str())?;
        }
        out.attribute(
            "class",
            if row.selected {
                "datagrid-row datagrid-selected"
            } else {
                "datagrid-row"
            },
        )?;
        out.attribute("role", "row")?;
        if table.is_selection_enabled() {
            out.attribute("aria-selected", if row.selected { "true" } else { "false" })?;
        }

        for (_, view) in table.ui_columns() {
            if view.is_rendered() {
                out.start_element("td")?;
                out.attribute("role", "gridcell")?;
                encode_span(view.column(), out)?;
                self.encode_cell_content(table, &view, &row, out)?;
                out.end_element("td")?;
            }
        }

        out.end_element("tr")?;
        Ok(true)
    }

    /// Builds the row context of a row index.
    pub fn row_context<'t>(&self, table: &'t DataTable, index: usize) -> Result<Option<RowContext<'t>>> {
        let Some(data) = table.row_at(index) else {
            return Ok(None);
        };
        let key = if table.is_selection_enabled() || table.attrs.row_key.is_some() {
            Some(table.row_key_for(data)?)
        } else {
            None
        };
        let selected = key.as_ref().is_some_and(|k| table.is_selected(k));
        Ok(Some(RowContext {
            index,
            data,
            key,
            selected,
        }))
    }

    /// Renders what a cell shows: a selection control, the column's
    /// children, or its field.
    pub fn encode_cell_content(
        &self,
        table: &DataTable,
        view: &UiColumn<'_>,
        row: &RowContext<'_>,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        let column = view.column();
        if let Some(mode) = column.selection_mode {
            let kind = match mode {
                SelectionMode::Single => "radio",
                SelectionMode::Multiple => "checkbox",
            };
            out.start_element("input")?;
            out.attribute("type", kind)?;
            out.attribute("name", &table.param_name(kind))?;
            if row.selected {
                out.attribute("checked", "checked")?;
            }
            if column.disabled_selection {
                out.attribute("disabled", "disabled")?;
            }
            return out.end_element("input");
        }

        if column.children.is_empty() {
            return out.text(&view.cell_value(row.data)?.to_string());
        }
        for child in &column.children {
            child.encode_all(Some(row), out)?;
        }
        Ok(())
    }

    fn encode_summary_row(
        &self,
        table: &DataTable,
        summary: &SummaryRow,
        index: usize,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        let row = self.row_context(table, index)?;
        out.start_element("tr")?;
        out.attribute("class", "datagrid-summary-row")?;
        out.start_element("td")?;
        out.attribute("colspan", &table.columns_count().to_string())?;
        for child in &summary.children {
            child.encode_all(row.as_ref(), out)?;
        }
        out.end_element("td")?;
        out.end_element("tr")
    }

    /// Renders the expansion row of a row index.
    pub fn encode_expansion(&self, table: &DataTable, index: usize, out: &mut dyn MarkupWriter) -> Result<()> {
        let Some(expansion) = table.row_expansion() else {
            debug!("{} has no row expansion to render", table.client_id());
            return Ok(());
        };
        let row = self
            .row_context(table, index)?
            .ok_or(LookupError::RowIndex { index })?;

        out.start_element("tr")?;
        out.attribute("class", "datagrid-expanded-row-content")?;
        out.attribute("data-ri", &index.to_string())?;
        out.start_element("td")?;
        out.attribute("colspan", &table.columns_count().to_string())?;
        for child in &expansion.children {
            child.encode_all(Some(&row), out)?;
        }
        out.end_element("td")?;
        out.end_element("tr")
    }
}

fn values_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b).is_eq(),
        (None, None) => true,
        (Some(v), None) | (None, Some(v)) => v.is_null(),
    }
}

fn encode_span(column: &Column, out: &mut dyn MarkupWriter) -> Result<()> {
    if column.rowspan > 1 {
        out.attribute("rowspan", &column.rowspan.to_string())?;
    }
    if column.colspan > 1 {
        out.attribute("colspan", &column.colspan.to_string())?;
    }
    Ok(())
}

fn encode_column_footer(column: &Column, out: &mut dyn MarkupWriter) -> Result<()> {
    out.start_element("td")?;
    encode_span(column, out)?;
    match &column.footer {
        Some(facet) => facet.encode_all(None, out)?,
        None => out.text(column.footer_text.as_deref().unwrap_or_default())?,
    }
    out.end_element("td")
}
