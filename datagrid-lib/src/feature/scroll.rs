use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::DataTable;

use super::Feature;
use super::FeatureKey;

/// Renders the next window of a live scrolling table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollFeature;

impl Feature for ScrollFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::Scroll
    }

    fn should_decode(&self, _table: &DataTable, _ctx: &RequestContext) -> bool {
        false
    }

    fn decode(&self, _table: &mut DataTable, _ctx: &mut RequestContext) -> Result<()> {
        Ok(())
    }

    fn should_encode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::SCROLLING)
    }

    fn encode(
        &self,
        table: &mut DataTable,
        ctx: &mut RequestContext,
        renderer: &TableRenderer,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        let offset = ctx
            .params()
            .parse_usize(&table.param_name(suffix::SCROLL_OFFSET))?;
        let rows = table.attrs.scroll_rows;
        if table.is_lazy() {
            table.load_lazy_scroll_data(offset, rows)?;
        }
        if table.is_selection_enabled() {
            table.find_selected_row_keys()?;
        }
        renderer.encode_rows(table, offset, offset + rows, out)
    }
}
