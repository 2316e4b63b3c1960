use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::DataTable;

use super::Feature;
use super::FeatureKey;

/// Moves the row window and re-renders the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageFeature;

impl Feature for PageFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::Page
    }

    fn should_decode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::PAGINATION)
    }

    fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        let params = ctx.params();
        let rows = params.parse_usize(&table.param_name(suffix::ROWS))?;
        let first = params.parse_usize(&table.param_name(suffix::FIRST))?;
        table.state.rows = rows;
        table.state.first = first;
        Ok(())
    }

    fn should_encode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::PAGINATION)
    }

    fn encode(
        &self,
        table: &mut DataTable,
        ctx: &mut RequestContext,
        renderer: &TableRenderer,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        if table.is_lazy() {
            table.load_lazy_data(ctx)?;
        }
        renderer.encode_body_update(table, out)
    }
}
