use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::DataTable;

use super::Feature;
use super::FeatureKey;

/// Renders the expansion of an expanded row.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowExpandFeature;

impl Feature for RowExpandFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::RowExpand
    }

    fn should_decode(&self, _table: &DataTable, _ctx: &RequestContext) -> bool {
        false
    }

    fn decode(&self, _table: &mut DataTable, _ctx: &mut RequestContext) -> Result<()> {
        Ok(())
    }

    fn should_encode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::ROW_EXPANSION)
    }

    fn encode(
        &self,
        table: &mut DataTable,
        ctx: &mut RequestContext,
        renderer: &TableRenderer,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        let index = ctx
            .params()
            .parse_usize(&table.param_name(suffix::EXPANDED_ROW_INDEX))?;
        renderer.encode_expansion(table, index, out)
    }
}
