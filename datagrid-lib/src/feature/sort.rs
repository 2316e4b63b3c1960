use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::DataTable;

use super::Feature;
use super::FeatureKey;

/// Applies sort requests and re-renders the sorted rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortFeature;

impl Feature for SortFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::Sort
    }

    fn should_decode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::SORTING)
    }

    fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        table.decode_sort(ctx.params())
    }

    fn should_encode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::SORTING)
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
