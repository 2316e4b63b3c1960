use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::DataTable;

use super::Feature;
use super::FeatureKey;

/// Applies column filters and re-renders the filtered rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterFeature;

impl Feature for FilterFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::Filter
    }

    fn should_decode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::FILTERING)
    }

    fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        table.decode_filters(ctx.params())
    }

    fn should_encode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::FILTERING)
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
        renderer.encode_body_update(table, out)?;
        if table.attrs.paginator {
            ctx.add_callback_param("totalRecords", table.row_count());
        }
        Ok(())
    }
}
