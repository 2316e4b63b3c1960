use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::DataTable;

use super::Feature;
use super::FeatureKey;

/// Applies the client column order of a table with draggable columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraggableColumnsFeature;

impl Feature for DraggableColumnsFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::DraggableColumns
    }

    fn should_decode(&self, table: &DataTable, _ctx: &RequestContext) -> bool {
        table.attrs.draggable_columns
    }

    fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        if let Some(order) = table.param(ctx.params(), suffix::COLUMN_ORDER)
            && !order.trim().is_empty()
        {
            table.reorder_columns(order);
        }
        Ok(())
    }

    fn should_encode(&self, _table: &DataTable, _ctx: &RequestContext) -> bool {
        false
    }

    fn encode(
        &self,
        _table: &mut DataTable,
        _ctx: &mut RequestContext,
        _renderer: &TableRenderer,
        _out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        Ok(())
    }
}
