use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::table::DataTable;

use super::Feature;
use super::FeatureKey;

/// Applies the selection hidden input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionFeature;

impl Feature for SelectionFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::Select
    }

    fn should_decode(&self, table: &DataTable, _ctx: &RequestContext) -> bool {
        table.is_selection_enabled()
    }

    fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        table.decode_selection(ctx.params())
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
