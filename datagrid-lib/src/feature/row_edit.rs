use crate::error::ParseError;
use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::DataTable;
use crate::table::RowEdit;
use crate::table::RowEditAction;

use super::Feature;
use super::FeatureKey;

/// Records row edit saves and cancels and re-renders the edited row.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowEditFeature;

impl Feature for RowEditFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::RowEdit
    }

    fn should_decode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::ROW_EDIT_ACTION)
    }

    fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        let params = ctx.params();
        let name = table.param_name(suffix::ROW_EDIT_ACTION);
        let raw = params.require(&name)?;
        let action = RowEditAction::parse(raw).ok_or_else(|| ParseError::malformed(&name, raw))?;
        let index = params.parse_usize(&table.param_name(suffix::ROW_EDIT_INDEX))?;
        table.state.row_edit = Some(RowEdit { index, action });
        Ok(())
    }

    fn should_encode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::ROW_EDIT_ACTION)
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
            .parse_usize(&table.param_name(suffix::ROW_EDIT_INDEX))?;
        if table.is_selection_enabled() {
            table.find_selected_row_keys()?;
        }
        renderer.encode_row(table, index, out)?;
        Ok(())
    }
}
