use crate::error::LookupError;
use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::CellEdit;
use crate::table::DataTable;

use super::Feature;
use super::FeatureKey;

/// Locates the edited cell and renders its content.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellEditFeature;

impl Feature for CellEditFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::CellEdit
    }

    fn should_decode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::CELL_INFO)
    }

    fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        let (row_index, column) = table.locate_cell(ctx.params())?;
        table.state.cell_edit = Some(CellEdit { row_index, column });
        Ok(())
    }

    fn should_encode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.has_param(ctx.params(), suffix::CELL_INFO)
    }

    fn encode(
        &self,
        table: &mut DataTable,
        ctx: &mut RequestContext,
        renderer: &TableRenderer,
        out: &mut dyn MarkupWriter,
    ) -> Result<()> {
        let (row_index, column) = table.locate_cell(ctx.params())?;
        let view = table
            .column_view(&column)
            .ok_or_else(|| LookupError::column(column.key()))?;
        let row = renderer
            .row_context(table, row_index)?
            .ok_or(LookupError::RowIndex { index: row_index })?;
        renderer.encode_cell_content(table, &view, &row, out)
    }
}
