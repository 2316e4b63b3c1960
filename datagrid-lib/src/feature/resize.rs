use log::debug;

use crate::error::Result;
use crate::event::parse_size;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::request::suffix;
use crate::table::ColumnSize;
use crate::table::DataTable;

use super::Feature;
use super::FeatureKey;

/// Records column sizes sent by column resize requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizableColumnsFeature;

impl Feature for ResizableColumnsFeature {
    fn key(&self) -> FeatureKey {
        FeatureKey::ResizableColumns
    }

    fn should_decode(&self, table: &DataTable, ctx: &RequestContext) -> bool {
        table.attrs.resizable_columns && table.has_param(ctx.params(), suffix::COL_RESIZE)
    }

    fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()> {
        let params = ctx.params();
        let column_id = params.require(&table.param_name(suffix::COLUMN_ID))?;
        let column = table.find_column(column_id)?;
        let size = ColumnSize {
            width: parse_size(params, &table.param_name(suffix::WIDTH))?,
            height: parse_size(params, &table.param_name(suffix::HEIGHT))?,
        };
        debug!("column {} resized to {}x{}", column.key(), size.width, size.height);
        table.state.column_widths.insert(column.key().to_string(), size);
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
