//! Rendering contract: the markup writer the host supplies, opaque host
//! components and the table renderer.

mod markup;
mod renderer;
mod widget;

pub use markup::*;
pub use renderer::*;
pub use widget::*;

use crate::binding::Binding;
use crate::error::Result;
use crate::model::Record;
use crate::model::RowKey;

/// Structural markup output.
///
/// Byte-level encoding is the host's concern; the engine only describes
/// elements, attributes, text and the widget bootstrap script.
pub trait MarkupWriter {
    fn start_element(&mut self, name: &str) -> Result<()>;

    /// Adds an attribute to the element started last.
    fn attribute(&mut self, name: &str, value: &str) -> Result<()>;

    fn text(&mut self, text: &str) -> Result<()>;

    fn end_element(&mut self, name: &str) -> Result<()>;

    /// Emits the bootstrap script of a client widget.
    fn script(&mut self, widget: &str, config: &str) -> Result<()>;
}

/// The row a component is rendered for.
#[derive(Debug, Clone, PartialEq)]
pub struct RowContext<'a> {
    /// Absolute row index.
    pub index: usize,
    pub data: &'a Record,
    pub key: Option<RowKey>,
    pub selected: bool,
}

/// A host component the table renders without inspecting it.
pub trait Component: Send + Sync {
    /// Renders the component, for the given row when inside the body.
    fn encode_all(&self, row: Option<&RowContext<'_>>, out: &mut dyn MarkupWriter) -> Result<()>;
}

/// Fixed text.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticText(pub String);

impl Component for StaticText {
    fn encode_all(&self, _row: Option<&RowContext<'_>>, out: &mut dyn MarkupWriter) -> Result<()> {
        out.text(&self.0)
    }
}

/// Text of a row field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldText(pub Binding);

impl Component for FieldText {
    fn encode_all(&self, row: Option<&RowContext<'_>>, out: &mut dyn MarkupWriter) -> Result<()> {
        let Some(row) = row else {
            return Ok(());
        };
        let value = self.0.descriptor()?.value_of(row.data, None);
        out.text(&value.to_string())
    }
}
