//! Feature dispatch: the independently toggleable table behaviors and the
//! registry the renderer dispatches through.

mod cell_edit;
mod draggable;
mod filter;
mod page;
mod resize;
mod row_edit;
mod row_expand;
mod scroll;
mod select;
mod sort;

pub use cell_edit::CellEditFeature;
pub use draggable::DraggableColumnsFeature;
pub use filter::FilterFeature;
pub use page::PageFeature;
pub use resize::ResizableColumnsFeature;
pub use row_edit::RowEditFeature;
pub use row_expand::RowExpandFeature;
pub use scroll::ScrollFeature;
pub use select::SelectionFeature;
pub use sort::SortFeature;

use std::fmt;

use crate::error::Result;
use crate::render::MarkupWriter;
use crate::render::TableRenderer;
use crate::request::RequestContext;
use crate::table::DataTable;

/// Names of the table features, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureKey {
    DraggableColumns,
    Filter,
    Page,
    Sort,
    ResizableColumns,
    Select,
    RowEdit,
    CellEdit,
    RowExpand,
    Scroll,
}

impl FeatureKey {
    /// Every key in dispatch order.
    pub const ALL: [FeatureKey; 10] = [
        FeatureKey::DraggableColumns,
        FeatureKey::Filter,
        FeatureKey::Page,
        FeatureKey::Sort,
        FeatureKey::ResizableColumns,
        FeatureKey::Select,
        FeatureKey::RowEdit,
        FeatureKey::CellEdit,
        FeatureKey::RowExpand,
        FeatureKey::Scroll,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::DraggableColumns => "draggable-columns",
            FeatureKey::Filter => "filter",
            FeatureKey::Page => "page",
            FeatureKey::Sort => "sort",
            FeatureKey::ResizableColumns => "resizable-columns",
            FeatureKey::Select => "select",
            FeatureKey::RowEdit => "row-edit",
            FeatureKey::CellEdit => "cell-edit",
            FeatureKey::RowExpand => "row-expand",
            FeatureKey::Scroll => "scroll",
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One table behavior with its own decode and encode.
///
/// Features hold no state; everything they change lives on the table.
pub trait Feature: Send + Sync {
    fn key(&self) -> FeatureKey;

    /// Whether this request carries input for the feature.
    fn should_decode(&self, table: &DataTable, ctx: &RequestContext) -> bool;

    fn decode(&self, table: &mut DataTable, ctx: &mut RequestContext) -> Result<()>;

    /// Whether this feature request asks for the feature's fragment.
    fn should_encode(&self, table: &DataTable, ctx: &RequestContext) -> bool;

    fn encode(
        &self,
        table: &mut DataTable,
        ctx: &mut RequestContext,
        renderer: &TableRenderer,
        out: &mut dyn MarkupWriter,
    ) -> Result<()>;
}

/// Immutable, ordered set of features.
///
/// Built once and shared read-only between every table and request.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use datagrid_lib::feature::{FeatureKey, FeatureRegistry};
///
/// let registry = Arc::new(FeatureRegistry::standard());
/// assert_eq!(registry.keys()[0], FeatureKey::DraggableColumns);
/// assert!(registry.get(FeatureKey::Scroll).is_some());
/// ```
pub struct FeatureRegistry {
    features: Vec<Box<dyn Feature>>,
}

impl FeatureRegistry {
    /// Creates a registry from the given features.
    ///
    /// Features are ordered by key; when a key appears twice the first
    /// feature given wins.
    pub fn new(mut features: Vec<Box<dyn Feature>>) -> Self {
        features.sort_by_key(|f| f.key());
        features.dedup_by_key(|f| f.key());
        Self { features }
    }

    /// The registry with every standard feature.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(DraggableColumnsFeature),
            Box::new(FilterFeature),
            Box::new(PageFeature),
            Box::new(SortFeature),
            Box::new(ResizableColumnsFeature),
            Box::new(SelectionFeature),
            Box::new(RowEditFeature),
            Box::new(CellEditFeature),
            Box::new(RowExpandFeature),
            Box::new(ScrollFeature),
        ])
    }

    /// The feature registered under a key.
    pub fn get(&self, key: FeatureKey) -> Option<&dyn Feature> {
        self.features
            .iter()
            .find(|f| f.key() == key)
            .map(|f| &**f)
    }

    /// Features in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Feature> {
        self.features.iter().map(|f| &**f)
    }

    /// Registered keys in dispatch order.
    pub fn keys(&self) -> Vec<FeatureKey> {
        self.features.iter().map(|f| f.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_in_key_order() {
        let registry = FeatureRegistry::standard();
        assert_eq!(registry.keys(), FeatureKey::ALL.to_vec());
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let registry = FeatureRegistry::new(vec![
            Box::new(SortFeature),
            Box::new(PageFeature),
            Box::new(SortFeature),
        ]);
        assert_eq!(registry.keys(), vec![FeatureKey::Page, FeatureKey::Sort]);
    }
}
