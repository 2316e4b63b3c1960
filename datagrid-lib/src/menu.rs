//! Context menu item lookup by index path.

use serde::Deserialize;

use crate::error::LookupError;
use crate::error::ParseError;
use crate::error::Result;
use crate::request::RequestParams;
use crate::request::suffix;

/// A clickable menu item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuItem {
    pub id: Option<String>,
    pub label: String,
    /// Command the host runs when the item is clicked.
    pub command: Option<String>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            command: None,
        }
    }
}

/// A node of a menu tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MenuElement {
    Group {
        label: String,
        elements: Vec<MenuElement>,
    },
    Item(MenuItem),
}

/// A context menu attached to a table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContextMenu {
    /// Client id of the menu.
    pub id: String,
    pub elements: Vec<MenuElement>,
}

impl ContextMenu {
    pub fn new(id: impl Into<String>, elements: Vec<MenuElement>) -> Self {
        Self {
            id: id.into(),
            elements,
        }
    }

    /// The item the request says was clicked, read from `{id}_menuid`.
    pub fn clicked_item(&self, params: &RequestParams) -> Result<Option<&MenuItem>> {
        let name = format!("{}_{}", self.id, suffix::MENU_ID);
        match params.get(&name) {
            Some(path) => Ok(Some(find_menu_item(&self.elements, path)?)),
            None => Ok(None),
        }
    }
}

/// Finds the item at an `_`-separated index path such as `0_2_1`.
///
/// Every segment but the last must point at a group.
///
/// # Example
///
/// ```
/// use datagrid_lib::menu::{find_menu_item, MenuElement, MenuItem};
///
/// let menu = vec![
///     MenuElement::Item(MenuItem::new("View")),
///     MenuElement::Group {
///         label: "Export".to_string(),
///         elements: vec![MenuElement::Item(MenuItem::new("CSV"))],
///     },
/// ];
/// assert_eq!(find_menu_item(&menu, "1_0").unwrap().label, "CSV");
/// ```
pub fn find_menu_item<'a>(elements: &'a [MenuElement], path: &str) -> Result<&'a MenuItem> {
    let mut current = elements;
    let mut segments = path.split('_').peekable();
    while let Some(segment) = segments.next() {
        let index: usize = segment
            .trim()
            .parse()
            .map_err(|_| ParseError::malformed("menu path", path))?;
        let element = current.get(index).ok_or_else(|| LookupError::menu_item(path))?;
        match (element, segments.peek().is_some()) {
            (MenuElement::Item(item), false) => return Ok(item),
            (MenuElement::Group { elements, .. }, true) => current = elements,
            _ => return Err(LookupError::menu_item(path).into()),
        }
    }
    Err(LookupError::menu_item(path).into())
}
