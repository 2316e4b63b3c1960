//! In-memory markup recorder.

use std::fmt;

use crate::error::Result;
use crate::error::TableError;

use super::MarkupWriter;

/// One recorded element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// A recorded markup node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Script { widget: String, config: String },
}

impl Element {
    /// Value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, skipping text and scripts.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated text of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Descendant (or self) with the given `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.attr("id") == Some(id) {
            return Some(self);
        }
        self.elements().find_map(|e| e.find_by_id(id))
    }

    /// Descendants (and self) with the given element name, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        if self.name == name {
            found.push(self);
        }
        for child in self.elements() {
            child.collect(name, found);
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) => collect_text(&e.children, out),
            Node::Script { .. } => {}
        }
    }
}

/// A [`MarkupWriter`] that records a node tree.
#[derive(Debug, Clone, Default)]
pub struct Markup {
    roots: Vec<Node>,
    open: Vec<Element>,
    attributes_open: bool,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.roots
    }

    /// Recorded top-level elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.roots.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Element with the given `id` anywhere in the tree.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.elements().find_map(|e| e.find_by_id(id))
    }

    /// Elements with the given name anywhere in the tree.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        self.elements().flat_map(|e| e.find_all(name)).collect()
    }

    /// Recorded widget scripts as (widget, config) pairs.
    pub fn scripts(&self) -> Vec<(&str, &str)> {
        let mut scripts = Vec::new();
        collect_scripts(&self.roots, &mut scripts);
        scripts
    }

    /// Returns `true` once every started element is closed.
    pub fn is_complete(&self) -> bool {
        self.open.is_empty()
    }

    fn push(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }
}

fn collect_scripts<'a>(nodes: &'a [Node], out: &mut Vec<(&'a str, &'a str)>) {
    for node in nodes {
        match node {
            Node::Script { widget, config } => out.push((widget.as_str(), config.as_str())),
            Node::Element(e) => collect_scripts(&e.children, out),
            Node::Text(_) => {}
        }
    }
}

impl MarkupWriter for Markup {
    fn start_element(&mut self, name: &str) -> Result<()> {
        self.open.push(Element {
            name: name.to_string(),
            ..Element::default()
        });
        self.attributes_open = true;
        Ok(())
    }

    fn attribute(&mut self, name: &str, value: &str) -> Result<()> {
        match self.open.last_mut() {
            Some(element) if self.attributes_open => {
                element.attributes.push((name.to_string(), value.to_string()));
                Ok(())
            }
            _ => Err(TableError::render(format!(
                "attribute {} written outside a start tag",
                name
            ))),
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.attributes_open = false;
        if !text.is_empty() {
            self.push(Node::Text(text.to_string()));
        }
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<()> {
        self.attributes_open = false;
        match self.open.pop() {
            Some(element) if element.name == name => {
                self.push(Node::Element(element));
                Ok(())
            }
            Some(element) => Err(TableError::render(format!(
                "end tag {} does not match open element {}",
                name, element.name
            ))),
            None => Err(TableError::render(format!("end tag {} without open element", name))),
        }
    }

    fn script(&mut self, widget: &str, config: &str) -> Result<()> {
        self.attributes_open = false;
        self.push(Node::Script {
            widget: widget.to_string(),
            config: config.to_string(),
        });
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node], depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            Node::Text(text) => writeln!(f, "{}{}", indent, escape(text))?,
            Node::Script { widget, config } => {
                writeln!(f, "{}<script data-widget=\"{}\">{}</script>", indent, widget, config)?
            }
            Node::Element(e) => {
                write!(f, "{}<{}", indent, e.name)?;
                for (name, value) in &e.attributes {
                    write!(f, " {}=\"{}\"", name, escape(value))?;
                }
                if e.children.is_empty() {
                    writeln!(f, "/>")?;
                } else {
                    writeln!(f, ">")?;
                    write_nodes(f, &e.children, depth + 1)?;
                    writeln!(f, "{}</{}>", indent, e.name)?;
                }
            }
        }
    }
    Ok(())
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.roots, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_tree() {
        let mut out = Markup::new();
        out.start_element("div").unwrap();
        out.attribute("id", "t").unwrap();
        out.start_element("span").unwrap();
        out.text("a < b").unwrap();
        out.end_element("span").unwrap();
        out.end_element("div").unwrap();

        assert!(out.is_complete());
        assert_eq!(out.find_by_id("t").unwrap().text(), "a < b");
        assert_eq!(out.find_all("span").len(), 1);
        assert!(out.to_string().contains("a &lt; b"));
    }

    #[test]
    fn test_rejects_mismatched_end() {
        let mut out = Markup::new();
        out.start_element("div").unwrap();
        assert!(out.end_element("span").is_err());
    }

    #[test]
    fn test_rejects_late_attribute() {
        let mut out = Markup::new();
        out.start_element("div").unwrap();
        out.text("x").unwrap();
        assert!(out.attribute("id", "t").is_err());
    }
}
