//! A small node interface over the parsed HTML tree.
//!
//! The extractor only ever needs three things from a node: its visible text,
//! an attribute, and whatever follows it among its siblings.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node as HtmlNode};

pub trait Node<'a>: Sized {
    /// Concatenated visible text of the node and its descendants, untrimmed.
    fn text(&self) -> String;

    fn attribute(&self, name: &str) -> Option<&'a str>;

    /// The structurally next sibling, skipping whitespace-only text and
    /// comments. `None` when the node is the last meaningful child.
    fn next_sibling(&self) -> Option<Self>;
}

/// A handle into a parsed document that is either an element or a text node.
#[derive(Debug, Clone, Copy)]
pub struct PageNode<'a> {
    inner: NodeRef<'a, HtmlNode>,
}

impl<'a> PageNode<'a> {
    #[cfg(test)]
    pub(crate) fn is_element(&self) -> bool {
        self.inner.value().is_element()
    }

    fn is_meaningful(node: &NodeRef<'a, HtmlNode>) -> bool {
        match node.value() {
            HtmlNode::Element(_) => true,
            HtmlNode::Text(text) => !text.trim().is_empty(),
            _ => false,
        }
    }
}

impl<'a> From<ElementRef<'a>> for PageNode<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { inner: *element }
    }
}

impl<'a> Node<'a> for PageNode<'a> {
    fn text(&self) -> String {
        match self.inner.value() {
            HtmlNode::Text(text) => text.to_string(),
            _ => ElementRef::wrap(self.inner)
                .map(|element| element.text().collect())
                .unwrap_or_default(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        match self.inner.value() {
            HtmlNode::Element(element) => element.attr(name),
            _ => None,
        }
    }

    fn next_sibling(&self) -> Option<Self> {
        self.inner
            .next_siblings()
            .find(Self::is_meaningful)
            .map(|inner| Self { inner })
    }
}
