//! Queryable HTML nodes.
//!
//! The extraction code only talks to [`QueryNode`], a small capability
//! set (find, first, text, inner html, attribute). [`Document`] owns a
//! parsed tree and hands out nodes backed by `scraper`.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Read-only view of one element in a parsed document.
pub trait QueryNode: Sized {
    /// All descendants matching a CSS selector, in document order.
    ///
    /// An unparsable selector matches nothing.
    fn find(&self, selector: &str) -> Vec<Self>;

    /// First descendant matching a CSS selector.
    fn first(&self, selector: &str) -> Option<Self> {
        self.find(selector).into_iter().next()
    }

    /// Concatenated text of the node and its descendants, entities decoded.
    fn text(&self) -> String;

    /// Serialized markup of the node's children.
    fn inner_html(&self) -> String;

    /// Value of an attribute, if present.
    fn attribute(&self, name: &str) -> Option<String>;
}

impl<'a> QueryNode for ElementRef<'a> {
    fn find(&self, selector: &str) -> Vec<Self> {
        match Selector::parse(selector) {
            Ok(selector) => self.select(&selector).collect(),
            Err(e) => {
                debug!("Invalid selector {:?}: {}", selector, e);
                Vec::new()
            }
        }
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn inner_html(&self) -> String {
        ElementRef::inner_html(self)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(|s| s.to_string())
    }
}

/// A parsed HTML page or fragment.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a complete HTML page.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Parse a markup snippet such as a single credit token.
    pub fn fragment(markup: &str) -> Self {
        Self {
            html: Html::parse_fragment(markup),
        }
    }

    /// Root element to run queries against.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}
