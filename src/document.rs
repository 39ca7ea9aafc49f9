//! Narrow document query layer the extraction code is written against.
//!
//! Parsers only see [`Document`] and [`Node`], so the HTML library
//! underneath can change without touching any adapter.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::extraction(format!("invalid selector {css:?}: {e:?}")))
}

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn root(&self) -> Node<'_> {
        Node(self.html.root_element())
    }

    pub fn select(&self, css: &str) -> Result<Vec<Node<'_>>> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).map(Node).collect())
    }

    pub fn first(&self, css: &str) -> Result<Option<Node<'_>>> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).next().map(Node))
    }

    /// Like [`Document::first`], but a missing element is an extraction failure.
    pub fn expect(&self, css: &str) -> Result<Node<'_>> {
        self.first(css)?
            .ok_or_else(|| Error::extraction(format!("expected element {css:?} not found")))
    }
}

#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn select(&self, css: &str) -> Result<Vec<Node<'a>>> {
        let selector = selector(css)?;
        Ok(self.0.select(&selector).map(Node).collect())
    }

    pub fn first(&self, css: &str) -> Result<Option<Node<'a>>> {
        let selector = selector(css)?;
        Ok(self.0.select(&selector).next().map(Node))
    }

    /// Trimmed text of the first match, or an empty string.
    pub fn text_of(&self, css: &str) -> Result<String> {
        Ok(self.first(css)?.map(|n| n.text()).unwrap_or_default())
    }

    /// Attribute of the first match.
    pub fn attr_of(&self, css: &str, attr: &str) -> Result<Option<&'a str>> {
        Ok(self.first(css)?.and_then(|n| n.attr(attr)))
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// All descendant text, trimmed.
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    /// Text of this node, skipping child elements with the given tag names.
    pub fn text_excluding(&self, tags: &[&str]) -> String {
        let mut out = String::new();
        for child in self.0.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(text);
            } else if let Some(element) = ElementRef::wrap(child) {
                if !tags.contains(&element.value().name()) {
                    out.extend(element.text());
                }
            }
        }
        out.trim().to_string()
    }

    pub fn next_element_sibling(&self) -> Option<Node<'a>> {
        self.0.next_siblings().find_map(ElementRef::wrap).map(Node)
    }

    /// Nearest ancestor (not including self) with the given tag name.
    pub fn closest(&self, tag: &str) -> Option<Node<'a>> {
        self.0
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == tag)
            .map(Node)
    }
}
