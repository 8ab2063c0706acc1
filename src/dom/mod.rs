//! On-screen element tree.
//!
//! [`DomNode`] is an owned, namespace-aware element tree. [`DomParser`] turns
//! element trees into documents and [`DomRenderer`] does the reverse; headings
//! go through [`HeadingSchema`](crate::heading::HeadingSchema) in both
//! directions. With the `html` feature, [`html`] bridges to HTML text.

#[cfg(feature = "html")]
pub mod html;
mod parse;
mod render;

pub use parse::DomParser;
pub use render::{DomRenderer, render_inline};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type DomAttrs = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Namespace {
    Html,
    Svg,
    MathMl,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomNode {
    Element {
        namespace: Namespace,
        tag: String,
        attrs: DomAttrs,
        children: Vec<DomNode>,
    },
    Text(String),
    Comment(String),
    ProcessingInstruction {
        target: String,
        data: String,
    },
    Doctype {
        name: String,
    },
}

/// A heading tag matched a node that is not an HTML element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{tag}` matched a {found}, expected an HTML element")]
pub struct DomTypeError {
    pub tag: String,
    pub found: String,
}

impl DomTypeError {
    pub fn new(tag: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            found: found.into(),
        }
    }
}

impl DomNode {
    /// An element in the HTML namespace.
    pub fn element(tag: impl Into<String>, attrs: DomAttrs, children: Vec<DomNode>) -> Self {
        Self::Element {
            namespace: Namespace::Html,
            tag: tag.into(),
            attrs,
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The name tag selectors match against: the tag of an element, the
    /// target of a processing instruction, the name of a doctype.
    pub fn node_name(&self) -> Option<&str> {
        match self {
            DomNode::Element { tag, .. } => Some(tag),
            DomNode::ProcessingInstruction { target, .. } => Some(target),
            DomNode::Doctype { name } => Some(name),
            DomNode::Text(_) | DomNode::Comment(_) => None,
        }
    }

    pub fn kind_name(&self) -> String {
        match self {
            DomNode::Element { namespace, .. } => match namespace {
                Namespace::Html => "HTML element".to_string(),
                Namespace::Svg => "SVG element".to_string(),
                Namespace::MathMl => "MathML element".to_string(),
                Namespace::Other(uri) => format!("element in namespace {uri}"),
            },
            DomNode::Text(_) => "text node".to_string(),
            DomNode::Comment(_) => "comment".to_string(),
            DomNode::ProcessingInstruction { .. } => "processing instruction".to_string(),
            DomNode::Doctype { .. } => "doctype".to_string(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            DomNode::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[DomNode] {
        match self {
            DomNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            DomNode::Text(text) => text.clone(),
            DomNode::Element { children, .. } => {
                children.iter().map(DomNode::text_content).collect()
            }
            _ => String::new(),
        }
    }
}
