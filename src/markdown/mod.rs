//! External markdown representation and conversion to and from documents.
//!
//! [`MdNode`] mirrors the mdast JSON shape, for example
//! `{ "type": "heading", "depth": 2, "children": [{ "type": "text", "value": "Hi" }] }`.
//! [`MarkdownImporter`] and [`MarkdownExporter`] walk it with an explicit
//! open/next/close state machine; headings are delegated to
//! [`HeadingSchema`](crate::heading::HeadingSchema). With the `commonmark`
//! feature, [`commonmark`] bridges to markdown text.

#[cfg(feature = "commonmark")]
pub mod commonmark;
mod export;
mod import;

pub use export::{ExportState, MarkdownExporter};
pub use import::{ImportState, MarkdownImporter};

use crate::heading::LevelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MdNode {
    Root { children: Vec<MdNode> },
    Heading { depth: u8, children: Vec<MdNode> },
    Paragraph { children: Vec<MdNode> },
    Text { value: String },
    Emphasis { children: Vec<MdNode> },
    Strong { children: Vec<MdNode> },
    InlineCode { value: String },
    Break,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("invalid heading depth: {0}")]
    Level(#[from] LevelError),
    #[error("`{0}` node outside of a block")]
    InlineOutsideBlock(&'static str),
    #[error("`{child}` block nested inside `{parent}`")]
    NestedBlock {
        parent: &'static str,
        child: &'static str,
    },
    #[error("close without a matching open node")]
    Unbalanced,
}

#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
    #[error("close without a matching open node")]
    Unbalanced,
    #[error("`{0}` node cannot hold children")]
    NotAContainer(&'static str),
    #[error("markdown rendering failed: {0}")]
    Render(#[from] std::io::Error),
    #[error("markdown output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl MdNode {
    pub fn root(children: Vec<MdNode>) -> Self {
        Self::Root { children }
    }

    pub fn heading(depth: u8) -> Self {
        Self::Heading {
            depth,
            children: Vec::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            MdNode::Root { .. } => "root",
            MdNode::Heading { .. } => "heading",
            MdNode::Paragraph { .. } => "paragraph",
            MdNode::Text { .. } => "text",
            MdNode::Emphasis { .. } => "emphasis",
            MdNode::Strong { .. } => "strong",
            MdNode::InlineCode { .. } => "inlineCode",
            MdNode::Break => "break",
        }
    }

    pub fn children(&self) -> &[MdNode] {
        match self {
            MdNode::Root { children }
            | MdNode::Heading { children, .. }
            | MdNode::Paragraph { children }
            | MdNode::Emphasis { children }
            | MdNode::Strong { children } => children,
            MdNode::Text { .. } | MdNode::InlineCode { .. } | MdNode::Break => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<MdNode>> {
        match self {
            MdNode::Root { children }
            | MdNode::Heading { children, .. }
            | MdNode::Paragraph { children }
            | MdNode::Emphasis { children }
            | MdNode::Strong { children } => Some(children),
            MdNode::Text { .. } | MdNode::InlineCode { .. } | MdNode::Break => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_json_shape() {
        let json = r#"{"type":"heading","depth":2,"children":[{"type":"text","value":"Hi"},{"type":"break"}]}"#;
        let node: MdNode = serde_json::from_str(json).unwrap();
        assert_eq!(
            node,
            MdNode::Heading {
                depth: 2,
                children: vec![MdNode::text("Hi"), MdNode::Break],
            }
        );
        assert_eq!(serde_json::to_string(&node).unwrap(), json);
    }

    #[test]
    fn test_inline_code_type_name() {
        let node: MdNode = serde_json::from_str(r#"{"type":"inlineCode","value":"x"}"#).unwrap();
        assert_eq!(node.type_name(), "inlineCode");
    }
}
