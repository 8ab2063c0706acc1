//! The heading node: attributes, schema and its conversion rules.
//!
//! [`HeadingSchema`] is the single source of truth shared by every path that
//! creates or reads headings:
//!
//! - element mapping: `h1`..`h6` elements ⇄ heading blocks ([`HeadingSchema::parse_dom`],
//!   [`HeadingSchema::to_dom`])
//! - markdown import: external `heading` nodes → heading blocks
//!   ([`HeadingSchema::parse_markdown`])
//! - markdown export: heading blocks → external `heading` nodes
//!   ([`HeadingSchema::to_markdown`])
//!
//! Ids are resolved lazily. A heading whose `id` attribute is empty gets one
//! from the configured generator each time it is rendered; the computed value
//! is not written back.

mod id;
mod level;

pub use id::{default_heading_id, slugify};
pub use level::{HeadingLevel, LevelError};

use crate::config::HeadingConfig;
use crate::doc::{Block, BlockKind, Inline};
use crate::dom::{self, DomNode, DomTypeError, Namespace};
use crate::markdown::{ExportState, ImportError, ImportState, MarkdownError, MdNode};
use crate::schema::{self, NodeSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: HeadingLevel,
    #[serde(default)]
    pub id: String,
}

impl HeadingAttrs {
    pub fn new(level: HeadingLevel) -> Self {
        Self {
            level,
            id: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadingSchema {
    config: HeadingConfig,
}

impl HeadingSchema {
    pub fn new(config: HeadingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeadingConfig {
        &self.config
    }

    pub fn spec(&self) -> &'static NodeSpec {
        &schema::HEADING
    }

    /// The persisted id, or a freshly generated one when it is empty.
    pub fn id_for(&self, block: &Block) -> String {
        match block.heading_attrs() {
            Some(attrs) if !attrs.id.is_empty() => attrs.id.clone(),
            _ => (self.config.id_generator)(block),
        }
    }

    /// Matches `h1`..`h6`. A match that is not an HTML element is an error.
    pub fn parse_dom(&self, node: &DomNode) -> Result<Option<HeadingAttrs>, DomTypeError> {
        let Some(level) = node.node_name().and_then(HeadingLevel::from_tag) else {
            return Ok(None);
        };
        match node {
            DomNode::Element {
                namespace: Namespace::Html,
                attrs,
                ..
            } => Ok(Some(HeadingAttrs {
                level,
                id: attrs.get("id").cloned().unwrap_or_default(),
            })),
            other => Err(DomTypeError::new(level.tag(), other.kind_name())),
        }
    }

    /// Renders a heading block as its `hN` element. The attribute decorator's
    /// output is merged under the resolved `id`.
    pub fn to_dom(&self, block: &Block) -> Option<DomNode> {
        let attrs = block.heading_attrs()?;
        Some(self.render_heading(block, attrs))
    }

    /// Element for a heading block whose attributes are already known.
    pub fn render_heading(&self, block: &Block, attrs: &HeadingAttrs) -> DomNode {
        let mut bag = (self.config.attr_decorator)(block);
        bag.insert("id".to_string(), self.id_for(block));
        DomNode::Element {
            namespace: Namespace::Html,
            tag: attrs.level.tag().to_string(),
            attrs: bag,
            children: dom::render_inline(&block.content),
        }
    }

    /// Opens a heading at `depth`, imports `children` into it and closes it.
    /// No id is assigned.
    pub fn parse_markdown(
        &self,
        state: &mut ImportState<'_>,
        depth: u8,
        children: &[MdNode],
    ) -> Result<(), ImportError> {
        let level = HeadingLevel::new(depth)?;
        state.open_node(BlockKind::Heading(HeadingAttrs::new(level)))?;
        state.next(children)?;
        state.close_node()
    }

    /// Writes a heading node with `depth = level`. A single trailing hard
    /// break is dropped; a markdown heading line cannot end in one.
    pub fn to_markdown(
        &self,
        state: &mut ExportState,
        attrs: &HeadingAttrs,
        content: &[Inline],
    ) -> Result<(), MarkdownError> {
        state.open_node(MdNode::heading(attrs.level.get()));
        let content = match content.split_last() {
            Some((Inline::HardBreak, rest)) => rest,
            _ => content,
        };
        state.next(content)?;
        state.close_node()
    }
}
