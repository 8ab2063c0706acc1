use super::{DomAttrs, DomNode};
use crate::doc::{Block, BlockKind, Document, Inline, Mark};
use crate::heading::HeadingSchema;

pub struct DomRenderer<'a> {
    heading: &'a HeadingSchema,
}

impl<'a> DomRenderer<'a> {
    pub fn new(heading: &'a HeadingSchema) -> Self {
        Self { heading }
    }

    pub fn render(&self, doc: &Document) -> Vec<DomNode> {
        doc.blocks
            .iter()
            .map(|block| self.render_block(block))
            .collect()
    }

    pub fn render_block(&self, block: &Block) -> DomNode {
        match &block.kind {
            BlockKind::Heading(attrs) => self.heading.render_heading(block, attrs),
            BlockKind::Paragraph => {
                DomNode::element("p", DomAttrs::new(), render_inline(&block.content))
            }
        }
    }
}

/// Inline content as element children. Marks nest with `strong` outermost.
pub fn render_inline(content: &[Inline]) -> Vec<DomNode> {
    content
        .iter()
        .map(|inline| match inline {
            Inline::HardBreak => DomNode::element("br", DomAttrs::new(), Vec::new()),
            Inline::Text { text, marks } => {
                marks
                    .iter()
                    .rev()
                    .fold(DomNode::text(text.clone()), |inner, mark| {
                        DomNode::element(mark_tag(*mark), DomAttrs::new(), vec![inner])
                    })
            }
        })
        .collect()
}

fn mark_tag(mark: Mark) -> &'static str {
    match mark {
        Mark::Strong => "strong",
        Mark::Emphasis => "em",
        Mark::Code => "code",
    }
}
