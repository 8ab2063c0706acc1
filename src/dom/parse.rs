use super::{DomNode, DomTypeError};
use crate::doc::{Block, BlockKind, Document, Inline, Mark};
use crate::heading::HeadingSchema;

/// Builds a [`Document`] from element trees.
///
/// `h1`..`h6` go through the heading rule, `p` opens a paragraph, `br` is a
/// hard break and `strong`/`b`, `em`/`i`, `code` add marks. Any other element
/// is transparent. Inline content outside a block lands in an implicit
/// paragraph.
pub struct DomParser<'a> {
    heading: &'a HeadingSchema,
}

#[derive(Default)]
struct ParseContext {
    blocks: Vec<Block>,
    open: Option<OpenBlock>,
    marks: Vec<Mark>,
}

struct OpenBlock {
    kind: BlockKind,
    content: Vec<Inline>,
    /// Opened on demand for loose inline content.
    implicit: bool,
}

impl<'a> DomParser<'a> {
    pub fn new(heading: &'a HeadingSchema) -> Self {
        Self { heading }
    }

    pub fn parse(&self, nodes: &[DomNode]) -> Result<Document, DomTypeError> {
        let mut cx = ParseContext::default();
        for node in nodes {
            self.walk(&mut cx, node)?;
        }
        cx.finish_block();
        Ok(Document::from_blocks(cx.blocks))
    }

    fn walk(&self, cx: &mut ParseContext, node: &DomNode) -> Result<(), DomTypeError> {
        if let Some(attrs) = self.heading.parse_dom(node)? {
            return self.block(cx, BlockKind::Heading(attrs), node.children());
        }

        match node {
            DomNode::Element { tag, children, .. } => match tag.to_ascii_lowercase().as_str() {
                "p" => self.block(cx, BlockKind::Paragraph, children),
                "br" => {
                    cx.add_inline(Inline::HardBreak);
                    Ok(())
                }
                "strong" | "b" => self.marked(cx, Mark::Strong, children),
                "em" | "i" => self.marked(cx, Mark::Emphasis, children),
                "code" => self.marked(cx, Mark::Code, children),
                _ => self.walk_all(cx, children),
            },
            DomNode::Text(text) => {
                cx.add_text(text);
                Ok(())
            }
            DomNode::Comment(_) | DomNode::ProcessingInstruction { .. } | DomNode::Doctype { .. } => {
                Ok(())
            }
        }
    }

    fn walk_all(&self, cx: &mut ParseContext, nodes: &[DomNode]) -> Result<(), DomTypeError> {
        for node in nodes {
            self.walk(cx, node)?;
        }
        Ok(())
    }

    fn block(
        &self,
        cx: &mut ParseContext,
        kind: BlockKind,
        children: &[DomNode],
    ) -> Result<(), DomTypeError> {
        cx.finish_block();
        cx.open = Some(OpenBlock {
            kind,
            content: Vec::new(),
            implicit: false,
        });
        self.walk_all(cx, children)?;
        cx.finish_block();
        Ok(())
    }

    fn marked(
        &self,
        cx: &mut ParseContext,
        mark: Mark,
        children: &[DomNode],
    ) -> Result<(), DomTypeError> {
        cx.marks.push(mark);
        let result = self.walk_all(cx, children);
        cx.marks.pop();
        result
    }
}

impl ParseContext {
    fn add_text(&mut self, text: &str) {
        let collapsed = collapse_whitespace(text);
        if self.open.is_none() && collapsed.trim().is_empty() {
            return;
        }
        let inline = Inline::marked(collapsed, self.marks.iter().copied());
        self.add_inline(inline);
    }

    fn add_inline(&mut self, inline: Inline) {
        let open = self.open.get_or_insert_with(|| OpenBlock {
            kind: BlockKind::Paragraph,
            content: Vec::new(),
            implicit: true,
        });
        open.content.push(inline);
    }

    fn finish_block(&mut self) {
        let Some(mut open) = self.open.take() else {
            return;
        };
        trim_edges(&mut open.content);
        let block = Block::new(open.kind, open.content);
        if !(open.implicit && block.content.is_empty()) {
            self.blocks.push(block);
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !in_space {
                output.push(' ');
            }
            in_space = true;
        } else {
            output.push(ch);
            in_space = false;
        }
    }
    output
}

fn trim_edges(content: &mut [Inline]) {
    if let Some(Inline::Text { text, .. }) = content.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(Inline::Text { text, .. }) = content.last_mut() {
        *text = text.trim_end().to_string();
    }
}
