use super::{ImportError, MdNode};
use crate::doc::{Block, BlockKind, Document, Inline, Mark};
use crate::heading::HeadingSchema;

pub struct MarkdownImporter<'a> {
    heading: &'a HeadingSchema,
}

impl<'a> MarkdownImporter<'a> {
    pub fn new(heading: &'a HeadingSchema) -> Self {
        Self { heading }
    }

    pub fn import(&self, root: &MdNode) -> Result<Document, ImportError> {
        let mut state = ImportState::new(self.heading);
        state.run_node(root)?;
        state.finish()
    }
}

/// Builder state while walking an external tree.
///
/// Documents are flat, so at most one textblock is open at a time. Marks
/// accumulate while descending `emphasis`, `strong` and `inlineCode`.
pub struct ImportState<'a> {
    heading: &'a HeadingSchema,
    blocks: Vec<Block>,
    open: Option<(BlockKind, Vec<Inline>)>,
    marks: Vec<Mark>,
}

impl<'a> ImportState<'a> {
    pub fn new(heading: &'a HeadingSchema) -> Self {
        Self {
            heading,
            blocks: Vec::new(),
            open: None,
            marks: Vec::new(),
        }
    }

    pub fn open_node(&mut self, kind: BlockKind) -> Result<(), ImportError> {
        if let Some((parent, _)) = &self.open {
            return Err(ImportError::NestedBlock {
                parent: parent.name(),
                child: kind.name(),
            });
        }
        self.open = Some((kind, Vec::new()));
        Ok(())
    }

    pub fn close_node(&mut self) -> Result<(), ImportError> {
        let (kind, content) = self.open.take().ok_or(ImportError::Unbalanced)?;
        self.blocks.push(Block::new(kind, content));
        Ok(())
    }

    /// Imports `children` in order into whatever is currently open.
    pub fn next(&mut self, children: &[MdNode]) -> Result<(), ImportError> {
        for child in children {
            self.run_node(child)?;
        }
        Ok(())
    }

    pub fn run_node(&mut self, node: &MdNode) -> Result<(), ImportError> {
        let heading = self.heading;
        match node {
            MdNode::Root { children } => self.next(children),
            MdNode::Heading { depth, children } => heading.parse_markdown(self, *depth, children),
            MdNode::Paragraph { children } => {
                self.open_node(BlockKind::Paragraph)?;
                self.next(children)?;
                self.close_node()
            }
            MdNode::Text { value } => self.add_text(node.type_name(), value),
            MdNode::Emphasis { children } => self.with_mark(Mark::Emphasis, children),
            MdNode::Strong { children } => self.with_mark(Mark::Strong, children),
            MdNode::InlineCode { value } => {
                self.marks.push(Mark::Code);
                let result = self.add_text(node.type_name(), value);
                self.marks.pop();
                result
            }
            MdNode::Break => self.add_inline(node.type_name(), Inline::HardBreak),
        }
    }

    pub fn finish(self) -> Result<Document, ImportError> {
        if self.open.is_some() {
            return Err(ImportError::Unbalanced);
        }
        Ok(Document::from_blocks(self.blocks))
    }

    fn with_mark(&mut self, mark: Mark, children: &[MdNode]) -> Result<(), ImportError> {
        self.marks.push(mark);
        let result = self.next(children);
        self.marks.pop();
        result
    }

    fn add_text(&mut self, node_type: &'static str, value: &str) -> Result<(), ImportError> {
        let inline = Inline::marked(value, self.marks.iter().copied());
        self.add_inline(node_type, inline)
    }

    fn add_inline(&mut self, node_type: &'static str, inline: Inline) -> Result<(), ImportError> {
        let (_, content) = self
            .open
            .as_mut()
            .ok_or(ImportError::InlineOutsideBlock(node_type))?;
        content.push(inline);
        Ok(())
    }
}
