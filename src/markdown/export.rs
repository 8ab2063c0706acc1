use super::{MarkdownError, MdNode};
use crate::doc::{BlockKind, Document, Inline, Mark};
use crate::heading::HeadingSchema;

pub struct MarkdownExporter<'a> {
    heading: &'a HeadingSchema,
}

impl<'a> MarkdownExporter<'a> {
    pub fn new(heading: &'a HeadingSchema) -> Self {
        Self { heading }
    }

    pub fn export(&self, doc: &Document) -> Result<MdNode, MarkdownError> {
        let mut state = ExportState::new();
        for block in &doc.blocks {
            match &block.kind {
                BlockKind::Heading(attrs) => {
                    self.heading.to_markdown(&mut state, attrs, &block.content)?
                }
                BlockKind::Paragraph => {
                    state.open_node(MdNode::Paragraph {
                        children: Vec::new(),
                    });
                    state.next(&block.content)?;
                    state.close_node()?;
                }
            }
        }
        state.finish()
    }
}

/// Stack of external nodes under construction, rooted at a `root` node.
pub struct ExportState {
    stack: Vec<MdNode>,
}

impl ExportState {
    pub fn new() -> Self {
        Self {
            stack: vec![MdNode::root(Vec::new())],
        }
    }

    pub fn open_node(&mut self, node: MdNode) {
        self.stack.push(node);
    }

    pub fn close_node(&mut self) -> Result<(), MarkdownError> {
        if self.stack.len() < 2 {
            return Err(MarkdownError::Unbalanced);
        }
        let node = self.stack.pop().ok_or(MarkdownError::Unbalanced)?;
        self.append(node)
    }

    /// Appends `content` to the open node, regrouping marked runs into nested
    /// `strong`/`emphasis` nodes.
    pub fn next(&mut self, content: &[Inline]) -> Result<(), MarkdownError> {
        for node in inline_nodes(content, &[]) {
            self.append(node)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<MdNode, MarkdownError> {
        if self.stack.len() != 1 {
            return Err(MarkdownError::Unbalanced);
        }
        self.stack.pop().ok_or(MarkdownError::Unbalanced)
    }

    fn append(&mut self, node: MdNode) -> Result<(), MarkdownError> {
        let parent = self.stack.last_mut().ok_or(MarkdownError::Unbalanced)?;
        let type_name = parent.type_name();
        parent
            .children_mut()
            .ok_or(MarkdownError::NotAContainer(type_name))?
            .push(node);
        Ok(())
    }
}

impl Default for ExportState {
    fn default() -> Self {
        Self::new()
    }
}

fn inline_nodes(content: &[Inline], open: &[Mark]) -> Vec<MdNode> {
    let mut nodes = Vec::new();
    let mut index = 0;
    while index < content.len() {
        let Some(mark) = wrapping_mark(&content[index], open) else {
            nodes.push(leaf(&content[index]));
            index += 1;
            continue;
        };

        let run = content[index..]
            .iter()
            .take_while(|inline| inline.marks().contains(&mark))
            .count();
        let mut inner = open.to_vec();
        inner.push(mark);
        let children = inline_nodes(&content[index..index + run], &inner);
        nodes.push(match mark {
            Mark::Strong => MdNode::Strong { children },
            _ => MdNode::Emphasis { children },
        });
        index += run;
    }
    nodes
}

fn wrapping_mark(inline: &Inline, open: &[Mark]) -> Option<Mark> {
    inline
        .marks()
        .iter()
        .find(|mark| **mark != Mark::Code && !open.contains(mark))
        .copied()
}

fn leaf(inline: &Inline) -> MdNode {
    match inline {
        Inline::Text { text, marks } if marks.contains(&Mark::Code) => MdNode::InlineCode {
            value: text.clone(),
        },
        Inline::Text { text, .. } => MdNode::text(text.clone()),
        Inline::HardBreak => MdNode::Break,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_runs_regroup() {
        let nodes = inline_nodes(
            &[
                Inline::marked("a", [Mark::Strong]),
                Inline::marked("b", [Mark::Strong, Mark::Emphasis]),
                Inline::text("c"),
                Inline::marked("d", [Mark::Code]),
            ],
            &[],
        );
        assert_eq!(
            nodes,
            vec![
                MdNode::Strong {
                    children: vec![
                        MdNode::text("a"),
                        MdNode::Emphasis {
                            children: vec![MdNode::text("b")]
                        },
                    ]
                },
                MdNode::text("c"),
                MdNode::InlineCode {
                    value: "d".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_close_without_open_is_unbalanced() {
        let mut state = ExportState::new();
        assert!(matches!(state.close_node(), Err(MarkdownError::Unbalanced)));
    }
}
