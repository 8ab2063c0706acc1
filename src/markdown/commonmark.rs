//! CommonMark text ⇄ [`MdNode`] through comrak.
//!
//! Only the node set [`MdNode`] knows about survives the trip. Container
//! blocks such as lists and quotes are flattened into their textblocks; other
//! leaf blocks are skipped.

use super::{MarkdownError, MdNode};
use comrak::nodes::{Ast, AstNode, NodeCode, NodeHeading, NodeValue};
use comrak::{Arena, Options, format_commonmark, parse_document};
use std::cell::RefCell;
use tracing::debug;

pub fn parse_commonmark(input: &str) -> MdNode {
    let arena = Arena::new();
    let options = Options::default();
    let document = parse_document(&arena, input, &options);

    let mut blocks = Vec::new();
    collect_blocks(document, &mut blocks);
    MdNode::root(blocks)
}

pub fn to_commonmark(root: &MdNode) -> Result<String, MarkdownError> {
    let arena = Arena::new();
    let document = build(&arena, root);

    let mut output = Vec::new();
    format_commonmark(document, &Options::default(), &mut output)?;
    Ok(String::from_utf8(output)?)
}

fn collect_blocks<'a>(node: &'a AstNode<'a>, blocks: &mut Vec<MdNode>) {
    for child in node.children() {
        let value = child.data.borrow().value.clone();
        match value {
            NodeValue::Heading(heading) => blocks.push(MdNode::Heading {
                depth: heading.level,
                children: collect_inlines(child),
            }),
            NodeValue::Paragraph => blocks.push(MdNode::Paragraph {
                children: collect_inlines(child),
            }),
            NodeValue::List(_) | NodeValue::Item(_) | NodeValue::BlockQuote => {
                collect_blocks(child, blocks)
            }
            other => debug!(node = ?other, "skipping unsupported markdown block"),
        }
    }
}

fn collect_inlines<'a>(node: &'a AstNode<'a>) -> Vec<MdNode> {
    let mut inlines = Vec::new();
    for child in node.children() {
        let value = child.data.borrow().value.clone();
        match value {
            NodeValue::Text(text) => push_text(&mut inlines, &text),
            NodeValue::SoftBreak => push_text(&mut inlines, "\n"),
            NodeValue::LineBreak => inlines.push(MdNode::Break),
            NodeValue::Code(code) => inlines.push(MdNode::InlineCode {
                value: code.literal,
            }),
            NodeValue::Emph => inlines.push(MdNode::Emphasis {
                children: collect_inlines(child),
            }),
            NodeValue::Strong => inlines.push(MdNode::Strong {
                children: collect_inlines(child),
            }),
            other => {
                debug!(node = ?other, "flattening unsupported markdown inline");
                for inline in collect_inlines(child) {
                    match inline {
                        MdNode::Text { value } => push_text(&mut inlines, &value),
                        inline => inlines.push(inline),
                    }
                }
            }
        }
    }
    inlines
}

fn push_text(inlines: &mut Vec<MdNode>, text: &str) {
    if let Some(MdNode::Text { value }) = inlines.last_mut() {
        value.push_str(text);
        return;
    }
    inlines.push(MdNode::text(text));
}

fn build<'a>(arena: &'a Arena<AstNode<'a>>, node: &MdNode) -> &'a AstNode<'a> {
    let value = match node {
        MdNode::Root { .. } => NodeValue::Document,
        MdNode::Heading { depth, .. } => NodeValue::Heading(NodeHeading {
            level: *depth,
            setext: false,
        }),
        MdNode::Paragraph { .. } => NodeValue::Paragraph,
        MdNode::Emphasis { .. } => NodeValue::Emph,
        MdNode::Strong { .. } => NodeValue::Strong,
        MdNode::InlineCode { value } => NodeValue::Code(NodeCode {
            num_backticks: 1,
            literal: value.clone(),
        }),
        MdNode::Break => NodeValue::LineBreak,
        MdNode::Text { value } => return build_text(arena, value),
    };

    let ast = alloc(arena, value);
    for child in node.children() {
        if let MdNode::Text { value } = child {
            append_text(arena, ast, value);
        } else {
            ast.append(build(arena, child));
        }
    }
    ast
}

fn build_text<'a>(arena: &'a Arena<AstNode<'a>>, value: &str) -> &'a AstNode<'a> {
    alloc(arena, NodeValue::Text(value.to_string()))
}

/// Text with embedded newlines becomes text runs separated by soft breaks.
fn append_text<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, value: &str) {
    for (index, line) in value.split('\n').enumerate() {
        if index > 0 {
            parent.append(alloc(arena, NodeValue::SoftBreak));
        }
        if !line.is_empty() {
            parent.append(build_text(arena, line));
        }
    }
}

fn alloc<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_and_paragraph() {
        let root = parse_commonmark("## Hello *world*\n\nBody\ntext\n");
        assert_eq!(
            root,
            MdNode::root(vec![
                MdNode::Heading {
                    depth: 2,
                    children: vec![
                        MdNode::text("Hello "),
                        MdNode::Emphasis {
                            children: vec![MdNode::text("world")]
                        },
                    ],
                },
                MdNode::Paragraph {
                    children: vec![MdNode::text("Body\ntext")]
                },
            ])
        );
    }

    #[test]
    fn test_list_items_are_flattened() {
        let root = parse_commonmark("- one\n- two\n");
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[1].type_name(), "paragraph");
    }

    #[test]
    fn test_render_heading() {
        let root = MdNode::root(vec![MdNode::Heading {
            depth: 3,
            children: vec![MdNode::text("Title")],
        }]);
        assert_eq!(to_commonmark(&root).unwrap(), "### Title\n");
    }
}
