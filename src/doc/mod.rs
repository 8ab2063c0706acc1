//! Editable document tree.
//!
//! A [`Document`] is a flat sequence of textblocks. Each [`Block`] carries a
//! [`BlockKind`] (paragraph or heading) and inline content. Offsets inside a
//! block are counted in grapheme clusters; a hard break occupies one unit.

use crate::heading::HeadingAttrs;
use crate::schema::{self, NodeSpec};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

pub type BlockId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub content: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph,
    Heading(HeadingAttrs),
}

/// Inline marks, ordered outermost first when rendered as nested markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Strong,
    Emphasis,
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("block not found")]
    BlockNotFound,
    #[error("invalid offset")]
    InvalidOffset,
    #[error("selection spans more than one block")]
    CrossBlockRange,
}

impl Document {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn block_mut(&mut self, index: usize) -> Result<&mut Block, EditError> {
        self.blocks.get_mut(index).ok_or(EditError::BlockNotFound)
    }

    pub fn text_content(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text_content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Block {
    pub fn new(kind: BlockKind, content: Vec<Inline>) -> Self {
        let mut block = Self {
            id: Uuid::new_v4(),
            kind,
            content,
        };
        block.normalize();
        block
    }

    pub fn paragraph(content: Vec<Inline>) -> Self {
        Self::new(BlockKind::Paragraph, content)
    }

    pub fn heading(attrs: HeadingAttrs, content: Vec<Inline>) -> Self {
        Self::new(BlockKind::Heading(attrs), content)
    }

    pub fn heading_attrs(&self) -> Option<&HeadingAttrs> {
        match &self.kind {
            BlockKind::Heading(attrs) => Some(attrs),
            BlockKind::Paragraph => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_attrs().is_some()
    }

    /// Concatenated text of all text runs. Hard breaks contribute nothing.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text { text, .. } => Some(text.as_str()),
                Inline::HardBreak => None,
            })
            .collect()
    }

    /// Number of offset units in the block.
    pub fn size(&self) -> usize {
        self.content.iter().map(Inline::size).sum()
    }

    /// Text from the block start up to `offset`, with each hard break
    /// replaced by `leaf`.
    pub fn text_before(&self, offset: usize, leaf: char) -> Result<String, EditError> {
        if offset > self.size() {
            return Err(EditError::InvalidOffset);
        }
        let mut output = String::new();
        let mut pos = 0;
        for inline in &self.content {
            if pos >= offset {
                break;
            }
            match inline {
                Inline::Text { text, .. } => {
                    for grapheme in text.graphemes(true) {
                        if pos >= offset {
                            break;
                        }
                        output.push_str(grapheme);
                        pos += 1;
                    }
                }
                Inline::HardBreak => {
                    output.push(leaf);
                    pos += 1;
                }
            }
        }
        Ok(output)
    }

    pub fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), EditError> {
        if offset > self.size() {
            return Err(EditError::InvalidOffset);
        }
        if text.is_empty() {
            return Ok(());
        }

        let mut pos = 0;
        for index in 0..self.content.len() {
            if offset == pos && self.content[index].is_hard_break() {
                self.content.insert(index, Inline::text(text));
                self.normalize();
                return Ok(());
            }
            match &mut self.content[index] {
                Inline::Text { text: body, .. } => {
                    let len = body.graphemes(true).count();
                    if offset <= pos + len {
                        let byte_offset = grapheme_offset_to_byte(body, offset - pos)
                            .ok_or(EditError::InvalidOffset)?;
                        body.insert_str(byte_offset, text);
                        return Ok(());
                    }
                    pos += len;
                }
                Inline::HardBreak => pos += 1,
            }
        }

        self.content.push(Inline::text(text));
        self.normalize();
        Ok(())
    }

    /// Removes the units in `from..to`.
    pub fn delete(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        if from > to || to > self.size() {
            return Err(EditError::InvalidOffset);
        }
        if from == to {
            return Ok(());
        }

        let mut pos = 0;
        let mut kept = Vec::with_capacity(self.content.len());
        for inline in std::mem::take(&mut self.content) {
            match inline {
                Inline::Text { text, marks } => {
                    let start = pos;
                    let len = text.graphemes(true).count();
                    pos += len;
                    if pos <= from || start >= to {
                        kept.push(Inline::Text { text, marks });
                        continue;
                    }
                    let remaining: String = text
                        .graphemes(true)
                        .enumerate()
                        .filter(|(index, _)| {
                            let unit = start + index;
                            unit < from || unit >= to
                        })
                        .map(|(_, grapheme)| grapheme)
                        .collect();
                    kept.push(Inline::Text {
                        text: remaining,
                        marks,
                    });
                }
                Inline::HardBreak => {
                    if pos < from || pos >= to {
                        kept.push(Inline::HardBreak);
                    }
                    pos += 1;
                }
            }
        }
        self.content = kept;
        self.normalize();
        Ok(())
    }

    /// Drops empty text runs and merges neighbours that carry the same marks.
    pub fn normalize(&mut self) {
        let mut merged: Vec<Inline> = Vec::with_capacity(self.content.len());
        for inline in std::mem::take(&mut self.content) {
            if let Inline::Text { text, marks } = inline {
                if text.is_empty() {
                    continue;
                }
                if let Some(Inline::Text {
                    text: previous,
                    marks: previous_marks,
                }) = merged.last_mut()
                {
                    if *previous_marks == marks {
                        previous.push_str(&text);
                        continue;
                    }
                }
                merged.push(Inline::Text { text, marks });
            } else {
                merged.push(inline);
            }
        }
        self.content = merged;
    }
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    pub fn spec(&self) -> &'static NodeSpec {
        match self {
            BlockKind::Paragraph => &schema::PARAGRAPH,
            BlockKind::Heading(_) => &schema::HEADING,
        }
    }
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        let mut marks: Vec<Mark> = marks.into_iter().collect();
        marks.sort();
        marks.dedup();
        Self::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn is_hard_break(&self) -> bool {
        matches!(self, Inline::HardBreak)
    }

    pub fn marks(&self) -> &[Mark] {
        match self {
            Inline::Text { marks, .. } => marks,
            Inline::HardBreak => &[],
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Inline::Text { text, .. } => text.graphemes(true).count(),
            Inline::HardBreak => 1,
        }
    }
}

fn grapheme_offset_to_byte(text: &str, grapheme_offset: usize) -> Option<usize> {
    if grapheme_offset == 0 {
        return Some(0);
    }

    let mut count = 0;
    for (byte_index, _) in text.grapheme_indices(true) {
        if count == grapheme_offset {
            return Some(byte_index);
        }
        count += 1;
    }
    if count == grapheme_offset {
        Some(text.len())
    } else {
        None
    }
}
