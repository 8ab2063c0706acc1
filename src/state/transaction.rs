use super::selection::{Position, Selection};
use crate::doc::{BlockKind, Document, EditError};
use serde::{Deserialize, Serialize};

/// One recorded change. Block indices refer to the document at the time the
/// step was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    ReplaceText {
        block: usize,
        from: usize,
        to: usize,
        text: String,
    },
    SetBlockType {
        block: usize,
        kind: BlockKind,
    },
    SetNodeMarkup {
        block: usize,
        kind: BlockKind,
    },
}

/// A batch of steps against a working copy of the document.
///
/// Nothing is visible until the transaction is handed to
/// [`EditorState::apply`](super::EditorState::apply); dropping it discards
/// every step.
#[derive(Debug, Clone)]
pub struct Transaction {
    doc: Document,
    selection: Selection,
    steps: Vec<Step>,
}

impl Transaction {
    pub(crate) fn new(doc: Document, selection: Selection) -> Self {
        Self {
            doc,
            selection,
            steps: Vec::new(),
        }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Document, Selection) {
        (self.doc, self.selection)
    }

    /// Inserts `text` at `at`. Positions at or after the insertion point in the
    /// same block move right.
    pub fn insert_text(&mut self, at: Position, text: &str) -> Result<(), EditError> {
        let block = self.doc.block_mut(at.block)?;
        let before = block.size();
        block.insert_text(at.offset, text)?;
        if text.is_empty() {
            return Ok(());
        }

        // Inserted text can join its neighbours into a single grapheme.
        let after = block.size();
        self.selection = self.selection.map(|pos| {
            if pos.block == at.block && pos.offset >= at.offset {
                let offset = (pos.offset + after).saturating_sub(before).min(after);
                Position::new(pos.block, offset)
            } else {
                pos
            }
        });
        self.steps.push(Step::ReplaceText {
            block: at.block,
            from: at.offset,
            to: at.offset,
            text: text.to_string(),
        });
        Ok(())
    }

    /// Removes `from..to` inside `block`. Positions inside the range collapse
    /// to `from`.
    pub fn delete(&mut self, block: usize, from: usize, to: usize) -> Result<(), EditError> {
        self.doc.block_mut(block)?.delete(from, to)?;
        if from == to {
            return Ok(());
        }

        self.selection = self.selection.map(|pos| {
            if pos.block != block || pos.offset <= from {
                pos
            } else if pos.offset >= to {
                Position::new(block, pos.offset - (to - from))
            } else {
                Position::new(block, from)
            }
        });
        self.steps.push(Step::ReplaceText {
            block,
            from,
            to,
            text: String::new(),
        });
        Ok(())
    }

    /// Retypes every textblock in `from_block..=to_block` whose kind differs
    /// from `kind`, returning how many changed. Inline content and block ids
    /// are kept; the old node attributes are not.
    pub fn set_block_type(
        &mut self,
        from_block: usize,
        to_block: usize,
        kind: &BlockKind,
    ) -> Result<usize, EditError> {
        if to_block >= self.doc.blocks.len() || from_block > to_block {
            return Err(EditError::BlockNotFound);
        }

        let mut changed = 0;
        for index in from_block..=to_block {
            let block = self.doc.block_mut(index)?;
            if !block.kind.spec().is_textblock() || block.kind == *kind {
                continue;
            }
            block.kind = kind.clone();
            self.steps.push(Step::SetBlockType {
                block: index,
                kind: kind.clone(),
            });
            changed += 1;
        }
        Ok(changed)
    }

    /// Replaces the kind and attributes of a single block.
    pub fn set_node_markup(&mut self, block: usize, kind: BlockKind) -> Result<(), EditError> {
        self.doc.block_mut(block)?.kind = kind.clone();
        self.steps.push(Step::SetNodeMarkup { block, kind });
        Ok(())
    }

    pub fn set_selection(&mut self, selection: Selection) -> Result<(), EditError> {
        selection.validate(&self.doc)?;
        self.selection = selection;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{Block, Inline};
    use crate::heading::{HeadingAttrs, HeadingLevel};

    fn doc(texts: &[&str]) -> Document {
        Document::from_blocks(
            texts
                .iter()
                .map(|text| Block::paragraph(vec![Inline::text(*text)]))
                .collect(),
        )
    }

    #[test]
    fn test_delete_maps_cursor() {
        let mut tr = Transaction::new(doc(&["## abc"]), Selection::cursor(Position::new(0, 3)));
        tr.delete(0, 0, 3).unwrap();
        assert_eq!(tr.doc().blocks[0].text_content(), "abc");
        assert_eq!(tr.selection(), Selection::cursor(Position::new(0, 0)));
    }

    #[test]
    fn test_insert_moves_cursor_after_text() {
        let mut tr = Transaction::new(doc(&["ac"]), Selection::cursor(Position::new(0, 1)));
        tr.insert_text(Position::new(0, 1), "b").unwrap();
        assert_eq!(tr.doc().blocks[0].text_content(), "abc");
        assert_eq!(tr.selection().head, Position::new(0, 2));
        assert_eq!(tr.steps().len(), 1);
    }

    #[test]
    fn test_insert_joining_grapheme_shifts_by_block_growth() {
        let mut tr = Transaction::new(doc(&["e"]), Selection::cursor(Position::new(0, 1)));
        tr.insert_text(Position::new(0, 1), "\u{301}").unwrap();
        assert_eq!(tr.doc().blocks[0].size(), 1);
        assert_eq!(tr.selection().head, Position::new(0, 1));

        let mut tr = Transaction::new(doc(&["a\r"]), Selection::cursor(Position::new(0, 2)));
        tr.insert_text(Position::new(0, 2), "\n").unwrap();
        assert_eq!(tr.selection().head, Position::new(0, 2));
    }

    #[test]
    fn test_set_block_type_skips_unchanged_blocks() {
        let heading = BlockKind::Heading(HeadingAttrs::new(HeadingLevel::H2));
        let mut blocks = doc(&["a", "b"]).blocks;
        blocks[1].kind = heading.clone();
        let mut tr = Transaction::new(
            Document::from_blocks(blocks),
            Selection::cursor(Position::new(0, 0)),
        );

        assert_eq!(tr.set_block_type(0, 1, &heading).unwrap(), 1);
        assert!(tr.doc().blocks.iter().all(|block| block.kind == heading));
        assert_eq!(tr.set_block_type(0, 2, &heading), Err(EditError::BlockNotFound));
    }

    #[test]
    fn test_failed_step_leaves_no_record() {
        let mut tr = Transaction::new(doc(&["a"]), Selection::cursor(Position::new(0, 0)));
        assert!(tr.delete(0, 0, 5).is_err());
        assert!(!tr.doc_changed());
    }
}
