//! Editor state: a document, a selection and atomic transactions over both.

mod selection;
mod transaction;

pub use selection::{Position, Selection};
pub use transaction::{Step, Transaction};

use crate::doc::{Block, BlockKind, Document, EditError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    doc: Document,
    selection: Selection,
}

impl EditorState {
    pub fn new(doc: Document, selection: Selection) -> Result<Self, EditError> {
        selection.validate(&doc)?;
        Ok(Self { doc, selection })
    }

    pub fn with_cursor(doc: Document, position: Position) -> Result<Self, EditError> {
        Self::new(doc, Selection::cursor(position))
    }

    /// One empty paragraph with the cursor inside it.
    pub fn empty() -> Self {
        Self::at_start(Document::new())
    }

    /// Cursor at the start of the first block. An empty document gets an
    /// empty paragraph so the cursor has somewhere to be.
    pub fn at_start(mut doc: Document) -> Self {
        if doc.is_empty() {
            doc.blocks.push(Block::paragraph(Vec::new()));
        }
        Self {
            doc,
            selection: Selection::cursor(Position::new(0, 0)),
        }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) -> Result<(), EditError> {
        selection.validate(&self.doc)?;
        self.selection = selection;
        Ok(())
    }

    /// Starts a transaction against a copy of the current document.
    pub fn tr(&self) -> Transaction {
        Transaction::new(self.doc.clone(), self.selection)
    }

    /// Commits every step of `tr` at once.
    pub fn apply(&mut self, tr: Transaction) {
        let (doc, selection) = tr.into_parts();
        self.doc = doc;
        self.selection = selection;
    }

    /// Replaces the selection with `text`, leaving a cursor after it.
    pub fn insert_text(&self, text: &str) -> Result<Transaction, EditError> {
        let from = self.selection.from();
        let to = self.selection.to();
        if from.block != to.block {
            return Err(EditError::CrossBlockRange);
        }

        let mut tr = self.tr();
        tr.delete(from.block, from.offset, to.offset)?;
        tr.set_selection(Selection::cursor(from))?;
        tr.insert_text(from, text)?;
        Ok(tr)
    }
}

/// Retypes every textblock the selection touches to `kind`.
///
/// `None` when no block in the range would change.
pub fn set_block_type(state: &EditorState, kind: &BlockKind) -> Option<Transaction> {
    let selection = state.selection();
    let mut tr = state.tr();
    match tr.set_block_type(selection.from().block, selection.to().block, kind) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(tr),
    }
}
