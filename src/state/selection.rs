use crate::doc::{Document, EditError};
use serde::{Deserialize, Serialize};

/// A point inside a block, counted in grapheme units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub block: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }

    pub(crate) fn validate(&self, doc: &Document) -> Result<(), EditError> {
        let block = doc.block(self.block).ok_or(EditError::BlockNotFound)?;
        if self.offset > block.size() {
            return Err(EditError::InvalidOffset);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn cursor(position: Position) -> Self {
        Self {
            anchor: position,
            head: position,
        }
    }

    pub fn range(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// True for a collapsed cursor.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn from(&self) -> Position {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> Position {
        self.anchor.max(self.head)
    }

    pub(crate) fn validate(&self, doc: &Document) -> Result<(), EditError> {
        self.anchor.validate(doc)?;
        self.head.validate(doc)
    }

    pub(crate) fn map(self, f: impl Fn(Position) -> Position) -> Self {
        Self {
            anchor: f(self.anchor),
            head: f(self.head),
        }
    }
}
