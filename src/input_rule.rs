//! Heading autoformat: `#`s followed by a space at the start of a textblock.

use crate::doc::BlockKind;
use crate::heading::{HeadingAttrs, HeadingLevel};
use crate::state::{EditorState, Transaction};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Matched against the block text before the cursor plus the typed text.
pub const HEADING_PATTERN: &str = r"^(?<hashes>#+)\s$";

/// Stands in for non-text inline nodes when reading text before the cursor.
pub const LEAF_PLACEHOLDER: char = '\u{fffc}';

static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADING_PATTERN).expect("Invalid heading input pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The typed text was swallowed and the block retyped.
    Consumed,
    /// Insert the text normally.
    PassThrough,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingInputRule;

impl HeadingInputRule {
    pub fn new() -> Self {
        Self
    }

    /// Runs the rule for `text` about to be inserted at the cursor and applies
    /// the resulting transaction on a match.
    pub fn handle_text_input(&self, state: &mut EditorState, text: &str) -> InputOutcome {
        match self.transaction(state, text) {
            Some(tr) => {
                state.apply(tr);
                InputOutcome::Consumed
            }
            None => InputOutcome::PassThrough,
        }
    }

    /// The transaction the rule would produce, without applying it.
    ///
    /// Deletes the typed `#`s and retypes the block as a heading. A selection
    /// that is not a collapsed cursor never matches.
    pub fn transaction(&self, state: &EditorState, text: &str) -> Option<Transaction> {
        let selection = state.selection();
        if !selection.is_empty() {
            return None;
        }
        let cursor = selection.head;
        let block = state.doc().block(cursor.block)?;
        if !block.kind.spec().is_textblock() {
            return None;
        }

        let mut before = block.text_before(cursor.offset, LEAF_PLACEHOLDER).ok()?;
        before.push_str(text);
        let captures = HEADING_REGEX.captures(&before)?;
        let hashes = captures.name("hashes")?.as_str().len();
        let level = heading_level_for(&block.kind, hashes);
        trace!(block = cursor.block, hashes, level = level.get(), "heading input rule matched");

        let mut tr = state.tr();
        tr.delete(cursor.block, 0, cursor.offset).ok()?;
        let kind = BlockKind::Heading(HeadingAttrs::new(level));
        tr.set_block_type(cursor.block, cursor.block, &kind).ok()?;
        Some(tr)
    }
}

/// Level produced by typing `hashes` `#`s inside a block of `kind`: an
/// existing heading is pushed further down, anything else starts at `hashes`.
/// Both results stay within `1..=6`.
pub fn heading_level_for(kind: &BlockKind, hashes: usize) -> HeadingLevel {
    match kind {
        BlockKind::Heading(attrs) => attrs.level.promote_by(hashes),
        BlockKind::Paragraph => {
            HeadingLevel::clamped(i64::try_from(hashes).unwrap_or(i64::MAX))
        }
    }
}
