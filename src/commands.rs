//! Heading commands and the name-keyed registry that invokes them.
//!
//! A command inspects an [`EditorState`] and returns the [`Transaction`] it
//! would apply, or `None` when it is inapplicable. Inapplicability is not an
//! error; the registry reports it as `Ok(false)` and leaves the state alone.

use crate::doc::BlockKind;
use crate::heading::{HeadingAttrs, HeadingLevel};
use crate::state::{self, EditorState, Transaction};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

pub const WRAP_IN_HEADING: &str = "WrapInHeading";
pub const DOWNGRADE_HEADING: &str = "DowngradeHeading";

pub type CommandFn = Arc<dyn Fn(&EditorState, Option<i64>) -> Option<Transaction> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Retypes the selected blocks as headings at `level` (default 1, capped at
/// 6). A level below 1 turns them into paragraphs instead.
pub fn wrap_in_heading(state: &EditorState, level: Option<i64>) -> Option<Transaction> {
    let level = level.unwrap_or(1);
    let kind = if level < 1 {
        BlockKind::Paragraph
    } else {
        BlockKind::Heading(HeadingAttrs::new(HeadingLevel::clamped(level)))
    };

    let tr = state::set_block_type(state, &kind);
    match &tr {
        Some(tr) => debug!(target_kind = kind.name(), level, steps = tr.steps().len(), "wrap in heading"),
        None => debug!(target_kind = kind.name(), level, "wrap in heading not applicable"),
    }
    tr
}

/// Demotes the heading under a collapsed cursor at offset 0. A level 1
/// heading becomes a paragraph; otherwise the level drops by one and the id
/// is kept.
pub fn downgrade_heading(state: &EditorState) -> Option<Transaction> {
    let selection = state.selection();
    if !selection.is_empty() {
        debug!("downgrade heading: selection is not a cursor");
        return None;
    }
    let cursor = selection.head;
    let block = state.doc().block(cursor.block)?;
    let Some(attrs) = block.heading_attrs() else {
        debug!(block = cursor.block, "downgrade heading: not inside a heading");
        return None;
    };
    if cursor.offset != 0 {
        debug!(offset = cursor.offset, "downgrade heading: cursor not at block start");
        return None;
    }

    let Some(level) = attrs.level.demote() else {
        debug!(block = cursor.block, "downgrade heading to paragraph");
        return state::set_block_type(state, &BlockKind::Paragraph);
    };

    let mut tr = state.tr();
    let kind = BlockKind::Heading(HeadingAttrs {
        level,
        id: attrs.id.clone(),
    });
    tr.set_node_markup(cursor.block, kind).ok()?;
    debug!(block = cursor.block, level = level.get(), "downgrade heading");
    Some(tr)
}

/// Commands looked up by name and called with an optional integer argument.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandFn>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `WrapInHeading` and `DowngradeHeading`.
    pub fn with_heading_commands() -> Self {
        let mut registry = Self::new();
        registry.register(WRAP_IN_HEADING, wrap_in_heading);
        registry.register(DOWNGRADE_HEADING, |state: &EditorState, _: Option<i64>| {
            downgrade_heading(state)
        });
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, command: F)
    where
        F: Fn(&EditorState, Option<i64>) -> Option<Transaction> + Send + Sync + 'static,
    {
        self.commands.insert(name.into(), Arc::new(command));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Runs `name` and applies its transaction. `Ok(false)` when the command
    /// is inapplicable.
    pub fn call(
        &self,
        name: &str,
        state: &mut EditorState,
        arg: Option<i64>,
    ) -> Result<bool, CommandError> {
        let Some(command) = self.commands.get(name) else {
            warn!(command = name, "unknown command");
            return Err(CommandError::UnknownCommand(name.to_string()));
        };
        match command(state, arg) {
            Some(tr) => {
                state.apply(tr);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}
