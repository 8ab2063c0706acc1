//! A minimal host wiring the heading pieces together: typed text goes
//! through the autoformat rule, key chords through the keymap, and named
//! commands through the registry.

use crate::commands::{CommandError, CommandRegistry};
use crate::doc::EditError;
use crate::dom::{DomNode, DomRenderer};
use crate::heading::HeadingSchema;
use crate::input_rule::{HeadingInputRule, InputOutcome};
use crate::keymap::{KeyChord, Keymap, KeymapError, Platform};
use crate::markdown::{ImportError, MarkdownError, MarkdownExporter, MarkdownImporter, MdNode};
use crate::state::{EditorState, Position, Selection};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct Editor {
    schema: HeadingSchema,
    state: EditorState,
    input_rule: HeadingInputRule,
    keymap: Keymap,
    commands: CommandRegistry,
}

impl Editor {
    /// An editor over a single empty paragraph, with the heading keymap for
    /// the current platform.
    pub fn new(schema: HeadingSchema) -> Self {
        Self {
            schema,
            state: EditorState::empty(),
            input_rule: HeadingInputRule::new(),
            keymap: Keymap::heading(Platform::current()),
            commands: CommandRegistry::with_heading_commands(),
        }
    }

    /// Loads an external markdown tree. The cursor starts at the beginning of
    /// the first block.
    pub fn from_markdown(schema: HeadingSchema, root: &MdNode) -> Result<Self, ImportError> {
        let doc = MarkdownImporter::new(&schema).import(root)?;
        let mut editor = Self::new(schema);
        editor.state = EditorState::at_start(doc);
        Ok(editor)
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn schema(&self) -> &HeadingSchema {
        &self.schema
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    pub fn set_selection(&mut self, selection: Selection) -> Result<(), EditError> {
        self.state.set_selection(selection)
    }

    pub fn set_cursor(&mut self, block: usize, offset: usize) -> Result<(), EditError> {
        self.set_selection(Selection::cursor(Position::new(block, offset)))
    }

    /// Types `text` one grapheme at a time. Each grapheme is offered to the
    /// autoformat rule before being inserted.
    pub fn type_text(&mut self, text: &str) -> Result<(), EditError> {
        for grapheme in text.graphemes(true) {
            if self.input_rule.handle_text_input(&mut self.state, grapheme)
                == InputOutcome::Consumed
            {
                continue;
            }
            let tr = self.state.insert_text(grapheme)?;
            self.state.apply(tr);
        }
        Ok(())
    }

    /// `true` when a binding handled the chord.
    pub fn press_key(&mut self, chord: &KeyChord) -> bool {
        self.keymap.handle(chord, &self.commands, &mut self.state)
    }

    /// Like [`press_key`](Self::press_key) with a shortcut string such as
    /// `Mod-Alt-2`.
    pub fn press(&mut self, shortcut: &str) -> Result<bool, KeymapError> {
        let chord = KeyChord::parse(shortcut, self.keymap.platform())?;
        Ok(self.press_key(&chord))
    }

    pub fn run_command(&mut self, name: &str, arg: Option<i64>) -> Result<bool, CommandError> {
        self.commands.call(name, &mut self.state, arg)
    }

    pub fn to_markdown(&self) -> Result<MdNode, MarkdownError> {
        MarkdownExporter::new(&self.schema).export(self.state.doc())
    }

    pub fn to_dom(&self) -> Vec<DomNode> {
        DomRenderer::new(&self.schema).render(self.state.doc())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(HeadingSchema::default())
    }
}
