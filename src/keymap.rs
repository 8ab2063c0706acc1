//! Keyboard shortcuts for headings.
//!
//! Shortcuts use the `Mod-Alt-1` grammar: modifiers joined with `-`, the key
//! name last. `Mod` means `Meta` on macOS and `Ctrl` elsewhere.

use crate::commands::{CommandRegistry, DOWNGRADE_HEADING, WRAP_IN_HEADING};
use crate::heading::HeadingLevel;
use crate::state::EditorState;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeymapError {
    #[error("empty shortcut")]
    EmptyShortcut,
    #[error("unrecognized modifier name: {0}")]
    UnknownModifier(String),
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyChord {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub key: String,
}

impl KeyChord {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            alt: false,
            ctrl: false,
            meta: false,
            shift: false,
            key: key.into(),
        }
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Adds whatever `Mod` stands for on `platform`.
    pub fn with_mod(self, platform: Platform) -> Self {
        match platform {
            Platform::Mac => self.with_meta(),
            Platform::Other => self.with_ctrl(),
        }
    }

    pub fn parse(shortcut: &str, platform: Platform) -> Result<Self, KeymapError> {
        if shortcut.is_empty() {
            return Err(KeymapError::EmptyShortcut);
        }

        // A trailing `-` is the minus key, not a separator.
        let (modifiers, key) = match shortcut.strip_suffix('-') {
            Some(rest) if rest.is_empty() || rest.ends_with('-') => {
                (rest.strip_suffix('-').unwrap_or(rest), "-")
            }
            _ => shortcut.rsplit_once('-').unwrap_or(("", shortcut)),
        };
        if key.is_empty() {
            return Err(KeymapError::EmptyShortcut);
        }

        let key = if key == "Space" { " " } else { key };
        let mut chord = KeyChord::key(key);
        for modifier in modifiers.split('-').filter(|part| !part.is_empty()) {
            chord = match modifier.to_ascii_lowercase().as_str() {
                "cmd" | "meta" | "m" => chord.with_meta(),
                "a" | "alt" => chord.with_alt(),
                "c" | "ctrl" | "control" => chord.with_ctrl(),
                "s" | "shift" => chord.with_shift(),
                "mod" => chord.with_mod(platform),
                _ => return Err(KeymapError::UnknownModifier(modifier.to_string())),
            };
        }
        Ok(chord)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (held, name) in [
            (self.alt, "Alt"),
            (self.ctrl, "Ctrl"),
            (self.meta, "Meta"),
            (self.shift, "Shift"),
        ] {
            if held {
                write!(f, "{name}-")?;
            }
        }
        match self.key.as_str() {
            " " => f.write_str("Space"),
            key => f.write_str(key),
        }
    }
}

/// What a chord invokes: a registry command name and its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub label: String,
    pub command: String,
    pub arg: Option<i64>,
}

impl Binding {
    pub fn new(label: impl Into<String>, command: impl Into<String>, arg: Option<i64>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
            arg,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Keymap {
    platform: Platform,
    bindings: BTreeMap<KeyChord, Binding>,
}

impl Keymap {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            bindings: BTreeMap::new(),
        }
    }

    /// `Mod-Alt-1`..`Mod-Alt-6` wrap in the matching heading level;
    /// `Delete` and `Backspace` downgrade the heading.
    pub fn heading(platform: Platform) -> Self {
        let mut keymap = Self::new(platform);
        for level in HeadingLevel::all() {
            let chord = KeyChord::key(level.to_string())
                .with_mod(platform)
                .with_alt();
            let binding = Binding::new(
                format!("TurnIntoH{level}"),
                WRAP_IN_HEADING,
                Some(i64::from(level.get())),
            );
            keymap.bindings.insert(chord, binding);
        }
        for key in ["Delete", "Backspace"] {
            let binding = Binding::new(DOWNGRADE_HEADING, DOWNGRADE_HEADING, None);
            keymap.bindings.insert(KeyChord::key(key), binding);
        }
        keymap
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Binds `shortcut`, replacing any existing binding for the same chord.
    pub fn bind(&mut self, shortcut: &str, binding: Binding) -> Result<(), KeymapError> {
        let chord = KeyChord::parse(shortcut, self.platform)?;
        self.bindings.insert(chord, binding);
        Ok(())
    }

    pub fn lookup(&self, chord: &KeyChord) -> Option<&Binding> {
        self.bindings.get(chord)
    }

    pub fn resolve(&self, shortcut: &str) -> Result<Option<&Binding>, KeymapError> {
        let chord = KeyChord::parse(shortcut, self.platform)?;
        Ok(self.lookup(&chord))
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&KeyChord, &Binding)> {
        self.bindings.iter()
    }

    /// Calls the command bound to `chord`. `false` when nothing is bound or
    /// the command did not apply, so the host's default handling runs.
    pub fn handle(
        &self,
        chord: &KeyChord,
        registry: &CommandRegistry,
        state: &mut EditorState,
    ) -> bool {
        let Some(binding) = self.lookup(chord) else {
            return false;
        };
        match registry.call(&binding.command, state, binding.arg) {
            Ok(applied) => applied,
            Err(err) => {
                warn!(shortcut = %chord, label = %binding.label, error = %err, "keymap binding failed");
                false
            }
        }
    }
}
