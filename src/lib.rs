//! md-heading: the heading node of a structured markdown editor.
//!
//! Headings move between three representations that must agree with each
//! other: an external markdown tree, the editable [`Document`], and a
//! rendered element tree. On top of that the crate provides the authoring
//! side: an autoformat rule for typed `#`s, the `WrapInHeading` and
//! `DowngradeHeading` commands, and the keymap that binds them.
//!
//! # Quick Start
//!
//! ```rust
//! use md_heading::{Editor, HeadingLevel, MdNode};
//!
//! let mut editor = Editor::default();
//! editor.type_text("## Getting started").unwrap();
//!
//! let block = &editor.state().doc().blocks[0];
//! assert_eq!(block.heading_attrs().unwrap().level, HeadingLevel::H2);
//!
//! let root = editor.to_markdown().unwrap();
//! assert_eq!(root.children()[0], MdNode::Heading {
//!     depth: 2,
//!     children: vec![MdNode::text("Getting started")],
//! });
//! ```
//!
//! # Features
//!
//! - `html` - HTML text parsing and serialization via html5ever
//! - `commonmark` - CommonMark text parsing and rendering via comrak
//! - `cli` - The `md-heading` binary (enables both of the above)

// Document tree and grapheme-offset editing
pub mod doc;

// Node definitions
pub mod schema;

// Heading attributes, ids and conversion rules
pub mod heading;

pub mod config;

// Element trees and the HTML bridge
pub mod dom;

// External markdown tree and the CommonMark bridge
pub mod markdown;

// Selection, transactions and the generic block-type transform
pub mod state;

// Authoring: autoformat, commands, keymap
pub mod commands;
pub mod input_rule;
pub mod keymap;

pub mod editor;

// Re-export doc types
pub use doc::{Block, BlockId, BlockKind, Document, EditError, Inline, Mark};

// Re-export heading types
pub use config::{AttrDecorator, HeadingConfig, IdGenerator};
pub use heading::{
    HeadingAttrs, HeadingLevel, HeadingSchema, LevelError, default_heading_id, slugify,
};

// Re-export conversion types
pub use dom::{DomAttrs, DomNode, DomParser, DomRenderer, DomTypeError, Namespace};
pub use markdown::{ImportError, MarkdownError, MarkdownExporter, MarkdownImporter, MdNode};

// Re-export editing types
pub use commands::{
    CommandError, CommandRegistry, DOWNGRADE_HEADING, WRAP_IN_HEADING, downgrade_heading,
    wrap_in_heading,
};
pub use editor::Editor;
pub use input_rule::{HeadingInputRule, InputOutcome};
pub use keymap::{Binding, KeyChord, Keymap, KeymapError, Platform};
pub use state::{EditorState, Position, Selection, Step, Transaction};

// Re-export bridges (feature-gated)
#[cfg(feature = "html")]
pub use dom::html::{RenderError, parse_html, to_html};

#[cfg(feature = "commonmark")]
pub use markdown::commonmark::{parse_commonmark, to_commonmark};
