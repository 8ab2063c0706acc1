use md_heading::{
    Block, Document, Editor, EditorState, HeadingAttrs, HeadingInputRule, HeadingLevel,
    InputOutcome, Inline, Position, Selection,
};

fn level_of(editor: &Editor, block: usize) -> Option<HeadingLevel> {
    editor.state().doc().blocks[block]
        .heading_attrs()
        .map(|attrs| attrs.level)
}

fn heading_state(level: HeadingLevel, text: &str) -> EditorState {
    let doc = Document::from_blocks(vec![Block::heading(
        HeadingAttrs::new(level),
        vec![Inline::text(text)],
    )]);
    EditorState::with_cursor(doc, Position::new(0, 0)).unwrap()
}

fn type_into(state: &mut EditorState, text: &str) {
    let rule = HeadingInputRule::new();
    for ch in text.chars() {
        let ch = ch.to_string();
        if rule.handle_text_input(state, &ch) == InputOutcome::PassThrough {
            let tr = state.insert_text(&ch).unwrap();
            state.apply(tr);
        }
    }
}

#[test]
fn hash_space_on_empty_paragraph_makes_h1() {
    let mut editor = Editor::default();
    editor.type_text("# ").unwrap();
    assert_eq!(level_of(&editor, 0), Some(HeadingLevel::H1));
    assert_eq!(editor.state().doc().blocks[0].text_content(), "");
}

#[test]
fn hashes_are_consumed_not_inserted() {
    let mut editor = Editor::default();
    editor.type_text("#### Deep").unwrap();
    assert_eq!(level_of(&editor, 0), Some(HeadingLevel::H4));
    assert_eq!(editor.state().doc().blocks[0].text_content(), "Deep");
}

#[test]
fn hashes_inside_heading_add_to_level() {
    let mut state = heading_state(HeadingLevel::H3, "Title");
    type_into(&mut state, "## ");
    let block = &state.doc().blocks[0];
    assert_eq!(block.heading_attrs().map(|attrs| attrs.level), Some(HeadingLevel::H5));
    assert_eq!(block.text_content(), "Title");
}

#[test]
fn level_is_capped_at_six_inside_heading() {
    let mut state = heading_state(HeadingLevel::H1, "");
    type_into(&mut state, "####### ");
    assert_eq!(
        state.doc().blocks[0].heading_attrs().map(|attrs| attrs.level),
        Some(HeadingLevel::H6)
    );
}

#[test]
fn level_is_capped_at_six_on_paragraph() {
    let mut editor = Editor::default();
    editor.type_text("######### x").unwrap();
    assert_eq!(level_of(&editor, 0), Some(HeadingLevel::H6));
    assert_eq!(editor.state().doc().blocks[0].text_content(), "x");
}

#[test]
fn text_before_hashes_prevents_match() {
    let mut editor = Editor::default();
    editor.type_text("a# ").unwrap();
    assert_eq!(level_of(&editor, 0), None);
    assert_eq!(editor.state().doc().blocks[0].text_content(), "a# ");
}

#[test]
fn hashes_in_middle_of_block_do_not_match() {
    let doc = Document::from_blocks(vec![Block::paragraph(vec![Inline::text("ab")])]);
    let mut state = EditorState::with_cursor(doc, Position::new(0, 1)).unwrap();
    type_into(&mut state, "# ");
    assert!(!state.doc().blocks[0].is_heading());
    assert_eq!(state.doc().blocks[0].text_content(), "a# b");
}

#[test]
fn non_empty_selection_passes_through() {
    let doc = Document::from_blocks(vec![Block::paragraph(vec![Inline::text("#x")])]);
    let state = EditorState::new(
        doc,
        Selection::range(Position::new(0, 1), Position::new(0, 2)),
    )
    .unwrap();
    assert!(HeadingInputRule::new().transaction(&state, " ").is_none());
}

#[test]
fn rule_only_touches_the_cursor_block() {
    let doc = Document::from_blocks(vec![
        Block::paragraph(vec![Inline::text("first")]),
        Block::paragraph(Vec::new()),
    ]);
    let mut state = EditorState::with_cursor(doc, Position::new(1, 0)).unwrap();
    type_into(&mut state, "## ");
    assert!(!state.doc().blocks[0].is_heading());
    assert_eq!(
        state.doc().blocks[1].heading_attrs().map(|attrs| attrs.level),
        Some(HeadingLevel::H2)
    );
}

#[test]
fn wrapped_heading_gets_a_fresh_id() {
    let doc = Document::from_blocks(vec![Block::heading(
        HeadingAttrs::new(HeadingLevel::H2).with_id("old"),
        vec![Inline::text("T")],
    )]);
    let mut state = EditorState::with_cursor(doc, Position::new(0, 0)).unwrap();
    type_into(&mut state, "# ");
    let attrs = state.doc().blocks[0].heading_attrs().unwrap();
    assert_eq!(attrs.level, HeadingLevel::H3);
    assert!(attrs.id.is_empty());
}

#[test]
fn combining_mark_keeps_cursor_inside_block() {
    let mut editor = Editor::default();
    editor.type_text("e").unwrap();
    editor.type_text("\u{301}").unwrap();
    assert_eq!(
        editor.state().selection(),
        Selection::cursor(Position::new(0, 1))
    );

    editor.type_text("x").unwrap();
    assert_eq!(editor.state().doc().blocks[0].text_content(), "e\u{301}x");
    assert_eq!(
        editor.state().selection(),
        Selection::cursor(Position::new(0, 2))
    );
}

#[test]
fn hash_space_still_works_after_joined_graphemes() {
    let mut editor = Editor::default();
    editor.type_text("\u{1F1EB}").unwrap();
    editor.type_text("\u{1F1F7}").unwrap();
    editor.set_cursor(0, 0).unwrap();
    editor.type_text("## ").unwrap();
    assert_eq!(level_of(&editor, 0), Some(HeadingLevel::H2));
    assert_eq!(editor.state().doc().blocks[0].text_content(), "\u{1F1EB}\u{1F1F7}");
}
