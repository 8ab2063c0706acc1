use criterion::{Criterion, black_box, criterion_group, criterion_main};
use md_heading::{
    Block, Document, EditorState, HeadingInputRule, Inline, Position, wrap_in_heading,
};

fn long_paragraph_state(offset: usize) -> EditorState {
    let text = "#".repeat(3) + &"lorem ipsum ".repeat(200);
    let doc = Document::from_blocks(vec![Block::paragraph(vec![Inline::text(text)])]);
    EditorState::with_cursor(doc, Position::new(0, offset)).unwrap()
}

fn bench_input_rule(c: &mut Criterion) {
    let rule = HeadingInputRule::new();

    let matching = long_paragraph_state(3);
    c.bench_function("input_rule_match", |b| {
        b.iter(|| black_box(rule.transaction(&matching, " ")))
    });

    let passing = long_paragraph_state(1200);
    c.bench_function("input_rule_pass_through", |b| {
        b.iter(|| black_box(rule.transaction(&passing, " ")))
    });
}

fn bench_wrap_in_heading(c: &mut Criterion) {
    let state = long_paragraph_state(0);
    c.bench_function("wrap_in_heading", |b| {
        b.iter(|| black_box(wrap_in_heading(&state, Some(2))))
    });
}

criterion_group!(benches, bench_input_rule, bench_wrap_in_heading);
criterion_main!(benches);
