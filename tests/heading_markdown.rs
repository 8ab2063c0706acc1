use md_heading::{
    Block, Document, HeadingAttrs, HeadingLevel, HeadingSchema, ImportError, Inline, LevelError,
    Mark, MarkdownExporter, MarkdownImporter, MdNode,
};

fn heading_node(depth: u8, children: Vec<MdNode>) -> MdNode {
    MdNode::Heading { depth, children }
}

fn export_heading(content: Vec<Inline>) -> MdNode {
    let schema = HeadingSchema::default();
    let doc = Document::from_blocks(vec![Block::heading(
        HeadingAttrs::new(HeadingLevel::H2),
        content,
    )]);
    let root = MarkdownExporter::new(&schema).export(&doc).unwrap();
    root.children()[0].clone()
}

#[test]
fn heading_round_trips_at_every_depth() {
    let schema = HeadingSchema::default();
    for depth in 1..=6 {
        let children = vec![
            MdNode::text("Chapter "),
            MdNode::Strong {
                children: vec![MdNode::text("one")],
            },
            MdNode::Break,
            MdNode::InlineCode {
                value: "x".to_string(),
            },
        ];
        let root = MdNode::root(vec![heading_node(depth, children)]);

        let doc = MarkdownImporter::new(&schema).import(&root).unwrap();
        let exported = MarkdownExporter::new(&schema).export(&doc).unwrap();
        assert_eq!(exported, root, "depth {depth}");
    }
}

#[test]
fn import_reads_depth_and_leaves_id_empty() {
    let schema = HeadingSchema::default();
    let root = MdNode::root(vec![heading_node(4, vec![MdNode::text("Setup")])]);
    let doc = MarkdownImporter::new(&schema).import(&root).unwrap();

    let attrs = doc.blocks[0].heading_attrs().unwrap();
    assert_eq!(attrs.level, HeadingLevel::H4);
    assert!(attrs.id.is_empty());
    assert_eq!(doc.blocks[0].content, vec![Inline::text("Setup")]);
}

#[test]
fn import_accumulates_nested_marks() {
    let schema = HeadingSchema::default();
    let root = MdNode::root(vec![heading_node(
        1,
        vec![MdNode::Emphasis {
            children: vec![
                MdNode::text("a"),
                MdNode::Strong {
                    children: vec![MdNode::text("b")],
                },
            ],
        }],
    )]);
    let doc = MarkdownImporter::new(&schema).import(&root).unwrap();
    assert_eq!(
        doc.blocks[0].content,
        vec![
            Inline::marked("a", [Mark::Emphasis]),
            Inline::marked("b", [Mark::Emphasis, Mark::Strong]),
        ]
    );
}

#[test]
fn export_drops_trailing_hard_break() {
    let node = export_heading(vec![Inline::text("Title"), Inline::HardBreak]);
    assert_eq!(node, heading_node(2, vec![MdNode::text("Title")]));
}

#[test]
fn export_keeps_leading_and_interior_hard_breaks() {
    let node = export_heading(vec![Inline::HardBreak, Inline::text("Title")]);
    assert_eq!(
        node,
        heading_node(2, vec![MdNode::Break, MdNode::text("Title")])
    );

    let node = export_heading(vec![
        Inline::text("a"),
        Inline::HardBreak,
        Inline::text("b"),
    ]);
    assert_eq!(
        node,
        heading_node(2, vec![MdNode::text("a"), MdNode::Break, MdNode::text("b")])
    );
}

#[test]
fn export_drops_only_one_trailing_break() {
    let node = export_heading(vec![
        Inline::text("Title"),
        Inline::HardBreak,
        Inline::HardBreak,
    ]);
    assert_eq!(
        node,
        heading_node(2, vec![MdNode::text("Title"), MdNode::Break])
    );
}

#[test]
fn export_of_lone_hard_break_is_empty_heading() {
    let node = export_heading(vec![Inline::HardBreak]);
    assert_eq!(node, heading_node(2, Vec::new()));
}

#[test]
fn paragraph_trailing_break_is_kept() {
    let schema = HeadingSchema::default();
    let doc = Document::from_blocks(vec![Block::paragraph(vec![
        Inline::text("p"),
        Inline::HardBreak,
    ])]);
    let root = MarkdownExporter::new(&schema).export(&doc).unwrap();
    assert_eq!(
        root.children()[0],
        MdNode::Paragraph {
            children: vec![MdNode::text("p"), MdNode::Break]
        }
    );
}

#[test]
fn import_rejects_out_of_range_depth() {
    let schema = HeadingSchema::default();
    for depth in [0, 7] {
        let root = MdNode::root(vec![heading_node(depth, vec![MdNode::text("x")])]);
        assert_eq!(
            MarkdownImporter::new(&schema).import(&root),
            Err(ImportError::Level(LevelError::OutOfRange(i64::from(depth))))
        );
    }
}

#[test]
fn import_rejects_malformed_trees() {
    let schema = HeadingSchema::default();
    let importer = MarkdownImporter::new(&schema);

    let loose_text = MdNode::root(vec![MdNode::text("loose")]);
    assert_eq!(
        importer.import(&loose_text),
        Err(ImportError::InlineOutsideBlock("text"))
    );

    let nested = MdNode::root(vec![MdNode::Paragraph {
        children: vec![heading_node(1, Vec::new())],
    }]);
    assert_eq!(
        importer.import(&nested),
        Err(ImportError::NestedBlock {
            parent: "paragraph",
            child: "heading",
        })
    );
}

#[test]
fn heading_json_shape_imports() {
    let json = r#"{"type":"root","children":[{"type":"heading","depth":3,"children":[{"type":"text","value":"Hi"}]}]}"#;
    let root: MdNode = serde_json::from_str(json).unwrap();
    let schema = HeadingSchema::default();
    let doc = MarkdownImporter::new(&schema).import(&root).unwrap();
    assert_eq!(
        doc.blocks[0].heading_attrs().map(|attrs| attrs.level),
        Some(HeadingLevel::H3)
    );
}

#[cfg(feature = "commonmark")]
mod commonmark {
    use super::*;
    use md_heading::{parse_commonmark, to_commonmark};

    #[test]
    fn commonmark_text_round_trips() {
        let source = "# Title\n\nBody text\n\n### Details\n";
        let schema = HeadingSchema::default();
        let doc = MarkdownImporter::new(&schema)
            .import(&parse_commonmark(source))
            .unwrap();
        assert_eq!(doc.blocks.len(), 3);

        let root = MarkdownExporter::new(&schema).export(&doc).unwrap();
        assert_eq!(to_commonmark(&root).unwrap(), source);
    }

    #[test]
    fn setext_heading_imports_as_heading() {
        let schema = HeadingSchema::default();
        let doc = MarkdownImporter::new(&schema)
            .import(&parse_commonmark("Title\n-----\n"))
            .unwrap();
        assert_eq!(
            doc.blocks[0].heading_attrs().map(|attrs| attrs.level),
            Some(HeadingLevel::H2)
        );
    }
}
