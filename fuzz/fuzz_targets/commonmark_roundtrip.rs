#![no_main]

use libfuzzer_sys::fuzz_target;
use md_heading::{
    HeadingSchema, MarkdownExporter, MarkdownImporter, parse_commonmark, to_commonmark,
};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let schema = HeadingSchema::default();
    let root = parse_commonmark(&input);
    if let Ok(doc) = MarkdownImporter::new(&schema).import(&root) {
        if let Ok(exported) = MarkdownExporter::new(&schema).export(&doc) {
            let _ = to_commonmark(&exported);
        }
    }
});
