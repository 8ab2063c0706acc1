#![no_main]

use libfuzzer_sys::fuzz_target;
use md_heading::{DomParser, DomRenderer, HeadingSchema, parse_html, to_html};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let schema = HeadingSchema::default();
    let nodes = parse_html(&input);
    if let Ok(doc) = DomParser::new(&schema).parse(&nodes) {
        let _ = to_html(&DomRenderer::new(&schema).render(&doc));
    }
});
