#![allow(dead_code)]

use jsonpool::{
    print_to_string, CodeUnit, Document, NodeId, ParseError, ParseOptions, PrintOptions,
};

/// Parses `text` destructively into a UTF-8 document and hands it to `f`.
pub fn with_parsed<F>(text: &str, options: ParseOptions, f: F)
where
    F: FnOnce(&Document<'_, u8>),
{
    let mut data = text.as_bytes().to_vec();
    let mut doc: Document = Document::new();
    doc.parse(&mut data, None, options)
        .unwrap_or_else(|e| panic!("parse of {text:?} failed: {e}"));
    f(&doc);
}

/// Parses and hands the document over mutably, for mutation tests.
pub fn with_parsed_mut<F>(text: &str, options: ParseOptions, f: F)
where
    F: FnOnce(&mut Document<'_, u8>),
{
    let mut data = text.as_bytes().to_vec();
    let mut doc: Document = Document::new();
    doc.parse(&mut data, None, options)
        .unwrap_or_else(|e| panic!("parse of {text:?} failed: {e}"));
    f(&mut doc);
}

/// Parse + compact print round through a UTF-8 document.
pub fn compact(text: &str) -> String {
    compact_with(text, ParseOptions::default())
}

pub fn compact_with(text: &str, options: ParseOptions) -> String {
    let mut data = text.as_bytes().to_vec();
    let mut doc: Document = Document::new();
    doc.parse(&mut data, None, options)
        .unwrap_or_else(|e| panic!("parse of {text:?} failed: {e}"));
    print_to_string(&doc, PrintOptions::compact())
}

/// The error a default-options parse of `text` produces.
pub fn parse_err(text: &str) -> ParseError {
    parse_err_with(text, ParseOptions::default())
}

pub fn parse_err_with(text: &str, options: ParseOptions) -> ParseError {
    let mut data = text.as_bytes().to_vec();
    let mut doc: Document = Document::new();
    doc.parse(&mut data, None, options)
        .expect_err("parse unexpectedly succeeded")
}

/// Encodes `text` as UTF-16 code units.
pub fn utf16_units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Encodes `text` as UTF-32 code units.
pub fn utf32_units(text: &str) -> Vec<u32> {
    text.chars().map(|c| c as u32).collect()
}

/// Encodes `text` as UTF-16 bytes in the given endianness.
pub fn utf16_bytes(text: &str, little_endian: bool) -> Vec<u8> {
    text.encode_utf16()
        .flat_map(|u| {
            if little_endian {
                u.to_le_bytes()
            } else {
                u.to_be_bytes()
            }
        })
        .collect()
}

/// Encodes `text` as UTF-32 bytes in the given endianness.
pub fn utf32_bytes(text: &str, little_endian: bool) -> Vec<u8> {
    text.chars()
        .flat_map(|c| {
            if little_endian {
                (c as u32).to_le_bytes()
            } else {
                (c as u32).to_be_bytes()
            }
        })
        .collect()
}

/// Walks the sibling list of `id` both ways and checks every linked-list
/// invariant: back-links, owner references and the maintained child count.
/// Recurses into child containers.
pub fn check_links<W: CodeUnit>(doc: &Document<'_, W>, id: NodeId) {
    let mut count = 0;
    let mut prev: Option<NodeId> = None;
    let mut cur = doc.first_child(id);
    while let Some(c) = cur {
        assert_eq!(doc.prev_sibling(c), prev, "broken back-link");
        assert_eq!(doc.owner(c), Some(id), "broken owner link");
        prev = Some(c);
        count += 1;
        if doc.kind(c).is_container() {
            check_links(doc, c);
        }
        cur = doc.next_sibling(c);
    }
    assert_eq!(doc.last_child(id), prev, "last_child out of sync");
    assert_eq!(doc.child_count(id), count, "child count out of sync");
    assert_eq!(doc.is_empty(id), count == 0);
}
