mod common;

use common::{check_links, with_parsed};
use jsonpool::{
    print_to_string, Document, Kind, ParseOptions, PrintOptions, StringStorage,
};

#[test]
fn factories_produce_detached_scalars() {
    let mut doc: Document = Document::new();

    let n = doc.new_null();
    assert_eq!(doc.kind(n), Kind::Null);
    assert_eq!(doc.as_string(n), b"null");

    let t = doc.new_bool(true);
    let f = doc.new_bool(false);
    assert_eq!(doc.as_string(t), b"true");
    assert_eq!(doc.as_string(f), b"false");
    assert!(doc.as_boolean(t));
    assert!(!doc.as_boolean(f));

    let s = doc.new_string(b"hello");
    assert_eq!(doc.kind(s), Kind::String);
    assert_eq!(doc.as_string(s), b"hello");

    for id in [n, t, f, s] {
        assert!(doc.owner(id).is_none());
        assert!(doc.name(id).is_empty());
    }
}

#[test]
fn number_factory_renders_canonically() {
    let mut doc: Document = Document::new();
    let cases: &[(f64, &[u8])] = &[
        (0.0, b"0"),
        (1.0, b"1"),
        (-50.0, b"-50"),
        (0.5, b"0.5"),
        (2.5e-13, b"0"),
        (1.0e12, b"1000000000000"),
        (5.0e13, b"5e13"),
        (7.5e-10, b"7.5e-10"),
    ];
    for &(value, text) in cases {
        let id = doc.new_number(value);
        assert_eq!(doc.kind(id), Kind::Number, "{value}");
        assert_eq!(doc.as_string(id), text, "{value}");
    }
}

#[test]
fn non_finite_numbers_become_strings() {
    let mut doc: Document = Document::new();

    let inf = doc.new_number(f64::INFINITY);
    assert_eq!(doc.kind(inf), Kind::String);
    assert_eq!(doc.as_string(inf), b"Inf");

    let ninf = doc.new_number(f64::NEG_INFINITY);
    assert_eq!(doc.kind(ninf), Kind::String);
    assert_eq!(doc.as_string(ninf), b"-Inf");

    let nan = doc.new_number(f64::NAN);
    assert_eq!(doc.kind(nan), Kind::String);
    assert_eq!(doc.as_string(nan), b"NaN");

    // They print as strings, so the output is still legal JSON.
    let root = doc.root();
    doc.object_set(root, b"x", inf).unwrap();
    assert_eq!(
        print_to_string(&doc, PrintOptions::compact()),
        r#"{"x":"Inf"}"#
    );
}

#[test]
fn string_coercions() {
    with_parsed(
        r#"{"n":"12.5","t":"true","junk":"hello","e":""}"#,
        ParseOptions::default(),
        |doc| {
            let root = doc.root_value();
            assert_eq!(root.member(b"n").as_number(), 12.5);
            assert!(root.member(b"n").as_boolean());
            assert_eq!(root.member(b"t").as_number(), 1.0);
            assert!(root.member(b"t").as_boolean());
            assert_eq!(root.member(b"junk").as_number(), 0.0);
            assert!(!root.member(b"junk").as_boolean());
            assert!(!root.member(b"e").as_boolean());
        },
    );
}

#[test]
fn containers_have_empty_text() {
    with_parsed(r#"{"a":[1]}"#, ParseOptions::default(), |doc| {
        assert!(doc.as_string(doc.root()).is_empty());
        let a = doc.member(doc.root(), b"a");
        assert!(doc.as_string(a).is_empty());
        assert_eq!(doc.as_number(a), 0.0);
    });
}

#[test]
fn clear_releases_dynamic_blocks() {
    // A tiny pool forces dynamic blocks immediately.
    let mut doc: Document = Document::with_pool_sizes(0, 64);
    let root = doc.root();
    for i in 0..1000 {
        let s = doc.new_string(b"some text that occupies pool space");
        let arr_name = [b'k', b'0' + (i % 10) as u8];
        let _ = doc.object_set(root, &arr_name, s);
    }
    assert!(doc.dynamic_pool_blocks() > 0);
    doc.clear();
    assert_eq!(doc.dynamic_pool_blocks(), 0);
    assert!(doc.root_value().is_object());
    assert!(doc.root_value().is_empty());

    // The document is fully usable after clear.
    let v = doc.new_number(1.0);
    let root = doc.root();
    doc.object_set(root, b"fresh", v).unwrap();
    assert_eq!(
        print_to_string(&doc, PrintOptions::compact()),
        r#"{"fresh":1}"#
    );
}

#[test]
fn pool_configurations_all_work() {
    for (st, dy) in [(0, 0), (0, 1024), (1024, 0), (64, 64)] {
        let mut doc: Document = Document::with_pool_sizes(st, dy);
        let root = doc.root();
        for i in 0..200u32 {
            let n = doc.new_number(f64::from(i));
            let name = format!("k{i}");
            doc.object_set(root, name.as_bytes(), n).unwrap();
        }
        check_links(&doc, root);
        assert_eq!(doc.child_count(root), 200);
        assert_eq!(doc.root_value().member(b"k199").as_number(), 199.0);
    }
}

#[test]
fn default_parse_terminates_values_in_buffer() {
    // The destructive default writes a NUL one past each in-buffer value.
    let mut data = br#"{"a":12, "b":"xy"}"#.to_vec();
    {
        let mut doc: Document = Document::new();
        doc.parse(&mut data, None, ParseOptions::default()).unwrap();
        assert_eq!(doc.root_value().member(b"a").as_number(), 12.0);
    }
    // `12` sat at bytes 5..7; the separator cell after it is now NUL.
    assert_eq!(&data[5..8], b"12\0");
    // `xy` had its closing quote overwritten.
    assert!(data.contains(&0));
}

#[test]
fn borrow_mode_without_escapes_leaves_buffer_untouched() {
    let original = br#"{"plain":"text","n":42}"#.to_vec();
    let mut data = original.clone();
    let mut doc: Document = Document::new();
    let opts = ParseOptions {
        strings: StringStorage::Borrow,
        ..ParseOptions::default()
    };
    doc.parse(&mut data, None, opts).unwrap();
    assert_eq!(doc.root_value().member(b"plain").as_string(), b"text");
    drop(doc);
    assert_eq!(data, original);
}

#[test]
fn borrow_mode_translates_escaped_text_in_place() {
    // Without copy_translated, escaped strings are still rewritten into
    // the buffer (destructively) while unescaped ones are borrowed.
    let mut data = br#"{"esc":"a\nb"}"#.to_vec();
    let before = data.clone();
    let mut doc: Document = Document::new();
    let opts = ParseOptions {
        strings: StringStorage::Borrow,
        ..ParseOptions::default()
    };
    doc.parse(&mut data, None, opts).unwrap();
    assert_eq!(doc.root_value().member(b"esc").as_string(), b"a\nb");
    drop(doc);
    assert_ne!(data, before);
}

#[test]
fn non_destructive_preset_guarantees_byte_identity() {
    let original = br#"{"esc":"a\u0020b","plain":"zz","n":-1.25e2}"#.to_vec();
    let mut data = original.clone();
    let mut doc: Document = Document::new();
    doc.parse(&mut data, None, ParseOptions::non_destructive())
        .unwrap();
    // The \u0020 escape decodes to a plain space, in a pool copy.
    assert_eq!(doc.root_value().member(b"esc").as_string(), b"a b");
    assert_eq!(doc.root_value().member(b"plain").as_string(), b"zz");
    assert_eq!(doc.root_value().member(b"n").as_number(), -125.0);
    drop(doc);
    assert_eq!(data, original);
}

#[test]
fn copy_mode_survives_buffer_reuse_semantics() {
    // With everything copied, the tree never references the buffer, so
    // values stay valid however the caller mangles it afterwards. (The
    // borrow still pins the buffer; this exercises the storage choice.)
    let mut data = br#"{"k":"value","n":7}"#.to_vec();
    let mut doc: Document = Document::new();
    doc.parse(&mut data, None, ParseOptions::non_destructive_terminated())
        .unwrap();
    assert_eq!(doc.root_value().member(b"k").as_string(), b"value");
    assert_eq!(doc.root_value().member(b"n").as_number(), 7.0);
}

#[test]
fn readonly_parse_of_static_data() {
    // A shared borrow is enough for the read-only entry.
    static TEXT: &[u8] = br#"{"version":[1,2,3]}"#;
    let mut doc: Document = Document::new();
    doc.parse_readonly(TEXT, None, ParseOptions::default()).unwrap();
    assert_eq!(doc.root_value().member(b"version").child_count(), 3);
}

#[test]
fn parse_invariants_hold_for_every_storage_mode() {
    let text = r#"{"a":[1,{"b":"c\td"},[]],"e":{},"f":"plain"}"#;
    for opts in [
        ParseOptions::default(),
        ParseOptions {
            strings: StringStorage::Borrow,
            ..ParseOptions::default()
        },
        ParseOptions::non_destructive(),
        ParseOptions::non_destructive_terminated(),
        ParseOptions {
            copy_translated: true,
            ..ParseOptions::default()
        },
    ] {
        let mut data = text.as_bytes().to_vec();
        let mut doc: Document = Document::new();
        doc.parse(&mut data, None, opts).unwrap();
        check_links(&doc, doc.root());
        assert_eq!(
            print_to_string(&doc, PrintOptions::compact()),
            r#"{"a":[1,{"b":"c\td"},[]],"e":{},"f":"plain"}"#
        );
    }
}
