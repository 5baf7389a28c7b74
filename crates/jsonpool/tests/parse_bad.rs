mod common;

use common::{parse_err, parse_err_with};
use jsonpool::{Document, ErrorKind, ParseOptions};

#[test]
fn empty_and_non_container_roots() {
    assert_eq!(parse_err("").kind, ErrorKind::UnexpectedStart);
    assert_eq!(parse_err("   ").kind, ErrorKind::UnexpectedStart);
    assert_eq!(parse_err("42").kind, ErrorKind::UnexpectedStart);
    assert_eq!(parse_err("\"str\"").kind, ErrorKind::UnexpectedStart);
    assert_eq!(parse_err("true").kind, ErrorKind::UnexpectedStart);
}

#[test]
fn trailing_content() {
    // The second root starts at byte 3.
    let err = parse_err("{} {}");
    assert_eq!(err.kind, ErrorKind::UnexpectedTrailing);
    assert_eq!(err.offset, 3);

    let err = parse_err("[1]2");
    assert_eq!(err.kind, ErrorKind::UnexpectedTrailing);
    assert_eq!(err.offset, 3);
}

#[test]
fn trailing_comma_without_the_option() {
    let err = parse_err("[1,]");
    assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    assert_eq!(err.offset, 3);

    let err = parse_err(r#"{"a":1,}"#);
    assert_eq!(err.kind, ErrorKind::ExpectedName);
}

#[test]
fn comment_without_the_option() {
    let err = parse_err("[1, /* two */ 2]");
    assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    assert_eq!(err.offset, 4);
}

#[test]
fn misspelled_literals() {
    assert_eq!(parse_err("[tru]").kind, ErrorKind::UnexpectedToken);
    assert_eq!(parse_err("[flase]").kind, ErrorKind::UnexpectedToken);
    assert_eq!(parse_err("[nul]").kind, ErrorKind::UnexpectedToken);
    assert_eq!(parse_err("[TRUE]").kind, ErrorKind::UnexpectedToken);
}

#[test]
fn object_member_errors() {
    assert_eq!(parse_err("{1:2}").kind, ErrorKind::ExpectedName);
    assert_eq!(parse_err(r#"{"a" 1}"#).kind, ErrorKind::ExpectedColon);
    assert_eq!(parse_err(r#"{"a":1 "b":2}"#).kind, ErrorKind::ExpectedSeparator);
    assert_eq!(parse_err(r#"{"a":}"#).kind, ErrorKind::UnexpectedToken);
    assert_eq!(parse_err(r#"{"a":1"#).kind, ErrorKind::ExpectedSeparator);
}

#[test]
fn array_separator_errors() {
    assert_eq!(parse_err("[1 2]").kind, ErrorKind::ExpectedSeparator);
    assert_eq!(parse_err("[1").kind, ErrorKind::ExpectedSeparator);
    assert_eq!(parse_err("[,1]").kind, ErrorKind::UnexpectedToken);
}

#[test]
fn leading_zero_terminates_the_number() {
    // `0` is a complete number, so the `1` right after it is a missing
    // separator at byte 2.
    let err = parse_err("[0123]");
    assert_eq!(err.kind, ErrorKind::ExpectedSeparator);
    assert_eq!(err.offset, 2);
}

#[test]
fn number_digit_errors() {
    assert_eq!(parse_err("[-]").kind, ErrorKind::ExpectedDigit);
    assert_eq!(parse_err("[1.]").kind, ErrorKind::ExpectedDigit);
    assert_eq!(parse_err("[1.e5]").kind, ErrorKind::ExpectedDigit);
    assert_eq!(parse_err("[1e]").kind, ErrorKind::ExpectedDigit);
    assert_eq!(parse_err("[1e+]").kind, ErrorKind::ExpectedDigit);
    // A leading point is routed into the number scanner for this sharper
    // diagnostic, then rejected.
    assert_eq!(parse_err("[.5]").kind, ErrorKind::ExpectedDigit);
}

#[test]
fn string_termination_errors() {
    assert_eq!(parse_err(r#"["abc"#).kind, ErrorKind::UnterminatedString);
    assert_eq!(parse_err("[\"a\0b\"]").kind, ErrorKind::UnterminatedString);
    assert_eq!(parse_err(r#"{"a"#).kind, ErrorKind::UnterminatedString);
}

#[test]
fn escape_errors() {
    assert_eq!(parse_err(r#"["\x"]"#).kind, ErrorKind::InvalidEscape);
    assert_eq!(parse_err(r#"["\"#).kind, ErrorKind::InvalidEscape);
    assert_eq!(parse_err(r#"["\u12"]"#).kind, ErrorKind::InvalidHex);
    assert_eq!(parse_err(r#"["\uZZZZ"]"#).kind, ErrorKind::InvalidHex);
}

#[test]
fn surrogate_errors() {
    // A lone high half: error is reported at the escape's backslash.
    let err = parse_err(r#"[ "\ud800" ]"#);
    assert_eq!(err.kind, ErrorKind::InvalidSurrogate);
    assert_eq!(err.offset, 3);

    // A lone low half.
    assert_eq!(parse_err(r#"["\udc00"]"#).kind, ErrorKind::InvalidSurrogate);
    // A high half followed by a non-surrogate escape.
    assert_eq!(
        parse_err(r#"["\ud834A"]"#).kind,
        ErrorKind::InvalidSurrogate
    );
    // A high half followed by plain text.
    assert_eq!(parse_err(r#"["\ud834abcd"]"#).kind, ErrorKind::InvalidSurrogate);
}

#[test]
fn malformed_utf8_content() {
    // Transcoding to a wider document decodes every sequence, so the bad
    // continuation byte is caught.
    let mut data = b"[\"\xc3\x28\"]".to_vec();
    let mut doc: jsonpool::Utf16Document = Document::new();
    let err = doc
        .parse(&mut data, Some(jsonpool::Encoding::Utf8), ParseOptions::default())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidEncoding);

    // A sequence truncated by the end of the buffer fails in any width.
    let mut data = b"[\"\xf0\x9d".to_vec();
    let mut doc: Document = Document::new();
    let err = doc
        .parse(&mut data, Some(jsonpool::Encoding::Utf8), ParseOptions::default())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidEncoding);
}

#[test]
fn errors_also_raised_in_measuring_modes() {
    // The copying modes route through the measuring scan; the same inputs
    // must fail identically there.
    for opts in [
        ParseOptions::non_destructive(),
        ParseOptions::non_destructive_terminated(),
    ] {
        assert_eq!(
            parse_err_with(r#"["\x"]"#, opts).kind,
            ErrorKind::InvalidEscape
        );
        assert_eq!(
            parse_err_with(r#"[ "\ud800" ]"#, opts).kind,
            ErrorKind::InvalidSurrogate
        );
        assert_eq!(
            parse_err_with(r#"["abc"#, opts).kind,
            ErrorKind::UnterminatedString
        );
    }
}

#[test]
fn document_resets_after_failure() {
    let mut data = b"[1, 2, oops]".to_vec();
    let mut doc: Document = Document::new();
    assert!(doc.parse(&mut data, None, ParseOptions::default()).is_err());
    // The failed parse leaves an empty object root behind.
    assert!(doc.root_value().is_object());
    assert!(doc.root_value().is_empty());
}

#[test]
fn error_display_mentions_offset() {
    let err = parse_err("{} {}");
    let msg = err.to_string();
    assert!(msg.contains("byte offset 3"), "{msg}");
}
