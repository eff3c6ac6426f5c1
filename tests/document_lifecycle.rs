use std::io::Cursor;

use arena_json::{from_reader_with_options, from_str, Document, ErrorKind, ParseOptions, Value};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn default_document_is_null_root() {
    let doc = Document::default();
    assert!(doc.is_null());
    assert!(!doc.has_parse_error());
    assert_eq!(doc.to_string(), "null");
}

#[rstest]
#[case("", ErrorKind::DocumentEmpty)]
#[case("  \n", ErrorKind::DocumentEmpty)]
#[case("{\"a\": 1", ErrorKind::UnexpectedEof)]
#[case("{\"a\" 1}", ErrorKind::Syntax)]
#[case("[1, 2,]", ErrorKind::Syntax)]
#[case("/* c */ 1", ErrorKind::Syntax)]
#[case("[1] x", ErrorKind::Syntax)]
fn parse_errors_are_recorded(#[case] text: &str, #[case] kind: ErrorKind) {
    let mut doc = Document::new();
    doc.parse(text);
    assert!(doc.has_parse_error());
    assert!(doc.is_null());
    assert_eq!(doc.parse_error().map(|err| err.kind), Some(kind));
}

#[rstest]
fn parse_error_reports_line_and_column() {
    let mut doc = Document::new();
    doc.parse("{\n  \"a\": 1,\n  \"b\": tru\n}");
    let location = doc.parse_error().and_then(|err| err.location).unwrap();
    assert_eq!(location.line, 3);
    assert_eq!(location.column, 10);
}

#[rstest]
fn lenient_options_accept_comments_and_trailing_commas() {
    let text = "{\n  // satellites\n  \"sats\": [1, 2, 3,],\n  /* spare */\n}";
    let options = ParseOptions::new()
        .with_comments(true)
        .with_trailing_commas(true);
    let mut doc = Document::new();
    doc.parse_with(text, &options);
    assert!(!doc.has_parse_error());
    assert_eq!(doc.to_json(), json!({"sats": [1, 2, 3]}));
}

#[rstest]
fn parse_stream_reads_everything() {
    let doc = from_reader_with_options(Cursor::new(b"[1, 2.5, \"x\"]".to_vec()), &ParseOptions::new())
        .unwrap();
    assert_eq!(doc.size(), 3);
    assert!(doc[1].number().is_some_and(|n| n.is_f64()));
}

#[rstest]
fn reparse_replaces_previous_content() {
    let mut doc = from_str(r#"{"old": 1}"#).unwrap();
    let held = doc["old"].clone();
    doc.parse(r#"{"new": 2}"#);
    assert!(held.is_null());
    assert!(!doc.has_member("old"));
    assert_eq!(doc["new"].get_int(), 2);
}

#[rstest]
fn take_leaves_a_usable_null_document() {
    let mut a = from_str(r#"{"k": [1, 2]}"#).unwrap();
    let b = a.take();
    assert!(a.is_null());
    assert!(!a.has_parse_error());
    assert_eq!(b["k"].size(), 2);

    a.parse("[true]");
    assert!(a[0].is_true());
    assert_eq!(b.to_string(), r#"{"k":[1,2]}"#);
}

#[rstest]
fn clone_is_deep_and_keeps_number_kinds() {
    let mut original = from_str(r#"{"int": 3, "double": 3.0, "big": 18446744073709551615}"#).unwrap();
    original["int"] = Value::from(30);
    let copy = original.clone();

    original["double"].set_null();
    original.remove_member("big");

    assert_eq!(copy.to_string(), r#"{"int":30,"double":3.0,"big":18446744073709551615}"#);
    assert!(copy["big"].is_uint64());
    assert!(!copy["big"].is_int64());
    assert_eq!(copy.allocator().node_count(), 4);
}

#[rstest]
fn document_drop_invalidates_attached_values() {
    let held = {
        let doc = from_str(r#"{"a": {"b": [1]}}"#).unwrap();
        doc["a"].clone()
    };
    assert!(held.is_null());
    assert!(held["b"][0].is_null());
    assert_eq!(held.to_string(), "null");
}

#[rstest]
fn detached_root_replacement_through_deref() {
    let mut doc = from_str("[1]").unwrap();
    *doc.root_mut() = Value::from("detached");
    assert!(!doc.is_attached());
    assert_eq!(doc.get_string(), "detached");
}
