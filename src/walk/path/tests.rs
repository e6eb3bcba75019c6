use std::sync::Arc;

use crate::walk::{FieldPath, PathSegment, WalkError};

fn field(name: &str) -> PathSegment {
	PathSegment::Field(Arc::from(name))
}

#[test]
fn parse_fields_and_indices() {
	let path = FieldPath::parse("items[0].name").expect("path parses");
	assert_eq!(path.segments(), &[field("items"), PathSegment::Index(0), field("name")]);
	assert_eq!(path.to_string(), "items[0].name");
}

#[test]
fn parse_leading_index_for_sequence_roots() {
	let path = FieldPath::parse("[2][1].tags").expect("path parses");
	assert_eq!(path.segments(), &[PathSegment::Index(2), PathSegment::Index(1), field("tags")]);
	assert_eq!(path.to_string(), "[2][1].tags");
}

#[test]
fn parse_rejects_malformed_input() {
	for input in ["", ".a", "a.", "a..b", "a[", "a[x]", "a[1", "a.[0]", "a b"] {
		assert!(
			matches!(FieldPath::parse(input), Err(WalkError::InvalidFieldPath { .. })),
			"expected {input:?} to be rejected"
		);
	}
}

#[test]
fn join_renders_segments_individually() {
	let path = FieldPath::from_segments(vec![field("items"), PathSegment::Index(1), PathSegment::Key(Arc::from("a/b"))]);
	assert_eq!(path.join("/"), "items/1/a/b");
	assert_eq!(path.to_json_pointer(), "/items/1/a~1b");
}

#[test]
fn segments_match_by_rendered_text() {
	assert!(PathSegment::Index(3).matches_key("3"));
	assert!(field("3").matches_key("3"));
	assert_eq!(field("3").as_index(), Some(3));
	assert_eq!(field("x").as_index(), None);
}

#[test]
fn parent_drops_last_segment() {
	let path = FieldPath::parse("a.b[1]").expect("path parses");
	assert_eq!(path.parent().map(|item| item.to_string()), Some("a.b".to_owned()));
	assert!(FieldPath::root().parent().is_none());
}

#[test]
fn serializes_as_segment_array() {
	let path = FieldPath::parse("tags[1]").expect("path parses");
	let json = serde_json::to_value(&path).expect("path serializes");
	assert_eq!(json, serde_json::json!(["tags", 1]));
}

fn key(text: &str) -> PathSegment {
	PathSegment::Key(Arc::from(text))
}

#[test]
fn keys_outside_bare_syntax_render_quoted() {
	let path = FieldPath::from_segments(vec![field("labels"), key("a.b"), key(""), PathSegment::Index(0), key(r#"say "hi"\"#)]);
	assert_eq!(path.to_string(), r#"labels["a.b"][""][0]["say \"hi\"\\"]"#);
}

#[test]
fn quoted_keys_parse_back_to_one_segment() {
	for text in ["a.b", "", "ID,omitempty", "two words", "[0]", r#"q"\"#, "ünï.code"] {
		let path = FieldPath::from_segments(vec![field("root"), key(text)]);
		let reparsed = FieldPath::parse(&path.to_string()).unwrap_or_else(|err| panic!("{path} should parse: {err}"));
		assert_eq!(reparsed.segments(), &[field("root"), key(text)], "{path}");
	}

	let leading = FieldPath::parse(r#"["a b"].c"#).expect("leading quoted key parses");
	assert_eq!(leading.segments(), &[key("a b"), field("c")]);
}

#[test]
fn parse_rejects_malformed_quoted_keys() {
	for input in [r#"a[""#, r#"a["x"#, r#"a["x"x]"#, r#"a.["x"]"#, r#"a["x\"]"#] {
		assert!(
			matches!(FieldPath::parse(input), Err(WalkError::InvalidFieldPath { .. })),
			"expected {input:?} to be rejected"
		);
	}
}
