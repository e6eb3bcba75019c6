use crate::walk::{FieldDescriptor, RecordShape, field_key};

#[test]
fn default_key_lowercases_first_character_only() {
	assert_eq!(field_key("UserName", None), "userName");
	assert_eq!(field_key("URL", None), "uRL");
	assert_eq!(field_key("already", None), "already");
	assert_eq!(field_key("", None), "");
}

#[test]
fn default_key_handles_non_ascii_first_character() {
	assert_eq!(field_key("Ähnlich", None), "ähnlich");
}

#[test]
fn default_key_maps_first_character_to_a_single_character() {
	let key = field_key("İd", None);
	assert_eq!(key, "id");
	assert_eq!(key.chars().count(), 2);
}

#[test]
fn explicit_override_is_used_verbatim() {
	assert_eq!(field_key("UserId", Some("id")), "id");
	assert_eq!(field_key("UserId", Some("ID,omitempty")), "ID,omitempty");
}

#[test]
fn empty_or_suppressed_override_falls_back_to_default() {
	assert_eq!(field_key("UserName", Some("")), "userName");
	assert_eq!(field_key("UserName", Some("-")), "userName");
}

#[test]
fn descriptor_key_is_stable_across_calls() {
	let field = FieldDescriptor::with_override("Tags", None);
	assert_eq!(field.name(), "Tags");
	assert_eq!(field.rename(), None);
	assert_eq!(field.key(), "tags");
	assert_eq!(field.key(), field.clone().key());
}

#[test]
fn shape_finds_fields_by_key() {
	let shape = RecordShape::new("Account").field("Name").renamed("UserId", "id");

	assert_eq!(shape.type_name(), "Account");
	assert_eq!(shape.len(), 2);
	let (position, field) = shape.find("id").expect("renamed field is addressable by key");
	assert_eq!(position, 1);
	assert_eq!(field.name(), "UserId");
	assert!(shape.find("userId").is_none());
	assert!(shape.find("name").is_some());
}
