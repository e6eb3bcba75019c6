use std::borrow::Cow;

use serde_json::Value as JsonValue;

use crate::walk::{Node, Scalar, Walkable};

impl Walkable for JsonValue {
	fn node(&self) -> Node<'_> {
		match self {
			JsonValue::Null => Node::Scalar(Scalar::Null),
			JsonValue::Bool(value) => Node::Scalar(Scalar::Bool(*value)),
			JsonValue::Number(number) => {
				if let Some(value) = number.as_u64() {
					Node::Scalar(Scalar::U64(value))
				} else if let Some(value) = number.as_i64() {
					Node::Scalar(Scalar::I64(value))
				} else {
					number.as_f64().map_or(Node::Opaque, |value| Node::Scalar(Scalar::F64(value)))
				}
			}
			JsonValue::String(value) => Node::Scalar(Scalar::Str(value)),
			JsonValue::Array(items) => Node::sequence(items.iter().map(|item| item as &dyn Walkable)),
			JsonValue::Object(entries) => Node::map(entries.iter().map(|(key, value)| (Cow::Borrowed(key.as_str()), value as &dyn Walkable))),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use crate::walk::{FieldPath, Node, Scalar, collect_leaves, lookup, resolve_node};

	#[test]
	fn json_documents_walk_objects_and_arrays() {
		let doc = json!({
			"name": "x",
			"tags": ["a", "b"],
			"meta": null,
			"size": -4,
		});

		let mut leaves = collect_leaves(&doc)
			.into_iter()
			.map(|(path, scalar)| (path.to_string(), scalar))
			.collect::<Vec<_>>();
		leaves.sort_by(|left, right| left.0.cmp(&right.0));

		assert_eq!(
			leaves,
			vec![
				("meta".to_owned(), Scalar::Null),
				("name".to_owned(), Scalar::Str("x")),
				("size".to_owned(), Scalar::I64(-4)),
				("tags[0]".to_owned(), Scalar::Str("a")),
				("tags[1]".to_owned(), Scalar::Str("b")),
			]
		);
	}

	#[test]
	fn json_lookup_matches_object_keys() {
		let doc = json!({ "items": [{ "id": 7 }] });
		let path = FieldPath::parse("items[0].id").expect("path parses");
		let found = lookup(&doc, &path).expect("value exists");
		assert!(matches!(resolve_node(found), Some(Node::Scalar(Scalar::U64(7)))));
	}
}
