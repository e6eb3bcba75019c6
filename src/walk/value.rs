use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::walk::{Node, RecordShape, Result, Scalar, WalkError, Walkable};

/// Runtime value for data whose shape is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar.
	U64(u64),
	/// Floating point scalar.
	F64(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// Opaque byte payload.
	Bytes(Vec<u8>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Key-addressed entries.
	Map(BTreeMap<String, Value>),
	/// Record with a shared field table.
	Struct(StructValue),
	/// Nullable indirection.
	Ref(Option<Box<Value>>),
	/// Type-erased wrapper holding one concrete value.
	Any(Box<Value>),
}

impl Value {
	/// Present reference to `target`.
	pub fn some_ref(target: Value) -> Self {
		Self::Ref(Some(Box::new(target)))
	}

	/// Absent reference.
	pub fn null_ref() -> Self {
		Self::Ref(None)
	}

	/// Type-erased wrapper around `inner`.
	pub fn any(inner: Value) -> Self {
		Self::Any(Box::new(inner))
	}

	/// Record value checked against `shape`.
	pub fn record(shape: &Arc<RecordShape>, values: Vec<Value>) -> Result<Self> {
		StructValue::new(shape.clone(), values).map(Self::Struct)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into_boxed_str())
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(values: Vec<Value>) -> Self {
		Self::Array(values)
	}
}

/// Record value whose field table is shared by every instance of its type.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	shape: Arc<RecordShape>,
	values: Vec<Value>,
}

impl StructValue {
	/// Pair `values` with `shape` fields; counts must match.
	pub fn new(shape: Arc<RecordShape>, values: Vec<Value>) -> Result<Self> {
		if shape.len() != values.len() {
			return Err(WalkError::ShapeMismatch {
				type_name: shape.type_name().to_owned(),
				expected: shape.len(),
				got: values.len(),
			});
		}
		Ok(Self { shape, values })
	}

	/// Field table.
	pub fn shape(&self) -> &Arc<RecordShape> {
		&self.shape
	}

	/// Field values in declaration order.
	pub fn values(&self) -> &[Value] {
		&self.values
	}

	/// Value of the field whose key is `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		let (position, _) = self.shape.find(key)?;
		self.values.get(position)
	}
}

impl Walkable for StructValue {
	fn node(&self) -> Node<'_> {
		Node::record(&self.shape, self.values.iter().map(|value| value as &dyn Walkable))
	}

	fn type_name(&self) -> &'static str {
		"StructValue"
	}
}

impl Walkable for Value {
	fn node(&self) -> Node<'_> {
		match self {
			Self::Null => Node::Scalar(Scalar::Null),
			Self::Bool(value) => Node::Scalar(Scalar::Bool(*value)),
			Self::I64(value) => Node::Scalar(Scalar::I64(*value)),
			Self::U64(value) => Node::Scalar(Scalar::U64(*value)),
			Self::F64(value) => Node::Scalar(Scalar::F64(*value)),
			Self::String(value) => Node::Scalar(Scalar::Str(value)),
			Self::Bytes(value) => Node::Scalar(Scalar::Bytes(value)),
			Self::Array(items) => Node::sequence(items.iter().map(|item| item as &dyn Walkable)),
			Self::Map(entries) => Node::map(entries.iter().map(|(key, value)| (Cow::Borrowed(key.as_str()), value as &dyn Walkable))),
			Self::Struct(item) => item.node(),
			Self::Ref(target) => Node::Reference(target.as_deref().map(|value| value as &dyn Walkable)),
			Self::Any(inner) => Node::Polymorphic(&**inner),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use crate::walk::{NodeKind, RecordShape, Value, WalkError, Walkable};

	#[test]
	fn struct_value_rejects_mismatched_field_count() {
		let shape = Arc::new(RecordShape::new("Pair").field("Left").field("Right"));
		let err = Value::record(&shape, vec![Value::Null]).expect_err("one value for two fields");
		assert!(matches!(err, WalkError::ShapeMismatch { expected: 2, got: 1, .. }));
	}

	#[test]
	fn struct_value_get_uses_field_keys() {
		let shape = Arc::new(RecordShape::new("Account").field("Name").renamed("UserId", "id"));
		let Value::Struct(account) = Value::record(&shape, vec!["ada".into(), Value::U64(7)]).expect("record builds") else {
			panic!("expected struct value");
		};

		assert_eq!(account.get("name"), Some(&Value::from("ada")));
		assert_eq!(account.get("id"), Some(&Value::U64(7)));
		assert_eq!(account.get("Name"), None);
	}

	#[test]
	fn kinds_follow_variants() {
		assert_eq!(Value::Null.node().kind(), NodeKind::Scalar);
		assert_eq!(Value::null_ref().node().kind(), NodeKind::Reference);
		assert_eq!(Value::any(Value::Null).node().kind(), NodeKind::Polymorphic);
		assert_eq!(Value::Array(Vec::new()).node().kind(), NodeKind::Sequence);
		assert_eq!(Value::Bytes(vec![1, 2]).node().kind(), NodeKind::Scalar);
	}
}
