use std::borrow::Cow;
use std::fmt;

use crate::walk::{FieldDescriptor, RecordShape};

/// Capability for exposing a value's structure to the traversal engine.
///
/// Implementations report their kind once per call through [`Walkable::node`];
/// the engine never inspects values any other way. Std containers, scalars,
/// [`serde_json::Value`] and the dynamic [`crate::walk::Value`] implement it,
/// and [`crate::record!`] derives it for plain structs.
pub trait Walkable {
	/// Structural view of this value.
	fn node(&self) -> Node<'_>;

	/// Concrete type name, used for diagnostics and reference identity.
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// Closed set of structural kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// Named, ordered fields.
	Record,
	/// Index-addressed elements.
	Sequence,
	/// Key-addressed entries.
	Map,
	/// Optional indirection.
	Reference,
	/// Type-erased wrapper around one concrete value.
	Polymorphic,
	/// Leaf value.
	Scalar,
	/// Unrecognized kind, treated as a leaf.
	Opaque,
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Record => "record",
			Self::Sequence => "sequence",
			Self::Map => "map",
			Self::Reference => "reference",
			Self::Polymorphic => "polymorphic",
			Self::Scalar => "scalar",
			Self::Opaque => "opaque",
		};
		f.write_str(name)
	}
}

/// Borrowed view of a leaf value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
	/// Explicit null or unit.
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed integer.
	I64(i64),
	/// Unsigned integer.
	U64(u64),
	/// Floating point.
	F64(f64),
	/// Single character.
	Char(char),
	/// UTF-8 text.
	Str(&'a str),
	/// Opaque bytes.
	Bytes(&'a [u8]),
}

/// Structural view of one value, produced by [`Walkable::node`].
pub enum Node<'a> {
	/// Record fields in declaration order.
	Record(Fields<'a>),
	/// Sequence elements in index order.
	Sequence(Elements<'a>),
	/// Map entries in container order.
	Map(Entries<'a>),
	/// Indirection; `None` when absent.
	Reference(Option<&'a dyn Walkable>),
	/// Type-erased wrapper around the held value.
	Polymorphic(&'a dyn Walkable),
	/// Leaf.
	Scalar(Scalar<'a>),
	/// Unsupported kind; never descended.
	Opaque,
}

impl<'a> Node<'a> {
	/// Record node pairing `shape` fields with `values` in order.
	pub fn record<I>(shape: &'a RecordShape, values: I) -> Self
	where
		I: IntoIterator<Item = &'a dyn Walkable>,
		I::IntoIter: 'a,
	{
		Self::Record(Fields {
			shape,
			index: 0,
			values: Box::new(values.into_iter()),
		})
	}

	/// Sequence node over `items`.
	pub fn sequence<I>(items: I) -> Self
	where
		I: IntoIterator<Item = &'a dyn Walkable>,
		I::IntoIter: 'a,
	{
		Self::Sequence(Elements {
			index: 0,
			items: Box::new(items.into_iter()),
		})
	}

	/// Map node over `(key, value)` entries.
	pub fn map<I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (Cow<'a, str>, &'a dyn Walkable)>,
		I::IntoIter: 'a,
	{
		Self::Map(Entries {
			entries: Box::new(entries.into_iter()),
		})
	}

	/// Kind tag for this node.
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Record(_) => NodeKind::Record,
			Self::Sequence(_) => NodeKind::Sequence,
			Self::Map(_) => NodeKind::Map,
			Self::Reference(_) => NodeKind::Reference,
			Self::Polymorphic(_) => NodeKind::Polymorphic,
			Self::Scalar(_) => NodeKind::Scalar,
			Self::Opaque => NodeKind::Opaque,
		}
	}
}

impl fmt::Debug for Node<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Record(fields) => f.debug_tuple("Record").field(&fields.shape().type_name()).finish(),
			Self::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
			Self::Reference(target) => f.debug_tuple("Reference").field(&target.map(|item| item.type_name())).finish(),
			Self::Polymorphic(inner) => f.debug_tuple("Polymorphic").field(&inner.type_name()).finish(),
			other => write!(f, "{:?}", other.kind()),
		}
	}
}

/// Record field iterator yielding descriptors with their values.
///
/// Iteration stops at the shorter of the shape's field table and the value list.
pub struct Fields<'a> {
	shape: &'a RecordShape,
	index: usize,
	values: Box<dyn Iterator<Item = &'a dyn Walkable> + 'a>,
}

impl<'a> Fields<'a> {
	/// Field table of the record being iterated.
	pub fn shape(&self) -> &'a RecordShape {
		self.shape
	}
}

impl<'a> Iterator for Fields<'a> {
	type Item = (&'a FieldDescriptor, &'a dyn Walkable);

	fn next(&mut self) -> Option<Self::Item> {
		let field = self.shape.fields().get(self.index)?;
		let value = self.values.next()?;
		self.index += 1;
		Some((field, value))
	}
}

/// Sequence element iterator yielding `(index, value)`.
pub struct Elements<'a> {
	index: usize,
	items: Box<dyn Iterator<Item = &'a dyn Walkable> + 'a>,
}

impl<'a> Iterator for Elements<'a> {
	type Item = (usize, &'a dyn Walkable);

	fn next(&mut self) -> Option<Self::Item> {
		let item = self.items.next()?;
		let index = self.index;
		self.index += 1;
		Some((index, item))
	}
}

/// Map entry iterator yielding `(key, value)` in container order.
pub struct Entries<'a> {
	entries: Box<dyn Iterator<Item = (Cow<'a, str>, &'a dyn Walkable)> + 'a>,
}

impl<'a> Iterator for Entries<'a> {
	type Item = (Cow<'a, str>, &'a dyn Walkable);

	fn next(&mut self) -> Option<Self::Item> {
		self.entries.next()
	}
}

/// Node of `value` after unwrapping present references and polymorphic wrappers.
///
/// Returns `None` when an absent reference is reached or when the chain of
/// references and wrappers leads back to a value it already passed through.
pub fn resolve_node<'a>(value: &'a dyn Walkable) -> Option<Node<'a>> {
	match unwrap_node(value) {
		Unwrapped::Node(node) => Some(node),
		Unwrapped::Absent | Unwrapped::Loop => None,
	}
}

/// Outcome of following references and wrappers from one location.
pub(crate) enum Unwrapped<'a> {
	Absent,
	Loop,
	Node(Node<'a>),
}

pub(crate) fn unwrap_node<'a>(value: &'a dyn Walkable) -> Unwrapped<'a> {
	let mut current = value;
	let mut chain = Vec::new();
	loop {
		let target = match current.node() {
			Node::Reference(None) => return Unwrapped::Absent,
			Node::Reference(Some(target)) | Node::Polymorphic(target) => target,
			node => return Unwrapped::Node(node),
		};
		chain.push(Identity::of(current));
		if chain.contains(&Identity::of(target)) {
			return Unwrapped::Loop;
		}
		current = target;
	}
}

/// Address plus concrete type of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Identity {
	addr: usize,
	type_name: &'static str,
}

impl Identity {
	pub(crate) fn of(value: &dyn Walkable) -> Self {
		Self {
			addr: std::ptr::from_ref(value).cast::<()>() as usize,
			type_name: value.type_name(),
		}
	}

	/// Identity usable across sibling locations.
	///
	/// Zero-sized values share addresses and cannot close a cycle.
	pub(crate) fn tracked(value: &dyn Walkable) -> Option<Self> {
		if std::mem::size_of_val(value) == 0 {
			return None;
		}
		Some(Self::of(value))
	}
}
