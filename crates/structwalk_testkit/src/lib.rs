//! Shared test helpers for workspace crates.

use std::collections::BTreeMap;
use std::sync::Arc;

use quickcheck::{Arbitrary, Gen};
use structwalk::walk::{NodeKind, RecordShape, Value, Visit, Walkable, walk};

/// Maximum nesting generated for [`ArbValue`].
pub const MAX_DEPTH: usize = 4;

/// One recorded visitor invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
	/// Path segments rendered individually.
	pub path: Vec<String>,
	/// Declared kind of the visited value.
	pub kind: NodeKind,
	/// Length of the branch handed to the visitor.
	pub branch_len: usize,
	/// Field key when the parent is a record.
	pub field_key: Option<String>,
}

/// Visitor that records every invocation in order.
#[derive(Debug, Default)]
pub struct Recorder {
	/// Recorded invocations.
	pub events: Vec<Event>,
}

impl Recorder {
	/// Record one visit.
	pub fn record(&mut self, visit: &Visit<'_, '_>) {
		self.events.push(Event {
			path: visit.path().iter().map(ToString::to_string).collect(),
			kind: visit.kind(),
			branch_len: visit.branch().len(),
			field_key: visit.field().map(|field| field.key().to_owned()),
		});
	}

	/// Paths joined with `/`, in visit order.
	pub fn joined_paths(&self) -> Vec<String> {
		self.events.iter().map(|event| event.path.join("/")).collect()
	}
}

/// Walk `root` and return the recorded events.
pub fn record_walk(root: &dyn Walkable) -> Vec<Event> {
	let mut recorder = Recorder::default();
	walk(root, |visit| recorder.record(visit));
	recorder.events
}

/// Number of visitor calls a walk of `value` must produce.
///
/// Computed directly from the tree: every child counts once unless it
/// resolves to an absent reference.
pub fn expected_visits(value: &Value) -> usize {
	match value {
		Value::Array(items) => items.iter().map(child_visits).sum(),
		Value::Map(entries) => entries.values().map(child_visits).sum(),
		Value::Struct(item) => item.values().iter().map(child_visits).sum(),
		Value::Ref(Some(target)) | Value::Any(target) => expected_visits(target),
		_ => 0,
	}
}

fn child_visits(child: &Value) -> usize {
	if is_absent(child) { 0 } else { 1 + expected_visits(child) }
}

fn is_absent(value: &Value) -> bool {
	match value {
		Value::Ref(None) => true,
		Value::Ref(Some(target)) | Value::Any(target) => is_absent(target),
		_ => false,
	}
}

/// Randomly generated [`Value`] tree for property tests.
#[derive(Debug, Clone)]
pub struct ArbValue(pub Value);

impl Arbitrary for ArbValue {
	fn arbitrary(g: &mut Gen) -> Self {
		Self(gen_value(g, MAX_DEPTH))
	}
}

/// Generates a random number in the range [min, max] inclusive.
fn gen_range(g: &mut Gen, min: usize, max: usize) -> usize {
	min + (usize::arbitrary(g) % (max - min + 1))
}

/// Generates a random leaf value.
fn gen_scalar(g: &mut Gen) -> Value {
	match gen_range(g, 0, 5) {
		0 => Value::Null,
		1 => Value::Bool(bool::arbitrary(g)),
		2 => Value::I64(i64::arbitrary(g)),
		3 => Value::U64(u64::arbitrary(g)),
		4 => Value::String(format!("s{}", u8::arbitrary(g)).into_boxed_str()),
		_ => Value::Bytes(Vec::<u8>::arbitrary(g)),
	}
}

/// Generates a map key, sometimes one that needs quoting in path text.
fn gen_key(g: &mut Gen, idx: usize) -> String {
	match gen_range(g, 0, 4) {
		0 => format!("k.{idx}"),
		1 => format!("k {idx}\""),
		2 if idx == 0 => String::new(),
		3 => idx.to_string(),
		_ => format!("k{idx}"),
	}
}

/// Generates a random value; `depth` bounds container nesting.
fn gen_value(g: &mut Gen, depth: usize) -> Value {
	if depth == 0 {
		return gen_scalar(g);
	}

	match gen_range(g, 0, 6) {
		0 => gen_scalar(g),
		1 => Value::Array((0..gen_range(g, 0, 4)).map(|_| gen_value(g, depth - 1)).collect()),
		2 => {
			let entries = (0..gen_range(g, 0, 4))
				.map(|idx| (gen_key(g, idx), gen_value(g, depth - 1)))
				.collect::<BTreeMap<_, _>>();
			Value::Map(entries)
		}
		3 => {
			let count = gen_range(g, 1, 4);
			let shape = (0..count).fold(RecordShape::new("Gen"), |shape, idx| shape.field(&format!("Field{idx}")));
			let values = (0..count).map(|_| gen_value(g, depth - 1)).collect();
			match Value::record(&Arc::new(shape), values) {
				Ok(value) => value,
				Err(err) => panic!("generated record is consistent: {err}"),
			}
		}
		4 => {
			if bool::arbitrary(g) {
				Value::null_ref()
			} else {
				Value::some_ref(gen_value(g, depth - 1))
			}
		}
		_ => Value::any(gen_value(g, depth - 1)),
	}
}
