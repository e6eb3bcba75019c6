use crate::walk::node::{Unwrapped, unwrap_node};
use crate::walk::{FieldPath, Node, Result, WalkError, Walkable};

/// Value at `path` below `root`, or `None` when any step fails.
pub fn lookup<'a>(root: &'a dyn Walkable, path: &FieldPath) -> Option<&'a dyn Walkable> {
	resolve_path(root, path).ok()
}

/// Value at `path` below `root`.
///
/// Steps unwrap references and polymorphic wrappers the same way the walk
/// does, so any path reported to a visitor resolves back to the visited
/// value. Field segments match record keys and map keys; index segments
/// match sequence positions and decimal map keys.
pub fn resolve_path<'a>(root: &'a dyn Walkable, path: &FieldPath) -> Result<&'a dyn Walkable> {
	let mut current = root;

	for (step, segment) in path.segments().iter().enumerate() {
		let node = match unwrap_node(current) {
			Unwrapped::Node(node) => node,
			Unwrapped::Absent => return Err(WalkError::AbsentReference { step }),
			Unwrapped::Loop => return Err(WalkError::ReferenceLoop { step }),
		};

		let next = match node {
			Node::Record(mut fields) => fields.find(|(field, _)| segment.matches_key(field.key())).map(|(_, value)| value),
			Node::Sequence(mut items) => segment.as_index().and_then(|index| items.nth(index)).map(|(_, value)| value),
			Node::Map(mut entries) => entries.find(|(key, _)| segment.matches_key(key)).map(|(_, value)| value),
			other => {
				return Err(WalkError::NotAContainer { step, kind: other.kind() });
			}
		};

		current = next.ok_or_else(|| WalkError::MissingSegment {
			step,
			segment: segment.to_string(),
		})?;
	}

	Ok(current)
}
