use crate::walk::{FieldPath, Scalar, Walkable, walk};

/// Paths of every visited value, in visit order.
pub fn collect_paths(root: &dyn Walkable) -> Vec<FieldPath> {
	let mut out = Vec::new();
	walk(root, |visit| out.push(visit.to_path()));
	out
}

/// Paths and leaf views of every visited scalar, in visit order.
pub fn collect_leaves<'a>(root: &'a dyn Walkable) -> Vec<(FieldPath, Scalar<'a>)> {
	let mut out = Vec::new();
	walk(root, |visit| {
		if let Some(scalar) = visit.scalar() {
			out.push((visit.to_path(), scalar));
		}
	});
	out
}
