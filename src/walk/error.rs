use thiserror::Error;

use crate::walk::{FieldPath, NodeKind};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, WalkError>;

/// Errors produced by bounded traversal, path parsing, and path resolution.
///
/// Plain [`crate::walk::walk`] never produces these.
#[derive(Debug, Error)]
pub enum WalkError {
	/// Descent exceeded the configured depth limit.
	#[error("walk depth exceeded (max={max_depth}) at `{path}`")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: usize,
		/// Path of the child that would have exceeded it.
		path: FieldPath,
	},
	/// A reference pointed back at a value on the active descent chain.
	#[error("reference cycle detected at `{path}`")]
	Cycle {
		/// Path of the reference closing the cycle.
		path: FieldPath,
	},
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original path string.
		path: String,
	},
	/// No child matched a path segment.
	#[error("path step {step} not found: {segment}")]
	MissingSegment {
		/// Zero-based step index.
		step: usize,
		/// Rendered segment that failed to match.
		segment: String,
	},
	/// Path resolution crossed an absent reference.
	#[error("path step {step} crossed an absent reference")]
	AbsentReference {
		/// Zero-based step index.
		step: usize,
	},
	/// Path resolution followed references that lead back to themselves.
	#[error("path step {step} crossed a reference loop")]
	ReferenceLoop {
		/// Zero-based step index.
		step: usize,
	},
	/// Path resolution tried to step into a leaf.
	#[error("path step {step} reached a {kind} value")]
	NotAContainer {
		/// Zero-based step index.
		step: usize,
		/// Kind of the value that has no children.
		kind: NodeKind,
	},
	/// Dynamic record values did not match their shape.
	#[error("record {type_name} expects {expected} fields, got {got}")]
	ShapeMismatch {
		/// Record type name.
		type_name: String,
		/// Field count declared by the shape.
		expected: usize,
		/// Value count supplied.
		got: usize,
	},
}
