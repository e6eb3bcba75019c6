mod collect;
mod engine;
mod error;
mod field;
mod impls;
mod json;
mod lookup;
mod node;
mod path;
mod record;
mod value;

/// Convenience collectors built on [`walk`].
pub use collect::{collect_leaves, collect_paths};
/// Traversal entry points, options and per-visit context.
pub use engine::{StopMode, Visit, WalkOptions, WalkStats, walk, walk_with};
/// Error and result aliases.
pub use error::{Result, WalkError};
/// Record field metadata and the field-key policy.
pub use field::{FieldDescriptor, RecordShape, SUPPRESSED_KEY, field_key};
/// Map key rendering for std map impls.
pub use impls::MapKey;
/// Path resolution against a root value.
pub use lookup::{lookup, resolve_path};
/// Introspection capability and node kinds.
pub use node::{Elements, Entries, Fields, Node, NodeKind, Scalar, Walkable, resolve_node};
/// Path segments and owned paths.
pub use path::{FieldPath, PathSegment};
/// Dynamic runtime value types.
pub use value::{StructValue, Value};
