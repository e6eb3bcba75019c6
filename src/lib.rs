//! Depth-first traversal of heterogeneous structured data.
//!
//! Records, sequences, maps, references and type-erased wrappers are walked
//! in pre-order; every visited location is reported with its value, the
//! branch of ancestor values and the path of segments leading to it.

/// Introspection, traversal, path and lookup APIs.
pub mod walk;
