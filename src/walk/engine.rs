use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::walk::node::Identity;
use crate::walk::{FieldDescriptor, FieldPath, Node, NodeKind, PathSegment, Result, Scalar, WalkError, Walkable, resolve_node};

/// Behavior when a traversal limit is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopMode {
	/// Prune the offending branch and keep walking siblings.
	Stop,
	/// Abort the traversal with an error.
	Error,
}

/// Traversal limits and reporting switches.
///
/// The default walks without limits: no depth bound, no cycle tracking, and
/// absent references are not reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
	/// Maximum path length of a visited value.
	pub max_depth: Option<usize>,
	/// Action when a child would exceed `max_depth`.
	pub on_depth_limit: StopMode,
	/// Track referenced and wrapped values on the active descent chain.
	pub detect_cycles: bool,
	/// Action when a reference leads back to an ancestor.
	pub on_cycle: StopMode,
	/// Report absent references to the visitor; they are never descended.
	pub visit_absent: bool,
}

impl Default for WalkOptions {
	fn default() -> Self {
		Self {
			max_depth: None,
			on_depth_limit: StopMode::Stop,
			detect_cycles: false,
			on_cycle: StopMode::Stop,
			visit_absent: false,
		}
	}
}

impl WalkOptions {
	/// Preset for data that may contain shared or cyclic references.
	pub fn guarded(max_depth: usize) -> Self {
		Self {
			max_depth: Some(max_depth),
			on_depth_limit: StopMode::Error,
			detect_cycles: true,
			on_cycle: StopMode::Stop,
			visit_absent: false,
		}
	}
}

/// Counters reported by [`walk_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
	/// Visitor invocations.
	pub visited: usize,
	/// Deepest path length visited.
	pub deepest: usize,
	/// Branches pruned by a depth limit or a cycle.
	pub pruned: usize,
}

/// Context for one visitor invocation.
pub struct Visit<'a, 'w> {
	value: &'a dyn Walkable,
	branch: &'w [&'a dyn Walkable],
	path: &'w [PathSegment],
	field: Option<&'a FieldDescriptor>,
}

impl<'a, 'w> Visit<'a, 'w> {
	/// Value at this location, as declared by its parent.
	pub fn value(&self) -> &'a dyn Walkable {
		self.value
	}

	/// Values from the root down to and including [`Visit::value`].
	pub fn branch(&self) -> &'w [&'a dyn Walkable] {
		self.branch
	}

	/// Segments from the root down to this location.
	pub fn path(&self) -> &'w [PathSegment] {
		self.path
	}

	/// Declaring field when the parent is a record.
	pub fn field(&self) -> Option<&'a FieldDescriptor> {
		self.field
	}

	/// Number of segments in [`Visit::path`].
	pub fn depth(&self) -> usize {
		self.path.len()
	}

	/// Immediate container this value was reached from.
	pub fn parent(&self) -> Option<&'a dyn Walkable> {
		let position = self.branch.len().checked_sub(2)?;
		self.branch.get(position).copied()
	}

	/// Last path segment.
	pub fn segment(&self) -> Option<&'w PathSegment> {
		self.path.last()
	}

	/// Kind of the value as declared, without unwrapping references.
	pub fn kind(&self) -> NodeKind {
		self.value.node().kind()
	}

	/// Leaf view after unwrapping references and polymorphic wrappers.
	pub fn scalar(&self) -> Option<Scalar<'a>> {
		match resolve_node(self.value)? {
			Node::Scalar(scalar) => Some(scalar),
			_ => None,
		}
	}

	/// Owned copy of the path.
	pub fn to_path(&self) -> FieldPath {
		FieldPath::from(self.path)
	}
}

/// Walk `root` depth-first, calling `visitor` once per reachable non-root value.
///
/// Each child is reported before its own descendants. Record fields follow
/// declaration order and sequence elements index order; map entries follow
/// whatever order the container yields. Absent references are skipped, and
/// references and polymorphic wrappers are unwrapped without adding a path
/// segment. A reference or wrapper chain that loops back on itself at one
/// location is reported once and not descended. A cycle that passes through
/// containers recurses until the stack is exhausted; use [`walk_with`] with
/// [`WalkOptions::guarded`] for untrusted data.
pub fn walk<'a, F>(root: &'a dyn Walkable, visitor: F)
where
	F: FnMut(&Visit<'a, '_>),
{
	// Default options carry no depth limit or cycle check, so this cannot fail.
	let _ = walk_with(root, &WalkOptions::default(), visitor);
}

/// Walk `root` under `options`.
///
/// Errors only when a limit is hit with [`StopMode::Error`].
pub fn walk_with<'a, F>(root: &'a dyn Walkable, options: &WalkOptions, visitor: F) -> Result<WalkStats>
where
	F: FnMut(&Visit<'a, '_>),
{
	debug!(root = root.type_name(), ?options, "walk started");

	let mut walker = Walker {
		options,
		visitor,
		branch: vec![root],
		path: Vec::new(),
		active: Vec::new(),
		stats: WalkStats::default(),
	};

	if options.detect_cycles
		&& let Some(identity) = Identity::tracked(root)
	{
		walker.active.push(identity);
	}

	let mut pushed = 0;
	let result = match walker.resolve(root, &mut pushed) {
		Resolved::Node(node) => walker.expand(node),
		Resolved::Absent => Ok(()),
		Resolved::Cycle => walker.prune_cycle(),
	};

	let stats = walker.stats;
	debug!(visited = stats.visited, deepest = stats.deepest, pruned = stats.pruned, ok = result.is_ok(), "walk finished");
	result.map(|()| stats)
}

enum Resolved<'a> {
	Absent,
	Cycle,
	Node(Node<'a>),
}

struct Walker<'a, 'o, F> {
	options: &'o WalkOptions,
	visitor: F,
	branch: Vec<&'a dyn Walkable>,
	path: Vec<PathSegment>,
	active: Vec<Identity>,
	stats: WalkStats,
}

impl<'a, F> Walker<'a, '_, F>
where
	F: FnMut(&Visit<'a, '_>),
{
	/// Unwrap references and polymorphic wrappers down to a structural node.
	///
	/// A chain that revisits one of its own values is a cycle whatever the
	/// options. With cycle detection on, each followed target is also pushed
	/// onto `active`; `pushed` counts them so the caller can pop after
	/// descending.
	fn resolve(&mut self, value: &'a dyn Walkable, pushed: &mut usize) -> Resolved<'a> {
		let mut current = value;
		let mut chain = Vec::new();
		loop {
			let target = match current.node() {
				Node::Reference(None) => return Resolved::Absent,
				Node::Reference(Some(target)) | Node::Polymorphic(target) => target,
				node => return Resolved::Node(node),
			};

			chain.push(Identity::of(current));
			if chain.contains(&Identity::of(target)) {
				return Resolved::Cycle;
			}

			if self.options.detect_cycles
				&& let Some(identity) = Identity::tracked(target)
			{
				if self.active.contains(&identity) {
					return Resolved::Cycle;
				}
				self.active.push(identity);
				*pushed += 1;
			}
			current = target;
		}
	}

	fn expand(&mut self, node: Node<'a>) -> Result<()> {
		match node {
			Node::Record(fields) => {
				for (field, child) in fields {
					self.child(PathSegment::Field(field.shared_key()), child, Some(field))?;
				}
			}
			Node::Sequence(items) => {
				for (index, child) in items {
					self.child(PathSegment::Index(index), child, None)?;
				}
			}
			Node::Map(entries) => {
				for (key, child) in entries {
					self.child(PathSegment::Key(key.into()), child, None)?;
				}
			}
			// Already unwrapped by `resolve`; leaves have no children.
			Node::Reference(_) | Node::Polymorphic(_) | Node::Scalar(_) | Node::Opaque => {}
		}
		Ok(())
	}

	fn child(&mut self, segment: PathSegment, child: &'a dyn Walkable, field: Option<&'a FieldDescriptor>) -> Result<()> {
		let mut pushed = 0;
		let resolved = self.resolve(child, &mut pushed);
		if matches!(resolved, Resolved::Absent) && !self.options.visit_absent {
			self.pop_active(pushed);
			return Ok(());
		}

		if let Some(max_depth) = self.options.max_depth
			&& self.path.len() >= max_depth
		{
			self.pop_active(pushed);
			self.stats.pruned += 1;
			debug!(max_depth, path = %self.current_path(), segment = %segment, "depth limit reached");
			return match self.options.on_depth_limit {
				StopMode::Stop => Ok(()),
				StopMode::Error => {
					let mut path = self.current_path();
					path.push(segment);
					Err(WalkError::DepthExceeded { max_depth, path })
				}
			};
		}

		trace!(depth = self.path.len() + 1, segment = %segment, "visit");
		self.path.push(segment);
		self.branch.push(child);
		self.stats.visited += 1;
		self.stats.deepest = self.stats.deepest.max(self.path.len());

		(self.visitor)(&Visit {
			value: child,
			branch: &self.branch,
			path: &self.path,
			field,
		});

		let result = match resolved {
			Resolved::Node(node) => self.expand(node),
			Resolved::Absent => Ok(()),
			Resolved::Cycle => self.prune_cycle(),
		};

		self.path.pop();
		self.branch.pop();
		self.pop_active(pushed);
		result
	}

	fn prune_cycle(&mut self) -> Result<()> {
		self.stats.pruned += 1;
		let path = self.current_path();
		debug!(path = %path, "reference cycle pruned");
		match self.options.on_cycle {
			StopMode::Stop => Ok(()),
			StopMode::Error => Err(WalkError::Cycle { path }),
		}
	}

	fn pop_active(&mut self, count: usize) {
		let keep = self.active.len().saturating_sub(count);
		self.active.truncate(keep);
	}

	fn current_path(&self) -> FieldPath {
		FieldPath::from(self.path.as_slice())
	}
}
