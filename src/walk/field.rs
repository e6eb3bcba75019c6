use std::sync::Arc;

/// Naming override that opts a field out of renaming.
pub const SUPPRESSED_KEY: &str = "-";

/// Metadata for one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
	name: Box<str>,
	rename: Option<Box<str>>,
	key: Arc<str>,
}

impl FieldDescriptor {
	/// Field without a naming override.
	pub fn new(name: &str) -> Self {
		Self::with_override(name, None)
	}

	/// Field with an optional naming override; the path key is computed here once.
	pub fn with_override(name: &str, rename: Option<&str>) -> Self {
		Self {
			name: name.into(),
			rename: rename.map(Into::into),
			key: Arc::from(field_key(name, rename)),
		}
	}

	/// Declared field name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declared naming override, if any.
	pub fn rename(&self) -> Option<&str> {
		self.rename.as_deref()
	}

	/// Path segment key for this field.
	pub fn key(&self) -> &str {
		&self.key
	}

	pub(crate) fn shared_key(&self) -> Arc<str> {
		self.key.clone()
	}
}

/// Derive the path key for a record field.
///
/// A non-empty override other than [`SUPPRESSED_KEY`] is used verbatim.
/// Otherwise the declared name with its first character lower-cased.
pub fn field_key(name: &str, rename: Option<&str>) -> String {
	match rename {
		Some(key) if !key.is_empty() && key != SUPPRESSED_KEY => key.to_owned(),
		_ => lower_first(name),
	}
}

fn lower_first(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		// One char in, one char out; multi-char lowercase forms keep their base letter.
		Some(first) => first.to_lowercase().next().into_iter().chain(chars).collect(),
		None => String::new(),
	}
}

/// Static field table for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordShape {
	type_name: Box<str>,
	fields: Vec<FieldDescriptor>,
}

impl RecordShape {
	/// Empty shape for `type_name`.
	pub fn new(type_name: &str) -> Self {
		Self {
			type_name: type_name.into(),
			fields: Vec::new(),
		}
	}

	/// Append a field with the default key.
	pub fn field(self, name: &str) -> Self {
		self.descriptor(FieldDescriptor::new(name))
	}

	/// Append a field with a naming override.
	pub fn renamed(self, name: &str, key: &str) -> Self {
		self.descriptor(FieldDescriptor::with_override(name, Some(key)))
	}

	/// Append a prepared descriptor.
	pub fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
		self.fields.push(descriptor);
		self
	}

	/// Record type name.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Position and descriptor of the field whose key is `key`.
	pub fn find(&self, key: &str) -> Option<(usize, &FieldDescriptor)> {
		self.fields.iter().enumerate().find(|(_, field)| field.key() == key)
	}

	/// Number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// True when the record declares no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

#[cfg(test)]
mod tests;
