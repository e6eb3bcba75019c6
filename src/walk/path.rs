use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::walk::{Result, WalkError};

/// How one child was reached from its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
	/// Record field key.
	Field(Arc<str>),
	/// Sequence index.
	Index(usize),
	/// String form of a map key.
	Key(Arc<str>),
}

impl PathSegment {
	/// Index this segment addresses, parsing field and key text when decimal.
	pub fn as_index(&self) -> Option<usize> {
		match self {
			Self::Index(index) => Some(*index),
			Self::Field(text) | Self::Key(text) => text.parse().ok(),
		}
	}

	/// True when this segment renders to `key`.
	pub fn matches_key(&self, key: &str) -> bool {
		match self {
			Self::Index(index) => index.to_string() == key,
			Self::Field(text) | Self::Key(text) => text.as_ref() == key,
		}
	}
}

impl fmt::Display for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Index(index) => write!(f, "{index}"),
			Self::Field(text) | Self::Key(text) => f.write_str(text),
		}
	}
}

/// Owned path from the root to one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldPath {
	segments: Vec<PathSegment>,
}

impl FieldPath {
	/// Empty path addressing the root.
	pub fn root() -> Self {
		Self::default()
	}

	/// Path made of `segments`.
	pub fn from_segments(segments: impl Into<Vec<PathSegment>>) -> Self {
		Self { segments: segments.into() }
	}

	/// Parse dotted field syntax with optional `[index]` and `["key"]` selectors.
	///
	/// `items[0].name`, `[2]`, `meta.tags[1]` and `labels["a.b"]` are accepted.
	/// Quoted keys escape `"` and `\` with a backslash. Field segments also
	/// match map keys during lookup, and quoted keys also match record keys.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || WalkError::InvalidFieldPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut segments = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && is_key_byte(bytes[idx]) {
				idx += 1;
			}

			if idx > start {
				segments.push(PathSegment::Field(Arc::from(&input[start..idx])));
			} else if !(segments.is_empty() && bytes[idx] == b'[') {
				return Err(invalid());
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let segment = if bytes.get(idx) == Some(&b'"') {
					let (key, end) = parse_quoted(input, idx + 1).ok_or_else(invalid)?;
					idx = end;
					PathSegment::Key(Arc::from(key))
				} else {
					let n_start = idx;
					while idx < bytes.len() && bytes[idx].is_ascii_digit() {
						idx += 1;
					}
					let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
					PathSegment::Index(number)
				};

				if bytes.get(idx) != Some(&b']') {
					return Err(invalid());
				}
				segments.push(segment);
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self { segments })
	}

	/// Segments from the root down.
	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}

	/// Number of segments.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// True for the root path.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Append one segment.
	pub fn push(&mut self, segment: PathSegment) {
		self.segments.push(segment);
	}

	/// Path one level up, or `None` at the root.
	pub fn parent(&self) -> Option<Self> {
		let (_, head) = self.segments.split_last()?;
		Some(Self { segments: head.to_vec() })
	}

	/// Render segments joined by `sep`.
	pub fn join(&self, sep: &str) -> String {
		self.segments.iter().map(ToString::to_string).collect::<Vec<_>>().join(sep)
	}

	/// Render as an RFC 6901 JSON pointer.
	pub fn to_json_pointer(&self) -> String {
		let mut out = String::new();
		for segment in &self.segments {
			out.push('/');
			out.push_str(&segment.to_string().replace('~', "~0").replace('/', "~1"));
		}
		out
	}
}

impl From<&[PathSegment]> for FieldPath {
	fn from(segments: &[PathSegment]) -> Self {
		Self { segments: segments.to_vec() }
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (position, segment) in self.segments.iter().enumerate() {
			match segment {
				PathSegment::Index(index) => write!(f, "[{index}]")?,
				PathSegment::Field(text) | PathSegment::Key(text) if is_bare_key(text) => {
					if position > 0 {
						f.write_str(".")?;
					}
					f.write_str(text)?;
				}
				PathSegment::Field(text) | PathSegment::Key(text) => write_quoted(f, text)?,
			}
		}
		Ok(())
	}
}

fn is_key_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' || byte >= 0x80
}

fn is_bare_key(text: &str) -> bool {
	!text.is_empty() && text.bytes().all(is_key_byte)
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
	f.write_str("[\"")?;
	for ch in text.chars() {
		if ch == '"' || ch == '\\' {
			f.write_str("\\")?;
		}
		write!(f, "{ch}")?;
	}
	f.write_str("\"]")
}

/// Read a quoted key starting after its opening quote.
///
/// Returns the unescaped key and the byte offset just past the closing quote.
fn parse_quoted(input: &str, start: usize) -> Option<(String, usize)> {
	let mut key = String::new();
	let mut chars = input[start..].char_indices();
	while let Some((offset, ch)) = chars.next() {
		match ch {
			'"' => return Some((key, start + offset + 1)),
			'\\' => key.push(chars.next()?.1),
			_ => key.push(ch),
		}
	}
	None
}

#[cfg(test)]
mod tests;
