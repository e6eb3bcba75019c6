use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::walk::{Node, Scalar, Walkable};

/// Map key types whose string form becomes the entry's path segment.
pub trait MapKey {
	/// String form of the key.
	fn key_str(&self) -> Cow<'_, str>;
}

impl MapKey for str {
	fn key_str(&self) -> Cow<'_, str> {
		Cow::Borrowed(self)
	}
}

impl MapKey for String {
	fn key_str(&self) -> Cow<'_, str> {
		Cow::Borrowed(self)
	}
}

impl MapKey for Cow<'_, str> {
	fn key_str(&self) -> Cow<'_, str> {
		Cow::Borrowed(self)
	}
}

impl MapKey for Arc<str> {
	fn key_str(&self) -> Cow<'_, str> {
		Cow::Borrowed(self)
	}
}

impl MapKey for Rc<str> {
	fn key_str(&self) -> Cow<'_, str> {
		Cow::Borrowed(self)
	}
}

impl<K: MapKey + ?Sized> MapKey for &K {
	fn key_str(&self) -> Cow<'_, str> {
		(**self).key_str()
	}
}

macro_rules! display_key {
	($($ty:ty),*) => {$(
		impl MapKey for $ty {
			fn key_str(&self) -> Cow<'_, str> {
				Cow::Owned(self.to_string())
			}
		}
	)*};
}

display_key!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! signed_scalar {
	($($ty:ty),*) => {$(
		impl Walkable for $ty {
			fn node(&self) -> Node<'_> {
				Node::Scalar(Scalar::I64(i64::from(*self)))
			}
		}
	)*};
}

macro_rules! unsigned_scalar {
	($($ty:ty),*) => {$(
		impl Walkable for $ty {
			fn node(&self) -> Node<'_> {
				Node::Scalar(Scalar::U64(u64::from(*self)))
			}
		}
	)*};
}

signed_scalar!(i8, i16, i32, i64);
unsigned_scalar!(u8, u16, u32, u64);

impl Walkable for isize {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::I64(*self as i64))
	}
}

impl Walkable for usize {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::U64(*self as u64))
	}
}

impl Walkable for f32 {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::F64(f64::from(*self)))
	}
}

impl Walkable for f64 {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::F64(*self))
	}
}

impl Walkable for bool {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::Bool(*self))
	}
}

impl Walkable for char {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::Char(*self))
	}
}

impl Walkable for () {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::Null)
	}
}

impl Walkable for str {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::Str(self))
	}
}

impl Walkable for String {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::Str(self))
	}
}

impl Walkable for Cow<'_, str> {
	fn node(&self) -> Node<'_> {
		Node::Scalar(Scalar::Str(self))
	}
}

impl<T: Walkable> Walkable for [T] {
	fn node(&self) -> Node<'_> {
		Node::sequence(self.iter().map(|item| item as &dyn Walkable))
	}
}

impl<T: Walkable, const N: usize> Walkable for [T; N] {
	fn node(&self) -> Node<'_> {
		Node::sequence(self.iter().map(|item| item as &dyn Walkable))
	}
}

impl<T: Walkable> Walkable for Vec<T> {
	fn node(&self) -> Node<'_> {
		Node::sequence(self.iter().map(|item| item as &dyn Walkable))
	}
}

impl<T: Walkable> Walkable for VecDeque<T> {
	fn node(&self) -> Node<'_> {
		Node::sequence(self.iter().map(|item| item as &dyn Walkable))
	}
}

impl<K: MapKey, V: Walkable, S> Walkable for HashMap<K, V, S> {
	fn node(&self) -> Node<'_> {
		Node::map(self.iter().map(|(key, value)| (key.key_str(), value as &dyn Walkable)))
	}
}

impl<K: MapKey, V: Walkable> Walkable for BTreeMap<K, V> {
	fn node(&self) -> Node<'_> {
		Node::map(self.iter().map(|(key, value)| (key.key_str(), value as &dyn Walkable)))
	}
}

impl<T: Walkable> Walkable for Option<T> {
	fn node(&self) -> Node<'_> {
		Node::Reference(self.as_ref().map(|value| value as &dyn Walkable))
	}
}

impl<T: Walkable> Walkable for Box<T> {
	fn node(&self) -> Node<'_> {
		Node::Reference(Some(&**self as &dyn Walkable))
	}
}

impl<T: Walkable> Walkable for Rc<T> {
	fn node(&self) -> Node<'_> {
		Node::Reference(Some(&**self as &dyn Walkable))
	}
}

impl<T: Walkable> Walkable for Arc<T> {
	fn node(&self) -> Node<'_> {
		Node::Reference(Some(&**self as &dyn Walkable))
	}
}

impl Walkable for Box<dyn Walkable> {
	fn node(&self) -> Node<'_> {
		Node::Polymorphic(&**self)
	}

	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}
}

// Plain borrows are not indirections of the walked data; they delegate.
impl<T: Walkable + ?Sized> Walkable for &T {
	fn node(&self) -> Node<'_> {
		(**self).node()
	}

	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}
}
