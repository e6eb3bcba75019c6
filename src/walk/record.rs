/// Implement [`Walkable`](crate::walk::Walkable) for a struct as a record.
///
/// Fields are listed in declaration order. The field table is built once per
/// type on first use and shared by every instance afterwards. A
/// `#[key = "..."]` attribute sets the field's naming override.
///
/// ```
/// use structwalk::record;
/// use structwalk::walk::{walk, FieldPath};
///
/// #[allow(non_snake_case)]
/// struct Account {
/// 	UserName: String,
/// 	user_id: u64,
/// }
///
/// record!(Account {
/// 	UserName,
/// 	#[key = "id"]
/// 	user_id,
/// });
///
/// let account = Account { UserName: "ada".into(), user_id: 7 };
/// let mut paths = Vec::new();
/// walk(&account, |visit| paths.push(visit.to_path()));
/// assert_eq!(paths, vec![FieldPath::parse("userName").unwrap(), FieldPath::parse("id").unwrap()]);
/// ```
#[macro_export]
macro_rules! record {
	(@key $key:literal) => {
		::core::option::Option::Some($key)
	};
	(@key) => {
		::core::option::Option::None
	};
	($name:ident { $($(#[key = $key:literal])? $field:ident),+ $(,)? }) => {
		impl $crate::walk::Walkable for $name {
			fn node(&self) -> $crate::walk::Node<'_> {
				static SHAPE: ::std::sync::OnceLock<$crate::walk::RecordShape> = ::std::sync::OnceLock::new();
				let shape = SHAPE.get_or_init(|| {
					$crate::walk::RecordShape::new(::core::stringify!($name))
						$(.descriptor($crate::walk::FieldDescriptor::with_override(
							::core::stringify!($field),
							$crate::record!(@key $($key)?),
						)))+
				});
				$crate::walk::Node::record(shape, [$(&self.$field as &dyn $crate::walk::Walkable),+])
			}
		}
	};
}

#[cfg(test)]
mod tests {
	use crate::walk::{Node, Walkable};

	#[allow(non_snake_case)]
	struct Sample {
		Name: String,
		hidden: u8,
		count: u32,
	}

	crate::record!(Sample {
		Name,
		#[key = "-"]
		hidden,
		#[key = "total"]
		count,
	});

	#[test]
	fn record_macro_builds_shape_once() {
		let first = Sample {
			Name: "a".into(),
			hidden: 1,
			count: 2,
		};
		let second = Sample {
			Name: "b".into(),
			hidden: 3,
			count: 4,
		};

		let (Node::Record(a), Node::Record(b)) = (first.node(), second.node()) else {
			panic!("expected record nodes");
		};
		assert!(std::ptr::eq(a.shape(), b.shape()));
		assert_eq!(a.shape().type_name(), "Sample");

		let keys = a.map(|(field, _)| field.key().to_owned()).collect::<Vec<_>>();
		assert_eq!(keys, vec!["name", "hidden", "total"]);
	}
}
