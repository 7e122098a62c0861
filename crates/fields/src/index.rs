//! Indexing of records by their surrogate reference.

use rustc_hash::FxHashMap as HashMap;

/// A record carrying a numeric surrogate key.
pub trait Keyed {
	fn object_ref(&self) -> i64;
}

impl<T: Keyed + ?Sized> Keyed for &T {
	fn object_ref(&self) -> i64 {
		(**self).object_ref()
	}
}

/// Adds records to an existing index. A later record replaces an earlier one with the same ref.
pub fn index_into<D: Keyed>(index: &mut HashMap<i64, D>, items: impl IntoIterator<Item = D>) {
	for item in items {
		index.insert(item.object_ref(), item);
	}
}

/// Builds a new index from records.
pub fn index_by_ref<D: Keyed>(items: impl IntoIterator<Item = D>) -> HashMap<i64, D> {
	let items = items.into_iter();
	let mut index = HashMap::with_capacity_and_hasher(items.size_hint().0, Default::default());
	index_into(&mut index, items);
	index
}
