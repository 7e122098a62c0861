//! One immutable cache generation indexed by surrogate ref and natural id.
//!
//! # Mental Model
//!
//! Entries live in one table. Two maps point into it: the numeric `objectRef` and the
//! natural string id. A generation is built in one pass from a fully materialized
//! collection and never changes afterwards; a newer state means a new generation.
//!
//! # Invariants
//!
//! - Every entry is reachable by exactly one ref and exactly one id, so both maps and
//!   the table have the same length.
//!   - Enforced in: [`DualIndexCache::build`].
//!   - Tested by: `tests::rejects_duplicate_ref`, `tests::rejects_duplicate_id`, `tests::indexes_agree`.
//!   - Failure symptom: a lookup by id and by ref return different records for the same row.

use std::ops::Deref;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use t9t_codes::T9tError;

/// Keys of a cacheable record.
pub trait CacheKeys {
	/// Numeric surrogate key.
	fn object_ref(&self) -> i64;
	/// Natural business key.
	fn natural_id(&self) -> &str;
}

/// A cached record with an optional precomputed description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle<D, S = String> {
	pub dto: D,
	pub description: Option<S>,
}

impl<D, S> Bundle<D, S> {
	pub fn new(dto: D) -> Self {
		Self { dto, description: None }
	}

	pub fn with_description(dto: D, description: S) -> Self {
		Self {
			dto,
			description: Some(description),
		}
	}
}

/// Generation build failures. No partial generation is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheBuildError {
	#[error("{label}: ref {object_ref} used by '{existing}' and '{incoming}'")]
	DuplicateRef {
		label: &'static str,
		object_ref: i64,
		existing: String,
		incoming: String,
	},
	#[error("{label}: id '{id}' used by refs {existing} and {incoming}")]
	DuplicateId {
		label: &'static str,
		id: String,
		existing: i64,
		incoming: i64,
	},
}

/// Immutable cache generation with lookup by ref and by natural id.
pub struct DualIndexCache<D, S = String> {
	label: &'static str,
	table: Box<[Bundle<D, S>]>,
	by_ref: HashMap<i64, usize>,
	by_id: HashMap<Box<str>, usize>,
}

impl<D: CacheKeys, S> DualIndexCache<D, S> {
	/// Builds a generation from all entries at once.
	pub fn build(
		label: &'static str,
		entries: impl IntoIterator<Item = Bundle<D, S>>,
	) -> Result<Self, CacheBuildError> {
		let table: Box<[Bundle<D, S>]> = entries.into_iter().collect();
		let mut by_ref = HashMap::with_capacity_and_hasher(table.len(), Default::default());
		let mut by_id: HashMap<Box<str>, usize> =
			HashMap::with_capacity_and_hasher(table.len(), Default::default());

		for (idx, bundle) in table.iter().enumerate() {
			let object_ref = bundle.dto.object_ref();
			let id = bundle.dto.natural_id();
			if let Some(&prev) = by_ref.get(&object_ref) {
				let existing: &Bundle<D, S> = &table[prev];
				return Err(CacheBuildError::DuplicateRef {
					label,
					object_ref,
					existing: existing.dto.natural_id().to_string(),
					incoming: id.to_string(),
				});
			}
			if let Some(&prev) = by_id.get(id) {
				let existing: &Bundle<D, S> = &table[prev];
				return Err(CacheBuildError::DuplicateId {
					label,
					id: id.to_string(),
					existing: existing.dto.object_ref(),
					incoming: object_ref,
				});
			}
			by_ref.insert(object_ref, idx);
			by_id.insert(Box::from(id), idx);
		}

		tracing::debug!(cache = label, count = table.len(), "cache generation built");

		Ok(Self {
			label,
			table,
			by_ref,
			by_id,
		})
	}
}

impl<D, S> DualIndexCache<D, S> {
	/// An empty generation.
	pub fn empty(label: &'static str) -> Self {
		Self {
			label,
			table: Box::default(),
			by_ref: HashMap::default(),
			by_id: HashMap::default(),
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	#[inline]
	pub fn get_by_ref(&self, object_ref: i64) -> Option<&Bundle<D, S>> {
		self.by_ref.get(&object_ref).map(|&idx| &self.table[idx])
	}

	#[inline]
	pub fn get_by_id(&self, id: &str) -> Option<&Bundle<D, S>> {
		self.by_id.get(id).map(|&idx| &self.table[idx])
	}

	/// Like [`Self::get_by_ref`], but a miss is an error.
	pub fn get_by_ref_or_fail(&self, object_ref: i64) -> Result<&Bundle<D, S>, T9tError> {
		self.get_by_ref(object_ref)
			.ok_or_else(|| self.miss(format_args!("ref {object_ref}")))
	}

	/// Like [`Self::get_by_id`], but a miss is an error.
	pub fn get_by_id_or_fail(&self, id: &str) -> Result<&Bundle<D, S>, T9tError> {
		self.get_by_id(id).ok_or_else(|| self.miss(format_args!("id {id}")))
	}

	fn miss(&self, key: std::fmt::Arguments<'_>) -> T9tError {
		tracing::error!(cache = self.label, %key, "cache miss");
		T9tError::record_does_not_exist(format!("{}: {key}", self.label))
	}

	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Counts the entries matching a predicate.
	pub fn count(&self, mut predicate: impl FnMut(&Bundle<D, S>) -> bool) -> usize {
		self.table.iter().filter(|b| predicate(b)).count()
	}

	/// Visits every entry in load order.
	pub fn for_each(&self, consumer: impl FnMut(&Bundle<D, S>)) {
		self.table.iter().for_each(consumer);
	}

	pub fn iter(&self) -> impl Iterator<Item = &Bundle<D, S>> + '_ {
		self.table.iter()
	}

	#[cfg(test)]
	pub(crate) fn index_sizes(&self) -> (usize, usize) {
		(self.by_ref.len(), self.by_id.len())
	}
}

impl<D, S> std::fmt::Debug for DualIndexCache<D, S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DualIndexCache")
			.field("label", &self.label)
			.field("len", &self.table.len())
			.finish()
	}
}

/// An entry pinned together with the generation that holds it.
///
/// Stays valid after the generation has been replaced in its slot.
pub struct CacheRef<D, S = String> {
	generation: Arc<DualIndexCache<D, S>>,
	idx: usize,
}

impl<D, S> CacheRef<D, S> {
	pub(crate) fn by_ref(generation: Arc<DualIndexCache<D, S>>, object_ref: i64) -> Option<Self> {
		let idx = *generation.by_ref.get(&object_ref)?;
		Some(Self { generation, idx })
	}

	pub(crate) fn by_id(generation: Arc<DualIndexCache<D, S>>, id: &str) -> Option<Self> {
		let idx = *generation.by_id.get(id)?;
		Some(Self { generation, idx })
	}

	/// Returns the generation this entry belongs to.
	pub fn generation(&self) -> &Arc<DualIndexCache<D, S>> {
		&self.generation
	}
}

impl<D, S> Clone for CacheRef<D, S> {
	fn clone(&self) -> Self {
		Self {
			generation: self.generation.clone(),
			idx: self.idx,
		}
	}
}

impl<D, S> Deref for CacheRef<D, S> {
	type Target = Bundle<D, S>;

	fn deref(&self) -> &Self::Target {
		&self.generation.table[self.idx]
	}
}

impl<D: std::fmt::Debug, S: std::fmt::Debug> std::fmt::Debug for CacheRef<D, S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CacheRef")
			.field("cache", &self.generation.label)
			.field("entry", &**self)
			.finish()
	}
}
