//! Atomically replaceable holder of the current cache generation.
//!
//! # Role
//!
//! Readers load the whole current generation with one atomic operation and keep
//! using it for as long as they hold the [`Arc`]. Writers build a new generation
//! completely before publishing it, so no reader ever observes a half-built cache.
//!
//! # Invariants
//!
//! - A failed refresh leaves the published generation untouched.
//!   - Enforced in: [`CacheSlot::refresh`].
//!   - Tested by: `tests::failed_refresh_keeps_generation`.
//!   - Failure symptom: a loader error empties a cache that was serving traffic.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::dual::{Bundle, CacheBuildError, CacheKeys, CacheRef, DualIndexCache};

/// Refresh failures.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError<E> {
	#[error("cache loader failed: {0}")]
	Load(E),
	#[error(transparent)]
	Build(#[from] CacheBuildError),
}

/// Holder of the published generation.
pub struct CacheSlot<D, S = String> {
	current: ArcSwap<DualIndexCache<D, S>>,
}

impl<D, S> CacheSlot<D, S> {
	pub fn new(initial: DualIndexCache<D, S>) -> Self {
		Self {
			current: ArcSwap::from_pointee(initial),
		}
	}

	/// A slot holding an empty generation.
	pub fn empty(label: &'static str) -> Self {
		Self::new(DualIndexCache::empty(label))
	}

	/// Returns the current generation.
	#[inline]
	pub fn load(&self) -> Arc<DualIndexCache<D, S>> {
		self.current.load_full()
	}

	/// Publishes a new generation and returns the one it replaced.
	pub fn publish(&self, next: DualIndexCache<D, S>) -> Arc<DualIndexCache<D, S>> {
		let count = next.len();
		let previous = self.current.swap(Arc::new(next));
		tracing::debug!(
			cache = previous.label(),
			count,
			replaced = previous.len(),
			"cache generation published"
		);
		previous
	}

	pub fn get_by_ref(&self, object_ref: i64) -> Option<CacheRef<D, S>> {
		CacheRef::by_ref(self.load(), object_ref)
	}

	pub fn get_by_id(&self, id: &str) -> Option<CacheRef<D, S>> {
		CacheRef::by_id(self.load(), id)
	}
}

impl<D: CacheKeys, S> CacheSlot<D, S> {
	/// Loads, builds and publishes a new generation under the current label.
	///
	/// On any failure the current generation stays published.
	pub fn refresh<I, E>(
		&self,
		loader: impl FnOnce() -> Result<I, E>,
	) -> Result<Arc<DualIndexCache<D, S>>, RefreshError<E>>
	where
		I: IntoIterator<Item = Bundle<D, S>>,
	{
		let label = self.current.load().label();
		let entries = loader().map_err(RefreshError::Load)?;
		let next = DualIndexCache::build(label, entries)?;
		Ok(self.publish(next))
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use pretty_assertions::assert_eq;

	use super::*;

	#[derive(Debug, Clone)]
	struct Country {
		object_ref: i64,
		iso: &'static str,
	}

	impl CacheKeys for Country {
		fn object_ref(&self) -> i64 {
			self.object_ref
		}

		fn natural_id(&self) -> &str {
			self.iso
		}
	}

	fn countries(isos: &[&'static str]) -> Vec<Bundle<Country>> {
		isos.iter()
			.zip(1..)
			.map(|(&iso, object_ref)| Bundle::new(Country { object_ref, iso }))
			.collect()
	}

	#[test]
	fn publish_returns_previous_generation() {
		let slot: CacheSlot<Country> = CacheSlot::empty("country");
		let first = DualIndexCache::build("country", countries(&["DE"])).unwrap();
		let previous = slot.publish(first);
		assert!(previous.is_empty());
		assert_eq!(slot.load().len(), 1);
	}

	#[test]
	fn refresh_replaces_generation() {
		let slot: CacheSlot<Country> = CacheSlot::empty("country");
		let old = slot
			.refresh(|| Ok::<_, String>(countries(&["DE", "FR"])))
			.unwrap();
		assert!(old.is_empty());
		assert_eq!(slot.get_by_id("FR").map(|e| e.dto.object_ref), Some(2));
		assert_eq!(slot.load().label(), "country");
	}

	#[test]
	fn failed_refresh_keeps_generation() {
		let slot: CacheSlot<Country> = CacheSlot::empty("country");
		slot.refresh(|| Ok::<_, String>(countries(&["DE"]))).unwrap();

		let err = slot.refresh(|| Err::<Vec<Bundle<Country>>, _>("db down".to_string()));
		assert!(matches!(err, Err(RefreshError::Load(ref msg)) if msg == "db down"));

		let dup = vec![
			Bundle::new(Country { object_ref: 1, iso: "DE" }),
			Bundle::new(Country { object_ref: 2, iso: "DE" }),
		];
		let err = slot.refresh(|| Ok::<_, String>(dup));
		assert!(matches!(err, Err(RefreshError::Build(CacheBuildError::DuplicateId { .. }))));

		assert_eq!(slot.load().len(), 1);
		assert!(slot.get_by_ref(1).is_some());
	}

	#[test]
	fn readers_keep_their_generation_across_swaps() {
		let slot: Arc<CacheSlot<Country>> = Arc::new(CacheSlot::empty("country"));
		slot.refresh(|| Ok::<_, String>(countries(&["DE"]))).unwrap();
		let pinned = slot.get_by_id("DE").unwrap();

		let writer = {
			let slot = Arc::clone(&slot);
			thread::spawn(move || {
				for round in 0..50 {
					let isos: &[&'static str] = if round % 2 == 0 { &["FR", "IT"] } else { &["DE"] };
					slot.refresh(|| Ok::<_, String>(countries(isos))).unwrap();
				}
			})
		};

		for _ in 0..200 {
			let generation = slot.load();
			let both = generation.len();
			assert!(both == 1 || both == 2);
			assert_eq!(generation.count(|_| true), both);
		}
		writer.join().unwrap();

		assert_eq!(pinned.dto.iso, "DE");
		assert_eq!(pinned.generation().len(), 1);
	}
}
