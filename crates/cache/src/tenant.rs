//! Per-tenant read-through cache with fallback to the global tenant.
//!
//! # Mental Model
//!
//! Configuration records exist per tenant, and the global tenant `@` supplies the
//! defaults every tenant inherits. The first lookup for a tenant loads all of that
//! tenant's records through the [`CacheLoader`] and keeps them as one immutable
//! generation. A lookup that misses in the tenant's generation retries in the global
//! tenant's generation.
//!
//! A generation expires a fixed time after it was loaded ([`DEFAULT_TTL`] unless
//! configured); the next lookup for that tenant loads it again.
//!
//! # Invariants
//!
//! - A tenant's generation is loaded at most once per time-to-live window until it is
//!   invalidated. Concurrent first lookups may both load; the first fresh generation
//!   inserted wins.
//!   - Enforced in: [`TenantCache::generation`].
//!   - Tested by: `tests::loads_each_tenant_once`, `tests::expired_generation_is_reloaded`.
//!   - Failure symptom: lookups for one tenant see different generations within one window,
//!     or stale records are served forever.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;
use t9t_codes::T9tError;
use t9t_codes::catalog::base as codes;

use crate::dual::{Bundle, CacheKeys, CacheRef, DualIndexCache};

/// Tenant whose records apply to every tenant without an own record.
pub const GLOBAL_TENANT: &str = "@";

/// Time after which a loaded tenant generation is read again.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Source of all cached records of one tenant.
pub trait CacheLoader<D, S> {
	fn load(&self, tenant: &str) -> Result<Vec<Bundle<D, S>>, T9tError>;
}

impl<D, S, F> CacheLoader<D, S> for F
where
	F: Fn(&str) -> Result<Vec<Bundle<D, S>>, T9tError>,
{
	fn load(&self, tenant: &str) -> Result<Vec<Bundle<D, S>>, T9tError> {
		self(tenant)
	}
}

/// Key of a tenant cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey<'a> {
	Ref(i64),
	Id(&'a str),
}

impl From<i64> for CacheKey<'_> {
	fn from(object_ref: i64) -> Self {
		Self::Ref(object_ref)
	}
}

impl<'a> From<&'a str> for CacheKey<'a> {
	fn from(id: &'a str) -> Self {
		Self::Id(id)
	}
}

impl std::fmt::Display for CacheKey<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Ref(object_ref) => write!(f, "ref {object_ref}"),
			Self::Id(id) => write!(f, "id {id}"),
		}
	}
}

/// A tenant generation and when it was loaded.
struct Loaded<D, S> {
	at: Instant,
	generation: Arc<DualIndexCache<D, S>>,
}

impl<D, S> Loaded<D, S> {
	fn is_fresh(&self, ttl: Duration) -> bool {
		self.at.elapsed() < ttl
	}
}

/// Lazily filled cache of one generation per tenant.
pub struct TenantCache<D, S, L> {
	label: &'static str,
	loader: L,
	ttl: Duration,
	tenants: RwLock<HashMap<String, Loaded<D, S>>>,
}

impl<D, S, L> TenantCache<D, S, L>
where
	D: CacheKeys,
	L: CacheLoader<D, S>,
{
	/// Creates a cache whose generations expire after [`DEFAULT_TTL`].
	pub fn new(label: &'static str, loader: L) -> Self {
		Self::with_ttl(label, loader, DEFAULT_TTL)
	}

	pub fn with_ttl(label: &'static str, loader: L, ttl: Duration) -> Self {
		Self {
			label,
			loader,
			ttl,
			tenants: RwLock::new(HashMap::default()),
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Returns the tenant's generation, loading it on first use or after expiry.
	///
	/// A loader failure is reported as `RECORD_DOES_NOT_EXIST` carrying the loader's
	/// error as detail. Records that violate the key constraints are reported as
	/// `ILE_RESULT_SET_WRONG_SIZE`.
	pub fn generation(&self, tenant: &str) -> Result<Arc<DualIndexCache<D, S>>, T9tError> {
		if let Some(loaded) = self.tenants.read().get(tenant)
			&& loaded.is_fresh(self.ttl)
		{
			return Ok(Arc::clone(&loaded.generation));
		}

		let bundles = self.loader.load(tenant).map_err(|err| {
			tracing::error!(cache = self.label, tenant, %err, "cannot read tenant records");
			T9tError::record_does_not_exist(format!("{} for tenant {tenant}: {err}", self.label))
		})?;
		let generation = DualIndexCache::build(self.label, bundles).map_err(|err| {
			tracing::error!(cache = self.label, tenant, %err, "inconsistent records loaded");
			T9tError::with_detail(codes::ILE_RESULT_SET_WRONG_SIZE, Some(err.to_string()))
		})?;
		tracing::debug!(cache = self.label, tenant, count = generation.len(), "tenant cache filled");

		let mut tenants = self.tenants.write();
		if let Some(loaded) = tenants.get(tenant)
			&& loaded.is_fresh(self.ttl)
		{
			return Ok(Arc::clone(&loaded.generation));
		}
		let generation = Arc::new(generation);
		tenants.insert(
			tenant.to_string(),
			Loaded {
				at: Instant::now(),
				generation: Arc::clone(&generation),
			},
		);
		Ok(generation)
	}

	/// Looks up a record of the tenant, falling back to the global tenant.
	pub fn get_or_null<'k>(
		&self,
		tenant: &str,
		key: impl Into<CacheKey<'k>>,
	) -> Result<Option<CacheRef<D, S>>, T9tError> {
		let key = key.into();
		if let Some(found) = lookup(self.generation(tenant)?, key) {
			return Ok(Some(found));
		}
		if tenant == GLOBAL_TENANT {
			return Ok(None);
		}
		Ok(lookup(self.generation(GLOBAL_TENANT)?, key))
	}

	/// Like [`Self::get_or_null`], but a miss is an error.
	pub fn get<'k>(&self, tenant: &str, key: impl Into<CacheKey<'k>>) -> Result<CacheRef<D, S>, T9tError> {
		let key = key.into();
		self.get_or_null(tenant, key)?.ok_or_else(|| {
			tracing::error!(cache = self.label, tenant, %key, "no record for tenant or global tenant");
			T9tError::record_does_not_exist(format!("{}: {key} for tenant {tenant}", self.label))
		})
	}

	/// Drops the tenant's generation; the next lookup reloads it.
	pub fn invalidate(&self, tenant: &str) {
		let removed = self.tenants.write().remove(tenant).is_some();
		tracing::debug!(cache = self.label, tenant, removed, "tenant cache invalidated");
	}

	/// Drops every tenant's generation.
	pub fn invalidate_all(&self) {
		let mut tenants = self.tenants.write();
		let count = tenants.len();
		tenants.clear();
		tracing::debug!(cache = self.label, tenants = count, "all tenant caches invalidated");
	}

	/// Drops every expired generation and returns how many were dropped.
	pub fn purge_expired(&self) -> usize {
		let mut tenants = self.tenants.write();
		let before = tenants.len();
		tenants.retain(|_, loaded| loaded.is_fresh(self.ttl));
		let purged = before - tenants.len();
		tracing::debug!(cache = self.label, purged, "expired tenant caches purged");
		purged
	}

	/// Returns the number of tenants currently loaded, expired ones included.
	pub fn loaded_tenants(&self) -> usize {
		self.tenants.read().len()
	}
}

fn lookup<D, S>(generation: Arc<DualIndexCache<D, S>>, key: CacheKey<'_>) -> Option<CacheRef<D, S>> {
	match key {
		CacheKey::Ref(object_ref) => CacheRef::by_ref(generation, object_ref),
		CacheKey::Id(id) => CacheRef::by_id(generation, id),
	}
}
