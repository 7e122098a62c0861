//! Dual-index caches for reference data.
//!
//! - [`DualIndexCache`] - one immutable generation, looked up by ref or natural id
//! - [`CacheSlot`] - publishes generations atomically to concurrent readers
//! - [`TenantCache`] - one lazily loaded, expiring generation per tenant with global fallback

mod dual;
mod slot;
mod tenant;

pub use dual::{Bundle, CacheBuildError, CacheKeys, CacheRef, DualIndexCache};
pub use slot::{CacheSlot, RefreshError};
pub use tenant::{CacheKey, CacheLoader, DEFAULT_TTL, GLOBAL_TENANT, TenantCache};
