//! Field path mapping between DTO-relative and wrapper-relative names.
//!
//! # Role
//!
//! Search filters and sort criteria name fields relative to the DTO. Queries run
//! against the `data + tracking` wrapper, so names are prefixed on the way in and
//! stripped on the way out. Index stripping turns an instance path such as
//! `lines[3].sku` into the schema path `lines.sku`.
//!
//! Malformed paths are never fatal here: they are logged and passed through, and the
//! schema lookup downstream reports the actual error.
//!
//! # Invariants
//!
//! - `remove_prefix(add_prefix(x)) == x` for every field name `x`.
//!   - Enforced in: [`add_prefix`], [`remove_prefix`].
//!   - Tested by: `tests::prefix_round_trip`.
//!   - Failure symptom: filters built from a sort column resolve to a different field.

use std::borrow::Cow;

use crate::conventions::FieldConventions;

pub const DATA_PREFIX: &str = "data.";
pub const TRACKING_PREFIX: &str = "tracking.";

/// Root of the wrapper a field name lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootScope {
	Tenant,
	Tracking,
	Data,
}

impl RootScope {
	/// Returns the path prefix of this scope, empty for the root level.
	pub const fn prefix(self) -> &'static str {
		match self {
			Self::Tenant => "",
			Self::Tracking => TRACKING_PREFIX,
			Self::Data => DATA_PREFIX,
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			Self::Tenant => "tenant",
			Self::Tracking => "tracking",
			Self::Data => "data",
		}
	}
}

impl core::fmt::Display for RootScope {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

impl FieldConventions {
	/// Classifies a bare field name.
	pub fn classify(&self, field: &str) -> RootScope {
		if self.is_tenant_field(field) {
			RootScope::Tenant
		} else if self.is_tracking_column(field) {
			RootScope::Tracking
		} else {
			RootScope::Data
		}
	}

	/// Converts a DTO-relative name to a wrapper-relative one.
	pub fn add_prefix<'a>(&self, field: &'a str) -> Cow<'a, str> {
		match self.classify(field) {
			RootScope::Tenant => Cow::Borrowed(field),
			scope => Cow::Owned(format!("{}{field}", scope.prefix())),
		}
	}
}

/// Classifies a field name under the platform conventions.
pub fn classify(field: &str) -> RootScope {
	FieldConventions::platform().classify(field)
}

pub fn is_tenant_field(field: &str) -> bool {
	FieldConventions::platform().is_tenant_field(field)
}

pub fn is_tracking_column(field: &str) -> bool {
	FieldConventions::platform().is_tracking_column(field)
}

/// Converts a DTO-relative name to a wrapper-relative one under the platform conventions.
pub fn add_prefix(field: &str) -> Cow<'_, str> {
	FieldConventions::platform().add_prefix(field)
}

/// Strips a leading `data.` or `tracking.`. Other input is returned unchanged.
pub fn remove_prefix(path: &str) -> &str {
	path.strip_prefix(DATA_PREFIX)
		.or_else(|| path.strip_prefix(TRACKING_PREFIX))
		.unwrap_or(path)
}

/// Removes every bracketed index group from a path.
///
/// Bracket-free input is returned borrowed. A `[` without a closing `]`, or an empty
/// `[]`, makes the whole path malformed: it is logged and returned unchanged.
pub fn strip_indexes(path: &str) -> Cow<'_, str> {
	let Some(mut open) = path.find('[') else {
		return Cow::Borrowed(path);
	};

	let mut out = String::with_capacity(path.len());
	let mut src = 0;
	loop {
		out.push_str(&path[src..open]);
		let inner = open + 1;
		match path[inner..].find(']') {
			Some(len) if len > 0 => src = inner + len + 1,
			_ => {
				tracing::error!(field = path, "malformed field name: mismatching brackets");
				return Cow::Borrowed(path);
			}
		}
		match path[src..].find('[') {
			Some(next) => open = src + next,
			None => break,
		}
	}
	out.push_str(&path[src..]);

	tracing::trace!(field = path, stripped = %out, "unindexed field name");
	Cow::Owned(out)
}
