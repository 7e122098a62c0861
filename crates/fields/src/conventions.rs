//! Naming conventions of the `data + tracking` record wrapper.
//!
//! # Mental Model
//!
//! A persisted record is exposed as a wrapper with three roots: the tenant field at
//! root level, the technical tracking columns under `tracking`, and every business
//! field under `data`. Which root a bare field name belongs to is decided by name
//! alone, so the allow-lists here must match what the persistence layer writes.
//!
//! # Invariants
//!
//! - The tenant field is never a tracking column, and tracking columns are unique.
//!   - Enforced in: [`FieldConventions::new`].
//!   - Tested by: `tests::rejects_tenant_field_as_tracking_column`, `tests::rejects_duplicate_tracking_column`.
//!   - Failure symptom: a field name classifies into two roots depending on check order.

use std::sync::LazyLock;

use rustc_hash::FxHashSet as HashSet;

/// Name of the tenant reference field on wrapped records.
pub const TENANT_FIELD: &str = "tenantId";

/// Technical columns maintained by the persistence layer.
pub const TRACKING_COLUMNS: [&str; 7] = [
	"cTimestamp",
	"cAppUserId",
	"cProcessRef",
	"mTimestamp",
	"mAppUserId",
	"mProcessRef",
	"version",
];

/// Errors raised when validating custom conventions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConventionsError {
	#[error("tenant field name must not be empty")]
	EmptyTenantField,
	#[error("tracking column name must not be empty")]
	EmptyTrackingColumn,
	#[error("tenant field '{0}' is also listed as a tracking column")]
	TenantFieldIsTracking(String),
	#[error("tracking column '{0}' listed twice")]
	DuplicateTrackingColumn(String),
}

/// The tenant field and the tracking column allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConventions {
	tenant_field: String,
	tracking_columns: Vec<String>,
}

static PLATFORM: LazyLock<FieldConventions> = LazyLock::new(FieldConventions::default);

impl FieldConventions {
	/// Creates validated conventions.
	pub fn new(
		tenant_field: impl Into<String>,
		tracking_columns: impl IntoIterator<Item = impl Into<String>>,
	) -> Result<Self, ConventionsError> {
		let tenant_field = tenant_field.into();
		if tenant_field.is_empty() {
			return Err(ConventionsError::EmptyTenantField);
		}

		let tracking_columns: Vec<String> = tracking_columns.into_iter().map(Into::into).collect();
		let mut seen = HashSet::default();
		for column in &tracking_columns {
			if column.is_empty() {
				return Err(ConventionsError::EmptyTrackingColumn);
			}
			if *column == tenant_field {
				return Err(ConventionsError::TenantFieldIsTracking(tenant_field));
			}
			if !seen.insert(column.as_str()) {
				return Err(ConventionsError::DuplicateTrackingColumn(column.clone()));
			}
		}

		Ok(Self {
			tenant_field,
			tracking_columns,
		})
	}

	/// Returns the shared platform conventions.
	pub fn platform() -> &'static FieldConventions {
		&PLATFORM
	}

	pub fn tenant_field(&self) -> &str {
		&self.tenant_field
	}

	pub fn tracking_columns(&self) -> &[String] {
		&self.tracking_columns
	}

	#[inline]
	pub fn is_tenant_field(&self, field: &str) -> bool {
		field == self.tenant_field
	}

	/// Linear scan; the allow-list is a handful of entries.
	#[inline]
	pub fn is_tracking_column(&self, field: &str) -> bool {
		self.tracking_columns.iter().any(|c| c == field)
	}
}

impl Default for FieldConventions {
	fn default() -> Self {
		Self {
			tenant_field: TENANT_FIELD.to_string(),
			tracking_columns: TRACKING_COLUMNS.iter().map(|c| c.to_string()).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn platform_defaults() {
		let conv = FieldConventions::platform();
		assert_eq!(conv.tenant_field(), "tenantId");
		assert_eq!(conv.tracking_columns().len(), 7);
		assert!(conv.is_tracking_column("mTimestamp"));
		assert!(!conv.is_tracking_column("cTechUserId"));
		assert!(conv.is_tenant_field("tenantId"));
		assert!(!conv.is_tenant_field("tenantRef"));
	}

	#[test]
	fn custom_conventions() {
		let conv = FieldConventions::new("tenantRef", ["createdAt", "updatedAt"]).unwrap();
		assert!(conv.is_tenant_field("tenantRef"));
		assert!(conv.is_tracking_column("updatedAt"));
		assert!(!conv.is_tracking_column("version"));
	}

	#[test]
	fn rejects_tenant_field_as_tracking_column() {
		assert_eq!(
			FieldConventions::new("version", TRACKING_COLUMNS),
			Err(ConventionsError::TenantFieldIsTracking("version".into()))
		);
	}

	#[test]
	fn rejects_duplicate_tracking_column() {
		assert_eq!(
			FieldConventions::new("tenantId", ["version", "version"]),
			Err(ConventionsError::DuplicateTrackingColumn("version".into()))
		);
	}

	#[test]
	fn rejects_empty_names() {
		assert_eq!(
			FieldConventions::new("", TRACKING_COLUMNS),
			Err(ConventionsError::EmptyTenantField)
		);
		assert_eq!(
			FieldConventions::new("tenantId", [""]),
			Err(ConventionsError::EmptyTrackingColumn)
		);
	}
}
