//! Schema lookup for wrapper-relative field names.
//!
//! # Role
//!
//! A CRUD view exposes a DTO together with its tracking columns and the tenant
//! reference. [`FieldResolver`] decides which of the three schemas a field name
//! belongs to and delegates the path lookup to it.

use crate::conventions::{FieldConventions, TENANT_FIELD};
use crate::path::RootScope;
use crate::schema::{FieldDescriptor, FieldKind, SchemaError, SchemaProvider, StaticSchema};

/// Schema of the root-level tenant reference under the platform conventions.
pub static TENANT_SCHEMA: StaticSchema = StaticSchema {
	name: "TenantRef",
	fields: &[FieldDescriptor::new(TENANT_FIELD, FieldKind::Text).required()],
};

/// Schemas of one CRUD view: the DTO and, for tracked records, the tracking columns.
#[derive(Clone, Copy)]
pub struct CrudViewModel<'a> {
	pub data: &'a dyn SchemaProvider,
	pub tracking: Option<&'a dyn SchemaProvider>,
}

impl<'a> CrudViewModel<'a> {
	/// A plain DTO without tracking columns.
	pub fn plain(data: &'a dyn SchemaProvider) -> Self {
		Self { data, tracking: None }
	}

	pub fn tracked(data: &'a dyn SchemaProvider, tracking: &'a dyn SchemaProvider) -> Self {
		Self {
			data,
			tracking: Some(tracking),
		}
	}
}

impl core::fmt::Debug for CrudViewModel<'_> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("CrudViewModel")
			.field("data", &self.data.schema_name())
			.field("tracking", &self.tracking.map(|t| t.schema_name()))
			.finish()
	}
}

/// Resolves field names of CRUD views to their metadata.
pub struct FieldResolver<'s> {
	conventions: FieldConventions,
	tenant: &'s dyn SchemaProvider,
}

impl FieldResolver<'static> {
	/// Resolver with the platform conventions and tenant schema.
	pub fn platform() -> Self {
		Self::new(FieldConventions::default(), &TENANT_SCHEMA)
	}
}

impl<'s> FieldResolver<'s> {
	pub fn new(conventions: FieldConventions, tenant: &'s dyn SchemaProvider) -> Self {
		Self { conventions, tenant }
	}

	pub fn conventions(&self) -> &FieldConventions {
		&self.conventions
	}

	/// Returns the descriptor of a field, picking the schema by the field's root scope.
	///
	/// Views without tracking columns resolve every name against the DTO.
	pub fn field_definition_for_path<'a>(
		&'a self,
		field: &str,
		model: &CrudViewModel<'a>,
	) -> Result<&'a FieldDescriptor, SchemaError> {
		let Some(tracking) = model.tracking else {
			return model.data.lookup(field);
		};
		match self.conventions.classify(field) {
			RootScope::Tenant => self.tenant.lookup(field),
			RootScope::Tracking => tracking.lookup(field),
			RootScope::Data => model.data.lookup(field),
		}
	}
}
