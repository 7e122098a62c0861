//! Field naming conventions and field metadata of the t9t platform.
//!
//! - [`path`] - root scope classification, prefix mapping and index stripping
//! - [`schema`] - static field tables and path lookup
//! - [`FieldResolver`] - picks the schema of a CRUD view a field belongs to
//! - [`Variant`] - scalar field values
//! - [`map_enum`] / [`index_by_ref`] - small record utilities

mod conventions;
mod enums;
mod index;
pub mod path;
mod resolver;
pub mod schema;
mod variant;

pub use conventions::{ConventionsError, FieldConventions, TENANT_FIELD, TRACKING_COLUMNS};
pub use enums::{NamedEnum, map_enum};
pub use index::{Keyed, index_by_ref, index_into};
pub use path::{RootScope, add_prefix, classify, is_tenant_field, is_tracking_column, remove_prefix, strip_indexes};
pub use resolver::{CrudViewModel, FieldResolver, TENANT_SCHEMA};
pub use schema::{FieldDescriptor, FieldKind, Multiplicity, SchemaError, SchemaProvider, StaticSchema};
pub use variant::{Variant, VariantKind, VariantParseError};
