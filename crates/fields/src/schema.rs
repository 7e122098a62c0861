//! Static field metadata and path lookup.
//!
//! # Mental Model
//!
//! Every record type publishes a [`StaticSchema`]: a name plus a table of
//! [`FieldDescriptor`]s. Nested records are reached through [`FieldKind::Object`],
//! which points at the nested type's schema. A path is a dot separated walk through
//! these tables; a segment may carry one `[n]` index if the field is multi-valued.
//!
//! Lookup goes through the [`SchemaProvider`] trait so callers can plug in metadata
//! that is not known at compile time.

use crate::variant::VariantKind;

/// Value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	Int,
	Long,
	Bool,
	Decimal,
	Text,
	Day,
	Instant,
	/// Enum stored by its token name.
	Enum,
	/// Nested record with its own schema.
	Object(&'static StaticSchema),
}

impl FieldKind {
	/// Returns the scalar variant kind carrying values of this field.
	pub const fn variant_kind(self) -> Option<VariantKind> {
		match self {
			Self::Int => Some(VariantKind::Int),
			Self::Long => Some(VariantKind::Long),
			Self::Bool => Some(VariantKind::Bool),
			Self::Decimal => Some(VariantKind::Num),
			Self::Text | Self::Enum => Some(VariantKind::Text),
			Self::Day => Some(VariantKind::Day),
			Self::Instant => Some(VariantKind::Instant),
			Self::Object(_) => None,
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			Self::Int => "int",
			Self::Long => "long",
			Self::Bool => "bool",
			Self::Decimal => "decimal",
			Self::Text => "text",
			Self::Day => "day",
			Self::Instant => "instant",
			Self::Enum => "enum",
			Self::Object(schema) => schema.name,
		}
	}
}

/// Number of values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
	Single,
	List,
}

/// Metadata of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
	pub name: &'static str,
	pub kind: FieldKind,
	pub multiplicity: Multiplicity,
	pub required: bool,
}

impl FieldDescriptor {
	/// Optional single-valued field.
	pub const fn new(name: &'static str, kind: FieldKind) -> Self {
		Self {
			name,
			kind,
			multiplicity: Multiplicity::Single,
			required: false,
		}
	}

	pub const fn required(self) -> Self {
		Self {
			required: true,
			..self
		}
	}

	pub const fn list(self) -> Self {
		Self {
			multiplicity: Multiplicity::List,
			..self
		}
	}

	pub const fn is_multi(&self) -> bool {
		matches!(self.multiplicity, Multiplicity::List)
	}
}

/// Lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	#[error("empty segment in field path '{path}'")]
	EmptySegment { path: String },
	#[error("{schema} has no field '{field}'")]
	UnknownField { schema: &'static str, field: String },
	#[error("badly formatted index in '{segment}': expected [digits]")]
	MalformedIndex { segment: String },
	#[error("{schema}.{field} is not multi-valued and cannot be indexed")]
	NotIndexable { schema: &'static str, field: &'static str },
	#[error("{schema}.{field} is not a nested object")]
	NotAnObject { schema: &'static str, field: &'static str },
}

/// Source of field metadata for one record type.
pub trait SchemaProvider {
	/// Returns the record type name.
	fn schema_name(&self) -> &str;

	/// Resolves a dotted path relative to this record type.
	fn lookup(&self, path: &str) -> Result<&FieldDescriptor, SchemaError>;
}

/// Compile-time field table of one record type.
#[derive(Debug, PartialEq, Eq)]
pub struct StaticSchema {
	pub name: &'static str,
	pub fields: &'static [FieldDescriptor],
}

impl StaticSchema {
	pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
		Self { name, fields }
	}

	/// Returns a direct field by name.
	pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
		self.fields.iter().find(|f| f.name == name)
	}
}

impl SchemaProvider for StaticSchema {
	fn schema_name(&self) -> &str {
		self.name
	}

	fn lookup(&self, path: &str) -> Result<&FieldDescriptor, SchemaError> {
		walk(self, path)
	}
}

/// Resolves `path` segment by segment. Field tables are static, so the result outlives `root`.
fn walk(root: &StaticSchema, path: &str) -> Result<&'static FieldDescriptor, SchemaError> {
	let mut schema = root;
	let mut segments = path.split('.').peekable();
	while let Some(segment) = segments.next() {
		let field = resolve_segment(schema, path, segment)?;
		if segments.peek().is_none() {
			return Ok(field);
		}
		schema = nested(schema, field)?;
	}
	Err(SchemaError::EmptySegment { path: path.to_string() })
}

fn resolve_segment(
	schema: &StaticSchema,
	path: &str,
	segment: &str,
) -> Result<&'static FieldDescriptor, SchemaError> {
	let (name, indexed) = split_index(segment)?;
	if name.is_empty() {
		return Err(SchemaError::EmptySegment { path: path.to_string() });
	}
	let fields: &'static [FieldDescriptor] = schema.fields;
	let field = fields
		.iter()
		.find(|f| f.name == name)
		.ok_or_else(|| SchemaError::UnknownField {
			schema: schema.name,
			field: name.to_string(),
		})?;
	if indexed && !field.is_multi() {
		return Err(SchemaError::NotIndexable {
			schema: schema.name,
			field: field.name,
		});
	}
	Ok(field)
}

fn nested(schema: &StaticSchema, field: &FieldDescriptor) -> Result<&'static StaticSchema, SchemaError> {
	match field.kind {
		FieldKind::Object(inner) => Ok(inner),
		_ => Err(SchemaError::NotAnObject {
			schema: schema.name,
			field: field.name,
		}),
	}
}

/// Splits `name[digits]` into the name and whether an index was present.
fn split_index(segment: &str) -> Result<(&str, bool), SchemaError> {
	let Some(open) = segment.find('[') else {
		return Ok((segment, false));
	};
	let malformed = || SchemaError::MalformedIndex {
		segment: segment.to_string(),
	};
	let digits = segment[open + 1..].strip_suffix(']').ok_or_else(malformed)?;
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return Err(malformed());
	}
	Ok((&segment[..open], true))
}
