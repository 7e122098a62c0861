//! Immutable code registry.
//!
//! # Purpose
//!
//! Maps every known return code to its symbolic name and human description.
//!
//! # Mental Model
//!
//! 1. **Build Phase:** each module hands its static [`CodeDef`] table to a
//!    [`CodeRegistryBuilder`] during startup.
//! 2. **Publication:** [`CodeRegistryBuilder::build`] validates all definitions at once
//!    and produces a [`CodeRegistry`]. Either every definition is accepted or none is.
//! 3. **Consumption:** the registry is passed by reference to whoever needs descriptions.
//!    It has no mutation API, so sharing it across threads needs no locking.
//!
//! [`CodeRegistry::builtin`] holds the platform catalogs in a lazily built static for
//! callers that have no explicit registry at hand.
//!
//! # Invariants
//!
//! - Every registered code decodes to a classification in `[1, 10)`.
//!   - Enforced in: [`CodeRegistryBuilder::build`].
//!   - Tested by: `tests::rejects_success_class_code`, `tests::builtin_codes_are_error_codes`.
//!   - Failure symptom: descriptions registered for codes no error can ever carry.
//!
//! - One definition per code and per name.
//!   - Enforced in: [`CodeRegistryBuilder::build`].
//!   - Tested by: `tests::rejects_duplicate_code`, `tests::rejects_duplicate_name`.
//!   - Failure symptom: the description of a code depends on registration order.

use std::sync::LazyLock;

use rustc_hash::FxHashMap as HashMap;

use crate::catalog;
use crate::classification::Classification;
use crate::code::ReturnCode;

/// Static definition of one return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeDef {
	pub code: i32,
	pub name: &'static str,
	pub description: &'static str,
}

impl CodeDef {
	/// Creates a code definition.
	pub const fn new(code: i32, name: &'static str, description: &'static str) -> Self {
		Self {
			code,
			name,
			description,
		}
	}

	/// Returns the code as a [`ReturnCode`].
	pub const fn return_code(&self) -> ReturnCode {
		ReturnCode::from_raw(self.code)
	}

	/// Returns the decoded classification.
	pub const fn classification(&self) -> Option<Classification> {
		Classification::from_code(self.code)
	}
}

/// Registry build errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// Two definitions share a code.
	#[error("duplicate code {code}: existing={existing} new={incoming}")]
	DuplicateCode {
		code: i32,
		existing: &'static str,
		incoming: &'static str,
	},
	/// Two definitions share a symbolic name.
	#[error("duplicate name {name}: existing={existing} new={incoming}")]
	DuplicateName {
		name: &'static str,
		existing: i32,
		incoming: i32,
	},
	/// A definition does not carry an error classification.
	#[error("code {code} ({name}) has classification {classification}, expected 1..=9")]
	InvalidClassification {
		code: i32,
		name: &'static str,
		classification: i32,
	},
}

/// Collects code definitions during startup.
pub struct CodeRegistryBuilder {
	label: &'static str,
	defs: Vec<CodeDef>,
}

impl CodeRegistryBuilder {
	/// Creates a new builder with the given label for diagnostics.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			defs: Vec::new(),
		}
	}

	/// Creates a builder preloaded with the platform catalogs.
	pub fn with_builtins(label: &'static str) -> Self {
		let mut builder = Self::new(label);
		for defs in catalog::BUILTIN {
			builder.register_all(defs);
		}
		builder
	}

	/// Returns the number of definitions registered so far.
	pub fn len(&self) -> usize {
		self.defs.len()
	}

	/// Returns true if nothing has been registered so far.
	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}

	/// Registers a single code.
	pub fn register(&mut self, def: CodeDef) -> &mut Self {
		self.defs.push(def);
		self
	}

	/// Registers a code from its parts.
	pub fn register_code(&mut self, code: i32, name: &'static str, description: &'static str) -> &mut Self {
		self.register(CodeDef::new(code, name, description))
	}

	/// Registers a module's code table.
	pub fn register_all(&mut self, defs: &[CodeDef]) -> &mut Self {
		self.defs.extend_from_slice(defs);
		self
	}

	/// Validates all definitions and produces the immutable registry.
	pub fn build(self) -> Result<CodeRegistry, RegistryError> {
		let mut defs = self.defs;
		defs.sort_by_key(|d| d.code);

		let mut by_code = HashMap::with_capacity_and_hasher(defs.len(), Default::default());
		let mut by_name: HashMap<&'static str, usize> =
			HashMap::with_capacity_and_hasher(defs.len(), Default::default());

		for (idx, def) in defs.iter().enumerate() {
			let rc = def.return_code();
			if !rc.is_valid_error_code() {
				return Err(RegistryError::InvalidClassification {
					code: def.code,
					name: def.name,
					classification: rc.classification_value(),
				});
			}
			if let Some(&prev) = by_code.get(&def.code) {
				let existing: &CodeDef = &defs[prev];
				return Err(RegistryError::DuplicateCode {
					code: def.code,
					existing: existing.name,
					incoming: def.name,
				});
			}
			if let Some(&prev) = by_name.get(def.name) {
				return Err(RegistryError::DuplicateName {
					name: def.name,
					existing: defs[prev].code,
					incoming: def.code,
				});
			}
			by_code.insert(def.code, idx);
			by_name.insert(def.name, idx);
		}

		tracing::debug!(registry = self.label, count = defs.len(), "code registry built");

		Ok(CodeRegistry {
			label: self.label,
			table: defs.into_boxed_slice(),
			by_code,
			by_name,
		})
	}
}

/// Immutable lookup table from return code to name and description.
#[derive(Debug)]
pub struct CodeRegistry {
	label: &'static str,
	/// Sorted by code.
	table: Box<[CodeDef]>,
	by_code: HashMap<i32, usize>,
	by_name: HashMap<&'static str, usize>,
}

static BUILTIN: LazyLock<CodeRegistry> = LazyLock::new(|| {
	CodeRegistryBuilder::with_builtins("builtin")
		.build()
		.expect("builtin code catalogs must be consistent")
});

impl CodeRegistry {
	/// Returns the process-wide registry of platform codes.
	pub fn builtin() -> &'static CodeRegistry {
		&BUILTIN
	}

	/// Returns the diagnostic label.
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Looks up a definition by code.
	#[inline]
	pub fn get(&self, code: impl Into<ReturnCode>) -> Option<&CodeDef> {
		let code = code.into().raw();
		self.by_code.get(&code).map(|&idx| &self.table[idx])
	}

	/// Looks up a definition by symbolic name.
	#[inline]
	pub fn by_name(&self, name: &str) -> Option<&CodeDef> {
		self.by_name.get(name).map(|&idx| &self.table[idx])
	}

	/// Returns the registered description.
	pub fn description(&self, code: impl Into<ReturnCode>) -> Option<&'static str> {
		self.get(code).map(|d| d.description)
	}

	/// Returns a text representation of a code, with a fallback for unknown codes.
	pub fn code_to_string(&self, code: impl Into<ReturnCode>) -> String {
		let code = code.into();
		match self.description(code) {
			Some(desc) => desc.to_string(),
			None => format!("unknown return code {code}"),
		}
	}

	/// Returns true if the code is registered.
	pub fn contains(&self, code: impl Into<ReturnCode>) -> bool {
		self.get(code).is_some()
	}

	/// Returns all definitions in ascending code order.
	pub fn iter(&self) -> impl Iterator<Item = &CodeDef> + '_ {
		self.table.iter()
	}

	/// Returns the definitions of one classification in ascending code order.
	pub fn iter_classification(&self, classification: Classification) -> impl Iterator<Item = &CodeDef> + '_ {
		self.table
			.iter()
			.filter(move |d| d.classification() == Some(classification))
	}

	/// Returns the number of registered codes.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}
}
