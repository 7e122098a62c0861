//! Subcommand implementations. Output goes to a writer so tests can capture it.

use std::io::{self, Write};

use t9t_codes::{Classification, CodeRegistry, ReturnCode};
use t9t_fields::{FieldConventions, remove_prefix, strip_indexes};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
	#[error(transparent)]
	Io(#[from] io::Error),
	#[error("'{0}' is neither a numeric return code nor a registered code name")]
	UnknownCode(String),
}

/// Lists registered codes, optionally restricted to one classification.
pub fn list_codes(
	registry: &CodeRegistry,
	classification: Option<Classification>,
	out: &mut impl Write,
) -> Result<(), CommandError> {
	let mut shown = 0usize;
	for def in registry.iter() {
		if classification.is_some_and(|cl| def.classification() != Some(cl)) {
			continue;
		}
		writeln!(out, "{:>10}  {:<42} {}", def.code, def.name, def.description)?;
		shown += 1;
	}
	tracing::debug!(registry = registry.label(), shown, "listed codes");
	Ok(())
}

/// Prints everything derived from one return code, given as number or name.
pub fn explain_code(registry: &CodeRegistry, code: &str, out: &mut impl Write) -> Result<(), CommandError> {
	let rc = match code.parse::<i32>() {
		Ok(raw) => ReturnCode::from_raw(raw),
		Err(_) => registry
			.by_name(code)
			.map(|def| def.return_code())
			.ok_or_else(|| CommandError::UnknownCode(code.to_string()))?,
	};
	let def = registry.get(rc);
	let classification = match rc.classification() {
		Some(cl) => cl.name().to_string(),
		None => format!("unassigned ({})", rc.classification_value()),
	};

	writeln!(out, "code:           {rc}")?;
	writeln!(out, "classification: {classification}")?;
	writeln!(out, "name:           {}", def.map_or("-", |d| d.name))?;
	writeln!(out, "description:    {}", registry.code_to_string(rc))?;
	writeln!(out, "valid error:    {}", rc.is_valid_error_code())?;
	writeln!(out, "rollback:       {}", rc.implies_rollback())?;
	writeln!(out, "http status:    {}", rc.http_status())?;
	writeln!(out, "stack trace:    {}", rc.logs_stack_trace())?;
	Ok(())
}

/// Field path operations.
#[derive(Debug, Clone, PartialEq, Eq, clap::Subcommand)]
pub enum PathOp {
	/// Print the root scope a field belongs to
	Scope { field: String },
	/// Convert a DTO-relative name to a wrapper-relative one
	Prefix { field: String },
	/// Strip a leading `data.` or `tracking.`
	Unprefix { path: String },
	/// Remove bracketed array indexes
	Strip { path: String },
}

pub fn path_op(conventions: &FieldConventions, op: &PathOp, out: &mut impl Write) -> Result<(), CommandError> {
	match op {
		PathOp::Scope { field } => writeln!(out, "{}", conventions.classify(field))?,
		PathOp::Prefix { field } => writeln!(out, "{}", conventions.add_prefix(field))?,
		PathOp::Unprefix { path } => writeln!(out, "{}", remove_prefix(path))?,
		PathOp::Strip { path } => writeln!(out, "{}", strip_indexes(path))?,
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use t9t_codes::catalog::base;

	use super::*;

	fn capture(f: impl FnOnce(&mut Vec<u8>) -> Result<(), CommandError>) -> String {
		let mut out = Vec::new();
		f(&mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn explain_by_number() {
		let text = capture(|out| explain_code(CodeRegistry::builtin(), "400020003", out));
		assert_eq!(
			text,
			"code:           400020003\n\
			 classification: parameter-error\n\
			 name:           RECORD_DOES_NOT_EXIST\n\
			 description:    Attempted to access a record which does not exist\n\
			 valid error:    true\n\
			 rollback:       true\n\
			 http status:    400\n\
			 stack trace:    false\n"
		);
	}

	#[test]
	fn explain_by_name_and_unknown() {
		let text = capture(|out| explain_code(CodeRegistry::builtin(), "T9T_ACCESS_DENIED", out));
		assert!(text.contains("rollback:       false"));
		assert!(text.contains("http status:    406"));

		let text = capture(|out| explain_code(CodeRegistry::builtin(), "650000000", out));
		assert!(text.contains("classification: unassigned (6)"));
		assert!(text.contains("name:           -"));
		assert!(text.contains("rollback:       true"));

		let err = explain_code(CodeRegistry::builtin(), "NO_SUCH_CODE", &mut Vec::<u8>::new()).unwrap_err();
		assert!(matches!(err, CommandError::UnknownCode(ref c) if c == "NO_SUCH_CODE"));
	}

	#[test]
	fn list_filters_by_classification() {
		let text = capture(|out| list_codes(CodeRegistry::builtin(), Some(Classification::DatabaseError), out));
		assert!(text.contains("JTA_EXCEPTION"));
		assert!(!text.contains("RECORD_DOES_NOT_EXIST"));
		for line in text.lines() {
			let code: i32 = line.split_whitespace().next().unwrap().parse().unwrap();
			assert_eq!(code / 100_000_000, 9);
		}

		let all = capture(|out| list_codes(CodeRegistry::builtin(), None, out));
		assert_eq!(all.lines().count(), CodeRegistry::builtin().len());
		assert!(all.contains(&base::GENERAL_EXCEPTION.to_string()));
	}

	#[rstest]
	#[case(PathOp::Scope { field: "version".into() }, "tracking\n")]
	#[case(PathOp::Scope { field: "tenantId".into() }, "tenant\n")]
	#[case(PathOp::Prefix { field: "name".into() }, "data.name\n")]
	#[case(PathOp::Prefix { field: "tenantId".into() }, "tenantId\n")]
	#[case(PathOp::Unprefix { path: "tracking.mTimestamp".into() }, "mTimestamp\n")]
	#[case(PathOp::Strip { path: "a[0].b[12].c".into() }, "a.b.c\n")]
	#[case(PathOp::Strip { path: "a[0.b".into() }, "a[0.b\n")]
	fn path_operations(#[case] op: PathOp, #[case] expected: &str) {
		let text = capture(|out| path_op(FieldConventions::platform(), &op, out));
		assert_eq!(text, expected);
	}

	#[test]
	fn configured_conventions_drive_prefixing() {
		let conventions = FieldConventions::new("tenantRef", ["updatedAt"]).unwrap();
		let op = PathOp::Prefix { field: "updatedAt".into() };
		assert_eq!(capture(|out| path_op(&conventions, &op, out)), "tracking.updatedAt\n");
	}
}
