//! Platform error carrying a return code.
//!
//! # Invariants
//!
//! - The code of a constructed error always lies in an error classification `[1, 10)`.
//!   An invalid code is replaced with [`ReturnCode::INVALID_EXCEPTION_CODE`] and logged
//!   with a backtrace, the original value is kept in the detail.
//!   - Enforced in: [`T9tError::with_detail`].
//!   - Tested by: `tests::invalid_code_is_replaced_by_sentinel`.
//!   - Failure symptom: a success code travels as an error and the caller commits.

use std::backtrace::Backtrace;
use std::fmt::{self, Display};

use crate::catalog::base as codes;
use crate::classification::Classification;
use crate::code::ReturnCode;
use crate::registry::CodeRegistry;

/// Error raised by platform operations, identified by its return code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct T9tError {
	code: ReturnCode,
	detail: Option<String>,
}

impl T9tError {
	/// Creates an error without detail.
	pub fn new(code: impl Into<ReturnCode>) -> Self {
		Self::with_detail(code, None::<String>)
	}

	/// Creates an error with an optional detail message.
	pub fn with_detail(code: impl Into<ReturnCode>, detail: Option<impl Into<String>>) -> Self {
		let code = code.into();
		let detail = detail.map(Into::into);
		if code.is_valid_error_code() {
			return Self { code, detail };
		}

		let backtrace = Backtrace::force_capture();
		tracing::error!(
			code = code.raw(),
			detail = detail.as_deref().unwrap_or(""),
			%backtrace,
			"error constructed with invalid return code"
		);
		let detail = match detail {
			Some(d) => format!("invalid code {code}: {d}"),
			None => format!("invalid code {code}"),
		};
		Self {
			code: ReturnCode::INVALID_EXCEPTION_CODE,
			detail: Some(detail),
		}
	}

	/// Creates an error whose detail lists the given parameters.
	///
	/// No parameter leaves the detail empty, a single one is used verbatim and several
	/// are rendered as `[ a, b ]`. Missing values print as `NULL`.
	pub fn with_params<P: Display>(code: impl Into<ReturnCode>, params: &[Option<P>]) -> Self {
		Self::with_detail(code, params_string(params))
	}

	/// Shorthand for a failed lookup, naming what was looked for.
	pub fn record_does_not_exist(context: impl Into<String>) -> Self {
		Self::with_detail(codes::RECORD_DOES_NOT_EXIST, Some(context))
	}

	pub fn code(&self) -> ReturnCode {
		self.code
	}

	pub fn classification(&self) -> Option<Classification> {
		self.code.classification()
	}

	pub fn detail(&self) -> Option<&str> {
		self.detail.as_deref()
	}

	/// Returns true if the surrounding transaction must be rolled back.
	pub fn implies_rollback(&self) -> bool {
		self.code.implies_rollback()
	}

	/// Renders the error with descriptions from the given registry.
	pub fn describe(&self, registry: &CodeRegistry) -> String {
		render(self.code, self.detail.as_deref(), registry)
	}
}

impl fmt::Display for T9tError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.describe(CodeRegistry::builtin()))
	}
}

impl std::error::Error for T9tError {}

fn render(code: ReturnCode, detail: Option<&str>, registry: &CodeRegistry) -> String {
	let text = registry.code_to_string(code);
	match detail {
		Some(detail) => format!("({code}) {text}: {detail}"),
		None => format!("({code}) {text}"),
	}
}

fn params_string<P: Display>(params: &[Option<P>]) -> Option<String> {
	fn one<P: Display>(p: &Option<P>) -> String {
		match p {
			Some(p) => p.to_string(),
			None => "NULL".to_string(),
		}
	}

	match params {
		[] => None,
		[single] => Some(one(single)),
		many => {
			let joined = many.iter().map(one).collect::<Vec<_>>().join(", ");
			Some(format!("[ {joined} ]"))
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[test]
	fn invalid_code_is_replaced_by_sentinel() {
		let err = T9tError::new(208);
		assert_eq!(err.code(), ReturnCode::INVALID_EXCEPTION_CODE);
		assert_eq!(err.classification(), Some(Classification::InternalLogicError));
		assert_eq!(err.detail(), Some("invalid code 208"));
		assert!(err.implies_rollback());
	}

	#[test]
	fn valid_code_is_kept() {
		let err = T9tError::with_detail(codes::TOO_MANY_RECORDS, Some("limit 100"));
		assert_eq!(err.code().raw(), codes::TOO_MANY_RECORDS);
		assert_eq!(err.detail(), Some("limit 100"));
	}

	#[rstest]
	#[case(&[], None)]
	#[case(&[Some("a")], Some("a"))]
	#[case(&[None], Some("NULL"))]
	#[case(&[Some("a"), None, Some("c")], Some("[ a, NULL, c ]"))]
	fn params_rendering(#[case] params: &[Option<&str>], #[case] expected: Option<&str>) {
		let err = T9tError::with_params(codes::MISSING_PARAMETER, params);
		assert_eq!(err.detail(), expected);
	}

	#[test]
	fn display_uses_builtin_descriptions() {
		let err = T9tError::record_does_not_exist("currency EUR");
		assert_eq!(
			err.to_string(),
			"(400020003) Attempted to access a record which does not exist: currency EUR"
		);
		assert!(err.implies_rollback());
	}

	#[test]
	fn describe_falls_back_for_unknown_codes() {
		let registry = crate::CodeRegistryBuilder::new("empty").build().unwrap();
		let err = T9tError::new(codes::ENUM_MAPPING);
		assert_eq!(err.describe(&registry), "(400020131) unknown return code 400020131");
	}
}
