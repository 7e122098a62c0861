//! Return code value type and the policies derived from its classification.
//!
//! # Role
//!
//! A return code is `classification * CLASSIFICATION_FACTOR + module_offset + sequence`.
//! This module owns the composition and every decision that only depends on the
//! classification digit.
//!
//! # Invariants
//!
//! - Rollback is decided by an allow-list: only success and denied proceed. Any other
//!   classification, including unassigned or out-of-range values, rolls back.
//!   - Enforced in: [`code_implies_rollback`].
//!   - Tested by: `tests::rollback_allow_list`, `tests/rollback.rs`.
//!   - Failure symptom: a new failure class silently commits partial work.

use crate::catalog::base as codes;
use crate::classification::{CLASSIFICATION_FACTOR, Classification};

/// Numeric base of one module's code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleOffset(i32);

impl ModuleOffset {
	/// Codes owned by the platform core.
	pub const CORE: ModuleOffset = ModuleOffset(20_000);
	/// Codes owned by the input/output module.
	pub const IO: ModuleOffset = ModuleOffset(28_000);

	/// Creates an offset for a module range.
	pub const fn new(offset: i32) -> Self {
		Self(offset)
	}

	/// Returns the raw offset.
	pub const fn value(self) -> i32 {
		self.0
	}

	/// Returns the base of this module's range within a classification.
	pub const fn base(self, classification: Classification) -> i32 {
		classification.base() + self.0
	}

	/// Composes a code in this module's range.
	///
	/// The offset plus `sequence` must stay below [`CLASSIFICATION_FACTOR`]; larger
	/// values overflow into the next classification or past `i32::MAX`. Use
	/// [`Self::checked_code`] for values that are not compile-time constants.
	pub const fn code(self, classification: Classification, sequence: i32) -> ReturnCode {
		ReturnCode(self.base(classification) + sequence)
	}

	/// Composes a code, or `None` if offset and sequence leave the classification's range.
	pub const fn checked_code(self, classification: Classification, sequence: i32) -> Option<ReturnCode> {
		let Some(local) = self.0.checked_add(sequence) else {
			return None;
		};
		if local < 0 || local >= CLASSIFICATION_FACTOR {
			return None;
		}
		Some(ReturnCode(classification.base() + local))
	}
}

/// A platform return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReturnCode(i32);

impl ReturnCode {
	/// Plain success.
	pub const OK: ReturnCode = ReturnCode(0);

	/// Replacement for codes that do not carry a valid error classification.
	pub const INVALID_EXCEPTION_CODE: ReturnCode =
		ReturnCode(Classification::InternalLogicError.base() + 1);

	/// Wraps a raw code without validation.
	pub const fn from_raw(code: i32) -> Self {
		Self(code)
	}

	/// Composes `classification * FACTOR + offset + sequence`.
	///
	/// Same precondition as [`ModuleOffset::code`].
	pub const fn new(classification: Classification, offset: ModuleOffset, sequence: i32) -> Self {
		offset.code(classification, sequence)
	}

	/// Like [`Self::new`], but `None` if offset and sequence do not fit one classification.
	pub const fn checked_new(classification: Classification, offset: ModuleOffset, sequence: i32) -> Option<Self> {
		offset.checked_code(classification, sequence)
	}

	/// Returns the raw integer.
	pub const fn raw(self) -> i32 {
		self.0
	}

	/// Returns `code / CLASSIFICATION_FACTOR`, truncated toward zero.
	pub const fn classification_value(self) -> i32 {
		self.0 / CLASSIFICATION_FACTOR
	}

	/// Returns the decoded classification, if assigned.
	pub const fn classification(self) -> Option<Classification> {
		Classification::from_raw(self.classification_value())
	}

	/// Returns true if the classification lies in `[1, 10)`.
	pub const fn is_valid_error_code(self) -> bool {
		let cl = self.classification_value();
		cl >= 1 && cl < 10
	}

	/// Returns true if a transaction answered with this code must be rolled back.
	pub const fn implies_rollback(self) -> bool {
		code_implies_rollback(self.0)
	}

	/// Returns true if errors of this class are logged with a full stack trace.
	pub const fn logs_stack_trace(self) -> bool {
		matches!(
			self.classification(),
			Some(Classification::InternalLogicError | Classification::DatabaseError)
		)
	}

	/// Maps the code to the HTTP status a REST gateway answers with.
	pub const fn http_status(self) -> u16 {
		match self.0 {
			codes::NOT_AUTHORIZED
			| codes::NOT_AUTHENTICATED
			| codes::ACCESS_DENIED
			| codes::USER_INACTIVE
			| codes::USER_NOT_FOUND => 401,
			codes::NOT_YET_IMPLEMENTED => 501,
			_ => match self.classification() {
				Some(Classification::Success) => 200,
				Some(Classification::Denied) => 406,
				Some(Classification::ParserError | Classification::ParameterError) => 400,
				Some(Classification::Timeout) => 504,
				_ => 500,
			},
		}
	}
}

impl From<i32> for ReturnCode {
	fn from(code: i32) -> Self {
		Self(code)
	}
}

impl From<ReturnCode> for i32 {
	fn from(code: ReturnCode) -> Self {
		code.0
	}
}

impl core::fmt::Display for ReturnCode {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Decision function: does this return code require a rollback?
///
/// False only for the success and denied classifications.
pub const fn code_implies_rollback(return_code: i32) -> bool {
	let classification = return_code / CLASSIFICATION_FACTOR;
	!(classification == Classification::Success.value() || classification == Classification::Denied.value())
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn compose_matches_layout() {
		let code = ReturnCode::new(Classification::ParameterError, ModuleOffset::CORE, 1);
		assert_eq!(code.raw(), 400_020_001);
		assert_eq!(code.classification(), Some(Classification::ParameterError));
		assert_eq!(ModuleOffset::IO.code(Classification::Denied, 333).raw(), 100_028_333);
	}

	#[rstest]
	#[case(ModuleOffset::CORE, 1, Some(400_020_001))]
	#[case(ModuleOffset::CORE, 99_979_999, Some(499_999_999))]
	#[case(ModuleOffset::CORE, 99_980_000, None)]
	#[case(ModuleOffset::CORE, -20_001, None)]
	#[case(ModuleOffset::new(i32::MAX), 1, None)]
	fn checked_composition_stays_in_classification(
		#[case] offset: ModuleOffset,
		#[case] sequence: i32,
		#[case] expected: Option<i32>,
	) {
		let code = ReturnCode::checked_new(Classification::ParameterError, offset, sequence);
		assert_eq!(code.map(ReturnCode::raw), expected);
		if let Some(code) = code {
			assert_eq!(code, ReturnCode::new(Classification::ParameterError, offset, sequence));
		}
	}

	#[rstest]
	#[case(0, false)]
	#[case(208, false)]
	#[case(100_020_030, false)]
	#[case(200_000_001, true)]
	#[case(400_020_001, true)]
	#[case(500_020_042, true)]
	#[case(650_000_000, true)]
	#[case(800_020_018, true)]
	#[case(900_020_022, true)]
	#[case(i32::MAX, true)]
	#[case(-100_000_000, true)]
	fn rollback_allow_list(#[case] code: i32, #[case] expected: bool) {
		assert_eq!(code_implies_rollback(code), expected);
		assert_eq!(ReturnCode::from_raw(code).implies_rollback(), expected);
	}

	#[rstest]
	#[case(0, false)]
	#[case(99_999_999, false)]
	#[case(100_000_000, true)]
	#[case(999_999_999, true)]
	#[case(1_000_000_000, false)]
	#[case(-5, false)]
	fn validity_range(#[case] code: i32, #[case] expected: bool) {
		assert_eq!(ReturnCode::from_raw(code).is_valid_error_code(), expected);
	}

	#[test]
	fn sentinel_is_a_valid_internal_logic_error() {
		let code = ReturnCode::INVALID_EXCEPTION_CODE;
		assert!(code.is_valid_error_code());
		assert_eq!(code.classification(), Some(Classification::InternalLogicError));
		assert!(code.implies_rollback());
		assert!(code.logs_stack_trace());
	}

	#[rstest]
	#[case(codes::NOT_AUTHENTICATED, 401)]
	#[case(codes::ACCESS_DENIED, 401)]
	#[case(codes::NOT_YET_IMPLEMENTED, 501)]
	#[case(codes::T9T_ACCESS_DENIED, 406)]
	#[case(codes::RECORD_DOES_NOT_EXIST, 400)]
	#[case(codes::COULD_NOT_ACQUIRE_LOCK, 504)]
	#[case(codes::REQUEST_VALIDATION_ERROR, 500)]
	#[case(codes::GENERAL_EXCEPTION, 500)]
	#[case(codes::PASSWORD_EXPIRED, 200)]
	fn http_status_mapping(#[case] code: i32, #[case] status: u16) {
		assert_eq!(ReturnCode::from_raw(code).http_status(), status);
	}
}
