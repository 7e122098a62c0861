//! Severity classes of return codes.
//!
//! # Role
//!
//! The classification is the leading decimal digit of a return code, obtained by
//! integer division by [`CLASSIFICATION_FACTOR`]. External callers decode it the
//! same way, so the numeric values here are a wire contract.

/// Divisor separating the classification from the module offset and sequence.
pub const CLASSIFICATION_FACTOR: i32 = 100_000_000;

/// Classification of a return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
	/// Processing completed; informational codes only.
	Success,
	/// A business decision declined the request. Not an error.
	Denied,
	/// The request could not be parsed.
	ParserError,
	/// Request or response failed validation.
	ValidationError,
	/// A parameter was missing or inconsistent.
	ParameterError,
	/// A timeout, lock contention or upstream availability problem.
	Timeout,
	/// A programming error inside the platform.
	InternalLogicError,
	/// A persistence layer failure.
	DatabaseError,
}

impl Classification {
	/// All assigned classifications in ascending numeric order.
	pub const ALL: [Classification; 8] = [
		Classification::Success,
		Classification::Denied,
		Classification::ParserError,
		Classification::ValidationError,
		Classification::ParameterError,
		Classification::Timeout,
		Classification::InternalLogicError,
		Classification::DatabaseError,
	];

	/// Returns the numeric classification value.
	pub const fn value(self) -> i32 {
		match self {
			Self::Success => 0,
			Self::Denied => 1,
			Self::ParserError => 2,
			Self::ValidationError => 3,
			Self::ParameterError => 4,
			Self::Timeout => 5,
			Self::InternalLogicError => 8,
			Self::DatabaseError => 9,
		}
	}

	/// Maps a raw classification value. 6 and 7 are unassigned.
	pub const fn from_raw(value: i32) -> Option<Self> {
		match value {
			0 => Some(Self::Success),
			1 => Some(Self::Denied),
			2 => Some(Self::ParserError),
			3 => Some(Self::ValidationError),
			4 => Some(Self::ParameterError),
			5 => Some(Self::Timeout),
			8 => Some(Self::InternalLogicError),
			9 => Some(Self::DatabaseError),
			_ => None,
		}
	}

	/// Decodes the classification of a raw return code.
	pub const fn from_code(code: i32) -> Option<Self> {
		Self::from_raw(code / CLASSIFICATION_FACTOR)
	}

	/// Returns the first code of this classification's range.
	pub const fn base(self) -> i32 {
		self.value() * CLASSIFICATION_FACTOR
	}

	/// Returns the lowercase name used in CLI output and config.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Success => "success",
			Self::Denied => "denied",
			Self::ParserError => "parser-error",
			Self::ValidationError => "validation-error",
			Self::ParameterError => "parameter-error",
			Self::Timeout => "timeout",
			Self::InternalLogicError => "internal-logic-error",
			Self::DatabaseError => "database-error",
		}
	}

	/// Parses a name as returned by [`Classification::name`].
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|cl| cl.name() == name)
	}
}

impl core::fmt::Display for Classification {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(0, Some(Classification::Success))]
	#[case(99_999_999, Some(Classification::Success))]
	#[case(100_000_000, Some(Classification::Denied))]
	#[case(400_020_001, Some(Classification::ParameterError))]
	#[case(600_000_000, None)]
	#[case(799_999_999, None)]
	#[case(800_020_018, Some(Classification::InternalLogicError))]
	#[case(900_020_022, Some(Classification::DatabaseError))]
	#[case(-1, Some(Classification::Success))]
	#[case(-100_000_000, None)]
	fn decodes_leading_digit(#[case] code: i32, #[case] expected: Option<Classification>) {
		assert_eq!(Classification::from_code(code), expected);
	}

	#[test]
	fn value_round_trips_through_from_raw() {
		for cl in Classification::ALL {
			assert_eq!(Classification::from_raw(cl.value()), Some(cl));
			assert_eq!(Classification::from_name(cl.name()), Some(cl));
		}
	}

	#[test]
	fn all_is_sorted_by_value() {
		assert!(Classification::ALL.windows(2).all(|w| w[0].value() < w[1].value()));
	}
}
