//! Mapping between enum types that share token names.

use t9t_codes::T9tError;
use t9t_codes::catalog::base as codes;

/// An enum whose instances are identified by a stable token name.
pub trait NamedEnum: Sized {
	/// Type name used in diagnostics.
	const TYPE_NAME: &'static str;

	/// Returns the token name of this instance.
	fn name(&self) -> &'static str;

	/// Returns the instance with the given token name.
	fn from_name(name: &str) -> Option<Self>;
}

/// Maps an instance of one enum to the same-named instance of another.
///
/// `None` maps to `None`. A name missing from the target type raises `ENUM_MAPPING`.
pub fn map_enum<S: NamedEnum, D: NamedEnum>(src: Option<&S>, field: &str) -> Result<Option<D>, T9tError> {
	let Some(src) = src else {
		return Ok(None);
	};
	match D::from_name(src.name()) {
		Some(dst) => Ok(Some(dst)),
		None => Err(T9tError::with_detail(
			codes::ENUM_MAPPING,
			Some(format!("{field}: {}.{} => {}", S::TYPE_NAME, src.name(), D::TYPE_NAME)),
		)),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum ApiStatus {
		Open,
		Closed,
		Archived,
	}

	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum DbStatus {
		Open,
		Closed,
	}

	impl NamedEnum for ApiStatus {
		const TYPE_NAME: &'static str = "ApiStatus";

		fn name(&self) -> &'static str {
			match self {
				Self::Open => "OPEN",
				Self::Closed => "CLOSED",
				Self::Archived => "ARCHIVED",
			}
		}

		fn from_name(name: &str) -> Option<Self> {
			match name {
				"OPEN" => Some(Self::Open),
				"CLOSED" => Some(Self::Closed),
				"ARCHIVED" => Some(Self::Archived),
				_ => None,
			}
		}
	}

	impl NamedEnum for DbStatus {
		const TYPE_NAME: &'static str = "DbStatus";

		fn name(&self) -> &'static str {
			match self {
				Self::Open => "OPEN",
				Self::Closed => "CLOSED",
			}
		}

		fn from_name(name: &str) -> Option<Self> {
			match name {
				"OPEN" => Some(Self::Open),
				"CLOSED" => Some(Self::Closed),
				_ => None,
			}
		}
	}

	#[test]
	fn maps_by_token_name() {
		let mapped: Option<DbStatus> = map_enum(Some(&ApiStatus::Closed), "status").unwrap();
		assert_eq!(mapped, Some(DbStatus::Closed));
	}

	#[test]
	fn none_maps_to_none() {
		let mapped: Option<DbStatus> = map_enum(None::<&ApiStatus>, "status").unwrap();
		assert_eq!(mapped, None);
	}

	#[test]
	fn missing_token_raises_enum_mapping() {
		let err = map_enum::<ApiStatus, DbStatus>(Some(&ApiStatus::Archived), "status").unwrap_err();
		assert_eq!(err.code().raw(), codes::ENUM_MAPPING);
		assert_eq!(err.detail(), Some("status: ApiStatus.ARCHIVED => DbStatus"));
		assert!(err.implies_rollback());
	}
}
