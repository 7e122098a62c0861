//! Closed union of the scalar types a field value can take.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// A scalar field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
	Int(i32),
	Long(i64),
	Bool(bool),
	Num(Decimal),
	Text(String),
	Day(NaiveDate),
	Instant(DateTime<Utc>),
}

/// The type of a [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
	Int,
	Long,
	Bool,
	Num,
	Text,
	Day,
	Instant,
}

impl VariantKind {
	pub const fn name(self) -> &'static str {
		match self {
			Self::Int => "int",
			Self::Long => "long",
			Self::Bool => "bool",
			Self::Num => "num",
			Self::Text => "text",
			Self::Day => "day",
			Self::Instant => "instant",
		}
	}
}

impl core::fmt::Display for VariantKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

/// Failure to parse text into a typed variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value '{text}': {reason}")]
pub struct VariantParseError {
	pub kind: VariantKind,
	pub text: String,
	pub reason: String,
}

impl Variant {
	pub fn kind(&self) -> VariantKind {
		match self {
			Self::Int(_) => VariantKind::Int,
			Self::Long(_) => VariantKind::Long,
			Self::Bool(_) => VariantKind::Bool,
			Self::Num(_) => VariantKind::Num,
			Self::Text(_) => VariantKind::Text,
			Self::Day(_) => VariantKind::Day,
			Self::Instant(_) => VariantKind::Instant,
		}
	}

	/// Parses text as a value of the given kind.
	///
	/// Days are ISO dates (`2024-02-29`), instants are RFC 3339 timestamps normalized to UTC.
	pub fn parse(kind: VariantKind, text: &str) -> Result<Self, VariantParseError> {
		let fail = |reason: String| VariantParseError {
			kind,
			text: text.to_string(),
			reason,
		};
		match kind {
			VariantKind::Int => text.parse().map(Self::Int).map_err(|e| fail(e.to_string())),
			VariantKind::Long => text.parse().map(Self::Long).map_err(|e| fail(e.to_string())),
			VariantKind::Bool => parse_bool(text).map(Self::Bool).ok_or_else(|| {
				fail("expected true/false, yes/no, on/off, 1/0".to_string())
			}),
			VariantKind::Num => text
				.parse::<Decimal>()
				.map(Self::Num)
				.map_err(|e| fail(e.to_string())),
			VariantKind::Text => Ok(Self::Text(text.to_string())),
			VariantKind::Day => text
				.parse::<NaiveDate>()
				.map(Self::Day)
				.map_err(|e| fail(e.to_string())),
			VariantKind::Instant => DateTime::parse_from_rfc3339(text)
				.map(|dt| Self::Instant(dt.with_timezone(&Utc)))
				.map_err(|e| fail(e.to_string())),
		}
	}

	pub fn as_int(&self) -> Option<i32> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the value as `i64`, widening ints.
	pub fn as_long(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(i64::from(*v)),
			Self::Long(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_num(&self) -> Option<Decimal> {
		match self {
			Self::Num(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_day(&self) -> Option<NaiveDate> {
		match self {
			Self::Day(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_instant(&self) -> Option<DateTime<Utc>> {
		match self {
			Self::Instant(v) => Some(*v),
			_ => None,
		}
	}
}

fn parse_bool(text: &str) -> Option<bool> {
	match text.to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}

impl core::fmt::Display for Variant {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Int(v) => write!(f, "{v}"),
			Self::Long(v) => write!(f, "{v}"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::Num(v) => write!(f, "{v}"),
			Self::Text(v) => f.write_str(v),
			Self::Day(v) => write!(f, "{v}"),
			Self::Instant(v) => f.write_str(&v.to_rfc3339()),
		}
	}
}

macro_rules! variant_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Variant {
				fn from(v: $ty) -> Self {
					Self::$variant(v)
				}
			}
		)*
	};
}

variant_from! {
	i32 => Int,
	i64 => Long,
	bool => Bool,
	Decimal => Num,
	String => Text,
	NaiveDate => Day,
	DateTime<Utc> => Instant,
}

impl From<&str> for Variant {
	fn from(v: &str) -> Self {
		Self::Text(v.to_string())
	}
}
