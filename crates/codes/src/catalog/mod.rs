//! Platform code catalogs.
//!
//! Each module owns one [`ModuleOffset`](crate::ModuleOffset) and declares its codes with
//! [`code_catalog!`], which emits the constants and the matching [`CodeDef`] table in one
//! place so the two cannot drift apart.

use crate::registry::CodeDef;

/// Declares code constants together with a static table of their definitions.
///
/// ```ignore
/// code_catalog! {
///     pub const DEFS;
///     RECORD_DOES_NOT_EXIST = OFFSET + 3 => "Attempted to access a record which does not exist";
/// }
/// ```
#[macro_export]
macro_rules! code_catalog {
	(
		$(#[$meta:meta])*
		$vis:vis const $defs:ident;
		$(
			$(#[$cmeta:meta])*
			$name:ident = $value:expr => $desc:expr;
		)*
	) => {
		$(
			$(#[$cmeta])*
			pub const $name: i32 = $value;
		)*

		$(#[$meta])*
		$vis const $defs: &[$crate::CodeDef] = &[
			$( $crate::CodeDef::new($name, stringify!($name), $desc), )*
		];
	};
}

pub mod base;
pub mod io;

/// Every platform catalog, in registration order.
pub static BUILTIN: &[&[CodeDef]] = &[base::DEFS, io::DEFS];
