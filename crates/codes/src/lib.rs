//! Return code taxonomy of the t9t platform.
//!
//! A return code is an `i32` whose leading digit is a [`Classification`]. The
//! classification alone decides whether a transaction rolls back
//! ([`code_implies_rollback`]), which HTTP status a gateway answers with, and whether
//! the failure is logged with a stack trace.
//!
//! # Layout
//!
//! - [`catalog`] - the platform's code constants and their definition tables
//! - [`CodeRegistry`] - immutable code to description lookup, built once
//! - [`T9tError`] - the error type every platform operation raises

pub mod catalog;
mod classification;
mod code;
mod error;
mod registry;

pub use classification::{CLASSIFICATION_FACTOR, Classification};
pub use code::{ModuleOffset, ReturnCode, code_implies_rollback};
pub use error::T9tError;
pub use registry::{CodeDef, CodeRegistry, CodeRegistryBuilder, RegistryError};
