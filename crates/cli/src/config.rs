//! Configuration file for the `t9t` tool.
//!
//! ```toml
//! [log]
//! filter = "t9t_fields=trace,info"
//!
//! [fields]
//! tenant_field = "tenantId"
//! tracking_columns = ["cTimestamp", "mTimestamp", "version"]
//! ```
//!
//! Every key is optional. Omitted field settings fall back to the platform conventions.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use t9t_fields::{ConventionsError, FieldConventions, TENANT_FIELD, TRACKING_COLUMNS};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("I/O error reading {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },
	#[error("failed to parse config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("invalid field conventions: {0}")]
	Conventions(#[from] ConventionsError),
	#[error("invalid log filter '{filter}': {error}")]
	LogFilter { filter: String, error: ParseError },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
	log: RawLog,
	fields: RawFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLog {
	filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawFields {
	tenant_field: Option<String>,
	tracking_columns: Option<Vec<String>>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
	pub log_filter: Option<String>,
	pub conventions: FieldConventions,
}

impl Config {
	/// Reads a config file, or returns defaults if no path is given.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		let Some(path) = path else {
			return Ok(Self::default());
		};
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&text)
	}

	pub fn parse(text: &str) -> Result<Self, ConfigError> {
		let raw: RawConfig = toml::from_str(text)?;

		let conventions = match (raw.fields.tenant_field, raw.fields.tracking_columns) {
			(None, None) => FieldConventions::default(),
			(tenant, columns) => FieldConventions::new(
				tenant.unwrap_or_else(|| TENANT_FIELD.to_string()),
				columns.unwrap_or_else(|| TRACKING_COLUMNS.iter().map(|c| c.to_string()).collect()),
			)?,
		};

		if let Some(filter) = &raw.log.filter {
			EnvFilter::try_new(filter).map_err(|error| ConfigError::LogFilter {
				filter: filter.clone(),
				error,
			})?;
		}

		Ok(Self {
			log_filter: raw.log.filter,
			conventions,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_config_uses_platform_conventions() {
		let config = Config::parse("").unwrap();
		assert_eq!(config, Config::default());
		assert_eq!(config.conventions.tenant_field(), "tenantId");
	}

	#[test]
	fn parses_all_sections() {
		let config = Config::parse(
			r#"
			[log]
			filter = "t9t_fields=trace"

			[fields]
			tenant_field = "tenantRef"
			tracking_columns = ["createdAt", "version"]
			"#,
		)
		.unwrap();
		assert_eq!(config.log_filter.as_deref(), Some("t9t_fields=trace"));
		assert_eq!(config.conventions.tenant_field(), "tenantRef");
		assert_eq!(config.conventions.tracking_columns(), ["createdAt", "version"]);
	}

	#[test]
	fn partial_fields_section_keeps_other_defaults() {
		let config = Config::parse("[fields]\ntenant_field = \"tenantRef\"\n").unwrap();
		assert_eq!(config.conventions.tracking_columns().len(), 7);
	}

	#[test]
	fn rejects_inconsistent_conventions() {
		let err = Config::parse("[fields]\ntenant_field = \"version\"\n").unwrap_err();
		assert!(matches!(
			err,
			ConfigError::Conventions(ConventionsError::TenantFieldIsTracking(_))
		));
	}

	#[test]
	fn rejects_invalid_log_filter() {
		let err = Config::parse("[log]\nfilter = \"t9t=loud\"\n").unwrap_err();
		assert!(matches!(err, ConfigError::LogFilter { ref filter, .. } if filter == "t9t=loud"));
		assert!(err.to_string().starts_with("invalid log filter 't9t=loud'"));
	}

	#[test]
	fn rejects_unknown_keys() {
		let err = Config::parse("[log]\nlevel = \"debug\"\n").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[log]\nfilter = \"debug\"").unwrap();
		let config = Config::load(Some(file.path())).unwrap();
		assert_eq!(config.log_filter.as_deref(), Some("debug"));
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.toml");
		let err = Config::load(Some(&path)).unwrap_err();
		assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
	}

	#[test]
	fn no_path_means_defaults() {
		assert_eq!(Config::load(None).unwrap(), Config::default());
	}
}
