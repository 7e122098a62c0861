//! `t9t` operator tool.
//!
//! Explains return codes and exercises the field path conventions against an
//! optional configuration file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use t9t_codes::{Classification, CodeRegistry};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

mod commands;
mod config;

use commands::PathOp;
use config::Config;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "t9t")]
#[command(about = "Inspect t9t return codes and field paths")]
struct Args {
	/// Configuration file (TOML)
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Return code registry
	Codes {
		#[command(subcommand)]
		action: CodesAction,
	},
	/// Field path utilities
	Path {
		#[command(subcommand)]
		op: PathOp,
	},
}

#[derive(Subcommand, Debug)]
enum CodesAction {
	/// List registered codes
	List {
		/// Only codes of this classification
		#[arg(long, value_parser = parse_classification)]
		classification: Option<Classification>,
	},
	/// Explain one code, given as number or name
	Explain { code: String },
}

fn parse_classification(name: &str) -> Result<Classification, String> {
	Classification::from_name(name).ok_or_else(|| {
		let known: Vec<&str> = Classification::ALL.iter().map(|cl| cl.name()).collect();
		format!("unknown classification '{name}', expected one of: {}", known.join(", "))
	})
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();
	let config = Config::load(args.config.as_deref())?;

	setup_tracing(args.verbose, config.log_filter.as_deref())?;
	tracing::debug!(config = ?args.config, "configuration loaded");

	let registry = CodeRegistry::builtin();
	let mut out = std::io::stdout().lock();
	match args.command {
		Command::Codes {
			action: CodesAction::List { classification },
		} => commands::list_codes(registry, classification, &mut out)?,
		Command::Codes {
			action: CodesAction::Explain { code },
		} => commands::explain_code(registry, &code, &mut out)?,
		Command::Path { op } => commands::path_op(&config.conventions, &op, &mut out)?,
	}
	Ok(())
}

fn setup_tracing(verbose: bool, configured: Option<&str>) -> Result<(), ParseError> {
	let filter = build_filter(EnvFilter::try_from_default_env().ok(), verbose, configured)?;

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
	Ok(())
}

/// `RUST_LOG` wins over the configured filter, which wins over the verbosity default.
fn build_filter(env: Option<EnvFilter>, verbose: bool, configured: Option<&str>) -> Result<EnvFilter, ParseError> {
	if let Some(filter) = env {
		return Ok(filter);
	}
	match configured {
		Some(directives) => EnvFilter::try_new(directives),
		None if verbose => EnvFilter::try_new("warn,t9t=debug"),
		None => EnvFilter::try_new("warn,t9t=info"),
	}
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn cli_definition_is_consistent() {
		Args::command().debug_assert();
	}

	#[test]
	fn parses_nested_subcommands() {
		let args = Args::try_parse_from(["t9t", "path", "strip", "lines[2].sku", "--verbose"]).unwrap();
		assert!(args.verbose);
		assert!(matches!(
			args.command,
			Command::Path { op: PathOp::Strip { ref path } } if path == "lines[2].sku"
		));

		let args = Args::try_parse_from(["t9t", "codes", "list", "--classification", "database-error"]).unwrap();
		assert!(matches!(
			args.command,
			Command::Codes {
				action: CodesAction::List {
					classification: Some(Classification::DatabaseError)
				}
			}
		));
	}

	#[test]
	fn filter_precedence() {
		let env = EnvFilter::try_new("error").unwrap();
		assert_eq!(build_filter(Some(env), true, Some("t9t=trace")).unwrap().to_string(), "error");
		assert_eq!(build_filter(None, true, Some("t9t=trace")).unwrap().to_string(), "t9t=trace");
		assert!(build_filter(None, false, Some("t9t=loud")).is_err());
		assert!(build_filter(None, false, None).is_ok());
	}

	#[test]
	fn rejects_unknown_classification() {
		let err = Args::try_parse_from(["t9t", "codes", "list", "--classification", "fatal"]).unwrap_err();
		assert!(err.to_string().contains("unknown classification 'fatal'"));
	}
}
