mod cli;
mod cmd;
mod error;
mod trx;
mod worker;

use std::{
	path::{Path, PathBuf},
	process::ExitCode,
};

use crate::cli::args::{Cli, Command};

pub use self::error::{Error, Result};
use clap::Parser;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// `RUST_LOG` directives on top of an INFO default, so decoded records show
/// up without any environment set.
fn build_env_filter(directives: &str) -> EnvFilter {
	EnvFilter::builder()
		.with_default_directive(LevelFilter::INFO.into())
		.parse_lossy(directives)
}

fn init_tracing(log_file: Option<&PathBuf>) -> Option<WorkerGuard> {
	let env_filter = build_env_filter(&std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default());

	let Some(log_path) = log_file else {
		tracing_subscriber::fmt().with_target(false).with_env_filter(env_filter).init();
		return None;
	};

	let dir = log_path.parent().unwrap_or(Path::new("."));
	let file = log_path.file_name().unwrap_or_default();

	let file_appender = rolling::never(dir, file);
	let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

	tracing_subscriber::fmt()
		.with_writer(non_blocking_writer)
		.with_target(false)
		.with_env_filter(env_filter)
		.init();

	Some(guard)
}

async fn run(command: Command) -> Result<()> {
	match command {
		Command::Resolve { kind } => cmd::run_resolve(kind)?,
		Command::Op { code } => cmd::run_op(code)?,
		Command::Kinds => cmd::run_kinds(),
		Command::Ops => cmd::run_ops(),
		Command::Paths { netns_dir } => cmd::run_paths(netns_dir),
		Command::Decode { file } => {
			cmd::run_decode(&file).await?;
		}
	}

	Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
	let args = Cli::parse();

	let _tracing_guard = init_tracing(args.log_file.as_ref());

	match run(args.command).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("Error: {err}");
			ExitCode::FAILURE
		}
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn env_filter_defaults_to_info() -> Result<()> {
		// -- Exec
		let unset = build_env_filter("");
		let debug = build_env_filter("debug");

		// -- Check
		assert_eq!(unset.max_level_hint(), Some(LevelFilter::INFO));
		assert_eq!(debug.max_level_hint(), Some(LevelFilter::DEBUG));

		Ok(())
	}
}

// endregion: --- Tests
