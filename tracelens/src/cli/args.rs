use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracelens_common::EventKind;

#[derive(Parser)]
#[command(name = "tracelens", version, about = "Event kind resolver and record decoder")]
pub struct Cli {
	/// Write logs to this file instead of stdout.
	#[arg(long, global = true)]
	pub log_file: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Resolve an event kind (integer or name) to its payload variant.
	Resolve {
		#[arg(allow_negative_numbers = true)]
		kind: EventKind,
	},
	/// Resolve a kernel msg op code to its payload variant.
	Op { code: u32 },
	/// List the event kind table.
	Kinds,
	/// List the kernel msg op table.
	Ops,
	/// Print the effective path configuration.
	Paths {
		#[arg(long, env = "TRACELENS_NETNS_DIR")]
		netns_dir: Option<PathBuf>,
	},
	/// Decode a dump of concatenated event records.
	Decode { file: PathBuf },
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn parse_resolve_kind_forms() -> Result<()> {
		// -- Exec
		let by_name = Cli::try_parse_from(["tracelens", "resolve", "PROCESS_DNS"])?;
		let by_int = Cli::try_parse_from(["tracelens", "resolve", "9999"])?;
		let negative = Cli::try_parse_from(["tracelens", "resolve", "-1"])?;

		// -- Check
		assert!(matches!(by_name.command, Command::Resolve { kind } if kind == EventKind::PROCESS_DNS));
		assert!(matches!(by_int.command, Command::Resolve { kind } if kind.value() == 9999));
		assert!(matches!(negative.command, Command::Resolve { kind } if kind.value() == -1));

		Ok(())
	}

	#[test]
	fn parse_resolve_bad_kind_err() -> Result<()> {
		// -- Exec
		let res = Cli::try_parse_from(["tracelens", "resolve", "PROCESS_FORK"]);

		// -- Check
		assert!(res.is_err());

		Ok(())
	}

	#[test]
	fn parse_paths_and_global_log_file() -> Result<()> {
		// -- Exec
		let cli = Cli::try_parse_from(["tracelens", "paths", "--netns-dir", "/run/netns", "--log-file", "/tmp/t.log"])?;

		// -- Check
		assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/t.log")));
		assert!(matches!(cli.command, Command::Paths { netns_dir: Some(ref dir) } if dir == &PathBuf::from("/run/netns")));

		Ok(())
	}
}

// endregion: --- Tests
