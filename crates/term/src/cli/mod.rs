use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "annotix")]
#[command(about = "Build annotation interfaces and replay labeling sessions")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Log at debug level (overridden by ANNOTIX_LOG)
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Configuration and task shared by every subcommand.
#[derive(Args, Debug)]
pub struct Inputs {
	/// Tag configuration as a JSON tree
	#[arg(long, short = 'c')]
	pub config: PathBuf,

	/// Task as JSON: `{ "id": 1, "data": { ... } }`
	#[arg(long, short = 't')]
	pub task: Option<PathBuf>,

	/// Keep tags whose `toName` target does not exist
	#[arg(long)]
	pub lenient: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Build the tag tree and report its groups, hotkeys and dangling references
	Check {
		#[command(flatten)]
		inputs: Inputs,
	},
	/// List the hotkeys bound for a configuration
	Bindings {
		#[command(flatten)]
		inputs: Inputs,

		/// Enabled interfaces (e.g. skip,update)
		#[arg(long, short = 'i', value_delimiter = ',')]
		interfaces: Vec<String>,
	},
	/// Replay a session script and print the resulting annotation
	Run {
		#[command(flatten)]
		inputs: Inputs,

		/// Enabled interfaces (e.g. skip,update)
		#[arg(long, short = 'i', value_delimiter = ',')]
		interfaces: Vec<String>,

		/// Existing completions and predictions (JSON)
		#[arg(long, short = 'r')]
		results: Option<PathBuf>,

		/// User settings (TOML)
		#[arg(long, short = 's')]
		settings: Option<PathBuf>,

		/// Session script, one action per line
		#[arg(long)]
		script: Option<PathBuf>,

		/// Key combo pressed after the script; repeatable
		#[arg(long = "key", short = 'k')]
		keys: Vec<String>,

		/// Include the rendered widget tree in the output
		#[arg(long)]
		render: bool,
	},
}
