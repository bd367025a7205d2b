mod cli;
mod events;
mod script;
mod session;
#[cfg(test)]
mod tests;

use clap::Parser;
use cli::{Cli, Command};
use session::{Session, SessionOptions};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let output = match cli.command {
		Command::Check { inputs } => {
			let (config, task) = session::load_inputs(&inputs)?;
			let report = session::check(&config, task.as_ref(), inputs.lenient)?;
			serde_json::to_value(report)?
		}
		Command::Bindings { inputs, interfaces } => {
			let (config, task) = session::load_inputs(&inputs)?;
			let mut session = Session::new(
				config,
				task,
				SessionOptions {
					interfaces,
					lenient: inputs.lenient,
					..SessionOptions::default()
				},
			)?;
			session.load(&Default::default())?;
			serde_json::to_value(session.bindings())?
		}
		Command::Run {
			inputs,
			interfaces,
			results,
			settings,
			script,
			keys,
			render,
		} => {
			let (config, task) = session::load_inputs(&inputs)?;
			let (payload, settings) = session::load_run_files(results.as_deref(), settings.as_deref())?;
			let mut actions = match script {
				Some(path) => script::parse_script(&session::read(&path)?)?,
				None => Vec::new(),
			};
			if !keys.is_empty() {
				actions.push(script::parse_keys(keys.as_slice())?);
			}

			let mut session = Session::new(
				config,
				task,
				SessionOptions {
					interfaces,
					settings,
					lenient: inputs.lenient,
				},
			)?;
			session.load(&payload)?;
			session.run(&actions)?;
			serde_json::to_value(session.report(render))?
		}
	};

	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("ANNOTIX_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("annotix=debug,annotix_engine=debug,info")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}
