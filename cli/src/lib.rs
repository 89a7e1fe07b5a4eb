pub mod cli;
pub use cli::*;
pub mod repl;
pub use repl::Repl;

use ariadne::Source;
use coda_driver::BuildError;
use colored::Colorize;

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            | Commands::Run { verbose, .. }
            | Commands::Check { verbose, .. }
            | Commands::Repl { verbose, .. } => *verbose,
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
pub fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Print `err`, with a source excerpt when it has a location in `input`
/// (a name and the text it was read from).
pub fn report(err: &BuildError, input: Option<(&str, &str)>) {
    let report = input.and_then(|(name, text)| Some((name, text, err.to_report(name)?)));
    match report {
        | Some((name, text, report)) => {
            eprintln!("{} in {}", "error".red().bold(), name);
            if let Err(io) = report.eprint((name.to_string(), Source::from(text))) {
                log::warn!("cannot print the report: {io}");
                eprintln!("{err}");
            }
        }
        | None => eprintln!("{}: {}", "error".red().bold(), err),
    }
}
