use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coda", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a coda program and print the value of each top-level expression
    Run {
        /// Path to the file to run
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Configuration file (defaults to `./coda.toml`)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
    /// Check a coda program without running it
    Check {
        /// Path to the file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Configuration file (defaults to `./coda.toml`)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Print the program after all passes
        #[arg(long, default_value_t = false)]
        dump: bool,
        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
    /// Start a REPL
    Repl {
        /// Configuration file (defaults to `./coda.toml`)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
}
