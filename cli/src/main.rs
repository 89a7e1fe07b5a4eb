use clap::Parser;
use coda_cli::{Cli, Commands, Repl, init_logger, report};
use coda_driver::{BuildError, Conf, Session, read_source, render};
use colored::Colorize;
use std::{path::Path, process::ExitCode};

fn main() -> ExitCode {
    let Cli { command } = Cli::parse();
    init_logger(command.verbose());
    match command {
        | Commands::Run { file, config, .. } => run(&file, config.as_deref()),
        | Commands::Check { file, config, dump, .. } => check(&file, config.as_deref(), dump),
        | Commands::Repl { config, .. } => {
            let conf = match Conf::lookup(config.as_deref()) {
                | Ok(conf) => conf,
                | Err(err) => return fail(&err.into(), None),
            };
            match Repl::launch(conf) {
                | Ok(()) => ExitCode::SUCCESS,
                | Err(err) => fail(&err.into(), None),
            }
        }
    }
}

fn prepare(file: &Path, config: Option<&Path>) -> Result<(Session, String, String), BuildError> {
    let conf = Conf::lookup(config)?;
    let source = read_source(file)?;
    Ok((Session::new(conf), file.display().to_string(), source))
}

fn run(file: &Path, config: Option<&Path>) -> ExitCode {
    let (mut session, name, source) = match prepare(file, config) {
        | Ok(prepared) => prepared,
        | Err(err) => return fail(&err, None),
    };
    match session.eval(&name, &source) {
        | Ok(values) => {
            for value in values {
                println!("{value}");
            }
            ExitCode::SUCCESS
        }
        | Err(err) => fail(&err, Some((&name, &source))),
    }
}

fn check(file: &Path, config: Option<&Path>, dump: bool) -> ExitCode {
    let (mut session, name, source) = match prepare(file, config) {
        | Ok(prepared) => prepared,
        | Err(err) => return fail(&err, None),
    };
    match session.check(&name, &source) {
        | Ok(program) => {
            for (stage, text) in &session.dumps {
                println!(">>> [{}]", stage.name());
                println!("{text}");
                println!("<<< [{}]", stage.name());
            }
            if dump {
                println!("{}", render(&program));
            }
            eprintln!("{} {}", "checked".green(), name);
            ExitCode::SUCCESS
        }
        | Err(err) => fail(&err, Some((&name, &source))),
    }
}

fn fail(err: &BuildError, input: Option<(&str, &str)>) -> ExitCode {
    report(err, input);
    ExitCode::FAILURE
}
