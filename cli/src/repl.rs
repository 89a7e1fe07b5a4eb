use crate::report;
use coda_driver::{BuildError, Conf, Session};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// What the REPL answers to one line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Values(Vec<String>),
    Globals(Vec<String>),
    Quit,
    Nothing,
}

/// A session fed one line at a time; definitions stay visible to later lines.
pub struct Repl {
    session: Session,
    lines: usize,
}

impl Repl {
    pub fn new(conf: Conf) -> Self {
        Repl { session: Session::new(conf), lines: 0 }
    }

    /// The name of the next input line in error reports.
    pub fn name(&self) -> String {
        format!("<repl:{}>", self.lines + 1)
    }

    pub fn feed(&mut self, line: &str) -> Result<Reply, BuildError> {
        match line.trim() {
            | "" => Ok(Reply::Nothing),
            | ":quit" | ":q" => Ok(Reply::Quit),
            | ":globals" => Ok(Reply::Globals(self.session.globals())),
            | line => {
                let name = self.name();
                self.lines += 1;
                let values = self.session.eval(&name, line)?;
                Ok(Reply::Values(values.iter().map(|value| value.to_string()).collect()))
            }
        }
    }

    pub fn launch(conf: Conf) -> io::Result<()> {
        println!("{} v{}", "coda".bold(), env!("CARGO_PKG_VERSION"));
        println!("`:globals` lists the definitions, `:quit` leaves");
        let mut repl = Repl::new(conf);
        let stdin = io::stdin();
        let mut input = stdin.lock();
        loop {
            print!("> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let name = repl.name();
            match repl.feed(&line) {
                | Ok(Reply::Values(values)) => {
                    for value in values {
                        println!("{value}");
                    }
                }
                | Ok(Reply::Globals(names)) => println!("{}", names.join(" ")),
                | Ok(Reply::Quit) => break,
                | Ok(Reply::Nothing) => {}
                | Err(err) => report(&err, Some((&name, line.trim()))),
            }
        }
        Ok(())
    }
}
