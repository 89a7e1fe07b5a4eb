use crate::{
    conf::{Conf, Stage},
    err::{BuildError, Result},
};
use coda_dynamics::{Runtime, SemValue};
use coda_surface::{copattern::Flattener, infix::InfixResolver, scoped::Resolver, textual::Parser};
use coda_syntax::{Formatter, Pretty, Program};
use coda_utils::pass::CompilerPass;
use std::path::Path;

/// The global state shared by successive inputs.
pub struct Session {
    pub conf: Conf,
    resolver: Resolver,
    pub runtime: Runtime,
    /// outputs of the stages listed in `conf.dump`, oldest first
    pub dumps: Vec<(Stage, String)>,
}

impl Session {
    pub fn new(conf: Conf) -> Self {
        let runtime = Runtime::new(conf.max_depth);
        Session { conf, resolver: Resolver::new(), runtime, dumps: Vec::new() }
    }

    /// Run every stage up to name resolution.
    ///
    /// The definitions of `source` only become visible to later inputs if all
    /// stages succeed.
    pub fn check(&mut self, name: &str, source: &str) -> Result<Program> {
        log::debug!("stage: {} ({name})", Stage::Parse.name());
        let program = Parser::parse(source, name)?;
        self.record(Stage::Parse, &program);
        let program = run_pass(Stage::Flatten, &mut Flattener, program)?;
        self.record(Stage::Flatten, &program);
        let program = run_pass(Stage::Infix, &mut InfixResolver, program)?;
        self.record(Stage::Infix, &program);
        let mut resolver = self.resolver.clone();
        let program = run_pass(Stage::Resolve, &mut resolver, program)?;
        self.record(Stage::Resolve, &program);
        self.resolver = resolver;
        Ok(program)
    }

    /// Check `source`, then evaluate its top-level expressions.
    pub fn eval(&mut self, name: &str, source: &str) -> Result<Vec<SemValue>> {
        let program = self.check(name, source)?;
        log::debug!("evaluating {name}");
        Ok(self.runtime.run(program)?)
    }

    /// Names of all definitions seen by this session.
    pub fn globals(&self) -> Vec<String> {
        let mut names = self.resolver.globals().map(|name| name.to_string()).collect::<Vec<_>>();
        names.sort();
        names
    }

    fn record(&mut self, stage: Stage, program: &Program) {
        if self.conf.dumps(stage) {
            self.dumps.push((stage, render(program)));
        }
    }
}

fn run_pass<P>(stage: Stage, pass: &mut P, program: Program) -> Result<Program>
where
    P: CompilerPass<Input = Program, Output = Program>,
    BuildError: From<P::Error>,
{
    log::debug!("stage: {}", stage.name());
    pass.init(&program)?;
    let program = pass.run(program)?;
    log::trace!("after {}:\n{}", stage.name(), render(&program));
    Ok(program)
}

/// Lay a program out over several lines.
pub fn render(program: &Program) -> String {
    let fmt = Formatter::new();
    fmt.render(program.pretty(&fmt))
}

pub fn read_source(path: impl AsRef<Path>) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Lex, parse and run every pass over `source`.
pub fn run_source(source: &str) -> Result<Program> {
    Session::new(Conf::default()).check("<input>", source)
}

/// [`run_source`], then evaluate.
pub fn eval_source(source: &str, conf: &Conf) -> Result<Vec<SemValue>> {
    Session::new(conf.clone()).eval("<input>", source)
}
