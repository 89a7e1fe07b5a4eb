use super::{
    build::flatten,
    err::{CoPatternError, Result},
};
use coda_syntax::*;
use coda_utils::pass::CompilerPass;

/// Replaces every codata block of a program, innermost first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Flattener;

impl CompilerPass for Flattener {
    type Input = Program;
    type Output = Program;
    type Error = CoPatternError;

    fn run(&mut self, program: Program) -> Result<Program> {
        program.into_iter().map(flatten_top).collect()
    }
}

/// Flatten one top-level term; no focus may survive outside a copattern.
fn flatten_top(term: Term) -> Result<Term> {
    let term = transform(term, &mut flatten_term)?;
    if let Some(focus) = find(&term, &mut |term| matches!(term.inner, Node::This(_))) {
        return Err(CoPatternError::StrayFocus(Box::new(focus.clone())));
    }
    Ok(term)
}

fn flatten_term(term: Term) -> Result<Term> {
    let Sp { inner, info } = term;
    match inner {
        | Node::Codata(codata) => Ok(info.make(flatten(&codata, info)?)),
        | inner => Ok(info.make(inner)),
    }
}
