use super::err::{InfixError, Result};
use coda_syntax::*;
use coda_utils::pass::CompilerPass;
use std::iter::Peekable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    Left,
    None,
}

/// Precedence (higher binds tighter) and associativity of a builtin operator.
pub fn fixity(op: Op) -> (u8, Associativity) {
    use Associativity::*;
    match op {
        | Op::Or => (1, Left),
        | Op::And => (2, Left),
        | Op::Eq | Op::Ne | Op::Lt | Op::Le | Op::Gt | Op::Ge => (3, None),
        | Op::Add | Op::Sub => (4, Left),
        | Op::Mul | Op::Div | Op::Mod => (5, Left),
    }
}

/// Rebuilds every operator chain of a program by precedence.
#[derive(Clone, Copy, Debug, Default)]
pub struct InfixResolver;

impl CompilerPass for InfixResolver {
    type Input = Program;
    type Output = Program;
    type Error = InfixError;

    fn run(&mut self, program: Program) -> Result<Program> {
        program.into_iter().map(|term| transform(term, &mut resolve_term)).collect()
    }
}

fn resolve_term(term: Term) -> Result<Term> {
    if !matches!(term.inner, Node::BinOp(_)) {
        return Ok(term);
    }
    let mut rest = Vec::new();
    let first = chain(term, &mut rest);
    climb(first, &mut rest.into_iter().peekable(), 0)
}

/// Flatten a chain into its first operand followed by operator and operand
/// pairs, in source order. Parentheses end the chain.
fn chain(term: Term, rest: &mut Vec<(Op, Term)>) -> Term {
    let Sp { inner, info } = term;
    match inner {
        | Node::BinOp(BinOp { op, lhs, rhs }) => {
            let first = chain(*lhs, rest);
            let mut tail = Vec::new();
            let second = chain(*rhs, &mut tail);
            rest.push((op, second));
            rest.extend(tail);
            first
        }
        | inner => info.make(inner),
    }
}

fn climb<I>(mut lhs: Term, rest: &mut Peekable<I>, min_prec: u8) -> Result<Term>
where
    I: Iterator<Item = (Op, Term)>,
{
    while let Some((op, _)) = rest.peek() {
        let (prec, assoc) = fixity(*op);
        if prec < min_prec {
            break;
        }
        let Some((op, rhs)) = rest.next() else { break };
        let rhs = climb(rhs, rest, prec + 1)?;
        let info = lhs.info.join(&rhs.info);
        if let (Associativity::None, Some((next, _))) = (assoc, rest.peek()) {
            if fixity(*next).0 == prec {
                Err(InfixError::NonAssociative { first: op, second: *next, span: info })?
            }
        }
        lhs = info.make(BinOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }.into());
    }
    Ok(lhs)
}
