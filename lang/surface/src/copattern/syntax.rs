use super::err::{CoPatternError, Result};
use coda_syntax::*;
use std::fmt;

/// The argument part of a copattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Params<'a> {
    /// the focus is never applied
    NoCall,
    /// `#(p_1, ...)`
    Args(&'a [Term]),
}

impl Params<'_> {
    pub fn arity(&self) -> Arity {
        match self {
            | Params::NoCall => Arity::NoArgs,
            | Params::Args(args) => Arity::Args(args.len()),
        }
    }
    pub fn to_vec(&self) -> Vec<Term> {
        match self {
            | Params::NoCall => Vec::new(),
            | Params::Args(args) => args.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    NoArgs,
    Args(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Arity::NoArgs => write!(f, "no call"),
            | Arity::Args(1) => write!(f, "a call with 1 argument"),
            | Arity::Args(n) => write!(f, "a call with {n} arguments"),
        }
    }
}

/// A copattern read as the field names it projects, first applied first,
/// together with the arguments the focus is applied to.
///
/// Popping shares the remaining accessors with the original list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternList<'a> {
    pub accessors: im::Vector<FieldName>,
    pub params: Params<'a>,
}

impl<'a> PatternList<'a> {
    /// Read the single copattern of a codata clause.
    pub fn new(clause: &'a Sp<Clause>) -> Result<Self> {
        match clause.inner.patterns.as_slice() {
            | [pattern] => Self::from_copattern(pattern),
            | patterns => Err(CoPatternError::InvalidPattern {
                found: patterns.len(),
                span: clause.info,
            }),
        }
    }

    pub fn from_copattern(pattern: &'a Term) -> Result<Self> {
        let params = params(pattern)?;
        Ok(PatternList { accessors: accessors(pattern), params })
    }

    /// Split off the first accessor.
    pub fn pop(&self) -> Option<(FieldName, PatternList<'a>)> {
        let mut accessors = self.accessors.clone();
        let first = accessors.pop_front()?;
        Some((first, PatternList { accessors, params: self.params }))
    }

    pub fn is_terminal(&self) -> bool {
        self.accessors.is_empty()
    }

    pub fn arity(&self) -> Arity {
        self.params.arity()
    }
}

fn accessors(pattern: &Term) -> im::Vector<FieldName> {
    match &pattern.inner {
        | Node::Access(Access { receiver, name }) => {
            let mut names = accessors(receiver);
            names.push_back(name.clone());
            names
        }
        | _ => im::Vector::new(),
    }
}

fn params(pattern: &Term) -> Result<Params<'_>> {
    match &pattern.inner {
        | Node::Access(Access { receiver, .. }) => params(receiver),
        | Node::Call(Call { func, args }) => match func.inner {
            | Node::This(_) => Ok(Params::Args(args)),
            | _ => Err(CoPatternError::InvalidCallPattern(Box::new(pattern.clone()))),
        },
        | Node::This(_) => Ok(Params::NoCall),
        | _ => Err(CoPatternError::MissingFocus(Box::new(pattern.clone()))),
    }
}
