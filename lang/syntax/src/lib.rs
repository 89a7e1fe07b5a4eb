pub mod fmt;
pub use fmt::*;

pub mod walk;
pub use walk::*;

mod impls;

#[cfg(test)]
mod tests;

pub use coda_utils::span::{Sp, Span};
use derive_more::From;

/* --------------------------------- Binder --------------------------------- */

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct VarName(pub String);
/// `.name` without the dot
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldName(pub String);

/// Every node is carried together with its source location.
pub type Term = Sp<Node>;

/* --------------------------------- Atoms ---------------------------------- */

/// `#`, the focus of a copattern
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct This;
/// `_`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Hole;

/// literals in term
#[derive(From, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    String(String),
}

/// `(...)`; one element is a grouping, any other count is a tuple
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Paren(pub Vec<Term>);

/* ------------------------------ Observations ------------------------------ */

/// `e.name`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Access {
    pub receiver: Box<Term>,
    pub name: FieldName,
}

/// `f(a_1, ...)`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Call {
    pub func: Box<Term>,
    pub args: Vec<Term>,
}

/* -------------------------------- Operators ------------------------------- */

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Op {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// `a op b`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct BinOp {
    pub op: Op,
    pub lhs: Box<Term>,
    pub rhs: Box<Term>,
}

/* --------------------------------- Codata --------------------------------- */

/// `p_1, ... -> e_1; ...`
///
/// A codata clause carries exactly one copattern; a case clause carries one
/// pattern per scrutinee.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Clause {
    pub patterns: Vec<Term>,
    pub exprs: Vec<Term>,
}

/// `{ #.d_1 -> e_1, ... }`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Codata {
    pub clauses: Vec<Sp<Clause>>,
}

/* --------------------------------- Record --------------------------------- */

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Field {
    pub name: FieldName,
    pub exprs: Vec<Term>,
}

/// a record whose fields are evaluated on access
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Object {
    pub fields: Vec<Field>,
}

/* ------------------------------- Functional ------------------------------- */

/// `fn(x_1, ...) -> e_1; ...`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Lambda {
    pub params: Vec<VarName>,
    pub exprs: Vec<Term>,
}

/// `match a_1, ... | p_1, ... -> e | ... end`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Case {
    pub scrutinees: Vec<Term>,
    pub clauses: Vec<Sp<Clause>>,
}

/// `let p = a in e_1; ...`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Let {
    pub binder: Box<Term>,
    pub bindee: Box<Term>,
    pub tail: Vec<Term>,
}

/* -------------------------------- TopLevel -------------------------------- */

/// `def x = e_1; ...`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Def {
    pub name: VarName,
    pub exprs: Vec<Term>,
}

#[derive(From, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Node {
    This(This),
    Hole(Hole),
    Var(VarName),
    Lit(Literal),
    Paren(Paren),
    Access(Access),
    Call(Call),
    BinOp(BinOp),
    Codata(Codata),
    Object(Object),
    Lambda(Lambda),
    Case(Case),
    Let(Let),
    Def(Def),
}

/// The ordered top-level nodes of one source text.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Program(pub Vec<Term>);
