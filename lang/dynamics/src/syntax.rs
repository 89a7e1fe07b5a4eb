pub use coda_syntax::*;

use derive_more::From;
use std::rc::Rc;

/// Local variables in scope; globals live in the [`Runtime`].
pub type Env = im::HashMap<VarName, SemValue>;

/* -------------------------------- Semantics ------------------------------- */

/// An object whose fields are evaluated on every access, under the
/// environment the object was created in.
#[derive(Clone, Debug)]
pub struct EnvObject {
    pub fields: Rc<Vec<Field>>,
    pub env: Env,
}

#[derive(Clone, Debug)]
pub struct EnvClosure {
    pub params: Rc<Vec<VarName>>,
    pub body: Rc<Vec<Term>>,
    pub env: Env,
}

#[derive(From, Clone, Debug)]
pub enum SemValue {
    Literal(Literal),
    Tuple(Vec<SemValue>),
    Object(EnvObject),
    Closure(EnvClosure),
}

impl SemValue {
    pub fn unit() -> Self {
        SemValue::Tuple(Vec::new())
    }
    /// Name of the kind of value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            | SemValue::Literal(Literal::Int(_)) => "an integer",
            | SemValue::Literal(Literal::Bool(_)) => "a boolean",
            | SemValue::Literal(Literal::String(_)) => "a string",
            | SemValue::Tuple(_) => "a tuple",
            | SemValue::Object(_) => "an object",
            | SemValue::Closure(_) => "a function",
        }
    }
}

/* --------------------------------- Globals -------------------------------- */

#[derive(Clone, Debug)]
pub enum GlobalState {
    /// not demanded yet
    Pending(Rc<Vec<Term>>),
    /// being evaluated; demanding it again is a cycle
    Evaluating(Rc<Vec<Term>>),
    Done(SemValue),
}

#[derive(Clone, Debug)]
pub struct Global {
    pub span: Span,
    pub state: GlobalState,
}

pub struct Runtime {
    pub globals: im::HashMap<VarName, Global>,
    /// current nesting of calls and field accesses
    pub(crate) depth: usize,
    pub max_depth: usize,
}
