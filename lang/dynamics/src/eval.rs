use crate::{
    err::{EvalError, Result},
    syntax::*,
};
use std::rc::Rc;

pub trait Eval {
    type Out;
    fn eval(&self, runtime: &mut Runtime, env: &Env) -> Result<Self::Out>;
}

impl Runtime {
    pub fn new(max_depth: usize) -> Self {
        Runtime { globals: im::HashMap::new(), depth: 0, max_depth }
    }

    /// Register a top-level definition; it is evaluated when first used.
    pub fn define(&mut self, name: VarName, exprs: Vec<Term>, span: Span) {
        let state = GlobalState::Pending(Rc::new(exprs));
        self.globals.insert(name, Global { span, state });
    }

    /// Register the definitions of `program`, then evaluate its expressions
    /// in order.
    pub fn run(&mut self, program: Program) -> Result<Vec<SemValue>> {
        let mut exprs = Vec::new();
        for term in program {
            let Sp { inner, info } = term;
            match inner {
                | Node::Def(Def { name, exprs }) => self.define(name, exprs, info),
                | inner => exprs.push(info.make(inner)),
            }
        }
        let env = Env::new();
        exprs
            .iter()
            .map(|term| {
                self.depth = 0;
                let value = term.eval(self, &env)?;
                log::trace!("{} => {}", term.inner, value);
                Ok(value)
            })
            .collect()
    }

    fn global(&mut self, name: &VarName, span: Span) -> Result<SemValue> {
        let Some(global) = self.globals.get(name) else {
            return Err(EvalError::UnboundVar(span.make(name.clone())));
        };
        let exprs = match &global.state {
            | GlobalState::Done(value) => return Ok(value.clone()),
            | GlobalState::Evaluating(_) => {
                Err(EvalError::CyclicDefinition(global.span.make(name.clone())))?
            }
            | GlobalState::Pending(exprs) => exprs.clone(),
        };
        let def_span = global.span;
        self.set_global(name, def_span, GlobalState::Evaluating(exprs.clone()));
        match exprs.as_slice().eval(self, &Env::new()) {
            | Ok(value) => {
                self.set_global(name, def_span, GlobalState::Done(value.clone()));
                Ok(value)
            }
            | Err(err) => {
                self.set_global(name, def_span, GlobalState::Pending(exprs));
                Err(err)
            }
        }
    }

    fn set_global(&mut self, name: &VarName, span: Span, state: GlobalState) {
        self.globals.insert(name.clone(), Global { span, state });
    }

    fn call(&mut self, closure: EnvClosure, args: Vec<SemValue>, span: Span) -> Result<SemValue> {
        let EnvClosure { params, body, mut env } = closure;
        if params.len() != args.len() {
            Err(EvalError::ArityMismatch { expected: params.len(), found: args.len(), span })?
        }
        env.extend(params.iter().cloned().zip(args));
        self.nested(span, |runtime| body.as_slice().eval(runtime, &env))
    }

    /// Run `f` one level deeper; calls and field accesses both count.
    fn nested<T>(&mut self, span: Span, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            Err(EvalError::DepthExceeded { max: self.max_depth, span })?
        }
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }
}

/// An expression list evaluates to its last value.
impl Eval for [Term] {
    type Out = SemValue;
    fn eval(&self, runtime: &mut Runtime, env: &Env) -> Result<SemValue> {
        let mut value = SemValue::unit();
        for term in self {
            value = term.eval(runtime, env)?;
        }
        Ok(value)
    }
}

/// Red zone and growth step of the native stack while evaluating.
const RED_ZONE: usize = 128 * 1024;
const STACK_PER_RECURSION: usize = 1024 * 1024;

impl Eval for Term {
    type Out = SemValue;
    fn eval(&self, runtime: &mut Runtime, env: &Env) -> Result<SemValue> {
        // `max_depth` is the only bound on recursion
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || eval_node(self, runtime, env))
    }
}

fn eval_node(term: &Term, runtime: &mut Runtime, env: &Env) -> Result<SemValue> {
    let span = term.info;
    match &term.inner {
        | Node::Var(name) => match env.get(name) {
            | Some(value) => Ok(value.clone()),
            | None => runtime.global(name, span),
        },
        | Node::Lit(lit) => Ok(lit.clone().into()),
        | Node::Paren(Paren(elems)) => match elems.as_slice() {
            | [elem] => elem.eval(runtime, env),
            | elems => {
                let values = elems.iter().map(|elem| elem.eval(runtime, env));
                Ok(SemValue::Tuple(values.collect::<Result<_>>()?))
            }
        },
        | Node::Access(Access { receiver, name }) => match receiver.eval(runtime, env)? {
            | SemValue::Object(EnvObject { fields, env }) => {
                let Some(field) = fields.iter().find(|field| &field.name == name) else {
                    return Err(EvalError::MissingField { field: name.clone(), span });
                };
                runtime.nested(span, |runtime| field.exprs.as_slice().eval(runtime, &env))
            }
            | value => Err(mismatch("an object", &value, span)),
        },
        | Node::Call(Call { func, args }) => {
            let func = func.eval(runtime, env)?;
            let args = args.iter().map(|arg| arg.eval(runtime, env)).collect::<Result<_>>()?;
            match func {
                | SemValue::Closure(closure) => runtime.call(closure, args, span),
                | value => Err(mismatch("a function", &value, span)),
            }
        }
        | Node::BinOp(BinOp { op, lhs, rhs }) => binop(*op, lhs, rhs, runtime, env, span),
        | Node::Object(Object { fields }) => {
            Ok(EnvObject { fields: Rc::new(fields.clone()), env: env.clone() }.into())
        }
        | Node::Lambda(Lambda { params, exprs }) => Ok(EnvClosure {
            params: Rc::new(params.clone()),
            body: Rc::new(exprs.clone()),
            env: env.clone(),
        }
        .into()),
        | Node::Case(Case { scrutinees, clauses }) => {
            let values =
                scrutinees.iter().map(|s| s.eval(runtime, env)).collect::<Result<Vec<_>>>()?;
            for clause in clauses {
                let mut local = env.clone();
                if matches_all(&clause.inner.patterns, &values, &mut local)? {
                    return clause.inner.exprs.as_slice().eval(runtime, &local);
                }
            }
            let value = match values.as_slice() {
                | [value] => value.to_string(),
                | values => SemValue::Tuple(values.to_vec()).to_string(),
            };
            Err(EvalError::NoMatch { value, span })
        }
        | Node::Let(Let { binder, bindee, tail }) => {
            let value = bindee.eval(runtime, env)?;
            let mut local = env.clone();
            if !matches(binder, &value, &mut local)? {
                Err(EvalError::NoMatch { value: value.to_string(), span: binder.info })?
            }
            tail.as_slice().eval(runtime, &local)
        }
        | Node::This(_) | Node::Hole(_) | Node::Codata(_) | Node::Def(_) => {
            Err(EvalError::Unsupported(Box::new(term.clone())))
        }
    }
}

fn mismatch(expected: &'static str, found: &SemValue, span: Span) -> EvalError {
    EvalError::TypeMismatch { expected, found: found.kind(), span }
}

fn int(value: &SemValue, span: Span) -> Result<i64> {
    match value {
        | SemValue::Literal(Literal::Int(i)) => Ok(*i),
        | value => Err(mismatch("an integer", value, span)),
    }
}

fn bool(value: &SemValue, span: Span) -> Result<bool> {
    match value {
        | SemValue::Literal(Literal::Bool(b)) => Ok(*b),
        | value => Err(mismatch("a boolean", value, span)),
    }
}

fn binop(
    op: Op, lhs: &Term, rhs: &Term, runtime: &mut Runtime, env: &Env, span: Span,
) -> Result<SemValue> {
    match op {
        | Op::And | Op::Or => {
            // the right operand is only evaluated when it decides the result
            let l = bool(&lhs.eval(runtime, env)?, lhs.info)?;
            if l == (op == Op::Or) {
                return Ok(Literal::Bool(l).into());
            }
            Ok(Literal::Bool(bool(&rhs.eval(runtime, env)?, rhs.info)?).into())
        }
        | _ => {
            let l = lhs.eval(runtime, env)?;
            let r = rhs.eval(runtime, env)?;
            strict(op, (&l, lhs.info), (&r, rhs.info), span)
        }
    }
}

fn strict(
    op: Op, (l, l_span): (&SemValue, Span), (r, r_span): (&SemValue, Span), span: Span,
) -> Result<SemValue> {
    let ints = || -> Result<(i64, i64)> { Ok((int(l, l_span)?, int(r, r_span)?)) };
    let checked = |res: Option<i64>| -> Result<SemValue> {
        Ok(Literal::Int(res.ok_or(EvalError::Overflow { span })?).into())
    };
    let value: SemValue = match op {
        | Op::Eq => Literal::Bool(equal(l, r, span)?).into(),
        | Op::Ne => Literal::Bool(!equal(l, r, span)?).into(),
        | Op::Add => match (l, r) {
            | (SemValue::Literal(Literal::String(a)), SemValue::Literal(Literal::String(b))) => {
                Literal::String(format!("{a}{b}")).into()
            }
            | _ => {
                let (a, b) = ints()?;
                checked(a.checked_add(b))?
            }
        },
        | Op::Sub => {
            let (a, b) = ints()?;
            checked(a.checked_sub(b))?
        }
        | Op::Mul => {
            let (a, b) = ints()?;
            checked(a.checked_mul(b))?
        }
        | Op::Div | Op::Mod => {
            let (a, b) = ints()?;
            if b == 0 {
                Err(EvalError::DivisionByZero { span })?
            }
            checked(if op == Op::Div { a.checked_div(b) } else { a.checked_rem(b) })?
        }
        | Op::Lt | Op::Le | Op::Gt | Op::Ge => {
            let (a, b) = ints()?;
            let res = match op {
                | Op::Lt => a < b,
                | Op::Le => a <= b,
                | Op::Gt => a > b,
                | _ => a >= b,
            };
            Literal::Bool(res).into()
        }
        | Op::And => Literal::Bool(bool(l, l_span)? && bool(r, r_span)?).into(),
        | Op::Or => Literal::Bool(bool(l, l_span)? || bool(r, r_span)?).into(),
    };
    Ok(value)
}

/// Structural equality on literals and tuples; values of different kinds are
/// never equal.
fn equal(l: &SemValue, r: &SemValue, span: Span) -> Result<bool> {
    match (l, r) {
        | (SemValue::Literal(a), SemValue::Literal(b)) => Ok(a == b),
        | (SemValue::Tuple(a), SemValue::Tuple(b)) => {
            if a.len() != b.len() {
                return Ok(false);
            }
            for (a, b) in a.iter().zip(b) {
                if !equal(a, b, span)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        | (SemValue::Object(_) | SemValue::Closure(_), _) => {
            Err(mismatch("a comparable value", l, span))
        }
        | (_, SemValue::Object(_) | SemValue::Closure(_)) => {
            Err(mismatch("a comparable value", r, span))
        }
        | _ => Ok(false),
    }
}

fn matches_all(patterns: &[Term], values: &[SemValue], env: &mut Env) -> Result<bool> {
    for (pattern, value) in patterns.iter().zip(values) {
        if !matches(pattern, value, env)? {
            return Ok(false);
        }
    }
    Ok(patterns.len() == values.len())
}

/// Match `value` against `pattern`, binding its variables into `env`.
fn matches(pattern: &Term, value: &SemValue, env: &mut Env) -> Result<bool> {
    match (&pattern.inner, value) {
        | (Node::Var(name), _) => {
            env.insert(name.clone(), value.clone());
            Ok(true)
        }
        | (Node::Hole(_), _) => Ok(true),
        | (Node::Lit(lit), SemValue::Literal(value)) => Ok(lit == value),
        | (Node::Lit(_), _) => Ok(false),
        | (Node::Paren(Paren(elems)), _) if elems.len() == 1 => matches(&elems[0], value, env),
        | (Node::Paren(Paren(elems)), SemValue::Tuple(values)) if elems.len() == values.len() => {
            matches_all(elems, values, env)
        }
        | (Node::Paren(_), _) => Ok(false),
        | _ => Err(EvalError::Unsupported(Box::new(pattern.clone()))),
    }
}
