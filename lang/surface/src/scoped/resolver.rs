use super::err::{ResolveError, Result};
use coda_syntax::*;
use coda_utils::pass::CompilerPass;

#[derive(Clone, Debug, Default)]
pub struct Global {
    /// top-level definitions and where they are defined
    pub(super) defs: im::HashMap<VarName, Sp<VarName>>,
}
#[derive(Clone, Debug, Default)]
pub struct Local {
    /// map from source names to the fresh names of their binders
    var_to_def: im::HashMap<VarName, VarName>,
}

/// Gives every local binder a unique name and checks that every variable is
/// bound.
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    pub global: Global,
    fresh: usize,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the top-level definitions seen so far.
    pub fn globals(&self) -> impl Iterator<Item = &VarName> {
        self.global.defs.keys()
    }

    fn fresh(&mut self, name: &VarName) -> VarName {
        self.fresh += 1;
        VarName(format!("{}@{}", name.plain(), self.fresh))
    }

    fn declare(&mut self, name: Sp<VarName>) -> Result<()> {
        if let Some(prev) = self.global.defs.get(&name.inner) {
            return Err(ResolveError::DuplicateDefinition(prev.clone(), name));
        }
        self.global.defs.insert(name.inner.clone(), name);
        Ok(())
    }
}

impl CompilerPass for Resolver {
    type Input = Program;
    type Output = Program;
    type Error = ResolveError;

    /// Collect the top-level definitions so that they can refer to each other
    /// in any order.
    fn init(&mut self, program: &Program) -> Result<()> {
        for term in program.iter() {
            if let Node::Def(Def { name, .. }) = &term.inner {
                self.declare(term.info.make(name.clone()))?;
            }
        }
        Ok(())
    }

    fn run(&mut self, program: Program) -> Result<Program> {
        let local = Local::default();
        program.into_iter().map(|term| term.resolve(self, &local)).collect()
    }
}

pub trait Resolve {
    type Out;
    fn resolve(self, resolver: &mut Resolver, local: &Local) -> Result<Self::Out>;
}

impl Resolve for Vec<Term> {
    type Out = Vec<Term>;
    fn resolve(self, resolver: &mut Resolver, local: &Local) -> Result<Self::Out> {
        self.into_iter().map(|term| term.resolve(resolver, local)).collect()
    }
}

impl Resolve for Box<Term> {
    type Out = Box<Term>;
    fn resolve(self, resolver: &mut Resolver, local: &Local) -> Result<Self::Out> {
        Ok(Box::new((*self).resolve(resolver, local)?))
    }
}

impl Resolve for Sp<Clause> {
    type Out = Sp<Clause>;
    fn resolve(self, resolver: &mut Resolver, local: &Local) -> Result<Self::Out> {
        let Sp { inner: Clause { patterns, exprs }, info } = self;
        let mut binders = Binders::default();
        let patterns = patterns
            .into_iter()
            .map(|pattern| binders.pattern(resolver, pattern))
            .collect::<Result<Vec<_>>>()?;
        let local = binders.extend(local);
        let exprs = exprs.resolve(resolver, &local)?;
        Ok(info.make(Clause { patterns, exprs }))
    }
}

impl Resolve for Term {
    type Out = Term;
    fn resolve(self, resolver: &mut Resolver, local: &Local) -> Result<Self::Out> {
        let Sp { inner, info } = self;
        let node: Node = match inner {
            | Node::Var(name) => match local.var_to_def.get(&name) {
                | Some(def) => def.clone().into(),
                | None if resolver.global.defs.contains_key(&name) => name.into(),
                | None => Err(ResolveError::UnboundVar(info.make(name)))?,
            },
            | inner @ (Node::This(_) | Node::Codata(_)) => {
                Err(ResolveError::Unflattened(Box::new(info.make(inner))))?
            }
            | inner @ Node::Hole(_) => {
                Err(ResolveError::HoleInExpression(Box::new(info.make(inner))))?
            }
            | inner @ Node::Lit(_) => inner,
            | Node::Paren(Paren(elems)) => Paren(elems.resolve(resolver, local)?).into(),
            | Node::Access(Access { receiver, name }) => {
                Access { receiver: receiver.resolve(resolver, local)?, name }.into()
            }
            | Node::Call(Call { func, args }) => {
                let func = func.resolve(resolver, local)?;
                Call { func, args: args.resolve(resolver, local)? }.into()
            }
            | Node::BinOp(BinOp { op, lhs, rhs }) => {
                let lhs = lhs.resolve(resolver, local)?;
                BinOp { op, lhs, rhs: rhs.resolve(resolver, local)? }.into()
            }
            | Node::Object(Object { fields }) => {
                let fields = fields
                    .into_iter()
                    .map(|Field { name, exprs }| -> Result<Field> {
                        Ok(Field { name, exprs: exprs.resolve(resolver, local)? })
                    })
                    .collect::<Result<_>>()?;
                Object { fields }.into()
            }
            | Node::Lambda(Lambda { params, exprs }) => {
                let mut binders = Binders::default();
                let params = params
                    .into_iter()
                    .map(|param| binders.bind(resolver, info.make(param)))
                    .collect::<Result<Vec<_>>>()?;
                let local = binders.extend(local);
                Lambda { params, exprs: exprs.resolve(resolver, &local)? }.into()
            }
            | Node::Case(Case { scrutinees, clauses }) => {
                let scrutinees = scrutinees.resolve(resolver, local)?;
                let clauses = clauses
                    .into_iter()
                    .map(|clause| clause.resolve(resolver, local))
                    .collect::<Result<_>>()?;
                Case { scrutinees, clauses }.into()
            }
            | Node::Let(Let { binder, bindee, tail }) => {
                let bindee = bindee.resolve(resolver, local)?;
                let mut binders = Binders::default();
                let binder = Box::new(binders.pattern(resolver, *binder)?);
                let local = binders.extend(local);
                Let { binder, bindee, tail: tail.resolve(resolver, &local)? }.into()
            }
            | Node::Def(Def { name, exprs }) => {
                // definitions see the globals only
                Def { name, exprs: exprs.resolve(resolver, &Local::default())? }.into()
            }
        };
        Ok(info.make(node))
    }
}

/// The variables bound by one lambda head or one pattern list.
#[derive(Default)]
struct Binders {
    bound: Vec<(VarName, VarName)>,
}

impl Binders {
    fn bind(&mut self, resolver: &mut Resolver, name: Sp<VarName>) -> Result<VarName> {
        if self.bound.iter().any(|(source, _)| *source == name.inner) {
            Err(ResolveError::DuplicateBinder(name.clone()))?
        }
        let fresh = resolver.fresh(&name.inner);
        self.bound.push((name.inner, fresh.clone()));
        Ok(fresh)
    }

    fn pattern(&mut self, resolver: &mut Resolver, pattern: Term) -> Result<Term> {
        let Sp { inner, info } = pattern;
        let node: Node = match inner {
            | Node::Var(name) => self.bind(resolver, info.make(name))?.into(),
            | inner @ (Node::Hole(_) | Node::Lit(_)) => inner,
            | Node::Paren(Paren(elems)) => {
                let elems = elems
                    .into_iter()
                    .map(|elem| self.pattern(resolver, elem))
                    .collect::<Result<_>>()?;
                Paren(elems).into()
            }
            | inner => Err(ResolveError::InvalidPattern(Box::new(info.make(inner))))?,
        };
        Ok(info.make(node))
    }

    fn extend(self, local: &Local) -> Local {
        let mut var_to_def = local.var_to_def.clone();
        var_to_def.extend(self.bound);
        Local { var_to_def }
    }
}
