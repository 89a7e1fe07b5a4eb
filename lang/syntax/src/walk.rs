//! Generic traversals over the node tree.

use crate::*;

impl Node {
    /// Rebuild the node with every direct child term replaced by `f(child)`.
    ///
    /// Children are visited in source order. Names (`Lambda` parameters,
    /// `Access` fields, `Def` names) are not terms and are kept as they are.
    pub fn try_map_children<E>(
        self, f: &mut impl FnMut(Term) -> Result<Term, E>,
    ) -> Result<Node, E> {
        let node = match self {
            | Node::This(_) | Node::Hole(_) | Node::Var(_) | Node::Lit(_) => self,
            | Node::Paren(Paren(elems)) => Paren(map_vec(elems, f)?).into(),
            | Node::Access(Access { receiver, name }) => {
                Access { receiver: Box::new(f(*receiver)?), name }.into()
            }
            | Node::Call(Call { func, args }) => {
                let func = Box::new(f(*func)?);
                Call { func, args: map_vec(args, f)? }.into()
            }
            | Node::BinOp(BinOp { op, lhs, rhs }) => {
                let lhs = Box::new(f(*lhs)?);
                BinOp { op, lhs, rhs: Box::new(f(*rhs)?) }.into()
            }
            | Node::Codata(Codata { clauses }) => {
                Codata { clauses: map_clauses(clauses, f)? }.into()
            }
            | Node::Object(Object { fields }) => {
                let fields = fields
                    .into_iter()
                    .map(|Field { name, exprs }| -> Result<Field, E> {
                        Ok(Field { name, exprs: map_vec(exprs, &mut *f)? })
                    })
                    .collect::<Result<_, E>>()?;
                Object { fields }.into()
            }
            | Node::Lambda(Lambda { params, exprs }) => {
                Lambda { params, exprs: map_vec(exprs, f)? }.into()
            }
            | Node::Case(Case { scrutinees, clauses }) => {
                let scrutinees = map_vec(scrutinees, f)?;
                Case { scrutinees, clauses: map_clauses(clauses, f)? }.into()
            }
            | Node::Let(Let { binder, bindee, tail }) => {
                let binder = Box::new(f(*binder)?);
                let bindee = Box::new(f(*bindee)?);
                Let { binder, bindee, tail: map_vec(tail, f)? }.into()
            }
            | Node::Def(Def { name, exprs }) => Def { name, exprs: map_vec(exprs, f)? }.into(),
        };
        Ok(node)
    }

    /// The direct child terms, in the order [`Node::try_map_children`] visits them.
    pub fn children(&self) -> Vec<&Term> {
        fn clauses(clauses: &[Sp<Clause>]) -> impl Iterator<Item = &Term> {
            clauses.iter().flat_map(|clause| {
                let Clause { patterns, exprs } = &clause.inner;
                patterns.iter().chain(exprs.iter())
            })
        }
        match self {
            | Node::This(_) | Node::Hole(_) | Node::Var(_) | Node::Lit(_) => Vec::new(),
            | Node::Paren(Paren(elems)) => elems.iter().collect(),
            | Node::Access(Access { receiver, .. }) => vec![receiver.as_ref()],
            | Node::Call(Call { func, args }) => {
                std::iter::once(func.as_ref()).chain(args.iter()).collect()
            }
            | Node::BinOp(BinOp { lhs, rhs, .. }) => vec![lhs.as_ref(), rhs.as_ref()],
            | Node::Codata(Codata { clauses: cs }) => clauses(cs).collect(),
            | Node::Object(Object { fields }) => {
                fields.iter().flat_map(|field| field.exprs.iter()).collect()
            }
            | Node::Lambda(Lambda { exprs, .. }) => exprs.iter().collect(),
            | Node::Case(Case { scrutinees, clauses: cs }) => {
                scrutinees.iter().chain(clauses(cs)).collect()
            }
            | Node::Let(Let { binder, bindee, tail }) => {
                [binder.as_ref(), bindee.as_ref()].into_iter().chain(tail.iter()).collect()
            }
            | Node::Def(Def { exprs, .. }) => exprs.iter().collect(),
        }
    }
}

fn map_vec<E>(
    terms: Vec<Term>, f: &mut impl FnMut(Term) -> Result<Term, E>,
) -> Result<Vec<Term>, E> {
    terms.into_iter().map(|term| f(term)).collect()
}

fn map_clauses<E>(
    clauses: Vec<Sp<Clause>>, f: &mut impl FnMut(Term) -> Result<Term, E>,
) -> Result<Vec<Sp<Clause>>, E> {
    clauses
        .into_iter()
        .map(|clause| {
            clause.try_map(|Clause { patterns, exprs }| -> Result<Clause, E> {
                let patterns = map_vec(patterns, &mut *f)?;
                Ok(Clause { patterns, exprs: map_vec(exprs, &mut *f)? })
            })
        })
        .collect()
}

/// Bottom-up rewrite: every child is transformed before `f` sees its parent.
pub fn transform<E, F>(term: Term, f: &mut F) -> Result<Term, E>
where
    F: FnMut(Term) -> Result<Term, E>,
{
    let Sp { inner, info } = term;
    let inner = inner.try_map_children(&mut |child| transform(child, &mut *f))?;
    f(info.make(inner))
}

/// Pre-order search for the first term satisfying `pred`.
pub fn find<'a>(term: &'a Term, pred: &mut impl FnMut(&Term) -> bool) -> Option<&'a Term> {
    if pred(term) {
        return Some(term);
    }
    term.inner.children().into_iter().find_map(|child| find(child, &mut *pred))
}
