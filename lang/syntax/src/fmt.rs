//! The formatter traits.
//!
//! `Ugly` prints a node on a single line and is what error messages and tests
//! use; `Pretty` lays the tree out over several lines for dumps.

use crate::*;
use pretty::RcDoc;
use std::{rc::Rc, sync::Arc};

#[impl_tools::autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>, Rc<T>, Arc<T>)]
pub trait Ugly<'a, Fmter> {
    fn ugly(&self, f: &'a Fmter) -> String;
}

#[impl_tools::autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>, Rc<T>, Arc<T>)]
pub trait Pretty<'a, Fmter> {
    fn pretty(&self, f: &'a Fmter) -> RcDoc<'a>;
}

/* -------------------------------- Formatter ------------------------------- */

pub struct Formatter {
    /// indentation used by the pretty printer
    pub indent: isize,
    /// line width used by the pretty printer
    pub width: usize,
}
impl Formatter {
    pub fn new() -> Self {
        Formatter { indent: 2, width: 80 }
    }
    /// Render a pretty document to a string.
    pub fn render<'a>(&self, doc: RcDoc<'a>) -> String {
        let mut s = String::new();
        // writing into a `String` cannot fail
        let _ = doc.render_fmt(self.width, &mut s);
        s
    }
}
impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

/* ---------------------------------- Ugly ---------------------------------- */

fn commas<'a, T: Ugly<'a, Formatter>>(items: &[T], f: &'a Formatter) -> String {
    items.iter().map(|item| item.ugly(f)).collect::<Vec<_>>().join(", ")
}

fn seq<'a>(exprs: &[Term], f: &'a Formatter) -> String {
    exprs.iter().map(|expr| expr.ugly(f)).collect::<Vec<_>>().join("; ")
}

/// Nodes whose syntax extends as far to the right as possible need parens
/// when they appear as an operand, a receiver or a callee.
fn greedy(node: &Node) -> bool {
    matches!(node, Node::BinOp(_) | Node::Lambda(_) | Node::Let(_) | Node::Def(_))
}

fn atomic<'a>(term: &Term, f: &'a Formatter) -> String {
    if greedy(&term.inner) { format!("({})", term.ugly(f)) } else { term.ugly(f) }
}

impl<'a, T: Ugly<'a, Formatter>> Ugly<'a, Formatter> for Sp<T> {
    fn ugly(&self, f: &'a Formatter) -> String {
        self.inner.ugly(f)
    }
}

impl<'a> Ugly<'a, Formatter> for Program {
    fn ugly(&self, f: &'a Formatter) -> String {
        let Program(items) = self;
        items.iter().map(|item| item.ugly(f)).collect::<Vec<_>>().join("\n")
    }
}

impl<'a> Ugly<'a, Formatter> for Clause {
    fn ugly(&self, f: &'a Formatter) -> String {
        let Clause { patterns, exprs } = self;
        format!("{} -> {}", commas(patterns, f), seq(exprs, f))
    }
}

impl<'a> Ugly<'a, Formatter> for Field {
    fn ugly(&self, f: &'a Formatter) -> String {
        let Field { name, exprs } = self;
        format!("{} = {}", name, seq(exprs, f))
    }
}

impl<'a> Ugly<'a, Formatter> for Node {
    fn ugly(&self, f: &'a Formatter) -> String {
        match self {
            | Node::This(This) => "#".to_string(),
            | Node::Hole(Hole) => "_".to_string(),
            | Node::Var(var) => var.to_string(),
            | Node::Lit(lit) => lit.to_string(),
            | Node::Paren(Paren(elems)) => format!("({})", commas(elems, f)),
            | Node::Access(Access { receiver, name }) => {
                format!("{}.{}", atomic(receiver, f), name)
            }
            | Node::Call(Call { func, args }) => {
                format!("{}({})", atomic(func, f), commas(args, f))
            }
            | Node::BinOp(BinOp { op, lhs, rhs }) => {
                format!("{} {} {}", atomic(lhs, f), op, atomic(rhs, f))
            }
            | Node::Codata(Codata { clauses }) => format!("{{ {} }}", commas(clauses, f)),
            | Node::Object(Object { fields }) if fields.is_empty() => "obj {}".to_string(),
            | Node::Object(Object { fields }) => format!("obj {{ {} }}", commas(fields, f)),
            | Node::Lambda(Lambda { params, exprs }) => {
                format!("fn({}) -> {}", commas(params, f), seq(exprs, f))
            }
            | Node::Case(Case { scrutinees, clauses }) => {
                let mut s = format!("match {}", commas(scrutinees, f));
                for clause in clauses {
                    s += &format!(" | {}", clause.ugly(f));
                }
                s += " end";
                s
            }
            | Node::Let(Let { binder, bindee, tail }) => {
                format!("let {} = {} in {}", binder.ugly(f), bindee.ugly(f), seq(tail, f))
            }
            | Node::Def(Def { name, exprs }) => format!("def {} = {}", name, seq(exprs, f)),
        }
    }
}

impl<'a> Ugly<'a, Formatter> for VarName {
    fn ugly(&self, _f: &'a Formatter) -> String {
        self.to_string()
    }
}

/* --------------------------------- Pretty --------------------------------- */

fn pretty_commas<'a, T: Pretty<'a, Formatter>>(items: &[T], f: &'a Formatter) -> RcDoc<'a> {
    let sep = RcDoc::text(",").append(RcDoc::line());
    RcDoc::intersperse(items.iter().map(|item| item.pretty(f)), sep)
}

fn pretty_seq<'a>(exprs: &[Term], f: &'a Formatter) -> RcDoc<'a> {
    let sep = RcDoc::text(";").append(RcDoc::line());
    RcDoc::intersperse(exprs.iter().map(|expr| expr.pretty(f)), sep)
        .group()
}

/// `open` items `close`, broken over lines when it does not fit
fn block<'a>(open: &'a str, body: RcDoc<'a>, close: &'a str, f: &'a Formatter) -> RcDoc<'a> {
    RcDoc::text(open)
        .append(RcDoc::line().append(body).nest(f.indent))
        .append(RcDoc::line())
        .append(RcDoc::text(close))
        .group()
}

fn pretty_atomic<'a>(term: &Term, f: &'a Formatter) -> RcDoc<'a> {
    if greedy(&term.inner) {
        RcDoc::text("(").append(term.pretty(f)).append(RcDoc::text(")"))
    } else {
        term.pretty(f)
    }
}

impl<'a, T: Pretty<'a, Formatter>> Pretty<'a, Formatter> for Sp<T> {
    fn pretty(&self, f: &'a Formatter) -> RcDoc<'a> {
        self.inner.pretty(f)
    }
}

impl<'a> Pretty<'a, Formatter> for Program {
    fn pretty(&self, f: &'a Formatter) -> RcDoc<'a> {
        let Program(items) = self;
        RcDoc::intersperse(items.iter().map(|item| item.pretty(f)), RcDoc::hardline())
    }
}

impl<'a> Pretty<'a, Formatter> for Clause {
    fn pretty(&self, f: &'a Formatter) -> RcDoc<'a> {
        let Clause { patterns, exprs } = self;
        pretty_commas(patterns, f)
            .append(RcDoc::text(" ->"))
            .append(RcDoc::line().append(pretty_seq(exprs, f)).nest(f.indent))
            .group()
    }
}

impl<'a> Pretty<'a, Formatter> for Field {
    fn pretty(&self, f: &'a Formatter) -> RcDoc<'a> {
        let Field { name, exprs } = self;
        RcDoc::text(format!("{name} ="))
            .append(RcDoc::line().append(pretty_seq(exprs, f)).nest(f.indent))
            .group()
    }
}

impl<'a> Pretty<'a, Formatter> for Node {
    fn pretty(&self, f: &'a Formatter) -> RcDoc<'a> {
        match self {
            | Node::This(_) | Node::Hole(_) | Node::Var(_) | Node::Lit(_) => {
                RcDoc::text(self.ugly(f))
            }
            | Node::Paren(Paren(elems)) => {
                RcDoc::text("(").append(pretty_commas(elems, f).nest(1)).append(")").group()
            }
            | Node::Access(Access { receiver, name }) => {
                pretty_atomic(receiver, f).append(RcDoc::text(format!(".{name}")))
            }
            | Node::Call(Call { func, args }) => pretty_atomic(func, f)
                .append(RcDoc::text("("))
                .append(pretty_commas(args, f).nest(f.indent))
                .append(RcDoc::text(")"))
                .group(),
            | Node::BinOp(BinOp { op, lhs, rhs }) => pretty_atomic(lhs, f)
                .append(RcDoc::text(format!(" {op}")))
                .append(RcDoc::line())
                .append(pretty_atomic(rhs, f))
                .group(),
            | Node::Codata(Codata { clauses }) => block("{", pretty_commas(clauses, f), "}", f),
            | Node::Object(Object { fields }) if fields.is_empty() => RcDoc::text("obj {}"),
            | Node::Object(Object { fields }) => block("obj {", pretty_commas(fields, f), "}", f),
            | Node::Lambda(Lambda { params, exprs }) => {
                let head = RcDoc::text(format!("fn({}) ->", commas(params, f)));
                head.append(RcDoc::line().append(pretty_seq(exprs, f)).nest(f.indent)).group()
            }
            | Node::Case(Case { scrutinees, clauses }) => {
                let head = RcDoc::text("match ").append(pretty_commas(scrutinees, f));
                let arms = clauses.iter().map(|clause| {
                    RcDoc::line().append(RcDoc::text("| ")).append(clause.pretty(f).nest(f.indent))
                });
                head.append(RcDoc::concat(arms).nest(f.indent))
                    .append(RcDoc::line())
                    .append(RcDoc::text("end"))
                    .group()
            }
            | Node::Let(Let { binder, bindee, tail }) => RcDoc::text("let ")
                .append(binder.pretty(f))
                .append(RcDoc::text(" ="))
                .append(RcDoc::line().append(bindee.pretty(f)).nest(f.indent))
                .append(RcDoc::line())
                .append(RcDoc::text("in "))
                .append(pretty_seq(tail, f))
                .group(),
            | Node::Def(Def { name, exprs }) => RcDoc::text(format!("def {name} ="))
                .append(RcDoc::line().append(pretty_seq(exprs, f)).nest(f.indent))
                .group(),
        }
    }
}
