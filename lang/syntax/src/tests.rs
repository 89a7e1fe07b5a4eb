use crate::*;
use pretty_assertions::assert_eq;

fn t(node: impl Into<Node>) -> Term {
    Sp::internal(node.into())
}

fn var(name: &str) -> Term {
    t(VarName::from(name))
}

fn int(i: i64) -> Term {
    t(Literal::Int(i))
}

fn access(receiver: Term, name: &str) -> Term {
    t(Access { receiver: Box::new(receiver), name: name.into() })
}

fn codata(clauses: Vec<(Term, Term)>) -> Term {
    let clauses = clauses
        .into_iter()
        .map(|(pattern, expr)| Sp::internal(Clause { patterns: vec![pattern], exprs: vec![expr] }))
        .collect();
    t(Codata { clauses })
}

#[test]
fn ugly_prints_surface_shapes() {
    let stream = codata(vec![(access(t(This), "head"), int(1)), (access(t(This), "tail"), int(2))]);
    assert_eq!(stream.to_string(), "{ #.head -> 1, #.tail -> 2 } (<internal>)");
    assert_eq!(stream.inner.to_string(), "{ #.head -> 1, #.tail -> 2 }");

    let sum = t(BinOp { op: Op::Add, lhs: Box::new(var("x")), rhs: Box::new(var("y")) });
    let lam = t(Lambda { params: vec!["x".into(), "y".into()], exprs: vec![sum.clone()] });
    assert_eq!(lam.inner.to_string(), "fn(x, y) -> x + y");
    let call = t(Call { func: Box::new(lam), args: vec![int(1), int(2)] });
    assert_eq!(call.inner.to_string(), "(fn(x, y) -> x + y)(1, 2)");

    let case = t(Case {
        scrutinees: vec![var("a")],
        clauses: vec![Sp::internal(Clause { patterns: vec![t(Hole)], exprs: vec![sum] })],
    });
    assert_eq!(case.inner.to_string(), "match a | _ -> x + y end");

    let object = t(Object { fields: vec![Field { name: "f".into(), exprs: vec![int(0)] }] });
    assert_eq!(object.inner.to_string(), "obj { f = 0 }");
}

#[test]
fn transform_rewrites_children_before_parents() {
    // (a.x).y
    let term = access(access(var("a"), "x"), "y");
    let mut seen = Vec::new();
    let out = transform(term, &mut |term: Term| -> Result<Term, ()> {
        seen.push(term.inner.to_string());
        Ok(term)
    })
    .unwrap();
    assert_eq!(seen, vec!["a", "a.x", "a.x.y"]);
    assert_eq!(out.inner.to_string(), "a.x.y");
}

#[test]
fn transform_sees_rewritten_children() {
    let inner = codata(vec![(access(t(This), "v"), int(1))]);
    let term = codata(vec![(access(t(This), "inner"), inner)]);
    let mut depth = 0;
    let out = transform(term, &mut |term: Term| -> Result<Term, ()> {
        match &term.inner {
            | Node::Codata(Codata { clauses }) => {
                // a nested codata has already been replaced by the time its parent is visited
                assert!(clauses.iter().all(|clause| {
                    clause.inner.exprs.iter().all(|expr| !matches!(expr.inner, Node::Codata(_)))
                }));
                depth += 1;
                Ok(var(&format!("flat{depth}")))
            }
            | _ => Ok(term),
        }
    })
    .unwrap();
    assert_eq!(out, var("flat2"));
}

#[test]
fn transform_stops_at_first_error() {
    let term = t(Paren(vec![var("ok"), var("bad"), var("never")]));
    let mut visited = Vec::new();
    let res = transform(term, &mut |term: Term| {
        visited.push(term.inner.to_string());
        if term.inner.is_var("bad") { Err("bad") } else { Ok(term) }
    });
    assert_eq!(res, Err("bad"));
    assert_eq!(visited, vec!["ok", "bad"]);
}

#[test]
fn find_is_preorder() {
    let term = t(Paren(vec![access(t(This), "a"), t(This)]));
    let found = find(&term, &mut |term| matches!(term.inner, Node::This(_)));
    assert!(found.is_some());
    let none = find(&term, &mut |term| matches!(term.inner, Node::Codata(_)));
    assert!(none.is_none());
}
