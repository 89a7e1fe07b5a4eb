use super::*;
use crate::textual::Parser;
use coda_syntax::*;
use coda_utils::pass::CompilerPass;
use pretty_assertions::assert_eq;

fn flat(source: &str) -> Result<Program> {
    let program = Parser::parse(source, "<test>").unwrap();
    Flattener.run(program)
}

fn flat_ok(source: &str) -> String {
    flat(source).unwrap().to_string()
}

fn flat_err(source: &str) -> CoPatternError {
    flat(source).unwrap_err()
}

fn t(node: impl Into<Node>) -> Term {
    Sp::internal(node.into())
}

fn var(name: &str) -> Term {
    t(VarName::from(name))
}

fn int(i: i64) -> Term {
    t(Literal::Int(i))
}

fn field(name: &str, exprs: Vec<Term>) -> Field {
    Field { name: name.into(), exprs }
}

/* -------------------------------- Scenarios ------------------------------- */

#[test]
fn object_from_fields() {
    let program = flat("{ #.head -> 1, #.tail -> 2 }").unwrap();
    let fields = vec![field("head", vec![int(1)]), field("tail", vec![int(2)])];
    let expected = t(Object { fields });
    assert_eq!(program, Program(vec![expected]));
}

#[test]
fn lambda_over_nested_fields() {
    let program = flat("{ #(x, y).f.g -> x + y }").unwrap();
    let sum = t(BinOp { op: Op::Add, lhs: Box::new(var("x")), rhs: Box::new(var("y")) });
    let case = t(Case {
        scrutinees: vec![var("%x0"), var("%x1")],
        clauses: vec![Sp::internal(Clause {
            patterns: vec![var("x"), var("y")],
            exprs: vec![sum],
        })],
    });
    let g = t(Object { fields: vec![field("g", vec![case])] });
    let f = t(Object { fields: vec![field("f", vec![g])] });
    let expected = t(Lambda { params: vec!["%x0".into(), "%x1".into()], exprs: vec![f] });
    assert_eq!(program, Program(vec![expected]));
    assert_eq!(
        program.to_string(),
        "fn(%x0, %x1) -> obj { f = obj { g = match %x0, %x1 | x, y -> x + y end } }"
    );
}

#[test]
fn call_and_no_call_disagree() {
    let CoPatternError::ArityError { expected, found, .. } =
        flat_err("{ #.head -> 1, #(x).tail -> 2 }")
    else {
        panic!("expected an arity error")
    };
    assert_eq!((expected, found), (Arity::NoArgs, Arity::Args(1)));
}

#[test]
fn call_on_projected_field() {
    let CoPatternError::InvalidCallPattern(term) = flat_err("{ #.f(x) -> 1 }") else {
        panic!("expected an invalid call pattern")
    };
    assert_eq!(term.inner.to_string(), "#.f(x)");
}

#[test]
fn terminal_and_continuing_in_one_bucket() {
    let source = "{ #(x).h -> a, #(x).h.h -> b }";
    let CoPatternError::UnsupportedPattern { field, span } = flat_err(source) else {
        panic!("expected an unsupported pattern")
    };
    assert_eq!(field, Some(FieldName::from("h")));
    // the first terminal clause
    assert_eq!(span.range(), 2..13);
}

/* ------------------------------- Properties ------------------------------- */

#[test]
fn fields_sorted_by_name() {
    assert_eq!(
        flat_ok("{ #.zeta -> 1, #.alpha -> 2, #.mid -> 3 }"),
        "obj { alpha = 2, mid = 3, zeta = 1 }"
    );
    assert_eq!(
        flat_ok("{ #.b.z -> 1, #.a -> 2, #.b.y -> 3 }"),
        "obj { a = 2, b = obj { y = 3, z = 1 } }"
    );
}

#[test]
fn arms_keep_source_order() {
    assert_eq!(
        flat_ok("{ #(0).f -> 10, #(n).g -> n, #(1).f -> 11, #(_).f -> 12 }"),
        "fn(%x0) -> obj { f = match %x0 | 0 -> 10 | 1 -> 11 | _ -> 12 end, \
         g = match %x0 | n -> n end }"
    );
}

#[test]
fn pure_function_is_a_single_match() {
    assert_eq!(
        flat_ok("{ #(0) -> 1, #(n) -> n; n }"),
        "fn(%x0) -> match %x0 | 0 -> 1 | n -> n; n end"
    );
    let program = flat("{ #() -> 1 }").unwrap();
    let Node::Lambda(Lambda { params, exprs }) = &program.0[0].inner else {
        panic!("not a lambda")
    };
    assert!(params.is_empty());
    assert!(matches!(
        &exprs[0].inner,
        Node::Case(Case { scrutinees, .. }) if scrutinees.is_empty()
    ));
}

#[test]
fn continuing_rows_share_one_object() {
    assert_eq!(
        flat_ok("{ #(x).f.a -> x, #(y).f.b -> y }"),
        "fn(%x0) -> obj { f = obj { a = match %x0 | x -> x end, b = match %x0 | y -> y end } }"
    );
}

#[test]
fn flattening_is_deterministic() {
    let source = "{ #(a, b).s.t -> a, #(c, d).r -> d, #(e, f).s.u -> { #.k -> e } }";
    assert_eq!(flat(source).unwrap(), flat(source).unwrap());
}

#[test]
fn nothing_left_to_eliminate() {
    let sources = [
        "{ #.head -> 1, #.tail -> { #.head -> 2, #.tail -> 3 } }",
        "fn(x) -> { #(y).add -> x + y }",
        "def s = { #(n).next -> s(n + 1), #(n).value -> n }",
        "let o = { #.a.b -> { #(z) -> z } } in o.a.b(1)",
        "match { #.v -> 0 } | _ -> 1 end",
    ];
    for source in sources {
        let program = flat(source).unwrap();
        for term in program.iter() {
            let leftover =
                find(term, &mut |term| matches!(term.inner, Node::This(_) | Node::Codata(_)));
            assert!(leftover.is_none(), "{source} left {leftover:?}");
        }
    }
}

#[test]
fn nested_blocks_flatten_first() {
    assert_eq!(
        flat_ok("{ #.inner -> { #.v -> 1 } }"),
        "obj { inner = obj { v = 1 } }"
    );
    assert_eq!(
        flat_ok("fn(x) -> { #(y).add -> x + y }"),
        "fn(x) -> fn(%x0) -> obj { add = match %x0 | y -> x + y end }"
    );
}

#[test]
fn generated_nodes_take_the_block_span() {
    let program = flat("  { #.a -> 1 }").unwrap();
    assert_eq!(program.0[0].info.range(), 2..14);
}

/* --------------------------------- Errors --------------------------------- */

#[test]
fn duplicate_field_without_call() {
    let CoPatternError::DuplicateField { field, span } = flat_err("{ #.a -> 1, #.a -> 2 }") else {
        panic!("expected a duplicate field")
    };
    assert_eq!(field, FieldName::from("a"));
    assert_eq!(span.range(), 12..20);
    // with a call the clauses are arms of one match
    assert_eq!(
        flat_ok("{ #(0).a -> 1, #(n).a -> 2 }"),
        "fn(%x0) -> obj { a = match %x0 | 0 -> 1 | n -> 2 end }"
    );
}

#[test]
fn clause_with_several_copatterns() {
    assert!(matches!(
        flat_err("{ #.a, #.b -> 1 }"),
        CoPatternError::InvalidPattern { found: 2, .. }
    ));
}

#[test]
fn copattern_without_focus() {
    let CoPatternError::MissingFocus(term) = flat_err("{ x.head -> 1 }") else {
        panic!("expected a missing focus")
    };
    assert_eq!(term.inner.to_string(), "x.head");
}

#[test]
fn focus_outside_copattern() {
    assert!(matches!(flat_err("{ #.self -> # }"), CoPatternError::StrayFocus(_)));
    assert!(matches!(flat_err("#.a"), CoPatternError::StrayFocus(_)));
}

#[test]
fn first_failing_term_is_reported() {
    let source = "#.a\n{ #.head -> 1, #(x).tail -> 2 }";
    assert!(matches!(flat_err(source), CoPatternError::StrayFocus(_)));
    let source = "{ #.head -> 1, #(x).tail -> 2 }\n#.a";
    assert!(matches!(flat_err(source), CoPatternError::ArityError { .. }));
}

#[test]
fn argument_counts_disagree() {
    let CoPatternError::ArityError { expected, found, .. } =
        flat_err("{ #(x).a -> 1, #(x, y).b -> 2 }")
    else {
        panic!("expected an arity error")
    };
    assert_eq!((expected, found), (Arity::Args(1), Arity::Args(2)));
}

#[test]
fn value_clause_among_methods() {
    assert!(matches!(
        flat_err("{ #(x) -> 1, #(y).f -> 2 }"),
        CoPatternError::UnsupportedPattern { field: None, .. }
    ));
    assert!(matches!(
        flat_err("{ # -> 1 }"),
        CoPatternError::UnsupportedPattern { field: None, .. }
    ));
}

/* ------------------------------ Pattern lists ----------------------------- */

#[test]
fn pattern_list_reads_accessors_in_order() {
    let program = Parser::parse("#(a, b).f.g.h", "<test>").unwrap();
    let list = PatternList::from_copattern(&program.0[0]).unwrap();
    let names = list.accessors.iter().map(|name| name.plain()).collect::<Vec<_>>();
    assert_eq!(names, vec!["f", "g", "h"]);
    assert_eq!(list.arity(), Arity::Args(2));

    let (first, rest) = list.pop().unwrap();
    assert_eq!(first, FieldName::from("f"));
    assert_eq!(rest.accessors.len(), 2);
    // popping leaves the original untouched
    assert_eq!(list.accessors.len(), 3);
    assert_eq!(rest.params, list.params);
}
