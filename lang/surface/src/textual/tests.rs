use super::*;
use coda_syntax::*;
use coda_utils::span::Cursor2;
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Program {
    Parser::parse(source, "<test>").unwrap()
}

fn parse_err(source: &str) -> ParseError {
    Parser::parse(source, "<test>").unwrap_err()
}

#[test]
fn codata_blocks() {
    let program = parse("{ #.head -> 1, #.tail -> 2 }");
    assert_eq!(program.to_string(), "{ #.head -> 1, #.tail -> 2 }");
    let program = parse("{ #(x, y).f.g -> x + y, }");
    assert_eq!(program.to_string(), "{ #(x, y).f.g -> x + y }");
}

#[test]
fn codata_clause_may_list_several_patterns() {
    let program = parse("{ #.a, #.b -> 1 }");
    let Node::Codata(Codata { clauses }) = &program.0[0].inner else { panic!("not codata") };
    assert_eq!(clauses[0].inner.patterns.len(), 2);
}

#[test]
fn binary_chains_lean_right() {
    assert_eq!(parse("1 * 2 + 3").to_string(), "1 * (2 + 3)");
    assert_eq!(parse("(1 * 2) + 3").to_string(), "(1 * 2) + 3");
    assert_eq!(parse("a.b(c).d").to_string(), "a.b(c).d");
}

#[test]
fn definitions_and_expressions() {
    let program = parse("def one = 1\none; two\ndef two = 2");
    let items = program.iter().map(|item| item.inner.to_string()).collect::<Vec<_>>();
    assert_eq!(items, vec!["def one = 1", "one", "two", "def two = 2"]);
}

#[test]
fn binders() {
    let program = parse("let (a, _) = p in fn(x, y) -> a; x");
    assert_eq!(program.to_string(), "let (a, _) = p in fn(x, y) -> a; x");
    let program = parse("match n, m | 0, _ -> true | _, () -> false end");
    assert_eq!(program.to_string(), "match n, m | 0, _ -> true | _, () -> false end");
}

#[test]
fn literals() {
    let program = parse(r#""a\n\"b\"" false 42"#);
    let lits = program.iter().map(|item| item.inner.clone()).collect::<Vec<_>>();
    assert_eq!(
        lits,
        vec![
            Literal::String("a\n\"b\"".to_string()).into(),
            Literal::Bool(false).into(),
            Literal::Int(42).into(),
        ]
    );
}

#[test]
fn comments_nest() {
    let program = parse("/- a /- b -/ c -/ 1 -- trailing\n-- whole line\n2");
    assert_eq!(program.to_string(), "1\n2");
}

#[test]
fn spans_resolve_to_lines() {
    let program = parse("\n  foo");
    let span = program.0[0].info;
    assert_eq!(span.range(), 3..6);
    assert_eq!(
        span.get_cursor2(),
        Some((Cursor2 { line: 2, column: 3 }, Cursor2 { line: 2, column: 6 }))
    );
}

#[test]
fn lexical_errors() {
    assert!(matches!(parse_err("1 @ 2"), ParseError::InvalidToken { .. }));
    let err = parse_err("1 /- never closed");
    assert!(matches!(err, ParseError::UnterminatedComment { .. }));
    assert_eq!(err.span().range(), 2..4);
    assert!(matches!(parse_err("1 -/"), ParseError::UnmatchedCommentEnd { .. }));
}

#[test]
fn syntax_errors() {
    assert!(matches!(parse_err("fn(x) ->"), ParseError::UnexpectedEof { .. }));
    assert!(matches!(parse_err("{ }"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_err("match a end"), ParseError::UnexpectedToken { .. }));
    let ParseError::PatternCount { expected, found, span } = parse_err("match a, b | x -> 1 end")
    else {
        panic!("expected a pattern count error")
    };
    assert_eq!((expected, found, span.range()), (2, 1, 11..14));
    assert!(matches!(parse_err("99999999999999999999"), ParseError::InvalidLiteral { .. }));
    assert!(matches!(parse_err(r#""\q""#), ParseError::InvalidLiteral { .. }));
}
