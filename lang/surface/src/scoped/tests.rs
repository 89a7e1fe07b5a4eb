use super::*;
use crate::{copattern::Flattener, textual::Parser};
use coda_syntax::*;
use coda_utils::pass::CompilerPass;
use pretty_assertions::assert_eq;

fn resolve(source: &str) -> Result<String> {
    let program = Parser::parse(source, "<test>").unwrap();
    let program = Flattener.run(program).unwrap();
    let mut resolver = Resolver::new();
    resolver.init(&program)?;
    Ok(resolver.run(program)?.to_string())
}

#[test]
fn binders_get_fresh_names() {
    assert_eq!(resolve("fn(x, y) -> x + y").unwrap(), "fn(x@1, y@2) -> x@1 + y@2");
    assert_eq!(
        resolve("let (a, _) = (1, 2) in match a | 0 -> a | b -> b end").unwrap(),
        "let (a@1, _) = (1, 2) in match a@1 | 0 -> a@1 | b@2 -> b@2 end"
    );
}

#[test]
fn innermost_binder_wins() {
    assert_eq!(resolve("fn(x) -> fn(x) -> x").unwrap(), "fn(x@1) -> fn(x@2) -> x@2");
    // the bound expression of a let does not see its own binder
    assert_eq!(resolve("fn(x) -> let x = x in x").unwrap(), "fn(x@1) -> let x@2 = x@1 in x@2");
}

#[test]
fn definitions_are_global() {
    let out = resolve("def even = fn(n) -> odd(n)\ndef odd = fn(n) -> even(n)\neven(1)").unwrap();
    assert_eq!(out, "def even = fn(n@1) -> odd(n@1)\ndef odd = fn(n@2) -> even(n@2)\neven(1)");
    // a local binder shadows a global
    assert_eq!(resolve("def f = 1\nfn(f) -> f").unwrap(), "def f = 1\nfn(f@1) -> f@1");
}

#[test]
fn flattened_scrutinees_are_renamed() {
    assert_eq!(
        resolve("{ #(n).next -> n + 1 }").unwrap(),
        "fn(%x0@1) -> obj { next = match %x0@1 | n@2 -> n@2 + 1 end }"
    );
}

#[test]
fn unbound_variable() {
    let ResolveError::UnboundVar(var) = resolve("fn(x) -> y").unwrap_err() else {
        panic!("expected an unbound variable")
    };
    assert_eq!(var.inner, VarName::from("y"));
    assert_eq!(var.info.range(), 9..10);
    // a local binder is not visible in a later definition
    assert!(matches!(resolve("def a = fn(x) -> x\ndef b = x"), Err(ResolveError::UnboundVar(_))));
}

#[test]
fn duplicate_definitions() {
    let ResolveError::DuplicateDefinition(first, second) =
        resolve("def a = 1\ndef a = 2").unwrap_err()
    else {
        panic!("expected a duplicate definition")
    };
    assert_eq!((first.info.range(), second.info.range()), (0..9, 10..19));
}

#[test]
fn malformed_binders() {
    assert!(matches!(resolve("fn(x, x) -> x"), Err(ResolveError::DuplicateBinder(_))));
    assert!(matches!(resolve("match 1, 2 | a, a -> a end"), Err(ResolveError::DuplicateBinder(_))));
    assert!(matches!(resolve("{ #(f(x)) -> x }"), Err(ResolveError::InvalidPattern(_))));
    assert!(matches!(resolve("_"), Err(ResolveError::HoleInExpression(_))));
}

#[test]
fn codata_must_be_flattened_first() {
    let program = Parser::parse("{ #.a -> 1 }", "<test>").unwrap();
    let mut resolver = Resolver::new();
    resolver.init(&program).unwrap();
    assert!(matches!(resolver.run(program), Err(ResolveError::Unflattened(_))));
}
