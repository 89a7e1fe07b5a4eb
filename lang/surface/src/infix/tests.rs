use super::*;
use crate::textual::Parser;
use coda_syntax::*;
use coda_utils::pass::CompilerPass;
use pretty_assertions::assert_eq;

fn resolve(source: &str) -> Result<String> {
    let program = Parser::parse(source, "<test>").unwrap();
    Ok(InfixResolver.run(program)?.to_string())
}

#[test]
fn precedence_levels() {
    assert_eq!(resolve("1 * 2 + 3").unwrap(), "(1 * 2) + 3");
    assert_eq!(resolve("1 + 2 * 3").unwrap(), "1 + (2 * 3)");
    assert_eq!(resolve("a || b && c == d + e * f").unwrap(), "a || (b && (c == (d + (e * f))))");
    assert_eq!(resolve("a * b + c < d && e || f").unwrap(), "((((a * b) + c) < d) && e) || f");
}

#[test]
fn left_associative() {
    assert_eq!(resolve("10 - 3 - 2").unwrap(), "(10 - 3) - 2");
    assert_eq!(resolve("8 / 2 / 2 % 3").unwrap(), "((8 / 2) / 2) % 3");
}

#[test]
fn parentheses_end_a_chain() {
    assert_eq!(resolve("10 - (3 - 2)").unwrap(), "10 - (3 - 2)");
    assert_eq!(resolve("(1 + 2) * 3").unwrap(), "(1 + 2) * 3");
}

#[test]
fn chains_inside_other_nodes() {
    assert_eq!(resolve("f(1 - 2 - 3).x").unwrap(), "f((1 - 2) - 3).x");
    assert_eq!(
        resolve("fn(a) -> a * 2 + 1").unwrap(),
        "fn(a) -> (a * 2) + 1"
    );
}

#[test]
fn comparisons_do_not_chain() {
    let err = resolve("a < b < c").unwrap_err();
    assert!(matches!(err, InfixError::NonAssociative { first: Op::Lt, second: Op::Lt, .. }));
    let err = resolve("a == b + 1 != c").unwrap_err();
    assert!(matches!(err, InfixError::NonAssociative { first: Op::Eq, second: Op::Ne, .. }));
    assert!(resolve("(a < b) == c").is_ok());
    assert!(resolve("a == b && c == d").is_ok());
}
