use ariadne::{Label, Report, ReportKind};
use coda_syntax::*;
use std::ops::Range;
use thiserror::Error;

/// Errors reported during name resolution.
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    #[error("Unbound variable: {0}")]
    UnboundVar(Sp<VarName>),
    #[error("Duplicate definition: {0} and {1}")]
    DuplicateDefinition(Sp<VarName>, Sp<VarName>),
    #[error("Variable bound twice in one pattern: {0}")]
    DuplicateBinder(Sp<VarName>),
    #[error("Not a pattern: {0}")]
    InvalidPattern(Box<Term>),
    #[error("`_` can only be used in patterns: {0}")]
    HoleInExpression(Box<Term>),
    #[error("Codata left after flattening: {0}")]
    Unflattened(Box<Term>),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

impl ResolveError {
    pub fn span(&self) -> Span {
        match self {
            | ResolveError::UnboundVar(var)
            | ResolveError::DuplicateDefinition(_, var)
            | ResolveError::DuplicateBinder(var) => var.info,
            | ResolveError::InvalidPattern(term)
            | ResolveError::HoleInExpression(term)
            | ResolveError::Unflattened(term) => term.info,
        }
    }

    /// Create an Ariadne report for this resolve error.
    pub fn to_report(&self, file: &str) -> Report<'static, (String, Range<usize>)> {
        let label = |span: Span, message: String| {
            Label::new((file.to_string(), span.range())).with_message(message)
        };
        let start = self.span().range().start;
        let report = Report::build(ReportKind::Error, file.to_string(), start);
        match self {
            | ResolveError::UnboundVar(var) => report
                .with_message("Unbound variable")
                .with_label(label(var.info, format!("variable `{}` is not defined", var.inner))),
            | ResolveError::DuplicateDefinition(first, second) => report
                .with_message("Duplicate definition")
                .with_label(label(first.info, format!("first definition of `{}`", first.inner)))
                .with_label(label(second.info, format!("second definition of `{}`", second.inner))),
            | ResolveError::DuplicateBinder(var) => report
                .with_message("Duplicate binder")
                .with_label(label(var.info, format!("`{}` is bound more than once", var.inner))),
            | ResolveError::InvalidPattern(term) => report
                .with_message("Invalid pattern")
                .with_label(label(term.info, format!("`{}` is not a pattern", term.inner))),
            | ResolveError::HoleInExpression(term) => report
                .with_message("Hole in expression")
                .with_label(label(term.info, "`_` has no value".to_string())),
            | ResolveError::Unflattened(term) => report
                .with_message("Unflattened codata")
                .with_label(label(
                    term.info,
                    format!("`{}` should have been flattened", term.inner),
                )),
        }
        .finish()
    }
}
