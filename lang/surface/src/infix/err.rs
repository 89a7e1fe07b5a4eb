use ariadne::{Label, Report, ReportKind};
use coda_syntax::*;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfixError {
    #[error("Operators `{first}` and `{second}` cannot be chained at {span}")]
    NonAssociative { first: Op, second: Op, span: Span },
}

pub type Result<T> = std::result::Result<T, InfixError>;

impl InfixError {
    pub fn span(&self) -> Span {
        match self {
            | InfixError::NonAssociative { span, .. } => *span,
        }
    }

    /// Create an Ariadne report for this infix error.
    pub fn to_report(&self, file: &str) -> Report<'static, (String, Range<usize>)> {
        let InfixError::NonAssociative { first, second, span } = self;
        let range = span.range();
        Report::build(ReportKind::Error, file.to_string(), range.start)
            .with_message("Non-associative operators")
            .with_label(
                Label::new((file.to_string(), range))
                    .with_message(format!("`{first}` is followed by `{second}`")),
            )
            .with_note("add parentheses to group the comparison")
            .finish()
    }
}
