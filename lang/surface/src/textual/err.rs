use ariadne::{Label, Report, ReportKind};
use coda_utils::span::Span;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid token at {span}")]
    InvalidToken { span: Span },
    #[error("Unterminated block comment starting at {span}")]
    UnterminatedComment { span: Span },
    #[error("Unmatched `-/` at {span}")]
    UnmatchedCommentEnd { span: Span },
    #[error("Unexpected token `{found}` at {span}, expected {expected}")]
    UnexpectedToken { found: String, expected: String, span: Span },
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },
    #[error("Invalid literal {literal} at {span}")]
    InvalidLiteral { literal: String, span: Span },
    #[error("Expected {expected} patterns but found {found} at {span}")]
    PatternCount { expected: usize, found: usize, span: Span },
}

pub type Result<T> = std::result::Result<T, ParseError>;

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            | ParseError::InvalidToken { span }
            | ParseError::UnterminatedComment { span }
            | ParseError::UnmatchedCommentEnd { span }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::InvalidLiteral { span, .. }
            | ParseError::PatternCount { span, .. } => *span,
        }
    }

    /// Create an Ariadne report for this parse error.
    pub fn to_report(&self, file: &str) -> Report<'static, (String, Range<usize>)> {
        let range = self.span().range();
        let label = match self {
            | ParseError::InvalidToken { .. } => "this is not a token".to_string(),
            | ParseError::UnterminatedComment { .. } => "comment opened here".to_string(),
            | ParseError::UnmatchedCommentEnd { .. } => "no comment to close".to_string(),
            | ParseError::UnexpectedToken { found, expected, .. } => {
                format!("found `{found}`, expected {expected}")
            }
            | ParseError::UnexpectedEof { expected, .. } => format!("expected {expected}"),
            | ParseError::InvalidLiteral { literal, .. } => format!("cannot read {literal}"),
            | ParseError::PatternCount { expected, found, .. } => {
                format!("{found} patterns for {expected} scrutinees")
            }
        };
        Report::build(ReportKind::Error, file.to_string(), range.start)
            .with_message("Parse error")
            .with_label(Label::new((file.to_string(), range)).with_message(label))
            .finish()
    }
}
