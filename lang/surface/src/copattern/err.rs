use super::syntax::Arity;
use ariadne::{Label, Report, ReportKind};
use coda_syntax::*;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CoPatternError {
    #[error("A codata clause takes exactly one copattern, found {found} at {span}")]
    InvalidPattern { found: usize, span: Span },
    #[error("Only the focus `#` can be applied in a copattern: {0}")]
    InvalidCallPattern(Box<Term>),
    #[error("Copattern does not start from the focus `#`: {0}")]
    MissingFocus(Box<Term>),
    #[error("Expected {expected} but found {found} at {span}")]
    ArityError { expected: Arity, found: Arity, span: Span },
    #[error(
        "Unsupported copattern{} at {span}: a clause ends where its siblings keep observing",
        .field.as_ref().map(|field| format!(" under `{field}`")).unwrap_or_default()
    )]
    UnsupportedPattern { field: Option<FieldName>, span: Span },
    #[error("Field `{field}` is defined twice at {span}")]
    DuplicateField { field: FieldName, span: Span },
    #[error("The focus `#` is only allowed in copatterns: {0}")]
    StrayFocus(Box<Term>),
}

pub type Result<T> = std::result::Result<T, CoPatternError>;

impl CoPatternError {
    pub fn span(&self) -> Span {
        match self {
            | CoPatternError::InvalidPattern { span, .. }
            | CoPatternError::ArityError { span, .. }
            | CoPatternError::UnsupportedPattern { span, .. }
            | CoPatternError::DuplicateField { span, .. } => *span,
            | CoPatternError::InvalidCallPattern(term)
            | CoPatternError::MissingFocus(term)
            | CoPatternError::StrayFocus(term) => term.info,
        }
    }

    /// Create an Ariadne report for this copattern error.
    pub fn to_report(&self, file: &str) -> Report<'static, (String, Range<usize>)> {
        let range = self.span().range();
        let (message, label) = match self {
            | CoPatternError::InvalidPattern { found, .. } => {
                ("Invalid codata clause", format!("{found} copatterns in one clause"))
            }
            | CoPatternError::InvalidCallPattern(term) => {
                let label = format!("`{}` applies something other than `#`", term.inner);
                ("Invalid call in copattern", label)
            }
            | CoPatternError::MissingFocus(term) => {
                ("Missing focus", format!("`{}` is not observed from `#`", term.inner))
            }
            | CoPatternError::ArityError { expected, found, .. } => {
                ("Arity mismatch", format!("expected {expected}, found {found}"))
            }
            | CoPatternError::UnsupportedPattern { field, .. } => (
                "Unsupported copattern",
                match field {
                    | Some(field) => format!("this clause ends at `{field}` while others continue"),
                    | None => "this clause has no field to observe".to_string(),
                },
            ),
            | CoPatternError::DuplicateField { field, .. } => {
                ("Duplicate field", format!("`{field}` is already defined"))
            }
            | CoPatternError::StrayFocus(_) => {
                ("Stray focus", "`#` outside of a copattern".to_string())
            }
        };
        Report::build(ReportKind::Error, file.to_string(), range.start)
            .with_message(message)
            .with_label(Label::new((file.to_string(), range)).with_message(label))
            .finish()
    }
}
