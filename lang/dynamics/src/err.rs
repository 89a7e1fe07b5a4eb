use crate::syntax::*;
use ariadne::{Label, Report, ReportKind};
use std::ops::Range;
use thiserror::Error;

/// Runtime errors; every one of them stops the program.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    #[error("No clause matches {value} at {span}")]
    NoMatch { value: String, span: Span },
    #[error("Division by zero at {span}")]
    DivisionByZero { span: Span },
    #[error("Integer overflow at {span}")]
    Overflow { span: Span },
    #[error("Calls and field accesses nested deeper than {max} at {span}")]
    DepthExceeded { max: usize, span: Span },
    #[error("Definition of {0} depends on itself")]
    CyclicDefinition(Sp<VarName>),
    #[error("Expected {expected} arguments but got {found} at {span}")]
    ArityMismatch { expected: usize, found: usize, span: Span },
    #[error("No field `{field}` at {span}")]
    MissingField { field: FieldName, span: Span },
    #[error("Expected {expected} but found {found} at {span}")]
    TypeMismatch { expected: &'static str, found: &'static str, span: Span },
    #[error("Unbound variable: {0}")]
    UnboundVar(Sp<VarName>),
    #[error("Cannot evaluate {0}")]
    Unsupported(Box<Term>),
}

pub type Result<T> = std::result::Result<T, EvalError>;

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            | EvalError::NoMatch { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::Overflow { span }
            | EvalError::DepthExceeded { span, .. }
            | EvalError::ArityMismatch { span, .. }
            | EvalError::MissingField { span, .. }
            | EvalError::TypeMismatch { span, .. } => *span,
            | EvalError::CyclicDefinition(var) | EvalError::UnboundVar(var) => var.info,
            | EvalError::Unsupported(term) => term.info,
        }
    }

    /// Create an Ariadne report for this runtime error.
    pub fn to_report(&self, file: &str) -> Report<'static, (String, Range<usize>)> {
        let range = self.span().range();
        let label = match self {
            | EvalError::NoMatch { value, .. } => format!("no clause matches {value}"),
            | EvalError::DivisionByZero { .. } => "the divisor is zero".to_string(),
            | EvalError::Overflow { .. } => "the result does not fit in 64 bits".to_string(),
            | EvalError::DepthExceeded { max, .. } => {
                format!("more than {max} nested calls or field accesses")
            }
            | EvalError::CyclicDefinition(var) => {
                format!("`{}` is needed to compute itself", var.inner)
            }
            | EvalError::ArityMismatch { expected, found, .. } => {
                format!("{found} arguments given to a function of {expected}")
            }
            | EvalError::MissingField { field, .. } => format!("no field `{field}`"),
            | EvalError::TypeMismatch { expected, found, .. } => {
                format!("expected {expected}, found {found}")
            }
            | EvalError::UnboundVar(var) => format!("`{}` is not defined", var.inner),
            | EvalError::Unsupported(term) => format!("`{}` has no value", term.inner),
        };
        Report::build(ReportKind::Error, file.to_string(), range.start)
            .with_message("Runtime error")
            .with_label(Label::new((file.to_string(), range)).with_message(label))
            .finish()
    }
}
