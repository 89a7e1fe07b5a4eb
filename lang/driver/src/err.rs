use ariadne::Report;
use coda_dynamics::EvalError;
use coda_surface::{
    copattern::CoPatternError, infix::InfixError, scoped::ResolveError, textual::ParseError,
};
use std::{ops::Range, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfError {
    #[error("Cannot read configuration `{path}`: {err}", path = .0.display(), err = .1)]
    Read(PathBuf, std::io::Error),
    #[error("Invalid configuration `{path}`: {err}", path = .0.display(), err = .1)]
    Parse(PathBuf, toml::de::Error),
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    ConfError(#[from] ConfError),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Copattern error: {0}")]
    CoPatternError(#[from] CoPatternError),
    #[error("Infix error: {0}")]
    InfixError(#[from] InfixError),
    #[error("Resolve error: {0}")]
    ResolveError(#[from] ResolveError),
    #[error("Runtime error: {0}")]
    EvalError(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, BuildError>;

impl BuildError {
    /// Render the error against the source it was raised on; errors without
    /// a location have no report.
    pub fn to_report(&self, file: &str) -> Option<Report<'static, (String, Range<usize>)>> {
        match self {
            | BuildError::IoError(_) | BuildError::ConfError(_) => None,
            | BuildError::ParseError(err) => Some(err.to_report(file)),
            | BuildError::CoPatternError(err) => Some(err.to_report(file)),
            | BuildError::InfixError(err) => Some(err.to_report(file)),
            | BuildError::ResolveError(err) => Some(err.to_report(file)),
            | BuildError::EvalError(err) => Some(err.to_report(file)),
        }
    }
}
