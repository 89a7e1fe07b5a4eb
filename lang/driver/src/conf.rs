use crate::err::ConfError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings read from `coda.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Conf {
    /// the deepest nesting of calls the evaluator allows
    pub max_depth: usize,
    /// stages whose output `coda check` prints
    pub dump: Vec<Stage>,
}

impl Default for Conf {
    fn default() -> Self {
        Conf { max_depth: 1024, dump: Vec::new() }
    }
}

impl Conf {
    pub const FILE: &'static str = "coda.toml";

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|err| ConfError::Read(path.to_path_buf(), err))?;
        Self::parse(&text).map_err(|err| ConfError::Parse(path.to_path_buf(), err))
    }

    /// Find the configuration: an explicit path must load, an implicit
    /// `coda.toml` in the working directory may fail, and defaults are used
    /// otherwise.
    pub fn lookup(explicit: Option<&Path>) -> Result<Self, ConfError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = PathBuf::from(Self::FILE);
        if !path.exists() {
            log::debug!("no `{}` found, using the default configuration", Self::FILE);
            return Ok(Self::default());
        }
        match Self::load(&path) {
            | Ok(conf) => Ok(conf),
            | Err(err) => {
                log::warn!("{err}; using the default configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn dumps(&self, stage: Stage) -> bool {
        self.dump.contains(&stage)
    }
}

/// The stages of the pipeline, in order; named in lowercase in `coda.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Parse,
    Flatten,
    Infix,
    Resolve,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            | Stage::Parse => "parse",
            | Stage::Flatten => "flatten",
            | Stage::Infix => "infix",
            | Stage::Resolve => "resolve",
        }
    }
}
