#![allow(clippy::style)]

pub mod syntax;
pub use syntax::{Runtime, SemValue};
pub mod eval;
pub use eval::*;
pub mod err;
pub use err::*;
pub mod fmt;
