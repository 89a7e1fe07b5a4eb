#![allow(clippy::style)]
#![allow(clippy::useless_format)]

pub mod pass;
pub mod span;

pub mod prelude {
    /// Source code location.
    pub use crate::span::{Cursor1, Cursor2, FileInfo, Sp, Span};
    /// Compiler passes.
    pub use crate::pass::CompilerPass;
}
