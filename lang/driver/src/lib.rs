//! The pass pipeline of the coda language.
//!
//! Source text goes through `parse → flatten → infix → resolve`; every stage
//! is a [`CompilerPass`](coda_utils::pass::CompilerPass) and the first error
//! stops the pipeline. A [`Session`] keeps definitions across inputs, which
//! is what the REPL is built on.

pub mod conf;
pub mod err;
pub mod session;


pub use conf::{Conf, Stage};
pub use err::*;
pub use session::*;
