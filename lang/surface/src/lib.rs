#[doc = include_str!("textual/README.md")]
pub mod textual {
    /// Logos-based lexer and token definitions.
    pub mod lexer;
    pub use lexer::*;
    /// Token cursor shared by the parsing functions.
    mod cursor;
    /// Recursive descent parser.
    pub mod parser;
    pub use parser::*;
    /// Parse error formatting.
    pub mod err;
    pub use err::*;

    #[cfg(test)]
    mod tests;
}

#[doc = include_str!("copattern/README.md")]
pub mod copattern {
    /// Pattern lists and arities extracted from copatterns.
    pub mod syntax;
    pub use syntax::*;
    /// The decision-tree builder turning clauses into objects, lambdas and cases.
    pub mod build;
    pub use build::*;
    /// The flattening pass over a whole program.
    pub mod pass;
    pub use pass::*;
    /// Copattern error definitions.
    pub mod err;
    pub use err::*;

    #[cfg(test)]
    mod tests;
}

/// Re-association of binary operator chains by precedence.
pub mod infix {
    pub mod resolver;
    pub use resolver::*;
    pub mod err;
    pub use err::*;

    #[cfg(test)]
    mod tests;
}

#[doc = include_str!("scoped/README.md")]
pub mod scoped {
    /// Name resolution pass.
    pub mod resolver;
    pub use resolver::*;
    /// Name resolution error definitions.
    pub mod err;
    pub use err::*;

    #[cfg(test)]
    mod tests;
}
