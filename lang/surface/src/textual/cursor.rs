//! Token stream cursor with one token of lookahead.

use super::{
    err::{ParseError, Result},
    lexer::Tok,
};
use coda_utils::span::{FileInfo, Span};

pub type SpannedTok<'src> = (usize, Tok<'src>, usize);

pub struct TokenCursor<'src> {
    tokens: Vec<SpannedTok<'src>>,
    pos: usize,
    /// end offset of the last consumed token
    last_end: usize,
    /// length of the source, where end-of-input errors point
    eof: usize,
    info: FileInfo,
}

impl<'src> TokenCursor<'src> {
    pub fn new(tokens: Vec<SpannedTok<'src>>, info: FileInfo, eof: usize) -> Self {
        Self { tokens, pos: 0, last_end: 0, eof, info }
    }

    /* ------------------------------- Lookahead ------------------------------- */

    pub fn peek(&self) -> Option<&Tok<'src>> {
        self.tokens.get(self.pos).map(|(_, tok, _)| tok)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Start offset of the current token, or the end of input.
    pub fn current_start(&self) -> usize {
        self.tokens.get(self.pos).map(|(l, _, _)| *l).unwrap_or(self.eof)
    }

    pub fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            | Some((l, _, r)) => self.span(*l, *r),
            | None => self.span(self.eof, self.eof),
        }
    }

    /* ------------------------------ Consumption ------------------------------ */

    pub fn advance(&mut self) -> Option<Tok<'src>> {
        let (_, tok, r) = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        self.last_end = r;
        Some(tok)
    }

    pub fn check(&self, tok: &Tok<'_>) -> bool {
        self.peek() == Some(tok)
    }

    /// Consume the token if it is the given one.
    pub fn eat(&mut self, tok: &Tok<'_>) -> bool {
        if self.check(tok) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn consume(&mut self, tok: Tok<'_>) -> Result<()> {
        if self.eat(&tok) { Ok(()) } else { Err(self.unexpected(&format!("`{tok}`"))) }
    }

    pub fn unexpected(&self, expected: &str) -> ParseError {
        let span = self.current_span();
        match self.peek() {
            | Some(tok) => ParseError::UnexpectedToken {
                found: tok.to_string(),
                expected: expected.to_string(),
                span,
            },
            | None => ParseError::UnexpectedEof { expected: expected.to_string(), span },
        }
    }

    /* --------------------------------- Spans --------------------------------- */

    pub fn span(&self, l: usize, r: usize) -> Span {
        Span::new(l, r).under_file(&self.info)
    }

    /// From `start` to the end of the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        self.span(start, self.last_end.max(start))
    }
}
