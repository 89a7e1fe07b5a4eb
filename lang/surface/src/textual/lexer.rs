use super::err::{ParseError, Result};
use coda_utils::span::Span;
use logos::{Logos, SpannedIter};
use std::fmt::Display;

#[derive(Logos, Clone, Debug, PartialEq)]
#[logos(skip r"--[^\n]*")]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(subpattern ident = r"[a-zA-Z0-9_']")]
pub enum Tok<'input> {
    #[regex(r"[a-zA-Z](?&ident)*")]
    #[regex(r"_(?&ident)+")]
    Ident(&'input str),

    #[token("def")]
    Define,
    #[token("fn")]
    Fn,
    #[token("let")]
    Let,
    #[token("in")]
    In,
    #[token("match")]
    Match,
    #[token("end")]
    End,
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[regex(r"[0-9]+")]
    IntLit(&'input str),
    #[regex(r#""([^"\\]|\\.)*""#)]
    StrLit(&'input str),

    #[token("#")]
    This,
    #[token("_")]
    Hole,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("=")]
    Equals,
    #[token("|")]
    Branch,
    #[token("->")]
    Arrow,

    #[token("||")]
    OrOr,
    #[token("&&")]
    AndAnd,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[token("/-")]
    CommentStart,
    #[token("-/")]
    CommentEnd,
}

impl Display for Tok<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            | Tok::Ident(s) => write!(f, "Ident({})", s),
            | Tok::Define => write!(f, "def"),
            | Tok::Fn => write!(f, "fn"),
            | Tok::Let => write!(f, "let"),
            | Tok::In => write!(f, "in"),
            | Tok::Match => write!(f, "match"),
            | Tok::End => write!(f, "end"),
            | Tok::True => write!(f, "true"),
            | Tok::False => write!(f, "false"),
            | Tok::IntLit(s) => write!(f, "IntLit({})", s),
            | Tok::StrLit(s) => write!(f, "StrLit({})", s),
            | Tok::This => write!(f, "#"),
            | Tok::Hole => write!(f, "_"),
            | Tok::ParenOpen => write!(f, "("),
            | Tok::ParenClose => write!(f, ")"),
            | Tok::BraceOpen => write!(f, "{{"),
            | Tok::BraceClose => write!(f, "}}"),
            | Tok::Comma => write!(f, ","),
            | Tok::Semicolon => write!(f, ";"),
            | Tok::Dot => write!(f, "."),
            | Tok::Equals => write!(f, "="),
            | Tok::Branch => write!(f, "|"),
            | Tok::Arrow => write!(f, "->"),
            | Tok::OrOr => write!(f, "||"),
            | Tok::AndAnd => write!(f, "&&"),
            | Tok::EqEq => write!(f, "=="),
            | Tok::NotEq => write!(f, "!="),
            | Tok::Lt => write!(f, "<"),
            | Tok::Le => write!(f, "<="),
            | Tok::Gt => write!(f, ">"),
            | Tok::Ge => write!(f, ">="),
            | Tok::Plus => write!(f, "+"),
            | Tok::Minus => write!(f, "-"),
            | Tok::Star => write!(f, "*"),
            | Tok::Slash => write!(f, "/"),
            | Tok::Percent => write!(f, "%"),
            | Tok::CommentStart => write!(f, "/-"),
            | Tok::CommentEnd => write!(f, "-/"),
        }
    }
}

/// Token stream with nested `/- ... -/` block comments removed.
pub struct Lexer<'source> {
    inner: SpannedIter<'source, Tok<'source>>,
    comment_depth: usize,
    /// where the outermost open block comment started
    comment_start: usize,
    done: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        let inner = Tok::lexer(source).spanned();
        Self { inner, comment_depth: 0, comment_start: 0, done: false }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<(usize, Tok<'source>, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.inner.next() {
                | Some((Ok(Tok::CommentStart), range)) => {
                    if self.comment_depth == 0 {
                        self.comment_start = range.start;
                    }
                    self.comment_depth += 1;
                }
                | Some((Ok(Tok::CommentEnd), range)) => {
                    if self.comment_depth == 0 {
                        self.done = true;
                        let span = Span::new(range.start, range.end);
                        break Some(Err(ParseError::UnmatchedCommentEnd { span }));
                    }
                    self.comment_depth -= 1;
                }
                | Some((_, _)) if self.comment_depth > 0 => continue,
                | Some((Ok(tok), range)) => break Some(Ok((range.start, tok, range.end))),
                | Some((Err(()), range)) => {
                    self.done = true;
                    let span = Span::new(range.start, range.end);
                    break Some(Err(ParseError::InvalidToken { span }));
                }
                | None if self.comment_depth > 0 => {
                    self.done = true;
                    let span = Span::new(self.comment_start, self.comment_start + 2);
                    break Some(Err(ParseError::UnterminatedComment { span }));
                }
                | None => break None,
            }
        }
    }
}
