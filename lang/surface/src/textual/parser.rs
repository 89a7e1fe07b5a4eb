//! Recursive descent parser producing the generic node tree.
//!
//! Binary operators are parsed into flat right-leaning chains; precedence and
//! associativity are fixed afterwards by [`crate::infix`]. Copatterns are not
//! checked here: a codata clause accepts any postfix expressions on the left of
//! `->`, and [`crate::copattern`] is the single place that validates them.

use super::{
    cursor::TokenCursor,
    err::{ParseError, Result},
    lexer::{Lexer, Tok},
};
use coda_syntax::*;
use coda_utils::span::FileInfo;

pub struct Parser<'src> {
    cursor: TokenCursor<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, name: &str) -> Result<Self> {
        let tokens = Lexer::new(source).collect::<Result<Vec<_>>>()?;
        let info = FileInfo::new(source, name);
        log::trace!("lexed {} tokens from {}", tokens.len(), info.name());
        Ok(Parser { cursor: TokenCursor::new(tokens, info, source.len()) })
    }

    /// Parse a whole source text.
    pub fn parse(source: &'src str, name: &str) -> Result<Program> {
        Parser::new(source, name)?.program()
    }

    pub fn program(mut self) -> Result<Program> {
        let mut items = Vec::new();
        while !self.cursor.is_at_end() {
            if self.cursor.check(&Tok::Define) {
                items.push(self.define()?);
            } else {
                items.extend(self.exprs()?);
            }
        }
        Ok(Program(items))
    }

    fn define(&mut self) -> Result<Term> {
        let start = self.cursor.current_start();
        self.cursor.consume(Tok::Define)?;
        let name = self.ident()?;
        self.cursor.consume(Tok::Equals)?;
        let exprs = self.exprs()?;
        Ok(self.cursor.span_from(start).make(Def { name, exprs }.into()))
    }

    /* ------------------------------ Expressions ------------------------------ */

    fn exprs(&mut self) -> Result<Vec<Term>> {
        let mut exprs = vec![self.expr()?];
        while self.cursor.eat(&Tok::Semicolon) {
            exprs.push(self.expr()?);
        }
        Ok(exprs)
    }

    fn expr(&mut self) -> Result<Term> {
        match self.cursor.peek() {
            | Some(Tok::Fn) => self.lambda(),
            | Some(Tok::Let) => self.let_in(),
            | Some(Tok::Match) => self.case(),
            | _ => self.binary(),
        }
    }

    fn lambda(&mut self) -> Result<Term> {
        let start = self.cursor.current_start();
        self.cursor.consume(Tok::Fn)?;
        self.cursor.consume(Tok::ParenOpen)?;
        let mut params = Vec::new();
        if !self.cursor.check(&Tok::ParenClose) {
            params.push(self.ident()?);
            while self.cursor.eat(&Tok::Comma) {
                params.push(self.ident()?);
            }
        }
        self.cursor.consume(Tok::ParenClose)?;
        self.cursor.consume(Tok::Arrow)?;
        let exprs = self.exprs()?;
        Ok(self.cursor.span_from(start).make(Lambda { params, exprs }.into()))
    }

    fn let_in(&mut self) -> Result<Term> {
        let start = self.cursor.current_start();
        self.cursor.consume(Tok::Let)?;
        let binder = Box::new(self.pattern()?);
        self.cursor.consume(Tok::Equals)?;
        let bindee = Box::new(self.expr()?);
        self.cursor.consume(Tok::In)?;
        let tail = self.exprs()?;
        Ok(self.cursor.span_from(start).make(Let { binder, bindee, tail }.into()))
    }

    fn case(&mut self) -> Result<Term> {
        let start = self.cursor.current_start();
        self.cursor.consume(Tok::Match)?;
        let mut scrutinees = vec![self.expr()?];
        while self.cursor.eat(&Tok::Comma) {
            scrutinees.push(self.expr()?);
        }
        let mut clauses = Vec::new();
        while self.cursor.check(&Tok::Branch) {
            let clause_start = self.cursor.current_start();
            self.cursor.consume(Tok::Branch)?;
            let mut patterns = vec![self.pattern()?];
            while self.cursor.eat(&Tok::Comma) {
                patterns.push(self.pattern()?);
            }
            let pattern_span = self.cursor.span_from(clause_start);
            if patterns.len() != scrutinees.len() {
                Err(ParseError::PatternCount {
                    expected: scrutinees.len(),
                    found: patterns.len(),
                    span: pattern_span,
                })?
            }
            self.cursor.consume(Tok::Arrow)?;
            let exprs = self.exprs()?;
            clauses.push(self.cursor.span_from(clause_start).make(Clause { patterns, exprs }));
        }
        if clauses.is_empty() {
            Err(self.cursor.unexpected("`|`"))?
        }
        self.cursor.consume(Tok::End)?;
        Ok(self.cursor.span_from(start).make(Case { scrutinees, clauses }.into()))
    }

    fn binary(&mut self) -> Result<Term> {
        let start = self.cursor.current_start();
        let lhs = self.postfix()?;
        let Some(op) = self.cursor.peek().and_then(operator) else { return Ok(lhs) };
        self.cursor.advance();
        let rhs = self.binary()?;
        let node = BinOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        Ok(self.cursor.span_from(start).make(node.into()))
    }

    fn postfix(&mut self) -> Result<Term> {
        let start = self.cursor.current_start();
        let mut term = self.atom()?;
        loop {
            if self.cursor.eat(&Tok::Dot) {
                let name = FieldName::from(self.ident()?.plain());
                let node = Access { receiver: Box::new(term), name };
                term = self.cursor.span_from(start).make(node.into());
            } else if self.cursor.eat(&Tok::ParenOpen) {
                let args = self.elems()?;
                let node = Call { func: Box::new(term), args };
                term = self.cursor.span_from(start).make(node.into());
            } else {
                break Ok(term);
            }
        }
    }

    fn atom(&mut self) -> Result<Term> {
        let start = self.cursor.current_start();
        let node: Node = match self.cursor.peek() {
            | Some(Tok::This) => {
                self.cursor.advance();
                This.into()
            }
            | Some(Tok::ParenOpen) => {
                self.cursor.advance();
                Paren(self.elems()?).into()
            }
            | Some(Tok::BraceOpen) => {
                self.cursor.advance();
                self.codata()?.into()
            }
            | _ => return self.literal_or_var("an expression"),
        };
        Ok(self.cursor.span_from(start).make(node))
    }

    /// Comma separated expressions up to and including `)`.
    fn elems(&mut self) -> Result<Vec<Term>> {
        let mut elems = Vec::new();
        if !self.cursor.eat(&Tok::ParenClose) {
            elems.push(self.expr()?);
            while self.cursor.eat(&Tok::Comma) {
                elems.push(self.expr()?);
            }
            self.cursor.consume(Tok::ParenClose)?;
        }
        Ok(elems)
    }

    /// The clauses of `{ ... }` after the opening brace.
    fn codata(&mut self) -> Result<Codata> {
        let mut clauses = vec![self.codata_clause()?];
        while self.cursor.eat(&Tok::Comma) {
            if self.cursor.check(&Tok::BraceClose) {
                break;
            }
            clauses.push(self.codata_clause()?);
        }
        self.cursor.consume(Tok::BraceClose)?;
        Ok(Codata { clauses })
    }

    fn codata_clause(&mut self) -> Result<Sp<Clause>> {
        let start = self.cursor.current_start();
        let mut patterns = vec![self.postfix()?];
        while self.cursor.eat(&Tok::Comma) {
            patterns.push(self.postfix()?);
        }
        self.cursor.consume(Tok::Arrow)?;
        let exprs = self.exprs()?;
        Ok(self.cursor.span_from(start).make(Clause { patterns, exprs }))
    }

    /* -------------------------------- Patterns ------------------------------- */

    fn pattern(&mut self) -> Result<Term> {
        let start = self.cursor.current_start();
        if self.cursor.eat(&Tok::ParenOpen) {
            let mut elems = Vec::new();
            if !self.cursor.eat(&Tok::ParenClose) {
                elems.push(self.pattern()?);
                while self.cursor.eat(&Tok::Comma) {
                    elems.push(self.pattern()?);
                }
                self.cursor.consume(Tok::ParenClose)?;
            }
            return Ok(self.cursor.span_from(start).make(Paren(elems).into()));
        }
        self.literal_or_var("a pattern")
    }

    /* --------------------------------- Leaves -------------------------------- */

    fn literal_or_var(&mut self, expected: &str) -> Result<Term> {
        let start = self.cursor.current_start();
        let node: Node = match self.cursor.peek() {
            | Some(Tok::Ident(name)) => VarName::from(*name).into(),
            | Some(Tok::Hole) => Hole.into(),
            | Some(Tok::True) => Literal::Bool(true).into(),
            | Some(Tok::False) => Literal::Bool(false).into(),
            | Some(Tok::IntLit(digits)) => match digits.parse::<i64>() {
                | Ok(i) => Literal::Int(i).into(),
                | Err(_) => Err(ParseError::InvalidLiteral {
                    literal: digits.to_string(),
                    span: self.cursor.current_span(),
                })?,
            },
            | Some(Tok::StrLit(quoted)) => {
                let span = self.cursor.current_span();
                Literal::String(unescape(quoted).ok_or_else(|| ParseError::InvalidLiteral {
                    literal: quoted.to_string(),
                    span,
                })?)
                .into()
            }
            | _ => Err(self.cursor.unexpected(expected))?,
        };
        self.cursor.advance();
        Ok(self.cursor.span_from(start).make(node))
    }

    fn ident(&mut self) -> Result<VarName> {
        match self.cursor.peek() {
            | Some(Tok::Ident(name)) => {
                let name = VarName::from(*name);
                self.cursor.advance();
                Ok(name)
            }
            | _ => Err(self.cursor.unexpected("an identifier")),
        }
    }
}

fn operator(tok: &Tok<'_>) -> Option<Op> {
    let op = match tok {
        | Tok::OrOr => Op::Or,
        | Tok::AndAnd => Op::And,
        | Tok::EqEq => Op::Eq,
        | Tok::NotEq => Op::Ne,
        | Tok::Lt => Op::Lt,
        | Tok::Le => Op::Le,
        | Tok::Gt => Op::Gt,
        | Tok::Ge => Op::Ge,
        | Tok::Plus => Op::Add,
        | Tok::Minus => Op::Sub,
        | Tok::Star => Op::Mul,
        | Tok::Slash => Op::Div,
        | Tok::Percent => Op::Mod,
        | _ => None?,
    };
    Some(op)
}

/// Strip the quotes of a string literal and expand its escapes.
fn unescape(quoted: &str) -> Option<String> {
    let body = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            | 'n' => out.push('\n'),
            | 't' => out.push('\t'),
            | 'r' => out.push('\r'),
            | '"' => out.push('"'),
            | '\\' => out.push('\\'),
            | _ => None?,
        }
    }
    Some(out)
}
