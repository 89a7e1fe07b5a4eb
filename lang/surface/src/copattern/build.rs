//! The decision-tree builder.
//!
//! A codata block is first read into rows, one per clause. Rows are grouped by
//! their next accessor into the fields of an object; rows that still have
//! accessors after that build a nested object, and rows that end there become
//! the arms of a `match` on the scrutinees (or the field's value directly when
//! there are no scrutinees).

use super::{
    err::{CoPatternError, Result},
    syntax::*,
};
use coda_syntax::*;
use indexmap::IndexMap;

/// The synthesized scrutinee bound to the `i`-th argument of the focus.
///
/// `%` is not part of any identifier the lexer accepts.
pub fn scrutinee(i: usize) -> VarName {
    VarName(format!("%x{i}"))
}

/// One codata clause while it is being compiled.
#[derive(Clone, Debug)]
pub struct Row<'a> {
    pub list: PatternList<'a>,
    pub exprs: &'a [Term],
    pub span: Span,
}

impl<'a> Row<'a> {
    pub fn new(clause: &'a Sp<Clause>) -> Result<Self> {
        let list = PatternList::new(clause)?;
        Ok(Row { list, exprs: &clause.inner.exprs, span: clause.info })
    }

    /// The `match` arm discriminating this row's arguments.
    fn case_clause(&self, exprs: Vec<Term>) -> Sp<Clause> {
        self.span.make(Clause { patterns: self.list.params.to_vec(), exprs })
    }
}

/// Compile one codata block; `span` is the span of the block and is given to
/// every node the builder creates.
pub fn flatten(codata: &Codata, span: Span) -> Result<Node> {
    let rows = codata.clauses.iter().map(Row::new).collect::<Result<Vec<_>>>()?;
    let arity = unify_arity(&rows)?;
    log::trace!("flattening {} clauses with {} at {}", rows.len(), arity, span);
    build(arity, &rows, span)
}

/// The arity of the first row, checked against every other row.
pub fn unify_arity(rows: &[Row<'_>]) -> Result<Arity> {
    let Some((first, rest)) = rows.split_first() else { return Ok(Arity::NoArgs) };
    let expected = first.list.arity();
    for row in rest {
        let found = row.list.arity();
        if found != expected {
            Err(CoPatternError::ArityError { expected, found, span: row.span })?
        }
    }
    Ok(expected)
}

pub fn build(arity: Arity, rows: &[Row<'_>], span: Span) -> Result<Node> {
    match arity {
        | Arity::NoArgs => Ok(build_object(None, rows, span)?.into()),
        | Arity::Args(n) => build_lambda(n, rows, span),
    }
}

fn build_lambda(arity: usize, rows: &[Row<'_>], span: Span) -> Result<Node> {
    let params = (0..arity).map(scrutinee).collect::<Vec<_>>();
    let subjects =
        params.iter().map(|param| span.make(Node::Var(param.clone()))).collect::<Vec<_>>();
    let body: Node = if rows.iter().any(|row| !row.list.is_terminal()) {
        build_object(Some(subjects.as_slice()), rows, span)?.into()
    } else {
        let clauses = rows.iter().map(|row| row.case_clause(row.exprs.to_vec())).collect();
        Case { scrutinees: subjects, clauses }.into()
    };
    Ok(Lambda { params, exprs: vec![span.make(body)] }.into())
}

/// Group `rows` by their first accessor into the fields of an object, sorted
/// by field name.
fn build_object(subjects: Option<&[Term]>, rows: &[Row<'_>], span: Span) -> Result<Object> {
    let mut buckets: IndexMap<FieldName, Vec<Row<'_>>> = IndexMap::new();
    for row in rows {
        let Some((field, list)) = row.list.pop() else {
            return Err(CoPatternError::UnsupportedPattern { field: None, span: row.span });
        };
        buckets.entry(field).or_default().push(Row { list, ..row.clone() });
    }
    buckets.sort_keys();
    let fields = buckets
        .into_iter()
        .map(|(name, bucket)| build_field(subjects, name, &bucket, span))
        .collect::<Result<_>>()?;
    Ok(Object { fields })
}

fn build_field(
    subjects: Option<&[Term]>, name: FieldName, bucket: &[Row<'_>], span: Span,
) -> Result<Field> {
    let (terminal, continuing): (Vec<_>, Vec<_>) =
        bucket.iter().cloned().partition(|row| row.list.is_terminal());
    if let (Some(row), false) = (terminal.first(), continuing.is_empty()) {
        Err(CoPatternError::UnsupportedPattern { field: Some(name.clone()), span: row.span })?
    }
    // rows that keep observing share one nested object
    if !continuing.is_empty() {
        let nested = build_object(subjects, &continuing, span)?;
        return Ok(Field { name, exprs: vec![span.make(nested.into())] });
    }
    let exprs = match subjects {
        | None => match terminal.as_slice() {
            | [row] => row.exprs.to_vec(),
            | [_, second, ..] => {
                Err(CoPatternError::DuplicateField { field: name.clone(), span: second.span })?
            }
            | [] => Vec::new(),
        },
        | Some(subjects) => {
            let clauses = terminal.iter().map(|row| row.case_clause(row.exprs.to_vec())).collect();
            vec![span.make(Case { scrutinees: subjects.to_vec(), clauses }.into())]
        }
    };
    Ok(Field { name, exprs })
}
