use std::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::Range,
};

/// Line table of one source text, used to turn byte offsets into `line:column`.
#[derive(Clone, Debug)]
pub struct FileInfo {
    /// byte offset of the first character of every line
    line_starts: Vec<usize>,
    len: usize,
    name: String,
}
impl FileInfo {
    pub fn new(s: &str, name: impl Into<String>) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in s.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        FileInfo { line_starts, len: s.len(), name: name.into() }
    }
    /// Offsets past the end of the text are clamped to the end.
    pub fn trans_span2(&self, offset: Cursor1) -> Cursor2 {
        let offset = offset.min(self.len);
        // the first line start is 0, so the partition point is at least 1
        let line = self.line_starts.partition_point(|start| *start <= offset);
        Cursor2 { line, column: offset - self.line_starts[line - 1] + 1 }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A byte range in the source, optionally resolved to line and column.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    span1: (Cursor1, Cursor1),
    span2: Option<(Cursor2, Cursor2)>,
}

impl Span {
    pub fn new(l: usize, r: usize) -> Span {
        Span { span1: (l, r), span2: None }
    }
    pub fn dummy() -> Span {
        Span::new(0, 0)
    }
    pub fn is_dummy(&self) -> bool {
        self.span1 == (0, 0) && self.span2.is_none()
    }
    pub fn make<T>(&self, inner: T) -> Sp<T> {
        Sp { inner, info: *self }
    }
    /// The smallest span covering both `self` and `other`.
    pub fn join(&self, other: &Span) -> Span {
        let (l1, r1) = self.span1;
        let (l2, r2) = other.span1;
        let span2 = match (self.span2, other.span2) {
            | (Some((a, _)), Some((_, b))) if l1 <= l2 && r1 <= r2 => Some((a, b)),
            | _ => None,
        };
        Span { span1: (l1.min(l2), r1.max(r2)), span2 }
    }
    /// Attach line and column information from the file the span points into.
    pub fn under_file(self, info: &FileInfo) -> Self {
        let (l, r) = self.span1;
        Span { span1: self.span1, span2: Some((info.trans_span2(l), info.trans_span2(r))) }
    }
    pub fn get_cursor2(&self) -> Option<(Cursor2, Cursor2)> {
        self.span2
    }
    pub fn range(&self) -> Range<usize> {
        let (l, r) = self.span1;
        l..r
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::dummy()
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.span2 {
            | Some((l2, r2)) => write!(f, "{l2} - {r2}"),
            | None => {
                let (l, r) = self.span1;
                write!(f, "{l}-{r}")
            }
        }
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

pub type Cursor1 = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor2 {
    pub line: usize,
    pub column: usize,
}
impl Display for Cursor2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Cursor2 { line, column } = self;
        write!(f, "{line}:{column}",)
    }
}

/// A value together with the span it came from.
///
/// Equality and hashing only look at the inner value, so trees built without
/// location information compare equal to parsed ones.
#[derive(Default, Clone, Debug)]
pub struct Sp<T> {
    pub inner: T,
    pub info: Span,
}

impl<T> Sp<T> {
    /// Wrap a value that has no source location.
    pub fn internal(inner: T) -> Self {
        Span::dummy().make(inner)
    }
    pub fn try_map<F, U, E>(self, f: F) -> Result<Sp<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        Ok(self.info.make(f(self.inner)?))
    }
}

impl<T: PartialEq> PartialEq for Sp<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq(&other.inner)
    }
}

impl<T: Eq> Eq for Sp<T> {}

impl<T: Hash> Hash for Sp<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<T: Display> Display for Sp<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info =
            if self.info.is_dummy() { format!("<internal>") } else { format!("{}", self.info) };
        write!(f, "{} ({})", self.inner, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn offsets_to_lines_and_columns() {
        let info = FileInfo::new("ab\ncd\n\nef", "<test>");
        assert_eq!(info.trans_span2(0), Cursor2 { line: 1, column: 1 });
        assert_eq!(info.trans_span2(1), Cursor2 { line: 1, column: 2 });
        assert_eq!(info.trans_span2(3), Cursor2 { line: 2, column: 1 });
        assert_eq!(info.trans_span2(6), Cursor2 { line: 3, column: 1 });
        assert_eq!(info.trans_span2(8), Cursor2 { line: 4, column: 2 });
        // clamped
        assert_eq!(info.trans_span2(100), Cursor2 { line: 4, column: 3 });
    }

    #[test]
    fn spans_do_not_affect_equality() {
        let a = Span::new(3, 7).make(42);
        let b = Sp::internal(42);
        assert_eq!(a, b);
        assert_eq!(format!("{b}"), "42 (<internal>)");
    }

    #[test]
    fn resolved_span_display() {
        let info = FileInfo::new("let x\n  = y", "<test>");
        let span = Span::new(8, 11).under_file(&info);
        assert_eq!(format!("{span}"), "2:3 - 2:6");
        assert_eq!(format!("{}", Span::new(8, 11)), "8-11");
        assert_eq!(Span::new(2, 4).join(&Span::new(6, 9)).range(), 2..9);
    }
}
