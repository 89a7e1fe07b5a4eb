use crate::*;
use std::fmt;

macro_rules! impl_name {
    ($name:ident) => {
        impl $name {
            pub fn plain(&self) -> &str {
                let $name(name) = self;
                name.as_str()
            }
        }
        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                $name(name.to_string())
            }
        }
        impl From<String> for $name {
            fn from(name: String) -> Self {
                $name(name)
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.plain())
            }
        }
    };
}

impl_name!(VarName);
impl_name!(FieldName);

impl Op {
    pub fn symbol(&self) -> &'static str {
        match self {
            | Op::Or => "||",
            | Op::And => "&&",
            | Op::Eq => "==",
            | Op::Ne => "!=",
            | Op::Lt => "<",
            | Op::Le => "<=",
            | Op::Gt => ">",
            | Op::Ge => ">=",
            | Op::Add => "+",
            | Op::Sub => "-",
            | Op::Mul => "*",
            | Op::Div => "/",
            | Op::Mod => "%",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Literal::Int(i) => write!(f, "{i}"),
            | Literal::Bool(b) => write!(f, "{b}"),
            | Literal::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ugly(&Formatter::new()))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ugly(&Formatter::new()))
    }
}

impl Node {
    /// Whether the node is a variable with the given name.
    pub fn is_var(&self, name: &str) -> bool {
        matches!(self, Node::Var(var) if var.plain() == name)
    }
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.0.iter()
    }
}

impl IntoIterator for Program {
    type Item = Term;
    type IntoIter = std::vec::IntoIter<Term>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Term> for Program {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Program(iter.into_iter().collect())
    }
}
