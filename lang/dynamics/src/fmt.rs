use crate::syntax::*;
use std::fmt;

impl<'a> Ugly<'a, Formatter> for SemValue {
    fn ugly(&self, f: &'a Formatter) -> String {
        match self {
            | SemValue::Literal(lit) => lit.to_string(),
            | SemValue::Tuple(values) => {
                let values = values.iter().map(|value| value.ugly(f)).collect::<Vec<_>>();
                format!("({})", values.join(", "))
            }
            | SemValue::Object(_) => "<object>".to_string(),
            | SemValue::Closure(_) => "<closure>".to_string(),
        }
    }
}

impl fmt::Display for SemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ugly(&Formatter::new()))
    }
}
