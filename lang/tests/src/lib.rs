pub mod utils {
    use coda_driver::{BuildError, Conf, eval_source, read_source};
    use pretty_assertions::assert_eq;
    use std::{fmt::Write, path::PathBuf};

    /// The stage an error comes from, as written in `.out` files.
    pub fn stage(err: &BuildError) -> &'static str {
        match err {
            | BuildError::IoError(_) => "io",
            | BuildError::ConfError(_) => "conf",
            | BuildError::ParseError(_) => "parse",
            | BuildError::CoPatternError(_) => "copattern",
            | BuildError::InfixError(_) => "infix",
            | BuildError::ResolveError(_) => "resolve",
            | BuildError::EvalError(_) => "runtime",
        }
    }

    /// One line per top-level value, or a single `error: <stage>` line.
    pub fn output(source: &str) -> String {
        let mut out = String::new();
        match eval_source(source, &Conf::default()) {
            | Ok(values) => {
                for value in values {
                    let _ = writeln!(out, "{value}");
                }
            }
            | Err(err) => {
                eprintln!("{err}");
                let _ = writeln!(out, "error: {}", stage(&err));
            }
        }
        out
    }

    pub fn check_program(src: impl Into<PathBuf>, out: impl Into<PathBuf>) {
        let (src, out) = (src.into(), out.into());
        let source = match read_source(&src) {
            | Ok(source) => source,
            | Err(err) => panic!("cannot read `{}`: {err}", src.display()),
        };
        let expected = match read_source(&out) {
            | Ok(expected) => expected,
            | Err(err) => panic!("cannot read `{}`: {err}", out.display()),
        };
        assert_eq!(output(&source).trim_end(), expected.trim_end());
    }
}

#[macro_export]
macro_rules! run_program {
    ($name:ident, $file:expr) => {
        #[test]
        fn $name() {
            let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("programs");
            ::coda_tests::utils::check_program(
                dir.join(format!("{}.coda", $file)),
                dir.join(format!("{}.out", $file)),
            );
        }
    };
}
