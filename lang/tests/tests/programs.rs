use coda_tests::run_program;

mod values {
    use super::*;
    run_program!(streams, "streams");
    run_program!(objects, "objects");
    run_program!(functions, "functions");
    run_program!(strings, "strings");
    run_program!(nested, "nested");
    run_program!(laziness, "laziness");
}

mod errors {
    use super::*;
    run_program!(cyclic, "cyclic");
    run_program!(duplicate_field, "duplicate-field");
    run_program!(terminal_and_continuing, "terminal-and-continuing");
    run_program!(call_on_field, "call-on-field");
    run_program!(unbound, "unbound");
}
