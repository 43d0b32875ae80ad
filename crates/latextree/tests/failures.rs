//! Structural errors abort the parse.

use latextree::error::{Error, ErrorKind};
use latextree_testing::*;

test_suite![failure_tests(
    (unclosed_group, r"\textbf{hello"),
    (unclosed_nested_group, r"pre {one {two} three post"),
    (unopened_group, r"pre } post"),
    (unclosed_inline_math, r"pre $x post"),
    (unclosed_display_math, r"pre $$x post"),
    (display_math_closed_by_inline, r"$$x$ y"),
    (unclosed_latex_inline_math, r"\(x"),
    (mismatched_latex_math, r"\[x\)"),
    (unclosed_environment, r"\begin{itemize}\item a"),
    (mismatched_environment, r"\begin{itemize}\item a\end{enumerate}"),
    (unclosed_tex_style_environment, r"\center x"),
    (starred_tex_style_end_without_star, r"\figure* x\endfigure"),
    (empty_environment_name, r"\begin{}x\end{}"),
    (environment_name_without_braces, r"\begin center"),
    (unclosed_optional_argument, r"\section[short{Title}"),
    (missing_argument, r"\textbf"),
    (argument_is_end_group, r"{\textbf}"),
    (superscript_without_argument, r"$x^$"),
    (unclosed_group_in_argument, r"\section{Title"),
    (unclosed_group_in_macro_definition, r"\newcommand{\x}{oops"),
    (recursive_macro, r"\newcommand{\loop}{\loop}\loop"),
    (mutually_recursive_macros, r"\newcommand{\ping}{\pong}\newcommand{\pong}{\ping}\ping"),
),];

mod strict_resources {
    use latextree_testing::*;

    test_suite![
        options(TestOption::StrictResources(true)),
        failure_tests(
            (missing_input, r"\input{missing}"),
            (missing_bibliography, r"\bibliography{refs}"),
        ),
    ];
}

fn error(input: &str) -> Error {
    new_parser(&[]).parse(input).unwrap_err()
}

#[test]
fn unbalanced_group_reports_the_open_brace() {
    let err = error(r"pre \textbf{hello");
    assert!(matches!(err, Error::UnbalancedGroup { .. }));
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert_eq!(err.token().unwrap().position(), 11);
}

#[test]
fn unexpected_end_group() {
    let err = error("a}");
    assert!(matches!(err, Error::UnexpectedEndGroup { .. }));
    assert_eq!(err.token().unwrap().position(), 1);
}

#[test]
fn mismatched_display_math() {
    assert!(matches!(error("$$x$ y"), Error::MismatchedDisplayMath { .. }));
    assert!(matches!(error("$x"), Error::UnterminatedMath { .. }));
}

#[test]
fn recursion_is_bounded() {
    let err = error(r"\newcommand{\loop}{\loop}\loop");
    assert!(matches!(
        err,
        Error::ExpansionDepthExceeded { max: latextree::parser::MAX_EXPANSION_DEPTH, .. }
    ));
}

#[test]
fn error_messages_name_the_problem() {
    let err = error(r"\begin{itemize}\item a");
    assert!(err.to_string().contains("itemize"));
    let err = error(r"\textbf");
    assert!(err.to_string().contains("textbf"));
}

#[test]
fn invalid_characters_do_not_fail() {
    let (_, tree) = parse("a\u{7f}b", &[]);
    assert_eq!(tree.chars(), "a\u{7f}b");
}
