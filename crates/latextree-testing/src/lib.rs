/*!
Latextree unit testing library

This is a crate for writing unit tests for code that uses latextree.
It is used by the latextree integration tests,
    so those tests are good examples of what this crate can do.

## Test types

### Round trip tests

Run using [`run_round_trip_test`].

These tests verify that a LaTeX snippet parses successfully and that
    converting the tree back to source gives exactly the input.
This is the most important property of the parser: every character of the input,
    whitespace and comments included, is recorded somewhere in the tree.

### Failure tests

Run using [`run_failure_test`].

These tests verify that a LaTeX snippet fails to parse.

### Marker tests

Run using [`run_marker_test`].

These tests verify the markers assigned to every node of a given species,
    in document order.
For example, the markers of the `subsection` nodes in
```tex
\section{A}\subsection{a}\section{B}\subsection{b}\subsection{c}
```
are `1.1`, `2.1` and `2.2`.

### Expansion tests

Run using [`run_expansion_test`].

These tests verify the expansion of the first node of a given species:
    the source text of the nodes the parser generated for it.
This is how macros defined with `\newcommand` and files read with `\input` are tested.

### Serde tests

Run using [`run_serde_test`].

These tests verify that a parsed tree can be serialized to JSON and deserialized
    to an identical tree.

## The test suite macro

All of the test types can be run using the run functions described above.
However the preferred way to write a suite of unit tests is to use the [`test_suite`] macro.
*/

use latextree::loader::InMemoryFileSystem;
use latextree::registry::Definitions;
use latextree::{ParseOptions, Parser, Tree};
use std::path::Path;

/// Directory that files added with [TestOption::File] live in.
pub const ROOT: &str = "/latextree-testing";

/// Option passed to a test runner.
pub enum TestOption<'a> {
    /// A JSON definitions overlay loaded before parsing.
    ///
    /// May be given more than once; overlays are loaded in order.
    Definitions(&'a str),

    /// A file available to `\input` and friends, given as a path relative to [ROOT] and its content.
    File(&'a str, &'a str),

    /// Whether a file that cannot be loaded fails the parse.
    ///
    /// Overrides previous `StrictResources` options.
    StrictResources(bool),

    /// Maximum nesting of included files.
    ///
    /// Overrides previous `MaxIncludeDepth` options.
    MaxIncludeDepth(usize),
}

/// Builds a parser configured with the options.
pub fn new_parser(options: &[TestOption]) -> Parser {
    let mut parse_options = ParseOptions::default().root(ROOT);
    let mut fs = InMemoryFileSystem::new(Path::new(ROOT));
    let mut overlays = vec![];
    for option in options {
        match option {
            TestOption::Definitions(json) => overlays.push(*json),
            TestOption::File(path, content) => fs.add_file(path, content),
            TestOption::StrictResources(strict) => {
                parse_options = parse_options.strict_resources(*strict)
            }
            TestOption::MaxIncludeDepth(max) => {
                parse_options = parse_options.max_include_depth(*max)
            }
        }
    }
    let mut parser = Parser::with_options(parse_options).with_loader(Box::new(fs));
    for json in overlays {
        let defs = Definitions::from_json(json)
            .map_err(|err| {
                println!("{err}");
                err
            })
            .unwrap();
        parser.load_definitions(&defs);
    }
    parser
}

/// Parses the input, printing the error and panicking if it fails.
pub fn parse(input: &str, options: &[TestOption]) -> (Parser, Tree) {
    let mut parser = new_parser(options);
    let tree = parser
        .parse(input)
        .map_err(|err| {
            println!("Parse failed: {err}");
            err
        })
        .unwrap();
    (parser, tree)
}

/// Run a round trip test.
///
/// The test passes if the input parses and the tree converts back to the input.
pub fn run_round_trip_test(input: &str, options: &[TestOption]) {
    let (_, tree) = parse(input, options);
    let output = tree.chars();
    if output != input {
        println!("Round trip output is different:");
        println!("------[input]------");
        println!("'{input}'");
        println!("------[output]-----");
        println!("'{output}'");
        println!("------[tree]-------");
        println!("{}", tree.pretty_print());
        println!("-------------------");
        panic!("Round trip test failed");
    }
}

/// Run a failure test.
///
/// The test passes if parsing the input fails.
pub fn run_failure_test(input: &str, options: &[TestOption]) {
    let mut parser = new_parser(options);
    match parser.parse(input) {
        Ok(tree) => {
            println!("Parse succeeded:");
            println!("{}", tree.pretty_print());
            panic!("Failure test did not pass: parse successful");
        }
        Err(err) => println!("{err}"),
    }
}

/// Run a marker test.
///
/// The test passes if the markers of the nodes of the species are the expected markers.
/// Nodes without a marker are given as the empty string.
pub fn run_marker_test(input: &str, species: &str, expected: &[&str], options: &[TestOption]) {
    let (_, tree) = parse(input, options);
    let markers: Vec<&str> = tree
        .find_all(species)
        .into_iter()
        .map(|id| tree.marker(id).unwrap_or(""))
        .collect();
    if markers != expected {
        println!("{}", tree.pretty_print());
    }
    assert_eq!(markers, expected);
}

/// Run an expansion test.
///
/// The test passes if the generated children of the first node of the species
///     have the expected source text.
pub fn run_expansion_test(input: &str, species: &str, expected: &str, options: &[TestOption]) {
    let (_, tree) = parse(input, options);
    let Some(id) = tree.find_all(species).first().copied() else {
        println!("{}", tree.pretty_print());
        panic!("no node of species `{species}`");
    };
    let expansion: String = tree[id]
        .children()
        .iter()
        .map(|child| tree.node_chars(*child))
        .collect();
    assert_eq!(expansion, expected);
}

/// Run a serialization/deserialization test
///
/// The test passes if the tree survives a JSON round trip unchanged.
pub fn run_serde_test(input: &str, options: &[TestOption]) {
    let (_, tree) = parse(input, options);
    let json = serde_json::to_string(&tree).unwrap();
    let restored: Tree = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, tree);
    assert_eq!(restored.chars(), input);
}

/// Macro to generate a suite of unit tests
///
/// The general use of this macros looks like this:
/// ```
/// # use latextree_testing::*;
/// test_suite![
///     options(TestOption::File("intro.tex", "Hello")),
///     round_trip_tests(
///         (case_1, r"\section{A} text"),
///         (case_2, r"\input{intro}"),
///     ),
///     failure_tests(
///         (case_3, r"\begin{itemize}"),
///     ),
///     marker_tests(
///         (case_4, r"\section{A}\section{B}", "section", ["1", "2"]),
///     ),
///     expansion_tests(
///         (case_5, r"\input{intro}", "input", "Hello"),
///     ),
/// ];
/// ```
///
/// The arguments to the macro are:
///
/// - `options(option_1, option_2, ..., option_n)`: options to pass to the test runner.
///     This is a list of values of type [TestOption].
///     The options can be omitted, in which case no options are passed.
///
/// - `round_trip_tests(cases...)`: each case is of the form (case name, input).
///     The data here is fed into the [run_round_trip_test] test runner.
///
/// - `failure_tests(cases...)`: each case is of the form (case name, input).
///     The data here is fed into the [run_failure_test] test runner.
///
/// - `marker_tests(cases...)`: each case is of the form (case name, input, species, [markers...]).
///     The data here is fed into the [run_marker_test] test runner.
///
/// - `expansion_tests(cases...)`: each case is of the form (case name, input, species, expansion).
///     The data here is fed into the [run_expansion_test] test runner.
///
/// - `serde_tests(cases...)`: each case is of the form (case name, input).
///     The data here is fed into the [run_serde_test] test runner.
///
/// Only one `options()` argument may be provided, and if provided it must be in the first position.
/// Zero or more of the other arguments may be provided, and in any order.
#[macro_export]
macro_rules! test_suite {
    ( options $options: tt, round_trip_tests ( $( ($name: ident, $input: expr $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[test]
            fn $name() {
                let input = $input;
                let options: Vec<latextree_testing::TestOption> = vec! $options;
                latextree_testing::run_round_trip_test(&input, &options);
            }
        )*
    );
    ( options $options: tt, failure_tests ( $( ($name: ident, $input: expr $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[test]
            fn $name() {
                let input = $input;
                let options: Vec<latextree_testing::TestOption> = vec! $options;
                latextree_testing::run_failure_test(&input, &options);
            }
        )*
    );
    ( options $options: tt, marker_tests ( $( ($name: ident, $input: expr, $species: expr, [ $( $marker: expr ),* $(,)? ] $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[test]
            fn $name() {
                let input = $input;
                let options: Vec<latextree_testing::TestOption> = vec! $options;
                latextree_testing::run_marker_test(&input, $species, &[ $( $marker ),* ], &options);
            }
        )*
    );
    ( options $options: tt, expansion_tests ( $( ($name: ident, $input: expr, $species: expr, $expansion: expr $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[test]
            fn $name() {
                let input = $input;
                let options: Vec<latextree_testing::TestOption> = vec! $options;
                latextree_testing::run_expansion_test(&input, $species, $expansion, &options);
            }
        )*
    );
    ( options $options: tt, serde_tests ( $( ($name: ident, $input: expr $(,)? ) ),* $(,)? ) $(,)? ) => (
        $(
            #[test]
            fn $name() {
                let input = $input;
                let options: Vec<latextree_testing::TestOption> = vec! $options;
                latextree_testing::run_serde_test(&input, &options);
            }
        )*
    );
    ( options $options: tt, $test_kind: ident $test_cases: tt $(,)? ) => (
        compile_error!("Invalid keyword: test_suite! only accepts the following keywords: `options`, `round_trip_tests`, `failure_tests`, `marker_tests`, `expansion_tests`, `serde_tests`");
    );
    ( options $options: tt, $( $test_kind: ident $test_cases: tt ),+ $(,)? ) => (
        $(
            latextree_testing::test_suite![options $options, $test_kind $test_cases,];
        )+
    );
    ( $( $test_kind: ident $test_cases: tt ),+ $(,)? ) => (
        latextree_testing::test_suite![options (), $( $test_kind $test_cases, )+ ];
    );
}
