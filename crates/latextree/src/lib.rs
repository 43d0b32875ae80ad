//! # Latextree: a LaTeX to document tree compiler.
//!
//! This crate tokenizes LaTeX source, parses the tokens into a typed document tree,
//!     and converts the tree back to the exact source it was parsed from.
//!
//! ```
//! let mut parser = latextree::Parser::new();
//! let tree = parser.parse(r"pre \textbf{Hello} post").unwrap();
//! assert_eq!(tree.chars(), r"pre \textbf{Hello} post");
//! ```
//!
//! The vocabulary of commands and environments is held in a [registry::Registry].
//! It is seeded with a built-in definition set, can be extended with JSON overlays,
//!     and grows while parsing as the document defines new macros, environments and theorems.
//! Names that are not registered are accepted and parsed as commands without arguments.

extern crate latextree_stdext;

pub mod error;
pub mod loader;
pub mod numeral;
pub mod options;
pub mod parser;
pub mod registry;
pub mod token;
pub mod tree;

pub use error::Error;
pub use error::Result;
pub use parser::{ParseOptions, Parser};
pub use tree::Tree;
