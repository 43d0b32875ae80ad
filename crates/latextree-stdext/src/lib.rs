//! Rust data structures and algorithms used in the latextree project.
//!
//! Nothing in this crate knows about LaTeX.

pub mod algorithms;
pub mod collections;
