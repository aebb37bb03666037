//! Core pipeline and domain logic for the glossary generator.
//!
//! This crate ties together parsing, hyperlink insertion, and HTML rendering
//! into the end-to-end `build` workflow.

pub mod io;
pub mod linker;
pub mod parser;
pub mod pipeline;
pub mod render;
