//! Shared utilities: code generation, URL normalization, timestamp parsing.

pub mod code_generator;
pub mod datetime;
pub mod url_normalizer;
