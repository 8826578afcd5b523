//! Infrastructure layer: cache and store implementations.

pub mod cache;
pub mod persistence;
