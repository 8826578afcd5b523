//! Core business entities.

mod link;

pub use link::LinkRecord;
