//! Primary store implementations.

mod memory;

pub use memory::MemoryLinkStore;
