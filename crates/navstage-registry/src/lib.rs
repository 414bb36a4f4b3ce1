//! Content slug inventory for navstage.
//!
//! Provides the [`SlugRegistry`] trait for abstracting the content inventory
//! behind existence and listing queries, along with [`FsRegistry`] which
//! builds the inventory from a directory of Markdown files.
//!
//! The `memory` feature enables [`MemoryRegistry`] for unit testing and
//! programmatic callers without filesystem access.

mod fs;
#[cfg(feature = "memory")]
mod memory;
mod registry;

pub use fs::FsRegistry;
#[cfg(feature = "memory")]
pub use memory::MemoryRegistry;
pub use registry::{RegistryError, SlugEntry, SlugRegistry};
