//! In-memory registry implementation for testing.
//!
//! Provides [`MemoryRegistry`] for unit testing without filesystem access.

use std::collections::BTreeMap;

use crate::registry::{SlugEntry, SlugRegistry, slug_in_directory};

/// In-memory slug registry.
///
/// Stores slugs and optional titles in a sorted map, so listings come out
/// in lexicographic order without an extra sort. Use the builder methods
/// to configure the registry with test data.
///
/// # Example
///
/// ```
/// use navstage_registry::{MemoryRegistry, SlugRegistry};
///
/// let registry = MemoryRegistry::new()
///     .with_slug("guides/routes")
///     .with_entry("guides/views", "Views");
///
/// assert!(registry.exists("guides/routes"));
/// assert_eq!(registry.list("guides").len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entries: BTreeMap<String, Option<String>>,
}

impl MemoryRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slug without a title.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.entries.insert(slug.into(), None);
        self
    }

    /// Add a slug with a title.
    #[must_use]
    pub fn with_entry(mut self, slug: impl Into<String>, title: impl Into<String>) -> Self {
        self.entries.insert(slug.into(), Some(title.into()));
        self
    }
}

impl SlugRegistry for MemoryRegistry {
    fn exists(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    fn list(&self, directory: &str) -> Vec<SlugEntry> {
        self.entries
            .iter()
            .filter(|(slug, _)| slug_in_directory(slug, directory))
            .map(|(slug, title)| SlugEntry {
                slug: slug.clone(),
                title: title.clone(),
            })
            .collect()
    }
}
