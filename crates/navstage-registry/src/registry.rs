//! Registry trait and error types.
//!
//! Provides the core [`SlugRegistry`] trait for abstracting the content
//! inventory behind two queries: slug existence and directory listing.
//!
//! # Slug Convention
//!
//! Slugs are URL-style content identifiers, not file paths:
//! - `""` - root landing page
//! - `"guides"` - directory landing page (maps to `guides/index.md`)
//! - `"guides/routes"` - nested page (maps to `guides/routes.md`)
//!
//! Registry implementations handle the mapping from slugs to their internal
//! storage format.

use std::path::PathBuf;

use serde::Serialize;

/// One known content identifier, plus its display title when the backend
/// can provide one cheaply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlugEntry {
    /// Content slug (e.g., "guides/routes").
    pub slug: String,
    /// Display title, if the backend knows one (e.g., from an H1 heading).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SlugEntry {
    /// Create an entry without a title.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: None,
        }
    }

    /// Create an entry with a title.
    #[must_use]
    pub fn with_title(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: Some(title.into()),
        }
    }
}

/// Read-only content inventory queried during navigation resolution.
///
/// Implementations must be side-effect free and deterministic: repeated
/// calls with the same arguments return identical results within one
/// resolution pass, and [`list`](Self::list) is always sorted
/// lexicographically by slug - never by filesystem iteration order, which
/// differs across platforms.
pub trait SlugRegistry: Send + Sync {
    /// Whether `slug` names known content.
    fn exists(&self, slug: &str) -> bool;

    /// All slugs under `directory`, sorted lexicographically.
    ///
    /// A slug belongs to `directory` when it equals the directory (its
    /// landing page) or starts with `directory` plus a `/` separator.
    /// The empty directory lists the whole inventory.
    fn list(&self, directory: &str) -> Vec<SlugEntry>;
}

/// Whether `slug` falls under `directory` per the [`SlugRegistry::list`]
/// contract.
///
/// Shared by registry implementations so they agree on directory semantics.
#[must_use]
pub fn slug_in_directory(slug: &str, directory: &str) -> bool {
    if directory.is_empty() {
        return true;
    }
    slug == directory
        || slug
            .strip_prefix(directory)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Error building a registry from its backing source.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Content root directory does not exist.
    #[error("Content directory not found: {}", .0.display())]
    ContentRootNotFound(PathBuf),
    /// I/O error reading the content root.
    #[error("I/O error scanning {}: {source}", .path.display())]
    Io {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_in_directory_landing_page() {
        assert!(slug_in_directory("guides", "guides"));
    }

    #[test]
    fn test_slug_in_directory_nested() {
        assert!(slug_in_directory("guides/routes", "guides"));
        assert!(slug_in_directory("guides/advanced/hooks", "guides"));
    }

    #[test]
    fn test_slug_in_directory_rejects_sibling_prefix() {
        // "guidelines" shares a string prefix with "guides" but is a sibling
        assert!(!slug_in_directory("guidelines", "guides"));
        assert!(!slug_in_directory("guidelines/intro", "guides"));
    }

    #[test]
    fn test_slug_in_directory_empty_directory_matches_all() {
        assert!(slug_in_directory("", ""));
        assert!(slug_in_directory("guides/routes", ""));
    }
}
