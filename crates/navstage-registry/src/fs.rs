//! Filesystem-backed registry.
//!
//! Scans a content directory for Markdown files and builds the slug
//! inventory from their paths. The scan runs once at construction; queries
//! afterwards are pure in-memory lookups, so listings are deterministic and
//! restartable regardless of platform directory iteration order.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::registry::{RegistryError, SlugEntry, SlugRegistry, slug_in_directory};

/// Number of leading lines searched for an H1 title.
const TITLE_SNIFF_LINES: usize = 64;

/// Slug registry backed by a content directory scan.
///
/// Discovery rules:
/// - `.md` and `.mdx` files become slugs with the extension stripped
/// - `index` files collapse to their directory (`guides/index.md` -> `guides`)
/// - hidden (`.`-prefixed) and underscore-prefixed entries are skipped
/// - unreadable subdirectories are logged at warn level and skipped
/// - when several files map to one slug, the `index` form wins, remaining
///   ties go to the lexicographically smaller source path, and every
///   shadowed file is logged at warn level
///
/// Titles come from the first `# ` heading near the top of each file, when
/// present.
///
/// # Example
///
/// ```ignore
/// use navstage_registry::{FsRegistry, SlugRegistry};
///
/// let registry = FsRegistry::scan("docs")?;
/// assert!(registry.exists("guides/routes"));
/// ```
#[derive(Debug)]
pub struct FsRegistry {
    /// All entries, sorted lexicographically by slug.
    entries: Vec<SlugEntry>,
    /// Slug -> index into `entries`.
    index: HashMap<String, usize>,
}

impl FsRegistry {
    /// Scan `content_dir` and build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ContentRootNotFound`] if the directory does
    /// not exist, or [`RegistryError::Io`] if the root itself cannot be read.
    /// Failures below the root are logged and skipped instead, so one bad
    /// subdirectory does not hide the rest of the inventory.
    pub fn scan(content_dir: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let content_dir = content_dir.into();
        if !content_dir.is_dir() {
            return Err(RegistryError::ContentRootNotFound(content_dir));
        }

        let mut scanned = Vec::new();
        scan_directory(&content_dir, "", true, &mut scanned)?;

        // Winner ordering is independent of directory iteration order:
        // `index` files beat plain files, remaining ties go to the
        // lexicographically smaller source path.
        scanned.sort_by(|a, b| {
            a.slug
                .cmp(&b.slug)
                .then_with(|| b.is_index.cmp(&a.is_index))
                .then_with(|| a.path.cmp(&b.path))
        });

        let mut entries: Vec<SlugEntry> = Vec::with_capacity(scanned.len());
        let mut winner: Option<(String, PathBuf)> = None;
        for file in scanned {
            match &winner {
                Some((slug, kept)) if *slug == file.slug => {
                    tracing::warn!(
                        slug = %file.slug,
                        kept = %kept.display(),
                        shadowed = %file.path.display(),
                        "Multiple files map to the same slug; shadowed file ignored"
                    );
                }
                _ => {
                    entries.push(SlugEntry {
                        slug: file.slug.clone(),
                        title: file.title,
                    });
                    winner = Some((file.slug, file.path));
                }
            }
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.slug.clone(), i))
            .collect();

        Ok(Self { entries, index })
    }

    /// All entries in the inventory, sorted by slug.
    #[must_use]
    pub fn entries(&self) -> &[SlugEntry] {
        &self.entries
    }
}

impl SlugRegistry for FsRegistry {
    fn exists(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    fn list(&self, directory: &str) -> Vec<SlugEntry> {
        // Entries are already sorted; filtering preserves the order.
        self.entries
            .iter()
            .filter(|e| slug_in_directory(&e.slug, directory))
            .cloned()
            .collect()
    }
}

/// A discovered Markdown file, before slug collisions are resolved.
struct ScannedFile {
    slug: String,
    title: Option<String>,
    /// Source path, kept for collision diagnostics and tie-breaking.
    path: PathBuf,
    /// Whether the file stem was `index`.
    is_index: bool,
}

/// Recursively collect scanned files under `dir`.
///
/// `is_root` distinguishes the content root, whose read failures are fatal,
/// from subdirectories, whose failures are logged and skipped.
fn scan_directory(
    dir: &Path,
    slug_prefix: &str,
    is_root: bool,
    files: &mut Vec<ScannedFile>,
) -> Result<(), RegistryError> {
    let dir_entries = match fs::read_dir(dir) {
        Ok(iter) => iter,
        Err(source) if is_root => {
            return Err(RegistryError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
        Err(source) => {
            tracing::warn!(path = %dir.display(), error = %source, "Skipping unreadable directory");
            return Ok(());
        }
    };

    for entry in dir_entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            let child_prefix = join_slug(slug_prefix, &name);
            scan_directory(&path, &child_prefix, false, files)?;
        } else if let Some(stem) = markdown_stem(&name) {
            let is_index = stem == "index";
            let slug = if is_index {
                slug_prefix.to_string()
            } else {
                join_slug(slug_prefix, stem)
            };
            files.push(ScannedFile {
                slug,
                title: sniff_title(&path),
                path,
                is_index,
            });
        }
    }

    Ok(())
}

/// File stem if `name` is a Markdown file, `None` otherwise.
fn markdown_stem(name: &str) -> Option<&str> {
    name.strip_suffix(".md").or_else(|| name.strip_suffix(".mdx"))
}

/// Join a slug prefix and a segment with `/`.
fn join_slug(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}/{segment}")
    }
}

/// Extract the first `# ` heading from the top of a file.
///
/// Only the first [`TITLE_SNIFF_LINES`] lines are inspected; this is a cheap
/// sniff, not a Markdown parse. Returns `None` on read failure or when no
/// heading appears.
fn sniff_title(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    content
        .lines()
        .take(TITLE_SNIFF_LINES)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}
