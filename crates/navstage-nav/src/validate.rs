//! Tree validation.
//!
//! Walks a built tree against the slug registry and collects every
//! violation in a single pass - the validator never fails fast, so one
//! invocation reports everything a maintainer has to fix. Traversal is
//! pre-order, depth-first, left-to-right (display order), which keeps
//! report ordering stable and reproducible.

use std::collections::HashMap;

use navstage_registry::SlugRegistry;
use serde::Serialize;

use crate::tree::{NavGroup, NavNode, NavTree};

/// One validation finding, carrying the offending entry's root-relative
/// label path for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind")]
pub enum Violation {
    /// The same slug appears more than once; reported per occurrence beyond
    /// the first.
    #[error("duplicate slug '{slug}' at {} (first used at {})", .path.join(" > "), .first_path.join(" > "))]
    DuplicateSlug {
        /// The duplicated slug.
        slug: String,
        /// Path of this occurrence.
        path: Vec<String>,
        /// Path of the first occurrence.
        first_path: Vec<String>,
    },
    /// A leaf's slug does not exist in the content inventory.
    #[error("slug '{slug}' at {} does not exist in the content inventory", .path.join(" > "))]
    MissingSlug {
        /// The unresolved slug.
        slug: String,
        /// Path of the leaf.
        path: Vec<String>,
    },
    /// An autogenerated group expanded to nothing and is not optional.
    #[error("autogenerated group at {} matched no content under '{directory}'", .path.join(" > "))]
    EmptyAutogenerateGroup {
        /// Directory the directive pointed at.
        directory: String,
        /// Path of the group.
        path: Vec<String>,
    },
    /// An explicit group has no entries and is not optional.
    #[error("group at {} has no entries", .path.join(" > "))]
    EmptyGroup {
        /// Path of the group.
        path: Vec<String>,
    },
    /// An autogenerated group contains nested groups, which autogeneration
    /// cannot produce - the tree was assembled inconsistently.
    #[error("group at {} mixes autogenerated expansion with nested groups", .path.join(" > "))]
    AmbiguousGroupDefinition {
        /// Path of the group.
        path: Vec<String>,
    },
    /// The same slug carries different labels in different places.
    /// Reported as a warning, not an error.
    #[error("slug '{slug}' is labeled '{label}' at {} but '{first_label}' at {}", .path.join(" > "), .first_path.join(" > "))]
    InconsistentLabel {
        /// The slug with drifting labels.
        slug: String,
        /// Label at this occurrence.
        label: String,
        /// Label at the first occurrence.
        first_label: String,
        /// Path of this occurrence.
        path: Vec<String>,
        /// Path of the first occurrence.
        first_path: Vec<String>,
    },
}

/// Ordered validation findings for one tree.
///
/// `violations` fail the build; `warnings` are surfaced but do not.
/// Both lists follow traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Findings that make the tree unfit to render.
    pub violations: Vec<Violation>,
    /// Findings worth surfacing that do not block rendering.
    pub warnings: Vec<Violation>,
}

impl ValidationReport {
    /// Whether the tree passed validation. Warnings do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for violation in &self.violations {
            writeln!(f, "error: {violation}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {warning}")?;
        }
        Ok(())
    }
}

/// First-occurrence record for a slug.
struct Seen {
    path: Vec<String>,
    label: String,
}

/// Validate a built tree against the registry.
///
/// Collects every violation found; never fails fast. For each leaf, in
/// order: duplicate-slug check, slug-existence check (waived for absolute
/// external URLs), label-consistency check. For each group: expansion
/// emptiness and autogeneration consistency.
#[must_use]
pub fn validate(tree: &NavTree, registry: &dyn SlugRegistry) -> ValidationReport {
    let mut walker = Walker {
        registry,
        seen: HashMap::new(),
        seen_external: HashMap::new(),
        report: ValidationReport::default(),
    };
    let mut path = Vec::new();
    for group in &tree.groups {
        walker.visit_group(group, &mut path);
    }
    walker.report
}

struct Walker<'a> {
    registry: &'a dyn SlugRegistry,
    /// Slug -> first occurrence, across the whole traversal.
    seen: HashMap<String, Seen>,
    /// External URL -> first occurrence, tracked only for label drift.
    seen_external: HashMap<String, Seen>,
    report: ValidationReport,
}

impl Walker<'_> {
    fn visit_group(&mut self, group: &NavGroup, path: &mut Vec<String>) {
        path.push(group.label.clone());

        if group.items.is_empty() && !group.optional {
            self.report.violations.push(match &group.autogenerated_from {
                Some(directory) => Violation::EmptyAutogenerateGroup {
                    directory: directory.clone(),
                    path: path.clone(),
                },
                None => Violation::EmptyGroup { path: path.clone() },
            });
        }

        if group.autogenerated_from.is_some()
            && group
                .items
                .iter()
                .any(|node| matches!(node, NavNode::Group(_)))
        {
            self.report
                .violations
                .push(Violation::AmbiguousGroupDefinition { path: path.clone() });
        }

        for node in &group.items {
            match node {
                NavNode::Leaf(leaf) => self.visit_leaf(leaf, path),
                NavNode::Group(child) => self.visit_group(child, path),
            }
        }

        path.pop();
    }

    fn visit_leaf(&mut self, leaf: &crate::tree::NavLeaf, path: &[String]) {
        let mut leaf_path = path.to_vec();
        leaf_path.push(leaf.label.clone());

        // External links are not slugs: duplication and existence checks are
        // waived, but label drift for a repeated target is still worth a
        // warning.
        if leaf.is_external() {
            if let Some(first) = self.seen_external.get(&leaf.slug) {
                if first.label != leaf.label {
                    self.report.warnings.push(Violation::InconsistentLabel {
                        slug: leaf.slug.clone(),
                        label: leaf.label.clone(),
                        first_label: first.label.clone(),
                        path: leaf_path,
                        first_path: first.path.clone(),
                    });
                }
            } else {
                self.seen_external.insert(
                    leaf.slug.clone(),
                    Seen {
                        path: leaf_path,
                        label: leaf.label.clone(),
                    },
                );
            }
            return;
        }

        if let Some(first) = self.seen.get(&leaf.slug) {
            self.report.violations.push(Violation::DuplicateSlug {
                slug: leaf.slug.clone(),
                path: leaf_path.clone(),
                first_path: first.path.clone(),
            });
            if first.label != leaf.label {
                self.report.warnings.push(Violation::InconsistentLabel {
                    slug: leaf.slug.clone(),
                    label: leaf.label.clone(),
                    first_label: first.label.clone(),
                    path: leaf_path.clone(),
                    first_path: first.path.clone(),
                });
            }
        } else {
            self.seen.insert(
                leaf.slug.clone(),
                Seen {
                    path: leaf_path.clone(),
                    label: leaf.label.clone(),
                },
            );
        }

        if !self.registry.exists(&leaf.slug) {
            self.report.violations.push(Violation::MissingSlug {
                slug: leaf.slug.clone(),
                path: leaf_path,
            });
        }
    }
}
