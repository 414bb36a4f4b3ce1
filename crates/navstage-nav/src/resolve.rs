//! Resolution entry point.
//!
//! Orchestrates the builder and the validator: a declarative spec either
//! becomes a validated, render-ready tree or a structured error. This is
//! the sole surface the external site generator calls at configuration-load
//! time.
//!
//! Resolution is a pure, synchronous, single-pass computation: nothing is
//! mutated after construction, so concurrent `resolve` calls against the
//! same read-only registry are safe, and an unchanged spec and registry
//! always yield structurally identical output.

use navstage_registry::SlugRegistry;

use crate::builder::{SpecError, build};
use crate::spec::SidebarSpec;
use crate::tree::NavTree;
use crate::validate::{ValidationReport, Violation, validate};

/// A successfully resolved navigation tree.
///
/// Warnings (currently only label-consistency findings) ride along so
/// callers can surface them without failing the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The validated, render-ready tree.
    pub tree: NavTree,
    /// Non-fatal findings, in traversal order.
    pub warnings: Vec<Violation>,
}

/// Why resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The sidebar spec is structurally malformed; no tree was produced.
    #[error(transparent)]
    Malformed(#[from] SpecError),
    /// The tree was built but failed validation.
    #[error("navigation validation failed with {} violation(s)", .0.violations.len())]
    Invalid(ValidationReport),
}

/// Resolve a declarative sidebar spec into a validated navigation tree.
///
/// Builds the tree (propagating [`SpecError`] immediately - a malformed
/// spec cannot be partially resolved), then validates it against the
/// registry. A report with violations rejects the tree; a report with only
/// warnings resolves Ok and carries them in the [`Resolution`].
///
/// # Errors
///
/// [`ResolveError::Malformed`] on structural spec errors,
/// [`ResolveError::Invalid`] when validation finds violations. The full
/// report, warnings included, is available on the `Invalid` variant.
pub fn resolve(
    spec: &SidebarSpec,
    registry: &dyn SlugRegistry,
) -> Result<Resolution, ResolveError> {
    let tree = build(spec, registry)?;
    let report = validate(&tree, registry);
    if report.is_empty() {
        Ok(Resolution {
            tree,
            warnings: report.warnings,
        })
    } else {
        Err(ResolveError::Invalid(report))
    }
}

#[cfg(test)]
mod tests {
    use navstage_registry::MemoryRegistry;
    use pretty_assertions::assert_eq;

    use crate::spec::{GroupSpec, ItemSpec};
    use crate::tree::{NavLeaf, NavNode};

    use super::*;

    fn guides_registry() -> MemoryRegistry {
        MemoryRegistry::new()
            .with_slug("guides/get-started")
            .with_slug("guides/routes")
            .with_slug("guides/views")
            .with_slug("guides/sessions")
    }

    /// A fully hand-maintained sidebar, end to end.
    #[test]
    fn test_resolve_explicit_sidebar() {
        let spec = SidebarSpec {
            groups: vec![GroupSpec::with_items(
                "Guides",
                vec![
                    ItemSpec::leaf("Get Started", "guides/get-started"),
                    ItemSpec::leaf("Routes", "guides/routes"),
                    ItemSpec::leaf("Views", "guides/views"),
                    ItemSpec::leaf("Sessions", "guides/sessions"),
                ],
            )],
        };

        let resolution = resolve(&spec, &guides_registry()).unwrap();

        assert!(resolution.warnings.is_empty());
        let slugs: Vec<_> = resolution
            .tree
            .leaves()
            .iter()
            .map(|l| l.leaf.slug.clone())
            .collect();
        assert_eq!(
            slugs,
            vec![
                "guides/get-started",
                "guides/routes",
                "guides/views",
                "guides/sessions"
            ]
        );
    }

    #[test]
    fn test_resolve_duplicate_slug_rejected_with_both_paths() {
        let spec = SidebarSpec {
            groups: vec![GroupSpec::with_items(
                "Guides",
                vec![
                    ItemSpec::leaf("Routes", "guides/routes"),
                    ItemSpec::leaf("Routes", "guides/routes"),
                ],
            )],
        };

        let err = resolve(&spec, &guides_registry()).unwrap_err();

        let ResolveError::Invalid(report) = err else {
            panic!("expected Invalid, got {err:?}");
        };
        assert_eq!(
            report.violations,
            vec![Violation::DuplicateSlug {
                slug: "guides/routes".to_string(),
                path: vec!["Guides".to_string(), "Routes".to_string()],
                first_path: vec!["Guides".to_string(), "Routes".to_string()],
            }]
        );
    }

    #[test]
    fn test_resolve_autogenerated_group() {
        let registry = MemoryRegistry::new()
            .with_slug("guides/a")
            .with_slug("guides/b");
        let spec = SidebarSpec {
            groups: vec![GroupSpec::autogenerated("Guides", "guides")],
        };

        let resolution = resolve(&spec, &registry).unwrap();

        assert_eq!(
            resolution.tree.groups[0].items,
            vec![
                NavNode::Leaf(NavLeaf::new("A", "guides/a")),
                NavNode::Leaf(NavLeaf::new("B", "guides/b")),
            ]
        );
    }

    #[test]
    fn test_resolve_empty_autogenerated_group_rejected() {
        let spec = SidebarSpec {
            groups: vec![GroupSpec::autogenerated("Missing", "missing")],
        };

        let err = resolve(&spec, &guides_registry()).unwrap_err();

        let ResolveError::Invalid(report) = err else {
            panic!("expected Invalid, got {err:?}");
        };
        assert_eq!(
            report.violations,
            vec![Violation::EmptyAutogenerateGroup {
                directory: "missing".to_string(),
                path: vec!["Missing".to_string()],
            }]
        );
    }

    #[test]
    fn test_resolve_malformed_spec_is_fatal() {
        let mut group = GroupSpec::with_items("Guides", vec![]);
        group.autogenerate = Some(crate::spec::AutogenerateSpec::new("guides"));
        let spec = SidebarSpec {
            groups: vec![group],
        };

        let err = resolve(&spec, &guides_registry()).unwrap_err();

        assert!(matches!(
            err,
            ResolveError::Malformed(SpecError::AmbiguousGroup { .. })
        ));
    }

    #[test]
    fn test_resolve_warnings_do_not_fail() {
        // Label drift on a repeated external link warns without rejecting
        let spec = SidebarSpec {
            groups: vec![
                GroupSpec::with_items(
                    "Guides",
                    vec![ItemSpec::leaf("Web Sockets", "https://example.com/ws")],
                ),
                GroupSpec::with_items(
                    "Links",
                    vec![ItemSpec::leaf("Web sockets", "https://example.com/ws")],
                ),
            ],
        };

        let resolution = resolve(&spec, &guides_registry()).unwrap();

        assert_eq!(resolution.warnings.len(), 1);
        assert!(matches!(
            &resolution.warnings[0],
            Violation::InconsistentLabel { .. }
        ));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let registry = guides_registry();
        let spec = SidebarSpec {
            groups: vec![
                GroupSpec::with_items(
                    "Guides",
                    vec![ItemSpec::leaf("Routes", "guides/routes")],
                ),
                GroupSpec::autogenerated("All", "guides"),
            ],
        };

        let first = resolve(&spec, &registry);
        let second = resolve(&spec, &registry);

        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_rejection_is_idempotent() {
        let registry = guides_registry();
        let spec = SidebarSpec {
            groups: vec![GroupSpec::with_items(
                "Guides",
                vec![ItemSpec::leaf("Ghost", "guides/ghost")],
            )],
        };

        assert_eq!(
            resolve(&spec, &registry).unwrap_err(),
            resolve(&spec, &registry).unwrap_err()
        );
    }

    #[test]
    fn test_resolve_external_links_pass_without_registry_entries() {
        let spec = SidebarSpec {
            groups: vec![GroupSpec::with_items(
                "Community",
                vec![ItemSpec::leaf("GitHub", "https://github.com/example/repo")],
            )],
        };

        let resolution = resolve(&spec, &MemoryRegistry::new()).unwrap();

        assert_eq!(resolution.tree.leaf_count(), 1);
    }
}
