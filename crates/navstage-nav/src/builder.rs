//! Tree builder: declarative spec to navigation tree.
//!
//! The builder is purely structural: it interprets the raw descriptor shape
//! into the tagged node form and expands autogeneration directives, but
//! never checks slug existence for explicit leaves - that is the validator's
//! job. Structural problems are fatal ([`SpecError`]) since no meaningful
//! tree exists to validate further.

use navstage_registry::SlugRegistry;

use crate::spec::{AutogenerateSpec, GroupSpec, ItemSpec, SidebarSpec};
use crate::tree::{NavGroup, NavLeaf, NavNode, NavTree};

/// Structural error in the declarative sidebar spec.
///
/// All variants carry the offending entry's root-relative path, rendered as
/// `Guides > Advanced`; entries without a usable label appear as `[n]` with
/// their zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// A group supplies both `items` and `autogenerate`.
    #[error("Group '{path}' defines both items and autogenerate")]
    AmbiguousGroup {
        /// Root-relative path of the group.
        path: String,
    },
    /// An entry supplies a slug alongside group-only fields
    /// (`items`, `autogenerate`, `collapsed`, `optional`).
    #[error("Entry '{path}' mixes a slug with group-only fields")]
    AmbiguousEntry {
        /// Root-relative path of the entry.
        path: String,
    },
    /// An entry supplies neither a slug nor any group contents.
    #[error("Entry '{path}' defines neither a slug nor items nor autogenerate")]
    EmptyDefinition {
        /// Root-relative path of the entry.
        path: String,
    },
    /// An entry has no label, or a blank one.
    #[error("Entry '{path}' is missing a label")]
    MissingLabel {
        /// Root-relative path of the entry.
        path: String,
    },
}

/// Build a [`NavTree`] from a declarative spec.
///
/// Groups are walked in input order and order is preserved throughout.
/// Autogenerate directives expand through [`SlugRegistry::list`], which is
/// sorted lexicographically by slug, so expansion is deterministic across
/// platforms.
///
/// # Errors
///
/// Returns [`SpecError`] on the first structural violation; no partial tree
/// is produced.
pub fn build(spec: &SidebarSpec, registry: &dyn SlugRegistry) -> Result<NavTree, SpecError> {
    let mut groups = Vec::with_capacity(spec.groups.len());
    for (idx, group) in spec.groups.iter().enumerate() {
        groups.push(build_group(group, &[], idx, registry)?);
    }
    Ok(NavTree { groups })
}

/// Build one group descriptor, recursing into explicit children.
fn build_group(
    spec: &GroupSpec,
    parents: &[&str],
    idx: usize,
    registry: &dyn SlugRegistry,
) -> Result<NavGroup, SpecError> {
    let label = required_label(spec.label.as_deref(), parents, idx)?;
    let path = child_path(parents, &label);
    let path_refs: Vec<&str> = path.iter().map(String::as_str).collect();

    let items = match (&spec.items, &spec.autogenerate) {
        (Some(_), Some(_)) => {
            return Err(SpecError::AmbiguousGroup {
                path: path.join(" > "),
            });
        }
        (None, None) => {
            return Err(SpecError::EmptyDefinition {
                path: path.join(" > "),
            });
        }
        (Some(items), None) => build_items(items, &path_refs, registry)?,
        (None, Some(auto)) => expand_autogenerate(auto, registry),
    };

    Ok(NavGroup {
        label,
        items,
        collapsed: spec.collapsed,
        optional: spec.optional,
        autogenerated_from: spec.autogenerate.as_ref().map(|a| a.directory.clone()),
    })
}

/// Build the children of an explicit group, preserving order.
fn build_items(
    items: &[ItemSpec],
    parents: &[&str],
    registry: &dyn SlugRegistry,
) -> Result<Vec<NavNode>, SpecError> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| build_item(item, parents, idx, registry))
        .collect()
}

/// Interpret one entry descriptor as a leaf or a nested group.
fn build_item(
    item: &ItemSpec,
    parents: &[&str],
    idx: usize,
    registry: &dyn SlugRegistry,
) -> Result<NavNode, SpecError> {
    // collapsed and optional signal group intent too; a slug next to any of
    // these is rejected rather than silently dropping the flags
    let has_group_fields = item.items.is_some()
        || item.autogenerate.is_some()
        || item.collapsed
        || item.optional;

    match (&item.slug, has_group_fields) {
        (Some(_), true) => {
            let label = required_label(item.label.as_deref(), parents, idx)?;
            Err(SpecError::AmbiguousEntry {
                path: child_path(parents, &label).join(" > "),
            })
        }
        (Some(slug), false) => {
            let label = required_label(item.label.as_deref(), parents, idx)?;
            Ok(NavNode::Leaf(NavLeaf {
                label,
                slug: slug.clone(),
                badge: item.badge.clone(),
                attrs: item.attrs.clone(),
            }))
        }
        (None, true) => {
            let group = GroupSpec {
                label: item.label.clone(),
                items: item.items.clone(),
                autogenerate: item.autogenerate.clone(),
                collapsed: item.collapsed,
                optional: item.optional,
            };
            Ok(NavNode::Group(build_group(&group, parents, idx, registry)?))
        }
        (None, false) => {
            let segment = item
                .label
                .clone()
                .unwrap_or_else(|| position_segment(idx));
            Err(SpecError::EmptyDefinition {
                path: child_path(parents, &segment).join(" > "),
            })
        }
    }
}

/// Expand an autogenerate directive into leaves, one per registry entry.
///
/// Label precedence: explicit override from the directive, then the
/// registry-provided title, then a title-cased final path segment.
fn expand_autogenerate(auto: &AutogenerateSpec, registry: &dyn SlugRegistry) -> Vec<NavNode> {
    registry
        .list(&auto.directory)
        .into_iter()
        .map(|entry| {
            let label = auto
                .labels
                .get(&entry.slug)
                .cloned()
                .or(entry.title)
                .unwrap_or_else(|| derive_label(&entry.slug));
            NavNode::Leaf(NavLeaf::new(label, entry.slug))
        })
        .collect()
}

/// Default label transform: title-case of the slug's final path segment,
/// with `-` and `_` as word separators.
///
/// Examples: `guides/get-started` -> `Get Started`, `api_keys` -> `Api Keys`.
/// Falls back to `Overview` for slugs with an empty final segment (the root
/// landing page).
#[must_use]
pub fn derive_label(slug: &str) -> String {
    let segment = slug.rsplit('/').next().unwrap_or(slug);
    let label = segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    if label.is_empty() {
        "Overview".to_string()
    } else {
        label
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolve a required label, trimming and rejecting blanks.
fn required_label(label: Option<&str>, parents: &[&str], idx: usize) -> Result<String, SpecError> {
    match label.map(str::trim).filter(|l| !l.is_empty()) {
        Some(label) => Ok(label.to_string()),
        None => Err(SpecError::MissingLabel {
            path: child_path(parents, &position_segment(idx)).join(" > "),
        }),
    }
}

/// Path of a child entry: parent labels plus its own segment.
fn child_path(parents: &[&str], segment: &str) -> Vec<String> {
    let mut path: Vec<String> = parents.iter().map(ToString::to_string).collect();
    path.push(segment.to_string());
    path
}

/// Placeholder path segment for entries without a usable label.
fn position_segment(idx: usize) -> String {
    format!("[{idx}]")
}
