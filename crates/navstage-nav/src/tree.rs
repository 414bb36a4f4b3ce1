//! Resolved navigation tree model.
//!
//! Provides the typed tree of groups and leaf links that represents a
//! sidebar after resolution. The tree is the pure data representation,
//! separate from the declarative input ([`SidebarSpec`](crate::SidebarSpec))
//! it is built from.
//!
//! Order is display order and is preserved end-to-end: the declarative spec,
//! the built tree, and pre-order iteration all agree.

use std::collections::BTreeMap;

use serde::Serialize;

/// One sidebar entry: a labeled link to content or to an external URL.
///
/// Immutable once constructed. A slug that is an absolute `http(s)` URL is
/// an external link and is exempt from content existence checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLeaf {
    /// Display label.
    pub label: String,
    /// Content slug, or an absolute URL for external links.
    pub slug: String,
    /// Badge text rendered next to the label (passthrough).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Arbitrary rendering attributes (passthrough).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
}

impl NavLeaf {
    /// Create a leaf with just a label and slug.
    #[must_use]
    pub fn new(label: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            slug: slug.into(),
            badge: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Whether this leaf links outside the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        is_external_url(&self.slug)
    }
}

/// Whether `target` is an absolute external URL rather than a content slug.
#[must_use]
pub fn is_external_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// A labeled sidebar section containing leaves and nested groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    /// Display label.
    pub label: String,
    /// Child nodes in display order.
    pub items: Vec<NavNode>,
    /// Render the group collapsed initially (passthrough).
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub collapsed: bool,
    /// The group is allowed to be empty after expansion.
    #[serde(skip)]
    pub optional: bool,
    /// Directory this group was autogenerated from, for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autogenerated_from: Option<String>,
}

impl NavGroup {
    /// Create an explicit group with the given children.
    #[must_use]
    pub fn new(label: impl Into<String>, items: Vec<NavNode>) -> Self {
        Self {
            label: label.into(),
            items,
            collapsed: false,
            optional: false,
            autogenerated_from: None,
        }
    }
}

/// A navigation node: either a leaf link or a nested group.
///
/// The discriminant is explicit (serialized as a `type` tag) rather than
/// inferred from which fields happen to be present; only the builder
/// interprets the raw declarative shape into this form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    /// Leaf link.
    Leaf(NavLeaf),
    /// Nested group.
    Group(NavGroup),
}

/// Reference to a leaf with its root-relative label path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafRef<'a> {
    /// Labels from the root group down to and including the leaf.
    pub path: Vec<&'a str>,
    /// The leaf itself.
    pub leaf: &'a NavLeaf,
}

/// A validated, render-ready navigation tree.
///
/// The root is an ordered sequence of groups; order is display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavTree {
    /// Root groups in display order.
    pub groups: Vec<NavGroup>,
}

impl NavTree {
    /// All leaves in pre-order (depth-first, left-to-right), each with its
    /// root-relative label path.
    ///
    /// This is display order, so downstream diagnostics and renderers see
    /// entries in the same order the sidebar shows them.
    #[must_use]
    pub fn leaves(&self) -> Vec<LeafRef<'_>> {
        let mut out = Vec::new();
        for group in &self.groups {
            collect_leaves(group, &mut Vec::new(), &mut out);
        }
        out
    }

    /// Total number of leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }
}

fn collect_leaves<'a>(group: &'a NavGroup, path: &mut Vec<&'a str>, out: &mut Vec<LeafRef<'a>>) {
    path.push(&group.label);
    for node in &group.items {
        match node {
            NavNode::Leaf(leaf) => {
                let mut leaf_path = path.clone();
                leaf_path.push(&leaf.label);
                out.push(LeafRef {
                    path: leaf_path,
                    leaf,
                });
            }
            NavNode::Group(child) => collect_leaves(child, path, out),
        }
    }
    path.pop();
}
