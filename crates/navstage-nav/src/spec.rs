//! Declarative sidebar specification.
//!
//! These are the raw input types deserialized from configuration. They are
//! deliberately loose - labels optional, every entry carrying both leaf and
//! group fields - so that shape problems surface as structured
//! [`SpecError`](crate::SpecError)s from the builder rather than as opaque
//! deserialization failures. The builder is the single place that interprets
//! this raw shape into the tagged [`NavNode`](crate::NavNode) form.

use std::collections::BTreeMap;

use serde::Deserialize;

/// The whole declarative sidebar: an ordered sequence of group descriptors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SidebarSpec {
    /// Root group descriptors in display order.
    pub groups: Vec<GroupSpec>,
}

/// Descriptor for one root-level sidebar group.
///
/// A well-formed group supplies exactly one of `items` or `autogenerate`;
/// the builder rejects both-or-neither shapes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupSpec {
    /// Display label.
    pub label: Option<String>,
    /// Explicit child entries.
    pub items: Option<Vec<ItemSpec>>,
    /// Populate entries from a content directory instead of listing them.
    pub autogenerate: Option<AutogenerateSpec>,
    /// Render collapsed initially.
    pub collapsed: bool,
    /// Allow the group to be empty after expansion.
    pub optional: bool,
}

impl GroupSpec {
    /// Group with explicit children.
    #[must_use]
    pub fn with_items(label: impl Into<String>, items: Vec<ItemSpec>) -> Self {
        Self {
            label: Some(label.into()),
            items: Some(items),
            ..Self::default()
        }
    }

    /// Group populated from a content directory.
    #[must_use]
    pub fn autogenerated(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            autogenerate: Some(AutogenerateSpec::new(directory)),
            ..Self::default()
        }
    }
}

/// Descriptor for one entry inside a group: a leaf link or a nested group.
///
/// Which one it is depends on the fields supplied: `slug` makes a leaf;
/// `items`, `autogenerate`, `collapsed`, and `optional` are group-only.
/// Supplying fields from both camps, or from neither, is malformed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ItemSpec {
    /// Display label.
    pub label: Option<String>,
    /// Content slug or absolute external URL (leaf form).
    pub slug: Option<String>,
    /// Badge text (leaf form, passthrough).
    pub badge: Option<String>,
    /// Arbitrary rendering attributes (leaf form, passthrough).
    pub attrs: BTreeMap<String, String>,
    /// Explicit children (nested group form).
    pub items: Option<Vec<ItemSpec>>,
    /// Autogeneration directive (nested group form).
    pub autogenerate: Option<AutogenerateSpec>,
    /// Render collapsed initially (nested group form).
    pub collapsed: bool,
    /// Allow the nested group to be empty after expansion.
    pub optional: bool,
}

impl ItemSpec {
    /// Leaf entry with a label and slug.
    #[must_use]
    pub fn leaf(label: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    /// Nested group entry with explicit children.
    #[must_use]
    pub fn group(label: impl Into<String>, items: Vec<ItemSpec>) -> Self {
        Self {
            label: Some(label.into()),
            items: Some(items),
            ..Self::default()
        }
    }
}

/// Directive to populate a group from all content under a directory.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutogenerateSpec {
    /// Content directory to expand, in the registry's namespace.
    pub directory: String,
    /// Per-slug label overrides applied before the default derivation.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl AutogenerateSpec {
    /// Directive for `directory` with no label overrides.
    #[must_use]
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            labels: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_deserialize_explicit_group_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            sidebar: SidebarSpec,
        }

        let Wrapper { sidebar: spec } = toml::from_str(
            r#"
            [[sidebar]]
            label = "Guides"
            items = [
                { label = "Get Started", slug = "guides/get-started" },
                { label = "Routes", slug = "guides/routes" },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(spec.groups.len(), 1);
        let group = &spec.groups[0];
        assert_eq!(group.label.as_deref(), Some("Guides"));
        let items = group.items.as_ref().unwrap();
        assert_eq!(items[0], ItemSpec::leaf("Get Started", "guides/get-started"));
        assert_eq!(items[1], ItemSpec::leaf("Routes", "guides/routes"));
    }

    #[test]
    fn test_deserialize_autogenerate_group_from_toml() {
        let group: GroupSpec = toml::from_str(
            r#"
            label = "Reference"
            collapsed = true

            [autogenerate]
            directory = "reference"
            labels = { "reference/api" = "API" }
            "#,
        )
        .unwrap();

        let auto = group.autogenerate.as_ref().unwrap();
        assert_eq!(auto.directory, "reference");
        assert_eq!(auto.labels.get("reference/api").unwrap(), "API");
        assert!(group.collapsed);
    }

    #[test]
    fn test_deserialize_nested_group() {
        let item: ItemSpec = toml::from_str(
            r#"
            label = "Advanced"
            items = [{ label = "Hooks", slug = "guides/hooks" }]
            "#,
        )
        .unwrap();

        assert!(item.slug.is_none());
        assert_eq!(item.items.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_deserialize_leaf_passthrough_fields() {
        let item: ItemSpec = toml::from_str(
            r#"
            label = "Sessions"
            slug = "guides/sessions"
            badge = "New"
            attrs = { target = "_blank" }
            "#,
        )
        .unwrap();

        assert_eq!(item.badge.as_deref(), Some("New"));
        assert_eq!(item.attrs.get("target").unwrap(), "_blank");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<GroupSpec, _> = toml::from_str(
            r#"
            label = "Guides"
            colour = "red"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_label_is_not_a_parse_error() {
        // Shape problems are the builder's to report, not serde's
        let group: GroupSpec = toml::from_str(r#"items = []"#).unwrap();

        assert!(group.label.is_none());
    }
}
