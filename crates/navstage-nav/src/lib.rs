//! Navigation-tree resolution and validation for navstage.
//!
//! Turns a declarative sidebar description into a validated, deduplicated,
//! render-ready navigation tree, or a structured report of every problem
//! found. Data flows one direction:
//!
//! ```text
//! SidebarSpec -> build -> NavTree -> validate (against SlugRegistry)
//!                                        |
//!                         resolve: Ok(Resolution) | Err(ResolveError)
//! ```
//!
//! No component mutates another's state after construction, so concurrent
//! resolutions against the same read-only registry are safe.
//!
//! # Example
//!
//! ```
//! use navstage_nav::{GroupSpec, ItemSpec, SidebarSpec, resolve};
//! use navstage_registry::MemoryRegistry;
//!
//! let registry = MemoryRegistry::new().with_slug("guides/routes");
//! let spec = SidebarSpec {
//!     groups: vec![GroupSpec::with_items(
//!         "Guides",
//!         vec![ItemSpec::leaf("Routes", "guides/routes")],
//!     )],
//! };
//!
//! let resolution = resolve(&spec, &registry).unwrap();
//! assert_eq!(resolution.tree.leaf_count(), 1);
//! ```

mod builder;
mod resolve;
mod spec;
mod tree;
mod validate;

pub use builder::{SpecError, build, derive_label};
pub use resolve::{Resolution, ResolveError, resolve};
pub use spec::{AutogenerateSpec, GroupSpec, ItemSpec, SidebarSpec};
pub use tree::{LeafRef, NavGroup, NavLeaf, NavNode, NavTree, is_external_url};
pub use validate::{ValidationReport, Violation, validate};
