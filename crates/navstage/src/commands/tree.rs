//! `tree` command: print the resolved navigation tree.

use navstage_nav::{NavGroup, NavNode, NavTree, ResolveError, resolve};

use crate::error::CliError;
use crate::output::Output;

use super::ResolveArgs;

/// Arguments for the `tree` command.
#[derive(Debug, clap::Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub(crate) resolve: ResolveArgs,

    /// Emit the tree as JSON on stdout.
    #[arg(long)]
    pub(crate) json: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl TreeArgs {
    /// Resolve and print the tree.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (config, registry) = self.resolve.load()?;

        let resolution = match resolve(&config.sidebar, &registry) {
            Ok(resolution) => resolution,
            Err(ResolveError::Malformed(err)) => return Err(err.into()),
            Err(ResolveError::Invalid(report)) => {
                for violation in &report.violations {
                    output.error(&format!("error: {violation}"));
                }
                return Err(CliError::Validation(format!(
                    "navigation validation failed with {} violation(s)",
                    report.violations.len()
                )));
            }
        };

        for warning in &resolution.warnings {
            output.warning(&format!("warning: {warning}"));
        }

        if self.json {
            output.data(&serde_json::to_string_pretty(&resolution.tree)?);
        } else {
            output.data(&render_tree(&resolution.tree));
        }
        Ok(())
    }
}

/// Render a tree as indented text, one entry per line.
fn render_tree(tree: &NavTree) -> String {
    let mut out = String::new();
    for group in &tree.groups {
        render_group(group, 0, &mut out);
    }
    // Drop the trailing newline; the terminal writer adds its own
    out.truncate(out.trim_end().len());
    out
}

fn render_group(group: &NavGroup, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{}\n", group.label));
    for node in &group.items {
        match node {
            NavNode::Leaf(leaf) => {
                let indent = "  ".repeat(depth + 1);
                out.push_str(&format!("{indent}{} -> {}\n", leaf.label, leaf.slug));
            }
            NavNode::Group(child) => render_group(child, depth + 1, out),
        }
    }
}
