//! `check` command: resolve the sidebar and report every violation.

use navstage_nav::{ResolveError, resolve};
use serde_json::json;

use crate::error::CliError;
use crate::output::Output;

use super::ResolveArgs;

/// Arguments for the `check` command.
#[derive(Debug, clap::Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) resolve: ResolveArgs,

    /// Emit the report as JSON on stdout.
    #[arg(long)]
    pub(crate) json: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckArgs {
    /// Execute the check.
    ///
    /// Prints every violation with its path from the tree root, not just
    /// the first; a non-empty report is a build failure (non-zero exit).
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (config, registry) = self.resolve.load()?;

        match resolve(&config.sidebar, &registry) {
            Ok(resolution) => {
                if self.json {
                    let payload = json!({
                        "ok": true,
                        "leaves": resolution.tree.leaf_count(),
                        "warnings": resolution.warnings,
                    });
                    output.data(&serde_json::to_string_pretty(&payload)?);
                } else {
                    for warning in &resolution.warnings {
                        output.warning(&format!("warning: {warning}"));
                    }
                    output.success(&format!(
                        "Navigation OK: {} entries, {} warning(s)",
                        resolution.tree.leaf_count(),
                        resolution.warnings.len()
                    ));
                }
                Ok(())
            }
            Err(ResolveError::Malformed(err)) => Err(err.into()),
            Err(ResolveError::Invalid(report)) => {
                if self.json {
                    let payload = json!({
                        "ok": false,
                        "violations": report.violations,
                        "warnings": report.warnings,
                    });
                    output.data(&serde_json::to_string_pretty(&payload)?);
                } else {
                    for violation in &report.violations {
                        output.error(&format!("error: {violation}"));
                    }
                    for warning in &report.warnings {
                        output.warning(&format!("warning: {warning}"));
                    }
                }
                Err(CliError::Validation(format!(
                    "navigation validation failed with {} violation(s)",
                    report.violations.len()
                )))
            }
        }
    }
}
