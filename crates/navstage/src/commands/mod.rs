//! CLI command implementations.

mod check;
mod tree;

use std::path::PathBuf;

use navstage_config::{CliSettings, Config};
use navstage_registry::FsRegistry;

pub(crate) use check::CheckArgs;
pub(crate) use tree::TreeArgs;

use crate::error::CliError;

/// Flags shared by commands that resolve the sidebar.
#[derive(Debug, clap::Args)]
pub(crate) struct ResolveArgs {
    /// Path to navstage.toml (default: search parent directories).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Content directory override.
    #[arg(long, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,
}

impl ResolveArgs {
    /// Load the config and scan the content directory it points at.
    pub(crate) fn load(&self) -> Result<(Config, FsRegistry), CliError> {
        let cli = CliSettings {
            content_dir: self.content_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), &cli)?;
        tracing::info!(dir = %config.content.dir.display(), "Scanning content directory");
        let registry = FsRegistry::scan(&config.content.dir)?;
        tracing::info!(slugs = registry.entries().len(), "Content inventory ready");
        Ok((config, registry))
    }
}
