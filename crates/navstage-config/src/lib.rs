//! Configuration management for navstage.
//!
//! Parses `navstage.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! The loaded [`Config`] is constructed once at startup and passed
//! explicitly into resolution; nothing reads it from ambient global state.
//!
//! ## Environment Variable Expansion
//!
//! `site.url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use navstage_nav::SidebarSpec;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navstage.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub content_dir: Option<PathBuf>,
}

/// Site metadata passed through to the rendering pipeline.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Site title.
    pub title: String,
    /// Canonical site URL (env-expanded; optional for local-only builds).
    pub url: Option<String>,
    /// Base path the site is served under.
    pub base: String,
    /// Social links rendered in the site header.
    pub social: Vec<SocialLink>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: None,
            base: "/".to_string(),
            social: Vec::new(),
        }
    }
}

/// One social link in the site header.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Icon identifier (opaque to navstage).
    pub icon: String,
    /// Accessible label.
    pub label: String,
    /// Link target.
    pub href: String,
}

/// Content inventory configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Content source directory, relative to the config file.
    pub dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("docs"),
        }
    }
}

/// One enabled plugin: an opaque capability token plus its own options.
///
/// navstage never inspects the options; they are passed through to the
/// rendering pipeline untouched.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PluginSpec {
    /// Plugin identifier.
    pub name: String,
    /// Plugin-specific options, opaque to this crate.
    #[serde(default)]
    pub options: toml::Table,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Site metadata.
    pub site: SiteInfo,
    /// Content inventory settings.
    pub content: ContentConfig,
    /// Enabled plugins, in order.
    pub plugins: Vec<PluginSpec>,
    /// Declarative sidebar.
    pub sidebar: SidebarSpec,
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// No config file found walking up from the start directory.
    #[error("No {CONFIG_FILENAME} found in {} or any parent directory", .0.display())]
    NotDiscovered(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "site.url").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration, applying CLI overrides.
    ///
    /// With an explicit path the file must exist; otherwise the loader walks
    /// up from the current directory looking for `navstage.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] / [`ConfigError::NotDiscovered`]
    /// when no file can be located, and parse/validation errors otherwise.
    pub fn load(explicit_path: Option<&Path>, cli: &CliSettings) -> Result<Self, ConfigError> {
        let path = match explicit_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                path.to_path_buf()
            }
            None => {
                let start = std::env::current_dir()?;
                Self::discover(&start).ok_or(ConfigError::NotDiscovered(start))?
            }
        };

        let mut config = Self::load_from_file(&path)?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Find `navstage.toml` in `start` or the nearest parent directory.
    #[must_use]
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load and post-process a config file.
    ///
    /// Expands environment variables and resolves `content.dir` relative to
    /// the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns parse, expansion, or I/O errors.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;

        if let Some(url) = &config.site.url {
            config.site.url = Some(expand::expand_env(url, "site.url")?);
        }

        if config.content.dir.is_relative()
            && let Some(config_dir) = path.parent()
        {
            config.content.dir = config_dir.join(&config.content.dir);
        }

        Ok(config)
    }

    /// Apply CLI overrides on top of the loaded values.
    fn apply_cli(&mut self, cli: &CliSettings) {
        if let Some(dir) = &cli.content_dir {
            self.content.dir.clone_from(dir);
        }
    }

    /// Validate loaded values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when `site.title` is empty,
    /// `site.base` does not start with `/`, or `site.url` is not an
    /// http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title cannot be empty".into()));
        }
        if !self.site.base.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base must start with '/', got '{}'",
                self.site.base
            )));
        }
        if let Some(url) = &self.site.url {
            require_http_url(url, "site.url")?;
        }
        for plugin in &self.plugins {
            if plugin.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "plugin name cannot be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must be an http(s) URL, got '{url}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
        [site]
        title = "Acme Docs"
        url = "https://acme.github.io"
        base = "/acme-docs"

        [[site.social]]
        icon = "github"
        label = "GitHub"
        href = "https://github.com/acme/acme"

        [content]
        dir = "src/content/docs"

        [[plugins]]
        name = "catppuccin"
        options = { flavor = "mocha" }

        [[sidebar]]
        label = "Guides"
        items = [
            { label = "Get Started", slug = "guides/get-started" },
            { label = "Routes", slug = "guides/routes" },
        ]
    "#;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file_full_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), SAMPLE);

        let config = Config::load_from_file(&path).unwrap();

        assert_eq!(config.site.title, "Acme Docs");
        assert_eq!(config.site.base, "/acme-docs");
        assert_eq!(config.site.social.len(), 1);
        assert_eq!(config.plugins.len(), 1);
        assert_eq!(config.plugins[0].name, "catppuccin");
        assert_eq!(
            config.plugins[0].options.get("flavor").unwrap().as_str(),
            Some("mocha")
        );
        assert_eq!(config.sidebar.groups.len(), 1);
    }

    #[test]
    fn test_plugin_options_stay_opaque() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            temp.path(),
            r#"
            [site]
            title = "Docs"

            [[plugins]]
            name = "custom"
            options = { nested = { deeply = [1, 2, 3] } }
            "#,
        );

        let config = Config::load_from_file(&path).unwrap();

        // Options round-trip as raw TOML, uninterpreted
        assert!(config.plugins[0].options.get("nested").is_some());
    }

    #[test]
    fn test_content_dir_resolved_relative_to_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), SAMPLE);

        let config = Config::load_from_file(&path).unwrap();

        assert_eq!(config.content.dir, temp.path().join("src/content/docs"));
    }

    #[test]
    fn test_content_dir_defaults_to_docs() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), "[site]\ntitle = \"Docs\"\n");

        let config = Config::load_from_file(&path).unwrap();

        assert_eq!(config.content.dir, temp.path().join("docs"));
    }

    #[test]
    fn test_base_defaults_to_slash() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), "[site]\ntitle = \"Docs\"\n");

        let config = Config::load_from_file(&path).unwrap();

        assert_eq!(config.site.base, "/");
    }

    #[test]
    fn test_site_url_env_expansion() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVSTAGE_TEST_SITE", "https://docs.example.com");
        }
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            temp.path(),
            "[site]\ntitle = \"Docs\"\nurl = \"${NAVSTAGE_TEST_SITE}\"\n",
        );

        let config = Config::load_from_file(&path).unwrap();

        assert_eq!(config.site.url.as_deref(), Some("https://docs.example.com"));
        unsafe {
            std::env::remove_var("NAVSTAGE_TEST_SITE");
        }
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let temp = tempfile::tempdir().unwrap();

        let err = Config::load(
            Some(&temp.path().join("missing.toml")),
            &CliSettings::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_applies_cli_content_dir_override() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), SAMPLE);
        let cli = CliSettings {
            content_dir: Some(PathBuf::from("/elsewhere/docs")),
        };

        let config = Config::load(Some(&path), &cli).unwrap();

        assert_eq!(config.content.dir, PathBuf::from("/elsewhere/docs"));
    }

    #[test]
    fn test_discover_finds_config_in_parent() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), SAMPLE);
        let nested = temp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let found = Config::discover(&nested).unwrap();

        assert_eq!(found, path);
    }

    #[test]
    fn test_discover_none_when_absent() {
        let temp = tempfile::tempdir().unwrap();

        assert!(Config::discover(temp.path()).is_none());
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let config = Config {
            site: SiteInfo {
                title: "  ".to_string(),
                ..SiteInfo::default()
            },
            ..Config::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_base() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            temp.path(),
            "[site]\ntitle = \"Docs\"\nbase = \"no-slash\"\n",
        );
        let config = Config::load_from_file(&path).unwrap();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("site.base"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            temp.path(),
            "[site]\ntitle = \"Docs\"\nurl = \"ftp://example.com\"\n",
        );
        let config = Config::load_from_file(&path).unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), "[site]\ntitle = \"Docs\"\ntheme = \"dark\"\n");

        assert!(matches!(
            Config::load_from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_sidebar_deserializes_into_nav_spec() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), SAMPLE);

        let config = Config::load_from_file(&path).unwrap();

        let group = &config.sidebar.groups[0];
        assert_eq!(group.label.as_deref(), Some("Guides"));
        assert_eq!(group.items.as_ref().unwrap().len(), 2);
    }
}
