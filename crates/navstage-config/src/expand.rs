//! `${VAR}` expansion for config values.
//!
//! Only the braced form is recognized. `${VAR:-default}` supplies a fallback
//! for unset variables; bare `$VAR` passes through untouched so literal
//! dollar signs in values survive.

use crate::ConfigError;

/// Expand `${VAR}` references in a config value.
///
/// `field` names the config key being expanded and is carried into the
/// error so a failure reads as `site.url: ${DOCS_HOST} not set`. Values
/// without `${` come back unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_string());
    }

    let expanded = shellexpand::env_with_context(value, |var| -> Result<Option<String>, MissingVar> {
        std::env::var(var).map(Some).map_err(|_| MissingVar {
            name: var.to_string(),
        })
    })
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_string(),
        message: format!("${{{0}}} not set", err.cause.name),
    })?;
    Ok(expanded.into_owned())
}

/// Unset variable, carried through `shellexpand` back to the caller.
struct MissingVar {
    name: String,
}
