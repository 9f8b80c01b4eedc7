//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` is the dotted config path used in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |name| std::env::var(name).ok())
}

/// Expand using a custom variable lookup.
///
/// Unset variables without a default are reported as [`ConfigError::EnvVar`].
pub(crate) fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains('$') {
        return Ok(value.to_owned());
    }

    let mut missing: Option<String> = None;
    let expanded = shellexpand::env_with_context_no_errors(value, |name| {
        let found = lookup(name);
        if found.is_none() && missing.is_none() {
            missing = Some(name.to_owned());
        }
        found
    });

    // A missing variable with a `:-default` is fine; one left verbatim is not.
    if let Some(name) = missing
        && (expanded.contains(&format!("${{{name}}}")) || expanded.contains(&format!("${name}")))
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        });
    }

    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "DATASET" => Some("staging".to_owned()),
            "EMPTY" => Some(String::new()),
            _ => None,
        }
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_with("production", "f", lookup).unwrap(), "production");
    }

    #[test]
    fn test_braced_variable() {
        assert_eq!(expand_with("${DATASET}", "f", lookup).unwrap(), "staging");
    }

    #[test]
    fn test_default_used_when_unset() {
        assert_eq!(
            expand_with("${NOPE:-production}", "f", lookup).unwrap(),
            "production"
        );
    }

    #[test]
    fn test_embedded_variable() {
        assert_eq!(
            expand_with("ds-${DATASET}-1", "f", lookup).unwrap(),
            "ds-staging-1"
        );
    }

    #[test]
    fn test_missing_variable_errors() {
        let err = expand_with("${NOPE}", "store.token", lookup).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("store.token"));
        assert!(msg.contains("NOPE"));
    }
}
