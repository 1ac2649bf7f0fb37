//! Environment variable expansion for config strings.
//!
//! Supports `${VAR}` (errors when unset) and `${VAR:-default}` via
//! shellexpand, with the default handling done in the lookup context.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Text outside references passes through unchanged. `field` names the
/// config key for error messages.
///
/// # Errors
///
/// Returns [`ConfigError::EnvVar`] for a `${VAR}` whose variable is
/// unset and has no default.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let context = |reference: &str| -> Result<Option<String>, String> {
        let (name, default) = match reference.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (reference, None),
        };

        match std::env::var(name) {
            Ok(v) => Ok(Some(v)),
            Err(std::env::VarError::NotPresent) => match default {
                Some(d) => Ok(Some(d.to_owned())),
                None => Err(format!("${{{name}}} not set")),
            },
            Err(e) => Err(e.to_string()),
        }
    };

    shellexpand::env_with_context(value, context)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: e.cause,
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_string_passes_through() {
        assert_eq!(expand_env("127.0.0.1", "server.host").unwrap(), "127.0.0.1");
    }

    #[test]
    fn test_expands_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VITRINE_EXPAND_HOST", "0.0.0.0");
        }

        let result = expand_env("${VITRINE_EXPAND_HOST}", "server.host").unwrap();
        assert_eq!(result, "0.0.0.0");

        unsafe {
            std::env::remove_var("VITRINE_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expands_within_surrounding_text() {
        unsafe {
            std::env::set_var("VITRINE_EXPAND_MID", "token");
        }

        let result = expand_env("pre-${VITRINE_EXPAND_MID}-post", "admin.token").unwrap();
        assert_eq!(result, "pre-token-post");

        unsafe {
            std::env::remove_var("VITRINE_EXPAND_MID");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        unsafe {
            std::env::remove_var("VITRINE_EXPAND_UNSET");
        }

        let result = expand_env("${VITRINE_EXPAND_UNSET:-fallback}", "admin.token").unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn test_set_variable_wins_over_default() {
        unsafe {
            std::env::set_var("VITRINE_EXPAND_SET", "real");
        }

        let result = expand_env("${VITRINE_EXPAND_SET:-fallback}", "admin.token").unwrap();
        assert_eq!(result, "real");

        unsafe {
            std::env::remove_var("VITRINE_EXPAND_SET");
        }
    }

    #[test]
    fn test_missing_variable_without_default_errors() {
        unsafe {
            std::env::remove_var("VITRINE_EXPAND_MISSING");
        }

        let err = expand_env("${VITRINE_EXPAND_MISSING}", "admin.token").unwrap_err();

        let ConfigError::EnvVar { field, message } = &err else {
            panic!("expected EnvVar error, got {err:?}");
        };
        assert_eq!(field, "admin.token");
        assert!(message.contains("VITRINE_EXPAND_MISSING"));
    }
}
