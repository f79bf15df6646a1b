//! `${VAR}` expansion for configuration strings.
//!
//! Only the braced form is recognised, so organization URLs and tokens that
//! happen to contain a bare `$` pass through untouched.

use crate::ConfigError;

/// Variable that could not be resolved during expansion.
struct UnsetVar(String);

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` is the dotted config key and is only used for error reporting.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| match std::env::var(name) {
        Ok(found) => Ok(Some(found)),
        Err(_) => Err(UnsetVar(name.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.cause.0),
    })
}

/// Expand an optional field in place.
pub(crate) fn expand_in_place(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_pat_from_env() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("AZDO_EXPAND_TEST_PAT", "s3cret");
        }
        let result = expand_env("${AZDO_EXPAND_TEST_PAT}", "azure_devops.pat").unwrap();
        assert_eq!(result, "s3cret");
        unsafe {
            std::env::remove_var("AZDO_EXPAND_TEST_PAT");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("AZDO_EXPAND_TEST_UNSET");
        }
        let result = expand_env("${AZDO_EXPAND_TEST_UNSET:-Docs}", "azure_devops.project").unwrap();
        assert_eq!(result, "Docs");
    }

    #[test]
    fn test_expand_inside_url() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("AZDO_EXPAND_TEST_ORG", "contoso");
        }
        let result =
            expand_env("https://dev.azure.com/${AZDO_EXPAND_TEST_ORG}", "azure_devops.org_url")
                .unwrap();
        assert_eq!(result, "https://dev.azure.com/contoso");
        unsafe {
            std::env::remove_var("AZDO_EXPAND_TEST_ORG");
        }
    }

    #[test]
    fn test_missing_var_names_field_and_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("AZDO_EXPAND_TEST_MISSING");
        }
        let err = expand_env("${AZDO_EXPAND_TEST_MISSING}", "azure_devops.pat").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("AZDO_EXPAND_TEST_MISSING"));
        assert!(message.contains("azure_devops.pat"));
    }

    #[test]
    fn test_bare_dollar_is_literal() {
        let result = expand_env("pat$with$dollars", "azure_devops.pat").unwrap();
        assert_eq!(result, "pat$with$dollars");
    }

    #[test]
    fn test_expand_in_place_skips_none() {
        let mut value = None;
        expand_in_place(&mut value, "azure_devops.project").unwrap();
        assert_eq!(value, None);
    }
}
