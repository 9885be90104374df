use once_cell::sync::Lazy;
use regex::Regex;
use stack_defs::ComponentError;

static NAME_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").unwrap());

/// Checks that `value` can be embedded in resource names and registry ids:
/// lowercase alphanumerics and inner hyphens only.
pub fn validate_name_segment(field: &str, value: &str) -> Result<(), ComponentError> {
    if NAME_SEGMENT.is_match(value) {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!(
                "'{}' must be lowercase letters, digits and inner hyphens",
                value
            ),
        ))
    }
}

pub fn validate_not_empty(field: &str, value: &str) -> Result<(), ComponentError> {
    if value.trim().is_empty() {
        Err(invalid(field, "must not be empty".to_string()))
    } else {
        Ok(())
    }
}

pub fn validate_positive(field: &str, value: u64) -> Result<(), ComponentError> {
    if value == 0 {
        Err(invalid(field, "must be greater than zero".to_string()))
    } else {
        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> ComponentError {
    ComponentError::InvalidArgument {
        field: field.to_string(),
        reason,
    }
}
