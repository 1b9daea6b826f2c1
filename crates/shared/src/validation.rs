//! Common validation utilities.

use validator::ValidationError;

/// Rejects strings that are empty or whitespace-only.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Character count of the trimmed value.
///
/// Limits in this service are expressed in characters, not bytes.
pub fn trimmed_char_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Trims an optional free-text field, mapping blank values to `None`.
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Checks that a trimmed value has between `min` and `max` characters.
pub fn validate_trimmed_length(
    value: &str,
    min: usize,
    max: usize,
    code: &'static str,
) -> Result<(), ValidationError> {
    let len = trimmed_char_len(value);
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        let mut err = ValidationError::new(code);
        err.message = Some(format!("Must be between {} and {} characters", min, max).into());
        Err(err)
    }
}
