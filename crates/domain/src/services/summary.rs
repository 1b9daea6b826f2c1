//! Summary status rules.

use crate::errors::{DomainError, DomainResult};
use crate::models::status::{StatusMode, MAX_STATUS_TEXT_LENGTH};
use shared::validation::trimmed_char_len;

/// A summary status ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSummary {
    pub mode: StatusMode,
    pub text: Option<String>,
}

/// Validates and normalizes a summary update.
///
/// SPECIFIC needs 1-64 characters of text after trimming. Other modes never
/// carry text, so anything supplied with them is discarded.
pub fn resolve_summary(mode: StatusMode, text: Option<&str>) -> DomainResult<ResolvedSummary> {
    match mode {
        StatusMode::Specific => {
            let text = text.map(str::trim).unwrap_or_default();
            let len = trimmed_char_len(text);
            if len == 0 || len > MAX_STATUS_TEXT_LENGTH {
                return Err(DomainError::Validation(format!(
                    "SPECIFIC status requires text of 1-{} characters",
                    MAX_STATUS_TEXT_LENGTH
                )));
            }
            Ok(ResolvedSummary {
                mode,
                text: Some(text.to_string()),
            })
        }
        StatusMode::Off | StatusMode::General => Ok(ResolvedSummary { mode, text: None }),
    }
}

/// Checks an optional expected revision against the stored one.
///
/// A missing row counts as revision 0.
pub fn check_revision(stored: Option<i64>, expected: Option<i64>) -> DomainResult<()> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let current = stored.unwrap_or(0);
    if current != expected {
        return Err(DomainError::Conflict(format!(
            "Status was modified concurrently (expected revision {}, current {})",
            expected, current
        )));
    }
    Ok(())
}
