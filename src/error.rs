// src/error.rs
use thiserror::Error;

/// Run-level failures. Per-record problems never surface here; they are counted
/// in the harvest report instead.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("source '{source_name}' is unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl HarvestError {
    pub fn unavailable(source_name: &str, reason: impl ToString) -> Self {
        HarvestError::SourceUnavailable { source_name: s!(source_name), reason: reason.to_string() }
    }
}
