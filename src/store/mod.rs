// src/store/mod.rs
//! Persistent store collaborator.
//!
//! The store owns identity: it registers sources and decides, by its own
//! matching policy, whether an upserted record merges into an existing court.
//! The pipeline only hands records over and counts failures.

mod file;
mod supabase;

use thiserror::Error;

use crate::core::net::NetError;
use crate::normalize::CanonicalRecord;

pub use file::FileStore;
pub use supabase::SupabaseStore;

pub type SourceId = String;
pub type RecordId = String;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Net(#[from] NetError),
    #[error("store configuration: {0}")]
    Config(String),
    #[error("store rejected {what}: {reason}")]
    Rejected { what: String, reason: String },
}

pub trait Store {
    /// Get-or-create by name. Idempotent.
    fn ensure_source(
        &mut self,
        name: &str,
        source_type: &str,
        base_url: Option<&str>,
    ) -> Result<SourceId, StoreError>;

    /// Insert or merge; returns the stable id of the resulting court.
    fn upsert_canonical_record(&mut self, record: &CanonicalRecord) -> Result<RecordId, StoreError>;
}

impl<S: Store + ?Sized> Store for &mut S {
    fn ensure_source(&mut self, name: &str, source_type: &str, base_url: Option<&str>) -> Result<SourceId, StoreError> {
        (**self).ensure_source(name, source_type, base_url)
    }
    fn upsert_canonical_record(&mut self, record: &CanonicalRecord) -> Result<RecordId, StoreError> {
        (**self).upsert_canonical_record(record)
    }
}
