//! Record store backends.
//!
//! This module defines the [`CitaStore`] contract the HTTP layer is written
//! against, plus its two implementations: a process-local list and a remote
//! spreadsheet. Routing code only ever sees `Arc<dyn CitaStore>`, so backends
//! are swappable without touching handlers.

pub mod memory;
pub mod sheets;

use crate::cita::{Cita, CitaInput};
use crate::error::CitaResult;
use async_trait::async_trait;
use chrono::Utc;

/// Persistence contract for cita records.
///
/// Identifiers address exactly one record; lookups are linear scans in the
/// backend's native order. A lookup miss is `CitaError::NotFound`; any backend
/// I/O failure propagates as-is and is never retried.
#[async_trait]
pub trait CitaStore: Send + Sync {
    /// All records in the backend's native order (insertion order for the
    /// in-memory store, sheet row order for the spreadsheet store).
    async fn list(&self) -> CitaResult<Vec<Cita>>;

    /// Applies defaults, assigns an identifier and creation timestamp when
    /// absent, durably appends the record and returns it as stored.
    async fn insert(&self, input: CitaInput) -> CitaResult<Cita>;

    /// Overwrites the record addressed by `id`, keeping the identifier pinned.
    ///
    /// The two backends diverge deliberately here: the in-memory store
    /// shallow-merges the patch over the existing record and returns the
    /// result, while the spreadsheet store rewrites the whole row from the
    /// patch alone (absent fields revert to defaults) and returns `None`,
    /// acknowledging the write without a read-back.
    async fn replace_by_id(&self, id: &str, patch: CitaInput) -> CitaResult<Option<Cita>>;

    /// Permanently removes the record addressed by `id`, shifting subsequent
    /// positions.
    async fn delete_by_id(&self, id: &str) -> CitaResult<()>;
}

/// Identifier for a new record: the client-supplied one when present,
/// otherwise a string derived from the current Unix-epoch milliseconds.
/// Collisions are not guarded against.
pub(crate) fn resolve_insert_id(input: &CitaInput) -> String {
    match input.id.as_deref() {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => Utc::now().timestamp_millis().to_string(),
    }
}

/// Creation timestamp stamped on inserts.
pub(crate) fn creation_timestamp() -> String {
    Utc::now().to_rfc3339()
}
