//! In-memory cita store.
//!
//! Process-local list guarded by a `RwLock`; contents are lost on restart.
//! This is the default backend and the one used by the dev server and the
//! router tests.

use crate::cita::{Cita, CitaInput};
use crate::codec;
use crate::error::{CitaError, CitaResult};
use crate::store::{creation_timestamp, resolve_insert_id, CitaStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// List-backed store, insertion-ordered.
#[derive(Debug, Default)]
pub struct MemoryStore {
    citas: RwLock<Vec<Cita>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `citas`, preserving their order.
    pub fn with_citas(citas: Vec<Cita>) -> Self {
        Self {
            citas: RwLock::new(citas),
        }
    }
}

#[async_trait]
impl CitaStore for MemoryStore {
    async fn list(&self) -> CitaResult<Vec<Cita>> {
        Ok(self.citas.read().await.clone())
    }

    async fn insert(&self, input: CitaInput) -> CitaResult<Cita> {
        let id = resolve_insert_id(&input);
        let cita = codec::cita_from_input(input, id, creation_timestamp());

        self.citas.write().await.push(cita.clone());

        Ok(cita)
    }

    async fn replace_by_id(&self, id: &str, patch: CitaInput) -> CitaResult<Option<Cita>> {
        let mut citas = self.citas.write().await;

        let index = citas
            .iter()
            .position(|c| c.id == id)
            .ok_or(CitaError::NotFound)?;

        let actualizada = citas[index].apply_patch(patch);
        citas[index] = actualizada.clone();

        Ok(Some(actualizada))
    }

    async fn delete_by_id(&self, id: &str) -> CitaResult<()> {
        let mut citas = self.citas.write().await;

        let index = citas
            .iter()
            .position(|c| c.id == id)
            .ok_or(CitaError::NotFound)?;
        citas.remove(index);

        Ok(())
    }
}
