//! Spreadsheet-backed cita store.
//!
//! One cita per sheet row, columns A..M (see [`crate::codec`]), with a single
//! header row above the data. Locating a record is a two-step protocol: fetch
//! the identifier column, scan for the match, then address the follow-up
//! read or write to that row's positional range.
//!
//! Index arithmetic is the correctness-critical detail here. Data rows start
//! at sheet row 2, so the record at scan index `i` lives at sheet row `i + 2`
//! (1-based addressing plus the header row). The row-deletion request instead
//! counts zero-based rows including the header, so the same record spans
//! `[i + 1, i + 2)`.
//!
//! Concurrent requests may race between the lookup read and the follow-up
//! write; a lost update on a stale row position is possible and undetected.

use crate::cita::{Cita, CitaInput};
use crate::codec;
use crate::config::SheetsConfig;
use crate::constants::{DATA_START_ROW, LAST_COLUMN};
use crate::error::{CitaError, CitaResult};
use crate::sheets::SheetsClient;
use crate::store::{creation_timestamp, resolve_insert_id, CitaStore};
use async_trait::async_trait;
use chrono::Utc;

/// Store over a remote spreadsheet worksheet.
#[derive(Clone, Debug)]
pub struct SheetsStore {
    client: SheetsClient,
    sheet_name: String,
    sheet_gid: i64,
}

impl SheetsStore {
    /// Creates a store against the production spreadsheet API.
    ///
    /// # Errors
    ///
    /// Returns `CitaError::Http` if the HTTP client cannot be built.
    pub fn new(cfg: &SheetsConfig) -> CitaResult<Self> {
        Ok(Self::with_client(SheetsClient::new(cfg)?, cfg))
    }

    /// Creates a store over an existing client, used by tests to target a
    /// mock server.
    pub fn with_client(client: SheetsClient, cfg: &SheetsConfig) -> Self {
        Self {
            client,
            sheet_name: cfg.sheet_name.clone(),
            sheet_gid: cfg.sheet_gid,
        }
    }

    /// Range covering all data rows: `Citas!A2:M`.
    fn data_range(&self) -> String {
        format!("{}!A{}:{}", self.sheet_name, DATA_START_ROW, LAST_COLUMN)
    }

    /// Range covering the identifier column of all data rows: `Citas!A2:A`.
    fn id_range(&self) -> String {
        format!("{}!A{}:A", self.sheet_name, DATA_START_ROW)
    }

    /// Positional range of one data row: `Citas!A{n}:M{n}`.
    fn row_range(&self, row_number: usize) -> String {
        format!(
            "{sheet}!A{row}:{last}{row}",
            sheet = self.sheet_name,
            row = row_number,
            last = LAST_COLUMN
        )
    }

    /// Open-ended range the append call targets: `Citas!A:M`.
    fn append_range(&self) -> String {
        format!("{}!A:{}", self.sheet_name, LAST_COLUMN)
    }

    /// Scans the identifier column for `id` and returns its zero-based data
    /// row index, or `None` when absent.
    async fn locate(&self, id: &str) -> CitaResult<Option<usize>> {
        let ids = self.client.get_values(&self.id_range()).await?;
        Ok(ids
            .iter()
            .position(|row| row.first().map(String::as_str) == Some(id)))
    }
}

#[async_trait]
impl CitaStore for SheetsStore {
    async fn list(&self) -> CitaResult<Vec<Cita>> {
        let rows = self.client.get_values(&self.data_range()).await?;

        Ok(rows
            .iter()
            .enumerate()
            .map(|(i, row)| codec::cita_from_row(row, i + DATA_START_ROW))
            .collect())
    }

    async fn insert(&self, input: CitaInput) -> CitaResult<Cita> {
        let id = resolve_insert_id(&input);
        let cita = codec::cita_from_input(input, id, creation_timestamp());

        let row = codec::row_from_cita(&cita);
        self.client.append_values(&self.append_range(), &[row]).await?;

        tracing::debug!(id = %cita.id, "cita appended to spreadsheet");
        Ok(cita)
    }

    async fn replace_by_id(&self, id: &str, patch: CitaInput) -> CitaResult<Option<Cita>> {
        let index = self.locate(id).await?.ok_or(CitaError::NotFound)?;
        let row_number = index + DATA_START_ROW;

        // Full positional overwrite: fields absent from the patch revert to
        // their defaults rather than preserving the prior cell values.
        let fallback_created_at = Utc::now().format("%Y-%m-%d").to_string();
        let cita = codec::cita_from_input(patch, id.to_string(), fallback_created_at);

        let row = codec::row_from_cita(&cita);
        self.client
            .update_values(&self.row_range(row_number), &[row])
            .await?;

        tracing::debug!(%id, row_number, "cita row overwritten");
        Ok(None)
    }

    async fn delete_by_id(&self, id: &str) -> CitaResult<()> {
        let index = self.locate(id).await?.ok_or(CitaError::NotFound)?;

        // Zero-based and header-inclusive: data row `index` is sheet row
        // `index + 1` in dimension coordinates.
        self.client
            .delete_rows(self.sheet_gid, index + 1, index + 2)
            .await?;

        tracing::debug!(%id, "cita row deleted");
        Ok(())
    }
}
