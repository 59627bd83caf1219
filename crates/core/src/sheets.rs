//! Thin async client for the spreadsheet HTTP API.
//!
//! The spreadsheet backend needs four primitives: range-read, range-append,
//! positional range-update and row-deletion-by-index. Each is a single network
//! call that may fail; failures surface as [`CitaError`] values and are never
//! retried. Everything above this module works in terms of rows of string
//! cells and A1-notation ranges.

use crate::config::SheetsConfig;
use crate::error::{CitaError, CitaResult};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production endpoint of the spreadsheet API.
const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Request timeout applied to every call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Value interpretation mode for writes, mirroring what a user typing into
/// the sheet would get.
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct WriteBody<'a> {
    values: &'a [Vec<String>],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateBody {
    requests: Vec<SheetRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SheetRequest {
    delete_dimension: DeleteDimension,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteDimension {
    range: DimensionRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DimensionRange {
    sheet_id: i64,
    dimension: &'static str,
    start_index: usize,
    end_index: usize,
}

/// Async client scoped to one spreadsheet document.
///
/// Authentication is a bearer token taken from [`SheetsConfig`]; minting and
/// refreshing that token is the caller's concern. The base URL can be
/// overridden to point at a mock server in tests.
#[derive(Clone, Debug)]
pub struct SheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    api_token: String,
}

impl SheetsClient {
    /// Create a client against the production spreadsheet API.
    ///
    /// # Errors
    ///
    /// Returns `CitaError::Http` if the underlying HTTP client cannot be
    /// built.
    pub fn new(cfg: &SheetsConfig) -> CitaResult<Self> {
        Self::with_base_url(cfg, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL, used by tests to target a mock
    /// server.
    ///
    /// # Errors
    ///
    /// Returns `CitaError::Http` if the underlying HTTP client cannot be
    /// built.
    pub fn with_base_url(cfg: &SheetsConfig, base_url: &str) -> CitaResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: cfg.spreadsheet_id.clone(),
            api_token: cfg.api_token.clone(),
        })
    }

    /// Read the cell values of `range`, in row order.
    ///
    /// Trailing empty rows and cells are omitted by the API; an entirely empty
    /// range yields an empty vector.
    pub async fn get_values(&self, range: &str) -> CitaResult<Vec<Vec<String>>> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            encode_range(range)
        );

        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let value_range: ValueRange = resp.json().await?;

        Ok(value_range.values)
    }

    /// Append `rows` after the last data row of `range`.
    pub async fn append_values(&self, range: &str, rows: &[Vec<String>]) -> CitaResult<()> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.base_url,
            self.spreadsheet_id,
            encode_range(range)
        );

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_token)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&WriteBody { values: rows })
            .send()
            .await?;
        check_status(resp).await?;

        Ok(())
    }

    /// Overwrite `range` positionally with `rows`.
    pub async fn update_values(&self, range: &str, rows: &[Vec<String>]) -> CitaResult<()> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            encode_range(range)
        );

        let resp = self
            .client
            .put(url)
            .bearer_auth(&self.api_token)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&WriteBody { values: rows })
            .send()
            .await?;
        check_status(resp).await?;

        Ok(())
    }

    /// Remove the row span `[start_index, end_index)` of the worksheet
    /// identified by `sheet_gid`.
    ///
    /// Indices are zero-based and count the header row, matching the
    /// dimension-removal semantics of the API: deleting the first data row of
    /// a sheet with one header row means `start_index = 1`, `end_index = 2`.
    pub async fn delete_rows(
        &self,
        sheet_gid: i64,
        start_index: usize,
        end_index: usize,
    ) -> CitaResult<()> {
        let url = format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id
        );

        let body = BatchUpdateBody {
            requests: vec![SheetRequest {
                delete_dimension: DeleteDimension {
                    range: DimensionRange {
                        sheet_id: sheet_gid,
                        dimension: "ROWS",
                        start_index,
                        end_index,
                    },
                },
            }],
        };

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;
        check_status(resp).await?;

        Ok(())
    }
}

/// A1 ranges travel in the URL path; only the space needs escaping there.
fn encode_range(range: &str) -> String {
    range.replace(' ', "%20")
}

async fn check_status(resp: Response) -> CitaResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(CitaError::SheetsApi {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_range_escapes_spaces_only() {
        assert_eq!(encode_range("Citas!A2:M"), "Citas!A2:M");
        assert_eq!(encode_range("Mi Agenda!A2:M"), "Mi%20Agenda!A2:M");
    }
}
