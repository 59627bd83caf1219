//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into core services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.
//! Binaries read the environment; everything here is pure.

use crate::constants::DEFAULT_SHEET_NAME;
use crate::error::{CitaError, CitaResult};

/// Which persistence backend the store layer should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local list, lost on restart. The default.
    Memory,
    /// Remote spreadsheet reached over HTTP.
    Sheets,
}

/// Connection settings for the spreadsheet backend.
///
/// Token minting (service-account credential exchange) is an external
/// collaborator; this configuration carries an already-issued bearer token.
#[derive(Clone, Debug)]
pub struct SheetsConfig {
    /// Spreadsheet document identifier.
    pub spreadsheet_id: String,
    /// Worksheet (tab) name used in A1-notation ranges.
    pub sheet_name: String,
    /// Numeric worksheet id (`gid`), required by row-deletion requests.
    pub sheet_gid: i64,
    /// OAuth bearer token sent on every spreadsheet API call.
    pub api_token: String,
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    backend: StorageBackend,
    sheets: Option<SheetsConfig>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CitaError::InvalidConfig` if the sheets backend is selected
    /// without spreadsheet settings, or if the settings are incomplete.
    pub fn new(backend: StorageBackend, sheets: Option<SheetsConfig>) -> CitaResult<Self> {
        if backend == StorageBackend::Sheets {
            let sheets_cfg = sheets.as_ref().ok_or_else(|| {
                CitaError::InvalidConfig(
                    "sheets backend selected but no spreadsheet settings provided".into(),
                )
            })?;
            validate_sheets_config(sheets_cfg)?;
        }

        Ok(Self { backend, sheets })
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    pub fn sheets(&self) -> Option<&SheetsConfig> {
        self.sheets.as_ref()
    }
}

fn validate_sheets_config(cfg: &SheetsConfig) -> CitaResult<()> {
    if cfg.spreadsheet_id.trim().is_empty() {
        return Err(CitaError::InvalidConfig("spreadsheet_id cannot be empty".into()));
    }
    if cfg.sheet_name.trim().is_empty() {
        return Err(CitaError::InvalidConfig("sheet_name cannot be empty".into()));
    }
    if cfg.api_token.trim().is_empty() {
        return Err(CitaError::InvalidConfig("api_token cannot be empty".into()));
    }
    Ok(())
}

/// Parse the storage backend from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, the in-memory backend is used.
///
/// # Errors
///
/// Returns `CitaError::InvalidConfig` for an unrecognised backend name.
pub fn backend_from_env_value(value: Option<String>) -> CitaResult<StorageBackend> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None | Some("memory") => Ok(StorageBackend::Memory),
        Some("sheets") => Ok(StorageBackend::Sheets),
        Some(other) => Err(CitaError::InvalidConfig(format!(
            "unknown storage backend '{other}' (expected 'memory' or 'sheets')"
        ))),
    }
}

/// Parse the worksheet `gid` from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, defaults to `0` (the first
/// worksheet of a spreadsheet).
///
/// # Errors
///
/// Returns `CitaError::InvalidConfig` if the value is not an integer.
pub fn sheet_gid_from_env_value(value: Option<String>) -> CitaResult<i64> {
    let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    match value {
        None => Ok(0),
        Some(v) => v
            .parse::<i64>()
            .map_err(|_| CitaError::InvalidConfig(format!("invalid sheet gid '{v}'"))),
    }
}

/// Resolve the worksheet name from an optional environment value, falling back
/// to [`DEFAULT_SHEET_NAME`].
pub fn sheet_name_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheets_cfg() -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: "spread-1".into(),
            sheet_name: "Citas".into(),
            sheet_gid: 0,
            api_token: "token".into(),
        }
    }

    #[test]
    fn backend_defaults_to_memory() {
        assert_eq!(
            backend_from_env_value(None).unwrap(),
            StorageBackend::Memory
        );
        assert_eq!(
            backend_from_env_value(Some("  ".into())).unwrap(),
            StorageBackend::Memory
        );
    }

    #[test]
    fn backend_names_are_case_insensitive() {
        assert_eq!(
            backend_from_env_value(Some("Sheets".into())).unwrap(),
            StorageBackend::Sheets
        );
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(backend_from_env_value(Some("postgres".into())).is_err());
    }

    #[test]
    fn sheets_backend_requires_settings() {
        assert!(CoreConfig::new(StorageBackend::Sheets, None).is_err());
        assert!(CoreConfig::new(StorageBackend::Sheets, Some(sheets_cfg())).is_ok());
    }

    #[test]
    fn blank_spreadsheet_id_is_rejected() {
        let mut cfg = sheets_cfg();
        cfg.spreadsheet_id = " ".into();
        assert!(CoreConfig::new(StorageBackend::Sheets, Some(cfg)).is_err());
    }

    #[test]
    fn memory_backend_ignores_sheets_settings() {
        let cfg = CoreConfig::new(StorageBackend::Memory, None).unwrap();
        assert_eq!(cfg.backend(), StorageBackend::Memory);
        assert!(cfg.sheets().is_none());
    }

    #[test]
    fn sheet_gid_parses_and_defaults() {
        assert_eq!(sheet_gid_from_env_value(None).unwrap(), 0);
        assert_eq!(sheet_gid_from_env_value(Some("173".into())).unwrap(), 173);
        assert!(sheet_gid_from_env_value(Some("abc".into())).is_err());
    }

    #[test]
    fn sheet_name_falls_back_to_default() {
        assert_eq!(sheet_name_from_env_value(None), DEFAULT_SHEET_NAME);
        assert_eq!(sheet_name_from_env_value(Some("Agenda".into())), "Agenda");
    }
}
