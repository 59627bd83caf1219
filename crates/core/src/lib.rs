//! # Agenda Core
//!
//! Core business logic for the agenda dental backend.
//!
//! This crate contains the pure domain layer:
//! - The [`Cita`] record type and its partial-input counterpart
//! - The [`CitaStore`] persistence contract with in-memory and
//!   spreadsheet-backed implementations
//! - The positional row ⇄ record codec used by the spreadsheet backend
//! - Configuration resolved once at startup and input validation
//!
//! **No API concerns**: HTTP servers, routing, wire envelopes and OpenAPI
//! documentation belong in `api-rest`.

pub mod cita;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod sheets;
pub mod store;
pub mod validation;

pub use cita::{Cita, CitaInput};
pub use config::{CoreConfig, SheetsConfig, StorageBackend};
pub use error::{CitaError, CitaResult};
pub use sheets::SheetsClient;
pub use store::memory::MemoryStore;
pub use store::sheets::SheetsStore;
pub use store::CitaStore;
