//! Constants used throughout the agenda core crate.
//!
//! This module contains the spreadsheet layout and field-default constants to
//! ensure consistency across the codebase and make maintenance easier.

/// Number of columns a cita occupies in the spreadsheet (columns A..M).
pub const COLUMN_COUNT: usize = 13;

/// Letter of the last cita column in A1 notation.
pub const LAST_COLUMN: &str = "M";

/// First sheet row that holds cita data (row 1 is the header).
pub const DATA_START_ROW: usize = 2;

/// Default estado for a cita created without one.
pub const ESTADO_PENDIENTE: &str = "Pendiente";

/// Default duración (minutes) for a cita created without one.
pub const DURACION_DEFAULT: &str = "30";

/// Default worksheet name when no explicit sheet name is configured.
pub const DEFAULT_SHEET_NAME: &str = "Citas";
