//! Cita (dental appointment) record types.
//!
//! A [`Cita`] is the sole entity of the system: one scheduled dental visit
//! with patient, timing, treatment and status fields. Every field is a string,
//! matching both the JSON wire format and the spreadsheet cell model, so the
//! same record moves unchanged through either backend.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored dental appointment.
///
/// The identifier is assigned at creation time and never changes across
/// updates. Absent optional fields are stored as empty strings, except
/// `estado` and `duracion` which carry fixed defaults (see
/// [`crate::codec::cita_from_input`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Cita {
    /// Stable identifier, unique within the store.
    pub id: String,
    /// Patient given name.
    pub nombre: String,
    /// Patient surname(s).
    pub apellidos: String,
    /// Contact phone number.
    pub telefono: String,
    /// Optional contact email.
    #[serde(default)]
    pub email: String,
    /// Appointment date (`YYYY-MM-DD`).
    pub fecha: String,
    /// Appointment time (`HH:MM`).
    pub hora: String,
    /// Treatment type (e.g. "Limpieza").
    pub tratamiento: String,
    /// Assigned practitioner.
    pub doctor: String,
    /// Open-ended status string, e.g. "Pendiente" or "Confirmada".
    pub estado: String,
    /// Appointment duration in minutes, kept as a string cell value.
    #[serde(default)]
    pub duracion: String,
    /// Free-text notes.
    pub notas: String,
    /// Creation timestamp, stamped at insert.
    pub created_at: String,
}

impl Cita {
    /// Returns a copy of this cita with every field supplied in `patch`
    /// overwritten and every absent field preserved. The identifier is pinned:
    /// an `id` inside the patch is ignored.
    pub fn apply_patch(&self, patch: CitaInput) -> Cita {
        Cita {
            id: self.id.clone(),
            nombre: patch.nombre.unwrap_or_else(|| self.nombre.clone()),
            apellidos: patch.apellidos.unwrap_or_else(|| self.apellidos.clone()),
            telefono: patch.telefono.unwrap_or_else(|| self.telefono.clone()),
            email: patch.email.unwrap_or_else(|| self.email.clone()),
            fecha: patch.fecha.unwrap_or_else(|| self.fecha.clone()),
            hora: patch.hora.unwrap_or_else(|| self.hora.clone()),
            tratamiento: patch.tratamiento.unwrap_or_else(|| self.tratamiento.clone()),
            doctor: patch.doctor.unwrap_or_else(|| self.doctor.clone()),
            estado: patch.estado.unwrap_or_else(|| self.estado.clone()),
            duracion: patch.duracion.unwrap_or_else(|| self.duracion.clone()),
            notas: patch.notas.unwrap_or_else(|| self.notas.clone()),
            created_at: patch.created_at.unwrap_or_else(|| self.created_at.clone()),
        }
    }
}

/// Request-body shape for creating or updating a cita.
///
/// Every field is optional. On create, absent fields receive defaults; on
/// update the two backends diverge deliberately (the in-memory store merges,
/// the spreadsheet store overwrites positionally, reverting absent fields to
/// defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CitaInput {
    pub id: Option<String>,
    pub nombre: Option<String>,
    pub apellidos: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub fecha: Option<String>,
    pub hora: Option<String>,
    pub tratamiento: Option<String>,
    pub doctor: Option<String>,
    pub estado: Option<String>,
    pub duracion: Option<String>,
    pub notas: Option<String>,
    pub created_at: Option<String>,
}
