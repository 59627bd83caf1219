//! Input validation utilities.
//!
//! This module contains functions for validating request payloads before they
//! reach a store, so malformed citas are rejected at the API boundary instead
//! of landing in the backing medium.

use crate::cita::CitaInput;
use crate::error::{CitaError, CitaResult};

/// Maximum accepted length for any single field value.
const MAX_CAMPO_LEN: usize = 500;

/// Validates the payload of a create request.
///
/// A new cita must carry at least a non-blank `nombre`, `fecha` and `hora`;
/// everything else is optional and receives defaults at insert. All supplied
/// fields are additionally length-bounded.
///
/// # Errors
///
/// Returns `CitaError::InvalidInput` naming the offending field.
pub fn validate_nueva_cita(input: &CitaInput) -> CitaResult<()> {
    require_non_blank(input.nombre.as_deref(), "nombre")?;
    require_non_blank(input.fecha.as_deref(), "fecha")?;
    require_non_blank(input.hora.as_deref(), "hora")?;
    validate_longitudes(input)
}

/// Validates the payload of an update request.
///
/// Partial patches are legal, so no field is required, but every supplied
/// field is still length-bounded.
///
/// # Errors
///
/// Returns `CitaError::InvalidInput` naming the offending field.
pub fn validate_longitudes(input: &CitaInput) -> CitaResult<()> {
    let campos = [
        ("id", &input.id),
        ("nombre", &input.nombre),
        ("apellidos", &input.apellidos),
        ("telefono", &input.telefono),
        ("email", &input.email),
        ("fecha", &input.fecha),
        ("hora", &input.hora),
        ("tratamiento", &input.tratamiento),
        ("doctor", &input.doctor),
        ("estado", &input.estado),
        ("duracion", &input.duracion),
        ("notas", &input.notas),
        ("created_at", &input.created_at),
    ];

    for (nombre, valor) in campos {
        if let Some(valor) = valor {
            if valor.len() > MAX_CAMPO_LEN {
                return Err(CitaError::InvalidInput(format!(
                    "el campo '{nombre}' supera la longitud máxima de {MAX_CAMPO_LEN} caracteres"
                )));
            }
        }
    }

    Ok(())
}

fn require_non_blank(valor: Option<&str>, nombre: &str) -> CitaResult<()> {
    match valor {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(CitaError::InvalidInput(format!(
            "el campo '{nombre}' es obligatorio"
        ))),
    }
}
