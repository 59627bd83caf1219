//! Row ⇄ cita codec.
//!
//! The spreadsheet backend stores one cita per sheet row as a flat, ordered
//! list of string cells. This module holds the single source of truth for that
//! positional layout (columns A..M) and for the field defaults applied when a
//! record is built from a partial input.
//!
//! Column layout:
//!
//! ```text
//! A  id            H  tratamiento
//! B  nombre        I  doctor
//! C  apellidos     J  estado      (default "Pendiente")
//! D  telefono      K  duracion    (default "30")
//! E  email         L  notas
//! F  fecha         M  created_at
//! G  hora
//! ```
//!
//! Round-trips are lossy only with respect to absent optional fields, never
//! for present ones: `cita_from_row(&row_from_cita(&c), n) == c` holds for any
//! `c` with a non-empty identifier.

use crate::cita::{Cita, CitaInput};
use crate::constants::{COLUMN_COUNT, DURACION_DEFAULT, ESTADO_PENDIENTE};

/// Maps a positional row of string cells to a [`Cita`] by fixed index.
///
/// Rows shorter than the schema are padded with empty strings, since the
/// spreadsheet API omits trailing empty cells. If the identifier cell itself
/// is empty, a placeholder derived from the row's sheet position is
/// synthesised so the record stays addressable in listings.
///
/// # Arguments
///
/// * `row` - Cell values in column order, possibly shorter than the schema
/// * `row_number` - 1-based sheet row the cells came from (header included)
pub fn cita_from_row(row: &[String], row_number: usize) -> Cita {
    let cell = |i: usize| row.get(i).cloned().unwrap_or_default();

    let id = match cell(0) {
        id if id.is_empty() => format!("fila-{row_number}"),
        id => id,
    };

    Cita {
        id,
        nombre: cell(1),
        apellidos: cell(2),
        telefono: cell(3),
        email: cell(4),
        fecha: cell(5),
        hora: cell(6),
        tratamiento: cell(7),
        doctor: cell(8),
        estado: cell(9),
        duracion: cell(10),
        notas: cell(11),
        created_at: cell(12),
    }
}

/// Inverse of [`cita_from_row`]: always yields exactly [`COLUMN_COUNT`] cells
/// in column order.
pub fn row_from_cita(cita: &Cita) -> Vec<String> {
    let row = vec![
        cita.id.clone(),
        cita.nombre.clone(),
        cita.apellidos.clone(),
        cita.telefono.clone(),
        cita.email.clone(),
        cita.fecha.clone(),
        cita.hora.clone(),
        cita.tratamiento.clone(),
        cita.doctor.clone(),
        cita.estado.clone(),
        cita.duracion.clone(),
        cita.notas.clone(),
        cita.created_at.clone(),
    ];
    debug_assert_eq!(row.len(), COLUMN_COUNT);
    row
}

/// Builds a complete [`Cita`] from a partial input, applying field defaults.
///
/// Absent or blank fields become empty strings, except `estado`
/// ("Pendiente"), `duracion` ("30") and `created_at` (the supplied fallback).
/// The identifier inside the input is ignored; callers resolve it beforehand
/// and pass it explicitly, which keeps the identifier pinned on updates.
pub fn cita_from_input(input: CitaInput, id: String, fallback_created_at: String) -> Cita {
    Cita {
        id,
        nombre: input.nombre.unwrap_or_default(),
        apellidos: input.apellidos.unwrap_or_default(),
        telefono: input.telefono.unwrap_or_default(),
        email: input.email.unwrap_or_default(),
        fecha: input.fecha.unwrap_or_default(),
        hora: input.hora.unwrap_or_default(),
        tratamiento: input.tratamiento.unwrap_or_default(),
        doctor: input.doctor.unwrap_or_default(),
        estado: non_blank_or(input.estado, ESTADO_PENDIENTE),
        duracion: non_blank_or(input.duracion, DURACION_DEFAULT),
        notas: input.notas.unwrap_or_default(),
        created_at: non_blank_or(input.created_at, &fallback_created_at),
    }
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cita_completa() -> Cita {
        Cita {
            id: "1705310000000".into(),
            nombre: "Juan".into(),
            apellidos: "Pérez".into(),
            telefono: "+34 600 789 012".into(),
            email: "juan@example.com".into(),
            fecha: "2024-01-16".into(),
            hora: "14:30".into(),
            tratamiento: "Revisión".into(),
            doctor: "Dra. Martínez".into(),
            estado: "Pendiente".into(),
            duracion: "45".into(),
            notas: "Trae radiografía".into(),
            created_at: "2024-01-10T11:00:00Z".into(),
        }
    }

    #[test]
    fn round_trip_preserves_every_present_field() {
        let cita = cita_completa();
        let row = row_from_cita(&cita);
        assert_eq!(row.len(), COLUMN_COUNT);
        assert_eq!(cita_from_row(&row, 7), cita);
    }

    #[test]
    fn short_row_pads_missing_trailing_cells() {
        let row: Vec<String> = vec!["42".into(), "Ana".into()];
        let cita = cita_from_row(&row, 3);

        assert_eq!(cita.id, "42");
        assert_eq!(cita.nombre, "Ana");
        assert_eq!(cita.apellidos, "");
        assert_eq!(cita.created_at, "");
    }

    #[test]
    fn empty_id_cell_synthesises_positional_placeholder() {
        let row: Vec<String> = vec![String::new(), "Ana".into()];
        assert_eq!(cita_from_row(&row, 5).id, "fila-5");
        assert_eq!(cita_from_row(&[], 2).id, "fila-2");
    }

    #[test]
    fn input_defaults_apply_only_to_absent_fields() {
        let input = CitaInput {
            nombre: Some("Ana".into()),
            fecha: Some("2024-02-01".into()),
            hora: Some("09:00".into()),
            ..CitaInput::default()
        };

        let cita = cita_from_input(input, "99".into(), "2024-02-01".into());

        assert_eq!(cita.id, "99");
        assert_eq!(cita.nombre, "Ana");
        assert_eq!(cita.estado, ESTADO_PENDIENTE);
        assert_eq!(cita.duracion, DURACION_DEFAULT);
        assert_eq!(cita.created_at, "2024-02-01");
        assert_eq!(cita.telefono, "");
    }

    #[test]
    fn blank_estado_still_gets_the_default() {
        let input = CitaInput {
            estado: Some("  ".into()),
            ..CitaInput::default()
        };
        let cita = cita_from_input(input, "1".into(), "2024-02-01".into());
        assert_eq!(cita.estado, ESTADO_PENDIENTE);
    }

    #[test]
    fn supplied_estado_wins_over_the_default() {
        let input = CitaInput {
            estado: Some("Confirmada".into()),
            ..CitaInput::default()
        };
        let cita = cita_from_input(input, "1".into(), "2024-02-01".into());
        assert_eq!(cita.estado, "Confirmada");
    }
}
