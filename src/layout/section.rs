//! # Sections
//!
//! A section is a green title band followed by a block of rows. This module
//! builds the four sections of a ficha from a [`FormRecord`] and draws one
//! section at a time.
//!
//! Row policy:
//! - required values that are missing print [`PLACEHOLDER`];
//! - optional values (second and third program choice) that are missing
//!   drop their row, so no blank row ever appears.

use super::geometry::*;
use super::table::{render_rows, rows_height, ColumnShape, Row};
use super::Cursor;
use crate::model::{present, FormRecord, PLACEHOLDER};
use crate::style::{palette, TextStyle};
use crate::surface::Surface;

/// A titled block of rows, rebuilt from the record on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub rows: Vec<Row>,
}

impl Section {
    /// Total vertical space this section takes, including trailing gap.
    pub fn height(&self) -> f64 {
        SECTION_HEADER_HEIGHT + SECTION_HEADER_GAP + rows_height(&self.rows) + SECTION_GAP
    }
}

/// Draw the title band and then the rows. Returns the cursor below the last
/// row plus the section gap, so sections compose by plain accumulation.
pub fn render_section<S: Surface + ?Sized>(
    surface: &mut S,
    title: &str,
    rows: &[Row],
    origin_x: f64,
    cursor: Cursor,
    total_width: f64,
    shape: ColumnShape,
) -> Cursor {
    let y = cursor.y();
    let h = SECTION_HEADER_HEIGHT;
    surface.fill_rect(origin_x, y, total_width, h, palette::GREEN);
    surface.fill_rect(origin_x, y, SECTION_STRIPE_WIDTH, h, palette::GOLD);
    surface.text(
        origin_x + 5.0,
        y + h / 2.0 + 1.1,
        title,
        &TextStyle::new(SECTION_FONT_SIZE)
            .bold()
            .color(palette::WHITE)
            .max_width(total_width - 6.0),
    );

    let cursor = cursor.advance(h + SECTION_HEADER_GAP);
    render_rows(surface, rows, origin_x, cursor, total_width, shape).advance(SECTION_GAP)
}

/// The four sections of a ficha, in printing order.
pub fn build_sections(record: &FormRecord) -> Vec<Section> {
    vec![
        applicant_section(record),
        program_section(record),
        school_section(record),
        guardian_section(record),
    ]
}

fn applicant_section(r: &FormRecord) -> Section {
    Section {
        title: "1.  DATOS DEL ASPIRANTE".to_string(),
        rows: vec![
            Row::pair("Nombre Completo", or_dash(&r.full_name())),
            Row::quad("CURP", or_dash(&r.national_id), "Sexo", or_dash(&r.sex)),
            Row::quad(
                "Fec. Nac.",
                or_dash(&r.birth_date),
                "Estado Civil",
                or_dash(&r.marital_status),
            ),
            Row::quad("Tel\u{e9}fono", or_dash(&r.phone), "Correo", or_dash(&r.email)),
            Row::quad(
                "Lugar Nac.",
                or_dash(&r.birthplace),
                "Municipio",
                or_dash(&r.municipality),
            ),
            Row::pair("Domicilio", or_dash(&r.address_line())),
        ],
    }
}

fn program_section(r: &FormRecord) -> Section {
    const FIRST: &str = "1\u{aa} Opci\u{f3}n";
    const SECOND: &str = "2\u{aa} Opci\u{f3}n";
    const THIRD: &str = "3\u{aa} Opci\u{f3}n";

    let mut rows = vec![Row::pair(FIRST, or_dash(&r.first_choice))];
    match (r.second_choice(), r.third_choice()) {
        (Some(second), Some(third)) => rows.push(Row::quad(SECOND, second, THIRD, third)),
        (Some(second), None) => rows.push(Row::pair(SECOND, second)),
        (None, Some(third)) => rows.push(Row::pair(THIRD, third)),
        (None, None) => {}
    }
    Section {
        title: "2.  CARRERAS T\u{c9}CNICAS SELECCIONADAS".to_string(),
        rows,
    }
}

fn school_section(r: &FormRecord) -> Section {
    let average = r.average_label().unwrap_or_else(|| PLACEHOLDER.to_string());
    Section {
        title: "3.  ESCUELA DE PROCEDENCIA".to_string(),
        rows: vec![
            Row::quad("Tipo", or_dash(&r.school_type), "Nombre", or_dash(&r.school_name)),
            Row::quad("Municipio", or_dash(&r.school_municipality), "Promedio", average),
        ],
    }
}

fn guardian_section(r: &FormRecord) -> Section {
    Section {
        title: "4.  PADRE / MADRE / TUTOR LEGAL".to_string(),
        rows: vec![
            Row::quad(
                "Parentesco",
                or_dash(&r.guardian_relationship),
                "Nombre",
                or_dash(&r.guardian_name),
            ),
            Row::quad(
                "CURP",
                or_dash(&r.guardian_national_id),
                "Ocupaci\u{f3}n",
                or_dash(&r.guardian_occupation),
            ),
            Row::quad(
                "Grado Est.",
                or_dash(&r.guardian_education),
                "Tel\u{e9}fono",
                or_dash(&r.guardian_phone),
            ),
        ],
    }
}

/// A required value, or the placeholder dash when it is missing.
fn or_dash(value: &str) -> String {
    match present(value) {
        Some(v) => v.to_string(),
        None => {
            tracing::trace!("required value missing, printing placeholder");
            PLACEHOLDER.to_string()
        }
    }
}
