//! # Record Model
//!
//! The input representation for the engine. A [`FormRecord`] is one
//! already-validated registration, exactly as the registration store hands
//! it over: flat strings and numbers, no nesting.
//!
//! Field names are English, but every field also accepts the key used by the
//! registration store (`apellido_paterno`, `carrera_nombre`, ...), so rows
//! exported straight from the store deserialize without a mapping layer.
//!
//! The engine never mutates a record and never re-validates business rules.
//! It only defends against missing values: an optional value that is absent
//! drops its row, a required value that is absent prints a dash.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Printed in place of a required value that is missing.
pub const PLACEHOLDER: &str = "\u{2014}";

/// One applicant's registration, the unit the engine renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRecord {
    // ── Identity ───────────────────────────────────────────────
    #[serde(deserialize_with = "nullable")]
    pub folio: String,
    /// When the store accepted the registration. Absent on records rendered
    /// before they were persisted; the engine then prints the current date.
    pub created_at: Option<DateTime<FixedOffset>>,

    // ── Applicant ──────────────────────────────────────────────
    #[serde(alias = "nombre", deserialize_with = "nullable")]
    pub given_name: String,
    #[serde(alias = "apellido_paterno", deserialize_with = "nullable")]
    pub paternal_surname: String,
    #[serde(alias = "apellido_materno", deserialize_with = "nullable")]
    pub maternal_surname: String,
    /// National ID (CURP).
    #[serde(alias = "curp", deserialize_with = "nullable")]
    pub national_id: String,
    #[serde(alias = "sexo", deserialize_with = "nullable")]
    pub sex: String,
    /// Kept as printed by the form (`yyyy-mm-dd`); the engine does not reformat it.
    #[serde(alias = "fecha_nacimiento", deserialize_with = "nullable")]
    pub birth_date: String,
    #[serde(alias = "estado_civil", deserialize_with = "nullable")]
    pub marital_status: String,
    #[serde(alias = "telefono", deserialize_with = "nullable")]
    pub phone: String,
    #[serde(alias = "correo", deserialize_with = "nullable")]
    pub email: String,
    #[serde(alias = "lugar_nacimiento", deserialize_with = "nullable")]
    pub birthplace: String,
    #[serde(alias = "domicilio", deserialize_with = "nullable")]
    pub street_address: String,
    #[serde(alias = "colonia", deserialize_with = "nullable")]
    pub neighborhood: String,
    #[serde(alias = "municipio", deserialize_with = "nullable")]
    pub municipality: String,
    #[serde(alias = "codigo_postal", deserialize_with = "nullable")]
    pub postal_code: String,

    // ── Program choices ────────────────────────────────────────
    #[serde(alias = "carrera_nombre", deserialize_with = "nullable")]
    pub first_choice: String,
    #[serde(alias = "segunda_opcion_carrera")]
    pub second_choice: Option<String>,
    #[serde(alias = "tercera_opcion_carrera")]
    pub third_choice: Option<String>,

    // ── Prior school ───────────────────────────────────────────
    #[serde(alias = "escuela_tipo", deserialize_with = "nullable")]
    pub school_type: String,
    #[serde(alias = "escuela_nombre", deserialize_with = "nullable")]
    pub school_name: String,
    #[serde(alias = "escuela_municipio", deserialize_with = "nullable")]
    pub school_municipality: String,
    /// General average on a 0–10 scale.
    #[serde(alias = "promedio_general")]
    pub average: Option<f64>,

    // ── Guardian ───────────────────────────────────────────────
    #[serde(alias = "tutor_nombre", deserialize_with = "nullable")]
    pub guardian_name: String,
    #[serde(alias = "tutor_parentesco", deserialize_with = "nullable")]
    pub guardian_relationship: String,
    #[serde(alias = "tutor_curp", deserialize_with = "nullable")]
    pub guardian_national_id: String,
    #[serde(alias = "tutor_ocupacion", deserialize_with = "nullable")]
    pub guardian_occupation: String,
    #[serde(alias = "tutor_grado_estudios", deserialize_with = "nullable")]
    pub guardian_education: String,
    #[serde(alias = "tutor_telefono", deserialize_with = "nullable")]
    pub guardian_phone: String,
}

impl FormRecord {
    /// Given name plus both surnames, skipping the empty parts.
    pub fn full_name(&self) -> String {
        join_present(
            &[
                self.given_name.as_str(),
                self.paternal_surname.as_str(),
                self.maternal_surname.as_str(),
            ],
            " ",
        )
    }

    /// Given name plus paternal surname, as printed under the signature rule.
    pub fn short_name(&self) -> String {
        join_present(&[self.given_name.as_str(), self.paternal_surname.as_str()], " ")
    }

    /// `street, Col. neighborhood, C.P. postal`, omitting absent parts.
    pub fn address_line(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(street) = present(&self.street_address) {
            parts.push(street.to_string());
        }
        if let Some(col) = present(&self.neighborhood) {
            parts.push(format!("Col. {}", col));
        }
        if let Some(cp) = present(&self.postal_code) {
            parts.push(format!("C.P. {}", cp));
        }
        parts.join(", ")
    }

    /// The second choice, if it carries any text.
    pub fn second_choice(&self) -> Option<&str> {
        self.second_choice.as_deref().and_then(present)
    }

    /// The third choice, if it carries any text.
    pub fn third_choice(&self) -> Option<&str> {
        self.third_choice.as_deref().and_then(present)
    }

    /// `8.5 / 10`, or `None` when the average is missing or not a number.
    pub fn average_label(&self) -> Option<String> {
        self.average
            .filter(|a| a.is_finite())
            .map(|a| format!("{} / 10", a))
    }
}

/// Treat whitespace-only strings exactly like absent values.
pub fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Store rows carry `null` for unset text columns.
fn nullable<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn join_present(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .filter_map(|p| present(p))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Document metadata embedded in the PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

/// Physical page sizes in millimetres. The ficha only ever prints on Letter;
/// the enum exists so the writer and geometry share one source of truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    Letter,
}

impl PageSize {
    /// Returns (width, height) in millimetres.
    pub const fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_keys_deserialize() {
        let json = r#"{
            "folio": "PRE-2025-0007",
            "nombre": "Luis",
            "apellido_paterno": "Pérez",
            "carrera_nombre": "Técnico Agropecuario",
            "segunda_opcion_carrera": "",
            "promedio_general": 9.2,
            "tutor_telefono": "4431234567",
            "created_at": "2025-03-05T10:20:30.123456+00:00"
        }"#;
        let record: FormRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.folio, "PRE-2025-0007");
        assert_eq!(record.short_name(), "Luis Pérez");
        assert_eq!(record.first_choice, "Técnico Agropecuario");
        assert_eq!(record.second_choice(), None);
        assert_eq!(record.average, Some(9.2));
        assert_eq!(record.guardian_phone, "4431234567");
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_null_columns_are_absent() {
        let json = r#"{ "folio": "PRE-1", "tutor_telefono": null, "segunda_opcion_carrera": null }"#;
        let record: FormRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.guardian_phone, "");
        assert_eq!(record.second_choice(), None);
    }

    #[test]
    fn test_full_name_skips_empty_parts() {
        let record = FormRecord {
            given_name: "Ana".into(),
            paternal_surname: "  ".into(),
            maternal_surname: "López".into(),
            ..Default::default()
        };
        assert_eq!(record.full_name(), "Ana López");
    }

    #[test]
    fn test_address_line_omits_missing_parts() {
        let record = FormRecord {
            street_address: "Av. Juárez 12".into(),
            postal_code: "58000".into(),
            ..Default::default()
        };
        assert_eq!(record.address_line(), "Av. Juárez 12, C.P. 58000");
        assert_eq!(FormRecord::default().address_line(), "");
    }

    #[test]
    fn test_average_label() {
        let mut record = FormRecord::default();
        assert_eq!(record.average_label(), None);
        record.average = Some(9.0);
        assert_eq!(record.average_label().as_deref(), Some("9 / 10"));
        record.average = Some(8.75);
        assert_eq!(record.average_label().as_deref(), Some("8.75 / 10"));
    }

    #[test]
    fn test_letter_dimensions() {
        assert_eq!(PageSize::Letter.dimensions(), (215.9, 279.4));
    }
}
