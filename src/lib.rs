//! # Ficha
//!
//! A fixed-page PDF engine for duplicated registration forms.
//!
//! A ficha is one applicant's pre-registration printed twice on a single
//! Letter sheet: the ORIGINAL on the top half, the COPY on the bottom half,
//! and a dashed cut line between them. The institution keeps one half, the
//! applicant the other.
//!
//! Nothing here flows or paginates. Every band has a fixed height and only
//! the number of rows in a section depends on the record, so the tallest
//! possible copy is known up front and provably fits its half-page.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON / FormRecord)
//!       ↓
//!   [model]    FormRecord, presence rules, metadata
//!       ↓
//!   [layout]   sections → region (one copy) → page (two copies + cut)
//!       ↓          draws into a Surface; recorded as a DisplayList
//!   [surface]  Surface trait + DrawCommand
//!       ↓
//!   [pdf]      replay onto a PDF canvas, serialize to bytes
//! ```

pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod locale;
pub mod model;
pub mod pdf;
pub mod style;
pub mod surface;

use chrono::NaiveDate;

pub use config::FichaConfig;
pub use error::FichaError;
pub use layout::{Document, FichaEngine};
pub use model::FormRecord;

/// Render one record to PDF bytes: a single page holding both copies.
pub fn render(record: &FormRecord, engine: &FichaEngine) -> Result<Vec<u8>, FichaError> {
    engine.render_pdf(record)
}

/// Render several records to one PDF, one page per record, in input order.
pub fn render_batch(records: &[FormRecord], engine: &FichaEngine) -> Result<Vec<u8>, FichaError> {
    engine.render_batch_pdf(records)
}

/// Render records described as JSON. Accepts a single record object or an
/// array of records.
pub fn render_json(json: &str, engine: &FichaEngine) -> Result<Vec<u8>, FichaError> {
    let records = parse_records(json)?;
    engine.render_batch_pdf(&records)
}

/// Parse a record object or an array of them.
///
/// The top-level shape is chosen from the first token, so a top-level array
/// is always a list of records and never one record spelled as a sequence.
pub fn parse_records(json: &str) -> Result<Vec<FormRecord>, FichaError> {
    if json.trim_start().starts_with('[') {
        Ok(serde_json::from_str::<Vec<FormRecord>>(json)?)
    } else {
        Ok(vec![serde_json::from_str::<FormRecord>(json)?])
    }
}

/// `Ficha_PreRegistro_<folio>.pdf`, with the folio reduced to characters
/// that are safe in a file name.
pub fn record_file_name(record: &FormRecord) -> String {
    let folio: String = record
        .folio
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if folio.is_empty() {
        "Ficha_PreRegistro.pdf".to_string()
    } else {
        format!("Ficha_PreRegistro_{}.pdf", folio)
    }
}

/// `Fichas_PreRegistro_<yyyy-mm-dd>.pdf`
pub fn batch_file_name(date: NaiveDate) -> String {
    format!("Fichas_PreRegistro_{}.pdf", date.format("%Y-%m-%d"))
}
