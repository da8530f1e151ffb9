//! Spanish (es-MX) date rendering for the printed form.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// `05 de marzo de 2025`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `5/3/2025` (day/month/year, no padding).
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// `Ciclo Escolar 2025 – 2026`, starting at the year of `today`.
pub fn school_cycle(today: NaiveDate) -> String {
    let year = today.year();
    format!("Ciclo Escolar {} \u{2013} {}", year, year + 1)
}
