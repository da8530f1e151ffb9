//! # Font Management
//!
//! The ficha prints in Helvetica and Helvetica-Bold, two of the standard PDF
//! fonts, so nothing is embedded. What the engine does need is their
//! metrics: the surface measures text to honor right/center alignment and to
//! truncate runs that would spill out of their cell.

pub mod metrics;

use std::borrow::Cow;

pub use metrics::StandardFontMetrics;

use crate::style::FontWeight;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Ascender of both Helvetica faces, as a fraction of the em.
pub const ASCENDER: f64 = 0.718;

/// Appended to a truncated run.
const ELLIPSIS: char = '\u{2026}';

/// The standard PDF fonts the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    pub fn for_weight(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Regular => StandardFont::Helvetica,
            FontWeight::Bold => StandardFont::HelveticaBold,
        }
    }

    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// The content-stream resource name (`/F0`, `/F1`).
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "F0",
            Self::HelveticaBold => "F1",
        }
    }

    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            Self::Helvetica => StandardFontMetrics::HELVETICA,
            Self::HelveticaBold => StandardFontMetrics::HELVETICA_BOLD,
        }
    }
}

/// Text measurement in the engine's unit (millimetres).
#[derive(Debug, Clone, Copy, Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Width of `text` in millimetres at `font_size` points.
    pub fn measure_string(&self, text: &str, weight: FontWeight, font_size: f64) -> f64 {
        let metrics = StandardFont::for_weight(weight).metrics();
        let pts: f64 = text.chars().map(|ch| metrics.char_width(ch, font_size)).sum();
        pts * MM_PER_PT
    }

    /// Shorten `text` so it fits in `max_width` millimetres, ending it with
    /// an ellipsis when anything was removed. Text that already fits is
    /// returned untouched.
    pub fn fit_to_width<'a>(
        &self,
        text: &'a str,
        weight: FontWeight,
        font_size: f64,
        max_width: f64,
    ) -> Cow<'a, str> {
        if self.measure_string(text, weight, font_size) <= max_width {
            return Cow::Borrowed(text);
        }

        let metrics = StandardFont::for_weight(weight).metrics();
        let budget = max_width / MM_PER_PT - metrics.char_width(ELLIPSIS, font_size);
        let mut used = 0.0;
        let mut out = String::new();
        for ch in text.chars() {
            let w = metrics.char_width(ch, font_size);
            if used + w > budget {
                break;
            }
            used += w;
            out.push(ch);
        }
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        if budget > 0.0 {
            out.push(ELLIPSIS);
        }
        Cow::Owned(out)
    }
}
