//! Every fixed dimension of the ficha, in millimetres unless noted.
//!
//! Row and band heights are constants and only row *counts* vary between
//! records, so the tallest possible copy is known before anything is drawn. That bound
//! is [`worst_case_content_bottom`]; it must stay above
//! [`signature_top_offset`] or the signatures would be printed over data.

use crate::model::PageSize;

pub const PAGE: PageSize = PageSize::Letter;
pub const PAGE_WIDTH: f64 = PAGE.dimensions().0;
pub const PAGE_HEIGHT: f64 = PAGE.dimensions().1;
/// Height of one copy's region.
pub const HALF_HEIGHT: f64 = PAGE_HEIGHT / 2.0;

/// Left and right margin of tables and the folio block.
pub const SIDE_MARGIN: f64 = 11.0;
/// Width shared by every table.
pub const TABLE_WIDTH: f64 = PAGE_WIDTH - SIDE_MARGIN * 2.0;

// ── Bands, top to bottom ───────────────────────────────────────
pub const CAPTION_BAND_HEIGHT: f64 = 3.5;
pub const HEADER_BAND_HEIGHT: f64 = 15.0;
pub const LOGO_SIZE: f64 = 12.0;
pub const LOGO_RADIUS: f64 = 1.5;
pub const FOLIO_BAND_HEIGHT: f64 = 8.0;
pub const FOLIO_BLOCK_WIDTH: f64 = 38.0;
/// Space between the folio band and the first section.
pub const FOLIO_BAND_GAP: f64 = 1.0;

// ── Sections and cells ─────────────────────────────────────────
pub const SECTION_HEADER_HEIGHT: f64 = 4.2;
pub const SECTION_HEADER_GAP: f64 = 0.3;
pub const SECTION_STRIPE_WIDTH: f64 = 2.0;
/// Space after the last row of a section.
pub const SECTION_GAP: f64 = 0.8;
pub const ROW_HEIGHT: f64 = 3.9;
pub const PAIR_LABEL_WIDTH: f64 = 32.0;
pub const QUAD_LABEL_WIDTH: f64 = 26.0;
pub const CELL_PADDING: f64 = 1.8;
/// Horizontal space inside a cell that text may not use.
pub const CELL_TEXT_MARGIN: f64 = 3.0;
pub const CELL_BORDER_WIDTH: f64 = 0.18;

// ── Signatures and footer, anchored to the bottom of the region ─
pub const FOOTER_HEIGHT: f64 = 7.0;
/// Distance from the top of the signature block to the top of the footer.
pub const SIGNATURE_BLOCK_HEIGHT: f64 = 14.0;
/// Horizontal space between the two signature rules.
pub const SIGNATURE_GAP: f64 = 10.0;
pub const SIGNATURE_WIDTH: f64 = (PAGE_WIDTH - SIDE_MARGIN * 2.0 - SIGNATURE_GAP) / 2.0;
/// Offsets below the top of the signature block.
pub const SIGNATURE_RULE_OFFSET: f64 = 9.0;
pub const SIGNATURE_CAPTION_OFFSET: f64 = 11.2;
pub const SIGNATURE_NAME_OFFSET: f64 = 13.4;
pub const SIGNATURE_RULE_WIDTH: f64 = 0.25;

// ── Cut line ───────────────────────────────────────────────────
pub const CUT_LINE_INSET: f64 = 5.0;
pub const CUT_DASH: (f64, f64) = (2.5, 1.5);
pub const CUT_LINE_WIDTH: f64 = 0.2;
/// The caption sits on a white chip centred on the cut line. The chip is
/// short enough to clear the footer text above and the caption band text
/// below.
pub const CUT_CHIP_ABOVE: f64 = 1.0;
pub const CUT_CHIP_BELOW: f64 = 0.9;
pub const CUT_CHIP_PADDING: f64 = 2.0;
pub const CUT_CAPTION_BASELINE: f64 = 0.55;

// ── Type sizes (points) ────────────────────────────────────────
pub const CELL_FONT_SIZE: f64 = 6.3;
pub const SECTION_FONT_SIZE: f64 = 6.5;
pub const CAPTION_FONT_SIZE: f64 = 6.0;
pub const CUT_CAPTION_FONT_SIZE: f64 = 5.5;

/// Most rows each section can ever produce, in drawing order.
pub const MAX_SECTION_ROWS: [usize; 4] = [6, 2, 2, 3];

/// Vertical space one section takes for `rows` rows, gaps included.
pub fn section_height(rows: usize) -> f64 {
    SECTION_HEADER_HEIGHT + SECTION_HEADER_GAP + rows as f64 * ROW_HEIGHT + SECTION_GAP
}

/// Offset from the region top where the first section starts.
pub fn sections_top_offset() -> f64 {
    CAPTION_BAND_HEIGHT + HEADER_BAND_HEIGHT + FOLIO_BAND_HEIGHT + FOLIO_BAND_GAP
}

/// Offset from the region top of the footer band.
pub fn footer_top_offset(region_height: f64) -> f64 {
    region_height - FOOTER_HEIGHT
}

/// Offset from the region top of the signature block.
pub fn signature_top_offset(region_height: f64) -> f64 {
    footer_top_offset(region_height) - SIGNATURE_BLOCK_HEIGHT
}

/// Offset from the region top of the cursor after the last section, when
/// every optional row is present.
pub fn worst_case_content_bottom() -> f64 {
    sections_top_offset()
        + MAX_SECTION_ROWS
            .iter()
            .map(|&rows| section_height(rows))
            .sum::<f64>()
}
