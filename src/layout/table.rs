//! # Cell/Table Composer
//!
//! Turns label/value rows into bordered cells. Every row has the same height
//! regardless of its text: cells never reflow, long values are clipped by the
//! surface. That is what lets a section's height be computed from its row
//! count alone.

use super::geometry::*;
use super::Cursor;
use crate::style::{palette, TextStyle};
use crate::surface::Surface;

/// One table row.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// `[label | value]`
    Pair { label: String, value: String },
    /// `[label | value | label | value]`
    Quad {
        left_label: String,
        left_value: String,
        right_label: String,
        right_value: String,
    },
}

impl Row {
    pub fn pair(label: impl Into<String>, value: impl Into<String>) -> Self {
        Row::Pair {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn quad(
        left_label: impl Into<String>,
        left_value: impl Into<String>,
        right_label: impl Into<String>,
        right_value: impl Into<String>,
    ) -> Self {
        Row::Quad {
            left_label: left_label.into(),
            left_value: left_value.into(),
            right_label: right_label.into(),
            right_value: right_value.into(),
        }
    }

    /// `(label, value)` pairs in reading order.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        match self {
            Row::Pair { label, value } => vec![(label.as_str(), value.as_str())],
            Row::Quad {
                left_label,
                left_value,
                right_label,
                right_value,
            } => vec![
                (left_label.as_str(), left_value.as_str()),
                (right_label.as_str(), right_value.as_str()),
            ],
        }
    }
}

/// Label column widths for both row shapes. Value columns take the rest of
/// the table width; in a quad row the two value columns split it evenly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnShape {
    pub two_column_label: f64,
    pub four_column_label: f64,
}

impl ColumnShape {
    pub const STANDARD: ColumnShape = ColumnShape {
        two_column_label: PAIR_LABEL_WIDTH,
        four_column_label: QUAD_LABEL_WIDTH,
    };

    /// `(x, width)` of each cell of `row`, starting at `origin_x`.
    pub fn cell_spans(&self, row: &Row, origin_x: f64, total_width: f64) -> Vec<(f64, f64)> {
        match row {
            Row::Pair { .. } => {
                let label = self.two_column_label;
                vec![(origin_x, label), (origin_x + label, total_width - label)]
            }
            Row::Quad { .. } => {
                let label = self.four_column_label;
                let value = (total_width - label * 2.0) / 2.0;
                vec![
                    (origin_x, label),
                    (origin_x + label, value),
                    (origin_x + label + value, label),
                    (origin_x + label * 2.0 + value, value),
                ]
            }
        }
    }
}

impl Default for ColumnShape {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Draw `rows` top to bottom starting at `cursor`, returning the cursor just
/// below the last row.
pub fn render_rows<S: Surface + ?Sized>(
    surface: &mut S,
    rows: &[Row],
    origin_x: f64,
    cursor: Cursor,
    total_width: f64,
    shape: ColumnShape,
) -> Cursor {
    debug_assert!(
        origin_x >= 0.0 && origin_x + total_width <= PAGE_WIDTH + 1e-9,
        "table [{origin_x}, {}] leaves the page",
        origin_x + total_width
    );

    let mut cursor = cursor;
    for row in rows {
        let spans = shape.cell_spans(row, origin_x, total_width);
        let texts: Vec<&str> = row
            .entries()
            .into_iter()
            .flat_map(|(label, value)| [label, value])
            .collect();
        for (i, ((x, w), text)) in spans.into_iter().zip(texts).enumerate() {
            let is_label = i % 2 == 0;
            draw_cell(surface, x, cursor.y(), w, ROW_HEIGHT, text, is_label);
        }
        cursor = cursor.advance(ROW_HEIGHT);
    }
    cursor
}

/// Height `rows` will occupy, without drawing.
pub fn rows_height(rows: &[Row]) -> f64 {
    rows.len() as f64 * ROW_HEIGHT
}

fn draw_cell<S: Surface + ?Sized>(
    surface: &mut S,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    text: &str,
    is_label: bool,
) {
    if is_label {
        surface.fill_rect(x, y, w, h, palette::LABEL_TINT);
    }
    surface.stroke_rect(x, y, w, h, palette::RULE, CELL_BORDER_WIDTH);

    if text.is_empty() {
        return;
    }
    let mut style = TextStyle::new(CELL_FONT_SIZE).max_width(w - CELL_TEXT_MARGIN);
    if is_label {
        style = style.bold();
    }
    surface.text(x + CELL_PADDING, y + h / 2.0 + 1.2, text, &style);
}
