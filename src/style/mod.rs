//! # Style
//!
//! The handful of visual properties a ficha needs: RGB colors, the
//! institutional palette, and the per-call text and line styles the drawing
//! surface accepts. There is no cascade and no inheritance; every draw call
//! carries its complete style.

use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as fractions in 0..=1, the form PDF color operators take.
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

/// Institutional palette.
pub mod palette {
    use super::Color;

    /// Institutional green: header, section bands, footer.
    pub const GREEN: Color = Color::rgb(4, 102, 56);
    /// Gold accent: caption band, section stripes.
    pub const GOLD: Color = Color::rgb(180, 140, 15);
    /// Light green behind label cells.
    pub const LABEL_TINT: Color = Color::rgb(229, 244, 234);
    /// Grey behind the folio band.
    pub const BAND_GREY: Color = Color::rgb(243, 245, 243);
    pub const TEXT: Color = Color::rgb(22, 22, 22);
    pub const MUTED: Color = Color::rgb(115, 115, 115);
    pub const WHITE: Color = Color::WHITE;
    /// Cell borders.
    pub const RULE: Color = Color::rgb(200, 215, 200);
    /// Cut line and its caption.
    pub const CUT: Color = Color::rgb(160, 160, 160);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Horizontal anchoring of a text run around its `x` coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Everything the surface needs to place one run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f64,
    pub weight: FontWeight,
    pub color: Color,
    pub align: TextAlign,
    /// Width in millimetres the run may occupy. Longer runs are truncated
    /// by the surface.
    pub max_width: Option<f64>,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color: palette::TEXT,
            align: TextAlign::Left,
            max_width: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn max_width(mut self, width: f64) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Stroke parameters for a straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    /// Line width in millimetres.
    pub width: f64,
    /// Dash pattern `(on, off)` in millimetres; `None` draws a solid line.
    pub dash: Option<(f64, f64)>,
}

impl LineStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f64, on: f64, off: f64) -> Self {
        Self {
            color,
            width,
            dash: Some((on, off)),
        }
    }

    pub fn is_dashed(&self) -> bool {
        self.dash.is_some()
    }
}
