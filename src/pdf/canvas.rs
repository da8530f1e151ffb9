//! PDF content-stream surface.
//!
//! Layout speaks millimetres from the top-left corner; PDF speaks points
//! from the bottom-left. [`PdfCanvas`] does the conversion and emits raw
//! operators for one page.

use std::fmt::Write as FmtWrite;

use crate::font::{FontContext, StandardFont, MM_PER_PT};
use crate::style::{Color, LineStyle, TextAlign, TextStyle};
use crate::surface::Surface;

/// Bezier control-point factor for quarter circles.
const KAPPA: f64 = 0.5522847498;

/// Millimetres to PDF points.
fn pt(mm: f64) -> f64 {
    mm / MM_PER_PT
}

/// Collects the operators of one page's content stream.
pub struct PdfCanvas {
    stream: String,
    page_height: f64,
    fonts: FontContext,
}

impl PdfCanvas {
    /// `page_height` in millimetres.
    pub fn new(page_height: f64) -> Self {
        Self {
            stream: String::new(),
            page_height,
            fonts: FontContext::new(),
        }
    }

    /// The uncompressed content stream.
    pub fn finish(self) -> String {
        self.stream
    }

    /// PDF y of a layout y, in points.
    fn flip(&self, y: f64) -> f64 {
        pt(self.page_height - y)
    }

    fn set_fill(&mut self, color: Color) {
        let (r, g, b) = color.to_unit();
        let _ = writeln!(self.stream, "{:.3} {:.3} {:.3} rg", r, g, b);
    }

    fn set_stroke(&mut self, color: Color) {
        let (r, g, b) = color.to_unit();
        let _ = writeln!(self.stream, "{:.3} {:.3} {:.3} RG", r, g, b);
    }

    /// Rectangle path in points, `(x, y)` being the bottom-left corner.
    fn rounded_rect_path(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let r = radius.min(w / 2.0).min(h / 2.0);
        let k = r * KAPPA;
        let s = &mut self.stream;

        let _ = writeln!(s, "{:.2} {:.2} m", x + r, y);
        let _ = writeln!(s, "{:.2} {:.2} l", x + w - r, y);
        let _ = writeln!(
            s,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x + w - r + k, y,
            x + w, y + r - k,
            x + w, y + r
        );
        let _ = writeln!(s, "{:.2} {:.2} l", x + w, y + h - r);
        let _ = writeln!(
            s,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x + w, y + h - r + k,
            x + w - r + k, y + h,
            x + w - r, y + h
        );
        let _ = writeln!(s, "{:.2} {:.2} l", x + r, y + h);
        let _ = writeln!(
            s,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x + r - k, y + h,
            x, y + h - r + k,
            x, y + h - r
        );
        let _ = writeln!(s, "{:.2} {:.2} l", x, y + r);
        let _ = writeln!(
            s,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x, y + r - k,
            x + r - k, y,
            x + r, y
        );
        let _ = writeln!(s, "h");
    }
}

impl Surface for PdfCanvas {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        let _ = writeln!(self.stream, "q");
        self.set_fill(color);
        let _ = writeln!(
            self.stream,
            "{:.2} {:.2} {:.2} {:.2} re\nf\nQ",
            pt(x),
            self.flip(y + h),
            pt(w),
            pt(h)
        );
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64) {
        let _ = writeln!(self.stream, "q");
        self.set_stroke(color);
        let _ = writeln!(
            self.stream,
            "{:.2} w\n{:.2} {:.2} {:.2} {:.2} re\nS\nQ",
            pt(line_width),
            pt(x),
            self.flip(y + h),
            pt(w),
            pt(h)
        );
    }

    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        let fitted = match style.max_width {
            Some(max) => self.fonts.fit_to_width(text, style.weight, style.size, max),
            None => text.into(),
        };
        if fitted.is_empty() {
            return;
        }

        let width = self.fonts.measure_string(&fitted, style.weight, style.size);
        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let font = StandardFont::for_weight(style.weight);

        let _ = writeln!(self.stream, "BT");
        self.set_fill(style.color);
        let _ = writeln!(
            self.stream,
            "/{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET",
            font.resource_name(),
            style.size,
            pt(left),
            self.flip(y),
            encode_text(&fitted)
        );
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        let _ = writeln!(self.stream, "q");
        self.set_stroke(style.color);
        let _ = writeln!(self.stream, "{:.2} w", pt(style.width));
        if let Some((on, off)) = style.dash {
            let _ = writeln!(self.stream, "[{:.2} {:.2}] 0 d", pt(on), pt(off));
        }
        let _ = writeln!(
            self.stream,
            "{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ",
            pt(x1),
            self.flip(y1),
            pt(x2),
            self.flip(y2)
        );
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color) {
        let _ = writeln!(self.stream, "q");
        self.set_fill(color);
        let bottom = self.flip(y + h);
        self.rounded_rect_path(pt(x), bottom, pt(w), pt(h), pt(radius));
        let _ = writeln!(self.stream, "f\nQ");
    }
}

/// Encode `text` as the body of a PDF literal string in WinAnsiEncoding.
/// Characters outside the encoding become `?`.
pub(crate) fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let b = unicode_to_winansi(ch).unwrap_or(b'?');
        match b {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Map a Unicode codepoint to its WinAnsiEncoding (Windows-1252) byte.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::palette;

    #[test]
    fn test_encode_escapes_and_latin1() {
        assert_eq!(encode_text("a(b)c\\"), "a\\(b\\)c\\\\");
        // é = 0xE9 = octal 351
        assert_eq!(encode_text("Caf\u{e9}"), "Caf\\351");
        assert_eq!(encode_text("\u{2014}"), "\\227");
        assert_eq!(encode_text("\u{2022}"), "\\225");
        assert_eq!(encode_text("\u{2702}"), "?");
    }

    #[test]
    fn test_fill_rect_flips_y() {
        let mut canvas = PdfCanvas::new(279.4);
        canvas.fill_rect(0.0, 0.0, 215.9, 3.5, palette::GOLD);
        let out = canvas.finish();
        // 3.5mm = 9.92pt, so the band's bottom edge sits at 792 - 9.92
        assert!(out.contains("0.00 782.08 612.00 9.92 re"), "{out}");
        assert!(out.contains(" rg\n"));
    }

    #[test]
    fn test_dashed_line() {
        let mut canvas = PdfCanvas::new(279.4);
        canvas.line(5.0, 139.7, 210.9, 139.7, &LineStyle::dashed(palette::CUT, 0.2, 2.5, 1.5));
        let out = canvas.finish();
        assert!(out.contains("[7.09 4.25] 0 d"), "{out}");
        assert!(out.contains("14.17 396.00 m"), "{out}");
    }

    #[test]
    fn test_solid_line_has_no_dash() {
        let mut canvas = PdfCanvas::new(279.4);
        canvas.line(0.0, 10.0, 10.0, 10.0, &LineStyle::solid(palette::MUTED, 0.25));
        assert!(!canvas.finish().contains(" d\n"));
    }

    #[test]
    fn test_bold_text_uses_second_font() {
        let mut canvas = PdfCanvas::new(279.4);
        canvas.text(10.0, 10.0, "FOLIO", &TextStyle::new(7.5).bold());
        canvas.text(10.0, 20.0, "folio", &TextStyle::new(6.0));
        let out = canvas.finish();
        assert!(out.contains("/F1 7.5 Tf"));
        assert!(out.contains("/F0 6.0 Tf"));
        assert!(out.contains("(FOLIO) Tj"));
    }

    #[test]
    fn test_long_text_is_truncated() {
        let mut canvas = PdfCanvas::new(279.4);
        let long = "Av. Insurgentes Sur 1234, Col. Del Valle ".repeat(10);
        canvas.text(10.0, 10.0, &long, &TextStyle::new(6.3).max_width(40.0));
        let out = canvas.finish();
        assert!(out.contains("\\205) Tj"), "ellipsis expected: {out}");
        assert!(!out.contains(&long));
    }

    #[test]
    fn test_right_aligned_text_ends_at_anchor() {
        let fonts = FontContext::new();
        let style = TextStyle::new(6.0).align(TextAlign::Right);
        let width = fonts.measure_string("5/3/2025", style.weight, style.size);
        let mut canvas = PdfCanvas::new(279.4);
        canvas.text(204.9, 50.0, "5/3/2025", &style);
        let expected = format!("{:.2} ", pt(204.9 - width));
        assert!(canvas.finish().contains(&expected));
    }

    #[test]
    fn test_rounded_rect_uses_curves() {
        let mut canvas = PdfCanvas::new(279.4);
        canvas.fill_rounded_rect(11.0, 5.0, 12.0, 12.0, 1.5, palette::WHITE);
        let out = canvas.finish();
        assert_eq!(out.matches(" c\n").count(), 4);
        assert!(out.ends_with("h\nf\nQ\n"));
    }
}
