//! Advance widths for the standard Type1 fonts the ficha uses.
//!
//! Values come from the Adobe AFM files and are in 1/1000 em. Only the
//! printable ASCII block is tabulated; Latin-1 letters borrow the width of
//! their unaccented base letter, which matches the AFM for every accented
//! letter Spanish uses except the dotless-i family, listed explicitly.

/// Helvetica, 0x20..=0x7E.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold, 0x20..=0x7E.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of any character without an entry of its own.
const FALLBACK_WIDTH: u16 = 556;

/// Per-font advance widths.
#[derive(Debug, Clone, Copy)]
pub struct StandardFontMetrics {
    ascii: &'static [u16; 95],
}

impl StandardFontMetrics {
    pub(crate) const HELVETICA: StandardFontMetrics = StandardFontMetrics {
        ascii: &HELVETICA,
    };

    pub(crate) const HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
        ascii: &HELVETICA_BOLD,
    };

    /// Advance width of `ch` in 1/1000 em.
    pub fn advance(&self, ch: char) -> u16 {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) {
            return self.ascii[(cp - 0x20) as usize];
        }
        match ch {
            'í' | 'ì' | 'î' | 'ï' => 278,
            '\u{2014}' | '\u{2026}' => 1000,
            '\u{2013}' => 556,
            '\u{00B7}' => 278,
            '\u{2022}' => 350,
            'ª' => 370,
            'º' => 365,
            '¿' => 611,
            '¡' => 333,
            '\u{00A0}' => 278,
            _ => match fold_latin1(ch) {
                Some(base) => self.advance(base),
                None => FALLBACK_WIDTH,
            },
        }
    }

    /// Width of `ch` in points at `font_size`.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.advance(ch) as f64 / 1000.0 * font_size
    }
}

/// Map an accented Latin-1 letter to its unaccented base letter.
fn fold_latin1(ch: char) -> Option<char> {
    let base = match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        _ => return None,
    };
    Some(base)
}
