//! # Duplication Controller
//!
//! Puts the same record on one physical page twice: ORIGINAL in the top
//! half, COPY in the bottom half, and a dashed cut line between them.
//!
//! The cut marks are drawn last. The COPY's caption band starts exactly on
//! the cut line, so anything drawn there earlier would be painted over.

use tracing::debug;

use super::geometry::*;
use super::region::RegionLayout;
use super::{FichaEngine, LayoutRegion};
use crate::font::FontContext;
use crate::model::FormRecord;
use crate::style::{palette, LineStyle, TextAlign, TextStyle};
use crate::surface::Surface;

/// Both copies of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub original: RegionLayout,
    pub copy: RegionLayout,
}

impl FichaEngine {
    /// Draw `record` twice on the current page, plus the cut marks.
    pub fn render_page<S: Surface + ?Sized>(&self, surface: &mut S, record: &FormRecord) -> PageLayout {
        let [top, bottom] = LayoutRegion::halves();
        let original = self.render_copy(surface, record, top);
        let copy = self.render_copy(surface, record, bottom);
        self.draw_cut_marks(surface, HALF_HEIGHT);
        debug!(folio = %record.folio, "page composed");

        PageLayout { original, copy }
    }

    /// Dashed cut line with its caption on a white chip. No scissors glyph:
    /// WinAnsi has none.
    fn draw_cut_marks<S: Surface + ?Sized>(&self, surface: &mut S, y: f64) {
        let (on, off) = CUT_DASH;
        surface.line(
            CUT_LINE_INSET,
            y,
            PAGE_WIDTH - CUT_LINE_INSET,
            y,
            &LineStyle::dashed(palette::CUT, CUT_LINE_WIDTH, on, off),
        );

        let caption = self.config.cut_caption.as_str();
        if caption.trim().is_empty() {
            return;
        }
        let style = TextStyle::new(CUT_CAPTION_FONT_SIZE)
            .color(palette::CUT)
            .align(TextAlign::Center)
            .max_width(TABLE_WIDTH);
        let width = FontContext::new()
            .measure_string(caption, style.weight, style.size)
            .min(TABLE_WIDTH)
            + CUT_CHIP_PADDING * 2.0;
        surface.fill_rect(
            (PAGE_WIDTH - width) / 2.0,
            y - CUT_CHIP_ABOVE,
            width,
            CUT_CHIP_ABOVE + CUT_CHIP_BELOW,
            palette::WHITE,
        );
        surface.text(PAGE_WIDTH / 2.0, y + CUT_CAPTION_BASELINE, caption, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FichaConfig;
    use crate::surface::{DisplayList, DrawCommand};
    use chrono::NaiveDate;

    fn engine(config: FichaConfig) -> FichaEngine {
        FichaEngine::with_today(config, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap())
    }

    fn record() -> FormRecord {
        FormRecord {
            folio: "PRE-2025-0001".into(),
            given_name: "Ana".into(),
            paternal_surname: "Garc\u{ed}a".into(),
            first_choice: "T\u{e9}cnico en Programaci\u{f3}n".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_cut_marks_drawn_last() {
        let mut list = DisplayList::new();
        engine(FichaConfig::default()).render_page(&mut list, &record());
        let commands = list.commands();
        let n = commands.len();

        match &commands[n - 3] {
            DrawCommand::Line { y1, y2, style, .. } => {
                assert_eq!(*y1, HALF_HEIGHT);
                assert_eq!(*y2, HALF_HEIGHT);
                assert!(style.is_dashed());
            }
            other => panic!("expected cut line, got {other:?}"),
        }
        assert!(matches!(
            commands[n - 2],
            DrawCommand::FillRect { color: palette::WHITE, .. }
        ));
        assert_eq!(commands[n - 1].as_text(), Some("Recorte aqu\u{ed} y conserve la COPIA"));
    }

    #[test]
    fn test_regions_are_the_two_halves() {
        let mut list = DisplayList::new();
        let page = engine(FichaConfig::default()).render_page(&mut list, &record());
        assert_eq!(page.original.region.offset_y, 0.0);
        assert_eq!(page.copy.region.offset_y, HALF_HEIGHT);
        assert!(page.original.footer_top < page.copy.region.offset_y);
    }

    #[test]
    fn test_folio_four_times_per_page() {
        let mut list = DisplayList::new();
        engine(FichaConfig::default()).render_page(&mut list, &record());
        assert_eq!(list.texts().filter(|t| t.contains("PRE-2025-0001")).count(), 4);
    }

    #[test]
    fn test_chip_clears_neighbouring_text() {
        let mut list = DisplayList::new();
        engine(FichaConfig::default()).render_page(&mut list, &record());
        let chip_top = HALF_HEIGHT - CUT_CHIP_ABOVE;
        let chip_bottom = HALF_HEIGHT + CUT_CHIP_BELOW;
        let commands = list.commands();
        // Only centred text shares the chip's columns.
        for c in &commands[..commands.len() - 3] {
            if let DrawCommand::Text { style, .. } = c {
                if style.align != TextAlign::Center {
                    continue;
                }
                let clear = c.bottom() <= chip_top + 1e-9 || c.top() >= chip_bottom - 1e-9;
                assert!(clear, "{c:?} is hidden by the cut caption chip");
            }
        }
    }

    #[test]
    fn test_empty_cut_caption_draws_line_only() {
        let config = FichaConfig {
            cut_caption: String::new(),
            ..Default::default()
        };
        let mut list = DisplayList::new();
        engine(config).render_page(&mut list, &record());
        assert!(matches!(list.commands().last(), Some(DrawCommand::Line { .. })));
    }
}
