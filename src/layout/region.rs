//! # Region Composer
//!
//! Draws one complete copy of the ficha inside a [`LayoutRegion`]. The copy
//! is built from two stacks that never meet:
//!
//! - from the region top, growing down: caption band, header band, folio
//!   band, then the four sections;
//! - from the region bottom, fixed: footer band, and the signature block
//!   directly above it.
//!
//! Every coordinate is computed relative to `region.offset_y`, so the same
//! code draws the ORIGINAL and the COPY.

use tracing::warn;

use super::geometry::*;
use super::section::{build_sections, render_section};
use super::table::ColumnShape;
use super::{Cursor, FichaEngine, LayoutRegion};
use crate::locale::{long_date, school_cycle, short_date};
use crate::model::{present, FormRecord, PLACEHOLDER};
use crate::style::{palette, LineStyle, TextAlign, TextStyle};
use crate::surface::Surface;

/// Where things ended up after composing one copy. All values are absolute
/// page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionLayout {
    pub region: LayoutRegion,
    /// Cursor below each section, in drawing order.
    pub section_ends: Vec<f64>,
    pub signature_top: f64,
    pub footer_top: f64,
}

impl RegionLayout {
    /// Bottom of the variable-height content.
    pub fn content_bottom(&self) -> f64 {
        self.section_ends
            .last()
            .copied()
            .unwrap_or(self.region.offset_y + sections_top_offset())
    }
}

impl FichaEngine {
    /// Draw one full copy of `record` into `region`.
    pub fn render_copy<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        record: &FormRecord,
        region: LayoutRegion,
    ) -> RegionLayout {
        let label = region.label.text(&self.config);

        let cursor = Cursor::at(region.offset_y);
        let cursor = self.draw_caption_band(surface, cursor, label);
        let cursor = self.draw_header_band(surface, cursor);
        let mut cursor = self.draw_folio_band(surface, cursor, record);

        let mut section_ends = Vec::with_capacity(4);
        for section in build_sections(record) {
            cursor = render_section(
                surface,
                &section.title,
                &section.rows,
                SIDE_MARGIN,
                cursor,
                TABLE_WIDTH,
                ColumnShape::STANDARD,
            );
            section_ends.push(cursor.y());
        }

        let signature_top = region.offset_y + signature_top_offset(region.height);
        let footer_top = region.offset_y + footer_top_offset(region.height);
        debug_assert!(
            cursor.y() <= signature_top + 1e-9,
            "sections end at {} below signature block at {signature_top}",
            cursor.y()
        );
        if cursor.y() > signature_top {
            warn!(
                folio = %record.folio,
                content_bottom = cursor.y(),
                signature_top,
                "copy content overlaps the signature block"
            );
        }

        self.draw_signatures(surface, signature_top, record);
        self.draw_footer(surface, footer_top, record, label);

        RegionLayout {
            region,
            section_ends,
            signature_top,
            footer_top,
        }
    }

    /// Gold band with the form caption and the copy label. The printed
    /// forms use diamonds here; WinAnsi has no diamond, so bullets stand in.
    fn draw_caption_band<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        cursor: Cursor,
        label: &str,
    ) -> Cursor {
        let y = cursor.y();
        surface.fill_rect(0.0, y, PAGE_WIDTH, CAPTION_BAND_HEIGHT, palette::GOLD);
        let caption = format!(
            "\u{2022}  {}  \u{2014}  {}  \u{2022}",
            self.config.form_caption, label
        );
        surface.text(
            PAGE_WIDTH / 2.0,
            y + 2.5,
            &caption,
            &TextStyle::new(CAPTION_FONT_SIZE)
                .bold()
                .color(palette::WHITE)
                .align(TextAlign::Center)
                .max_width(TABLE_WIDTH),
        );
        cursor.advance(CAPTION_BAND_HEIGHT)
    }

    fn draw_header_band<S: Surface + ?Sized>(&self, surface: &mut S, cursor: Cursor) -> Cursor {
        let y = cursor.y();
        let institution = &self.config.institution;
        surface.fill_rect(0.0, y, PAGE_WIDTH, HEADER_BAND_HEIGHT, palette::GREEN);

        // Logo box
        let logo_y = y + (HEADER_BAND_HEIGHT - LOGO_SIZE) / 2.0;
        surface.fill_rounded_rect(SIDE_MARGIN, logo_y, LOGO_SIZE, LOGO_SIZE, LOGO_RADIUS, palette::WHITE);
        let logo_style = TextStyle::new(5.2)
            .bold()
            .color(palette::GREEN)
            .align(TextAlign::Center)
            .max_width(LOGO_SIZE - 1.0);
        for (line, dy) in institution.logo_lines.iter().zip([5.5, 9.0]) {
            surface.text(SIDE_MARGIN + LOGO_SIZE / 2.0, y + dy, line, &logo_style);
        }

        let center = PAGE_WIDTH / 2.0;
        let text_width = PAGE_WIDTH - 2.0 * (SIDE_MARGIN + LOGO_SIZE + 2.0);
        let centered = |size: f64| {
            TextStyle::new(size)
                .color(palette::WHITE)
                .align(TextAlign::Center)
                .max_width(text_width)
        };
        surface.text(center, y + 5.5, &institution.name, &centered(8.0).bold());
        surface.text(center, y + 9.5, &institution.document_title, &centered(6.5));
        surface.text(center, y + 13.0, &school_cycle(self.today), &centered(5.8));

        cursor.advance(HEADER_BAND_HEIGHT)
    }

    fn draw_folio_band<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        cursor: Cursor,
        record: &FormRecord,
    ) -> Cursor {
        let y = cursor.y();
        surface.fill_rect(0.0, y, PAGE_WIDTH, FOLIO_BAND_HEIGHT, palette::BAND_GREY);
        surface.fill_rect(SIDE_MARGIN, y, FOLIO_BLOCK_WIDTH, FOLIO_BAND_HEIGHT, palette::GREEN);

        surface.text(
            SIDE_MARGIN + 3.0,
            y + 5.5,
            &format!("FOLIO: {}", folio_text(record)),
            &TextStyle::new(7.5)
                .bold()
                .color(palette::WHITE)
                .max_width(FOLIO_BLOCK_WIDTH - 4.0),
        );

        let registered = record
            .created_at
            .map(|at| at.date_naive())
            .unwrap_or(self.today);
        surface.text(
            PAGE_WIDTH - SIDE_MARGIN - 2.0,
            y + 5.5,
            &format!("Fecha de registro: {}", long_date(registered)),
            &TextStyle::new(6.0)
                .color(palette::MUTED)
                .align(TextAlign::Right),
        );

        cursor.advance(FOLIO_BAND_HEIGHT + FOLIO_BAND_GAP)
    }

    fn draw_signatures<S: Surface + ?Sized>(&self, surface: &mut S, top: f64, record: &FormRecord) {
        let rule = LineStyle::solid(palette::MUTED, SIGNATURE_RULE_WIDTH);
        let caption = TextStyle::new(5.8)
            .color(palette::MUTED)
            .align(TextAlign::Center)
            .max_width(SIGNATURE_WIDTH);
        let name = caption.bold().color(palette::TEXT);

        let applicant = record.short_name();
        let blocks = [
            (SIDE_MARGIN, "Firma del Aspirante", applicant.as_str()),
            (
                SIDE_MARGIN + SIGNATURE_WIDTH + SIGNATURE_GAP,
                "Firma del Padre / Madre / Tutor",
                record.guardian_name.as_str(),
            ),
        ];
        for (x, title, signer) in blocks {
            let rule_y = top + SIGNATURE_RULE_OFFSET;
            surface.line(x, rule_y, x + SIGNATURE_WIDTH, rule_y, &rule);
            let mid = x + SIGNATURE_WIDTH / 2.0;
            surface.text(mid, top + SIGNATURE_CAPTION_OFFSET, title, &caption);
            if let Some(signer) = present(signer) {
                surface.text(mid, top + SIGNATURE_NAME_OFFSET, signer, &name);
            }
        }
    }

    fn draw_footer<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        top: f64,
        record: &FormRecord,
        label: &str,
    ) {
        surface.fill_rect(0.0, top, PAGE_WIDTH, FOOTER_HEIGHT, palette::GREEN);

        let institution = &self.config.institution;
        let parts: Vec<&str> = [label, institution.short_name.as_str(), institution.disclaimer.as_str()]
            .into_iter()
            .filter_map(present)
            .collect();
        surface.text(
            PAGE_WIDTH / 2.0,
            top + 3.0,
            &parts.join("  \u{b7}  "),
            &TextStyle::new(5.5)
                .color(palette::WHITE)
                .align(TextAlign::Center)
                .max_width(TABLE_WIDTH),
        );

        let small = TextStyle::new(5.0).color(palette::WHITE);
        surface.text(
            SIDE_MARGIN,
            top + 6.0,
            &format!("Folio: {}", folio_text(record)),
            &small.max_width(TABLE_WIDTH / 2.0),
        );
        surface.text(
            PAGE_WIDTH - SIDE_MARGIN,
            top + 6.0,
            &short_date(self.today),
            &small.align(TextAlign::Right),
        );
    }
}

fn folio_text(record: &FormRecord) -> &str {
    present(&record.folio).unwrap_or(PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FichaConfig;
    use crate::layout::CopyLabel;
    use crate::surface::{DisplayList, DrawCommand};
    use chrono::{DateTime, NaiveDate};

    fn engine() -> FichaEngine {
        FichaEngine::with_today(
            FichaConfig::default(),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        )
    }

    fn full_record() -> FormRecord {
        FormRecord {
            folio: "PRE-2025-0042".into(),
            given_name: "Mar\u{ed}a Fernanda".into(),
            paternal_surname: "Hern\u{e1}ndez".into(),
            maternal_surname: "Ruiz".into(),
            national_id: "HERM080214MMNRZR05".into(),
            sex: "Mujer".into(),
            birth_date: "2008-02-14".into(),
            marital_status: "Soltera".into(),
            phone: "4431234567".into(),
            email: "maria@example.com".into(),
            birthplace: "Morelia".into(),
            street_address: "Av. Madero 120".into(),
            neighborhood: "Centro".into(),
            municipality: "Morelia".into(),
            postal_code: "58000".into(),
            first_choice: "T\u{e9}cnico en Programaci\u{f3}n".into(),
            second_choice: Some("T\u{e9}cnico Agropecuario".into()),
            third_choice: Some("T\u{e9}cnico en Ofim\u{e1}tica".into()),
            school_type: "P\u{fa}blica".into(),
            school_name: "Secundaria T\u{e9}cnica 5".into(),
            school_municipality: "Morelia".into(),
            average: Some(9.2),
            guardian_name: "Rosa Ruiz".into(),
            guardian_relationship: "Madre".into(),
            guardian_national_id: "RUXR800101MMNZXS01".into(),
            guardian_occupation: "Comerciante".into(),
            guardian_education: "Preparatoria".into(),
            guardian_phone: "4437654321".into(),
            ..Default::default()
        }
    }

    fn draw(record: &FormRecord, region: LayoutRegion) -> (DisplayList, RegionLayout) {
        let mut list = DisplayList::new();
        let layout = engine().render_copy(&mut list, record, region);
        (list, layout)
    }

    #[test]
    fn test_copy_stays_inside_its_region() {
        for region in LayoutRegion::halves() {
            let (list, layout) = draw(&full_record(), region);
            assert!(layout.content_bottom() <= layout.signature_top);
            for c in list.commands() {
                assert!(
                    c.top() >= region.offset_y - 1e-9 && c.bottom() <= region.bottom() + 1e-9,
                    "{c:?} leaves region at {}",
                    region.offset_y
                );
            }
        }
    }

    #[test]
    fn test_copies_differ_only_by_offset_and_label() {
        let [top, bottom] = LayoutRegion::halves();
        let (a, _) = draw(&full_record(), top);
        let (b, _) = draw(&full_record(), bottom);
        assert_eq!(a.len(), b.len());
        let labels: Vec<_> = b.texts().filter(|t| t.contains("COPIA")).collect();
        assert!(!labels.is_empty());
        assert!(a.texts().all(|t| !t.contains("COPIA")));
    }

    #[test]
    fn test_folio_printed_twice_per_copy() {
        let (list, _) = draw(&full_record(), LayoutRegion::halves()[0]);
        let hits = list.texts().filter(|t| t.contains("PRE-2025-0042")).count();
        assert_eq!(hits, 2);
        assert!(list.texts().any(|t| t == "FOLIO: PRE-2025-0042"));
        assert!(list.texts().any(|t| t == "Folio: PRE-2025-0042"));
    }

    #[test]
    fn test_section_ends_are_monotonic() {
        let (_, layout) = draw(&full_record(), LayoutRegion::halves()[1]);
        assert_eq!(layout.section_ends.len(), 4);
        assert!(layout.section_ends.windows(2).all(|w| w[0] < w[1]));
        let expected = layout.region.offset_y + worst_case_content_bottom();
        assert!((layout.content_bottom() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_signature_block_is_anchored_to_bottom() {
        let region = LayoutRegion {
            offset_y: 0.0,
            height: HALF_HEIGHT,
            label: CopyLabel::Original,
        };
        let (list, layout) = draw(&FormRecord::default(), region);
        assert!((layout.footer_top - (HALF_HEIGHT - FOOTER_HEIGHT)).abs() < 1e-9);
        assert!((layout.signature_top - (HALF_HEIGHT - 21.0)).abs() < 1e-9);

        let rules: Vec<_> = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .collect();
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_signer_names() {
        let (list, _) = draw(&full_record(), LayoutRegion::halves()[0]);
        let texts: Vec<_> = list.texts().collect();
        assert!(texts.contains(&"Mar\u{ed}a Fernanda Hern\u{e1}ndez"));
        assert!(texts.contains(&"Rosa Ruiz"));
        assert!(texts.contains(&"Firma del Padre / Madre / Tutor"));
    }

    #[test]
    fn test_missing_signer_names_are_skipped() {
        let (list, _) = draw(&FormRecord::default(), LayoutRegion::halves()[0]);
        assert!(list.texts().all(|t| !t.trim().is_empty()));
    }

    #[test]
    fn test_registration_date_prefers_record() {
        let mut record = full_record();
        record.created_at = Some(DateTime::parse_from_rfc3339("2025-02-10T18:30:00-06:00").unwrap());
        let (list, _) = draw(&record, LayoutRegion::halves()[0]);
        assert!(list
            .texts()
            .any(|t| t == "Fecha de registro: 10 de febrero de 2025"));
        // The footer always carries the print date.
        assert!(list.texts().any(|t| t == "5/3/2025"));
    }

    #[test]
    fn test_registration_date_falls_back_to_today() {
        let (list, _) = draw(&full_record(), LayoutRegion::halves()[0]);
        assert!(list
            .texts()
            .any(|t| t == "Fecha de registro: 05 de marzo de 2025"));
    }

    #[test]
    fn test_footer_line() {
        let (list, _) = draw(&full_record(), LayoutRegion::halves()[1]);
        let expected = "COPIA  \u{b7}  CBTa 134  \u{b7}  No tiene validez sin sello institucional";
        assert!(list.texts().any(|t| t == expected));
    }

    #[test]
    fn test_footer_uses_configured_short_name() {
        let mut config = FichaConfig::default();
        config.institution.short_name = "CBTa 7".into();
        let engine = FichaEngine::with_today(config, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        let mut list = DisplayList::new();
        engine.render_copy(&mut list, &full_record(), LayoutRegion::halves()[0]);
        assert!(list
            .texts()
            .any(|t| t.starts_with("ORIGINAL  \u{b7}  CBTa 7  \u{b7}  ")));
    }

    #[test]
    fn test_missing_folio_prints_placeholder() {
        for folio in ["", "   "] {
            let record = FormRecord {
                folio: folio.into(),
                ..full_record()
            };
            let (list, _) = draw(&record, LayoutRegion::halves()[0]);
            let folios: Vec<_> = list
                .texts()
                .filter(|t| t.starts_with("FOLIO:") || t.starts_with("Folio:"))
                .collect();
            assert_eq!(folios, ["FOLIO: \u{2014}", "Folio: \u{2014}"]);
        }
    }

    #[test]
    fn test_header_texts() {
        let (list, _) = draw(&full_record(), LayoutRegion::halves()[0]);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(
            texts[0],
            "\u{2022}  FORMATO DE FICHA DE PRE-REGISTRO  \u{2014}  ORIGINAL  \u{2022}"
        );
        assert_eq!(&texts[1..3], &["CBTa", "134"]);
        assert!(texts.contains(&"Ciclo Escolar 2025 \u{2013} 2026"));
    }
}
