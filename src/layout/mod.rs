//! # Fixed-Page Layout Engine
//!
//! A ficha is not flowed. Every page is a Letter sheet split into two equal
//! regions, and each region receives one complete copy of the form:
//!
//! ```text
//! ┌──────────────────────────────┐  y = 0
//! │ caption · header · folio     │
//! │ 4 sections (variable rows)   │  ORIGINAL
//! │ signatures · footer          │
//! ├ ─ ─ ─ ─ ─ cut here ─ ─ ─ ─ ─ ┤  y = HALF_HEIGHT
//! │ caption · header · folio     │
//! │ 4 sections (variable rows)   │  COPIA
//! │ signatures · footer          │
//! └──────────────────────────────┘  y = PAGE_HEIGHT
//! ```
//!
//! The bands above the sections grow downwards from the region top; the
//! signatures and footer are anchored to the region bottom. Only section row
//! counts depend on the record, and [`geometry::worst_case_content_bottom`]
//! bounds them, so a copy can never overflow its half of the page.
//!
//! Layout is a pure function of (record, configuration, current date). It
//! draws into any [`Surface`]; [`FichaEngine::render_batch`] records into
//! [`DisplayList`]s that the PDF writer later replays.

pub mod geometry;
pub mod page;
pub mod region;
pub mod section;
pub mod table;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::FichaConfig;
use crate::error::FichaError;
use crate::model::{FormRecord, Metadata};
use crate::pdf::PdfWriter;
use crate::surface::{DisplayList, DrawCommand, Surface};

pub use page::PageLayout;
pub use region::RegionLayout;

/// The vertical write position while composing one region.
///
/// A plain value: every drawing step takes a cursor and returns the next
/// one, so two regions never share position state.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Cursor {
    y: f64,
}

impl Cursor {
    pub fn at(y: f64) -> Self {
        Self { y }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn advance(self, dy: f64) -> Self {
        Self { y: self.y + dy }
    }
}

/// Which of the two copies a region holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyLabel {
    Original,
    Copy,
}

impl CopyLabel {
    pub fn text<'a>(&self, config: &'a FichaConfig) -> &'a str {
        match self {
            CopyLabel::Original => &config.labels.original,
            CopyLabel::Copy => &config.labels.copy,
        }
    }
}

/// Where one copy is drawn: a horizontal strip of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRegion {
    pub offset_y: f64,
    pub height: f64,
    pub label: CopyLabel,
}

impl LayoutRegion {
    /// The two regions of a physical page, top half first.
    pub fn halves() -> [LayoutRegion; 2] {
        let half = geometry::HALF_HEIGHT;
        [
            LayoutRegion {
                offset_y: 0.0,
                height: half,
                label: CopyLabel::Original,
            },
            LayoutRegion {
                offset_y: half,
                height: half,
                label: CopyLabel::Copy,
            },
        ]
    }

    pub fn bottom(&self) -> f64 {
        self.offset_y + self.height
    }

    /// Whether `y` lies within this region (inclusive).
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.offset_y - 1e-9 && y <= self.bottom() + 1e-9
    }
}

/// One physical page, laid out and ready for a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl LayoutPage {
    pub fn blank() -> Self {
        Self {
            width: geometry::PAGE_WIDTH,
            height: geometry::PAGE_HEIGHT,
            commands: Vec::new(),
        }
    }

    fn from_display_list(list: DisplayList) -> Self {
        Self {
            commands: list.into_commands(),
            ..Self::blank()
        }
    }

    /// All text runs on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(DrawCommand::as_text)
    }

    /// Replay the page against a backend surface.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            command.draw_on(surface);
        }
    }
}

/// A laid-out multi-page document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub pages: Vec<LayoutPage>,
    pub metadata: Metadata,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize to PDF bytes. Either the whole document is produced or
    /// nothing is.
    pub fn to_pdf(&self) -> Result<Vec<u8>, FichaError> {
        PdfWriter::new().write(&self.pages, &self.metadata)
    }
}

/// Composes fichas. Holds the branding text and the date printed as
/// "today"; both are fixed for the engine's lifetime, so the same record
/// always lays out identically.
#[derive(Debug, Clone)]
pub struct FichaEngine {
    config: FichaConfig,
    today: NaiveDate,
}

impl Default for FichaEngine {
    fn default() -> Self {
        Self::new(FichaConfig::default())
    }
}

impl FichaEngine {
    /// An engine whose "today" is the local date at construction.
    pub fn new(config: FichaConfig) -> Self {
        Self::with_today(config, Local::now().date_naive())
    }

    /// An engine with a pinned "today", for reproducible output.
    pub fn with_today(config: FichaConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    pub fn config(&self) -> &FichaConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Lay out one record on its own page.
    pub fn layout_page(&self, record: &FormRecord) -> LayoutPage {
        let mut list = DisplayList::new();
        self.render_page(&mut list, record);
        LayoutPage::from_display_list(list)
    }

    /// One page per record, in input order. Records are never merged or
    /// deduplicated, even when folios repeat. An empty batch yields a
    /// single blank page.
    pub fn render_batch(&self, records: &[FormRecord]) -> Document {
        let mut pages: Vec<LayoutPage> = Vec::with_capacity(records.len().max(1));
        for (index, record) in records.iter().enumerate() {
            debug!(page = index + 1, folio = %record.folio, "laying out page");
            pages.push(self.layout_page(record));
        }
        if pages.is_empty() {
            pages.push(LayoutPage::blank());
        }
        info!(records = records.len(), pages = pages.len(), "batch laid out");

        Document {
            pages,
            metadata: self.config.metadata.clone(),
        }
    }

    /// Lay out and serialize a single record.
    pub fn render_pdf(&self, record: &FormRecord) -> Result<Vec<u8>, FichaError> {
        self.render_batch(std::slice::from_ref(record)).to_pdf()
    }

    /// Lay out and serialize a batch of records.
    pub fn render_batch_pdf(&self, records: &[FormRecord]) -> Result<Vec<u8>, FichaError> {
        self.render_batch(records).to_pdf()
    }
}
