//! Row geometry shared by the widgets and the event loop
//!
//! Landing sections are stacked in one scrolling document; the marketplace is
//! a grid of fixed-height cards. Both are computed from the terminal size
//! alone so the loop can evaluate triggers before drawing.

use nftverse_core::landing::{content, SectionId, Viewport};

pub const STATUS_BAR_HEIGHT: u16 = 1;

pub const HERO_MIN_HEIGHT: u16 = 14;
pub const STATS_HEIGHT: u16 = 7;
pub const FEATURED_HEIGHT: u16 = 13;
pub const BENEFITS_HEADING_HEIGHT: u16 = 3;
pub const BENEFIT_CARD_HEIGHT: u16 = 7;

pub const MARKET_HEADER_HEIGHT: u16 = 5;
pub const MARKET_FOOTER_HEIGHT: u16 = 1;
pub const CARD_HEIGHT: u16 = 6;
pub const CARD_MIN_WIDTH: u16 = 28;
pub const MAX_COLUMNS: usize = 4;

/// Landing document geometry for a viewport of `width` x `height` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingLayout {
    pub width: u16,
    /// Visible rows (status bar excluded)
    pub height: u16,
    pub scroll: u16,
}

impl LandingLayout {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            scroll: 0,
        }
    }

    pub fn with_scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll.min(self.max_scroll());
        self
    }

    /// The hero fills the first screen
    pub fn hero_height(&self) -> u16 {
        self.height.max(HERO_MIN_HEIGHT)
    }

    pub fn benefit_columns(&self) -> u16 {
        match self.width {
            w if w >= 100 => 4,
            w if w >= 56 => 2,
            _ => 1,
        }
    }

    fn benefit_rows(&self) -> u16 {
        let count = content::BENEFITS.len() as u16;
        let columns = self.benefit_columns();
        (count + columns - 1) / columns
    }

    /// Offset of a section's top edge from the top of the document
    pub fn section_offset(&self, section: SectionId) -> Option<u16> {
        let stats = self.hero_height();
        let featured = stats + STATS_HEIGHT;
        let heading = featured + FEATURED_HEIGHT;
        let cards = heading + BENEFITS_HEADING_HEIGHT;
        match section {
            SectionId::Hero => Some(0),
            SectionId::Stats => Some(stats),
            SectionId::Featured => Some(featured),
            SectionId::BenefitsHeading => Some(heading),
            SectionId::BenefitCard(n) if n < content::BENEFITS.len() => {
                let row = n as u16 / self.benefit_columns();
                Some(cards + row * BENEFIT_CARD_HEIGHT)
            }
            SectionId::BenefitCard(_) => None,
        }
    }

    pub fn section_height(&self, section: SectionId) -> u16 {
        match section {
            SectionId::Hero => self.hero_height(),
            SectionId::Stats => STATS_HEIGHT,
            SectionId::Featured => FEATURED_HEIGHT,
            SectionId::BenefitsHeading => BENEFITS_HEADING_HEIGHT,
            SectionId::BenefitCard(_) => BENEFIT_CARD_HEIGHT,
        }
    }

    pub fn document_height(&self) -> u16 {
        self.hero_height()
            + STATS_HEIGHT
            + FEATURED_HEIGHT
            + BENEFITS_HEADING_HEIGHT
            + self.benefit_rows() * BENEFIT_CARD_HEIGHT
            + 1
    }

    pub fn max_scroll(&self) -> u16 {
        self.document_height().saturating_sub(self.height)
    }
}

impl Viewport for LandingLayout {
    fn height(&self) -> i32 {
        i32::from(self.height)
    }

    fn top_of(&self, section: SectionId) -> Option<i32> {
        self.section_offset(section)
            .map(|offset| i32::from(offset) - i32::from(self.scroll))
    }
}

/// Marketplace grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub columns: usize,
    /// Whole card rows that fit on screen
    pub visible_rows: usize,
}

impl GridMetrics {
    /// Metrics for a terminal of `width` x `height` (status bar included)
    pub fn for_terminal(width: u16, height: u16) -> Self {
        let columns = usize::from(width / CARD_MIN_WIDTH).clamp(1, MAX_COLUMNS);
        let grid_height = height
            .saturating_sub(STATUS_BAR_HEIGHT)
            .saturating_sub(MARKET_HEADER_HEIGHT)
            .saturating_sub(MARKET_FOOTER_HEIGHT);
        let visible_rows = usize::from(grid_height / CARD_HEIGHT).max(1);
        Self {
            columns,
            visible_rows,
        }
    }

    /// Rows needed for `items` cards
    pub fn rows_for(&self, items: usize) -> usize {
        (items + self.columns - 1) / self.columns
    }

    /// Whether the end-of-list sentinel sits within `prefetch_rows` of the
    /// screen when the grid is scrolled to `first_row`
    pub fn sentinel_visible(&self, items: usize, first_row: usize, prefetch_rows: usize) -> bool {
        first_row + self.visible_rows + prefetch_rows >= self.rows_for(items)
    }
}
