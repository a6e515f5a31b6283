//! Document geometry.
//!
//! The page is laid out as one fixed column of rows; hidden sections
//! keep their space so revealing never reflows the document. The view
//! renders exactly these row counts and the visibility watcher consumes
//! the extents, so both sides agree by construction.

use super::{Page, Section, SectionId, SectionKind};

/// Rows per skill item (name line + bar line).
pub const SKILL_ROWS: usize = 2;
/// Rows per card (title, body, meta, trailing gap).
pub const CARD_ROWS: usize = 4;
/// Section title + blank line under it.
pub const SECTION_HEADER_ROWS: usize = 2;
/// Blank line closing a section.
pub const SECTION_FOOTER_ROWS: usize = 1;
/// Fixed hero block height.
pub const HERO_ROWS: usize = 6;
/// Contact body: blurb, three fields, submit hint, status line.
pub const CONTACT_BODY_ROWS: usize = 6;

/// A contiguous run of document rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub top: usize,
    pub height: usize,
}

impl RowSpan {
    pub fn new(top: usize, height: usize) -> Self {
        Self { top, height }
    }

    /// First row past the span.
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    /// Number of rows shared with `other`.
    pub fn overlap(&self, other: RowSpan) -> usize {
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());
        bottom.saturating_sub(top)
    }
}

/// Row height of one section, a function of content only (never of
/// reveal state).
pub fn section_height(section: &Section) -> usize {
    match section.kind {
        SectionKind::Hero => HERO_ROWS,
        SectionKind::About => {
            SECTION_HEADER_ROWS + section.paragraphs.len() + SECTION_FOOTER_ROWS
        }
        SectionKind::Skills => {
            SECTION_HEADER_ROWS + section.skills.len() * SKILL_ROWS + SECTION_FOOTER_ROWS
        }
        SectionKind::Projects | SectionKind::Experience => {
            SECTION_HEADER_ROWS + section.cards.len() * CARD_ROWS + SECTION_FOOTER_ROWS
        }
        SectionKind::Contact => SECTION_HEADER_ROWS + CONTACT_BODY_ROWS + SECTION_FOOTER_ROWS,
    }
}

/// Extents of every section, computed once (the document is static).
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    extents: Vec<RowSpan>,
    pub total_rows: usize,
}

impl DocumentLayout {
    pub fn of(page: &Page) -> Self {
        let mut extents = Vec::with_capacity(page.sections.len());
        let mut top = 0usize;
        for section in &page.sections {
            let height = section_height(section);
            extents.push(RowSpan::new(top, height));
            top += height;
        }
        DocumentLayout {
            extents,
            total_rows: top,
        }
    }

    pub fn extent(&self, id: SectionId) -> Option<RowSpan> {
        self.extents.get(id).copied()
    }

    /// Fraction of the section's area inside the viewport, 0.0 to 1.0.
    pub fn visible_fraction(&self, id: SectionId, viewport: RowSpan) -> f64 {
        let Some(extent) = self.extent(id) else {
            return 0.0;
        };
        if extent.height == 0 {
            return 0.0;
        }
        extent.overlap(viewport) as f64 / extent.height as f64
    }

    /// Section occupying the given document row, for the status bar.
    pub fn section_at(&self, row: usize) -> Option<SectionId> {
        self.extents
            .iter()
            .position(|e| row >= e.top && row < e.bottom())
    }
}
