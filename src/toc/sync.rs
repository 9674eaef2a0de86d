//! Scroll synchronization.
//!
//! Tracks which heading the reader has reached and mirrors it onto the
//! TOC links, keeping the active link visible inside the panel.

use log::debug;

use crate::dom::NodeId;
use crate::page::{Page, ScrollToOptions};
use crate::toc::types::HeadingRecord;

/// Active-heading state for one initialized TOC
#[derive(Debug, Clone)]
pub struct ScrollSync {
    container: NodeId,
    records: Vec<HeadingRecord>,
    current_active: Option<usize>,
    scroll_offset: f64,
    active_class: String,
    passes: usize,
}

impl ScrollSync {
    pub fn new(container: NodeId, records: Vec<HeadingRecord>, scroll_offset: f64, active_class: &str) -> Self {
        Self {
            container,
            records,
            current_active: None,
            scroll_offset,
            active_class: active_class.to_string(),
            passes: 0,
        }
    }

    pub fn records(&self) -> &[HeadingRecord] {
        &self.records
    }

    pub fn current_active(&self) -> Option<&HeadingRecord> {
        self.current_active.map(|i| &self.records[i])
    }

    /// How many times [`update_active_heading`](Self::update_active_heading) ran
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Index of the last heading whose top is at or above the lookahead line
    pub fn find_active(&self, page: &Page) -> Option<usize> {
        let scroll_y = page.scroll_y();
        let scroll_position = scroll_y + self.scroll_offset;
        let doc = page.document();

        self.records
            .iter()
            .rposition(|record| doc.document_top(record.element, scroll_y) <= scroll_position)
    }

    /// Recompute the active heading and update link classes.
    ///
    /// When no heading has been reached yet the current state is kept.
    /// Returns `true` when the active heading changed.
    pub fn update_active_heading(&mut self, page: &mut Page) -> bool {
        self.passes += 1;

        let Some(active) = self.find_active(page) else {
            return false;
        };
        if self.current_active == Some(active) {
            return false;
        }

        let doc = page.document_mut();
        for record in &self.records {
            doc.remove_class(record.link, &self.active_class);
        }
        let record = &self.records[active];
        doc.add_class(record.link, &self.active_class);
        debug!("Active heading is now '{}'", record.id);

        self.current_active = Some(active);
        self.reveal_link(page, self.records[active].link);
        true
    }

    /// Smoothly center `link` in the panel if it is outside the panel's
    /// visible area
    fn reveal_link(&self, page: &mut Page, link: NodeId) {
        let scroll_y = page.scroll_y();
        let doc = page.document();
        let panel_rect = doc.bounding_client_rect(self.container, scroll_y);
        let link_rect = doc.bounding_client_rect(link, scroll_y);
        let scroll_top = doc.scroll_top(self.container);

        // Link position within the panel's scrollable content
        let link_top = link_rect.top - panel_rect.top + scroll_top;
        let visible_bottom = scroll_top + panel_rect.height;

        if link_top < scroll_top || link_top + link_rect.height > visible_bottom {
            let target = link_top - panel_rect.height / 2.0 + link_rect.height / 2.0;
            debug!("Scrolling TOC panel to {}", target);
            page.scroll_element_to(self.container, ScrollToOptions::smooth(target));
        }
    }
}
