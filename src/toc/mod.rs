//! Floating table of contents.
//!
//! [`install`] scans the page's headings, builds a nested list inside the
//! TOC panel and keeps the link of the heading in view highlighted while
//! the reader scrolls. Clicking a link scrolls smoothly to its heading.

pub mod extract;
pub mod navigation;
pub mod outline;
pub mod sync;
pub mod tree;
pub mod types;

pub use extract::{assign_heading_ids, collect_headings, find_content_root, heading_level};
pub use navigation::handle_click;
pub use outline::{build_outline, outline_to_json};
pub use sync::ScrollSync;
pub use tree::build_tree;
pub use types::{HeadingRecord, TocEntry, TocStatus};

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::config::{validate_config, TocConfig};
use crate::dom::{NodeId, Selector};
use crate::page::{FrameThrottle, Page, ReadyState};
use crate::utils::error::BoxResult;

#[derive(Debug)]
struct TocState {
    status: TocStatus,
    container: Option<NodeId>,
    list: Option<NodeId>,
    sync: Option<ScrollSync>,
    outline: Vec<TocEntry>,
}

impl Default for TocState {
    fn default() -> Self {
        Self {
            status: TocStatus::Pending,
            container: None,
            list: None,
            sync: None,
            outline: Vec::new(),
        }
    }
}

/// Handle to a TOC installed on a [`Page`]
#[derive(Debug, Clone)]
pub struct FloatingToc {
    state: Rc<RefCell<TocState>>,
}

impl FloatingToc {
    pub fn status(&self) -> TocStatus {
        self.state.borrow().status
    }

    /// The TOC panel element, once initialized
    pub fn container(&self) -> Option<NodeId> {
        self.state.borrow().container
    }

    /// The list holding generated entries, once initialized
    pub fn list(&self) -> Option<NodeId> {
        self.state.borrow().list
    }

    /// Scanned headings in document order
    pub fn records(&self) -> Vec<HeadingRecord> {
        self.state
            .borrow()
            .sync
            .as_ref()
            .map(|sync| sync.records().to_vec())
            .unwrap_or_default()
    }

    pub fn active_heading(&self) -> Option<HeadingRecord> {
        self.state
            .borrow()
            .sync
            .as_ref()
            .and_then(|sync| sync.current_active().cloned())
    }

    pub fn active_id(&self) -> Option<String> {
        self.active_heading().map(|record| record.id)
    }

    /// Number of active-heading recomputations so far
    pub fn sync_passes(&self) -> usize {
        self.state.borrow().sync.as_ref().map_or(0, ScrollSync::passes)
    }

    /// The generated structure as plain data
    pub fn outline(&self) -> Vec<TocEntry> {
        self.state.borrow().outline.clone()
    }

    pub fn outline_json(&self) -> BoxResult<String> {
        outline_to_json(&self.state.borrow().outline)
    }

    /// Recompute the active heading right away, outside the frame throttle
    pub fn refresh(&self, page: &mut Page) -> bool {
        match self.state.borrow_mut().sync.as_mut() {
            Some(sync) => sync.update_active_heading(page),
            None => false,
        }
    }
}

/// Install the floating TOC on `page`.
///
/// While the page is still loading, initialization waits for
/// `DOMContentLoaded`; otherwise it runs immediately. A page without the
/// panel or list ends up [`TocStatus::Disabled`], one without headings
/// [`TocStatus::Hidden`]. Only an invalid configuration is an error.
pub fn install(page: &mut Page, config: TocConfig) -> BoxResult<FloatingToc> {
    validate_config(&config)?;
    let selectors = config
        .content_selectors
        .iter()
        .map(|s| Selector::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let toc = FloatingToc {
        state: Rc::new(RefCell::new(TocState::default())),
    };

    if page.ready_state() == ReadyState::Loading {
        debug!("Document still loading, waiting for DOMContentLoaded");
        let state = Rc::clone(&toc.state);
        page.add_dom_content_loaded_listener(move |page| {
            initialize(page, &state, &config, &selectors);
        });
    } else {
        initialize(page, &toc.state, &config, &selectors);
    }

    Ok(toc)
}

fn initialize(page: &mut Page, state: &Rc<RefCell<TocState>>, config: &TocConfig, selectors: &[Selector]) {
    let doc = page.document();
    let container = doc.get_element_by_id(&config.container_id);
    let list = doc.get_element_by_id(&config.list_id);
    let (Some(container), Some(list)) = (container, list) else {
        info!(
            "No #{} panel with #{} list on this page, table of contents disabled",
            config.container_id, config.list_id
        );
        state.borrow_mut().status = TocStatus::Disabled;
        return;
    };

    // Extraction
    let root = find_content_root(doc, selectors);
    let headings = collect_headings(doc, root, config.min_level, config.max_level);
    if headings.is_empty() {
        info!("No headings found, hiding table of contents");
        page.document_mut().add_class(container, &config.classes.hidden);
        let mut state = state.borrow_mut();
        state.status = TocStatus::Hidden;
        state.container = Some(container);
        state.list = Some(list);
        return;
    }

    // Tree construction
    let doc = page.document_mut();
    let ids = assign_heading_ids(doc, &headings, &config.id_prefix);
    let records = build_tree(doc, list, &headings, &ids, &config.classes);
    let outline = build_outline(doc, list, &records);
    info!("Table of contents built with {} entries", records.len());

    {
        let mut state = state.borrow_mut();
        state.status = TocStatus::Active;
        state.container = Some(container);
        state.list = Some(list);
        state.outline = outline;
        state.sync = Some(ScrollSync::new(
            container,
            records,
            config.scroll_offset,
            &config.classes.active,
        ));
    }

    // Scroll synchronization, at most one pass per animation frame
    let throttle = FrameThrottle::new();
    let scroll_state = Rc::clone(state);
    page.add_scroll_listener(move |page| {
        let frame_state = Rc::clone(&scroll_state);
        throttle.schedule(page, move |page| {
            if let Some(sync) = frame_state.borrow_mut().sync.as_mut() {
                sync.update_active_heading(page);
            }
        });
    });

    // Reflect the initial scroll position
    if let Some(sync) = state.borrow_mut().sync.as_mut() {
        sync.update_active_heading(page);
    }

    let click_offset = config.click_offset;
    page.add_click_listener(list, move |page, event| {
        handle_click(page, event, click_offset);
    });
}
