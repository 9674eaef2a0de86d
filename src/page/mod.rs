//! The browser window around a [`Document`].
//!
//! A [`Page`] is the single-threaded event loop the TOC runs in: it owns
//! the document, the window scroll offset, registered listeners and the
//! animation-frame queue. The host drives it by dispatching events and
//! running frames; nothing here runs on its own.

pub mod events;
pub mod frames;

pub use events::{ClickEvent, ReadyState, ScrollBehavior, ScrollRequest, ScrollTarget, ScrollToOptions};
pub use frames::{FrameCallback, FrameQueue, FrameRequestId, FrameThrottle};

use std::rc::Rc;

use log::debug;

use crate::dom::{Document, NodeId};

/// Window scroll listener
pub type ScrollListener = Rc<dyn Fn(&mut Page)>;

/// Click listener registered on an element
pub type ClickListener = Rc<dyn Fn(&mut Page, &mut ClickEvent)>;

/// One-shot `DOMContentLoaded` listener
pub type ReadyListener = Box<dyn FnOnce(&mut Page)>;

/// Most recent scroll requests kept by [`Page::scroll_history`]
const SCROLL_HISTORY_LIMIT: usize = 256;

pub struct Page {
    document: Document,
    scroll_y: f64,
    ready_state: ReadyState,
    frames: FrameQueue,
    scroll_listeners: Vec<ScrollListener>,
    click_listeners: Vec<(NodeId, ClickListener)>,
    ready_listeners: Vec<ReadyListener>,
    animations: Vec<ScrollRequest>,
    scroll_history: Vec<ScrollRequest>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("scroll_y", &self.scroll_y)
            .field("ready_state", &self.ready_state)
            .field("frames", &self.frames)
            .field("scroll_listeners", &self.scroll_listeners.len())
            .field("click_listeners", &self.click_listeners.len())
            .field("animations", &self.animations)
            .finish()
    }
}

impl Page {
    /// A fully loaded page
    pub fn new(document: Document) -> Self {
        Self {
            document,
            scroll_y: 0.0,
            ready_state: ReadyState::Complete,
            frames: FrameQueue::new(),
            scroll_listeners: Vec::new(),
            click_listeners: Vec::new(),
            ready_listeners: Vec::new(),
            animations: Vec::new(),
            scroll_history: Vec::new(),
        }
    }

    /// A page whose document is still being parsed
    pub fn loading(document: Document) -> Self {
        Self {
            ready_state: ReadyState::Loading,
            ..Self::new(document)
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Vertical window scroll offset
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Register a listener fired once when parsing finishes
    pub fn add_dom_content_loaded_listener<F>(&mut self, listener: F)
    where
        F: FnOnce(&mut Page) + 'static,
    {
        self.ready_listeners.push(Box::new(listener));
    }

    /// Mark parsing as finished and fire `DOMContentLoaded` listeners.
    ///
    /// Has no effect once the page is past `Loading`.
    pub fn finish_parsing(&mut self) {
        if self.ready_state != ReadyState::Loading {
            return;
        }
        self.ready_state = ReadyState::Interactive;
        debug!("DOMContentLoaded: {} listener(s)", self.ready_listeners.len());
        for listener in std::mem::take(&mut self.ready_listeners) {
            listener(self);
        }
    }

    /// Mark every subresource as loaded
    pub fn finish_loading(&mut self) {
        self.finish_parsing();
        self.ready_state = ReadyState::Complete;
    }

    pub fn add_scroll_listener<F>(&mut self, listener: F)
    where
        F: Fn(&mut Page) + 'static,
    {
        self.scroll_listeners.push(Rc::new(listener));
    }

    /// Register a click listener on `node`; it sees clicks on `node` and
    /// on any of its descendants
    pub fn add_click_listener<F>(&mut self, node: NodeId, listener: F)
    where
        F: Fn(&mut Page, &mut ClickEvent) + 'static,
    {
        self.click_listeners.push((node, Rc::new(listener)));
    }

    /// Fire window scroll listeners
    pub fn dispatch_scroll(&mut self) {
        let listeners = self.scroll_listeners.clone();
        for listener in listeners {
            listener(self);
        }
    }

    /// Deliver a click to `target`, bubbling to the root.
    ///
    /// Returns `true` when a listener prevented the default action.
    pub fn dispatch_click(&mut self, target: NodeId) -> bool {
        let mut event = ClickEvent::new(target);
        let path: Vec<NodeId> = std::iter::once(target)
            .chain(self.document.ancestors(target))
            .collect();

        for node in path {
            let listeners: Vec<ClickListener> = self
                .click_listeners
                .iter()
                .filter(|(registered, _)| *registered == node)
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            for listener in listeners {
                event.current_target = node;
                listener(self, &mut event);
            }
        }

        event.default_prevented()
    }

    /// Scroll the window
    pub fn scroll_to(&mut self, options: ScrollToOptions) {
        self.request_scroll(ScrollTarget::Window, options);
    }

    /// Scroll an element's own content
    pub fn scroll_element_to(&mut self, node: NodeId, options: ScrollToOptions) {
        self.request_scroll(ScrollTarget::Element(node), options);
    }

    fn request_scroll(&mut self, target: ScrollTarget, options: ScrollToOptions) {
        let request = ScrollRequest { target, options };
        if self.scroll_history.len() == SCROLL_HISTORY_LIMIT {
            self.scroll_history.remove(0);
        }
        self.scroll_history.push(request);
        self.animations.retain(|pending| pending.target != target);

        match options.behavior {
            ScrollBehavior::Smooth => self.animations.push(request),
            ScrollBehavior::Instant => self.apply_scroll(target, options.top),
        }
    }

    fn apply_scroll(&mut self, target: ScrollTarget, top: f64) {
        match target {
            ScrollTarget::Window => {
                let top = top.max(0.0);
                if top != self.scroll_y {
                    self.scroll_y = top;
                    self.dispatch_scroll();
                }
            }
            ScrollTarget::Element(node) => self.document.set_scroll_top(node, top),
        }
    }

    /// Smooth scrolls requested but not finished yet
    pub fn pending_scroll_animations(&self) -> &[ScrollRequest] {
        &self.animations
    }

    /// Finish every running smooth scroll at its target
    pub fn complete_scroll_animations(&mut self) {
        for request in std::mem::take(&mut self.animations) {
            self.apply_scroll(request.target, request.options.top);
        }
    }

    /// The most recent scroll requests, oldest first
    pub fn scroll_history(&self) -> &[ScrollRequest] {
        &self.scroll_history
    }

    pub fn request_animation_frame<F>(&mut self, callback: F) -> FrameRequestId
    where
        F: FnOnce(&mut Page) + 'static,
    {
        self.frames.request(Box::new(callback))
    }

    pub fn cancel_animation_frame(&mut self, id: FrameRequestId) -> bool {
        self.frames.cancel(id)
    }

    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

    /// Render one frame: run the callbacks queued before it started.
    /// Returns how many ran.
    pub fn run_animation_frame(&mut self) -> usize {
        let callbacks = self.frames.take_frame();
        let count = callbacks.len();
        for callback in callbacks {
            callback(self);
        }
        count
    }
}
