//! Animation-frame scheduling.
//!
//! Work deferred to the next paint is queued here and run by the host when
//! it renders a frame. [`FrameThrottle`] coalesces repeated requests so at
//! most one callback is pending per frame.

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use super::Page;

/// Callback run on the next animation frame
pub type FrameCallback = Box<dyn FnOnce(&mut Page)>;

/// Identifier returned by [`FrameQueue::request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(u64);

/// FIFO of callbacks waiting for the next frame
#[derive(Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<(FrameRequestId, FrameCallback)>,
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, callback: FrameCallback) -> FrameRequestId {
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.pending.push_back((id, callback));
        id
    }

    /// Drop a queued callback; returns whether it was still pending
    pub fn cancel(&mut self, id: FrameRequestId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != id);
        self.pending.len() != before
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every callback queued so far, leaving later requests for the
    /// following frame
    pub(crate) fn take_frame(&mut self) -> Vec<FrameCallback> {
        self.pending.drain(..).map(|(_, cb)| cb).collect()
    }
}

/// Pending-flag guard collapsing bursts of requests into one frame callback
#[derive(Debug, Clone, Default)]
pub struct FrameThrottle {
    ticking: Rc<Cell<bool>>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a callback is queued and has not run yet
    pub fn is_pending(&self) -> bool {
        self.ticking.get()
    }

    /// Queue `work` for the next frame unless a call is already pending.
    ///
    /// Returns `true` when the work was queued, `false` when it was folded
    /// into the pending call.
    pub fn schedule<F>(&self, page: &mut Page, work: F) -> bool
    where
        F: FnOnce(&mut Page) + 'static,
    {
        if self.ticking.get() {
            return false;
        }

        let ticking = Rc::clone(&self.ticking);
        page.request_animation_frame(move |page| {
            work(page);
            ticking.set(false);
        });
        self.ticking.set(true);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_queue_order_and_cancel() {
        let mut page = Page::new(Document::new());
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));

        for label in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            page.request_animation_frame(move |_| log.borrow_mut().push(label));
        }
        let frames = page.frames().len();
        assert_eq!(frames, 3);

        assert_eq!(page.run_animation_frame(), 3);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(page.run_animation_frame(), 0);

        let id = page.request_animation_frame(|_| panic!("cancelled frame ran"));
        assert!(page.cancel_animation_frame(id));
        assert!(!page.cancel_animation_frame(id));
        assert_eq!(page.run_animation_frame(), 0);
    }

    #[test]
    fn test_callbacks_queued_during_frame_wait() {
        let mut page = Page::new(Document::new());
        let ran = Rc::new(Cell::new(0));

        let outer = Rc::clone(&ran);
        page.request_animation_frame(move |page| {
            outer.set(outer.get() + 1);
            let inner = Rc::clone(&outer);
            page.request_animation_frame(move |_| inner.set(inner.get() + 10));
        });

        assert_eq!(page.run_animation_frame(), 1);
        assert_eq!(ran.get(), 1);
        assert_eq!(page.run_animation_frame(), 1);
        assert_eq!(ran.get(), 11);
    }

    #[test]
    fn test_throttle_coalesces() {
        let mut page = Page::new(Document::new());
        let throttle = FrameThrottle::new();
        let calls = Rc::new(Cell::new(0));

        for _ in 0..5 {
            let calls = Rc::clone(&calls);
            throttle.schedule(&mut page, move |_| calls.set(calls.get() + 1));
        }
        assert!(throttle.is_pending());
        assert_eq!(page.frames().len(), 1);

        page.run_animation_frame();
        assert_eq!(calls.get(), 1);
        assert!(!throttle.is_pending());

        let again = Rc::clone(&calls);
        assert!(throttle.schedule(&mut page, move |_| again.set(again.get() + 1)));
        page.run_animation_frame();
        assert_eq!(calls.get(), 2);
    }
}
