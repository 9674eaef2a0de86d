use crate::dom::NodeId;

/// Document loading progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump straight to the target
    #[default]
    Instant,
    /// Animate; the host finishes the animation later
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollToOptions {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollToOptions {
    pub fn instant(top: f64) -> Self {
        Self {
            top,
            behavior: ScrollBehavior::Instant,
        }
    }

    pub fn smooth(top: f64) -> Self {
        Self {
            top,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

/// What a scroll request moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Window,
    Element(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub target: ScrollTarget,
    pub options: ScrollToOptions,
}

/// A click travelling from its target up to the root
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    /// Element that was clicked
    pub target: NodeId,
    /// Element whose listener is running
    pub current_target: NodeId,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    /// Suppress the default action (following the link)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
