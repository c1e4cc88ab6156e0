use serde::{Deserialize, Serialize};

use crate::lookup::TermLookup;
use crate::storage::SessionStore;

use super::engine::SelectionEngine;
use super::view::ViewportClass;

/// Trailing-edge debouncer for viewport-class changes.
///
/// Time is supplied by the caller as monotonic milliseconds, so the behavior
/// is exact under test and host-agnostic in production. Only the latest noted
/// class survives; each new note restarts the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(ViewportClass, u64)>,
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Records a viewport-class observation at `now_ms`.
    pub fn note(&mut self, class: ViewportClass, now_ms: u64) {
        self.pending = Some((class, now_ms.saturating_add(self.delay_ms)));
    }

    /// Takes the pending class once its window has elapsed.
    pub fn take_due(&mut self, now_ms: u64) -> Option<ViewportClass> {
        let (class, deadline) = self.pending?;
        if now_ms < deadline {
            return None;
        }
        self.pending = None;
        Some(class)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<L: TermLookup, S: SessionStore> SelectionEngine<L, S> {
    /// Notes a raw resize observation; nothing is applied until the debounce
    /// window elapses.
    pub fn note_resize(&mut self, class: ViewportClass, now_ms: u64) {
        self.resize.note(class, now_ms);
    }

    /// Applies a debounced viewport-class change if one is due.
    ///
    /// Resize reconciliation is layout-only: no lookups run, and committed
    /// and working selections are untouched.
    pub fn poll_resize(&mut self, now_ms: u64) -> bool {
        let Some(class) = self.resize.take_due(now_ms) else {
            return false;
        };
        self.set_viewport_class(class);
        true
    }
}
