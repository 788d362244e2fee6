use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A single-shot latch that can be fired by exactly one caller
///
/// Both the natural completion path and the deadline path try to fire the
/// latch before emitting a snapshot; only the winner emits. Clones share the
/// same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CompletionLatch {
    fired: Arc<AtomicBool>,
}

impl CompletionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to fire the latch
    ///
    /// Returns `true` for the one caller that flipped it, `false` for everyone else.
    pub fn try_fire(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Returns whether the latch has been fired
    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}
