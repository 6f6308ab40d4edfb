//! Reentrancy guard held while a track mixes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared mix-in-progress counter for a track.
///
/// The counter is a single-writer assertion: mutating calls made while it
/// is held are rejected, never queued or blocked.
#[derive(Debug, Clone, Default)]
pub struct MixLock {
    depth: Arc<AtomicUsize>,
}

impl MixLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.depth.load(Ordering::Relaxed) > 0
    }

    /// Mark a mix as in flight until the returned guard drops.
    pub fn acquire(&self) -> MixGuard {
        MixGuard::new(self.depth.clone())
    }
}

/// Guard that keeps the mix counter raised for its lifetime.
pub struct MixGuard {
    depth: Arc<AtomicUsize>,
}

impl MixGuard {
    fn new(depth: Arc<AtomicUsize>) -> Self {
        depth.fetch_add(1, Ordering::Relaxed);
        Self { depth }
    }
}

impl Drop for MixGuard {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::Relaxed);
    }
}
