//! Guard against overlapping exports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "export in flight" flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct ExportLock {
    busy: Arc<AtomicBool>,
}

impl ExportLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the lock, or `None` if another export holds it.
    pub fn try_acquire(&self) -> Option<ExportGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| ExportGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the lock on drop.
#[derive(Debug)]
pub struct ExportGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
