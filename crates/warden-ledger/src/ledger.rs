//! The ledger itself

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use warden_rules::Category;

use crate::event::BlockEvent;

/// Append-only log of blocked requests.
///
/// `record`/`clear`/`snapshot` serialize on the event lock so the sequence
/// order always equals detection order. `count` is lock-free off an index
/// maintained under that same lock.
pub struct BlockLedger {
    inner: Arc<Inner>,
}

struct Inner {
    events: Mutex<Vec<BlockEvent>>,
    count: AtomicUsize,
    next_seq: AtomicU64,
}

impl BlockLedger {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                events: Mutex::new(Vec::new()),
                count: AtomicUsize::new(0),
                next_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Stamp and append a blocked request.
    ///
    /// Every blocked request is a distinct event; duplicates from the same
    /// host are never merged. Returns the stamped event.
    pub fn record(&self, request_uri: String, category: Category) -> BlockEvent {
        let mut events = self.inner.events.lock();

        // Stamped under the lock so timestamp order equals insertion order
        let timestamp = self.inner.next_seq.fetch_add(1, Ordering::Relaxed);
        let event = BlockEvent {
            request_uri,
            category,
            timestamp,
        };

        events.push(event.clone());
        self.inner.count.store(events.len(), Ordering::Release);

        tracing::debug!(
            uri = %event.request_uri,
            category = %event.category,
            seq = event.timestamp,
            "Recorded blocked request"
        );

        event
    }

    /// Read-only copy of the ledger at call time, in detection order.
    pub fn snapshot(&self) -> Vec<BlockEvent> {
        self.inner.events.lock().clone()
    }

    /// Reset to empty (new top-level navigation). The sequence counter is
    /// not reset; timestamps stay strictly increasing across clears.
    pub fn clear(&self) {
        let mut events = self.inner.events.lock();
        events.clear();
        self.inner.count.store(0, Ordering::Release);

        tracing::debug!("Block ledger cleared");
    }

    /// Number of recorded events. Does not take the event lock.
    pub fn count(&self) -> usize {
        self.inner.count.load(Ordering::Acquire)
    }
}

impl Default for BlockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BlockLedger {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
