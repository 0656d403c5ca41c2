//! Browsing session coordinator

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use warden_classify::Decision;
use warden_ledger::{BlockEvent, BlockLedger};
use warden_rules::RuleSet;

use crate::error::SessionError;
use crate::state::SessionState;
use crate::Result;

const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Operations applied to the ledger in queue order.
enum LedgerOp {
    Record {
        request_uri: String,
        category: warden_rules::Category,
    },
    Clear,
    /// Barrier: acknowledged once every earlier op has been applied
    Flush(Sender<()>),
}

/// One browsing context, from attach to teardown.
///
/// Interception threads call `handle_request` concurrently; the verdict is
/// computed synchronously while ledger writes flow through a bounded queue
/// drained by a worker thread the session owns. Closing disconnects the
/// queue and joins the worker, so every accepted op lands before the
/// ledger is released.
pub struct BrowsingSession {
    id: String,
    created_at: DateTime<Utc>,
    state: Mutex<SessionState>,
    rules: RwLock<Option<Arc<RuleSet>>>,
    ledger: BlockLedger,
    protection_enabled: AtomicBool,
    queue_capacity: usize,
    tx: Mutex<Option<Sender<LedgerOp>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl BrowsingSession {
    pub fn new() -> Self {
        Self::with_queue_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_queue_capacity(queue_capacity: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            state: Mutex::new(SessionState::Uninitialized),
            rules: RwLock::new(None),
            ledger: BlockLedger::new(),
            protection_enabled: AtomicBool::new(true),
            queue_capacity: queue_capacity.max(1),
            tx: Mutex::new(None),
            worker: Mutex::new(None),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Attach a rule set and start accepting requests.
    pub fn attach(&self, rules: Arc<RuleSet>) -> Result<()> {
        let mut state = self.state.lock();
        match *state {
            SessionState::Closed => return Err(SessionError::Closed),
            SessionState::Active => return Err(SessionError::AlreadyAttached),
            SessionState::Uninitialized => {}
        }

        let (tx, rx) = crossbeam_channel::bounded(self.queue_capacity);
        let ledger = self.ledger.clone();
        let worker = std::thread::spawn(move || ledger_worker(rx, ledger));

        let rule_count = rules.len();
        *self.rules.write() = Some(rules);
        *self.tx.lock() = Some(tx);
        *self.worker.lock() = Some(worker);
        *state = SessionState::Active;

        tracing::info!(
            session_id = %self.id,
            rule_count,
            "Session attached"
        );

        Ok(())
    }

    /// Request-interception hook: classify and return the verdict.
    ///
    /// Unparseable URIs fail open: the request is allowed, the error goes
    /// to the log, and the pipeline never stalls on it.
    pub fn handle_request(&self, request_uri: &str) -> Result<Decision> {
        self.ensure_active()?;

        // Rules are only absent mid-close; report that as closed
        let rules = self.rules.read().clone().ok_or(SessionError::Closed)?;
        let enabled = self.protection_enabled.load(Ordering::Relaxed);

        let decision = match warden_classify::classify(request_uri, &rules, enabled) {
            Ok(decision) => decision,
            Err(error) => {
                tracing::warn!(
                    session_id = %self.id,
                    uri = %request_uri,
                    %error,
                    "Unparseable request URI, allowing"
                );
                return Ok(Decision::allow());
            }
        };

        if decision.block {
            self.send(LedgerOp::Record {
                request_uri: request_uri.to_string(),
                category: decision.category,
            })?;
        }

        Ok(decision)
    }

    /// Top-level navigation committed: reset the ledger.
    ///
    /// Queued as an op so records already in flight land before the reset.
    pub fn commit_navigation(&self) -> Result<()> {
        self.ensure_active()?;
        self.send(LedgerOp::Clear)?;

        tracing::debug!(session_id = %self.id, "Navigation committed, ledger reset queued");
        Ok(())
    }

    /// Explicit counter reset from the host UI.
    pub fn reset(&self) -> Result<()> {
        self.ensure_active()?;
        self.send(LedgerOp::Clear)
    }

    /// Barrier: returns once every op enqueued so far has been applied.
    pub fn flush(&self) -> Result<()> {
        self.ensure_active()?;

        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        self.send(LedgerOp::Flush(ack_tx))?;
        let _ = ack_rx.recv();
        Ok(())
    }

    /// Number of blocked requests since the last reset.
    ///
    /// Flushes first so the host always reads its own verdicts.
    pub fn blocked_count(&self) -> Result<usize> {
        self.flush()?;
        Ok(self.ledger.count())
    }

    /// Blocked events in detection order, flushed like `blocked_count`.
    pub fn blocked_events(&self) -> Result<Vec<BlockEvent>> {
        self.flush()?;
        Ok(self.ledger.snapshot())
    }

    pub fn tracking_protection_enabled(&self) -> bool {
        self.protection_enabled.load(Ordering::Relaxed)
    }

    pub fn set_tracking_protection(&self, enabled: bool) {
        self.protection_enabled.store(enabled, Ordering::Relaxed);
        tracing::info!(session_id = %self.id, enabled, "Tracking protection toggled");
    }

    /// Tear the session down.
    ///
    /// Disconnects the queue, waits for the worker to drain every accepted
    /// op, then releases the rule set. The ledger is discarded with the
    /// session; nothing is flushed anywhere.
    pub fn close(&self) -> Result<()> {
        {
            let mut state = self.state.lock();
            if !state.can_transition_to(SessionState::Closed) {
                return Err(SessionError::Closed);
            }
            *state = SessionState::Closed;
        }

        // Drop the sender; the worker drains the queue then exits
        drop(self.tx.lock().take());
        if let Some(worker) = self.worker.lock().take() {
            let _ = worker.join();
        }

        *self.rules.write() = None;

        tracing::info!(session_id = %self.id, "Session closed");
        Ok(())
    }

    fn ensure_active(&self) -> Result<()> {
        match *self.state.lock() {
            SessionState::Active => Ok(()),
            SessionState::Uninitialized => Err(SessionError::NotAttached),
            SessionState::Closed => Err(SessionError::Closed),
        }
    }

    fn send(&self, op: LedgerOp) -> Result<()> {
        match self.tx.lock().as_ref() {
            // Bounded send: a full queue applies backpressure, never drops
            Some(tx) => tx.send(op).map_err(|_| SessionError::Closed),
            None => Err(SessionError::Closed),
        }
    }
}

impl Default for BrowsingSession {
    fn default() -> Self {
        Self::new()
    }
}

fn ledger_worker(rx: Receiver<LedgerOp>, ledger: BlockLedger) {
    for op in rx {
        match op {
            LedgerOp::Record {
                request_uri,
                category,
            } => {
                ledger.record(request_uri, category);
            }
            LedgerOp::Clear => ledger.clear(),
            LedgerOp::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    tracing::debug!("Ledger worker drained and stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_rules::Category;

    fn test_rules() -> Arc<RuleSet> {
        Arc::new(
            RuleSet::parse(
                "doubleclick.net,advertising\n\
                 google-analytics.com,analytics\n",
            )
            .unwrap(),
        )
    }

    fn active_session() -> BrowsingSession {
        let session = BrowsingSession::new();
        session.attach(test_rules()).unwrap();
        session
    }

    #[test]
    fn test_lifecycle() {
        let session = BrowsingSession::new();
        assert_eq!(session.state(), SessionState::Uninitialized);

        assert!(matches!(
            session.handle_request("https://example.com/"),
            Err(SessionError::NotAttached)
        ));

        session.attach(test_rules()).unwrap();
        assert_eq!(session.state(), SessionState::Active);

        assert!(matches!(
            session.attach(test_rules()),
            Err(SessionError::AlreadyAttached)
        ));

        session.close().unwrap();
        assert_eq!(session.state(), SessionState::Closed);

        assert!(matches!(
            session.handle_request("https://example.com/"),
            Err(SessionError::Closed)
        ));
        assert!(matches!(session.close(), Err(SessionError::Closed)));
    }

    #[test]
    fn test_close_before_attach() {
        let session = BrowsingSession::new();
        session.close().unwrap();
        assert_eq!(session.state(), SessionState::Closed);
        assert!(matches!(
            session.attach(test_rules()),
            Err(SessionError::Closed)
        ));
    }

    #[test]
    fn test_block_scenario() {
        let session = active_session();

        let decision = session
            .handle_request("https://ads.doubleclick.net/x")
            .unwrap();
        assert!(decision.block);
        assert_eq!(decision.category, Category::Advertising);
        assert_eq!(session.blocked_count().unwrap(), 1);

        let decision = session.handle_request("https://example.com/y").unwrap();
        assert!(!decision.block);
        assert_eq!(decision.category, Category::None);
        assert_eq!(session.blocked_count().unwrap(), 1);

        session.close().unwrap();
    }

    #[test]
    fn test_count_matches_blocked_requests() {
        let session = active_session();

        let uris = [
            "https://ads.doubleclick.net/a",
            "https://example.com/b",
            "https://www.google-analytics.com/collect",
            "https://ads.doubleclick.net/a",
            "https://mozilla.org/",
        ];

        let mut expected = 0;
        for uri in uris {
            if session.handle_request(uri).unwrap().block {
                expected += 1;
            }
        }

        assert_eq!(expected, 3);
        assert_eq!(session.blocked_count().unwrap(), expected);
        session.close().unwrap();
    }

    #[test]
    fn test_navigation_commit_clears_ledger() {
        let session = active_session();

        session
            .handle_request("https://ads.doubleclick.net/x")
            .unwrap();
        assert_eq!(session.blocked_count().unwrap(), 1);

        session.commit_navigation().unwrap();
        assert_eq!(session.blocked_count().unwrap(), 0);
        assert!(session.blocked_events().unwrap().is_empty());

        session.close().unwrap();
    }

    #[test]
    fn test_invalid_uri_fails_open() {
        let session = active_session();

        let decision = session.handle_request("not a uri").unwrap();
        assert!(!decision.block);
        assert_eq!(decision.category, Category::None);
        assert_eq!(session.blocked_count().unwrap(), 0);

        session.close().unwrap();
    }

    #[test]
    fn test_protection_toggle() {
        let session = active_session();
        session.set_tracking_protection(false);

        let decision = session
            .handle_request("https://ads.doubleclick.net/x")
            .unwrap();
        assert!(!decision.block);
        assert_eq!(decision.category, Category::Advertising);
        assert_eq!(session.blocked_count().unwrap(), 0);

        session.set_tracking_protection(true);
        let decision = session
            .handle_request("https://ads.doubleclick.net/x")
            .unwrap();
        assert!(decision.block);
        assert_eq!(session.blocked_count().unwrap(), 1);

        session.close().unwrap();
    }

    #[test]
    fn test_events_preserve_detection_order() {
        let session = active_session();

        for i in 0..10 {
            session
                .handle_request(&format!("https://ads.doubleclick.net/{i}"))
                .unwrap();
        }

        let events = session.blocked_events().unwrap();
        assert_eq!(events.len(), 10);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.request_uri, format!("https://ads.doubleclick.net/{i}"));
        }
        for pair in events.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }

        session.close().unwrap();
    }

    #[test]
    fn test_close_drains_pending_records() {
        let session = active_session();
        let ledger = session.ledger.clone();

        for i in 0..100 {
            session
                .handle_request(&format!("https://ads.doubleclick.net/{i}"))
                .unwrap();
        }

        // No flush: close itself must wait for the queue to drain
        session.close().unwrap();
        assert_eq!(ledger.count(), 100);
    }

    #[test]
    fn test_concurrent_requests() {
        let session = Arc::new(active_session());

        let threads: Vec<_> = (0..4)
            .map(|t| {
                let session = Arc::clone(&session);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let decision = session
                            .handle_request(&format!("https://ads.doubleclick.net/{t}/{i}"))
                            .unwrap();
                        assert!(decision.block);
                    }
                })
            })
            .collect();

        for handle in threads {
            handle.join().unwrap();
        }

        assert_eq!(session.blocked_count().unwrap(), 200);

        let events = session.blocked_events().unwrap();
        let distinct: std::collections::HashSet<&str> =
            events.iter().map(|e| e.request_uri.as_str()).collect();
        assert_eq!(distinct.len(), 200);

        session.close().unwrap();
    }
}
