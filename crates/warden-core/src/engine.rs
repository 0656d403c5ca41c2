//! Engine facade
//!
//! The host's single entry point: owns the current rule set, the active
//! browsing session, and the query surface the UI renders from.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use warden_rules::RuleSet;
use warden_session::BrowsingSession;

use crate::config::Config;
use crate::error::CoreError;
use crate::input::{InputResolution, InputResolver};
use crate::Result;

/// One row of the "Blocked Trackers" list the host renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedTracker {
    pub category: String,
    pub host: String,
}

/// Tracking-protection engine instance.
///
/// Clones share state; the host hands one clone to its network
/// interception layer and keeps another for the UI thread.
pub struct Engine {
    config: Config,
    /// Current rule set; reload swaps the Arc, never edits in place
    rules: Arc<RwLock<Arc<RuleSet>>>,
    /// Active browsing session, one per browsing context
    session: Arc<RwLock<Option<Arc<BrowsingSession>>>>,
    input_resolver: Arc<InputResolver>,
}

impl Engine {
    /// Create an engine, loading rules from the configured path or falling
    /// back to the embedded defaults.
    pub fn new(config: Config) -> Result<Self> {
        let rules = match &config.rules_path {
            Some(path) => {
                let set = RuleSet::load_path(path)?;
                tracing::info!(path = %path.display(), rule_count = set.len(), "Loaded rule list");
                set
            }
            None => RuleSet::default_rules(),
        };

        let input_resolver = Arc::new(InputResolver::new(config.search_engine.clone()));

        Ok(Self {
            config,
            rules: Arc::new(RwLock::new(Arc::new(rules))),
            session: Arc::new(RwLock::new(None)),
            input_resolver,
        })
    }

    // === Session lifecycle ===

    /// Open a browsing session attached to the current rule set.
    ///
    /// Any previous session is closed first; there is one browsing context
    /// per engine.
    pub fn open_session(&self) -> Result<Arc<BrowsingSession>> {
        if let Some(previous) = self.session.write().take() {
            if let Err(error) = previous.close() {
                tracing::warn!(session_id = %previous.id(), %error, "Closing previous session");
            }
        }

        let session = Arc::new(BrowsingSession::with_queue_capacity(
            self.config.queue_capacity,
        ));
        session.set_tracking_protection(self.config.tracking_protection);
        session.attach(self.current_rules())?;

        *self.session.write() = Some(Arc::clone(&session));
        Ok(session)
    }

    /// Tear down the active session; its ledger is discarded.
    pub fn close_session(&self) -> Result<()> {
        let session = self.session.write().take().ok_or(CoreError::NoSession)?;
        session.close()?;
        Ok(())
    }

    pub fn active_session(&self) -> Result<Arc<BrowsingSession>> {
        self.session.read().clone().ok_or(CoreError::NoSession)
    }

    // === Interception hooks (consumed by the embedding engine) ===

    /// Per-request hook: returns the allow/block verdict.
    pub fn handle_request(&self, request_uri: &str) -> Result<warden_classify::Decision> {
        Ok(self.active_session()?.handle_request(request_uri)?)
    }

    /// Top-level navigation committed: the blocked-tracker list starts over.
    pub fn commit_navigation(&self) -> Result<()> {
        Ok(self.active_session()?.commit_navigation()?)
    }

    // === Query surface (exposed to the host UI) ===

    pub fn blocked_count(&self) -> Result<usize> {
        Ok(self.active_session()?.blocked_count()?)
    }

    /// Blocked trackers in detection order, one row per blocked request.
    ///
    /// Hosts that fail to re-parse fall back to the raw request URI.
    pub fn blocked_events(&self) -> Result<Vec<BlockedTracker>> {
        let events = self.active_session()?.blocked_events()?;

        Ok(events
            .into_iter()
            .map(|event| {
                let host = warden_classify::request_host(&event.request_uri)
                    .unwrap_or_else(|_| event.request_uri.clone());
                BlockedTracker {
                    category: event.category.as_str().to_string(),
                    host,
                }
            })
            .collect())
    }

    pub fn reset_counter(&self) -> Result<()> {
        Ok(self.active_session()?.reset()?)
    }

    pub fn set_tracking_protection(&self, enabled: bool) -> Result<()> {
        self.active_session()?.set_tracking_protection(enabled);
        Ok(())
    }

    // === Rules ===

    /// Replace the rule set from a new source. Atomic swap: in-flight
    /// classifications finish against the set they started with, and the
    /// active session keeps its attached set until reopened.
    pub fn reload_rules(&self, source: &str) -> Result<usize> {
        let set = RuleSet::parse(source)?;
        let count = set.len();
        *self.rules.write() = Arc::new(set);

        tracing::info!(rule_count = count, "Rule set reloaded");
        Ok(count)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.read().len()
    }

    fn current_rules(&self) -> Arc<RuleSet> {
        Arc::clone(&self.rules.read())
    }

    // === Navigation input ===

    pub fn resolve_input(&self, input: &str) -> InputResolution {
        self.input_resolver.resolve(input)
    }

    pub fn homepage(&self) -> &str {
        &self.config.homepage
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Clone for Engine {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            rules: Arc::clone(&self.rules),
            session: Arc::clone(&self.session),
            input_resolver: Arc::clone(&self.input_resolver),
        }
    }
}
