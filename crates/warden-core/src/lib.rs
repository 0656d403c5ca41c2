//! WARDEN Core
//!
//! Facade tying the tracking-protection engine together for an embedding
//! browser host: session lifecycle, rule loading and atomic reload, the
//! UI-facing blocked-tracker queries, and address-bar input resolution.

mod config;
mod engine;
mod error;
mod input;

pub use config::Config;
pub use engine::{BlockedTracker, Engine};
pub use error::CoreError;
pub use input::{InputResolution, InputResolver};

// Re-export engine components
pub use warden_classify::{classify, request_host, ClassifyError, Decision};
pub use warden_ledger::{BlockEvent, BlockLedger};
pub use warden_rules::{Category, LoadError, Rule, RuleSet};
pub use warden_session::{BrowsingSession, SessionError, SessionState};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
