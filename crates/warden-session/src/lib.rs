//! WARDEN Session Coordination
//!
//! One `BrowsingSession` per browsing context: it owns the block ledger,
//! feeds intercepted requests to the classifier, and forwards results to
//! the ledger over a bounded queue so interception threads never contend
//! on the ledger lock directly.

mod error;
mod session;
mod state;

pub use error::SessionError;
pub use session::BrowsingSession;
pub use state::SessionState;

pub type Result<T> = std::result::Result<T, SessionError>;
