//! Blocked request events

use serde::Serialize;

use warden_rules::Category;

/// One blocked request. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockEvent {
    /// Full URI of the cancelled request
    pub request_uri: String,
    /// Category the matching rule assigned
    pub category: Category,
    /// Monotonic sequence number, not wall-clock time. Strictly increasing
    /// for the lifetime of the ledger, including across clears.
    pub timestamp: u64,
}
