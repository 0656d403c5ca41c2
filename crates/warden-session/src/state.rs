//! Session State Machine
//!
//! ```text
//! Uninitialized
//!   ↓ attach
//! Active ⟲ handle_request / commit_navigation
//!   ↓ close
//! Closed
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Created, no rule set attached yet
    Uninitialized,
    /// Attached to a rule set; accepting requests
    Active,
    /// Torn down; rejects every operation
    Closed,
}

impl SessionState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: SessionState) -> bool {
        match (self, target) {
            // Uninitialized can attach, or be torn down before attaching
            (SessionState::Uninitialized, SessionState::Active) => true,
            (SessionState::Uninitialized, SessionState::Closed) => true,
            // Active self-loops on request handling and navigation commits
            (SessionState::Active, SessionState::Active) => true,
            (SessionState::Active, SessionState::Closed) => true,
            // Closed is terminal
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Active => "active",
            SessionState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
