//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Rules error: {0}")]
    Rules(#[from] warden_rules::LoadError),

    #[error("Session error: {0}")]
    Session(#[from] warden_session::SessionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No active session")]
    NoSession,
}
