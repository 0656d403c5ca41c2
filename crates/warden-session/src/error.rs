//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session is closed")]
    Closed,

    #[error("Session has no rule set attached")]
    NotAttached,

    #[error("Session is already attached")]
    AlreadyAttached,
}
