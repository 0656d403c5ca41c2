//! Classifier error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Invalid request URI: {0}")]
    InvalidUri(String),
}
