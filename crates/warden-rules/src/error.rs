//! Rule store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Malformed pattern '{pattern}' on line {line}")]
    MalformedPattern { line: usize, pattern: String },

    #[error("Failed to read rule list: {0}")]
    Io(#[from] std::io::Error),
}
