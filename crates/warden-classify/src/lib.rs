//! WARDEN Request Classifier
//!
//! Pure decision logic: extract the host of an outgoing request and match
//! it against a rule set. Stateless, safe to call concurrently from any
//! number of interception threads.

mod classifier;
mod error;

pub use classifier::{classify, request_host, Decision};
pub use error::ClassifyError;

pub type Result<T> = std::result::Result<T, ClassifyError>;
