//! WARDEN Rule Store
//!
//! Loads and indexes tracker-classification rules: domain or domain-suffix
//! patterns mapped to a closed set of categories. Contents are read-only
//! after load; swapping in a new list is the caller's concern.

mod category;
mod defaults;
mod error;
mod store;

pub use category::Category;
pub use error::LoadError;
pub use store::{Rule, RuleSet};

pub type Result<T> = std::result::Result<T, LoadError>;
