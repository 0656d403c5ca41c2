//! Request classification

use serde::Serialize;
use url::Url;

use warden_rules::{Category, RuleSet};

use crate::error::ClassifyError;
use crate::Result;

/// Verdict for a single outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Whether the request should be cancelled
    pub block: bool,
    /// Matched category (set even when blocking is disabled)
    pub category: Category,
}

impl Decision {
    /// The fail-open verdict: let the request through, no category.
    pub fn allow() -> Self {
        Self {
            block: false,
            category: Category::None,
        }
    }
}

/// Extract the host component of a request URI.
///
/// Fails if the URI cannot be parsed into scheme + host (e.g. `data:` or
/// `about:` URIs, which have no host to classify).
pub fn request_host(request_uri: &str) -> Result<String> {
    let parsed =
        Url::parse(request_uri).map_err(|_| ClassifyError::InvalidUri(request_uri.to_string()))?;

    match parsed.host_str() {
        Some(host) => Ok(host.to_ascii_lowercase()),
        None => Err(ClassifyError::InvalidUri(request_uri.to_string())),
    }
}

/// Classify an outgoing request against a rule set.
///
/// `block` is true only when the host maps to a tracker category and
/// protection is enabled; the category is reported either way.
pub fn classify(request_uri: &str, rules: &RuleSet, protection_enabled: bool) -> Result<Decision> {
    let host = request_host(request_uri)?;
    let category = rules.lookup(&host);

    Ok(Decision {
        block: category.is_tracker() && protection_enabled,
        category,
    })
}
