//! Address-bar input resolution
//!
//! Anything that reads like a host (contains a dot or a colon, no spaces)
//! navigates directly; everything else becomes a search-engine query.

/// Result of resolving address bar input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResolution {
    /// Navigate to a URL
    Navigate(String),
    /// Perform a search
    Search(String),
}

pub struct InputResolver {
    /// Search engine URL template (%s replaced with query)
    search_template: String,
}

impl InputResolver {
    pub fn new(search_template: String) -> Self {
        Self { search_template }
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    /// Resolve user input into a navigation or a search.
    pub fn resolve(&self, input: &str) -> InputResolution {
        let input = input.trim();

        if input.is_empty() {
            return InputResolution::Navigate("about:blank".to_string());
        }

        if looks_like_uri(input) {
            let url = if input.contains("://") || input.starts_with("about:") {
                input.to_string()
            } else {
                format!("https://{input}")
            };
            return InputResolution::Navigate(url);
        }

        let query = percent_encode(input);
        InputResolution::Search(self.search_template.replace("%s", &query))
    }
}

fn looks_like_uri(input: &str) -> bool {
    (input.contains('.') || input.contains(':')) && !input.contains(' ')
}

fn percent_encode(input: &str) -> String {
    use std::fmt::Write;

    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}
