//! Tracker categories
//!
//! Closed set: every blocked request falls into exactly one bucket, and
//! unmapped inputs collapse to `None` rather than failing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Not a tracker (or category unknown)
    None,
    /// Analytics and measurement scripts
    Analytics,
    /// Advertising networks
    Advertising,
    /// Social media widgets and beacons
    Social,
    /// Content trackers (recommendation/comment embeds)
    Content,
    /// Test-only tracker domains
    Test,
}

impl Category {
    /// Parse a category name. Unknown names map to `None`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "analytics" => Category::Analytics,
            "advertising" => Category::Advertising,
            "social" => Category::Social,
            "content" => Category::Content,
            "test" => Category::Test,
            _ => Category::None,
        }
    }

    /// Returns true for any category other than `None`
    pub fn is_tracker(&self) -> bool {
        !matches!(self, Category::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::None => "none",
            Category::Analytics => "analytics",
            Category::Advertising => "advertising",
            Category::Social => "social",
            Category::Content => "content",
            Category::Test => "test",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        assert_eq!(Category::parse("advertising"), Category::Advertising);
        assert_eq!(Category::parse("Analytics"), Category::Analytics);
        assert_eq!(Category::parse(" social "), Category::Social);
        assert_eq!(Category::parse("CONTENT"), Category::Content);
        assert_eq!(Category::parse("test"), Category::Test);
        assert_eq!(Category::parse("none"), Category::None);
    }

    #[test]
    fn test_parse_unknown_maps_to_none() {
        assert_eq!(Category::parse("fingerprinting"), Category::None);
        assert_eq!(Category::parse(""), Category::None);
    }

    #[test]
    fn test_as_str_round_trip() {
        for category in [
            Category::None,
            Category::Analytics,
            Category::Advertising,
            Category::Social,
            Category::Content,
            Category::Test,
        ] {
            assert_eq!(Category::parse(category.as_str()), category);
        }
    }

    #[test]
    fn test_is_tracker() {
        assert!(!Category::None.is_tracker());
        assert!(Category::Advertising.is_tracker());
    }
}
