//! Rule parsing, indexing and lookup
//!
//! Rule lists are line-delimited `pattern,category` pairs. A pattern is a
//! domain or domain suffix: `doubleclick.net` matches itself and any
//! subdomain. Loading is fail-closed: the first malformed pattern rejects
//! the whole list.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::LoadError;
use crate::Result;

/// A single classification rule. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub pattern: String,
    pub category: Category,
}

/// An indexed, read-only set of classification rules.
#[derive(Debug)]
pub struct RuleSet {
    /// Accepted rules in registration order
    rules: Vec<Rule>,
    /// Pattern → category index for suffix lookup
    index: HashMap<String, Category>,
}

impl RuleSet {
    /// An empty set; every lookup returns `Category::None`.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The embedded default list shipped with the engine.
    pub fn default_rules() -> Self {
        let mut set = Self::empty();
        for (pattern, category) in crate::defaults::DEFAULT_RULES {
            set.register(pattern.to_string(), *category);
        }
        set
    }

    /// Parse a line-delimited `pattern,category` list.
    ///
    /// Blank lines and `#` comments are skipped. Unknown category names map
    /// to `Category::None`; malformed patterns fail the whole load.
    pub fn parse(source: &str) -> Result<Self> {
        let mut set = Self::empty();

        for (idx, raw_line) in source.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (pattern, category_name) = match line.split_once(',') {
                Some((pattern, category)) => (pattern.trim(), category.trim()),
                None => (line, ""),
            };

            let pattern = pattern.to_ascii_lowercase();
            if !is_valid_pattern(&pattern) {
                return Err(LoadError::MalformedPattern {
                    line: idx + 1,
                    pattern,
                });
            }

            let category = Category::parse(category_name);
            if category == Category::None
                && !category_name.is_empty()
                && !category_name.eq_ignore_ascii_case("none")
            {
                tracing::warn!(
                    line = idx + 1,
                    category = %category_name,
                    "Unknown rule category, treating as none"
                );
            }

            set.register(pattern, category);
        }

        Ok(set)
    }

    /// Parse a rule list from a file.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Longest-suffix match against the indexed patterns.
    ///
    /// The most specific matching domain wins; a duplicate pattern keeps
    /// its first-registered category. No match returns `Category::None`.
    pub fn lookup(&self, host: &str) -> Category {
        if self.index.is_empty() {
            return Category::None;
        }

        let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
        let mut suffix = host.as_str();

        loop {
            if let Some(category) = self.index.get(suffix) {
                return *category;
            }

            match suffix.split_once('.') {
                Some((_, rest)) => suffix = rest,
                None => return Category::None,
            }
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn register(&mut self, pattern: String, category: Category) {
        if self.index.contains_key(&pattern) {
            // First-registered rule wins ties
            tracing::debug!(pattern = %pattern, "Duplicate rule pattern ignored");
            return;
        }

        self.index.insert(pattern.clone(), category);
        self.rules.push(Rule { pattern, category });
    }
}

/// Syntactic validation for a domain or domain-suffix pattern.
///
/// Requires at least two labels of `[a-z0-9-]`, no empty labels, no
/// leading/trailing hyphen within a label.
fn is_valid_pattern(pattern: &str) -> bool {
    if pattern.is_empty() || pattern.len() > 253 {
        return false;
    }

    let labels: Vec<&str> = pattern.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    })
}
