//! Embedded default rule list
//!
//! A minimal seed list so the engine blocks the most common trackers out
//! of the box; hosts are expected to load a full subscription list on top.

use crate::category::Category;

pub(crate) const DEFAULT_RULES: &[(&str, Category)] = &[
    // Advertising
    ("doubleclick.net", Category::Advertising),
    ("googlesyndication.com", Category::Advertising),
    ("googleadservices.com", Category::Advertising),
    ("adnxs.com", Category::Advertising),
    ("criteo.com", Category::Advertising),
    ("rubiconproject.com", Category::Advertising),
    // Analytics
    ("google-analytics.com", Category::Analytics),
    ("googletagmanager.com", Category::Analytics),
    ("scorecardresearch.com", Category::Analytics),
    ("quantserve.com", Category::Analytics),
    ("hotjar.com", Category::Analytics),
    // Social
    ("connect.facebook.net", Category::Social),
    ("platform.twitter.com", Category::Social),
    ("addthis.com", Category::Social),
    ("sharethis.com", Category::Social),
    // Content
    ("taboola.com", Category::Content),
    ("outbrain.com", Category::Content),
    ("disqus.com", Category::Content),
    // Test (Mozilla's content-blocking test domains)
    ("trackertest.org", Category::Test),
    ("itisatracker.org", Category::Test),
];
