//! Year-index listing pages: map normalized link text to detail-page URLs.

use std::collections::HashMap;

use url::Url;

use crate::Anchor;

/// Lower-case and strip all whitespace, so "The Matrix", "the matrix" and
/// " THE MATRIX " all key the same listing entry.
pub fn normalize_title(raw: &str) -> String {
    raw.to_lowercase().split_whitespace().collect()
}

/// Build the title → detail-URL map for a listing page. Duplicate normalized
/// titles keep the last anchor seen, matching upstream page order.
pub fn build_listing(anchors: &[Anchor], base: &Url) -> HashMap<String, String> {
    let mut listing = HashMap::new();
    for anchor in anchors {
        if anchor.href.is_empty() {
            continue;
        }
        listing.insert(normalize_title(&anchor.text), anchor.resolve(base));
    }
    listing
}

/// Exact lookup of `title` after normalization. No fuzzy matching.
pub fn resolve(anchors: &[Anchor], base: &Url, title: &str) -> Option<String> {
    build_listing(anchors, base).remove(&normalize_title(title))
}
