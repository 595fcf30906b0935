//! Detail-page anchors: classify into resolution options and subtitle links.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Anchor;

pub const MOVIE_EXTENSION: &str = ".mp4";
pub const SUBTITLE_EXTENSION: &str = ".srt";

/// The closed set of resolution labels a download link can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "4K")]
    FourK,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
        Resolution::FourK,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Resolution::P480 => "480p",
            Resolution::P720 => "720p",
            Resolution::P1080 => "1080p",
            Resolution::FourK => "4K",
        }
    }

    /// First label whose text appears anywhere in the URL, tested in fixed
    /// 480p → 720p → 1080p → 4K order. A URL carrying several labels lands
    /// on the first match, not the most specific one.
    pub fn detect(url: &str) -> Option<Resolution> {
        Resolution::ALL.into_iter().find(|r| url.contains(r.label()))
    }

    pub fn from_label(label: &str) -> Option<Resolution> {
        Resolution::ALL.into_iter().find(|r| r.label() == label)
    }
}

/// Download links found on one detail page.
#[derive(Debug, Default)]
pub struct MovieOptions {
    pub resolutions: BTreeMap<Resolution, String>,
    pub subtitles: Vec<String>,
}

/// Partition a detail page's anchors. Movie files are keyed by detected
/// resolution (a later link overwrites an earlier one for the same key),
/// subtitle files are collected in page order, everything else is dropped.
pub fn classify_anchors(anchors: &[Anchor], base: &Url) -> MovieOptions {
    let mut found = MovieOptions::default();
    for anchor in anchors {
        if anchor.href.is_empty() {
            continue;
        }
        let href = anchor.resolve(base);
        if href.ends_with(MOVIE_EXTENSION) {
            if let Some(resolution) = Resolution::detect(&href) {
                found.resolutions.insert(resolution, href);
            }
        } else if href.ends_with(SUBTITLE_EXTENSION) {
            found.subtitles.push(href);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(href: &str) -> Anchor {
        Anchor {
            text: String::new(),
            href: href.to_string(),
        }
    }

    fn base() -> Url {
        Url::parse("https://netupserver.com/film/2010/inception/").unwrap()
    }

    #[test]
    fn classification_is_order_dependent() {
        // Both labels appear; the first rule tested wins.
        let found = classify_anchors(
            &[anchor("https://cdn.example.com/inception-480p-720p.mp4")],
            &base(),
        );
        assert_eq!(found.resolutions.len(), 1);
        assert!(found.resolutions.contains_key(&Resolution::P480));
    }

    #[test]
    fn later_link_overwrites_earlier_for_same_resolution() {
        let found = classify_anchors(
            &[
                anchor("https://cdn.example.com/a-720p.mp4"),
                anchor("https://cdn.example.com/b-720p.mp4"),
            ],
            &base(),
        );
        assert_eq!(
            found.resolutions.get(&Resolution::P720).map(String::as_str),
            Some("https://cdn.example.com/b-720p.mp4"),
        );
    }

    #[test]
    fn subtitles_and_movies_partition_and_the_rest_is_dropped() {
        let found = classify_anchors(
            &[
                anchor("/dl/inception-1080p.mp4"),
                anchor("/dl/inception-en.srt"),
                anchor("/dl/inception-fr.srt"),
                anchor("/dl/poster.jpg"),
                anchor("/dl/inception.zip"),
            ],
            &base(),
        );
        assert_eq!(
            found.resolutions.get(&Resolution::P1080).map(String::as_str),
            Some("https://netupserver.com/dl/inception-1080p.mp4"),
        );
        assert_eq!(
            found.subtitles,
            vec![
                "https://netupserver.com/dl/inception-en.srt",
                "https://netupserver.com/dl/inception-fr.srt",
            ],
        );
    }

    #[test]
    fn movie_file_without_a_known_label_is_ignored() {
        let found = classify_anchors(&[anchor("/dl/inception-8K.mp4")], &base());
        assert!(found.resolutions.is_empty());
    }

    #[test]
    fn four_k_label_is_case_sensitive() {
        let found = classify_anchors(&[anchor("/dl/inception-4k.mp4")], &base());
        assert!(found.resolutions.is_empty());

        let found = classify_anchors(&[anchor("/dl/inception-4K.mp4")], &base());
        assert!(found.resolutions.contains_key(&Resolution::FourK));
    }

    #[test]
    fn resolution_labels_round_trip() {
        for resolution in Resolution::ALL {
            assert_eq!(Resolution::from_label(resolution.label()), Some(resolution));
        }
        assert_eq!(Resolution::from_label("8K"), None);
        assert_eq!(Resolution::from_label(""), None);
    }
}
