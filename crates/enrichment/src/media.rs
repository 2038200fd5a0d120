//! Media items and their display ordering.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Kind of media attached to a taxon. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    /// SPARQL variable carrying URLs of this kind.
    pub fn variable(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }

    pub const ALL: [MediaKind; 3] = [MediaKind::Image, MediaKind::Audio, MediaKind::Video];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
    pub label: Option<String>,
}

/// Rewrite `http://` to `https://`, drop repeated `(kind, url)` pairs and
/// order images, then audio, then video.
///
/// The first occurrence of a pair wins and the sort is stable, so items of
/// one kind keep their upstream order.
pub fn normalize_media(mut items: Vec<MediaItem>) -> Vec<MediaItem> {
    for item in &mut items {
        if let Some(rest) = item.url.strip_prefix("http://") {
            item.url = format!("https://{}", rest);
        }
    }
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert((item.kind, item.url.clone())));
    items.sort_by_key(|item| item.kind);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(url: &str, kind: MediaKind) -> MediaItem {
        MediaItem {
            url: url.to_string(),
            kind,
            label: None,
        }
    }

    #[test]
    fn test_order_and_https_rewrite() {
        let items = vec![
            item("http://x/v.webm", MediaKind::Video),
            item("http://x/1.jpg", MediaKind::Image),
            item("https://x/a.ogg", MediaKind::Audio),
            item("http://x/2.jpg", MediaKind::Image),
        ];

        let urls: Vec<_> = normalize_media(items).into_iter().map(|m| m.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://x/1.jpg",
                "https://x/2.jpg",
                "https://x/a.ogg",
                "https://x/v.webm"
            ]
        );
    }

    #[test]
    fn test_repeated_urls_collapse_after_rewrite() {
        let items = vec![
            item("http://x/1.jpg", MediaKind::Image),
            item("https://x/1.jpg", MediaKind::Image),
            item("https://x/1.jpg", MediaKind::Video),
        ];

        let kept: Vec<_> = normalize_media(items)
            .into_iter()
            .map(|m| (m.kind, m.url))
            .collect();
        assert_eq!(
            kept,
            vec![
                (MediaKind::Image, "https://x/1.jpg".to_string()),
                (MediaKind::Video, "https://x/1.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_stays_empty() {
        assert!(normalize_media(Vec::new()).is_empty());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(MediaKind::Audio).unwrap(), "audio");
    }
}
