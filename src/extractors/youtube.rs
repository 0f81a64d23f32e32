use crate::config::ConfigStore;
use crate::core::{ExtractError, Source, Track};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";

/// Config key holding the YouTube Data API v3 key.
pub const API_KEY: &str = "youtube-data-api-key";

/// Pull the 11-character video identifier out of a link string.
///
/// Recognizes `youtube.com/watch?v=`, subdomain-prefixed watch links
/// (`music.youtube.com`), `youtu.be/` shorthand, and `/embed/` / `/v/` path
/// styles. The identifier is 11 characters of `[A-Za-z0-9_-]` terminated by
/// a quote, `&`, `?`, `/`, whitespace, or the end of the string. `None` is a
/// negative match, not a failure.
pub fn extract_id(link: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*?[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
            .expect("video id pattern is valid")
    });
    re.captures(link).map(|caps| caps[1].to_string())
}

/// Source backed by the YouTube Data API v3.
pub struct YouTubeSource {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl YouTubeSource {
    /// Build the source from its config store. The API key is materialized
    /// here; `is_configured` just looks at the field.
    pub fn new(store: &ConfigStore) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tunelink/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let key = store.get(API_KEY);
        Self {
            client,
            api_key: if key.is_empty() { None } else { Some(key) },
        }
    }

    fn error(&self, details: impl Into<String>) -> ExtractError {
        ExtractError::new(self.friendly_name(), details)
    }
}

#[async_trait]
impl Source for YouTubeSource {
    fn friendly_name(&self) -> &'static str {
        "YouTube Data"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn can_extract(&self, link: &str) -> bool {
        extract_id(link).is_some()
    }

    async fn extract(&self, link: &str) -> Result<Track, ExtractError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| self.error("requires configuration."))?;

        let id = extract_id(link)
            .ok_or_else(|| self.error("couldn't extract the ID from that URL - is it valid?"))?;
        tracing::debug!(%id, "looking up video");

        let response = self
            .client
            .get(VIDEOS_ENDPOINT)
            .query(&[
                ("part", "snippet,contentDetails"),
                ("id", id.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| self.error(format!("YouTube responded with an error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.error(format!("YouTube responded with an error: HTTP {status}")));
        }

        let listing: VideoListResponse = response
            .json()
            .await
            .map_err(|e| self.error(format!("YouTube responded with an error: {e}")))?;

        match listing.items.into_iter().next() {
            Some(video) => Ok(make_track(video)),
            None => Err(self.error("no results found")),
        }
    }
}

/// Title and artists are only trusted when the content is rights-licensed
/// and carries at least one attribution tag; otherwise the video title can't
/// be confidently decomposed and only `full_title` is set.
fn make_track(video: VideoItem) -> Track {
    let mut track = Track {
        full_title: video.snippet.title.clone(),
        ..Default::default()
    };
    if video.content_details.licensed_content && !video.snippet.tags.is_empty() {
        track.title = video.snippet.title;
        track.artists = vec![video.snippet.tags[0].clone()];
    }
    track
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Default, Deserialize)]
struct VideoItem {
    #[serde(default)]
    snippet: Snippet,
    #[serde(default, rename = "contentDetails")]
    content_details: ContentDetails,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentDetails {
    #[serde(default, rename = "licensedContent")]
    licensed_content: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    fn unconfigured_source() -> Result<YouTubeSource> {
        let dir = tempdir()?;
        let store = ConfigStore::with_root(dir.path(), "youtube")?;
        Ok(YouTubeSource::new(&store))
    }

    #[test]
    fn extracts_id_from_known_link_shapes() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=123", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://music.youtube.com/watch?v=oHg5SJYRHA0", "oHg5SJYRHA0"),
            ("https://youtu.be/yN-1Z-yE0EA", "yN-1Z-yE0EA"),
            ("https://www.youtube.com/embed/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/v/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ];
        for (link, expected) in cases {
            assert_eq!(extract_id(link).as_deref(), Some(expected), "for {link}");
        }
    }

    #[test]
    fn rejects_links_outside_the_grammar() {
        let cases = [
            "https://notyoutube.com/watch?v=B77wrds5",
            "https://www.youtube.com/channel/UC123",
            "https://vimeo.com/123456",
            "not a link at all",
            "",
        ];
        for link in cases {
            assert_eq!(extract_id(link), None, "for {link}");
        }
    }

    #[test]
    fn extracted_ids_are_eleven_chars_from_the_id_alphabet() {
        let id = extract_id("https://youtu.be/yN-1Z-yE0EA").unwrap();
        assert_eq!(id.len(), 11);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }

    #[test]
    fn can_extract_agrees_with_extract_id() -> Result<()> {
        let source = unconfigured_source()?;
        let links = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/yN-1Z-yE0EA",
            "https://notyoutube.com/watch?v=B77wrds5",
            "https://www.youtube.com/channel/UC123",
            "",
        ];
        for link in links {
            assert_eq!(source.can_extract(link), extract_id(link).is_some(), "for {link}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn extract_fails_fast_when_unconfigured() -> Result<()> {
        let source = unconfigured_source()?;
        let err = source
            .extract("https://youtu.be/yN-1Z-yE0EA")
            .await
            .unwrap_err();
        assert_eq!(err.details, "requires configuration.");
        assert_eq!(err.name, "YouTube Data");
        Ok(())
    }

    #[test]
    fn licensed_tagged_video_maps_to_attributed_track() {
        let video = VideoItem {
            snippet: Snippet {
                title: "Go with me (Original Mix)".to_string(),
                tags: vec!["Boston".to_string()],
            },
            content_details: ContentDetails {
                licensed_content: true,
            },
        };
        let track = make_track(video);
        assert_eq!(track.full_title, "Go with me (Original Mix)");
        assert_eq!(track.title, "Go with me (Original Mix)");
        assert_eq!(track.artists, vec!["Boston".to_string()]);
    }

    #[test]
    fn unlicensed_video_keeps_only_the_full_title() {
        let video = VideoItem {
            snippet: Snippet {
                title: "Crab Rave [Monstercat Release]".to_string(),
                tags: vec!["monstercat".to_string()],
            },
            content_details: ContentDetails {
                licensed_content: false,
            },
        };
        let track = make_track(video);
        assert_eq!(track.full_title, "Crab Rave [Monstercat Release]");
        assert_eq!(track.title, "");
        assert!(track.artists.is_empty());
    }

    #[test]
    fn licensed_but_untagged_video_keeps_only_the_full_title() {
        let video = VideoItem {
            snippet: Snippet {
                title: "Some Upload".to_string(),
                tags: vec![],
            },
            content_details: ContentDetails {
                licensed_content: true,
            },
        };
        let track = make_track(video);
        assert_eq!(track.full_title, "Some Upload");
        assert_eq!(track.title, "");
        assert!(track.artists.is_empty());
    }

    #[test]
    fn video_listing_deserializes_from_api_json() -> Result<()> {
        let raw = r#"{
            "items": [{
                "snippet": {"title": "Go with me (Original Mix)", "tags": ["Boston"]},
                "contentDetails": {"licensedContent": true}
            }]
        }"#;
        let listing: VideoListResponse = serde_json::from_str(raw)?;
        assert_eq!(listing.items.len(), 1);
        assert!(listing.items[0].content_details.licensed_content);
        Ok(())
    }
}
