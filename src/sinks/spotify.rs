use crate::config::ConfigStore;
use crate::core::{SearchError, Sink, Track, TrackMatch};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::Mutex;

const TOKEN_ENDPOINT: &str = "https://accounts.spotify.com/api/token";
const SEARCH_ENDPOINT: &str = "https://api.spotify.com/v1/search";

/// Config keys for the client-credentials pair.
pub const CLIENT_ID: &str = "spotify-client-id";
pub const CLIENT_SECRET: &str = "spotify-client-secret";

const ACCESS_TOKEN: &str = "spotify-client-access-token";
const ACCESS_TOKEN_EXPIRES: &str = "spotify-client-access-token-expires";

struct Credentials {
    client_id: String,
    client_secret: String,
}

/// Sink backed by the Spotify Web API track search.
///
/// Holds its config store behind a mutex so the cached OAuth token can be
/// written back from `&self` calls.
pub struct SpotifySink {
    client: reqwest::Client,
    credentials: Option<Credentials>,
    store: Mutex<ConfigStore>,
}

impl SpotifySink {
    /// Build the sink from its config store; credentials are materialized
    /// up front and `is_configured` just looks at them.
    pub fn new(store: ConfigStore) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tunelink/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let client_id = store.get(CLIENT_ID);
        let client_secret = store.get(CLIENT_SECRET);
        let credentials = if client_id.is_empty() || client_secret.is_empty() {
            None
        } else {
            Some(Credentials {
                client_id,
                client_secret,
            })
        };

        Self {
            client,
            credentials,
            store: Mutex::new(store),
        }
    }

    fn error(&self, details: impl Into<String>) -> SearchError {
        SearchError::new(self.friendly_name(), details)
    }

    fn cached_token(&self) -> Option<String> {
        let store = self.store.lock().expect("config store lock poisoned");
        let token = store.get(ACCESS_TOKEN);
        let expires = store.get(ACCESS_TOKEN_EXPIRES);
        if token.is_empty() {
            return None;
        }
        let expires_at = DateTime::parse_from_rfc3339(&expires).ok()?;
        if Utc::now() < expires_at {
            Some(token)
        } else {
            None
        }
    }

    /// Client-credentials token, cached in the config store until it
    /// expires.
    async fn token(&self, credentials: &Credentials) -> Result<String, SearchError> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        tracing::debug!("requesting a fresh access token");
        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| {
                self.error(format!("unable to get a token, maybe the credentials are wrong: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.error(format!(
                "unable to get a token, maybe the credentials are wrong: HTTP {status}"
            )));
        }

        let grant: TokenResponse = response.json().await.map_err(|e| {
            self.error(format!("unable to get a token, maybe the credentials are wrong: {e}"))
        })?;

        let expires_at = Utc::now() + Duration::seconds(grant.expires_in);
        let mut store = self.store.lock().expect("config store lock poisoned");
        store
            .set(ACCESS_TOKEN, &grant.access_token)
            .and_then(|()| store.set(ACCESS_TOKEN_EXPIRES, &expires_at.to_rfc3339()))
            .map_err(|e| self.error(format!("unable to cache the access token: {e}")))?;

        Ok(grant.access_token)
    }
}

#[async_trait]
impl Sink for SpotifySink {
    fn friendly_name(&self) -> &'static str {
        "Spotify"
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn search(&self, track: &Track) -> Result<Vec<TrackMatch>, SearchError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| self.error("requires configuration."))?;

        let token = self.token(credentials).await?;
        tracing::debug!(query = %track.full_title, "searching");

        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .bearer_auth(token)
            .query(&[("q", track.full_title.as_str()), ("type", "track")])
            .send()
            .await
            .map_err(|e| self.error(format!("search failed. API limit hit? {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.error(format!("search failed. API limit hit? HTTP {status}")));
        }

        let listing: SearchResponse = response
            .json()
            .await
            .map_err(|e| self.error(format!("search failed. API limit hit? {e}")))?;

        Ok(listing
            .tracks
            .items
            .into_iter()
            .map(|item| make_match(item, self.friendly_name()))
            .collect())
    }
}

/// Results keep the backend's native relevance order. The synthesized
/// full_title carries only the first credited artist.
// TODO: return all the artists, not just the first one
fn make_match(item: FoundTrack, source: &str) -> TrackMatch {
    let artist = item
        .artists
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_default();
    let year: String = item.album.release_date.chars().take(4).collect();

    TrackMatch {
        found_track: Track {
            full_title: format!("{} - {} ({})", item.name, artist, item.album.name),
            title: item.name,
            artists: vec![artist],
            album: item.album.name,
            year,
        },
        uri: format!("https://open.spotify.com/track/{}", item.id),
        source: source.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    tracks: TrackPage,
}

#[derive(Debug, Default, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<FoundTrack>,
}

#[derive(Debug, Default, Deserialize)]
struct FoundTrack {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<Artist>,
    #[serde(default)]
    album: Album,
}

#[derive(Debug, Default, Deserialize)]
struct Artist {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct Album {
    #[serde(default)]
    name: String,
    #[serde(default)]
    release_date: String,
}
