use crate::core::{ExtractError, Track};
use async_trait::async_trait;

/// A backend that can turn a share link into a [`Track`].
///
/// Implementations receive their credentials at construction time;
/// `is_configured` is a pure predicate over those materialized fields and
/// `extract` fails fast with a "requires configuration." error while
/// unconfigured.
#[async_trait]
pub trait Source: Send + Sync {
    /// Human-readable backend name, used for error attribution and config
    /// scoping.
    fn friendly_name(&self) -> &'static str;

    /// Whether the backend has the credentials it needs to extract.
    fn is_configured(&self) -> bool;

    /// Cheap, side-effect-free test of whether `link` matches a shape this
    /// source understands. A `false` here is a negative match, not an error.
    fn can_extract(&self, link: &str) -> bool;

    /// Look the link up with the backend and map the response into a Track.
    async fn extract(&self, link: &str) -> Result<Track, ExtractError>;
}
