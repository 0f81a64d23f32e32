use crate::core::{SearchError, Track, TrackMatch};
use async_trait::async_trait;

/// A backend that can turn a [`Track`] into ranked [`TrackMatch`]es.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Human-readable backend name, used for error attribution and config
    /// scoping.
    fn friendly_name(&self) -> &'static str;

    /// Whether the backend has the credentials it needs to search.
    fn is_configured(&self) -> bool;

    /// Run the backend's search for `track` and return candidates in the
    /// backend's native relevance order. An empty vec is a valid success,
    /// distinct from an error.
    async fn search(&self, track: &Track) -> Result<Vec<TrackMatch>, SearchError>;

    /// First result wins. No scoring or similarity comparison happens here;
    /// ranking quality is entirely the backend's problem. An empty search
    /// yields the default (uri == "") match, not an error.
    async fn im_feeling_lucky(&self, track: &Track) -> Result<TrackMatch, SearchError> {
        let mut results = self.search(track).await?;
        if results.is_empty() {
            Ok(TrackMatch::default())
        } else {
            Ok(results.remove(0))
        }
    }
}
