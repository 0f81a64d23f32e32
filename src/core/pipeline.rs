use crate::core::{Sink, Source, TrackMatch};
use crate::utils::normalize_title;
use anyhow::Result;

/// Run one link through the whole chain: source extraction, title cleanup,
/// then the sink's lucky pick. Errors from either stage propagate unchanged;
/// a no-match comes back as a `TrackMatch` with an empty uri.
pub async fn resolve(source: &dyn Source, sink: &dyn Sink, link: &str) -> Result<TrackMatch> {
    let mut track = source.extract(link).await?;
    tracing::debug!(full_title = %track.full_title, "extracted track");

    track.title = normalize_title(&track.title);
    track.full_title = normalize_title(&track.full_title);

    let found = sink.im_feeling_lucky(&track).await?;
    tracing::debug!(uri = %found.uri, "lucky pick");
    Ok(found)
}
