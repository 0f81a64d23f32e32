use serde::{Deserialize, Serialize};

/// A media track as understood by both sides of the pipeline.
///
/// `full_title` is the only field a source must always populate; the rest are
/// best-effort and stay empty when the backend can't decompose the title
/// confidently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub full_title: String,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub year: String,
}

/// A single candidate produced by a sink's search.
///
/// An empty `uri` is the not-found sentinel: `im_feeling_lucky` returns a
/// default `TrackMatch` when the search came back empty, which is not an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMatch {
    pub found_track: Track,
    pub uri: String,
    pub source: String,
}

impl TrackMatch {
    pub fn is_found(&self) -> bool {
        !self.uri.is_empty()
    }
}
