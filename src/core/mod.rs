pub mod error;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod track;

pub use error::{ExtractError, SearchError};
pub use pipeline::resolve;
pub use sink::Sink;
pub use source::Source;
pub use track::{Track, TrackMatch};
