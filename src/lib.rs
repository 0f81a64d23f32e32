pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod sinks;
pub mod utils;

pub use self::core::{resolve, ExtractError, SearchError, Sink, Source, Track, TrackMatch};
pub use extractors::YouTubeSource;
pub use sinks::SpotifySink;
