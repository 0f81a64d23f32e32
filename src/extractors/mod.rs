pub mod youtube;

pub use youtube::{extract_id, YouTubeSource};
