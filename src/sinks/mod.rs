pub mod spotify;

pub use spotify::SpotifySink;
