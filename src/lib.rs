//! Tubescript - A Rust CLI tool for fetching YouTube transcripts
//!
//! This library resolves an 11-character video identifier out of any YouTube
//! URL shape, fetches the video's caption track through yt-dlp, flattens it
//! into a plain-text transcript, and derives a leading-sentences synopsis.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod provider;
pub mod resolver;
pub mod session;
pub mod utils;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use pipeline::{FetchResult, TranscriptPipeline};
pub use provider::{CaptionFragment, CaptionProvider, Unavailable, VideoProbe};
pub use resolver::VideoId;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to tubescript
#[derive(thiserror::Error, Debug)]
pub enum TubescriptError {
    #[error("Could not extract video ID from the URL: {0}")]
    InvalidUrl(String),

    #[error("Transcript not available: {0}")]
    Unavailable(#[from] provider::Unavailable),

    #[error("yt-dlp is not available: {0}")]
    ProviderMissing(String),
}
