use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::resolver::VideoId;

pub mod ytdlp;

pub use ytdlp::YtdlpProvider;

/// One timed text unit from a video's caption track.
///
/// Only the text matters to the transcript; timing stays with the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionFragment {
    pub text: String,
}

/// A caption track offered for a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Language code the track is offered under (e.g. "en")
    pub language: String,

    /// Human-readable track name if the provider supplies one
    pub name: Option<String>,

    /// Whether the track was machine-generated rather than authored
    pub auto_generated: bool,

    /// Where the track payload can be fetched from
    pub url: Option<String>,
}

/// Classification of a stream variant by which elementary streams it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamKind {
    /// Muxed video and audio
    Progressive,
    Video,
    Audio,
}

/// One downloadable stream variant of a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamVariant {
    /// Provider-assigned format identifier
    pub format_id: String,

    pub kind: StreamKind,

    /// Container extension (mp4, webm, m4a, ...)
    pub ext: String,

    /// Resolution label for video streams ("1920x1080")
    pub resolution: Option<String>,

    /// Vertical resolution, used for ordering video streams
    pub height: Option<u32>,

    pub fps: Option<f64>,

    /// Audio bitrate in kbps for audio streams
    pub bitrate_kbps: Option<f64>,

    /// Payload size in bytes if the provider reports one
    pub filesize: Option<u64>,
}

/// Everything a single metadata probe yields about a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoProbe {
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub duration_seconds: Option<f64>,
    pub view_count: Option<u64>,
    /// Publish date as reported by the provider (YYYYMMDD)
    pub upload_date: Option<String>,
    pub description: Option<String>,
    pub streams: Vec<StreamVariant>,
    pub caption_tracks: Vec<CaptionTrack>,
}

/// The reasons a transcript fetch can come back empty-handed.
///
/// Callers that only care whether anything usable came back can treat any
/// variant uniformly; the tagged cause is kept for diagnostics.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Unavailable {
    #[error("the video offers no caption tracks")]
    NoCaptionTracks,

    #[error("no caption track in language '{requested}' (available: {})", .available.join(", "))]
    LanguageNotOffered {
        requested: String,
        available: Vec<String>,
    },

    #[error("the video could not be accessed: {0}")]
    VideoInaccessible(String),

    #[error("caption track download failed: {0}")]
    TrackDownload(String),

    #[error("the caption track contained no usable text")]
    EmptyTrack,
}

/// Trait for fetching captions and metadata for a video.
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// Probe a video's metadata, stream variants and caption track listing.
    async fn probe(&self, id: &VideoId) -> Result<VideoProbe, Unavailable>;

    /// Fetch the caption track for `id` in exactly `language`, decoded into
    /// ordered fragments. No fallback to other languages is attempted.
    async fn fetch_captions(
        &self,
        id: &VideoId,
        language: &str,
    ) -> Result<Vec<CaptionFragment>, Unavailable>;
}
