//! Video identifier resolution.
//!
//! YouTube addresses every video with an 11-character token drawn from
//! `[0-9A-Za-z_-]`. The token shows up after `v=` in watch URLs and after a
//! path separator in short/embed URLs; everything else in the URL is noise.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::TubescriptError;

static VIDEO_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").unwrap()
});

/// An 11-character YouTube video identifier, immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this identifier.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video identifier from an arbitrary YouTube URL string.
///
/// Scans for the leftmost run of exactly 11 identifier characters that
/// immediately follows `v=` or a path separator. No validation against a
/// real video is attempted; trailing query parameters are ignored.
pub fn resolve(url: &str) -> Result<VideoId, TubescriptError> {
    VIDEO_ID_REGEX
        .captures(url)
        .map(|caps| VideoId(caps[1].to_string()))
        .ok_or_else(|| TubescriptError::InvalidUrl(url.to_string()))
}
