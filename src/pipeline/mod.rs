use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;
use crate::provider::{CaptionFragment, CaptionProvider, Unavailable, YtdlpProvider};
use crate::resolver::VideoId;

/// Sentence boundary: terminal punctuation followed by whitespace.
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// A fetched transcript together with its derived synopsis.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub transcript: String,
    pub synopsis: String,
}

/// Orchestrates one transcript request: captions in, flat text and synopsis
/// out. Holds no state across requests; every run recomputes from scratch.
pub struct TranscriptPipeline {
    provider: Box<dyn CaptionProvider>,
}

impl TranscriptPipeline {
    /// Create a pipeline backed by the configured yt-dlp provider.
    pub fn new(config: &Config) -> Self {
        Self {
            provider: Box::new(YtdlpProvider::new(config)),
        }
    }

    /// Create a pipeline with an injected provider, used by tests.
    pub fn with_provider(provider: Box<dyn CaptionProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the caption track for `id` in `language` and flatten it into a
    /// transcript. Fragment order is the provider's; texts are joined with
    /// single spaces, never reordered or deduplicated.
    pub async fn fetch_transcript(
        &self,
        id: &VideoId,
        language: &str,
    ) -> Result<String, Unavailable> {
        let fragments = self.provider.fetch_captions(id, language).await?;
        let transcript = flatten_fragments(&fragments);

        if transcript.is_empty() {
            return Err(Unavailable::EmptyTrack);
        }

        tracing::info!(
            "Fetched transcript for {} ({} fragments, {} chars)",
            id,
            fragments.len(),
            transcript.len()
        );

        Ok(transcript)
    }

    /// Fetch a transcript and derive its synopsis in one run.
    pub async fn fetch(
        &self,
        id: &VideoId,
        language: &str,
        sentence_count: usize,
    ) -> Result<FetchResult, Unavailable> {
        let transcript = self.fetch_transcript(id, language).await?;
        let synopsis = summarize(&transcript, sentence_count);

        Ok(FetchResult {
            transcript,
            synopsis,
        })
    }
}

fn flatten_fragments(fragments: &[CaptionFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Take the first `sentence_count` sentences of `transcript`, rejoined with
/// single spaces. Positional truncation only; a transcript with fewer
/// sentences comes back whole, an empty transcript comes back empty.
pub fn summarize(transcript: &str, sentence_count: usize) -> String {
    if sentence_count == 0 || transcript.is_empty() {
        return String::new();
    }

    let mut sentences: Vec<&str> = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(transcript) {
        // The terminal punctuation is one byte wide, so the sentence ends
        // one past the match start.
        sentences.push(&transcript[start..boundary.start() + 1]);
        start = boundary.end();
        if sentences.len() == sentence_count {
            return sentences.join(" ");
        }
    }

    let tail = &transcript[start..];
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences.join(" ")
}
