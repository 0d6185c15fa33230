use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::process::Command;

use super::{
    CaptionFragment, CaptionProvider, CaptionTrack, StreamKind, StreamVariant, Unavailable,
    VideoProbe,
};
use crate::config::Config;
use crate::resolver::VideoId;

/// Caption and metadata provider backed by the yt-dlp executable.
///
/// One `-J --skip-download` probe yields the metadata, the stream variant
/// listing and the caption track maps; the selected caption track is then
/// downloaded over HTTP in the json3 timedtext encoding.
pub struct YtdlpProvider {
    ytdlp_path: String,
    http: reqwest::Client,
}

/// Stream variant listing as yt-dlp reports it.
#[derive(Debug, Deserialize)]
struct FormatEntry {
    format_id: Option<String>,
    ext: Option<String>,
    resolution: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    fps: Option<f64>,
    vcodec: Option<String>,
    acodec: Option<String>,
    abr: Option<f64>,
    tbr: Option<f64>,
    filesize: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    url: Option<String>,
    ext: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbePayload {
    title: Option<String>,
    uploader: Option<String>,
    duration: Option<f64>,
    view_count: Option<u64>,
    upload_date: Option<String>,
    description: Option<String>,
    formats: Option<Vec<FormatEntry>>,
    subtitles: Option<HashMap<String, Vec<TrackEntry>>>,
    automatic_captions: Option<HashMap<String, Vec<TrackEntry>>>,
}

/// json3 timedtext document: a flat list of events, each carrying segments.
#[derive(Debug, Deserialize)]
struct TimedText {
    events: Option<Vec<TimedTextEvent>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    utf8: Option<String>,
}

impl YtdlpProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            ytdlp_path: config.provider.ytdlp_path.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Check if yt-dlp is available
    pub async fn check_availability(&self) -> bool {
        Command::new(&self.ytdlp_path)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    async fn run_probe(&self, id: &VideoId) -> Result<ProbePayload, Unavailable> {
        tracing::debug!("Probing video info for: {}", id);

        let output = Command::new(&self.ytdlp_path)
            .args([
                "-J",
                "--skip-download",
                "--no-playlist",
                "--no-warnings",
                &id.watch_url(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Unavailable::VideoInaccessible(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.lines().last().unwrap_or("yt-dlp failed").to_string();
            return Err(Unavailable::VideoInaccessible(message));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| Unavailable::VideoInaccessible(format!("unreadable yt-dlp output: {}", e)))
    }

    /// Download and decode one caption track in the json3 encoding.
    async fn download_track(&self, track_url: &str) -> Result<Vec<CaptionFragment>, Unavailable> {
        let url = if track_url.contains("fmt=json3") {
            track_url.to_string()
        } else {
            format!("{}&fmt=json3", track_url)
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Unavailable::TrackDownload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Unavailable::TrackDownload(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Unavailable::TrackDownload(e.to_string()))?;

        decode_json3(&body)
    }
}

#[async_trait]
impl CaptionProvider for YtdlpProvider {
    async fn probe(&self, id: &VideoId) -> Result<VideoProbe, Unavailable> {
        let payload = self.run_probe(id).await?;

        let streams = payload
            .formats
            .unwrap_or_default()
            .into_iter()
            .filter_map(classify_format)
            .collect();

        let mut caption_tracks = Vec::new();
        collect_tracks(&mut caption_tracks, payload.subtitles, false);
        collect_tracks(&mut caption_tracks, payload.automatic_captions, true);

        Ok(VideoProbe {
            id: id.as_str().to_string(),
            title: payload.title,
            author: payload.uploader,
            duration_seconds: payload.duration,
            view_count: payload.view_count,
            upload_date: payload.upload_date,
            description: payload.description,
            streams,
            caption_tracks,
        })
    }

    async fn fetch_captions(
        &self,
        id: &VideoId,
        language: &str,
    ) -> Result<Vec<CaptionFragment>, Unavailable> {
        let probe = self.probe(id).await?;

        if probe.caption_tracks.is_empty() {
            return Err(Unavailable::NoCaptionTracks);
        }

        // Requested language only; a manually authored track wins over an
        // auto-generated one for the same language.
        let track = probe
            .caption_tracks
            .iter()
            .filter(|t| t.language == language)
            .min_by_key(|t| t.auto_generated)
            .ok_or_else(|| {
                let mut available: Vec<String> = probe
                    .caption_tracks
                    .iter()
                    .map(|t| t.language.clone())
                    .collect();
                available.sort();
                available.dedup();
                Unavailable::LanguageNotOffered {
                    requested: language.to_string(),
                    available,
                }
            })?;

        let track_url = track
            .url
            .as_deref()
            .ok_or_else(|| Unavailable::TrackDownload("track has no URL".to_string()))?;

        tracing::debug!(
            "Downloading '{}' caption track (auto_generated: {})",
            track.language,
            track.auto_generated
        );

        self.download_track(track_url).await
    }
}

/// Fold a yt-dlp track map into the flat caption track listing. Within one
/// language the json3 encoding is preferred since that is what gets fetched.
fn collect_tracks(
    out: &mut Vec<CaptionTrack>,
    map: Option<HashMap<String, Vec<TrackEntry>>>,
    auto_generated: bool,
) {
    for (language, entries) in map.unwrap_or_default() {
        let entry = entries
            .iter()
            .find(|e| e.ext.as_deref() == Some("json3"))
            .or_else(|| entries.first());

        if let Some(entry) = entry {
            out.push(CaptionTrack {
                language,
                name: entry.name.clone(),
                auto_generated,
                url: entry.url.clone(),
            });
        }
    }
    out.sort_by(|a, b| a.language.cmp(&b.language));
}

/// Classify one yt-dlp format entry by which codecs it carries. Storyboard
/// entries (no audio, no video) are dropped.
fn classify_format(entry: FormatEntry) -> Option<StreamVariant> {
    let format_id = entry.format_id?.trim().to_string();
    if format_id.is_empty() {
        return None;
    }

    let has_video = entry.vcodec.as_deref().map_or(false, |c| c != "none");
    let has_audio = entry.acodec.as_deref().map_or(false, |c| c != "none");

    let kind = match (has_video, has_audio) {
        (true, true) => StreamKind::Progressive,
        (true, false) => StreamKind::Video,
        (false, true) => StreamKind::Audio,
        (false, false) => return None,
    };

    let resolution = if has_video {
        entry.resolution.or(match (entry.width, entry.height) {
            (Some(w), Some(h)) => Some(format!("{}x{}", w, h)),
            _ => None,
        })
    } else {
        None
    };

    Some(StreamVariant {
        format_id,
        kind,
        ext: entry.ext.unwrap_or_else(|| "unknown".to_string()),
        resolution,
        height: entry.height,
        fps: entry.fps,
        bitrate_kbps: entry.abr.or(entry.tbr),
        filesize: entry.filesize,
    })
}

/// Decode a json3 timedtext document into ordered caption fragments.
///
/// Events keep their document order; whitespace-only events are skipped and
/// embedded newlines are flattened to single spaces.
fn decode_json3(body: &str) -> Result<Vec<CaptionFragment>, Unavailable> {
    let doc: TimedText = serde_json::from_str(body)
        .map_err(|e| Unavailable::TrackDownload(format!("unreadable caption track: {}", e)))?;

    let mut fragments = Vec::new();
    for event in doc.events.unwrap_or_default() {
        let text: String = event
            .segs
            .unwrap_or_default()
            .into_iter()
            .filter_map(|seg| seg.utf8)
            .collect();

        let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !flattened.is_empty() {
            fragments.push(CaptionFragment { text: flattened });
        }
    }

    if fragments.is_empty() {
        return Err(Unavailable::EmptyTrack);
    }

    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_json3_joins_segments_per_event() {
        let body = r#"{"events":[
            {"segs":[{"utf8":"Hello "},{"utf8":"there."}]},
            {"segs":[{"utf8":"How are you?"}]}
        ]}"#;
        let fragments = decode_json3(body).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Hello there.");
        assert_eq!(fragments[1].text, "How are you?");
    }

    #[test]
    fn test_decode_json3_flattens_newlines() {
        let body = r#"{"events":[{"segs":[{"utf8":"line one\nline two"}]}]}"#;
        let fragments = decode_json3(body).unwrap();
        assert_eq!(fragments[0].text, "line one line two");
    }

    #[test]
    fn test_decode_json3_skips_whitespace_only_events() {
        let body = r#"{"events":[
            {"segs":[{"utf8":"\n"}]},
            {"segs":[{"utf8":"actual text"}]}
        ]}"#;
        let fragments = decode_json3(body).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "actual text");
    }

    #[test]
    fn test_decode_json3_empty_track() {
        let err = decode_json3(r#"{"events":[]}"#).unwrap_err();
        assert!(matches!(err, Unavailable::EmptyTrack));
    }

    #[test]
    fn test_decode_json3_garbage_is_download_failure() {
        let err = decode_json3("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, Unavailable::TrackDownload(_)));
    }

    #[test]
    fn test_classify_format_progressive() {
        let entry = FormatEntry {
            format_id: Some("18".to_string()),
            ext: Some("mp4".to_string()),
            resolution: Some("640x360".to_string()),
            width: Some(640),
            height: Some(360),
            fps: Some(30.0),
            vcodec: Some("avc1.42001E".to_string()),
            acodec: Some("mp4a.40.2".to_string()),
            abr: None,
            tbr: Some(500.0),
            filesize: Some(12_000_000),
        };
        let variant = classify_format(entry).unwrap();
        assert_eq!(variant.kind, StreamKind::Progressive);
        assert_eq!(variant.resolution.as_deref(), Some("640x360"));
    }

    #[test]
    fn test_classify_format_drops_storyboards() {
        let entry = FormatEntry {
            format_id: Some("sb0".to_string()),
            ext: Some("mhtml".to_string()),
            resolution: None,
            width: None,
            height: None,
            fps: None,
            vcodec: Some("none".to_string()),
            acodec: Some("none".to_string()),
            abr: None,
            tbr: None,
            filesize: None,
        };
        assert!(classify_format(entry).is_none());
    }
}
