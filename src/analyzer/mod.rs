//! Video analysis report.
//!
//! Renders one probe into a plain-text report: core metadata, the stream
//! variants grouped by kind, and the caption track listing. The report is
//! what `analyze` prints and optionally saves verbatim.

use std::cmp::Reverse;
use std::fmt::Write;

use crate::provider::{StreamKind, StreamVariant, VideoProbe};
use crate::utils::{format_count, format_duration, format_file_size};

const DESCRIPTION_LIMIT: usize = 200;

/// Render the full analysis report for one probed video.
pub fn analysis_report(probe: &VideoProbe) -> String {
    let mut out = String::new();

    writeln!(out, "=== Video Analysis: {} ===", probe.id).unwrap();
    writeln!(out, "Title: {}", field(probe.title.as_deref())).unwrap();
    writeln!(out, "Author: {}", field(probe.author.as_deref())).unwrap();

    match probe.duration_seconds {
        Some(seconds) => writeln!(
            out,
            "Length: {} seconds ({})",
            seconds as u64,
            format_duration(seconds)
        )
        .unwrap(),
        None => writeln!(out, "Length: Unknown").unwrap(),
    }

    match probe.view_count {
        Some(views) => writeln!(out, "Views: {}", format_count(views)).unwrap(),
        None => writeln!(out, "Views: Unknown").unwrap(),
    }

    writeln!(
        out,
        "Published: {}",
        probe
            .upload_date
            .as_deref()
            .map(format_publish_date)
            .unwrap_or_else(|| "Unknown".to_string())
    )
    .unwrap();

    writeln!(
        out,
        "Description: {}",
        probe
            .description
            .as_deref()
            .map(shorten_description)
            .unwrap_or_else(|| "Unknown".to_string())
    )
    .unwrap();

    write_stream_section(
        &mut out,
        "Progressive Streams",
        streams_of_kind(probe, StreamKind::Progressive),
    );
    write_stream_section(
        &mut out,
        "Video-Only Streams",
        streams_of_kind(probe, StreamKind::Video),
    );
    write_stream_section(
        &mut out,
        "Audio-Only Streams",
        streams_of_kind(probe, StreamKind::Audio),
    );

    writeln!(out, "\n--- Caption Tracks ---").unwrap();
    if probe.caption_tracks.is_empty() {
        writeln!(out, "  (none)").unwrap();
    } else {
        for track in &probe.caption_tracks {
            let name = track.name.as_deref().unwrap_or(&track.language);
            if track.auto_generated {
                writeln!(out, "  {} - {} [auto-generated]", track.language, name).unwrap();
            } else {
                writeln!(out, "  {} - {}", track.language, name).unwrap();
            }
        }
    }

    out
}

fn field(value: Option<&str>) -> &str {
    value.unwrap_or("Unknown")
}

/// yt-dlp reports publish dates as YYYYMMDD.
fn format_publish_date(raw: &str) -> String {
    chrono::NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Flatten a multi-line description and truncate it for the report.
fn shorten_description(description: &str) -> String {
    let flat = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= DESCRIPTION_LIMIT {
        flat
    } else {
        let truncated: String = flat.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", truncated)
    }
}

fn streams_of_kind(probe: &VideoProbe, kind: StreamKind) -> Vec<&StreamVariant> {
    let mut streams: Vec<&StreamVariant> = probe
        .streams
        .iter()
        .filter(|s| s.kind == kind)
        .collect();

    match kind {
        // Video sections ordered by resolution, audio by bitrate, best first
        StreamKind::Progressive | StreamKind::Video => {
            streams.sort_by_key(|s| Reverse(s.height.unwrap_or(0)));
        }
        StreamKind::Audio => {
            streams.sort_by_key(|s| Reverse(s.bitrate_kbps.unwrap_or(0.0) as u64));
        }
    }

    streams
}

fn write_stream_section(out: &mut String, heading: &str, streams: Vec<&StreamVariant>) {
    writeln!(out, "\n--- {} ---", heading).unwrap();

    if streams.is_empty() {
        writeln!(out, "  (none)").unwrap();
        return;
    }

    for stream in streams {
        writeln!(out, "  {}", describe_stream(stream)).unwrap();
    }
}

fn describe_stream(stream: &StreamVariant) -> String {
    let mut parts = vec![stream.format_id.clone()];

    if let Some(resolution) = &stream.resolution {
        parts.push(resolution.clone());
    }
    if let Some(bitrate) = stream.bitrate_kbps {
        if stream.kind == StreamKind::Audio {
            parts.push(format!("{:.0} kbps", bitrate));
        }
    }
    parts.push(stream.ext.clone());
    if let Some(fps) = stream.fps {
        if stream.kind != StreamKind::Audio {
            parts.push(format!("{:.0} fps", fps));
        }
    }
    parts.push(format_file_size(stream.filesize));

    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CaptionTrack;

    fn variant(format_id: &str, kind: StreamKind) -> StreamVariant {
        StreamVariant {
            format_id: format_id.to_string(),
            kind,
            ext: "mp4".to_string(),
            resolution: None,
            height: None,
            fps: None,
            bitrate_kbps: None,
            filesize: None,
        }
    }

    fn probe() -> VideoProbe {
        VideoProbe {
            id: "dQw4w9WgXcQ".to_string(),
            title: Some("Test Video".to_string()),
            author: Some("Test Channel".to_string()),
            duration_seconds: Some(213.0),
            view_count: Some(1234567),
            upload_date: Some("20230401".to_string()),
            description: Some("First line.\nSecond line.".to_string()),
            streams: vec![],
            caption_tracks: vec![],
        }
    }

    #[test]
    fn test_report_core_metadata() {
        let report = analysis_report(&probe());
        assert!(report.contains("=== Video Analysis: dQw4w9WgXcQ ==="));
        assert!(report.contains("Title: Test Video"));
        assert!(report.contains("Author: Test Channel"));
        assert!(report.contains("Length: 213 seconds (3m 33s)"));
        assert!(report.contains("Views: 1,234,567"));
        assert!(report.contains("Published: 2023-04-01"));
        assert!(report.contains("Description: First line. Second line."));
    }

    #[test]
    fn test_report_unknown_fields() {
        let mut p = probe();
        p.title = None;
        p.view_count = None;
        p.duration_seconds = None;
        let report = analysis_report(&p);
        assert!(report.contains("Title: Unknown"));
        assert!(report.contains("Views: Unknown"));
        assert!(report.contains("Length: Unknown"));
    }

    #[test]
    fn test_description_is_truncated() {
        let mut p = probe();
        p.description = Some("word ".repeat(100));
        let report = analysis_report(&p);
        let line = report
            .lines()
            .find(|l| l.starts_with("Description:"))
            .unwrap();
        assert!(line.ends_with("..."));
        assert!(line.len() <= "Description: ".len() + DESCRIPTION_LIMIT + 3);
    }

    #[test]
    fn test_video_streams_ordered_by_resolution() {
        let mut p = probe();
        let mut low = variant("134", StreamKind::Video);
        low.height = Some(360);
        low.resolution = Some("640x360".to_string());
        let mut high = variant("137", StreamKind::Video);
        high.height = Some(1080);
        high.resolution = Some("1920x1080".to_string());
        p.streams = vec![low, high];

        let report = analysis_report(&p);
        let hi_pos = report.find("1920x1080").unwrap();
        let lo_pos = report.find("640x360").unwrap();
        assert!(hi_pos < lo_pos);
    }

    #[test]
    fn test_audio_streams_ordered_by_bitrate() {
        let mut p = probe();
        let mut low = variant("249", StreamKind::Audio);
        low.bitrate_kbps = Some(50.0);
        let mut high = variant("140", StreamKind::Audio);
        high.bitrate_kbps = Some(128.0);
        p.streams = vec![low, high];

        let report = analysis_report(&p);
        let hi_pos = report.find("128 kbps").unwrap();
        let lo_pos = report.find("50 kbps").unwrap();
        assert!(hi_pos < lo_pos);
    }

    #[test]
    fn test_empty_sections_render_none() {
        let report = analysis_report(&probe());
        assert!(report.contains("--- Progressive Streams ---\n  (none)"));
        assert!(report.contains("--- Caption Tracks ---\n  (none)"));
    }

    #[test]
    fn test_caption_tracks_listing() {
        let mut p = probe();
        p.caption_tracks = vec![
            CaptionTrack {
                language: "en".to_string(),
                name: Some("English".to_string()),
                auto_generated: false,
                url: None,
            },
            CaptionTrack {
                language: "de".to_string(),
                name: None,
                auto_generated: true,
                url: None,
            },
        ];
        let report = analysis_report(&p);
        assert!(report.contains("  en - English\n"));
        assert!(report.contains("  de - de [auto-generated]\n"));
    }
}
