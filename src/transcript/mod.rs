//! Transcript ingestion and rendering for the command-line front end.
//!
//! Accepts either a bare JSON array of segments or `{ "segments": [...] }`.
//! A segment may omit `startTimeSeconds` when its `timestamp` can be parsed.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use serde_json::Value;

use crate::timecode::{format_time, parse_timestamp};
use crate::types::{Transcript, TranscriptSegment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// One `[timestamp] speaker: text` line per segment
    Text,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSegment {
    speaker: String,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    start_time_seconds: Option<f64>,
    text: String,
}

impl RawSegment {
    fn into_segment(self, index: usize) -> Result<TranscriptSegment> {
        let start = match (self.start_time_seconds, self.timestamp.as_deref()) {
            (Some(seconds), _) => seconds,
            (None, Some(stamp)) => parse_timestamp(stamp)
                .with_context(|| format!("Segment {} has an unreadable timestamp", index))?,
            (None, None) => bail!(
                "Segment {} needs either startTimeSeconds or timestamp",
                index
            ),
        };
        ensure!(
            start.is_finite() && start >= 0.0,
            "Segment {} start time must be non-negative (got {})",
            index,
            start
        );
        Ok(TranscriptSegment {
            speaker: self.speaker,
            timestamp: self.timestamp.unwrap_or_else(|| format_time(start)),
            start_time_seconds: start,
            text: self.text,
        })
    }
}

/// Parse transcript JSON into segments, preserving input order.
pub fn parse_transcript(raw: &str) -> Result<Transcript> {
    let document: Value = serde_json::from_str(raw).context("Failed to parse transcript JSON")?;
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("segments") {
            Some(Value::Array(entries)) => entries,
            _ => bail!("Transcript object must contain a \"segments\" array"),
        },
        _ => bail!("Transcript must be a JSON array or an object with \"segments\""),
    };

    let segments = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let raw: RawSegment = serde_json::from_value(entry)
                .with_context(|| format!("Segment {} is malformed", index))?;
            raw.into_segment(index)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Transcript { segments })
}

/// Read a transcript from `path`, or from stdin when `path` is `None` or `-`.
pub fn load_transcript(path: Option<&Path>) -> Result<Transcript> {
    let data = match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)
            .with_context(|| format!("Failed to read transcript file {:?}", p))?,
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read transcript from stdin")?;
            buffer
        }
    };
    parse_transcript(&data)
}

pub fn render(segments: &[TranscriptSegment], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut rendered =
                serde_json::to_string_pretty(segments).context("Failed to serialize segments")?;
            rendered.push('\n');
            Ok(rendered)
        }
        OutputFormat::Text => Ok(segments
            .iter()
            .map(|segment| {
                format!(
                    "[{}] {}: {}\n",
                    segment.timestamp,
                    segment.speaker,
                    segment.text.trim()
                )
            })
            .collect()),
    }
}

/// Write rendered output to `path`, or stdout when `None`.
pub fn write_output(rendered: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => fs::write(p, rendered)
            .with_context(|| format!("Failed to write output file {:?}", p)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let raw = r#"[
            {"speaker": "A", "timestamp": "00:01", "startTimeSeconds": 1.5, "text": "hi"}
        ]"#;
        let transcript = parse_transcript(raw).unwrap();
        assert_eq!(transcript.segments.len(), 1);
        assert_eq!(transcript.segments[0].start_time_seconds, 1.5);
        assert_eq!(transcript.segments[0].timestamp, "00:01");
    }

    #[test]
    fn parses_wrapped_object_and_derives_missing_fields() {
        let raw = r#"{"segments": [
            {"speaker": "A", "timestamp": "1:00:05", "text": "late"},
            {"speaker": "B", "startTimeSeconds": 65, "text": "no stamp"}
        ]}"#;
        let transcript = parse_transcript(raw).unwrap();
        assert_eq!(transcript.segments[0].start_time_seconds, 3605.0);
        assert_eq!(transcript.segments[1].timestamp, "01:05");
    }

    #[test]
    fn rejects_segment_without_any_time() {
        let raw = r#"[{"speaker": "A", "text": "lost"}]"#;
        let err = parse_transcript(raw).unwrap_err();
        assert!(err.to_string().contains("Segment 0"));
    }

    #[test]
    fn rejects_negative_start() {
        let raw = r#"[{"speaker": "A", "startTimeSeconds": -1, "text": "x"}]"#;
        assert!(parse_transcript(raw).is_err());
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(parse_transcript(r#""just a string""#).is_err());
        assert!(parse_transcript(r#"{"items": []}"#).is_err());
        assert!(parse_transcript(r#"[{"speaker": "A"}]"#).is_err());
    }

    #[test]
    fn renders_text_lines() {
        let segments = vec![
            TranscriptSegment::at("A", 3.0, " hello "),
            TranscriptSegment::at("B", 3661.0, "bye"),
        ];
        let rendered = render(&segments, OutputFormat::Text).unwrap();
        assert_eq!(rendered, "[00:03] A: hello\n[1:01:01] B: bye\n");
    }

    #[test]
    fn renders_json_array() {
        let segments = vec![TranscriptSegment::at("A", 3.0, "hello")];
        let rendered = render(&segments, OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["speaker"], "A");
        assert_eq!(value[0]["startTimeSeconds"], 3.0);
    }

    #[test]
    fn writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output("content", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "content");
    }
}
