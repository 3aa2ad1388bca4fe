//! Core types for the resegment transcript pipeline

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::timecode::format_time;

pub const DEFAULT_MAX_DURATION: f64 = 30.0;
pub const DEFAULT_MAX_CHARACTERS: usize = 100;
/// Minimum batch size before a forced cut is honored (character mode)
pub const DEFAULT_MIN_BATCH_CHARACTERS: usize = 20;
/// Minimum trimmed length before sentence splitting is attempted
pub const DEFAULT_MIN_SENTENCE_CHARACTERS: usize = 5;

/// One speaker-attributed, timestamped span of transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    pub speaker: String,
    /// Display rendering of `start_time_seconds`
    pub timestamp: String,
    pub start_time_seconds: f64,
    pub text: String,
}

impl TranscriptSegment {
    /// Build a segment whose timestamp is derived from its start time.
    ///
    /// Negative or non-finite start times are clamped to zero.
    pub fn at(
        speaker: impl Into<String>,
        start_time_seconds: f64,
        text: impl Into<String>,
    ) -> Self {
        let start = if start_time_seconds.is_finite() {
            start_time_seconds.max(0.0)
        } else {
            0.0
        };
        Self {
            speaker: speaker.into(),
            timestamp: format_time(start),
            start_time_seconds: start,
            text: text.into(),
        }
    }
}

/// Ordered segments of one transcript
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

/// Segmentation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Split at sentence-terminal punctuation
    Sentence,
    /// Batch consecutive segments up to a duration ceiling
    Time,
    /// Batch consecutive segments up to a character ceiling
    Character,
    /// Sentence split followed by time batching
    Semantic,
    /// Any mode name we do not know; segments pass through untouched
    Unrecognized,
}

impl SplitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SplitMode::Sentence => "sentence",
            SplitMode::Time => "time",
            SplitMode::Character => "character",
            SplitMode::Semantic => "semantic",
            SplitMode::Unrecognized => "unrecognized",
        }
    }
}

impl FromStr for SplitMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "sentence" => SplitMode::Sentence,
            "time" => SplitMode::Time,
            "character" => SplitMode::Character,
            "semantic" => SplitMode::Semantic,
            _ => SplitMode::Unrecognized,
        })
    }
}

impl<'de> Deserialize<'de> for SplitMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(raw
            .as_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or(SplitMode::Unrecognized))
    }
}

/// Mode plus optional tuning knobs.
///
/// Unset (or malformed) knobs resolve to the documented defaults through the
/// accessor methods; the raw fields keep whatever the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitOptions {
    pub mode: SplitMode,
    #[serde(default, deserialize_with = "lenient_positive_f64")]
    pub max_duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_positive_usize")]
    pub max_characters: Option<usize>,
    #[serde(default, deserialize_with = "lenient_positive_usize")]
    pub min_characters: Option<usize>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub preserve_speaker: Option<bool>,
}

impl SplitOptions {
    pub fn new(mode: SplitMode) -> Self {
        Self {
            mode,
            max_duration: None,
            max_characters: None,
            min_characters: None,
            preserve_speaker: None,
        }
    }

    pub fn with_max_duration(mut self, seconds: f64) -> Self {
        self.max_duration = Some(seconds);
        self
    }

    pub fn with_max_characters(mut self, count: usize) -> Self {
        self.max_characters = Some(count);
        self
    }

    pub fn with_min_characters(mut self, count: usize) -> Self {
        self.min_characters = Some(count);
        self
    }

    pub fn with_preserve_speaker(mut self, preserve: bool) -> Self {
        self.preserve_speaker = Some(preserve);
        self
    }

    pub fn max_duration(&self) -> f64 {
        self.max_duration
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(DEFAULT_MAX_DURATION)
    }

    pub fn max_characters(&self) -> usize {
        self.max_characters
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MAX_CHARACTERS)
    }

    /// Minimum character count, falling back to the caller's path default
    pub fn min_characters_or(&self, default: usize) -> usize {
        self.min_characters
            .filter(|value| *value > 0)
            .unwrap_or(default)
    }

    pub fn preserve_speaker(&self) -> bool {
        self.preserve_speaker.unwrap_or(true)
    }
}

pub(crate) fn lenient_positive_f64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.as_f64())
        .filter(|value| value.is_finite() && *value > 0.0))
}

pub(crate) fn lenient_positive_usize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<usize>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.as_u64())
        .filter(|value| *value > 0)
        .and_then(|value| usize::try_from(value).ok()))
}

pub(crate) fn lenient_bool<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.as_bool()))
}
