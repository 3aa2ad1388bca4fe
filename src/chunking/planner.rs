use tracing::debug;

use crate::types::{SplitOptions, TranscriptSegment, DEFAULT_MIN_BATCH_CHARACTERS};

use super::accumulator::BatchAccumulator;
use super::duration::estimate_duration;
use super::sentence::split_by_sentence;

/// Greedily merge consecutive segments while their estimated durations fit
/// under `max_duration`.
///
/// A speaker change always closes the open batch when `preserve_speaker` is set.
pub(super) fn batch_by_time(
    segments: &[TranscriptSegment],
    options: &SplitOptions,
) -> Vec<TranscriptSegment> {
    let max_duration = options.max_duration();
    let preserve_speaker = options.preserve_speaker();
    let mut accumulator = BatchAccumulator::new();

    for (idx, segment) in segments.iter().enumerate() {
        let duration = estimate_duration(segment, segments.get(idx + 1));
        let should_cut = accumulator.would_exceed(duration, max_duration)
            || (preserve_speaker && accumulator.speaker_differs(segment));
        if should_cut && !accumulator.is_empty() {
            accumulator.finish_batch();
        }
        accumulator.attach(segment, duration);
    }

    let merged = accumulator.into_segments();
    debug!(
        input = segments.len(),
        output = merged.len(),
        max_duration,
        "time batching finished"
    );
    merged
}

/// Greedily merge consecutive segments while their raw character counts fit
/// under `max_characters`.
///
/// A cut, whether for size or speaker, only happens once the open batch holds at
/// least `min_characters`; an under-filled batch absorbs the next segment
/// instead, even if that overshoots the ceiling or mixes speakers.
pub(super) fn batch_by_characters(
    segments: &[TranscriptSegment],
    options: &SplitOptions,
) -> Vec<TranscriptSegment> {
    let max_characters = options.max_characters() as f64;
    let min_characters = options.min_characters_or(DEFAULT_MIN_BATCH_CHARACTERS) as f64;
    let preserve_speaker = options.preserve_speaker();
    let mut accumulator = BatchAccumulator::new();

    for segment in segments {
        let count = segment.text.chars().count() as f64;
        let should_cut = accumulator.would_exceed(count, max_characters)
            || (preserve_speaker && accumulator.speaker_differs(segment));
        if should_cut && !accumulator.is_empty() && accumulator.measure() >= min_characters {
            accumulator.finish_batch();
        }
        accumulator.attach(segment, count);
    }

    let merged = accumulator.into_segments();
    debug!(
        input = segments.len(),
        output = merged.len(),
        max_characters,
        min_characters,
        "character batching finished"
    );
    merged
}

/// Sentence split, then time-batch the resulting sentences.
pub(super) fn compose_semantic(
    segments: &[TranscriptSegment],
    options: &SplitOptions,
) -> Vec<TranscriptSegment> {
    let sentences = split_by_sentence(segments, options);
    debug!(
        input = segments.len(),
        sentences = sentences.len(),
        "semantic pass split sentences"
    );
    batch_by_time(&sentences, options)
}
