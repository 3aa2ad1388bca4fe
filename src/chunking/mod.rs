//! Re-partition transcript segments by sentence, time window or character count.

mod accumulator;
mod duration;
mod merge;
mod planner;
mod sentence;


use tracing::debug;

use crate::types::{SplitMode, SplitOptions, TranscriptSegment};

/// Pure function that re-segments `segments` according to `options.mode`.
///
/// Inputs are never mutated. An unrecognized mode returns a copy of the input.
pub fn split_segments(
    segments: &[TranscriptSegment],
    options: &SplitOptions,
) -> Vec<TranscriptSegment> {
    debug!(mode = options.mode.as_str(), input = segments.len(), "splitting segments");
    match options.mode {
        SplitMode::Sentence => sentence::split_by_sentence(segments, options),
        SplitMode::Time => planner::batch_by_time(segments, options),
        SplitMode::Character => planner::batch_by_characters(segments, options),
        SplitMode::Semantic => planner::compose_semantic(segments, options),
        SplitMode::Unrecognized => {
            debug!("unrecognized split mode; returning segments unchanged");
            segments.to_vec()
        }
    }
}
