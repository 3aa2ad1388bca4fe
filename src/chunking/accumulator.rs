use tracing::trace;

use crate::types::TranscriptSegment;

use super::merge::merge_batch;

/// Greedy batch state shared by the time and character batchers.
///
/// `measure` is whatever quantity the caller bounds: estimated seconds for time
/// batching, raw character count for character batching.
pub(super) struct BatchAccumulator<'a> {
    merged: Vec<TranscriptSegment>,
    current: Vec<&'a TranscriptSegment>,
    current_start: f64,
    current_measure: f64,
}

impl<'a> BatchAccumulator<'a> {
    pub(super) fn new() -> Self {
        Self {
            merged: Vec::new(),
            current: Vec::new(),
            current_start: 0.0,
            current_measure: 0.0,
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub(super) fn measure(&self) -> f64 {
        self.current_measure
    }

    /// Adding `amount` would push the open batch past `limit`
    pub(super) fn would_exceed(&self, amount: f64, limit: f64) -> bool {
        self.current_measure + amount > limit
    }

    /// The open batch belongs to a different speaker than `segment`
    pub(super) fn speaker_differs(&self, segment: &TranscriptSegment) -> bool {
        self.current
            .first()
            .is_some_and(|first| first.speaker != segment.speaker)
    }

    pub(super) fn attach(&mut self, segment: &'a TranscriptSegment, amount: f64) {
        if self.current.is_empty() {
            self.current_start = segment.start_time_seconds;
        }
        self.current.push(segment);
        self.current_measure += amount;
    }

    pub(super) fn finish_batch(&mut self) {
        if let Some(segment) = merge_batch(self.current.iter().copied(), self.current_start) {
            trace!(
                parts = self.current.len(),
                measure = self.current_measure,
                start = self.current_start,
                "closed batch"
            );
            self.merged.push(segment);
        }
        self.current.clear();
        self.current_measure = 0.0;
    }

    pub(super) fn into_segments(mut self) -> Vec<TranscriptSegment> {
        self.finish_batch();
        self.merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_time_is_pinned_to_first_attached_segment() {
        let first = TranscriptSegment::at("A", 2.0, "a");
        let second = TranscriptSegment::at("A", 9.0, "b");
        let mut accumulator = BatchAccumulator::new();
        accumulator.attach(&first, 1.0);
        accumulator.attach(&second, 1.0);
        assert_eq!(accumulator.measure(), 2.0);

        let merged = accumulator.into_segments();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start_time_seconds, 2.0);
        assert_eq!(merged[0].text, "a b");
    }

    #[test]
    fn finish_resets_measure_and_speaker() {
        let first = TranscriptSegment::at("A", 0.0, "a");
        let other = TranscriptSegment::at("B", 1.0, "b");
        let mut accumulator = BatchAccumulator::new();
        assert!(!accumulator.speaker_differs(&other));

        accumulator.attach(&first, 4.0);
        assert!(accumulator.speaker_differs(&other));
        assert!(accumulator.would_exceed(2.0, 5.0));
        assert!(!accumulator.would_exceed(1.0, 5.0));

        accumulator.finish_batch();
        assert!(accumulator.is_empty());
        assert_eq!(accumulator.measure(), 0.0);
        assert!(!accumulator.speaker_differs(&other));
    }

    #[test]
    fn empty_accumulator_emits_nothing() {
        assert!(BatchAccumulator::new().into_segments().is_empty());
    }
}
