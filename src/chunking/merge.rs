use crate::types::TranscriptSegment;

/// Collapse a batch into one segment starting at `start_time`.
///
/// Texts are joined with single spaces as-is; the speaker comes from the first
/// segment. Returns `None` for an empty batch.
pub(super) fn merge_batch<'a, I>(batch: I, start_time: f64) -> Option<TranscriptSegment>
where
    I: IntoIterator<Item = &'a TranscriptSegment>,
{
    let mut segments = batch.into_iter();
    let first = segments.next()?;
    let mut text = first.text.clone();
    for segment in segments {
        text.push(' ');
        text.push_str(&segment.text);
    }
    Some(TranscriptSegment::at(first.speaker.clone(), start_time, text))
}
