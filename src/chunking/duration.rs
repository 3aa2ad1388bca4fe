use crate::types::TranscriptSegment;

/// Gaps above this are treated as a missing or unreliable timestamp
pub(super) const MAX_RELIABLE_GAP: f64 = 60.0;
/// ~4 spoken CJK ideographs per second
pub(super) const SECONDS_PER_CJK_CHAR: f64 = 0.25;
/// ~20 other characters per second
pub(super) const SECONDS_PER_OTHER_CHAR: f64 = 0.05;

/// Speaking duration of `segment`, in seconds.
///
/// Uses the gap to `next` when it is in `(0, 60]`, otherwise estimates from the
/// trimmed text.
pub(super) fn estimate_duration(
    segment: &TranscriptSegment,
    next: Option<&TranscriptSegment>,
) -> f64 {
    if let Some(next) = next {
        let gap = next.start_time_seconds - segment.start_time_seconds;
        if gap > 0.0 && gap <= MAX_RELIABLE_GAP {
            return gap;
        }
    }
    estimate_from_text(segment.text.trim())
}

pub(super) fn estimate_from_text(text: &str) -> f64 {
    let (cjk, other) = text.chars().fold((0usize, 0usize), |(cjk, other), ch| {
        if is_cjk_ideograph(ch) {
            (cjk + 1, other)
        } else {
            (cjk, other + 1)
        }
    });
    cjk as f64 * SECONDS_PER_CJK_CHAR + other as f64 * SECONDS_PER_OTHER_CHAR
}

fn is_cjk_ideograph(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FA5}').contains(&ch)
}
