use crate::types::{SplitOptions, TranscriptSegment, DEFAULT_MIN_SENTENCE_CHARACTERS};

use super::duration::estimate_duration;

/// Full-width and half-width period, exclamation mark, question mark, semicolon
const TERMINAL_PUNCTUATION: [char; 8] = ['。', '.', '！', '!', '？', '?', '；', ';'];

fn is_terminal(ch: char) -> bool {
    TERMINAL_PUNCTUATION.contains(&ch)
}

/// Split every segment at sentence-terminal punctuation.
///
/// Child start times are interpolated across the parent's estimated duration in
/// proportion to each part's share of the trimmed text.
pub(super) fn split_by_sentence(
    segments: &[TranscriptSegment],
    options: &SplitOptions,
) -> Vec<TranscriptSegment> {
    let min_characters = options.min_characters_or(DEFAULT_MIN_SENTENCE_CHARACTERS);
    let mut output = Vec::with_capacity(segments.len());

    for (idx, segment) in segments.iter().enumerate() {
        let text = segment.text.trim();
        let total_chars = text.chars().count();

        if total_chars < min_characters || !text.contains(is_terminal) {
            output.push(segment.clone());
            continue;
        }

        let parts: Vec<&str> = sentence_parts(text)
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() <= 1 {
            output.push(segment.clone());
            continue;
        }

        let duration = estimate_duration(segment, segments.get(idx + 1));
        let mut offset = 0.0;
        for part in parts {
            let share = part.chars().count() as f64 / total_chars as f64;
            output.push(TranscriptSegment::at(
                segment.speaker.clone(),
                segment.start_time_seconds + offset,
                part,
            ));
            offset += duration * share;
        }
    }

    output
}

/// Slice `text` after each run of terminal punctuation, keeping the run with
/// the text before it.
///
/// A run separated from the previous part only by whitespace is appended to
/// that part ("Hello. ." stays one part). A leading run with no part before it
/// is skipped. No part ever begins with a terminal mark.
fn sentence_parts(text: &str) -> Vec<&str> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_terminal(ch) {
            continue;
        }
        let mut end = idx + ch.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if !is_terminal(next) {
                break;
            }
            end = next_idx + next.len_utf8();
            chars.next();
        }
        let spoken = text[start..end]
            .chars()
            .any(|c| !c.is_whitespace() && !is_terminal(c));
        if spoken {
            ranges.push((start, end));
        } else if let Some(last) = ranges.last_mut() {
            last.1 = end;
        }
        start = end;
    }

    if start < text.len() {
        ranges.push((start, text.len()));
    }
    ranges
        .into_iter()
        .map(|(from, to)| &text[from..to])
        .collect()
}
