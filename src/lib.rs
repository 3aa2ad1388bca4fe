pub mod chunking;
pub mod cli;
pub mod config;
pub mod timecode;
pub mod transcript;
pub mod types;

pub use chunking::split_segments;
pub use timecode::format_time;
pub use types::{SplitMode, SplitOptions, Transcript, TranscriptSegment};
