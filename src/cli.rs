use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{ArgAction, Args, Parser};

use crate::config::OptionOverrides;
use crate::transcript::OutputFormat;
use crate::types::SplitMode;

/// Re-partition timestamped transcript segments by sentence, time or size.
#[derive(Parser, Debug)]
#[command(name = "resegment", version, long_about = None)]
pub struct Cli {
    /// Transcript JSON file; reads stdin when omitted or "-".
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub split: SplitArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Split mode: sentence, time, character or semantic.
    #[arg(long, short)]
    pub mode: Option<String>,
    /// Batch duration ceiling in seconds (time and semantic modes).
    #[arg(long = "max-duration", value_name = "SECONDS")]
    pub max_duration: Option<f64>,
    /// Batch size ceiling in characters (character mode).
    #[arg(long = "max-characters", value_name = "COUNT")]
    pub max_characters: Option<usize>,
    /// Minimum batch size before a cut, or minimum length to sentence-split.
    #[arg(long = "min-characters", value_name = "COUNT")]
    pub min_characters: Option<usize>,
    /// Start a new batch whenever the speaker changes.
    #[arg(long = "preserve-speaker", value_name = "BOOL", action = ArgAction::Set)]
    pub preserve_speaker: Option<bool>,
    /// Path to a JSON options document.
    #[arg(long = "options-file", value_name = "PATH", conflicts_with = "options_json")]
    pub options_file: Option<PathBuf>,
    /// Inline JSON options document.
    #[arg(long = "options-json", value_name = "JSON", conflicts_with = "options_file")]
    pub options_json: Option<String>,
}

impl SplitArgs {
    /// Reject flag values that can never be meaningful.
    pub fn validate(&self) -> Result<()> {
        if let Some(seconds) = self.max_duration {
            ensure!(
                seconds.is_finite() && seconds > 0.0,
                "max-duration must be positive, got: {}",
                seconds
            );
        }
        if let Some(count) = self.max_characters {
            ensure!(count > 0, "max-characters must be positive");
        }
        if let Some(count) = self.min_characters {
            ensure!(count > 0, "min-characters must be positive");
        }
        Ok(())
    }

    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            mode: self
                .mode
                .as_deref()
                .map(|raw| raw.parse().unwrap_or(SplitMode::Unrecognized)),
            max_duration: self.max_duration,
            max_characters: self.max_characters,
            min_characters: self.min_characters,
            preserve_speaker: self.preserve_speaker,
        }
    }
}
