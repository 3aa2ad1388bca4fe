use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::types::{
    lenient_bool, lenient_positive_f64, lenient_positive_usize, SplitMode, SplitOptions,
};

/// Options read from a file or inline JSON, where every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsDocument {
    #[serde(default)]
    mode: Option<SplitMode>,
    #[serde(default, deserialize_with = "lenient_positive_f64")]
    max_duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_positive_usize")]
    max_characters: Option<usize>,
    #[serde(default, deserialize_with = "lenient_positive_usize")]
    min_characters: Option<usize>,
    #[serde(default, deserialize_with = "lenient_bool")]
    preserve_speaker: Option<bool>,
}

/// Per-field overrides, typically from command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionOverrides {
    pub mode: Option<SplitMode>,
    pub max_duration: Option<f64>,
    pub max_characters: Option<usize>,
    pub min_characters: Option<usize>,
    pub preserve_speaker: Option<bool>,
}

/// Resolve split options: options file or inline JSON first, then overrides.
///
/// A mode must come from one of the sources. Unset knobs stay unset so the
/// per-path defaults apply downstream.
pub fn resolve_options(
    path: Option<&Path>,
    json: Option<&str>,
    overrides: &OptionOverrides,
) -> Result<SplitOptions> {
    let document = load_options_document(path, json)?;

    let Some(mode) = overrides.mode.or(document.mode) else {
        bail!("No split mode provided; pass --mode or set \"mode\" in the options");
    };

    Ok(SplitOptions {
        mode,
        max_duration: overrides.max_duration.or(document.max_duration),
        max_characters: overrides.max_characters.or(document.max_characters),
        min_characters: overrides.min_characters.or(document.min_characters),
        preserve_speaker: overrides.preserve_speaker.or(document.preserve_speaker),
    })
}

fn load_options_document(path: Option<&Path>, json: Option<&str>) -> Result<OptionsDocument> {
    if let Some(p) = path {
        let data = fs::read_to_string(p)
            .with_context(|| format!("Failed to read options file {:?}", p))?;
        return parse_options_document(&data)
            .with_context(|| format!("Invalid options file {:?}", p));
    }

    if let Some(raw) = json {
        return parse_options_document(raw);
    }

    Ok(OptionsDocument::default())
}

fn parse_options_document(raw: &str) -> Result<OptionsDocument> {
    let document: OptionsDocument =
        serde_json::from_str(raw).context("Failed to parse options JSON")?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{resolve_options, OptionOverrides};
    use crate::types::SplitMode;

    #[test]
    fn requires_a_mode() {
        let err = resolve_options(None, None, &OptionOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("No split mode"));
    }

    #[test]
    fn inline_json_supplies_options() {
        let options = resolve_options(
            None,
            Some(r#"{"mode": "character", "maxCharacters": 40, "preserveSpeaker": false}"#),
            &OptionOverrides::default(),
        )
        .unwrap();
        assert_eq!(options.mode, SplitMode::Character);
        assert_eq!(options.max_characters(), 40);
        assert!(!options.preserve_speaker());
        assert_eq!(options.min_characters, None);
    }

    #[test]
    fn overrides_win_over_document() {
        let overrides = OptionOverrides {
            mode: Some(SplitMode::Time),
            max_duration: Some(12.0),
            ..OptionOverrides::default()
        };
        let options = resolve_options(
            None,
            Some(r#"{"mode": "sentence", "maxDuration": 50, "minCharacters": 8}"#),
            &overrides,
        )
        .unwrap();
        assert_eq!(options.mode, SplitMode::Time);
        assert_eq!(options.max_duration(), 12.0);
        assert_eq!(options.min_characters, Some(8));
    }

    #[test]
    fn reads_options_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mode": "semantic", "maxDuration": "long"}}"#).unwrap();
        let options =
            resolve_options(Some(file.path()), None, &OptionOverrides::default()).unwrap();
        assert_eq!(options.mode, SplitMode::Semantic);
        assert_eq!(options.max_duration, None);
        assert_eq!(options.max_duration(), 30.0);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = resolve_options(
            Some(std::path::Path::new("/definitely/not/here.json")),
            None,
            &OptionOverrides::default(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read options file"));
    }

    #[test]
    fn rejects_non_json_document() {
        assert!(resolve_options(None, Some("mode=time"), &OptionOverrides::default()).is_err());
    }
}
