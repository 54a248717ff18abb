use std::num::NonZeroU32;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How `diff` prints its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Single-line JSON patch.
    #[default]
    Compact,
    /// Indented JSON patch.
    Pretty,
    /// Row counts and percentages.
    Summary,
}

/// Defaults for every command, optionally read from a TOML file.
///
/// Command-line flags take precedence over values set here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Field separator for input and output files.
    pub separator: char,
    /// Columns left out of every comparison.
    pub ignore_columns: Vec<String>,
    /// Significant figures for numeric comparison.
    pub significance: Option<NonZeroU32>,
    /// Output style of `diff`.
    pub style: Style,
    /// Whether `patch` requires an unchanged source.
    pub strict: bool,
    /// Number of candidates `rank` keeps.
    pub top: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            separator: ',',
            ignore_columns: Vec::new(),
            significance: None,
            style: Style::Compact,
            strict: true,
            top: 5,
        }
    }
}

impl DiffConfig {
    /// Read the config file, or fall back to defaults when none is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}

/// Convert a separator character to the single byte the reader expects.
pub fn separator_byte(separator: char) -> anyhow::Result<u8> {
    if separator.is_ascii() {
        Ok(separator as u8)
    } else {
        anyhow::bail!("separator must be a single ASCII character, got {separator:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DiffConfig::default();
        assert_eq!(c.separator, ',');
        assert!(c.ignore_columns.is_empty());
        assert!(c.significance.is_none());
        assert_eq!(c.style, Style::Compact);
        assert!(c.strict);
        assert_eq!(c.top, 5);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c: DiffConfig = toml::from_str(
            r#"
            separator = ";"
            ignore_columns = ["UPDATED_BY", "SN"]
            significance = 4
            "#,
        )
        .unwrap();
        assert_eq!(c.separator, ';');
        assert_eq!(c.ignore_columns, vec!["UPDATED_BY", "SN"]);
        assert_eq!(c.significance.map(|s| s.get()), Some(4));
        assert!(c.strict);
        assert_eq!(c.top, 5);
    }

    #[test]
    fn style_and_strictness() {
        let c: DiffConfig = toml::from_str("style = \"pretty\"\nstrict = false\n").unwrap();
        assert_eq!(c.style, Style::Pretty);
        assert!(!c.strict);
    }

    #[test]
    fn zero_significance_rejected() {
        assert!(toml::from_str::<DiffConfig>("significance = 0").is_err());
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(DiffConfig::load(None).unwrap(), DiffConfig::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rowdiff.toml");
        std::fs::write(&path, "top = 2\n").unwrap();
        assert_eq!(DiffConfig::load(Some(&path)).unwrap().top, 2);
    }

    #[test]
    fn separator_must_be_ascii() {
        assert_eq!(separator_byte('\t').unwrap(), b'\t');
        assert!(separator_byte('§').is_err());
    }
}
