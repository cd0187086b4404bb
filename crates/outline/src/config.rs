//! Tunable thresholds for every pipeline stage.
//!
//! All values are empirical. Defaults reproduce the standard extractor; the
//! multilingual profile additionally aligns merges horizontally, repairs
//! hyphenation and groups title fragments. Every field may be overridden from
//! a TOML file, missing fields keep their defaults:
//!
//! ```toml
//! [merge]
//! y_threshold = 5.0
//! x_alignment = 40.0
//!
//! [title]
//! strategy = "grouped"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::OutlineError;

/// Named bundle of defaults matching one of the two extractor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Standard,
    Multilingual,
}

/// Which [`TitleSelector`](crate::title::TitleSelector) the pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleStrategy {
    /// Score every heading-length block on its own.
    #[default]
    Block,
    /// Group adjacent fragments on early pages and score the groups.
    Grouped,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub normalize: NormalizeConfig,
    pub merge: MergeConfig,
    pub heading: HeadingConfig,
    pub title: TitleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Spans with fewer whitespace-separated tokens are dropped.
    pub min_tokens: usize,
    /// Apply NFC normalization, ligature expansion and U+FFFD removal before
    /// filtering. Off by default: span text then reaches the outline verbatim.
    pub clean_text: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            min_tokens: 2,
            clean_text: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Maximum distance between a span's top and the block's bottom.
    pub y_threshold: f32,
    /// Font sizes must differ by strictly less than this to merge.
    pub max_size_delta: f32,
    /// When set, left edges must differ by strictly less than this.
    pub x_alignment: Option<f32>,
    /// Repair line-wrap hyphenation when a block is sealed.
    pub repair_hyphenation: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            y_threshold: 4.0,
            max_size_delta: 1.0,
            x_alignment: None,
            repair_hyphenation: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    /// Blocks with at least this many characters are treated as body text.
    pub max_chars: usize,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self { max_chars: 150 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub strategy: TitleStrategy,
    /// Nominal horizontal page centre used for the centring penalty.
    pub page_center: f32,
    pub size_weight: f32,
    pub center_weight: f32,
    /// Per-page penalty of the single-block score.
    pub page_penalty: f32,
    pub group: GroupConfig,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            strategy: TitleStrategy::Block,
            page_center: 300.0,
            size_weight: 10.0,
            center_weight: 0.01,
            page_penalty: 2.0,
            group: GroupConfig::default(),
        }
    }
}

/// Candidate filter, adjacency limits and score weights of grouped title selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    pub max_page: usize,
    pub min_size: f32,
    /// Inclusive limit on the size difference between neighbours.
    pub max_size_delta: f32,
    /// Exclusive limit on the gap between a block's top and the previous bottom.
    pub max_gap: f32,
    /// Exclusive limit on the difference between left edges.
    pub max_x_offset: f32,
    pub page_penalty: f32,
    /// Score added per character of the joined group text.
    pub length_weight: f32,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            max_page: 2,
            min_size: 12.0,
            max_size_delta: 1.0,
            max_gap: 6.0,
            max_x_offset: 40.0,
            page_penalty: 3.0,
            length_weight: 0.1,
        }
    }
}

impl LayoutConfig {
    /// Defaults for the given extractor variant.
    pub fn for_profile(profile: Profile) -> Self {
        let mut config = LayoutConfig::default();
        if profile == Profile::Multilingual {
            config.merge.x_alignment = Some(40.0);
            config.merge.repair_hyphenation = true;
            config.title.strategy = TitleStrategy::Grouped;
        }
        config
    }

    pub fn from_toml_str(s: &str) -> Result<Self, OutlineError> {
        Ok(toml::from_str(s)?)
    }

    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, OutlineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_standard_defaults() {
        let config = LayoutConfig::for_profile(Profile::Standard);
        assert_eq!(config, LayoutConfig::default());
        assert!((config.merge.y_threshold - 4.0).abs() < f32::EPSILON);
        assert!(config.merge.x_alignment.is_none());
        assert!(!config.merge.repair_hyphenation);
        assert_eq!(config.heading.max_chars, 150);
        assert_eq!(config.title.strategy, TitleStrategy::Block);
        assert!(!config.normalize.clean_text);
    }

    #[test]
    fn test_multilingual_profile() {
        let config = LayoutConfig::for_profile(Profile::Multilingual);
        assert_eq!(config.merge.x_alignment, Some(40.0));
        assert!(config.merge.repair_hyphenation);
        assert_eq!(config.title.strategy, TitleStrategy::Grouped);
        // Untouched stages keep their defaults.
        assert_eq!(config.heading, HeadingConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LayoutConfig::from_toml_str(
            r#"
            [merge]
            y_threshold = 5.5

            [title]
            strategy = "grouped"

            [title.group]
            max_page = 0
            "#,
        )
        .unwrap();

        assert!((config.merge.y_threshold - 5.5).abs() < f32::EPSILON);
        assert!((config.merge.max_size_delta - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.title.strategy, TitleStrategy::Grouped);
        assert_eq!(config.title.group.max_page, 0);
        assert!((config.title.group.max_gap - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = LayoutConfig::from_toml_str("").unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = LayoutConfig::from_toml_str("[merge]\ny_threshold = \"far\"");
        assert!(matches!(result, Err(OutlineError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[heading]\nmax_chars = 80").unwrap();

        let config = LayoutConfig::load(file.path()).unwrap();
        assert_eq!(config.heading.max_chars, 80);
    }

    #[test]
    fn test_load_missing_file() {
        let result = LayoutConfig::load(Path::new("/nonexistent/docoutline.toml"));
        assert!(matches!(result, Err(OutlineError::Io(_))));
    }
}
