//! Run and extractor configuration.
//!
//! `RunConfig` carries what a single invocation asks for (where to look, how
//! to name the output, whether to emit diagnostics). `ExtractorConfig` holds
//! the tunable heuristics and can be loaded from a TOML file; every field has
//! a default so a partial file only overrides what it names.

use crate::error::{Error, Result};
use crate::types::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default upper bound on presentations per run.
pub const DEFAULT_MAX_FILES: usize = 7;

/// Options for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Directory holding the presentations; the output is written here.
    pub directory: PathBuf,
    /// Acronym to use instead of the one derived from filenames.
    pub acronym_override: Option<String>,
    /// Output filename to use instead of `<ACRONYM>_Doc Updates & Tickets.docx`.
    pub output_name_override: Option<String>,
    /// Collect per-run classification diagnostics.
    pub debug: bool,
}

impl RunConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn with_acronym(mut self, acronym: Option<String>) -> Self {
        self.acronym_override = acronym;
        self
    }

    pub fn with_output_name(mut self, name: Option<String>) -> Self {
        self.output_name_override = name;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Where the output document goes for the given acronym.
    pub fn output_path(&self, acronym: &str) -> PathBuf {
        let name = match &self.output_name_override {
            Some(name) => name.clone(),
            None => crate::naming::output_filename(acronym),
        };
        self.directory.join(name)
    }
}

/// Tunable extraction heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub classifier: ClassifierConfig,
    pub triggers: TriggerConfig,
    /// Additional phrases that are never vocabulary terms.
    pub extra_excluded_terms: Vec<String>,
    /// Maximum number of presentations in one run.
    pub max_files: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            triggers: TriggerConfig::default(),
            extra_excluded_terms: Vec::new(),
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("invalid config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            return Err(Error::ConfigError("max_files must be at least 1".into()));
        }
        if let Some(hue) = &self.classifier.hue_band {
            if hue.min_hue > hue.max_hue {
                return Err(Error::ConfigError(format!(
                    "hue band is inverted: {} > {}",
                    hue.min_hue, hue.max_hue
                )));
            }
        }
        for band in &self.classifier.rgb_bands {
            if band.min.iter().zip(band.max.iter()).any(|(lo, hi)| lo > hi) {
                return Err(Error::ConfigError(format!(
                    "RGB band is inverted: {:?} > {:?}",
                    band.min, band.max
                )));
            }
        }
        Ok(())
    }
}

/// Color band that makes a bold run a vocabulary marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Inclusive RGB boxes.
    pub rgb_bands: Vec<RgbBand>,
    /// Hue range checked when no box matches. `None` disables it.
    pub hue_band: Option<HueBand>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rgb_bands: vec![
                // blue; red and green capped so white and light grays stay out
                RgbBand::new([0, 0, 200], [150, 150, 255]),
                // turquoise
                RgbBand::new([0, 100, 150], [100, 255, 255]),
                // light blue
                RgbBand::new([0, 150, 200], [150, 255, 255]),
                // dodger blue
                RgbBand::new([30, 144, 255], [70, 180, 255]),
                // deep sky blue
                RgbBand::new([0, 191, 255], [50, 220, 255]),
                // turquoise
                RgbBand::new([64, 224, 208], [100, 255, 230]),
            ],
            hue_band: Some(HueBand::default()),
        }
    }
}

/// Inclusive per-channel RGB range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbBand {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl RgbBand {
    pub const fn new(min: [u8; 3], max: [u8; 3]) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, color: Rgb) -> bool {
        let channels = [color.r, color.g, color.b];
        channels
            .iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }
}

/// HSV band: hue in degrees, saturation and value as fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueBand {
    pub min_hue: f64,
    pub max_hue: f64,
    pub min_saturation: f64,
    pub min_value: f64,
}

impl Default for HueBand {
    fn default() -> Self {
        Self {
            min_hue: 170.0,
            max_hue: 250.0,
            min_saturation: 0.45,
            min_value: 0.30,
        }
    }
}

impl HueBand {
    pub fn contains(&self, color: Rgb) -> bool {
        let (hue, saturation, value) = color.to_hsv();
        saturation >= self.min_saturation
            && value >= self.min_value
            && (self.min_hue..=self.max_hue).contains(&hue)
    }
}

/// Phrases that start list collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub goals: Vec<String>,
    pub assessments: Vec<String>,
    pub careers: Vec<String>,
    pub materials: Vec<String>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        let owned = |phrases: &[&str]| phrases.iter().map(|p| p.to_string()).collect();
        Self {
            goals: owned(&[
                "In today's session, you will",
                "In this session, you will",
                "Today, you will",
            ]),
            assessments: owned(&[
                "your instructor will be evaluating you",
                "listed onscreen are the specific items",
                "you will be evaluated on",
                "instructor will evaluate",
                "evaluation criteria",
                "assessment criteria",
            ]),
            careers: owned(&["Related Careers", "Careers"]),
            materials: owned(&[
                "Gather the following items",
                "Gather the following item",
                "Locate the following",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = ExtractorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.max_files, 7);
    }

    #[test]
    fn test_parse_partial_override() {
        let toml = r#"
max_files = 3
extra_excluded_terms = ["Lab Safety"]

[triggers]
goals = ["By the end of this session"]

[classifier.hue_band]
min_hue = 180.0
"#;
        let config = ExtractorConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.max_files, 3);
        assert_eq!(config.extra_excluded_terms, vec!["Lab Safety"]);
        assert_eq!(config.triggers.goals, vec!["By the end of this session"]);
        // Untouched trigger lists keep their defaults
        assert_eq!(config.triggers.assessments, TriggerConfig::default().assessments);
        let hue = config.classifier.hue_band.unwrap();
        assert_eq!(hue.min_hue, 180.0);
        assert_eq!(hue.max_hue, 250.0);
    }

    #[test]
    fn test_parse_rgb_bands() {
        let toml = r#"
[classifier]
rgb_bands = [{ min = [0, 0, 150], max = [60, 60, 255] }]
"#;
        let config = ExtractorConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.classifier.rgb_bands.len(), 1);
        assert!(config.classifier.rgb_bands[0].contains(Rgb::new(10, 20, 200)));
        assert!(!config.classifier.rgb_bands[0].contains(Rgb::new(100, 20, 200)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(ExtractorConfig::from_toml_str("max_files = 0").is_err());
        assert!(ExtractorConfig::from_toml_str("max_files = \"seven\"").is_err());
        let inverted = r#"
[classifier.hue_band]
min_hue = 260.0
max_hue = 200.0
"#;
        assert!(ExtractorConfig::from_toml_str(inverted).is_err());
    }

    #[test]
    fn test_output_path() {
        let config = RunConfig::new("/decks");
        assert_eq!(
            config.output_path("MATS"),
            PathBuf::from("/decks/MATS_Doc Updates & Tickets.docx")
        );

        let config = RunConfig::new("/decks").with_output_name(Some("custom.docx".into()));
        assert_eq!(config.output_path("MATS"), PathBuf::from("/decks/custom.docx"));
    }
}
