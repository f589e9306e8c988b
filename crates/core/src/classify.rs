//! Color/style classification of text runs.

use crate::config::ClassifierConfig;
use crate::types::{Rgb, TextRun};

/// Decides whether a run marks a vocabulary term (bold and blue/turquoise).
#[derive(Debug, Clone, Default)]
pub struct StyleClassifier {
    config: ClassifierConfig,
}

impl StyleClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Whether a color falls inside the configured blue/turquoise band.
    pub fn is_blue(&self, color: Rgb) -> bool {
        if self.config.rgb_bands.iter().any(|band| band.contains(color)) {
            return true;
        }
        self.config
            .hue_band
            .as_ref()
            .map(|band| band.contains(color))
            .unwrap_or(false)
    }

    /// Marker decision from raw attributes. Unset attributes never qualify.
    pub fn is_marker_style(&self, color: Option<Rgb>, bold: Option<bool>) -> bool {
        match (color, bold) {
            (Some(color), Some(true)) => self.is_blue(color),
            _ => false,
        }
    }

    /// Marker decision for a run. Whitespace-only runs are never markers.
    pub fn is_marker(&self, run: &TextRun) -> bool {
        !run.text.trim().is_empty() && self.is_marker_style(run.color, run.bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HueBand;

    #[test]
    fn test_common_powerpoint_blues() {
        let classifier = StyleClassifier::default();
        // Standard "Blue" and "Light Blue" from the Office palette
        assert!(classifier.is_blue(Rgb::new(0x00, 0x70, 0xC0)));
        assert!(classifier.is_blue(Rgb::new(0x00, 0xB0, 0xF0)));
        // Turquoise
        assert!(classifier.is_blue(Rgb::new(64, 224, 208)));
        assert!(classifier.is_blue(Rgb::new(0, 128, 160)));
        // Office theme accents
        assert!(classifier.is_blue(Rgb::new(0x44, 0x72, 0xC4)));
        assert!(classifier.is_blue(Rgb::new(0x5B, 0x9B, 0xD5)));
    }

    #[test]
    fn test_non_blue_colors() {
        let classifier = StyleClassifier::default();
        assert!(!classifier.is_blue(Rgb::new(0, 0, 0)));
        assert!(!classifier.is_blue(Rgb::new(255, 0, 0)));
        assert!(!classifier.is_blue(Rgb::new(0x70, 0xAD, 0x47)));
        assert!(!classifier.is_blue(Rgb::new(128, 128, 128)));
        assert!(!classifier.is_blue(Rgb::new(0x59, 0x59, 0x59)));
        assert!(!classifier.is_blue(Rgb::new(255, 255, 255)));
        assert!(!classifier.is_blue(Rgb::new(0xD9, 0xD9, 0xD9)));
        // Office "Text 2" slate
        assert!(!classifier.is_blue(Rgb::new(0x44, 0x54, 0x6A)));
    }

    #[test]
    fn test_marker_requires_bold_and_color() {
        let classifier = StyleClassifier::default();
        let blue = Some(Rgb::new(0x00, 0x70, 0xC0));

        assert!(classifier.is_marker_style(blue, Some(true)));
        assert!(!classifier.is_marker_style(blue, Some(false)));
        assert!(!classifier.is_marker_style(blue, None));
        assert!(!classifier.is_marker_style(None, Some(true)));
        assert!(!classifier.is_marker_style(Some(Rgb::new(0, 0, 0)), Some(true)));
    }

    #[test]
    fn test_whitespace_run_is_not_marker() {
        let classifier = StyleClassifier::default();
        let run = TextRun::styled("  ", Some(true), Some(Rgb::new(0, 0, 255)));
        assert!(!classifier.is_marker(&run));
    }

    #[test]
    fn test_custom_band() {
        let classifier = StyleClassifier::new(ClassifierConfig {
            rgb_bands: Vec::new(),
            hue_band: Some(HueBand {
                min_hue: 200.0,
                max_hue: 220.0,
                min_saturation: 0.5,
                min_value: 0.5,
            }),
        });
        assert!(classifier.is_blue(Rgb::new(0x00, 0x70, 0xC0)));
        assert!(!classifier.is_blue(Rgb::new(0x00, 0x00, 0xFF)));

        let disabled = StyleClassifier::new(ClassifierConfig {
            rgb_bands: Vec::new(),
            hue_band: None,
        });
        assert!(!disabled.is_blue(Rgb::new(0x00, 0x70, 0xC0)));
    }
}
