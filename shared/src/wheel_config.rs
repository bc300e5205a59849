use serde::{Deserialize, Serialize};

use crate::border_styles::DEFAULT_BORDER_STYLE;
use crate::outcome::SpinMode;
use crate::segment::{normalize_segments, Segment};
use crate::spin_animator::SpinSpeed;
use crate::theme::{BrandColors, ThemeSpec};

/// The configuration object the embedding page persists and supplies.
/// Everything is optional with sensible defaults so partial or legacy
/// JSON keeps loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    pub segments: Vec<Segment>,
    pub theme: ThemeSpec,
    pub spin_mode: SpinMode,
    pub win_probability: f64,
    pub speed: Option<SpinSpeed>,
    pub border_style: String,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub show_bulbs: bool,
    pub size: f64,
    pub disabled: bool,
    pub disable_pointer_animation: bool,
    pub brand_colors: Option<BrandColors>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            theme: ThemeSpec::default(),
            spin_mode: SpinMode::default(),
            win_probability: 50.0,
            speed: None,
            border_style: DEFAULT_BORDER_STYLE.to_string(),
            border_color: None,
            border_width: None,
            show_bulbs: true,
            size: 380.0,
            disabled: false,
            disable_pointer_animation: false,
            brand_colors: None,
        }
    }
}

impl WheelConfig {
    /// Boundary normalization: cleans the segment list and clamps the win
    /// probability into 0–100.
    pub fn normalized(mut self) -> Self {
        self.segments = normalize_segments(self.segments);
        if !self.win_probability.is_finite() {
            self.win_probability = 50.0;
        }
        self.win_probability = self.win_probability.clamp(0.0, 100.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_loads_with_defaults() {
        let config: WheelConfig =
            serde_json::from_str(r#"{"segments":[{"label":"Prize"}],"spin_mode":"probability"}"#)
                .expect("config parses");
        assert_eq!(config.spin_mode, SpinMode::Probability);
        assert_eq!(config.border_style, DEFAULT_BORDER_STYLE);
        assert_eq!(config.win_probability, 50.0);
        assert!(config.show_bulbs);
    }

    #[test]
    fn normalized_clamps_probability_and_fills_segment_ids() {
        let mut config = WheelConfig {
            segments: vec![Segment::new("", "Prize")],
            win_probability: 250.0,
            ..WheelConfig::default()
        };
        config = config.normalized();
        assert_eq!(config.win_probability, 100.0);
        assert_eq!(config.segments[0].id, "segment-0");
    }
}
