use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Label substrings that mark a slice as a losing one when the config
/// carries no explicit `is_winning` flag. Legacy compatibility with
/// configurations authored before the flag existed.
pub const LOSING_LABEL_MARKERS: &[&str] =
    &["dommage", "perdu", "perdant", "lose", "lost", "try again"];

/// A `probability` of exactly 100 forces that segment to win regardless of
/// spin mode.
pub const HARD_OVERRIDE_PROBABILITY: f64 = 100.0;

/// One angular slice of the wheel. List order defines angular order
/// starting at 12 o'clock and proceeding clockwise; every slice spans
/// 360°/N.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Segment {
    pub id: String,
    pub label: String,
    /// Fill color; alternates between the theme primary/secondary when
    /// absent.
    pub color: Option<String>,
    /// Explicit label color; contrast heuristic applies when absent.
    pub text_color: Option<String>,
    /// Non-negative weight; exactly 100 is a hard override (see
    /// [`HARD_OVERRIDE_PROBABILITY`]).
    pub probability: f64,
    pub image_url: Option<String>,
    pub icon: Option<String>,
    /// Explicit winner classification. Takes precedence over the label
    /// heuristic when present.
    pub is_winning: Option<bool>,
}

impl Default for Segment {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            color: None,
            text_color: None,
            probability: 0.0,
            image_url: None,
            icon: None,
            is_winning: None,
        }
    }
}

impl Segment {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Whether this slice counts as a losing one for the `probability`
    /// and `instant_winner` policies.
    pub fn is_losing(&self) -> bool {
        if let Some(winning) = self.is_winning {
            return !winning;
        }
        let label = self.label.to_lowercase();
        LOSING_LABEL_MARKERS.iter().any(|marker| label.contains(marker))
    }

    pub fn has_hard_override(&self) -> bool {
        self.probability == HARD_OVERRIDE_PROBABILITY
    }

    /// Image source for the slice, `image_url` winning over `icon`.
    pub fn image_source(&self) -> Option<&str> {
        self.image_url.as_deref().or(self.icon.as_deref())
    }

    /// Fill color for the slice at `index`, alternating theme colors when
    /// none is configured.
    pub fn fill_color<'a>(&'a self, theme: &'a Theme, index: usize) -> &'a str {
        match self.color.as_deref() {
            Some(color) if !color.is_empty() => color,
            _ => {
                if index % 2 == 0 {
                    &theme.primary
                } else {
                    &theme.secondary
                }
            }
        }
    }

    /// Label color: the configured one, else white unless the fill is pure
    /// white, then black.
    pub fn label_color(&self, fill: &str) -> &str {
        match self.text_color.as_deref() {
            Some(color) if !color.is_empty() => color,
            _ => {
                if is_pure_white(fill) {
                    "#000000"
                } else {
                    "#ffffff"
                }
            }
        }
    }
}

fn is_pure_white(color: &str) -> bool {
    matches!(
        color.trim().to_lowercase().as_str(),
        "#fff" | "#ffffff" | "white" | "rgb(255, 255, 255)" | "rgb(255,255,255)"
    )
}

/// Normalizes a caller-supplied segment list at the boundary: trims
/// labels, fills missing ids from the position, clamps negative weights
/// to zero. Unknown fields were already dropped during deserialization.
pub fn normalize_segments(mut segments: Vec<Segment>) -> Vec<Segment> {
    for (index, segment) in segments.iter_mut().enumerate() {
        segment.label = segment.label.trim().to_string();
        if segment.id.is_empty() {
            segment.id = format!("segment-{index}");
        }
        if !segment.probability.is_finite() || segment.probability < 0.0 {
            segment.probability = 0.0;
        }
    }
    segments
}

/// Angular width of one slice in degrees.
pub fn segment_arc_deg(count: usize) -> f64 {
    360.0 / count as f64
}

/// Midpoint of slice `index`, measured clockwise from 12 o'clock in wheel
/// coordinates.
pub fn segment_midpoint_deg(index: usize, count: usize) -> f64 {
    let arc = segment_arc_deg(count);
    index as f64 * arc + arc / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    #[test]
    fn losing_label_markers_are_case_insensitive() {
        let seg = Segment::new("a", "DOMMAGE !");
        assert!(seg.is_losing());
        let seg = Segment::new("b", "Grand Prix");
        assert!(!seg.is_losing());
    }

    #[test]
    fn explicit_winning_flag_beats_label_heuristic() {
        let mut seg = Segment::new("a", "Dommage");
        seg.is_winning = Some(true);
        assert!(!seg.is_losing());
        let mut seg = Segment::new("b", "Jackpot");
        seg.is_winning = Some(false);
        assert!(seg.is_losing());
    }

    #[test]
    fn label_color_contrast_heuristic() {
        let seg = Segment::new("a", "Prize");
        assert_eq!(seg.label_color("#ffffff"), "#000000");
        assert_eq!(seg.label_color("#FFF"), "#000000");
        assert_eq!(seg.label_color("#ff0000"), "#ffffff");
        let mut seg = Segment::new("b", "Prize");
        seg.text_color = Some("#123456".to_string());
        assert_eq!(seg.label_color("#ffffff"), "#123456");
    }

    #[test]
    fn fill_color_alternates_theme_colors() {
        let theme = theme::get_theme(&theme::ThemeSpec::Name("classic".to_string()), None);
        let seg = Segment::new("a", "Prize");
        assert_eq!(seg.fill_color(&theme, 0), theme.primary);
        assert_eq!(seg.fill_color(&theme, 1), theme.secondary);
        let mut colored = Segment::new("b", "Prize");
        colored.color = Some("#abcdef".to_string());
        assert_eq!(colored.fill_color(&theme, 1), "#abcdef");
    }

    #[test]
    fn normalize_fills_ids_and_clamps_weights() {
        let mut raw = vec![Segment::new("", "  A  "), Segment::new("keep", "B")];
        raw[1].probability = -3.0;
        let segments = normalize_segments(raw);
        assert_eq!(segments[0].id, "segment-0");
        assert_eq!(segments[0].label, "A");
        assert_eq!(segments[1].id, "keep");
        assert_eq!(segments[1].probability, 0.0);
    }

    #[test]
    fn unknown_fields_dropped_at_the_boundary() {
        let json = r#"{"id":"x","label":"Prize","probability":25,"legacyWeight":9,"extra":{"a":1}}"#;
        let seg: Segment = serde_json::from_str(json).expect("segment parses");
        assert_eq!(seg.id, "x");
        assert_eq!(seg.probability, 25.0);
    }

    #[test]
    fn midpoints_divide_the_circle_evenly() {
        assert_eq!(segment_arc_deg(4), 90.0);
        assert_eq!(segment_midpoint_deg(0, 4), 45.0);
        assert_eq!(segment_midpoint_deg(3, 4), 315.0);
        assert_eq!(segment_midpoint_deg(0, 1), 180.0);
    }
}
