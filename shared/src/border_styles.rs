use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const DEFAULT_BORDER_STYLE: &str = "classic";

/// Generic ring asset drawn when a pattern style's own image fails to
/// load.
pub const FALLBACK_RING_IMAGE: &str = "/assets/borders/ring.png";

/// Rendering path for a border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyleKind {
    Solid,
    Metallic,
    Neon,
    Gradient,
    Pattern,
    Luxury,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderEffects {
    pub glow: bool,
    pub shadow: bool,
    pub metallic: bool,
    pub animated: bool,
}

/// Immutable registry entry describing one border look. `width` is the
/// stroke width at the 200 px reference wheel and scales linearly with
/// the actual diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStyleConfig {
    pub name: &'static str,
    pub kind: BorderStyleKind,
    pub colors: &'static [&'static str],
    pub width: f64,
    pub effects: BorderEffects,
    pub image_src: Option<&'static str>,
}

static STYLES: Lazy<HashMap<&'static str, BorderStyleConfig>> = Lazy::new(|| {
    let mut styles = HashMap::new();
    let mut put = |config: BorderStyleConfig| {
        styles.insert(config.name, config);
    };
    put(BorderStyleConfig {
        name: "classic",
        kind: BorderStyleKind::Solid,
        colors: &["#e69500"],
        width: 6.0,
        effects: BorderEffects {
            shadow: true,
            ..BorderEffects::default()
        },
        image_src: None,
    });
    put(BorderStyleConfig {
        name: "minimal",
        kind: BorderStyleKind::Solid,
        colors: &["#374151"],
        width: 3.0,
        effects: BorderEffects::default(),
        image_src: None,
    });
    put(BorderStyleConfig {
        name: "gold",
        kind: BorderStyleKind::Metallic,
        colors: &["#8a6d1a", "#ffd700", "#fff3b0", "#ffd700", "#8a6d1a"],
        width: 9.0,
        effects: BorderEffects {
            shadow: true,
            metallic: true,
            ..BorderEffects::default()
        },
        image_src: None,
    });
    put(BorderStyleConfig {
        name: "silver",
        kind: BorderStyleKind::Pattern,
        colors: &["#6b7280", "#e5e7eb", "#ffffff", "#e5e7eb", "#6b7280"],
        width: 9.0,
        effects: BorderEffects {
            shadow: true,
            metallic: true,
            ..BorderEffects::default()
        },
        image_src: Some("/assets/borders/silver.png"),
    });
    put(BorderStyleConfig {
        name: "neon",
        kind: BorderStyleKind::Neon,
        colors: &["#22d3ee", "#a855f7"],
        width: 5.0,
        effects: BorderEffects {
            glow: true,
            ..BorderEffects::default()
        },
        image_src: None,
    });
    put(BorderStyleConfig {
        name: "rainbow",
        kind: BorderStyleKind::Gradient,
        colors: &[],
        width: 7.0,
        effects: BorderEffects {
            glow: true,
            animated: true,
            ..BorderEffects::default()
        },
        image_src: None,
    });
    put(BorderStyleConfig {
        name: "royal",
        kind: BorderStyleKind::Luxury,
        colors: &["#d4af37", "#7c2d12", "#d4af37"],
        width: 11.0,
        effects: BorderEffects {
            glow: true,
            shadow: true,
            metallic: true,
            ..BorderEffects::default()
        },
        image_src: None,
    });
    styles
});

/// Looks up a border style; unknown names resolve to `classic`.
pub fn get_style(name: &str) -> &'static BorderStyleConfig {
    STYLES
        .get(name)
        .or_else(|| STYLES.get(DEFAULT_BORDER_STYLE))
        .expect("default border style is registered")
}

pub fn style_names() -> Vec<&'static str> {
    let mut names: Vec<_> = STYLES.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Evenly spaced gradient stops over the style colors, for metallic and
/// luxury strokes. Single-color inputs get a synthetic highlight in the
/// middle so the stroke still reads as curved metal.
pub fn metallic_stops(colors: &[&str]) -> Vec<(f64, String)> {
    match colors.len() {
        0 => vec![
            (0.0, "#9ca3af".to_string()),
            (0.5, "#f9fafb".to_string()),
            (1.0, "#9ca3af".to_string()),
        ],
        1 => vec![
            (0.0, colors[0].to_string()),
            (0.5, "#ffffff".to_string()),
            (1.0, colors[0].to_string()),
        ],
        n => colors
            .iter()
            .enumerate()
            .map(|(i, color)| (i as f64 / (n - 1) as f64, color.to_string()))
            .collect(),
    }
}

/// Glow layers for neon strokes as (line-width multiplier, blur px at the
/// reference size), outermost first.
pub fn neon_glow_layers() -> [(f64, f64); 3] {
    [(2.2, 18.0), (1.4, 9.0), (1.0, 3.0)]
}

/// Rotating-hue rainbow stops: a full hue cycle distributed over
/// `stop_count` stops, phase-shifted by elapsed time. Deterministic in
/// its inputs.
pub fn rainbow_stops(elapsed_ms: f64, stop_count: usize) -> Vec<(f64, String)> {
    let count = stop_count.max(2);
    let phase = (elapsed_ms / 20.0) % 360.0;
    (0..count)
        .map(|i| {
            let offset = i as f64 / (count - 1) as f64;
            let hue = (phase + offset * 360.0) % 360.0;
            (offset, hsl(hue, 95.0, 55.0))
        })
        .collect()
}

/// CSS `hsl()` string from hue/saturation/lightness.
pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> String {
    format!("hsl({:.1}, {:.1}%, {:.1}%)", hue.rem_euclid(360.0), saturation, lightness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_style_name_falls_back_to_classic() {
        let style = get_style("doesnotexist");
        assert_eq!(style.name, "classic");
        assert_eq!(style.kind, BorderStyleKind::Solid);
    }

    #[test]
    fn pattern_style_carries_image_with_metallic_fallback_colors() {
        let style = get_style("silver");
        assert_eq!(style.kind, BorderStyleKind::Pattern);
        assert!(style.image_src.is_some());
        assert!(!style.colors.is_empty());
    }

    #[test]
    fn metallic_stops_cover_the_unit_range() {
        for colors in [&["#ffd700"][..], &["#111", "#eee", "#111"][..], &[][..]] {
            let stops = metallic_stops(colors);
            assert!(stops.len() >= 3);
            assert_eq!(stops.first().unwrap().0, 0.0);
            assert_eq!(stops.last().unwrap().0, 1.0);
        }
    }

    #[test]
    fn rainbow_stops_rotate_with_time() {
        let at_zero = rainbow_stops(0.0, 6);
        let later = rainbow_stops(1000.0, 6);
        assert_eq!(at_zero.len(), 6);
        assert_ne!(at_zero[0].1, later[0].1);
        // Same instant is deterministic.
        assert_eq!(later, rainbow_stops(1000.0, 6));
    }
}
