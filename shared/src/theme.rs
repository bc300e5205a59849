use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::SPIN_DURATION_NORMAL_MS;

pub const DEFAULT_THEME_NAME: &str = "classic";

/// Color palette plus effect flags and animation defaults. Brand colors,
/// when supplied, override primary/secondary/accent and leave the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    pub name: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub border: String,
    pub text: String,
    pub effects: ThemeEffects,
    pub animation: AnimationDefaults,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ThemeEffects {
    pub gradient: bool,
    pub glow: bool,
    pub shadow: bool,
    pub metallic: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationDefaults {
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Default for AnimationDefaults {
    fn default() -> Self {
        Self {
            duration_ms: SPIN_DURATION_NORMAL_MS,
            easing: Easing::EaseOutCubic,
        }
    }
}

/// Easing applied to spin progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    EaseOutCubic,
    Linear,
}

impl Easing {
    /// Maps linear progress in [0, 1] to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::Linear => t,
        }
    }
}

/// Caller-facing theme selection: a registry name or a full object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ThemeSpec {
    Name(String),
    Custom(Theme),
}

impl Default for ThemeSpec {
    fn default() -> Self {
        ThemeSpec::Name(DEFAULT_THEME_NAME.to_string())
    }
}

/// Overrides for the three brandable palette slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BrandColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
}

fn theme(
    name: &str,
    primary: &str,
    secondary: &str,
    accent: &str,
    background: &str,
    border: &str,
    text: &str,
    effects: ThemeEffects,
) -> Theme {
    Theme {
        name: name.to_string(),
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
        background: background.to_string(),
        border: border.to_string(),
        text: text.to_string(),
        effects,
        animation: AnimationDefaults::default(),
    }
}

static THEMES: Lazy<HashMap<&'static str, Theme>> = Lazy::new(|| {
    let mut themes = HashMap::new();
    themes.insert(
        "classic",
        theme(
            "classic",
            "#f97316",
            "#8b5cf6",
            "#f59e0b",
            "#f0f2ff",
            "#e69500",
            "#ffffff",
            ThemeEffects {
                gradient: true,
                shadow: true,
                ..ThemeEffects::default()
            },
        ),
    );
    themes.insert(
        "dark",
        theme(
            "dark",
            "#6366f1",
            "#ec4899",
            "#a78bfa",
            "#1a1c2e",
            "#2d3142",
            "#ffffff",
            ThemeEffects {
                glow: true,
                shadow: true,
                ..ThemeEffects::default()
            },
        ),
    );
    themes.insert(
        "luxury",
        theme(
            "luxury",
            "#b45309",
            "#111827",
            "#fbbf24",
            "#0b0b0d",
            "#d4af37",
            "#fde68a",
            ThemeEffects {
                gradient: true,
                glow: true,
                shadow: true,
                metallic: true,
            },
        ),
    );
    themes.insert(
        "pastel",
        theme(
            "pastel",
            "#fda4af",
            "#93c5fd",
            "#fcd34d",
            "#fff7ed",
            "#f9a8d4",
            "#374151",
            ThemeEffects::default(),
        ),
    );
    themes
});

/// Resolves a theme. Unknown names fall back to `classic`; brand colors
/// override the three brandable slots of whatever was resolved.
pub fn get_theme(spec: &ThemeSpec, brand: Option<&BrandColors>) -> Theme {
    let mut resolved = match spec {
        ThemeSpec::Custom(custom) => custom.clone(),
        ThemeSpec::Name(name) => THEMES
            .get(name.as_str())
            .or_else(|| THEMES.get(DEFAULT_THEME_NAME))
            .cloned()
            .expect("default theme is registered"),
    };
    if let Some(brand) = brand {
        if let Some(primary) = &brand.primary {
            resolved.primary = primary.clone();
        }
        if let Some(secondary) = &brand.secondary {
            resolved.secondary = secondary.clone();
        }
        if let Some(accent) = &brand.accent {
            resolved.accent = accent.clone();
        }
    }
    resolved
}

pub fn theme_names() -> Vec<&'static str> {
    let mut names: Vec<_> = THEMES.keys().copied().collect();
    names.sort_unstable();
    names
}
