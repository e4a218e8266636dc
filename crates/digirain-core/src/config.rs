//! The settings record consumed by the renderer.

use serde::{Deserialize, Serialize};

/// Full rain configuration.
///
/// Dials are stored as given; nothing here clamps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Key into the theme table.
    pub theme: String,
    /// Relative fall speed, nominally 1-100.
    pub speed: f64,
    /// Percent of columns holding an active drop.
    pub density: f64,
    /// Glyph size in pixels; also the column width.
    pub font_size: u32,
    /// Trail persistence, nominally 0-100.
    pub trail_opacity: f64,
    /// Glow strength, nominally 0-100.
    pub glow_intensity: f64,
    /// Glyph set label.
    pub character_set: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "matrix-lite".to_string(),
            speed: 20.0,
            density: 20.0,
            font_size: 14,
            trail_opacity: 8.0,
            glow_intensity: 0.0,
            character_set: "mixed".to_string(),
        }
    }
}

impl Config {
    /// Shallow-merge every field present in `patch`.
    pub fn merge(&mut self, patch: &ConfigPatch) {
        if let Some(theme) = &patch.theme {
            self.theme.clone_from(theme);
        }
        if let Some(speed) = patch.speed {
            self.speed = speed;
        }
        if let Some(density) = patch.density {
            self.density = density;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(trail) = patch.trail_opacity {
            self.trail_opacity = trail;
        }
        if let Some(glow) = patch.glow_intensity {
            self.glow_intensity = glow;
        }
        if let Some(set) = &patch.character_set {
            self.character_set.clone_from(set);
        }
    }

    /// Copy of `self` with `patch` applied.
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        let mut next = self.clone();
        next.merge(patch);
        next
    }
}

/// A partial [`Config`]; absent fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_set: Option<String>,
}

impl ConfigPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == ConfigPatch::default()
    }

    /// Layer `other` over `self`; fields set in `other` win.
    pub fn overlay(mut self, other: ConfigPatch) -> Self {
        self.theme = other.theme.or(self.theme);
        self.speed = other.speed.or(self.speed);
        self.density = other.density.or(self.density);
        self.font_size = other.font_size.or(self.font_size);
        self.trail_opacity = other.trail_opacity.or(self.trail_opacity);
        self.glow_intensity = other.glow_intensity.or(self.glow_intensity);
        self.character_set = other.character_set.or(self.character_set);
        self
    }
}

impl From<Config> for ConfigPatch {
    fn from(c: Config) -> Self {
        Self {
            theme: Some(c.theme),
            speed: Some(c.speed),
            density: Some(c.density),
            font_size: Some(c.font_size),
            trail_opacity: Some(c.trail_opacity),
            glow_intensity: Some(c.glow_intensity),
            character_set: Some(c.character_set),
        }
    }
}
