//! Adjustable dials shown in the controls panel.

use digirain_core::{Config, ConfigPatch};

/// Settings restored by the reset key.
pub fn reset_preset() -> ConfigPatch {
    ConfigPatch {
        theme: Some("matrix-lite".to_string()),
        speed: Some(20.0),
        density: Some(33.0),
        font_size: Some(14),
        trail_opacity: Some(8.0),
        glow_intensity: Some(0.0),
        character_set: None,
    }
}

/// A dial in the controls panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Setting {
    #[default]
    Speed,
    Density,
    FontSize,
    TrailOpacity,
    GlowIntensity,
}

impl Setting {
    pub const ALL: [Setting; 5] = [
        Setting::Speed,
        Setting::Density,
        Setting::FontSize,
        Setting::TrailOpacity,
        Setting::GlowIntensity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Setting::Speed => "Speed",
            Setting::Density => "Density",
            Setting::FontSize => "Size",
            Setting::TrailOpacity => "Trail",
            Setting::GlowIntensity => "Glow",
        }
    }

    /// Slider bounds.
    pub fn range(self) -> (f64, f64) {
        match self {
            Setting::Speed => (1.0, 100.0),
            Setting::FontSize => (8.0, 48.0),
            Setting::Density | Setting::TrailOpacity | Setting::GlowIntensity => (0.0, 100.0),
        }
    }

    fn step(self) -> f64 {
        match self {
            Setting::FontSize => 2.0,
            _ => 5.0,
        }
    }

    /// Cycle to the next setting.
    pub fn next(self) -> Self {
        match self {
            Setting::Speed => Setting::Density,
            Setting::Density => Setting::FontSize,
            Setting::FontSize => Setting::TrailOpacity,
            Setting::TrailOpacity => Setting::GlowIntensity,
            Setting::GlowIntensity => Setting::Speed,
        }
    }

    /// Cycle to the previous setting.
    pub fn prev(self) -> Self {
        match self {
            Setting::Speed => Setting::GlowIntensity,
            Setting::Density => Setting::Speed,
            Setting::FontSize => Setting::Density,
            Setting::TrailOpacity => Setting::FontSize,
            Setting::GlowIntensity => Setting::TrailOpacity,
        }
    }

    pub fn value(self, config: &Config) -> f64 {
        match self {
            Setting::Speed => config.speed,
            Setting::Density => config.density,
            Setting::FontSize => config.font_size as f64,
            Setting::TrailOpacity => config.trail_opacity,
            Setting::GlowIntensity => config.glow_intensity,
        }
    }

    /// Patch moving this dial `steps` notches, kept inside the slider range.
    pub fn nudge(self, config: &Config, steps: i32) -> ConfigPatch {
        let (min, max) = self.range();
        let value = (self.value(config) + self.step() * steps as f64).clamp(min, max);
        let mut patch = ConfigPatch::default();
        match self {
            Setting::Speed => patch.speed = Some(value),
            Setting::Density => patch.density = Some(value),
            Setting::FontSize => patch.font_size = Some(value as u32),
            Setting::TrailOpacity => patch.trail_opacity = Some(value),
            Setting::GlowIntensity => patch.glow_intensity = Some(value),
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        for setting in Setting::ALL {
            assert_eq!(setting.next().prev(), setting);
        }
        assert_eq!(Setting::GlowIntensity.next(), Setting::Speed);
    }

    #[test]
    fn test_nudge_steps_and_clamps() {
        let config = Config::default();
        assert_eq!(Setting::Speed.nudge(&config, 1).speed, Some(25.0));
        assert_eq!(Setting::Density.nudge(&config, -1).density, Some(15.0));
        assert_eq!(Setting::FontSize.nudge(&config, 1).font_size, Some(16));
        assert_eq!(Setting::GlowIntensity.nudge(&config, -1).glow_intensity, Some(0.0));
        assert_eq!(Setting::Speed.nudge(&config, -10).speed, Some(1.0));
        assert_eq!(Setting::TrailOpacity.nudge(&config, 100).trail_opacity, Some(100.0));
    }

    #[test]
    fn test_nudge_touches_one_field() {
        let patch = Setting::TrailOpacity.nudge(&Config::default(), 1);
        assert_eq!(
            patch,
            ConfigPatch {
                trail_opacity: Some(13.0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_reset_preset() {
        let config = Config::default().merged(&reset_preset());
        assert_eq!(config.density, 33.0);
        assert_eq!(config.theme, "matrix-lite");
    }
}
