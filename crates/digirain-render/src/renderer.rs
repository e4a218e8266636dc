//! The rain animator: owns the surface, the drop field and the settings.

use digirain_config::{ConfigError, export_config, parse_config};
use digirain_core::{CharacterSource, Config, ConfigPatch, Rgb, Theme, ThemeTable};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

use crate::{
    animator::{AnimatorState, FrameHandle, FrameLoop},
    drops::DropField,
    error::RenderError,
    surface::{GlyphDraw, Shadow, Surface, SurfaceSize},
};

/// Chance per frame that a visible glyph is swapped for a new one.
const REROLL_CHANCE: f64 = 0.02;

/// Rows a drop keeps falling below the bottom edge before it is retired.
const EXIT_MARGIN_ROWS: f64 = 10.0;

/// Dimmest a trailing glyph gets.
const MIN_BRIGHTNESS: f32 = 0.05;

/// Glow floor for every palette except low-power ones.
const MIN_GLOW: f64 = 0.15;

/// Alpha of the black overlay painted each frame.
pub fn fade_alpha(trail_opacity: f64) -> f32 {
    (0.02 + trail_opacity * 0.0115) as f32
}

/// Rows a drop falls per frame.
pub fn fall_step(speed: f64) -> f64 {
    (speed / 30.0) * 0.8
}

/// Normalized glow after applying the per-palette floor.
pub fn effective_glow(glow_intensity: f64, low_power: bool) -> f64 {
    let glow = glow_intensity / 100.0;
    if low_power { glow } else { glow.max(MIN_GLOW) }
}

/// Brightness of `row` in a trail of `visible` rows; the head is row `visible - 1`.
pub fn trail_brightness(row: usize, visible: usize) -> f32 {
    let fade = 1.0 - row as f32 / visible as f32;
    (1.0 - fade * 1.5).max(MIN_BRIGHTNESS)
}

/// Shadow blur for trailing and leading glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Glow {
    color: Rgb,
    trail_blur: f32,
    lead_blur: f32,
}

impl Glow {
    fn new(effective: f64, color: Rgb) -> Option<Self> {
        (effective > 0.0).then(|| Self {
            color,
            trail_blur: (effective * 12.0).max(1.0) as f32,
            lead_blur: (effective * 18.0).max(2.0) as f32,
        })
    }

    fn shadow(&self, leading: bool) -> Shadow {
        Shadow {
            color: self.color,
            blur: if leading { self.lead_blur } else { self.trail_blur },
        }
    }
}

/// Digital rain renderer.
///
/// Generic over the surface it paints and the random source, so tests can
/// record draw calls and replay exact sequences from a seed.
#[derive(Debug)]
pub struct Renderer<S, R = StdRng> {
    surface: S,
    config: Config,
    themes: ThemeTable,
    palette: Theme,
    characters: CharacterSource,
    field: DropField,
    rng: R,
    state: AnimatorState,
    animation_id: Option<FrameHandle>,
    frames: FrameLoop,
    frame_count: u64,
}

impl<S: Surface> Renderer<S, StdRng> {
    /// Build a renderer with the builtin themes and an entropy-seeded RNG.
    pub fn new(surface: S, options: ConfigPatch) -> Result<Self, RenderError> {
        Self::with_parts(surface, options, ThemeTable::builtin(), StdRng::from_entropy())
    }
}

impl<S: Surface, R: Rng> Renderer<S, R> {
    /// Build a renderer from explicit parts.
    ///
    /// Fails when the surface has no area or the theme table is empty.
    pub fn with_parts(
        surface: S,
        options: ConfigPatch,
        themes: ThemeTable,
        rng: R,
    ) -> Result<Self, RenderError> {
        let size = surface.size();
        if size.is_empty() {
            return Err(RenderError::SurfaceUnavailable {
                width: size.width,
                height: size.height,
            });
        }

        let config = Config::default().merged(&options);
        let palette = themes
            .get(&config.theme)
            .or_else(|| themes.get(&Config::default().theme))
            .or_else(|| themes.keys().next().and_then(|k| themes.get(k)))
            .copied()
            .ok_or(RenderError::NoThemes)?;
        let characters = CharacterSource::from_label(&config.character_set);

        let mut renderer = Self {
            surface,
            config,
            themes,
            palette,
            characters,
            field: DropField::default(),
            rng,
            state: AnimatorState::Stopped,
            animation_id: None,
            frames: FrameLoop::default(),
            frame_count: 0,
        };
        renderer.surface.clear(Rgb::BLACK);
        renderer.reseed();
        debug!(theme = %renderer.config.theme, ?size, "renderer initialized");
        Ok(renderer)
    }

    /// Enter the running state and schedule frames.
    pub fn start(&mut self) {
        if self.state == AnimatorState::Running {
            return;
        }
        info!("rain starting");
        self.state = AnimatorState::Running;
        self.animate();
    }

    /// Stop and cancel the pending frame.
    pub fn stop(&mut self) {
        info!("rain stopping");
        self.state = AnimatorState::Stopped;
        if let Some(handle) = self.animation_id.take() {
            self.frames.cancel(handle);
        }
    }

    /// Stop drawing; the frame handle is left as is.
    pub fn pause(&mut self) {
        if self.state == AnimatorState::Running {
            self.state = AnimatorState::Paused;
        }
    }

    /// Re-enter the frame loop from paused or stopped.
    pub fn resume(&mut self) {
        if self.state != AnimatorState::Running {
            self.state = AnimatorState::Running;
            self.animate();
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Display refresh callback. Returns whether a frame was drawn.
    pub fn on_frame(&mut self) -> bool {
        if self.frames.fire().is_none() {
            return false;
        }
        self.animate()
    }

    fn animate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.frame_count += 1;
        self.update();
        self.animation_id = Some(self.frames.request());
        true
    }

    /// Advance every active drop by one frame and paint it.
    ///
    /// Does nothing unless running.
    pub fn update(&mut self) {
        if !self.is_running() {
            return;
        }

        self.surface
            .fill(Rgb::BLACK, fade_alpha(self.config.trail_opacity));

        let low_power = self.themes.is_low_power(&self.config.theme);
        let glow = Glow::new(
            effective_glow(self.config.glow_intensity, low_power),
            self.palette.glow,
        );
        let step = fall_step(self.config.speed);
        let font_size = self.config.font_size;
        let max_rows = self.max_rows();
        let exit_row = max_rows as f64 + EXIT_MARGIN_ROWS;

        // Columns started by a recycle this frame begin falling next frame.
        let mut spawned = Vec::new();

        for col in 0..self.field.len() {
            if !self.field.columns()[col].is_active() || spawned.contains(&col) {
                continue;
            }

            let position = self.field.advance(col, step);
            let visible = (position.floor().max(0.0) as usize).min(max_rows);
            let x = col as f64 * font_size as f64;

            for row in 0..visible {
                let ch = self
                    .field
                    .glyph_at(col, row, REROLL_CHANCE, &self.characters, &mut self.rng);
                let leading = row == visible - 1;
                let (color, alpha) = if leading {
                    (self.palette.glow, 1.0)
                } else {
                    (
                        self.palette.foreground,
                        trail_brightness(row, visible) * 0.8,
                    )
                };
                self.surface.draw_glyph(&GlyphDraw {
                    ch,
                    x,
                    y: ((row + 1) as u64 * font_size as u64) as f64,
                    font_size,
                    color,
                    alpha,
                    shadow: glow.map(|g| g.shadow(leading)),
                });
            }

            if position > exit_row {
                if let Some(next) = self.field.recycle(col, &mut self.rng) {
                    spawned.push(next);
                }
            }
        }
    }

    /// Merge `patch` into the config and apply its side effects.
    pub fn update_config(&mut self, patch: ConfigPatch) {
        self.config.merge(&patch);

        if let Some(theme) = patch.theme.as_deref().filter(|t| !t.is_empty()) {
            self.apply_theme(theme);
        }
        if let Some(label) = &patch.character_set {
            self.characters = CharacterSource::from_label(label);
        }
        if patch.density.is_some() {
            self.reseed();
        }
        if patch.font_size.is_some_and(|size| size != 0) {
            self.resize(self.surface.size());
        }
    }

    /// Copy of the current configuration.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Current configuration as pretty, versioned JSON.
    pub fn export_config(&self) -> Result<String, ConfigError> {
        export_config(&self.config)
    }

    /// Apply exported config text. Malformed text leaves everything untouched.
    pub fn import_config(&mut self, text: &str) -> bool {
        match parse_config(text) {
            Ok(patch) => {
                self.update_config(patch);
                true
            }
            Err(err) => {
                warn!(%err, "rejected config import");
                false
            }
        }
    }

    /// Pick a random theme key from the table.
    pub fn random_theme(&mut self) -> Option<&'static str> {
        self.themes.random_key(&mut self.rng)
    }

    /// Resize the surface, clear it and rebuild the drop field.
    pub fn resize(&mut self, size: SurfaceSize) {
        debug!(?size, "resizing surface");
        self.surface.resize(size);
        self.surface.clear(Rgb::BLACK);
        self.reseed();
    }

    fn apply_theme(&mut self, key: &str) {
        match self.themes.get(key) {
            Some(theme) => {
                self.palette = *theme;
                debug!(theme = key, "palette applied");
            }
            None => debug!(theme = key, "unknown theme, keeping palette"),
        }
    }

    fn reseed(&mut self) {
        let columns = self.column_count();
        self.field.seed(columns, self.config.density, &mut self.rng);
    }

    /// Columns that fit across the surface at the current font size.
    pub fn column_count(&self) -> usize {
        self.surface
            .size()
            .width
            .checked_div(self.config.font_size)
            .unwrap_or(0) as usize
    }

    /// Glyph rows that fit down the surface at the current font size.
    pub fn max_rows(&self) -> usize {
        self.surface
            .size()
            .height
            .checked_div(self.config.font_size)
            .unwrap_or(0) as usize
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    /// Handle of the most recently requested frame.
    pub fn frame_handle(&self) -> Option<FrameHandle> {
        self.animation_id
    }

    /// Whether a frame is waiting for the next refresh.
    pub fn frame_pending(&self) -> bool {
        self.frames.pending().is_some()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn palette(&self) -> &Theme {
        &self.palette
    }

    pub fn themes(&self) -> &ThemeTable {
        &self.themes
    }

    pub fn field(&self) -> &DropField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
