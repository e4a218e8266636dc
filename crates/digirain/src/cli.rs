//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use digirain_core::ConfigPatch;

/// Digital rain for your terminal.
#[derive(Parser, Debug)]
#[command(name = "digirain", version, about)]
pub struct Args {
    /// Color theme (matrix, ocean, sunset, cyber, amber, mono, matrix-lite)
    #[arg(long)]
    pub theme: Option<String>,

    /// Fall speed, 1-100
    #[arg(long)]
    pub speed: Option<f64>,

    /// Percent of columns with an active drop, 0-100
    #[arg(long)]
    pub density: Option<f64>,

    /// Glyph size in pixels (14 = one glyph per terminal row)
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Trail persistence, 0-100
    #[arg(long)]
    pub trail_opacity: Option<f64>,

    /// Glow strength, 0-100
    #[arg(long)]
    pub glow_intensity: Option<f64>,

    /// Glyph set (mixed, japanese, alphanumeric, symbols, matrix, extended)
    #[arg(long = "charset")]
    pub character_set: Option<String>,

    /// Apply a previously exported config file
    #[arg(long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Ignore the saved settings file
    #[arg(long)]
    pub no_config: bool,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Seed the random source for a reproducible rain
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the available themes and exit
    #[arg(long)]
    pub list_themes: bool,
}

impl Args {
    /// Config overrides given on the command line.
    pub fn config_patch(&self) -> ConfigPatch {
        ConfigPatch {
            theme: self.theme.clone(),
            speed: self.speed,
            density: self.density,
            font_size: self.font_size,
            trail_opacity: self.trail_opacity,
            glow_intensity: self.glow_intensity,
            character_set: self.character_set.clone(),
        }
    }
}
