//! Core types for the digirain terminal rain.
//!
//! Holds the static lookup data (themes and glyph sets) and the mutable
//! settings record consumed by the renderer.

mod chars;
mod color;
mod config;
mod theme;

pub use chars::{CharacterSet, CharacterSource};
pub use color::{Rgb, Rgba};
pub use config::{Config, ConfigPatch};
pub use theme::{Theme, ThemeTable};
