//! Digital rain rendering.
//!
//! The [`Renderer`] owns a [`Surface`] and a [`DropField`]: each frame it
//! fades the surface, advances every active drop and redraws its trail,
//! recycling drops that have fallen off the bottom into idle columns.
//! [`CellCanvas`] is the terminal surface used by the digirain binary.

mod animator;
mod canvas;
mod drops;
mod error;
mod renderer;
mod surface;

pub use animator::{AnimatorState, FrameHandle, FrameLoop};
pub use canvas::{CellCanvas, CellMetrics};
pub use drops::{DropColumn, DropField, target_active};
pub use error::RenderError;
pub use renderer::{Renderer, effective_glow, fade_alpha, fall_step, trail_brightness};
pub use surface::{GlyphDraw, Shadow, Surface, SurfaceSize};
