use thiserror::Error;

/// Errors raised while building a [`Renderer`](crate::Renderer).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("rendering surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("theme table is empty")]
    NoThemes,
}
