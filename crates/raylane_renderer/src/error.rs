//! Error types for rendering.

use thiserror::Error;

/// Errors raised before or while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Rays are traced in whole lane groups
    #[error("Rays per pixel ({rays}) must be a positive multiple of the lane width ({lane_width})")]
    RaysPerPixel { rays: u32, lane_width: usize },

    #[error("Max bounces must be at least 1")]
    ZeroBounces,

    #[error("Image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Tile size must be at least 1 pixel")]
    ZeroTileSize,

    /// Camera looks at its own position, or `up` is parallel to the view axis
    #[error("Camera basis is degenerate")]
    DegenerateCamera,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Cancelled before every tile finished
    #[error("Render cancelled after {tiles_done} of {tile_count} tiles")]
    Cancelled { tiles_done: u64, tile_count: u64 },
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
