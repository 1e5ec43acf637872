//! # tilepyramid
//!
//! Addressing and extent math for quadtree-partitioned raster pyramids.
//!
//! A [`Profile`] fixes the extent and coordinate system covered by the single level 0
//! tile. Every other tile is named by a [`TileKey`] `(level, column, row)`, derived from
//! the root by repeated subdivision into four quadrants, and converted back to pixel or
//! geographic bounds on demand.

pub mod core;
pub mod logging;
pub mod prelude;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::{ProfileBuilder, ProfileError},
    config::{ProfileOptions, ProfilePreset},
    extent::{GeoExtent, PixelExtent},
    profile::{Profile, ProfileKind, SpatialReference, TileProfile},
};

pub use tiles::{
    cache::{CacheKey, TileCache},
    key::{map_size_pixels, map_size_tiles, Quadrant, SharedProfile, TileId, TileKey},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = TileError;
