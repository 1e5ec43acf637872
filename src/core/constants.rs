//! Core constants for tile pyramids.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Deepest level whose per-axis tile count still fits a `u32` tile coordinate
/// (`2^31` tiles per axis). One level deeper and `map_size_tiles` overflows.
pub const MAX_LEVEL: u32 = 31;

/// Half the width of the spherical mercator square, in meters (EPSG:3857).
pub const MERCATOR_HALF_EXTENT: f64 = 20_037_508.342_789_244;

/// Well-known code for WGS84 geographic coordinates.
pub const SRS_WGS84: &str = "EPSG:4326";

/// Well-known code for spherical (web) mercator.
pub const SRS_SPHERICAL_MERCATOR: &str = "EPSG:3857";

/// Number of quadrants a tile splits into when descending one level.
pub const QUADRANT_COUNT: usize = 4;
