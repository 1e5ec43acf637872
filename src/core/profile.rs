//! Spatial reference profiles consumed by tile keys.
//!
//! A profile describes the full extent covered by the level 0 tile, the coordinate
//! reference system that extent is expressed in, and how tiles shrink per level.
//! Tile keys only ever see a profile through the [`TileProfile`] trait.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::core::extent::GeoExtent;

/// Opaque handle identifying a coordinate reference system (e.g. `"EPSG:4326"`).
///
/// It is passed through unchanged into every geographic extent a tile key produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialReference(String);

impl SpatialReference {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code this reference was created from
    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of coordinate system a profile is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileKind {
    /// Geographic latitude/longitude (plate carrée tiling).
    #[default]
    Geodetic,
    /// Spherical (web) mercator.
    Mercator,
    /// Any other local or projected system.
    LocalProjected,
}

/// Capability a tile key needs from its profile.
///
/// Implementations must be immutable once shared: tile keys read them from any thread
/// without locking.
pub trait TileProfile: Send + Sync + fmt::Debug {
    /// Full extent covered by the root tile, in native units.
    fn extent(&self) -> &GeoExtent;

    /// Width and height of a single tile at `level`, in native units.
    fn tile_dimensions(&self, level: u32) -> (f64, f64);

    /// Reference system the extent is expressed in.
    fn srs(&self) -> &SpatialReference;

    /// Coordinate system classification.
    fn kind(&self) -> ProfileKind;
}

/// Whether two handles point at the same profile instance.
pub(crate) fn same_profile(a: &Arc<dyn TileProfile>, b: &Arc<dyn TileProfile>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Factor by which tile dimensions shrink at `level` relative to level 0.
///
/// Powers of two are exact in `f64`, so dividing by this never accumulates drift
/// across levels.
pub(crate) fn level_scale(level: u32) -> f64 {
    match 1u64.checked_shl(level) {
        Some(tiles) => tiles as f64,
        None => 2f64.powi(level.min(i32::MAX as u32) as i32),
    }
}

/// Quadtree profile with a single root tile covering the whole extent.
///
/// Build one through [`ProfileBuilder`](crate::core::builder::ProfileBuilder) or from
/// [`ProfileOptions`](crate::core::config::ProfileOptions).
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub(crate) kind: ProfileKind,
    pub(crate) extent: GeoExtent,
    pub(crate) tile_size: u32,
    pub(crate) max_level: u32,
}

impl Profile {
    /// Tile size in pixels
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Deepest level this profile is meant to be addressed at
    pub fn max_level(&self) -> u32 {
        self.max_level
    }
}

impl TileProfile for Profile {
    fn extent(&self) -> &GeoExtent {
        &self.extent
    }

    fn tile_dimensions(&self, level: u32) -> (f64, f64) {
        let scale = level_scale(level);
        (self.extent.width() / scale, self.extent.height() / scale)
    }

    fn srs(&self) -> &SpatialReference {
        &self.extent.srs
    }

    fn kind(&self) -> ProfileKind {
        self.kind
    }
}
