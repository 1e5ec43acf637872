//! Profile builder for fluent configuration
//!
//! The builder validates all the input parameters and guarantees that the created
//! profile is usable by tile keys.

use crate::core::{
    constants::{
        MAX_LEVEL, MERCATOR_HALF_EXTENT, SRS_SPHERICAL_MERCATOR, SRS_WGS84, TILE_SIZE,
    },
    extent::GeoExtent,
    profile::{Profile, ProfileKind, SpatialReference},
};

/// Errors that can occur while building a [`Profile`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    /// No spatial reference was supplied, or it was blank
    #[error("Missing spatial reference")]
    MissingSpatialReference,

    /// Extent is not finite or has a non-positive width or height
    #[error("Invalid extent: ({xmin}, {ymin}, {xmax}, {ymax})")]
    InvalidExtent {
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
    },

    /// Tile size in pixels must be non-zero
    #[error("Invalid tile size: {0}")]
    InvalidTileSize(u32),

    /// Level deeper than a `u32` tile coordinate can address
    #[error("Max level {level} exceeds the addressable limit of {limit}")]
    InvalidMaxLevel { level: u32, limit: u32 },
}

/// Builder for [`Profile`].
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    kind: ProfileKind,
    srs: Option<SpatialReference>,
    extent: (f64, f64, f64, f64),
    tile_size: u32,
    max_level: u32,
}

impl ProfileBuilder {
    /// Create a builder for the given coordinate system kind with no reference or extent
    pub fn new(kind: ProfileKind) -> Self {
        Self {
            kind,
            srs: None,
            extent: (0.0, 0.0, 0.0, 0.0),
            tile_size: TILE_SIZE,
            max_level: MAX_LEVEL,
        }
    }

    /// WGS84 latitude/longitude covering the whole globe with a single root tile.
    pub fn global_geodetic() -> Self {
        Self::new(ProfileKind::Geodetic)
            .with_srs(SpatialReference::new(SRS_WGS84))
            .with_extent(-180.0, -90.0, 180.0, 90.0)
    }

    /// Standard spherical mercator square (used, for example, by OSM and Google maps).
    pub fn spherical_mercator() -> Self {
        Self::new(ProfileKind::Mercator)
            .with_srs(SpatialReference::new(SRS_SPHERICAL_MERCATOR))
            .with_extent(
                -MERCATOR_HALF_EXTENT,
                -MERCATOR_HALF_EXTENT,
                MERCATOR_HALF_EXTENT,
                MERCATOR_HALF_EXTENT,
            )
    }

    /// Local or projected system over an arbitrary extent.
    pub fn local(srs: SpatialReference, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::new(ProfileKind::LocalProjected)
            .with_srs(srs)
            .with_extent(xmin, ymin, xmax, ymax)
    }

    pub fn with_srs(mut self, srs: SpatialReference) -> Self {
        self.srs = Some(srs);
        self
    }

    pub fn with_extent(mut self, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        self.extent = (xmin, ymin, xmax, ymax);
        self
    }

    /// Set the square tile size in pixels.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    /// Validate the parameters and build the profile.
    pub fn build(self) -> Result<Profile, ProfileError> {
        let srs = self
            .srs
            .filter(|srs| !srs.is_empty())
            .ok_or(ProfileError::MissingSpatialReference)?;

        let (xmin, ymin, xmax, ymax) = self.extent;
        let extent = GeoExtent::new(srs, xmin, ymin, xmax, ymax);
        if !extent.is_valid() {
            return Err(ProfileError::InvalidExtent {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }

        if self.tile_size == 0 {
            return Err(ProfileError::InvalidTileSize(self.tile_size));
        }

        if self.max_level > MAX_LEVEL {
            return Err(ProfileError::InvalidMaxLevel {
                level: self.max_level,
                limit: MAX_LEVEL,
            });
        }

        log::debug!(
            "built {:?} profile {} over ({}, {}, {}, {}), {}px tiles, max level {}",
            self.kind,
            extent.srs,
            xmin,
            ymin,
            xmax,
            ymax,
            self.tile_size,
            self.max_level
        );

        Ok(Profile {
            kind: self.kind,
            extent,
            tile_size: self.tile_size,
            max_level: self.max_level,
        })
    }
}
