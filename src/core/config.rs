//! Configuration for tile profiles
//!
//! Profiles can be described through presets or custom options. Options are plain
//! serde data so they can travel inside whatever configuration the host application uses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{
    builder::{ProfileBuilder, ProfileError},
    constants::{
        MAX_LEVEL, MERCATOR_HALF_EXTENT, SRS_SPHERICAL_MERCATOR, SRS_WGS84, TILE_SIZE,
    },
    profile::{Profile, ProfileKind, SpatialReference},
};
use crate::tiles::key::SharedProfile;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProfilePreset {
    #[default]
    GlobalGeodetic,
    SphericalMercator,
    Custom(ProfileOptions),
}

impl ProfilePreset {
    pub fn resolve(&self) -> ProfileOptions {
        match self {
            Self::GlobalGeodetic => ProfileOptions {
                kind: ProfileKind::Geodetic,
                srs: SRS_WGS84.to_string(),
                extent: [-180.0, -90.0, 180.0, 90.0],
                tile_size: TILE_SIZE,
                max_level: MAX_LEVEL,
            },
            Self::SphericalMercator => ProfileOptions {
                kind: ProfileKind::Mercator,
                srs: SRS_SPHERICAL_MERCATOR.to_string(),
                extent: [
                    -MERCATOR_HALF_EXTENT,
                    -MERCATOR_HALF_EXTENT,
                    MERCATOR_HALF_EXTENT,
                    MERCATOR_HALF_EXTENT,
                ],
                tile_size: TILE_SIZE,
                max_level: MAX_LEVEL,
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    pub kind: ProfileKind,
    pub srs: String,
    /// `[xmin, ymin, xmax, ymax]` in native units of `srs`
    pub extent: [f64; 4],
    pub tile_size: u32,
    pub max_level: u32,
}

impl ProfileOptions {
    /// Parse options from a JSON document. Missing fields fall back to the global
    /// geodetic defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn build(&self) -> Result<Profile, ProfileError> {
        let [xmin, ymin, xmax, ymax] = self.extent;
        ProfileBuilder::new(self.kind)
            .with_srs(SpatialReference::new(self.srs.as_str()))
            .with_extent(xmin, ymin, xmax, ymax)
            .with_tile_size(self.tile_size)
            .with_max_level(self.max_level)
            .build()
    }

    /// Build the profile behind a shared handle ready for tile keys.
    pub fn build_shared(&self) -> crate::Result<SharedProfile> {
        let profile: SharedProfile = Arc::new(self.build()?);
        Ok(profile)
    }
}

impl Default for ProfileOptions {
    fn default() -> Self {
        ProfilePreset::default().resolve()
    }
}
