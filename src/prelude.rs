//! Prelude module for common tilepyramid types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tilepyramid::prelude::*;`

pub use crate::core::{
    builder::{ProfileBuilder, ProfileError},
    config::{ProfileOptions, ProfilePreset},
    extent::{GeoExtent, PixelExtent},
    profile::{Profile, ProfileKind, SpatialReference, TileProfile},
};

pub use crate::tiles::{
    cache::{CacheKey, TileCache},
    key::{map_size_pixels, map_size_tiles, Quadrant, SharedProfile, TileId, TileKey},
};

pub use crate::{Error, Result, TileError};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
