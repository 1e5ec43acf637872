//! Quadtree tile addressing.
//!
//! A [`TileKey`] names one tile of a raster pyramid by `(level, column, row)` under a
//! shared [`TileProfile`]. Row 0 is the topmost row: rows grow downward while the
//! profile's y coordinate decreases.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
    sync::Arc,
};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        constants::QUADRANT_COUNT,
        extent::{GeoExtent, PixelExtent},
        profile::{same_profile, ProfileKind, TileProfile},
    },
    tiles::cache::CacheKey,
    Error, Result,
};

/// Shared handle to the profile a key is expressed in.
pub type SharedProfile = Arc<dyn TileProfile>;

/// Integer identity of a tile, independent of any profile.
///
/// Displays as `"<level>_<x>_<y>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId {
    pub level: u32,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    pub fn new(level: u32, x: u32, y: u32) -> Self {
        Self { level, x, y }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.level, self.x, self.y)
    }
}

impl FromStr for TileId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('_');
        let mut next = |name: &str| -> Result<u32> {
            parts
                .next()
                .ok_or_else(|| Error::InvalidArgument(format!("missing {} in tile id {:?}", name, s)))?
                .parse::<u32>()
                .map_err(|e| Error::InvalidArgument(format!("bad {} in tile id {:?}: {}", name, s, e)))
        };

        let level = next("level")?;
        let x = next("column")?;
        let y = next("row")?;
        if parts.next().is_some() {
            return Err(Error::InvalidArgument(format!("trailing data in tile id {:?}", s)));
        }

        Ok(Self::new(level, x, y))
    }
}

/// One of the four subdivisions of a tile one level deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; QUADRANT_COUNT] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column and row offsets added to the doubled parent address.
    pub fn offsets(self) -> (u32, u32) {
        match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (1, 0),
            Quadrant::BottomLeft => (0, 1),
            Quadrant::BottomRight => (1, 1),
        }
    }
}

impl TryFrom<u32> for Quadrant {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Quadrant::TopLeft),
            1 => Ok(Quadrant::TopRight),
            2 => Ok(Quadrant::BottomLeft),
            3 => Ok(Quadrant::BottomRight),
            other => Err(Error::InvalidArgument(format!(
                "quadrant must be in 0..=3, got {}",
                other
            ))),
        }
    }
}

/// Number of tiles along each axis at `level` (`2^level`).
///
/// Fails past [`MAX_LEVEL`](crate::constants::MAX_LEVEL), where the count no longer fits a
/// `u32` tile coordinate.
pub fn map_size_tiles(level: u32) -> Result<u32> {
    1u32.checked_shl(level).ok_or_else(|| {
        Error::ArithmeticOverflow(format!("2^{} tiles per axis does not fit in u32", level))
    })
}

/// Pixel span of the whole pyramid along each axis at `level` (`tile_size << level`).
pub fn map_size_pixels(tile_size: u32, level: u32) -> Result<u32> {
    map_size_tiles(level)?.checked_mul(tile_size).ok_or_else(|| {
        Error::ArithmeticOverflow(format!(
            "{} px tiles at level {} span more than u32::MAX pixels",
            tile_size, level
        ))
    })
}

/// Address of a single tile in a quadtree pyramid.
///
/// Keys are immutable values. Children are derived lazily and cached per instance, so
/// repeated lookups of the same quadrant hand back the same object. Cloning a key
/// shares its profile but starts with an empty child cache.
pub struct TileKey {
    column: u32,
    row: u32,
    level: u32,
    profile: SharedProfile,
    children: [OnceCell<Box<TileKey>>; QUADRANT_COUNT],
}

impl TileKey {
    /// Creates a key without validating `column` and `row` against `level`.
    ///
    /// Out-of-range addresses are accepted; their extents simply fall outside the
    /// profile. Use [`TileKey::is_valid`] to check.
    pub fn new(column: u32, row: u32, level: u32, profile: SharedProfile) -> Self {
        Self {
            column,
            row,
            level,
            profile,
            children: Default::default(),
        }
    }

    /// The single level 0 tile covering the profile's whole extent.
    pub fn root(profile: SharedProfile) -> Self {
        Self::new(0, 0, 0, profile)
    }

    pub fn from_id(id: TileId, profile: SharedProfile) -> Self {
        Self::new(id.x, id.y, id.level, profile)
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns `(column, row)`
    pub fn tile_xy(&self) -> (u32, u32) {
        (self.column, self.row)
    }

    pub fn tile_id(&self) -> TileId {
        TileId::new(self.level, self.column, self.row)
    }

    pub fn profile(&self) -> &SharedProfile {
        &self.profile
    }

    /// `"<level>_<column>_<row>"`. Does not encode the profile; see [`TileKey::cache_key`]
    /// for a key that is unique across profiles.
    pub fn str(&self) -> String {
        self.tile_id().to_string()
    }

    /// Key combining profile identity and tile identity.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(Arc::clone(&self.profile), self.tile_id())
    }

    /// Whether `column` and `row` lie inside `[0, 2^level)`.
    pub fn is_valid(&self) -> bool {
        // Past level 63 every u32 coordinate is in range.
        1u64.checked_shl(self.level).map_or(true, |tiles| {
            u64::from(self.column) < tiles && u64::from(self.row) < tiles
        })
    }

    /// Subordinate key one level deeper in `quadrant` (0 top-left, 1 top-right,
    /// 2 bottom-left, 3 bottom-right).
    pub fn child(&self, quadrant: u32) -> Result<&TileKey> {
        self.child_at(Quadrant::try_from(quadrant)?)
    }

    pub fn child_at(&self, quadrant: Quadrant) -> Result<&TileKey> {
        let slot = &self.children[quadrant.index()];
        if let Some(child) = slot.get() {
            return Ok(child);
        }

        let (dx, dy) = quadrant.offsets();
        let overflow = || {
            Error::ArithmeticOverflow(format!(
                "quadrant {} of tile {} is not addressable",
                quadrant.index(),
                self.tile_id()
            ))
        };
        let level = self.level.checked_add(1).ok_or_else(overflow)?;
        let column = self
            .column
            .checked_mul(2)
            .and_then(|c| c.checked_add(dx))
            .ok_or_else(overflow)?;
        let row = self
            .row
            .checked_mul(2)
            .and_then(|r| r.checked_add(dy))
            .ok_or_else(overflow)?;

        let child = slot.get_or_init(|| {
            log::trace!("caching child {}_{}_{} of {}", level, column, row, self.tile_id());
            Box::new(TileKey::new(column, row, level, Arc::clone(&self.profile)))
        });
        Ok(child)
    }

    /// All four children in quadrant order.
    pub fn children(&self) -> Result<[&TileKey; QUADRANT_COUNT]> {
        let [top_left, top_right, bottom_left, bottom_right] = Quadrant::ALL;
        Ok([
            self.child_at(top_left)?,
            self.child_at(top_right)?,
            self.child_at(bottom_left)?,
            self.child_at(bottom_right)?,
        ])
    }

    /// Key one level up, or `None` for a root key. Each call builds a fresh value.
    pub fn parent(&self) -> Option<TileKey> {
        if self.level == 0 {
            return None;
        }

        Some(TileKey::new(
            self.column / 2,
            self.row / 2,
            self.level - 1,
            Arc::clone(&self.profile),
        ))
    }

    /// Bounds of this tile in the pixel space of its level.
    pub fn pixel_extent(&self, tile_size: u32) -> PixelExtent {
        PixelExtent::for_tile(self.column, self.row, tile_size)
    }

    /// [`map_size_pixels`] at this key's level.
    pub fn map_size_pixels(&self, tile_size: u32) -> Result<u32> {
        map_size_pixels(tile_size, self.level)
    }

    /// [`map_size_tiles`] at this key's level.
    pub fn map_size_tiles(&self) -> Result<u32> {
        map_size_tiles(self.level)
    }

    /// Bounds of this tile in the profile's native units, tagged with its reference.
    pub fn geo_extent(&self) -> GeoExtent {
        let (xmin, ymin, xmax, ymax) = self.geo_bounds();
        GeoExtent::new(self.profile.srs().clone(), xmin, ymin, xmax, ymax)
    }

    /// Returns `(xmin, ymin, xmax, ymax)` in the profile's native units.
    ///
    /// Far edges are measured from the profile origin as `column + 1` and `row + 1`
    /// tiles rather than by adding one tile to the near edge. Tile sizes are
    /// power-of-two fractions of the extent, so a tile's edges then match its
    /// neighbours' and its parent's bit for bit.
    pub fn geo_bounds(&self) -> (f64, f64, f64, f64) {
        let (width, height) = self.profile.tile_dimensions(self.level);
        let extent = self.profile.extent();
        let column = u64::from(self.column);
        let row = u64::from(self.row);

        let xmin = extent.xmin + width * column as f64;
        let xmax = extent.xmin + width * (column + 1) as f64;
        let ymax = extent.ymax - height * row as f64;
        let ymin = extent.ymax - height * (row + 1) as f64;
        (xmin, ymin, xmax, ymax)
    }

    pub fn is_geodetic(&self) -> bool {
        self.profile.kind() == ProfileKind::Geodetic
    }

    pub fn is_mercator(&self) -> bool {
        self.profile.kind() == ProfileKind::Mercator
    }

    pub fn is_projected(&self) -> bool {
        self.profile.kind() == ProfileKind::LocalProjected
    }
}

impl Clone for TileKey {
    fn clone(&self) -> Self {
        Self::new(self.column, self.row, self.level, Arc::clone(&self.profile))
    }
}

impl PartialEq for TileKey {
    fn eq(&self, other: &Self) -> bool {
        self.tile_id() == other.tile_id() && same_profile(&self.profile, &other.profile)
    }
}

impl Eq for TileKey {}

impl Hash for TileKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tile_id().hash(state);
        (Arc::as_ptr(&self.profile) as *const () as usize).hash(state);
    }
}

impl fmt::Debug for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileKey")
            .field("level", &self.level)
            .field("column", &self.column)
            .field("row", &self.row)
            .field("srs", self.profile.srs())
            .finish()
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tile_id(), f)
    }
}
