use crate::core::profile::SpatialReference;
use serde::{Deserialize, Serialize};

/// Bounds of a tile in the pixel space of the whole pyramid at its level.
///
/// Components are `u64` so that `column * tile_size + tile_size` never wraps for any
/// `u32` column and tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelExtent {
    pub xmin: u64,
    pub ymin: u64,
    pub xmax: u64,
    pub ymax: u64,
}

impl PixelExtent {
    /// Pixel extent of the tile at (`column`, `row`) for square tiles of `tile_size` pixels
    pub fn for_tile(column: u32, row: u32, tile_size: u32) -> Self {
        let size = u64::from(tile_size);
        let xmin = u64::from(column) * size;
        let ymin = u64::from(row) * size;
        Self {
            xmin,
            ymin,
            xmax: xmin + size,
            ymax: ymin + size,
        }
    }

    pub fn width(&self) -> u64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> u64 {
        self.ymax - self.ymin
    }

    /// Returns `(xmin, ymin, xmax, ymax)`
    pub fn as_tuple(&self) -> (u64, u64, u64, u64) {
        (self.xmin, self.ymin, self.xmax, self.ymax)
    }
}

/// Represents a bounding box in a profile's native coordinate units,
/// tagged with the spatial reference it is expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoExtent {
    pub srs: SpatialReference,
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl GeoExtent {
    /// Creates a new extent from individual coordinates
    pub fn new(srs: SpatialReference, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            srs,
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Gets the width of the extent
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Gets the height of the extent
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Gets the center point of the extent as `(x, y)`
    pub fn center(&self) -> (f64, f64) {
        ((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }

    /// Checks if the extent contains a point (edges inclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }

    /// Checks if the interiors of two extents overlap. Extents that only share an edge
    /// do not intersect.
    pub fn intersects(&self, other: &GeoExtent) -> bool {
        self.srs == other.srs
            && other.xmin < self.xmax
            && other.xmax > self.xmin
            && other.ymin < self.ymax
            && other.ymax > self.ymin
    }

    /// Gets the overlapping area of two extents
    pub fn intersection(&self, other: &GeoExtent) -> Option<GeoExtent> {
        if !self.intersects(other) {
            return None;
        }

        Some(GeoExtent::new(
            self.srs.clone(),
            self.xmin.max(other.xmin),
            self.ymin.max(other.ymin),
            self.xmax.min(other.xmax),
            self.ymax.min(other.ymax),
        ))
    }

    /// Returns the union of this extent with another one in the same reference
    pub fn union(&self, other: &GeoExtent) -> Option<GeoExtent> {
        if self.srs != other.srs {
            return None;
        }

        Some(GeoExtent::new(
            self.srs.clone(),
            self.xmin.min(other.xmin),
            self.ymin.min(other.ymin),
            self.xmax.max(other.xmax),
            self.ymax.max(other.ymax),
        ))
    }

    /// Checks if the extent is valid (min < max on both axes, all finite)
    pub fn is_valid(&self) -> bool {
        [self.xmin, self.ymin, self.xmax, self.ymax]
            .iter()
            .all(|v| v.is_finite())
            && self.xmin < self.xmax
            && self.ymin < self.ymax
    }

    /// Gets the area of the extent
    pub fn area(&self) -> f64 {
        if !self.is_valid() {
            0.0
        } else {
            self.width() * self.height()
        }
    }

    /// Returns `(xmin, ymin, xmax, ymax)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.xmin, self.ymin, self.xmax, self.ymax)
    }
}
