pub mod cache;
pub mod key;

// Re-exports for convenience
pub use cache::{CacheKey, TileCache};
pub use key::{map_size_pixels, map_size_tiles, Quadrant, SharedProfile, TileId, TileKey};
