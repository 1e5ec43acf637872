use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::core::profile::{same_profile, TileProfile};
use crate::tiles::key::TileId;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(capacity) => capacity,
    None => panic!("default tile cache capacity must be non-zero"),
};

/// Cache key that tells apart equal tile ids under different profiles.
///
/// Holds the profile alive for as long as the key exists.
#[derive(Clone)]
pub struct CacheKey {
    profile: Arc<dyn TileProfile>,
    id: TileId,
}

impl CacheKey {
    pub fn new(profile: Arc<dyn TileProfile>, id: TileId) -> Self {
        Self { profile, id }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn profile(&self) -> &Arc<dyn TileProfile> {
        &self.profile
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && same_profile(&self.profile, &other.profile)
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        (Arc::as_ptr(&self.profile) as *const () as usize).hash(state);
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.profile.srs())
    }
}

/// In-memory tile cache using LRU eviction
pub struct TileCache<V> {
    cache: Arc<Mutex<LruCache<CacheKey, Arc<V>>>>,
}

impl<V> TileCache<V> {
    /// Create a new tile cache with the given capacity. A zero capacity falls back to
    /// the default of 1024 tiles.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Create a new tile cache with default capacity (1024 tiles)
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY.get())
    }

    /// Get a tile from the cache
    pub fn get(&self, key: &CacheKey) -> Option<Arc<V>> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    /// Insert a tile into the cache
    pub fn insert(&self, key: CacheKey, data: V) {
        self.put(key, Arc::new(data));
    }

    /// Insert a tile into the cache (using Arc directly)
    pub fn put(&self, key: CacheKey, data: Arc<V>) {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some((evicted, _)) = cache.push(key.clone(), data) {
                if evicted != key {
                    log::debug!("evicted tile {:?} from cache", evicted);
                }
            }
        }
    }

    /// Check if a tile is in the cache
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache
            .lock()
            .ok()
            .map(|cache| cache.contains(key))
            .unwrap_or(false)
    }

    /// Remove a tile from the cache
    pub fn remove(&self, key: &CacheKey) -> Option<Arc<V>> {
        self.cache.lock().ok()?.pop(key)
    }

    /// Clear all tiles from the cache
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    /// Get the current number of cached tiles
    pub fn len(&self) -> usize {
        self.cache.lock().ok().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache
            .lock()
            .ok()
            .map(|cache| cache.cap().get())
            .unwrap_or(0)
    }
}

impl<V> Clone for TileCache<V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<V> Default for TileCache<V> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl<V> fmt::Debug for TileCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
