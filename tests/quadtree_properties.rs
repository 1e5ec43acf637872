use approx::assert_relative_eq;
use tilepyramid::prelude::*;

fn geodetic() -> SharedProfile {
    ProfilePreset::GlobalGeodetic.resolve().build_shared().unwrap()
}

fn mercator() -> SharedProfile {
    ProfilePreset::SphericalMercator.resolve().build_shared().unwrap()
}

/// Every key reachable from the root by repeated subdivision, down to `max_level`.
fn descendants(root: &TileKey, max_level: u32) -> Vec<TileKey> {
    let mut keys = vec![root.clone()];
    let mut frontier = vec![root.clone()];

    while let Some(key) = frontier.pop() {
        if key.level() == max_level {
            continue;
        }
        for child in key.children().unwrap() {
            keys.push(child.clone());
            frontier.push(child.clone());
        }
    }

    keys
}

#[test]
fn child_then_parent_round_trips() {
    let root = TileKey::root(geodetic());

    for key in descendants(&root, 4) {
        for quadrant in 0..4 {
            let child = key.child(quadrant).unwrap();
            assert_eq!(child.parent().unwrap(), key);
        }
    }
}

#[test]
fn subdivided_keys_stay_in_quadtree_bounds() {
    let root = TileKey::root(geodetic());

    for key in descendants(&root, 5) {
        let tiles = map_size_tiles(key.level()).unwrap();
        assert!(key.column() < tiles, "{} out of bounds", key);
        assert!(key.row() < tiles, "{} out of bounds", key);
        assert!(key.is_valid());
    }
}

#[test]
fn identity_strings_are_unique_per_profile() {
    let root = TileKey::root(geodetic());
    let keys = descendants(&root, 4);
    let names: HashSet<String> = keys.iter().map(|key| key.str()).collect();

    // 1 + 4 + 16 + 64 + 256
    assert_eq!(keys.len(), 341);
    assert_eq!(names.len(), keys.len());
}

#[test]
fn identity_string_ignores_profile() {
    let a = TileKey::new(9, 4, 6, geodetic());
    let b = TileKey::new(9, 4, 6, mercator());

    assert_eq!(a.str(), "6_9_4");
    assert_eq!(a.str(), b.str());
    assert_ne!(a, b);
    assert_ne!(a.cache_key(), b.cache_key());
}

fn assert_children_partition_parent(key: &TileKey) {
    let parent = key.geo_extent();
    let children: Vec<GeoExtent> = key
        .children()
        .unwrap()
        .iter()
        .map(|child| child.geo_extent())
        .collect();

    for (i, a) in children.iter().enumerate() {
        assert_eq!(a.srs, parent.srs);
        for b in &children[i + 1..] {
            assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
        }
    }

    let union = children
        .iter()
        .skip(1)
        .try_fold(children[0].clone(), |acc, extent| acc.union(extent))
        .unwrap();
    assert_eq!(union.bounds(), parent.bounds());

    let area: f64 = children.iter().map(|extent| extent.area()).sum();
    assert_relative_eq!(area, parent.area(), max_relative = 1e-9);
}

#[test]
fn children_partition_parent_extent() {
    for profile in [geodetic(), mercator()] {
        let root = TileKey::root(profile);
        for key in descendants(&root, 3) {
            assert_children_partition_parent(&key);
        }
    }
}

#[test]
fn quadrant_layout_matches_orientation() {
    let root = TileKey::root(geodetic());
    let [top_left, top_right, bottom_left, bottom_right] = root.children().unwrap();

    assert_eq!(top_left.geo_bounds(), (-180.0, 0.0, 0.0, 90.0));
    assert_eq!(top_right.geo_bounds(), (0.0, 0.0, 180.0, 90.0));
    assert_eq!(bottom_left.geo_bounds(), (-180.0, -90.0, 0.0, 0.0));
    assert_eq!(bottom_right.geo_bounds(), (0.0, -90.0, 180.0, 0.0));
}

#[test]
fn deep_keys_do_not_drift() {
    let profile = geodetic();
    let mut key = TileKey::root(profile.clone());
    for _ in 0..20 {
        key = key.child_at(Quadrant::BottomRight).unwrap().clone();
    }

    let last = (1u32 << 20) - 1;
    assert_eq!(key.tile_xy(), (last, last));

    let (xmin, ymin, xmax, ymax) = key.geo_bounds();
    assert_eq!(xmax, 180.0);
    assert_eq!(ymin, -90.0);
    assert_eq!(xmax - xmin, 360.0 / f64::from(1u32 << 20));
    assert_eq!(ymax - ymin, 180.0 / f64::from(1u32 << 20));
}

#[test]
fn repeated_child_lookup_returns_cached_instance() {
    let key = TileKey::new(1, 1, 1, geodetic());
    for quadrant in 0..4 {
        let first = key.child(quadrant).unwrap();
        let second = key.child(quadrant).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}

#[test]
fn concurrent_child_lookup_shares_one_instance() {
    let key = TileKey::root(mercator());

    let addresses: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| key.child(3).unwrap() as *const TileKey as usize)
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(key.child(3).unwrap().tile_id(), TileId::new(1, 1, 1));
}

#[test]
fn pixel_extent_example() {
    let key = TileKey::new(3, 2, 4, geodetic());
    let extent = key.pixel_extent(256);
    assert_eq!(extent.as_tuple(), (768, 512, 1024, 768));
}

#[test]
fn map_size_example() {
    assert_eq!(map_size_pixels(256, 4).unwrap(), 4096);
    assert_eq!(map_size_tiles(4).unwrap(), 16);
    assert!(matches!(
        map_size_pixels(256, 31),
        Err(Error::ArithmeticOverflow(_))
    ));
}

#[test]
fn root_covers_profile_extent() {
    let extent = TileKey::root(geodetic()).geo_extent();
    assert_eq!(extent.bounds(), (-180.0, -90.0, 180.0, 90.0));
    assert_eq!(extent.srs, SpatialReference::new("EPSG:4326"));
}

#[test]
fn root_has_no_parent() {
    assert!(TileKey::root(geodetic()).parent().is_none());
    assert!(TileKey::new(0, 0, 0, mercator()).parent().is_none());
}

#[test]
fn invalid_quadrant_is_rejected() {
    let root = TileKey::root(geodetic());
    assert!(matches!(root.child(4), Err(Error::InvalidArgument(_))));
}

#[test]
fn out_of_range_keys_are_permitted() {
    let key = TileKey::new(5, 0, 1, geodetic());
    assert!(!key.is_valid());

    // Extent lands east of the profile instead of failing.
    let (xmin, _, xmax, _) = key.geo_bounds();
    assert_eq!(xmin, 720.0);
    assert_eq!(xmax, 900.0);

    let (x, y) = key.geo_extent().center();
    assert!(!key.profile().extent().contains(x, y));

    let (x, y) = TileKey::new(1, 0, 1, key.profile().clone()).geo_extent().center();
    assert!(key.profile().extent().contains(x, y));
}

#[test]
fn local_profile_classification() {
    let profile: SharedProfile = std::sync::Arc::new(
        ProfileBuilder::local(SpatialReference::new("EPSG:32633"), 0.0, 0.0, 4096.0, 2048.0)
            .build()
            .unwrap(),
    );
    let key = TileKey::new(1, 0, 1, profile);

    assert!(key.is_projected());
    assert!(!key.is_geodetic());
    assert!(!key.is_mercator());
    assert_eq!(key.geo_bounds(), (2048.0, 1024.0, 4096.0, 2048.0));
    assert_eq!(key.geo_extent().srs.code(), "EPSG:32633");
}
