use tilepyramid::prelude::*;

#[test]
fn profile_from_json_options_drives_tile_keys() {
    let options = ProfileOptions::from_json(
        r#"{
            "kind": "LocalProjected",
            "srs": "EPSG:32633",
            "extent": [500000.0, 4000000.0, 1012000.0, 4512000.0],
            "tile_size": 512,
            "max_level": 16
        }"#,
    )
    .unwrap();

    let profile = options.build().unwrap();
    assert_eq!(profile.tile_size(), 512);
    assert_eq!(profile.max_level(), 16);

    let shared: SharedProfile = Arc::new(profile);
    let key = TileKey::new(0, 1, 1, shared);
    assert!(key.is_projected());
    assert_eq!(key.geo_bounds(), (500000.0, 4000000.0, 756000.0, 4256000.0));
    assert_eq!(key.pixel_extent(512).as_tuple(), (0, 512, 512, 1024));
    assert_eq!(key.map_size_pixels(512).unwrap(), 1024);
}

#[test]
fn unknown_kind_is_a_serialization_error() {
    let result = ProfileOptions::from_json(r#"{ "kind": "Polar" }"#);
    assert!(matches!(result, Err(Error::Serialization(_))));
}

#[test]
fn invalid_options_surface_profile_errors() {
    let options = ProfileOptions {
        srs: String::new(),
        ..ProfileOptions::default()
    };
    assert!(matches!(
        options.build_shared(),
        Err(Error::Profile(ProfileError::MissingSpatialReference))
    ));
}

#[test]
fn tile_cache_keys_payloads_by_profile_and_tile() {
    let geodetic = ProfilePreset::GlobalGeodetic.resolve().build_shared().unwrap();
    let root = TileKey::root(geodetic);
    let cache: TileCache<Vec<u8>> = TileCache::new(16);

    for child in root.children().unwrap() {
        cache.insert(child.cache_key(), child.str().into_bytes());
    }

    assert_eq!(cache.len(), 4);
    let bottom_right = root.child(3).unwrap();
    assert_eq!(
        cache.get(&bottom_right.cache_key()).unwrap().as_slice(),
        b"1_1_1"
    );
    assert!(!cache.contains(&root.cache_key()));
}

#[test]
fn tile_ids_round_trip_through_strings() {
    let geodetic = ProfilePreset::GlobalGeodetic.resolve().build_shared().unwrap();
    let key = TileKey::new(12, 7, 4, geodetic.clone());

    let id: TileId = key.str().parse().unwrap();
    assert_eq!(TileKey::from_id(id, geodetic), key);
}
