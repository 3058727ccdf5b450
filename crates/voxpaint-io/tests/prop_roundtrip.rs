use proptest::prelude::*;
use voxpaint_io::{CameraState, SceneParameters, deserialize, from_json_str, serialize, to_json_string};
use voxpaint_textures::{RgbaImage, TextureAsset, TextureStore};
use voxpaint_world::{VoxelCoord, World};

const NAMES: [&str; 3] = ["grass.png", "stone.png", "brick.png"];

fn store() -> TextureStore {
    let mut s = TextureStore::with_size(2);
    for (i, n) in NAMES.iter().enumerate() {
        let img = RgbaImage::from_raw(2, 2, [i as u8 * 80, 0, 0, 255].repeat(4)).unwrap();
        let epoch = s.epoch();
        s.insert_if_current(TextureAsset::from_color(*n, img).unwrap(), epoch);
    }
    s
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Any world built from known textures survives a JSON round trip
    #[test]
    fn world_survives_json(
        cells in proptest::collection::vec(((-20i32..20, -5i32..20, -20i32..20), 0usize..NAMES.len()), 0..120),
        yaw in -3.0f32..3.0,
        pitch in -1.5f32..1.5,
    ) {
        let textures = store();
        let mut world = World::new();
        for (c, t) in cells {
            world.place(VoxelCoord::from(c), NAMES[t], &textures);
        }
        let camera = CameraState { yaw, pitch, ..CameraState::default() };
        let doc = serialize(&world, &textures, &camera, &SceneParameters::default());
        let back = from_json_str(&to_json_string(&doc).unwrap()).unwrap();
        let scene = deserialize(&back, 2).unwrap();
        prop_assert_eq!(&scene.world, &world);
        prop_assert_eq!(scene.textures.names(), textures.names());
        prop_assert_eq!(scene.camera, camera);
    }
}
