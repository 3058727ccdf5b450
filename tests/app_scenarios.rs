use std::f32::consts::FRAC_PI_2;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use voxpaint::{App, AppConfig, MirrorScene, PointerButton, Selection};
use voxpaint_world::VoxelCoord;

const CENTER: (f32, f32) = (640.0, 360.0);

fn png(px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba(px));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.textures.size = 4;
    cfg.textures.decode_workers = 1;
    cfg.camera.start_position = [25.0, 300.0, 25.0];
    cfg
}

/// App with camera straight down over cell (0, _, 0) and one texture loaded.
fn app_looking_down() -> App<MirrorScene> {
    let mut app = App::new(&config(), MirrorScene::default()).unwrap();
    app.cam.pitch = -FRAC_PI_2;
    app.ingest_texture("red.png", &png([255, 0, 0, 255])).unwrap();
    app
}

fn click(app: &mut App<MirrorScene>, button: PointerButton) {
    app.pointer_clicked(button, CENTER.0, CENTER.1);
    // One step handles the click, the next applies the edit it emitted.
    app.step();
    app.step();
}

fn cells(app: &App<MirrorScene>) -> Vec<VoxelCoord> {
    app.gs.world.sorted().iter().map(|v| v.coord).collect()
}

#[test]
fn clicks_stack_voxels_and_right_click_removes() {
    let mut app = app_looking_down();
    app.select(Selection::Texture("red.png".into()));

    click(&mut app, PointerButton::Left);
    assert_eq!(cells(&app), vec![VoxelCoord::new(0, 0, 0)]);

    click(&mut app, PointerButton::Left);
    assert_eq!(cells(&app), vec![VoxelCoord::new(0, 0, 0), VoxelCoord::new(0, 1, 0)]);
    assert_eq!(app.scene.voxels.len(), 2);
    assert_eq!(
        app.scene.voxels.get(&VoxelCoord::new(0, 1, 0)).map(String::as_str),
        Some("red.png")
    );

    click(&mut app, PointerButton::Right);
    assert_eq!(cells(&app), vec![VoxelCoord::new(0, 0, 0)]);
    assert!(!app.scene.voxels.contains_key(&VoxelCoord::new(0, 1, 0)));
}

#[test]
fn eraser_left_click_removes_and_middle_does_nothing() {
    let mut app = app_looking_down();
    app.place_at(VoxelCoord::new(0, 0, 0), "red.png");
    app.step();
    let rev = app.gs.world.rev();

    click(&mut app, PointerButton::Middle);
    assert_eq!(app.gs.world.rev(), rev);

    assert_eq!(app.gs.selection, Selection::Eraser);
    click(&mut app, PointerButton::Left);
    assert!(app.gs.world.is_empty());
    assert!(app.scene.voxels.is_empty());

    // Nothing left but the ground, which cannot be erased.
    click(&mut app, PointerButton::Left);
    assert!(app.gs.world.is_empty());
}

#[test]
fn placing_an_unknown_texture_changes_nothing() {
    let mut app = app_looking_down();
    app.select(Selection::Texture("missing.png".into()));
    click(&mut app, PointerButton::Left);
    assert!(app.gs.world.is_empty());
    assert!(app.scene.voxels.is_empty());
}

#[test]
fn save_then_load_discards_later_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");

    let mut app = app_looking_down();
    app.ingest_texture("blue.png", &png([0, 0, 255, 255])).unwrap();
    app.place_at(VoxelCoord::new(0, 0, 0), "red.png");
    app.place_at(VoxelCoord::new(-2, 3, 1), "blue.png");
    app.set_parameter("sunIntensity", "3.5");
    app.step();
    app.save(&path).unwrap();
    let saved = cells(&app);
    let saved_cam = app.cam.state();

    app.remove_at(VoxelCoord::new(0, 0, 0));
    app.place_at(VoxelCoord::new(5, 5, 5), "red.png");
    app.set_parameter("sunIntensity", "9");
    app.look(300.0, 0.0);
    app.step();
    assert_ne!(cells(&app), saved);

    app.load(&path).unwrap();
    assert_eq!(cells(&app), saved);
    assert_eq!(app.gs.params.sun_intensity, 3.5);
    assert!((app.cam.yaw - saved_cam.yaw).abs() < 1e-5);
    assert_eq!(app.gs.textures.names(), vec!["blue.png", "red.png"]);
    assert_eq!(app.scene.clears, 1);
    assert_eq!(app.scene.voxels.len(), 2);
    assert_eq!(
        app.scene.voxels.get(&VoxelCoord::new(-2, 3, 1)).map(String::as_str),
        Some("blue.png")
    );
}

#[test]
fn failed_load_leaves_scene_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"blocks\": [").unwrap();

    let mut app = app_looking_down();
    app.place_at(VoxelCoord::new(1, 0, 1), "red.png");
    app.step();
    assert!(app.load(&path).is_err());
    assert!(app.load(&dir.path().join("absent.json")).is_err());
    assert_eq!(cells(&app), vec![VoxelCoord::new(1, 0, 1)]);
    assert_eq!(app.scene.clears, 0);
}

#[test]
fn load_drops_selection_of_vanished_texture() {
    let mut app = app_looking_down();
    app.ingest_texture("gone.png", &png([1, 2, 3, 255])).unwrap();
    app.select(Selection::Texture("gone.png".into()));
    app.step();

    let mut other = app_looking_down();
    other.place_at(VoxelCoord::new(0, 0, 0), "red.png");
    other.step();
    app.load_document(&other.snapshot()).unwrap();
    assert_eq!(app.gs.selection, Selection::Eraser);
    assert!(!app.gs.textures.contains("gone.png"));
}

#[test]
fn decode_finishing_after_load_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let tex = dir.path().join("late.png");
    std::fs::write(&tex, png([0, 255, 0, 255])).unwrap();

    let mut app = app_looking_down();
    let doc = app.snapshot();
    assert_eq!(app.request_texture(tex.clone(), None).as_deref(), Some("late.png"));
    app.load_document(&doc).unwrap();
    assert_eq!(app.wait_for_decodes(Duration::from_secs(10)), 0);
    assert!(!app.gs.textures.contains("late.png"));

    // Requested after the load, the same file goes through.
    app.request_texture(tex, None);
    app.wait_for_decodes(Duration::from_secs(10));
    assert!(app.gs.textures.contains("late.png"));
    assert!(app.scene.rebinds.iter().any(|n| n == "late.png"));
}

#[test]
fn script_drives_a_full_session() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("grass.png"), png([0, 200, 0, 255])).unwrap();
    std::fs::write(dir.path().join("stone.png"), png([90, 90, 90, 255])).unwrap();
    let script = dir.path().join("session.txt");
    std::fs::write(
        &script,
        "\
# two textures, one under a custom name
texture grass.png
texture stone.png rock
wait
select grass.png
click left 640 360
click left 640 360
place 4 0 0 rock
set fStop 2.8
save out.json
remove 4 0 0
",
    )
    .unwrap();

    let mut app = App::new(&config(), MirrorScene::default()).unwrap();
    app.cam.pitch = -FRAC_PI_2;
    app.run_script_file(&script).unwrap();
    app.step();

    assert_eq!(cells(&app), vec![VoxelCoord::new(0, 0, 0), VoxelCoord::new(0, 1, 0)]);
    assert_eq!(app.gs.params.f_stop, 2.8);

    let saved = voxpaint_io::load_from_path(&dir.path().join("out.json")).unwrap();
    assert_eq!(saved.blocks.len(), 3);
    assert_eq!(saved.blocks[2].texture_name, "rock");
    assert!(saved.textures.contains_key("grass.png"));
    assert!(saved.textures.contains_key("rock"));
}

#[test]
fn script_errors_report_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(&config(), MirrorScene::default()).unwrap();

    let script = dir.path().join("bad.txt");
    std::fs::write(&script, "eraser\nplace 0 0 0\n").unwrap();
    let err = app.run_script_file(&script).unwrap_err();
    assert!(err.to_string().starts_with("line 2:"), "{err}");

    let script = dir.path().join("load.txt");
    std::fs::write(&script, "wait\nload nowhere.json\n").unwrap();
    let err = app.run_script_file(&script).unwrap_err();
    assert!(matches!(err, voxpaint::script::ScriptError::Codec { line: 2, .. }));

    assert!(app.run_script_file(Path::new("/definitely/not/here.txt")).is_err());
}

#[test]
fn clicks_from_a_far_away_saved_camera_do_nothing() {
    let mut app = app_looking_down();
    app.place_at(VoxelCoord::new(0, 0, 0), "red.png");
    app.step();
    let mut doc = app.snapshot();
    doc.camera.position = [1.0e12, 100.0, 0.0];
    doc.camera.rotation = voxpaint_io::Rotation::Euler([0.0, -FRAC_PI_2, 0.0]);
    app.load_document(&doc).unwrap();
    assert_eq!(app.cam.position.x, 1.0e12);
    let rev = app.gs.world.rev();

    app.select(Selection::Texture("red.png".into()));
    click(&mut app, PointerButton::Left);
    click(&mut app, PointerButton::Right);
    assert_eq!(app.gs.world.rev(), rev);
    assert_eq!(cells(&app), vec![VoxelCoord::new(0, 0, 0)]);
}

#[test]
fn unbounded_pick_distance_in_config_is_replaced() {
    let mut cfg = config();
    cfg.world.max_pick_distance = f32::INFINITY;
    let mut app = App::new(&cfg, MirrorScene::default()).unwrap();
    assert_eq!(app.picker.max_distance, 12_000.0);
    app.ingest_texture("red.png", &png([255, 0, 0, 255])).unwrap();
    app.select(Selection::Texture("red.png".into()));
    // Looking level along -Z: nothing to hit, and the click returns.
    click(&mut app, PointerButton::Left);
    assert!(app.gs.world.is_empty());
}
