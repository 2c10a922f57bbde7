use spectralview::{create_view, logger, HeadlessSurface, Tile, ViewOptions};
use spectralview::demo::demo_tiles;

#[test]
fn session_log_records_view_events() {
    let path = std::env::temp_dir().join(format!("spectralview_log_test_{}.log", std::process::id()));
    logger::init_at(&path).unwrap();
    assert_eq!(logger::log_path(), Some(&path));

    let tiles: Vec<Tile> = demo_tiles(12, 16, 8);
    let mut view = create_view("logged", tiles, HeadlessSurface::default(), ViewOptions::default()).unwrap();
    view.band_slider_changed(2).unwrap();
    view.pointer_move(Some((3, 3)), true).unwrap();
    assert!(view.band_slider_changed(99).is_err());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("=== SpectralView session started"));
    assert!(text.contains("[INFO] view 'logged' opened"));
    assert!(text.contains("[INFO] band -> 2"));
    assert!(text.contains("[INFO] cursor Z confirmed at (3, 3)"));
    assert!(!text.contains("band -> 99"));

    let _ = std::fs::remove_file(&path);
}
