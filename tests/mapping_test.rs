//! Tests for camera frame to screen mapping

use hand_mouse_control::{
    geometry::Point2,
    mapping::{accessible_area, to_screen_coordinates, CoordinateMapper, ScreenResolution},
    settings::ControllerSettings,
    Error,
};

fn screen(width: u32, height: u32) -> ScreenResolution {
    ScreenResolution::new(width, height).unwrap()
}

#[test]
fn test_frame_corners_reach_screen_corners() {
    let screen = screen(1000, 1000);
    assert_eq!(
        to_screen_coordinates(Point2::new(0.0, 0.0), 0.25, screen),
        Point2::new(0.0, 0.0)
    );
    assert_eq!(
        to_screen_coordinates(Point2::new(1.0, 1.0), 0.25, screen),
        Point2::new(1000.0, 1000.0)
    );
}

#[test]
fn test_margin_edges_map_to_screen_edges() {
    let screen = screen(1000, 1000);
    let low = to_screen_coordinates(Point2::new(0.125, 0.125), 0.25, screen);
    let high = to_screen_coordinates(Point2::new(0.875, 0.875), 0.25, screen);
    assert!(low.x.abs() < 1e-9);
    assert!((high.y - 1000.0).abs() < 1e-9);
}

#[test]
fn test_mapping_follows_rescale_formula() {
    let screen = screen(1000, 1000);
    let centre = to_screen_coordinates(Point2::new(0.5, 0.5), 0.25, screen);
    assert!((centre.x - 500.0).abs() < 1e-9);

    // (0.625 - 0.125) / 0.75 of the screen
    let inner = to_screen_coordinates(Point2::new(0.625, 0.625), 0.25, screen);
    assert!((inner.x - 666.666_666_666_666_6).abs() < 1e-6);
    assert!((inner.y - 666.666_666_666_666_6).abs() < 1e-6);
}

#[test]
fn test_axes_scale_independently() {
    let out = to_screen_coordinates(Point2::new(1.0, 0.5), 0.0, screen(2560, 1440));
    assert_eq!(out, Point2::new(2560.0, 720.0));
}

#[test]
fn test_accessible_area_for_camera_frame() {
    let area = accessible_area(1280, 720, 0.5);
    assert_eq!((area.xmin, area.ymin, area.xmax, area.ymax), (320, 180, 960, 540));

    let full = accessible_area(1280, 720, 0.0);
    assert_eq!((full.xmin, full.ymin, full.xmax, full.ymax), (0, 0, 1280, 720));
}

#[test]
#[should_panic(expected = "Margin must be in [0, 1)")]
fn test_accessible_area_rejects_unit_margin() {
    let _ = accessible_area(640, 480, 1.0);
}

#[test]
#[should_panic(expected = "Margin must be in [0, 1)")]
fn test_mapping_rejects_negative_margin() {
    let _ = to_screen_coordinates(Point2::new(0.5, 0.5), -0.2, screen(100, 100));
}

#[test]
fn test_mapper_built_from_settings() {
    let settings = ControllerSettings::default();
    let mapper = CoordinateMapper::new(settings.detection_margin(), screen(1920, 1080)).unwrap();
    let out = mapper.to_screen(Point2::new(0.5, 0.5));
    assert!((out.x - 960.0).abs() < 1e-9);
    assert!((out.y - 540.0).abs() < 1e-9);
    assert_eq!(mapper.screen().width(), 1920);
}

#[test]
fn test_degenerate_configuration_rejected_up_front() {
    assert!(matches!(
        CoordinateMapper::new(1.0, screen(100, 100)),
        Err(Error::ConfigError(_))
    ));
    assert!(matches!(ScreenResolution::new(0, 0), Err(Error::InvalidInput(_))));
}
