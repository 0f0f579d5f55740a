//! Tests for pointer action sinks

use hand_mouse_control::{
    controller::MouseController,
    filters::NoFilter,
    geometry::Point2,
    input::{InputSink, MouseButton, PointerAction, RecordingSink, X11InputSink},
    mapping::ScreenResolution,
    pose::PoseLabel,
    settings::ControllerSettings,
    Error, Result,
};

/// Sink that fails every dispatch
struct BrokenSink;

impl InputSink for BrokenSink {
    fn dispatch(&mut self, action: PointerAction) -> Result<()> {
        Err(Error::CursorControl(format!("cannot perform {action}")))
    }
}

#[test]
fn test_sink_errors_propagate_from_controller() {
    let screen = ScreenResolution::new(800, 600).unwrap();
    let mut controller =
        MouseController::with_filter(ControllerSettings::default(), screen, Box::new(NoFilter), BrokenSink).unwrap();

    let result = controller.operate(PoseLabel::IndexUp, 0.9, Point2::new(0.5, 0.5));
    match result {
        Err(Error::CursorControl(msg)) => assert!(msg.contains("click(Left)")),
        _ => panic!("Expected CursorControl error"),
    }
}

#[test]
fn test_boxed_dyn_sink() {
    let screen = ScreenResolution::new(800, 600).unwrap();
    let sink: Box<dyn InputSink> = Box::new(RecordingSink::new());
    let mut controller = MouseController::new(ControllerSettings::default(), screen, sink).unwrap();

    controller.operate(PoseLabel::PinkyUp, 0.9, Point2::new(0.5, 0.5)).unwrap();
    assert_eq!(controller.frame(), 1);
}

#[test]
fn test_action_display_names() {
    let actions = [
        PointerAction::MoveRelative { dx: 1.0, dy: -2.0 },
        PointerAction::ButtonDown(MouseButton::Left),
        PointerAction::ButtonUp(MouseButton::Left),
        PointerAction::Click(MouseButton::Right),
        PointerAction::Scroll(-1),
    ];
    let rendered: Vec<String> = actions.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "move_by(1.0, -2.0)",
            "button_down(Left)",
            "button_up(Left)",
            "click(Right)",
            "scroll(-1)",
        ]
    );
}

#[test]
#[ignore = "Requires X11 display"]
fn test_x11_sink_reports_screen() {
    let sink = X11InputSink::new().unwrap();
    let screen = sink.screen_resolution().unwrap();
    assert!(screen.width() > 0 && screen.height() > 0);
    let _ = sink.get_position().unwrap();
}

#[test]
#[ignore = "Requires X11 display"]
fn test_x11_sink_moves_pointer() {
    let mut sink = X11InputSink::new().unwrap();
    sink.dispatch(PointerAction::MoveAbsolute { x: 100.0, y: 100.0 }).unwrap();
    assert_eq!(sink.get_position().unwrap(), (100, 100));

    sink.dispatch(PointerAction::MoveRelative { dx: 10.0, dy: -10.0 }).unwrap();
    assert_eq!(sink.get_position().unwrap(), (110, 90));
}
