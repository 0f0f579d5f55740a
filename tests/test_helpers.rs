//! Helper functions and utilities for tests

#![allow(dead_code)]

use hand_mouse_control::{
    controller::MouseController,
    filters::NoFilter,
    geometry::Point2,
    input::{MouseButton, PointerAction, RecordingSink},
    mapping::ScreenResolution,
    pose::PoseLabel,
    settings::ControllerSettings,
    Result,
};

/// Square test screen
pub fn screen_1000() -> ScreenResolution {
    ScreenResolution::new(1000, 1000).expect("non-zero screen")
}

/// Controller without smoothing over a 1000x1000 screen
pub fn unfiltered_controller(settings: ControllerSettings) -> MouseController<RecordingSink> {
    MouseController::with_filter(settings, screen_1000(), Box::new(NoFilter), RecordingSink::new())
        .expect("valid settings")
}

/// Feed `(pose, confidence, point)` frames in order
pub fn feed(
    controller: &mut MouseController<RecordingSink>,
    frames: &[(PoseLabel, f64, Point2)],
) -> Result<()> {
    for &(pose, confidence, point) in frames {
        controller.operate(pose, confidence, point)?;
    }
    Ok(())
}

/// Feed poses at a fixed point with confidence 0.99
pub fn feed_poses(controller: &mut MouseController<RecordingSink>, poses: &[PoseLabel]) -> Result<()> {
    for &pose in poses {
        controller.operate(pose, 0.99, Point2::new(0.5, 0.5))?;
    }
    Ok(())
}

pub fn count_button_down(sink: &RecordingSink) -> usize {
    sink.count(|a| matches!(a, PointerAction::ButtonDown(MouseButton::Left)))
}

pub fn count_button_up(sink: &RecordingSink) -> usize {
    sink.count(|a| matches!(a, PointerAction::ButtonUp(MouseButton::Left)))
}

pub fn count_scrolls(sink: &RecordingSink) -> usize {
    sink.count(|a| matches!(a, PointerAction::Scroll(_)))
}

/// Screen coordinate of a normalized value for the given internal margin
pub fn mapped(value: f64, margin: f64, dimension: f64) -> f64 {
    ((value - margin / 2.0) / (1.0 - margin)).clamp(0.0, 1.0) * dimension
}
