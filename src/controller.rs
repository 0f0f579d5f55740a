//! Pose-driven mouse controller.
//!
//! Called once per detected frame with the classifier output and the raw
//! tracking point. The point is smoothed, mapped to the screen, and combined
//! with the pose to move, click, drag or scroll through the `InputSink`.
//!
//! Pose changes only count when the pose differs from the last recorded
//! pose and the classifier confidence is above the configured minimum, so a
//! flickering or repeated prediction never fires an action twice. `OPEN`
//! and `CLOSE` bypass that check: they drive or freeze the pointer every
//! frame.

use crate::{
    filters::PointFilter,
    geometry::Point2,
    input::{InputSink, MouseButton, PointerAction},
    mapping::{AccessibleArea, CoordinateMapper, ScreenResolution},
    pose::{PoseEvent, PoseLabel, Prediction},
    settings::{ControllerLayout, ControllerSettings, MotionMode},
    utils::signum_i32,
    Error, Result,
};
use log::debug;

/// Controller mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Standard,
    Scrolling,
    Dragging,
}

/// Frame-synchronous pointer state machine
pub struct MouseController<S: InputSink> {
    settings: ControllerSettings,
    mapper: CoordinateMapper,
    filter: Box<dyn PointFilter>,
    sink: S,
    frame: u64,
    state: ControllerState,
    state_entered_frame: u64,
    previous_pose: PoseLabel,
    previous_screen_point: Option<Point2>,
    scrolling_origin: Option<f64>,
}

impl<S: InputSink> MouseController<S> {
    /// Create a controller smoothing with the One Euro tuning from `settings`
    ///
    /// # Errors
    ///
    /// Returns an error if the filter tuning is invalid
    pub fn new(settings: ControllerSettings, screen: ScreenResolution, sink: S) -> Result<Self> {
        let filter = Box::new(settings.filter().build()?);
        Self::with_filter(settings, screen, filter, sink)
    }

    /// Create a controller with a caller-supplied point filter
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the detection margin is degenerate
    pub fn with_filter(
        settings: ControllerSettings,
        screen: ScreenResolution,
        filter: Box<dyn PointFilter>,
        sink: S,
    ) -> Result<Self> {
        let mapper = CoordinateMapper::new(settings.detection_margin(), screen)?;
        debug!(
            "Mouse controller: layout {:?}, motion {}, margin {:.3}, filter {}",
            settings.layout(),
            settings.motion(),
            settings.detection_margin(),
            filter.name()
        );
        Ok(Self {
            settings,
            mapper,
            filter,
            sink,
            frame: 0,
            state: ControllerState::Standard,
            state_entered_frame: 0,
            previous_pose: PoseLabel::Undefined,
            previous_screen_point: None,
            scrolling_origin: None,
        })
    }

    #[must_use]
    pub const fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Number of frames processed so far
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Frame on which the current state was entered
    #[must_use]
    pub const fn state_entered_frame(&self) -> u64 {
        self.state_entered_frame
    }

    #[must_use]
    pub const fn previous_pose(&self) -> PoseLabel {
        self.previous_pose
    }

    /// Normalized y recorded when scrolling began
    #[must_use]
    pub const fn scrolling_origin(&self) -> Option<f64> {
        self.scrolling_origin
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Part of a `frame_width` x `frame_height` camera frame outside the dead margin
    #[must_use]
    pub fn accessible_area(&self, frame_width: u32, frame_height: u32) -> AccessibleArea {
        self.mapper.accessible_area(frame_width, frame_height)
    }

    /// Process one frame of classifier output
    ///
    /// # Errors
    ///
    /// Propagates sink failures
    pub fn operate_prediction(&mut self, prediction: Prediction, tracking_point: Point2) -> Result<()> {
        self.operate(prediction.pose(), prediction.confidence(), tracking_point)
    }

    /// Process one frame: smooth the tracking point, then act on the pose
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `confidence` is outside `[0, 1]` or
    /// the tracking point is not finite; the frame is not counted in that
    /// case. Sink failures are propagated.
    pub fn operate(&mut self, pose: PoseLabel, confidence: f64, tracking_point: Point2) -> Result<()> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::InvalidInput(format!(
                "Confidence must be in [0, 1], got {confidence}"
            )));
        }
        if !tracking_point.is_finite() {
            return Err(Error::InvalidInput(format!(
                "Tracking point must be finite, got ({}, {})",
                tracking_point.x, tracking_point.y
            )));
        }

        self.frame += 1;
        let smoothed = self.filter.apply(self.frame, tracking_point);

        match self.settings.layout() {
            ControllerLayout::Front => match self.state {
                ControllerState::Standard => self.handle_standard(pose, confidence, smoothed),
                ControllerState::Scrolling => self.handle_scrolling(pose, confidence, smoothed),
                ControllerState::Dragging => self.handle_dragging(pose, confidence, smoothed),
            },
            ControllerLayout::Vertical => self.handle_vertical(pose, confidence, smoothed),
        }
    }

    fn is_pose_change(&self, pose: PoseLabel, confidence: f64) -> bool {
        pose != self.previous_pose && confidence > self.settings.min_confidence()
    }

    const fn is_first_frame_in_state(&self) -> bool {
        self.state_entered_frame + 1 == self.frame
    }

    fn record_pose(&mut self, pose: PoseLabel) {
        if pose != PoseLabel::Undefined {
            self.previous_pose = pose;
        }
    }

    fn enter_state(&mut self, state: ControllerState) {
        debug!("Frame {}: {:?} -> {:?}", self.frame, self.state, state);
        self.state = state;
        self.state_entered_frame = self.frame;
        self.scrolling_origin = None;
    }

    fn handle_standard(&mut self, pose: PoseLabel, confidence: f64, smoothed: Point2) -> Result<()> {
        match pose.event() {
            Some(PoseEvent::Move | PoseEvent::Stop) => {
                self.handle_pointer(smoothed, pose)?;
                self.record_pose(pose);
            }
            Some(event) if self.is_pose_change(pose, confidence) => {
                self.on_pose_change_standard(event)?;
                self.record_pose(pose);
            }
            _ => {}
        }
        Ok(())
    }

    fn on_pose_change_standard(&mut self, event: PoseEvent) -> Result<()> {
        match event {
            PoseEvent::Move | PoseEvent::Stop => {}
            PoseEvent::LeftClick => {
                debug!("Frame {}: left click", self.frame);
                self.sink.dispatch(PointerAction::Click(MouseButton::Left))?;
            }
            PoseEvent::RightClick => {
                debug!("Frame {}: right click", self.frame);
                self.sink.dispatch(PointerAction::Click(MouseButton::Right))?;
            }
            PoseEvent::LeftDown => self.enter_state(ControllerState::Dragging),
            PoseEvent::Scroll => self.enter_state(ControllerState::Scrolling),
        }
        Ok(())
    }

    fn handle_scrolling(&mut self, pose: PoseLabel, confidence: f64, smoothed: Point2) -> Result<()> {
        match pose.event() {
            Some(PoseEvent::Scroll) => match self.scrolling_origin {
                None => self.scrolling_origin = Some(smoothed.y),
                Some(origin) => {
                    let diff = origin - smoothed.y;
                    if diff.abs() > self.settings.scrolling_threshold() {
                        let speed = i32::try_from(self.settings.scrolling_speed()).unwrap_or(i32::MAX);
                        self.sink.dispatch(PointerAction::Scroll(signum_i32(diff) * speed))?;
                    }
                }
            },
            Some(_) if self.is_pose_change(pose, confidence) => {
                self.enter_state(ControllerState::Standard);
                self.record_pose(pose);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_dragging(&mut self, pose: PoseLabel, confidence: f64, smoothed: Point2) -> Result<()> {
        if self.is_first_frame_in_state() {
            debug!("Frame {}: begin drag", self.frame);
            return self.sink.dispatch(PointerAction::ButtonDown(MouseButton::Left));
        }

        match pose.event() {
            Some(event) if self.is_pose_change(pose, confidence) => {
                debug!("Frame {}: end drag", self.frame);
                self.sink.dispatch(PointerAction::ButtonUp(MouseButton::Left))?;
                self.enter_state(ControllerState::Standard);
                self.on_pose_change_standard(event)?;
                self.record_pose(pose);
            }
            _ => {
                self.handle_pointer(smoothed, pose)?;
                self.record_pose(pose);
            }
        }
        Ok(())
    }

    fn handle_vertical(&mut self, pose: PoseLabel, confidence: f64, smoothed: Point2) -> Result<()> {
        if confidence > self.settings.min_confidence() {
            let screen_point = self.mapper.to_screen(smoothed);
            self.move_pointer(screen_point)?;
            self.previous_screen_point = Some(screen_point);
            self.record_pose(pose);
        }
        Ok(())
    }

    /// Move with `OPEN` (and while dragging), hold still otherwise; the
    /// mapped point is always remembered so resuming never jumps
    fn handle_pointer(&mut self, smoothed: Point2, pose: PoseLabel) -> Result<()> {
        let screen_point = self.mapper.to_screen(smoothed);
        if matches!(pose.event(), Some(PoseEvent::Move | PoseEvent::LeftDown)) {
            self.move_pointer(screen_point)?;
        }
        self.previous_screen_point = Some(screen_point);
        Ok(())
    }

    fn move_pointer(&mut self, screen_point: Point2) -> Result<()> {
        match self.settings.motion() {
            MotionMode::Relative => {
                let Some(previous) = self.previous_screen_point else {
                    return Ok(());
                };
                let delta = (screen_point - previous) * (1.0 + self.settings.sensitivity_gain());
                if delta.x != 0.0 || delta.y != 0.0 {
                    self.sink.dispatch(PointerAction::MoveRelative {
                        dx: delta.x,
                        dy: delta.y,
                    })?;
                }
            }
            MotionMode::Absolute => {
                self.sink.dispatch(PointerAction::MoveAbsolute {
                    x: screen_point.x,
                    y: screen_point.y,
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filters::NoFilter, input::RecordingSink};

    fn controller(motion: MotionMode) -> MouseController<RecordingSink> {
        let mut settings = ControllerSettings::default();
        settings.set_motion(motion);
        settings.set_margin(0.0).unwrap();
        let screen = ScreenResolution::new(1000, 1000).unwrap();
        MouseController::with_filter(settings, screen, Box::new(NoFilter), RecordingSink::new()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let ctrl = controller(MotionMode::Relative);
        assert_eq!(ctrl.state(), ControllerState::Standard);
        assert_eq!(ctrl.frame(), 0);
        assert_eq!(ctrl.previous_pose(), PoseLabel::Undefined);
    }

    #[test]
    fn test_frame_counter_advances() {
        let mut ctrl = controller(MotionMode::Relative);
        for _ in 0..3 {
            ctrl.operate(PoseLabel::Close, 0.9, Point2::new(0.5, 0.5)).unwrap();
        }
        assert_eq!(ctrl.frame(), 3);
    }

    #[test]
    fn test_invalid_confidence_is_rejected_without_counting() {
        let mut ctrl = controller(MotionMode::Relative);
        assert!(ctrl.operate(PoseLabel::Open, 1.5, Point2::new(0.5, 0.5)).is_err());
        assert!(ctrl.operate(PoseLabel::Open, f64::NAN, Point2::new(0.5, 0.5)).is_err());
        assert!(ctrl.operate(PoseLabel::Open, 0.9, Point2::new(f64::NAN, 0.5)).is_err());
        assert_eq!(ctrl.frame(), 0);
    }

    #[test]
    fn test_first_relative_frame_does_not_jump() {
        let mut ctrl = controller(MotionMode::Relative);
        ctrl.operate(PoseLabel::Open, 0.9, Point2::new(0.5, 0.5)).unwrap();
        assert!(ctrl.sink().actions().is_empty());

        ctrl.operate(PoseLabel::Open, 0.9, Point2::new(0.6, 0.5)).unwrap();
        match ctrl.sink().actions() {
            [PointerAction::MoveRelative { dx, dy }] => {
                assert!((dx - 100.0).abs() < 1e-9);
                assert_eq!(*dy, 0.0);
            }
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[test]
    fn test_undefined_is_never_recorded() {
        let mut ctrl = controller(MotionMode::Relative);
        ctrl.operate(PoseLabel::Open, 0.9, Point2::new(0.5, 0.5)).unwrap();
        ctrl.operate(PoseLabel::Undefined, 0.99, Point2::new(0.5, 0.5)).unwrap();
        assert_eq!(ctrl.previous_pose(), PoseLabel::Open);
        assert_eq!(ctrl.state(), ControllerState::Standard);
    }

    #[test]
    fn test_accessible_area_uses_margin() {
        let ctrl = controller(MotionMode::Relative);
        // Normalized margin 0 is the 0.15 internal floor
        let area = ctrl.accessible_area(1000, 1000);
        assert_eq!(area.xmin, 75);
        assert_eq!(area.xmax, 925);
    }
}
