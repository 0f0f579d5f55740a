//! Hand-pose driven mouse control.
//!
//! This library turns per-frame hand tracking output into pointer actions:
//! - A One Euro adaptive low-pass filter smooths the tracking point
//! - A coordinate mapper trims the camera frame margin and scales to the screen
//! - A pose-event state machine moves, clicks, drags and scrolls
//!
//! Hand detection and pose classification happen elsewhere; this crate
//! consumes their output one frame at a time.
//!
//! # Examples
//!
//! ## Driving the controller
//!
//! ```
//! use hand_mouse_control::{
//!     controller::{ControllerState, MouseController},
//!     geometry::Point2,
//!     input::{PointerAction, RecordingSink},
//!     mapping::ScreenResolution,
//!     pose::PoseLabel,
//!     settings::ControllerSettings,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let screen = ScreenResolution::new(1920, 1080)?;
//! let mut controller = MouseController::new(ControllerSettings::default(), screen, RecordingSink::new())?;
//!
//! controller.operate(PoseLabel::Open, 0.95, Point2::new(0.5, 0.5))?;
//! controller.operate(PoseLabel::IndexMiddleUp, 0.95, Point2::new(0.5, 0.5))?;
//! assert_eq!(controller.state(), ControllerState::Dragging);
//!
//! controller.operate(PoseLabel::IndexMiddleUp, 0.95, Point2::new(0.5, 0.5))?;
//! assert_eq!(
//!     controller.sink().actions(),
//!     &[PointerAction::ButtonDown(hand_mouse_control::input::MouseButton::Left)]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Replaying recorded frames
//!
//! ```no_run
//! use hand_mouse_control::{
//!     app::{load_frame_records, HandMouseSession},
//!     config::Config,
//!     input::X11InputSink,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("hand_mouse.yaml")?;
//! let sink = X11InputSink::new()?;
//! let screen = sink.screen_resolution()?;
//!
//! let mut session = HandMouseSession::from_config(&config, screen, sink)?;
//! let summary = session.run(load_frame_records("frames.yaml")?)?;
//! println!("{} frames, stopped by gesture: {}", summary.frames_processed, summary.stopped_by_gesture);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Filters
//!
//! ```
//! use hand_mouse_control::{filters::create_filter, geometry::Point2};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut filter = create_filter("one_euro:1.0:0.007")?;
//!
//! // The first sample passes through unchanged
//! let smoothed = filter.apply(1, Point2::new(0.42, 0.3));
//! assert_eq!(smoothed, Point2::new(0.42, 0.3));
//!
//! filter.reset();
//! # Ok(())
//! # }
//! ```

/// Session driver for per-frame detector output
pub mod app;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Pose-driven pointer state machine
pub mod controller;

/// Error types and result handling
pub mod error;

/// Signal filtering algorithms for smoothing the tracking point
pub mod filters;

/// Two-dimensional point type
pub mod geometry;

/// Hand landmark layout and tracking point
pub mod hand;

/// Host pointer output
pub mod input;

/// Camera frame to screen mapping
pub mod mapping;

/// Hand poses and classifier predictions
pub mod pose;

/// Validated controller settings
pub mod settings;

/// Stop-gesture detection
pub mod stop_sequence;

/// Utility functions for numeric conversions
pub mod utils;

pub use error::{Error, Result};
