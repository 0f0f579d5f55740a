//! Host pointer output.
//!
//! The controller never talks to the OS directly. It hands `PointerAction`s
//! to an `InputSink`: `X11InputSink` drives the real pointer through the
//! XTest extension, `RecordingSink` keeps them for inspection.

use crate::{
    constants::{X11_BUTTON_LEFT, X11_BUTTON_RIGHT, X11_BUTTON_WHEEL_DOWN, X11_BUTTON_WHEEL_UP},
    error::{AppError, Result},
    mapping::ScreenResolution,
    utils::safe_cast::{f64_to_i16_clamp, f64_to_i32},
};
use log::{debug, info};
use std::fmt;
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{self, ConnectionExt as _, Screen},
        xtest::ConnectionExt as _,
    },
    rust_connection::RustConnection,
};

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// One pointer command for the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Warp the pointer to absolute screen pixels
    MoveAbsolute { x: f64, y: f64 },
    /// Move the pointer by a pixel offset
    MoveRelative { dx: f64, dy: f64 },
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    /// Press and release
    Click(MouseButton),
    /// Wheel ticks; positive scrolls up
    Scroll(i32),
}

impl fmt::Display for PointerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveAbsolute { x, y } => write!(f, "move_to({x:.1}, {y:.1})"),
            Self::MoveRelative { dx, dy } => write!(f, "move_by({dx:.1}, {dy:.1})"),
            Self::ButtonDown(button) => write!(f, "button_down({button:?})"),
            Self::ButtonUp(button) => write!(f, "button_up({button:?})"),
            Self::Click(button) => write!(f, "click({button:?})"),
            Self::Scroll(amount) => write!(f, "scroll({amount})"),
        }
    }
}

/// Destination for pointer actions
pub trait InputSink {
    /// Perform one action on the host
    fn dispatch(&mut self, action: PointerAction) -> Result<()>;
}

impl<S: InputSink + ?Sized> InputSink for Box<S> {
    fn dispatch(&mut self, action: PointerAction) -> Result<()> {
        (**self).dispatch(action)
    }
}

/// Sink that stores every action in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    actions: Vec<PointerAction>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn actions(&self) -> &[PointerAction] {
        &self.actions
    }

    /// Number of recorded actions matching `predicate`
    pub fn count(&self, predicate: impl Fn(&PointerAction) -> bool) -> usize {
        self.actions.iter().filter(|action| predicate(action)).count()
    }

    /// Drain the recorded actions
    pub fn take(&mut self) -> Vec<PointerAction> {
        std::mem::take(&mut self.actions)
    }
}

impl InputSink for RecordingSink {
    fn dispatch(&mut self, action: PointerAction) -> Result<()> {
        self.actions.push(action);
        Ok(())
    }
}

/// Fractional pixels carried between relative moves
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct SubpixelRemainder {
    x: f64,
    y: f64,
}

impl SubpixelRemainder {
    /// Whole-pixel part of `(dx, dy)` plus the carried fraction
    fn step(&mut self, dx: f64, dy: f64) -> (f64, f64) {
        let total_x = dx + self.x;
        let total_y = dy + self.y;
        let whole_x = total_x.round();
        let whole_y = total_y.round();
        self.x = total_x - whole_x;
        self.y = total_y - whole_y;
        (whole_x, whole_y)
    }
}

/// Pointer control through an X11 server with the XTest extension
pub struct X11InputSink {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
    remainder: SubpixelRemainder,
}

impl X11InputSink {
    /// Connect to the X11 display named by `$DISPLAY`
    ///
    /// # Errors
    ///
    /// Returns `Error::CursorControl` if the display cannot be reached or
    /// lacks the XTest extension
    pub fn new() -> Result<Self> {
        info!("Initializing X11 input sink");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::CursorControl(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::CursorControl("Failed to get screen".to_string()))?
            .clone();

        let version = connection
            .xtest_get_version(2, 2)
            .map_err(|e| AppError::CursorControl(format!("XTest extension unavailable: {e}")))?
            .reply()
            .map_err(|e| AppError::CursorControl(format!("Failed to query XTest version: {e}")))?;

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!(
            "Connected to X11 display, screen: {}x{}, XTest {}.{}",
            screen_width, screen_height, version.major_version, version.minor_version
        );

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
            remainder: SubpixelRemainder::default(),
        })
    }

    /// Screen dimensions reported by the server
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the server reports a zero-sized screen
    pub fn screen_resolution(&self) -> Result<ScreenResolution> {
        ScreenResolution::new(u32::from(self.screen_width), u32::from(self.screen_height))
    }

    fn max_x(&self) -> i16 {
        i16::try_from(self.screen_width.saturating_sub(1)).unwrap_or(i16::MAX)
    }

    fn max_y(&self) -> i16 {
        i16::try_from(self.screen_height.saturating_sub(1)).unwrap_or(i16::MAX)
    }

    /// Get current cursor position
    pub fn get_position(&self) -> Result<(i16, i16)> {
        let reply = self
            .connection
            .query_pointer(self.screen.root)
            .map_err(|e| AppError::CursorControl(format!("Failed to send query pointer: {e}")))?
            .reply()
            .map_err(|e| AppError::CursorControl(format!("Failed to query pointer: {e}")))?;

        Ok((reply.root_x, reply.root_y))
    }

    fn set_position(&self, x: f64, y: f64) -> Result<()> {
        let x = f64_to_i16_clamp(x, 0, self.max_x());
        let y = f64_to_i16_clamp(y, 0, self.max_y());

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| AppError::CursorControl(format!("Failed to warp pointer: {e}")))?;
        Ok(())
    }

    fn move_relative(&mut self, dx: f64, dy: f64) -> Result<()> {
        let (step_x, step_y) = self.remainder.step(dx, dy);
        if step_x == 0.0 && step_y == 0.0 {
            return Ok(());
        }
        let (current_x, current_y) = self.get_position()?;
        let target_x = f64::from(current_x) + f64::from(f64_to_i32(step_x)?);
        let target_y = f64::from(current_y) + f64::from(f64_to_i32(step_y)?);
        self.set_position(target_x, target_y)
    }

    fn fake_button(&self, event_type: u8, button: u8) -> Result<()> {
        self.connection
            .xtest_fake_input(event_type, button, x11rb::CURRENT_TIME, self.screen.root, 0, 0, 0)
            .map_err(|e| AppError::CursorControl(format!("Failed to send fake button event: {e}")))?;
        Ok(())
    }

    fn click(&self, button: u8) -> Result<()> {
        self.fake_button(xproto::BUTTON_PRESS_EVENT, button)?;
        self.fake_button(xproto::BUTTON_RELEASE_EVENT, button)
    }

    const fn button_code(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => X11_BUTTON_LEFT,
            MouseButton::Right => X11_BUTTON_RIGHT,
        }
    }
}

impl InputSink for X11InputSink {
    fn dispatch(&mut self, action: PointerAction) -> Result<()> {
        debug!("X11 dispatch: {}", action);
        match action {
            PointerAction::MoveAbsolute { x, y } => self.set_position(x, y)?,
            PointerAction::MoveRelative { dx, dy } => self.move_relative(dx, dy)?,
            PointerAction::ButtonDown(button) => {
                self.fake_button(xproto::BUTTON_PRESS_EVENT, Self::button_code(button))?;
            }
            PointerAction::ButtonUp(button) => {
                self.fake_button(xproto::BUTTON_RELEASE_EVENT, Self::button_code(button))?;
            }
            PointerAction::Click(button) => self.click(Self::button_code(button))?,
            PointerAction::Scroll(amount) => {
                let wheel = if amount > 0 { X11_BUTTON_WHEEL_UP } else { X11_BUTTON_WHEEL_DOWN };
                for _ in 0..amount.unsigned_abs() {
                    self.click(wheel)?;
                }
            }
        }

        self.connection
            .flush()
            .map_err(|e| AppError::CursorControl(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }
}
