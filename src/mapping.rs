//! Coordinate mapping from the camera frame to the screen.
//!
//! A band of width `margin / 2` along every frame edge is dead: points inside
//! it pin the pointer to the matching screen edge. The inner region is
//! stretched over the whole screen.

use crate::{geometry::Point2, utils::safe_cast::f64_to_u32_clamp, Error, Result};

/// Screen size in pixels, both dimensions non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenResolution {
    width: u32,
    height: u32,
}

impl ScreenResolution {
    /// Create a screen resolution
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if either dimension is zero
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "Screen resolution must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Pixel rectangle of the camera frame outside the dead margin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessibleArea {
    pub xmin: u32,
    pub ymin: u32,
    pub xmax: u32,
    pub ymax: u32,
}

impl AccessibleArea {
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.xmax.saturating_sub(self.xmin)
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.ymax.saturating_sub(self.ymin)
    }
}

fn assert_margin(margin: f64) {
    assert!((0.0..1.0).contains(&margin), "Margin must be in [0, 1), got {margin}");
}

/// Frame rectangle left once `margin / 2` of each dimension is removed from every side
///
/// # Panics
///
/// Panics if `margin` is not in `[0, 1)`
#[must_use]
pub fn accessible_area(frame_width: u32, frame_height: u32, margin: f64) -> AccessibleArea {
    assert_margin(margin);
    let xmin = f64_to_u32_clamp(margin / 2.0 * f64::from(frame_width), 0, frame_width);
    let ymin = f64_to_u32_clamp(margin / 2.0 * f64::from(frame_height), 0, frame_height);
    AccessibleArea {
        xmin,
        ymin,
        xmax: frame_width - xmin,
        ymax: frame_height - ymin,
    }
}

fn trim_axis(value: f64, margin: f64) -> f64 {
    ((value - margin / 2.0) / (1.0 - margin)).clamp(0.0, 1.0)
}

/// Map a normalized frame point to absolute screen pixels
///
/// Each axis is rescaled with `(p - margin / 2) / (1 - margin)`, clamped to
/// `[0, 1]` and then multiplied by the screen dimension, so the result is
/// always on screen.
///
/// # Panics
///
/// Panics if `margin` is not in `[0, 1)`
#[must_use]
pub fn to_screen_coordinates(point: Point2, margin: f64, screen: ScreenResolution) -> Point2 {
    assert_margin(margin);
    Point2::new(
        trim_axis(point.x, margin) * f64::from(screen.width),
        trim_axis(point.y, margin) * f64::from(screen.height),
    )
}

/// Margin and screen bound together once, validated at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    margin: f64,
    screen: ScreenResolution,
}

impl CoordinateMapper {
    /// Create a mapper
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if `margin` is not in `[0, 1)`
    pub fn new(margin: f64, screen: ScreenResolution) -> Result<Self> {
        if !(0.0..1.0).contains(&margin) {
            return Err(Error::ConfigError(format!("Detection margin must be in [0, 1), got {margin}")));
        }
        Ok(Self { margin, screen })
    }

    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }

    #[must_use]
    pub const fn screen(&self) -> ScreenResolution {
        self.screen
    }

    #[must_use]
    pub fn to_screen(&self, point: Point2) -> Point2 {
        to_screen_coordinates(point, self.margin, self.screen)
    }

    #[must_use]
    pub fn accessible_area(&self, frame_width: u32, frame_height: u32) -> AccessibleArea {
        accessible_area(frame_width, frame_height, self.margin)
    }
}
