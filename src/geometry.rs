//! Two-dimensional point type shared by the filter, mapper and controller.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point or displacement in either normalized camera-frame units or screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl Add for Point2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point2::new(3.0, 4.0);
        let b = Point2::new(1.0, 1.0);
        assert_eq!(a - b, Point2::new(2.0, 3.0));
        assert_eq!(a + b, Point2::new(4.0, 5.0));
        assert_eq!((a - b) * 2.0, Point2::new(4.0, 6.0));
    }

    #[test]
    fn test_point_finite() {
        assert!(Point2::new(0.5, 0.5).is_finite());
        assert!(!Point2::new(f64::NAN, 0.5).is_finite());
    }
}
