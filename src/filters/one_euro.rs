//! Adaptive low-pass ("One Euro") filter.
//!
//! The cutoff frequency rises with the estimated speed of the signal: a
//! nearly static hand is smoothed hard to kill jitter, a fast-moving hand is
//! smoothed lightly to keep lag down. Time is the controller's frame index.

use super::PointFilter;
use crate::{
    constants::{DEFAULT_BETA, DEFAULT_DERIVATIVE_CUTOFF, DEFAULT_MIN_CUTOFF},
    geometry::Point2,
    Error, Result,
};
use log::warn;
use std::f64::consts::PI;

/// Per-axis filter memory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    /// Last smoothed value
    pub value: f64,
    /// Last smoothed derivative estimate (units per frame)
    pub derivative: f64,
    /// Frame index of the last accepted sample
    pub frame: u64,
}

/// One Euro filter for a single scalar axis
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    min_cutoff: f64,
    beta: f64,
    derivative_cutoff: f64,
    state: Option<FilterState>,
}

impl OneEuroFilter {
    /// Create a new filter
    ///
    /// # Panics
    ///
    /// Panics if a cutoff is not strictly positive or beta is negative
    #[must_use]
    pub fn new(min_cutoff: f64, beta: f64, derivative_cutoff: f64) -> Self {
        match Self::try_new(min_cutoff, beta, derivative_cutoff) {
            Ok(filter) => filter,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a new filter, reporting bad tunables as an error
    ///
    /// # Errors
    ///
    /// Returns `Error::FilterError` if a cutoff is not strictly positive or
    /// beta is negative
    pub fn try_new(min_cutoff: f64, beta: f64, derivative_cutoff: f64) -> Result<Self> {
        if !(min_cutoff.is_finite() && min_cutoff > 0.0) {
            return Err(Error::FilterError(format!(
                "Minimum cutoff must be positive, got {min_cutoff}"
            )));
        }
        if !(beta.is_finite() && beta >= 0.0) {
            return Err(Error::FilterError(format!("Beta must be non-negative, got {beta}")));
        }
        if !(derivative_cutoff.is_finite() && derivative_cutoff > 0.0) {
            return Err(Error::FilterError(format!(
                "Derivative cutoff must be positive, got {derivative_cutoff}"
            )));
        }
        Ok(Self {
            min_cutoff,
            beta,
            derivative_cutoff,
            state: None,
        })
    }

    /// Current filter memory, `None` before the first sample
    #[must_use]
    pub const fn state(&self) -> Option<FilterState> {
        self.state
    }

    fn smoothing_factor(elapsed: f64, cutoff: f64) -> f64 {
        let r = 2.0 * PI * cutoff * elapsed;
        r / (r + 1.0)
    }

    fn exponential_smoothing(alpha: f64, value: f64, previous: f64) -> f64 {
        alpha.mul_add(value - previous, previous)
    }

    /// Smooth one sample taken at `frame`
    ///
    /// The first sample passes through unchanged and seeds the derivative
    /// with zero. A frame index that does not advance is ignored and the
    /// last smoothed value is returned.
    #[allow(clippy::cast_precision_loss)] // Frame gaps are small
    pub fn filter(&mut self, frame: u64, value: f64) -> f64 {
        let Some(previous) = self.state else {
            self.state = Some(FilterState {
                value,
                derivative: 0.0,
                frame,
            });
            return value;
        };

        if frame <= previous.frame {
            warn!(
                "Ignoring out-of-order sample: frame {} after frame {}",
                frame, previous.frame
            );
            return previous.value;
        }

        let elapsed = (frame - previous.frame) as f64;

        let derivative_alpha = Self::smoothing_factor(elapsed, self.derivative_cutoff);
        let raw_derivative = (value - previous.value) / elapsed;
        let derivative = Self::exponential_smoothing(derivative_alpha, raw_derivative, previous.derivative);

        let cutoff = self.beta.mul_add(derivative.abs(), self.min_cutoff);
        let alpha = Self::smoothing_factor(elapsed, cutoff);
        let smoothed = Self::exponential_smoothing(alpha, value, previous.value);

        self.state = Some(FilterState {
            value: smoothed,
            derivative,
            frame,
        });

        smoothed
    }

    /// Forget all history; the next sample passes through unchanged
    pub fn reset(&mut self) {
        self.state = None;
    }
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CUTOFF, DEFAULT_BETA, DEFAULT_DERIVATIVE_CUTOFF)
    }
}

/// Independent One Euro filters for the x and y axes
#[derive(Debug, Clone, Default)]
pub struct OneEuroPointFilter {
    x: OneEuroFilter,
    y: OneEuroFilter,
}

impl OneEuroPointFilter {
    /// Create a point filter with the same tunables on both axes
    ///
    /// # Errors
    ///
    /// Returns `Error::FilterError` for invalid tunables
    pub fn new(min_cutoff: f64, beta: f64, derivative_cutoff: f64) -> Result<Self> {
        Ok(Self {
            x: OneEuroFilter::try_new(min_cutoff, beta, derivative_cutoff)?,
            y: OneEuroFilter::try_new(min_cutoff, beta, derivative_cutoff)?,
        })
    }

    #[must_use]
    pub const fn x_axis(&self) -> &OneEuroFilter {
        &self.x
    }

    #[must_use]
    pub const fn y_axis(&self) -> &OneEuroFilter {
        &self.y
    }
}

impl PointFilter for OneEuroPointFilter {
    fn apply(&mut self, frame: u64, point: Point2) -> Point2 {
        Point2::new(self.x.filter(frame, point.x), self.y.filter(frame, point.y))
    }

    fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }

    fn name(&self) -> &str {
        "OneEuroFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = OneEuroFilter::new(0.1, 0.0, 1.0);
        assert_eq!(filter.filter(1, 0.42), 0.42);

        let state = filter.state().unwrap();
        assert_eq!(state.derivative, 0.0);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_second_sample_is_smoothed() {
        let mut filter = OneEuroFilter::new(1.0, 0.0, 1.0);
        filter.filter(1, 0.0);
        let out = filter.filter(2, 1.0);

        let r = 2.0 * PI;
        let alpha = r / (r + 1.0);
        assert!((out - alpha).abs() < 1e-12);
        assert!(out > 0.0 && out < 1.0);
    }

    #[test]
    fn test_beta_reduces_lag() {
        let mut slow = OneEuroFilter::new(0.1, 0.0, 1.0);
        let mut fast = OneEuroFilter::new(0.1, 10.0, 1.0);
        slow.filter(1, 0.0);
        fast.filter(1, 0.0);

        let slow_out = slow.filter(2, 1.0);
        let fast_out = fast.filter(2, 1.0);
        assert!(fast_out > slow_out);
    }

    #[test]
    fn test_out_of_order_frame_is_ignored() {
        let mut filter = OneEuroFilter::default();
        filter.filter(5, 1.0);
        let held = filter.filter(6, 2.0);
        assert_eq!(filter.filter(6, 100.0), held);
        assert_eq!(filter.filter(3, -100.0), held);
    }

    #[test]
    fn test_reset() {
        let mut filter = OneEuroFilter::default();
        filter.filter(1, 1.0);
        filter.filter(2, 2.0);
        filter.reset();
        assert!(filter.state().is_none());
        assert_eq!(filter.filter(3, 7.5), 7.5);
    }

    #[test]
    fn test_point_filter_axes_are_independent() {
        let mut filter = OneEuroPointFilter::new(0.5, 0.0, 1.0).unwrap();
        filter.apply(1, Point2::new(0.0, 0.0));
        let out = filter.apply(2, Point2::new(1.0, 0.0));
        assert!(out.x > 0.0);
        assert_eq!(out.y, 0.0);
    }

    #[test]
    fn test_invalid_tunables() {
        assert!(OneEuroFilter::try_new(0.0, 0.0, 1.0).is_err());
        assert!(OneEuroFilter::try_new(0.1, -1.0, 1.0).is_err());
        assert!(OneEuroFilter::try_new(0.1, 0.0, 0.0).is_err());
        assert!(OneEuroFilter::try_new(f64::NAN, 0.0, 1.0).is_err());
    }
}
