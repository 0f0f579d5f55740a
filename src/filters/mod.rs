//! Tracking-point smoothing.
//!
//! The controller owns one `PointFilter` and feeds it the raw tracking point
//! once per frame, using the frame index as time.

/// Adaptive low-pass (One Euro) filter, one instance per axis
pub mod one_euro;

use crate::{
    constants::{DEFAULT_BETA, DEFAULT_DERIVATIVE_CUTOFF, DEFAULT_MIN_CUTOFF},
    geometry::Point2,
    Error, Result,
};

/// Trait for all tracking-point filters
pub trait PointFilter: Send + Sync {
    /// Smooth the point sampled at `frame`
    fn apply(&mut self, frame: u64, point: Point2) -> Point2;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl PointFilter for NoFilter {
    fn apply(&mut self, _frame: u64, point: Point2) -> Point2 {
        point
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

fn parse_param(spec: &str, raw: Option<&str>, default: f64) -> Result<f64> {
    match raw {
        None | Some("") => Ok(default),
        Some(text) => text
            .parse::<f64>()
            .map_err(|_| Error::FilterError(format!("Invalid parameter '{text}' in filter spec '{spec}'"))),
    }
}

/// Create a point filter from a spec string
///
/// Accepted forms are `none` and `one_euro[:min_cutoff[:beta[:derivative_cutoff]]]`,
/// e.g. `one_euro:1.0:0.007`.
///
/// # Errors
///
/// Returns `Error::FilterError` for unknown filter names, unparsable
/// parameters or invalid tunables
pub fn create_filter(spec: &str) -> Result<Box<dyn PointFilter>> {
    let lowered = spec.to_lowercase();
    let mut parts = lowered.split(':');
    let name = parts.next().unwrap_or_default();

    match name {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "one_euro" | "oneeuro" | "1euro" => {
            let min_cutoff = parse_param(spec, parts.next(), DEFAULT_MIN_CUTOFF)?;
            let beta = parse_param(spec, parts.next(), DEFAULT_BETA)?;
            let derivative_cutoff = parse_param(spec, parts.next(), DEFAULT_DERIVATIVE_CUTOFF)?;
            if parts.next().is_some() {
                return Err(Error::FilterError(format!("Too many parameters in filter spec '{spec}'")));
            }
            Ok(Box::new(one_euro::OneEuroPointFilter::new(min_cutoff, beta, derivative_cutoff)?))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {spec}"))),
    }
}
