//! Validated controller settings.
//!
//! Sensitivity and margin are exposed as normalized `[0, 1]` values but
//! stored in the ranges the controller actually computes with. Every setter
//! rejects out-of-range input so nothing is checked on the per-frame path.

use crate::{
    constants::{
        DEFAULT_BETA, DEFAULT_DERIVATIVE_CUTOFF, DEFAULT_MARGIN, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_CUTOFF,
        DEFAULT_SCROLLING_SPEED, DEFAULT_SCROLLING_THRESHOLD, DEFAULT_SENSITIVITY, MAX_DETECTION_MARGIN,
        MIN_DETECTION_MARGIN, SENSITIVITY_RANGE,
    },
    filters::one_euro::OneEuroPointFilter,
    hand::{validate_tracking_landmarks, PALM_LANDMARKS},
    utils::is_unit_interval,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the smoothed hand position drives the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionMode {
    /// Pointer moves by the scaled change of the mapped position
    #[default]
    Relative,
    /// Pointer jumps to the mapped position
    Absolute,
}

impl FromStr for MotionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "relative" => Ok(Self::Relative),
            "absolute" => Ok(Self::Absolute),
            other => Err(Error::ConfigError(format!("Unknown motion mode: {other}"))),
        }
    }
}

impl fmt::Display for MotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative => f.write_str("relative"),
            Self::Absolute => f.write_str("absolute"),
        }
    }
}

/// Physical arrangement the controller is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerLayout {
    /// Camera facing the user; full pose vocabulary
    #[default]
    Front,
    /// Camera looking down on the hand; pointer movement only
    Vertical,
}

impl ControllerLayout {
    /// Motion mode a layout starts with
    #[must_use]
    pub const fn default_motion(self) -> MotionMode {
        match self {
            Self::Front => MotionMode::Relative,
            Self::Vertical => MotionMode::Absolute,
        }
    }
}

impl FromStr for ControllerLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "vertical" => Ok(Self::Vertical),
            other => Err(Error::ConfigError(format!("Unknown controller layout: {other}"))),
        }
    }
}

/// One Euro tuning for the tracking-point filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterTuning {
    pub min_cutoff: f64,
    pub beta: f64,
    pub derivative_cutoff: f64,
}

impl Default for FilterTuning {
    fn default() -> Self {
        Self {
            min_cutoff: DEFAULT_MIN_CUTOFF,
            beta: DEFAULT_BETA,
            derivative_cutoff: DEFAULT_DERIVATIVE_CUTOFF,
        }
    }
}

impl FilterTuning {
    /// Build the two-axis filter these tunables describe
    ///
    /// # Errors
    ///
    /// Returns `Error::FilterError` for invalid tunables
    pub fn build(&self) -> Result<OneEuroPointFilter> {
        OneEuroPointFilter::new(self.min_cutoff, self.beta, self.derivative_cutoff)
    }
}

/// Immutable-after-construction controller configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    layout: ControllerLayout,
    motion: MotionMode,
    sensitivity_gain: f64,
    detection_margin: f64,
    scrolling_threshold: f64,
    scrolling_speed: u32,
    min_confidence: f64,
    filter: FilterTuning,
    tracking_landmarks: Vec<usize>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::for_layout(ControllerLayout::default())
    }
}

fn normalized(name: &str, value: f64) -> Result<f64> {
    if is_unit_interval(value) {
        Ok(value)
    } else {
        Err(Error::ConfigError(format!("{name} must be between 0 and 1, got {value}")))
    }
}

impl ControllerSettings {
    /// Defaults for a layout
    #[must_use]
    pub fn for_layout(layout: ControllerLayout) -> Self {
        Self {
            layout,
            motion: layout.default_motion(),
            sensitivity_gain: Self::gain_from_normalized(DEFAULT_SENSITIVITY),
            detection_margin: Self::margin_from_normalized(DEFAULT_MARGIN),
            scrolling_threshold: DEFAULT_SCROLLING_THRESHOLD,
            scrolling_speed: DEFAULT_SCROLLING_SPEED,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            filter: FilterTuning::default(),
            tracking_landmarks: PALM_LANDMARKS.to_vec(),
        }
    }

    fn gain_from_normalized(value: f64) -> f64 {
        SENSITIVITY_RANGE.mul_add(value, -SENSITIVITY_RANGE / 2.0)
    }

    fn margin_from_normalized(value: f64) -> f64 {
        (MAX_DETECTION_MARGIN - MIN_DETECTION_MARGIN).mul_add(value, MIN_DETECTION_MARGIN)
    }

    #[must_use]
    pub const fn layout(&self) -> ControllerLayout {
        self.layout
    }

    #[must_use]
    pub const fn motion(&self) -> MotionMode {
        self.motion
    }

    pub fn set_motion(&mut self, motion: MotionMode) {
        self.motion = motion;
    }

    /// Normalized sensitivity in `[0, 1]`; 0.5 is neutral
    #[must_use]
    pub fn sensitivity(&self) -> f64 {
        (self.sensitivity_gain + SENSITIVITY_RANGE / 2.0) / SENSITIVITY_RANGE
    }

    /// Relative-mode gain; the pointer moves by `1 + gain` times the hand delta
    #[must_use]
    pub const fn sensitivity_gain(&self) -> f64 {
        self.sensitivity_gain
    }

    /// # Errors
    ///
    /// Returns `Error::ConfigError` if `value` is outside `[0, 1]`
    pub fn set_sensitivity(&mut self, value: f64) -> Result<()> {
        self.sensitivity_gain = Self::gain_from_normalized(normalized("Sensitivity", value)?);
        Ok(())
    }

    /// Normalized margin in `[0, 1]`
    #[must_use]
    pub fn margin(&self) -> f64 {
        (self.detection_margin - MIN_DETECTION_MARGIN) / (MAX_DETECTION_MARGIN - MIN_DETECTION_MARGIN)
    }

    /// Fraction of the frame treated as dead margin, always below 1
    #[must_use]
    pub const fn detection_margin(&self) -> f64 {
        self.detection_margin
    }

    /// # Errors
    ///
    /// Returns `Error::ConfigError` if `value` is outside `[0, 1]`
    pub fn set_margin(&mut self, value: f64) -> Result<()> {
        self.detection_margin = Self::margin_from_normalized(normalized("Margin", value)?);
        Ok(())
    }

    #[must_use]
    pub const fn scrolling_threshold(&self) -> f64 {
        self.scrolling_threshold
    }

    /// # Errors
    ///
    /// Returns `Error::ConfigError` if `value` is outside `[0, 1]`
    pub fn set_scrolling_threshold(&mut self, value: f64) -> Result<()> {
        self.scrolling_threshold = normalized("Scrolling threshold", value)?;
        Ok(())
    }

    #[must_use]
    pub const fn scrolling_speed(&self) -> u32 {
        self.scrolling_speed
    }

    /// # Errors
    ///
    /// Returns `Error::ConfigError` if `value` is zero
    pub fn set_scrolling_speed(&mut self, value: u32) -> Result<()> {
        if value == 0 {
            return Err(Error::ConfigError("Scrolling speed must be greater than 0".to_string()));
        }
        self.scrolling_speed = value;
        Ok(())
    }

    /// Confidence a pose change must exceed to count
    #[must_use]
    pub const fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// # Errors
    ///
    /// Returns `Error::ConfigError` if `value` is outside `[0, 1]`
    pub fn set_min_confidence(&mut self, value: f64) -> Result<()> {
        self.min_confidence = normalized("Minimum prediction confidence", value)?;
        Ok(())
    }

    #[must_use]
    pub const fn filter(&self) -> FilterTuning {
        self.filter
    }

    /// # Errors
    ///
    /// Returns `Error::FilterError` if the tuning cannot build a filter
    pub fn set_filter(&mut self, tuning: FilterTuning) -> Result<()> {
        tuning.build()?;
        self.filter = tuning;
        Ok(())
    }

    #[must_use]
    pub fn tracking_landmarks(&self) -> &[usize] {
        &self.tracking_landmarks
    }

    /// # Errors
    ///
    /// Returns `Error::ConfigError` for an empty set or an unknown landmark
    pub fn set_tracking_landmarks(&mut self, indices: Vec<usize>) -> Result<()> {
        validate_tracking_landmarks(&indices)?;
        self.tracking_landmarks = indices;
        Ok(())
    }
}
