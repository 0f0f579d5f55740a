//! Hand poses, the pointer events they stand for, and classifier predictions.
//!
//! The classifier's label space and the controller's event space are kept
//! apart: `PoseLabel::event` is the only place that ties them together.

use crate::{utils::safe_cast::usize_to_i64, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hand pose produced by the classifier for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum PoseLabel {
    Undefined,
    Open,
    Close,
    IndexUp,
    PinkyUp,
    ThumbSide,
    IndexMiddleUp,
}

/// Semantic controller event a pose maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseEvent {
    /// Move the pointer with the hand
    Move,
    /// Freeze the pointer
    Stop,
    LeftClick,
    RightClick,
    /// Enter scroll mode
    Scroll,
    /// Press the left button and drag
    LeftDown,
}

impl PoseLabel {
    /// Every pose, in classifier class order
    pub const ALL: [Self; 7] = [
        Self::Undefined,
        Self::Open,
        Self::Close,
        Self::IndexUp,
        Self::PinkyUp,
        Self::ThumbSide,
        Self::IndexMiddleUp,
    ];

    /// Map a classifier class index to a pose
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownPose` for indices outside `-1..=5`
    pub fn from_class_index(index: i64) -> Result<Self> {
        match index {
            -1 => Ok(Self::Undefined),
            0 => Ok(Self::Open),
            1 => Ok(Self::Close),
            2 => Ok(Self::IndexUp),
            3 => Ok(Self::PinkyUp),
            4 => Ok(Self::ThumbSide),
            5 => Ok(Self::IndexMiddleUp),
            _ => Err(Error::UnknownPose(format!("class index {index}"))),
        }
    }

    /// Classifier class index of this pose
    #[must_use]
    pub const fn class_index(self) -> i64 {
        match self {
            Self::Undefined => -1,
            Self::Open => 0,
            Self::Close => 1,
            Self::IndexUp => 2,
            Self::PinkyUp => 3,
            Self::ThumbSide => 4,
            Self::IndexMiddleUp => 5,
        }
    }

    /// Canonical upper-case name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "UNDEFINED",
            Self::Open => "OPEN",
            Self::Close => "CLOSE",
            Self::IndexUp => "INDEX_UP",
            Self::PinkyUp => "PINKY_UP",
            Self::ThumbSide => "THUMB_SIDE",
            Self::IndexMiddleUp => "INDEX_MIDDLE_UP",
        }
    }

    /// Controller event for this pose; `Undefined` has none
    #[must_use]
    pub const fn event(self) -> Option<PoseEvent> {
        match self {
            Self::Undefined => None,
            Self::Open => Some(PoseEvent::Move),
            Self::Close => Some(PoseEvent::Stop),
            Self::IndexUp => Some(PoseEvent::LeftClick),
            Self::PinkyUp => Some(PoseEvent::RightClick),
            Self::ThumbSide => Some(PoseEvent::Scroll),
            Self::IndexMiddleUp => Some(PoseEvent::LeftDown),
        }
    }
}

impl fmt::Display for PoseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PoseLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|pose| pose.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownPose(format!("'{s}'")))
    }
}

impl TryFrom<String> for PoseLabel {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PoseLabel> for &'static str {
    fn from(pose: PoseLabel) -> Self {
        pose.name()
    }
}

/// One frame of classifier output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pose: PoseLabel,
    confidence: f64,
}

impl Prediction {
    /// Wrap a classifier result
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `confidence` is outside `[0, 1]` or NaN
    pub fn new(pose: PoseLabel, confidence: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::InvalidInput(format!(
                "Confidence must be in [0, 1], got {confidence}"
            )));
        }
        Ok(Self { pose, confidence })
    }

    /// Pick the most probable class from a probability vector
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for an empty vector or a NaN entry, and
    /// `Error::UnknownPose` if the winning index is not a known pose
    pub fn from_probabilities(probabilities: &[f64]) -> Result<Self> {
        if probabilities.iter().any(|p| p.is_nan()) {
            return Err(Error::InvalidInput("Probability vector contains NaN".to_string()));
        }

        let (index, confidence) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, p)| match best {
                Some((_, best_p)) if best_p >= p => best,
                _ => Some((i, p)),
            })
            .ok_or_else(|| Error::InvalidInput("Probability vector is empty".to_string()))?;

        let pose = PoseLabel::from_class_index(usize_to_i64(index)?)?;
        Self::new(pose, confidence)
    }

    #[must_use]
    pub const fn pose(&self) -> PoseLabel {
        self.pose
    }

    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }
}
