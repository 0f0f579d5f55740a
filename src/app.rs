//! Session driver: feeds per-frame detector output to the controller.
//!
//! Hand detection and pose classification run outside this crate. Their
//! output arrives as `FrameRecord`s, either live from a collaborator or
//! replayed from a YAML file.

use crate::{
    config::Config,
    controller::MouseController,
    geometry::Point2,
    hand,
    input::InputSink,
    mapping::ScreenResolution,
    pose::{PoseLabel, Prediction},
    stop_sequence::StopSequence,
    Error, Result,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

const fn default_hand_present() -> bool {
    true
}

/// Detector and classifier output for one camera frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// False when no hand was detected; such frames never reach the controller
    #[serde(default = "default_hand_present")]
    pub hand_present: bool,

    /// Normalized hand landmarks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<[f64; 2]>,

    /// Precomputed tracking point, used instead of the landmarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<[f64; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<PoseLabel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Raw class probabilities, used when `pose` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Vec<f64>>,
}

impl Default for FrameRecord {
    fn default() -> Self {
        Self {
            hand_present: default_hand_present(),
            landmarks: Vec::new(),
            point: None,
            pose: None,
            confidence: None,
            probabilities: None,
        }
    }
}

impl FrameRecord {
    /// Record for a classified frame with a precomputed tracking point
    #[must_use]
    pub fn classified(pose: PoseLabel, confidence: f64, point: Point2) -> Self {
        Self {
            point: Some([point.x, point.y]),
            pose: Some(pose),
            confidence: Some(confidence),
            ..Self::default()
        }
    }

    /// Record for a frame without a detected hand
    #[must_use]
    pub fn no_hand() -> Self {
        Self {
            hand_present: false,
            ..Self::default()
        }
    }

    /// Resolve the classifier output
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if neither a pose with confidence nor a
    /// probability vector is present, or either is out of contract
    pub fn prediction(&self) -> Result<Prediction> {
        match (self.pose, self.confidence, &self.probabilities) {
            (Some(pose), Some(confidence), _) => Prediction::new(pose, confidence),
            (Some(pose), None, _) => Err(Error::InvalidInput(format!("Pose {pose} has no confidence"))),
            (None, _, Some(probabilities)) => Prediction::from_probabilities(probabilities),
            (None, _, None) => Err(Error::InvalidInput(
                "Frame has neither a pose nor class probabilities".to_string(),
            )),
        }
    }

    /// Tracking point from the explicit point or the selected landmarks
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the landmarks do not cover `indices`
    pub fn tracking_point(&self, indices: &[usize]) -> Result<Point2> {
        if let Some(point) = self.point {
            return Ok(Point2::from(point));
        }
        let landmarks: Vec<Point2> = self.landmarks.iter().copied().map(Point2::from).collect();
        hand::tracking_point(&landmarks, indices)
    }
}

/// Outcome of one processed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Continue,
    /// The stop sequence was performed
    StopRequested,
}

/// Totals reported when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub stopped_by_gesture: bool,
}

/// Couples a controller with the stop gesture for a run over many frames
pub struct HandMouseSession<S: InputSink> {
    controller: MouseController<S>,
    stop_sequence: StopSequence,
    frames_processed: u64,
    frames_skipped: u64,
}

impl<S: InputSink> HandMouseSession<S> {
    #[must_use]
    pub fn new(controller: MouseController<S>, stop_sequence: StopSequence) -> Self {
        Self {
            controller,
            stop_sequence,
            frames_processed: 0,
            frames_skipped: 0,
        }
    }

    /// Build the controller, filter and stop sequence described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn from_config(config: &Config, screen: ScreenResolution, sink: S) -> Result<Self> {
        let settings = config.controller_settings()?;
        let filter = config.create_filter()?;
        let controller = MouseController::with_filter(settings, screen, filter, sink)?;
        let stop_sequence = StopSequence::new(config.session.stop_sequence.clone());
        if stop_sequence.is_enabled() {
            let poses: Vec<String> = stop_sequence.sequence().iter().map(ToString::to_string).collect();
            info!("Stop sequence: {}", poses.join(" -> "));
        }
        Ok(Self::new(controller, stop_sequence))
    }

    #[must_use]
    pub const fn controller(&self) -> &MouseController<S> {
        &self.controller
    }

    #[must_use]
    pub const fn stop_sequence(&self) -> &StopSequence {
        &self.stop_sequence
    }

    #[must_use]
    pub fn into_controller(self) -> MouseController<S> {
        self.controller
    }

    /// Process one frame record
    ///
    /// # Errors
    ///
    /// Returns an error for records that break the frame contract or when
    /// the sink fails
    pub fn process(&mut self, record: &FrameRecord) -> Result<SessionStatus> {
        if !record.hand_present {
            self.frames_skipped += 1;
            return Ok(SessionStatus::Continue);
        }

        let prediction = record.prediction()?;
        let point = record.tracking_point(self.controller.settings().tracking_landmarks())?;
        self.controller.operate_prediction(prediction, point)?;
        self.frames_processed += 1;

        debug!(
            "Frame {}: {} ({:.2}) -> {:?}",
            self.controller.frame(),
            prediction.pose(),
            prediction.confidence(),
            self.controller.state()
        );

        if self.stop_sequence.update(prediction.pose()) {
            info!("Stop sequence detected after {} frames", self.frames_processed);
            return Ok(SessionStatus::StopRequested);
        }
        Ok(SessionStatus::Continue)
    }

    /// Process records until they run out or the stop sequence is performed
    ///
    /// # Errors
    ///
    /// Stops at the first failing record and returns its error
    pub fn run<I>(&mut self, records: I) -> Result<SessionSummary>
    where
        I: IntoIterator<Item = FrameRecord>,
    {
        let mut stopped_by_gesture = false;
        for record in records {
            if self.process(&record)? == SessionStatus::StopRequested {
                stopped_by_gesture = true;
                break;
            }
        }

        let summary = SessionSummary {
            frames_processed: self.frames_processed,
            frames_skipped: self.frames_skipped,
            stopped_by_gesture,
        };
        info!(
            "Session finished: {} frames processed, {} skipped{}",
            summary.frames_processed,
            summary.frames_skipped,
            if stopped_by_gesture { ", stopped by gesture" } else { "" }
        );
        Ok(summary)
    }
}

/// Read a YAML list of frame records
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read and `Error::InvalidInput`
/// if it is not a valid record list
pub fn load_frame_records<P: AsRef<Path>>(path: P) -> Result<Vec<FrameRecord>> {
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| Error::InvalidInput(format!("Failed to parse frame records: {e}")))
}
