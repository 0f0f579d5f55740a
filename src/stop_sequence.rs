//! Stop-gesture detection.
//!
//! A session ends when the user performs a fixed sequence of poses. Only
//! pose changes are recorded, so holding a pose for many frames counts once.

use crate::pose::PoseLabel;
use std::collections::VecDeque;

/// Watches the pose stream for a terminating sequence
#[derive(Debug, Clone)]
pub struct StopSequence {
    sequence: Vec<PoseLabel>,
    history: VecDeque<PoseLabel>,
    last_pose: Option<PoseLabel>,
}

impl StopSequence {
    /// Create a detector for `sequence`; an empty sequence never triggers
    #[must_use]
    pub fn new(sequence: Vec<PoseLabel>) -> Self {
        let capacity = sequence.len();
        Self {
            sequence,
            history: VecDeque::with_capacity(capacity),
            last_pose: None,
        }
    }

    #[must_use]
    pub fn sequence(&self) -> &[PoseLabel] {
        &self.sequence
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.sequence.is_empty()
    }

    /// Observe one frame's pose and report whether the sequence is complete
    pub fn update(&mut self, pose: PoseLabel) -> bool {
        if !self.is_enabled() || self.last_pose == Some(pose) {
            return false;
        }
        self.last_pose = Some(pose);

        if self.history.len() >= self.sequence.len() {
            self.history.pop_front();
        }
        self.history.push_back(pose);

        self.history.iter().eq(self.sequence.iter())
    }

    /// Forget all observed poses
    pub fn reset(&mut self) {
        self.history.clear();
        self.last_pose = None;
    }
}
