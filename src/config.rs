//! Configuration management for the hand mouse controller

use crate::{
    constants::{
        DEFAULT_BETA, DEFAULT_DERIVATIVE_CUTOFF, DEFAULT_MARGIN, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_CUTOFF,
        DEFAULT_SCROLLING_SPEED, DEFAULT_SCROLLING_THRESHOLD, DEFAULT_SENSITIVITY, FALLBACK_SCREEN_HEIGHT,
        FALLBACK_SCREEN_WIDTH,
    },
    filters::{create_filter, NoFilter, PointFilter},
    hand::PALM_LANDMARKS,
    mapping::ScreenResolution,
    pose::PoseLabel,
    settings::{ControllerLayout, ControllerSettings, FilterTuning, MotionMode},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Controller behaviour
    pub controller: ControllerConfig,

    /// Tracking-point filter
    pub filter: FilterConfig,

    /// Session options
    pub session: SessionConfig,
}

/// Controller configuration, normalized values in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Camera arrangement (front, vertical)
    pub layout: ControllerLayout,

    /// Motion mode; the layout's default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionMode>,

    /// Pointer speed, 0.5 is neutral
    pub sensitivity: f64,

    /// Dead margin of the camera frame
    pub margin: f64,

    /// Hand travel needed before scrolling starts
    pub scrolling_threshold: f64,

    /// Wheel ticks per scroll action
    pub scrolling_speed: u32,

    /// Classifier confidence needed for a pose change
    pub minimum_prediction_confidence: f64,

    /// Landmarks averaged into the tracking point
    pub tracking_landmarks: Vec<usize>,
}

/// Filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Filter type (one_euro, none)
    pub kind: String,

    /// One Euro minimum cutoff
    pub min_cutoff: f64,

    /// One Euro speed coefficient
    pub beta: f64,

    /// One Euro derivative cutoff
    pub derivative_cutoff: f64,
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Poses that end the session; empty disables it
    pub stop_sequence: Vec<PoseLabel>,

    /// Screen width used when no display is available
    pub screen_width: u32,

    /// Screen height used when no display is available
    pub screen_height: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            layout: ControllerLayout::default(),
            motion: None,
            sensitivity: DEFAULT_SENSITIVITY,
            margin: DEFAULT_MARGIN,
            scrolling_threshold: DEFAULT_SCROLLING_THRESHOLD,
            scrolling_speed: DEFAULT_SCROLLING_SPEED,
            minimum_prediction_confidence: DEFAULT_MIN_CONFIDENCE,
            tracking_landmarks: PALM_LANDMARKS.to_vec(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kind: "one_euro".to_string(),
            min_cutoff: DEFAULT_MIN_CUTOFF,
            beta: DEFAULT_BETA,
            derivative_cutoff: DEFAULT_DERIVATIVE_CUTOFF,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stop_sequence: Vec::new(),
            screen_width: FALLBACK_SCREEN_WIDTH,
            screen_height: FALLBACK_SCREEN_HEIGHT,
        }
    }
}

impl FilterConfig {
    fn tuning(&self) -> FilterTuning {
        FilterTuning {
            min_cutoff: self.min_cutoff,
            beta: self.beta,
            derivative_cutoff: self.derivative_cutoff,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Build the validated controller settings
    pub fn controller_settings(&self) -> Result<ControllerSettings> {
        let controller = &self.controller;
        let mut settings = ControllerSettings::for_layout(controller.layout);
        if let Some(motion) = controller.motion {
            settings.set_motion(motion);
        }
        settings.set_sensitivity(controller.sensitivity)?;
        settings.set_margin(controller.margin)?;
        settings.set_scrolling_threshold(controller.scrolling_threshold)?;
        settings.set_scrolling_speed(controller.scrolling_speed)?;
        settings.set_min_confidence(controller.minimum_prediction_confidence)?;
        settings.set_tracking_landmarks(controller.tracking_landmarks.clone())?;
        settings.set_filter(self.filter.tuning())?;
        Ok(settings)
    }

    /// Create a filter from configuration
    ///
    /// Tunables come from the `filter` fields only; inline parameters in
    /// `kind` are rejected.
    pub fn create_filter(&self) -> Result<Box<dyn PointFilter>> {
        if self.filter.kind.contains(':') {
            return Err(Error::ConfigError(format!(
                "Filter kind '{}' must not carry parameters, set min_cutoff/beta/derivative_cutoff instead",
                self.filter.kind
            )));
        }
        match self.filter.kind.to_lowercase().as_str() {
            "none" | "nofilter" => Ok(Box::new(NoFilter)),
            "one_euro" | "oneeuro" | "1euro" => Ok(Box::new(self.filter.tuning().build()?)),
            _ => create_filter(&self.filter.kind),
        }
    }

    /// Screen size used when the real one cannot be queried
    pub fn screen_fallback(&self) -> Result<ScreenResolution> {
        ScreenResolution::new(self.session.screen_width, self.session.screen_height)
            .map_err(|e| Error::ConfigError(format!("Invalid fallback screen size: {e}")))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.controller_settings()?;
        self.create_filter()?;
        self.screen_fallback()?;
        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Mouse Control Configuration

# Controller behaviour (normalized values are in [0, 1])
controller:
  layout: front
  motion: relative
  sensitivity: 0.5
  margin: 0.25
  scrolling_threshold: 0.1
  scrolling_speed: 1
  minimum_prediction_confidence: 0.5
  tracking_landmarks: [0, 5, 9, 13, 17]

# Tracking-point smoothing
filter:
  kind: one_euro
  min_cutoff: 0.1
  beta: 0.0
  derivative_cutoff: 1.0

# Session
session:
  stop_sequence: [CLOSE, OPEN, CLOSE]
  screen_width: 1920
  screen_height: 1080
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let settings = config.controller_settings().unwrap();
        assert_eq!(settings.layout(), ControllerLayout::Front);
        assert_eq!(settings.motion(), MotionMode::Relative);
        assert_eq!(settings.tracking_landmarks(), &PALM_LANDMARKS);
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.session.stop_sequence,
            vec![PoseLabel::Close, PoseLabel::Open, PoseLabel::Close]
        );
        assert_eq!(config.controller.motion, Some(MotionMode::Relative));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("controller:\n  layout: vertical\n").unwrap();
        let settings = config.controller_settings().unwrap();
        assert_eq!(settings.layout(), ControllerLayout::Vertical);
        assert_eq!(settings.motion(), MotionMode::Absolute);
        assert_eq!(config.filter, FilterConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.controller.margin = 1.5;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let mut config = Config::default();
        config.controller.scrolling_speed = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.filter.min_cutoff = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.filter.kind = "kalman".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.screen_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_create_filter_kinds() {
        let mut config = Config::default();
        assert_eq!(config.create_filter().unwrap().name(), "OneEuroFilter");
        config.filter.kind = "none".to_string();
        assert_eq!(config.create_filter().unwrap().name(), "NoFilter");
    }
}
