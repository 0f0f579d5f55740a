//! Constants used throughout the application

/// Number of landmarks produced by the hand landmark detector
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Lower bound of the internal detection margin
pub const MIN_DETECTION_MARGIN: f64 = 0.15;

/// Upper bound of the internal detection margin
pub const MAX_DETECTION_MARGIN: f64 = 0.8;

/// Width of the internal sensitivity gain range, centred on zero
pub const SENSITIVITY_RANGE: f64 = 1.5;

/// Default normalized sensitivity (neutral gain)
pub const DEFAULT_SENSITIVITY: f64 = 0.5;

/// Default normalized detection margin
pub const DEFAULT_MARGIN: f64 = 0.25;

/// Default vertical distance from the scroll origin before scrolling starts
pub const DEFAULT_SCROLLING_THRESHOLD: f64 = 0.1;

/// Default scroll units emitted per frame beyond the threshold
pub const DEFAULT_SCROLLING_SPEED: u32 = 1;

/// Default minimum classifier confidence for a pose change
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

/// Default One Euro minimum cutoff frequency
pub const DEFAULT_MIN_CUTOFF: f64 = 0.1;

/// Default One Euro speed coefficient
pub const DEFAULT_BETA: f64 = 0.0;

/// Default One Euro derivative cutoff frequency
pub const DEFAULT_DERIVATIVE_CUTOFF: f64 = 1.0;

/// Screen size used when no display can be queried
pub const FALLBACK_SCREEN_WIDTH: u32 = 1920;
pub const FALLBACK_SCREEN_HEIGHT: u32 = 1080;

/// X11 core pointer button numbers
pub const X11_BUTTON_LEFT: u8 = 1;
pub const X11_BUTTON_RIGHT: u8 = 3;
pub const X11_BUTTON_WHEEL_UP: u8 = 4;
pub const X11_BUTTON_WHEEL_DOWN: u8 = 5;
