//! Hand landmark layout and tracking-point derivation.
//!
//! Landmarks follow the 21-point hand model of the external detector, in
//! normalized frame coordinates.

use crate::{constants::NUM_HAND_LANDMARKS, geometry::Point2, Error, Result};

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Wrist plus the four finger bases; their mean is the palm centre
pub const PALM_LANDMARKS: [usize; 5] = [WRIST, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

/// Average the selected landmarks into one tracking point
///
/// # Errors
///
/// Returns `Error::InvalidInput` if `indices` is empty or names a landmark
/// that is not present
#[allow(clippy::cast_precision_loss)] // At most a handful of indices
pub fn tracking_point(landmarks: &[Point2], indices: &[usize]) -> Result<Point2> {
    if indices.is_empty() {
        return Err(Error::InvalidInput("Tracking landmark set is empty".to_string()));
    }

    let mut sum = Point2::default();
    for &index in indices {
        let landmark = landmarks.get(index).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Tracking landmark {index} out of range for {} landmarks",
                landmarks.len()
            ))
        })?;
        sum = sum + *landmark;
    }

    Ok(sum * (1.0 / indices.len() as f64))
}

/// Check that a tracking landmark set only names detector landmarks
///
/// # Errors
///
/// Returns `Error::ConfigError` for an empty set or an index past the last landmark
pub fn validate_tracking_landmarks(indices: &[usize]) -> Result<()> {
    if indices.is_empty() {
        return Err(Error::ConfigError("Tracking landmark set must not be empty".to_string()));
    }
    if let Some(bad) = indices.iter().find(|&&i| i >= NUM_HAND_LANDMARKS) {
        return Err(Error::ConfigError(format!(
            "Tracking landmark {bad} exceeds the {NUM_HAND_LANDMARKS}-point hand model"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_hand() -> Vec<Point2> {
        (0..NUM_HAND_LANDMARKS)
            .map(|i| Point2::new(i as f64 / 100.0, 0.5))
            .collect()
    }

    #[test]
    fn test_palm_tracking_point() {
        let hand = grid_hand();
        let point = tracking_point(&hand, &PALM_LANDMARKS).unwrap();
        // (0 + 5 + 9 + 13 + 17) / 5 / 100
        assert!((point.x - 0.088).abs() < 1e-12);
        assert!((point.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_landmark() {
        let hand = grid_hand();
        let point = tracking_point(&hand, &[INDEX_TIP]).unwrap();
        assert_eq!(point, hand[INDEX_TIP]);
    }

    #[test]
    fn test_tracking_point_errors() {
        let hand = grid_hand();
        assert!(tracking_point(&hand, &[]).is_err());
        assert!(tracking_point(&hand[..3], &PALM_LANDMARKS).is_err());
    }

    #[test]
    fn test_validate_tracking_landmarks() {
        assert!(validate_tracking_landmarks(&PALM_LANDMARKS).is_ok());
        assert!(validate_tracking_landmarks(&[]).is_err());
        assert!(validate_tracking_landmarks(&[PINKY_TIP + 1]).is_err());
    }
}
