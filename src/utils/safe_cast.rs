//! Safe casting utilities for turning smoothed float coordinates into
//! host pixel and button values

use crate::{Error, Result};

/// Safely convert f64 to i32 with bounds checking
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f64_to_i32(value: f64) -> Result<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Round and clamp f64 to i16 for X11 pointer coordinates
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i16_clamp(value: f64, min: i16, max: i16) -> i16 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.round().clamp(f64::from(min), f64::from(max));
    (clamped as i16).clamp(min, max)
}

/// Truncate and clamp f64 to u32 for frame pixel bounds
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Clamping ensures safe truncation
pub fn f64_to_u32_clamp(value: f64, min: u32, max: u32) -> u32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(f64::from(min), f64::from(max));
    (clamped as u32).clamp(min, max)
}

/// Safely convert usize to i64 with overflow checking
///
/// # Errors
///
/// Returns an error if the value exceeds i64::MAX
pub fn usize_to_i64(value: usize) -> Result<i64> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Value {value} too large to fit in i64")))
}
