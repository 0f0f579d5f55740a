//! Utility functions shared across modules.

pub mod safe_cast;

/// Sign of `value` as -1, 0 or 1
#[must_use]
pub fn signum_i32(value: f64) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Check that a normalized setting lies in `[0, 1]`
#[must_use]
pub fn is_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signum_i32() {
        assert_eq!(signum_i32(0.3), 1);
        assert_eq!(signum_i32(-0.3), -1);
        assert_eq!(signum_i32(0.0), 0);
        assert_eq!(signum_i32(f64::NAN), 0);
    }

    #[test]
    fn test_is_unit_interval() {
        assert!(is_unit_interval(0.0));
        assert!(is_unit_interval(1.0));
        assert!(!is_unit_interval(1.01));
        assert!(!is_unit_interval(f64::NAN));
    }
}
