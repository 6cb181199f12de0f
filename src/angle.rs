//! Degree helpers shared by the kinematics, the actuators and the heading correction.
//!
//! All angles are compass style: 0 is straight forward and values grow clockwise
//! when looking at the robot from above.

/// Normalize any angle into `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Wrap any angle into `(-180, 180]`
pub fn wrap_degrees(degrees: f64) -> f64 {
    let normalized = normalize_degrees(degrees);
    if normalized > 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Shortest distance between two directions, always in `[0, 180]`
pub fn circular_distance(a: f64, b: f64) -> f64 {
    wrap_degrees(a - b).abs()
}

/// Circular range check that wraps across 0/360.
///
/// `within_circular_range(355.0, 0.0, 10.0)` is true.
pub fn within_circular_range(actual: f64, target: f64, margin: f64) -> bool {
    circular_distance(actual, target) <= margin
}
