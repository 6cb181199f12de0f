use crate::angle::normalize_degrees;
use nalgebra as na;

/// Body frame vector. +y is forward and +x is to the right.
///
/// Addition, scaling and magnitude come straight from nalgebra (`+`, `*`, `norm()`).
pub type Vector2D = na::Vector2<f64>;

/// Swerve specific operations on top of [`Vector2D`]
pub trait SwerveVector {
    /// Unit vector pointing in a compass direction (0 forward, clockwise positive)
    fn from_compass_degrees(direction: f64) -> Self;

    /// Negates y. Mirrors a vector between the front and rear wheel on the same side.
    fn reflect_across_x(&self) -> Self;

    /// Negates x. Mirrors a vector between the left and right wheel.
    fn reflect_across_y(&self) -> Self;

    /// Direction of the vector in `[0, 360)` degrees, 0 forward, clockwise positive.
    ///
    /// Meaningless for the zero vector, callers check the magnitude first.
    fn angle_from_forward(&self) -> f64;
}

impl SwerveVector for Vector2D {
    fn from_compass_degrees(direction: f64) -> Self {
        let radians = direction.to_radians();
        Vector2D::new(radians.sin(), radians.cos())
    }

    fn reflect_across_x(&self) -> Self {
        Vector2D::new(self.x, -self.y)
    }

    fn reflect_across_y(&self) -> Self {
        Vector2D::new(-self.x, self.y)
    }

    fn angle_from_forward(&self) -> f64 {
        // atan2 with swapped axes measures from +y towards +x
        normalize_degrees(self.x.atan2(self.y).to_degrees())
    }
}
