#[cfg(test)]
pub(crate) mod mock;
pub mod simulated;

use crate::angle::within_circular_range;

pub use simulated::{SimulatedGyro, SimulatedWheel};

/// A single swerve module: one steering motor and one drive motor.
///
/// Calls happen from the control loop thread only and must not block.
pub trait WheelActuator {
    /// `direction` in `[0, 360)` degrees, 0 forward, clockwise positive. `speed` in `[0, 1]`.
    fn steer_and_drive(&mut self, direction: f64, speed: f64);

    /// Direction the module currently points in, degrees
    fn direction(&self) -> f64;

    fn stop(&mut self);

    /// Sets the reference point for [`WheelActuator::directional_difference`]
    fn reset_directional_encoder(&mut self);

    /// Signed inches driven since the last reset
    fn directional_difference(&self) -> f64;

    /// True when the module points within `margin` degrees of `direction`, wrapping at 0/360
    fn check_within_180_range(&self, direction: f64, margin: f64) -> bool {
        within_circular_range(self.direction(), direction, margin)
    }
}

/// Heading source. Degrees, not wrapped, increasing clockwise.
pub trait GyroSensor {
    fn gyro_angle(&self) -> f64;
}

impl<W: WheelActuator + ?Sized> WheelActuator for Box<W> {
    fn steer_and_drive(&mut self, direction: f64, speed: f64) {
        (**self).steer_and_drive(direction, speed)
    }

    fn direction(&self) -> f64 {
        (**self).direction()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn reset_directional_encoder(&mut self) {
        (**self).reset_directional_encoder()
    }

    fn directional_difference(&self) -> f64 {
        (**self).directional_difference()
    }

    fn check_within_180_range(&self, direction: f64, margin: f64) -> bool {
        (**self).check_within_180_range(direction, margin)
    }
}

impl<G: GyroSensor + ?Sized> GyroSensor for Box<G> {
    fn gyro_angle(&self) -> f64 {
        (**self).gyro_angle()
    }
}
