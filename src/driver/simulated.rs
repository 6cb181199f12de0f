use super::{GyroSensor, WheelActuator};
use crate::angle::{normalize_degrees, wrap_degrees};
use std::time::Duration;

/// Swerve module model with a rate limited steering motor and an ideal drive motor
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedWheel {
    direction: f64,
    target_direction: f64,
    speed: f64,
    distance: f64,
    reference: f64,
    /// inches per second at speed 1.0
    top_speed: f64,
    /// degrees per second
    steer_rate: f64,
}

impl SimulatedWheel {
    pub fn new(top_speed: f64, steer_rate: f64) -> Self {
        Self {
            direction: 0.0,
            target_direction: 0.0,
            speed: 0.0,
            distance: 0.0,
            reference: 0.0,
            top_speed,
            steer_rate,
        }
    }

    /// Wheel that reaches any commanded direction immediately
    pub fn instant_steering(top_speed: f64) -> Self {
        Self::new(top_speed, f64::INFINITY)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn target_direction(&self) -> f64 {
        self.target_direction
    }

    /// Total inches driven since creation
    pub fn odometer(&self) -> f64 {
        self.distance
    }

    pub fn advance(&mut self, elapsed: Duration) {
        let seconds = elapsed.as_secs_f64();
        let error = wrap_degrees(self.target_direction - self.direction);
        let max_step = self.steer_rate * seconds;
        if self.steer_rate.is_infinite() || error.abs() <= max_step {
            self.direction = self.target_direction;
        } else {
            self.direction = normalize_degrees(self.direction + max_step.copysign(error));
        }
        self.distance += self.speed * self.top_speed * seconds;
    }
}

impl WheelActuator for SimulatedWheel {
    fn steer_and_drive(&mut self, direction: f64, speed: f64) {
        self.target_direction = normalize_degrees(direction);
        self.speed = if speed.is_nan() {
            0.0
        } else {
            speed.clamp(0.0, 1.0)
        };
        if self.steer_rate.is_infinite() {
            self.direction = self.target_direction;
        }
    }

    fn direction(&self) -> f64 {
        self.direction
    }

    fn stop(&mut self) {
        self.speed = 0.0;
    }

    fn reset_directional_encoder(&mut self) {
        self.reference = self.distance;
    }

    fn directional_difference(&self) -> f64 {
        self.distance - self.reference
    }
}

/// Gyro with a constant drift, clockwise positive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulatedGyro {
    angle: f64,
    drift_rate: f64,
}

impl SimulatedGyro {
    /// `drift_rate` in degrees per second
    pub fn new(drift_rate: f64) -> Self {
        Self {
            angle: 0.0,
            drift_rate,
        }
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub fn rotate_by(&mut self, degrees: f64) {
        self.angle += degrees;
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.angle += self.drift_rate * elapsed.as_secs_f64();
    }
}

impl GyroSensor for SimulatedGyro {
    fn gyro_angle(&self) -> f64 {
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn steering_is_rate_limited() {
        let mut wheel = SimulatedWheel::new(100.0, 90.0);
        wheel.steer_and_drive(180.0, 0.0);
        wheel.advance(Duration::from_millis(500));
        assert_relative_eq!(wheel.direction(), 45.0, epsilon = 1e-9);
        assert_relative_eq!(wheel.target_direction(), 180.0);
        wheel.advance(Duration::from_secs(2));
        assert_relative_eq!(wheel.direction(), 180.0);
    }

    #[test]
    fn steering_takes_short_way_round() {
        let mut wheel = SimulatedWheel::new(100.0, 10.0);
        wheel.steer_and_drive(350.0, 0.0);
        wheel.advance(Duration::from_millis(500));
        assert_relative_eq!(wheel.direction(), 355.0, epsilon = 1e-9);
    }

    #[test]
    fn instant_steering() {
        let mut wheel = SimulatedWheel::instant_steering(100.0);
        wheel.steer_and_drive(-90.0, 0.5);
        assert_relative_eq!(wheel.direction(), 270.0);
        assert_relative_eq!(wheel.speed(), 0.5);
    }

    #[test]
    fn distance_since_reset() {
        let mut wheel = SimulatedWheel::instant_steering(100.0);
        wheel.steer_and_drive(0.0, 0.5);
        wheel.advance(Duration::from_secs(1));
        assert_relative_eq!(wheel.directional_difference(), 50.0);
        wheel.reset_directional_encoder();
        assert_relative_eq!(wheel.directional_difference(), 0.0);
        wheel.advance(Duration::from_millis(200));
        assert_relative_eq!(wheel.directional_difference(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(wheel.odometer(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn stop_keeps_direction() {
        let mut wheel = SimulatedWheel::instant_steering(100.0);
        wheel.steer_and_drive(42.0, 1.0);
        wheel.stop();
        assert_eq!(wheel.speed(), 0.0);
        assert_relative_eq!(wheel.direction(), 42.0);
    }

    #[test]
    fn range_check_wraps() {
        let mut wheel = SimulatedWheel::instant_steering(100.0);
        wheel.steer_and_drive(355.0, 0.0);
        assert!(wheel.check_within_180_range(0.0, 10.0));
        assert!(!wheel.check_within_180_range(20.0, 10.0));
    }

    #[test]
    fn gyro_drifts() {
        let mut gyro = SimulatedGyro::new(2.0);
        gyro.advance(Duration::from_secs(3));
        gyro.rotate_by(-1.0);
        assert_relative_eq!(gyro.gyro_angle(), 5.0);
        gyro.set_angle(-720.0);
        assert_relative_eq!(gyro.gyro_angle(), -720.0);
    }
}
