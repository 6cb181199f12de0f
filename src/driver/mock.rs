use super::{GyroSensor, WheelActuator};

/// Wheel that records every call.
///
/// The reported `direction` only changes when a test sets it, like a steering motor
/// that has not moved yet.
#[derive(Debug, Clone, Default)]
pub struct RecordingWheel {
    pub direction: f64,
    pub commands: Vec<(f64, f64)>,
    pub stops: usize,
    pub resets: usize,
    pub difference: f64,
}

impl RecordingWheel {
    pub fn pointing(direction: f64) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    pub fn last_command(&self) -> Option<(f64, f64)> {
        self.commands.last().copied()
    }
}

impl WheelActuator for RecordingWheel {
    fn steer_and_drive(&mut self, direction: f64, speed: f64) {
        self.commands.push((direction, speed));
    }

    fn direction(&self) -> f64 {
        self.direction
    }

    fn stop(&mut self) {
        self.stops += 1;
    }

    fn reset_directional_encoder(&mut self) {
        self.resets += 1;
        self.difference = 0.0;
    }

    fn directional_difference(&self) -> f64 {
        self.difference
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixedGyro {
    pub angle: f64,
}

impl GyroSensor for FixedGyro {
    fn gyro_angle(&self) -> f64 {
        self.angle
    }
}
