use crate::{
    angle::{normalize_degrees, wrap_degrees},
    configuration::{check_correction_gain, check_target_distance, check_target_speed, AutonConfig},
    drive::AutoSwerveDrive,
    driver::{GyroSensor, WheelActuator},
    error::ConfigurationError,
    task::Task,
    vector::{SwerveVector, Vector2D},
};
use tracing::*;

const DEFAULT_CORRECTION_GAIN: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutonDriveState {
    Init,
    Running { initial_gyro_angle: f64 },
    Done,
}

/// Strafes in a fixed direction for a fixed distance while holding the starting heading.
///
/// Heading is held with a proportional correction on the gyro. Distance is the mean of
/// all four wheels which is only valid because every wheel points roughly the same way
/// during a straight line drive. Runs once, a finished or interrupted drive stays done.
#[derive(Debug, Clone, PartialEq)]
pub struct AutonDrive {
    direction: f64,
    distance: f64,
    speed: f64,
    correction_gain: f64,
    state: AutonDriveState,
    finished: bool,
}

impl AutonDrive {
    /// * `direction` - compass degrees, 0 forward, clockwise positive
    /// * `distance` - inches, must be positive
    /// * `speed` - `(0, 1]`
    pub fn new(direction: f64, distance: f64, speed: f64) -> Result<Self, ConfigurationError> {
        Ok(Self {
            direction: normalize_degrees(direction),
            distance: check_target_distance(distance)?,
            speed: check_target_speed(speed)?,
            correction_gain: DEFAULT_CORRECTION_GAIN,
            state: AutonDriveState::Init,
            finished: false,
        })
    }

    pub fn from_config(config: &AutonConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Self::new(config.direction, config.distance, config.speed)?
            .with_correction_gain(config.correction_gain)
    }

    /// Gain must be positive, a negative gain would steer away from the starting heading
    pub fn with_correction_gain(mut self, correction_gain: f64) -> Result<Self, ConfigurationError> {
        self.correction_gain = check_correction_gain(correction_gain)?;
        Ok(self)
    }

    pub fn correction_gain(&self) -> f64 {
        self.correction_gain
    }

    /// True once the target distance was reached. Stays false for an interrupted drive.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> AutonDriveState {
        self.state
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Strafe input that moves in the target direction at the target speed
    pub fn drive_vector(&self) -> Vector2D {
        Vector2D::from_compass_degrees(self.direction) * self.speed
    }
}

/// Steering input that turns back towards `initial_gyro_angle`, clamped to `[-1, 1]`
pub fn correction_turn(initial_gyro_angle: f64, current_gyro_angle: f64, gain: f64) -> f64 {
    let error = wrap_degrees(initial_gyro_angle - current_gyro_angle);
    (error * gain).clamp(-1.0, 1.0)
}

impl<W: WheelActuator, G: GyroSensor> Task<AutoSwerveDrive<W, G>> for AutonDrive {
    fn initialize(&mut self, drive: &mut AutoSwerveDrive<W, G>) {
        if self.state != AutonDriveState::Init {
            warn!(state = ?self.state, "Autonomous drive can not be restarted");
            return;
        }
        drive.swerve_mut().stop();
        drive.swerve_mut().set_distance_reference();
        let initial_gyro_angle = drive.gyro_angle();
        self.state = AutonDriveState::Running { initial_gyro_angle };
        info!(
            direction = self.direction,
            distance = self.distance,
            speed = self.speed,
            initial_gyro_angle,
            "Autonomous drive started"
        );
    }

    fn execute(&mut self, drive: &mut AutoSwerveDrive<W, G>) {
        let initial_gyro_angle = match self.state {
            AutonDriveState::Running { initial_gyro_angle } => initial_gyro_angle,
            AutonDriveState::Init => {
                warn!("Autonomous drive executed before initialize");
                return;
            }
            AutonDriveState::Done => return,
        };

        let traveled = drive.swerve().distance_traveled();
        if traveled >= self.distance {
            self.finished = true;
            self.state = AutonDriveState::Done;
            info!(traveled, "Autonomous drive reached target distance");
            return;
        }

        let gyro_angle = drive.gyro_angle();
        let correction = correction_turn(initial_gyro_angle, gyro_angle, self.correction_gain);
        let drive_vector = self.drive_vector();
        trace!(traveled, gyro_angle, correction, "Autonomous drive tick");
        drive
            .swerve_mut()
            .input_drive(drive_vector.x, drive_vector.y, correction);
    }

    fn end(&mut self, drive: &mut AutoSwerveDrive<W, G>, interrupted: bool) {
        drive.swerve_mut().stop();
        self.state = AutonDriveState::Done;
        if interrupted {
            warn!(
                traveled = drive.swerve().distance_traveled(),
                "Autonomous drive interrupted"
            );
        } else {
            info!("Autonomous drive ended");
        }
    }

    fn is_finished(&self) -> bool {
        AutonDrive::is_finished(self)
    }
}
