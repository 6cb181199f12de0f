use crate::{
    angle::normalize_degrees,
    configuration::{
        check_deadband, check_drive_relative_speed, check_max_output, check_steer_relative_speed,
        DriveConfig,
    },
    driver::{GyroSensor, WheelActuator},
    error::ConfigurationError,
    swerve_kinematics::{self, MoveCommand, SwerveWheelCommand},
    wheel_set::WheelSet,
};
use tracing::*;

/// Anything that can be told to move and to stop
pub trait Drivable {
    fn drive(&mut self, command: MoveCommand);
    fn stop(&mut self);
    fn describe(&self) -> &str;
}

/// Four independently steered wheels driven as one.
///
/// Owns its actuators for its whole lifetime. All calls, setters included, are
/// expected from the control loop thread.
#[derive(Debug)]
pub struct SwerveDrive<W> {
    wheels: WheelSet<W>,
    config: DriveConfig,
}

impl<W: WheelActuator> SwerveDrive<W> {
    pub fn new(wheels: WheelSet<W>, config: DriveConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        info!(?config, "Created swerve drive");
        Ok(Self { wheels, config })
    }

    /// Default tuning, track width equal to wheelbase
    pub fn square(wheels: WheelSet<W>) -> Self {
        Self {
            wheels,
            config: DriveConfig::default(),
        }
    }

    pub fn with_width_to_height_ratio(
        wheels: WheelSet<W>,
        width_to_height_ratio: f64,
    ) -> Result<Self, ConfigurationError> {
        Self::new(
            wheels,
            DriveConfig::with_width_to_height_ratio(width_to_height_ratio),
        )
    }

    /// Drives from strafing and steering inputs on `[-1, 1]`.
    ///
    /// +y is forward, +x is to the right and positive steering turns clockwise.
    pub fn input_drive(&mut self, strafe_x: f64, strafe_y: f64, steering: f64) {
        self.input_drive_with_deadband(strafe_x, strafe_y, steering, true);
    }

    pub fn input_drive_with_deadband(
        &mut self,
        strafe_x: f64,
        strafe_y: f64,
        steering: f64,
        apply_deadband: bool,
    ) {
        self.drive_command(MoveCommand::new(strafe_x, strafe_y, steering), apply_deadband);
    }

    /// Runs the kinematics against the current wheel directions and dispatches the result
    pub fn drive_command(
        &mut self,
        command: MoveCommand,
        apply_deadband: bool,
    ) -> SwerveWheelCommand {
        let previous_directions = self.wheels.each_ref().map(|wheel| wheel.direction());
        let wheel_commands = swerve_kinematics::compute(
            command,
            &self.config,
            &previous_directions,
            apply_deadband,
        );
        trace!(?command, ?wheel_commands, "Dispatching wheel commands");
        for (wheel, wheel_command) in [
            (&mut self.wheels.left_front, wheel_commands.left_front),
            (&mut self.wheels.right_front, wheel_commands.right_front),
            (&mut self.wheels.left_rear, wheel_commands.left_rear),
            (&mut self.wheels.right_rear, wheel_commands.right_rear),
        ] {
            wheel.steer_and_drive(wheel_command.direction(), wheel_command.speed());
        }
        wheel_commands
    }

    /// Points every wheel the same way at the same speed, bypassing the kinematics
    pub fn steer_and_drive_all(&mut self, direction: f64, speed: f64) {
        let direction = normalize_degrees(direction);
        let speed = if speed.is_nan() {
            0.0
        } else {
            speed.clamp(0.0, 1.0)
        };
        self.wheels
            .for_each_mut(|wheel| wheel.steer_and_drive(direction, speed));
    }

    /// Steers all wheels towards `direction` without driving.
    ///
    /// Returns true once every wheel is within `margin` degrees of it.
    pub fn steer_all_within_range(&mut self, direction: f64, margin: f64) -> bool {
        self.steer_and_drive_all(direction, 0.0);
        let direction = normalize_degrees(direction);
        let within = self
            .wheels
            .each_ref()
            .map(|wheel| wheel.check_within_180_range(direction, margin));
        if !within.all(|within| *within) {
            debug!(
                direction,
                margin,
                left_front = within.left_front,
                right_front = within.right_front,
                left_rear = within.left_rear,
                right_rear = within.right_rear,
                "Wheels not aligned yet"
            );
            return false;
        }
        true
    }

    pub fn stop(&mut self) {
        self.wheels.for_each_mut(|wheel| wheel.stop());
    }

    /// Resets the distance reference of every wheel
    pub fn set_distance_reference(&mut self) {
        self.wheels
            .for_each_mut(|wheel| wheel.reset_directional_encoder());
    }

    /// Mean absolute distance of the four wheels since the last reference.
    ///
    /// Only meaningful while all wheels point the same way.
    pub fn distance_traveled(&self) -> f64 {
        self.wheels
            .iter()
            .map(|wheel| wheel.directional_difference().abs())
            .sum::<f64>()
            / 4.0
    }

    pub fn set_max_output(&mut self, max_output: f64) -> Result<(), ConfigurationError> {
        self.config.max_output = check_max_output(max_output)?;
        debug!(max_output, "Max output changed");
        Ok(())
    }

    pub fn set_deadband(&mut self, deadband: f64) -> Result<(), ConfigurationError> {
        self.config.deadband = check_deadband(deadband)?;
        debug!(deadband, "Deadband changed");
        Ok(())
    }

    pub fn set_steer_relative_speed(&mut self, speed: f64) -> Result<(), ConfigurationError> {
        self.config.steer_relative_speed = check_steer_relative_speed(speed)?;
        debug!(speed, "Steer relative speed changed");
        Ok(())
    }

    pub fn set_drive_relative_speed(&mut self, speed: f64) -> Result<(), ConfigurationError> {
        self.config.drive_relative_speed = check_drive_relative_speed(speed)?;
        debug!(speed, "Drive relative speed changed");
        Ok(())
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    pub fn wheels(&self) -> &WheelSet<W> {
        &self.wheels
    }

    pub fn wheels_mut(&mut self) -> &mut WheelSet<W> {
        &mut self.wheels
    }
}

impl<W: WheelActuator> Drivable for SwerveDrive<W> {
    fn drive(&mut self, command: MoveCommand) {
        self.drive_command(command, true);
    }

    fn stop(&mut self) {
        SwerveDrive::stop(self);
    }

    fn describe(&self) -> &str {
        "SwerveDrive"
    }
}

/// Swerve drive paired with a gyro, the subsystem autonomous routines run against
#[derive(Debug)]
pub struct AutoSwerveDrive<W, G> {
    swerve: SwerveDrive<W>,
    gyro: G,
}

impl<W: WheelActuator, G: GyroSensor> AutoSwerveDrive<W, G> {
    pub fn new(swerve: SwerveDrive<W>, gyro: G) -> Self {
        Self { swerve, gyro }
    }

    /// Degrees, unbounded, clockwise positive
    pub fn gyro_angle(&self) -> f64 {
        self.gyro.gyro_angle()
    }

    pub fn swerve(&self) -> &SwerveDrive<W> {
        &self.swerve
    }

    pub fn swerve_mut(&mut self) -> &mut SwerveDrive<W> {
        &mut self.swerve
    }

    pub fn gyro_mut(&mut self) -> &mut G {
        &mut self.gyro
    }
}

impl<W: WheelActuator, G: GyroSensor> Drivable for AutoSwerveDrive<W, G> {
    fn drive(&mut self, command: MoveCommand) {
        self.swerve.drive(command);
    }

    fn stop(&mut self) {
        self.swerve.stop();
    }

    fn describe(&self) -> &str {
        "AutoSwerveDrive"
    }
}
