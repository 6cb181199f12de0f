use crate::{
    angle::normalize_degrees,
    configuration::DriveConfig,
    vector::{SwerveVector, Vector2D},
    wheel_set::WheelSet,
};

/// Body frame motion intent.
///
/// +y is forward, +x is to the right and positive steering turns clockwise
/// when looking at the robot from above. Every axis is expected on `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveCommand {
    strafe_x: f64,
    strafe_y: f64,
    steering: f64,
}

impl MoveCommand {
    pub fn new(strafe_x: f64, strafe_y: f64, steering: f64) -> Self {
        Self {
            strafe_x,
            strafe_y,
            steering,
        }
    }

    pub fn stopped() -> Self {
        Self::default()
    }

    pub fn strafe_x(&self) -> f64 {
        self.strafe_x
    }

    pub fn strafe_y(&self) -> f64 {
        self.strafe_y
    }

    pub fn steering(&self) -> f64 {
        self.steering
    }

    /// Clamps every axis to `[-1, 1]` and replaces NaN with 0
    pub fn clamped(&self) -> Self {
        Self::new(
            clamp_input(self.strafe_x),
            clamp_input(self.strafe_y),
            clamp_input(self.steering),
        )
    }

    /// Deadbands the strafe vector on its magnitude and steering on its own.
    ///
    /// The strafe direction is never changed, only its length.
    pub fn with_deadband(&self, deadband: f64) -> Self {
        let clamped = self.clamped();
        let strafe = deadband_strafe(
            Vector2D::new(clamped.strafe_x, clamped.strafe_y),
            deadband,
        );
        Self::new(strafe.x, strafe.y, apply_deadband(clamped.steering, deadband))
    }
}

/// Steering direction and drive speed for one swerve module
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelCommand {
    direction: f64,
    speed: f64,
}

impl WheelCommand {
    pub fn new(direction: f64, speed: f64) -> Self {
        Self { direction, speed }
    }

    /// Degrees in `[0, 360)`, 0 forward, clockwise positive
    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// `[0, max_output]`
    pub fn speed(&self) -> f64 {
        self.speed
    }
}

pub type SwerveWheelCommand = WheelSet<WheelCommand>;

fn clamp_input(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Zeroes inputs inside the deadband and stretches the rest back over `[-1, 1]`.
///
/// `deadband` maps to 0 and 1 maps to 1, symmetric for negative values.
pub fn apply_deadband(value: f64, deadband: f64) -> f64 {
    let value = clamp_input(value);
    if value.abs() < deadband {
        return 0.0;
    }
    ((value - deadband.copysign(value)) / (1.0 - deadband)).clamp(-1.0, 1.0)
}

/// Same stretch as [`apply_deadband`] applied to the vector length.
///
/// Axis inputs are already on `[-1, 1]` so the length may exceed 1 on diagonals.
fn deadband_strafe(strafe: Vector2D, deadband: f64) -> Vector2D {
    let magnitude = strafe.norm();
    if magnitude == 0.0 || magnitude < deadband {
        return Vector2D::zeros();
    }
    strafe * ((magnitude - deadband) / (1.0 - deadband) / magnitude)
}

/// Inverse kinematics for a four wheel swerve drive.
///
/// `previous_directions` are the directions the wheels currently point in. A wheel that
/// ends up with no speed keeps its previous direction instead of snapping somewhere.
/// If any wheel would exceed `config.max_output` all four speeds are scaled down by the
/// same factor so their ratios, and with them the center of rotation, are kept.
///
/// `config` is expected to have passed [`DriveConfig::validate`].
pub fn compute(
    command: MoveCommand,
    config: &DriveConfig,
    previous_directions: &WheelSet<f64>,
    apply_deadband: bool,
) -> SwerveWheelCommand {
    let command = if apply_deadband {
        command.with_deadband(config.deadband)
    } else {
        command.clamped()
    };

    let mut strafe = Vector2D::new(command.strafe_x(), command.strafe_y());
    if config.limit_strafe_magnitude && strafe.norm() > 1.0 {
        strafe = strafe.normalize();
    }
    let strafe = strafe * config.drive_relative_speed;

    let steering = command.steering();
    let steering_right_front = Vector2D::new(steering * config.width_to_height_ratio, -steering)
        * config.steer_relative_speed;

    /*
    Clockwise steering vector additions
    (top-down view of robot with --+ representing vector arrows for clockwise turning)
    |
    |        +
    |       /     \
    |   LF   |---| +   RF
    |        |   |
    |  LR  + |---|   RR
    |       \     /
    |            +
    */
    let vectors = WheelSet {
        left_front: strafe + steering_right_front.reflect_across_x(),
        right_front: strafe + steering_right_front,
        left_rear: strafe + steering_right_front * -1.0,
        right_rear: strafe + steering_right_front.reflect_across_y(),
    };

    let max_speed = vectors
        .iter()
        .map(|vector| vector.norm())
        .fold(0.0, f64::max);
    // max_speed can only exceed max_output when it is non zero
    let normalize = max_speed > config.max_output;

    vectors
        .zip(*previous_directions)
        .map(|(vector, previous_direction)| {
            let speed = vector.norm();
            let direction = if speed > 0.0 {
                vector.angle_from_forward()
            } else {
                normalize_degrees(previous_direction)
            };
            let speed = if normalize {
                speed / max_speed * config.max_output
            } else {
                speed
            };
            WheelCommand::new(direction, speed)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FORWARD: WheelSet<f64> = WheelSet {
        left_front: 0.0,
        right_front: 0.0,
        left_rear: 0.0,
        right_rear: 0.0,
    };

    fn no_deadband() -> DriveConfig {
        DriveConfig {
            deadband: 0.0,
            ..Default::default()
        }
    }

    fn speeds(commands: &SwerveWheelCommand) -> Vec<f64> {
        commands.iter().map(|command| command.speed()).collect()
    }

    #[test]
    fn deadband_zeroes_small_inputs() {
        assert_eq!(apply_deadband(0.05, 0.06), 0.0);
        assert_eq!(apply_deadband(-0.059, 0.06), 0.0);
    }

    #[test]
    fn deadband_rescales_edges() {
        assert_relative_eq!(apply_deadband(0.06, 0.06), 0.0);
        assert_relative_eq!(apply_deadband(1.0, 0.06), 1.0);
        assert_relative_eq!(apply_deadband(-1.0, 0.06), -1.0);
        assert_relative_eq!(apply_deadband(0.53, 0.06), 0.5, epsilon = 1e-12);
        assert_relative_eq!(apply_deadband(-0.53, 0.06), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn deadband_clamps_out_of_range() {
        assert_relative_eq!(apply_deadband(3.0, 0.1), 1.0);
        assert_relative_eq!(apply_deadband(-3.0, 0.1), -1.0);
        assert_eq!(apply_deadband(f64::NAN, 0.1), 0.0);
    }

    #[test]
    fn zero_deadband_is_identity() {
        for value in [-1.0, -0.5, 0.0, 0.01, 0.7] {
            assert_relative_eq!(apply_deadband(value, 0.0), value);
        }
    }

    #[test]
    fn forward_at_half_speed() {
        let config = DriveConfig {
            drive_relative_speed: 0.5,
            ..no_deadband()
        };
        let commands = compute(MoveCommand::new(0.0, 1.0, 0.0), &config, &FORWARD, true);
        for command in commands.iter() {
            assert_relative_eq!(command.direction(), 0.0);
            assert_relative_eq!(command.speed(), 0.5);
        }
    }

    #[test]
    fn pure_rotation_square_chassis() {
        let config = DriveConfig {
            steer_relative_speed: 0.3,
            ..no_deadband()
        };
        let commands = compute(MoveCommand::new(0.0, 0.0, 1.0), &config, &FORWARD, true);

        let expected_speed = (0.3_f64 * 0.3 * 2.0).sqrt();
        for command in commands.iter() {
            assert_relative_eq!(command.speed(), expected_speed, epsilon = 1e-12);
        }
        assert_relative_eq!(commands.right_front.direction(), 135.0, epsilon = 1e-9);
        assert_relative_eq!(commands.left_front.direction(), 45.0, epsilon = 1e-9);
        assert_relative_eq!(commands.right_rear.direction(), 225.0, epsilon = 1e-9);
        assert_relative_eq!(commands.left_rear.direction(), 315.0, epsilon = 1e-9);
    }

    #[test]
    fn pure_rotation_mirrors_across_forward_axis() {
        let config = no_deadband();
        for steering in [-1.0, -0.4, 0.25, 0.9] {
            let commands = compute(MoveCommand::new(0.0, 0.0, steering), &config, &FORWARD, true);
            let speed = commands.left_front.speed();
            assert!(commands.all(|command| (command.speed() - speed).abs() < 1e-12));
            // mirrored across the forward axis means the directions sum to 180 (mod 360)
            let front = commands.left_front.direction() + commands.right_front.direction();
            let rear = commands.left_rear.direction() + commands.right_rear.direction();
            assert_relative_eq!(normalize_degrees(front), 180.0, epsilon = 1e-9);
            assert_relative_eq!(normalize_degrees(rear), 180.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn pure_strafe_moves_all_wheels_together() {
        let config = no_deadband();
        let commands = compute(MoveCommand::new(0.6, -0.8, 0.0), &config, &FORWARD, true);
        let expected_direction = Vector2D::new(0.6, -0.8).angle_from_forward();
        for command in commands.iter() {
            assert_relative_eq!(command.direction(), expected_direction, epsilon = 1e-12);
            assert_relative_eq!(command.speed(), 1.0 * 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn deadband_keeps_strafe_direction() {
        let config = DriveConfig::default();
        let expected_speed = (0.5 - 0.06) / (1.0 - 0.06) * config.drive_relative_speed;
        for direction in [3.0, 10.0, 80.0, 135.0, 260.0] {
            let strafe = Vector2D::from_compass_degrees(direction) * 0.5;
            let commands = compute(
                MoveCommand::new(strafe.x, strafe.y, 0.0),
                &config,
                &FORWARD,
                true,
            );
            for command in commands.iter() {
                assert_relative_eq!(command.direction(), direction, epsilon = 1e-9);
                assert_relative_eq!(command.speed(), expected_speed, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn deadband_applies_to_strafe_length() {
        // short x component survives because the whole vector is long enough
        let command = MoveCommand::new(0.05, 0.5, 0.03).with_deadband(0.06);
        assert!(command.strafe_x() > 0.0);
        assert_relative_eq!(
            command.strafe_x() / command.strafe_y(),
            0.1,
            epsilon = 1e-12
        );
        assert_eq!(command.steering(), 0.0);

        let command = MoveCommand::new(0.04, -0.04, 0.5).with_deadband(0.06);
        assert_eq!(command.strafe_x(), 0.0);
        assert_eq!(command.strafe_y(), 0.0);
        assert_relative_eq!(command.steering(), apply_deadband(0.5, 0.06));
    }

    #[test]
    fn idle_wheels_keep_previous_direction() {
        let previous = WheelSet::new(10.0, 20.0, 30.0, 40.0);
        let commands = compute(MoveCommand::stopped(), &DriveConfig::default(), &previous, true);
        assert_eq!(commands.left_front, WheelCommand::new(10.0, 0.0));
        assert_eq!(commands.right_front, WheelCommand::new(20.0, 0.0));
        assert_eq!(commands.left_rear, WheelCommand::new(30.0, 0.0));
        assert_eq!(commands.right_rear, WheelCommand::new(40.0, 0.0));
    }

    #[test]
    fn input_inside_deadband_keeps_previous_direction() {
        let previous = WheelSet::splat(270.0);
        let commands = compute(
            MoveCommand::new(0.03, -0.05, 0.02),
            &DriveConfig::default(),
            &previous,
            true,
        );
        assert!(commands.all(|command| *command == WheelCommand::new(270.0, 0.0)));
    }

    #[test]
    fn previous_direction_is_normalized() {
        let previous = WheelSet::splat(-90.0);
        let commands = compute(MoveCommand::stopped(), &DriveConfig::default(), &previous, true);
        assert!(commands.all(|command| command.direction() == 270.0));
    }

    #[test]
    fn skipping_deadband_keeps_small_inputs() {
        let config = DriveConfig {
            deadband: 0.5,
            ..Default::default()
        };
        let commands = compute(MoveCommand::new(0.0, 0.2, 0.0), &config, &FORWARD, false);
        assert_relative_eq!(commands.left_front.speed(), 0.2 * 0.5, epsilon = 1e-12);

        let commands = compute(MoveCommand::new(0.0, 0.2, 0.0), &config, &FORWARD, true);
        assert_eq!(commands.left_front.speed(), 0.0);
    }

    #[test]
    fn normalization_keeps_ratios() {
        let command = MoveCommand::new(0.7, 1.0, 0.5);
        // same geometry at half the gain stays under max output
        let gentle = DriveConfig {
            steer_relative_speed: 0.5,
            drive_relative_speed: 0.5,
            max_output: 1.0,
            ..no_deadband()
        };
        let aggressive = DriveConfig {
            steer_relative_speed: 1.0,
            drive_relative_speed: 1.0,
            max_output: 0.8,
            ..no_deadband()
        };

        let raw = compute(command, &gentle, &FORWARD, true);
        let raw_speeds = speeds(&raw);
        let raw_max = raw_speeds.iter().copied().fold(0.0, f64::max);
        assert!(raw_max < 1.0);
        assert!(raw_max * 2.0 > 0.8);

        let limited = compute(command, &aggressive, &FORWARD, true);
        let limited_speeds = speeds(&limited);
        let limited_max = limited_speeds.iter().copied().fold(0.0, f64::max);
        assert_eq!(limited_max, 0.8);

        for (raw_speed, limited_speed) in raw_speeds.into_iter().zip(limited_speeds) {
            assert_relative_eq!(raw_speed / raw_max, limited_speed / 0.8, epsilon = 1e-9);
        }
        for (raw_command, limited_command) in raw.iter().zip(limited.iter()) {
            assert_relative_eq!(
                raw_command.direction(),
                limited_command.direction(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn speeds_never_exceed_max_output() {
        let config = DriveConfig {
            steer_relative_speed: 0.9,
            drive_relative_speed: 0.9,
            max_output: 0.7,
            width_to_height_ratio: 1.6,
            ..Default::default()
        };
        let steps = [-1.0, -0.75, -0.3, -0.05, 0.0, 0.05, 0.3, 0.75, 1.0];
        for x in steps {
            for y in steps {
                for steering in steps {
                    let commands =
                        compute(MoveCommand::new(x, y, steering), &config, &FORWARD, true);
                    for command in commands.iter() {
                        assert!(command.speed() >= 0.0);
                        assert!(command.speed() <= config.max_output);
                        assert!((0.0..360.0).contains(&command.direction()));
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let config = no_deadband();
        let wild = compute(MoveCommand::new(0.0, 50.0, 0.0), &config, &FORWARD, true);
        let full = compute(MoveCommand::new(0.0, 1.0, 0.0), &config, &FORWARD, true);
        assert_eq!(wild, full);

        let nan = compute(MoveCommand::new(f64::NAN, 0.0, f64::NAN), &config, &FORWARD, true);
        assert!(nan.all(|command| command.speed() == 0.0 && command.direction() == 0.0));
    }

    #[test]
    fn strafe_magnitude_limit() {
        let config = DriveConfig {
            drive_relative_speed: 0.5,
            limit_strafe_magnitude: true,
            ..no_deadband()
        };
        let commands = compute(MoveCommand::new(1.0, 1.0, 0.0), &config, &FORWARD, true);
        assert_relative_eq!(commands.left_front.speed(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(commands.left_front.direction(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn wide_chassis_steers_more_sideways() {
        let config = DriveConfig {
            width_to_height_ratio: 2.0,
            ..no_deadband()
        };
        let commands = compute(MoveCommand::new(0.0, 0.0, 1.0), &config, &FORWARD, true);
        let expected = Vector2D::new(2.0, -1.0).angle_from_forward();
        assert_relative_eq!(commands.right_front.direction(), expected, epsilon = 1e-9);
    }
}
