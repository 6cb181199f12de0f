use config::Config;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::*;

use crate::error::ConfigurationError;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub drive: DriveConfig,
    #[serde(default)]
    pub autonomous: AutonConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl AppConfig {
    pub fn load_config(config: &Option<PathBuf>) -> anyhow::Result<Self> {
        let settings = if let Some(config) = config {
            info!("Using configuration from {:?}", config);
            Config::builder()
                .add_source(config::File::with_name(
                    config
                        .to_str()
                        .ok_or_else(|| anyhow::anyhow!("Failed to convert path"))?,
                ))
                .add_source(environment())
                .build()?
        } else {
            info!("Using dev configuration");
            Config::builder()
                .add_source(config::File::with_name("config/settings"))
                .add_source(config::File::with_name("config/dev_settings").required(false))
                .add_source(environment())
                .build()?
        };

        let app_config: AppConfig = settings.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.drive.validate()?;
        self.autonomous.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

/// `APP_DRIVE__DEADBAND=0.1` overrides `drive.deadband`
fn environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Tuning of a single swerve drive train.
///
/// Speeds are unitless fractions of full actuator output. `width_to_height_ratio`
/// is the track width divided by the wheelbase and only changes with the chassis.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct DriveConfig {
    /// Scalar applied to steering (rotation) input
    pub steer_relative_speed: f64,
    /// Scalar applied to strafe input
    pub drive_relative_speed: f64,
    /// Inputs with an absolute value below this are treated as zero
    pub deadband: f64,
    /// Upper bound on any wheel speed after normalization
    pub max_output: f64,
    pub width_to_height_ratio: f64,
    /// Cap the strafe vector to unit length before scaling
    pub limit_strafe_magnitude: bool,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            steer_relative_speed: 0.3,
            drive_relative_speed: 0.5,
            deadband: 0.06,
            max_output: 1.0,
            width_to_height_ratio: 1.0,
            limit_strafe_magnitude: false,
        }
    }
}

impl DriveConfig {
    pub fn with_width_to_height_ratio(width_to_height_ratio: f64) -> Self {
        Self {
            width_to_height_ratio,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_width_to_height_ratio(self.width_to_height_ratio)?;
        check_deadband(self.deadband)?;
        check_max_output(self.max_output)?;
        check_steer_relative_speed(self.steer_relative_speed)?;
        check_drive_relative_speed(self.drive_relative_speed)?;
        Ok(())
    }
}

// NaN fails every comparison below and is rejected

pub(crate) fn check_width_to_height_ratio(value: f64) -> Result<f64, ConfigurationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidWidthToHeightRatio(value))
    }
}

pub(crate) fn check_deadband(value: f64) -> Result<f64, ConfigurationError> {
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidDeadband(value))
    }
}

pub(crate) fn check_max_output(value: f64) -> Result<f64, ConfigurationError> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidMaxOutput(value))
    }
}

pub(crate) fn check_steer_relative_speed(value: f64) -> Result<f64, ConfigurationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidSteerRelativeSpeed(value))
    }
}

pub(crate) fn check_drive_relative_speed(value: f64) -> Result<f64, ConfigurationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidDriveRelativeSpeed(value))
    }
}

/// Parameters of the straight line autonomous routine
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct AutonConfig {
    /// Compass direction in degrees, 0 forward, clockwise positive
    pub direction: f64,
    /// Inches
    pub distance: f64,
    pub speed: f64,
    pub correction_gain: f64,
    /// Degrees all wheels must be within before driving starts
    pub alignment_margin: f64,
}

impl AutonConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_target_distance(self.distance)?;
        check_target_speed(self.speed)?;
        check_correction_gain(self.correction_gain)?;
        if !(0.0..=180.0).contains(&self.alignment_margin) {
            return Err(ConfigurationError::InvalidAlignmentMargin(
                self.alignment_margin,
            ));
        }
        Ok(())
    }
}

pub(crate) fn check_target_distance(value: f64) -> Result<f64, ConfigurationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidTargetDistance(value))
    }
}

pub(crate) fn check_target_speed(value: f64) -> Result<f64, ConfigurationError> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidTargetSpeed(value))
    }
}

pub(crate) fn check_correction_gain(value: f64) -> Result<f64, ConfigurationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidCorrectionGain(value))
    }
}

impl Default for AutonConfig {
    fn default() -> Self {
        Self {
            direction: 0.0,
            distance: 60.0,
            speed: 0.5,
            correction_gain: 0.08,
            alignment_margin: 5.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub loop_hz: u64,
    /// Inches per second a wheel covers at speed 1.0
    pub wheel_top_speed: f64,
    /// Degrees per second
    pub steer_rate: f64,
    /// Degrees per second of heading drift, clockwise positive
    pub gyro_drift: f64,
}

impl SimulationConfig {
    /// An infinite `steer_rate` is allowed and steers instantly
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.loop_hz == 0 {
            return Err(ConfigurationError::InvalidLoopRate(self.loop_hz));
        }
        if !(self.wheel_top_speed > 0.0 && self.wheel_top_speed.is_finite()) {
            return Err(ConfigurationError::InvalidWheelTopSpeed(
                self.wheel_top_speed,
            ));
        }
        if self.steer_rate.is_nan() || self.steer_rate <= 0.0 {
            return Err(ConfigurationError::InvalidSteerRate(self.steer_rate));
        }
        if !self.gyro_drift.is_finite() {
            return Err(ConfigurationError::InvalidGyroDrift(self.gyro_drift));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            loop_hz: 50,
            wheel_top_speed: 120.0,
            steer_rate: 720.0,
            gyro_drift: 3.0,
        }
    }
}
