#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("width to height ratio must be positive, got {0}")]
    InvalidWidthToHeightRatio(f64),
    #[error("deadband must be in [0, 1), got {0}")]
    InvalidDeadband(f64),
    #[error("max output must be in (0, 1], got {0}")]
    InvalidMaxOutput(f64),
    #[error("steer relative speed must be positive, got {0}")]
    InvalidSteerRelativeSpeed(f64),
    #[error("drive relative speed must be positive, got {0}")]
    InvalidDriveRelativeSpeed(f64),
    #[error("autonomous drive distance must be positive, got {0}")]
    InvalidTargetDistance(f64),
    #[error("autonomous drive speed must be in (0, 1], got {0}")]
    InvalidTargetSpeed(f64),
    #[error("heading correction gain must be positive, got {0}")]
    InvalidCorrectionGain(f64),
    #[error("alignment margin must be in [0, 180], got {0}")]
    InvalidAlignmentMargin(f64),
    #[error("simulation loop rate must be positive, got {0}")]
    InvalidLoopRate(u64),
    #[error("simulated wheel top speed must be positive, got {0}")]
    InvalidWheelTopSpeed(f64),
    #[error("simulated steering rate must be positive, got {0}")]
    InvalidSteerRate(f64),
    #[error("simulated gyro drift must be finite, got {0}")]
    InvalidGyroDrift(f64),
}
