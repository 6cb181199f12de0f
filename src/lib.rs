#![doc = include_str!("../README.md")]
pub mod angle;
pub mod auton_drive;
pub mod configuration;
pub mod drive;
pub mod driver;
pub mod error;
pub mod logging;
pub mod swerve_kinematics;
pub mod task;
pub mod vector;
pub mod wheel_set;
