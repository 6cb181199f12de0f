use anyhow::Result;
use clap::Parser;
use std::{path::PathBuf, time::Duration};
use swerve::{
    auton_drive::AutonDrive,
    configuration::AppConfig,
    drive::{AutoSwerveDrive, SwerveDrive},
    driver::{SimulatedGyro, SimulatedWheel},
    logging,
    task::TaskRunner,
    wheel_set::WheelSet,
};
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::*;

#[derive(Parser, Debug)]
#[command(
    version,
    author = "David M. Weis <dweis7@gmail.com>",
    about = "Simulated swerve drive autonomous run"
)]
struct Args {
    /// path to config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sets the level of verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// Log as json
    #[arg(long)]
    json: bool,

    /// Seconds before the run is interrupted
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

type SimulatedRobot = AutoSwerveDrive<SimulatedWheel, SimulatedGyro>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_tracing(args.verbosity, args.json);

    let app_config = AppConfig::load_config(&args.config)?;
    let simulation = app_config.simulation;

    let wheels = WheelSet::splat(SimulatedWheel::new(
        simulation.wheel_top_speed,
        simulation.steer_rate,
    ));
    let swerve = SwerveDrive::new(wheels, app_config.drive)?;
    let mut robot = AutoSwerveDrive::new(swerve, SimulatedGyro::new(simulation.gyro_drift));

    let auton = AutonDrive::from_config(&app_config.autonomous)?;
    let direction = auton.direction();
    let alignment_margin = app_config.autonomous.alignment_margin;
    let mut runner = TaskRunner::new(auton);

    let period = Duration::from_secs_f64(1.0 / simulation.loop_hz.max(1) as f64);
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(?period, "Control loop started");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let timeout = sleep(Duration::from_secs(args.timeout));
    tokio::pin!(timeout);

    let mut aligned = false;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !aligned {
                    aligned = robot
                        .swerve_mut()
                        .steer_all_within_range(direction, alignment_margin);
                    if aligned {
                        info!(direction, "Wheels aligned");
                    }
                } else if runner.tick(&mut robot).is_done() {
                    break;
                }
                advance(&mut robot, period);
            }
            _ = &mut shutdown => {
                warn!("Ctrl-C received, interrupting");
                runner.cancel(&mut robot);
                break;
            }
            _ = &mut timeout => {
                warn!(timeout = args.timeout, "Run timed out, interrupting");
                runner.cancel(&mut robot);
                break;
            }
        }
    }

    info!(
        status = ?runner.status(),
        traveled = robot.swerve().distance_traveled(),
        gyro_angle = robot.gyro_angle(),
        "Autonomous run over"
    );
    Ok(())
}

fn advance(robot: &mut SimulatedRobot, period: Duration) {
    robot
        .swerve_mut()
        .wheels_mut()
        .for_each_mut(|wheel| wheel.advance(period));
    robot.gyro_mut().advance(period);
}
