//! robokin kinematics CLI.
//!
//! Loads a TOML robot configuration and runs one conversion:
//! - `report`: Print the live configuration report
//! - `forward`: Joint values (chain order) to tool pose
//! - `inverse`: Machine pose `x,y,z,a|b,c` to joint values
//! - `steps`: Machine pose to motor steps and back

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use robokin_core::{EngineKind, KinematicsError, RobotConfig, SolveError};
use robokin_ik::{Transform, solver};
use robokin_motion::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Kinematics for configurable CoreXY five-axis machines.
#[derive(Parser)]
#[command(name = "robokin", version, about)]
struct Cli {
    /// Robot configuration file (TOML). Defaults to a bare CoreXY5AC with no
    /// screws, which logs a warning and converts every linear axis to zero.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use the screw engine instead of the configured one.
    #[arg(long, global = true)]
    screw: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configuration report.
    Report,

    /// Tool pose for joint values in chain order.
    Forward {
        /// Comma-separated joint values, e.g. `0,30,10,5,5`.
        #[arg(value_delimiter = ',', allow_hyphen_values = true)]
        joints: Vec<f32>,
    },

    /// Joint values for a machine pose.
    Inverse {
        /// Comma-separated `x,y,z,a|b,c`.
        #[arg(value_delimiter = ',', allow_hyphen_values = true)]
        pose: Vec<f32>,
    },

    /// Motor steps for a machine pose, converted back for comparison.
    Steps {
        /// Comma-separated `x,y,z,a|b,c`.
        #[arg(value_delimiter = ',', allow_hyphen_values = true)]
        pose: Vec<f32>,
    },
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn load(cli: &Cli) -> Result<(RobotKinematics, RobotConfig), KinematicsError> {
    let config = match &cli.config {
        Some(path) => RobotConfig::from_file(path)?,
        None => RobotConfig::default(),
    };
    let mut kin = RobotKinematics::from_config(&config)?;
    if cli.screw {
        kin.set_engine(EngineKind::Screw);
    }
    debug!(engine = kin.engine().name(), "kinematics loaded");
    Ok((kin, config))
}

fn machine_pose(values: &[f32]) -> Result<[f32; 5], KinematicsError> {
    values.try_into().map_err(|_| {
        SolveError::DimensionMismatch {
            expected: 5,
            got: values.len(),
        }
        .into()
    })
}

fn print_transform(pose: &Transform) {
    let rows = pose.without_near_zero().to_row_major();
    for row in rows.chunks(4) {
        println!("{:10.4} {:10.4} {:10.4} {:10.4}", row[0], row[1], row[2], row[3]);
    }
}

fn run_forward(kin: &RobotKinematics, joints: &[f32]) -> Result<(), KinematicsError> {
    let pose = kin.forward(joints)?;
    print_transform(&pose);
    let xyzab = solver::pose_to_xyzab(kin.chain(), &pose, 0.0)?;
    println!("xyzab: {xyzab:?}");
    Ok(())
}

fn run_inverse(kin: &RobotKinematics, values: &[f32]) -> Result<(), KinematicsError> {
    let xyzab = machine_pose(values)?;
    let target = solver::pose_from_xyzab(kin.chain(), &xyzab)?;
    let ik = kin.inverse(&target, xyzab[4])?;
    println!("joints: {:?}", ik.joints.as_slice());
    println!(
        "c: {:.4} tilt: {:.4} flipped: {}",
        ik.orientation.c, ik.orientation.tilt, ik.orientation.flipped
    );
    Ok(())
}

fn run_steps(
    kin: &RobotKinematics,
    config: &RobotConfig,
    values: &[f32],
) -> Result<(), KinematicsError> {
    let xyzab = machine_pose(values)?;
    let mut steps = [0; 5];
    kin.cartesian_to_motor_steps(&xyzab, &config.steps_per_unit, &mut steps)?;
    let mut back = [0.0; 5];
    kin.motor_steps_to_cartesian(&steps, &config.steps_per_unit, &mut back)?;
    println!("steps: {steps:?}");
    println!("back:  {back:?}");
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn run(cli: &Cli) -> Result<(), KinematicsError> {
    let (kin, config) = load(cli)?;
    match &cli.command {
        Some(Commands::Report) | None => print!("{}", configuration_report(kin.chain())),
        Some(Commands::Forward { joints }) => run_forward(&kin, joints)?,
        Some(Commands::Inverse { pose }) => run_inverse(&kin, pose)?,
        Some(Commands::Steps { pose }) => run_steps(&kin, &config, pose)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
