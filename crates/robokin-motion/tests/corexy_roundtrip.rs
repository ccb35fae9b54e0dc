//! Integration test: drive the CoreXY five-axis facade end to end.
//!
//! Checks that:
//! 1. Joint values survive FK → Cartesian → motor steps → Cartesian → IK
//!    for both wirings and both conversion engines
//! 2. A machine configured purely through commands gives identity FK at
//!    zero joints and zero joints back from IK
//! 3. The homing switch commits the configured home as a step position

use approx::assert_relative_eq;
use rand::Rng;
use robokin_core::{AxisLetter, EngineKind, RobotConfig, Wiring};
use robokin_ik::{Transform, machine_letters, solver};
use robokin_motion::prelude::*;
use robokin_test_utils::{
    FixedMachineAxes, RecordingDrives, corexy5ac_config, corexy5bc_config, seeded_rng,
};

/// Steps per unit in machine order X, Y, Z, A|B, C.
const STEPS: [f32; 5] = [80.0, 80.0, 400.0, 100.0, 100.0];

/// Largest linear error from step quantization, with float slack.
const LINEAR_TOL: f32 = 0.02;
const ANGLE_TOL: f32 = 0.01;

fn chain_joints(kin: &RobotKinematics, machine: &[f32; 5]) -> Vec<f32> {
    let chain = kin.chain();
    let mut joints = vec![0.0; chain.num_axes()];
    for (value, letter) in machine.iter().zip(machine_letters(chain.special().wiring)) {
        joints[chain.slot_of(letter).unwrap()] = *value;
    }
    joints
}

fn random_joints(rng: &mut impl Rng) -> [f32; 5] {
    [
        rng.gen_range(-100.0..100.0),
        rng.gen_range(-100.0..100.0),
        rng.gen_range(0.0..90.0),
        rng.gen_range(5.0..85.0),
        rng.gen_range(-175.0..175.0),
    ]
}

fn round_trip(config: &RobotConfig, engine: EngineKind, seed: u64) {
    let mut kin = RobotKinematics::from_config(config).unwrap();
    kin.set_engine(engine);
    let mut rng = seeded_rng(seed);

    for _ in 0..50 {
        let machine = random_joints(&mut rng);
        let joints = chain_joints(&kin, &machine);
        let pose = kin.forward(&joints).unwrap();

        let xyzab = solver::pose_to_xyzab(kin.chain(), &pose, 0.0).unwrap();
        assert_relative_eq!(xyzab[3], machine[3], epsilon = ANGLE_TOL);
        assert_relative_eq!(xyzab[4], machine[4], epsilon = ANGLE_TOL);

        let mut steps = [0; 5];
        kin.cartesian_to_motor_steps(&xyzab, &STEPS, &mut steps).unwrap();
        let mut back = [0.0; 5];
        kin.motor_steps_to_cartesian(&steps, &STEPS, &mut back).unwrap();

        let target = solver::pose_from_xyzab(kin.chain(), &back).unwrap();
        let ik = kin.inverse(&target, back[4]).unwrap();
        for (slot, (got, want)) in ik.joints.iter().zip(joints.iter()).enumerate() {
            let tol = if kin.chain().records()[slot].kind.is_rotary() {
                ANGLE_TOL
            } else {
                LINEAR_TOL
            };
            assert!(
                (got - want).abs() < tol,
                "{engine:?} slot {slot}: got {got}, want {want} (machine {machine:?})"
            );
        }
    }
    assert_eq!(kin.timer().samples(), 50);
}

#[test]
fn ac_round_trip_rotor() {
    round_trip(&corexy5ac_config(), EngineKind::Rotor, 11);
}

#[test]
fn ac_round_trip_screw() {
    round_trip(&corexy5ac_config(), EngineKind::Screw, 12);
}

#[test]
fn bc_round_trip_rotor() {
    round_trip(&corexy5bc_config(), EngineKind::Rotor, 13);
}

#[test]
fn bc_round_trip_screw() {
    round_trip(&corexy5bc_config(), EngineKind::Screw, 14);
}

#[test]
fn command_configured_machine_zero_pose() {
    let mut kin = RobotKinematics::new();
    let commands = [
        KinematicsCommand::new().with_robot_type("CoreXY5AC"),
        KinematicsCommand::new().with_param("axisTypes=RRPPP"),
        KinematicsCommand::new().with_screw("A=1:0:0:0:0:0"),
        KinematicsCommand::new().with_screw("C=0:0:1:0:0:0"),
        KinematicsCommand::new().with_screw("X=1:0:0:0:0:0"),
        KinematicsCommand::new().with_screw("Y=0:1:0:0:0:0"),
        KinematicsCommand::new().with_screw("Z=0:0:1:0:0:0"),
        KinematicsCommand::new().with_screw("Mnoap=1:0:0:0:1:0:0:0:1:0:0:0"),
    ];
    for command in &commands {
        let outcome = kin.configure(command);
        assert!(outcome.errors.is_empty(), "{command:?}: {:?}", outcome.errors);
    }

    // B is not part of an AC chain; the field is rejected and nothing changes.
    let outcome = kin.configure(&KinematicsCommand::new().with_screw("B=0:1:0:0:0:0"));
    assert_eq!(outcome.errors.len(), 1);

    let pose = kin.forward(&[0.0; 5]).unwrap();
    assert!(pose.max_abs_diff(&Transform::IDENTITY) < 1e-6);

    let ik = kin.inverse(&pose, 0.0).unwrap();
    assert_eq!(ik.joints.len(), 5);
    for q in &ik.joints {
        assert!(q.abs() < 1e-4, "joints {:?}", ik.joints);
    }
}

#[test]
fn homing_commits_chain_home() {
    let mut config = corexy5bc_config();
    config.limits.insert("B".into(), [-100.0, 100.0, 12.5]);
    let kin = RobotKinematics::from_config(&config).unwrap();
    let machine = FixedMachineAxes::five_axis(Wiring::Bc);
    let mut drives = RecordingDrives::new();

    for axis in 0..5 {
        kin.on_homing_switch_triggered(axis, axis % 2 == 0, &STEPS, &machine, &mut drives)
            .unwrap();
    }
    assert_eq!(drives.writes.len(), 5);
    // X and Y home at 0, Z at 120, B at 12.5
    assert_eq!(drives.last(0), Some(0));
    assert_eq!(drives.last(2), Some(48_000));
    assert_eq!(drives.last(3), Some(1250));
    assert_relative_eq!(kin.chain().record_of(AxisLetter::B).unwrap().limits.home, 12.5);
}
