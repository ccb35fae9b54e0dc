//! Kinematics for configurable CoreXY five-axis machines.
//!
//! Provides the product-of-exponentials forward chain, the closed-form CoreXY
//! inverse solver, a geometric-algebra rotor path for the table coupling, and
//! the parsers that build an axis chain from compact configuration strings.
//!
//! # Architecture
//!
//! ```text
//! config strings ──► descriptor ──► AxisChain ──► solver / engine ──► motor positions
//! ```
//!
//! The [`AxisChain`] is built once from configuration commands and then only
//! read by conversions.

pub mod chain;
pub mod descriptor;
pub mod engine;
pub mod linalg;
pub mod rotor;
pub mod screw;
pub mod solver;

pub use chain::{AxisChain, AxisLimits, AxisRecord, CacheLayout, SpecialState};
pub use descriptor::{ChainDescriptor, LimitSetting, ParamSetting, ScrewSetting};
pub use engine::{CoreXyEngine, MachinePose, RotorEngine, ScrewEngine, machine_letters};
pub use linalg::{Mat3, Transform, Vec3};
pub use screw::{RotaryTerms, ScrewAxis};
pub use solver::{IkResult, JointVector, Orientation};
