//! Configured axis chain: per-slot screw records, endpoint frame and the
//! forward-kinematics product.
//!
//! An [`AxisChain`] is an ordered list of up to six axis slots from the base
//! to the tool. Slot order is the index used by every joint vector. Each slot
//! holds an [`AxisRecord`] with its screw axis, the precomputed rotary terms,
//! a reference (zero offset) and its limits.
//!
//! Forward kinematics is the product of exponentials
//!
//! ```text
//! T = e^(S0·(q0 − r0)) · e^(S1·(q1 − r1)) · … · M
//! ```
//!
//! with rotary joint values in degrees.

use heapless::Vec as HVec;
use robokin_core::{
    AbSign, AxisKind, AxisLetter, CACHE_CAPACITY, ConfigError, MAX_AXES, RADIANS_TO_DEGREES,
    RobotConfig, SolveError, SpecialMethod, Wiring,
};
use tracing::{debug, info, warn};

use crate::descriptor::{self, ChainDescriptor, ChainSlot, LimitSetting, ParamSetting, ScrewSetting};
use crate::linalg::{Mat3, Transform, Vec3};
use crate::screw::{RotaryTerms, ScrewAxis, prismatic_transform, rotary_transform};

// ---------------------------------------------------------------------------
// AxisRecord
// ---------------------------------------------------------------------------

/// Travel limits and home position of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisLimits {
    pub min: f32,
    pub max: f32,
    pub home: f32,
}

/// Screw data of a single chain slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRecord {
    pub kind: AxisKind,
    pub screw: ScrewAxis,
    /// Precomputed Rodrigues terms; identity-valued for prismatic axes.
    pub rotary: RotaryTerms,
    /// Joint value that maps to the zero transform.
    pub reference: f32,
    pub limits: AxisLimits,
}

impl AxisRecord {
    #[must_use]
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            screw: ScrewAxis::default(),
            rotary: RotaryTerms::default(),
            reference: 0.0,
            limits: AxisLimits::default(),
        }
    }

    fn set_screw(&mut self, screw: ScrewAxis) {
        self.screw = screw;
        self.refresh_terms();
    }

    fn set_kind(&mut self, kind: AxisKind) {
        self.kind = kind;
        self.refresh_terms();
    }

    fn refresh_terms(&mut self) {
        self.rotary = match self.kind {
            AxisKind::Rotary => RotaryTerms::from_axis(&self.screw),
            AxisKind::Prismatic => RotaryTerms::default(),
        };
    }

    /// Transform for an absolute joint value (degrees or length).
    #[must_use]
    pub fn transform(&self, joint: f32) -> Transform {
        let effective = joint - self.reference;
        match self.kind {
            AxisKind::Rotary => {
                rotary_transform(&self.screw, &self.rotary, effective / RADIANS_TO_DEGREES)
            }
            AxisKind::Prismatic => prismatic_transform(self.screw.omega, effective),
        }
    }
}

// ---------------------------------------------------------------------------
// CacheLayout
// ---------------------------------------------------------------------------

/// Element accounting for the per-axis screw data.
///
/// Offsets run in the order orientation, point, `ω̂²`, `v`, reference,
/// limits and are monotonically increasing. `end` is the number of elements
/// in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheLayout {
    pub omega: usize,
    pub point: usize,
    pub omega_sq: usize,
    pub v: usize,
    pub reference: usize,
    pub limits: usize,
    pub end: usize,
}

impl CacheLayout {
    /// Layout for `axes` slots of which `rotary` are rotary.
    pub fn compute(axes: usize, rotary: usize, capacity: usize) -> Result<Self, ConfigError> {
        let omega = 0;
        let point = omega + axes * 3;
        let omega_sq = point + axes * 3;
        let v = omega_sq + rotary * 9;
        let reference = v + rotary * 3;
        let limits = reference + axes;
        let end = limits + axes * 3;
        if end > capacity {
            return Err(ConfigError::CapacityExceeded { used: end, capacity });
        }
        Ok(Self {
            omega,
            point,
            omega_sq,
            v,
            reference,
            limits,
            end,
        })
    }

    pub const fn used(&self) -> usize {
        self.end
    }
}

// ---------------------------------------------------------------------------
// LetterTable
// ---------------------------------------------------------------------------

/// Axis letter to chain slot, rebuilt whenever the chain changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct LetterTable {
    slots: [Option<u8>; 6],
}

impl LetterTable {
    #[allow(clippy::cast_possible_truncation)]
    fn build(slots: &[ChainSlot], axes: usize) -> Self {
        let mut table = Self::default();
        for (i, slot) in slots.iter().enumerate().take(axes) {
            let entry = &mut table.slots[slot.letter.index()];
            if entry.is_none() {
                *entry = Some(i as u8);
            }
        }
        table
    }

    fn get(&self, letter: AxisLetter) -> Option<usize> {
        self.slots[letter.index()].map(usize::from)
    }
}

// ---------------------------------------------------------------------------
// AxisChain
// ---------------------------------------------------------------------------

/// Coupled-mechanism state of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecialState {
    pub method: Option<SpecialMethod>,
    pub wiring: Wiring,
    pub ab_sign: AbSign,
    /// Selected solution for multi-solution mechanisms. Reported only.
    pub workmode: u8,
}

/// Live kinematic configuration.
#[derive(Debug, Clone)]
pub struct AxisChain {
    descriptor: ChainDescriptor,
    records: HVec<AxisRecord, MAX_AXES>,
    letters: LetterTable,
    layout: CacheLayout,
    endpoint: Transform,
    endpoint_inv: Transform,
    special: SpecialState,
}

impl Default for AxisChain {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisChain {
    /// Empty chain with an identity endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: ChainDescriptor::default(),
            records: HVec::new(),
            letters: LetterTable::default(),
            layout: CacheLayout::default(),
            endpoint: Transform::IDENTITY,
            endpoint_inv: Transform::IDENTITY,
            special: SpecialState::default(),
        }
    }

    // -- Configuration --

    /// Select a topology preset by name and rebuild everything from scratch.
    ///
    /// An unknown name is an error and leaves the chain untouched.
    pub fn set_robot_type(&mut self, name: &str) -> Result<(), ConfigError> {
        let preset = descriptor::robot_preset(name)?;
        let kinds = descriptor::parse_axis_types(preset.axis_types)?;
        let chain = ChainDescriptor::parse(preset.chain)?;

        let mut records = HVec::new();
        for kind in &kinds {
            let _ = records.push(AxisRecord::new(*kind));
        }
        let layout = layout_for(&records)?;

        self.records = records;
        self.layout = layout;
        self.descriptor = chain;
        self.special.method = self.descriptor.special();
        self.special.wiring = preset.wiring;
        self.endpoint = Transform::IDENTITY;
        self.endpoint_inv = Transform::IDENTITY;
        self.rebuild_letters();
        info!(
            robot = name,
            chain = preset.chain,
            wiring = preset.wiring.name(),
            "robot type configured"
        );
        Ok(())
    }

    /// Replace the chain descriptor.
    ///
    /// A descriptor without a known mechanism marker only updates the stored
    /// text; slot classification and the special method stay as they were.
    pub fn set_forward_chain(&mut self, text: &str) -> Result<(), ConfigError> {
        let parsed = ChainDescriptor::parse(text)?;
        if parsed.special().is_none() {
            warn!(chain = text, "no mechanism marker in chain; classification unchanged");
            self.descriptor = self.descriptor.with_text_of(&parsed);
            return Ok(());
        }
        self.descriptor = parsed;
        self.special.method = self.descriptor.special();
        self.rebuild_letters();
        debug!(chain = text, "chain descriptor set");
        Ok(())
    }

    /// Set the joint type of every slot. The axis count follows the length.
    ///
    /// Existing screw data is kept for surviving slots and the rotary terms
    /// are recomputed for the new types.
    pub fn set_axis_types(&mut self, kinds: &[AxisKind]) -> Result<(), ConfigError> {
        if kinds.len() > MAX_AXES {
            return Err(ConfigError::TooManyAxes {
                got: kinds.len(),
                max: MAX_AXES,
            });
        }
        let mut records: HVec<AxisRecord, MAX_AXES> = HVec::new();
        for (i, kind) in kinds.iter().enumerate() {
            let mut record = self.records.get(i).copied().unwrap_or_else(|| AxisRecord::new(*kind));
            record.set_kind(*kind);
            let _ = records.push(record);
        }
        let layout = layout_for(&records)?;
        self.records = records;
        self.layout = layout;
        self.rebuild_letters();
        debug!(axes = self.records.len(), "axis types set");
        Ok(())
    }

    pub fn set_ab_sign(&mut self, sign: AbSign) {
        self.special.ab_sign = sign;
    }

    /// Apply a parsed `P` setting.
    pub fn apply_param(&mut self, setting: &ParamSetting) -> Result<(), ConfigError> {
        match setting {
            ParamSetting::AxisTypes(kinds) => self.set_axis_types(kinds),
            ParamSetting::AbSign(sign) => {
                self.set_ab_sign(*sign);
                Ok(())
            }
        }
    }

    /// Set the screw axis of the slot holding `letter`.
    ///
    /// `fields` is `[ωx, ωy, ωz, qx, qy, qz]`; `ω` is normalized unless it is
    /// already a canonical axis.
    pub fn set_screw(&mut self, letter: AxisLetter, fields: [f32; 6]) -> Result<(), ConfigError> {
        let slot = self.require_slot(letter)?;
        self.records[slot].set_screw(ScrewAxis::from_fields(fields));
        debug!(axis = %letter, slot, "screw set");
        Ok(())
    }

    pub fn set_limits(
        &mut self,
        letter: AxisLetter,
        limits: AxisLimits,
    ) -> Result<(), ConfigError> {
        let slot = self.require_slot(letter)?;
        self.records[slot].limits = limits;
        Ok(())
    }

    /// Apply a parsed `A` setting.
    pub fn apply_limits(&mut self, setting: &LimitSetting) -> Result<(), ConfigError> {
        self.set_limits(
            setting.letter,
            AxisLimits {
                min: setting.min,
                max: setting.max,
                home: setting.home,
            },
        )
    }

    /// Set the endpoint frame from x-axis, y-axis, z-axis columns and point.
    ///
    /// Each column is normalized on its own and the inverse is recomputed.
    pub fn set_endpoint(&mut self, values: [f32; 12]) {
        let col = |i: usize| Vec3::new(values[i], values[i + 1], values[i + 2]);
        let rot = Mat3::from_columns(
            col(0).normalized_or_keep(),
            col(3).normalized_or_keep(),
            col(6).normalized_or_keep(),
        );
        self.endpoint = Transform::new(rot, col(9));
        self.endpoint_inv = self.endpoint.inverse_rigid();
    }

    /// Set one reference value per slot.
    pub fn set_references(&mut self, values: &[f32]) -> Result<(), ConfigError> {
        if values.len() != self.records.len() {
            return Err(ConfigError::FieldCount {
                field: "Mreference".into(),
                expected: self.records.len(),
                got: values.len(),
            });
        }
        for (record, value) in self.records.iter_mut().zip(values) {
            record.reference = *value;
        }
        Ok(())
    }

    /// Apply a parsed `C` setting.
    pub fn apply_screw(&mut self, setting: &ScrewSetting) -> Result<(), ConfigError> {
        match setting {
            ScrewSetting::Endpoint(values) => {
                self.set_endpoint(*values);
                Ok(())
            }
            ScrewSetting::Reference(values) => self.set_references(values),
            ScrewSetting::Axis(letter, fields) => self.set_screw(*letter, *fields),
        }
    }

    /// Apply a file configuration in command order: robot type, limits,
    /// axis types and sign, chain, screws, endpoint, references.
    pub fn apply_config(&mut self, config: &RobotConfig) -> Result<(), ConfigError> {
        self.set_robot_type(&config.robot_type)?;
        for (letter, [min, max, home]) in config.limit_entries()? {
            self.set_limits(letter, AxisLimits { min, max, home })?;
        }
        if let Some(types) = &config.axis_types {
            self.set_axis_types(&descriptor::parse_axis_types(types)?)?;
        }
        self.set_ab_sign(config.ab_sign);
        if let Some(chain) = &config.chain {
            self.set_forward_chain(chain)?;
        }
        for (letter, fields) in config.screw_entries()? {
            self.set_screw(letter, fields)?;
        }
        if let Some(endpoint) = config.endpoint {
            self.set_endpoint(endpoint);
        }
        if let Some(reference) = &config.reference {
            self.set_references(reference)?;
        }
        Ok(())
    }

    fn require_slot(&self, letter: AxisLetter) -> Result<usize, ConfigError> {
        self.slot_of(letter).ok_or(ConfigError::UnknownAxis(letter.as_char()))
    }

    fn rebuild_letters(&mut self) {
        self.letters = LetterTable::build(self.descriptor.slots(), self.records.len());
    }

    // -- Queries --

    pub fn num_axes(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[AxisRecord] {
        &self.records
    }

    pub fn record(&self, slot: usize) -> Option<&AxisRecord> {
        self.records.get(slot)
    }

    pub const fn descriptor(&self) -> &ChainDescriptor {
        &self.descriptor
    }

    pub const fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    pub const fn special(&self) -> &SpecialState {
        &self.special
    }

    pub const fn endpoint(&self) -> &Transform {
        &self.endpoint
    }

    pub const fn endpoint_inverse(&self) -> &Transform {
        &self.endpoint_inv
    }

    /// Slot holding `letter`, looking through the coupled group as well.
    pub fn slot_of(&self, letter: AxisLetter) -> Option<usize> {
        self.letters.get(letter)
    }

    /// Record of the slot holding `letter`.
    pub fn record_of(&self, letter: AxisLetter) -> Option<&AxisRecord> {
        self.slot_of(letter).and_then(|s| self.records.get(s))
    }

    /// Real letter at `slot`, resolving group placeholders.
    pub fn letter_at(&self, slot: usize) -> Option<AxisLetter> {
        if slot >= self.records.len() {
            return None;
        }
        self.descriptor.slots().get(slot).map(|s| s.letter)
    }

    /// Index of `slot` among rotary slots, counting in chain order.
    pub fn rotary_index(&self, slot: usize) -> Option<usize> {
        let record = self.records.get(slot)?;
        if !record.kind.is_rotary() {
            return None;
        }
        Some(self.records[..slot].iter().filter(|r| r.kind.is_rotary()).count())
    }

    pub fn rotary_count(&self) -> usize {
        self.records.iter().filter(|r| r.kind.is_rotary()).count()
    }

    /// Letters whose screw direction was never set, in chain order. These
    /// axes contribute nothing to either conversion engine.
    #[allow(clippy::float_cmp)]
    pub fn unset_screws(&self) -> impl Iterator<Item = AxisLetter> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.screw.omega == Vec3::ZERO)
            .filter_map(|(slot, _)| self.letter_at(slot))
    }

    // -- Kinematics --

    /// Transform of the axis holding `letter` at an absolute joint value.
    pub fn axis_transform(&self, letter: AxisLetter, joint: f32) -> Result<Transform, SolveError> {
        self.record_of(letter)
            .map(|r| r.transform(joint))
            .ok_or(SolveError::MissingAxis(letter.as_char()))
    }

    /// Tool pose for `joints` given in slot order.
    pub fn forward(&self, joints: &[f32]) -> Result<Transform, SolveError> {
        if self.records.is_empty() {
            return Err(SolveError::NotConfigured);
        }
        if joints.len() != self.records.len() {
            return Err(SolveError::DimensionMismatch {
                expected: self.records.len(),
                got: joints.len(),
            });
        }
        let chain = self
            .records
            .iter()
            .zip(joints)
            .fold(Transform::IDENTITY, |acc, (record, q)| acc * record.transform(*q));
        Ok(chain * self.endpoint)
    }
}

fn layout_for(records: &[AxisRecord]) -> Result<CacheLayout, ConfigError> {
    let rotary = records.iter().filter(|r| r.kind.is_rotary()).count();
    CacheLayout::compute(records.len(), rotary, CACHE_CAPACITY)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corexy_ac() -> AxisChain {
        let mut chain = AxisChain::new();
        chain.set_robot_type("CoreXY5AC").unwrap();
        chain.set_screw(AxisLetter::C, [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
        chain.set_screw(AxisLetter::A, [1.0, 0.0, 0.0, 0.0, 0.0, 50.0]).unwrap();
        chain.set_screw(AxisLetter::Z, [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
        chain.set_screw(AxisLetter::X, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        chain.set_screw(AxisLetter::Y, [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        chain
    }

    #[test]
    fn unset_screws_in_chain_order() {
        let mut chain = AxisChain::new();
        chain.set_robot_type("CoreXY5AC").unwrap();
        chain.set_screw(AxisLetter::C, [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
        let unset: Vec<char> = chain.unset_screws().map(AxisLetter::as_char).collect();
        assert_eq!(unset, ['A', 'Z', 'X', 'Y']);
        assert_eq!(corexy_ac().unset_screws().count(), 0);
    }

    #[test]
    fn robot_type_sets_up_five_axes() {
        let chain = corexy_ac();
        assert_eq!(chain.num_axes(), 5);
        assert_eq!(chain.special().method, Some(SpecialMethod::CoreXy));
        assert_eq!(chain.special().wiring, Wiring::Ac);
        assert_eq!(chain.slot_of(AxisLetter::C), Some(0));
        assert_eq!(chain.slot_of(AxisLetter::A), Some(1));
        assert_eq!(chain.slot_of(AxisLetter::Z), Some(2));
        assert_eq!(chain.slot_of(AxisLetter::X), Some(3));
        assert_eq!(chain.slot_of(AxisLetter::Y), Some(4));
        assert_eq!(chain.slot_of(AxisLetter::B), None);
    }

    #[test]
    fn unknown_robot_type_leaves_state() {
        let mut chain = corexy_ac();
        let before = chain.records().to_vec();
        assert!(chain.set_robot_type("Hexapod").is_err());
        assert_eq!(chain.records(), before.as_slice());
        assert_eq!(chain.descriptor().text(), "CAZ_corexy(XY)");
    }

    #[test]
    fn letter_at_resolves_group_slots() {
        let chain = corexy_ac();
        assert_eq!(chain.letter_at(0), Some(AxisLetter::C));
        assert_eq!(chain.letter_at(3), Some(AxisLetter::X));
        assert_eq!(chain.letter_at(4), Some(AxisLetter::Y));
        assert_eq!(chain.letter_at(5), None);
    }

    #[test]
    fn rotary_indices_follow_chain_order() {
        let chain = corexy_ac();
        assert_eq!(chain.rotary_index(0), Some(0));
        assert_eq!(chain.rotary_index(1), Some(1));
        assert_eq!(chain.rotary_index(2), None);
        assert_eq!(chain.rotary_index(9), None);
        assert_eq!(chain.rotary_count(), 2);
    }

    #[test]
    fn layout_offsets_are_monotonic() {
        let chain = corexy_ac();
        let l = chain.layout();
        assert_eq!(l.omega, 0);
        assert_eq!(l.point, 15);
        assert_eq!(l.omega_sq, 30);
        assert_eq!(l.v, 48);
        assert_eq!(l.reference, 54);
        assert_eq!(l.limits, 59);
        assert_eq!(l.used(), 74);
        assert!(l.used() <= CACHE_CAPACITY);
    }

    #[test]
    fn layout_capacity_is_enforced() {
        assert!(matches!(
            CacheLayout::compute(6, 6, 50),
            Err(ConfigError::CapacityExceeded { used: 132, capacity: 50 })
        ));
        assert!(CacheLayout::compute(6, 6, CACHE_CAPACITY).is_ok());
    }

    #[test]
    fn zero_joints_give_endpoint() {
        let mut chain = corexy_ac();
        assert!(chain.forward(&[0.0; 5]).unwrap().max_abs_diff(&Transform::IDENTITY) < 1e-6);

        chain.set_endpoint([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 5.0, -2.0, 30.0]);
        let t = chain.forward(&[0.0; 5]).unwrap();
        assert!(t.max_abs_diff(chain.endpoint()) < 1e-6);
    }

    #[test]
    fn zero_relative_to_reference_gives_endpoint() {
        let mut chain = corexy_ac();
        chain.set_references(&[10.0, -5.0, 1.0, 2.0, 3.0]).unwrap();
        let t = chain.forward(&[10.0, -5.0, 1.0, 2.0, 3.0]).unwrap();
        assert!(t.max_abs_diff(&Transform::IDENTITY) < 1e-6);
    }

    #[test]
    fn forward_moves_prismatic_axes() {
        let chain = corexy_ac();
        let t = chain.forward(&[0.0, 0.0, 7.0, 10.0, -4.0]).unwrap();
        assert_eq!(t.rot, Mat3::IDENTITY);
        assert!(t.trans.max_abs_diff(Vec3::new(10.0, -4.0, 7.0)) < 1e-6);
    }

    #[test]
    fn forward_rotates_about_c() {
        let chain = corexy_ac();
        let t = chain.forward(&[90.0, 0.0, 0.0, 10.0, 0.0]).unwrap();
        assert_relative_eq!(t.trans.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(t.trans.y, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn forward_checks_dimensions() {
        let chain = corexy_ac();
        assert_eq!(
            chain.forward(&[0.0; 3]),
            Err(SolveError::DimensionMismatch { expected: 5, got: 3 })
        );
        assert_eq!(AxisChain::new().forward(&[]), Err(SolveError::NotConfigured));
    }

    #[test]
    fn screw_for_missing_letter_is_rejected() {
        let mut chain = corexy_ac();
        assert!(matches!(
            chain.set_screw(AxisLetter::B, [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
            Err(ConfigError::UnknownAxis('B'))
        ));
        assert!(matches!(
            chain.axis_transform(AxisLetter::B, 0.0),
            Err(SolveError::MissingAxis('B'))
        ));
    }

    #[test]
    fn rejected_screw_string_leaves_record() {
        let mut chain = corexy_ac();
        let before = *chain.record_of(AxisLetter::A).unwrap();
        let parsed = descriptor::parse_screw("A=0:1:0:0:0");
        assert!(parsed.is_err());
        assert_eq!(*chain.record_of(AxisLetter::A).unwrap(), before);
        chain
            .apply_screw(&descriptor::parse_screw("A=0:1:0:0:0:20").unwrap())
            .unwrap();
        assert_eq!(chain.record_of(AxisLetter::A).unwrap().screw.omega, Vec3::Y);
    }

    #[test]
    fn reference_count_must_match_axes() {
        let mut chain = corexy_ac();
        assert!(matches!(
            chain.set_references(&[1.0, 2.0]),
            Err(ConfigError::FieldCount { expected: 5, got: 2, .. })
        ));
        assert!(chain.records().iter().all(|r| r.reference == 0.0));
    }

    #[test]
    fn endpoint_columns_are_normalized() {
        let mut chain = AxisChain::new();
        chain.set_endpoint([2.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0, -4.0, 0.0, 1.0, 2.0, 3.0]);
        let m = chain.endpoint();
        assert_eq!(m.rot.column(0), Vec3::X);
        assert_eq!(m.rot.column(1), Vec3::Z);
        assert_eq!(m.rot.column(2), Vec3::new(0.0, -1.0, 0.0));
        assert!((*m * *chain.endpoint_inverse()).max_abs_diff(&Transform::IDENTITY) < 1e-6);
    }

    #[test]
    fn axis_types_change_recomputes_terms() {
        let mut chain = corexy_ac();
        let a = *chain.record_of(AxisLetter::A).unwrap();
        assert!(a.kind.is_rotary());
        assert_ne!(a.rotary, RotaryTerms::default());

        let kinds = [
            AxisKind::Rotary,
            AxisKind::Prismatic,
            AxisKind::Prismatic,
            AxisKind::Prismatic,
            AxisKind::Prismatic,
        ];
        chain.set_axis_types(&kinds).unwrap();
        let a = *chain.record_of(AxisLetter::A).unwrap();
        assert_eq!(a.kind, AxisKind::Prismatic);
        assert_eq!(a.rotary, RotaryTerms::default());
        assert_eq!(a.screw.point, Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(chain.layout().used(), 5 * 10 + 12);
    }

    #[test]
    fn shrinking_axis_types_hides_letters() {
        let mut chain = corexy_ac();
        chain
            .set_axis_types(&[AxisKind::Rotary, AxisKind::Rotary, AxisKind::Prismatic])
            .unwrap();
        assert_eq!(chain.num_axes(), 3);
        assert_eq!(chain.slot_of(AxisLetter::X), None);
        assert_eq!(chain.letter_at(3), None);
    }

    #[test]
    fn chain_without_marker_keeps_classification() {
        let mut chain = corexy_ac();
        chain.set_forward_chain("CAZXY").unwrap();
        assert_eq!(chain.descriptor().text(), "CAZXY");
        assert_eq!(chain.descriptor().normal_letters().as_str(), "CAZ..");
        assert_eq!(chain.special().method, Some(SpecialMethod::CoreXy));
    }

    #[test]
    fn limits_are_stored_per_letter() {
        let mut chain = corexy_ac();
        chain
            .apply_limits(&descriptor::parse_limits("C=-360:360:15").unwrap())
            .unwrap();
        let l = chain.record_of(AxisLetter::C).unwrap().limits;
        assert_relative_eq!(l.home, 15.0);
        assert_relative_eq!(l.min, -360.0);
    }
}
