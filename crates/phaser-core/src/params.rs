//! The five phaser controls: descriptor table, plain values, atomic store.
//!
//! - [`PARAMS`] describes every control (id, name, range, default).
//! - [`ParameterSet`] is a plain, always-clamped copy of the values.
//! - [`PhaserParams`] is the lock-free store a control thread writes and the
//!   audio thread snapshots once per block.
//!
//! ```rust
//! use std::sync::Arc;
//! use phaser_core::{PhaserParam, PhaserParams};
//!
//! let params = Arc::new(PhaserParams::default());
//! let ui = Arc::clone(&params);
//!
//! ui.set(PhaserParam::Mix, 0.75);
//! ui.set_feedback(-3.0); // clamped to -1.0
//!
//! let snapshot = params.snapshot();
//! assert_eq!(snapshot.mix(), 0.75);
//! assert_eq!(snapshot.feedback(), -1.0);
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use crate::param_info::{ParamDescriptor, ParamScale, ParamUnit};

/// Number of user-facing controls.
pub const PARAM_COUNT: usize = 5;

/// Descriptor table, indexed by [`PhaserParam::index`].
pub static PARAMS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor {
        string_id: "rate",
        name: "Rate",
        short_name: "Rate",
        unit: ParamUnit::Hertz,
        min: 0.1,
        max: 100.0,
        default: 1.0,
        scale: ParamScale::Logarithmic,
    },
    ParamDescriptor {
        string_id: "depth",
        name: "Depth",
        short_name: "Depth",
        unit: ParamUnit::None,
        min: 0.0,
        max: 1.0,
        default: 0.0,
        scale: ParamScale::Linear,
    },
    ParamDescriptor {
        string_id: "centreFrequency",
        name: "Centre Frequency",
        short_name: "Centre",
        unit: ParamUnit::Hertz,
        min: 1.0,
        max: 1000.0,
        default: 1.0,
        scale: ParamScale::Logarithmic,
    },
    ParamDescriptor {
        string_id: "feedback",
        name: "Feedback",
        short_name: "Fdbk",
        unit: ParamUnit::None,
        min: -1.0,
        max: 1.0,
        default: 1.0,
        scale: ParamScale::Linear,
    },
    ParamDescriptor {
        string_id: "mix",
        name: "Mix",
        short_name: "Mix",
        unit: ParamUnit::None,
        min: 0.0,
        max: 1.0,
        default: 0.5,
        scale: ParamScale::Linear,
    },
];

/// Identifies one of the five controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaserParam {
    /// LFO rate in Hz.
    Rate,
    /// Sweep depth, 0 = static.
    Depth,
    /// Centre of the sweep in Hz.
    CentreFrequency,
    /// Feedback gain around the cascade.
    Feedback,
    /// Wet/dry blend, 0 = dry.
    Mix,
}

impl PhaserParam {
    /// All controls in table order.
    pub const ALL: [PhaserParam; PARAM_COUNT] = [
        PhaserParam::Rate,
        PhaserParam::Depth,
        PhaserParam::CentreFrequency,
        PhaserParam::Feedback,
        PhaserParam::Mix,
    ];

    /// Position in [`PARAMS`].
    pub const fn index(self) -> usize {
        match self {
            PhaserParam::Rate => 0,
            PhaserParam::Depth => 1,
            PhaserParam::CentreFrequency => 2,
            PhaserParam::Feedback => 3,
            PhaserParam::Mix => 4,
        }
    }

    /// Descriptor for this control.
    pub fn descriptor(self) -> &'static ParamDescriptor {
        &PARAMS[self.index()]
    }

    /// Look up a control by index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Look up a control by id.
    ///
    /// Accepts the stable id (`"centreFrequency"`), its snake_case form
    /// (`"centre_frequency"`), and the American spelling, ignoring case.
    pub fn from_id(id: &str) -> Option<Self> {
        const CENTRE_ALIASES: [&str; 4] = [
            "centre_frequency",
            "center_frequency",
            "centerFrequency",
            "centre",
        ];

        let id = id.trim();
        if let Some(param) = Self::ALL
            .iter()
            .copied()
            .find(|p| p.descriptor().string_id.eq_ignore_ascii_case(id))
        {
            return Some(param);
        }
        CENTRE_ALIASES
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(id))
            .then_some(PhaserParam::CentreFrequency)
    }
}

/// Plain values of every control, always inside their declared ranges.
///
/// Setters clamp; a NaN is replaced by the control's default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    values: [f32; PARAM_COUNT],
}

impl ParameterSet {
    /// Value of `param`.
    #[inline]
    pub fn get(&self, param: PhaserParam) -> f32 {
        self.values[param.index()]
    }

    /// Set `param`, clamped into range.
    pub fn set(&mut self, param: PhaserParam, value: f32) {
        self.values[param.index()] = param.descriptor().clamp(value);
    }

    /// LFO rate in Hz.
    pub fn rate(&self) -> f32 {
        self.get(PhaserParam::Rate)
    }

    /// Sweep depth in \[0, 1\].
    pub fn depth(&self) -> f32 {
        self.get(PhaserParam::Depth)
    }

    /// Centre frequency in Hz.
    pub fn centre_frequency(&self) -> f32 {
        self.get(PhaserParam::CentreFrequency)
    }

    /// Feedback gain in \[-1, 1\].
    pub fn feedback(&self) -> f32 {
        self.get(PhaserParam::Feedback)
    }

    /// Wet/dry blend in \[0, 1\].
    pub fn mix(&self) -> f32 {
        self.get(PhaserParam::Mix)
    }

    /// Set the LFO rate in Hz.
    pub fn set_rate(&mut self, hz: f32) {
        self.set(PhaserParam::Rate, hz);
    }

    /// Set the sweep depth.
    pub fn set_depth(&mut self, depth: f32) {
        self.set(PhaserParam::Depth, depth);
    }

    /// Set the centre frequency in Hz.
    pub fn set_centre_frequency(&mut self, hz: f32) {
        self.set(PhaserParam::CentreFrequency, hz);
    }

    /// Set the feedback gain.
    pub fn set_feedback(&mut self, gain: f32) {
        self.set(PhaserParam::Feedback, gain);
    }

    /// Set the wet/dry blend.
    pub fn set_mix(&mut self, mix: f32) {
        self.set(PhaserParam::Mix, mix);
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        let mut values = [0.0; PARAM_COUNT];
        for (value, desc) in values.iter_mut().zip(PARAMS.iter()) {
            *value = desc.default;
        }
        Self { values }
    }
}

/// Lock-free parameter store shared between control and audio threads.
///
/// Each control is an `AtomicU32` holding `f32` bits. Writes and reads use
/// `Relaxed` ordering: every control is independent and the audio thread
/// only needs to eventually observe the latest value. Share it via `Arc`.
#[derive(Debug)]
pub struct PhaserParams {
    values: [AtomicU32; PARAM_COUNT],
}

impl PhaserParams {
    /// Create a store holding `set`.
    pub fn from_set(set: &ParameterSet) -> Self {
        let params = Self {
            values: core::array::from_fn(|_| AtomicU32::new(0)),
        };
        params.store(set);
        params
    }

    /// Current value of `param`.
    #[inline]
    pub fn get(&self, param: PhaserParam) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Relaxed))
    }

    /// Store `value` for `param`, clamped into range.
    #[inline]
    pub fn set(&self, param: PhaserParam, value: f32) {
        let clamped = param.descriptor().clamp(value);
        self.values[param.index()].store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// Read every control into a plain set.
    pub fn snapshot(&self) -> ParameterSet {
        let mut set = ParameterSet::default();
        for param in PhaserParam::ALL {
            set.set(param, self.get(param));
        }
        set
    }

    /// Overwrite every control from `set`.
    pub fn store(&self, set: &ParameterSet) {
        for param in PhaserParam::ALL {
            self.set(param, set.get(param));
        }
    }

    /// Set the LFO rate in Hz.
    pub fn set_rate(&self, hz: f32) {
        self.set(PhaserParam::Rate, hz);
    }

    /// Set the sweep depth.
    pub fn set_depth(&self, depth: f32) {
        self.set(PhaserParam::Depth, depth);
    }

    /// Set the centre frequency in Hz.
    pub fn set_centre_frequency(&self, hz: f32) {
        self.set(PhaserParam::CentreFrequency, hz);
    }

    /// Set the feedback gain.
    pub fn set_feedback(&self, gain: f32) {
        self.set(PhaserParam::Feedback, gain);
    }

    /// Set the wet/dry blend.
    pub fn set_mix(&self, mix: f32) {
        self.set(PhaserParam::Mix, mix);
    }

    /// LFO rate in Hz.
    pub fn rate(&self) -> f32 {
        self.get(PhaserParam::Rate)
    }

    /// Sweep depth.
    pub fn depth(&self) -> f32 {
        self.get(PhaserParam::Depth)
    }

    /// Centre frequency in Hz.
    pub fn centre_frequency(&self) -> f32 {
        self.get(PhaserParam::CentreFrequency)
    }

    /// Feedback gain.
    pub fn feedback(&self) -> f32 {
        self.get(PhaserParam::Feedback)
    }

    /// Wet/dry blend.
    pub fn mix(&self) -> f32 {
        self.get(PhaserParam::Mix)
    }
}

impl Default for PhaserParams {
    fn default() -> Self {
        Self::from_set(&ParameterSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_enum_order() {
        for (i, param) in PhaserParam::ALL.iter().enumerate() {
            assert_eq!(param.index(), i);
            assert_eq!(PhaserParam::from_index(i), Some(*param));
        }
        assert_eq!(PhaserParam::from_index(PARAM_COUNT), None);
    }

    #[test]
    fn defaults() {
        let set = ParameterSet::default();
        assert_eq!(set.rate(), 1.0);
        assert_eq!(set.depth(), 0.0);
        assert_eq!(set.centre_frequency(), 1.0);
        assert_eq!(set.feedback(), 1.0);
        assert_eq!(set.mix(), 0.5);
    }

    #[test]
    fn from_id_aliases() {
        assert_eq!(PhaserParam::from_id("rate"), Some(PhaserParam::Rate));
        assert_eq!(PhaserParam::from_id("MIX"), Some(PhaserParam::Mix));
        assert_eq!(
            PhaserParam::from_id("centreFrequency"),
            Some(PhaserParam::CentreFrequency)
        );
        assert_eq!(
            PhaserParam::from_id("centre_frequency"),
            Some(PhaserParam::CentreFrequency)
        );
        assert_eq!(
            PhaserParam::from_id("center_frequency"),
            Some(PhaserParam::CentreFrequency)
        );
        assert_eq!(PhaserParam::from_id("resonance"), None);
    }

    #[test]
    fn set_clamps_and_rejects_nan() {
        let mut set = ParameterSet::default();
        set.set_rate(1000.0);
        assert_eq!(set.rate(), 100.0);
        set.set_rate(0.0);
        assert_eq!(set.rate(), 0.1);
        set.set_centre_frequency(5000.0);
        assert_eq!(set.centre_frequency(), 1000.0);
        set.set_mix(0.3);
        set.set_mix(f32::NAN);
        assert_eq!(set.mix(), 0.5);
        set.set_depth(f32::INFINITY);
        assert_eq!(set.depth(), 1.0);
    }

    #[test]
    fn atomic_store_roundtrip() {
        let params = PhaserParams::default();
        params.set_rate(2.5);
        params.set_depth(0.7);
        params.set_centre_frequency(440.0);
        params.set_feedback(-0.25);
        params.set_mix(1.0);

        let snap = params.snapshot();
        assert_eq!(snap.rate(), 2.5);
        assert_eq!(snap.depth(), 0.7);
        assert_eq!(snap.centre_frequency(), 440.0);
        assert_eq!(snap.feedback(), -0.25);
        assert_eq!(snap.mix(), 1.0);

        let other = PhaserParams::from_set(&snap);
        assert_eq!(other.snapshot(), snap);
    }

    #[test]
    fn atomic_set_clamps() {
        let params = PhaserParams::default();
        params.set(PhaserParam::Feedback, 4.0);
        assert_eq!(params.feedback(), 1.0);
        params.set(PhaserParam::Depth, f32::NAN);
        assert_eq!(params.depth(), 0.0);
    }
}
