//! Control values + LFO to a per-sample all-pass coefficient.
//!
//! The sweep lives on a base-10 logarithmic frequency axis running from
//! [`MIN_SWEEP_HZ`] to `min(MAX_SWEEP_HZ, 0.49 * sample_rate)`. The centre
//! frequency sets the resting position on that axis, and the LFO moves it by
//! up to half the axis either way at full depth:
//!
//! ```text
//! p  = clamp(centre_pos + 0.5 * depth * lfo, 0, 1)
//! fc = MIN_SWEEP_HZ * (max / MIN_SWEEP_HZ)^p
//! a  = (1 - tan(pi fc / fs)) / (1 + tan(pi fc / fs))
//! ```
//!
//! Depth, centre position, feedback, and mix are ramped linearly over
//! [`RAMP_TIME_MS`] whenever a new block brings new targets.

use core::f32::consts::PI;

use crate::allpass::clamp_coefficient;
use crate::math::{map_from_log10, map_to_log10};
use crate::param::LinearSmoothedParam;
use crate::params::ParameterSet;

/// Bottom of the sweep range in Hz.
pub const MIN_SWEEP_HZ: f32 = 1.0;

/// Top of the sweep range in Hz, before the Nyquist limit applies.
pub const MAX_SWEEP_HZ: f32 = 20_000.0;

/// Highest cutoff as a fraction of the sample rate.
pub const NYQUIST_FRACTION: f32 = 0.49;

/// Ramp time for smoothed controls.
pub const RAMP_TIME_MS: f32 = 50.0;

/// All-pass coefficient for a break frequency of `cutoff_hz`.
///
/// The cutoff is clamped to `[MIN_SWEEP_HZ, 0.49 * sample_rate]` first (the
/// floor wins when the sample rate is too low for that range); the result is
/// always inside the stable coefficient range.
///
/// ```rust
/// use phaser_core::cutoff_to_coefficient;
///
/// // A quarter of the sample rate puts the pole at the origin.
/// assert!(cutoff_to_coefficient(12000.0, 48000.0).abs() < 1e-6);
/// assert!(cutoff_to_coefficient(100.0, 48000.0) > 0.98);
/// ```
#[inline]
pub fn cutoff_to_coefficient(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let fc = cutoff_hz
        .min(NYQUIST_FRACTION * sample_rate)
        .max(MIN_SWEEP_HZ);
    let t = libm::tanf(PI * fc / sample_rate);
    clamp_coefficient((1.0 - t) / (1.0 + t))
}

/// One sample's worth of smoothed control values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedFrame {
    /// Centre position on the log sweep axis, \[0, 1\].
    pub centre: f32,
    /// Sweep depth, \[0, 1\].
    pub depth: f32,
    /// Feedback gain, \[-1, 1\].
    pub feedback: f32,
    /// Wet/dry blend, \[0, 1\].
    pub mix: f32,
}

/// Ramps control changes and turns them into coefficients.
///
/// # Example
///
/// ```rust
/// use phaser_core::{ParameterSet, ParameterSmoother};
///
/// let mut smoother = ParameterSmoother::new(48000.0);
/// let mut set = ParameterSet::default();
/// set.set_centre_frequency(500.0);
/// set.set_depth(1.0);
/// smoother.set_targets(&set);
/// smoother.snap();
///
/// let frame = smoother.next_frame();
/// let resting = smoother.coefficient(&frame, 0.0);
/// let swept_up = smoother.coefficient(&frame, 1.0);
/// assert!(swept_up < resting); // higher cutoff, smaller coefficient
/// ```
#[derive(Debug, Clone)]
pub struct ParameterSmoother {
    sample_rate: f32,
    max_sweep_hz: f32,
    centre: LinearSmoothedParam,
    depth: LinearSmoothedParam,
    feedback: LinearSmoothedParam,
    mix: LinearSmoothedParam,
}

impl ParameterSmoother {
    /// Create a smoother at `sample_rate`, settled on the default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let ramp = |v| LinearSmoothedParam::with_config(v, sample_rate, RAMP_TIME_MS);
        let mut smoother = Self {
            sample_rate,
            max_sweep_hz: Self::sweep_ceiling(sample_rate),
            centre: ramp(0.0),
            depth: ramp(0.0),
            feedback: ramp(0.0),
            mix: ramp(0.0),
        };
        smoother.set_targets(&ParameterSet::default());
        smoother.snap();
        smoother
    }

    fn sweep_ceiling(sample_rate: f32) -> f32 {
        (NYQUIST_FRACTION * sample_rate).min(MAX_SWEEP_HZ).max(MIN_SWEEP_HZ)
    }

    /// Change the sample rate.
    ///
    /// The sweep ceiling moves with it, so the centre target is re-derived
    /// on the next [`set_targets`](Self::set_targets).
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.max_sweep_hz = Self::sweep_ceiling(sample_rate);
        for ramp in [
            &mut self.centre,
            &mut self.depth,
            &mut self.feedback,
            &mut self.mix,
        ] {
            ramp.set_sample_rate(sample_rate);
        }
    }

    /// Current sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Upper end of the sweep range in Hz at the current sample rate.
    pub fn max_sweep_hz(&self) -> f32 {
        self.max_sweep_hz
    }

    /// Start ramps toward the values in `set`.
    ///
    /// Unchanged targets leave running ramps alone.
    pub fn set_targets(&mut self, set: &ParameterSet) {
        self.centre
            .set_target(self.normalize_frequency(set.centre_frequency()));
        self.depth.set_target(set.depth());
        self.feedback.set_target(set.feedback());
        self.mix.set_target(set.mix());
    }

    /// Jump every ramp to its target.
    pub fn snap(&mut self) {
        self.centre.snap_to_target();
        self.depth.snap_to_target();
        self.feedback.snap_to_target();
        self.mix.snap_to_target();
    }

    /// Whether every ramp has reached its target.
    pub fn is_settled(&self) -> bool {
        self.centre.is_settled()
            && self.depth.is_settled()
            && self.feedback.is_settled()
            && self.mix.is_settled()
    }

    /// Advance every ramp by one sample.
    #[inline]
    pub fn next_frame(&mut self) -> SmoothedFrame {
        SmoothedFrame {
            centre: self.centre.advance(),
            depth: self.depth.advance(),
            feedback: self.feedback.advance(),
            mix: self.mix.advance(),
        }
    }

    /// Coefficient for `frame` with the LFO at `lfo` (\[-1, 1\]).
    #[inline]
    pub fn coefficient(&self, frame: &SmoothedFrame, lfo: f32) -> f32 {
        let position = (frame.centre + 0.5 * frame.depth * lfo).clamp(0.0, 1.0);
        cutoff_to_coefficient(self.cutoff_hz(position), self.sample_rate)
    }

    /// Frequency at `position` (\[0, 1\]) on the sweep axis.
    #[inline]
    pub fn cutoff_hz(&self, position: f32) -> f32 {
        map_to_log10(position, MIN_SWEEP_HZ, self.max_sweep_hz)
    }

    /// Position of `hz` on the sweep axis, clamped to \[0, 1\].
    pub fn normalize_frequency(&self, hz: f32) -> f32 {
        map_from_log10(hz, MIN_SWEEP_HZ, self.max_sweep_hz)
    }
}

impl Default for ParameterSmoother {
    fn default() -> Self {
        Self::new(48000.0)
    }
}
