//! Feedback tap and wet/dry blend around the cascade.
//!
//! The feedback path forms a loop: the cascade's output at sample `n` is
//! added to its input at sample `n + 1`. [`FeedbackMix`] owns the memory for
//! that loop but never calls the cascade itself. The caller drives the cycle:
//!
//! ```text
//! let x   = node.cascade_input(dry);                     // dry + tap
//! let wet = cascade.process(&mut state, x, coefficient); // caller's job
//! let out = node.process(dry, wet, feedback, mix);       // stores next tap
//! ```
//!
//! Skipping `cascade_input` and feeding `dry` straight into the cascade
//! silently disables feedback.

use crate::math::{flush_denormal, wet_dry_mix};

/// Largest feedback gain magnitude the node applies.
///
/// The cascade has unity gain at DC (and at Nyquist with alternating sign),
/// so a loop gain of exactly ±1 would integrate a sustained input without
/// bound. Requested gains beyond this are clamped.
pub const MAX_FEEDBACK: f32 = 0.95;

/// Per-channel feedback memory and wet/dry mixer.
///
/// # Example
///
/// ```rust
/// use phaser_core::FeedbackMix;
///
/// let mut node = FeedbackMix::new();
/// assert_eq!(node.cascade_input(0.5), 0.5);
///
/// // Store a wet sample with feedback 0.5, mix fully wet.
/// let out = node.process(0.5, 0.8, 0.5, 1.0);
/// assert_eq!(out, 0.8);
/// assert_eq!(node.cascade_input(0.0), 0.4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeedbackMix {
    /// Previous cascade output scaled by the feedback gain
    tap: f32,
}

impl FeedbackMix {
    /// Create a node with an empty feedback memory.
    pub const fn new() -> Self {
        Self { tap: 0.0 }
    }

    /// Clamp a requested feedback gain to `±MAX_FEEDBACK`.
    ///
    /// NaN maps to 0.0 (no feedback).
    #[inline]
    pub fn clamp_gain(gain: f32) -> f32 {
        if gain.is_nan() {
            0.0
        } else {
            gain.clamp(-MAX_FEEDBACK, MAX_FEEDBACK)
        }
    }

    /// Input for the cascade's next call: `dry + feedback * previous_wet`.
    #[inline]
    pub fn cascade_input(&self, dry: f32) -> f32 {
        dry + self.tap
    }

    /// Store `wet` as the next feedback tap and return the blended output.
    ///
    /// Output is `dry * (1 - mix) + wet * mix`; `mix` is clamped to \[0, 1\].
    #[inline]
    pub fn process(&mut self, dry: f32, wet: f32, feedback_gain: f32, mix: f32) -> f32 {
        self.tap = flush_denormal(Self::clamp_gain(feedback_gain) * wet);
        wet_dry_mix(dry, wet, mix.clamp(0.0, 1.0))
    }

    /// The value that will be added to the next cascade input.
    pub fn tap(&self) -> f32 {
        self.tap
    }

    /// Clear the feedback memory.
    pub fn reset(&mut self) {
        self.tap = 0.0;
    }
}
