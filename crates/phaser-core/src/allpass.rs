//! First-order all-pass stage with a time-varying coefficient.
//!
//! The building block of the phaser cascade. Each stage has unity magnitude
//! response at every frequency and a phase shift that goes from 0° at DC to
//! -180° at Nyquist, passing -90° at the break frequency set by the
//! coefficient.

use crate::math::flush_denormal;

/// Largest coefficient magnitude a stage accepts.
///
/// The pole sits at `z = a`, so `|a|` must stay below 1. Coefficients are
/// clamped to this bound before use.
pub const MAX_COEFFICIENT: f32 = 0.999_999;

/// Clamp an all-pass coefficient into the stable range.
///
/// NaN maps to 0.0 (a pure one-sample delay), which keeps the stage finite
/// even if a caller hands it garbage.
///
/// # Example
/// ```rust
/// use phaser_core::{clamp_coefficient, MAX_COEFFICIENT};
///
/// assert_eq!(clamp_coefficient(0.5), 0.5);
/// assert_eq!(clamp_coefficient(2.0), MAX_COEFFICIENT);
/// assert_eq!(clamp_coefficient(f32::NAN), 0.0);
/// ```
#[inline]
pub fn clamp_coefficient(a: f32) -> f32 {
    if a.is_nan() {
        0.0
    } else {
        a.clamp(-MAX_COEFFICIENT, MAX_COEFFICIENT)
    }
}

/// First-order all-pass filter memory for one channel.
///
/// Uses the direct-form-I structure:
///
/// ```text
/// y[n] = -a * x[n] + x[n-1] + a * y[n-1]
/// ```
///
/// giving `H(z) = (-a + z^-1) / (1 - a z^-1)`. The coefficient is supplied
/// per call so a sweeping LFO can change it every sample; the struct only
/// holds the two memory cells.
///
/// # Example
///
/// ```rust
/// use phaser_core::AllpassStage;
///
/// let mut stage = AllpassStage::new();
/// let y0 = stage.process(1.0, 0.5);
/// assert_eq!(y0, -0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AllpassStage {
    /// Previous input sample
    x1: f32,
    /// Previous output sample
    y1: f32,
}

impl AllpassStage {
    /// Create a stage with cleared memory.
    pub const fn new() -> Self {
        Self { x1: 0.0, y1: 0.0 }
    }

    /// Process a single sample with coefficient `a`.
    ///
    /// `a` is clamped with [`clamp_coefficient`].
    #[inline]
    pub fn process(&mut self, input: f32, coefficient: f32) -> f32 {
        let a = clamp_coefficient(coefficient);
        let output = flush_denormal(-a * input + self.x1 + a * self.y1);
        self.x1 = input;
        self.y1 = output;
        output
    }

    /// Clear filter state.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }

    /// Whether both memory cells are zero.
    pub fn is_cleared(&self) -> bool {
        self.x1 == 0.0 && self.y1 == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cutoff_to_coefficient;

    /// Steady-state RMS gain of a sine at `freq` through one stage.
    fn sine_gain(freq: f32, a: f32, sample_rate: f32) -> f32 {
        let mut stage = AllpassStage::new();
        let inc = freq / sample_rate;
        let settle = 4096;
        let measure = sample_rate as usize;
        let mut phase = 0.0f32;
        let mut in_energy = 0.0f64;
        let mut out_energy = 0.0f64;
        for n in 0..settle + measure {
            let x = crate::lfo::sine_at(phase);
            phase += inc;
            if phase >= 1.0 {
                phase -= 1.0;
            }
            let y = stage.process(x, a);
            if n >= settle {
                in_energy += f64::from(x * x);
                out_energy += f64::from(y * y);
            }
        }
        libm::sqrt(out_energy / in_energy) as f32
    }

    #[test]
    fn test_impulse_response() {
        let mut stage = AllpassStage::new();
        let a = 0.5;

        // h[0] = -a, h[1] = 1 - a^2, h[n] = a * h[n-1]
        assert_eq!(stage.process(1.0, a), -0.5);
        assert!((stage.process(0.0, a) - 0.75).abs() < 1e-7);
        assert!((stage.process(0.0, a) - 0.375).abs() < 1e-7);
    }

    #[test]
    fn test_zero_coefficient_is_unit_delay() {
        let mut stage = AllpassStage::new();
        let input = [0.3, -0.7, 0.1, 0.9];
        let mut prev = 0.0;
        for &x in &input {
            assert_eq!(stage.process(x, 0.0), prev);
            prev = x;
        }
    }

    #[test]
    fn test_unity_magnitude_sweep() {
        let sample_rate = 48000.0;
        for &cutoff in &[50.0, 500.0, 2000.0, 12000.0] {
            let a = cutoff_to_coefficient(cutoff, sample_rate);
            for &freq in &[100.0, 440.0, 1000.0, 5000.0, 15000.0] {
                let gain = sine_gain(freq, a, sample_rate);
                assert!(
                    (gain - 1.0).abs() < 0.01,
                    "cutoff {} Hz, tone {} Hz: gain {}",
                    cutoff,
                    freq,
                    gain
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_coefficient_stays_finite() {
        let mut stage = AllpassStage::new();
        for n in 0..10_000 {
            let x = if n % 2 == 0 { 1.0 } else { -1.0 };
            let y = stage.process(x, 5.0);
            assert!(y.is_finite());
            let y = stage.process(x, f32::NAN);
            assert!(y.is_finite());
        }
    }

    #[test]
    fn test_reset_clears_memory() {
        let mut stage = AllpassStage::new();
        stage.process(1.0, 0.3);
        assert!(!stage.is_cleared());
        stage.reset();
        assert!(stage.is_cleared());
        assert_eq!(stage, AllpassStage::new());
    }
}
