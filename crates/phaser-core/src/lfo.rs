//! Low Frequency Oscillator driving the all-pass sweep.
//!
//! A single sine LFO is shared by every channel of the phaser: it advances
//! exactly once per sample frame, and channels read the same value (or a
//! phase-offset copy of it when stereo spread is enabled).

use core::f32::consts::PI;
use libm::sinf;

/// Sine value at a normalized phase (1.0 = one full cycle).
///
/// Any real phase is accepted; whole cycles are ignored.
#[inline]
pub fn sine_at(phase: f32) -> f32 {
    sinf((phase - libm::floorf(phase)) * 2.0 * PI)
}

/// Low Frequency Oscillator for the phaser sweep.
///
/// Uses phase accumulation: the phase is kept normalized in \[0.0, 1.0) and
/// advances by `rate / sample_rate` each call to [`advance`](Self::advance).
///
/// # Output Convention
///
/// Bipolar: values are in \[-1.0, 1.0\]. A freshly created or reset LFO
/// starts at phase 0, so its first value is `sin(0) = 0`.
///
/// # Example
///
/// ```rust
/// use phaser_core::Lfo;
///
/// let mut lfo = Lfo::new(44100.0, 2.0); // 2 Hz
/// let first = lfo.advance();
/// assert_eq!(first, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(48000.0, 1.0)
    }
}

impl Lfo {
    /// Create new LFO with given sample rate and rate
    pub fn new(sample_rate: f32, rate_hz: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: rate_hz / sample_rate,
            sample_rate,
        }
    }

    /// Set the oscillation rate in Hz.
    ///
    /// Only the increment changes; the phase carries on from where it is, so
    /// the output has no discontinuity.
    #[inline]
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.phase_inc = rate_hz / self.sample_rate;
    }

    /// Get current rate in Hz
    pub fn rate(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Reset phase to 0
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Get current phase (0.0 - 1.0)
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Get the value at the current phase, then advance by one sample.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let output = sinf(self.phase * 2.0 * PI);

        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= libm::floorf(self.phase);
        }

        output
    }

    /// Set sample rate, keeping the rate in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let rate = self.rate();
        self.sample_rate = sample_rate;
        self.set_rate(rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfo_phase_accumulation() {
        let mut lfo = Lfo::new(44100.0, 1.0); // 1 Hz = one cycle per second

        for _ in 0..44100 {
            lfo.advance();
        }

        // Phase should be very close to 0 or 1 (wrapped around)
        let phase_error = lfo.phase.min((lfo.phase - 1.0).abs());
        assert!(phase_error < 0.01);
    }

    #[test]
    fn test_lfo_output_range() {
        let mut lfo = Lfo::new(44100.0, 100.0);

        for _ in 0..10_000 {
            let value = lfo.advance();
            assert!((-1.0..=1.0).contains(&value), "LFO out of range: {}", value);
            assert!((0.0..1.0).contains(&lfo.phase()));
        }
    }

    #[test]
    fn test_phase_wraps_when_rate_exceeds_sample_rate() {
        // 2.5 cycles per sample
        let mut lfo = Lfo::new(40.0, 100.0);
        for _ in 0..10 {
            let value = lfo.advance();
            assert!(value.is_finite());
            assert!((0.0..1.0).contains(&lfo.phase()), "phase {}", lfo.phase());
        }
        assert!((lfo.phase() - 0.0).abs() < 1e-4 || (lfo.phase() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_lfo_starts_at_zero() {
        let mut lfo = Lfo::new(44100.0, 3.0);
        assert_eq!(lfo.advance(), 0.0);
    }

    #[test]
    fn test_lfo_quarter_cycle_peak() {
        // 1 Hz at 400 Hz sample rate: 100 samples per quarter cycle
        let mut lfo = Lfo::new(400.0, 1.0);
        for _ in 0..100 {
            lfo.advance();
        }
        let peak = lfo.advance();
        assert!((peak - 1.0).abs() < 1e-4, "expected peak, got {}", peak);
    }

    #[test]
    fn test_set_rate_keeps_phase() {
        let mut lfo = Lfo::new(48000.0, 1.0);
        for _ in 0..1000 {
            lfo.advance();
        }
        let before = lfo.phase();
        lfo.set_rate(50.0);
        assert_eq!(lfo.phase(), before);
        assert!((lfo.rate() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_lfo_sample_rate_change() {
        let mut lfo = Lfo::new(44100.0, 5.0);

        let phase_inc_44k = lfo.phase_inc;

        lfo.set_sample_rate(48000.0);
        let phase_inc_48k = lfo.phase_inc;

        // Phase increment should scale inversely with sample rate
        let ratio = 48000.0 / 44100.0;
        assert!((phase_inc_44k / phase_inc_48k - ratio).abs() < 0.0001);
        assert!((lfo.rate() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_sine_at_matches_advance() {
        let mut lfo = Lfo::new(44100.0, 7.0);
        for _ in 0..500 {
            let phase = lfo.phase();
            let expected = sine_at(phase);
            assert!((lfo.advance() - expected).abs() < 1e-6);
        }
        assert!((sine_at(1.25) - 1.0).abs() < 1e-6);
        assert!((sine_at(-0.25) + 1.0).abs() < 1e-6);
    }
}
