//! Series chain of all-pass stages.
//!
//! [`PhaserCascade`] only knows how many stages it runs; the stage memories
//! live in a [`CascadeState`] owned by the caller (one per channel). Keeping
//! the cascade itself stateless lets the block processor pass the feedback
//! path explicitly and lets tests drive a cascade in isolation.

use crate::allpass::{AllpassStage, clamp_coefficient};
use crate::error::ConfigError;

/// Maximum number of all-pass stages.
pub const MAX_STAGES: usize = 12;

/// Stage count of the classic phaser topology.
pub const DEFAULT_STAGES: usize = 6;

/// Per-channel memory for a cascade: one [`AllpassStage`] per possible stage.
///
/// Stored inline so that allocating channel state is a single `Vec` of these
/// at prepare time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CascadeState {
    stages: [AllpassStage; MAX_STAGES],
}

impl CascadeState {
    /// Create cleared cascade memory.
    pub const fn new() -> Self {
        Self {
            stages: [AllpassStage::new(); MAX_STAGES],
        }
    }

    /// Clear every stage.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }

    /// Whether every stage memory is zero.
    pub fn is_cleared(&self) -> bool {
        self.stages.iter().all(AllpassStage::is_cleared)
    }
}

/// N first-order all-pass stages in series, sharing one coefficient.
///
/// Every stage receives the same coefficient for a given sample, as in the
/// classic phaser circuit. Each pair of stages contributes one notch once
/// the output is mixed with the dry signal.
///
/// # Example
///
/// ```rust
/// use phaser_core::{CascadeState, PhaserCascade};
///
/// let cascade = PhaserCascade::new(4).unwrap();
/// let mut state = CascadeState::new();
///
/// // Impulse through 4 stages with coefficient a: first output is a^4.
/// let y0 = cascade.process(&mut state, 1.0, 0.5);
/// assert!((y0 - 0.0625).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaserCascade {
    stages: usize,
}

impl PhaserCascade {
    /// Create a cascade with `stages` all-pass stages (1..=[`MAX_STAGES`]).
    pub fn new(stages: usize) -> Result<Self, ConfigError> {
        if stages == 0 || stages > MAX_STAGES {
            return Err(ConfigError::InvalidStageCount(stages));
        }
        Ok(Self { stages })
    }

    /// Number of active stages.
    pub fn stages(&self) -> usize {
        self.stages
    }

    /// Feed one sample through every stage in series and return the last
    /// stage's output.
    ///
    /// The coefficient is clamped once into the stable range and applied to
    /// all stages.
    #[inline]
    pub fn process(&self, state: &mut CascadeState, input: f32, coefficient: f32) -> f32 {
        let a = clamp_coefficient(coefficient);
        state.stages[..self.stages]
            .iter_mut()
            .fold(input, |x, stage| stage.process(x, a))
    }
}

impl Default for PhaserCascade {
    fn default() -> Self {
        Self {
            stages: DEFAULT_STAGES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_count_validation() {
        assert_eq!(
            PhaserCascade::new(0),
            Err(ConfigError::InvalidStageCount(0))
        );
        assert_eq!(
            PhaserCascade::new(MAX_STAGES + 1),
            Err(ConfigError::InvalidStageCount(MAX_STAGES + 1))
        );
        assert_eq!(PhaserCascade::new(1).unwrap().stages(), 1);
        assert_eq!(PhaserCascade::new(MAX_STAGES).unwrap().stages(), MAX_STAGES);
        assert_eq!(PhaserCascade::default().stages(), DEFAULT_STAGES);
    }

    #[test]
    fn test_matches_manual_chain() {
        let cascade = PhaserCascade::new(6).unwrap();
        let mut state = CascadeState::new();
        let mut manual = [AllpassStage::new(); 6];

        for n in 0..256 {
            let x = if n % 7 == 0 { 1.0 } else { -0.25 };
            let a = 0.9 * libm::sinf(n as f32 * 0.05);

            let expected = manual.iter_mut().fold(x, |acc, s| s.process(acc, a));
            assert_eq!(cascade.process(&mut state, x, a), expected);
        }
    }

    #[test]
    fn test_impulse_first_sample() {
        let a = 0.7f32;
        let cascade = PhaserCascade::default();
        let mut state = CascadeState::new();
        let y0 = cascade.process(&mut state, 1.0, a);
        assert!((y0 - libm::powf(-a, 6.0)).abs() < 1e-6);
    }

    #[test]
    fn test_unused_stages_untouched() {
        let cascade = PhaserCascade::new(2).unwrap();
        let mut state = CascadeState::new();
        cascade.process(&mut state, 1.0, 0.4);
        assert!(!state.stages[0].is_cleared());
        assert!(!state.stages[1].is_cleared());
        assert!(state.stages[2..].iter().all(AllpassStage::is_cleared));

        state.reset();
        assert!(state.is_cleared());
    }

    #[test]
    fn test_energy_preserved_for_static_coefficient() {
        // An all-pass chain preserves the energy of an impulse.
        let cascade = PhaserCascade::default();
        let mut state = CascadeState::new();
        let mut energy = 0.0f64;
        for n in 0..20_000 {
            let x = if n == 0 { 1.0 } else { 0.0 };
            let y = cascade.process(&mut state, x, 0.6);
            energy += f64::from(y * y);
        }
        assert!((energy - 1.0).abs() < 1e-3, "energy {}", energy);
    }
}
