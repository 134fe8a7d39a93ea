//! Fixed-time linear ramps for block-rate control values.
//!
//! Depth, feedback, centre position and mix arrive once per block. Jumping
//! to a new value mid-stream clicks, so [`LinearSmoothedParam`] walks from
//! where it is to the new target in equal steps over a fixed ramp time.
//!
//! ```rust
//! use phaser_core::LinearSmoothedParam;
//!
//! let mut mix = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
//! mix.set_target(1.0);
//! for _ in 0..480 {
//!     mix.advance();
//! }
//! assert_eq!(mix.get(), 1.0);
//! ```

/// A control value ramped linearly toward its target.
///
/// The last step lands exactly on the target, so end points hold: a mix
/// ramped to 0 passes the dry signal bit for bit.
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    value: f32,
    target: f32,
    step: f32,
    steps_left: u32,
    sample_rate: f32,
    ramp_ms: f32,
}

impl LinearSmoothedParam {
    /// Start settled at `initial`, ramping over `ramp_ms` at `sample_rate`.
    pub fn with_config(initial: f32, sample_rate: f32, ramp_ms: f32) -> Self {
        Self {
            value: initial,
            target: initial,
            step: 0.0,
            steps_left: 0,
            sample_rate,
            ramp_ms,
        }
    }

    fn ramp_len(&self) -> u32 {
        (self.ramp_ms / 1000.0 * self.sample_rate) as u32
    }

    /// Ramp from the current value to `target`.
    ///
    /// Repeating the running target is a no-op, so this can be called at the
    /// top of every block.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < 1e-9 {
            return;
        }
        self.target = target;

        match self.ramp_len() {
            0 => self.snap_to_target(),
            len => {
                self.step = (target - self.value) / len as f32;
                self.steps_left = len;
            }
        }
    }

    /// Change the sample rate. Running ramps keep their step; the next
    /// [`set_target`](Self::set_target) uses the new length.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Take one step and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.steps_left {
            0 => {}
            1 => self.snap_to_target(),
            _ => {
                self.value += self.step;
                self.steps_left -= 1;
            }
        }
        self.value
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Whether the ramp has finished.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.steps_left == 0
    }

    /// End the ramp at its target.
    pub fn snap_to_target(&mut self) {
        self.value = self.target;
        self.step = 0.0;
        self.steps_left = 0;
    }
}
