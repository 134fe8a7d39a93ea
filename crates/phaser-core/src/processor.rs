//! Block processor: lifecycle and per-sample iteration.
//!
//! [`PhaserProcessor`] owns the shared LFO, the parameter smoother, the
//! stateless cascade, and one [`ChannelState`] per prepared channel. It is
//! driven through a small state machine:
//!
//! ```text
//! Unprepared --prepare--> Prepared --process_block--> Processing
//!      ^                     ^  |                        |  |
//!      |                     |  +------- reset ----------+  |
//!      |                     +---------- prepare -----------+
//!  Released <------------------------ release --------------+
//! ```
//!
//! Audio handed to the processor while it is not prepared passes through
//! untouched.

#[cfg(not(feature = "std"))]
use alloc::{sync::Arc, vec, vec::Vec};
#[cfg(feature = "std")]
use std::sync::Arc;

use crate::cascade::{CascadeState, PhaserCascade};
use crate::error::ConfigError;
use crate::feedback::FeedbackMix;
use crate::lfo::{Lfo, sine_at};
use crate::params::{ParameterSet, PhaserParams};
use crate::smoother::{ParameterSmoother, SmoothedFrame};

/// Largest per-channel LFO phase offset, in cycles.
pub const MAX_STEREO_SPREAD: f32 = 0.5;

/// Lowest accepted sample rate in Hz: twice the highest LFO rate, so the
/// LFO advances by less than one cycle per sample.
pub const MIN_SAMPLE_RATE: f32 = 200.0;

/// Host configuration handed to [`PhaserProcessor::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz. Must be finite and at least [`MIN_SAMPLE_RATE`].
    pub sample_rate: f32,
    /// Largest block the host will pass. Must be non-zero.
    pub max_block_size: usize,
    /// Number of channels to keep state for. Must be non-zero.
    pub num_channels: usize,
}

impl ProcessSpec {
    /// Check every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate < MIN_SAMPLE_RATE {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.num_channels == 0 {
            return Err(ConfigError::InvalidChannelCount(self.num_channels));
        }
        if self.max_block_size == 0 {
            return Err(ConfigError::InvalidBlockSize(self.max_block_size));
        }
        Ok(())
    }
}

/// Lifecycle position of a [`PhaserProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    /// Constructed, never prepared.
    Unprepared,
    /// Prepared (or reset) and not yet fed a block.
    Prepared,
    /// At least one block processed since the last prepare or reset.
    Processing,
    /// Resources dropped by [`PhaserProcessor::release`].
    Released,
}

/// Per-channel memory: the cascade's stages and the feedback tap.
#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    cascade: CascadeState,
    feedback: FeedbackMix,
}

impl ChannelState {
    #[inline]
    fn tick(
        &mut self,
        cascade: &PhaserCascade,
        dry: f32,
        coefficient: f32,
        frame: &SmoothedFrame,
    ) -> f32 {
        let input = self.feedback.cascade_input(dry);
        let wet = cascade.process(&mut self.cascade, input, coefficient);
        self.feedback.process(dry, wet, frame.feedback, frame.mix)
    }

    fn reset(&mut self) {
        self.cascade.reset();
        self.feedback.reset();
    }
}

/// Multichannel phaser with a lifecycle.
///
/// Parameters are read from a shared [`PhaserParams`] once at the top of
/// every block; the rest of the block sees that snapshot, ramped by the
/// [`ParameterSmoother`].
///
/// # Example
///
/// ```rust
/// use phaser_core::{PhaserProcessor, ProcessSpec};
///
/// let mut phaser = PhaserProcessor::new(4).unwrap();
/// phaser.params().set_mix(0.0);
/// phaser
///     .prepare(ProcessSpec { sample_rate: 44100.0, max_block_size: 64, num_channels: 1 })
///     .unwrap();
///
/// let mut block = [0.25f32; 64];
/// phaser.process_block(&mut [&mut block[..]]);
/// assert!(block.iter().all(|&s| s == 0.25)); // mix 0 is fully dry
/// ```
#[derive(Debug)]
pub struct PhaserProcessor {
    params: Arc<PhaserParams>,
    cascade: PhaserCascade,
    lfo: Lfo,
    smoother: ParameterSmoother,
    channels: Vec<ChannelState>,
    spec: Option<ProcessSpec>,
    state: ProcessorState,
    stereo_spread: f32,
}

impl PhaserProcessor {
    /// Create an unprepared phaser with `stages` all-pass stages and default
    /// parameters.
    pub fn new(stages: usize) -> Result<Self, ConfigError> {
        Self::with_params(stages, Arc::new(PhaserParams::default()))
    }

    /// Create an unprepared phaser reading from an existing parameter store.
    pub fn with_params(stages: usize, params: Arc<PhaserParams>) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(PhaserCascade::new(stages)?, params))
    }

    fn from_parts(cascade: PhaserCascade, params: Arc<PhaserParams>) -> Self {
        Self {
            params,
            cascade,
            lfo: Lfo::default(),
            smoother: ParameterSmoother::default(),
            channels: Vec::new(),
            spec: None,
            state: ProcessorState::Unprepared,
            stereo_spread: 0.0,
        }
    }

    /// Shared parameter store. Clone the `Arc` to control the phaser from
    /// another thread.
    pub fn params(&self) -> &Arc<PhaserParams> {
        &self.params
    }

    /// Overwrite every parameter at once.
    pub fn set_parameters(&self, set: &ParameterSet) {
        self.params.store(set);
    }

    /// Allocate and clear per-channel state for `spec`.
    ///
    /// May be called again at any time; channel memory is only reallocated
    /// when the channel count changes, but is always cleared. The LFO
    /// restarts at phase 0 and parameter ramps jump to the current values.
    pub fn prepare(&mut self, spec: ProcessSpec) -> Result<(), ConfigError> {
        spec.validate()?;

        if self.channels.len() != spec.num_channels {
            self.channels = vec![ChannelState::default(); spec.num_channels];
        }
        if self.spec.is_none_or(|prev| prev.sample_rate != spec.sample_rate) {
            self.lfo.set_sample_rate(spec.sample_rate);
            self.smoother.set_sample_rate(spec.sample_rate);
        }
        self.spec = Some(spec);
        self.clear();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "phaser prepare: {} Hz, {} channels, max block {}, {} stages",
            spec.sample_rate,
            spec.num_channels,
            spec.max_block_size,
            self.cascade.stages()
        );
        Ok(())
    }

    /// Clear filter and feedback memory and restart the LFO, keeping the
    /// current allocation. Does nothing unless prepared.
    pub fn reset(&mut self) {
        if !self.is_prepared() {
            return;
        }
        self.clear();

        #[cfg(feature = "tracing")]
        tracing::debug!("phaser reset");
    }

    fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
        let params = self.params.snapshot();
        self.lfo.reset();
        self.lfo.set_rate(params.rate());
        self.smoother.set_targets(&params);
        self.smoother.snap();
        self.state = ProcessorState::Prepared;
    }

    /// Drop per-channel state. Processing passes audio through until the
    /// next [`prepare`](Self::prepare).
    pub fn release(&mut self) {
        self.channels = Vec::new();
        self.spec = None;
        self.state = ProcessorState::Released;

        #[cfg(feature = "tracing")]
        tracing::debug!("phaser release");
    }

    /// Process planar audio in place.
    ///
    /// `channels[i]` is channel `i`. Channels beyond the prepared count, and
    /// the tail of any slice shorter than the longest one, are left
    /// untouched. The LFO advances once per sample index regardless of the
    /// number of channels.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        if !self.begin_block() {
            return;
        }
        let active = channels.len().min(self.channels.len());
        let frames = channels[..active]
            .iter()
            .map(|ch| ch.len())
            .max()
            .unwrap_or(0);

        for n in 0..frames {
            self.process_frame(channels[..active].iter_mut().map(|ch| ch.get_mut(n)));
        }
    }

    /// Process interleaved audio in place.
    ///
    /// `buffer` holds frames of `num_channels` samples; a trailing partial
    /// frame is left untouched, as are channels beyond the prepared count.
    pub fn process_interleaved(&mut self, buffer: &mut [f32], num_channels: usize) {
        if num_channels == 0 || !self.begin_block() {
            return;
        }
        for frame in buffer.chunks_exact_mut(num_channels) {
            self.process_frame(frame.iter_mut().map(Some));
        }
    }

    /// Snapshot parameters for the coming block. Returns false when the
    /// block should pass through.
    fn begin_block(&mut self) -> bool {
        if !self.is_prepared() {
            return false;
        }
        let params = self.params.snapshot();
        self.lfo.set_rate(params.rate());
        self.smoother.set_targets(&params);
        self.state = ProcessorState::Processing;
        true
    }

    #[inline]
    fn process_frame<'a, I>(&mut self, samples: I)
    where
        I: Iterator<Item = Option<&'a mut f32>>,
    {
        let frame = self.smoother.next_frame();
        let phase = self.lfo.phase();
        let shared = self.smoother.coefficient(&frame, self.lfo.advance());

        for (ch, (sample, state)) in samples.zip(self.channels.iter_mut()).enumerate() {
            let Some(sample) = sample else { continue };

            let coefficient = if ch == 0 || self.stereo_spread == 0.0 {
                shared
            } else {
                let offset = phase + self.stereo_spread * ch as f32;
                self.smoother.coefficient(&frame, sine_at(offset))
            };

            let dry = *sample;
            let out = state.tick(&self.cascade, dry, coefficient, &frame);
            debug_assert!(
                out.is_finite() || !dry.is_finite(),
                "non-finite output {out} from finite input {dry}"
            );
            *sample = out;
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProcessorState {
        self.state
    }

    /// Whether blocks are currently processed (rather than passed through).
    pub fn is_prepared(&self) -> bool {
        matches!(
            self.state,
            ProcessorState::Prepared | ProcessorState::Processing
        )
    }

    /// Configuration from the last successful [`prepare`](Self::prepare).
    pub fn spec(&self) -> Option<ProcessSpec> {
        self.spec
    }

    /// Number of all-pass stages.
    pub fn stages(&self) -> usize {
        self.cascade.stages()
    }

    /// Number of channels with state, 0 when not prepared.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Current LFO phase in cycles, \[0, 1).
    pub fn lfo_phase(&self) -> f32 {
        self.lfo.phase()
    }

    /// Per-channel LFO phase offset in cycles.
    pub fn stereo_spread(&self) -> f32 {
        self.stereo_spread
    }

    /// Offset channel `n`'s sweep by `n * spread` cycles.
    ///
    /// Clamped to \[0, [`MAX_STEREO_SPREAD`]\]; 0 (the default) shares one
    /// sweep across all channels.
    pub fn set_stereo_spread(&mut self, spread: f32) {
        self.stereo_spread = if spread.is_nan() {
            0.0
        } else {
            spread.clamp(0.0, MAX_STEREO_SPREAD)
        };
    }
}

impl Default for PhaserProcessor {
    fn default() -> Self {
        Self::from_parts(PhaserCascade::default(), Arc::new(PhaserParams::default()))
    }
}
