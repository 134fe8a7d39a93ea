//! Phaser Core - all-pass cascade phaser engine
//!
//! This crate implements a classic digital phaser: a chain of first-order
//! all-pass filters whose break frequency is swept by a low-frequency
//! oscillator, with a feedback tap around the chain and a wet/dry blend at the
//! output. Everything on the audio path is allocation-free and lock-free.
//!
//! # Building Blocks
//!
//! Leaf-first, in the order a sample flows through them:
//!
//! - [`Lfo`] - Sine oscillator producing the modulation signal in \[-1, 1\]
//! - [`ParameterSmoother`] - Maps control values + LFO to a per-sample all-pass coefficient
//! - [`FeedbackMix`] - Feedback tap into the cascade and wet/dry blend out of it
//! - [`PhaserCascade`] - N [`AllpassStage`]s in series, stateless; memory lives in [`CascadeState`]
//! - [`PhaserProcessor`] - Lifecycle state machine and per-sample block iteration
//!
//! ## Parameters
//!
//! - [`ParameterSet`] - Plain, always-clamped values of the five controls
//! - [`PhaserParams`] - Lock-free store written by a control thread, read by the audio thread
//! - [`PARAMS`] / [`PhaserParam`] - Descriptor table (ids, names, ranges, defaults)
//!
//! # Example
//!
//! ```rust
//! use phaser_core::{PhaserProcessor, ProcessSpec};
//!
//! let mut phaser = PhaserProcessor::default();
//! phaser.params().set_depth(0.8);
//! phaser.params().set_centre_frequency(500.0);
//!
//! phaser
//!     .prepare(ProcessSpec { sample_rate: 48000.0, max_block_size: 256, num_channels: 2 })
//!     .unwrap();
//!
//! let mut left = [0.0f32; 256];
//! let mut right = [0.0f32; 256];
//! left[0] = 1.0;
//! phaser.process_block(&mut [&mut left[..], &mut right[..]]);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for per-channel state).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! phaser-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod cascade;
pub mod error;
pub mod feedback;
pub mod lfo;
pub mod math;
pub mod param;
pub mod param_info;
pub mod params;
pub mod processor;
pub mod smoother;

// Re-export main types at crate root
pub use allpass::{AllpassStage, MAX_COEFFICIENT, clamp_coefficient};
pub use cascade::{CascadeState, DEFAULT_STAGES, MAX_STAGES, PhaserCascade};
pub use error::ConfigError;
pub use feedback::{FeedbackMix, MAX_FEEDBACK};
pub use lfo::Lfo;
pub use math::{flush_denormal, wet_dry_mix};
pub use param::LinearSmoothedParam;
pub use param_info::{ParamDescriptor, ParamScale, ParamUnit};
pub use params::{PARAM_COUNT, PARAMS, ParameterSet, PhaserParam, PhaserParams};
pub use processor::{
    MAX_STEREO_SPREAD, MIN_SAMPLE_RATE, PhaserProcessor, ProcessSpec, ProcessorState,
};
pub use smoother::{
    MAX_SWEEP_HZ, MIN_SWEEP_HZ, ParameterSmoother, SmoothedFrame, cutoff_to_coefficient,
};
