//! Audio I/O layer for the phaser.
//!
//! This crate hosts a [`PhaserProcessor`](phaser_core::PhaserProcessor)
//! outside a plug-in:
//!
//! - **Buffers**: [`AudioBuffer`] holds planar multichannel audio
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for loading/saving audio files
//! - **Offline rendering**: [`render`] drives prepare and block processing over a whole buffer
//! - **Real-time streaming**: [`AudioStream`] for live duplex audio
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use phaser_core::PhaserProcessor;
//! use phaser_io::{read_wav, render, write_wav, RenderOptions};
//!
//! let (mut audio, spec) = read_wav("input.wav")?;
//!
//! let mut phaser = PhaserProcessor::default();
//! phaser.params().set_depth(0.7);
//! render(&mut phaser, &mut audio, spec.sample_rate as f32, &RenderOptions::default())?;
//!
//! write_wav("output.wav", &audio, spec)?;
//! ```

mod buffer;
mod render;
mod stream;
mod wav;

pub use buffer::AudioBuffer;
pub use render::{RenderOptions, render, render_with_progress};
pub use stream::{
    AudioDevice, AudioStream, StreamConfig, default_device, list_devices, remap_channels,
};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The phaser rejected the stream or file configuration.
    #[error("Phaser configuration error: {0}")]
    Config(#[from] phaser_core::ConfigError),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Audio data does not fit the requested layout.
    #[error("Invalid audio layout: {0}")]
    Layout(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
