//! WAV file reading and writing.
//!
//! Files are loaded into planar [`AudioBuffer`]s with every channel kept.
//! Integer PCM is scaled to \[-1, 1) by `2^(bits-1)`; 32-bit files are read
//! and written as IEEE float.

use crate::{AudioBuffer, Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24, or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file into a planar buffer, keeping every channel.
///
/// # Example
/// ```ignore
/// let (audio, spec) = read_wav("input.wav")?;
/// println!("{} channels x {} frames at {} Hz", audio.num_channels(), audio.num_frames(), spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(AudioBuffer, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let buffer = AudioBuffer::from_interleaved(&samples, usize::from(spec.channels))?;
    tracing::info!(
        "read {}: {} ch, {} Hz, {} frames",
        path.display(),
        spec.channels,
        spec.sample_rate,
        buffer.num_frames()
    );
    Ok((buffer, spec))
}

/// Write a planar buffer to a WAV file.
///
/// The channel count comes from the buffer; `spec.channels` is ignored.
/// Integer formats are clipped to full scale.
///
/// # Example
/// ```ignore
/// let audio = AudioBuffer::silence(2, 48000); // 1 second of stereo silence
/// write_wav("output.wav", &audio, WavSpec::default())?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &AudioBuffer, spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(Error::Layout(format!(
            "unsupported bit depth {} (expected 16, 24, or 32)",
            spec.bits_per_sample
        )));
    }
    let channels = u16::try_from(audio.num_channels())
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| {
            Error::Layout(format!("cannot write {} channels", audio.num_channels()))
        })?;

    let out_spec = WavSpec { channels, ..spec };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(out_spec))?;
    let interleaved = audio.to_interleaved();

    if spec.bits_per_sample == 32 {
        for &sample in &interleaved {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in &interleaved {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    tracing::info!(
        "wrote {}: {} ch, {} Hz, {}-bit, {} frames",
        path.display(),
        channels,
        spec.sample_rate,
        spec.bits_per_sample,
        audio.num_frames()
    );
    Ok(())
}
