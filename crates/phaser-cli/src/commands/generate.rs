//! Test signal generation command.

use clap::{Args, Subcommand};
use phaser_io::{AudioBuffer, WavSpec, write_wav};
use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,

    /// Number of identical output channels
    #[arg(long, global = true, default_value = "1")]
    channels: usize,

    /// Sample rate
    #[arg(long, global = true, default_value = "48000")]
    sample_rate: u32,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate an exponential sine sweep (chirp)
    Sweep {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Start frequency in Hz
        #[arg(long, default_value = "20.0")]
        start: f32,

        /// End frequency in Hz
        #[arg(long, default_value = "20000.0")]
        end: f32,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate an impulse
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "48000")]
        length: usize,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },

    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate silence
    Silence {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    if args.channels == 0 {
        anyhow::bail!("--channels must be at least 1");
    }
    if args.sample_rate == 0 {
        anyhow::bail!("--sample-rate must be positive");
    }
    let sr = args.sample_rate as f32;
    let frames = |duration: f32| (duration.max(0.0) * sr) as usize;

    let (output, samples) = match args.command {
        GenerateCommand::Sweep {
            output,
            start,
            end,
            duration,
            amplitude,
        } => {
            if !(start > 0.0 && end > 0.0) {
                anyhow::bail!("sweep frequencies must be positive");
            }
            println!("Generating sine sweep...");
            println!("  {} Hz to {} Hz over {:.2}s", start, end, duration);
            (output, sine_sweep(sr, start, end, frames(duration), amplitude))
        }

        GenerateCommand::Impulse {
            output,
            length,
            amplitude,
        } => {
            println!("Generating impulse...");
            let mut samples = vec![0.0; length];
            if let Some(first) = samples.first_mut() {
                *first = amplitude;
            }
            (output, samples)
        }

        GenerateCommand::Noise {
            output,
            duration,
            amplitude,
        } => {
            println!("Generating white noise...");
            println!("  {:.2}s at {} Hz", duration, args.sample_rate);
            let mut rng = XorShift32::default();
            let samples = (0..frames(duration))
                .map(|_| (rng.next_f32() * 2.0 - 1.0) * amplitude)
                .collect();
            (output, samples)
        }

        GenerateCommand::Tone {
            output,
            freq,
            duration,
            amplitude,
        } => {
            println!("Generating {} Hz tone...", freq);
            (output, sine_tone(sr, freq, frames(duration), amplitude))
        }

        GenerateCommand::Silence { output, duration } => {
            println!("Generating silence...");
            (output, vec![0.0; frames(duration)])
        }
    };

    write_signal(&output, samples, args.channels, args.sample_rate)
}

fn write_signal(
    path: &Path,
    samples: Vec<f32>,
    channels: usize,
    sample_rate: u32,
) -> anyhow::Result<()> {
    let audio = AudioBuffer::new(vec![samples; channels])?;
    let spec = WavSpec {
        channels: u16::try_from(channels)?,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(path, &audio, spec)?;
    println!(
        "Wrote {} ch x {} frames to {}",
        audio.num_channels(),
        audio.num_frames(),
        path.display()
    );
    Ok(())
}

fn sine_tone(sample_rate: f32, freq: f32, frames: usize, amplitude: f32) -> Vec<f32> {
    (0..frames)
        .map(|n| (TAU * freq * n as f32 / sample_rate).sin() * amplitude)
        .collect()
}

/// Exponential sweep: instantaneous frequency grows from `start` to `end`
/// geometrically over `frames` samples.
fn sine_sweep(sample_rate: f32, start: f32, end: f32, frames: usize, amplitude: f32) -> Vec<f32> {
    let duration = frames as f32 / sample_rate;
    let ratio = (end / start).ln();
    if frames == 0 || ratio.abs() < f32::EPSILON {
        return sine_tone(sample_rate, start, frames, amplitude);
    }
    let k = duration / ratio;
    (0..frames)
        .map(|n| {
            let t = n as f32 / sample_rate;
            let phase = TAU * start * k * ((t / k).exp() - 1.0);
            phase.sin() * amplitude
        })
        .collect()
}

/// xorshift32 noise source with a fixed seed, so output is reproducible.
struct XorShift32(u32);

impl Default for XorShift32 {
    fn default() -> Self {
        Self(0x1234_5678)
    }
}

impl XorShift32 {
    fn next_f32(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x as f32 / u32::MAX as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_starts_at_zero_and_stays_bounded() {
        let tone = sine_tone(48000.0, 1000.0, 480, 0.5);
        assert_eq!(tone.len(), 480);
        assert_eq!(tone[0], 0.0);
        assert!(tone.iter().all(|s| s.abs() <= 0.5 + 1e-6));
    }

    #[test]
    fn sweep_is_bounded_and_degenerates_to_tone() {
        let sweep = sine_sweep(48000.0, 20.0, 20000.0, 48000, 0.8);
        assert_eq!(sweep.len(), 48000);
        assert!(sweep.iter().all(|s| s.is_finite() && s.abs() <= 0.8 + 1e-6));

        let flat = sine_sweep(48000.0, 440.0, 440.0, 100, 1.0);
        assert_eq!(flat, sine_tone(48000.0, 440.0, 100, 1.0));
    }

    #[test]
    fn noise_is_deterministic_and_in_range() {
        let mut a = XorShift32::default();
        let mut b = XorShift32::default();
        for _ in 0..1000 {
            let x = a.next_f32();
            assert!((0.0..=1.0).contains(&x));
            assert_eq!(x, b.next_f32());
        }
    }
}
