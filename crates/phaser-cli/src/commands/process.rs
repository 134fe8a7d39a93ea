//! File-based phaser processing command.

use super::common::{PhaserArgs, linear_to_db, print_settings};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use phaser_io::{RenderOptions, WavSpec, read_wav, render_with_progress, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    phaser: PhaserArgs,

    /// Seconds of silence appended so the feedback tail rings out
    #[arg(long, default_value = "0.0")]
    tail: f32,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("Unsupported bit depth {} (expected 16, 24, or 32)", args.bit_depth);
    }
    if !(args.tail.is_finite() && args.tail >= 0.0) {
        anyhow::bail!("--tail must be a non-negative number of seconds");
    }

    println!("Reading {}...", args.input.display());
    let (mut audio, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} ch, {} frames, {} Hz, {:.2}s",
        audio.num_channels(),
        audio.num_frames(),
        spec.sample_rate,
        audio.num_frames() as f32 / sample_rate
    );

    let (preset, mut phaser) = args.phaser.build_processor()?;
    println!("Phaser: {}", preset.name);
    print_settings(&preset);

    let input_rms = audio.rms();
    let input_peak = audio.peak();

    let options = RenderOptions {
        block_size: args.block_size,
        tail_frames: (args.tail * sample_rate) as usize,
    };
    let total = audio.num_frames() + options.tail_frames;

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    render_with_progress(&mut phaser, &mut audio, sample_rate, &options, |done| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(audio.rms()),
        linear_to_db(audio.peak())
    );

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &audio, out_spec)?;
    println!("Done!");

    Ok(())
}
