//! Real-time audio processing command.

use super::common::{PhaserArgs, parse_key_val, print_settings};
use clap::Args;
use phaser_config::validate_named_param;
use phaser_core::{PhaserParams, ProcessSpec};
use phaser_io::{AudioStream, StreamConfig, default_device, remap_channels};
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::Ordering;

/// Largest callback the processor is prepared for; larger ones still work.
const MAX_BLOCK_SIZE: usize = 4096;

#[derive(Args)]
pub struct RealtimeArgs {
    #[command(flatten)]
    phaser: PhaserArgs,

    /// Input device name, partial name, or index
    #[arg(long)]
    input_device: Option<String>,

    /// Output device name, partial name, or index
    #[arg(long)]
    output_device: Option<String>,

    /// Don't read "key=value" parameter changes from stdin
    #[arg(long)]
    no_control: bool,
}

pub fn run(args: RealtimeArgs) -> anyhow::Result<()> {
    let (preset, mut phaser) = args.phaser.build_processor()?;

    let (default_input, default_output) = default_device()?;
    let input_name = args
        .input_device
        .clone()
        .or(default_input.map(|d| d.name))
        .unwrap_or_else(|| "none".to_string());
    let output_name = args
        .output_device
        .clone()
        .or(default_output.map(|d| d.name))
        .unwrap_or_else(|| "none".to_string());

    let config = StreamConfig {
        input_device: args.input_device,
        output_device: args.output_device,
    };
    let mut stream = AudioStream::new(&config)?;

    let sample_rate = stream.sample_rate()?;
    let in_channels = usize::from(stream.input_channels());
    let out_channels = usize::from(stream.output_channels());

    phaser.prepare(ProcessSpec {
        sample_rate: sample_rate as f32,
        max_block_size: MAX_BLOCK_SIZE,
        num_channels: out_channels,
    })?;

    println!("Real-time phaser: {}", preset.name);
    print_settings(&preset);
    println!("  Input:  {} ({} ch)", input_name, in_channels);
    println!("  Output: {} ({} ch)", output_name, out_channels);
    println!("  Sample rate: {} Hz", sample_rate);
    if !args.no_control {
        println!("\nType key=value (e.g. depth=0.8) and Enter to change a parameter.");
        spawn_control_thread(Arc::clone(phaser.params()));
    }
    println!("Press Ctrl+C to stop...\n");

    let running = stream.running_flag();
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        running.store(false, Ordering::SeqCst);
    })?;

    stream.run(move |input, output| {
        remap_channels(input, in_channels, output, out_channels);
        phaser.process_interleaved(output, out_channels);
    })?;

    println!("Done!");
    Ok(())
}

/// Read `key=value` lines from stdin and write them into the shared
/// parameter store until stdin closes.
fn spawn_control_thread(params: Arc<PhaserParams>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match apply_control_line(&params, line) {
                Ok(message) => println!("{message}"),
                Err(e) => eprintln!("{e}"),
            }
        }
    });
}

fn apply_control_line(params: &PhaserParams, line: &str) -> anyhow::Result<String> {
    let (key, value) = parse_key_val(line).map_err(anyhow::Error::msg)?;
    let (param, value) = validate_named_param(&key, &value)?;
    params.set(param, value);
    let desc = param.descriptor();
    Ok(format!(
        "{} = {}{}",
        desc.name,
        params.get(param),
        desc.unit.suffix()
    ))
}
