//! Audio device listing command.

use clap::{Args, Subcommand};
use phaser_io::{default_device, list_devices};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List all available audio devices
    List,

    /// Show default device information
    Info,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = list_devices()?;

            if devices.is_empty() {
                println!("No audio devices found.");
                return Ok(());
            }

            println!("Available Audio Devices");
            println!("=======================\n");

            let inputs: Vec<_> = devices.iter().filter(|d| d.is_input).collect();
            if !inputs.is_empty() {
                println!("Input Devices:");
                for (idx, device) in inputs.iter().enumerate() {
                    let also_output = if device.is_output {
                        " (also output)"
                    } else {
                        ""
                    };
                    println!(
                        "  [{}] {} ({} Hz){}",
                        idx, device.name, device.default_sample_rate, also_output
                    );
                }
                println!();
            }

            let outputs: Vec<_> = devices.iter().filter(|d| d.is_output).collect();
            if !outputs.is_empty() {
                println!("Output Devices:");
                for (idx, device) in outputs.iter().enumerate() {
                    let also_input = if device.is_input { " (also input)" } else { "" };
                    println!(
                        "  [{}] {} ({} Hz){}",
                        idx, device.name, device.default_sample_rate, also_input
                    );
                }
                println!();
            }

            println!(
                "Total: {} input(s), {} output(s)",
                inputs.len(),
                outputs.len()
            );
            println!();
            println!("Tip: Use device index or partial name:");
            println!("  phaser realtime --input-device 0 --output-device 0 --preset jet");
        }

        DevicesCommand::Info => {
            let (input, output) = default_device()?;

            println!("Default Audio Devices");
            println!("=====================\n");

            match input {
                Some(device) => {
                    println!("Default Input:");
                    println!("  Name: {}", device.name);
                    println!("  Sample Rate: {} Hz\n", device.default_sample_rate);
                }
                None => println!("Default Input: None\n"),
            }

            match output {
                Some(device) => {
                    println!("Default Output:");
                    println!("  Name: {}", device.name);
                    println!("  Sample Rate: {} Hz", device.default_sample_rate);
                }
                None => println!("Default Output: None"),
            }
        }
    }

    Ok(())
}
