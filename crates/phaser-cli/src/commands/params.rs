//! Parameter listing command.

use clap::Args;
use phaser_core::{PARAMS, ParamDescriptor, ParamScale};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show only this parameter
    name: Option<String>,
}

pub fn run(args: &ParamsArgs) -> anyhow::Result<()> {
    let selected: Vec<_> = match &args.name {
        Some(name) => {
            let param = phaser_core::PhaserParam::from_id(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown parameter '{}'", name))?;
            vec![param.descriptor()]
        }
        None => PARAMS.iter().collect(),
    };

    println!("Phaser Parameters");
    println!("=================\n");
    println!(
        "  {:18} {:>10} {:>10} {:>10} {:>5}  {:5} {}",
        "ID", "Min", "Max", "Default", "Knob", "Unit", "Scale"
    );
    for desc in selected {
        let scale = match desc.scale {
            ParamScale::Linear => "linear",
            ParamScale::Logarithmic => "log",
        };
        println!(
            "  {:18} {:>10} {:>10} {:>10} {:>5}  {:5} {}",
            desc.string_id,
            desc.min,
            desc.max,
            desc.default,
            default_knob(desc),
            desc.unit.suffix(),
            scale
        );
    }
    println!();
    println!("Set with --param, e.g.: phaser process in.wav out.wav --param depth=0.7");
    Ok(())
}

/// Default value as a percentage of knob travel.
fn default_knob(desc: &ParamDescriptor) -> String {
    format!("{:.0}%", desc.normalize(desc.default) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phaser_core::PhaserParam;

    #[test]
    fn knob_column_follows_scale() {
        assert_eq!(default_knob(PhaserParam::Mix.descriptor()), "50%");
        assert_eq!(default_knob(PhaserParam::Feedback.descriptor()), "100%");
        assert_eq!(default_knob(PhaserParam::CentreFrequency.descriptor()), "0%");
        // 1 Hz on a 0.1..100 Hz log knob sits a third of the way up
        assert_eq!(default_knob(PhaserParam::Rate.descriptor()), "33%");
    }
}
