//! Shared CLI helpers used across multiple commands.

use clap::Args;
use phaser_config::{Preset, load_preset as config_load_preset, validate_named_param, validate_preset};
use phaser_core::PhaserProcessor;

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))
}

/// Phaser settings shared by `process` and `realtime`.
#[derive(Args, Debug, Default)]
pub struct PhaserArgs {
    /// Preset name or TOML path to start from
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Parameter override, e.g. "rate=0.5", "centre_frequency=300Hz", "mix=40%"
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    pub param: Vec<(String, String)>,

    /// Number of all-pass stages (1-12)
    #[arg(long)]
    pub stages: Option<usize>,

    /// Per-channel LFO phase offset in cycles (0-0.5)
    #[arg(long)]
    pub stereo_spread: Option<f32>,
}

impl PhaserArgs {
    /// Resolve the preset and apply `--param`, `--stages` and
    /// `--stereo-spread` on top of it.
    pub fn resolve_preset(&self) -> anyhow::Result<Preset> {
        let mut preset = match &self.preset {
            Some(name) => load_preset(name)?,
            None => Preset::default(),
        };

        for (key, value) in &self.param {
            let (param, value) = validate_named_param(key, value)?;
            preset.params.set(param, value);
        }
        if let Some(stages) = self.stages {
            preset.stages = Some(stages);
        }
        if let Some(spread) = self.stereo_spread {
            preset.stereo_spread = Some(spread);
        }

        validate_preset(&preset)?;
        Ok(preset)
    }

    /// Build an unprepared processor from the resolved preset.
    pub fn build_processor(&self) -> anyhow::Result<(Preset, PhaserProcessor)> {
        let preset = self.resolve_preset()?;
        let phaser = preset.build_processor()?;
        Ok((preset, phaser))
    }
}

/// Load a preset by factory name, saved name, or path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    config_load_preset(name).map_err(|e| {
        anyhow::anyhow!("{e}. Use 'phaser presets list' to see available presets.")
    })
}

/// Print a preset's controls in table form.
pub fn print_settings(preset: &Preset) {
    let set = preset.parameter_set();
    println!("  Stages: {}", preset.stage_count());
    if let Some(spread) = preset.stereo_spread {
        println!("  Stereo spread: {spread}");
    }
    for param in phaser_core::PhaserParam::ALL {
        let desc = param.descriptor();
        println!(
            "  {:18} {:>10.3}{}",
            desc.name,
            set.get(param),
            desc.unit.suffix()
        );
    }
}

/// Linear amplitude to dBFS, floored at -120.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_parsing() {
        assert_eq!(
            parse_key_val("mix=0.5"),
            Ok(("mix".to_string(), "0.5".to_string()))
        );
        assert_eq!(
            parse_key_val("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert!(parse_key_val("mix").is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let args = PhaserArgs {
            preset: Some("jet".to_string()),
            param: vec![("feedback".to_string(), "-0.2".to_string())],
            stages: Some(4),
            stereo_spread: Some(0.25),
        };
        let (preset, phaser) = args.build_processor().unwrap();
        assert_eq!(preset.params.feedback, -0.2);
        assert_eq!(phaser.stages(), 4);
        assert_eq!(phaser.params().feedback(), -0.2);
        assert_eq!(phaser.stereo_spread(), 0.25);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let args = PhaserArgs {
            param: vec![("mix".to_string(), "3".to_string())],
            ..PhaserArgs::default()
        };
        assert!(args.resolve_preset().is_err());

        let args = PhaserArgs {
            stages: Some(13),
            ..PhaserArgs::default()
        };
        assert!(args.resolve_preset().is_err());

        let args = PhaserArgs {
            stereo_spread: Some(0.9),
            ..PhaserArgs::default()
        };
        assert!(args.resolve_preset().is_err());
    }

    #[test]
    fn unknown_preset_is_reported() {
        let args = PhaserArgs {
            preset: Some("no_such_preset_4242".to_string()),
            ..PhaserArgs::default()
        };
        let err = args.resolve_preset().unwrap_err();
        assert!(err.to_string().contains("presets list"));
    }

    #[test]
    fn db_conversion() {
        assert_eq!(linear_to_db(0.0), -120.0);
        assert!(linear_to_db(1.0).abs() < 1e-6);
        assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
    }
}
