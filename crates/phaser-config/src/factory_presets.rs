//! Factory presets bundled with the phaser.
//!
//! These are always available without external files and serve as starting
//! points for user presets.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "slow_sweep",
    "jet",
    "hollow",
    "vibrato",
    "shimmer",
];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("slow_sweep", SLOW_SWEEP_PRESET),
    ("jet", JET_PRESET),
    ("hollow", HOLLOW_PRESET),
    ("vibrato", VIBRATO_PRESET),
    ("shimmer", SHIMMER_PRESET),
];

/// Initialization preset - the processor defaults.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Processor defaults: static notch, half mix"
stages = 6

[params]
rate = 1.0
depth = 0.0
centre_frequency = 1.0
feedback = 1.0
mix = 0.5
"#;

const SLOW_SWEEP_PRESET: &str = r#"
name = "Slow Sweep"
description = "Wide, slow sweep with gentle feedback"
stages = 6

[params]
rate = 0.2
depth = 0.9
centre_frequency = 400.0
feedback = 0.3
mix = 0.5
"#;

const JET_PRESET: &str = r#"
name = "Jet"
description = "Twelve stages and strong feedback for a resonant flanging sweep"
stages = 12

[params]
rate = 0.15
depth = 1.0
centre_frequency = 800.0
feedback = 0.85
mix = 0.5
"#;

const HOLLOW_PRESET: &str = r#"
name = "Hollow"
description = "Negative feedback for a hollow, vocal notch pattern"
stages = 4

[params]
rate = 0.5
depth = 0.6
centre_frequency = 250.0
feedback = -0.7
mix = 0.5
"#;

const VIBRATO_PRESET: &str = r#"
name = "Vibrato"
description = "Fully wet, fast modulation for pitch wobble"
stages = 8

[params]
rate = 6.0
depth = 0.4
centre_frequency = 600.0
feedback = 0.0
mix = 1.0
"#;

const SHIMMER_PRESET: &str = r#"
name = "Shimmer"
description = "Subtle two-stage movement, mostly dry, swept apart across channels"
stages = 2
stereo_spread = 0.25

[params]
rate = 1.5
depth = 0.5
centre_frequency = 900.0
feedback = 0.2
mix = 0.3
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use phaser_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal or display name, ignoring case.
///
/// ```rust
/// use phaser_config::get_factory_preset;
///
/// let jet = get_factory_preset("jet").unwrap();
/// assert_eq!(jet.stage_count(), 12);
/// assert!(get_factory_preset("Slow Sweep").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Internal identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` matches a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_preset;
    use phaser_core::ParameterSet;

    #[test]
    fn test_factory_presets_load() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESET_NAMES.len());

        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Init"));
        assert!(names.contains(&"Jet"));
        assert!(names.contains(&"Hollow"));
    }

    #[test]
    fn test_get_factory_preset() {
        assert_eq!(get_factory_preset("jet").unwrap().name, "Jet");
        assert_eq!(get_factory_preset("Slow Sweep").unwrap().name, "Slow Sweep");
        assert_eq!(get_factory_preset("VIBRATO").unwrap().name, "Vibrato");
        assert!(get_factory_preset("nonexistent").is_none());
    }

    #[test]
    fn test_names_table_matches_toml_table() {
        assert_eq!(factory_preset_names(), FACTORY_PRESET_NAMES.to_vec());
        assert!(is_factory_preset("shimmer"));
        assert!(is_factory_preset("Shimmer"));
        assert!(!is_factory_preset("my_custom_preset"));
    }

    #[test]
    fn test_all_factory_presets_valid() {
        for (name, toml) in FACTORY_PRESETS_TOML {
            let preset = Preset::from_toml(toml)
                .unwrap_or_else(|e| panic!("factory preset '{name}' should parse: {e}"));
            assert!(preset.description.is_some(), "'{name}' needs a description");
            assert!(preset.stages.is_some(), "'{name}' should pin its stage count");
            assert!(validate_preset(&preset).is_ok(), "'{name}' out of range");
        }
    }

    #[test]
    fn test_shimmer_spreads_channels() {
        let shimmer = get_factory_preset("shimmer").unwrap();
        assert_eq!(shimmer.stereo_spread, Some(0.25));
        assert_eq!(shimmer.build_processor().unwrap().stereo_spread(), 0.25);
    }

    #[test]
    fn test_init_matches_processor_defaults() {
        let init = get_factory_preset("init").unwrap();
        assert_eq!(init.parameter_set(), ParameterSet::default());
        assert_eq!(init.stage_count(), phaser_core::DEFAULT_STAGES);
    }
}
