//! Preset file format and operations.

use phaser_core::{DEFAULT_STAGES, ParameterSet, PhaserParam, PhaserProcessor};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PresetError;

/// A named phaser setting stored as TOML.
///
/// Values are kept exactly as written so that [`validate_preset`](crate::validate_preset)
/// can report anything out of range; [`Preset::parameter_set`] clamps them.
///
/// # TOML Format
///
/// ```toml
/// name = "Slow Sweep"
/// description = "Wide, slow sweep with gentle feedback"
/// stages = 6
/// stereo_spread = 0.25
///
/// [params]
/// rate = 0.3
/// depth = 0.9
/// centre_frequency = 600.0
/// feedback = 0.4
/// mix = 0.5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Number of all-pass stages; the processor default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<usize>,

    /// Per-channel LFO phase offset in cycles; one shared sweep when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stereo_spread: Option<f32>,

    /// Control values. Missing entries take their defaults.
    #[serde(default)]
    pub params: PresetParams,
}

/// The `[params]` table of a preset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresetParams {
    /// LFO rate in Hz.
    pub rate: f32,
    /// Sweep depth.
    pub depth: f32,
    /// Centre of the sweep in Hz.
    #[serde(alias = "center_frequency", alias = "centreFrequency")]
    pub centre_frequency: f32,
    /// Feedback gain.
    pub feedback: f32,
    /// Wet/dry blend.
    pub mix: f32,
}

impl PresetParams {
    /// Raw value of `param`.
    pub fn get(&self, param: PhaserParam) -> f32 {
        match param {
            PhaserParam::Rate => self.rate,
            PhaserParam::Depth => self.depth,
            PhaserParam::CentreFrequency => self.centre_frequency,
            PhaserParam::Feedback => self.feedback,
            PhaserParam::Mix => self.mix,
        }
    }

    /// Store `value` for `param` without clamping.
    pub fn set(&mut self, param: PhaserParam, value: f32) {
        let slot = match param {
            PhaserParam::Rate => &mut self.rate,
            PhaserParam::Depth => &mut self.depth,
            PhaserParam::CentreFrequency => &mut self.centre_frequency,
            PhaserParam::Feedback => &mut self.feedback,
            PhaserParam::Mix => &mut self.mix,
        };
        *slot = value;
    }
}

impl From<&ParameterSet> for PresetParams {
    fn from(set: &ParameterSet) -> Self {
        Self {
            rate: set.rate(),
            depth: set.depth(),
            centre_frequency: set.centre_frequency(),
            feedback: set.feedback(),
            mix: set.mix(),
        }
    }
}

impl Default for PresetParams {
    fn default() -> Self {
        Self::from(&ParameterSet::default())
    }
}

impl Preset {
    /// Create a preset holding the default controls.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            stages: None,
            stereo_spread: None,
            params: PresetParams::default(),
        }
    }

    /// Capture `set` under `name`.
    pub fn from_parameter_set(name: impl Into<String>, set: &ParameterSet) -> Self {
        Self::new(name).with_params(set)
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the stage count.
    pub fn with_stages(mut self, stages: usize) -> Self {
        self.stages = Some(stages);
        self
    }

    /// Set the per-channel sweep offset.
    pub fn with_stereo_spread(mut self, spread: f32) -> Self {
        self.stereo_spread = Some(spread);
        self
    }

    /// Replace all control values.
    pub fn with_params(mut self, set: &ParameterSet) -> Self {
        self.params = PresetParams::from(set);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PresetError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PresetError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| PresetError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| PresetError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, PresetError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Stage count to build, falling back to [`DEFAULT_STAGES`].
    pub fn stage_count(&self) -> usize {
        self.stages.unwrap_or(DEFAULT_STAGES)
    }

    /// Control values clamped into their ranges.
    pub fn parameter_set(&self) -> ParameterSet {
        let mut set = ParameterSet::default();
        for param in PhaserParam::ALL {
            set.set(param, self.params.get(param));
        }
        set
    }

    /// Set one control by id (`"rate"`, `"centre_frequency"`, ...).
    ///
    /// The value is stored as given; range problems surface in validation.
    pub fn set_param(&mut self, id: &str, value: f32) -> Result<(), PresetError> {
        let param =
            PhaserParam::from_id(id).ok_or_else(|| PresetError::UnknownParameter(id.to_string()))?;
        self.params.set(param, value);
        Ok(())
    }

    /// Build a processor with this preset's stage count, stereo spread and
    /// controls.
    pub fn build_processor(&self) -> Result<PhaserProcessor, PresetError> {
        let mut processor = PhaserProcessor::new(self.stage_count())?;
        processor.set_parameters(&self.parameter_set());
        processor.set_stereo_spread(self.stereo_spread.unwrap_or(0.0));
        Ok(processor)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_new() {
        let preset = Preset::new("Test Preset");
        assert_eq!(preset.name, "Test Preset");
        assert!(preset.description.is_none());
        assert_eq!(preset.stage_count(), DEFAULT_STAGES);
        assert_eq!(preset.parameter_set(), ParameterSet::default());
    }

    #[test]
    fn test_parse_full_preset() {
        let toml = r#"
name = "Slow Sweep"
description = "Wide and slow"
stages = 8

[params]
rate = 0.3
depth = 0.9
centre_frequency = 600.0
feedback = 0.4
mix = 0.5
"#;
        let preset = Preset::from_toml(toml).unwrap();
        assert_eq!(preset.name, "Slow Sweep");
        assert_eq!(preset.description.as_deref(), Some("Wide and slow"));
        assert_eq!(preset.stage_count(), 8);
        assert_eq!(preset.params.rate, 0.3);
        assert_eq!(preset.params.centre_frequency, 600.0);
    }

    #[test]
    fn test_missing_params_take_defaults() {
        let preset = Preset::from_toml("name = \"Sparse\"\n[params]\ndepth = 0.7\n").unwrap();
        let defaults = ParameterSet::default();
        assert_eq!(preset.params.depth, 0.7);
        assert_eq!(preset.params.rate, defaults.rate());
        assert_eq!(preset.params.mix, defaults.mix());

        let bare = Preset::from_toml("name = \"Bare\"").unwrap();
        assert_eq!(bare.params, PresetParams::default());
    }

    #[test]
    fn test_american_spelling_accepted() {
        let preset =
            Preset::from_toml("name = \"US\"\n[params]\ncenter_frequency = 250.0\n").unwrap();
        assert_eq!(preset.params.centre_frequency, 250.0);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut set = ParameterSet::default();
        set.set_rate(2.5);
        set.set_depth(0.6);
        set.set_centre_frequency(320.0);
        set.set_feedback(-0.7);
        set.set_mix(0.25);
        let preset = Preset::from_parameter_set("Round Trip", &set)
            .with_description("round trip")
            .with_stages(4)
            .with_stereo_spread(0.25);

        let parsed = Preset::from_toml(&preset.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, preset);
        assert_eq!(parsed.parameter_set(), set);
    }

    #[test]
    fn test_parameter_set_clamps() {
        let mut preset = Preset::new("Hot");
        preset.params.mix = 3.0;
        preset.params.feedback = -9.0;
        let set = preset.parameter_set();
        assert_eq!(set.mix(), 1.0);
        assert_eq!(set.feedback(), -1.0);
    }

    #[test]
    fn test_set_param_by_id() {
        let mut preset = Preset::new("Edit");
        preset.set_param("centreFrequency", 90.0).unwrap();
        preset.set_param("MIX", 0.1).unwrap();
        assert_eq!(preset.params.centre_frequency, 90.0);
        assert_eq!(preset.params.mix, 0.1);
        assert!(matches!(
            preset.set_param("resonance", 1.0),
            Err(PresetError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_build_processor() {
        let mut preset = Preset::new("Build").with_stages(10);
        preset.params.depth = 0.5;
        let processor = preset.build_processor().unwrap();
        assert_eq!(processor.stages(), 10);
        assert_eq!(processor.params().depth(), 0.5);

        let bad = Preset::new("Bad").with_stages(0);
        assert!(matches!(
            bad.build_processor(),
            Err(PresetError::Processor(_))
        ));
    }

    #[test]
    fn test_stereo_spread_reaches_processor() {
        let preset = Preset::from_toml("name = \"Wide\"\nstereo_spread = 0.25\n").unwrap();
        assert_eq!(preset.stereo_spread, Some(0.25));
        assert_eq!(preset.build_processor().unwrap().stereo_spread(), 0.25);

        let narrow = Preset::new("Narrow");
        assert!(!narrow.to_toml().unwrap().contains("stereo_spread"));
        assert_eq!(narrow.build_processor().unwrap().stereo_spread(), 0.0);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Preset::from_toml("name = "),
            Err(PresetError::TomlParse(_))
        ));
    }
}
