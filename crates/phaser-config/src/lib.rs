//! Presets for the phaser: TOML files, factory settings, and validation.
//!
//! # Features
//!
//! - **Presets**: load and save [`Preset`]s as TOML
//! - **Validation**: range-check values against the phaser's parameter table
//! - **Paths**: platform-specific user and system preset directories
//! - **Factory presets**: built-in settings that need no files
//!
//! # Example
//!
//! ```rust,no_run
//! use phaser_config::{Preset, user_presets_dir, validate_preset};
//!
//! let mut preset = Preset::load("my_sweep.toml").unwrap();
//! preset.set_param("depth", 0.8).unwrap();
//! validate_preset(&preset).unwrap();
//!
//! let phaser = preset.build_processor().unwrap();
//! assert_eq!(phaser.params().depth(), 0.8);
//! preset.save(user_presets_dir().join("deeper_sweep.toml")).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific preset paths.
pub mod paths;

/// Preset and parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::PresetError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_all_presets, list_system_presets,
    list_user_presets, preset_name_from_path, system_presets_dir, user_presets_dir,
};
pub use preset::{Preset, PresetParams};
pub use validation::{
    ValidationError, ValidationResult, parse_param_value, validate_named_param,
    validate_param_value, validate_preset, validate_stages,
};

/// Resolve a preset by factory name, then by file path or saved name.
///
/// # Errors
///
/// [`PresetError::PresetNotFound`] if nothing matches, or the error from
/// loading the file that did.
pub fn load_preset(name: &str) -> Result<Preset, PresetError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    let path = find_preset(name).ok_or_else(|| PresetError::PresetNotFound(name.to_string()))?;
    Preset::load(path)
}
