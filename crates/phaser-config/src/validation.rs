//! Preset and parameter validation.
//!
//! Checks values against the ranges in [`phaser_core::PARAMS`] and the stage
//! count against [`phaser_core::MAX_STAGES`]. Everything wrong with a preset
//! is reported, not just the first problem.
//!
//! ```rust
//! use phaser_config::{Preset, validate_preset, ValidationError};
//!
//! let mut preset = Preset::new("Loud");
//! preset.params.mix = 2.0;
//! assert!(matches!(validate_preset(&preset), Err(ValidationError::OutOfRange { .. })));
//! ```

use phaser_core::{MAX_STAGES, MAX_STEREO_SPREAD, PhaserParam};
use thiserror::Error;

use crate::Preset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Id of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Parameter value is NaN or infinite.
    #[error("parameter '{0}' is not a finite number")]
    NotFinite(String),

    /// Stage count outside `1..=MAX_STAGES`.
    #[error("stage count {0} out of range [1, {MAX_STAGES}]")]
    InvalidStages(usize),

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Id of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check one value against its control's declared range.
pub fn validate_param_value(param: PhaserParam, value: f32) -> ValidationResult<()> {
    let desc = param.descriptor();
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(desc.string_id.to_string()));
    }
    if !desc.contains(value) {
        return Err(ValidationError::OutOfRange {
            param: desc.string_id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(())
}

/// Check a stage count.
pub fn validate_stages(stages: usize) -> ValidationResult<()> {
    if (1..=MAX_STAGES).contains(&stages) {
        Ok(())
    } else {
        Err(ValidationError::InvalidStages(stages))
    }
}

/// Check a per-channel sweep offset against `[0, MAX_STEREO_SPREAD]`.
pub fn validate_stereo_spread(spread: f32) -> ValidationResult<()> {
    if !spread.is_finite() {
        return Err(ValidationError::NotFinite("stereo_spread".to_string()));
    }
    if !(0.0..=MAX_STEREO_SPREAD).contains(&spread) {
        return Err(ValidationError::OutOfRange {
            param: "stereo_spread".to_string(),
            value: spread,
            min: 0.0,
            max: MAX_STEREO_SPREAD,
        });
    }
    Ok(())
}

/// Parse a `--param` style value.
///
/// Accepts plain numbers and a trailing `Hz` or `%` (percent maps to 0-1).
pub fn parse_param_value(param_name: &str, value_str: &str) -> ValidationResult<f32> {
    let s = value_str.trim();
    let (number, scale) = if let Some(v) = s.strip_suffix('%') {
        (v, 0.01)
    } else if let Some(v) = s.strip_suffix("Hz").or_else(|| s.strip_suffix("hz")) {
        (v, 1.0)
    } else {
        (s, 1.0)
    };

    number
        .trim()
        .parse::<f32>()
        .map(|v| v * scale)
        .map_err(|_| ValidationError::InvalidFormat {
            param: param_name.to_string(),
            reason: format!("cannot parse '{number}' as number"),
        })
}

/// Parse and range-check a named value, returning the control it names.
pub fn validate_named_param(name: &str, value_str: &str) -> ValidationResult<(PhaserParam, f32)> {
    let param = PhaserParam::from_id(name)
        .ok_or_else(|| ValidationError::UnknownParameter(name.to_string()))?;
    let value = parse_param_value(name, value_str)?;
    validate_param_value(param, value)?;
    Ok((param, value))
}

/// Validate every value and the stage count of a preset.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = PhaserParam::ALL
        .into_iter()
        .filter_map(|param| validate_param_value(param, preset.params.get(param)).err())
        .collect();

    if let Some(stages) = preset.stages
        && let Err(e) = validate_stages(stages)
    {
        errors.push(e);
    }
    if let Some(spread) = preset.stereo_spread
        && let Err(e) = validate_stereo_spread(spread)
    {
        errors.push(e);
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_is_valid() {
        assert!(validate_preset(&Preset::new("Default")).is_ok());
        assert!(validate_preset(&Preset::new("Max").with_stages(MAX_STAGES)).is_ok());
    }

    #[test]
    fn test_out_of_range_value() {
        let err = validate_param_value(PhaserParam::Rate, 500.0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                param: "rate".to_string(),
                value: 500.0,
                min: 0.1,
                max: 100.0,
            }
        );
        assert!(validate_param_value(PhaserParam::Feedback, -1.0).is_ok());
    }

    #[test]
    fn test_non_finite_value() {
        assert_eq!(
            validate_param_value(PhaserParam::Mix, f32::NAN),
            Err(ValidationError::NotFinite("mix".to_string()))
        );
    }

    #[test]
    fn test_stage_bounds() {
        assert!(validate_stages(0).is_err());
        assert!(validate_stages(1).is_ok());
        assert!(validate_stages(MAX_STAGES + 1).is_err());
    }

    #[test]
    fn test_all_errors_collected() {
        let mut preset = Preset::new("Broken").with_stages(40);
        preset.params.depth = 2.0;
        preset.params.centre_frequency = 0.0;

        match validate_preset(&preset) {
            Err(ValidationError::Multiple(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.contains(&ValidationError::InvalidStages(40)));
            }
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_stereo_spread_range() {
        assert!(validate_stereo_spread(0.0).is_ok());
        assert!(validate_stereo_spread(MAX_STEREO_SPREAD).is_ok());
        assert!(matches!(
            validate_stereo_spread(0.75),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(
            validate_stereo_spread(f32::NAN),
            Err(ValidationError::NotFinite("stereo_spread".to_string()))
        );

        let mut preset = Preset::new("Wide");
        preset.stereo_spread = Some(-0.1);
        assert!(validate_preset(&preset).is_err());
    }

    #[test]
    fn test_parse_param_value_formats() {
        assert_eq!(parse_param_value("rate", "0.5"), Ok(0.5));
        assert_eq!(parse_param_value("centre", "440Hz"), Ok(440.0));
        assert_eq!(parse_param_value("centre", " 440 hz "), Ok(440.0));
        assert_eq!(parse_param_value("mix", "50%"), Ok(0.5));
        assert!(matches!(
            parse_param_value("mix", "lots"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_named_param() {
        assert_eq!(
            validate_named_param("centre_frequency", "200Hz"),
            Ok((PhaserParam::CentreFrequency, 200.0))
        );
        assert_eq!(
            validate_named_param("wobble", "1"),
            Err(ValidationError::UnknownParameter("wobble".to_string()))
        );
        assert!(validate_named_param("depth", "150%").is_err());
    }

    #[test]
    fn test_multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::InvalidStages(0),
            ValidationError::NotFinite("rate".to_string()),
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: stage count 0 out of range [1, 12]; parameter 'rate' is not a finite number"
        );
    }
}
