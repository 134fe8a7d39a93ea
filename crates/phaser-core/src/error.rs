//! Configuration errors.
//!
//! These can only come out of construction and [`prepare`](crate::PhaserProcessor::prepare);
//! the processing path itself has no failure modes.

/// Errors reported when a phaser is configured with unusable settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Stage count is zero or above [`MAX_STAGES`](crate::MAX_STAGES).
    InvalidStageCount(usize),
    /// Sample rate is zero, negative, or not finite.
    InvalidSampleRate(f32),
    /// Channel count is zero.
    InvalidChannelCount(usize),
    /// Maximum block size is zero.
    InvalidBlockSize(usize),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidStageCount(n) => write!(
                f,
                "invalid stage count {n} (expected 1..={})",
                crate::MAX_STAGES
            ),
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate {sr} Hz"),
            Self::InvalidChannelCount(n) => write!(f, "invalid channel count {n}"),
            Self::InvalidBlockSize(n) => write!(f, "invalid maximum block size {n}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ConfigError::InvalidStageCount(0).to_string(),
            "invalid stage count 0 (expected 1..=12)"
        );
        assert_eq!(
            ConfigError::InvalidSampleRate(0.0).to_string(),
            "invalid sample rate 0 Hz"
        );
        assert_eq!(
            ConfigError::InvalidChannelCount(0).to_string(),
            "invalid channel count 0"
        );
        assert_eq!(
            ConfigError::InvalidBlockSize(0).to_string(),
            "invalid maximum block size 0"
        );
    }
}
