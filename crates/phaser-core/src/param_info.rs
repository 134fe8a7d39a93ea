//! Parameter metadata for discoverable controls.
//!
//! Each control of the phaser is described by a [`ParamDescriptor`]: a
//! stable string id (used by presets and the CLI), display names, unit,
//! range, default, and the curve used to map it onto a normalized \[0, 1\]
//! knob position.
//!
//! # no_std Support
//!
//! This module is fully `no_std` compatible with no heap allocations required.

/// How a control maps onto a knob's travel.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping, for frequencies. Requires `min > 0`.
    Logarithmic,
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz (Hz) - LFO rate and centre frequency.
    Hertz,
    /// No unit - for dimensionless amounts such as depth, feedback, and mix.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use phaser_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}

/// Static description of one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Stable id for presets and automation (e.g. `"centreFrequency"`).
    ///
    /// Once published, an id must never change.
    pub string_id: &'static str,

    /// Full parameter name for display (e.g. "Centre Frequency").
    pub name: &'static str,

    /// Short name, max 8 characters, for narrow displays.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value used on construction and when a NaN is supplied.
    pub default: f32,

    /// Normalization curve.
    pub scale: ParamScale,
}

impl ParamDescriptor {
    /// Clamp a value into range. NaN becomes the default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use phaser_core::PhaserParam;
    ///
    /// let mix = PhaserParam::Mix.descriptor();
    /// assert_eq!(mix.clamp(2.0), 1.0);
    /// assert_eq!(mix.clamp(-1.0), 0.0);
    /// assert_eq!(mix.clamp(f32::NAN), mix.default);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Whether `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Knob position of `value` in \[0, 1\], following [`scale`](Self::scale).
    ///
    /// The value is clamped first.
    ///
    /// ```rust
    /// use phaser_core::PhaserParam;
    ///
    /// let feedback = PhaserParam::Feedback.descriptor();
    /// assert_eq!(feedback.normalize(0.0), 0.5);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let value = self.clamp(value);
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: ParamDescriptor = ParamDescriptor {
        string_id: "freq",
        name: "Frequency",
        short_name: "Freq",
        unit: ParamUnit::Hertz,
        min: 10.0,
        max: 1000.0,
        default: 100.0,
        scale: ParamScale::Logarithmic,
    };

    const LIN: ParamDescriptor = ParamDescriptor {
        string_id: "amount",
        name: "Amount",
        short_name: "Amt",
        unit: ParamUnit::None,
        min: -1.0,
        max: 1.0,
        default: 0.0,
        scale: ParamScale::Linear,
    };

    #[test]
    fn linear_normalization() {
        assert_eq!(LIN.normalize(-1.0), 0.0);
        assert_eq!(LIN.normalize(0.0), 0.5);
        assert_eq!(LIN.normalize(1.0), 1.0);
        assert_eq!(LIN.normalize(7.0), 1.0);
    }

    #[test]
    fn log_normalization() {
        assert!((LOG.normalize(100.0) - 0.5).abs() < 1e-6);
        assert!((LOG.normalize(1000.0) - 1.0).abs() < 1e-6);
        assert_eq!(LOG.normalize(1.0), 0.0);
    }

    #[test]
    fn contains_and_clamp() {
        assert!(LIN.contains(0.5));
        assert!(!LIN.contains(1.5));
        assert_eq!(LIN.clamp(-3.0), -1.0);
        assert_eq!(LOG.clamp(f32::NAN), 100.0);
    }
}
