//! Small numeric helpers shared by the phaser building blocks.
//!
//! All functions are allocation-free and suitable for `no_std`.

/// Flush denormal numbers to zero.
///
/// Denormal floats cost dozens of cycles per operation on most CPUs. Decaying
/// filter memories produce them constantly, so recursive state is passed
/// through this before being stored.
///
/// # Example
/// ```rust
/// use phaser_core::flush_denormal;
///
/// assert_eq!(flush_denormal(1e-30), 0.0);
/// assert_eq!(flush_denormal(0.5), 0.5);
/// ```
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals.
///
/// Computes `dry * (1 - mix) + wet * mix`. Written in this form rather than
/// `dry + (wet - dry) * mix` so that both end points are exact: `mix = 0`
/// returns `dry` and `mix = 1` returns `wet` bit for bit.
///
/// # Example
/// ```rust
/// use phaser_core::wet_dry_mix;
///
/// assert_eq!(wet_dry_mix(0.3, 0.7, 0.0), 0.3);
/// assert_eq!(wet_dry_mix(0.3, 0.7, 1.0), 0.7);
/// ```
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Map a value in \[0, 1\] onto a base-10 logarithmic range.
///
/// Inverse of [`map_from_log10`].
#[inline]
pub fn map_to_log10(normalized: f32, min: f32, max: f32) -> f32 {
    min * libm::powf(10.0, normalized * libm::log10f(max / min))
}

/// Position of `value` on a base-10 logarithmic range, clamped to \[0, 1\].
#[inline]
pub fn map_from_log10(value: f32, min: f32, max: f32) -> f32 {
    if value <= min {
        return 0.0;
    }
    (libm::log10f(value / min) / libm::log10f(max / min)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(1e-10), 1e-10);
    }

    #[test]
    fn test_wet_dry_mix_endpoints() {
        for &(dry, wet) in &[(0.25f32, -0.8f32), (-1.0, 1.0), (0.0, 0.123)] {
            assert_eq!(wet_dry_mix(dry, wet, 0.0), dry);
            assert_eq!(wet_dry_mix(dry, wet, 1.0), wet);
        }
        assert!((wet_dry_mix(1.0, 0.0, 0.5) - 0.5).abs() < 1e-7);
    }

    #[test]
    fn test_log10_mapping() {
        assert!((map_to_log10(0.0, 20.0, 20000.0) - 20.0).abs() < 1e-3);
        assert!((map_to_log10(1.0, 20.0, 20000.0) - 20000.0).abs() < 1.0);
        assert!((map_to_log10(0.5, 20.0, 20000.0) - 632.45).abs() < 0.1);

        let pos = map_from_log10(632.45, 20.0, 20000.0);
        assert!((pos - 0.5).abs() < 1e-4);
        assert_eq!(map_from_log10(5.0, 20.0, 20000.0), 0.0);
        assert_eq!(map_from_log10(50000.0, 20.0, 20000.0), 1.0);
    }
}
