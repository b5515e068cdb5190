//! Numeric conversion helpers centralizing the crate's float/int casts.

use num_traits::cast::cast;

/// Round a f64 half away from zero and clamp it into the u32 range.
/// Negative and NaN inputs map to 0.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    cast::<f64, u32>(value.min(max).round()).unwrap_or(u32::MAX)
}

/// Widen a set count for duration math.
#[must_use]
pub fn u32_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Convert a count to f64, allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Convert raw generator bits to f64.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Floor a non-negative f64 into an index, returning 0 for NaN or negatives.
#[must_use]
pub fn floor_f64_to_usize(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    cast::<f64, usize>(value.floor()).unwrap_or(usize::MAX)
}

/// Round to two decimals so repeated bias nudges do not accumulate drift.
#[must_use]
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_goes_half_away_from_zero() {
        assert_eq!(round_f64_to_u32(2.5), 3);
        assert_eq!(round_f64_to_u32(2.4), 2);
        assert_eq!(round_f64_to_u32(69.5), 70);
    }

    #[test]
    fn rounding_clamps_out_of_range_values() {
        assert_eq!(round_f64_to_u32(f64::NAN), 0);
        assert_eq!(round_f64_to_u32(-3.0), 0);
        assert_eq!(round_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn floor_to_index_handles_edges() {
        assert_eq!(floor_f64_to_usize(3.99), 3);
        assert_eq!(floor_f64_to_usize(-0.5), 0);
        assert_eq!(floor_f64_to_usize(f64::NAN), 0);
    }

    #[test]
    fn hundredths_remove_float_noise() {
        let drifted = 1.0 + 0.05 + 0.05 + 0.05;
        assert!((round_hundredths(drifted) - 1.15).abs() < f64::EPSILON);
    }
}
