use rust_decimal::{Decimal, RoundingStrategy};

const HALF_HUNDREDTH: f64 = 0.005;

/// Rounds to two decimal places, half away from zero.
///
/// The value is read as a [`Decimal`] from its shortest decimal
/// representation rather than multiplied by 100, so `1.005` is exactly
/// `1.005` and rounds up to `1.01` (plain `(1.005 * 100.0).round()` gives
/// `100`).
///
/// Returns `None` for NaN, infinities, and magnitudes a [`Decimal`] cannot
/// hold (beyond about `7.9e28`).
///
/// ```
/// use temperature_heatmap::round2;
///
/// assert_eq!(round2(1.005), Some(1.01));
/// assert_eq!(round2(-1.366), Some(-1.37));
/// assert_eq!(round2(1.7e308), None);
/// ```
pub fn round2(n: f64) -> Option<f64> {
    if !n.is_finite() {
        return None;
    }
    // everything below half a hundredth rounds to zero, and would otherwise
    // need more decimal places than a Decimal carries
    if n.abs() < HALF_HUNDREDTH {
        return Some(0.0);
    }
    let exact = Decimal::from_scientific(&format!("{n:e}")).ok()?;
    // read back through the decimal text so the nearest f64 is chosen
    exact
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: f64) -> f64 {
        round2(n).unwrap()
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(r(1.005), 1.01);
        assert_eq!(r(-1.005), -1.01);
        assert_eq!(r(0.125), 0.13);
        assert_eq!(r(-0.125), -0.13);
        assert_eq!(r(0.005), 0.01);
        assert_eq!(r(-0.005), -0.01);
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(r(-1.366), -1.37);
        assert_eq!(r(8.66), 8.66);
        assert_eq!(r(0.0), 0.0);
        assert_eq!(r(12.0), 12.0);
        assert_eq!(r(1e-7), 0.0);
        assert_eq!(r(123456.789), 123456.79);
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        for x in [-0.001, -0.0] {
            let rounded = r(x);
            assert_eq!(rounded, 0.0);
            assert!(rounded.is_sign_positive(), "expected +0.0 for {x}, got {rounded:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        for x in [
            1.005, 2.675, -0.125, 8.66, 9.009999999999999, -3.3333, 1234.5678, 0.1 + 0.2,
        ] {
            assert_eq!(round2(r(x)), Some(r(x)), "round2 not idempotent for {x}");
        }
    }

    #[test]
    fn test_float_noise_is_absorbed() {
        // sums like these are not exact in binary floating point
        assert_eq!(r(8.66 + -0.1), 8.56);
        assert_eq!(r(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_non_finite_has_no_rounding() {
        assert_eq!(round2(f64::NAN), None);
        assert_eq!(round2(f64::INFINITY), None);
        assert_eq!(round2(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_huge_finite_values_are_out_of_range() {
        assert_eq!(round2(1.7e308), None);
        assert_eq!(round2(-1e30), None);
        assert_eq!(r(1e20), 1e20);
    }
}
