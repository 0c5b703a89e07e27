//! Decimal rounding matching the precision of the hand-worked Moody sheets.
//!
//! Every derived column is rounded as soon as it is computed, and later columns
//! consume the rounded values. The cumulative sums in particular are sums of
//! already rounded entries, so when rounding happens is part of the result.

/// Significant decimal digits kept before the final integer rounding
const SIGNIFICANT_DIGITS: usize = 11;

/// Round `value` to `decimal_places` digits after the decimal point.
///
/// The scaled value is first normalized to 11 significant digits so binary
/// representation noise (`0.285 * 100. == 28.499999999999996`) does not flip
/// the final rounding. Halves round up, toward positive infinity.
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let scale = 10f64.powi(decimal_places as i32);
    let scaled = value * scale;

    // Drop representation noise past the 11th significant digit
    let scaled = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, scaled)
        .parse::<f64>()
        .unwrap_or(scaled);

    (scaled + 0.5).floor() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round_to(1.234, 2), 1.23);
        assert_eq!(round_to(1.235, 2), 1.24);
        assert_eq!(round_to(-0.5 - 1.5, 2), -2.);
        assert_eq!(round_to(0., 2), 0.);
    }

    #[test]
    fn representation_noise_does_not_flip_halves() {
        // 1.005 * 100 is 100.49999999999999 in binary
        assert_eq!(round_to(1.005, 2), 1.01);
        assert_eq!(round_to(0.285, 2), 0.29);
    }

    #[test]
    fn negative_halves_round_up() {
        assert_eq!(round_to(-2.125, 2), -2.12);
        assert_eq!(round_to(-0.005, 2), -0.);
    }

    #[test]
    fn eight_places() {
        assert_eq!(round_to(0.24 * 4.848136811076368e-6 * 4., 8), 4.65e-6);
    }

    #[test]
    fn non_finite_passes_through() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    proptest! {
        #[test]
        fn rounding_is_idempotent(x in -1.0e6f64..1.0e6, places in 0u32..9) {
            let once = round_to(x, places);
            prop_assert_eq!(round_to(once, places), once);
        }

        #[test]
        fn rounding_stays_within_half_a_unit(x in -1.0e4f64..1.0e4) {
            prop_assert!((round_to(x, 2) - x).abs() <= 0.005 + 1e-9);
        }
    }
}
