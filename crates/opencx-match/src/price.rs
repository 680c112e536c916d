//! Conversion of a consumed quantity into its want-side settlement amount.
//!
//! `consumed × price` is evaluated exactly from the price's mantissa and
//! scale, then rounded half-to-even ([`constants::SETTLEMENT_ROUNDING`]) to an
//! integer amount. Multiplying in [`Decimal`] directly is not enough: a
//! product wider than 96 bits is rounded to 28 digits first, which can turn
//! `x.4999…` into `x.5`. Anything that does not fit in a `u64` is an
//! [`CxError::Overflow`], never a wrap.

use opencx_types::{CxError, Result, constants};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Integer amount of the wanted asset owed for `consumed` units at `price`.
///
/// # Errors
/// - [`CxError::InvalidPrice`] if `price` is negative
/// - [`CxError::Overflow`] if the rounded result does not fit in a `u64`
pub fn settle_amount(consumed: u64, price: Decimal) -> Result<u64> {
    let overflow = || CxError::Overflow { consumed, price };
    let mantissa =
        u128::try_from(price.mantissa()).map_err(|_| CxError::InvalidPrice { price })?;
    let scale = price.scale();
    let denom = 10u128.pow(scale);

    // price = int_part + frac_part / denom
    let (int_part, frac_part) = (mantissa / denom, mantissa % denom);
    let whole = u128::from(consumed)
        .checked_mul(int_part)
        .ok_or_else(overflow)?;
    let (frac_quot, frac_rem) = mul_div_rem(consumed, frac_part, denom);
    let floor = whole.checked_add(frac_quot).ok_or_else(overflow)?;

    // Round the sub-unit tail together with the floor's parity so the
    // half-even tie break sees the right neighbour.
    let parity = floor % 2;
    let tail_mantissa = i128::try_from(parity * denom + frac_rem).map_err(|_| overflow())?;
    let tail = Decimal::try_from_i128_with_scale(tail_mantissa, scale).map_err(|_| overflow())?;
    let rounded_tail = tail
        .round_dp_with_strategy(0, constants::SETTLEMENT_ROUNDING)
        .to_u128()
        .ok_or_else(overflow)?;

    let amount = (floor - parity)
        .checked_add(rounded_tail)
        .ok_or_else(overflow)?;
    u64::try_from(amount).map_err(|_| overflow())
}

/// `consumed × frac / denom` as `(quotient, remainder)`.
///
/// Requires `frac < denom <= 10^28`; `consumed` is split into 32-bit halves
/// so every intermediate stays below `2^127`.
fn mul_div_rem(consumed: u64, frac: u128, denom: u128) -> (u128, u128) {
    let hi = u128::from(consumed >> 32);
    let lo = u128::from(consumed & 0xffff_ffff);
    let hi_prod = hi * frac;
    let (hi_quot, hi_rem) = (hi_prod / denom, hi_prod % denom);
    let low = (hi_rem << 32) + lo * frac;
    ((hi_quot << 32) + low / denom, low % denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_products() {
        assert_eq!(settle_amount(100_000_000, Decimal::ONE).unwrap(), 100_000_000);
        assert_eq!(settle_amount(100_000_000, Decimal::TWO).unwrap(), 200_000_000);
        assert_eq!(settle_amount(0, Decimal::TWO).unwrap(), 0);
        // 8 * 0.25 = 2
        assert_eq!(settle_amount(8, Decimal::new(25, 2)).unwrap(), 2);
    }

    #[test]
    fn rounds_half_to_even() {
        // 5 * 0.5 = 2.5 -> 2
        assert_eq!(settle_amount(5, Decimal::new(5, 1)).unwrap(), 2);
        // 7 * 0.5 = 3.5 -> 4
        assert_eq!(settle_amount(7, Decimal::new(5, 1)).unwrap(), 4);
        // 3 * 0.9 = 2.7 -> 3
        assert_eq!(settle_amount(3, Decimal::new(9, 1)).unwrap(), 3);
        // 3 * 0.7 = 2.1 -> 2
        assert_eq!(settle_amount(3, Decimal::new(7, 1)).unwrap(), 2);
    }

    #[test]
    fn overflow_beyond_u64() {
        let err = settle_amount(u64::MAX, Decimal::TWO).unwrap_err();
        assert!(
            matches!(err, CxError::Overflow { consumed, .. } if consumed == u64::MAX),
            "Expected Overflow, got: {err:?}"
        );
    }

    #[test]
    fn overflow_at_max_price() {
        let err = settle_amount(u64::MAX, Decimal::MAX).unwrap_err();
        assert!(matches!(err, CxError::Overflow { .. }));
    }

    #[test]
    fn negative_price_rejected() {
        let err = settle_amount(10, Decimal::NEGATIVE_ONE).unwrap_err();
        assert!(matches!(err, CxError::InvalidPrice { .. }));
    }

    #[test]
    fn wide_products_round_from_exact_value() {
        // Exact product 7222222223333333335.4999…: a 28-digit rounded
        // product would read .5 and round up to the even neighbour.
        let price = Decimal::from_i128_with_scale(7_222_222_223_333_333_333_333_333_333, 28);
        assert_eq!(
            settle_amount(10_000_000_000_000_000_003, price).unwrap(),
            7_222_222_223_333_333_335
        );

        // Exact product 918367347142857143.4999…
        let price = Decimal::from_i128_with_scale(918_367_347_142_857_142_857_142_857, 28);
        assert_eq!(
            settle_amount(10_000_000_000_000_000_007, price).unwrap(),
            918_367_347_142_857_143
        );
    }

    #[test]
    fn wide_ties_round_half_to_even() {
        let half = Decimal::new(5, 1);
        // (2^63 + 1) / 2 = 2^62 + 0.5 -> 2^62
        assert_eq!(
            settle_amount(9_223_372_036_854_775_809, half).unwrap(),
            4_611_686_018_427_387_904
        );
        // (2^63 + 3) / 2 = 2^62 + 1.5 -> 2^62 + 2
        assert_eq!(
            settle_amount(9_223_372_036_854_775_811, half).unwrap(),
            4_611_686_018_427_387_906
        );
    }

    #[test]
    fn agrees_with_decimal_when_product_is_narrow() {
        for (consumed, price) in [
            (1_234_567u64, Decimal::new(123_456_789, 6)),
            (99, Decimal::new(1, 2)),
            (150, Decimal::new(3333, 4)),
            (1_000_000_007, Decimal::new(25, 1)),
        ] {
            let expected = (Decimal::from(consumed) * price)
                .round_dp_with_strategy(0, constants::SETTLEMENT_ROUNDING)
                .to_u64()
                .unwrap();
            assert_eq!(settle_amount(consumed, price).unwrap(), expected);
        }
    }

    #[test]
    fn max_amount_at_price_one() {
        assert_eq!(settle_amount(u64::MAX, Decimal::ONE).unwrap(), u64::MAX);
    }
}
