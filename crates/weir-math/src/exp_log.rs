//! Natural logarithm and exponential in base-2^60 fixed point.
//!
//! Both functions decompose their argument against a table of precomputed
//! negative powers of e, then finish with a short Taylor series on the
//! small residual. Only integer multiply, divide, and shift are used, so
//! results are bit-for-bit reproducible on any build. Independent parties
//! verifying the same payout must reach the same number.
//!
//! `ln` accepts `(0, ONE]` and returns a non-positive result; `exp` accepts
//! non-positive inputs and saturates to 0 below [`EXP_INPUT_MIN`], where the
//! true value underflows one raw unit anyway.

use crate::error::MathError;
use crate::fixed::{div, mul, ONE};

/// Inputs below this saturate [`exp`] to zero.
///
/// `e^-64` is about 1.6e-28; under 2^60 scaling everything past `e^-42` is
/// already below one raw unit, so the clamp loses nothing representable.
pub const EXP_INPUT_MIN: i128 = -64 * ONE;

/// Taylor terms applied to the `ln` residual, `z` in `(-1/4, 0]`.
const LN_TAYLOR_TERMS: i128 = 16;

/// Taylor terms applied to the `exp` residual, `z` in `[-1/8, 0]`.
const EXP_TAYLOR_TERMS: i128 = 20;

/// Rungs of the table walked by `ln` (down to `e^-1/4`); `exp` walks all
/// nine, including the final `e^-1/8` rung.
const LN_SEGMENT_COUNT: usize = 8;

/// Precomputed `(k, e^-k)` rungs in fixed point, largest exponent first.
///
/// The `k` column holds exact powers of two times [`ONE`]; the `e^-k`
/// column is rounded to the nearest raw unit. Greedy decomposition against
/// these rungs brings any argument's residual within one quarter (for `ln`)
/// or one eighth (for `exp`) of zero before the series runs.
const E_NEG_SEGMENTS: [(i128, i128); 9] = [
    (36_893_488_147_419_103_232, 14_601),                    // e^-32  = 1.2664e-14
    (18_446_744_073_709_551_616, 129_744_222_959),           // e^-16  = 1.1254e-7
    (9_223_372_036_854_775_808, 386_762_077_700_731),        // e^-8   = 0.0003354626
    (4_611_686_018_427_387_904, 21_116_493_945_435_090),     // e^-4   = 0.0183156389
    (2_305_843_009_213_693_952, 156_030_958_375_549_300),    // e^-2   = 0.1353352832
    (1_152_921_504_606_846_976, 424_136_118_829_305_330),    // e^-1   = 0.3678794412
    (576_460_752_303_423_488, 699_282_240_786_072_831),      // e^-1/2 = 0.6065306597
    (288_230_376_151_711_744, 897_896_170_607_674_740),      // e^-1/4 = 0.7788007831
    (144_115_188_075_855_872, 1_017_449_656_738_713_796),    // e^-1/8 = 0.8824969026
];

/// Natural logarithm of `x`, for `0 < x <= ONE`.
///
/// Divides `x` by each rung constant it fits under, accumulating the rung
/// exponents, which leaves the residual in `(e^-1/4, 1]`. A 16-term Taylor
/// series of `ln(1 + z)` finishes the job. The result is always
/// non-positive on the supported domain.
///
/// # Errors
/// Returns [`MathError::LnDomain`] outside `(0, ONE]`. A domain hit is a
/// contract violation, not a runtime condition: callers are expected to
/// range-check before invoking.
pub fn ln(x: i128) -> Result<i128, MathError> {
    if x <= 0 || x > ONE {
        return Err(MathError::LnDomain(x));
    }
    if x == ONE {
        return Ok(0);
    }

    let mut residual = x;
    let mut power = 0_i128;
    for &(k, e_neg_k) in &E_NEG_SEGMENTS[..LN_SEGMENT_COUNT] {
        if residual <= e_neg_k {
            residual = div(residual, e_neg_k)?;
            power += k;
        }
    }

    // ln(1 + z) = z - z^2/2 + z^3/3 - ...  with z in (-1/4, 0]
    let z = residual - ONE;
    let mut term = z;
    let mut taylor = z;
    for n in 2..=LN_TAYLOR_TERMS {
        term = mul(term, z)?;
        let t = term / n;
        if n % 2 == 0 {
            taylor -= t;
        } else {
            taylor += t;
        }
    }

    Ok(taylor - power)
}

/// Exponential of `x`, for `x <= 0`.
///
/// Subtracts rung exponents from `-x` while multiplying the accumulator by
/// the matching `e^-k` constants, leaving a residual in `[0, 1/8]`, then
/// multiplies in a 20-term Taylor series of `e^z`. The result always lies
/// in `[0, ONE]`.
///
/// Inputs below [`EXP_INPUT_MIN`] return 0 (saturation, not an error).
///
/// # Errors
/// Returns [`MathError::ExpDomain`] for positive `x`.
pub fn exp(x: i128) -> Result<i128, MathError> {
    if x > 0 {
        return Err(MathError::ExpDomain(x));
    }
    if x == 0 {
        return Ok(ONE);
    }
    if x < EXP_INPUT_MIN {
        return Ok(0);
    }

    let mut remaining = -x;
    let mut acc = ONE;
    for &(k, e_neg_k) in &E_NEG_SEGMENTS {
        if remaining >= k {
            remaining -= k;
            acc = mul(acc, e_neg_k)?;
        }
    }

    // e^z = 1 + z + z^2/2! + z^3/3! + ...  with z in [-1/8, 0]
    let z = -remaining;
    let mut term = ONE;
    let mut taylor = ONE;
    for n in 1..=EXP_TAYLOR_TERMS {
        term = mul(term, z)?;
        term /= n;
        if term == 0 {
            break;
        }
        taylor += term;
    }

    mul(acc, taylor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Tolerance for comparisons against independently computed true
    /// values: 2^20 raw units, about 9.1e-13 of ONE.
    const TOL: i128 = 1 << 20;

    fn assert_close(got: i128, want: i128) {
        let diff = (got - want).abs();
        assert!(diff < TOL, "got {got}, want {want}, diff {diff}");
    }

    // --- segment table ---

    #[test]
    fn table_exponents_halve() {
        for w in E_NEG_SEGMENTS.windows(2) {
            assert_eq!(w[0].0, 2 * w[1].0, "k column must halve each rung");
        }
    }

    #[test]
    fn table_constants_increase() {
        for w in E_NEG_SEGMENTS.windows(2) {
            assert!(w[0].1 < w[1].1, "e^-k column must grow as k shrinks");
        }
    }

    #[test]
    fn table_constants_within_unit_interval() {
        for &(k, e_neg_k) in &E_NEG_SEGMENTS {
            assert!(k > 0);
            assert!(e_neg_k > 0 && e_neg_k < ONE, "rung {k} out of range");
        }
    }

    // --- ln ---

    #[test]
    fn ln_of_one_is_zero() {
        assert_eq!(ln(ONE).unwrap(), 0);
    }

    #[test]
    fn ln_domain_violations() {
        assert_eq!(ln(0), Err(MathError::LnDomain(0)));
        assert_eq!(ln(-1), Err(MathError::LnDomain(-1)));
        assert_eq!(ln(ONE + 1), Err(MathError::LnDomain(ONE + 1)));
        assert_eq!(ln(i128::MIN), Err(MathError::LnDomain(i128::MIN)));
    }

    #[test]
    fn ln_rung_constants_exact() {
        // Each table rung must invert exactly: ln(e^-k) == -k.
        for &(k, e_neg_k) in &E_NEG_SEGMENTS[..LN_SEGMENT_COUNT] {
            assert_eq!(ln(e_neg_k).unwrap(), -k, "rung {k}");
        }
    }

    #[test]
    fn ln_of_half() {
        // -ln(2) * 2^60
        assert_close(ln(ONE / 2).unwrap(), -799_144_290_325_165_978);
    }

    #[test]
    fn ln_of_three_quarters() {
        assert_close(ln(3 * ONE / 4).unwrap(), -331_674_847_819_523_230);
    }

    #[test]
    fn ln_of_tenth() {
        assert_close(ln(ONE / 10).unwrap(), -2_654_699_869_899_991_819);
    }

    #[test]
    fn ln_of_hundredth() {
        assert_close(ln(ONE / 100).unwrap(), -5_309_399_739_799_983_703);
    }

    #[test]
    fn ln_just_below_one() {
        assert_eq!(ln(ONE - 1).unwrap(), -1);
    }

    #[test]
    fn ln_smallest_input() {
        // ln(2^-60) = -41.588...; deep-rung quantization shifts the low
        // digits, so assert the bracket rather than a tight tolerance.
        let v = ln(1).unwrap();
        assert!(v > -42 * ONE && v < -41 * ONE, "ln(1 raw) = {v}");
    }

    #[test]
    fn ln_monotonic_on_grid() {
        let grid = [
            ONE / 1000,
            ONE / 100,
            ONE / 10,
            ONE / 4,
            ONE / 2,
            3 * ONE / 4,
            9 * ONE / 10,
            ONE,
        ];
        let values: Vec<i128> = grid.iter().map(|&x| ln(x).unwrap()).collect();
        for w in values.windows(2) {
            assert!(w[0] < w[1], "ln not increasing: {} >= {}", w[0], w[1]);
        }
    }

    // --- exp ---

    #[test]
    fn exp_of_zero_is_one() {
        assert_eq!(exp(0).unwrap(), ONE);
    }

    #[test]
    fn exp_positive_is_domain_error() {
        assert_eq!(exp(1), Err(MathError::ExpDomain(1)));
        assert_eq!(exp(ONE), Err(MathError::ExpDomain(ONE)));
    }

    #[test]
    fn exp_rung_constants_exact() {
        // Single-rung decompositions must reproduce the table verbatim.
        for &(k, e_neg_k) in &E_NEG_SEGMENTS {
            assert_eq!(exp(-k).unwrap(), e_neg_k, "rung {k}");
        }
    }

    #[test]
    fn exp_of_minus_one_raw() {
        // e^(-2^-60) rounds down to just under ONE
        assert_eq!(exp(-1).unwrap(), ONE - 1);
    }

    #[test]
    fn exp_of_three_halves() {
        // e^-1.5 * 2^60
        assert_close(exp(-3 * ONE / 2).unwrap(), 257_251_559_961_494_444);
    }

    #[test]
    fn exp_of_ten() {
        assert_close(exp(-10 * ONE).unwrap(), 52_342_555_330_809);
    }

    #[test]
    fn exp_of_hundredth() {
        assert_close(exp(-(ONE / 100)).unwrap(), 1_141_449_743_961_849_539);
    }

    #[test]
    fn exp_underflows_to_zero_naturally() {
        // Last representable magnitudes: e^-41 * 2^60 is 1.8, e^-42 is 0.66.
        assert_eq!(exp(-41 * ONE).unwrap(), 1);
        assert_eq!(exp(-42 * ONE).unwrap(), 0);
        assert_eq!(exp(-63 * ONE).unwrap(), 0);
    }

    #[test]
    fn exp_saturates_below_minimum() {
        assert_eq!(exp(EXP_INPUT_MIN).unwrap(), 0);
        assert_eq!(exp(EXP_INPUT_MIN - 1).unwrap(), 0);
        assert_eq!(exp(i128::MIN).unwrap(), 0);
    }

    #[test]
    fn exp_monotonic_on_grid() {
        let grid = [
            -40 * ONE,
            -10 * ONE,
            -2 * ONE,
            -ONE,
            -(ONE / 2),
            -(ONE / 8),
            -1,
            0,
        ];
        let values: Vec<i128> = grid.iter().map(|&x| exp(x).unwrap()).collect();
        for w in values.windows(2) {
            assert!(w[0] < w[1], "exp not increasing: {} >= {}", w[0], w[1]);
        }
    }

    // --- round trip ---

    #[test]
    fn exp_ln_round_trip_spots() {
        for x in [ONE / 7, ONE / 3, ONE / 2, 9 * ONE / 10, ONE] {
            let back = exp(ln(x).unwrap()).unwrap();
            let diff = (back - x).abs();
            assert!(diff <= (x >> 37) + 4, "round trip of {x}: {back}");
        }
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn ln_never_positive(x in 1_i128..=ONE) {
            prop_assert!(ln(x).unwrap() <= 0);
        }

        #[test]
        fn exp_bounded_by_one(x in (-70 * ONE)..=0_i128) {
            let v = exp(x).unwrap();
            prop_assert!(v >= 0 && v <= ONE, "exp({}) = {} out of range", x, v);
        }

        #[test]
        fn exp_ln_round_trip(x in (ONE / 1000)..=ONE) {
            let back = exp(ln(x).unwrap()).unwrap();
            let diff = (back - x).abs();
            prop_assert!(diff <= (x >> 37) + 4, "round trip of {} gave {}", x, back);
        }

        #[test]
        fn ln_deterministic(x in 1_i128..=ONE) {
            prop_assert_eq!(ln(x).unwrap(), ln(x).unwrap());
        }

        #[test]
        fn exp_deterministic(x in (-70 * ONE)..=0_i128) {
            prop_assert_eq!(exp(x).unwrap(), exp(x).unwrap());
        }
    }
}
