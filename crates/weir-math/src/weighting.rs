//! Power-law weighting built on the fixed-point `ln`/`exp` pair.
//!
//! Reward-math callers raise stake-time fractions to fractional powers,
//! `fraction^exponent = exp(exponent * ln(fraction))`. Sub-unit exponents
//! damp large fractions (diminishing returns); exponents above one sharpen
//! them. This module owns the domain validation in front of `ln` and
//! `exp`, so the transcendental layer never sees out-of-range arguments
//! from correct callers.

use crate::error::MathError;
use crate::exp_log::{exp, ln};
use crate::fixed::{from_ratio, mul, ONE};

/// Largest supported weighting exponent, 3.0 in fixed point.
///
/// Keeps `exponent * ln(fraction)` inside `i128` across the whole `ln`
/// range (|ln| tops out near 41.6 * ONE for the smallest positive input).
pub const MAX_WEIGHT_EXPONENT: i128 = 3 * ONE;

/// Raise a fraction in `(0, ONE]` to a positive exponent of at most
/// [`MAX_WEIGHT_EXPONENT`].
///
/// # Errors
/// Returns [`MathError::LnDomain`] for a fraction outside `(0, ONE]` and
/// [`MathError::ExpDomain`] for an exponent outside
/// `(0, MAX_WEIGHT_EXPONENT]`.
pub fn pow_fraction(fraction: i128, exponent: i128) -> Result<i128, MathError> {
    if fraction <= 0 || fraction > ONE {
        return Err(MathError::LnDomain(fraction));
    }
    if exponent <= 0 || exponent > MAX_WEIGHT_EXPONENT {
        return Err(MathError::ExpDomain(exponent));
    }
    if fraction == ONE {
        return Ok(ONE);
    }
    let log = ln(fraction)?;
    exp(mul(exponent, log)?)
}

/// Weight of an `active / total` stake-time ratio under `exponent`.
///
/// Zero activity weighs zero; full activity weighs ONE. Ratios too small
/// to represent in fixed point also weigh zero rather than erroring, since
/// their true weight is below one raw unit.
///
/// # Errors
/// Returns [`MathError::DivisionByZero`] when `total == 0`, and the
/// [`pow_fraction`] domain errors when `active > total` or the exponent is
/// out of range.
pub fn stake_time_weight(active: u64, total: u64, exponent: i128) -> Result<i128, MathError> {
    if total == 0 {
        return Err(MathError::DivisionByZero);
    }
    if active == 0 {
        return Ok(0);
    }
    let fraction = from_ratio(active as i128, total as i128)?;
    if fraction == 0 {
        return Ok(0);
    }
    pow_fraction(fraction, exponent)
}
