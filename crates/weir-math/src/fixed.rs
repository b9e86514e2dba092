//! Signed fixed-point arithmetic on raw `i128` values.
//!
//! A fixed-point value is a plain `i128` scaled by [`ONE`] (2^60), so the
//! representable range is roughly ±1.4e20 with 2^-60 resolution. Functions
//! here operate on the raw integers directly; nothing is wrapped in a
//! newtype, matching how the rest of the workspace does integer math.
//!
//! Every operation that can leave the `i128` range returns
//! [`MathError::ArithmeticOverflow`] instead of wrapping.

use crate::error::MathError;

/// Number of fractional bits in the fixed-point representation.
pub const SCALE_BITS: u32 = 60;

/// The fixed-point value 1.0.
///
/// # Examples
///
/// ```
/// use weir_math::fixed::{to_int, ONE};
/// assert_eq!(ONE, 1 << 60);
/// assert_eq!(to_int(ONE), 1);
/// ```
pub const ONE: i128 = 1 << SCALE_BITS;

/// Convert an integer to fixed point.
pub fn from_int(n: i128) -> Result<i128, MathError> {
    n.checked_mul(ONE).ok_or(MathError::ArithmeticOverflow)
}

/// Convert a ratio `num/den` to fixed point, truncating toward zero.
pub fn from_ratio(num: i128, den: i128) -> Result<i128, MathError> {
    if den == 0 {
        return Err(MathError::DivisionByZero);
    }
    let scaled = num.checked_mul(ONE).ok_or(MathError::ArithmeticOverflow)?;
    scaled.checked_div(den).ok_or(MathError::ArithmeticOverflow)
}

/// Convert fixed point back to an integer.
///
/// A pure arithmetic right shift: truncates toward negative infinity,
/// so `to_int(-ONE / 2) == -1`.
pub fn to_int(x: i128) -> i128 {
    x >> SCALE_BITS
}

/// Fixed-point multiply: `(a * b) / ONE`.
///
/// The raw product is formed first and shifted down, so the result floors
/// toward negative infinity.
///
/// # Errors
/// Returns [`MathError::ArithmeticOverflow`] if `a * b` does not fit `i128`.
pub fn mul(a: i128, b: i128) -> Result<i128, MathError> {
    let product = a.checked_mul(b).ok_or(MathError::ArithmeticOverflow)?;
    Ok(product >> SCALE_BITS)
}

/// Fixed-point divide: `(a * ONE) / b`, truncating toward zero.
///
/// # Errors
/// Returns [`MathError::DivisionByZero`] if `b == 0`, and
/// [`MathError::ArithmeticOverflow`] if `a * ONE` does not fit `i128`.
pub fn div(a: i128, b: i128) -> Result<i128, MathError> {
    if b == 0 {
        return Err(MathError::DivisionByZero);
    }
    let scaled = a.checked_mul(ONE).ok_or(MathError::ArithmeticOverflow)?;
    scaled.checked_div(b).ok_or(MathError::ArithmeticOverflow)
}

/// Absolute value; `i128::MIN` has no positive counterpart.
pub fn abs(x: i128) -> Result<i128, MathError> {
    x.checked_abs().ok_or(MathError::ArithmeticOverflow)
}
