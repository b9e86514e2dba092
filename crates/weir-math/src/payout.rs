//! Proportional reward formulas over shadow-balance state.
//!
//! The ledger tracks one scalar per member (the shadow balance) and one per
//! pool (the shadow total). Everything else derives from the *lifetime
//! pool*: the member-share vault balance plus the shadow total, i.e. the
//! pot as if no one had ever withdrawn. A member's gross entitlement is
//! their stake fraction of that pot; subtracting their shadow balance
//! yields what they can actually withdraw today.
//!
//! Amounts are `u64`; intermediates widen to `u128`. Rounding always favors
//! the pool: payout divisions floor, the join buy-in ceils, so no sequence
//! of payouts can extract more than was deposited. A clamped shadow balance
//! can leave the summed claims a unit or two above the vault until rewards
//! catch up; the vault debit bounds every actual payout.

use crate::error::MathError;

/// The pot as if nothing had ever been withdrawn: vault balance plus
/// shadow total. Widened to `u128` since the sum can exceed `u64`.
pub fn lifetime_pool(member_share_balance: u64, total_shadow: u64) -> u128 {
    member_share_balance as u128 + total_shadow as u128
}

/// Gross lifetime entitlement of a stake position:
/// `floor(stake * (balance + total_shadow) / total_stake)`.
///
/// A pool with no delegated stake entitles nobody to anything, so
/// `total_stake == 0` returns 0 rather than dividing by zero.
///
/// # Errors
/// Returns [`MathError::ArithmeticOverflow`] if the widened product leaves
/// `u128` or the quotient does not narrow back to `u64`.
pub fn entitlement(
    stake: u64,
    member_share_balance: u64,
    total_shadow: u64,
    total_stake: u64,
) -> Result<u64, MathError> {
    if total_stake == 0 {
        return Ok(0);
    }
    let share = (stake as u128)
        .checked_mul(lifetime_pool(member_share_balance, total_shadow))
        .ok_or(MathError::ArithmeticOverflow)?
        / total_stake as u128;
    u64::try_from(share).map_err(|_| MathError::ArithmeticOverflow)
}

/// Currently withdrawable amount: gross entitlement minus the shadow
/// balance, clamped at zero.
///
/// The clamp covers transient states where a fresh buy-in rounded the
/// shadow balance one unit above the entitlement.
pub fn real_balance(
    stake: u64,
    member_share_balance: u64,
    total_shadow: u64,
    total_stake: u64,
    shadow: u64,
) -> Result<u64, MathError> {
    let gross = entitlement(stake, member_share_balance, total_shadow, total_stake)?;
    Ok(gross.saturating_sub(shadow))
}

/// Shadow increment charged to a joining stake:
/// `ceil(stake_to_add * (balance + total_shadow) / prior_total_stake)`.
///
/// Derived from requiring every existing member's withdrawable balance to
/// be unchanged by the join. The ceiling puts the division remainder on
/// the joiner, so existing members can only gain dust, and an immediate
/// full exit pays the joiner exactly zero.
///
/// The first delegation into an empty pool (`prior_total_stake == 0`) pays
/// no buy-in: with no other members the invariance constraint is vacuous,
/// and a sole member's entitlement is the whole pot for any offset.
pub fn join_buy_in(
    stake_to_add: u64,
    member_share_balance: u64,
    total_shadow: u64,
    prior_total_stake: u64,
) -> Result<u64, MathError> {
    if prior_total_stake == 0 {
        return Ok(0);
    }
    let buy_in = (stake_to_add as u128)
        .checked_mul(lifetime_pool(member_share_balance, total_shadow))
        .ok_or(MathError::ArithmeticOverflow)?
        .div_ceil(prior_total_stake as u128);
    u64::try_from(buy_in).map_err(|_| MathError::ArithmeticOverflow)
}

/// Portion of a member's shadow balance released by undelegating.
///
/// A full exit releases the entire shadow balance directly, avoiding
/// rounding drift from a partial-then-final split. A partial exit releases
/// `floor(shadow * stake_to_remove / member_total_stake)`.
///
/// # Errors
/// Returns [`MathError::DivisionByZero`] for a partial exit from a member
/// with no recorded stake; the ledger rejects that case before calling.
pub fn leave_shadow_release(
    shadow: u64,
    stake_to_remove: u64,
    member_total_stake: u64,
) -> Result<u64, MathError> {
    if stake_to_remove == member_total_stake {
        return Ok(shadow);
    }
    if member_total_stake == 0 {
        return Err(MathError::DivisionByZero);
    }
    // Both factors are u64, so the product fits u128.
    let released = (shadow as u128) * (stake_to_remove as u128) / (member_total_stake as u128);
    u64::try_from(released).map_err(|_| MathError::ArithmeticOverflow)
}

/// Real amount paid out for the undelegated stake: the entitlement of the
/// departing fraction minus the shadow released with it, clamped at zero.
///
/// This is [`real_balance`] evaluated for the departing slice against its
/// released shadow.
pub fn leave_payout(
    stake_to_remove: u64,
    member_share_balance: u64,
    total_shadow: u64,
    total_stake: u64,
    shadow_release: u64,
) -> Result<u64, MathError> {
    real_balance(
        stake_to_remove,
        member_share_balance,
        total_shadow,
        total_stake,
        shadow_release,
    )
}
