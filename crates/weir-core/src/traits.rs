//! Trait interfaces for Weir reward accounting.
//!
//! These traits define the contracts between crates and toward the host:
//! - [`RewardVault`] — custody of pooled reward funds (host implements)
//! - [`StakeRegistry`] — read-only view of delegated stake (host implements)
//! - [`RewardLedger`] — member-facing reward accounting (weir-ledger implements)

use crate::error::{VaultError, WeirError};
use crate::types::{MemberId, PoolId};

/// Result of a member joining a pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinResult {
    /// Shadow offset charged to the joiner so existing entitlements are
    /// unaffected by the stake increase.
    pub buy_in: u64,
}

/// Result of a member leaving a pool (fully or partially).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaveResult {
    /// Accrued rewards paid out for the departing stake slice.
    pub payout: u64,
    /// Shadow offset released back from the member's account.
    pub shadow_released: u64,
}

/// Custody of pooled reward funds.
///
/// Each pool's funds are split into a member share (distributed
/// proportionally by stake) and an operator share (commission). The vault
/// only moves funds; it knows nothing about per-member entitlements.
/// Implemented by the host system against its own treasury.
pub trait RewardVault: Send + Sync {
    /// Balance of the pool's member share.
    fn member_share_balance(&self, pool: &PoolId) -> Result<u64, VaultError>;

    /// Balance of the pool's operator share.
    fn operator_share_balance(&self, pool: &PoolId) -> Result<u64, VaultError>;

    /// Combined balance of both shares.
    ///
    /// Default implementation sums [`member_share_balance`](Self::member_share_balance)
    /// and [`operator_share_balance`](Self::operator_share_balance).
    fn total_balance(&self, pool: &PoolId) -> Result<u64, VaultError> {
        self.member_share_balance(pool)?
            .checked_add(self.operator_share_balance(pool)?)
            .ok_or(VaultError::ArithmeticOverflow)
    }

    /// Credit `amount` to the pool's member share.
    fn deposit_member_share(&mut self, pool: &PoolId, amount: u64) -> Result<(), VaultError>;

    /// Credit `amount` to the pool's operator share.
    fn deposit_operator_share(&mut self, pool: &PoolId, amount: u64) -> Result<(), VaultError>;

    /// Debit `amount` from the pool's member share and transfer it out.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InsufficientShare`] if the member share holds less than `amount`
    fn withdraw_member_share(&mut self, pool: &PoolId, amount: u64) -> Result<(), VaultError>;

    /// Debit `amount` from the pool's operator share and transfer it out.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InsufficientShare`] if the operator share holds less than `amount`
    fn withdraw_operator_share(&mut self, pool: &PoolId, amount: u64) -> Result<(), VaultError>;
}

/// Read-only view of delegated stake.
///
/// Backed by the host's delegation records. During [`RewardLedger::on_join`]
/// and [`RewardLedger::on_leave`] the registry must still report the
/// pre-change stake amounts; the ledger derives the change from its
/// arguments. Storage failures surface as [`WeirError::Storage`].
pub trait StakeRegistry: Send + Sync {
    /// Stake delegated by `member` to `pool`. Zero if not a member.
    fn delegated_stake(&self, pool: &PoolId, member: &MemberId) -> Result<u64, WeirError>;

    /// Total stake delegated to `pool` across all members.
    fn total_delegated_stake(&self, pool: &PoolId) -> Result<u64, WeirError>;
}

/// Member-facing reward accounting for a staking pool.
///
/// Tracks each member's claim on the vault's member share using shadow
/// offsets, so reward distribution is O(1) in the number of members:
/// depositing to the vault implicitly credits everyone in proportion to
/// stake. Implemented by the shadow ledger (weir-ledger).
pub trait RewardLedger: Send + Sync {
    /// Rewards currently withdrawable by `member` from `pool`.
    ///
    /// Computed lazily from the vault balance, the member's stake, and the
    /// member's shadow offset. Zero if the pool has no stake.
    fn real_balance(&self, pool: &PoolId, member: &MemberId) -> Result<u64, WeirError>;

    /// Whether `member` could withdraw `amount` right now.
    ///
    /// Default implementation delegates to [`real_balance`](Self::real_balance).
    fn can_withdraw(
        &self,
        pool: &PoolId,
        member: &MemberId,
        amount: u64,
    ) -> Result<bool, WeirError> {
        Ok(self.real_balance(pool, member)? >= amount)
    }

    /// Withdraw exactly `amount` of accrued rewards for `member`.
    ///
    /// Reduces the member's entitlement by `amount` (shadow credit) and
    /// debits the vault's member share. Withdrawing zero is a no-op.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`](crate::error::LedgerError::InvalidAmount)
    ///   if `amount` exceeds the member's real balance
    fn withdraw(&mut self, pool: &PoolId, member: &MemberId, amount: u64)
        -> Result<(), WeirError>;

    /// Withdraw the member's entire real balance. Returns the amount paid.
    ///
    /// Idempotent: a second call pays zero.
    fn withdraw_all(&mut self, pool: &PoolId, member: &MemberId) -> Result<u64, WeirError>;

    /// Withdraw exactly `amount` from the pool's operator share.
    ///
    /// Operator funds are not shadow-tracked; this is a plain debit.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`](crate::error::LedgerError::InvalidAmount)
    ///   if `amount` exceeds the operator share balance
    fn withdraw_operator(&mut self, pool: &PoolId, amount: u64) -> Result<(), WeirError>;

    /// Drain the pool's operator share. Returns the amount paid.
    fn withdraw_all_operator(&mut self, pool: &PoolId) -> Result<u64, WeirError>;

    /// Record that `member` staked `member_stake` into `pool`.
    ///
    /// Charges a buy-in shadow offset so the join does not dilute or
    /// inflate anyone's entitlement, including the joiner's (which starts
    /// at zero). The registry must still report pre-join totals when this
    /// runs. A join into a pool with no prior stake charges no buy-in.
    fn on_join(
        &mut self,
        pool: &PoolId,
        member: &MemberId,
        member_stake: u64,
    ) -> Result<JoinResult, WeirError>;

    /// Record that `member` unstaked `unstake_amount` from `pool`, paying
    /// out rewards accrued by the departing slice.
    ///
    /// Unstaking the member's full recorded stake releases the entire
    /// shadow offset; a partial leave releases a proportional part. The
    /// registry must still report pre-leave amounts when this runs.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::StakeExceeded`](crate::error::LedgerError::StakeExceeded)
    ///   if `unstake_amount` exceeds the member's delegated stake
    fn on_leave(
        &mut self,
        pool: &PoolId,
        member: &MemberId,
        unstake_amount: u64,
    ) -> Result<LeaveResult, WeirError>;
}
