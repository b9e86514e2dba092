//! The shadow-balance reward ledger.
//!
//! [`ShadowLedger`] coordinates the three collaborators: the vault holds
//! the funds, the registry knows who staked what, and the shadow store
//! holds one offset per member. Every operation validates its whole
//! effect against current state, then mutates; a failure never leaves
//! partial state behind.

use tracing::{debug, info};

use weir_core::error::{LedgerError, MathError, WeirError};
use weir_core::shadow::ShadowStore;
use weir_core::traits::{JoinResult, LeaveResult, RewardLedger, RewardVault, StakeRegistry};
use weir_core::types::{MemberId, PoolId};
use weir_math::payout;

/// Proportional reward ledger over injected collaborators.
///
/// Rewards are distributed lazily: depositing into the vault's member
/// share raises every member's entitlement at once, and the ledger only
/// materializes a member's balance when asked. Withdrawals and
/// join/leave transitions adjust shadow offsets so each member's claim
/// stays exactly their staked fraction of what accrued while staked.
///
/// # Examples
///
/// ```
/// use weir_core::registry::MemoryStakeRegistry;
/// use weir_core::shadow::MemoryShadowStore;
/// use weir_core::traits::{RewardLedger, RewardVault};
/// use weir_core::types::{MemberId, PoolId};
/// use weir_core::vault::MemoryRewardVault;
/// use weir_ledger::ShadowLedger;
///
/// let mut ledger = ShadowLedger::new(
///     MemoryRewardVault::new(),
///     MemoryStakeRegistry::new(),
///     MemoryShadowStore::new(),
/// );
/// let pool = PoolId([1; 32]);
/// let alice = MemberId([2; 32]);
///
/// ledger.on_join(&pool, &alice, 100).unwrap();
/// ledger.registry_mut().delegate(&pool, &alice, 100).unwrap();
/// ledger.vault_mut().deposit_member_share(&pool, 50).unwrap();
///
/// assert_eq!(ledger.real_balance(&pool, &alice).unwrap(), 50);
/// ```
pub struct ShadowLedger<V, R, S> {
    vault: V,
    registry: R,
    shadows: S,
}

impl<V, R, S> ShadowLedger<V, R, S>
where
    V: RewardVault,
    R: StakeRegistry,
    S: ShadowStore,
{
    /// Create a ledger over the given collaborators.
    pub fn new(vault: V, registry: R, shadows: S) -> Self {
        Self { vault, registry, shadows }
    }

    /// Read access to the vault.
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Mutable access to the vault, for reward deposits.
    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    /// Read access to the stake registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Mutable access to the stake registry.
    ///
    /// The ledger itself never mutates stake; delegation changes belong
    /// to the host. Apply them *after* the matching
    /// [`on_join`](RewardLedger::on_join) or
    /// [`on_leave`](RewardLedger::on_leave) call.
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Read access to the shadow store.
    ///
    /// Shadow offsets only change through ledger operations, which keep
    /// the per-pool total equal to the sum of member offsets.
    pub fn shadows(&self) -> &S {
        &self.shadows
    }

    /// Consume the ledger and return its collaborators.
    pub fn into_parts(self) -> (V, R, S) {
        (self.vault, self.registry, self.shadows)
    }
}

impl<V, R, S> RewardLedger for ShadowLedger<V, R, S>
where
    V: RewardVault,
    R: StakeRegistry,
    S: ShadowStore,
{
    fn real_balance(&self, pool: &PoolId, member: &MemberId) -> Result<u64, WeirError> {
        let stake = self.registry.delegated_stake(pool, member)?;
        if stake == 0 {
            return Ok(0);
        }
        let total_stake = self.registry.total_delegated_stake(pool)?;
        let balance = self.vault.member_share_balance(pool)?;
        let total_shadow = self.shadows.total_shadow(pool)?;
        let shadow = self.shadows.shadow(pool, member)?;
        Ok(payout::real_balance(stake, balance, total_shadow, total_stake, shadow)?)
    }

    fn withdraw(
        &mut self,
        pool: &PoolId,
        member: &MemberId,
        amount: u64,
    ) -> Result<(), WeirError> {
        if amount == 0 {
            return Ok(());
        }
        let available = self.real_balance(pool, member)?;
        if amount > available {
            return Err(LedgerError::InvalidAmount { requested: amount, available }.into());
        }
        let shadow = self.shadows.shadow(pool, member)?;
        let total_shadow = self.shadows.total_shadow(pool)?;
        if shadow.checked_add(amount).is_none() || total_shadow.checked_add(amount).is_none() {
            return Err(MathError::ArithmeticOverflow.into());
        }
        // Vault first; the probed shadow credit cannot fail afterwards.
        self.vault.withdraw_member_share(pool, amount)?;
        self.shadows.credit(pool, member, amount)?;
        info!(%pool, %member, amount, "withdrew member share");
        Ok(())
    }

    fn withdraw_all(&mut self, pool: &PoolId, member: &MemberId) -> Result<u64, WeirError> {
        let amount = self.real_balance(pool, member)?;
        if amount == 0 {
            return Ok(0);
        }
        self.withdraw(pool, member, amount)?;
        Ok(amount)
    }

    fn withdraw_operator(&mut self, pool: &PoolId, amount: u64) -> Result<(), WeirError> {
        if amount == 0 {
            return Ok(());
        }
        let available = self.vault.operator_share_balance(pool)?;
        if amount > available {
            return Err(LedgerError::InvalidAmount { requested: amount, available }.into());
        }
        self.vault.withdraw_operator_share(pool, amount)?;
        info!(%pool, amount, "withdrew operator share");
        Ok(())
    }

    fn withdraw_all_operator(&mut self, pool: &PoolId) -> Result<u64, WeirError> {
        let amount = self.vault.operator_share_balance(pool)?;
        if amount == 0 {
            return Ok(0);
        }
        self.vault.withdraw_operator_share(pool, amount)?;
        info!(%pool, amount, "drained operator share");
        Ok(amount)
    }

    fn on_join(
        &mut self,
        pool: &PoolId,
        member: &MemberId,
        member_stake: u64,
    ) -> Result<JoinResult, WeirError> {
        if member_stake == 0 {
            return Ok(JoinResult { buy_in: 0 });
        }
        let prior_total = self.registry.total_delegated_stake(pool)?;
        let balance = self.vault.member_share_balance(pool)?;
        let total_shadow = self.shadows.total_shadow(pool)?;
        let buy_in = payout::join_buy_in(member_stake, balance, total_shadow, prior_total)?;
        debug!(%pool, prior_total, balance, total_shadow, "computed join buy-in");
        if buy_in > 0 {
            self.shadows.credit(pool, member, buy_in)?;
        }
        info!(%pool, %member, stake = member_stake, buy_in, "member joined pool");
        Ok(JoinResult { buy_in })
    }

    fn on_leave(
        &mut self,
        pool: &PoolId,
        member: &MemberId,
        unstake_amount: u64,
    ) -> Result<LeaveResult, WeirError> {
        if unstake_amount == 0 {
            return Ok(LeaveResult { payout: 0, shadow_released: 0 });
        }
        let member_stake = self.registry.delegated_stake(pool, member)?;
        if unstake_amount > member_stake {
            return Err(LedgerError::StakeExceeded {
                requested: unstake_amount,
                delegated: member_stake,
            }
            .into());
        }
        let total_stake = self.registry.total_delegated_stake(pool)?;
        let balance = self.vault.member_share_balance(pool)?;
        let total_shadow = self.shadows.total_shadow(pool)?;
        let shadow = self.shadows.shadow(pool, member)?;

        let shadow_released = payout::leave_shadow_release(shadow, unstake_amount, member_stake)?;
        let paid = payout::leave_payout(
            unstake_amount,
            balance,
            total_shadow,
            total_stake,
            shadow_released,
        )?;
        if shadow.checked_sub(shadow_released).is_none()
            || total_shadow.checked_sub(shadow_released).is_none()
        {
            return Err(MathError::ArithmeticOverflow.into());
        }
        debug!(%pool, member_stake, total_stake, shadow_released, "computed leave release");

        // Vault first; the probed shadow debit cannot fail afterwards.
        if paid > 0 {
            self.vault.withdraw_member_share(pool, paid)?;
        }
        if shadow_released > 0 {
            self.shadows.debit(pool, member, shadow_released)?;
        }
        info!(
            %pool,
            %member,
            unstaked = unstake_amount,
            payout = paid,
            shadow_released,
            "member left pool"
        );
        Ok(LeaveResult { payout: paid, shadow_released })
    }
}
