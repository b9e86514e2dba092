//! In-memory stake registry.
//!
//! Reference implementation of [`StakeRegistry`] used in tests and
//! simulations. The trait itself is read-only; the inherent
//! [`delegate`](MemoryStakeRegistry::delegate) and
//! [`undelegate`](MemoryStakeRegistry::undelegate) methods stand in for
//! the host's staking module.
//!
//! When driving a [`RewardLedger`](crate::traits::RewardLedger), apply
//! the stake change *after* the join or leave hook: the ledger expects
//! the registry to still report pre-change amounts while the hook runs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, WeirError};
use crate::traits::StakeRegistry;
use crate::types::{MemberId, PoolId};

/// Delegated stake for a single pool.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
struct PoolStakes {
    /// Sum of all member stakes.
    total: u64,
    /// Per-member stakes. Members with zero stake are not stored.
    members: HashMap<MemberId, u64>,
}

/// In-memory stake registry for testing.
///
/// Not thread-safe — callers should wrap in a `Mutex` or `RwLock` if
/// concurrent access is needed.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct MemoryStakeRegistry {
    /// Pool id → stake state. Pools with no stake are not stored.
    pools: HashMap<PoolId, PoolStakes>,
}

impl MemoryStakeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { pools: HashMap::new() }
    }

    /// Number of members with nonzero stake in `pool`.
    pub fn member_count(&self, pool: &PoolId) -> usize {
        self.pools.get(pool).map(|p| p.members.len()).unwrap_or(0)
    }

    /// Record `member` staking `amount` more into `pool`.
    pub fn delegate(
        &mut self,
        pool: &PoolId,
        member: &MemberId,
        amount: u64,
    ) -> Result<(), WeirError> {
        if amount == 0 {
            return Ok(());
        }
        let entry = self.pools.entry(*pool).or_default();
        let stake = entry.members.get(member).copied().unwrap_or(0);
        let new_stake = stake
            .checked_add(amount)
            .ok_or(MathError::ArithmeticOverflow)?;
        let new_total = entry
            .total
            .checked_add(amount)
            .ok_or(MathError::ArithmeticOverflow)?;
        entry.members.insert(*member, new_stake);
        entry.total = new_total;
        Ok(())
    }

    /// Record `member` unstaking `amount` from `pool`.
    pub fn undelegate(
        &mut self,
        pool: &PoolId,
        member: &MemberId,
        amount: u64,
    ) -> Result<(), WeirError> {
        if amount == 0 {
            return Ok(());
        }
        let entry = self
            .pools
            .get_mut(pool)
            .ok_or(MathError::ArithmeticOverflow)?;
        let stake = entry.members.get(member).copied().unwrap_or(0);
        let new_stake = stake
            .checked_sub(amount)
            .ok_or(MathError::ArithmeticOverflow)?;
        let new_total = entry
            .total
            .checked_sub(amount)
            .ok_or(MathError::ArithmeticOverflow)?;
        if new_stake == 0 {
            entry.members.remove(member);
        } else {
            entry.members.insert(*member, new_stake);
        }
        entry.total = new_total;
        if entry.total == 0 && entry.members.is_empty() {
            self.pools.remove(pool);
        }
        Ok(())
    }
}

impl StakeRegistry for MemoryStakeRegistry {
    fn delegated_stake(&self, pool: &PoolId, member: &MemberId) -> Result<u64, WeirError> {
        Ok(self
            .pools
            .get(pool)
            .and_then(|p| p.members.get(member))
            .copied()
            .unwrap_or(0))
    }

    fn total_delegated_stake(&self, pool: &PoolId) -> Result<u64, WeirError> {
        Ok(self.pools.get(pool).map(|p| p.total).unwrap_or(0))
    }
}
