//! In-memory reward vault.
//!
//! Reference implementation of [`RewardVault`] used in tests and
//! simulations. Production hosts implement the trait against their own
//! treasury; this one just tracks balances.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::traits::RewardVault;
use crate::types::PoolId;

/// Balances of one pool's two shares.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct ShareAccount {
    /// Funds distributed proportionally among members.
    pub member: u64,
    /// Operator commission funds.
    pub operator: u64,
}

/// In-memory reward vault for testing.
///
/// Not thread-safe — callers should wrap in a `Mutex` or `RwLock` if
/// concurrent access is needed.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct MemoryRewardVault {
    /// Pool id → share balances. Pools with no funds are not stored.
    accounts: HashMap<PoolId, ShareAccount>,
}

impl MemoryRewardVault {
    /// Create a new empty vault.
    pub fn new() -> Self {
        Self { accounts: HashMap::new() }
    }

    /// Number of pools with a recorded account.
    pub fn pool_count(&self) -> usize {
        self.accounts.len()
    }
}

impl RewardVault for MemoryRewardVault {
    fn member_share_balance(&self, pool: &PoolId) -> Result<u64, VaultError> {
        Ok(self.accounts.get(pool).map(|a| a.member).unwrap_or(0))
    }

    fn operator_share_balance(&self, pool: &PoolId) -> Result<u64, VaultError> {
        Ok(self.accounts.get(pool).map(|a| a.operator).unwrap_or(0))
    }

    fn deposit_member_share(&mut self, pool: &PoolId, amount: u64) -> Result<(), VaultError> {
        if amount == 0 {
            return Ok(());
        }
        let account = self.accounts.entry(*pool).or_default();
        account.member = account
            .member
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(())
    }

    fn deposit_operator_share(&mut self, pool: &PoolId, amount: u64) -> Result<(), VaultError> {
        if amount == 0 {
            return Ok(());
        }
        let account = self.accounts.entry(*pool).or_default();
        account.operator = account
            .operator
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(())
    }

    fn withdraw_member_share(&mut self, pool: &PoolId, amount: u64) -> Result<(), VaultError> {
        if amount == 0 {
            return Ok(());
        }
        let account = self
            .accounts
            .get_mut(pool)
            .ok_or(VaultError::InsufficientShare { have: 0, need: amount })?;
        if account.member < amount {
            return Err(VaultError::InsufficientShare {
                have: account.member,
                need: amount,
            });
        }
        account.member -= amount;
        if account.member == 0 && account.operator == 0 {
            self.accounts.remove(pool);
        }
        Ok(())
    }

    fn withdraw_operator_share(&mut self, pool: &PoolId, amount: u64) -> Result<(), VaultError> {
        if amount == 0 {
            return Ok(());
        }
        let account = self
            .accounts
            .get_mut(pool)
            .ok_or(VaultError::InsufficientShare { have: 0, need: amount })?;
        if account.operator < amount {
            return Err(VaultError::InsufficientShare {
                have: account.operator,
                need: amount,
            });
        }
        account.operator -= amount;
        if account.operator == 0 && account.member == 0 {
            self.accounts.remove(pool);
        }
        Ok(())
    }
}
