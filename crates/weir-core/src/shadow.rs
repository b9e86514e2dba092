//! Shadow offset storage interface and in-memory implementation.
//!
//! Provides the [`ShadowStore`] trait for per-member shadow offsets and
//! per-pool totals. The [`MemoryShadowStore`] is suitable for testing;
//! production hosts back the trait with their own persistence.
//!
//! Every mutation keeps the pool total equal to the sum of its member
//! offsets: [`credit`](ShadowStore::credit) and
//! [`debit`](ShadowStore::debit) always move both together, and fail
//! without changing either.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, WeirError};
use crate::types::{MemberId, PoolId};

/// Storage for shadow offsets.
///
/// A member's shadow offset records how much of the pool's lifetime
/// member-share rewards the member has no claim on (withdrawn already, or
/// accrued before they joined). Reads of unknown pools or members return
/// zero.
pub trait ShadowStore: Send + Sync {
    /// Shadow offset of `member` in `pool`. Zero if unknown.
    fn shadow(&self, pool: &PoolId, member: &MemberId) -> Result<u64, WeirError>;

    /// Sum of all member shadow offsets in `pool`. Zero if unknown.
    fn total_shadow(&self, pool: &PoolId) -> Result<u64, WeirError>;

    /// Increase `member`'s shadow offset and the pool total by `amount`.
    ///
    /// Crediting zero is a no-op. Fails without mutating if either the
    /// member offset or the pool total would overflow.
    fn credit(&mut self, pool: &PoolId, member: &MemberId, amount: u64) -> Result<(), WeirError>;

    /// Decrease `member`'s shadow offset and the pool total by `amount`.
    ///
    /// Debiting zero is a no-op. Fails without mutating if the member's
    /// offset holds less than `amount`.
    fn debit(&mut self, pool: &PoolId, member: &MemberId, amount: u64) -> Result<(), WeirError>;

    /// All `(member, shadow)` pairs recorded for `pool`.
    ///
    /// Used for audits and migrations. Default implementation returns
    /// an empty vec (override where enumeration is available).
    fn member_shadows(&self, pool: &PoolId) -> Result<Vec<(MemberId, u64)>, WeirError> {
        let _ = pool;
        Ok(Vec::new())
    }
}

/// Shadow offsets for a single pool.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct PoolShadow {
    /// Sum of all member offsets.
    pub total: u64,
    /// Per-member offsets. Members with a zero offset are not stored.
    pub members: HashMap<MemberId, u64>,
}

/// In-memory shadow offset storage for testing.
///
/// Stores everything in `HashMap`s with no persistence. Not thread-safe —
/// callers should wrap in a `Mutex` or `RwLock` if concurrent access is
/// needed.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct MemoryShadowStore {
    /// Pool id → shadow state. Pools with no offsets are not stored.
    pools: HashMap<PoolId, PoolShadow>,
}

impl MemoryShadowStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self { pools: HashMap::new() }
    }

    /// Number of pools with at least one recorded offset.
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Number of members with a nonzero offset in `pool`.
    pub fn member_count(&self, pool: &PoolId) -> usize {
        self.pools.get(pool).map(|p| p.members.len()).unwrap_or(0)
    }
}

impl ShadowStore for MemoryShadowStore {
    fn shadow(&self, pool: &PoolId, member: &MemberId) -> Result<u64, WeirError> {
        Ok(self
            .pools
            .get(pool)
            .and_then(|p| p.members.get(member))
            .copied()
            .unwrap_or(0))
    }

    fn total_shadow(&self, pool: &PoolId) -> Result<u64, WeirError> {
        Ok(self.pools.get(pool).map(|p| p.total).unwrap_or(0))
    }

    fn credit(&mut self, pool: &PoolId, member: &MemberId, amount: u64) -> Result<(), WeirError> {
        if amount == 0 {
            return Ok(());
        }
        let entry = self.pools.entry(*pool).or_default();
        let shadow = entry.members.get(member).copied().unwrap_or(0);
        let new_shadow = shadow
            .checked_add(amount)
            .ok_or(MathError::ArithmeticOverflow)?;
        let new_total = entry
            .total
            .checked_add(amount)
            .ok_or(MathError::ArithmeticOverflow)?;
        entry.members.insert(*member, new_shadow);
        entry.total = new_total;
        Ok(())
    }

    fn debit(&mut self, pool: &PoolId, member: &MemberId, amount: u64) -> Result<(), WeirError> {
        if amount == 0 {
            return Ok(());
        }
        let entry = self
            .pools
            .get_mut(pool)
            .ok_or(MathError::ArithmeticOverflow)?;
        let shadow = entry.members.get(member).copied().unwrap_or(0);
        let new_shadow = shadow
            .checked_sub(amount)
            .ok_or(MathError::ArithmeticOverflow)?;
        let new_total = entry
            .total
            .checked_sub(amount)
            .ok_or(MathError::ArithmeticOverflow)?;
        if new_shadow == 0 {
            entry.members.remove(member);
        } else {
            entry.members.insert(*member, new_shadow);
        }
        entry.total = new_total;
        if entry.total == 0 && entry.members.is_empty() {
            self.pools.remove(pool);
        }
        Ok(())
    }

    fn member_shadows(&self, pool: &PoolId) -> Result<Vec<(MemberId, u64)>, WeirError> {
        Ok(self
            .pools
            .get(pool)
            .map(|p| p.members.iter().map(|(m, s)| (*m, *s)).collect())
            .unwrap_or_default())
    }
}
