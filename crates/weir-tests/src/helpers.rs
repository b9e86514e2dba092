//! Shared test helpers for lifecycle and integration tests.

use weir_core::registry::MemoryStakeRegistry;
use weir_core::shadow::MemoryShadowStore;
use weir_core::traits::{LeaveResult, RewardLedger, RewardVault};
use weir_core::types::{MemberId, PoolId};
use weir_core::vault::MemoryRewardVault;
use weir_ledger::ShadowLedger;

/// Ledger type backed entirely by in-memory stores.
pub type MemoryLedger = ShadowLedger<MemoryRewardVault, MemoryStakeRegistry, MemoryShadowStore>;

/// Pool id from a seed byte.
pub fn pool(seed: u8) -> PoolId {
    PoolId([seed; 32])
}

/// Member id from a seed byte.
pub fn member(seed: u8) -> MemberId {
    MemberId([seed; 32])
}

/// Fresh ledger with empty in-memory backing stores.
pub fn memory_ledger() -> MemoryLedger {
    ShadowLedger::new(
        MemoryRewardVault::new(),
        MemoryStakeRegistry::new(),
        MemoryShadowStore::new(),
    )
}

/// Join a pool and register the delegated stake, returning the buy-in charged.
pub fn join(ledger: &mut MemoryLedger, p: &PoolId, m: &MemberId, stake: u64) -> u64 {
    let result = ledger.on_join(p, m, stake).unwrap();
    ledger.registry_mut().delegate(p, m, stake).unwrap();
    result.buy_in
}

/// Remove delegated stake from a pool, settling rewards for the removed slice.
pub fn leave(ledger: &mut MemoryLedger, p: &PoolId, m: &MemberId, stake: u64) -> LeaveResult {
    let result = ledger.on_leave(p, m, stake).unwrap();
    ledger.registry_mut().undelegate(p, m, stake).unwrap();
    result
}

/// Deposit a reward into the pool's member share.
pub fn reward(ledger: &mut MemoryLedger, p: &PoolId, amount: u64) {
    ledger.vault_mut().deposit_member_share(p, amount).unwrap();
}

/// Deposit a commission into the pool's operator share.
pub fn reward_operator(ledger: &mut MemoryLedger, p: &PoolId, amount: u64) {
    ledger.vault_mut().deposit_operator_share(p, amount).unwrap();
}

/// Sum of the claimable balances of the given members.
pub fn total_claims(ledger: &MemoryLedger, p: &PoolId, members: &[MemberId]) -> u64 {
    members
        .iter()
        .map(|m| ledger.real_balance(p, m).unwrap())
        .sum()
}
