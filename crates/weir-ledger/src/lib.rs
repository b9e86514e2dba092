//! # weir-ledger
//! Shadow-balance reward accounting for staking pools.
//!
//! Implements proportional reward distribution in O(1) per operation:
//! rewards deposited to a pool's vault implicitly belong to all members in
//! proportion to stake, and a per-member shadow offset records what each
//! member has already withdrawn or never earned. No per-member state is
//! touched when rewards arrive.

pub mod ledger;

pub use ledger::ShadowLedger;
