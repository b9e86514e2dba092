//! Integration and adversarial test suite for Weir.
//!
//! This crate drives the full ledger stack (vault, stake registry, shadow
//! store) through realistic member lifecycles and adversarial op sequences.
//! All accounting invariants are verified under randomized inputs.

pub mod helpers;
