//! # weir-math — Deterministic reward arithmetic.
//!
//! All calculations use integer arithmetic only, so every result is
//! bit-for-bit reproducible by independent parties verifying the same
//! payout.
//!
//! This crate provides the math layer under the Weir reward ledger:
//! - **Signed fixed point**: `i128` values scaled by 2^60, with
//!   overflow-checked multiply and divide.
//! - **Transcendentals**: `ln` and `exp` via precomputed negative-power-of-e
//!   segment tables plus short Taylor series on the residual.
//! - **Proportional reward formulas**: entitlement, withdrawable balance,
//!   join buy-in, and leave payout over shadow-balance state.
//! - **Power-law weighting**: `fraction^exponent` for sub-linear stake-time
//!   weights, with domain validation in front of `ln`/`exp`.

pub mod error;
pub mod exp_log;
pub mod fixed;
pub mod payout;
pub mod weighting;

pub use error::MathError;
pub use exp_log::EXP_INPUT_MIN;
pub use fixed::{ONE, SCALE_BITS};
