//! Error types for Weir reward accounting.
use thiserror::Error;

pub use weir_math::MathError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("insufficient share: have {have}, need {need}")] InsufficientShare { have: u64, need: u64 },
    #[error("arithmetic overflow")] ArithmeticOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid amount: requested {requested}, available {available}")] InvalidAmount { requested: u64, available: u64 },
    #[error("stake exceeded: requested {requested}, delegated {delegated}")] StakeExceeded { requested: u64, delegated: u64 },
    #[error("unauthorized: {0}")] Unauthorized(String),
}

#[derive(Error, Debug)]
pub enum WeirError {
    #[error(transparent)] Math(#[from] MathError),
    #[error(transparent)] Vault(#[from] VaultError),
    #[error(transparent)] Ledger(#[from] LedgerError),
    #[error("storage: {0}")] Storage(String),
}
