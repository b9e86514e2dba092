//! Error types for the math layer.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("arithmetic overflow")] ArithmeticOverflow,
    #[error("division by zero")] DivisionByZero,
    #[error("ln domain: {0}")] LnDomain(i128),
    #[error("exp domain: {0}")] ExpDomain(i128),
}
