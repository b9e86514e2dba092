//! # weir-core
//! Foundation types and traits for Weir reward accounting.

pub mod error;
pub mod registry;
pub mod shadow;
pub mod traits;
pub mod types;
pub mod vault;
