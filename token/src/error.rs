//! Token-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("amount must be non-zero")]
    ZeroAmount,
}

impl TokenError {
    /// Stable machine-readable tag for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::ZeroAmount => "ZERO_AMOUNT",
        }
    }
}
