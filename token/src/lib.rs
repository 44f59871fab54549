//! Token ledger for DAO governance.
//!
//! Governance only ever reads balances, through [`TokenLedger`]. The
//! concrete [`Token`] is a fixed-supply fungible token: the whole supply is
//! minted to the deployer and moves only by `transfer`.

pub mod error;
pub mod ledger;
pub mod token;

pub use error::TokenError;
pub use ledger::TokenLedger;
pub use token::{Holding, Token, DEFAULT_SUPPLY};
