//! Fundamental types for the DAO workspace.
//!
//! This crate defines the primitives shared by every other crate:
//! account addresses, proposal titles, token amounts and timestamps.

pub mod address;
pub mod amount;
pub mod error;
pub mod time;
pub mod title;

pub use address::Address;
pub use amount::TokenAmount;
pub use error::DaoError;
pub use time::Timestamp;
pub use title::Title;
