//! Nullable infrastructure for deterministic testing.
//!
//! The governance core takes time and balances from outside. This crate
//! provides controllable stand-ins for both:
//! - [`NullClock`]: time that only moves when told to
//! - [`NullLedger`]: a balance table that can be edited directly
//!
//! Usage: swap these in for the real clock and token in tests.

pub mod clock;
pub mod ledger;

pub use clock::NullClock;
pub use ledger::NullLedger;
