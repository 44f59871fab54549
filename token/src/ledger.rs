//! Read-only view of a token ledger.

use dao_types::{Address, TokenAmount};
use std::sync::Arc;

/// The slice of a token ledger that governance depends on.
///
/// Implementations must answer from their current state: balances are read
/// at call time, not snapshotted.
pub trait TokenLedger {
    /// Address the ledger is deployed at.
    fn address(&self) -> &Address;

    fn balance_of(&self, holder: &Address) -> TokenAmount;

    fn total_supply(&self) -> TokenAmount;

    /// Whether `holder` has a nonzero balance.
    fn is_holder(&self, holder: &Address) -> bool {
        !self.balance_of(holder).is_zero()
    }
}

impl<L: TokenLedger + ?Sized> TokenLedger for Arc<L> {
    fn address(&self) -> &Address {
        (**self).address()
    }

    fn balance_of(&self, holder: &Address) -> TokenAmount {
        (**self).balance_of(holder)
    }

    fn total_supply(&self) -> TokenAmount {
        (**self).total_supply()
    }
}
