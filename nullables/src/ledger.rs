//! Nullable token ledger — a balance table for testing.

use dao_token::TokenLedger;
use dao_types::{Address, TokenAmount};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A token ledger whose balances are set directly.
///
/// `total_supply` is the sum of the current balances.
pub struct NullLedger {
    address: Address,
    balances: Mutex<HashMap<Address, TokenAmount>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::at(Address::derive(b"null-ledger"))
    }

    /// A ledger deployed at a specific address.
    pub fn at(address: Address) -> Self {
        Self {
            address,
            balances: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_balance(&self, holder: Address, balance: TokenAmount) {
        let mut balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        if balance.is_zero() {
            balances.remove(&holder);
        } else {
            balances.insert(holder, balance);
        }
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenLedger for NullLedger {
    fn address(&self) -> &Address {
        &self.address
    }

    fn balance_of(&self, holder: &Address) -> TokenAmount {
        self.balances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(holder)
            .copied()
            .unwrap_or_default()
    }

    fn total_supply(&self) -> TokenAmount {
        self.balances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .fold(TokenAmount::ZERO, |acc, b| {
                acc.checked_add(*b).unwrap_or(TokenAmount::new(u128::MAX))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balances_are_editable() {
        let ledger = NullLedger::new();
        let holder = Address::from_seed(1);
        assert!(!ledger.is_holder(&holder));
        ledger.set_balance(holder, TokenAmount::new(42));
        assert_eq!(ledger.balance_of(&holder), TokenAmount::new(42));
        assert_eq!(ledger.total_supply(), TokenAmount::new(42));
        ledger.set_balance(holder, TokenAmount::ZERO);
        assert!(!ledger.is_holder(&holder));
    }
}
