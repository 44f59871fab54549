//! In-memory fixed-supply token.

use crate::error::TokenError;
use crate::ledger::TokenLedger;
use dao_types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Supply minted at deployment unless configured otherwise.
pub const DEFAULT_SUPPLY: u64 = 1_000_000;

/// One nonzero balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub holder: Address,
    pub balance: TokenAmount,
}

/// A fungible token with a fixed total supply.
///
/// Balances sit behind a lock so a deployed token can be shared (via `Arc`)
/// with a governance registry while holders keep transferring.
pub struct Token {
    address: Address,
    total_supply: TokenAmount,
    balances: RwLock<HashMap<Address, TokenAmount>>,
}

impl Token {
    /// Deploy at `address`, minting the entire `supply` to `deployer`.
    pub fn deploy(address: Address, deployer: Address, supply: TokenAmount) -> Self {
        let mut balances = HashMap::new();
        if !supply.is_zero() {
            balances.insert(deployer, supply);
        }
        debug!(token = %address, %deployer, %supply, "token deployed");
        Self {
            address,
            total_supply: supply,
            balances: RwLock::new(balances),
        }
    }

    /// Move `amount` from `from` to `to`.
    pub fn transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        if amount.is_zero() {
            return Err(TokenError::ZeroAmount);
        }
        let mut balances = self.balances.write().unwrap_or_else(PoisonError::into_inner);
        let available = balances.get(from).copied().unwrap_or_default();
        let remaining = available
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            })?;
        if from == to {
            return Ok(());
        }
        if remaining.is_zero() {
            balances.remove(from);
        } else {
            balances.insert(*from, remaining);
        }
        // Cannot overflow: every balance is a share of the fixed supply.
        let credited = balances.entry(*to).or_default();
        *credited = *credited + amount;
        debug!(%from, %to, %amount, "transfer");
        Ok(())
    }

    /// Every account with a nonzero balance, largest first.
    pub fn holders(&self) -> Vec<Holding> {
        let balances = self.balances.read().unwrap_or_else(PoisonError::into_inner);
        let mut holdings: Vec<Holding> = balances
            .iter()
            .map(|(holder, balance)| Holding {
                holder: *holder,
                balance: *balance,
            })
            .collect();
        holdings.sort_by(|a, b| b.balance.cmp(&a.balance).then(a.holder.cmp(&b.holder)));
        holdings
    }
}

impl TokenLedger for Token {
    fn address(&self) -> &Address {
        &self.address
    }

    fn balance_of(&self, holder: &Address) -> TokenAmount {
        self.balances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(holder)
            .copied()
            .unwrap_or_default()
    }

    fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(seed: u8) -> Address {
        Address::from_seed(seed)
    }

    fn token() -> Token {
        Token::deploy(
            Address::derive(b"token"),
            account(0),
            TokenAmount::from(DEFAULT_SUPPLY),
        )
    }

    #[test]
    fn deployer_holds_entire_supply() {
        let token = token();
        assert_eq!(token.total_supply(), TokenAmount::new(1_000_000));
        assert_eq!(token.balance_of(&account(0)), TokenAmount::new(1_000_000));
        assert_eq!(token.balance_of(&account(1)), TokenAmount::ZERO);
        assert!(token.is_holder(&account(0)));
        assert!(!token.is_holder(&account(1)));
    }

    #[test]
    fn transfer_moves_balance() {
        let token = token();
        token
            .transfer(&account(0), &account(1), TokenAmount::new(13_000))
            .unwrap();
        token
            .transfer(&account(0), &account(2), TokenAmount::new(32_300))
            .unwrap();
        assert_eq!(token.balance_of(&account(0)), TokenAmount::new(954_700));
        assert_eq!(token.balance_of(&account(1)), TokenAmount::new(13_000));
        assert_eq!(token.balance_of(&account(2)), TokenAmount::new(32_300));
        assert_eq!(token.total_supply(), TokenAmount::new(1_000_000));
    }

    #[test]
    fn transfer_more_than_balance_fails() {
        let token = token();
        let err = token
            .transfer(&account(1), &account(2), TokenAmount::new(1))
            .unwrap_err();
        assert!(matches!(
            err,
            TokenError::InsufficientBalance {
                needed: 1,
                available: 0
            }
        ));
        assert_eq!(err.code(), "INSUFFICIENT_BALANCE");
    }

    #[test]
    fn zero_transfer_rejected() {
        let token = token();
        let err = token
            .transfer(&account(0), &account(1), TokenAmount::ZERO)
            .unwrap_err();
        assert!(matches!(err, TokenError::ZeroAmount));
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let token = token();
        token
            .transfer(&account(0), &account(0), TokenAmount::new(500))
            .unwrap();
        assert_eq!(token.balance_of(&account(0)), TokenAmount::new(1_000_000));
    }

    #[test]
    fn emptied_account_drops_out_of_holders() {
        let token = token();
        token
            .transfer(&account(0), &account(1), TokenAmount::new(1_000_000))
            .unwrap();
        let holders = token.holders();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].holder, account(1));
    }

    #[test]
    fn holders_sorted_by_balance() {
        let token = token();
        token
            .transfer(&account(0), &account(1), TokenAmount::new(13_000))
            .unwrap();
        token
            .transfer(&account(0), &account(2), TokenAmount::new(32_300))
            .unwrap();
        let balances: Vec<u128> = token.holders().iter().map(|h| h.balance.raw()).collect();
        assert_eq!(balances, vec![954_700, 32_300, 13_000]);
    }
}
