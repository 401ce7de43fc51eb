//! Tools - Test and Demo Collaborators
//!
//! In-memory stand-ins for the external world. `MockToken` plays the role of
//! the asset contract a ticker resolves to, with allowance-style pull/push
//! semantics: `transfer_from` moves funds from a holder into exchange
//! custody, `transfer` pushes custody funds back out.

use crate::domain::asset::{AccountId, AssetAddress};
use crate::domain::registry::{AssetGateway, GatewayError};
use parking_lot::Mutex;
use std::collections::HashMap;

/// An in-memory fungible token. Interior mutability because the registry
/// hands gateways out behind `Arc` and calls them through `&self`.
pub struct MockToken {
    address: AssetAddress,
    inner: Mutex<TokenState>,
}

#[derive(Default)]
struct TokenState {
    holdings: HashMap<AccountId, u64>,
    custody: u64,
}

impl MockToken {
    pub fn new(address: AssetAddress) -> Self {
        MockToken {
            address,
            inner: Mutex::new(TokenState::default()),
        }
    }

    /// Creates `amount` units out of thin air for `account`.
    pub fn mint(&self, account: AccountId, amount: u64) {
        let mut state = self.inner.lock();
        *state.holdings.entry(account).or_insert(0) += amount;
    }

    /// External (non-custodial) holdings of `account`.
    pub fn holdings_of(&self, account: AccountId) -> u64 {
        self.inner.lock().holdings.get(&account).copied().unwrap_or(0)
    }

    /// Units currently held in exchange custody.
    pub fn custody(&self) -> u64 {
        self.inner.lock().custody
    }
}

impl AssetGateway for MockToken {
    fn transfer_from(&self, owner: AccountId, amount: u64) -> Result<(), GatewayError> {
        let mut state = self.inner.lock();
        let held = state.holdings.get(&owner).copied().unwrap_or(0);
        if held < amount {
            return Err(GatewayError);
        }
        state.holdings.insert(owner, held - amount);
        state.custody += amount;
        Ok(())
    }

    fn transfer(&self, to: AccountId, amount: u64) -> Result<(), GatewayError> {
        let mut state = self.inner.lock();
        if state.custody < amount {
            return Err(GatewayError);
        }
        state.custody -= amount;
        *state.holdings.entry(to).or_insert(0) += amount;
        Ok(())
    }

    fn address(&self) -> AssetAddress {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_and_push_roundtrip() {
        let token = MockToken::new(AssetAddress(1));
        let holder = AccountId(5);
        token.mint(holder, 100);

        token.transfer_from(holder, 60).unwrap();
        assert_eq!(token.holdings_of(holder), 40);
        assert_eq!(token.custody(), 60);

        token.transfer(holder, 10).unwrap();
        assert_eq!(token.holdings_of(holder), 50);
        assert_eq!(token.custody(), 50);
    }

    #[test]
    fn test_transfer_from_refuses_overdraft() {
        let token = MockToken::new(AssetAddress(1));
        let holder = AccountId(5);
        token.mint(holder, 5);
        assert_eq!(token.transfer_from(holder, 6), Err(GatewayError));
        assert_eq!(token.holdings_of(holder), 5);
    }

    #[test]
    fn test_transfer_refuses_empty_custody() {
        let token = MockToken::new(AssetAddress(1));
        assert_eq!(token.transfer(AccountId(5), 1), Err(GatewayError));
    }
}
