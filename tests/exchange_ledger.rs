//! Wallet-side behavior: asset registration gating, deposits and
//! withdrawals through the external gateway, and balance arithmetic.

use dex_engine::domain::registry::AssetRegistry;
use dex_engine::interfaces::tools::MockToken;
use dex_engine::{AccountId, AssetAddress, Exchange, ExchangeError, Ticker, BASE_TICKER};
use std::sync::Arc;

const OWNER: AccountId = AccountId(0);
const ALICE: AccountId = AccountId(1);

fn usdt() -> Ticker {
    Ticker::new("USDT")
}

fn exchange_with_token() -> (Exchange, Arc<MockToken>) {
    let mut exchange = Exchange::new(AssetRegistry::new(OWNER));
    let token = Arc::new(MockToken::new(AssetAddress(0xbeef)));
    exchange
        .register_asset(usdt(), token.clone(), OWNER)
        .unwrap();
    (exchange, token)
}

#[test]
fn only_owner_may_register_assets() {
    let mut exchange = Exchange::new(AssetRegistry::new(OWNER));
    let token = Arc::new(MockToken::new(AssetAddress(0xbeef)));

    assert!(exchange
        .register_asset(usdt(), token.clone(), OWNER)
        .is_ok());
    assert_eq!(
        exchange.register_asset(usdt(), token, ALICE).unwrap_err(),
        ExchangeError::Unauthorized
    );
}

#[test]
fn deposit_pulls_from_external_holdings() {
    let (mut exchange, token) = exchange_with_token();
    token.mint(ALICE, 500);

    exchange.deposit(usdt(), 100, ALICE).unwrap();

    assert_eq!(exchange.balance_of(ALICE, usdt()), 100);
    assert_eq!(token.holdings_of(ALICE), 400);
    assert_eq!(token.custody(), 100);
}

#[test]
fn deposit_of_unregistered_ticker_fails() {
    let mut exchange = Exchange::new(AssetRegistry::new(OWNER));
    let link = Ticker::new("LINK");
    assert_eq!(
        exchange.deposit(link, 10, ALICE).unwrap_err(),
        ExchangeError::UnknownTicker(link)
    );
}

#[test]
fn deposit_fails_cleanly_when_gateway_refuses() {
    let (mut exchange, token) = exchange_with_token();
    token.mint(ALICE, 50);

    assert_eq!(
        exchange.deposit(usdt(), 100, ALICE).unwrap_err(),
        ExchangeError::TransferFailed(usdt())
    );
    assert_eq!(exchange.balance_of(ALICE, usdt()), 0);
    assert_eq!(token.holdings_of(ALICE), 50);
}

#[test]
fn faulty_withdrawal_is_rejected() {
    let (mut exchange, token) = exchange_with_token();
    token.mint(ALICE, 500);
    exchange.deposit(usdt(), 100, ALICE).unwrap();

    assert!(matches!(
        exchange.withdraw(usdt(), 600, ALICE).unwrap_err(),
        ExchangeError::InsufficientBalance {
            required: 600,
            available: 100,
            ..
        }
    ));
    assert_eq!(exchange.balance_of(ALICE, usdt()), 100);
}

#[test]
fn withdrawal_pushes_back_to_external_holdings() {
    let (mut exchange, token) = exchange_with_token();
    token.mint(ALICE, 500);
    exchange.deposit(usdt(), 100, ALICE).unwrap();

    exchange.withdraw(usdt(), 100, ALICE).unwrap();

    assert_eq!(exchange.balance_of(ALICE, usdt()), 0);
    assert_eq!(token.holdings_of(ALICE), 500);
    assert_eq!(token.custody(), 0);
}

#[test]
fn base_deposits_and_withdrawals_need_no_gateway() {
    let mut exchange = Exchange::new(AssetRegistry::new(OWNER));
    exchange.deposit_base(100, ALICE).unwrap();
    assert_eq!(exchange.balance_of(ALICE, BASE_TICKER), 100);

    exchange.withdraw(BASE_TICKER, 30, ALICE).unwrap();
    assert_eq!(exchange.balance_of(ALICE, BASE_TICKER), 70);
}

#[test]
fn deposits_and_withdrawals_are_the_only_total_changing_operations() {
    let (mut exchange, token) = exchange_with_token();
    token.mint(ALICE, 500);

    assert_eq!(exchange.ledger().total_of(usdt()), 0);
    exchange.deposit(usdt(), 100, ALICE).unwrap();
    assert_eq!(exchange.ledger().total_of(usdt()), 100);
    exchange.withdraw(usdt(), 40, ALICE).unwrap();
    assert_eq!(exchange.ledger().total_of(usdt()), 60);
}
