/// Domain Layer - Core Business Logic
///
/// This is the heart of the exchange, containing pure business rules with no
/// external dependencies: balance accounting, order books, and the asset
/// directory. Everything here is synchronous and framework-agnostic.
///
/// ## Modules
/// - `asset`: tickers, account principals, sides
/// - `order`: the resting order entity
/// - `orderbook`: per-(ticker, side) price-time priority book
/// - `ledger`: (account, ticker) balances and the conservation invariant
/// - `registry`: owner-gated ticker directory and the asset gateway contract

pub mod asset;
pub mod ledger;
pub mod order;
pub mod orderbook;
pub mod registry;

// Re-export key types
pub use asset::{AccountId, AssetAddress, Side, Ticker, BASE_TICKER};
pub use ledger::Ledger;
pub use order::{Order, OrderId};
pub use orderbook::OrderBook;
pub use registry::{AssetGateway, AssetRegistry, GatewayError};
