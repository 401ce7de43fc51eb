// Global allocator: jemalloc outperforms the system allocator on the
// allocation patterns of the matching path.
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

pub mod application;
pub mod domain;
pub mod interfaces;
pub mod shared;

pub use application::Exchange;
pub use domain::{AccountId, AssetAddress, AssetGateway, AssetRegistry, Side, Ticker, BASE_TICKER};
pub use shared::{ExchangeError, LimitOrderCreated, MarketOrderMatched};
