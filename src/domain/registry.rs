/// AssetRegistry - Owner-Gated Ticker Directory
///
/// Maps a ticker to the external asset gateway it settles against. Writes are
/// restricted to the owner fixed at construction; re-registering a ticker
/// overwrites the previous gateway. A ticker with no record is unregistered
/// and rejects every ledger/order operation that references it.

use crate::domain::asset::{AccountId, AssetAddress, Ticker};
use crate::shared::error::ExchangeError;
use std::collections::HashMap;
use std::sync::Arc;

/// External asset contract, as seen from the exchange.
///
/// `transfer_from` pulls `amount` from `owner` into exchange custody (the
/// deposit leg, allowance-style); `transfer` pushes `amount` out of custody
/// to `to` (the withdrawal leg). The engine calls these only at the
/// deposit/withdraw boundaries, never inside matching.
pub trait AssetGateway: Send + Sync {
    fn transfer_from(&self, owner: AccountId, amount: u64) -> Result<(), GatewayError>;
    fn transfer(&self, to: AccountId, amount: u64) -> Result<(), GatewayError>;
    fn address(&self) -> AssetAddress;
}

impl std::fmt::Debug for dyn AssetGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AssetGateway").field(&self.address()).finish()
    }
}

/// Failure reported by an external asset contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayError;

/// Process-wide directory of trusted asset mappings. Injected into the
/// engine at construction rather than living as ambient global state.
pub struct AssetRegistry {
    owner: AccountId,
    assets: HashMap<Ticker, Arc<dyn AssetGateway>>,
}

impl AssetRegistry {
    pub fn new(owner: AccountId) -> Self {
        AssetRegistry {
            owner,
            assets: HashMap::new(),
        }
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Inserts or overwrites the record for `ticker`. Only the owner may
    /// write; there are no side effects beyond the mapping itself.
    pub fn register(
        &mut self,
        ticker: Ticker,
        gateway: Arc<dyn AssetGateway>,
        caller: AccountId,
    ) -> Result<(), ExchangeError> {
        if caller != self.owner {
            return Err(ExchangeError::Unauthorized);
        }
        tracing::info!(%ticker, address = %gateway.address(), "asset registered");
        self.assets.insert(ticker, gateway);
        Ok(())
    }

    /// Resolves a ticker to its gateway.
    pub fn resolve(&self, ticker: Ticker) -> Result<&Arc<dyn AssetGateway>, ExchangeError> {
        self.assets
            .get(&ticker)
            .ok_or(ExchangeError::UnknownTicker(ticker))
    }

    /// Whether `ticker` has a record. Order admission checks use this.
    pub fn contains(&self, ticker: Ticker) -> bool {
        self.assets.contains_key(&ticker)
    }
}
