/// Notifications - Synchronous Event Payloads
///
/// Returned to the caller as part of a successful operation; an aborted call
/// never produces one. Delivery beyond the return value (websockets, logs,
/// message buses) is a collaborator concern.

use crate::domain::asset::{AccountId, Side, Ticker};
use crate::domain::order::OrderId;
use serde::{Deserialize, Serialize};

/// A new limit order was admitted and is resting on its book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderCreated {
    pub ticker: Ticker,
    pub side: Side,
    pub price: u64,
    pub amount: u64,
    pub owner: AccountId,
    pub id: OrderId,
}

/// One fill of a market order against a single resting counter-order.
/// A market order that walks several price levels produces one of these per
/// counter-order touched, in match order, not an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderMatched {
    pub ticker: Ticker,
    /// The market order's side, not the resting order's.
    pub side: Side,
    /// The resting order's price.
    pub price: u64,
    pub amount: u64,
}
