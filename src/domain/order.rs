/// Order - Core Domain Entity
///
/// A resting limit order as stored in an order book. Market orders are never
/// stored; they exist only for the duration of the matching call.

use crate::domain::asset::{AccountId, Side, Ticker};
use serde::{Deserialize, Serialize};

/// Engine-wide monotonic order identifier.
pub type OrderId = u64;

/// A resting limit order.
///
/// `filled` accumulates matched size; the order stays open while
/// `remaining() > 0` and is removed from its book the instant it reaches 0.
/// The price never changes after creation, so partial fills do not affect
/// the order's position in the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub owner: AccountId,
    pub ticker: Ticker,
    pub side: Side,
    /// Quote units of the base asset per unit of the ticker asset. Positive.
    pub price: u64,
    /// Original order size.
    pub amount: u64,
    /// Cumulative matched size, `0 <= filled <= amount`.
    pub filled: u64,
}

impl Order {
    pub fn new(
        id: OrderId,
        owner: AccountId,
        ticker: Ticker,
        side: Side,
        price: u64,
        amount: u64,
    ) -> Self {
        Order {
            id,
            owner,
            ticker,
            side,
            price,
            amount,
            filled: 0,
        }
    }

    /// Unmatched size still open on the book.
    pub fn remaining(&self) -> u64 {
        self.amount - self.filled
    }
}
