/// OrderBook - Price-Time Priority Book for One (Ticker, Side)
///
/// Price levels live in a `BTreeMap` keyed by price; each level holds a FIFO
/// queue of orders, so time priority within a level falls out of queue order.
/// Buy books hand out their highest price first, sell books their lowest, i.e.
/// the head of the book is always the best price available to a counter-order.
///
/// Invariants maintained across every mutation:
/// - listing order is exactly (best price first, then arrival order)
/// - no two orders share an id
/// - empty price levels are removed immediately

use crate::domain::asset::Side;
use crate::domain::order::{Order, OrderId};
use std::collections::{BTreeMap, VecDeque};

/// One side of the market for a single ticker.
#[derive(Debug, Clone)]
pub struct OrderBook {
    side: Side,
    levels: BTreeMap<u64, VecDeque<Order>>,
    len: usize,
}

impl OrderBook {
    pub fn new(side: Side) -> Self {
        OrderBook {
            side,
            levels: BTreeMap::new(),
            len: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of open orders in the book.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a resting order behind all earlier orders at the same price.
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.side, self.side);
        debug_assert!(order.remaining() > 0);
        self.levels.entry(order.price).or_default().push_back(order);
        self.len += 1;
    }

    /// The best-priced level for a counter-order: highest price on a buy
    /// book, lowest on a sell book.
    fn best_level(&self) -> Option<(&u64, &VecDeque<Order>)> {
        match self.side {
            Side::Buy => self.levels.last_key_value(),
            Side::Sell => self.levels.first_key_value(),
        }
    }

    /// Returns the head of the book without removing it.
    pub fn peek_best(&self) -> Option<&Order> {
        self.best_level().and_then(|(_, queue)| queue.front())
    }

    /// Best price currently resting on this side, if any.
    pub fn best_price(&self) -> Option<u64> {
        self.best_level().map(|(&price, _)| price)
    }

    /// Applies a fill to an open order: raises `filled` by `filled_delta`
    /// and removes the order once nothing remains. A partially filled order
    /// keeps its position (the price is unchanged, so the sort is unaffected).
    ///
    /// Returns `false` if no order with `order_id` is in the book.
    pub fn reduce_or_remove(&mut self, order_id: OrderId, filled_delta: u64) -> bool {
        let mut emptied_level = None;
        let mut found = false;

        for (&price, queue) in self.levels.iter_mut() {
            if let Some(pos) = queue.iter().position(|o| o.id == order_id) {
                let order = &mut queue[pos];
                debug_assert!(filled_delta <= order.remaining());
                order.filled += filled_delta;
                if order.remaining() == 0 {
                    queue.remove(pos);
                    self.len -= 1;
                    if queue.is_empty() {
                        emptied_level = Some(price);
                    }
                }
                found = true;
                break;
            }
        }

        if let Some(price) = emptied_level {
            self.levels.remove(&price);
        }
        found
    }

    /// Open orders in exact priority order: best price first, FIFO within a
    /// price level.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Order> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev().flatten()),
            Side::Sell => Box::new(self.levels.values().flatten()),
        }
    }

    /// Read-only snapshot in current sort order.
    pub fn snapshot(&self) -> Vec<Order> {
        self.iter().cloned().collect()
    }
}
