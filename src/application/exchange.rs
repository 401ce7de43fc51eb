/// Exchange - Order Admission and Market-Order Execution
///
/// The only component with branching business logic. It owns the ledger, the
/// per-ticker book pairs and the injected asset registry; no other component
/// mutates them. Every public operation is a single synchronous state-machine
/// run (validate, apply, commit-or-abort): it either completes fully or
/// returns an error having changed nothing a caller can observe.
///
/// ## Atomicity
/// Limit orders and wallet operations validate every precondition before the
/// first mutation. Market orders can fail mid-sweep (a buyer's base balance
/// running out at the second of three fills), so the sweep runs against the
/// live ledger and book with a snapshot taken at entry; on any error the
/// snapshot is restored before the error is returned.

use crate::domain::asset::{AccountId, Side, Ticker, BASE_TICKER};
use crate::domain::ledger::Ledger;
use crate::domain::order::{Order, OrderId};
use crate::domain::orderbook::OrderBook;
use crate::domain::registry::{AssetGateway, AssetRegistry};
use crate::shared::error::ExchangeError;
use crate::shared::events::{LimitOrderCreated, MarketOrderMatched};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Fills produced by one market order. Sized for the common case of a sweep
/// touching a handful of resting orders.
pub type MarketFills = SmallVec<[MarketOrderMatched; 8]>;

/// Both sides of the market for one ticker.
#[derive(Debug, Clone)]
struct BookPair {
    buy: OrderBook,
    sell: OrderBook,
}

impl BookPair {
    fn new() -> Self {
        BookPair {
            buy: OrderBook::new(Side::Buy),
            sell: OrderBook::new(Side::Sell),
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut OrderBook {
        match side {
            Side::Buy => &mut self.buy,
            Side::Sell => &mut self.sell,
        }
    }

    fn side(&self, side: Side) -> &OrderBook {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }
}

/// The matching engine. Constructed around an injected [`AssetRegistry`];
/// the host invokes it one call at a time, so no internal locking is needed.
pub struct Exchange {
    registry: AssetRegistry,
    ledger: Ledger,
    books: HashMap<Ticker, BookPair>,
    next_order_id: OrderId,
}

impl Exchange {
    pub fn new(registry: AssetRegistry) -> Self {
        Exchange {
            registry,
            ledger: Ledger::new(),
            books: HashMap::new(),
            next_order_id: 1,
        }
    }

    /// Registers (or re-registers) a tradeable asset. Owner-gated; delegates
    /// to the injected registry.
    pub fn register_asset(
        &mut self,
        ticker: Ticker,
        gateway: Arc<dyn AssetGateway>,
        caller: AccountId,
    ) -> Result<(), ExchangeError> {
        self.registry.register(ticker, gateway, caller)
    }

    /// Admits a limit order onto its book.
    ///
    /// Admission is a one-time gate against the caller's declared balance;
    /// no funds move or get reserved here. Funds only move at match time.
    pub fn place_limit_order(
        &mut self,
        ticker: Ticker,
        side: Side,
        amount: u64,
        price: u64,
        caller: AccountId,
    ) -> Result<LimitOrderCreated, ExchangeError> {
        if !self.registry.contains(ticker) {
            return Err(ExchangeError::UnknownTicker(ticker));
        }
        if amount == 0 {
            return Err(ExchangeError::InvalidOrder("amount must be positive"));
        }
        if price == 0 {
            return Err(ExchangeError::InvalidOrder("price must be positive"));
        }

        match side {
            Side::Buy => {
                let required = amount.checked_mul(price).ok_or(ExchangeError::Overflow)?;
                let available = self.ledger.balance_of(caller, BASE_TICKER);
                if available < required {
                    return Err(ExchangeError::InsufficientBaseBalance {
                        required,
                        available,
                    });
                }
            }
            Side::Sell => {
                let available = self.ledger.balance_of(caller, ticker);
                if available < amount {
                    return Err(ExchangeError::InsufficientAssetBalance {
                        ticker,
                        required: amount,
                        available,
                    });
                }
            }
        }

        let id = self.next_order_id;
        self.next_order_id += 1;

        let order = Order::new(id, caller, ticker, side, price, amount);
        self.books
            .entry(ticker)
            .or_insert_with(BookPair::new)
            .side_mut(side)
            .insert(order);

        info!(%ticker, %side, price, amount, owner = %caller, id, "limit order created");
        Ok(LimitOrderCreated {
            ticker,
            side,
            price,
            amount,
            owner: caller,
            id,
        })
    }

    /// Executes a market order against the best resting liquidity.
    ///
    /// Fills greedily from the head of the opposite book; any unmatched
    /// residue once the book runs dry is discarded (no resting order is
    /// created). An empty opposite book is a successful no-op. Returns one
    /// [`MarketOrderMatched`] per counter-order touched, in match order.
    pub fn place_market_order(
        &mut self,
        ticker: Ticker,
        side: Side,
        amount: u64,
        caller: AccountId,
    ) -> Result<MarketFills, ExchangeError> {
        if !self.registry.contains(ticker) {
            return Err(ExchangeError::UnknownTicker(ticker));
        }
        if amount == 0 {
            return Err(ExchangeError::InvalidOrder("amount must be positive"));
        }
        // A seller must hold the full amount up front. Buyers are checked
        // incrementally per fill: a BUY market order is admitted without an
        // aggregate funding check and may abort mid-sweep instead.
        if side == Side::Sell {
            let available = self.ledger.balance_of(caller, ticker);
            if available < amount {
                return Err(ExchangeError::InsufficientAssetBalance {
                    ticker,
                    required: amount,
                    available,
                });
            }
        }

        let pair = self.books.entry(ticker).or_insert_with(BookPair::new);
        let book = pair.side_mut(side.opposite());
        if book.is_empty() {
            debug!(%ticker, %side, amount, "market order against empty book, nothing to do");
            return Ok(MarketFills::new());
        }

        // Call-scoped atomicity: snapshot the two structures the sweep may
        // touch and restore them if any leg fails.
        let ledger_checkpoint = self.ledger.clone();
        let book_checkpoint = book.clone();

        match Self::sweep(&mut self.ledger, book, ticker, side, amount, caller) {
            Ok(fills) => {
                info!(%ticker, %side, amount, fills = fills.len(), "market order executed");
                Ok(fills)
            }
            Err(err) => {
                self.ledger = ledger_checkpoint;
                *book = book_checkpoint;
                Err(err)
            }
        }
    }

    /// The greedy fill loop. Mutates `ledger` and `book` directly; the caller
    /// holds the snapshots that make an error return safe.
    fn sweep(
        ledger: &mut Ledger,
        book: &mut OrderBook,
        ticker: Ticker,
        side: Side,
        amount: u64,
        caller: AccountId,
    ) -> Result<MarketFills, ExchangeError> {
        let mut fills = MarketFills::new();
        let mut remaining = amount;

        while remaining > 0 {
            let Some(best) = book.peek_best() else {
                break;
            };
            let (best_id, best_owner, best_price) = (best.id, best.owner, best.price);
            let fill = remaining.min(best.remaining());
            let cost = fill.checked_mul(best_price).ok_or(ExchangeError::Overflow)?;

            let (buyer, seller) = match side {
                Side::Buy => (caller, best_owner),
                Side::Sell => (best_owner, caller),
            };

            // Base asset moves buyer -> seller, ticker asset seller -> buyer.
            ledger
                .transfer(buyer, seller, BASE_TICKER, cost)
                .map_err(|err| match err {
                    ExchangeError::InsufficientBalance {
                        required,
                        available,
                        ..
                    } => ExchangeError::InsufficientBaseBalance {
                        required,
                        available,
                    },
                    other => other,
                })?;
            ledger
                .transfer(seller, buyer, ticker, fill)
                .map_err(|err| match err {
                    ExchangeError::InsufficientBalance {
                        required,
                        available,
                        ..
                    } => ExchangeError::InsufficientAssetBalance {
                        ticker,
                        required,
                        available,
                    },
                    other => other,
                })?;

            book.reduce_or_remove(best_id, fill);
            debug!(%ticker, %side, price = best_price, fill, counter = best_id, "matched");
            fills.push(MarketOrderMatched {
                ticker,
                side,
                price: best_price,
                amount: fill,
            });
            remaining -= fill;
        }

        Ok(fills)
    }

    /// Pull-based deposit: the asset gateway moves `amount` from the caller's
    /// external holdings into exchange custody, then the ledger is credited.
    pub fn deposit(
        &mut self,
        ticker: Ticker,
        amount: u64,
        caller: AccountId,
    ) -> Result<(), ExchangeError> {
        let gateway = Arc::clone(self.registry.resolve(ticker)?);
        // Refuse before touching the external contract if the credit could
        // not be recorded afterwards.
        if self
            .ledger
            .balance_of(caller, ticker)
            .checked_add(amount)
            .is_none()
        {
            return Err(ExchangeError::Overflow);
        }
        gateway
            .transfer_from(caller, amount)
            .map_err(|_| ExchangeError::TransferFailed(ticker))?;
        self.ledger.credit(caller, ticker, amount)?;
        debug!(%ticker, amount, account = %caller, "deposit");
        Ok(())
    }

    /// Deposit of the base asset. The host delivers the value together with
    /// the call, so there is no gateway leg.
    pub fn deposit_base(&mut self, amount: u64, caller: AccountId) -> Result<(), ExchangeError> {
        self.ledger.credit(caller, BASE_TICKER, amount)?;
        debug!(amount, account = %caller, "base deposit");
        Ok(())
    }

    /// Push-based withdrawal: debit is validated first, the gateway pushes
    /// the funds out, and only then is the ledger debited, so a refused
    /// external transfer leaves the ledger untouched.
    pub fn withdraw(
        &mut self,
        ticker: Ticker,
        amount: u64,
        caller: AccountId,
    ) -> Result<(), ExchangeError> {
        let available = self.ledger.balance_of(caller, ticker);
        if available < amount {
            return Err(ExchangeError::InsufficientBalance {
                ticker,
                required: amount,
                available,
            });
        }
        if ticker != BASE_TICKER {
            let gateway = Arc::clone(self.registry.resolve(ticker)?);
            gateway
                .transfer(caller, amount)
                .map_err(|_| ExchangeError::TransferFailed(ticker))?;
        }
        self.ledger.debit(caller, ticker, amount)?;
        debug!(%ticker, amount, account = %caller, "withdrawal");
        Ok(())
    }

    /// Read-only snapshot of one book in exact priority order.
    pub fn order_book(&self, ticker: Ticker, side: Side) -> Vec<Order> {
        self.books
            .get(&ticker)
            .map(|pair| pair.side(side).snapshot())
            .unwrap_or_default()
    }

    /// Current ledger balance; unknown accounts read as zero.
    pub fn balance_of(&self, account: AccountId, ticker: Ticker) -> u64 {
        self.ledger.balance_of(account, ticker)
    }

    /// Ledger view for reporting collaborators (per-ticker totals etc.).
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
