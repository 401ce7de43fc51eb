/// Exchange Error Types
///
/// Every failure the engine can surface. All variants are local
/// validation/precondition failures: an error return always means the whole
/// operation was aborted with no observable state change. "No match possible"
/// (empty opposite book) is deliberately not an error.

use crate::domain::asset::Ticker;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeError {
    /// The ticker has no record in the asset registry.
    #[error("ticker {0} is not registered")]
    UnknownTicker(Ticker),

    /// Caller is not the registry owner.
    #[error("caller is not the registry owner")]
    Unauthorized,

    /// Non-positive amount or price on an order.
    #[error("invalid order: {0}")]
    InvalidOrder(&'static str),

    /// Caller's base-asset balance cannot cover the order.
    #[error("insufficient base balance: required {required}, available {available}")]
    InsufficientBaseBalance { required: u64, available: u64 },

    /// Caller's ticker-asset balance cannot cover the order.
    #[error("insufficient {ticker} balance: required {required}, available {available}")]
    InsufficientAssetBalance {
        ticker: Ticker,
        required: u64,
        available: u64,
    },

    /// Generic ledger debit failure (deposits/withdrawals, raw transfers).
    #[error("insufficient {ticker} balance: {available} held, {required} requested")]
    InsufficientBalance {
        ticker: Ticker,
        required: u64,
        available: u64,
    },

    /// Balance arithmetic left the numeric range instead of wrapping.
    #[error("balance arithmetic overflow")]
    Overflow,

    /// The external asset contract refused a deposit/withdraw leg.
    #[error("external transfer failed for {0}")]
    TransferFailed(Ticker),
}
