/// Shared types used across all layers
///
/// This module contains:
/// - Error types surfaced by every public operation
/// - Notification payloads returned on success

pub mod error;
pub mod events;

// Re-export commonly used types
pub use error::ExchangeError;
pub use events::{LimitOrderCreated, MarketOrderMatched};
