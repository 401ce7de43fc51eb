/// Application Layer - Exchange Orchestration
///
/// Orchestrates the domain layer into the public exchange operations:
/// order admission, market-order execution, deposits and withdrawals.
/// Depends on the domain layer only; callers inject the asset registry.

pub mod exchange;

// Re-export the engine
pub use exchange::Exchange;
