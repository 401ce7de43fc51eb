/// Ledger - Custodial Balance Accounting
///
/// Maps (account, ticker) to a non-negative integer balance. Every other
/// component moves value exclusively through the credit/debit/transfer
/// primitives here, which is what makes the conservation invariant checkable
/// in one place: for a fixed ticker the total across all accounts changes
/// only at deposit/withdraw boundaries, never through an internal transfer.

use crate::domain::asset::{AccountId, Ticker};
use crate::shared::error::ExchangeError;
use std::collections::HashMap;

/// In-memory balance table. Entries are created implicitly on first credit
/// and never destroyed; a missing entry reads as zero.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balances: HashMap<(AccountId, Ticker), u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance; missing accounts read as 0.
    pub fn balance_of(&self, account: AccountId, ticker: Ticker) -> u64 {
        self.balances
            .get(&(account, ticker))
            .copied()
            .unwrap_or(0)
    }

    /// Adds `amount` to the balance. A zero amount is a no-op; overflow is
    /// an error rather than a wrap.
    pub fn credit(
        &mut self,
        account: AccountId,
        ticker: Ticker,
        amount: u64,
    ) -> Result<(), ExchangeError> {
        if amount == 0 {
            return Ok(());
        }
        let balance = self.balances.entry((account, ticker)).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(ExchangeError::Overflow)?;
        Ok(())
    }

    /// Subtracts `amount` from the balance, failing without mutation if the
    /// balance cannot cover it.
    pub fn debit(
        &mut self,
        account: AccountId,
        ticker: Ticker,
        amount: u64,
    ) -> Result<(), ExchangeError> {
        let available = self.balance_of(account, ticker);
        if available < amount {
            return Err(ExchangeError::InsufficientBalance {
                ticker,
                required: amount,
                available,
            });
        }
        if amount > 0 {
            self.balances.insert((account, ticker), available - amount);
        }
        Ok(())
    }

    /// Moves `amount` of `ticker` between two accounts. The debit is checked
    /// before any mutation, so a failed transfer leaves both sides untouched.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        ticker: Ticker,
        amount: u64,
    ) -> Result<(), ExchangeError> {
        self.debit(from, ticker, amount)?;
        if let Err(err) = self.credit(to, ticker, amount) {
            // Undo the debited leg. Cannot overflow: the balance held this
            // amount a moment ago.
            let balance = self.balances.entry((from, ticker)).or_insert(0);
            *balance += amount;
            return Err(err);
        }
        Ok(())
    }

    /// Sum of all balances for one ticker. Used by conservation checks and
    /// reporting collaborators.
    pub fn total_of(&self, ticker: Ticker) -> u64 {
        self.balances
            .iter()
            .filter(|((_, t), _)| *t == ticker)
            .map(|(_, &amount)| amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::BASE_TICKER;

    const ALICE: AccountId = AccountId(1);
    const BOB: AccountId = AccountId(2);

    fn usdt() -> Ticker {
        Ticker::new("USDT")
    }

    #[test]
    fn test_missing_balance_reads_zero() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance_of(ALICE, usdt()), 0);
    }

    #[test]
    fn test_credit_then_debit() {
        let mut ledger = Ledger::new();
        ledger.credit(ALICE, usdt(), 100).unwrap();
        assert_eq!(ledger.balance_of(ALICE, usdt()), 100);

        ledger.debit(ALICE, usdt(), 40).unwrap();
        assert_eq!(ledger.balance_of(ALICE, usdt()), 60);
    }

    #[test]
    fn test_zero_credit_is_noop() {
        let mut ledger = Ledger::new();
        ledger.credit(ALICE, usdt(), 0).unwrap();
        assert_eq!(ledger.total_of(usdt()), 0);
    }

    #[test]
    fn test_overdraft_fails_without_mutation() {
        let mut ledger = Ledger::new();
        ledger.credit(ALICE, usdt(), 10).unwrap();

        let err = ledger.debit(ALICE, usdt(), 11).unwrap_err();
        assert_eq!(
            err,
            ExchangeError::InsufficientBalance {
                ticker: usdt(),
                required: 11,
                available: 10,
            }
        );
        assert_eq!(ledger.balance_of(ALICE, usdt()), 10);
    }

    #[test]
    fn test_credit_overflow_is_an_error() {
        let mut ledger = Ledger::new();
        ledger.credit(ALICE, usdt(), u64::MAX).unwrap();
        assert_eq!(
            ledger.credit(ALICE, usdt(), 1).unwrap_err(),
            ExchangeError::Overflow
        );
        assert_eq!(ledger.balance_of(ALICE, usdt()), u64::MAX);
    }

    #[test]
    fn test_transfer_conserves_total() {
        let mut ledger = Ledger::new();
        ledger.credit(ALICE, usdt(), 100).unwrap();
        ledger.credit(BOB, usdt(), 50).unwrap();

        ledger.transfer(ALICE, BOB, usdt(), 30).unwrap();
        assert_eq!(ledger.balance_of(ALICE, usdt()), 70);
        assert_eq!(ledger.balance_of(BOB, usdt()), 80);
        assert_eq!(ledger.total_of(usdt()), 150);
    }

    #[test]
    fn test_failed_transfer_touches_neither_side() {
        let mut ledger = Ledger::new();
        ledger.credit(ALICE, usdt(), 5).unwrap();
        ledger.credit(BOB, usdt(), 7).unwrap();

        assert!(ledger.transfer(ALICE, BOB, usdt(), 6).is_err());
        assert_eq!(ledger.balance_of(ALICE, usdt()), 5);
        assert_eq!(ledger.balance_of(BOB, usdt()), 7);
    }

    #[test]
    fn test_transfer_overflow_rolls_back_debit() {
        let mut ledger = Ledger::new();
        ledger.credit(ALICE, usdt(), 100).unwrap();
        ledger.credit(BOB, usdt(), u64::MAX).unwrap();

        assert_eq!(
            ledger.transfer(ALICE, BOB, usdt(), 1).unwrap_err(),
            ExchangeError::Overflow
        );
        assert_eq!(ledger.balance_of(ALICE, usdt()), 100);
        assert_eq!(ledger.balance_of(BOB, usdt()), u64::MAX);
    }

    #[test]
    fn test_totals_are_per_ticker() {
        let mut ledger = Ledger::new();
        ledger.credit(ALICE, usdt(), 100).unwrap();
        ledger.credit(ALICE, BASE_TICKER, 9).unwrap();
        assert_eq!(ledger.total_of(usdt()), 100);
        assert_eq!(ledger.total_of(BASE_TICKER), 9);
    }
}
