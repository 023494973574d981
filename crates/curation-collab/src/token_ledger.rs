//! Token balances with available/locked accounting.
//!
//! A mutation that fails leaves every balance untouched.

use std::collections::HashMap;

use curation_types::{AccountId, CurationError, Result};

/// A single account balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenBalance {
    /// Free to move.
    pub available: u64,
    /// Held by locks.
    pub locked: u64,
}

impl TokenBalance {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.available.saturating_add(self.locked)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.available == 0 && self.locked == 0
    }
}

/// Source of truth for token balances. The [`LockBook`](crate::LockBook)
/// calls into it to lock and release deposits.
#[derive(Debug, Clone, Default)]
pub struct TokenLedger {
    balances: HashMap<AccountId, TokenBalance>,
}

impl TokenLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit newly issued tokens to `account`.
    pub fn deposit(&mut self, account: AccountId, amount: u64) -> Result<()> {
        let entry = self.balances.entry(account).or_default();
        entry.available = entry
            .available
            .checked_add(amount)
            .ok_or(CurationError::Overflow)?;
        Ok(())
    }

    /// Move tokens from available to locked.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if available < amount.
    pub fn lock(&mut self, account: AccountId, amount: u64) -> Result<()> {
        let entry = self.balances.get_mut(&account).ok_or(
            CurationError::InsufficientBalance {
                account,
                needed: amount,
                available: 0,
            },
        )?;

        if entry.available < amount {
            return Err(CurationError::InsufficientBalance {
                account,
                needed: amount,
                available: entry.available,
            });
        }

        let locked = entry
            .locked
            .checked_add(amount)
            .ok_or(CurationError::Overflow)?;
        entry.available -= amount;
        entry.locked = locked;
        Ok(())
    }

    /// Move tokens from locked back to available.
    ///
    /// # Errors
    /// Returns `Staking` if locked < amount.
    pub fn unlock(&mut self, account: AccountId, amount: u64) -> Result<()> {
        let entry = self
            .balances
            .get_mut(&account)
            .ok_or_else(|| CurationError::Staking(format!("{account} has no locked balance")))?;

        if entry.locked < amount {
            return Err(CurationError::Staking(format!(
                "{account} has {} locked, cannot unlock {amount}",
                entry.locked
            )));
        }

        let available = entry
            .available
            .checked_add(amount)
            .ok_or(CurationError::Overflow)?;
        entry.locked -= amount;
        entry.available = available;
        Ok(())
    }

    /// Move available tokens between accounts.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the sender's available < amount.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: u64) -> Result<()> {
        let available = self.balance(from).available;
        if available < amount {
            return Err(CurationError::InsufficientBalance {
                account: from,
                needed: amount,
                available,
            });
        }
        let credited = self
            .balance(to)
            .available
            .checked_add(amount)
            .ok_or(CurationError::Overflow)?;
        if from == to {
            return Ok(());
        }

        self.balances.entry(from).or_default().available -= amount;
        self.balances.entry(to).or_default().available = credited;
        Ok(())
    }

    #[must_use]
    pub fn balance(&self, account: AccountId) -> TokenBalance {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Sum of all balances (available + locked).
    #[must_use]
    pub fn total_supply(&self) -> u128 {
        self.balances
            .values()
            .map(|b| u128::from(b.available) + u128::from(b.locked))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_increases_available() {
        let mut ledger = TokenLedger::new();
        let user = AccountId::random();
        ledger.deposit(user, 1_000).unwrap();
        let bal = ledger.balance(user);
        assert_eq!(bal.available, 1_000);
        assert_eq!(bal.locked, 0);
    }

    #[test]
    fn lock_moves_to_locked() {
        let mut ledger = TokenLedger::new();
        let user = AccountId::random();
        ledger.deposit(user, 1_000).unwrap();
        ledger.lock(user, 400).unwrap();
        let bal = ledger.balance(user);
        assert_eq!(bal.available, 600);
        assert_eq!(bal.locked, 400);
    }

    #[test]
    fn lock_insufficient_fails() {
        let mut ledger = TokenLedger::new();
        let user = AccountId::random();
        ledger.deposit(user, 100).unwrap();
        let err = ledger.lock(user, 200).unwrap_err();
        assert!(matches!(err, CurationError::InsufficientBalance { .. }));
        assert_eq!(ledger.balance(user).available, 100);
    }

    #[test]
    fn unlock_restores_available() {
        let mut ledger = TokenLedger::new();
        let user = AccountId::random();
        ledger.deposit(user, 1_000).unwrap();
        ledger.lock(user, 400).unwrap();
        ledger.unlock(user, 400).unwrap();
        assert_eq!(ledger.balance(user), TokenBalance { available: 1_000, locked: 0 });
        assert!(ledger.unlock(user, 1).is_err());
    }

    #[test]
    fn transfer_moves_available_only() {
        let mut ledger = TokenLedger::new();
        let a = AccountId::random();
        let b = AccountId::random();
        ledger.deposit(a, 100).unwrap();
        ledger.lock(a, 70).unwrap();

        let err = ledger.transfer(a, b, 31).unwrap_err();
        assert!(matches!(err, CurationError::InsufficientBalance { available: 30, .. }));

        ledger.transfer(a, b, 30).unwrap();
        assert_eq!(ledger.balance(a).available, 0);
        assert_eq!(ledger.balance(b).available, 30);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn self_transfer_is_noop() {
        let mut ledger = TokenLedger::new();
        let a = AccountId::random();
        ledger.deposit(a, 10).unwrap();
        ledger.transfer(a, a, 10).unwrap();
        assert_eq!(ledger.balance(a).available, 10);
    }

    #[test]
    fn nonexistent_balance_is_zero() {
        let ledger = TokenLedger::new();
        assert!(ledger.balance(AccountId::random()).is_zero());
    }

    #[test]
    fn lock_and_unlock_refuse_overflow() {
        let mut ledger = TokenLedger::new();
        let user = AccountId::random();
        ledger.deposit(user, u64::MAX).unwrap();
        ledger.lock(user, u64::MAX).unwrap();

        ledger.deposit(user, 1).unwrap();
        assert_eq!(ledger.lock(user, 1), Err(CurationError::Overflow));

        ledger.deposit(user, u64::MAX - 1).unwrap();
        assert_eq!(ledger.unlock(user, 1), Err(CurationError::Overflow));
        assert_eq!(
            ledger.balance(user),
            TokenBalance {
                available: u64::MAX,
                locked: u64::MAX
            }
        );
    }
}
