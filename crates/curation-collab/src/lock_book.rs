//! Lock book: the in-process Staking collaborator.
//!
//! Owners lock part of their balance for a duration and name the one account
//! allowed to release it. Locks are addressed by `(owner, lock_id)`; ids are
//! assigned per owner starting at 1.

use std::collections::HashMap;

use curation_types::{AccountId, CurationError, Lock, LockId, Result, Staking, TimeUnit};

use crate::token_ledger::{TokenBalance, TokenLedger};

/// Parameters of a new lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRequest {
    pub amount: u64,
    pub time_unit: TimeUnit,
    pub unlock_at: u64,
    pub unlocker: AccountId,
    pub metadata: Vec<u8>,
}

impl LockRequest {
    /// Seconds-denominated lock released by `unlocker`.
    #[must_use]
    pub fn seconds(amount: u64, unlock_at: u64, unlocker: AccountId) -> Self {
        Self {
            amount,
            time_unit: TimeUnit::Seconds,
            unlock_at,
            unlocker,
            metadata: Vec::new(),
        }
    }
}

/// Token custody with per-owner locks.
#[derive(Debug, Clone)]
pub struct LockBook {
    address: AccountId,
    ledger: TokenLedger,
    locks: HashMap<(AccountId, LockId), Lock>,
    last_lock_id: HashMap<AccountId, u64>,
}

impl LockBook {
    #[must_use]
    pub fn new(address: AccountId) -> Self {
        Self {
            address,
            ledger: TokenLedger::new(),
            locks: HashMap::new(),
            last_lock_id: HashMap::new(),
        }
    }

    /// Credit tokens to `account`.
    pub fn deposit(&mut self, account: AccountId, amount: u64) -> Result<()> {
        self.ledger.deposit(account, amount)
    }

    /// Atomically lock funds and record the lock.
    ///
    /// If the balance cannot cover `amount`, no lock is recorded.
    pub fn lock(&mut self, owner: AccountId, request: LockRequest) -> Result<LockId> {
        self.ledger.lock(owner, request.amount)?;

        let next = self.last_lock_id.entry(owner).or_insert(0);
        *next += 1;
        let lock_id = LockId(*next);

        self.locks.insert(
            (owner, lock_id),
            Lock {
                owner,
                lock_id,
                amount: request.amount,
                time_unit: request.time_unit,
                unlock_at: request.unlock_at,
                unlocker: request.unlocker,
                metadata: request.metadata,
            },
        );
        tracing::debug!(owner = %owner, lock = %lock_id, amount = request.amount, "Lock created");
        Ok(lock_id)
    }

    #[must_use]
    pub fn balance(&self, account: AccountId) -> TokenBalance {
        self.ledger.balance(account)
    }

    #[must_use]
    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    /// Number of locks currently held.
    #[must_use]
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }
}

impl Staking for LockBook {
    fn address(&self) -> AccountId {
        self.address
    }

    fn get_lock(&self, owner: AccountId, lock_id: LockId) -> Option<Lock> {
        self.locks.get(&(owner, lock_id)).cloned()
    }

    fn unlock(&mut self, owner: AccountId, unlocker: AccountId, lock_id: LockId) -> Result<()> {
        let lock = self
            .locks
            .get(&(owner, lock_id))
            .ok_or(CurationError::LockNotFound { owner, lock_id })?;

        if lock.unlocker != unlocker {
            return Err(CurationError::Staking(format!(
                "{unlocker} is not the unlocker of {owner} {lock_id}"
            )));
        }

        self.ledger.unlock(owner, lock.amount)?;
        self.locks.remove(&(owner, lock_id));
        tracing::debug!(owner = %owner, lock = %lock_id, "Lock released");
        Ok(())
    }

    fn move_tokens(&mut self, from: AccountId, to: AccountId, amount: u64) -> Result<()> {
        self.ledger.transfer(from, to, amount)?;
        tracing::debug!(from = %from, to = %to, amount, "Tokens moved");
        Ok(())
    }
}
