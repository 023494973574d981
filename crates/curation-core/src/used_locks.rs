//! Used-lock tracker: one live application or challenge per lock.
//!
//! A lock `(owner, lock_id)` can back at most one live application or
//! challenge. Marking a pair that is already in use returns
//! [`CurationError::LockAlreadyUsed`]. The pair is freed exactly when the
//! application or challenge it backs is resolved, withdrawn, or
//! touch-and-removed.

use std::collections::HashSet;

use curation_types::{AccountId, CurationError, LockId, Result, Stake};

/// Set of `(owner, lock_id)` pairs currently backing live records.
#[derive(Debug, Clone, Default)]
pub struct UsedLockTracker {
    used: HashSet<(AccountId, LockId)>,
}

impl UsedLockTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a lock as used.
    ///
    /// # Errors
    /// Returns [`CurationError::LockAlreadyUsed`] if the pair is already in use.
    pub fn mark_used(&mut self, owner: AccountId, lock_id: LockId) -> Result<()> {
        if !self.used.insert((owner, lock_id)) {
            return Err(CurationError::LockAlreadyUsed { owner, lock_id });
        }
        Ok(())
    }

    /// Free the lock backing `stake`. Returns whether it was in use.
    pub fn release(&mut self, stake: &Stake) -> bool {
        self.used.remove(&(stake.owner, stake.lock_id))
    }

    #[must_use]
    pub fn is_used(&self, owner: AccountId, lock_id: LockId) -> bool {
        self.used.contains(&(owner, lock_id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
