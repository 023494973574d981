//! Lock adapter: hard gate for deposit locks.
//!
//! Every application and challenge is backed by a lock reported by the
//! Staking collaborator. The adapter checks, in order:
//!
//! 1. the lock exists for `(owner, lock_id)`
//! 2. this coordinator is its designated unlocker
//! 3. the duration is denominated in seconds
//! 4. it stays locked for at least `apply_stage_len` from now
//! 5. the amount covers `min_deposit`
//!
//! Any failing check rejects the lock; nothing is recorded.

use curation_types::{
    AccountId, CurationError, LockId, Parameters, Result, Stake, Staking, TimeUnit, Timestamp,
};

/// Validates locks on behalf of one coordinator.
#[derive(Debug, Clone, Copy)]
pub struct LockAdapter {
    /// The coordinator's own address; must be every lock's unlocker.
    unlocker: AccountId,
}

impl LockAdapter {
    #[must_use]
    pub fn new(unlocker: AccountId) -> Self {
        Self { unlocker }
    }

    /// Read and validate a lock.
    ///
    /// # Errors
    /// `LockNotFound` if the Staking collaborator has no such lock,
    /// `InvalidLock` if any check fails.
    pub fn validate<S: Staking>(
        &self,
        staking: &S,
        owner: AccountId,
        lock_id: LockId,
        params: &Parameters,
        now: Timestamp,
    ) -> Result<Stake> {
        let lock = staking
            .get_lock(owner, lock_id)
            .ok_or(CurationError::LockNotFound { owner, lock_id })?;

        let invalid = |reason: String| CurationError::InvalidLock {
            owner,
            lock_id,
            reason,
        };

        if lock.unlocker != self.unlocker {
            return Err(invalid(format!(
                "unlocker is {}, expected {}",
                lock.unlocker, self.unlocker
            )));
        }

        if lock.time_unit != TimeUnit::Seconds {
            return Err(invalid(format!("time unit is {}", lock.time_unit)));
        }

        let deadline = now.plus(params.apply_stage_len);
        if !lock.lasts_until(deadline) {
            return Err(invalid(format!(
                "unlocks at {}, before apply stage end {}",
                lock.unlock_at,
                deadline.as_secs()
            )));
        }

        if lock.amount < params.min_deposit {
            return Err(invalid(format!(
                "amount {} below minimum deposit {}",
                lock.amount, params.min_deposit
            )));
        }

        Ok(Stake {
            owner,
            lock_id,
            amount: lock.amount,
        })
    }
}
