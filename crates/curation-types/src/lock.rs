//! Deposit locks as reported by the Staking collaborator.
//!
//! A lock is a collaborator-held commitment of tokens for a bounded duration,
//! addressable by `(owner, lock_id)` and releasable only by its designated
//! unlocker. The coordinator never owns locks; it only reads and releases them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccountId, LockId, Timestamp};

/// How a lock expresses its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Blocks,
    Seconds,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocks => write!(f, "BLOCKS"),
            Self::Seconds => write!(f, "SECONDS"),
        }
    }
}

/// A lock record read from the Staking collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// Account whose tokens are locked.
    pub owner: AccountId,
    /// Per-owner lock identifier.
    pub lock_id: LockId,
    /// Locked token amount.
    pub amount: u64,
    /// Unit of `unlock_at`.
    pub time_unit: TimeUnit,
    /// End of the lock (a timestamp when `time_unit` is seconds).
    pub unlock_at: u64,
    /// The only account allowed to release the lock.
    pub unlocker: AccountId,
    /// Opaque metadata attached by the owner.
    pub metadata: Vec<u8>,
}

impl Lock {
    /// Whether the lock is still held at `deadline` (seconds-denominated only).
    #[must_use]
    pub fn lasts_until(&self, deadline: Timestamp) -> bool {
        self.time_unit == TimeUnit::Seconds && self.unlock_at >= deadline.as_secs()
    }
}

/// A lock that passed validation, reduced to what the ledgers record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stake {
    pub owner: AccountId,
    pub lock_id: LockId,
    pub amount: u64,
}
