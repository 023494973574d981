//! Application and Challenge records.
//!
//! ## Entry lifecycle
//!
//! ```text
//!   newApplication ──▶ PENDING ──(apply stage, unchallenged)──▶ REGISTERED
//!                        │  ▲                                      │
//!                        │  └──────── challenge rejected ──────────┤
//!                        ▼                                         ▼
//!                    CHALLENGED ──── challenge accepted ───▶ (deleted)
//! ```
//!
//! Withdrawal and touch-and-remove delete the Application outright.

use serde::{Deserialize, Serialize};

use crate::{AccountId, EntryId, LockId, Pct, Stake, Timestamp, VoteId};

/// An entry proposed for the registry, backed by a locked deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Owning account.
    pub applicant: AccountId,
    /// When the application was created.
    pub submitted_at: Timestamp,
    /// True once the data was admitted to the Registry.
    pub registered: bool,
    /// Opaque bytes identifying the registry entry.
    pub data: Vec<u8>,
    /// Stake backing this application.
    pub deposit_amount: u64,
    /// Lock holding the stake.
    pub lock_id: LockId,
    /// False once a resolution released the lock back to the applicant.
    pub stake_locked: bool,
}

impl Application {
    #[must_use]
    pub fn new(stake: Stake, data: Vec<u8>, submitted_at: Timestamp) -> Self {
        Self {
            applicant: stake.owner,
            submitted_at,
            registered: false,
            data,
            deposit_amount: stake.amount,
            lock_id: stake.lock_id,
            stake_locked: true,
        }
    }

    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        EntryId::for_data(&self.data)
    }

    /// Earliest instant an unchallenged application may be registered.
    #[must_use]
    pub fn registrable_at(&self, apply_stage_len: u64) -> Timestamp {
        self.submitted_at.plus(apply_stage_len)
    }

    #[must_use]
    pub fn stake(&self) -> Stake {
        Stake {
            owner: self.applicant,
            lock_id: self.lock_id,
            amount: self.deposit_amount,
        }
    }
}

/// A dispute against an application, decided by a delegated vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenger: AccountId,
    pub submitted_at: Timestamp,
    pub deposit_amount: u64,
    pub lock_id: LockId,
    /// Vote instance opened in the Voting collaborator.
    pub vote_id: VoteId,
    /// Dispensation snapshotted at challenge time; later parameter changes
    /// do not affect this challenge.
    pub dispensation_pct: Pct,
}

impl Challenge {
    #[must_use]
    pub fn stake(&self) -> Stake {
        Stake {
            owner: self.challenger,
            lock_id: self.lock_id,
            amount: self.deposit_amount,
        }
    }
}
