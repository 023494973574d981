//! Notifications emitted by the coordinator.
//!
//! Events form an append-only log per coordinator. A failed operation never
//! leaves events behind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccountId, EntryId, LockId, Verdict, VoteId};

/// Which tunable parameter was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    MinDeposit,
    ApplyStageLen,
    DispensationPct,
    VotingApp,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinDeposit => write!(f, "MIN_DEPOSIT"),
            Self::ApplyStageLen => write!(f, "APPLY_STAGE_LEN"),
            Self::DispensationPct => write!(f, "DISPENSATION_PCT"),
            Self::VotingApp => write!(f, "VOTING_APP"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CurationEvent {
    ApplicationCreated {
        entry_id: EntryId,
        applicant: AccountId,
    },
    /// Also emitted with `vote_id: None` when a challenge short-circuits
    /// into touch-and-remove.
    ChallengeCreated {
        entry_id: EntryId,
        challenger: AccountId,
        vote_id: Option<VoteId>,
    },
    TokensMoved {
        from: AccountId,
        to: AccountId,
        amount: u64,
    },
    LockReleased {
        owner: AccountId,
        unlocker: AccountId,
        lock_id: LockId,
    },
    ApplicationRegistered {
        entry_id: EntryId,
    },
    ApplicationRemoved {
        entry_id: EntryId,
    },
    ChallengeResolved {
        entry_id: EntryId,
        vote_id: VoteId,
        verdict: Verdict,
        dispensed: u64,
        pool: u64,
    },
    RewardClaimed {
        vote_id: VoteId,
        voter: AccountId,
        amount: u64,
    },
    ParameterChanged {
        parameter: ParameterKind,
        value: String,
    },
}

impl CurationEvent {
    /// Short, stable name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ApplicationCreated { .. } => "APPLICATION_CREATED",
            Self::ChallengeCreated { .. } => "CHALLENGE_CREATED",
            Self::TokensMoved { .. } => "TOKENS_MOVED",
            Self::LockReleased { .. } => "LOCK_RELEASED",
            Self::ApplicationRegistered { .. } => "APPLICATION_REGISTERED",
            Self::ApplicationRemoved { .. } => "APPLICATION_REMOVED",
            Self::ChallengeResolved { .. } => "CHALLENGE_RESOLVED",
            Self::RewardClaimed { .. } => "REWARD_CLAIMED",
            Self::ParameterChanged { .. } => "PARAMETER_CHANGED",
        }
    }
}

impl fmt::Display for CurationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
