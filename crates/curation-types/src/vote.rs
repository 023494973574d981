//! Vote outcomes read from the Voting collaborator and the reward pools
//! recorded when a challenge is resolved.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccountId, EntryId, VoteId};

/// What the Voting collaborator reports for a vote instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub closed: bool,
    /// `true` means the challenge was accepted and the entry is rejected.
    pub result: bool,
    /// Total stake on the winning side.
    pub winning_total_stake: u64,
}

/// Which side won a challenge vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Challenge rejected: the entry stays admitted, the challenger pays.
    ChallengeRejected,
    /// Challenge accepted: the entry is removed, the applicant pays.
    ChallengeAccepted,
}

impl Verdict {
    #[must_use]
    pub fn from_result(result: bool) -> Self {
        if result {
            Self::ChallengeAccepted
        } else {
            Self::ChallengeRejected
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChallengeRejected => write!(f, "CHALLENGE_REJECTED"),
            Self::ChallengeAccepted => write!(f, "CHALLENGE_ACCEPTED"),
        }
    }
}

/// Voter reward pool recorded at resolution time.
///
/// The pool is the part of the losing deposit not paid to the winner. It is
/// held by the coordinator's own account until voters claim it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPool {
    pub vote_id: VoteId,
    pub entry_id: EntryId,
    pub verdict: Verdict,
    /// Account whose deposit funded the pool.
    pub loser: AccountId,
    /// `loser deposit - dispensed amount`.
    pub pool: u64,
    /// Winning total stake reported when the challenge was resolved.
    pub winning_total_stake: u64,
    /// Sum of rewards paid out so far.
    pub claimed: u64,
}

impl RewardPool {
    /// Pool still held by the coordinator.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.pool.saturating_sub(self.claimed)
    }
}
