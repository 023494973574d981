//! Tally book: the in-process Voting collaborator.
//!
//! The arbitration component that actually runs votes lives elsewhere; it
//! posts closed results and per-voter winning stakes here, and the
//! coordinator reads them back through the [`Voting`] contract.

use std::collections::HashMap;

use curation_types::{AccountId, CurationError, EntryId, Result, VoteId, VoteOutcome, Voting};

#[derive(Debug, Clone)]
struct Tally {
    entry_id: EntryId,
    challenger: AccountId,
    outcome: VoteOutcome,
    winning_stakes: HashMap<AccountId, u64>,
}

/// Vote registry keyed by [`VoteId`].
#[derive(Debug, Clone)]
pub struct TallyBook {
    address: AccountId,
    next_vote_id: VoteId,
    votes: HashMap<VoteId, Tally>,
}

impl TallyBook {
    /// Vote ids start at 1.
    #[must_use]
    pub fn new(address: AccountId) -> Self {
        Self {
            address,
            next_vote_id: VoteId(1),
            votes: HashMap::new(),
        }
    }

    /// Override the id the next [`Voting::new_vote`] call will return.
    pub fn set_next_vote_id(&mut self, vote_id: VoteId) {
        self.next_vote_id = vote_id;
    }

    /// Post the final result of a vote.
    ///
    /// `result == true` means the challenge was accepted.
    pub fn close(&mut self, vote_id: VoteId, result: bool, winning_total_stake: u64) -> Result<()> {
        let tally = self.tally_mut(vote_id)?;
        tally.outcome = VoteOutcome {
            closed: true,
            result,
            winning_total_stake,
        };
        tracing::debug!(vote = %vote_id, result, winning_total_stake, "Vote closed");
        Ok(())
    }

    /// Reopen a closed vote (arbitration appeal).
    pub fn reopen(&mut self, vote_id: VoteId) -> Result<()> {
        self.tally_mut(vote_id)?.outcome.closed = false;
        Ok(())
    }

    /// Record how much stake `voter` placed on the winning side.
    pub fn set_voter_winning_stake(
        &mut self,
        vote_id: VoteId,
        voter: AccountId,
        stake: u64,
    ) -> Result<()> {
        self.tally_mut(vote_id)?.winning_stakes.insert(voter, stake);
        Ok(())
    }

    /// Entry and challenger a vote was opened for.
    #[must_use]
    pub fn subject(&self, vote_id: VoteId) -> Option<(EntryId, AccountId)> {
        self.votes
            .get(&vote_id)
            .map(|t| (t.entry_id, t.challenger))
    }

    fn tally_mut(&mut self, vote_id: VoteId) -> Result<&mut Tally> {
        self.votes
            .get_mut(&vote_id)
            .ok_or_else(|| CurationError::Voting(format!("{vote_id} not found")))
    }
}

impl Voting for TallyBook {
    fn address(&self) -> AccountId {
        self.address
    }

    fn new_vote(&mut self, entry_id: EntryId, challenger: AccountId) -> Result<VoteId> {
        let vote_id = self.next_vote_id;
        if self.votes.contains_key(&vote_id) {
            return Err(CurationError::Voting(format!("{vote_id} already exists")));
        }
        self.votes.insert(
            vote_id,
            Tally {
                entry_id,
                challenger,
                outcome: VoteOutcome {
                    closed: false,
                    result: false,
                    winning_total_stake: 0,
                },
                winning_stakes: HashMap::new(),
            },
        );
        self.next_vote_id = vote_id.next();
        tracing::debug!(vote = %vote_id, entry = %entry_id, "Vote opened");
        Ok(vote_id)
    }

    fn get_vote(&self, vote_id: VoteId) -> Option<VoteOutcome> {
        self.votes.get(&vote_id).map(|t| t.outcome)
    }

    fn get_voter_winning_stake(&self, vote_id: VoteId, voter: AccountId) -> u64 {
        self.votes
            .get(&vote_id)
            .and_then(|t| t.winning_stakes.get(&voter).copied())
            .unwrap_or(0)
    }
}
