//! Contracts of the external collaborators the coordinator consumes.
//!
//! The coordinator depends only on these traits. `curation-collab` provides
//! the in-process implementations; any other backend (a chain client, an RPC
//! proxy) plugs in the same way.

use crate::{AccountId, EntryId, Lock, LockId, Result, VoteId, VoteOutcome};

/// The shared list of admitted entries.
pub trait Registry {
    /// Service address of this registry. Must not be zero.
    fn address(&self) -> AccountId;
    fn exists(&self, data: &[u8]) -> bool;
    fn add(&mut self, data: &[u8]) -> Result<()>;
    fn remove(&mut self, data: &[u8]) -> Result<()>;
}

/// Token custody and lock management.
pub trait Staking {
    /// Service address of this staking service. Must not be zero.
    fn address(&self) -> AccountId;
    /// Look up the lock `(owner, lock_id)`.
    fn get_lock(&self, owner: AccountId, lock_id: LockId) -> Option<Lock>;
    /// Release a lock. Only the lock's designated unlocker may do this.
    fn unlock(&mut self, owner: AccountId, unlocker: AccountId, lock_id: LockId) -> Result<()>;
    /// Move unlocked tokens between accounts.
    fn move_tokens(&mut self, from: AccountId, to: AccountId, amount: u64) -> Result<()>;
}

/// The delegated arbitration component deciding challenges.
pub trait Voting {
    /// Service address of this voting app. Must not be zero.
    fn address(&self) -> AccountId;
    /// Open a vote on a challenged entry.
    fn new_vote(&mut self, entry_id: EntryId, challenger: AccountId) -> Result<VoteId>;
    fn get_vote(&self, vote_id: VoteId) -> Option<VoteOutcome>;
    /// Stake the voter placed on the winning side, zero if none.
    fn get_voter_winning_stake(&self, vote_id: VoteId, voter: AccountId) -> u64;
}
