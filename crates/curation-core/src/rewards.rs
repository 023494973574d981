//! Reward Distributor.
//!
//! Voters who backed the winning side of a resolved vote claim
//! `floor(pool * stake / winning_total_stake)` from the pool recorded at
//! resolution time. Each voter claims at most once per vote.
//!
//! Conservation invariant per vote:
//! ```text
//! Σ claimed rewards <= pool
//! ```
//! A claim that would break it is refused with `SupplyInvariantViolation`.

use std::collections::{HashMap, HashSet};

use curation_types::{
    AccountId, Clock, CurationError, CurationEvent, Registry, Result, RewardPool, Staking, VoteId,
    Voting, pro_rata,
};
use tracing::{info, warn};

use crate::Curation;
use crate::interactions::Effects;

/// Reward pools per resolved vote and the voters who already claimed.
#[derive(Debug, Clone, Default)]
pub struct RewardDistributor {
    pools: HashMap<VoteId, RewardPool>,
    claimed: HashSet<(VoteId, AccountId)>,
}

impl RewardDistributor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pool of a freshly resolved vote.
    ///
    /// # Errors
    /// A Voting error if the vote already has a pool (vote id reused).
    pub fn record_pool(&mut self, pool: RewardPool) -> Result<()> {
        if self.pools.contains_key(&pool.vote_id) {
            return Err(CurationError::Voting(format!(
                "{} was already resolved",
                pool.vote_id
            )));
        }
        self.pools.insert(pool.vote_id, pool);
        Ok(())
    }

    #[must_use]
    pub fn pool(&self, vote_id: VoteId) -> Option<&RewardPool> {
        self.pools.get(&vote_id)
    }

    #[must_use]
    pub fn has_claimed(&self, vote_id: VoteId, voter: AccountId) -> bool {
        self.claimed.contains(&(vote_id, voter))
    }

    /// Record a payout of `amount` to `voter`.
    ///
    /// # Errors
    /// `VoteNotResolved`, `RewardAlreadyClaimed`, or
    /// `SupplyInvariantViolation` if the pool would be overdrawn.
    pub fn mark_claimed(&mut self, vote_id: VoteId, voter: AccountId, amount: u64) -> Result<()> {
        let pool = self
            .pools
            .get_mut(&vote_id)
            .ok_or(CurationError::VoteNotResolved(vote_id))?;
        if self.claimed.contains(&(vote_id, voter)) {
            return Err(CurationError::RewardAlreadyClaimed { vote_id, voter });
        }
        let total = pool
            .claimed
            .checked_add(amount)
            .ok_or(CurationError::Overflow)?;
        if total > pool.pool {
            return Err(CurationError::SupplyInvariantViolation {
                reason: format!(
                    "{vote_id}: claims {total} exceed pool {}",
                    pool.pool
                ),
            });
        }
        pool.claimed = total;
        self.claimed.insert((vote_id, voter));
        Ok(())
    }

    /// Check every pool against its claims.
    pub fn verify(&self) -> Result<()> {
        for pool in self.pools.values() {
            if pool.claimed > pool.pool {
                return Err(CurationError::SupplyInvariantViolation {
                    reason: format!(
                        "{}: claimed {} > pool {}",
                        pool.vote_id, pool.claimed, pool.pool
                    ),
                });
            }
        }
        Ok(())
    }

    /// Tokens still held for unclaimed rewards.
    #[must_use]
    pub fn outstanding(&self) -> u128 {
        self.pools
            .values()
            .map(|p| u128::from(p.remaining()))
            .sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

impl<R: Registry, S: Staking, V: Voting, C: Clock> Curation<R, S, V, C> {
    /// Pay `voter` their share of the reward pool of `vote_id`.
    ///
    /// The voter's winning stake is read from the Voting collaborator;
    /// the pool and winning total are those recorded at resolution.
    ///
    /// # Errors
    /// `VoteNotResolved`, `RewardAlreadyClaimed`, `NoWinningStake`, or
    /// `SupplyInvariantViolation` if the reported stakes are inconsistent.
    pub fn claim_reward(&mut self, voter: AccountId, vote_id: VoteId) -> Result<u64> {
        self.atomic(|mut step| {
            let pool = step
                .ledgers
                .rewards
                .pool(vote_id)
                .cloned()
                .ok_or(CurationError::VoteNotResolved(vote_id))?;
            if step.ledgers.rewards.has_claimed(vote_id, voter) {
                warn!(voter = %voter, vote = %vote_id, "Repeated reward claim rejected");
                return Err(CurationError::RewardAlreadyClaimed { vote_id, voter });
            }
            let stake = step.voting.get_voter_winning_stake(vote_id, voter);
            if stake == 0 {
                return Err(CurationError::NoWinningStake { vote_id, voter });
            }
            let reward = pro_rata(pool.pool, stake, pool.winning_total_stake).ok_or_else(|| {
                CurationError::SupplyInvariantViolation {
                    reason: format!(
                        "{vote_id}: voter stake {stake} against winning total {}",
                        pool.winning_total_stake
                    ),
                }
            })?;

            let ((), committed) = Effects::new()
                .move_tokens(step.address, voter, reward)
                .commit(step.ledgers, |l| {
                    l.rewards.mark_claimed(vote_id, voter, reward)?;
                    l.events.push(CurationEvent::RewardClaimed {
                        vote_id,
                        voter,
                        amount: reward,
                    });
                    Ok(())
                })?;
            step.execute(committed)?;

            info!(voter = %voter, vote = %vote_id, stake, reward, "Reward claimed");
            Ok(reward)
        })
    }
}
