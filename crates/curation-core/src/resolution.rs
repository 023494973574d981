//! Resolution Engine.
//!
//! Once the vote behind a challenge closes, the losing side's deposit is
//! split: `floor(deposit * pct / 10^18)` goes to the winner, the rest is
//! moved to the coordinator's own account as the voter reward pool.
//!
//! ```text
//!   verdict            loser        entry
//!   ─────────────────  ───────────  ──────────────────────────────
//!   challenge rejected challenger   registered (if not already)
//!   challenge accepted applicant    removed from registry, deleted
//! ```
//!
//! Both locks are released in either case. The Challenge record and both
//! used-lock entries are dropped before any outbound call is issued.

use curation_types::{
    Clock, CurationError, CurationEvent, EntryId, Pct, Registry, Result, RewardPool, Stake,
    Staking, Verdict, VoteId, Voting,
};
use tracing::info;

use crate::Curation;
use crate::interactions::Effects;

/// How a losing deposit is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redistribution {
    /// The loser's deposit.
    pub deposit: u64,
    /// Paid to the winner.
    pub dispensed: u64,
    /// Kept for voters on the winning side.
    pub pool: u64,
}

impl Redistribution {
    #[must_use]
    pub fn compute(deposit: u64, pct: Pct) -> Self {
        let dispensed = pct.apply(deposit);
        Self {
            deposit,
            dispensed,
            pool: deposit.saturating_sub(dispensed),
        }
    }
}

/// Result of a successful [`Curation::resolve_challenge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub entry_id: EntryId,
    pub vote_id: VoteId,
    pub verdict: Verdict,
    pub winner: Stake,
    pub loser: Stake,
    pub redistribution: Redistribution,
}

impl<R: Registry, S: Staking, V: Voting, C: Clock> Curation<R, S, V, C> {
    /// Settle a challenge whose vote has closed.
    ///
    /// Exactly one call per challenge succeeds; afterwards the challenge no
    /// longer exists and a repeat fails with `ChallengeNotFound`.
    ///
    /// # Errors
    /// `ChallengeNotFound`, `VoteNotClosed`, a Voting error if the vote is
    /// unknown, or a Staking/Registry failure while paying out.
    pub fn resolve_challenge(&mut self, entry_id: EntryId) -> Result<Resolution> {
        self.atomic(|mut step| {
            let challenge = step
                .ledgers
                .challenges
                .get(entry_id)
                .cloned()
                .ok_or(CurationError::ChallengeNotFound(entry_id))?;
            let app = step
                .ledgers
                .applications
                .get(entry_id)
                .cloned()
                .ok_or(CurationError::ApplicationNotFound(entry_id))?;
            let vote_id = challenge.vote_id;
            let outcome = step
                .voting
                .get_vote(vote_id)
                .ok_or_else(|| CurationError::Voting(format!("{vote_id} is unknown")))?;
            if !outcome.closed {
                return Err(CurationError::VoteNotClosed(vote_id));
            }

            let verdict = Verdict::from_result(outcome.result);
            let (winner, loser) = match verdict {
                Verdict::ChallengeAccepted => (challenge.stake(), app.stake()),
                Verdict::ChallengeRejected => (app.stake(), challenge.stake()),
            };
            let split = Redistribution::compute(loser.amount, challenge.dispensation_pct);

            let mut effects = Effects::new();
            if app.stake_locked {
                effects = effects.unlock(app.stake());
            }
            effects = effects
                .unlock(challenge.stake())
                .move_tokens(loser.owner, winner.owner, split.dispensed)
                .move_tokens(loser.owner, step.address, split.pool);
            let newly_registered = verdict == Verdict::ChallengeRejected && !app.registered;
            match verdict {
                Verdict::ChallengeRejected
                    if newly_registered && !step.registry.exists(&app.data) =>
                {
                    effects = effects.registry_add(app.data.clone());
                }
                Verdict::ChallengeAccepted if step.registry.exists(&app.data) => {
                    effects = effects.registry_remove(app.data.clone());
                }
                _ => {}
            }

            let ((), committed) = effects.commit(step.ledgers, |l| {
                l.challenges.remove(entry_id)?;
                l.used_locks.release(&challenge.stake());
                if app.stake_locked {
                    l.used_locks.release(&app.stake());
                }
                match verdict {
                    Verdict::ChallengeRejected => l.applications.settle_survivor(entry_id)?,
                    Verdict::ChallengeAccepted => {
                        l.applications.remove(entry_id)?;
                    }
                }
                l.rewards.record_pool(RewardPool {
                    vote_id,
                    entry_id,
                    verdict,
                    loser: loser.owner,
                    pool: split.pool,
                    winning_total_stake: outcome.winning_total_stake,
                    claimed: 0,
                })?;
                l.events.push(CurationEvent::ChallengeResolved {
                    entry_id,
                    vote_id,
                    verdict,
                    dispensed: split.dispensed,
                    pool: split.pool,
                });
                if newly_registered {
                    l.events.push(CurationEvent::ApplicationRegistered { entry_id });
                }
                if verdict == Verdict::ChallengeAccepted {
                    l.events.push(CurationEvent::ApplicationRemoved { entry_id });
                }
                Ok(())
            })?;
            step.execute(committed)?;

            info!(
                entry = %entry_id,
                vote = %vote_id,
                verdict = %verdict,
                winner = %winner.owner,
                dispensed = split.dispensed,
                pool = split.pool,
                "Challenge resolved"
            );
            Ok(Resolution {
                entry_id,
                vote_id,
                verdict,
                winner,
                loser,
                redistribution: split,
            })
        })
    }
}
