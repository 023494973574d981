//! Challenge Ledger.
//!
//! A challenge contests a live application by locking a matching deposit
//! and opening a vote in the Voting collaborator. If the application's
//! deposit no longer covers the current `min_deposit`, the challenge
//! short-circuits into a touch-and-remove: the application is deleted and
//! its lock released without any vote or token movement.

use std::collections::HashMap;

use curation_types::{
    AccountId, Application, Challenge, Clock, CurationError, CurationEvent, EntryId, LockId,
    Registry, Result, Staking, VoteId, Voting,
};
use tracing::{info, warn};

use crate::Curation;
use crate::coordinator::Step;
use crate::interactions::Effects;
use crate::lock_adapter::LockAdapter;

/// Live challenges keyed by the entry they contest.
#[derive(Debug, Clone, Default)]
pub struct ChallengeLedger {
    challenges: HashMap<EntryId, Challenge>,
}

impl ChallengeLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, entry_id: EntryId) -> Option<&Challenge> {
        self.challenges.get(&entry_id)
    }

    #[must_use]
    pub fn contains(&self, entry_id: EntryId) -> bool {
        self.challenges.contains_key(&entry_id)
    }

    /// # Errors
    /// [`CurationError::AlreadyChallenged`] if a challenge is live.
    pub fn insert(&mut self, entry_id: EntryId, challenge: Challenge) -> Result<()> {
        if self.challenges.contains_key(&entry_id) {
            return Err(CurationError::AlreadyChallenged(entry_id));
        }
        self.challenges.insert(entry_id, challenge);
        Ok(())
    }

    /// # Errors
    /// [`CurationError::ChallengeNotFound`] if never challenged or already
    /// resolved.
    pub fn remove(&mut self, entry_id: EntryId) -> Result<Challenge> {
        self.challenges
            .remove(&entry_id)
            .ok_or(CurationError::ChallengeNotFound(entry_id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }
}

/// What a call to [`Curation::challenge_application`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// A challenge was recorded and a vote opened.
    Opened(VoteId),
    /// The application was under-collateralized and was deleted instead.
    TouchedAndRemoved,
}

impl<R: Registry, S: Staking, V: Voting, C: Clock> Curation<R, S, V, C> {
    /// Challenge a live application with the lock `(challenger, lock_id)`.
    ///
    /// # Errors
    /// `ApplicationNotFound`, `AlreadyChallenged`, `ApplicationUnbacked`,
    /// lock validation errors, `LockAlreadyUsed`, or a Voting failure.
    pub fn challenge_application(
        &mut self,
        challenger: AccountId,
        entry_id: EntryId,
        lock_id: LockId,
    ) -> Result<ChallengeOutcome> {
        self.atomic(|mut step| {
            let params = *step.ledgers.params.params();
            let app = step
                .ledgers
                .applications
                .get(entry_id)
                .cloned()
                .ok_or(CurationError::ApplicationNotFound(entry_id))?;
            if step.ledgers.challenges.contains(entry_id) {
                return Err(CurationError::AlreadyChallenged(entry_id));
            }
            if !app.stake_locked {
                return Err(CurationError::ApplicationUnbacked(entry_id));
            }

            if app.deposit_amount < params.min_deposit {
                return touch_and_remove(&mut step, entry_id, challenger, app);
            }

            let stake = LockAdapter::new(step.address).validate(
                &*step.staking,
                challenger,
                lock_id,
                &params,
                step.now,
            )?;
            if step.ledgers.used_locks.is_used(challenger, lock_id) {
                warn!(owner = %challenger, lock = %lock_id, "Lock reuse rejected");
                return Err(CurationError::LockAlreadyUsed {
                    owner: challenger,
                    lock_id,
                });
            }

            // The id is only known once the vote is open; a refused id leaves
            // that vote behind in the voting app.
            let vote_id = step.voting.new_vote(entry_id, challenger)?;
            if step.ledgers.rewards.pool(vote_id).is_some() {
                return Err(CurationError::Voting(format!(
                    "{vote_id} was already resolved"
                )));
            }

            step.ledgers.used_locks.mark_used(challenger, lock_id)?;
            step.ledgers.challenges.insert(
                entry_id,
                Challenge {
                    challenger,
                    submitted_at: step.now,
                    deposit_amount: stake.amount,
                    lock_id,
                    vote_id,
                    dispensation_pct: params.dispensation_pct,
                },
            )?;
            step.ledgers.events.push(CurationEvent::ChallengeCreated {
                entry_id,
                challenger,
                vote_id: Some(vote_id),
            });

            info!(
                entry = %entry_id,
                challenger = %challenger,
                vote = %vote_id,
                deposit = stake.amount,
                "Challenge created"
            );
            Ok(ChallengeOutcome::Opened(vote_id))
        })
    }
}

fn touch_and_remove<R: Registry, S: Staking, V>(
    step: &mut Step<'_, R, S, V>,
    entry_id: EntryId,
    challenger: AccountId,
    app: Application,
) -> Result<ChallengeOutcome> {
    let stake = app.stake();
    let mut effects = Effects::new().unlock(stake);
    if app.registered && step.registry.exists(&app.data) {
        effects = effects.registry_remove(app.data);
    }
    let ((), committed) = effects.commit(step.ledgers, |l| {
        l.applications.remove(entry_id)?;
        l.used_locks.release(&stake);
        l.events.push(CurationEvent::ChallengeCreated {
            entry_id,
            challenger,
            vote_id: None,
        });
        l.events.push(CurationEvent::ApplicationRemoved { entry_id });
        Ok(())
    })?;
    step.execute(committed)?;

    info!(
        entry = %entry_id,
        challenger = %challenger,
        deposit = stake.amount,
        "Touch-and-remove"
    );
    Ok(ChallengeOutcome::TouchedAndRemoved)
}
