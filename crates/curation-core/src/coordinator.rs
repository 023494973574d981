//! The `Curation` coordinator.
//!
//! Owns the collaborators and the internal ledgers, and runs every public
//! operation as one atomic step: the ledgers are snapshotted before the
//! step and restored if it fails, so a failed call leaves applications,
//! challenges, used locks, reward pools, parameters and the event log
//! exactly as they were.
//!
//! Collaborator side effects are not rolled back. The host is expected to
//! treat collaborator calls as part of the same transactional step, as a
//! chain runtime does.
//!
//! The operations themselves live next to their ledgers:
//! [`applications`](crate::applications), [`challenges`](crate::challenges),
//! [`resolution`](crate::resolution), [`rewards`](crate::rewards) and
//! [`parameters`](crate::parameters).

use curation_types::{
    AccountId, Application, Challenge, Clock, CurationConfig, CurationError, CurationEvent,
    EntryId, LockId, Parameters, Registry, Result, RewardPool, Staking, Timestamp, VoteId,
    VoteOutcome, Voting,
};
use tracing::info;

use crate::applications::ApplicationLedger;
use crate::challenges::ChallengeLedger;
use crate::interactions::Committed;
use crate::parameters::ParameterStore;
use crate::rewards::RewardDistributor;
use crate::used_locks::UsedLockTracker;

/// Internal state, present once the coordinator is initialized.
#[derive(Debug, Clone)]
pub(crate) struct Ledgers {
    pub(crate) params: ParameterStore,
    pub(crate) applications: ApplicationLedger,
    pub(crate) challenges: ChallengeLedger,
    pub(crate) used_locks: UsedLockTracker,
    pub(crate) rewards: RewardDistributor,
    pub(crate) events: Vec<CurationEvent>,
}

impl Ledgers {
    pub(crate) fn new(params: ParameterStore) -> Self {
        Self {
            params,
            applications: ApplicationLedger::new(),
            challenges: ChallengeLedger::new(),
            used_locks: UsedLockTracker::new(),
            rewards: RewardDistributor::new(),
            events: Vec::new(),
        }
    }
}

/// Split borrow of the coordinator handed to an operation body.
pub(crate) struct Step<'a, R, S, V> {
    pub(crate) address: AccountId,
    pub(crate) now: Timestamp,
    pub(crate) registry: &'a mut R,
    pub(crate) staking: &'a mut S,
    pub(crate) voting: &'a mut V,
    pub(crate) ledgers: &'a mut Ledgers,
}

impl<R: Registry, S: Staking, V> Step<'_, R, S, V> {
    /// Issue calls released by [`Effects::commit`](crate::interactions::Effects::commit).
    pub(crate) fn execute(&mut self, committed: Committed) -> Result<()> {
        committed.execute(
            self.address,
            &mut *self.registry,
            &mut *self.staking,
            &mut self.ledgers.events,
        )
    }
}

/// Token-curated registry coordinator.
///
/// `R`, `S` and `V` are the Registry, Staking and Voting collaborators;
/// `C` supplies the current time.
#[derive(Debug)]
pub struct Curation<R, S, V, C> {
    address: AccountId,
    registry: R,
    staking: S,
    voting: V,
    clock: C,
    state: Option<Ledgers>,
}

impl<R: Registry, S: Staking, V: Voting, C: Clock> Curation<R, S, V, C> {
    /// Wire a coordinator to its collaborators. Every state-mutating call
    /// fails with `NotInitialized` until [`initialize`](Self::initialize).
    ///
    /// `address` is the coordinator's own account: the unlocker every
    /// deposit lock must designate, and the holder of voter reward pools.
    pub fn new(address: AccountId, registry: R, staking: S, voting: V, clock: C) -> Self {
        Self {
            address,
            registry,
            staking,
            voting,
            clock,
            state: None,
        }
    }

    /// One-time setup.
    ///
    /// # Errors
    /// `AlreadyInitialized` on a second call, `InvalidServiceAddress` if the
    /// coordinator, the admin or any collaborator has the zero address.
    pub fn initialize(&mut self, admin: AccountId, params: Parameters) -> Result<()> {
        if self.state.is_some() {
            return Err(CurationError::AlreadyInitialized);
        }
        for (role, address) in [
            ("curation", self.address),
            ("admin", admin),
            ("registry", self.registry.address()),
            ("staking", self.staking.address()),
            ("voting", self.voting.address()),
        ] {
            if address.is_zero() {
                return Err(CurationError::InvalidServiceAddress {
                    role: role.to_string(),
                    address,
                });
            }
        }

        self.state = Some(Ledgers::new(ParameterStore::new(admin, params)));
        info!(
            curation = %self.address,
            admin = %admin,
            min_deposit = params.min_deposit,
            apply_stage_len = params.apply_stage_len,
            dispensation_pct = %params.dispensation_pct,
            "Curation initialized"
        );
        Ok(())
    }

    /// [`initialize`](Self::initialize) from a validated configuration.
    pub fn initialize_from_config(&mut self, admin: AccountId, config: &CurationConfig) -> Result<()> {
        let params = Parameters::try_from(config)?;
        self.initialize(admin, params)
    }

    /// Run `op` as one all-or-nothing step.
    pub(crate) fn atomic<T>(
        &mut self,
        op: impl FnOnce(Step<'_, R, S, V>) -> Result<T>,
    ) -> Result<T> {
        let ledgers = self.state.as_mut().ok_or(CurationError::NotInitialized)?;
        let snapshot = ledgers.clone();
        let step = Step {
            address: self.address,
            now: self.clock.now(),
            registry: &mut self.registry,
            staking: &mut self.staking,
            voting: &mut self.voting,
            ledgers,
        };
        match op(step) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.state = Some(snapshot);
                Err(err)
            }
        }
    }

    pub(crate) fn ledgers(&self) -> Option<&Ledgers> {
        self.state.as_ref()
    }

    // -----------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn address(&self) -> AccountId {
        self.address
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    #[must_use]
    pub fn admin(&self) -> Option<AccountId> {
        self.ledgers().map(|l| l.params.admin())
    }

    #[must_use]
    pub fn parameters(&self) -> Option<Parameters> {
        self.ledgers().map(|l| *l.params.params())
    }

    #[must_use]
    pub fn application(&self, entry_id: EntryId) -> Option<&Application> {
        self.ledgers()?.applications.get(entry_id)
    }

    #[must_use]
    pub fn challenge(&self, entry_id: EntryId) -> Option<&Challenge> {
        self.ledgers()?.challenges.get(entry_id)
    }

    /// Current state of a vote as reported by the Voting collaborator.
    #[must_use]
    pub fn vote(&self, vote_id: VoteId) -> Option<VoteOutcome> {
        self.voting.get_vote(vote_id)
    }

    #[must_use]
    pub fn reward_pool(&self, vote_id: VoteId) -> Option<&RewardPool> {
        self.ledgers()?.rewards.pool(vote_id)
    }

    #[must_use]
    pub fn is_lock_used(&self, owner: AccountId, lock_id: LockId) -> bool {
        self.ledgers()
            .is_some_and(|l| l.used_locks.is_used(owner, lock_id))
    }

    #[must_use]
    pub fn has_claimed(&self, vote_id: VoteId, voter: AccountId) -> bool {
        self.ledgers()
            .is_some_and(|l| l.rewards.has_claimed(vote_id, voter))
    }

    /// Reward pool tokens not yet claimed, across all resolved votes.
    #[must_use]
    pub fn outstanding_rewards(&self) -> u128 {
        self.ledgers().map_or(0, |l| l.rewards.outstanding())
    }

    /// Check that no reward pool paid out more than it held.
    pub fn verify_reward_pools(&self) -> Result<()> {
        self.ledgers()
            .ok_or(CurationError::NotInitialized)?
            .rewards
            .verify()
    }

    /// Event log since initialization (or the last drain).
    #[must_use]
    pub fn events(&self) -> &[CurationEvent] {
        self.ledgers()
            .map(|l| l.events.as_slice())
            .unwrap_or_default()
    }

    pub fn drain_events(&mut self) -> Vec<CurationEvent> {
        self.state
            .as_mut()
            .map(|l| std::mem::take(&mut l.events))
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------
    // Collaborators
    // -----------------------------------------------------------------

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn staking(&self) -> &S {
        &self.staking
    }

    pub fn staking_mut(&mut self) -> &mut S {
        &mut self.staking
    }

    pub fn voting(&self) -> &V {
        &self.voting
    }

    pub fn voting_mut(&mut self) -> &mut V {
        &mut self.voting
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub(crate) fn replace_voting(&mut self, voting: V) -> V {
        std::mem::replace(&mut self.voting, voting)
    }
}
