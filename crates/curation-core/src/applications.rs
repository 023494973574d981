//! Application Ledger: creation, unchallenged registration, withdrawal.

use std::collections::HashMap;

use curation_types::{
    AccountId, Application, Clock, CurationError, CurationEvent, EntryId, LockId, Registry,
    Result, Staking, Voting,
};
use tracing::{info, warn};

use crate::Curation;
use crate::interactions::Effects;
use crate::lock_adapter::LockAdapter;

/// Live applications keyed by entry id.
///
/// At most one live application exists per distinct `data` value, since the
/// entry id is derived from the data.
#[derive(Debug, Clone, Default)]
pub struct ApplicationLedger {
    applications: HashMap<EntryId, Application>,
}

impl ApplicationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, entry_id: EntryId) -> Option<&Application> {
        self.applications.get(&entry_id)
    }

    #[must_use]
    pub fn contains(&self, entry_id: EntryId) -> bool {
        self.applications.contains_key(&entry_id)
    }

    /// Record a new application.
    ///
    /// # Errors
    /// [`CurationError::DuplicateApplication`] if one is already live.
    pub fn insert(&mut self, application: Application) -> Result<EntryId> {
        let entry_id = application.entry_id();
        if self.applications.contains_key(&entry_id) {
            return Err(CurationError::DuplicateApplication(entry_id));
        }
        self.applications.insert(entry_id, application);
        Ok(entry_id)
    }

    pub fn mark_registered(&mut self, entry_id: EntryId) -> Result<()> {
        let app = self
            .applications
            .get_mut(&entry_id)
            .ok_or(CurationError::ApplicationNotFound(entry_id))?;
        if app.registered {
            return Err(CurationError::AlreadyRegistered(entry_id));
        }
        app.registered = true;
        Ok(())
    }

    /// A rejected challenge leaves the entry admitted with its lock
    /// released back to the applicant.
    pub fn settle_survivor(&mut self, entry_id: EntryId) -> Result<()> {
        let app = self
            .applications
            .get_mut(&entry_id)
            .ok_or(CurationError::ApplicationNotFound(entry_id))?;
        app.registered = true;
        app.stake_locked = false;
        Ok(())
    }

    pub fn remove(&mut self, entry_id: EntryId) -> Result<Application> {
        self.applications
            .remove(&entry_id)
            .ok_or(CurationError::ApplicationNotFound(entry_id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.applications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}

impl<R: Registry, S: Staking, V: Voting, C: Clock> Curation<R, S, V, C> {
    /// Propose `data` for the registry, backed by the lock
    /// `(submitter, lock_id)`.
    ///
    /// # Errors
    /// `EmptyData`, `DuplicateApplication`, `DataAlreadyRegistered`,
    /// `LockNotFound`, `InvalidLock` or `LockAlreadyUsed`.
    pub fn new_application(
        &mut self,
        submitter: AccountId,
        data: Vec<u8>,
        lock_id: LockId,
    ) -> Result<EntryId> {
        self.atomic(|mut step| {
            if data.is_empty() {
                return Err(CurationError::EmptyData);
            }
            let entry_id = EntryId::for_data(&data);
            if step.ledgers.applications.contains(entry_id) {
                return Err(CurationError::DuplicateApplication(entry_id));
            }
            if step.registry.exists(&data) {
                return Err(CurationError::DataAlreadyRegistered(entry_id));
            }

            let stake = LockAdapter::new(step.address).validate(
                &*step.staking,
                submitter,
                lock_id,
                step.ledgers.params.params(),
                step.now,
            )?;
            step.ledgers
                .used_locks
                .mark_used(submitter, lock_id)
                .inspect_err(|_| warn!(owner = %submitter, lock = %lock_id, "Lock reuse rejected"))?;
            step.ledgers
                .applications
                .insert(Application::new(stake, data, step.now))?;
            step.ledgers.events.push(CurationEvent::ApplicationCreated {
                entry_id,
                applicant: submitter,
            });

            info!(
                entry = %entry_id,
                applicant = %submitter,
                deposit = stake.amount,
                "Application created"
            );
            Ok(entry_id)
        })
    }

    /// Admit an application whose apply stage elapsed without a challenge.
    ///
    /// Anyone may call this. Succeeds at `submitted_at + apply_stage_len`
    /// exactly.
    ///
    /// # Errors
    /// `ApplicationNotFound`, `AlreadyRegistered`, `ChallengePending` or
    /// `ApplyStageNotElapsed`.
    pub fn register_unchallenged_application(&mut self, entry_id: EntryId) -> Result<()> {
        self.atomic(|mut step| {
            let apply_stage_len = step.ledgers.params.params().apply_stage_len;
            let app = step
                .ledgers
                .applications
                .get(entry_id)
                .ok_or(CurationError::ApplicationNotFound(entry_id))?;
            if app.registered {
                return Err(CurationError::AlreadyRegistered(entry_id));
            }
            if step.ledgers.challenges.contains(entry_id) {
                return Err(CurationError::ChallengePending(entry_id));
            }
            let ready_at = app.registrable_at(apply_stage_len);
            if step.now < ready_at {
                return Err(CurationError::ApplyStageNotElapsed {
                    entry_id,
                    ready_at: ready_at.as_secs(),
                    now: step.now.as_secs(),
                });
            }

            let mut effects = Effects::new();
            if !step.registry.exists(&app.data) {
                effects = effects.registry_add(app.data.clone());
            }
            let ((), committed) = effects.commit(step.ledgers, |l| {
                l.applications.mark_registered(entry_id)?;
                l.events
                    .push(CurationEvent::ApplicationRegistered { entry_id });
                Ok(())
            })?;
            step.execute(committed)?;

            info!(entry = %entry_id, "Application registered");
            Ok(())
        })
    }

    /// Withdraw an application. Only its applicant may do this, and only
    /// while no challenge is pending.
    ///
    /// Releases the backing lock (if still held) and removes the data from
    /// the Registry if it was admitted.
    ///
    /// # Errors
    /// `ApplicationNotFound`, `NotApplicant` or `ChallengePending`.
    pub fn remove_application(&mut self, caller: AccountId, entry_id: EntryId) -> Result<()> {
        self.atomic(|mut step| {
            let app = step
                .ledgers
                .applications
                .get(entry_id)
                .cloned()
                .ok_or(CurationError::ApplicationNotFound(entry_id))?;
            if app.applicant != caller {
                warn!(caller = %caller, entry = %entry_id, "Withdrawal by non-applicant rejected");
                return Err(CurationError::NotApplicant { caller, entry_id });
            }
            if step.ledgers.challenges.contains(entry_id) {
                return Err(CurationError::ChallengePending(entry_id));
            }

            let stake = app.stake();
            let mut effects = Effects::new();
            if app.stake_locked {
                effects = effects.unlock(stake);
            }
            if app.registered && step.registry.exists(&app.data) {
                effects = effects.registry_remove(app.data);
            }
            let ((), committed) = effects.commit(step.ledgers, |l| {
                l.applications.remove(entry_id)?;
                if app.stake_locked {
                    l.used_locks.release(&stake);
                }
                l.events.push(CurationEvent::ApplicationRemoved { entry_id });
                Ok(())
            })?;
            step.execute(committed)?;

            info!(entry = %entry_id, applicant = %caller, "Application withdrawn");
            Ok(())
        })
    }
}
