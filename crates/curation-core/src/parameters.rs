//! Parameter Store.
//!
//! Holds `min_deposit`, `apply_stage_len` and `dispensation_pct` together
//! with the administrator allowed to change them. Changing `min_deposit`
//! only affects future touch-and-remove checks and new locks; live
//! challenges keep the dispensation they snapshotted.

use curation_types::{
    AccountId, Clock, CurationError, CurationEvent, ParameterKind, Parameters, Pct, Registry,
    Result, Staking, Voting,
};
use tracing::{info, warn};

use crate::Curation;

/// Admin-gated parameter set.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    admin: AccountId,
    params: Parameters,
}

impl ParameterStore {
    #[must_use]
    pub fn new(admin: AccountId, params: Parameters) -> Self {
        Self { admin, params }
    }

    #[must_use]
    pub fn admin(&self) -> AccountId {
        self.admin
    }

    #[must_use]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    #[must_use]
    pub fn is_admin(&self, caller: AccountId) -> bool {
        caller == self.admin
    }

    /// # Errors
    /// [`CurationError::Unauthorized`] unless `caller` is the admin.
    pub fn ensure_admin(&self, caller: AccountId, action: &str) -> Result<()> {
        if !self.is_admin(caller) {
            warn!(caller = %caller, action, "Unauthorized parameter change");
            return Err(CurationError::Unauthorized {
                caller,
                action: action.to_string(),
            });
        }
        Ok(())
    }

    /// Hand the admin capability to another account.
    pub fn transfer_admin(&mut self, caller: AccountId, new_admin: AccountId) -> Result<()> {
        self.ensure_admin(caller, "transfer admin")?;
        if new_admin.is_zero() {
            return Err(CurationError::InvalidServiceAddress {
                role: "admin".to_string(),
                address: new_admin,
            });
        }
        self.admin = new_admin;
        Ok(())
    }

    pub fn set_min_deposit(&mut self, caller: AccountId, value: u64) -> Result<()> {
        self.ensure_admin(caller, "set min deposit")?;
        self.params.min_deposit = value;
        Ok(())
    }

    pub fn set_apply_stage_len(&mut self, caller: AccountId, value: u64) -> Result<()> {
        self.ensure_admin(caller, "set apply stage length")?;
        self.params.apply_stage_len = value;
        Ok(())
    }

    /// # Errors
    /// `Unauthorized`, or `PctOutOfRange` if `raw > 10^18`.
    pub fn set_dispensation_pct(&mut self, caller: AccountId, raw: u64) -> Result<Pct> {
        self.ensure_admin(caller, "set dispensation pct")?;
        let pct = Pct::new(raw)?;
        self.params.dispensation_pct = pct;
        Ok(pct)
    }
}

fn changed(parameter: ParameterKind, value: impl ToString) -> CurationEvent {
    let value = value.to_string();
    info!(parameter = %parameter, value = %value, "Parameter changed");
    CurationEvent::ParameterChanged { parameter, value }
}

impl<R: Registry, S: Staking, V: Voting, C: Clock> Curation<R, S, V, C> {
    pub fn set_min_deposit(&mut self, caller: AccountId, value: u64) -> Result<()> {
        self.atomic(|mut step| {
            step.ledgers.params.set_min_deposit(caller, value)?;
            step.ledgers
                .events
                .push(changed(ParameterKind::MinDeposit, value));
            Ok(())
        })
    }

    pub fn set_apply_stage_len(&mut self, caller: AccountId, value: u64) -> Result<()> {
        self.atomic(|mut step| {
            step.ledgers.params.set_apply_stage_len(caller, value)?;
            step.ledgers
                .events
                .push(changed(ParameterKind::ApplyStageLen, value));
            Ok(())
        })
    }

    /// `raw` is a fixed-point fraction with a `10^18` denominator.
    pub fn set_dispensation_pct(&mut self, caller: AccountId, raw: u64) -> Result<()> {
        self.atomic(|mut step| {
            let pct = step.ledgers.params.set_dispensation_pct(caller, raw)?;
            step.ledgers
                .events
                .push(changed(ParameterKind::DispensationPct, pct.raw()));
            Ok(())
        })
    }

    /// Swap in a new Voting collaborator and return the previous one.
    ///
    /// Open challenges keep their vote ids; they are resolved against
    /// whichever voting app is installed at resolution time. A new app that
    /// does not know those ids leaves the challenges unresolvable and both
    /// deposits locked. Unclaimed reward pools read voter stakes from the
    /// new app as well, so voters it does not know cannot claim.
    ///
    /// # Errors
    /// `Unauthorized`, or `InvalidServiceAddress` if `voting` has the zero
    /// address. On error the current app stays installed and `voting` is
    /// dropped.
    pub fn set_voting_app(&mut self, caller: AccountId, voting: V) -> Result<V> {
        let address = voting.address();
        self.atomic(|mut step| {
            step.ledgers.params.ensure_admin(caller, "set voting app")?;
            if address.is_zero() {
                return Err(CurationError::InvalidServiceAddress {
                    role: "voting".to_string(),
                    address,
                });
            }
            step.ledgers
                .events
                .push(changed(ParameterKind::VotingApp, address));
            Ok(())
        })?;
        Ok(self.replace_voting(voting))
    }

    /// Hand the admin capability to another account.
    pub fn transfer_admin(&mut self, caller: AccountId, new_admin: AccountId) -> Result<()> {
        self.atomic(|mut step| {
            step.ledgers.params.transfer_admin(caller, new_admin)?;
            info!(admin = %new_admin, "Admin transferred");
            Ok(())
        })
    }
}
