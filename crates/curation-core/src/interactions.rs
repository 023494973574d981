//! Staged outbound calls: effects before interactions.
//!
//! Resolution, removal and reward paths first describe the collaborator
//! calls they need as an [`Effects`] list. The list can only be turned into
//! an executable [`Committed`] by [`Effects::commit`], which applies the
//! internal ledger mutation first. A collaborator that misbehaves during
//! execution therefore always observes the post-update ledger.
//!
//! Registry calls are issued before any Staking call, so a refused add or
//! remove fails the step before a lock is released or a token moves.

use curation_types::{AccountId, CurationEvent, Registry, Result, Stake, Staking};

use crate::coordinator::Ledgers;

/// A call into the Registry or Staking collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutboundCall {
    Unlock(Stake),
    MoveTokens {
        from: AccountId,
        to: AccountId,
        amount: u64,
    },
    RegistryAdd(Vec<u8>),
    RegistryRemove(Vec<u8>),
}

impl OutboundCall {
    fn is_registry(&self) -> bool {
        matches!(self, Self::RegistryAdd(_) | Self::RegistryRemove(_))
    }
}

/// Planned outbound calls, not yet executable.
#[derive(Debug, Default)]
#[must_use = "effects do nothing until committed and executed"]
pub(crate) struct Effects {
    calls: Vec<OutboundCall>,
}

impl Effects {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn unlock(mut self, stake: Stake) -> Self {
        self.calls.push(OutboundCall::Unlock(stake));
        self
    }

    /// Zero-amount moves are dropped.
    pub(crate) fn move_tokens(mut self, from: AccountId, to: AccountId, amount: u64) -> Self {
        if amount > 0 {
            self.calls.push(OutboundCall::MoveTokens { from, to, amount });
        }
        self
    }

    pub(crate) fn registry_add(mut self, data: Vec<u8>) -> Self {
        self.calls.push(OutboundCall::RegistryAdd(data));
        self
    }

    pub(crate) fn registry_remove(mut self, data: Vec<u8>) -> Self {
        self.calls.push(OutboundCall::RegistryRemove(data));
        self
    }

    #[cfg(test)]
    pub(crate) fn calls(&self) -> &[OutboundCall] {
        &self.calls
    }

    /// Apply the ledger mutation, then release the calls for execution.
    ///
    /// If `mutate` fails, no call is released.
    pub(crate) fn commit<T>(
        self,
        ledgers: &mut Ledgers,
        mutate: impl FnOnce(&mut Ledgers) -> Result<T>,
    ) -> Result<(T, Committed)> {
        let value = mutate(ledgers)?;
        Ok((value, Committed { calls: self.calls }))
    }
}

/// Outbound calls whose ledger mutation is already applied.
#[derive(Debug)]
#[must_use = "committed calls must be executed"]
pub(crate) struct Committed {
    calls: Vec<OutboundCall>,
}

impl Committed {
    /// Issue Registry calls, then Staking calls in planned order, appending
    /// the matching notifications.
    ///
    /// `unlocker` is the coordinator's own address.
    pub(crate) fn execute<R: Registry, S: Staking>(
        self,
        unlocker: AccountId,
        registry: &mut R,
        staking: &mut S,
        events: &mut Vec<CurationEvent>,
    ) -> Result<()> {
        let (registry_calls, staking_calls): (Vec<_>, Vec<_>) =
            self.calls.into_iter().partition(OutboundCall::is_registry);
        for call in registry_calls.into_iter().chain(staking_calls) {
            tracing::debug!(?call, "Outbound call");
            match call {
                OutboundCall::Unlock(stake) => {
                    staking.unlock(stake.owner, unlocker, stake.lock_id)?;
                    events.push(CurationEvent::LockReleased {
                        owner: stake.owner,
                        unlocker,
                        lock_id: stake.lock_id,
                    });
                }
                OutboundCall::MoveTokens { from, to, amount } => {
                    staking.move_tokens(from, to, amount)?;
                    events.push(CurationEvent::TokensMoved { from, to, amount });
                }
                OutboundCall::RegistryAdd(data) => registry.add(&data)?,
                OutboundCall::RegistryRemove(data) => registry.remove(&data)?,
            }
        }
        Ok(())
    }
}
