//! Set-backed registry of admitted entries.

use std::collections::BTreeSet;

use curation_types::{AccountId, CurationError, EntryId, Registry, Result};

/// The in-process Registry collaborator.
#[derive(Debug, Clone)]
pub struct SetRegistry {
    address: AccountId,
    entries: BTreeSet<Vec<u8>>,
}

impl SetRegistry {
    #[must_use]
    pub fn new(address: AccountId) -> Self {
        Self {
            address,
            entries: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate admitted data in byte order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(Vec::as_slice)
    }
}

impl Registry for SetRegistry {
    fn address(&self) -> AccountId {
        self.address
    }

    fn exists(&self, data: &[u8]) -> bool {
        self.entries.contains(data)
    }

    fn add(&mut self, data: &[u8]) -> Result<()> {
        if !self.entries.insert(data.to_vec()) {
            return Err(CurationError::Registry(format!(
                "{} already present",
                EntryId::for_data(data)
            )));
        }
        tracing::debug!(entry = %EntryId::for_data(data), "Registry entry added");
        Ok(())
    }

    fn remove(&mut self, data: &[u8]) -> Result<()> {
        if !self.entries.remove(data) {
            return Err(CurationError::Registry(format!(
                "{} not present",
                EntryId::for_data(data)
            )));
        }
        tracing::debug!(entry = %EntryId::for_data(data), "Registry entry removed");
        Ok(())
    }
}
