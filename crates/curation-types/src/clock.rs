//! Time source abstraction.
//!
//! The coordinator never reads wall-clock time directly; every time-gated
//! precondition is checked against the injected [`Clock`].

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const MAX: Self = Self(u64::MAX);

    /// `self + secs`, saturating at [`Timestamp::MAX`].
    #[must_use]
    pub fn plus(self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    #[must_use]
    pub fn as_secs(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "t+{}", self.0),
        }
    }
}

/// Supplies the prevailing timestamp at call time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(u64::try_from(Utc::now().timestamp()).unwrap_or(0))
    }
}

/// Settable clock for deterministic tests and simulations.
///
/// Clones share the same underlying time, so a test can keep a handle
/// while the coordinator owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    secs: Arc<AtomicU64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: Timestamp) -> Self {
        Self {
            secs: Arc::new(AtomicU64::new(start.0)),
        }
    }

    pub fn set(&self, at: Timestamp) {
        self.secs.store(at.0, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        let now = self.secs.load(Ordering::SeqCst);
        self.secs.store(now.saturating_add(secs), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.secs.load(Ordering::SeqCst))
    }
}
