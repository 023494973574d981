//! # curation-core
//!
//! The **curation** coordinator: a token-curated registry that admits data
//! entries on locked stake and settles disputes through a delegated vote.
//!
//! - [`Curation`]: the coordinator facade, one atomic step per operation
//! - [`LockAdapter`]: hard gate for deposit locks
//! - [`UsedLockTracker`]: one live application or challenge per lock
//! - [`ApplicationLedger`]: create, register, withdraw
//! - [`ChallengeLedger`]: challenge or touch-and-remove
//! - [`Redistribution`]: the loser's deposit split at resolution
//! - [`RewardDistributor`]: pro-rata voter rewards with a conservation check
//! - [`ParameterStore`]: admin-gated economic parameters
//!
//! ## Entry Lifecycle
//!
//! ```text
//! new_application ──▶ PENDING ──register_unchallenged_application──▶ REGISTERED
//!                       │                                              │
//!                       └──────────── challenge_application ◀──────────┘
//!                                           │
//!                 ┌─────────────────────────┼──────────────────────┐
//!                 ▼                         ▼                      ▼
//!         touch-and-remove           resolve_challenge       resolve_challenge
//!          (deleted, no vote)       rejected: REGISTERED     accepted: deleted
//!                                           │                      │
//!                                           └──── claim_reward ◀───┘
//! ```
//!
//! Every path that moves tokens or releases locks commits its ledger
//! changes first and only then calls out to the collaborators.

pub mod applications;
pub mod challenges;
pub mod coordinator;
mod interactions;
pub mod lock_adapter;
pub mod parameters;
pub mod resolution;
pub mod rewards;
pub mod used_locks;

pub use applications::ApplicationLedger;
pub use challenges::{ChallengeLedger, ChallengeOutcome};
pub use coordinator::Curation;
pub use lock_adapter::LockAdapter;
pub use parameters::ParameterStore;
pub use resolution::{Redistribution, Resolution};
pub use rewards::RewardDistributor;
pub use used_locks::UsedLockTracker;
