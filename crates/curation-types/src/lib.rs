//! # curation-types
//!
//! Shared types, errors, and collaborator contracts for the **curation**
//! coordinator, a token-curated registry.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`EntryId`], [`LockId`], [`VoteId`]
//! - **Records**: [`Application`], [`Challenge`], [`Lock`], [`Stake`], [`RewardPool`]
//! - **Votes**: [`VoteOutcome`], [`Verdict`]
//! - **Fixed-point math**: [`Pct`], [`pro_rata`]
//! - **Time**: [`Clock`], [`SystemClock`], [`ManualClock`], [`Timestamp`]
//! - **Collaborators**: [`Registry`], [`Staking`], [`Voting`]
//! - **Events**: [`CurationEvent`]
//! - **Configuration**: [`Parameters`], [`CurationConfig`]
//! - **Errors**: [`CurationError`] with `CU_ERR_` prefix codes
//! - **Constants**: system-wide defaults and the `10^18` percentage base

pub mod application;
pub mod clock;
pub mod collab;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod lock;
pub mod pct;
pub mod vote;

pub use application::*;
pub use clock::*;
pub use collab::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use lock::*;
pub use pct::*;
pub use vote::*;

// Constants are accessed via `curation_types::constants::FOO`
// (not re-exported to avoid name collisions).
