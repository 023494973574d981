//! Error types for the curation coordinator.
//!
//! All errors use the `CU_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by failure kind:
//! - 1xx: Authorization
//! - 2xx: Validation
//! - 3xx: State conflict
//! - 4xx: Precondition not met
//! - 5xx: Collaborator failures (Registry, Staking, Voting)
//! - 9xx: General / internal errors
//!
//! Every error aborts the whole operation; no partial mutation is observable.

use std::fmt;

use thiserror::Error;

use crate::{AccountId, EntryId, LockId, VoteId};

/// The broad class an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authorization,
    Validation,
    StateConflict,
    Precondition,
    Collaborator,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::StateConflict => write!(f, "STATE_CONFLICT"),
            Self::Precondition => write!(f, "PRECONDITION"),
            Self::Collaborator => write!(f, "COLLABORATOR"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Central error enum for all curation operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurationError {
    // =================================================================
    // Authorization (1xx)
    // =================================================================
    /// Caller lacks the administrator capability.
    #[error("CU_ERR_100: {caller} is not authorized to {action}")]
    Unauthorized { caller: AccountId, action: String },

    /// Only the original applicant may withdraw an application.
    #[error("CU_ERR_101: {caller} is not the applicant of {entry_id}")]
    NotApplicant { caller: AccountId, entry_id: EntryId },

    // =================================================================
    // Validation (2xx)
    // =================================================================
    /// Submitted registry data is empty.
    #[error("CU_ERR_200: Application data must not be empty")]
    EmptyData,

    /// A collaborator reference is not a valid service address.
    #[error("CU_ERR_201: Invalid {role} service address: {address}")]
    InvalidServiceAddress { role: String, address: AccountId },

    /// Percentage above 100% (`10^18`).
    #[error("CU_ERR_202: Percentage {raw} exceeds 10^18")]
    PctOutOfRange { raw: u64 },

    /// The Staking collaborator has no such lock.
    #[error("CU_ERR_203: Lock not found: {owner} {lock_id}")]
    LockNotFound { owner: AccountId, lock_id: LockId },

    /// The lock fails amount, duration, time unit or unlocker checks.
    #[error("CU_ERR_204: Invalid lock {owner} {lock_id}: {reason}")]
    InvalidLock {
        owner: AccountId,
        lock_id: LockId,
        reason: String,
    },

    /// Configuration is malformed.
    #[error("CU_ERR_205: Configuration error: {0}")]
    InvalidConfig(String),

    // =================================================================
    // State conflict (3xx)
    // =================================================================
    /// A live application already exists for this data.
    #[error("CU_ERR_300: Application already pending for {0}")]
    DuplicateApplication(EntryId),

    /// The Registry already contains this data.
    #[error("CU_ERR_301: Data already in registry for {0}")]
    DataAlreadyRegistered(EntryId),

    /// The lock already backs a live application or challenge.
    #[error("CU_ERR_302: Lock already in use: {owner} {lock_id}")]
    LockAlreadyUsed { owner: AccountId, lock_id: LockId },

    /// A live challenge already exists for this entry.
    #[error("CU_ERR_303: Entry already challenged: {0}")]
    AlreadyChallenged(EntryId),

    /// The application was already admitted to the Registry.
    #[error("CU_ERR_304: Application already registered: {0}")]
    AlreadyRegistered(EntryId),

    /// No live application for this entry.
    #[error("CU_ERR_305: Application not found: {0}")]
    ApplicationNotFound(EntryId),

    /// No live challenge for this entry (never challenged or already resolved).
    #[error("CU_ERR_306: Challenge not found: {0}")]
    ChallengeNotFound(EntryId),

    /// This voter already claimed the reward for this vote.
    #[error("CU_ERR_307: Reward already claimed by {voter} for {vote_id}")]
    RewardAlreadyClaimed { vote_id: VoteId, voter: AccountId },

    /// The coordinator was already initialized.
    #[error("CU_ERR_308: Coordinator already initialized")]
    AlreadyInitialized,

    /// The application's stake was released by an earlier resolution.
    #[error("CU_ERR_309: Application has no backing stake: {0}")]
    ApplicationUnbacked(EntryId),

    // =================================================================
    // Precondition not met (4xx)
    // =================================================================
    /// State-mutating call on a coordinator that was never initialized.
    #[error("CU_ERR_400: Coordinator not initialized")]
    NotInitialized,

    /// The vote backing the challenge is still open.
    #[error("CU_ERR_401: Vote not closed: {0}")]
    VoteNotClosed(VoteId),

    /// The apply stage has not elapsed yet.
    #[error("CU_ERR_402: Apply stage for {entry_id} ends at {ready_at}, now {now}")]
    ApplyStageNotElapsed {
        entry_id: EntryId,
        ready_at: u64,
        now: u64,
    },

    /// A live challenge blocks this operation.
    #[error("CU_ERR_403: Challenge pending for {0}")]
    ChallengePending(EntryId),

    /// No resolution has recorded a reward pool for this vote.
    #[error("CU_ERR_404: No resolved reward pool for {0}")]
    VoteNotResolved(VoteId),

    /// The voter has no winning stake in this vote.
    #[error("CU_ERR_405: {voter} has no winning stake in {vote_id}")]
    NoWinningStake { vote_id: VoteId, voter: AccountId },

    // =================================================================
    // Collaborator failures (5xx)
    // =================================================================
    /// Registry collaborator rejected a call.
    #[error("CU_ERR_500: Registry error: {0}")]
    Registry(String),

    /// Staking collaborator rejected a call.
    #[error("CU_ERR_501: Staking error: {0}")]
    Staking(String),

    /// Voting collaborator rejected a call.
    #[error("CU_ERR_502: Voting error: {0}")]
    Voting(String),

    /// Not enough unlocked tokens to move.
    #[error("CU_ERR_503: Insufficient balance for {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: AccountId,
        needed: u64,
        available: u64,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("CU_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Reward pool conservation violated: more paid out than pooled.
    #[error("CU_ERR_901: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    /// Serialization / deserialization error.
    #[error("CU_ERR_902: Serialization error: {0}")]
    Serialization(String),

    /// Arithmetic overflow in token accounting.
    #[error("CU_ERR_903: Arithmetic overflow")]
    Overflow,
}

impl CurationError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } | Self::NotApplicant { .. } => ErrorKind::Authorization,
            Self::EmptyData
            | Self::InvalidServiceAddress { .. }
            | Self::PctOutOfRange { .. }
            | Self::LockNotFound { .. }
            | Self::InvalidLock { .. }
            | Self::InvalidConfig(_) => ErrorKind::Validation,
            Self::DuplicateApplication(_)
            | Self::DataAlreadyRegistered(_)
            | Self::LockAlreadyUsed { .. }
            | Self::AlreadyChallenged(_)
            | Self::AlreadyRegistered(_)
            | Self::ApplicationNotFound(_)
            | Self::ChallengeNotFound(_)
            | Self::RewardAlreadyClaimed { .. }
            | Self::AlreadyInitialized
            | Self::ApplicationUnbacked(_) => ErrorKind::StateConflict,
            Self::NotInitialized
            | Self::VoteNotClosed(_)
            | Self::ApplyStageNotElapsed { .. }
            | Self::ChallengePending(_)
            | Self::VoteNotResolved(_)
            | Self::NoWinningStake { .. } => ErrorKind::Precondition,
            Self::Registry(_)
            | Self::Staking(_)
            | Self::Voting(_)
            | Self::InsufficientBalance { .. } => ErrorKind::Collaborator,
            Self::Internal(_)
            | Self::SupplyInvariantViolation { .. }
            | Self::Serialization(_)
            | Self::Overflow => ErrorKind::Internal,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CurationError>;

impl From<serde_json::Error> for CurationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
