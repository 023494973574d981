//! # curation-collab
//!
//! In-process implementations of the collaborator contracts consumed by the
//! curation coordinator.
//!
//! ## Components
//!
//! 1. **TokenLedger**: available/locked balances per account
//! 2. **LockBook**: per-owner deposit locks on top of the ledger ([`Staking`](curation_types::Staking))
//! 3. **SetRegistry**: the admitted-entry set ([`Registry`](curation_types::Registry))
//! 4. **TallyBook**: closed vote results posted by arbitration ([`Voting`](curation_types::Voting))
//!
//! All four are deterministic, so the same types serve as test doubles.

pub mod lock_book;
pub mod registry;
pub mod tally_book;
pub mod token_ledger;

pub use lock_book::{LockBook, LockRequest};
pub use registry::SetRegistry;
pub use tally_book::TallyBook;
pub use token_ledger::{TokenBalance, TokenLedger};
