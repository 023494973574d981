//! System-wide constants for the curation coordinator.

/// Fixed-point denominator for percentages: `10^18` represents 100%.
pub const PCT_BASE: u64 = 1_000_000_000_000_000_000;

/// Number of fractional decimal digits carried by a fixed-point percentage.
pub const PCT_DECIMALS: u32 = 18;

/// Default minimum stake for applications and challenges.
pub const DEFAULT_MIN_DEPOSIT: u64 = 100;

/// Default apply stage length in seconds.
pub const DEFAULT_APPLY_STAGE_LEN: u64 = 1000;

/// Default dispensation percentage: 60%.
pub const DEFAULT_DISPENSATION_PCT: u64 = 600_000_000_000_000_000;

/// Largest representable timestamp; used for locks that never expire.
pub const MAX_TIMESTAMP: u64 = u64::MAX;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
