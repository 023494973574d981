//! Economic parameters and their file-level configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CurationError, Pct, Result, constants};

/// Tunable economic parameters held by the Parameter Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Minimum stake for applications and challenges.
    pub min_deposit: u64,
    /// Seconds an unchallenged application waits before registration.
    pub apply_stage_len: u64,
    /// Fraction of the loser's deposit paid to the winner.
    pub dispensation_pct: Pct,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            min_deposit: constants::DEFAULT_MIN_DEPOSIT,
            apply_stage_len: constants::DEFAULT_APPLY_STAGE_LEN,
            dispensation_pct: Pct::DEFAULT_DISPENSATION,
        }
    }
}

/// Human-facing configuration, e.g. loaded from a JSON file.
///
/// `dispensation_pct` is a decimal fraction string (`"0.6"` for 60%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationConfig {
    pub min_deposit: u64,
    pub apply_stage_len: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub dispensation_pct: Decimal,
}

impl CurationConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    /// `Serialization` for malformed JSON, `InvalidConfig` / `PctOutOfRange`
    /// for values outside their domain.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        Pct::from_decimal(self.dispensation_pct)?;
        Ok(())
    }

    /// Convert into runtime parameters.
    pub fn parameters(&self) -> Result<Parameters> {
        Ok(Parameters {
            min_deposit: self.min_deposit,
            apply_stage_len: self.apply_stage_len,
            dispensation_pct: Pct::from_decimal(self.dispensation_pct)?,
        })
    }
}

impl Default for CurationConfig {
    fn default() -> Self {
        let params = Parameters::default();
        Self {
            min_deposit: params.min_deposit,
            apply_stage_len: params.apply_stage_len,
            dispensation_pct: params.dispensation_pct.to_decimal(),
        }
    }
}

impl TryFrom<&CurationConfig> for Parameters {
    type Error = CurationError;

    fn try_from(cfg: &CurationConfig) -> Result<Self> {
        cfg.parameters()
    }
}
