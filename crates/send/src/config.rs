use std::time::Duration;

use rust_decimal::Decimal;
use satchel_chains::constants::MAX_PRECISION;
use satchel_chains::FeeSpeed;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::estimation::{DebounceEdge, SchedulerConfig};

/// Default delay between fee estimations while the user types.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Default number of decimals shown for fiat amounts.
pub const DEFAULT_FIAT_DECIMALS: u32 = 2;

/// Tunables of the send flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SendConfig {
    /// Debounce window for fee estimation, in milliseconds.
    pub debounce_ms: u64,
    /// Which end of the debounce window dispatches the estimation.
    pub debounce_edge: DebounceEdge,
    /// Fee tier used for balance checks and send-max.
    pub fee_speed: FeeSpeed,
    /// Decimals used when formatting fiat amounts.
    pub fiat_decimals: u32,
}

impl Default for SendConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            debounce_edge: DebounceEdge::Leading,
            fee_speed: FeeSpeed::Fast,
            fiat_decimals: DEFAULT_FIAT_DECIMALS,
        }
    }
}

impl SendConfig {
    /// Load overrides from `SATCHEL_DEBOUNCE_MS`, `SATCHEL_DEBOUNCE_EDGE`,
    /// `SATCHEL_FEE_SPEED` and `SATCHEL_FIAT_DECIMALS`. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("SATCHEL_DEBOUNCE_MS") {
            config.debounce_ms = value
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid("SATCHEL_DEBOUNCE_MS", &value, e))?;
        }
        if let Some(value) = lookup("SATCHEL_DEBOUNCE_EDGE") {
            config.debounce_edge = value
                .parse()
                .map_err(|e: String| invalid("SATCHEL_DEBOUNCE_EDGE", &value, e))?;
        }
        if let Some(value) = lookup("SATCHEL_FEE_SPEED") {
            config.fee_speed = value
                .parse()
                .map_err(|e: String| invalid("SATCHEL_FEE_SPEED", &value, e))?;
        }
        if let Some(value) = lookup("SATCHEL_FIAT_DECIMALS") {
            config.fiat_decimals = value
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid("SATCHEL_FIAT_DECIMALS", &value, e))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fiat_decimals > MAX_PRECISION {
            return Err(invalid(
                "fiatDecimals",
                &self.fiat_decimals.to_string(),
                format!("must not exceed {}", MAX_PRECISION),
            ));
        }
        Ok(())
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            delay: Duration::from_millis(self.debounce_ms),
            edge: self.debounce_edge,
        }
    }

    /// Render a fiat amount with the configured number of decimals.
    pub fn format_fiat(&self, amount: Decimal) -> String {
        crate::amount::format_fiat(amount, self.fiat_decimals)
    }
}

fn invalid(key: &str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
