use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee speed tiers every adapter reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeeSpeed {
    Slow,
    Average,
    #[default]
    Fast,
}

impl fmt::Display for FeeSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slow => write!(f, "slow"),
            Self::Average => write!(f, "average"),
            Self::Fast => write!(f, "fast"),
        }
    }
}

impl FromStr for FeeSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "average" => Ok(Self::Average),
            "fast" => Ok(Self::Fast),
            other => Err(format!("unknown fee speed '{}'", other)),
        }
    }
}

/// Chain-specific detail behind a tier's total fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChainSpecificFee {
    #[default]
    None,
    #[serde(rename_all = "camelCase")]
    Evm {
        #[serde(with = "rust_decimal::serde::str")]
        gas_limit: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        gas_price: Decimal,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "rust_decimal::serde::str_option"
        )]
        max_fee_per_gas: Option<Decimal>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "rust_decimal::serde::str_option"
        )]
        max_priority_fee_per_gas: Option<Decimal>,
    },
    #[serde(rename_all = "camelCase")]
    Utxo {
        #[serde(with = "rust_decimal::serde::str")]
        sat_per_byte: Decimal,
    },
}

/// A single speed tier of a fee estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTier {
    /// Total transaction fee in base units of the chain's fee asset
    #[serde(with = "rust_decimal::serde::str")]
    pub tx_fee: Decimal,
    #[serde(default)]
    pub chain_specific: ChainSpecificFee,
}

impl FeeTier {
    pub fn new(tx_fee: Decimal) -> Self {
        Self {
            tx_fee,
            chain_specific: ChainSpecificFee::None,
        }
    }

    pub fn with_chain_specific(mut self, chain_specific: ChainSpecificFee) -> Self {
        self.chain_specific = chain_specific;
        self
    }
}

/// Normalized fee estimate, identical in shape across chain families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEstimate {
    pub slow: FeeTier,
    pub average: FeeTier,
    pub fast: FeeTier,
}

impl FeeEstimate {
    pub fn new(slow: FeeTier, average: FeeTier, fast: FeeTier) -> Self {
        Self {
            slow,
            average,
            fast,
        }
    }

    /// Estimate where every tier carries the same fee.
    pub fn flat(tx_fee: Decimal) -> Self {
        Self::new(
            FeeTier::new(tx_fee),
            FeeTier::new(tx_fee),
            FeeTier::new(tx_fee),
        )
    }

    pub fn tier(&self, speed: FeeSpeed) -> &FeeTier {
        match speed {
            FeeSpeed::Slow => &self.slow,
            FeeSpeed::Average => &self.average,
            FeeSpeed::Fast => &self.fast,
        }
    }

    /// Fast-tier fee in base units.
    pub fn fast_fee(&self) -> Decimal {
        self.fast.tx_fee
    }

    /// First tier carrying a negative fee, if any.
    pub(crate) fn negative_tier(&self) -> Option<FeeSpeed> {
        [FeeSpeed::Slow, FeeSpeed::Average, FeeSpeed::Fast]
            .into_iter()
            .find(|speed| self.tier(*speed).tx_fee < Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tier_lookup() {
        let estimate = FeeEstimate::new(
            FeeTier::new(dec!(100)),
            FeeTier::new(dec!(200)),
            FeeTier::new(dec!(300)),
        );
        assert_eq!(estimate.tier(FeeSpeed::Slow).tx_fee, dec!(100));
        assert_eq!(estimate.tier(FeeSpeed::Average).tx_fee, dec!(200));
        assert_eq!(estimate.fast_fee(), dec!(300));
        assert_eq!(estimate.negative_tier(), None);
    }

    #[test]
    fn test_negative_tier_detected() {
        let estimate = FeeEstimate::new(
            FeeTier::new(dec!(1)),
            FeeTier::new(dec!(-2)),
            FeeTier::new(dec!(3)),
        );
        assert_eq!(estimate.negative_tier(), Some(FeeSpeed::Average));
    }

    #[test]
    fn test_fee_speed_parse() {
        assert_eq!("FAST".parse::<FeeSpeed>().unwrap(), FeeSpeed::Fast);
        assert!("ludicrous".parse::<FeeSpeed>().is_err());
    }

    #[test]
    fn test_estimate_json_shape() {
        let estimate = FeeEstimate::flat(dec!(21000));
        let fast = estimate.fast.with_chain_specific(ChainSpecificFee::Utxo {
            sat_per_byte: dec!(12),
        });
        let json = serde_json::to_value(&fast).unwrap();
        assert_eq!(json["chainSpecific"]["kind"], "utxo");
        assert_eq!(json["txFee"], "21000");

        let wei = FeeTier::new(dec!(123456789012345678901));
        let back: FeeTier = serde_json::from_value(serde_json::to_value(&wei).unwrap()).unwrap();
        assert_eq!(back.tx_fee, wei.tx_fee);
    }

    #[test]
    fn test_evm_detail_serializes_as_strings() {
        let tier = FeeTier::new(dec!(630000000000000)).with_chain_specific(ChainSpecificFee::Evm {
            gas_limit: dec!(21000),
            gas_price: dec!(30000000000),
            max_fee_per_gas: Some(dec!(40000000000)),
            max_priority_fee_per_gas: None,
        });

        let json = serde_json::to_value(&tier).unwrap();
        assert_eq!(json["chainSpecific"]["gasLimit"], "21000");
        assert_eq!(json["chainSpecific"]["gasPrice"], "30000000000");
        assert_eq!(json["chainSpecific"]["maxFeePerGas"], "40000000000");
        assert!(json["chainSpecific"].get("maxPriorityFeePerGas").is_none());

        let back: FeeTier = serde_json::from_value(json).unwrap();
        assert_eq!(back, tier);
    }
}
