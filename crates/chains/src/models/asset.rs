use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::chain_id::ChainId;
use crate::constants::{ERC20_ASSET_NAMESPACE, MAX_PRECISION};
use crate::errors::ChainError;

/// CAIP-19 asset identifier, e.g. `eip155:1/erc20:0xa0b8...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId {
    chain_id: ChainId,
    asset_namespace: String,
    asset_reference: String,
}

impl AssetId {
    pub fn new(
        chain_id: ChainId,
        asset_namespace: impl Into<String>,
        asset_reference: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            asset_namespace: asset_namespace.into(),
            asset_reference: asset_reference.into(),
        }
    }

    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    pub fn asset_namespace(&self) -> &str {
        &self.asset_namespace
    }

    pub fn asset_reference(&self) -> &str {
        &self.asset_reference
    }

    /// Contract address for token transfers; `None` for native coins.
    pub fn contract_address(&self) -> Option<&str> {
        (self.asset_namespace == ERC20_ASSET_NAMESPACE).then_some(self.asset_reference.as_str())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}:{}",
            self.chain_id, self.asset_namespace, self.asset_reference
        )
    }
}

impl FromStr for AssetId {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chain, asset) = s
            .split_once('/')
            .ok_or_else(|| ChainError::InvalidIdentifier(format!("malformed asset id '{}'", s)))?;
        let (namespace, reference) = asset.split_once(':').ok_or_else(|| {
            ChainError::InvalidIdentifier(format!("malformed asset type in '{}'", s))
        })?;

        if namespace.is_empty() || reference.is_empty() {
            return Err(ChainError::InvalidIdentifier(format!(
                "empty asset namespace or reference in '{}'",
                s
            )));
        }

        Ok(Self::new(chain.parse()?, namespace, reference))
    }
}

impl TryFrom<String> for AssetId {
    type Error = ChainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetId> for String {
    fn from(value: AssetId) -> Self {
        value.to_string()
    }
}

/// CAIP-10 account identifier, e.g. `eip155:1:0xabc...`.
///
/// For EVM and Cosmos chains the account part is the address; for UTXO
/// chains it is the account-level extended public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId {
    chain_id: ChainId,
    account: String,
}

impl AccountId {
    pub fn new(chain_id: ChainId, account: impl Into<String>) -> Self {
        Self {
            chain_id,
            account: account.into(),
        }
    }

    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    pub fn account(&self) -> &str {
        &self.account
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.account)
    }
}

impl FromStr for AccountId {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some(reference), Some(account)) if !account.is_empty() => Ok(
                Self::new(format!("{}:{}", namespace, reference).parse()?, account),
            ),
            _ => Err(ChainError::InvalidIdentifier(format!(
                "malformed account id '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for AccountId {
    type Error = ChainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.to_string()
    }
}

/// Asset metadata as loaded from the asset service. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_id: AssetId,
    /// Number of decimals between base and human units
    pub precision: u32,
    pub symbol: String,
}

impl Asset {
    pub fn new(asset_id: AssetId, precision: u32, symbol: impl Into<String>) -> Result<Self, ChainError> {
        if precision > MAX_PRECISION {
            return Err(ChainError::InvalidIdentifier(format!(
                "precision {} of {} exceeds {}",
                precision, asset_id, MAX_PRECISION
            )));
        }
        Ok(Self {
            asset_id,
            precision,
            symbol: symbol.into(),
        })
    }

    pub fn chain_id(&self) -> &ChainId {
        self.asset_id.chain_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: &str = "eip155:1/erc20:0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";

    #[test]
    fn test_parse_token_asset() {
        let asset_id: AssetId = USDC.parse().unwrap();
        assert_eq!(asset_id.chain_id().to_string(), "eip155:1");
        assert_eq!(
            asset_id.contract_address(),
            Some("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
        );
        assert_eq!(asset_id.to_string(), USDC);
    }

    #[test]
    fn test_native_asset_has_no_contract() {
        let asset_id: AssetId = "eip155:1/slip44:60".parse().unwrap();
        assert_eq!(asset_id.contract_address(), None);
    }

    #[test]
    fn test_parse_account_id() {
        let account: AccountId = "eip155:1:0xabc".parse().unwrap();
        assert_eq!(account.chain_id().reference(), "1");
        assert_eq!(account.account(), "0xabc");

        let xpub: AccountId = "bip122:000000000019d6689c085ae165831e93:xpub6CUG"
            .parse()
            .unwrap();
        assert_eq!(xpub.account(), "xpub6CUG");

        assert!("eip155:1".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_asset_precision_bound() {
        let asset_id: AssetId = "eip155:1/slip44:60".parse().unwrap();
        assert!(Asset::new(asset_id.clone(), 18, "ETH").is_ok());
        assert!(Asset::new(asset_id, 29, "ETH").is_err());
    }
}
