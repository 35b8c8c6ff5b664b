use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ChainError;

/// CAIP-2 chain namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainNamespace {
    /// EVM chains (`eip155:<chain id>`)
    Eip155,
    /// Bitcoin-derived chains (`bip122:<genesis hash prefix>`)
    Bip122,
    /// Cosmos-SDK chains (`cosmos:<chain name>`)
    Cosmos,
}

impl ChainNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eip155 => "eip155",
            Self::Bip122 => "bip122",
            Self::Cosmos => "cosmos",
        }
    }

    /// The fee-estimation family chains of this namespace belong to.
    pub fn family(&self) -> ChainFamily {
        match self {
            Self::Eip155 => ChainFamily::Evm,
            Self::Bip122 => ChainFamily::Utxo,
            Self::Cosmos => ChainFamily::Account,
        }
    }
}

impl FromStr for ChainNamespace {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eip155" => Ok(Self::Eip155),
            "bip122" => Ok(Self::Bip122),
            "cosmos" => Ok(Self::Cosmos),
            other => Err(ChainError::InvalidIdentifier(format!(
                "unknown chain namespace '{}'",
                other
            ))),
        }
    }
}

/// Chain families that share a fee request shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    /// Account-model chains whose fee data needs no transaction detail
    Account,
    /// Contract/EVM chains
    Evm,
    /// UTXO chains
    Utxo,
}

/// CAIP-2 chain identifier, e.g. `eip155:1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainId {
    namespace: ChainNamespace,
    reference: String,
}

impl ChainId {
    pub fn new(namespace: ChainNamespace, reference: impl Into<String>) -> Self {
        Self {
            namespace,
            reference: reference.into(),
        }
    }

    pub fn namespace(&self) -> ChainNamespace {
        self.namespace
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn family(&self) -> ChainFamily {
        self.namespace.family()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.as_str(), self.reference)
    }
}

impl FromStr for ChainId {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, reference) = s
            .split_once(':')
            .ok_or_else(|| ChainError::InvalidIdentifier(format!("malformed chain id '{}'", s)))?;

        if reference.is_empty() || reference.contains([':', '/']) {
            return Err(ChainError::InvalidIdentifier(format!(
                "malformed chain reference in '{}'",
                s
            )));
        }

        Ok(Self::new(namespace.parse()?, reference))
    }
}

impl TryFrom<String> for ChainId {
    type Error = ChainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChainId> for String {
    fn from(value: ChainId) -> Self {
        value.to_string()
    }
}
