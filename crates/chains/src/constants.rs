//! Identifiers of the chains the wallet ships adapters for.

/// Ethereum mainnet (EVM).
pub const ETHEREUM_MAINNET: &str = "eip155:1";

/// Bitcoin mainnet (UTXO).
pub const BITCOIN_MAINNET: &str = "bip122:000000000019d6689c085ae165831e93";

/// Dogecoin mainnet (UTXO).
pub const DOGECOIN_MAINNET: &str = "bip122:00000000001a91e3dace36e2be3bf030";

/// Cosmos Hub (account-based).
pub const COSMOS_MAINNET: &str = "cosmos:cosmoshub-4";

/// Osmosis (account-based).
pub const OSMOSIS_MAINNET: &str = "cosmos:osmosis-1";

/// Asset namespace of ERC-20 tokens, whose reference is the contract address.
pub const ERC20_ASSET_NAMESPACE: &str = "erc20";

/// Highest precision a `Decimal` can scale by.
pub const MAX_PRECISION: u32 = 28;
