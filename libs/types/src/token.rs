use serde::{Deserialize, Serialize};

/// Opaque, chain-unique identifier for a token or a pool. Never parsed for
/// meaning by the core — only compared for equality and used as a map key.
pub type Address = String;

/// A raw, integer, on-chain token amount scaled by `10^decimals`.
pub type Raw = u128;

/// A fungible token tracked by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: impl Into<Address>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            decimals,
        }
    }
}
