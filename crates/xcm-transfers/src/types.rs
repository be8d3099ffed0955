use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use transfer_registry::{AssetId, ChainAssetId, ChainId};

/// Chain metadata needed to address and route a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub chain_id: ChainId,
    #[serde(default)]
    pub is_relaychain: bool,
    /// Accounts are 20-byte keys instead of 32-byte ids.
    #[serde(default)]
    pub is_ethereum_based: bool,
    #[serde(default)]
    pub para_id: Option<u32>,
    #[serde(default)]
    pub is_system_parachain: bool,
    /// Asset id of the chain's utility (native) token.
    #[serde(default)]
    pub native_asset_id: AssetId,
}

impl ChainDescriptor {
    pub fn relaychain(chain_id: impl Into<ChainId>) -> Self {
        Self {
            chain_id: chain_id.into(),
            is_relaychain: true,
            is_ethereum_based: false,
            para_id: None,
            is_system_parachain: false,
            native_asset_id: 0,
        }
    }

    pub fn parachain(chain_id: impl Into<ChainId>, para_id: u32) -> Self {
        Self {
            chain_id: chain_id.into(),
            is_relaychain: false,
            is_ethereum_based: false,
            para_id: Some(para_id),
            is_system_parachain: false,
            native_asset_id: 0,
        }
    }

    pub fn system_parachain(chain_id: impl Into<ChainId>, para_id: u32) -> Self {
        Self {
            is_system_parachain: true,
            ..Self::parachain(chain_id, para_id)
        }
    }

    pub fn ethereum_based(mut self) -> Self {
        self.is_ethereum_based = true;
        self
    }

    pub fn with_native_asset(mut self, asset_id: AssetId) -> Self {
        self.native_asset_id = asset_id;
        self
    }

    /// Relay chain or system parachain: members of the mutually trusted core.
    pub fn is_trusted_system_chain(&self) -> bool {
        self.is_relaychain || self.is_system_parachain
    }

    pub fn native_asset(&self) -> ChainAssetId {
        ChainAssetId::new(self.chain_id.clone(), self.native_asset_id)
    }
}

/// Source of chain metadata.
pub trait ChainDirectory {
    fn chain(&self, chain_id: &ChainId) -> Option<&ChainDescriptor>;
}

impl ChainDirectory for HashMap<ChainId, ChainDescriptor> {
    fn chain(&self, chain_id: &ChainId) -> Option<&ChainDescriptor> {
        self.get(chain_id)
    }
}

impl<T: ChainDirectory + ?Sized> ChainDirectory for std::sync::Arc<T> {
    fn chain(&self, chain_id: &ChainId) -> Option<&ChainDescriptor> {
        (**self).chain(chain_id)
    }
}

/// An on-chain integer amount together with its decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetAmount {
    pub value: u128,
    pub precision: u8,
}

impl AssetAmount {
    pub fn new(value: u128, precision: u8) -> Self {
        Self { value, precision }
    }

    pub fn zero(precision: u8) -> Self {
        Self::new(0, precision)
    }

    /// Same precision, different value.
    pub fn with_value(self, value: u128) -> Self {
        Self::new(value, self.precision)
    }
}

impl fmt::Display for AssetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.value.to_string();
        let precision = self.precision as usize;
        if precision == 0 {
            return f.write_str(&digits);
        }

        let padded = format!("{digits:0>width$}", width = precision + 1);
        let (whole, fraction) = padded.split_at(padded.len() - precision);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            f.write_str(whole)
        } else {
            write!(f, "{whole}.{fraction}")
        }
    }
}

/// Receiving side of a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDestination {
    pub chain_id: ChainId,
    /// Raw account bytes, 32 or 20 long depending on the chain family.
    pub account: Vec<u8>,
}

impl TransferDestination {
    pub fn new(chain_id: impl Into<ChainId>, account: impl Into<Vec<u8>>) -> Self {
        Self {
            chain_id: chain_id.into(),
            account: account.into(),
        }
    }

    /// Account in `0x`-prefixed hex.
    pub fn account_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.account))
    }
}

/// Everything needed to prepare and price one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub origin: ChainAssetId,
    pub destination: TransferDestination,
    pub amount: AssetAmount,
}

impl TransferRequest {
    pub fn new(origin: ChainAssetId, destination: TransferDestination, amount: AssetAmount) -> Self {
        Self {
            origin,
            destination,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaychain_has_no_para_id() {
        let relay = ChainDescriptor::relaychain("polkadot");
        assert!(relay.is_relaychain);
        assert_eq!(relay.para_id, None);
        assert!(relay.is_trusted_system_chain());
    }

    #[test]
    fn system_parachain_is_trusted() {
        let statemint = ChainDescriptor::system_parachain("statemint", 1000);
        assert!(statemint.is_trusted_system_chain());
        assert!(!ChainDescriptor::parachain("acala", 2000).is_trusted_system_chain());
    }

    #[test]
    fn descriptor_from_json_defaults() {
        let chain: ChainDescriptor =
            serde_json::from_str(r#"{"chainId": "moonbeam", "paraId": 2004, "isEthereumBased": true}"#).unwrap();
        assert_eq!(chain, ChainDescriptor::parachain("moonbeam", 2004).ethereum_based());
    }

    #[test]
    fn directory_over_hash_map() {
        let mut chains = HashMap::new();
        chains.insert("acala".to_string(), ChainDescriptor::parachain("acala", 2000));
        assert_eq!(chains.chain(&"acala".to_string()).and_then(|c| c.para_id), Some(2000));
        assert!(chains.chain(&"kusama".to_string()).is_none());
    }

    #[test]
    fn native_asset_id() {
        let chain = ChainDescriptor::parachain("moonbeam", 2004).with_native_asset(3);
        assert_eq!(chain.native_asset(), ChainAssetId::new("moonbeam", 3));
    }

    #[test]
    fn amount_display() {
        assert_eq!(AssetAmount::new(15_000_000_000, 10).to_string(), "1.5");
        assert_eq!(AssetAmount::new(5, 3).to_string(), "0.005");
        assert_eq!(AssetAmount::new(2_000, 3).to_string(), "2");
        assert_eq!(AssetAmount::new(42, 0).to_string(), "42");
        assert_eq!(AssetAmount::zero(12).to_string(), "0");
    }

    #[test]
    fn amount_keeps_precision() {
        let amount = AssetAmount::new(1, 18).with_value(7);
        assert_eq!(amount, AssetAmount::new(7, 18));
    }

    #[test]
    fn destination_account_hex() {
        let destination = TransferDestination::new("acala", vec![0xab; 2]);
        assert_eq!(destination.account_hex(), "0xabab");
    }
}
