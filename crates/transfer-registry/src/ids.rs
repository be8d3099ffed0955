use std::fmt;

use serde::{Deserialize, Serialize};

/// Genesis-hash style chain identifier, as published by chain metadata.
pub type ChainId = String;

/// Asset index within a chain's asset list.
pub type AssetId = u32;

/// An asset on a specific chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAssetId {
    pub chain_id: ChainId,
    pub asset_id: AssetId,
}

impl ChainAssetId {
    pub fn new(chain_id: impl Into<ChainId>, asset_id: AssetId) -> Self {
        Self {
            chain_id: chain_id.into(),
            asset_id,
        }
    }
}

impl fmt::Display for ChainAssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.asset_id)
    }
}
