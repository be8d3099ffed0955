use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use xcm_primitives::XcmVersion;

/// Weight units in one second of block execution time.
pub const DEFAULT_WEIGHT_PER_SECOND: u128 = 1_000_000_000_000;

/// Upper bound on a single delivery-fee storage read.
pub const DEFAULT_DELIVERY_FEE_TIMEOUT_MS: u64 = 10_000;

/// Runtime knobs of the transfer core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Wire version used for every produced location, asset and program.
    pub xcm_version: XcmVersion,
    /// Denominator of the proportional execution fee. Never zero.
    #[serde(deserialize_with = "non_zero")]
    pub weight_per_second: u128,
    pub delivery_fee_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            xcm_version: XcmVersion::default(),
            weight_per_second: DEFAULT_WEIGHT_PER_SECOND,
            delivery_fee_timeout_ms: DEFAULT_DELIVERY_FEE_TIMEOUT_MS,
        }
    }
}

fn non_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
    let value = u128::deserialize(deserializer)?;
    if value == 0 {
        return Err(D::Error::custom("weightPerSecond must be non-zero"));
    }
    Ok(value)
}

impl Settings {
    /// Parses settings; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn delivery_fee_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_fee_timeout_ms)
    }
}
