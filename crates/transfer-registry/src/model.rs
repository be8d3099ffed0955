//! Serde model of the registry JSON document.
//!
//! String-typed enums from the document (`type` fields) are closed Rust enums
//! with an explicit `Unknown`/`Undefined` variant, so an unrecognised value is
//! caught where it is consumed instead of travelling as a raw string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{AssetId, ChainId};

/// Root of the registry document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDocument {
    /// Reserve locations keyed by location id (e.g. `"DOT"`, `"USDT-Statemint"`).
    pub assets_location: BTreeMap<String, AssetLocationEntry>,
    /// chainId → assetId (as string) → location id, taking precedence over
    /// the asset's own `assetLocation`.
    #[serde(default)]
    pub reserve_id_overrides: BTreeMap<ChainId, BTreeMap<String, String>>,
    /// Named instruction token lists.
    #[serde(default)]
    pub instructions: BTreeMap<String, Vec<String>>,
    /// chainId → base weight of one instruction.
    #[serde(default, with = "crate::amount::map")]
    pub network_base_weight: BTreeMap<ChainId, u128>,
    /// chainId → delivery pricing for messages sent from that chain.
    #[serde(default)]
    pub network_delivery_fee: BTreeMap<ChainId, DeliveryFeeModel>,
    pub chains: Vec<ChainEntry>,
}

/// Where an asset's reserve lives and how it is addressed there.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLocationEntry {
    pub chain_id: ChainId,
    #[serde(default)]
    pub reserve_fee: Option<TransferFeeModel>,
    #[serde(default)]
    pub multi_location: PathFields,
}

/// Raw path components. Which of these are consulted, and how, depends on the
/// [`LocationType`] of the asset using the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parachain_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pallet_instance: Option<u8>,
    /// Hex-encoded bytes; decoded at resolution time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_key: Option<String>,
    /// Decimal string; parsed at resolution time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_index: Option<String>,
    /// Only meaningful for [`LocationType::Concrete`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<u8>,
}

/// Asset-addressing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// Anchored at the reserve chain, valid from anywhere.
    Absolute,
    /// Relative to the reserve chain itself; only valid when the reserve is
    /// the origin.
    Relative,
    /// Fully specified, including `parents`.
    Concrete,
    #[serde(other)]
    Unknown,
}

/// Resolved reserve path of a chain asset: the convention plus its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLocationPath {
    pub kind: LocationType,
    pub path: PathFields,
}

/// The `assetLocationPath` declaration on a chain asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationPathEntry {
    #[serde(rename = "type")]
    pub kind: LocationType,
    /// Concrete paths carry their own fields instead of using the shared
    /// reserve location.
    #[serde(default)]
    pub path: Option<PathFields>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEntry {
    pub chain_id: ChainId,
    #[serde(default)]
    pub assets: Vec<ChainAssetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAssetEntry {
    pub asset_id: AssetId,
    /// Location id into [`RegistryDocument::assets_location`].
    pub asset_location: String,
    pub asset_location_path: LocationPathEntry,
    #[serde(default)]
    pub xcm_transfers: Vec<TransferEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferEntry {
    pub destination: DestinationEntry,
    #[serde(rename = "type")]
    pub mechanism: TransferMechanism,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationEntry {
    pub chain_id: ChainId,
    pub asset_id: AssetId,
    pub fee: TransferFeeModel,
}

/// How the origin chain executes a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferMechanism {
    #[serde(rename = "teleport")]
    Teleport,
    #[serde(rename = "xcmpallet")]
    ReserveTransfer,
    #[serde(rename = "xtokens")]
    TokenPalletTransfer,
    #[serde(rename = "xcmpallet-transferAssets")]
    PalletTransferAssets,
    #[serde(other)]
    Unknown,
}

/// Execution fee pricing for one leg plus the program used to weigh it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFeeModel {
    pub mode: FeeMode,
    /// Key into [`RegistryDocument::instructions`].
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeMode {
    #[serde(rename = "type")]
    pub kind: FeeModeType,
    /// Proportional coefficient (fee per second of weight), decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeModeType {
    Proportional,
    Standard,
    #[serde(other)]
    Unknown,
}

/// Delivery pricing for messages leaving a chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFeeModel {
    /// Messages to the relay chain (upward).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_parent: Option<DeliveryPrice>,
    /// Messages to a sibling parachain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_parachain: Option<DeliveryPrice>,
}

impl DeliveryFeeModel {
    /// Selects the price for a message bound to `para_id` (`None` = parent).
    pub fn price_for(&self, para_id: Option<u32>) -> Option<&DeliveryPrice> {
        match para_id {
            Some(_) => self.to_parachain.as_ref(),
            None => self.to_parent.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DeliveryPrice {
    #[serde(rename = "exponential")]
    Exponential(ExponentialFeeParams),
    #[serde(other)]
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExponentialFeeParams {
    /// Pallet holding the fee factor storage (e.g. `XcmpQueue`, `ParachainSystem`, `Dmp`).
    #[serde(alias = "factorPalletName")]
    pub factor_pallet: String,
    #[serde(with = "crate::amount")]
    pub size_base: u128,
    #[serde(with = "crate::amount")]
    pub size_factor: u128,
    #[serde(default)]
    pub always_holding_pays: bool,
}

impl ExponentialFeeParams {
    /// Storage item holding the factor for parachain-bound messages.
    pub const PARACHAIN_FACTOR_ITEM: &'static str = "DeliveryFeeFactor";
    /// Storage item holding the factor for relay-bound messages.
    pub const UPWARD_FACTOR_ITEM: &'static str = "UpwardDeliveryFeeFactor";

    /// Storage item name for a message bound to `para_id` (`None` = parent).
    pub fn factor_item(&self, para_id: Option<u32>) -> &'static str {
        match para_id {
            Some(_) => Self::PARACHAIN_FACTOR_ITEM,
            None => Self::UPWARD_FACTOR_ITEM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_type_unknown_variant() {
        let entry: LocationPathEntry = serde_json::from_str(r#"{"type": "sideways"}"#).unwrap();
        assert_eq!(entry.kind, LocationType::Unknown);
    }

    #[test]
    fn factor_pallet_accepts_long_key() {
        let short: DeliveryPrice = serde_json::from_str(
            r#"{"type": "exponential", "factorPallet": "XcmpQueue", "sizeBase": "1", "sizeFactor": "2"}"#,
        )
        .unwrap();
        let long: DeliveryPrice = serde_json::from_str(
            r#"{"type": "exponential", "factorPalletName": "XcmpQueue", "sizeBase": "1", "sizeFactor": "2"}"#,
        )
        .unwrap();

        assert_eq!(short, long);
        match long {
            DeliveryPrice::Exponential(params) => assert_eq!(params.factor_pallet, "XcmpQueue"),
            DeliveryPrice::Undefined => panic!("expected exponential pricing"),
        }
    }

    #[test]
    fn location_type_known_variants() {
        for (raw, expected) in [
            ("absolute", LocationType::Absolute),
            ("relative", LocationType::Relative),
            ("concrete", LocationType::Concrete),
        ] {
            let parsed: LocationType = serde_json::from_str(&format!("\"{raw}\"")).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn mechanism_tokens() {
        for (raw, expected) in [
            ("teleport", TransferMechanism::Teleport),
            ("xcmpallet", TransferMechanism::ReserveTransfer),
            ("xtokens", TransferMechanism::TokenPalletTransfer),
            ("xcmpallet-transferAssets", TransferMechanism::PalletTransferAssets),
            ("bridge", TransferMechanism::Unknown),
        ] {
            let parsed: TransferMechanism = serde_json::from_str(&format!("\"{raw}\"")).unwrap();
            assert_eq!(parsed, expected, "{raw}");
        }
    }

    #[test]
    fn fee_mode_with_value() {
        let mode: FeeMode = serde_json::from_str(r#"{"type": "proportional", "value": "1000"}"#).unwrap();
        assert_eq!(mode.kind, FeeModeType::Proportional);
        assert_eq!(mode.value.as_deref(), Some("1000"));

        let mode: FeeMode = serde_json::from_str(r#"{"type": "mystery"}"#).unwrap();
        assert_eq!(mode.kind, FeeModeType::Unknown);
    }

    #[test]
    fn delivery_price_exponential_defaults_holding_flag() {
        let price: DeliveryPrice = serde_json::from_str(
            r#"{"type": "exponential", "factorPallet": "XcmpQueue", "sizeBase": "1000", "sizeFactor": 2}"#,
        )
        .unwrap();
        match price {
            DeliveryPrice::Exponential(params) => {
                assert_eq!(params.factor_pallet, "XcmpQueue");
                assert_eq!(params.size_base, 1000);
                assert_eq!(params.size_factor, 2);
                assert!(!params.always_holding_pays);
            }
            DeliveryPrice::Undefined => panic!("expected exponential"),
        }
    }

    #[test]
    fn delivery_price_unknown_type_is_undefined() {
        let price: DeliveryPrice = serde_json::from_str(r#"{"type": "linear"}"#).unwrap();
        assert_eq!(price, DeliveryPrice::Undefined);
    }

    #[test]
    fn delivery_price_rejects_bad_amount() {
        let result: Result<DeliveryPrice, _> = serde_json::from_str(
            r#"{"type": "exponential", "factorPallet": "XcmpQueue", "sizeBase": "12x", "sizeFactor": "1"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn price_selection_by_target() {
        let exponential = DeliveryPrice::Exponential(ExponentialFeeParams {
            factor_pallet: "XcmpQueue".into(),
            size_base: 1,
            size_factor: 1,
            always_holding_pays: false,
        });
        let model = DeliveryFeeModel {
            to_parent: None,
            to_parachain: Some(exponential.clone()),
        };
        assert_eq!(model.price_for(Some(2000)), Some(&exponential));
        assert_eq!(model.price_for(None), None);
    }

    #[test]
    fn factor_item_names() {
        let params = ExponentialFeeParams {
            factor_pallet: "XcmpQueue".into(),
            size_base: 0,
            size_factor: 0,
            always_holding_pays: false,
        };
        assert_eq!(params.factor_item(Some(1000)), "DeliveryFeeFactor");
        assert_eq!(params.factor_item(None), "UpwardDeliveryFeeFactor");
    }
}
