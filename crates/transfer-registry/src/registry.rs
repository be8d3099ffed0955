use std::collections::HashMap;

use tracing::debug;

use crate::error::RegistryError;
use crate::ids::{ChainAssetId, ChainId};
use crate::model::{
    AssetLocationEntry, AssetLocationPath, DeliveryFeeModel, LocationPathEntry, LocationType,
    RegistryDocument, TransferFeeModel, TransferMechanism,
};

/// A configured route from one chain asset to an asset on another chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDescriptor {
    pub origin: ChainAssetId,
    pub destination: ChainAssetId,
    /// Execution fee model on the destination chain.
    pub fee: TransferFeeModel,
    pub mechanism: TransferMechanism,
}

#[derive(Debug, Clone)]
struct IndexedAsset {
    /// Effective reserve location id, overrides applied.
    location_id: String,
    path: LocationPathEntry,
}

/// Immutable index over a validated [`RegistryDocument`].
///
/// Built once per session and replaced wholesale when the document changes.
/// All accessors take `&self`, so one instance can be shared behind an `Arc`
/// by any number of concurrent transfer preparations.
#[derive(Debug, Clone)]
pub struct TransferRegistry {
    locations: HashMap<String, AssetLocationEntry>,
    assets: HashMap<ChainAssetId, IndexedAsset>,
    transfers: HashMap<ChainAssetId, Vec<TransferDescriptor>>,
    instructions: HashMap<String, Vec<String>>,
    base_weights: HashMap<ChainId, u128>,
    delivery_fees: HashMap<ChainId, DeliveryFeeModel>,
}

impl TransferRegistry {
    /// Parses and validates a registry JSON document.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let document: RegistryDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Same as [`TransferRegistry::from_json`] for raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RegistryError> {
        let document: RegistryDocument = serde_json::from_slice(bytes)?;
        Self::from_document(document)
    }

    /// Validates a parsed document and builds the index.
    ///
    /// Rejects dangling asset/location/instruction references and `parents`
    /// configured on shared (non-concrete) locations.
    pub fn from_document(document: RegistryDocument) -> Result<Self, RegistryError> {
        let RegistryDocument {
            assets_location,
            reserve_id_overrides,
            instructions,
            network_base_weight,
            network_delivery_fee,
            chains,
        } = document;

        let locations: HashMap<String, AssetLocationEntry> = assets_location.into_iter().collect();
        let instructions: HashMap<String, Vec<String>> = instructions.into_iter().collect();

        for (location_id, entry) in &locations {
            if entry.multi_location.parents.is_some() {
                return Err(RegistryError::UnexpectedParents(location_id.clone()));
            }
            if let Some(reserve_fee) = &entry.reserve_fee {
                ensure_instructions(&instructions, &reserve_fee.instructions, || {
                    format!("reserve {location_id}")
                })?;
            }
        }

        let mut assets = HashMap::new();
        let mut pending_transfers = Vec::new();

        for chain in chains {
            let overrides = reserve_id_overrides.get(&chain.chain_id);

            for asset in chain.assets {
                let id = ChainAssetId::new(chain.chain_id.clone(), asset.asset_id);

                let location_id = overrides
                    .and_then(|o| o.get(&asset.asset_id.to_string()))
                    .cloned()
                    .unwrap_or(asset.asset_location);

                if !locations.contains_key(&location_id) {
                    return Err(RegistryError::DanglingLocation {
                        asset: id.to_string(),
                        location: location_id,
                    });
                }

                if asset.asset_location_path.kind == LocationType::Concrete
                    && asset.asset_location_path.path.is_none()
                {
                    return Err(RegistryError::MissingConcretePath(id.to_string()));
                }

                for transfer in asset.xcm_transfers {
                    pending_transfers.push(TransferDescriptor {
                        origin: id.clone(),
                        destination: ChainAssetId::new(
                            transfer.destination.chain_id,
                            transfer.destination.asset_id,
                        ),
                        fee: transfer.destination.fee,
                        mechanism: transfer.mechanism,
                    });
                }

                let indexed = IndexedAsset {
                    location_id,
                    path: asset.asset_location_path,
                };

                if assets.insert(id.clone(), indexed).is_some() {
                    return Err(RegistryError::DuplicateAsset(id.to_string()));
                }
            }
        }

        let mut transfers: HashMap<ChainAssetId, Vec<TransferDescriptor>> = HashMap::new();
        for transfer in pending_transfers {
            if !assets.contains_key(&transfer.destination) {
                return Err(RegistryError::DanglingTransfer {
                    origin: transfer.origin.to_string(),
                    destination: transfer.destination.to_string(),
                });
            }
            ensure_instructions(&instructions, &transfer.fee.instructions, || {
                format!("{} -> {}", transfer.origin, transfer.destination.chain_id)
            })?;
            transfers
                .entry(transfer.origin.clone())
                .or_default()
                .push(transfer);
        }

        debug!(
            assets = assets.len(),
            routes = transfers.values().map(Vec::len).sum::<usize>(),
            locations = locations.len(),
            "loaded transfer registry"
        );

        Ok(Self {
            locations,
            assets,
            transfers,
            instructions,
            base_weights: network_base_weight.into_iter().collect(),
            delivery_fees: network_delivery_fee.into_iter().collect(),
        })
    }

    /// The route from `origin` to `destination_chain`, if one is configured.
    pub fn lookup_transfer(
        &self,
        origin: &ChainAssetId,
        destination_chain: &ChainId,
    ) -> Option<&TransferDescriptor> {
        self.transfers
            .get(origin)?
            .iter()
            .find(|t| &t.destination.chain_id == destination_chain)
    }

    /// All routes configured for `origin`.
    pub fn destinations(&self, origin: &ChainAssetId) -> &[TransferDescriptor] {
        self.transfers.get(origin).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_asset(&self, id: &ChainAssetId) -> bool {
        self.assets.contains_key(id)
    }

    /// Effective reserve location id of `origin` (overrides applied).
    pub fn reserve_location_id(&self, origin: &ChainAssetId) -> Option<&str> {
        self.assets.get(origin).map(|a| a.location_id.as_str())
    }

    /// The asset's path convention together with the fields it applies to.
    ///
    /// Concrete assets carry their own path; every other convention uses the
    /// shared reserve location's `multiLocation`.
    pub fn resolve_reserve_path(&self, origin: &ChainAssetId) -> Option<AssetLocationPath> {
        let asset = self.assets.get(origin)?;
        let path = match (&asset.path.kind, &asset.path.path) {
            (LocationType::Concrete, Some(path)) => path.clone(),
            _ => self.locations.get(&asset.location_id)?.multi_location.clone(),
        };

        Some(AssetLocationPath {
            kind: asset.path.kind,
            path,
        })
    }

    /// Chain holding the reserve of `origin`.
    pub fn resolve_reserve_chain(&self, origin: &ChainAssetId) -> Option<&ChainId> {
        let asset = self.assets.get(origin)?;
        self.locations.get(&asset.location_id).map(|l| &l.chain_id)
    }

    /// Execution fee model on the destination chain of the route.
    pub fn lookup_destination_fee(
        &self,
        origin: &ChainAssetId,
        destination_chain: &ChainId,
    ) -> Option<&TransferFeeModel> {
        self.lookup_transfer(origin, destination_chain).map(|t| &t.fee)
    }

    /// Execution fee model on the reserve chain, if the reserve charges one.
    pub fn lookup_reserve_fee(&self, origin: &ChainAssetId) -> Option<&TransferFeeModel> {
        let asset = self.assets.get(origin)?;
        self.locations.get(&asset.location_id)?.reserve_fee.as_ref()
    }

    pub fn instructions(&self, key: &str) -> Option<&[String]> {
        self.instructions.get(key).map(Vec::as_slice)
    }

    /// Weight of a single instruction on `chain_id`.
    pub fn base_weight(&self, chain_id: &ChainId) -> Option<u128> {
        self.base_weights.get(chain_id).copied()
    }

    /// Delivery pricing for messages sent from `chain_id`.
    pub fn delivery_fee(&self, chain_id: &ChainId) -> Option<&DeliveryFeeModel> {
        self.delivery_fees.get(chain_id)
    }
}

fn ensure_instructions(
    instructions: &HashMap<String, Vec<String>>,
    key: &str,
    owner: impl FnOnce() -> String,
) -> Result<(), RegistryError> {
    if instructions.contains_key(key) {
        Ok(())
    } else {
        Err(RegistryError::MissingInstructions {
            owner: owner(),
            key: key.to_string(),
        })
    }
}
