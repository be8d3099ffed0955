//! Location of an asset itself, from the origin chain's point of view.
//!
//! Three addressing conventions coexist in registry documents:
//!
//! - **Absolute** paths are anchored at the reserve chain and valid from
//!   anywhere below the relay chain.
//! - **Relative** paths are published "from wherever you are" and only hold
//!   when the reserve is the origin. Sent elsewhere they are anchored like
//!   absolute paths.
//! - **Concrete** paths carry their own `parents` and anchor.
//!
//! [`absolute_asset_junctions`] gives the same asset as an interior under
//! the relay chain, ready to be re-anchored at any hop of a route.

use tracing::debug;
use transfer_registry::{AssetLocationPath, LocationType, PathFields};
use xcm_primitives::{Junction, Junctions, Multilocation};

use crate::error::TransferError;
use crate::location::chain_junctions;
use crate::types::ChainDescriptor;

/// Resolves `path` into the asset's multilocation for a transfer from
/// `origin` whose reserve is `reserve`.
pub fn resolve_asset_location(
    path: &AssetLocationPath,
    origin: &ChainDescriptor,
    reserve: &ChainDescriptor,
) -> Result<Multilocation, TransferError> {
    let fields = &path.path;

    let location = match path.kind {
        LocationType::Absolute => {
            let anchor = reserve_anchor(fields, reserve)?;
            Multilocation::new(absolute_parents(origin), anchored_junctions(fields, anchor)?)
        }
        LocationType::Relative if origin.chain_id == reserve.chain_id => {
            Multilocation::new(0, relative_junctions(fields)?)
        }
        LocationType::Relative => {
            let anchor = reserve_anchor(fields, reserve)?;
            Multilocation::new(absolute_parents(origin), anchored_junctions(fields, anchor)?)
        }
        LocationType::Concrete => Multilocation::new(
            fields.parents.unwrap_or(0),
            anchored_junctions(fields, fields.parachain_id)?,
        ),
        LocationType::Unknown => {
            return Err(TransferError::DataCorruption(format!(
                "unknown location type for asset reserved on {}",
                reserve.chain_id
            )))
        }
    };

    debug!(kind = ?path.kind, origin = %origin.chain_id, reserve = %reserve.chain_id, %location, "resolved asset location");
    Ok(location)
}

/// The asset under the relay chain, independent of who looks at it.
///
/// Absolute and relative paths are anchored at the reserve. A concrete path
/// is read from `origin`: its `parents` climb out of the origin first.
pub fn absolute_asset_junctions(
    path: &AssetLocationPath,
    origin: &ChainDescriptor,
    reserve: &ChainDescriptor,
) -> Result<Junctions, TransferError> {
    let fields = &path.path;

    let junctions = match path.kind {
        LocationType::Absolute | LocationType::Relative => {
            let anchor = reserve_anchor(fields, reserve)?;
            anchored_junctions(fields, anchor)?
        }
        LocationType::Concrete => {
            let origin_junctions = chain_junctions(origin);
            let parents = usize::from(fields.parents.unwrap_or(0));
            let Some(kept) = origin_junctions.len().checked_sub(parents) else {
                return Err(TransferError::DataCorruption(format!(
                    "concrete path on {} climbs {parents} levels above the relay chain",
                    origin.chain_id
                )));
            };

            let mut junctions = origin_junctions.as_slice()[..kept].to_vec();
            junctions.extend(anchored_junctions(fields, fields.parachain_id)?);
            junctions
        }
        LocationType::Unknown => {
            return Err(TransferError::DataCorruption(format!(
                "unknown location type for asset reserved on {}",
                reserve.chain_id
            )))
        }
    };

    Ok(Junctions::from_vec(junctions))
}

fn absolute_parents(origin: &ChainDescriptor) -> u8 {
    if origin.is_relaychain {
        0
    } else {
        1
    }
}

/// Parachain the path is anchored at. Chain metadata wins; the configured
/// `parachainId` fills in when the reserve has none. Disagreement means the
/// document and the metadata describe different chains.
fn reserve_anchor(fields: &PathFields, reserve: &ChainDescriptor) -> Result<Option<u32>, TransferError> {
    match (reserve.para_id, fields.parachain_id) {
        (Some(actual), Some(configured)) if actual != configured => Err(TransferError::DataCorruption(format!(
            "reserve {} has para id {actual} but its path says {configured}",
            reserve.chain_id
        ))),
        (Some(actual), _) => Ok(Some(actual)),
        (None, configured) => Ok(configured),
    }
}

/// `[PalletInstance?, GeneralKey | GeneralIndex]`. A general key shadows a
/// general index.
fn relative_junctions(fields: &PathFields) -> Result<Vec<Junction>, TransferError> {
    let mut junctions = Vec::with_capacity(3);

    if let Some(instance) = fields.pallet_instance {
        junctions.push(Junction::PalletInstance(instance));
    }

    if let Some(key) = &fields.general_key {
        junctions.push(Junction::general_key_from_hex(key)?);
    } else if let Some(index) = &fields.general_index {
        junctions.push(Junction::general_index_from_str(index)?);
    }

    Ok(junctions)
}

fn anchored_junctions(fields: &PathFields, anchor: Option<u32>) -> Result<Vec<Junction>, TransferError> {
    let mut junctions = relative_junctions(fields)?;
    if let Some(para_id) = anchor {
        junctions.insert(0, Junction::Parachain(para_id));
    }
    Ok(junctions)
}
