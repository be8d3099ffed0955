//! Route classification.
//!
//! A [`RouteShape`] is computed once per transfer and answers every
//! "which chain is the reserve / how many hops" question downstream.

use serde::{Deserialize, Serialize};
use tracing::debug;
use transfer_registry::{ChainAssetId, ChainId, TransferDescriptor, TransferMechanism, TransferRegistry};

use crate::delivery::DeliveryLeg;
use crate::error::TransferError;
use crate::types::{ChainDescriptor, ChainDirectory};

/// Where the reserve sits relative to the transfer endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteKind {
    ReserveIsOrigin,
    ReserveIsDestination,
    /// Two hops: origin → reserve → destination.
    ThirdChain,
    /// Native token between trusted system chains, sent directly.
    SystemTeleport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteShape {
    pub origin: ChainDescriptor,
    pub destination: ChainDescriptor,
    /// Chain the message hops through. For [`RouteKind::SystemTeleport`] this
    /// is the origin itself.
    pub reserve: ChainDescriptor,
    /// Chain holding the asset's reserve. Anchors the asset's location and
    /// differs from `reserve` only for system teleports.
    pub asset_reserve: ChainDescriptor,
    pub kind: RouteKind,
    pub mechanism: TransferMechanism,
    pub transfer: TransferDescriptor,
}

impl RouteShape {
    pub fn is_non_reserve(&self) -> bool {
        self.kind == RouteKind::ThirdChain
    }

    pub fn hop_count(&self) -> usize {
        if self.is_non_reserve() {
            2
        } else {
            1
        }
    }

    /// Parachain receiving the message the origin sends.
    pub fn first_hop_para_id(&self) -> Option<u32> {
        if self.is_non_reserve() {
            self.reserve.para_id
        } else {
            self.destination.para_id
        }
    }

    /// Chain sending the message the destination receives.
    pub fn last_hop_sender(&self) -> &ChainDescriptor {
        if self.is_non_reserve() {
            &self.reserve
        } else {
            &self.origin
        }
    }

    /// Message hops in sending order.
    pub fn delivery_legs(&self) -> Vec<DeliveryLeg> {
        let first = DeliveryLeg {
            from: self.origin.chain_id.clone(),
            to_para_id: self.first_hop_para_id(),
            sent_from_origin: true,
        };

        if !self.is_non_reserve() {
            return vec![first];
        }

        let second = DeliveryLeg {
            from: self.last_hop_sender().chain_id.clone(),
            to_para_id: self.destination.para_id,
            sent_from_origin: false,
        };
        vec![first, second]
    }
}

fn lookup_chain<'a, D: ChainDirectory + ?Sized>(
    directory: &'a D,
    chain_id: &ChainId,
) -> Result<&'a ChainDescriptor, TransferError> {
    directory
        .chain(chain_id)
        .ok_or_else(|| TransferError::ChainNotFound(chain_id.clone()))
}

/// Classifies the configured route from `origin` to `destination_chain`.
pub fn classify<D: ChainDirectory + ?Sized>(
    registry: &TransferRegistry,
    directory: &D,
    origin: &ChainAssetId,
    destination_chain: &ChainId,
) -> Result<RouteShape, TransferError> {
    let transfer = registry
        .lookup_transfer(origin, destination_chain)
        .ok_or_else(|| TransferError::RouteNotFound {
            origin: origin.to_string(),
            destination: destination_chain.clone(),
        })?;

    if transfer.mechanism == TransferMechanism::Unknown {
        return Err(TransferError::UnknownMechanism(format!(
            "{origin} -> {destination_chain}"
        )));
    }

    let origin_chain = lookup_chain(directory, &origin.chain_id)?;
    let destination = lookup_chain(directory, destination_chain)?;

    let reserve_chain_id = registry
        .resolve_reserve_chain(origin)
        .ok_or_else(|| TransferError::ReserveNotFound(origin.to_string()))?;
    let asset_reserve = lookup_chain(directory, reserve_chain_id)?;

    let system_teleport = origin_chain.is_trusted_system_chain()
        && destination.is_trusted_system_chain()
        && origin_chain.native_asset_id == origin.asset_id;

    let (kind, reserve) = if system_teleport {
        (RouteKind::SystemTeleport, origin_chain)
    } else if asset_reserve.chain_id == origin_chain.chain_id {
        (RouteKind::ReserveIsOrigin, asset_reserve)
    } else if asset_reserve.chain_id == destination.chain_id {
        (RouteKind::ReserveIsDestination, asset_reserve)
    } else {
        (RouteKind::ThirdChain, asset_reserve)
    };

    debug!(%origin, destination = %destination_chain, reserve = %reserve.chain_id, ?kind, "classified route");

    Ok(RouteShape {
        origin: origin_chain.clone(),
        destination: destination.clone(),
        reserve: reserve.clone(),
        asset_reserve: asset_reserve.clone(),
        kind,
        mechanism: transfer.mechanism,
        transfer: transfer.clone(),
    })
}
