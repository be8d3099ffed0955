use transfer_registry::TransferMechanism;
use xcm_primitives::{Multilocation, VersionedMultiasset, VersionedMultilocation, WeightLimit};

use crate::error::TransferError;

/// Arguments of the extrinsic that executes a transfer.
///
/// Pallet name resolution and encoding belong to the submitting side; this is
/// only the typed argument set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCall {
    pub mechanism: TransferMechanism,
    /// Destination chain, seen from the origin.
    pub destination: VersionedMultilocation,
    /// Receiving account, seen from the destination chain.
    pub beneficiary: VersionedMultilocation,
    pub asset: VersionedMultiasset,
    /// Index of the fee-paying asset in the asset list.
    pub fee_asset_item: u32,
    pub weight_limit: WeightLimit,
}

impl TransferCall {
    /// Splits `account_location` into destination and beneficiary.
    pub fn new(
        mechanism: TransferMechanism,
        account_location: VersionedMultilocation,
        asset: VersionedMultiasset,
    ) -> Self {
        let version = account_location.version();
        let (destination, beneficiary) = account_location.location().split_destination_beneficiary();

        Self {
            mechanism,
            destination: VersionedMultilocation::new(version, destination),
            beneficiary: VersionedMultilocation::new(version, beneficiary),
            asset,
            fee_asset_item: 0,
            weight_limit: WeightLimit::Unlimited,
        }
    }

    /// Dispatchable function name for the mechanism.
    pub fn function_name(&self) -> Result<&'static str, TransferError> {
        call_name(self.mechanism)
    }

    /// Destination and beneficiary joined back into one location, as taken by
    /// token-pallet transfers.
    pub fn joined_destination(&self) -> VersionedMultilocation {
        let chain = self.destination.location();
        let mut interior = chain.interior.clone();
        for junction in self.beneficiary.location().interior.iter() {
            interior.push(junction.clone());
        }

        VersionedMultilocation::new(self.destination.version(), Multilocation::new(chain.parents, interior))
    }
}

pub fn call_name(mechanism: TransferMechanism) -> Result<&'static str, TransferError> {
    match mechanism {
        TransferMechanism::ReserveTransfer => Ok("limited_reserve_transfer_assets"),
        TransferMechanism::Teleport => Ok("limited_teleport_assets"),
        TransferMechanism::TokenPalletTransfer => Ok("transfer_multiasset"),
        TransferMechanism::PalletTransferAssets => Ok("transfer_assets"),
        TransferMechanism::Unknown => Err(TransferError::UnknownMechanism("unknown call type".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcm_primitives::{Junction, Multiasset, XcmVersion};

    fn account_location() -> VersionedMultilocation {
        VersionedMultilocation::new(
            XcmVersion::V3,
            Multilocation::new(
                1,
                vec![Junction::Parachain(2000), Junction::account_id32(&[9; 32]).unwrap()],
            ),
        )
    }

    fn asset() -> VersionedMultiasset {
        VersionedMultiasset::new(XcmVersion::V3, Multiasset::new(Multilocation::parent(), 5))
    }

    #[test]
    fn splits_destination_and_beneficiary() {
        let call = TransferCall::new(TransferMechanism::ReserveTransfer, account_location(), asset());

        assert_eq!(
            call.destination.location(),
            &Multilocation::new(1, vec![Junction::Parachain(2000)])
        );
        assert_eq!(
            call.beneficiary.location(),
            &Multilocation::new(0, vec![Junction::account_id32(&[9; 32]).unwrap()])
        );
        assert_eq!(call.fee_asset_item, 0);
        assert_eq!(call.weight_limit, WeightLimit::Unlimited);
        assert_eq!(call.function_name().unwrap(), "limited_reserve_transfer_assets");
    }

    #[test]
    fn joined_destination_round_trips() {
        let call = TransferCall::new(TransferMechanism::TokenPalletTransfer, account_location(), asset());
        assert_eq!(call.joined_destination(), account_location());
    }

    #[test]
    fn names_per_mechanism() {
        assert_eq!(call_name(TransferMechanism::Teleport).unwrap(), "limited_teleport_assets");
        assert_eq!(call_name(TransferMechanism::TokenPalletTransfer).unwrap(), "transfer_multiasset");
        assert_eq!(call_name(TransferMechanism::PalletTransferAssets).unwrap(), "transfer_assets");
        assert!(call_name(TransferMechanism::Unknown).is_err());
    }

    #[test]
    fn keeps_wire_version() {
        let location = VersionedMultilocation::new(XcmVersion::V2, account_location().into_inner());
        let call = TransferCall::new(TransferMechanism::Teleport, location, asset());
        assert_eq!(call.destination.version(), XcmVersion::V2);
        assert_eq!(call.beneficiary.version(), XcmVersion::V2);
    }
}
