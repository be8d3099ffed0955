use transfer_registry::{TransferFeeModel, TransferRegistry};
use xcm_primitives::{build_program, Multiasset, Multilocation, VersionedXcm, XcmVersion};

use crate::error::TransferError;

/// Programs priced by the weight estimator for one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightMessages {
    /// Executed on the destination chain; deposits to the account location.
    pub destination: VersionedXcm,
    /// Executed on the reserve chain, present when the reserve charges for
    /// execution.
    pub reserve: Option<VersionedXcm>,
}

/// Expands the instruction list stored under `key`.
pub fn build_message(
    registry: &TransferRegistry,
    key: &str,
    asset: &Multiasset,
    destination: &Multilocation,
    version: XcmVersion,
) -> Result<VersionedXcm, TransferError> {
    let tokens = registry
        .instructions(key)
        .ok_or_else(|| TransferError::InstructionsNotFound(key.to_string()))?;

    let program = build_program(tokens, asset, destination)?;
    Ok(VersionedXcm::new(version, program))
}

/// Builds the destination program and, if `reserve_fee` is configured, the
/// reserve program. Both carry the same asset as seen from the origin.
pub fn weight_messages(
    registry: &TransferRegistry,
    destination_fee: &TransferFeeModel,
    reserve_fee: Option<&TransferFeeModel>,
    asset: &Multiasset,
    account_location: &Multilocation,
    reserve_point: &Multilocation,
    version: XcmVersion,
) -> Result<WeightMessages, TransferError> {
    let destination = build_message(
        registry,
        &destination_fee.instructions,
        asset,
        account_location,
        version,
    )?;

    let reserve = reserve_fee
        .map(|fee| build_message(registry, &fee.instructions, asset, reserve_point, version))
        .transpose()?;

    Ok(WeightMessages { destination, reserve })
}
