//! Fee models and execution fees.
//!
//! Every fee splits into a part the sender pays from the origin's native
//! balance and a part deducted from the transferred amount (the holding).
//! Cross-chain fees are built by combining per-leg models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use transfer_registry::{ChainId, FeeModeType, TransferFeeModel, TransferRegistry};
use xcm_primitives::VersionedXcm;

use crate::error::{EstimatorError, TransferError};
use crate::settings::Settings;

/// Sender/holding split of a fee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeModel {
    pub sender_part: u128,
    pub holding_part: u128,
}

impl FeeModel {
    pub const fn zero() -> Self {
        Self {
            sender_part: 0,
            holding_part: 0,
        }
    }

    pub const fn sender(amount: u128) -> Self {
        Self {
            sender_part: amount,
            holding_part: 0,
        }
    }

    pub const fn holding(amount: u128) -> Self {
        Self {
            sender_part: 0,
            holding_part: amount,
        }
    }

    /// Pairwise sum, saturating at `u128::MAX`.
    pub fn combine(self, other: FeeModel) -> FeeModel {
        FeeModel {
            sender_part: self.sender_part.saturating_add(other.sender_part),
            holding_part: self.holding_part.saturating_add(other.holding_part),
        }
    }

    pub fn total(&self) -> u128 {
        self.sender_part.saturating_add(self.holding_part)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl std::iter::Sum for FeeModel {
    fn sum<I: Iterator<Item = FeeModel>>(iter: I) -> Self {
        iter.fold(FeeModel::zero(), FeeModel::combine)
    }
}

/// Execution fee together with the weight bought for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionFee {
    pub fee: FeeModel,
    pub weight: u128,
}

impl ExecutionFee {
    /// Fees add up; the weight limit is that of the heaviest leg.
    pub fn merge(self, other: ExecutionFee) -> ExecutionFee {
        ExecutionFee {
            fee: self.fee.combine(other.fee),
            weight: self.weight.max(other.weight),
        }
    }
}

/// Remote execution-fee estimation, used by `standard` fee mode.
#[async_trait]
pub trait ExecutionFeeEstimator: Send + Sync {
    async fn estimate_execution_fee(
        &self,
        chain_id: &ChainId,
        message: &VersionedXcm,
        max_weight: u128,
    ) -> Result<u128, EstimatorError>;
}

/// One program executed on one chain.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionLeg<'a> {
    pub chain_id: &'a ChainId,
    pub fee: &'a TransferFeeModel,
    pub message: &'a VersionedXcm,
}

pub fn max_weight(base_weight: u128, instruction_count: usize) -> u128 {
    base_weight.saturating_mul(instruction_count as u128)
}

/// `coefficient × weight / weight_per_second`, `None` when
/// `weight_per_second` is zero.
pub fn proportional_fee(coefficient: u128, weight: u128, weight_per_second: u128) -> Option<u128> {
    coefficient.saturating_mul(weight).checked_div(weight_per_second)
}

fn coefficient(fee: &TransferFeeModel, chain_id: &ChainId) -> Result<u128, TransferError> {
    match fee.mode.value.as_deref() {
        None => Ok(0),
        Some(raw) => raw.trim().parse::<u128>().map_err(|e| {
            TransferError::DataCorruption(format!("fee coefficient {raw:?} on {chain_id}: {e}"))
        }),
    }
}

/// Execution fee of a single leg, charged to the holding.
#[instrument(skip_all, fields(chain = %leg.chain_id))]
pub async fn leg_execution_fee(
    registry: &TransferRegistry,
    leg: ExecutionLeg<'_>,
    settings: &Settings,
    estimator: Option<&dyn ExecutionFeeEstimator>,
) -> Result<ExecutionFee, TransferError> {
    let base_weight = registry
        .base_weight(leg.chain_id)
        .ok_or_else(|| TransferError::BaseWeightNotFound(leg.chain_id.clone()))?;
    let weight = max_weight(base_weight, leg.message.instruction_count());

    let amount = match leg.fee.mode.kind {
        FeeModeType::Proportional => {
            proportional_fee(coefficient(leg.fee, leg.chain_id)?, weight, settings.weight_per_second)
                .ok_or_else(|| TransferError::InvalidSettings("weight per second is zero".into()))?
        }
        FeeModeType::Standard => {
            let estimator = estimator
                .ok_or_else(|| TransferError::Estimator("no estimator for standard fee mode".into()))?;
            estimator
                .estimate_execution_fee(leg.chain_id, leg.message, weight)
                .await?
        }
        FeeModeType::Unknown => return Err(TransferError::UnsupportedFeeMode(leg.chain_id.clone())),
    };

    debug!(weight, amount, "estimated execution fee");
    Ok(ExecutionFee {
        fee: FeeModel::holding(amount),
        weight,
    })
}

/// Merged execution fee over `legs`. Any failing leg fails the estimate.
pub async fn execution_fee(
    registry: &TransferRegistry,
    legs: &[ExecutionLeg<'_>],
    settings: &Settings,
    estimator: Option<&dyn ExecutionFeeEstimator>,
) -> Result<ExecutionFee, TransferError> {
    let mut total = ExecutionFee::default();
    for leg in legs {
        let fee = leg_execution_fee(registry, *leg, settings, estimator).await?;
        total = total.merge(fee);
    }
    Ok(total)
}
