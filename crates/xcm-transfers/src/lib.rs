//! Cross-chain transfer preparation and pricing.
//!
//! This crate provides:
//! - Chain descriptors and the [`ChainDirectory`] lookup
//! - Account and reserve locations ([`location`]) and asset locations
//!   ([`asset_path`]) as seen from the origin chain
//! - Route classification ([`route`])
//! - Weight-estimation programs ([`message`]), transfer call arguments
//!   ([`call`]) and origin-side execute programs ([`execute`])
//! - Execution fees ([`fee`]) and delivery fees ([`delivery`])
//!
//! [`CrossChainTransfers`] ties these together over one loaded
//! [`TransferRegistry`]. Everything except fee estimation is synchronous and
//! pure.

pub mod asset_path;
pub mod call;
pub mod delivery;
pub mod error;
pub mod execute;
pub mod fee;
pub mod location;
pub mod message;
pub mod route;
pub mod settings;
pub mod types;

use std::sync::Arc;

use tracing::{debug, instrument};
use transfer_registry::{ChainAssetId, ChainId, TransferRegistry};
use xcm_primitives::{Multiasset, Multilocation, VersionedMultiasset, VersionedMultilocation, VersionedXcm};

pub use call::TransferCall;
pub use delivery::{DeliveryFeeQuoter, DeliveryFeeWarning, DeliveryLeg, DeliveryQuote, StorageQuery, StorageReader};
pub use error::{EstimatorError, StorageReadError, TransferError};
pub use fee::{ExecutionFee, ExecutionFeeEstimator, ExecutionLeg, FeeModel};
pub use message::WeightMessages;
pub use route::{RouteKind, RouteShape};
pub use settings::Settings;
pub use types::{AssetAmount, ChainDescriptor, ChainDirectory, TransferDestination, TransferRequest};

/// Extrinsic-ready location and asset of a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransfer {
    pub route: RouteShape,
    /// Receiving account, seen from the origin.
    pub destination: VersionedMultilocation,
    pub asset: VersionedMultiasset,
}

/// Full fee of a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossChainFee {
    /// Execution plus delivery.
    pub fee: FeeModel,
    /// Weight limit to buy on the heaviest leg.
    pub weight: u128,
    pub execution: FeeModel,
    pub delivery: FeeModel,
    /// Delivery legs that could not be priced and were counted as zero.
    pub warnings: Vec<DeliveryFeeWarning>,
}

struct Plan {
    route: RouteShape,
    account_location: Multilocation,
    asset: Multiasset,
}

/// Transfer preparation over a loaded registry and chain metadata.
pub struct CrossChainTransfers<D> {
    registry: Arc<TransferRegistry>,
    directory: D,
    settings: Settings,
}

impl<D: ChainDirectory> CrossChainTransfers<D> {
    pub fn new(registry: Arc<TransferRegistry>, directory: D, settings: Settings) -> Self {
        Self {
            registry,
            directory,
            settings,
        }
    }

    pub fn registry(&self) -> &TransferRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swaps in a freshly loaded registry. In-flight calls keep the old one.
    pub fn replace_registry(&mut self, registry: Arc<TransferRegistry>) {
        self.registry = registry;
    }

    pub fn route(&self, origin: &ChainAssetId, destination_chain: &ChainId) -> Result<RouteShape, TransferError> {
        route::classify(&self.registry, &self.directory, origin, destination_chain)
    }

    fn plan(&self, request: &TransferRequest) -> Result<Plan, TransferError> {
        let route = self.route(&request.origin, &request.destination.chain_id)?;

        let account_location =
            location::destination_location(&route.origin, &route.destination, &request.destination.account)?;

        let path = self
            .registry
            .resolve_reserve_path(&request.origin)
            .ok_or_else(|| TransferError::ReserveNotFound(request.origin.to_string()))?;
        let asset_location = asset_path::resolve_asset_location(&path, &route.origin, &route.asset_reserve)?;

        Ok(Plan {
            route,
            account_location,
            asset: Multiasset::new(asset_location, request.amount.value),
        })
    }

    /// Destination and asset arguments for the transfer extrinsic.
    pub fn prepare_transfer(&self, request: &TransferRequest) -> Result<PreparedTransfer, TransferError> {
        let plan = self.plan(request)?;
        let version = self.settings.xcm_version;

        debug!(origin = %request.origin, destination = %plan.account_location, asset = %plan.asset.location, "prepared transfer");

        Ok(PreparedTransfer {
            route: plan.route,
            destination: VersionedMultilocation::new(version, plan.account_location),
            asset: VersionedMultiasset::new(version, plan.asset),
        })
    }

    /// Typed arguments of the dispatchable executing the transfer.
    pub fn transfer_call(&self, request: &TransferRequest) -> Result<TransferCall, TransferError> {
        let prepared = self.prepare_transfer(request)?;
        Ok(TransferCall::new(prepared.route.mechanism, prepared.destination, prepared.asset))
    }

    /// Program the origin executes to perform the transfer itself, shaped by
    /// the route kind.
    pub fn execute_program(&self, request: &TransferRequest) -> Result<VersionedXcm, TransferError> {
        let route = self.route(&request.origin, &request.destination.chain_id)?;

        let path = self
            .registry
            .resolve_reserve_path(&request.origin)
            .ok_or_else(|| TransferError::ReserveNotFound(request.origin.to_string()))?;
        let asset = asset_path::absolute_asset_junctions(&path, &route.origin, &route.asset_reserve)?;

        let program = execute::route_program(&route, &asset, request.amount.value, &request.destination.account)?;
        debug!(origin = %request.origin, kind = ?route.kind, instructions = program.len(), "built execute program");

        Ok(VersionedXcm::new(self.settings.xcm_version, program))
    }

    fn messages_for(&self, request: &TransferRequest, plan: &Plan) -> Result<WeightMessages, TransferError> {
        let reserve_point = location::reserve_point(&plan.route.origin, &plan.route.asset_reserve);

        message::weight_messages(
            &self.registry,
            &plan.route.transfer.fee,
            self.registry.lookup_reserve_fee(&request.origin),
            &plan.asset,
            &plan.account_location,
            &reserve_point,
            self.settings.xcm_version,
        )
    }

    /// Programs for the remote weight estimator.
    pub fn weight_messages(&self, request: &TransferRequest) -> Result<WeightMessages, TransferError> {
        let plan = self.plan(request)?;
        self.messages_for(request, &plan)
    }

    async fn execution_for(
        &self,
        request: &TransferRequest,
        plan: &Plan,
        messages: &WeightMessages,
        estimator: Option<&dyn ExecutionFeeEstimator>,
    ) -> Result<ExecutionFee, TransferError> {
        let route = &plan.route;
        let mut legs = vec![ExecutionLeg {
            chain_id: &route.destination.chain_id,
            fee: &route.transfer.fee,
            message: &messages.destination,
        }];

        if route.is_non_reserve() {
            if let (Some(message), Some(fee)) = (&messages.reserve, self.registry.lookup_reserve_fee(&request.origin)) {
                legs.push(ExecutionLeg {
                    chain_id: &route.reserve.chain_id,
                    fee,
                    message,
                });
            }
        }

        fee::execution_fee(&self.registry, &legs, &self.settings, estimator).await
    }

    /// Execution fee on the destination, plus the reserve for two-hop routes.
    #[instrument(skip_all, fields(origin = %request.origin, destination = %request.destination.chain_id))]
    pub async fn execution_fee(
        &self,
        request: &TransferRequest,
        estimator: Option<&dyn ExecutionFeeEstimator>,
    ) -> Result<ExecutionFee, TransferError> {
        let plan = self.plan(request)?;
        let messages = self.messages_for(request, &plan)?;
        self.execution_for(request, &plan, &messages, estimator).await
    }

    /// Execution and delivery fee of a transfer.
    ///
    /// Returns `Ok(None)` when `quoter` was cancelled or reused for a newer
    /// quote at any point after this call started, including while the
    /// execution fee was being estimated. Delivery read failures do not fail
    /// the call; they show up in [`CrossChainFee::warnings`].
    #[instrument(skip_all, fields(origin = %request.origin, destination = %request.destination.chain_id))]
    pub async fn cross_chain_fee(
        &self,
        request: &TransferRequest,
        quoter: &DeliveryFeeQuoter,
        estimator: Option<&dyn ExecutionFeeEstimator>,
    ) -> Result<Option<CrossChainFee>, TransferError> {
        let generation = quoter.begin();

        let plan = self.plan(request)?;
        let messages = self.messages_for(request, &plan)?;
        let execution = self.execution_for(request, &plan, &messages, estimator).await?;

        if !quoter.is_current(generation) {
            debug!(generation, "fee request superseded during execution estimate");
            return Ok(None);
        }

        let Some(delivery) = quoter
            .quote_for(generation, &self.registry, &plan.route.delivery_legs())
            .await
        else {
            return Ok(None);
        };

        Ok(Some(CrossChainFee {
            fee: execution.fee.combine(delivery.fee),
            weight: execution.weight,
            execution: execution.fee,
            delivery: delivery.fee,
            warnings: delivery.warnings,
        }))
    }
}
