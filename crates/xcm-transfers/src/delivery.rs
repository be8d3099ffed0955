//! Delivery fee quoting.
//!
//! The delivery fee of a leg depends on a congestion factor stored on the
//! sending chain, so quoting is the only part of the transfer core that does
//! I/O. Reads are bounded by a timeout. A failed or timed-out read degrades
//! that leg to zero and records a [`DeliveryFeeWarning`]; it never fails the
//! quote.
//!
//! Every quote is tagged with a generation number. Starting a newer quote, or
//! calling [`DeliveryFeeQuoter::cancel`], supersedes the running one, whose
//! result is then discarded instead of being returned.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use transfer_registry::{ChainId, DeliveryPrice, ExponentialFeeParams, TransferRegistry};

use crate::error::StorageReadError;
use crate::fee::FeeModel;

/// A single-value storage lookup on a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageQuery {
    pub chain_id: ChainId,
    pub pallet: String,
    pub item: String,
    /// Map key for keyed items; `None` for plain values.
    pub para_id: Option<u32>,
}

impl fmt::Display for StorageQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}.{}", self.chain_id, self.pallet, self.item)?;
        if let Some(para_id) = self.para_id {
            write!(f, "({para_id})")?;
        }
        Ok(())
    }
}

/// Reads numeric values from chain storage.
#[async_trait]
pub trait StorageReader: Send + Sync {
    /// `Ok(None)` when the item holds no value.
    async fn read_u128(&self, query: &StorageQuery) -> Result<Option<u128>, StorageReadError>;
}

/// One message hop whose delivery is paid by its sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryLeg {
    /// Chain sending the message; its pricing and storage are used.
    pub from: ChainId,
    /// Receiving parachain, `None` for the relay chain.
    pub to_para_id: Option<u32>,
    /// Leg is sent by the origin chain, where the sender can pay directly.
    pub sent_from_origin: bool,
}

/// A leg whose delivery fee could not be read and was counted as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFeeWarning {
    pub leg: DeliveryLeg,
    pub reason: String,
}

impl fmt::Display for DeliveryFeeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delivery fee from {} unavailable, counted as zero: {}",
            self.leg.from, self.reason
        )
    }
}

/// Delivery fee over all legs of a transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryQuote {
    pub fee: FeeModel,
    pub warnings: Vec<DeliveryFeeWarning>,
}

/// `size_base + size_factor × factor`, split by who pays.
pub fn exponential_fee(params: &ExponentialFeeParams, factor: u128, sent_from_origin: bool) -> FeeModel {
    let amount = params
        .size_base
        .saturating_add(params.size_factor.saturating_mul(factor));

    if !params.always_holding_pays && sent_from_origin {
        FeeModel::sender(amount)
    } else {
        FeeModel::holding(amount)
    }
}

/// Quotes delivery fees, discarding results of superseded requests.
pub struct DeliveryFeeQuoter {
    reader: Arc<dyn StorageReader>,
    timeout: Duration,
    generation: AtomicU64,
}

impl DeliveryFeeQuoter {
    pub fn new(reader: Arc<dyn StorageReader>, timeout: Duration) -> Self {
        Self {
            reader,
            timeout,
            generation: AtomicU64::new(0),
        }
    }

    /// Supersedes any in-flight quote.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Starts a new request, superseding any in flight, and returns its
    /// generation. Callers that do other work before quoting take the
    /// generation first and pass it to [`quote_for`](Self::quote_for).
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// `false` once a newer request was started or the quoter was cancelled.
    pub fn is_current(&self, generation: u64) -> bool {
        self.current_generation() == generation
    }

    /// Quotes `legs` in order. Returns `None` if a newer quote was started or
    /// [`cancel`](Self::cancel) was called before this one finished.
    pub async fn quote(&self, registry: &TransferRegistry, legs: &[DeliveryLeg]) -> Option<DeliveryQuote> {
        let generation = self.begin();
        self.quote_for(generation, registry, legs).await
    }

    /// Quotes `legs` on behalf of the request tagged `generation`.
    #[instrument(skip_all, fields(generation = generation, legs = legs.len()))]
    pub async fn quote_for(
        &self,
        generation: u64,
        registry: &TransferRegistry,
        legs: &[DeliveryLeg],
    ) -> Option<DeliveryQuote> {
        let mut quote = DeliveryQuote::default();
        for leg in legs {
            if !self.is_current(generation) {
                break;
            }

            match self.leg_fee(registry, leg).await {
                Ok(fee) => quote.fee = quote.fee.combine(fee),
                Err(reason) => {
                    let warning = DeliveryFeeWarning {
                        leg: leg.clone(),
                        reason,
                    };
                    warn!(%warning, "delivery fee degraded");
                    quote.warnings.push(warning);
                }
            }
        }

        if !self.is_current(generation) {
            warn!(generation, "discarding superseded delivery fee quote");
            return None;
        }

        debug!(sender = quote.fee.sender_part, holding = quote.fee.holding_part, "quoted delivery fee");
        Some(quote)
    }

    async fn leg_fee(&self, registry: &TransferRegistry, leg: &DeliveryLeg) -> Result<FeeModel, String> {
        let Some(model) = registry.delivery_fee(&leg.from) else {
            return Ok(FeeModel::zero());
        };

        let params = match model.price_for(leg.to_para_id) {
            Some(DeliveryPrice::Exponential(params)) => params,
            Some(DeliveryPrice::Undefined) | None => return Ok(FeeModel::zero()),
        };

        let query = StorageQuery {
            chain_id: leg.from.clone(),
            pallet: params.factor_pallet.clone(),
            item: params.factor_item(leg.to_para_id).to_string(),
            para_id: leg.to_para_id,
        };

        let factor = match tokio::time::timeout(self.timeout, self.reader.read_u128(&query)).await {
            Ok(Ok(Some(factor))) => factor,
            Ok(Ok(None)) => return Err(format!("{query} is empty")),
            Ok(Err(e)) => return Err(format!("{query}: {e}")),
            Err(_) => return Err(format!("{query} timed out after {:?}", self.timeout)),
        };

        Ok(exponential_fee(params, factor, leg.sent_from_origin))
    }
}
