//! Cross-chain transfer registry.
//!
//! The registry is a JSON document describing, per chain asset, which
//! destinations it can be sent to, how the transfer is executed, which
//! instruction programs price it, and where the asset's reserve lives.
//!
//! [`TransferRegistry`] validates the document once at load and exposes an
//! immutable index. Lookups return `Option`: a missing route means the pair is
//! simply not transferable, not that something went wrong.

pub mod error;
pub mod ids;
pub mod model;
pub mod registry;

mod amount;

pub use error::RegistryError;
pub use ids::{AssetId, ChainAssetId, ChainId};
pub use model::{
    AssetLocationPath, DeliveryFeeModel, DeliveryPrice, ExponentialFeeParams, FeeMode, FeeModeType,
    LocationType, PathFields, RegistryDocument, TransferFeeModel, TransferMechanism,
};
pub use registry::{TransferDescriptor, TransferRegistry};
