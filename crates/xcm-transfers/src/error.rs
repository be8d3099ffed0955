use thiserror::Error;
use transfer_registry::RegistryError;
use xcm_primitives::XcmError;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("no transfer route from {origin} to {destination}")]
    RouteNotFound { origin: String, destination: String },

    #[error("unknown chain: {0}")]
    ChainNotFound(String),

    #[error("no reserve configured for {0}")]
    ReserveNotFound(String),

    #[error("no instructions under key {0}")]
    InstructionsNotFound(String),

    #[error("no base weight for chain {0}")]
    BaseWeightNotFound(String),

    #[error("data corruption: {0}")]
    DataCorruption(String),

    #[error("unsupported instruction: {0}")]
    UnsupportedInstruction(String),

    #[error("unknown transfer mechanism for {0}")]
    UnknownMechanism(String),

    #[error("unsupported fee mode for {0}")]
    UnsupportedFeeMode(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("execution fee estimation failed: {0}")]
    Estimator(String),

    #[error("invalid registry: {0}")]
    Registry(String),
}

impl TransferError {
    /// Configuration simply has no answer for the requested pair.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TransferError::RouteNotFound { .. }
                | TransferError::ChainNotFound(_)
                | TransferError::ReserveNotFound(_)
                | TransferError::InstructionsNotFound(_)
                | TransferError::BaseWeightNotFound(_)
        )
    }

    /// A message built despite this error could be misaddressed; nothing may
    /// be submitted.
    pub fn blocks_submission(&self) -> bool {
        matches!(
            self,
            TransferError::DataCorruption(_)
                | TransferError::UnsupportedInstruction(_)
                | TransferError::UnknownMechanism(_)
                | TransferError::Registry(_)
        )
    }
}

impl From<XcmError> for TransferError {
    fn from(e: XcmError) -> Self {
        match e {
            XcmError::UnsupportedInstruction(token) => TransferError::UnsupportedInstruction(token),
            other => TransferError::DataCorruption(other.to_string()),
        }
    }
}

impl From<RegistryError> for TransferError {
    fn from(e: RegistryError) -> Self {
        TransferError::Registry(e.to_string())
    }
}

/// Failure reported by a storage-read collaborator.
#[derive(Debug, Clone, Error)]
#[error("storage read failed: {0}")]
pub struct StorageReadError(pub String);

/// Failure reported by an execution-fee estimator.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct EstimatorError(pub String);

impl From<EstimatorError> for TransferError {
    fn from(e: EstimatorError) -> Self {
        TransferError::Estimator(e.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_route_not_found() {
        let err = TransferError::RouteNotFound {
            origin: "acala:1".into(),
            destination: "moonbeam".into(),
        };
        assert_eq!(err.to_string(), "no transfer route from acala:1 to moonbeam");
    }

    #[test]
    fn display_data_corruption() {
        let err = TransferError::DataCorruption("bad key".into());
        assert_eq!(err.to_string(), "data corruption: bad key");
    }

    #[test]
    fn display_estimator() {
        let err = TransferError::from(EstimatorError("node offline".into()));
        assert_eq!(err.to_string(), "execution fee estimation failed: node offline");
    }

    #[test]
    fn display_invalid_settings() {
        let err = TransferError::InvalidSettings("weight per second is zero".into());
        assert_eq!(err.to_string(), "invalid settings: weight per second is zero");
        assert!(!err.blocks_submission());
    }

    #[test]
    fn display_storage_read() {
        let err = StorageReadError("timeout".into());
        assert_eq!(err.to_string(), "storage read failed: timeout");
    }

    #[test]
    fn xcm_errors_map_by_kind() {
        let unsupported = TransferError::from(XcmError::UnsupportedInstruction("FooBar".into()));
        assert!(matches!(unsupported, TransferError::UnsupportedInstruction(ref t) if t == "FooBar"));

        let corrupted = TransferError::from(XcmError::InvalidGeneralKey("0xzz".into()));
        assert!(matches!(corrupted, TransferError::DataCorruption(_)));
    }

    #[test]
    fn registry_error_is_fatal() {
        let err = TransferError::from(RegistryError::DuplicateAsset("a:0".into()));
        assert!(err.blocks_submission());
        assert!(err.to_string().starts_with("invalid registry: "));
    }

    #[test]
    fn severity_classes() {
        assert!(TransferError::DataCorruption(String::new()).blocks_submission());
        assert!(TransferError::UnsupportedInstruction(String::new()).blocks_submission());
        assert!(TransferError::UnknownMechanism(String::new()).blocks_submission());

        let missing = TransferError::BaseWeightNotFound("acala".into());
        assert!(missing.is_not_found());
        assert!(!missing.blocks_submission());

        let estimator = TransferError::Estimator("down".into());
        assert!(!estimator.is_not_found());
        assert!(!estimator.blocks_submission());
    }
}
