use thiserror::Error;

/// Registry load failures. Every variant is a configuration defect: the
/// document is rejected as a whole.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed registry document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("transfer from {origin} targets unknown asset {destination}")]
    DanglingTransfer { origin: String, destination: String },

    #[error("asset {asset} references unknown location {location}")]
    DanglingLocation { asset: String, location: String },

    #[error("fee for {owner} references unknown instructions {key}")]
    MissingInstructions { owner: String, key: String },

    #[error("location {0} configures parents outside a concrete path")]
    UnexpectedParents(String),

    #[error("concrete path for {0} is missing its path fields")]
    MissingConcretePath(String),

    #[error("duplicate asset {0}")]
    DuplicateAsset(String),
}
