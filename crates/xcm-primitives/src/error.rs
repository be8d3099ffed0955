use thiserror::Error;

/// Errors raised while building XCM structures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XcmError {
    #[error("invalid general key: {0}")]
    InvalidGeneralKey(String),

    #[error("invalid general index: {0}")]
    InvalidGeneralIndex(String),

    #[error("invalid account: {0}")]
    InvalidAccount(String),

    #[error("unsupported instruction: {0}")]
    UnsupportedInstruction(String),
}
