//! Cross-consensus (XCM) protocol structures for the transfer core.
//!
//! This crate provides:
//! - Junctions and multilocations (hierarchical cross-chain addresses)
//! - Multiassets and asset filters
//! - Versioned wrappers for the V2 and V3 wire formats
//! - The instruction set and a table-driven program builder used for
//!   fee/weight estimation
//!
//! Nothing here talks to a chain. Every value is built fresh per transfer and
//! is cheap to clone.

pub mod asset;
pub mod error;
pub mod instruction;
pub mod junction;
pub mod location;
pub mod versioned;

mod hex_bytes;

pub use asset::{Multiasset, MultiassetFilter, WildMultiasset};
pub use error::XcmError;
pub use instruction::{build_program, expand_token, supported_tokens, Instruction, WeightLimit};
pub use junction::{Junction, Junctions, NetworkId};
pub use location::Multilocation;
pub use versioned::{VersionedMultiasset, VersionedMultilocation, VersionedXcm, XcmVersion};
