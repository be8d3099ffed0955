use serde::{Deserialize, Serialize};

use crate::asset::Multiasset;
use crate::instruction::Instruction;
use crate::location::Multilocation;

/// XCM wire-protocol versions this core can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum XcmVersion {
    V2,
    #[default]
    V3,
}

impl std::fmt::Display for XcmVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XcmVersion::V2 => write!(f, "V2"),
            XcmVersion::V3 => write!(f, "V3"),
        }
    }
}

/// Generates a version-tagged wrapper with uniform accessors.
macro_rules! versioned {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $getter:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            V2($inner),
            V3($inner),
        }

        impl $name {
            pub fn new(version: XcmVersion, value: $inner) -> Self {
                match version {
                    XcmVersion::V2 => $name::V2(value),
                    XcmVersion::V3 => $name::V3(value),
                }
            }

            pub fn version(&self) -> XcmVersion {
                match self {
                    $name::V2(_) => XcmVersion::V2,
                    $name::V3(_) => XcmVersion::V3,
                }
            }

            pub fn $getter(&self) -> &$inner {
                match self {
                    $name::V2(value) | $name::V3(value) => value,
                }
            }

            pub fn into_inner(self) -> $inner {
                match self {
                    $name::V2(value) | $name::V3(value) => value,
                }
            }
        }
    };
}

versioned!(
    /// A multilocation tagged with its wire version.
    VersionedMultilocation,
    Multilocation,
    location
);

versioned!(
    /// A multiasset tagged with its wire version.
    VersionedMultiasset,
    Multiasset,
    asset
);

versioned!(
    /// An instruction program tagged with its wire version.
    VersionedXcm,
    Vec<Instruction>,
    instructions
);

impl VersionedXcm {
    pub fn instruction_count(&self) -> usize {
        self.instructions().len()
    }
}
