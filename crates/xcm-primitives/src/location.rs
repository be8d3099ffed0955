use std::fmt;

use serde::{Deserialize, Serialize};

use crate::junction::{Junction, Junctions};

/// A hierarchical cross-consensus address: climb `parents` levels, then
/// descend through `interior`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Multilocation {
    pub parents: u8,
    pub interior: Junctions,
}

impl Multilocation {
    pub fn new(parents: u8, interior: impl Into<Junctions>) -> Self {
        Self {
            parents,
            interior: interior.into(),
        }
    }

    /// The location of the current consensus system.
    pub fn here() -> Self {
        Self::default()
    }

    /// The location of the parent (relay) consensus system.
    pub fn parent() -> Self {
        Self::new(1, Junctions::here())
    }

    /// Separates a beneficiary-bearing location into the chain location and
    /// the beneficiary relative to that chain.
    ///
    /// `{1, [Parachain(2000), AccountId32(..)]}` becomes
    /// `({1, [Parachain(2000)]}, {0, [AccountId32(..)]})`. An interior-less
    /// location yields itself and `Here`.
    pub fn split_destination_beneficiary(&self) -> (Multilocation, Multilocation) {
        match self.interior.split_last() {
            Some((rest, last)) => (
                Multilocation::new(self.parents, rest),
                Multilocation::new(0, vec![last.clone()]),
            ),
            None => (self.clone(), Multilocation::here()),
        }
    }

    /// `target` as seen from `point`, both given as interiors under the same
    /// root (the relay chain). Climbs to their common prefix, then descends.
    ///
    /// `[Parachain(1000), PalletInstance(50)]` seen from `[Parachain(2000)]`
    /// is `{1, [Parachain(1000), PalletInstance(50)]}`.
    pub fn from_point_of_view(target: &Junctions, point: &Junctions) -> Self {
        let common = target
            .iter()
            .zip(point.iter())
            .take_while(|(a, b)| a == b)
            .count();
        let parents = u8::try_from(point.len() - common).unwrap_or(u8::MAX);

        Self::new(parents, target.as_slice()[common..].to_vec())
    }

    /// The innermost `Parachain` junction, if any.
    pub fn parachain_id(&self) -> Option<u32> {
        self.interior.iter().find_map(|j| match j {
            Junction::Parachain(id) => Some(*id),
            _ => None,
        })
    }
}

impl fmt::Display for Multilocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{parents: {}, interior: {}}}", self.parents, self.interior)
    }
}
