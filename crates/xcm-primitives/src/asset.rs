use serde::{Deserialize, Serialize};

use crate::location::Multilocation;

/// A fungible asset identified by its location, with an amount in the
/// asset's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Multiasset {
    pub location: Multilocation,
    pub amount: u128,
}

impl Multiasset {
    pub fn new(location: Multilocation, amount: u128) -> Self {
        Self { location, amount }
    }
}

/// Wildcard asset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildMultiasset {
    All,
}

/// Selects assets from the holding register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultiassetFilter {
    Definite(Vec<Multiasset>),
    Wild(WildMultiasset),
}

impl MultiassetFilter {
    pub fn all() -> Self {
        MultiassetFilter::Wild(WildMultiasset::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::junction::Junction;

    #[test]
    fn filter_all_is_wildcard() {
        assert_eq!(MultiassetFilter::all(), MultiassetFilter::Wild(WildMultiasset::All));
    }

    #[test]
    fn serde_keeps_large_amounts() {
        let asset = Multiasset::new(
            Multilocation::new(0, vec![Junction::PalletInstance(50)]),
            u128::MAX,
        );
        let json = serde_json::to_string(&asset).unwrap();
        let back: Multiasset = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount, u128::MAX);
    }
}
