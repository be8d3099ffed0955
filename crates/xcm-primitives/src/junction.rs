use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::XcmError;

/// Maximum length of a `GeneralKey` payload in the V3 wire format.
pub const MAX_GENERAL_KEY_LEN: usize = 32;

/// Network qualifier carried by account junctions.
///
/// Transfers inside one consensus system never pin a network, so `Any` is the
/// only value this core produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NetworkId {
    #[default]
    Any,
}

/// One segment of a multilocation's interior path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Junction {
    Parachain(u32),
    PalletInstance(u8),
    GeneralKey(#[serde(with = "crate::hex_bytes")] Vec<u8>),
    GeneralIndex(u128),
    AccountId32 {
        network: NetworkId,
        #[serde(with = "crate::hex_bytes")]
        id: [u8; 32],
    },
    AccountKey20 {
        network: NetworkId,
        #[serde(with = "crate::hex_bytes")]
        key: [u8; 20],
    },
}

impl Junction {
    /// Parses a `GeneralKey` junction from a hex string (with or without `0x`).
    pub fn general_key_from_hex(value: &str) -> Result<Self, XcmError> {
        let stripped = value.strip_prefix("0x").unwrap_or(value);
        let bytes = hex::decode(stripped)
            .map_err(|e| XcmError::InvalidGeneralKey(format!("{value}: {e}")))?;

        if bytes.len() > MAX_GENERAL_KEY_LEN {
            return Err(XcmError::InvalidGeneralKey(format!(
                "{value}: {} bytes exceeds {MAX_GENERAL_KEY_LEN}",
                bytes.len()
            )));
        }

        Ok(Junction::GeneralKey(bytes))
    }

    /// Parses a `GeneralIndex` junction from a decimal string.
    pub fn general_index_from_str(value: &str) -> Result<Self, XcmError> {
        value
            .trim()
            .parse::<u128>()
            .map(Junction::GeneralIndex)
            .map_err(|e| XcmError::InvalidGeneralIndex(format!("{value}: {e}")))
    }

    /// Builds an `AccountId32` junction; `account` must be exactly 32 bytes.
    pub fn account_id32(account: &[u8]) -> Result<Self, XcmError> {
        let id: [u8; 32] = account.try_into().map_err(|_| {
            XcmError::InvalidAccount(format!("expected 32 bytes, got {}", account.len()))
        })?;
        Ok(Junction::AccountId32 {
            network: NetworkId::Any,
            id,
        })
    }

    /// Builds an `AccountKey20` junction; `account` must be exactly 20 bytes.
    pub fn account_key20(account: &[u8]) -> Result<Self, XcmError> {
        let key: [u8; 20] = account.try_into().map_err(|_| {
            XcmError::InvalidAccount(format!("expected 20 bytes, got {}", account.len()))
        })?;
        Ok(Junction::AccountKey20 {
            network: NetworkId::Any,
            key,
        })
    }

    pub fn is_account(&self) -> bool {
        matches!(self, Junction::AccountId32 { .. } | Junction::AccountKey20 { .. })
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Junction::Parachain(id) => write!(f, "Parachain({id})"),
            Junction::PalletInstance(index) => write!(f, "PalletInstance({index})"),
            Junction::GeneralKey(key) => write!(f, "GeneralKey(0x{})", hex::encode(key)),
            Junction::GeneralIndex(index) => write!(f, "GeneralIndex({index})"),
            Junction::AccountId32 { id, .. } => write!(f, "AccountId32(0x{})", hex::encode(id)),
            Junction::AccountKey20 { key, .. } => write!(f, "AccountKey20(0x{})", hex::encode(key)),
        }
    }
}

/// Ordered junction sequence, outermost first.
///
/// Order is significant: `[Parachain(1000), PalletInstance(50)]` and the
/// reverse name different things, so nothing here ever sorts or dedups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Junctions(Vec<Junction>);

impl Junctions {
    /// The empty interior (`Here`).
    pub fn here() -> Self {
        Junctions(Vec::new())
    }

    pub fn from_vec(items: Vec<Junction>) -> Self {
        Junctions(items)
    }

    pub fn push(&mut self, junction: Junction) {
        self.0.push(junction);
    }

    /// Returns a copy with `junction` as the new outermost segment.
    pub fn prepending(&self, junction: Junction) -> Self {
        let mut items = Vec::with_capacity(self.0.len() + 1);
        items.push(junction);
        items.extend(self.0.iter().cloned());
        Junctions(items)
    }

    /// Splits off the innermost junction.
    pub fn split_last(&self) -> Option<(Junctions, &Junction)> {
        let (last, rest) = self.0.split_last()?;
        Some((Junctions(rest.to_vec()), last))
    }

    pub fn first(&self) -> Option<&Junction> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Junction> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Junction> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Junction] {
        &self.0
    }
}

impl From<Vec<Junction>> for Junctions {
    fn from(items: Vec<Junction>) -> Self {
        Junctions(items)
    }
}

impl fmt::Display for Junctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "Here");
        }
        write!(f, "X{}(", self.0.len())?;
        for (i, junction) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{junction}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_key_accepts_prefixed_hex() {
        let junction = Junction::general_key_from_hex("0x0001").unwrap();
        assert_eq!(junction, Junction::GeneralKey(vec![0x00, 0x01]));
    }

    #[test]
    fn general_key_accepts_bare_hex() {
        let junction = Junction::general_key_from_hex("0a0b").unwrap();
        assert_eq!(junction, Junction::GeneralKey(vec![0x0a, 0x0b]));
    }

    #[test]
    fn general_key_rejects_invalid_hex() {
        let err = Junction::general_key_from_hex("0xzz").unwrap_err();
        assert!(matches!(err, XcmError::InvalidGeneralKey(_)));
    }

    #[test]
    fn general_key_rejects_odd_length() {
        assert!(Junction::general_key_from_hex("0x123").is_err());
    }

    #[test]
    fn general_key_rejects_oversized_payload() {
        let long = format!("0x{}", "ab".repeat(33));
        assert!(Junction::general_key_from_hex(&long).is_err());
    }

    #[test]
    fn general_index_parses_beyond_u64() {
        let junction = Junction::general_index_from_str("340282366920938463463374607431768211455").unwrap();
        assert_eq!(junction, Junction::GeneralIndex(u128::MAX));
    }

    #[test]
    fn general_index_rejects_garbage() {
        let err = Junction::general_index_from_str("12abc").unwrap_err();
        assert!(matches!(err, XcmError::InvalidGeneralIndex(_)));
    }

    #[test]
    fn general_index_rejects_negative() {
        assert!(Junction::general_index_from_str("-1").is_err());
    }

    #[test]
    fn account_id32_requires_32_bytes() {
        assert!(Junction::account_id32(&[0xAA; 32]).is_ok());
        assert!(Junction::account_id32(&[0xAA; 20]).is_err());
    }

    #[test]
    fn account_key20_requires_20_bytes() {
        assert!(Junction::account_key20(&[0xBB; 20]).is_ok());
        assert!(Junction::account_key20(&[0xBB; 32]).is_err());
    }

    #[test]
    fn account_junctions_use_any_network() {
        match Junction::account_id32(&[1; 32]).unwrap() {
            Junction::AccountId32 { network, .. } => assert_eq!(network, NetworkId::Any),
            other => panic!("unexpected junction {other:?}"),
        }
    }

    #[test]
    fn prepending_keeps_order() {
        let junctions = Junctions::from_vec(vec![Junction::PalletInstance(50), Junction::GeneralIndex(8)]);
        let prefixed = junctions.prepending(Junction::Parachain(1000));
        assert_eq!(
            prefixed.as_slice(),
            &[
                Junction::Parachain(1000),
                Junction::PalletInstance(50),
                Junction::GeneralIndex(8)
            ]
        );
        // Original untouched.
        assert_eq!(junctions.len(), 2);
    }

    #[test]
    fn split_last_returns_innermost() {
        let junctions = Junctions::from_vec(vec![Junction::Parachain(2000), Junction::PalletInstance(10)]);
        let (rest, last) = junctions.split_last().unwrap();
        assert_eq!(last, &Junction::PalletInstance(10));
        assert_eq!(rest.as_slice(), &[Junction::Parachain(2000)]);
        assert!(Junctions::here().split_last().is_none());
    }

    #[test]
    fn display_formats() {
        assert_eq!(Junctions::here().to_string(), "Here");
        let junctions = Junctions::from_vec(vec![Junction::Parachain(2000), Junction::GeneralKey(vec![0xab])]);
        assert_eq!(junctions.to_string(), "X2(Parachain(2000), GeneralKey(0xab))");
    }

    #[test]
    fn serde_uses_hex_for_keys() {
        let junction = Junction::GeneralKey(vec![0xde, 0xad]);
        let json = serde_json::to_string(&junction).unwrap();
        assert_eq!(json, r#"{"GeneralKey":"0xdead"}"#);

        let back: Junction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, junction);
    }

    #[test]
    fn serde_rejects_wrong_account_length() {
        let json = r#"{"AccountKey20":{"network":"Any","key":"0xdead"}}"#;
        assert!(serde_json::from_str::<Junction>(json).is_err());
    }
}
