//! Account-bearing destination locations and reserve points.
//!
//! Both are expressed from the origin chain's point of view. Parents are
//! derived from the chain pair, never configured: a parachain sending
//! anywhere but itself must first go up to the relay chain.

use xcm_primitives::{Junction, Junctions, Multilocation};

use crate::error::TransferError;
use crate::types::ChainDescriptor;

/// `1` when `origin` must climb to the relay chain to reach `target`.
pub fn derive_parents(origin: &ChainDescriptor, target: &ChainDescriptor) -> u8 {
    if !origin.is_relaychain && origin.chain_id != target.chain_id {
        1
    } else {
        0
    }
}

/// Account junction in the destination's address family.
pub fn account_junction(
    destination: &ChainDescriptor,
    account: &[u8],
) -> Result<Junction, TransferError> {
    let junction = if destination.is_ethereum_based {
        Junction::account_key20(account)
    } else {
        Junction::account_id32(account)
    };

    junction.map_err(|e| TransferError::DataCorruption(format!("{} account: {e}", destination.chain_id)))
}

/// Location of `account` on `destination`, seen from `origin`.
pub fn destination_location(
    origin: &ChainDescriptor,
    destination: &ChainDescriptor,
    account: &[u8],
) -> Result<Multilocation, TransferError> {
    let account = account_junction(destination, account)?;

    let interior = match destination.para_id {
        Some(para_id) => vec![Junction::Parachain(para_id), account],
        None => vec![account],
    };

    Ok(Multilocation::new(derive_parents(origin, destination), interior))
}

/// Interior of `chain` under the relay chain: `[Parachain(id)]`, or `Here`
/// for the relay chain itself.
pub fn chain_junctions(chain: &ChainDescriptor) -> Junctions {
    match chain.para_id {
        Some(para_id) => Junctions::from_vec(vec![Junction::Parachain(para_id)]),
        None => Junctions::here(),
    }
}

/// Location of the reserve chain itself, seen from `origin`.
pub fn reserve_point(origin: &ChainDescriptor, reserve: &ChainDescriptor) -> Multilocation {
    Multilocation::new(derive_parents(origin, reserve), chain_junctions(reserve))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay() -> ChainDescriptor {
        ChainDescriptor::relaychain("polkadot")
    }

    fn acala() -> ChainDescriptor {
        ChainDescriptor::parachain("acala", 2000)
    }

    fn moonbeam() -> ChainDescriptor {
        ChainDescriptor::parachain("moonbeam", 2004).ethereum_based()
    }

    #[test]
    fn relay_to_parachain() {
        let location = destination_location(&relay(), &acala(), &[0xaa; 32]).unwrap();
        assert_eq!(location.parents, 0);
        assert_eq!(
            location.interior.as_slice(),
            &[
                Junction::Parachain(2000),
                Junction::account_id32(&[0xaa; 32]).unwrap()
            ]
        );
    }

    #[test]
    fn parachain_to_parachain() {
        let location = destination_location(&acala(), &moonbeam(), &[0xbb; 20]).unwrap();
        assert_eq!(location.parents, 1);
        assert_eq!(
            location.interior.as_slice(),
            &[
                Junction::Parachain(2004),
                Junction::account_key20(&[0xbb; 20]).unwrap()
            ]
        );
    }

    #[test]
    fn parachain_to_relay() {
        let location = destination_location(&acala(), &relay(), &[0x01; 32]).unwrap();
        assert_eq!(location.parents, 1);
        assert_eq!(location.interior.len(), 1);
        assert!(location.interior.as_slice()[0].is_account());
    }

    #[test]
    fn same_chain_has_no_parents() {
        assert_eq!(derive_parents(&acala(), &acala()), 0);
        assert_eq!(derive_parents(&relay(), &relay()), 0);
    }

    #[test]
    fn wrong_account_length_is_corruption() {
        let err = destination_location(&relay(), &moonbeam(), &[0xaa; 32]).unwrap_err();
        assert!(matches!(err, TransferError::DataCorruption(_)), "{err}");

        let err = destination_location(&moonbeam(), &acala(), &[0xaa; 20]).unwrap_err();
        assert!(matches!(err, TransferError::DataCorruption(_)), "{err}");
    }

    #[test]
    fn reserve_point_of_parachain() {
        let location = reserve_point(&moonbeam(), &acala());
        assert_eq!(location, Multilocation::new(1, vec![Junction::Parachain(2000)]));
    }

    #[test]
    fn reserve_point_of_relay() {
        assert_eq!(reserve_point(&acala(), &relay()), Multilocation::parent());
        assert_eq!(reserve_point(&relay(), &relay()), Multilocation::here());
    }

    #[test]
    fn reserve_point_of_self() {
        let location = reserve_point(&acala(), &acala());
        assert_eq!(location, Multilocation::new(0, vec![Junction::Parachain(2000)]));
    }
}
