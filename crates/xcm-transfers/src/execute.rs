//! Origin-side execute programs.
//!
//! Instead of calling a transfer pallet, the origin chain can be handed a
//! complete program to execute. Its shape follows the [`RouteKind`]:
//!
//! - `SystemTeleport`: `InitiateTeleport` to the destination
//! - `ReserveIsOrigin`: `DepositReserveAsset` to the destination
//! - `ReserveIsDestination`: `InitiateReserveWithdraw` at the destination
//! - `ThirdChain`: `InitiateReserveWithdraw` at the reserve, which then
//!   forwards with `DepositReserveAsset`
//!
//! Every hop buys execution with half of the asset as that hop sees it and
//! the last hop deposits everything left to the beneficiary.

use xcm_primitives::{Instruction, Junctions, Multiasset, MultiassetFilter, Multilocation, WeightLimit};

use crate::error::TransferError;
use crate::location::{account_junction, chain_junctions};
use crate::route::{RouteKind, RouteShape};

// The origin message is weighed as a whole before submission, so the limit
// here only has to be bounded and non-zero.
const ORIGIN_WEIGHT_LIMIT: WeightLimit = WeightLimit::Limited(1);

fn half(asset: Multiasset) -> Multiasset {
    Multiasset::new(asset.location, asset.amount / 2)
}

fn buy_execution(fees: Multiasset, weight_limit: WeightLimit) -> Instruction {
    Instruction::BuyExecution { fees, weight_limit }
}

/// Builds the program the origin executes to move `amount` of the asset at
/// `asset` (junctions under the relay chain) to `account` on the route's
/// destination.
pub fn route_program(
    route: &RouteShape,
    asset: &Junctions,
    amount: u128,
    account: &[u8],
) -> Result<Vec<Instruction>, TransferError> {
    let origin = chain_junctions(&route.origin);
    let destination = chain_junctions(&route.destination);
    let asset_at = |point: &Junctions| Multiasset::new(Multilocation::from_point_of_view(asset, point), amount);

    let beneficiary = Multilocation::new(0, vec![account_junction(&route.destination, account)?]);
    let deposit = vec![
        buy_execution(half(asset_at(&destination)), WeightLimit::Unlimited),
        Instruction::DepositAsset {
            assets: MultiassetFilter::all(),
            max_assets: 1,
            beneficiary,
        },
    ];
    let destination_from_origin = Multilocation::from_point_of_view(&destination, &origin);

    let transfer = match route.kind {
        RouteKind::SystemTeleport => Instruction::InitiateTeleport {
            assets: MultiassetFilter::all(),
            dest: destination_from_origin,
            xcm: deposit,
        },
        RouteKind::ReserveIsOrigin => Instruction::DepositReserveAsset {
            assets: MultiassetFilter::all(),
            max_assets: 1,
            dest: destination_from_origin,
            xcm: deposit,
        },
        RouteKind::ReserveIsDestination => Instruction::InitiateReserveWithdraw {
            assets: MultiassetFilter::all(),
            reserve: destination_from_origin,
            xcm: deposit,
        },
        RouteKind::ThirdChain => {
            let reserve = chain_junctions(&route.reserve);
            Instruction::InitiateReserveWithdraw {
                assets: MultiassetFilter::all(),
                reserve: Multilocation::from_point_of_view(&reserve, &origin),
                xcm: vec![
                    buy_execution(half(asset_at(&reserve)), WeightLimit::Unlimited),
                    Instruction::DepositReserveAsset {
                        assets: MultiassetFilter::all(),
                        max_assets: 1,
                        dest: Multilocation::from_point_of_view(&destination, &reserve),
                        xcm: deposit,
                    },
                ],
            }
        }
    };

    let origin_asset = asset_at(&origin);
    Ok(vec![
        Instruction::WithdrawAsset(vec![origin_asset.clone()]),
        buy_execution(half(origin_asset), ORIGIN_WEIGHT_LIMIT),
        transfer,
    ])
}
