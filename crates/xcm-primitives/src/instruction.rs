//! XCM instructions and the token-driven program builder.
//!
//! Registry documents describe weight-estimation programs as ordered lists of
//! instruction names (tokens). [`build_program`] expands such a list against a
//! concrete asset and destination. The expansion is a static table, so the
//! supported set is enumerable via [`supported_tokens`].
//!
//! Token-built programs are only used to estimate fees and weights. The
//! instructions carrying a nested program (`InitiateReserveWithdraw`,
//! `InitiateTeleport`) have no token; they only appear in execute programs
//! assembled per route.

use serde::{Deserialize, Serialize};

use crate::asset::{Multiasset, MultiassetFilter};
use crate::error::XcmError;
use crate::location::Multilocation;

/// Upper bound on weight bought by `BuyExecution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightLimit {
    Unlimited,
    Limited(u64),
}

/// The subset of the XCM instruction set used by transfer programs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    WithdrawAsset(Vec<Multiasset>),
    ReserveAssetDeposited(Vec<Multiasset>),
    ReceiveTeleportedAsset(Vec<Multiasset>),
    ClearOrigin,
    BuyExecution {
        fees: Multiasset,
        weight_limit: WeightLimit,
    },
    DepositAsset {
        assets: MultiassetFilter,
        max_assets: u32,
        beneficiary: Multilocation,
    },
    DepositReserveAsset {
        assets: MultiassetFilter,
        max_assets: u32,
        dest: Multilocation,
        xcm: Vec<Instruction>,
    },
    InitiateReserveWithdraw {
        assets: MultiassetFilter,
        reserve: Multilocation,
        xcm: Vec<Instruction>,
    },
    InitiateTeleport {
        assets: MultiassetFilter,
        dest: Multilocation,
        xcm: Vec<Instruction>,
    },
}

/// Signature shared by every table entry.
type Expansion = fn(&Multiasset, &Multilocation) -> Instruction;

/// Token → instruction constructor. Order here is irrelevant; program order
/// always follows the token list.
const INSTRUCTION_TABLE: &[(&str, Expansion)] = &[
    ("WithdrawAsset", withdraw_asset),
    ("ClearOrigin", clear_origin),
    ("ReserveAssetDeposited", reserve_asset_deposited),
    ("BuyExecution", buy_execution),
    ("DepositAsset", deposit_asset),
    ("DepositReserveAsset", deposit_reserve_asset),
    ("ReceiveTeleportedAsset", receive_teleported_asset),
];

fn withdraw_asset(asset: &Multiasset, _: &Multilocation) -> Instruction {
    Instruction::WithdrawAsset(vec![asset.clone()])
}

fn clear_origin(_: &Multiasset, _: &Multilocation) -> Instruction {
    Instruction::ClearOrigin
}

fn reserve_asset_deposited(asset: &Multiasset, _: &Multilocation) -> Instruction {
    Instruction::ReserveAssetDeposited(vec![asset.clone()])
}

// Weight is a placeholder; the estimator fills in the real limit.
fn buy_execution(asset: &Multiasset, _: &Multilocation) -> Instruction {
    Instruction::BuyExecution {
        fees: asset.clone(),
        weight_limit: WeightLimit::Limited(0),
    }
}

fn deposit_asset(_: &Multiasset, destination: &Multilocation) -> Instruction {
    Instruction::DepositAsset {
        assets: MultiassetFilter::all(),
        max_assets: 1,
        beneficiary: destination.clone(),
    }
}

fn deposit_reserve_asset(_: &Multiasset, destination: &Multilocation) -> Instruction {
    Instruction::DepositReserveAsset {
        assets: MultiassetFilter::all(),
        max_assets: 1,
        dest: destination.clone(),
        xcm: Vec::new(),
    }
}

fn receive_teleported_asset(asset: &Multiasset, _: &Multilocation) -> Instruction {
    Instruction::ReceiveTeleportedAsset(vec![asset.clone()])
}

/// Expands a single token, or fails with [`XcmError::UnsupportedInstruction`].
pub fn expand_token(
    token: &str,
    asset: &Multiasset,
    destination: &Multilocation,
) -> Result<Instruction, XcmError> {
    INSTRUCTION_TABLE
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, expand)| expand(asset, destination))
        .ok_or_else(|| XcmError::UnsupportedInstruction(token.to_string()))
}

/// Expands an ordered token list into an instruction program.
///
/// Order is preserved verbatim and duplicates are kept. A single unknown token
/// fails the whole build; no partial program is returned.
pub fn build_program<S: AsRef<str>>(
    tokens: &[S],
    asset: &Multiasset,
    destination: &Multilocation,
) -> Result<Vec<Instruction>, XcmError> {
    tokens
        .iter()
        .map(|token| expand_token(token.as_ref(), asset, destination))
        .collect()
}

/// All tokens the builder understands.
pub fn supported_tokens() -> impl Iterator<Item = &'static str> {
    INSTRUCTION_TABLE.iter().map(|(name, _)| *name)
}
