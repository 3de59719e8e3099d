//! Address derivation: determinism, golden addresses, and the well-known
//! constant checks.

mod common;

use std::str::FromStr;

use common::pk;
use solana_sdk::pubkey::Pubkey;

use perps_client::constants::{
    JLP_POOL_ADDRESS, JUPITER_PERPETUALS_PROGRAM_ID, SOL_CUSTODY,
};
use perps_client::pda::{
    derive_address, event_authority_address, find_associated_token_address,
    find_borrow_position_address, find_custody_address, find_pool_address, find_position_address,
    find_position_request_address, find_token_ledger_address, find_transfer_authority_address,
    perpetuals_address, verify_well_known_addresses,
};
use perps_client::state::RequestChange;

fn owner() -> Pubkey {
    pk(7)
}

fn mint() -> Pubkey {
    pk(9)
}

fn golden(s: &str) -> Pubkey {
    Pubkey::from_str(s).unwrap()
}

#[test]
fn derivation_is_deterministic() {
    let a = find_position_address(&JLP_POOL_ADDRESS, &SOL_CUSTODY, &owner()).unwrap();
    let b = find_position_address(&JLP_POOL_ADDRESS, &SOL_CUSTODY, &owner()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_give_different_addresses() {
    let (a, _) = find_position_address(&JLP_POOL_ADDRESS, &SOL_CUSTODY, &owner()).unwrap();
    let (b, _) = find_position_address(&JLP_POOL_ADDRESS, &SOL_CUSTODY, &pk(8)).unwrap();
    let (c, _) = find_borrow_position_address(&JLP_POOL_ADDRESS, &SOL_CUSTODY, &owner()).unwrap();
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn well_known_constants_match_their_derivations() {
    verify_well_known_addresses().unwrap();

    let (derived, bump) = derive_address(&[b"perpetuals"], &JUPITER_PERPETUALS_PROGRAM_ID).unwrap();
    assert_eq!(derived, perpetuals_address());
    assert_eq!(bump, 255);

    let (derived, bump) =
        derive_address(&[b"__event_authority"], &JUPITER_PERPETUALS_PROGRAM_ID).unwrap();
    assert_eq!(derived, event_authority_address());
    assert_eq!(bump, 253);

    let (derived, bump) = find_transfer_authority_address().unwrap();
    assert_eq!(derived.to_string(), "AVzP2GeRmqGphJsMxWoqjpUifPpCret7LqWhD8NWQK49");
    assert_eq!(bump, 254);
}

#[test]
fn position_pda_golden() {
    let (address, bump) =
        find_position_address(&JLP_POOL_ADDRESS, &SOL_CUSTODY, &owner()).unwrap();
    assert_eq!(address, golden("BSDCpeCqHgfTQgyegQ7eimWWKouFYD9xSJAjLCKXCbUa"));
    assert_eq!(bump, 255);
}

#[test]
fn position_request_pda_goldens() {
    let (position, _) = find_position_address(&JLP_POOL_ADDRESS, &SOL_CUSTODY, &owner()).unwrap();

    let (increase, bump) =
        find_position_request_address(&position, RequestChange::Increase, 0).unwrap();
    assert_eq!(increase, golden("LVfuyN93VRjtaUyG2eqs59cg4csxJiec59pfJzygUhx"));
    assert_eq!(bump, 255);

    let (decrease, bump) =
        find_position_request_address(&position, RequestChange::Decrease, 0).unwrap();
    assert_eq!(decrease, golden("BSBFZz9Nmpe8KojGgGsd728e7miqizfraSPcQiVo9cWh"));
    assert_eq!(bump, 255);

    // The counter is part of the seeds.
    let (counted, _) = find_position_request_address(&position, RequestChange::Increase, 1).unwrap();
    assert_ne!(counted, increase);
}

#[test]
fn request_ata_goldens() {
    let (position, _) = find_position_address(&JLP_POOL_ADDRESS, &SOL_CUSTODY, &owner()).unwrap();
    let (increase, _) = find_position_request_address(&position, RequestChange::Increase, 0).unwrap();
    let (decrease, _) = find_position_request_address(&position, RequestChange::Decrease, 0).unwrap();

    let (increase_ata, bump) = find_associated_token_address(&increase, &mint()).unwrap();
    assert_eq!(increase_ata, golden("9L78TwA1WCgTs2us6eWXyce1httm2KVUdTxTSeEUvDCd"));
    assert_eq!(bump, 255);

    let (decrease_ata, bump) = find_associated_token_address(&decrease, &mint()).unwrap();
    assert_eq!(decrease_ata, golden("GyrBhUM662h6QktPDZX5G97wQ1nxyCybcGwE8ZCWZg3R"));
    assert_eq!(bump, 247);
}

#[test]
fn borrow_position_pda_golden() {
    let (address, bump) =
        find_borrow_position_address(&JLP_POOL_ADDRESS, &SOL_CUSTODY, &owner()).unwrap();
    assert_eq!(address, golden("AXVi5ieceveatdQbLcLAjka5cKvTXNz3Z51zStVTX7s2"));
    assert_eq!(bump, 255);
}

#[test]
fn custody_pda_golden() {
    let (address, bump) = find_custody_address(&JLP_POOL_ADDRESS, &mint()).unwrap();
    assert_eq!(address, golden("mt6SxD7g7TXgEF4oZJ4QUVPWSNUrwuK4QrQxtWGLcLt"));
    assert_eq!(bump, 255);
}

#[test]
fn token_ledger_pda_golden() {
    let (address, bump) = find_token_ledger_address(&owner(), &mint()).unwrap();
    assert_eq!(address, golden("HPtu7vYLXSLVBTnYspSzXaN8tKBhArohF3Yb8x7xi4B7"));
    assert_eq!(bump, 255);
}

#[test]
fn pool_name_is_a_seed() {
    let (jlp, _) = find_pool_address("JLP").unwrap();
    let (other, _) = find_pool_address("JLP2").unwrap();
    assert_ne!(jlp, other);
}
