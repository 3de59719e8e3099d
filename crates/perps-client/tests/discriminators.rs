//! Discriminator golden values, registry checks, and collision freedom.

use perps_client::discriminator::{
    account_discriminator, account_tag, instruction_discriminator, instruction_tag, matches,
    ACCOUNT_NAMES, INSTRUCTION_NAMES,
};
use perps_client::error::PerpsError;
use perps_client::state::{AccountRecord, Custody, Pool, Position};

#[test]
fn account_discriminators_match_known_values() {
    let goldens: [(&str, [u8; 8]); 7] = [
        ("Perpetuals", [0x1c, 0xa7, 0x62, 0xbf, 0x68, 0x52, 0x6c, 0xc4]),
        ("Pool", [0xf1, 0x9a, 0x6d, 0x04, 0x11, 0xb1, 0x6d, 0xbc]),
        ("Custody", [0x01, 0xb8, 0x30, 0x51, 0x5d, 0x83, 0x3f, 0x91]),
        ("Position", [0xaa, 0xbc, 0x8f, 0xe4, 0x7a, 0x40, 0xf7, 0xd0]),
        ("PositionRequest", [0x0c, 0x26, 0xfa, 0xc7, 0x2e, 0x9a, 0x20, 0xd8]),
        ("BorrowPosition", [0xf3, 0x8c, 0x14, 0x8b, 0x20, 0xf3, 0x72, 0x37]),
        ("TokenLedger", [0x9c, 0xf7, 0x09, 0xbc, 0x36, 0x6c, 0x55, 0x4d]),
    ];
    for (name, expected) in goldens {
        assert_eq!(account_discriminator(name), expected, "{name}");
    }
}

#[test]
fn instruction_discriminators_match_known_values() {
    let goldens: [(&str, [u8; 8]); 14] = [
        ("createIncreasePositionMarketRequest", [0xb7, 0xc6, 0x61, 0xa9, 0x23, 0x01, 0xe1, 0x39]),
        ("createDecreasePositionMarketRequest", [0x93, 0xee, 0x4c, 0x5b, 0x30, 0x56, 0xa7, 0xfd]),
        ("closePositionRequest", [0x4b, 0xcf, 0x46, 0xad, 0x76, 0x7c, 0xda, 0xb3]),
        ("addLiquidity2", [0x1c, 0xa8, 0x9c, 0x3e, 0x4d, 0xd6, 0xf1, 0x9b]),
        ("removeLiquidity2", [0x55, 0xb2, 0xdf, 0xd0, 0xad, 0x6e, 0x90, 0x24]),
        ("swap2", [0x41, 0x4b, 0x3f, 0x4c, 0xeb, 0x5b, 0x5b, 0x88]),
        ("getAddLiquidityAmountAndFee2", [0xeb, 0x06, 0xf4, 0xf4, 0x44, 0x0d, 0xff, 0x03]),
        ("getRemoveLiquidityAmountAndFee2", [0x00, 0x14, 0x79, 0x15, 0xff, 0xe4, 0x98, 0xb8]),
        ("getAssetsUnderManagement2", [0xc5, 0xb5, 0x8b, 0x44, 0x4f, 0xbc, 0xdd, 0x5a]),
        ("borrowFromCustody", [0x84, 0x1a, 0xa1, 0xe0, 0x78, 0x81, 0x04, 0x46]),
        ("repayToCustody", [0xd1, 0xe7, 0x83, 0xa1, 0x15, 0x21, 0xd1, 0x87]),
        ("depositCollateralForBorrows", [0xf3, 0x77, 0x9d, 0x75, 0xa9, 0xbe, 0xd4, 0xe8]),
        ("withdrawCollateralForBorrows", [0x2c, 0xd9, 0x3a, 0x77, 0x8e, 0x18, 0x5b, 0xf0]),
        ("liquidateBorrowPosition", [0x95, 0xe0, 0x68, 0x9a, 0x4a, 0x49, 0xce, 0xfb]),
    ];
    for (name, expected) in goldens {
        assert_eq!(instruction_discriminator(name), expected, "{name}");
    }
}

#[test]
fn discriminators_are_deterministic() {
    assert_eq!(account_discriminator("Position"), account_discriminator("Position"));
    assert_eq!(instruction_discriminator("swap2"), instruction_discriminator("swap2"));
}

#[test]
fn namespaces_are_distinct() {
    // Same name, different namespace, different tag.
    assert_ne!(account_discriminator("Pool"), instruction_discriminator("Pool"));
}

#[test]
fn no_collisions_within_either_namespace() {
    for (i, a) in ACCOUNT_NAMES.iter().enumerate() {
        for b in &ACCOUNT_NAMES[i + 1..] {
            assert_ne!(account_discriminator(a), account_discriminator(b), "{a} vs {b}");
        }
    }
    for (i, a) in INSTRUCTION_NAMES.iter().enumerate() {
        for b in &INSTRUCTION_NAMES[i + 1..] {
            assert_ne!(instruction_discriminator(a), instruction_discriminator(b), "{a} vs {b}");
        }
    }
}

#[test]
fn record_trait_and_registry_agree() {
    assert_eq!(Pool::discriminator(), account_tag("Pool").unwrap());
    assert_eq!(Custody::discriminator(), account_tag("Custody").unwrap());
    assert_eq!(Position::discriminator(), account_tag("Position").unwrap());
}

#[test]
fn unknown_names_are_rejected() {
    assert!(matches!(account_tag("Order"), Err(PerpsError::UnknownSchema(name)) if name == "Order"));
    assert!(matches!(instruction_tag("swap3"), Err(PerpsError::UnknownSchema(_))));
    // Registry lookups are namespace-scoped.
    assert!(account_tag("swap2").is_err());
    assert!(instruction_tag("Pool").is_err());
}

#[test]
fn matches_filters_without_panicking() {
    let tag = account_discriminator("Position");
    let mut buffer = tag.to_vec();
    buffer.extend_from_slice(&[0u8; 4]);
    assert!(matches(&buffer, &tag));
    assert!(!matches(&buffer, &account_discriminator("Pool")));
    // Short buffers never match.
    assert!(!matches(&tag[..7], &tag));
    assert!(!matches(&[], &tag));
}
