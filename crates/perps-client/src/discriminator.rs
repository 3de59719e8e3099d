//! 8-byte schema discriminators.
//!
//! Every account payload and instruction data blob begins with the first 8
//! bytes of a SHA-256 digest over a namespaced schema name: `"account:Name"`
//! for accounts, `"global:name"` for instructions. The tag is part of the wire
//! contract; decode paths reject payloads whose tag does not match.

use sha2::{Digest, Sha256};

use crate::error::PerpsError;

/// Account schema names this crate can decode.
pub const ACCOUNT_NAMES: [&str; 7] = [
    "Perpetuals",
    "Pool",
    "Custody",
    "Position",
    "PositionRequest",
    "BorrowPosition",
    "TokenLedger",
];

/// Instruction names this crate can build.
pub const INSTRUCTION_NAMES: [&str; 14] = [
    "createIncreasePositionMarketRequest",
    "createDecreasePositionMarketRequest",
    "closePositionRequest",
    "addLiquidity2",
    "removeLiquidity2",
    "swap2",
    "getAddLiquidityAmountAndFee2",
    "getRemoveLiquidityAmountAndFee2",
    "getAssetsUnderManagement2",
    "borrowFromCustody",
    "repayToCustody",
    "depositCollateralForBorrows",
    "withdrawCollateralForBorrows",
    "liquidateBorrowPosition",
];

fn tag_of(namespace: &str, name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut tag = [0u8; 8];
    tag.copy_from_slice(&digest[..8]);
    tag
}

/// Compute the discriminator of an account schema name.
///
/// Pure hash, no registry check. Prefer [`account_tag`] when the name comes
/// from outside this crate.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    tag_of("account", name)
}

/// Compute the discriminator of an instruction name.
///
/// Pure hash, no registry check. Prefer [`instruction_tag`] when the name
/// comes from outside this crate.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    tag_of("global", name)
}

/// Discriminator of a registered account schema.
///
/// # Errors
/// Returns [`PerpsError::UnknownSchema`] if `name` is not in
/// [`ACCOUNT_NAMES`].
pub fn account_tag(name: &str) -> Result<[u8; 8], PerpsError> {
    if ACCOUNT_NAMES.contains(&name) {
        Ok(account_discriminator(name))
    } else {
        Err(PerpsError::UnknownSchema(name.to_owned()))
    }
}

/// Discriminator of a registered instruction.
///
/// # Errors
/// Returns [`PerpsError::UnknownSchema`] if `name` is not in
/// [`INSTRUCTION_NAMES`].
pub fn instruction_tag(name: &str) -> Result<[u8; 8], PerpsError> {
    if INSTRUCTION_NAMES.contains(&name) {
        Ok(instruction_discriminator(name))
    } else {
        Err(PerpsError::UnknownSchema(name.to_owned()))
    }
}

/// Whether `buffer` starts with `tag`.
///
/// Buffers shorter than 8 bytes never match; this is a filter predicate, not
/// an error path.
pub fn matches(buffer: &[u8], tag: &[u8; 8]) -> bool {
    buffer.len() >= 8 && buffer[..8] == tag[..]
}
