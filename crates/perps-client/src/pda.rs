//! Program-derived address derivation.
//!
//! Seed layouts here are the program's addressing contract; a wrong seed
//! order produces a valid but unrelated address, so each finder encodes its
//! layout exactly once. All finders return the canonical `(address, bump)`
//! pair from the bounded bump search (255 down to 0, first off-curve hit).

use solana_sdk::pubkey::Pubkey;

use crate::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, BORROW_POSITION_SEED, CUSTODY_SEED, EVENT_AUTHORITY,
    EVENT_AUTHORITY_SEED, JUPITER_PERPETUALS_PROGRAM_ID, PERPETUALS_ADDRESS, PERPETUALS_SEED,
    POOL_SEED, POSITION_REQUEST_SEED, POSITION_SEED, TOKEN_LEDGER_SEED, TOKEN_PROGRAM_ID,
    TRANSFER_AUTHORITY, TRANSFER_AUTHORITY_SEED,
};
use crate::error::PerpsError;
use crate::state::RequestChange;

/// Derive a program address for arbitrary seeds.
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] when no bump in 255..=0
/// yields an off-curve address. Practically unreachable, but the bound is
/// part of the contract.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8), PerpsError> {
    Pubkey::try_find_program_address(seeds, program_id).ok_or(PerpsError::DerivationExhausted)
}

/// The global `Perpetuals` state address.
pub fn perpetuals_address() -> Pubkey {
    PERPETUALS_ADDRESS
}

/// The Anchor event authority address.
pub fn event_authority_address() -> Pubkey {
    EVENT_AUTHORITY
}

/// Derive the transfer authority, `["transfer_authority"]`.
///
/// # Errors
/// See [`derive_address`].
pub fn find_transfer_authority_address() -> Result<(Pubkey, u8), PerpsError> {
    derive_address(&[TRANSFER_AUTHORITY_SEED], &JUPITER_PERPETUALS_PROGRAM_ID)
}

/// Derive a pool address, `["pool", name]`.
///
/// # Errors
/// See [`derive_address`].
pub fn find_pool_address(name: &str) -> Result<(Pubkey, u8), PerpsError> {
    derive_address(&[POOL_SEED, name.as_bytes()], &JUPITER_PERPETUALS_PROGRAM_ID)
}

/// Derive a custody address, `["custody", pool, mint]`.
///
/// # Errors
/// See [`derive_address`].
pub fn find_custody_address(pool: &Pubkey, mint: &Pubkey) -> Result<(Pubkey, u8), PerpsError> {
    derive_address(
        &[CUSTODY_SEED, pool.as_ref(), mint.as_ref()],
        &JUPITER_PERPETUALS_PROGRAM_ID,
    )
}

/// Derive a position address, `["position", pool, custody, owner]`.
///
/// # Errors
/// See [`derive_address`].
pub fn find_position_address(
    pool: &Pubkey,
    custody: &Pubkey,
    owner: &Pubkey,
) -> Result<(Pubkey, u8), PerpsError> {
    derive_address(
        &[POSITION_SEED, pool.as_ref(), custody.as_ref(), owner.as_ref()],
        &JUPITER_PERPETUALS_PROGRAM_ID,
    )
}

/// Derive a position-request address,
/// `["position_request", perpetuals, position, change, counter-le]`.
///
/// The request-change seed component is its lowercase text form; the counter
/// is 8 little-endian bytes.
///
/// # Errors
/// See [`derive_address`].
pub fn find_position_request_address(
    position: &Pubkey,
    change: RequestChange,
    counter: u64,
) -> Result<(Pubkey, u8), PerpsError> {
    derive_address(
        &[
            POSITION_REQUEST_SEED,
            PERPETUALS_ADDRESS.as_ref(),
            position.as_ref(),
            change.as_seed(),
            &counter.to_le_bytes(),
        ],
        &JUPITER_PERPETUALS_PROGRAM_ID,
    )
}

/// Derive a borrow-position address, `["borrow_position", pool, custody, owner]`.
///
/// # Errors
/// See [`derive_address`].
pub fn find_borrow_position_address(
    pool: &Pubkey,
    custody: &Pubkey,
    owner: &Pubkey,
) -> Result<(Pubkey, u8), PerpsError> {
    derive_address(
        &[BORROW_POSITION_SEED, pool.as_ref(), custody.as_ref(), owner.as_ref()],
        &JUPITER_PERPETUALS_PROGRAM_ID,
    )
}

/// Derive a token-ledger address, `["token_ledger", owner, mint]`.
///
/// # Errors
/// See [`derive_address`].
pub fn find_token_ledger_address(
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, u8), PerpsError> {
    derive_address(
        &[TOKEN_LEDGER_SEED, owner.as_ref(), mint.as_ref()],
        &JUPITER_PERPETUALS_PROGRAM_ID,
    )
}

/// Derive an associated token account, `[owner, token-program, mint]` under
/// the ATA program.
///
/// # Errors
/// See [`derive_address`].
pub fn find_associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, u8), PerpsError> {
    derive_address(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
}

/// Re-derive the singleton addresses and compare them to the compile-time
/// constants.
///
/// # Errors
/// Returns [`PerpsError::AddressMismatch`] naming the first constant that
/// drifted from its derivation, or [`PerpsError::DerivationExhausted`].
pub fn verify_well_known_addresses() -> Result<(), PerpsError> {
    let checks: [(&'static str, &[&[u8]], Pubkey); 3] = [
        ("perpetuals", &[PERPETUALS_SEED], PERPETUALS_ADDRESS),
        ("event_authority", &[EVENT_AUTHORITY_SEED], EVENT_AUTHORITY),
        ("transfer_authority", &[TRANSFER_AUTHORITY_SEED], TRANSFER_AUTHORITY),
    ];
    for (name, seeds, expected) in checks {
        let (derived, _) = derive_address(seeds, &JUPITER_PERPETUALS_PROGRAM_ID)?;
        if derived != expected {
            return Err(PerpsError::AddressMismatch { name, derived, expected });
        }
    }
    Ok(())
}
