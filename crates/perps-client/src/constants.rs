//! Compile-time constants: well-known addresses, PDA seeds, and scale factors.
//!
//! Addresses originate as base58 strings in `perps-program-ids` and are
//! converted to `Pubkey` constants here via `five8_const`.

use solana_sdk::pubkey::Pubkey;

/// Decode a base58 string constant into a `Pubkey` at compile time.
const fn pubkey_const(s: &str) -> Pubkey {
    Pubkey::new_from_array(five8_const::decode_32_const(s))
}

// ============================================================================
// Program and singleton addresses
// ============================================================================

/// Jupiter Perpetuals program.
pub const JUPITER_PERPETUALS_PROGRAM_ID: Pubkey =
    pubkey_const(perps_program_ids::JUPITER_PERPETUALS_ID);

/// Global `Perpetuals` state account, PDA of `[PERPETUALS_SEED]`.
pub const PERPETUALS_ADDRESS: Pubkey = pubkey_const(perps_program_ids::PERPETUALS_STATE);

/// Anchor event authority, PDA of `[EVENT_AUTHORITY_SEED]`.
pub const EVENT_AUTHORITY: Pubkey = pubkey_const(perps_program_ids::EVENT_AUTHORITY);

/// Custody token-account authority, PDA of `[TRANSFER_AUTHORITY_SEED]`.
pub const TRANSFER_AUTHORITY: Pubkey = pubkey_const(perps_program_ids::TRANSFER_AUTHORITY);

/// The JLP liquidity pool account.
pub const JLP_POOL_ADDRESS: Pubkey = pubkey_const(perps_program_ids::JLP_POOL);

/// The JLP token mint.
pub const JLP_MINT_ADDRESS: Pubkey = pubkey_const(perps_program_ids::JLP_MINT);

// ============================================================================
// SPL / system programs
// ============================================================================

/// SPL Token program.
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey_const(perps_program_ids::TOKEN_PROGRAM_ID);

/// SPL Associated Token Account program.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey_const(perps_program_ids::ASSOCIATED_TOKEN_PROGRAM_ID);

/// System program.
pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey_const(perps_program_ids::SYSTEM_PROGRAM_ID);

// ============================================================================
// Custody accounts
// ============================================================================

/// SOL custody account.
pub const SOL_CUSTODY: Pubkey = pubkey_const(perps_program_ids::SOL_CUSTODY);

/// ETH custody account.
pub const ETH_CUSTODY: Pubkey = pubkey_const(perps_program_ids::ETH_CUSTODY);

/// BTC custody account.
pub const BTC_CUSTODY: Pubkey = pubkey_const(perps_program_ids::BTC_CUSTODY);

/// USDC custody account.
pub const USDC_CUSTODY: Pubkey = pubkey_const(perps_program_ids::USDC_CUSTODY);

/// USDT custody account.
pub const USDT_CUSTODY: Pubkey = pubkey_const(perps_program_ids::USDT_CUSTODY);

/// The five instruments backing the JLP pool, by symbol.
pub const KNOWN_CUSTODIES: [(&str, Pubkey); 5] = [
    ("SOL", SOL_CUSTODY),
    ("ETH", ETH_CUSTODY),
    ("BTC", BTC_CUSTODY),
    ("USDC", USDC_CUSTODY),
    ("USDT", USDT_CUSTODY),
];

// ============================================================================
// PDA seeds
// ============================================================================

/// Seed for the global `Perpetuals` account.
pub const PERPETUALS_SEED: &[u8] = b"perpetuals";
/// Seed for the transfer authority.
pub const TRANSFER_AUTHORITY_SEED: &[u8] = b"transfer_authority";
/// Seed prefix for pool accounts.
pub const POOL_SEED: &[u8] = b"pool";
/// Seed prefix for custody accounts.
pub const CUSTODY_SEED: &[u8] = b"custody";
/// Seed prefix for position accounts.
pub const POSITION_SEED: &[u8] = b"position";
/// Seed prefix for position-request accounts.
pub const POSITION_REQUEST_SEED: &[u8] = b"position_request";
/// Seed prefix for borrow-position accounts.
pub const BORROW_POSITION_SEED: &[u8] = b"borrow_position";
/// Seed prefix for token-ledger accounts.
pub const TOKEN_LEDGER_SEED: &[u8] = b"token_ledger";
/// Seed for the Anchor event authority.
pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";

// ============================================================================
// Scale factors
// ============================================================================

/// Decimal places of the USDC mint.
pub const USDC_DECIMALS: u8 = 6;
/// Decimal places of the JLP mint.
pub const JLP_DECIMALS: u8 = 6;
/// Decimal places of on-chain USD amounts.
pub const USD_DECIMALS: u8 = 6;
/// Basis-point denominator.
pub const BPS_POWER: u64 = 10_000;
/// Deci-basis-point denominator.
pub const DBPS_POWER: u64 = 100_000;
/// Funding-rate fixed-point denominator.
pub const RATE_POWER: u64 = 1_000_000_000;
/// Borrow-size fixed-point denominator.
pub const BORROW_SIZE_PRECISION: u64 = 1_000;
