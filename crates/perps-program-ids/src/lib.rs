//! Single source of truth for all Jupiter Perpetuals well-known addresses.
//!
//! This crate defines addresses as `&'static str` base58 constants so they can
//! be consumed at compile time (e.g. via `five8_const::decode_32_const`) by the
//! client crate and by test fixtures without pulling in any Solana dependency.

#![no_std]

// =============================================================================
// Program ID
// =============================================================================

/// Jupiter Perpetuals program ID (mainnet).
pub const JUPITER_PERPETUALS_ID: &str = "PERPHjGBqRHArX4DySjwM6UJHiR3sWAatqfdBS2qQJu";

// =============================================================================
// Program-derived singletons
// =============================================================================

/// Global `Perpetuals` state account. PDA of `["perpetuals"]`.
pub const PERPETUALS_STATE: &str = "H4ND9aYttUVLFmNypZqLjZ52FYiGvdEB45GmwNoKEjTj";

/// Anchor event authority. PDA of `["__event_authority"]`.
pub const EVENT_AUTHORITY: &str = "37hJBDnntwqhGbK7L6M1bLyvccj4u55CCUiLPdYkiqBN";

/// Custody token-account authority. PDA of `["transfer_authority"]`.
pub const TRANSFER_AUTHORITY: &str = "AVzP2GeRmqGphJsMxWoqjpUifPpCret7LqWhD8NWQK49";

// =============================================================================
// JLP pool
// =============================================================================

/// The JLP liquidity pool account.
pub const JLP_POOL: &str = "5BUwFW4nRbftYTDMbgxykoFWqWHPzahFSNAaaaJtVKsq";

/// The JLP liquidity-provider token mint.
pub const JLP_MINT: &str = "27G8MtK7VtTcCHkpASjSDdkWWYfoqT6ggEuKidVJidD4";

// =============================================================================
// Custody accounts (the five JLP pool instruments)
// =============================================================================

/// SOL custody account.
pub const SOL_CUSTODY: &str = "7xS2gz2bTp3fwCC7knJvUWTEU9Tycczu6VhJYKgi1wdz";

/// ETH custody account.
pub const ETH_CUSTODY: &str = "AQCGyheWPLeo6Qp9WpYS9m3Qj479t7R636N9ey1rEjEn";

/// BTC custody account.
pub const BTC_CUSTODY: &str = "5Pv3gM9JrFFH883SWAhvJC9RPYmo8UNxuFtv5bMMALkm";

/// USDC custody account.
pub const USDC_CUSTODY: &str = "G18jKKXQwBbrHeiK3C9MRXhkHsLHf7XgCSisykV46EZa";

/// USDT custody account.
pub const USDT_CUSTODY: &str = "4vkNeXiYEUizLdrpdPS1eC2mccyM4NUPRtERrk6ZETkk";

// =============================================================================
// SPL / system programs
// =============================================================================

/// SPL Token program ID.
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// SPL Associated Token Account program ID.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJe8bv";

/// System program ID.
pub const SYSTEM_PROGRAM_ID: &str = "11111111111111111111111111111111";
