//! Error types for the client.
//!
//! Two layers: [`DecodeError`] pinpoints a wire-format failure (field name,
//! byte offset, kind), and [`PerpsError`] is the crate-wide error every public
//! operation returns. Configuration errors (`UnknownSchema`,
//! `AddressMismatch`) indicate a broken build and are never retried.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum PerpsError {
    /// A schema name was requested that is not in the static registry.
    #[error("unknown schema name: {0}")]
    UnknownSchema(String),

    /// A compile-time address constant no longer matches its derivation.
    #[error("well-known address mismatch for {name}: derived {derived}, expected {expected}")]
    AddressMismatch {
        /// Human-readable name of the constant.
        name: &'static str,
        /// Address produced by seed derivation.
        derived: Pubkey,
        /// Address the constant claims.
        expected: Pubkey,
    },

    /// Account bytes did not match the expected wire format.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The account does not exist at the queried commitment level.
    #[error("account not found: {0}")]
    AccountNotFound(Pubkey),

    /// No bump in 255..=0 produced an off-curve address for the seeds.
    #[error("program address derivation exhausted all bump seeds")]
    DerivationExhausted,

    /// The underlying RPC or websocket transport failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The subscription stream ended without a caller-initiated cancel.
    #[error("subscription channel closed by remote")]
    ChannelClosed,
}

/// A structured decoding failure.
///
/// `field` is the name of the field being read when the failure occurred and
/// `offset` is the buffer position at the start of that read, so a bad
/// on-chain payload can be diagnosed without a hex dump.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("decode failed at field `{field}` (offset {offset}): {kind}")]
pub struct DecodeError {
    /// Field being read when the failure occurred.
    pub field: &'static str,
    /// Byte offset at the start of the failed read.
    pub offset: usize,
    /// What went wrong.
    pub kind: DecodeErrorKind,
}

/// The specific way a read failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// The buffer ended before the field was complete.
    #[error("buffer exhausted, needed {needed} more bytes")]
    BufferExhausted {
        /// Additional bytes the read required.
        needed: usize,
    },

    /// The leading 8 bytes did not match the record's discriminator.
    #[error("discriminator mismatch for record `{record}`")]
    DiscriminatorMismatch {
        /// Record schema the caller expected.
        record: &'static str,
    },

    /// A 1-byte enum tag was outside the declared variants.
    #[error("invalid enum variant tag {value}")]
    InvalidVariant {
        /// The offending byte.
        value: u8,
    },

    /// A boolean byte was neither 0 nor 1.
    #[error("invalid boolean byte {value}")]
    InvalidBool {
        /// The offending byte.
        value: u8,
    },

    /// An option flag byte was neither 0 nor 1.
    #[error("invalid option flag {value}")]
    InvalidOptionFlag {
        /// The offending byte.
        value: u8,
    },

    /// String bytes were not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}
