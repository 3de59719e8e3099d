//! Typed account schemas.
//!
//! One file per on-chain record. Each record implements [`AccountRecord`]:
//! the ordered `read_fields`/`write_fields` pair is the schema definition,
//! and the trait's provided methods bolt on discriminator handling so every
//! decode path enforces the 8-byte tag before touching field data.
//!
//! Field order in each impl is the wire contract and must not be rearranged.

mod borrow_position;
mod common;
mod custody;
mod enums;
mod perpetuals;
mod pool;
mod position;
mod position_request;
mod token_ledger;

pub use borrow_position::BorrowPosition;
pub use common::{
    Assets, BorrowLendParams, Fees, FundingRateState, JumpRateState, Limit, OracleParams,
    OraclePrice, Permissions, PoolApr, PriceImpactBuffer, PricingParams, Secp256k1Pubkey,
};
pub use custody::Custody;
pub use enums::{OracleType, PriceCalcMode, RequestChange, RequestType, Side, TradePoolType};
pub use perpetuals::Perpetuals;
pub use pool::Pool;
pub use position::Position;
pub use position_request::PositionRequest;
pub use token_ledger::TokenLedger;

use crate::codec::{Decoder, Encoder};
use crate::discriminator::account_discriminator;
use crate::error::DecodeError;

/// A typed on-chain account schema.
///
/// Implementors list their fields, in wire order, in `read_fields` and
/// `write_fields`; everything else is provided.
pub trait AccountRecord: Clone + Send + Sync + Sized + 'static {
    /// Schema name as registered with the program (discriminator input).
    const NAME: &'static str;

    /// The record's 8-byte discriminator.
    fn discriminator() -> [u8; 8] {
        account_discriminator(Self::NAME)
    }

    /// Read the fields following the discriminator.
    ///
    /// # Errors
    /// Propagates the first field-level [`DecodeError`].
    fn read_fields(dec: &mut Decoder<'_>) -> Result<Self, DecodeError>;

    /// Write the fields following the discriminator.
    fn write_fields(&self, enc: &mut Encoder);

    /// Decode a full account payload, discriminator first.
    ///
    /// Trailing bytes after the record are ignored.
    ///
    /// # Errors
    /// Fails with `DiscriminatorMismatch` when `data` is not this record, or
    /// a field-level [`DecodeError`].
    fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut dec = Decoder::new(data);
        dec.expect_discriminator(Self::discriminator(), Self::NAME)?;
        Self::read_fields(&mut dec)
    }

    /// Encode the record as a full account payload, discriminator first.
    fn encode(&self) -> Vec<u8> {
        let mut enc = Encoder::with_discriminator(Self::discriminator());
        self.write_fields(&mut enc);
        enc.into_bytes()
    }
}
