//! Borrow position account.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::error::DecodeError;

use super::AccountRecord;

/// A borrow against a custody's lending market, collateralized by JLP.
/// Lives at the PDA of `["borrow_position", pool, custody, owner]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BorrowPosition {
    /// Borrower.
    pub owner: Pubkey,
    /// Pool the custody belongs to.
    pub pool: Pubkey,
    /// Custody the tokens are borrowed from.
    pub custody: Pubkey,
    /// Unix timestamp the borrow opened.
    pub open_time: i64,
    /// Unix timestamp of the last change.
    pub update_time: i64,
    /// Outstanding borrow, BORROW_SIZE_PRECISION fixed point.
    pub borrow_size: u128,
    /// Compounded-interest snapshot at the last change.
    pub cumulative_compounded_interest_snapshot: u128,
    /// JLP tokens locked as collateral.
    pub locked_collateral: u64,
    /// Bump of this account's PDA.
    pub bump: u8,
    /// Unix timestamp of the last borrow.
    pub last_borrowed: i64,
}

impl AccountRecord for BorrowPosition {
    const NAME: &'static str = "BorrowPosition";

    fn read_fields(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            owner: dec.read_pubkey("owner")?,
            pool: dec.read_pubkey("pool")?,
            custody: dec.read_pubkey("custody")?,
            open_time: dec.read_i64("open_time")?,
            update_time: dec.read_i64("update_time")?,
            borrow_size: dec.read_u128("borrow_size")?,
            cumulative_compounded_interest_snapshot: dec
                .read_u128("cumulative_compounded_interest_snapshot")?,
            locked_collateral: dec.read_u64("locked_collateral")?,
            bump: dec.read_u8("bump")?,
            last_borrowed: dec.read_i64("last_borrowed")?,
        })
    }

    fn write_fields(&self, enc: &mut Encoder) {
        enc.write_pubkey(&self.owner);
        enc.write_pubkey(&self.pool);
        enc.write_pubkey(&self.custody);
        enc.write_i64(self.open_time);
        enc.write_i64(self.update_time);
        enc.write_u128(self.borrow_size);
        enc.write_u128(self.cumulative_compounded_interest_snapshot);
        enc.write_u64(self.locked_collateral);
        enc.write_u8(self.bump);
        enc.write_i64(self.last_borrowed);
    }
}
