//! Perpetual position account.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::error::DecodeError;

use super::enums::Side;
use super::AccountRecord;

/// An open (or empty) perpetual position. One account exists per
/// (owner, pool, custody, side-agnostic) tuple at the PDA of
/// `["position", pool, custody, owner]`; a closed position stays allocated
/// with `size_usd == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    /// Position owner.
    pub owner: Pubkey,
    /// Pool the position trades against.
    pub pool: Pubkey,
    /// Custody of the traded instrument.
    pub custody: Pubkey,
    /// Custody holding the collateral.
    pub collateral_custody: Pubkey,
    /// Unix timestamp the position opened.
    pub open_time: i64,
    /// Unix timestamp of the last change.
    pub update_time: i64,
    /// Long or short.
    pub side: Side,
    /// Average entry price, USD fixed point.
    pub price: u64,
    /// Position size, USD fixed point.
    pub size_usd: u64,
    /// Collateral value, USD fixed point.
    pub collateral_usd: u64,
    /// Realized profit and loss, USD fixed point.
    pub realised_pnl_usd: i64,
    /// Funding snapshot at the last change, RATE_POWER fixed point.
    pub cumulative_interest_snapshot: u128,
    /// Tokens locked in the custody backing this position.
    pub locked_amount: u64,
    /// Bump of this account's PDA.
    pub bump: u8,
}

impl AccountRecord for Position {
    const NAME: &'static str = "Position";

    fn read_fields(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            owner: dec.read_pubkey("owner")?,
            pool: dec.read_pubkey("pool")?,
            custody: dec.read_pubkey("custody")?,
            collateral_custody: dec.read_pubkey("collateral_custody")?,
            open_time: dec.read_i64("open_time")?,
            update_time: dec.read_i64("update_time")?,
            side: Side::read(dec, "side")?,
            price: dec.read_u64("price")?,
            size_usd: dec.read_u64("size_usd")?,
            collateral_usd: dec.read_u64("collateral_usd")?,
            realised_pnl_usd: dec.read_i64("realised_pnl_usd")?,
            cumulative_interest_snapshot: dec.read_u128("cumulative_interest_snapshot")?,
            locked_amount: dec.read_u64("locked_amount")?,
            bump: dec.read_u8("bump")?,
        })
    }

    fn write_fields(&self, enc: &mut Encoder) {
        enc.write_pubkey(&self.owner);
        enc.write_pubkey(&self.pool);
        enc.write_pubkey(&self.custody);
        enc.write_pubkey(&self.collateral_custody);
        enc.write_i64(self.open_time);
        enc.write_i64(self.update_time);
        self.side.write(enc);
        enc.write_u64(self.price);
        enc.write_u64(self.size_usd);
        enc.write_u64(self.collateral_usd);
        enc.write_i64(self.realised_pnl_usd);
        enc.write_u128(self.cumulative_interest_snapshot);
        enc.write_u64(self.locked_amount);
        enc.write_u8(self.bump);
    }
}
