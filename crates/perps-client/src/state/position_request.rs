//! Position request account: a pending keeper order.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::error::DecodeError;

use super::enums::{RequestChange, RequestType, Side};
use super::AccountRecord;

/// A pending request for a keeper to change a position. Requests are
/// append-only; `counter` disambiguates successive requests against the same
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionRequest {
    /// Request owner.
    pub owner: Pubkey,
    /// Pool the target position trades against.
    pub pool: Pubkey,
    /// Custody of the traded instrument.
    pub custody: Pubkey,
    /// The target position account.
    pub position: Pubkey,
    /// Mint of the funding or receiving token.
    pub mint: Pubkey,
    /// Unix timestamp the request was created.
    pub open_time: i64,
    /// Unix timestamp of the last change.
    pub update_time: i64,
    /// Requested size change, USD fixed point.
    pub size_usd_delta: u64,
    /// Requested collateral change, token amount.
    pub collateral_delta: u64,
    /// Increase or decrease.
    pub request_change: RequestChange,
    /// Market or trigger execution.
    pub request_type: RequestType,
    /// Side of the target position.
    pub side: Side,
    /// Worst acceptable execution price.
    pub price_slippage: Option<u64>,
    /// Minimum output of the pre-execution swap.
    pub jupiter_minimum_out: Option<u64>,
    /// Token amount before the pre-execution swap.
    pub pre_swap_amount: Option<u64>,
    /// Trigger price for trigger requests.
    pub trigger_price: Option<u64>,
    /// Whether the trigger fires above (vs below) the price.
    pub trigger_above_threshold: Option<bool>,
    /// Whether a decrease closes the whole position.
    pub entire_position: Option<bool>,
    /// Whether a keeper already executed this request.
    pub executed: bool,
    /// Disambiguates successive requests on one position.
    pub counter: u64,
    /// Bump of this account's PDA.
    pub bump: u8,
    /// Optional referral account.
    pub referral: Option<Pubkey>,
}

impl AccountRecord for PositionRequest {
    const NAME: &'static str = "PositionRequest";

    fn read_fields(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            owner: dec.read_pubkey("owner")?,
            pool: dec.read_pubkey("pool")?,
            custody: dec.read_pubkey("custody")?,
            position: dec.read_pubkey("position")?,
            mint: dec.read_pubkey("mint")?,
            open_time: dec.read_i64("open_time")?,
            update_time: dec.read_i64("update_time")?,
            size_usd_delta: dec.read_u64("size_usd_delta")?,
            collateral_delta: dec.read_u64("collateral_delta")?,
            request_change: RequestChange::read(dec, "request_change")?,
            request_type: RequestType::read(dec, "request_type")?,
            side: Side::read(dec, "side")?,
            price_slippage: dec.read_option("price_slippage", |d| d.read_u64("price_slippage"))?,
            jupiter_minimum_out: dec
                .read_option("jupiter_minimum_out", |d| d.read_u64("jupiter_minimum_out"))?,
            pre_swap_amount: dec
                .read_option("pre_swap_amount", |d| d.read_u64("pre_swap_amount"))?,
            trigger_price: dec.read_option("trigger_price", |d| d.read_u64("trigger_price"))?,
            trigger_above_threshold: dec.read_option("trigger_above_threshold", |d| {
                d.read_bool("trigger_above_threshold")
            })?,
            entire_position: dec
                .read_option("entire_position", |d| d.read_bool("entire_position"))?,
            executed: dec.read_bool("executed")?,
            counter: dec.read_u64("counter")?,
            bump: dec.read_u8("bump")?,
            referral: dec.read_option("referral", |d| d.read_pubkey("referral"))?,
        })
    }

    fn write_fields(&self, enc: &mut Encoder) {
        enc.write_pubkey(&self.owner);
        enc.write_pubkey(&self.pool);
        enc.write_pubkey(&self.custody);
        enc.write_pubkey(&self.position);
        enc.write_pubkey(&self.mint);
        enc.write_i64(self.open_time);
        enc.write_i64(self.update_time);
        enc.write_u64(self.size_usd_delta);
        enc.write_u64(self.collateral_delta);
        self.request_change.write(enc);
        self.request_type.write(enc);
        self.side.write(enc);
        enc.write_option(&self.price_slippage, |e, v| e.write_u64(*v));
        enc.write_option(&self.jupiter_minimum_out, |e, v| e.write_u64(*v));
        enc.write_option(&self.pre_swap_amount, |e, v| e.write_u64(*v));
        enc.write_option(&self.trigger_price, |e, v| e.write_u64(*v));
        enc.write_option(&self.trigger_above_threshold, |e, v| e.write_bool(*v));
        enc.write_option(&self.entire_position, |e, v| e.write_bool(*v));
        enc.write_bool(self.executed);
        enc.write_u64(self.counter);
        enc.write_u8(self.bump);
        enc.write_option(&self.referral, |e, v| e.write_pubkey(v));
    }
}
