//! Sub-structures embedded in the account records.
//!
//! These never appear standalone on chain, so they carry no discriminator;
//! they read and write their fields in wire order like any other schema.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::error::DecodeError;

use super::enums::OracleType;

/// Feature switches for a pool or custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    /// Swaps enabled.
    pub allow_swap: bool,
    /// Adding liquidity enabled.
    pub allow_add_liquidity: bool,
    /// Removing liquidity enabled.
    pub allow_remove_liquidity: bool,
    /// Opening/growing positions enabled.
    pub allow_increase_position: bool,
    /// Shrinking/closing positions enabled.
    pub allow_decrease_position: bool,
    /// Withdrawing free collateral enabled.
    pub allow_collateral_withdrawal: bool,
    /// Liquidations enabled.
    pub allow_liquidate_position: bool,
}

impl Permissions {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            allow_swap: dec.read_bool("allow_swap")?,
            allow_add_liquidity: dec.read_bool("allow_add_liquidity")?,
            allow_remove_liquidity: dec.read_bool("allow_remove_liquidity")?,
            allow_increase_position: dec.read_bool("allow_increase_position")?,
            allow_decrease_position: dec.read_bool("allow_decrease_position")?,
            allow_collateral_withdrawal: dec.read_bool("allow_collateral_withdrawal")?,
            allow_liquidate_position: dec.read_bool("allow_liquidate_position")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_bool(self.allow_swap);
        enc.write_bool(self.allow_add_liquidity);
        enc.write_bool(self.allow_remove_liquidity);
        enc.write_bool(self.allow_increase_position);
        enc.write_bool(self.allow_decrease_position);
        enc.write_bool(self.allow_collateral_withdrawal);
        enc.write_bool(self.allow_liquidate_position);
    }
}

/// Oracle configuration for a custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OracleParams {
    /// The oracle account to read prices from.
    pub oracle_account: Pubkey,
    /// Which oracle implementation the account holds.
    pub oracle_type: OracleType,
    /// Reserved.
    pub buffer: u64,
    /// Maximum accepted price age in seconds.
    pub max_price_age_sec: u32,
}

impl OracleParams {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            oracle_account: dec.read_pubkey("oracle_account")?,
            oracle_type: OracleType::read(dec, "oracle_type")?,
            buffer: dec.read_u64("buffer")?,
            max_price_age_sec: dec.read_u32("max_price_age_sec")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_pubkey(&self.oracle_account);
        self.oracle_type.write(enc);
        enc.write_u64(self.buffer);
        enc.write_u32(self.max_price_age_sec);
    }
}

/// A fixed-point price as mantissa and decimal exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OraclePrice {
    /// Price mantissa.
    pub price: u64,
    /// Decimal exponent, typically negative.
    pub exponent: i32,
}

impl OraclePrice {
    /// Read a price pair from the cursor.
    ///
    /// View instructions return this shape in their return data.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            price: dec.read_u64("price")?,
            exponent: dec.read_i32("exponent")?,
        })
    }

    /// Write the price pair to the cursor.
    pub fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.price);
        enc.write_i32(self.exponent);
    }
}

/// Trade pricing knobs for a custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PricingParams {
    /// Scalar dividing trade size into price-impact fee.
    pub trade_impact_fee_scalar: u64,
    /// Reserved.
    pub buffer: u64,
    /// Spread applied to swaps, in basis points.
    pub swap_spread: u64,
    /// Maximum position leverage, in basis points.
    pub max_leverage: u64,
    /// Cap on aggregate long exposure, USD.
    pub max_global_long_sizes: u64,
    /// Cap on aggregate short exposure, USD.
    pub max_global_short_sizes: u64,
}

impl PricingParams {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            trade_impact_fee_scalar: dec.read_u64("trade_impact_fee_scalar")?,
            buffer: dec.read_u64("buffer")?,
            swap_spread: dec.read_u64("swap_spread")?,
            max_leverage: dec.read_u64("max_leverage")?,
            max_global_long_sizes: dec.read_u64("max_global_long_sizes")?,
            max_global_short_sizes: dec.read_u64("max_global_short_sizes")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.trade_impact_fee_scalar);
        enc.write_u64(self.buffer);
        enc.write_u64(self.swap_spread);
        enc.write_u64(self.max_leverage);
        enc.write_u64(self.max_global_long_sizes);
        enc.write_u64(self.max_global_short_sizes);
    }
}

/// Token balances and exposure accounting for a custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Assets {
    /// Collected fees awaiting distribution, token amount.
    pub fees_reserves: u64,
    /// Tokens owned by the pool.
    pub owned: u64,
    /// Tokens locked as position collateral backing.
    pub locked: u64,
    /// USD guaranteed to long positions.
    pub guaranteed_usd: u64,
    /// Aggregate short position size, USD.
    pub global_short_sizes: u64,
    /// Average entry price of shorts.
    pub global_short_average_prices: u64,
}

impl Assets {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            fees_reserves: dec.read_u64("fees_reserves")?,
            owned: dec.read_u64("owned")?,
            locked: dec.read_u64("locked")?,
            guaranteed_usd: dec.read_u64("guaranteed_usd")?,
            global_short_sizes: dec.read_u64("global_short_sizes")?,
            global_short_average_prices: dec.read_u64("global_short_average_prices")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.fees_reserves);
        enc.write_u64(self.owned);
        enc.write_u64(self.locked);
        enc.write_u64(self.guaranteed_usd);
        enc.write_u64(self.global_short_sizes);
        enc.write_u64(self.global_short_average_prices);
    }
}

/// Funding accrual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FundingRateState {
    /// Cumulative interest rate since inception, RATE_POWER fixed point.
    pub cumulative_interest_rate: u128,
    /// Unix timestamp of the last accrual.
    pub last_update: i64,
    /// Current hourly funding in deci-basis-points.
    pub hourly_funding_dbps: u64,
}

impl FundingRateState {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            cumulative_interest_rate: dec.read_u128("cumulative_interest_rate")?,
            last_update: dec.read_i64("last_update")?,
            hourly_funding_dbps: dec.read_u64("hourly_funding_dbps")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_u128(self.cumulative_interest_rate);
        enc.write_i64(self.last_update);
        enc.write_u64(self.hourly_funding_dbps);
    }
}

/// Utilization-driven interest curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpRateState {
    /// Rate at zero utilization, basis points.
    pub min_rate_bps: u64,
    /// Rate at full utilization, basis points.
    pub max_rate_bps: u64,
    /// Rate at target utilization, basis points.
    pub target_rate_bps: u64,
    /// Utilization where the curve kinks.
    pub target_utilization_rate: u64,
}

impl JumpRateState {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            min_rate_bps: dec.read_u64("min_rate_bps")?,
            max_rate_bps: dec.read_u64("max_rate_bps")?,
            target_rate_bps: dec.read_u64("target_rate_bps")?,
            target_utilization_rate: dec.read_u64("target_utilization_rate")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.min_rate_bps);
        enc.write_u64(self.max_rate_bps);
        enc.write_u64(self.target_rate_bps);
        enc.write_u64(self.target_utilization_rate);
    }
}

/// Rolling open-interest window feeding the price-impact fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceImpactBuffer {
    /// Signed open-interest deltas, one slot per interval.
    pub open_interest: [i64; 60],
    /// Unix timestamp of the last slot rotation.
    pub last_updated: i64,
    /// Fee scaling factor.
    pub fee_factor: u64,
    /// Curve exponent.
    pub exponent: f32,
    /// Imbalance below which no impact fee applies.
    pub delta_imbalance_threshold_decimal: u64,
    /// Fee ceiling, basis points.
    pub max_fee_bps: u64,
}

impl Default for PriceImpactBuffer {
    fn default() -> Self {
        Self {
            open_interest: [0; 60],
            last_updated: 0,
            fee_factor: 0,
            exponent: 0.0,
            delta_imbalance_threshold_decimal: 0,
            max_fee_bps: 0,
        }
    }
}

impl PriceImpactBuffer {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            open_interest: dec.read_array("open_interest", |d| d.read_i64("open_interest"))?,
            last_updated: dec.read_i64("last_updated")?,
            fee_factor: dec.read_u64("fee_factor")?,
            exponent: dec.read_f32("exponent")?,
            delta_imbalance_threshold_decimal: dec.read_u64("delta_imbalance_threshold_decimal")?,
            max_fee_bps: dec.read_u64("max_fee_bps")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_array(&self.open_interest, |e, v| e.write_i64(*v));
        enc.write_i64(self.last_updated);
        enc.write_u64(self.fee_factor);
        enc.write_f32(self.exponent);
        enc.write_u64(self.delta_imbalance_threshold_decimal);
        enc.write_u64(self.max_fee_bps);
    }
}

/// Borrow/lend market parameters for a custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorrowLendParams {
    /// Share of owned assets available to borrows, basis points.
    pub borrows_limit_in_bps: u64,
    /// Margin below which a borrow may be liquidated, basis points.
    pub maintainance_margin_bps: u64,
    /// Protocol cut of interest, basis points.
    pub protocol_fee_bps: u64,
    /// Margin at which liquidation closes the borrow.
    pub liquidation_margin: u64,
    /// Liquidator reward, basis points.
    pub liquidation_fee_bps: u64,
}

impl BorrowLendParams {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            borrows_limit_in_bps: dec.read_u64("borrows_limit_in_bps")?,
            maintainance_margin_bps: dec.read_u64("maintainance_margin_bps")?,
            protocol_fee_bps: dec.read_u64("protocol_fee_bps")?,
            liquidation_margin: dec.read_u64("liquidation_margin")?,
            liquidation_fee_bps: dec.read_u64("liquidation_fee_bps")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.borrows_limit_in_bps);
        enc.write_u64(self.maintainance_margin_bps);
        enc.write_u64(self.protocol_fee_bps);
        enc.write_u64(self.liquidation_margin);
        enc.write_u64(self.liquidation_fee_bps);
    }
}

/// Pool-level fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fees {
    /// Multiplier applied to volatile swap fees.
    pub swap_multiplier: u64,
    /// Multiplier applied to stable swap fees.
    pub stable_swap_multiplier: u64,
    /// Add/remove liquidity fee, basis points.
    pub add_remove_liquidity_bps: u64,
    /// Volatile swap fee, basis points.
    pub swap_bps: u64,
    /// Balance-restoring tax, basis points.
    pub tax_bps: u64,
    /// Stable swap fee, basis points.
    pub stable_swap_bps: u64,
    /// Stable swap tax, basis points.
    pub stable_swap_tax_bps: u64,
    /// Liquidator reward, basis points.
    pub liquidation_reward_bps: u64,
    /// Protocol share of fees, basis points.
    pub protocol_share_bps: u64,
}

impl Fees {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            swap_multiplier: dec.read_u64("swap_multiplier")?,
            stable_swap_multiplier: dec.read_u64("stable_swap_multiplier")?,
            add_remove_liquidity_bps: dec.read_u64("add_remove_liquidity_bps")?,
            swap_bps: dec.read_u64("swap_bps")?,
            tax_bps: dec.read_u64("tax_bps")?,
            stable_swap_bps: dec.read_u64("stable_swap_bps")?,
            stable_swap_tax_bps: dec.read_u64("stable_swap_tax_bps")?,
            liquidation_reward_bps: dec.read_u64("liquidation_reward_bps")?,
            protocol_share_bps: dec.read_u64("protocol_share_bps")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.swap_multiplier);
        enc.write_u64(self.stable_swap_multiplier);
        enc.write_u64(self.add_remove_liquidity_bps);
        enc.write_u64(self.swap_bps);
        enc.write_u64(self.tax_bps);
        enc.write_u64(self.stable_swap_bps);
        enc.write_u64(self.stable_swap_tax_bps);
        enc.write_u64(self.liquidation_reward_bps);
        enc.write_u64(self.protocol_share_bps);
    }
}

/// Trailing fee APR for the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolApr {
    /// Unix timestamp of the last APR refresh.
    pub last_updated: i64,
    /// Fee APR, basis points.
    pub fee_apr_bps: u64,
    /// Fees realized over the window, USD.
    pub realized_fee_usd: u64,
}

impl PoolApr {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            last_updated: dec.read_i64("last_updated")?,
            fee_apr_bps: dec.read_u64("fee_apr_bps")?,
            realized_fee_usd: dec.read_u64("realized_fee_usd")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_i64(self.last_updated);
        enc.write_u64(self.fee_apr_bps);
        enc.write_u64(self.realized_fee_usd);
    }
}

/// Pool size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limit {
    /// Cap on assets under management, USD.
    pub max_aum_usd: u128,
    /// Allowed deviation from target token weights, basis points.
    pub token_weightage_buffer_bps: u128,
    /// Reserved.
    pub buffer: u64,
}

impl Limit {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            max_aum_usd: dec.read_u128("max_aum_usd")?,
            token_weightage_buffer_bps: dec.read_u128("token_weightage_buffer_bps")?,
            buffer: dec.read_u64("buffer")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_u128(self.max_aum_usd);
        enc.write_u128(self.token_weightage_buffer_bps);
        enc.write_u64(self.buffer);
    }
}

/// Compressed secp256k1 public key (33 bytes on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Secp256k1Pubkey {
    /// Compression prefix byte (0x02 or 0x03).
    pub prefix: u8,
    /// The 32-byte x coordinate.
    pub key: [u8; 32],
}

impl Default for Secp256k1Pubkey {
    fn default() -> Self {
        Self { prefix: 0, key: [0; 32] }
    }
}

impl Secp256k1Pubkey {
    pub(crate) fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            prefix: dec.read_u8("prefix")?,
            key: dec.read_fixed("key")?,
        })
    }

    pub(crate) fn write(&self, enc: &mut Encoder) {
        enc.write_u8(self.prefix);
        enc.write_fixed(&self.key);
    }
}
