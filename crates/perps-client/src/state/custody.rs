//! Custody account: one instrument held by a pool.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::error::DecodeError;

use super::common::{
    Assets, BorrowLendParams, FundingRateState, JumpRateState, OracleParams, Permissions,
    PriceImpactBuffer, PricingParams,
};
use super::AccountRecord;

/// Per-instrument state: token balances, oracle wiring, pricing knobs,
/// funding accrual and the borrow/lend market. The widest record in the
/// program; field order below is the wire contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Custody {
    /// Owning pool.
    pub pool: Pubkey,
    /// The instrument's token mint.
    pub mint: Pubkey,
    /// Pool-owned token account for this instrument.
    pub token_account: Pubkey,
    /// Decimal places of the mint.
    pub decimals: u8,
    /// Whether the instrument is a stablecoin.
    pub is_stable: bool,
    /// Oracle configuration.
    pub oracle: OracleParams,
    /// Trade pricing knobs.
    pub pricing: PricingParams,
    /// Per-custody feature switches.
    pub permissions: Permissions,
    /// Target share of pool AUM, basis points.
    pub target_ratio_bps: u64,
    /// Balance and exposure accounting.
    pub assets: Assets,
    /// Funding accrual for perpetual positions.
    pub funding_rate_state: FundingRateState,
    /// Bump of this account's PDA.
    pub bump: u8,
    /// Bump of the token-account PDA.
    pub token_account_bump: u8,
    /// Fee for growing positions, basis points.
    pub increase_position_bps: u64,
    /// Fee for shrinking positions, basis points.
    pub decrease_position_bps: u64,
    /// Cap on a single position, USD.
    pub max_position_size_usd: u64,
    /// Doves oracle account.
    pub doves_oracle: Pubkey,
    /// Interest curve for the borrow market.
    pub jump_rate_state: JumpRateState,
    /// Doves aggregate oracle account.
    pub doves_ag_oracle: Pubkey,
    /// Rolling open-interest window for impact fees.
    pub price_impact_buffer: PriceImpactBuffer,
    /// Borrow/lend market parameters.
    pub borrow_lend_parameters: BorrowLendParams,
    /// Funding accrual for the borrow market.
    pub borrows_funding_rate_state: FundingRateState,
    /// Outstanding borrowed amount, token fixed point.
    pub debt: u128,
    /// Interest accrued to lenders.
    pub borrow_lend_interests_accured: u128,
    /// Hard cap on borrowed tokens.
    pub borrow_limit_in_token_amount: u64,
    /// Interest fee floor, basis points.
    pub min_interest_fee_bps: u64,
    /// Grace period before the fee floor applies, seconds.
    pub min_interest_fee_grace_period_seconds: u64,
}

impl AccountRecord for Custody {
    const NAME: &'static str = "Custody";

    fn read_fields(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            pool: dec.read_pubkey("pool")?,
            mint: dec.read_pubkey("mint")?,
            token_account: dec.read_pubkey("token_account")?,
            decimals: dec.read_u8("decimals")?,
            is_stable: dec.read_bool("is_stable")?,
            oracle: OracleParams::read(dec)?,
            pricing: PricingParams::read(dec)?,
            permissions: Permissions::read(dec)?,
            target_ratio_bps: dec.read_u64("target_ratio_bps")?,
            assets: Assets::read(dec)?,
            funding_rate_state: FundingRateState::read(dec)?,
            bump: dec.read_u8("bump")?,
            token_account_bump: dec.read_u8("token_account_bump")?,
            increase_position_bps: dec.read_u64("increase_position_bps")?,
            decrease_position_bps: dec.read_u64("decrease_position_bps")?,
            max_position_size_usd: dec.read_u64("max_position_size_usd")?,
            doves_oracle: dec.read_pubkey("doves_oracle")?,
            jump_rate_state: JumpRateState::read(dec)?,
            doves_ag_oracle: dec.read_pubkey("doves_ag_oracle")?,
            price_impact_buffer: PriceImpactBuffer::read(dec)?,
            borrow_lend_parameters: BorrowLendParams::read(dec)?,
            borrows_funding_rate_state: FundingRateState::read(dec)?,
            debt: dec.read_u128("debt")?,
            borrow_lend_interests_accured: dec.read_u128("borrow_lend_interests_accured")?,
            borrow_limit_in_token_amount: dec.read_u64("borrow_limit_in_token_amount")?,
            min_interest_fee_bps: dec.read_u64("min_interest_fee_bps")?,
            min_interest_fee_grace_period_seconds: dec
                .read_u64("min_interest_fee_grace_period_seconds")?,
        })
    }

    fn write_fields(&self, enc: &mut Encoder) {
        enc.write_pubkey(&self.pool);
        enc.write_pubkey(&self.mint);
        enc.write_pubkey(&self.token_account);
        enc.write_u8(self.decimals);
        enc.write_bool(self.is_stable);
        self.oracle.write(enc);
        self.pricing.write(enc);
        self.permissions.write(enc);
        enc.write_u64(self.target_ratio_bps);
        self.assets.write(enc);
        self.funding_rate_state.write(enc);
        enc.write_u8(self.bump);
        enc.write_u8(self.token_account_bump);
        enc.write_u64(self.increase_position_bps);
        enc.write_u64(self.decrease_position_bps);
        enc.write_u64(self.max_position_size_usd);
        enc.write_pubkey(&self.doves_oracle);
        self.jump_rate_state.write(enc);
        enc.write_pubkey(&self.doves_ag_oracle);
        self.price_impact_buffer.write(enc);
        self.borrow_lend_parameters.write(enc);
        self.borrows_funding_rate_state.write(enc);
        enc.write_u128(self.debt);
        enc.write_u128(self.borrow_lend_interests_accured);
        enc.write_u64(self.borrow_limit_in_token_amount);
        enc.write_u64(self.min_interest_fee_bps);
        enc.write_u64(self.min_interest_fee_grace_period_seconds);
    }
}

impl Default for Custody {
    fn default() -> Self {
        Self {
            pool: Pubkey::default(),
            mint: Pubkey::default(),
            token_account: Pubkey::default(),
            decimals: 0,
            is_stable: false,
            oracle: OracleParams::default(),
            pricing: PricingParams::default(),
            permissions: Permissions::default(),
            target_ratio_bps: 0,
            assets: Assets::default(),
            funding_rate_state: FundingRateState::default(),
            bump: 0,
            token_account_bump: 0,
            increase_position_bps: 0,
            decrease_position_bps: 0,
            max_position_size_usd: 0,
            doves_oracle: Pubkey::default(),
            jump_rate_state: JumpRateState::default(),
            doves_ag_oracle: Pubkey::default(),
            price_impact_buffer: PriceImpactBuffer::default(),
            borrow_lend_parameters: BorrowLendParams::default(),
            borrows_funding_rate_state: FundingRateState::default(),
            debt: 0,
            borrow_lend_interests_accured: 0,
            borrow_limit_in_token_amount: 0,
            min_interest_fee_bps: 0,
            min_interest_fee_grace_period_seconds: 0,
        }
    }
}
