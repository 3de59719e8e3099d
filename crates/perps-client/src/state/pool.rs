//! Liquidity pool account.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::error::DecodeError;

use super::common::{Fees, Limit, PoolApr, Secp256k1Pubkey};
use super::AccountRecord;

/// A liquidity pool: its custody registry, aggregate valuation, fee schedule
/// and limits. The JLP pool is the only production instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pool {
    /// Pool name, also a PDA seed component.
    pub name: String,
    /// Custody accounts backing the pool, in listing order.
    pub custodies: Vec<Pubkey>,
    /// Assets under management, USD fixed point.
    pub aum_usd: u128,
    /// Size limits.
    pub limit: Limit,
    /// Fee schedule.
    pub fees: Fees,
    /// Trailing fee APR.
    pub pool_apr: PoolApr,
    /// Keeper deadline for executing requests, seconds.
    pub max_request_execution_sec: i64,
    /// Bump of this account's PDA.
    pub bump: u8,
    /// Bump of the LP mint PDA.
    pub lp_token_bump: u8,
    /// Unix timestamp of pool creation.
    pub inception_time: i64,
    /// Signer allowed to post parameter updates.
    pub parameter_update_oracle: Secp256k1Pubkey,
    /// Unix timestamp of the last `aum_usd` refresh.
    pub aum_usd_updated_at: i64,
}

impl AccountRecord for Pool {
    const NAME: &'static str = "Pool";

    fn read_fields(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: dec.read_string("name")?,
            custodies: dec.read_vec("custodies", |d| d.read_pubkey("custodies"))?,
            aum_usd: dec.read_u128("aum_usd")?,
            limit: Limit::read(dec)?,
            fees: Fees::read(dec)?,
            pool_apr: PoolApr::read(dec)?,
            max_request_execution_sec: dec.read_i64("max_request_execution_sec")?,
            bump: dec.read_u8("bump")?,
            lp_token_bump: dec.read_u8("lp_token_bump")?,
            inception_time: dec.read_i64("inception_time")?,
            parameter_update_oracle: Secp256k1Pubkey::read(dec)?,
            aum_usd_updated_at: dec.read_i64("aum_usd_updated_at")?,
        })
    }

    fn write_fields(&self, enc: &mut Encoder) {
        enc.write_string(&self.name);
        enc.write_vec(&self.custodies, |e, v| e.write_pubkey(v));
        enc.write_u128(self.aum_usd);
        self.limit.write(enc);
        self.fees.write(enc);
        self.pool_apr.write(enc);
        enc.write_i64(self.max_request_execution_sec);
        enc.write_u8(self.bump);
        enc.write_u8(self.lp_token_bump);
        enc.write_i64(self.inception_time);
        self.parameter_update_oracle.write(enc);
        enc.write_i64(self.aum_usd_updated_at);
    }
}
