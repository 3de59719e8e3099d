//! The global program state singleton.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::error::DecodeError;

use super::common::Permissions;
use super::AccountRecord;

/// Global program state: admin, protocol-wide permissions, and the pool
/// registry. Lives at the PDA of `["perpetuals"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Perpetuals {
    /// Protocol-wide feature switches.
    pub permissions: Permissions,
    /// All registered pools.
    pub pools: Vec<Pubkey>,
    /// Admin authority.
    pub admin: Pubkey,
    /// Bump of the transfer-authority PDA.
    pub transfer_authority_bump: u8,
    /// Bump of this account's PDA.
    pub perpetuals_bump: u8,
    /// Unix timestamp of program initialization.
    pub inception_time: i64,
}

impl AccountRecord for Perpetuals {
    const NAME: &'static str = "Perpetuals";

    fn read_fields(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            permissions: Permissions::read(dec)?,
            pools: dec.read_vec("pools", |d| d.read_pubkey("pools"))?,
            admin: dec.read_pubkey("admin")?,
            transfer_authority_bump: dec.read_u8("transfer_authority_bump")?,
            perpetuals_bump: dec.read_u8("perpetuals_bump")?,
            inception_time: dec.read_i64("inception_time")?,
        })
    }

    fn write_fields(&self, enc: &mut Encoder) {
        self.permissions.write(enc);
        enc.write_vec(&self.pools, |e, v| e.write_pubkey(v));
        enc.write_pubkey(&self.admin);
        enc.write_u8(self.transfer_authority_bump);
        enc.write_u8(self.perpetuals_bump);
        enc.write_i64(self.inception_time);
    }
}
