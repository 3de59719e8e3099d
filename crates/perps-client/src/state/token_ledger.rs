//! Token ledger account.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::error::DecodeError;

use super::AccountRecord;

/// Snapshot of a token-account balance taken before a routed swap, so the
/// program can measure the swap's actual output. Lives at the PDA of
/// `["token_ledger", owner, mint]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenLedger {
    /// The token account being snapshotted.
    pub token_account: Pubkey,
    /// Balance at snapshot time.
    pub amount: u64,
}

impl AccountRecord for TokenLedger {
    const NAME: &'static str = "TokenLedger";

    fn read_fields(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            token_account: dec.read_pubkey("token_account")?,
            amount: dec.read_u64("amount")?,
        })
    }

    fn write_fields(&self, enc: &mut Encoder) {
        enc.write_pubkey(&self.token_account);
        enc.write_u64(self.amount);
    }
}
