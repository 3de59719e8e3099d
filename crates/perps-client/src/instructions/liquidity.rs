//! Liquidity and swap builders, plus the simulation-only quote views.
//!
//! The view instructions (`get*2`, `getAssetsUnderManagement2`) mutate
//! nothing; callers simulate them and read the return data.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::constants::{
    EVENT_AUTHORITY, JLP_MINT_ADDRESS, JUPITER_PERPETUALS_PROGRAM_ID, PERPETUALS_ADDRESS,
    TOKEN_PROGRAM_ID, TRANSFER_AUTHORITY,
};
use crate::discriminator::instruction_discriminator;
use crate::error::{DecodeError, PerpsError};
use crate::pda::find_associated_token_address;

/// Arguments of `addLiquidity2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddLiquidityArgs {
    /// Tokens to deposit.
    pub token_amount_in: u64,
    /// Minimum LP tokens to accept.
    pub min_lp_amount_out: u64,
    /// Token amount before a routed pre-swap, when one happened.
    pub token_amount_pre_swap: Option<u64>,
}

impl AddLiquidityArgs {
    /// Read the argument block following the discriminator.
    ///
    /// # Errors
    /// Propagates the first field-level [`DecodeError`].
    pub fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            token_amount_in: dec.read_u64("token_amount_in")?,
            min_lp_amount_out: dec.read_u64("min_lp_amount_out")?,
            token_amount_pre_swap: dec
                .read_option("token_amount_pre_swap", |d| d.read_u64("token_amount_pre_swap"))?,
        })
    }

    /// Write the argument block following the discriminator.
    pub fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.token_amount_in);
        enc.write_u64(self.min_lp_amount_out);
        enc.write_option(&self.token_amount_pre_swap, |e, v| e.write_u64(*v));
    }
}

/// Parameters of [`add_liquidity`].
#[derive(Debug, Clone)]
pub struct AddLiquidityParams {
    /// Liquidity provider; signs.
    pub owner: Pubkey,
    /// Target pool.
    pub pool: Pubkey,
    /// Custody of the deposited instrument.
    pub custody: Pubkey,
    /// Mint of the deposited instrument.
    pub custody_mint: Pubkey,
    /// The custody's pool-owned token account.
    pub custody_token_account: Pubkey,
    /// The custody's Doves oracle.
    pub custody_doves_price_account: Pubkey,
    /// The custody's Pythnet oracle.
    pub custody_pythnet_price_account: Pubkey,
    /// Instruction arguments.
    pub args: AddLiquidityArgs,
}

/// Build `addLiquidity2`. Account order:
///
/// 0. owner (signer)
/// 1. funding account: owner's ATA for the custody mint (mut)
/// 2. LP token account: owner's ATA for the JLP mint (mut)
/// 3. transfer authority
/// 4. perpetuals
/// 5. pool (mut)
/// 6. custody (mut)
/// 7. custody Doves oracle
/// 8. custody Pythnet oracle
/// 9. custody token account (mut)
/// 10. JLP mint (mut)
/// 11. token program
/// 12. event authority
/// 13. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if an ATA derivation fails.
pub fn add_liquidity(params: &AddLiquidityParams) -> Result<Instruction, PerpsError> {
    let (funding_account, _) = find_associated_token_address(&params.owner, &params.custody_mint)?;
    let (lp_token_account, _) = find_associated_token_address(&params.owner, &JLP_MINT_ADDRESS)?;

    let mut enc = Encoder::with_discriminator(instruction_discriminator("addLiquidity2"));
    params.args.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(params.owner, true),
            AccountMeta::new(funding_account, false),
            AccountMeta::new(lp_token_account, false),
            AccountMeta::new_readonly(TRANSFER_AUTHORITY, false),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new(params.pool, false),
            AccountMeta::new(params.custody, false),
            AccountMeta::new_readonly(params.custody_doves_price_account, false),
            AccountMeta::new_readonly(params.custody_pythnet_price_account, false),
            AccountMeta::new(params.custody_token_account, false),
            AccountMeta::new(JLP_MINT_ADDRESS, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}

/// Arguments of `removeLiquidity2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveLiquidityArgs {
    /// LP tokens to burn.
    pub lp_amount_in: u64,
    /// Minimum tokens to accept.
    pub min_amount_out: u64,
}

impl RemoveLiquidityArgs {
    /// Read the argument block following the discriminator.
    ///
    /// # Errors
    /// Propagates the first field-level [`DecodeError`].
    pub fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            lp_amount_in: dec.read_u64("lp_amount_in")?,
            min_amount_out: dec.read_u64("min_amount_out")?,
        })
    }

    /// Write the argument block following the discriminator.
    pub fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.lp_amount_in);
        enc.write_u64(self.min_amount_out);
    }
}

/// Parameters of [`remove_liquidity`].
#[derive(Debug, Clone)]
pub struct RemoveLiquidityParams {
    /// Liquidity provider; signs.
    pub owner: Pubkey,
    /// Target pool.
    pub pool: Pubkey,
    /// Custody of the withdrawn instrument.
    pub custody: Pubkey,
    /// Mint of the withdrawn instrument.
    pub custody_mint: Pubkey,
    /// The custody's pool-owned token account.
    pub custody_token_account: Pubkey,
    /// The custody's Doves oracle.
    pub custody_doves_price_account: Pubkey,
    /// The custody's Pythnet oracle.
    pub custody_pythnet_price_account: Pubkey,
    /// Instruction arguments.
    pub args: RemoveLiquidityArgs,
}

/// Build `removeLiquidity2`. Mirrors [`add_liquidity`] with the owner's
/// custody-mint ATA receiving instead of funding:
///
/// 0. owner (signer)
/// 1. receiving account: owner's ATA for the custody mint (mut)
/// 2. LP token account: owner's ATA for the JLP mint (mut)
/// 3. transfer authority
/// 4. perpetuals
/// 5. pool (mut)
/// 6. custody (mut)
/// 7. custody Doves oracle
/// 8. custody Pythnet oracle
/// 9. custody token account (mut)
/// 10. JLP mint (mut)
/// 11. token program
/// 12. event authority
/// 13. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if an ATA derivation fails.
pub fn remove_liquidity(params: &RemoveLiquidityParams) -> Result<Instruction, PerpsError> {
    let (receiving_account, _) = find_associated_token_address(&params.owner, &params.custody_mint)?;
    let (lp_token_account, _) = find_associated_token_address(&params.owner, &JLP_MINT_ADDRESS)?;

    let mut enc = Encoder::with_discriminator(instruction_discriminator("removeLiquidity2"));
    params.args.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(params.owner, true),
            AccountMeta::new(receiving_account, false),
            AccountMeta::new(lp_token_account, false),
            AccountMeta::new_readonly(TRANSFER_AUTHORITY, false),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new(params.pool, false),
            AccountMeta::new(params.custody, false),
            AccountMeta::new_readonly(params.custody_doves_price_account, false),
            AccountMeta::new_readonly(params.custody_pythnet_price_account, false),
            AccountMeta::new(params.custody_token_account, false),
            AccountMeta::new(JLP_MINT_ADDRESS, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}

/// Arguments of `swap2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapArgs {
    /// Tokens to sell.
    pub amount_in: u64,
    /// Minimum tokens to accept.
    pub min_amount_out: u64,
}

impl SwapArgs {
    /// Read the argument block following the discriminator.
    ///
    /// # Errors
    /// Propagates the first field-level [`DecodeError`].
    pub fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            amount_in: dec.read_u64("amount_in")?,
            min_amount_out: dec.read_u64("min_amount_out")?,
        })
    }

    /// Write the argument block following the discriminator.
    pub fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.amount_in);
        enc.write_u64(self.min_amount_out);
    }
}

/// One side of a swap: the custody and its satellite accounts.
#[derive(Debug, Clone)]
pub struct SwapSideAccounts {
    /// The custody account.
    pub custody: Pubkey,
    /// Mint of the custody's instrument.
    pub mint: Pubkey,
    /// The custody's pool-owned token account.
    pub token_account: Pubkey,
    /// The custody's Doves oracle.
    pub doves_price_account: Pubkey,
    /// The custody's Pythnet oracle.
    pub pythnet_price_account: Pubkey,
}

/// Parameters of [`swap`].
#[derive(Debug, Clone)]
pub struct SwapParams {
    /// Swapper; signs.
    pub owner: Pubkey,
    /// Pool to swap against.
    pub pool: Pubkey,
    /// Custody receiving the sold tokens.
    pub receiving: SwapSideAccounts,
    /// Custody dispensing the bought tokens.
    pub dispensing: SwapSideAccounts,
    /// Instruction arguments.
    pub args: SwapArgs,
}

/// Build `swap2`. Account order:
///
/// 0. owner (signer)
/// 1. funding account: owner's ATA for the sold mint (mut)
/// 2. receiving account: owner's ATA for the bought mint (mut)
/// 3. transfer authority
/// 4. perpetuals
/// 5. pool (mut)
/// 6. receiving custody (mut)
/// 7. receiving custody Doves oracle
/// 8. receiving custody Pythnet oracle
/// 9. receiving custody token account (mut)
/// 10. dispensing custody (mut)
/// 11. dispensing custody Doves oracle
/// 12. dispensing custody Pythnet oracle
/// 13. dispensing custody token account (mut)
/// 14. token program
/// 15. event authority
/// 16. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if an ATA derivation fails.
pub fn swap(params: &SwapParams) -> Result<Instruction, PerpsError> {
    let (funding_account, _) =
        find_associated_token_address(&params.owner, &params.receiving.mint)?;
    let (receiving_account, _) =
        find_associated_token_address(&params.owner, &params.dispensing.mint)?;

    let mut enc = Encoder::with_discriminator(instruction_discriminator("swap2"));
    params.args.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(params.owner, true),
            AccountMeta::new(funding_account, false),
            AccountMeta::new(receiving_account, false),
            AccountMeta::new_readonly(TRANSFER_AUTHORITY, false),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new(params.pool, false),
            AccountMeta::new(params.receiving.custody, false),
            AccountMeta::new_readonly(params.receiving.doves_price_account, false),
            AccountMeta::new_readonly(params.receiving.pythnet_price_account, false),
            AccountMeta::new(params.receiving.token_account, false),
            AccountMeta::new(params.dispensing.custody, false),
            AccountMeta::new_readonly(params.dispensing.doves_price_account, false),
            AccountMeta::new_readonly(params.dispensing.pythnet_price_account, false),
            AccountMeta::new(params.dispensing.token_account, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}

/// Parameters of the two liquidity quote views.
#[derive(Debug, Clone)]
pub struct LiquidityQuoteParams {
    /// Pool being quoted.
    pub pool: Pubkey,
    /// Custody of the deposited or withdrawn instrument.
    pub custody: Pubkey,
    /// The custody's Doves oracle.
    pub custody_doves_price_account: Pubkey,
    /// The custody's Pythnet oracle.
    pub custody_pythnet_price_account: Pubkey,
}

fn liquidity_quote_accounts(params: &LiquidityQuoteParams) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
        AccountMeta::new_readonly(params.pool, false),
        AccountMeta::new_readonly(params.custody, false),
        AccountMeta::new_readonly(params.custody_doves_price_account, false),
        AccountMeta::new_readonly(params.custody_pythnet_price_account, false),
        AccountMeta::new_readonly(JLP_MINT_ADDRESS, false),
    ]
}

/// Build the `getAddLiquidityAmountAndFee2` view for simulation.
pub fn add_liquidity_quote(params: &LiquidityQuoteParams, token_amount_in: u64) -> Instruction {
    let mut enc =
        Encoder::with_discriminator(instruction_discriminator("getAddLiquidityAmountAndFee2"));
    enc.write_u64(token_amount_in);
    Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: liquidity_quote_accounts(params),
        data: enc.into_bytes(),
    }
}

/// Build the `getRemoveLiquidityAmountAndFee2` view for simulation.
pub fn remove_liquidity_quote(params: &LiquidityQuoteParams, lp_amount_in: u64) -> Instruction {
    let mut enc =
        Encoder::with_discriminator(instruction_discriminator("getRemoveLiquidityAmountAndFee2"));
    enc.write_u64(lp_amount_in);
    Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: liquidity_quote_accounts(params),
        data: enc.into_bytes(),
    }
}

/// Build the `getAssetsUnderManagement2` view for simulation. No arguments.
pub fn pool_aum(pool: &Pubkey) -> Instruction {
    let enc = Encoder::with_discriminator(instruction_discriminator("getAssetsUnderManagement2"));
    Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new_readonly(*pool, false),
        ],
        data: enc.into_bytes(),
    }
}
