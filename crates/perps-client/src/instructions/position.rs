//! Position request builders.
//!
//! Market open/grow, market shrink/close, and keeper-side request cleanup.
//! Requests are append-only accounts; the caller-supplied `counter` keys the
//! request PDA so successive requests on one position never collide.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, EVENT_AUTHORITY, JUPITER_PERPETUALS_PROGRAM_ID,
    PERPETUALS_ADDRESS, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::discriminator::instruction_discriminator;
use crate::error::{DecodeError, PerpsError};
use crate::pda::{
    find_associated_token_address, find_position_address, find_position_request_address,
};
use crate::state::{RequestChange, Side};

/// Arguments of `createIncreasePositionMarketRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncreasePositionMarketArgs {
    /// Size to add, USD fixed point.
    pub size_usd_delta: u64,
    /// Collateral to deposit, input-token amount.
    pub collateral_token_delta: u64,
    /// Long or short.
    pub side: Side,
    /// Worst acceptable execution price.
    pub price_slippage: u64,
    /// Minimum output of the pre-execution swap, when the input token is not
    /// the collateral token.
    pub jupiter_minimum_out: Option<u64>,
    /// Request counter, keys the request PDA.
    pub counter: u64,
}

impl IncreasePositionMarketArgs {
    /// Read the argument block following the discriminator.
    ///
    /// # Errors
    /// Propagates the first field-level [`DecodeError`].
    pub fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            size_usd_delta: dec.read_u64("size_usd_delta")?,
            collateral_token_delta: dec.read_u64("collateral_token_delta")?,
            side: Side::read(dec, "side")?,
            price_slippage: dec.read_u64("price_slippage")?,
            jupiter_minimum_out: dec
                .read_option("jupiter_minimum_out", |d| d.read_u64("jupiter_minimum_out"))?,
            counter: dec.read_u64("counter")?,
        })
    }

    /// Write the argument block following the discriminator.
    pub fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.size_usd_delta);
        enc.write_u64(self.collateral_token_delta);
        self.side.write(enc);
        enc.write_u64(self.price_slippage);
        enc.write_option(&self.jupiter_minimum_out, |e, v| e.write_u64(*v));
        enc.write_u64(self.counter);
    }
}

/// Parameters of [`create_increase_position_market_request`].
#[derive(Debug, Clone)]
pub struct IncreasePositionMarketParams {
    /// Position owner; signs and pays.
    pub owner: Pubkey,
    /// Pool the position trades against.
    pub pool: Pubkey,
    /// Custody of the traded instrument.
    pub custody: Pubkey,
    /// Custody holding the collateral.
    pub collateral_custody: Pubkey,
    /// Mint the owner funds the request with.
    pub input_mint: Pubkey,
    /// Optional referral account; the owner stands in when absent.
    pub referral: Option<Pubkey>,
    /// Instruction arguments.
    pub args: IncreasePositionMarketArgs,
}

/// Build `createIncreasePositionMarketRequest`.
///
/// Derives the position, request, and funding/request token accounts from
/// the parameters. Account order:
///
/// 0. owner (signer, mut)
/// 1. funding account: owner's ATA for the input mint (mut)
/// 2. perpetuals
/// 3. pool
/// 4. position (mut)
/// 5. position request (mut)
/// 6. position request ATA (mut)
/// 7. custody
/// 8. collateral custody
/// 9. input mint
/// 10. referral (owner when none)
/// 11. token program
/// 12. associated token program
/// 13. system program
/// 14. event authority
/// 15. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if any PDA derivation fails.
pub fn create_increase_position_market_request(
    params: &IncreasePositionMarketParams,
) -> Result<Instruction, PerpsError> {
    let (position, _) = find_position_address(&params.pool, &params.custody, &params.owner)?;
    let (position_request, _) =
        find_position_request_address(&position, RequestChange::Increase, params.args.counter)?;
    let (funding_account, _) = find_associated_token_address(&params.owner, &params.input_mint)?;
    let (position_request_ata, _) =
        find_associated_token_address(&position_request, &params.input_mint)?;

    let mut enc =
        Encoder::with_discriminator(instruction_discriminator("createIncreasePositionMarketRequest"));
    params.args.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(params.owner, true),
            AccountMeta::new(funding_account, false),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new_readonly(params.pool, false),
            AccountMeta::new(position, false),
            AccountMeta::new(position_request, false),
            AccountMeta::new(position_request_ata, false),
            AccountMeta::new_readonly(params.custody, false),
            AccountMeta::new_readonly(params.collateral_custody, false),
            AccountMeta::new_readonly(params.input_mint, false),
            AccountMeta::new_readonly(params.referral.unwrap_or(params.owner), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}

/// Arguments of `createDecreasePositionMarketRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecreasePositionMarketArgs {
    /// Collateral to withdraw, USD fixed point.
    pub collateral_usd_delta: u64,
    /// Size to remove, USD fixed point.
    pub size_usd_delta: u64,
    /// Worst acceptable execution price.
    pub price_slippage: u64,
    /// Minimum output of the post-execution swap.
    pub jupiter_minimum_out: Option<u64>,
    /// Whether the request closes the whole position.
    pub entire_position: Option<bool>,
    /// Request counter, keys the request PDA.
    pub counter: u64,
}

impl DecreasePositionMarketArgs {
    /// Read the argument block following the discriminator.
    ///
    /// # Errors
    /// Propagates the first field-level [`DecodeError`].
    pub fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            collateral_usd_delta: dec.read_u64("collateral_usd_delta")?,
            size_usd_delta: dec.read_u64("size_usd_delta")?,
            price_slippage: dec.read_u64("price_slippage")?,
            jupiter_minimum_out: dec
                .read_option("jupiter_minimum_out", |d| d.read_u64("jupiter_minimum_out"))?,
            entire_position: dec
                .read_option("entire_position", |d| d.read_bool("entire_position"))?,
            counter: dec.read_u64("counter")?,
        })
    }

    /// Write the argument block following the discriminator.
    pub fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.collateral_usd_delta);
        enc.write_u64(self.size_usd_delta);
        enc.write_u64(self.price_slippage);
        enc.write_option(&self.jupiter_minimum_out, |e, v| e.write_u64(*v));
        enc.write_option(&self.entire_position, |e, v| e.write_bool(*v));
        enc.write_u64(self.counter);
    }
}

/// Parameters of [`create_decrease_position_market_request`].
#[derive(Debug, Clone)]
pub struct DecreasePositionMarketParams {
    /// Position owner; signs and pays.
    pub owner: Pubkey,
    /// Pool the position trades against.
    pub pool: Pubkey,
    /// Custody of the traded instrument.
    pub custody: Pubkey,
    /// Custody holding the collateral.
    pub collateral_custody: Pubkey,
    /// Mint the owner wants proceeds in.
    pub desired_mint: Pubkey,
    /// Optional referral account; the owner stands in when absent.
    pub referral: Option<Pubkey>,
    /// Collateral to withdraw, USD fixed point.
    pub collateral_usd_delta: u64,
    /// Size to remove, USD fixed point.
    pub size_usd_delta: u64,
    /// Worst acceptable execution price.
    pub price_slippage: u64,
    /// Minimum output of the post-execution swap.
    pub jupiter_minimum_out: Option<u64>,
    /// Whether the request closes the whole position. Callers state this
    /// explicitly; it is never inferred from a zero size delta.
    pub entire_position: bool,
    /// Request counter, keys the request PDA.
    pub counter: u64,
}

/// Build `createDecreasePositionMarketRequest`.
///
/// Same account shape as the increase builder except the position is
/// readonly and the owner's ATA receives rather than funds:
///
/// 0. owner (signer, mut)
/// 1. receiving account: owner's ATA for the desired mint (mut)
/// 2. perpetuals
/// 3. pool
/// 4. position
/// 5. position request (mut)
/// 6. position request ATA (mut)
/// 7. custody
/// 8. collateral custody
/// 9. desired mint
/// 10. referral (owner when none)
/// 11. token program
/// 12. associated token program
/// 13. system program
/// 14. event authority
/// 15. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if any PDA derivation fails.
pub fn create_decrease_position_market_request(
    params: &DecreasePositionMarketParams,
) -> Result<Instruction, PerpsError> {
    let (position, _) = find_position_address(&params.pool, &params.custody, &params.owner)?;
    let (position_request, _) =
        find_position_request_address(&position, RequestChange::Decrease, params.counter)?;
    let (receiving_account, _) = find_associated_token_address(&params.owner, &params.desired_mint)?;
    let (position_request_ata, _) =
        find_associated_token_address(&position_request, &params.desired_mint)?;

    let args = DecreasePositionMarketArgs {
        collateral_usd_delta: params.collateral_usd_delta,
        size_usd_delta: params.size_usd_delta,
        price_slippage: params.price_slippage,
        jupiter_minimum_out: params.jupiter_minimum_out,
        entire_position: Some(params.entire_position),
        counter: params.counter,
    };
    let mut enc =
        Encoder::with_discriminator(instruction_discriminator("createDecreasePositionMarketRequest"));
    args.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(params.owner, true),
            AccountMeta::new(receiving_account, false),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new_readonly(params.pool, false),
            AccountMeta::new_readonly(position, false),
            AccountMeta::new(position_request, false),
            AccountMeta::new(position_request_ata, false),
            AccountMeta::new_readonly(params.custody, false),
            AccountMeta::new_readonly(params.collateral_custody, false),
            AccountMeta::new_readonly(params.desired_mint, false),
            AccountMeta::new_readonly(params.referral.unwrap_or(params.owner), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}

/// Parameters of [`close_position_request`].
#[derive(Debug, Clone)]
pub struct ClosePositionRequestParams {
    /// Keeper closing the request; signs.
    pub keeper: Pubkey,
    /// Request owner; receives the rent and any escrowed tokens.
    pub owner: Pubkey,
    /// Mint escrowed by the request.
    pub mint: Pubkey,
    /// Pool of the target position.
    pub pool: Pubkey,
    /// The target position account.
    pub position: Pubkey,
    /// The request account being closed.
    pub position_request: Pubkey,
}

/// Build `closePositionRequest`. No arguments. Account order:
///
/// 0. keeper (signer)
/// 1. owner (mut)
/// 2. owner's ATA for the escrowed mint (mut)
/// 3. pool (mut)
/// 4. position request (mut)
/// 5. position request ATA (mut)
/// 6. position
/// 7. token program
/// 8. event authority
/// 9. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if an ATA derivation fails.
pub fn close_position_request(
    params: &ClosePositionRequestParams,
) -> Result<Instruction, PerpsError> {
    let (owner_ata, _) = find_associated_token_address(&params.owner, &params.mint)?;
    let (position_request_ata, _) =
        find_associated_token_address(&params.position_request, &params.mint)?;

    let enc = Encoder::with_discriminator(instruction_discriminator("closePositionRequest"));

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(params.keeper, true),
            AccountMeta::new(params.owner, false),
            AccountMeta::new(owner_ata, false),
            AccountMeta::new(params.pool, false),
            AccountMeta::new(params.position_request, false),
            AccountMeta::new(position_request_ata, false),
            AccountMeta::new_readonly(params.position, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}
