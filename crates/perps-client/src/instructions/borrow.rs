//! Borrow market builders.
//!
//! All five operations take a single `amount` argument and address one
//! borrow position, derived from `(pool, custody, owner)`.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder};
use crate::constants::{
    EVENT_AUTHORITY, JLP_MINT_ADDRESS, JUPITER_PERPETUALS_PROGRAM_ID, PERPETUALS_ADDRESS,
    SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID, TRANSFER_AUTHORITY,
};
use crate::discriminator::instruction_discriminator;
use crate::error::{DecodeError, PerpsError};
use crate::pda::find_borrow_position_address;

/// The single argument block shared by every borrow-market instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorrowAmountArgs {
    /// Token amount to move.
    pub amount: u64,
}

impl BorrowAmountArgs {
    /// Read the argument block following the discriminator.
    ///
    /// # Errors
    /// Fails with `BufferExhausted` if the buffer ends first.
    pub fn read(dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self { amount: dec.read_u64("amount")? })
    }

    /// Write the argument block following the discriminator.
    pub fn write(&self, enc: &mut Encoder) {
        enc.write_u64(self.amount);
    }
}

/// Accounts shared by the owner-signed borrow-market builders.
#[derive(Debug, Clone)]
pub struct BorrowPositionAccounts {
    /// Borrow position owner; signs.
    pub owner: Pubkey,
    /// Pool the custody belongs to.
    pub pool: Pubkey,
    /// Custody being borrowed from.
    pub custody: Pubkey,
    /// The custody's pool-owned token account.
    pub custody_token_account: Pubkey,
    /// The owner's token account on the moving side.
    pub user_token_account: Pubkey,
}

/// Build `borrowFromCustody`. Account order:
///
/// 0. owner (signer, mut)
/// 1. perpetuals
/// 2. pool
/// 3. custody (mut)
/// 4. transfer authority
/// 5. borrow position (mut)
/// 6. custody token account (mut)
/// 7. user token account (mut)
/// 8. JLP mint
/// 9. token program
/// 10. event authority
/// 11. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if the PDA derivation fails.
pub fn borrow(accounts: &BorrowPositionAccounts, amount: u64) -> Result<Instruction, PerpsError> {
    let (borrow_position, _) =
        find_borrow_position_address(&accounts.pool, &accounts.custody, &accounts.owner)?;

    let mut enc = Encoder::with_discriminator(instruction_discriminator("borrowFromCustody"));
    BorrowAmountArgs { amount }.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(accounts.owner, true),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new_readonly(accounts.pool, false),
            AccountMeta::new(accounts.custody, false),
            AccountMeta::new_readonly(TRANSFER_AUTHORITY, false),
            AccountMeta::new(borrow_position, false),
            AccountMeta::new(accounts.custody_token_account, false),
            AccountMeta::new(accounts.user_token_account, false),
            AccountMeta::new_readonly(JLP_MINT_ADDRESS, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}

/// Build `repayToCustody`. Account order:
///
/// 0. owner (signer, mut)
/// 1. perpetuals
/// 2. pool
/// 3. custody (mut)
/// 4. borrow position (mut)
/// 5. custody token account (mut)
/// 6. user token account (mut)
/// 7. token program
/// 8. event authority
/// 9. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if the PDA derivation fails.
pub fn repay(accounts: &BorrowPositionAccounts, amount: u64) -> Result<Instruction, PerpsError> {
    let (borrow_position, _) =
        find_borrow_position_address(&accounts.pool, &accounts.custody, &accounts.owner)?;

    let mut enc = Encoder::with_discriminator(instruction_discriminator("repayToCustody"));
    BorrowAmountArgs { amount }.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(accounts.owner, true),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new_readonly(accounts.pool, false),
            AccountMeta::new(accounts.custody, false),
            AccountMeta::new(borrow_position, false),
            AccountMeta::new(accounts.custody_token_account, false),
            AccountMeta::new(accounts.user_token_account, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}

/// Build `depositCollateralForBorrows`. The collateral is JLP; the user side
/// moves from the owner's JLP account into the program's collateral account.
/// Account order:
///
/// 0. owner (signer, mut)
/// 1. perpetuals
/// 2. pool
/// 3. custody
/// 4. transfer authority
/// 5. borrow position (mut)
/// 6. collateral token account (mut)
/// 7. user token account (mut)
/// 8. JLP mint
/// 9. token program
/// 10. system program
/// 11. event authority
/// 12. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if the PDA derivation fails.
pub fn deposit_collateral(
    accounts: &BorrowPositionAccounts,
    collateral_token_account: &Pubkey,
    amount: u64,
) -> Result<Instruction, PerpsError> {
    let (borrow_position, _) =
        find_borrow_position_address(&accounts.pool, &accounts.custody, &accounts.owner)?;

    let mut enc =
        Encoder::with_discriminator(instruction_discriminator("depositCollateralForBorrows"));
    BorrowAmountArgs { amount }.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(accounts.owner, true),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new_readonly(accounts.pool, false),
            AccountMeta::new_readonly(accounts.custody, false),
            AccountMeta::new_readonly(TRANSFER_AUTHORITY, false),
            AccountMeta::new(borrow_position, false),
            AccountMeta::new(*collateral_token_account, false),
            AccountMeta::new(accounts.user_token_account, false),
            AccountMeta::new_readonly(JLP_MINT_ADDRESS, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}

/// Build `withdrawCollateralForBorrows`. Same shape as
/// [`deposit_collateral`] minus the system program, with the custody
/// writable. Account order:
///
/// 0. owner (signer, mut)
/// 1. perpetuals
/// 2. pool
/// 3. custody (mut)
/// 4. transfer authority
/// 5. borrow position (mut)
/// 6. collateral token account (mut)
/// 7. user token account (mut)
/// 8. JLP mint
/// 9. token program
/// 10. event authority
/// 11. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if the PDA derivation fails.
pub fn withdraw_collateral(
    accounts: &BorrowPositionAccounts,
    collateral_token_account: &Pubkey,
    amount: u64,
) -> Result<Instruction, PerpsError> {
    let (borrow_position, _) =
        find_borrow_position_address(&accounts.pool, &accounts.custody, &accounts.owner)?;

    let mut enc =
        Encoder::with_discriminator(instruction_discriminator("withdrawCollateralForBorrows"));
    BorrowAmountArgs { amount }.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(accounts.owner, true),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new_readonly(accounts.pool, false),
            AccountMeta::new(accounts.custody, false),
            AccountMeta::new_readonly(TRANSFER_AUTHORITY, false),
            AccountMeta::new(borrow_position, false),
            AccountMeta::new(*collateral_token_account, false),
            AccountMeta::new(accounts.user_token_account, false),
            AccountMeta::new_readonly(JLP_MINT_ADDRESS, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}

/// Parameters of [`liquidate_borrow`].
#[derive(Debug, Clone)]
pub struct LiquidateBorrowParams {
    /// Liquidator; signs and receives the reward.
    pub liquidator: Pubkey,
    /// Owner of the borrow position being liquidated.
    pub owner: Pubkey,
    /// Pool the custody belongs to.
    pub pool: Pubkey,
    /// Custody the tokens were borrowed from.
    pub custody: Pubkey,
    /// The custody's pool-owned token account.
    pub custody_token_account: Pubkey,
    /// The liquidator's token account receiving repaid tokens.
    pub user_token_account: Pubkey,
}

/// Build `liquidateBorrowPosition`. Account order:
///
/// 0. liquidator (signer, mut)
/// 1. perpetuals
/// 2. pool
/// 3. custody (mut)
/// 4. borrow position (mut)
/// 5. custody token account (mut)
/// 6. user token account (mut)
/// 7. token program
/// 8. event authority
/// 9. this program
///
/// # Errors
/// Returns [`PerpsError::DerivationExhausted`] if the PDA derivation fails.
pub fn liquidate_borrow(params: &LiquidateBorrowParams, amount: u64) -> Result<Instruction, PerpsError> {
    let (borrow_position, _) =
        find_borrow_position_address(&params.pool, &params.custody, &params.owner)?;

    let mut enc = Encoder::with_discriminator(instruction_discriminator("liquidateBorrowPosition"));
    BorrowAmountArgs { amount }.write(&mut enc);

    Ok(Instruction {
        program_id: JUPITER_PERPETUALS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(params.liquidator, true),
            AccountMeta::new_readonly(PERPETUALS_ADDRESS, false),
            AccountMeta::new_readonly(params.pool, false),
            AccountMeta::new(params.custody, false),
            AccountMeta::new(borrow_position, false),
            AccountMeta::new(params.custody_token_account, false),
            AccountMeta::new(params.user_token_account, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(EVENT_AUTHORITY, false),
            AccountMeta::new_readonly(JUPITER_PERPETUALS_PROGRAM_ID, false),
        ],
        data: enc.into_bytes(),
    })
}
