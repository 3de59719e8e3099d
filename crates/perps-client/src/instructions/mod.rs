//! Instruction builders.
//!
//! One pure function per program operation. Each builder derives the PDAs it
//! needs, lays out the account list in the exact order and mutability the
//! program expects, and encodes `discriminator ∥ args`. Account order is the
//! wire contract; a swapped pair produces a structurally valid transaction
//! that fails (or worse, succeeds wrongly) on chain.
//!
//! Builders do not fetch anything: every address that cannot be derived from
//! the parameters is an explicit parameter.

mod borrow;
mod liquidity;
mod position;

pub use borrow::{
    borrow, deposit_collateral, liquidate_borrow, repay, withdraw_collateral, BorrowAmountArgs,
    BorrowPositionAccounts, LiquidateBorrowParams,
};
pub use liquidity::{
    add_liquidity, add_liquidity_quote, pool_aum, remove_liquidity, remove_liquidity_quote, swap,
    AddLiquidityArgs, AddLiquidityParams, LiquidityQuoteParams, RemoveLiquidityArgs,
    RemoveLiquidityParams, SwapArgs, SwapParams, SwapSideAccounts,
};
pub use position::{
    close_position_request, create_decrease_position_market_request,
    create_increase_position_market_request, ClosePositionRequestParams,
    DecreasePositionMarketArgs, DecreasePositionMarketParams, IncreasePositionMarketArgs,
    IncreasePositionMarketParams,
};
