//! Shared test collaborators and fixtures.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use perps_client::error::PerpsError;
use perps_client::fetch::AccountStore;
use perps_client::state::{
    Assets, BorrowPosition, Custody, Fees, FundingRateState, Limit, OracleParams, Perpetuals,
    Permissions, Pool, PoolApr, Position, PositionRequest, PriceImpactBuffer, RequestChange,
    RequestType, Secp256k1Pubkey, Side, TokenLedger,
};
use perps_client::subscribe::AccountChannel;

/// A pubkey with every byte set to `byte`.
pub fn pk(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

// ============================================================================
// Mock account store
// ============================================================================

#[derive(Default)]
struct MockStoreInner {
    accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
    fail_with: Mutex<Option<String>>,
    calls: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

/// In-memory [`AccountStore`] that counts retrievals. Clones share state, so
/// a test can keep a handle after moving one into a fetcher.
#[derive(Clone, Default)]
pub struct MockStore {
    inner: Arc<MockStoreInner>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, address: Pubkey, data: Vec<u8>) {
        self.inner.accounts.lock().unwrap().insert(address, data);
    }

    pub fn remove(&self, address: &Pubkey) {
        self.inner.accounts.lock().unwrap().remove(address);
    }

    /// Make every subsequent retrieval fail as a transport error.
    pub fn fail_with(&self, message: &str) {
        *self.inner.fail_with.lock().unwrap() = Some(message.to_owned());
    }

    /// Delay every retrieval, to widen race windows.
    pub fn set_delay(&self, delay: Duration) {
        *self.inner.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl AccountStore for MockStore {
    async fn fetch_bytes(
        &self,
        address: &Pubkey,
        _commitment: CommitmentConfig,
    ) -> Result<Option<Vec<u8>>, PerpsError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.inner.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.inner.fail_with.lock().unwrap().clone() {
            return Err(PerpsError::Transport(message));
        }
        Ok(self.inner.accounts.lock().unwrap().get(address).cloned())
    }
}

// ============================================================================
// Mock push channel
// ============================================================================

type Frame = Result<Vec<u8>, PerpsError>;

/// Scripted [`AccountChannel`]: a test registers a frame sender per address
/// before the watch opens. Clones share state.
#[derive(Clone, Default)]
pub struct MockChannel {
    scripts: Arc<Mutex<HashMap<Pubkey, mpsc::Receiver<Frame>>>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script for `address`; push frames through the returned
    /// sender. Dropping the sender ends the stream.
    pub fn script(&self, address: Pubkey) -> mpsc::Sender<Frame> {
        let (tx, rx) = mpsc::channel(16);
        self.scripts.lock().unwrap().insert(address, rx);
        tx
    }
}

impl AccountChannel for MockChannel {
    type Updates = ReceiverStream<Frame>;

    async fn open(
        &self,
        address: Pubkey,
        _commitment: CommitmentConfig,
    ) -> Result<Self::Updates, PerpsError> {
        let rx = self
            .scripts
            .lock()
            .unwrap()
            .remove(&address)
            .ok_or_else(|| PerpsError::Transport(format!("no script for {address}")))?;
        Ok(ReceiverStream::new(rx))
    }
}

// ============================================================================
// Record fixtures
// ============================================================================

pub fn sample_permissions() -> Permissions {
    Permissions {
        allow_swap: true,
        allow_add_liquidity: true,
        allow_remove_liquidity: false,
        allow_increase_position: true,
        allow_decrease_position: true,
        allow_collateral_withdrawal: false,
        allow_liquidate_position: true,
    }
}

pub fn sample_perpetuals() -> Perpetuals {
    Perpetuals {
        permissions: sample_permissions(),
        pools: vec![pk(0x11), pk(0x22)],
        admin: pk(0x33),
        transfer_authority_bump: 254,
        perpetuals_bump: 255,
        inception_time: 1_650_000_000,
    }
}

pub fn sample_pool(name: &str, custodies: Vec<Pubkey>) -> Pool {
    Pool {
        name: name.to_owned(),
        custodies,
        aum_usd: 4_567_890_123_456_789,
        limit: Limit {
            max_aum_usd: 750_000_000_000_000,
            token_weightage_buffer_bps: 2_000,
            buffer: 0,
        },
        fees: Fees {
            swap_multiplier: 2,
            stable_swap_multiplier: 1,
            add_remove_liquidity_bps: 10,
            swap_bps: 25,
            tax_bps: 50,
            stable_swap_bps: 1,
            stable_swap_tax_bps: 5,
            liquidation_reward_bps: 100,
            protocol_share_bps: 2_500,
        },
        pool_apr: PoolApr {
            last_updated: 1_700_000_000,
            fee_apr_bps: 4_200,
            realized_fee_usd: 9_876_543,
        },
        max_request_execution_sec: 45,
        bump: 252,
        lp_token_bump: 251,
        inception_time: 1_650_000_001,
        parameter_update_oracle: Secp256k1Pubkey { prefix: 2, key: [0xAB; 32] },
        aum_usd_updated_at: 1_700_000_100,
    }
}

pub fn sample_custody(pool: Pubkey, mint: Pubkey) -> Custody {
    Custody {
        pool,
        mint,
        token_account: pk(0x44),
        decimals: 9,
        is_stable: false,
        oracle: OracleParams {
            oracle_account: pk(0x55),
            oracle_type: perps_client::state::OracleType::Pyth,
            buffer: 0,
            max_price_age_sec: 60,
        },
        assets: Assets {
            fees_reserves: 1_000,
            owned: 2_000_000,
            locked: 500_000,
            guaranteed_usd: 750_000,
            global_short_sizes: 250_000,
            global_short_average_prices: 23_450_000,
        },
        funding_rate_state: FundingRateState {
            cumulative_interest_rate: 123_456_789_012,
            last_update: 1_700_000_000,
            hourly_funding_dbps: 12,
        },
        price_impact_buffer: PriceImpactBuffer {
            open_interest: {
                let mut oi = [0i64; 60];
                oi[0] = 1_000;
                oi[59] = -2_000;
                oi
            },
            last_updated: 1_700_000_000,
            fee_factor: 7,
            exponent: 1.5,
            delta_imbalance_threshold_decimal: 100,
            max_fee_bps: 150,
        },
        debt: 42,
        ..Custody::default()
    }
}

pub fn sample_position(owner: Pubkey, pool: Pubkey, custody: Pubkey, size_usd: u64) -> Position {
    Position {
        owner,
        pool,
        custody,
        collateral_custody: custody,
        open_time: 1_690_000_000,
        update_time: 1_700_000_000,
        side: Side::Long,
        price: 23_450_000,
        size_usd,
        collateral_usd: size_usd / 5,
        realised_pnl_usd: -1_234,
        cumulative_interest_snapshot: 987_654_321,
        locked_amount: 10_000,
        bump: 255,
    }
}

pub fn sample_position_request(owner: Pubkey, position: Pubkey) -> PositionRequest {
    PositionRequest {
        owner,
        pool: pk(0x66),
        custody: pk(0x77),
        position,
        mint: pk(0x88),
        open_time: 1_700_000_000,
        update_time: 1_700_000_050,
        size_usd_delta: 500_000_000,
        collateral_delta: 1_000_000,
        request_change: RequestChange::Increase,
        request_type: RequestType::Market,
        side: Side::Long,
        price_slippage: Some(24_000_000),
        jupiter_minimum_out: None,
        pre_swap_amount: None,
        trigger_price: None,
        trigger_above_threshold: None,
        entire_position: None,
        executed: false,
        counter: 3,
        bump: 255,
        referral: Some(pk(0x99)),
    }
}

pub fn sample_borrow_position(owner: Pubkey, pool: Pubkey, custody: Pubkey) -> BorrowPosition {
    BorrowPosition {
        owner,
        pool,
        custody,
        open_time: 1_690_000_000,
        update_time: 1_700_000_000,
        borrow_size: 5_000_000_000,
        cumulative_compounded_interest_snapshot: 1_000_000_001,
        locked_collateral: 250_000,
        bump: 255,
        last_borrowed: 1_699_999_999,
    }
}

pub fn sample_token_ledger() -> TokenLedger {
    TokenLedger { token_account: pk(0xAA), amount: 31_337 }
}
