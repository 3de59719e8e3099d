//! Typed account fetching with TTL caching and request coalescing.
//!
//! [`AccountStore`] is the seam to the remote byte store; the production
//! implementation wraps the nonblocking RPC client, tests substitute a mock.
//! [`AccountFetcher`] layers decoding, a TTL cache, and per-address
//! single-flight on top: concurrent callers for the same address share one
//! retrieval instead of racing to the store.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::constants::PERPETUALS_ADDRESS;
use crate::error::PerpsError;
use crate::pda::verify_well_known_addresses;
use crate::state::{
    AccountRecord, BorrowPosition, Custody, Perpetuals, Pool, Position, PositionRequest,
    TokenLedger,
};

/// Remote source of raw account bytes.
///
/// `Ok(None)` means the account does not exist at the given commitment;
/// transport failures map to [`PerpsError::Transport`].
pub trait AccountStore: Send + Sync {
    /// Fetch the raw data of one account.
    fn fetch_bytes(
        &self,
        address: &Pubkey,
        commitment: CommitmentConfig,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, PerpsError>> + Send;
}

/// [`AccountStore`] over the nonblocking RPC client.
pub struct RpcAccountStore {
    rpc: RpcClient,
}

impl RpcAccountStore {
    /// Connect to an RPC endpoint.
    pub fn new(url: impl ToString) -> Self {
        Self { rpc: RpcClient::new(url.to_string()) }
    }

    /// Wrap an existing client.
    pub fn from_client(rpc: RpcClient) -> Self {
        Self { rpc }
    }
}

impl AccountStore for RpcAccountStore {
    async fn fetch_bytes(
        &self,
        address: &Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Option<Vec<u8>>, PerpsError> {
        let response = self
            .rpc
            .get_account_with_commitment(address, commitment)
            .await
            .map_err(|e| PerpsError::Transport(e.to_string()))?;
        Ok(response.value.map(|account| account.data))
    }
}

/// Fetcher tuning.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Commitment level for reads.
    pub commitment: CommitmentConfig,
    /// How long a cached record stays fresh. Zero disables caching.
    pub cache_ttl: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            commitment: CommitmentConfig::confirmed(),
            cache_ttl: Duration::from_secs(5),
        }
    }
}

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Instant,
}

/// Typed account fetcher with TTL caching and single-flight coalescing.
pub struct AccountFetcher<S> {
    store: S,
    commitment: CommitmentConfig,
    cache_ttl: Duration,
    // Entries are replaced whole; the lock is never held across an await.
    cache: Mutex<HashMap<Pubkey, CacheEntry>>,
    inflight: tokio::sync::Mutex<HashMap<Pubkey, Arc<tokio::sync::Mutex<()>>>>,
}

impl<S: AccountStore> AccountFetcher<S> {
    /// Build a fetcher over `store`.
    ///
    /// # Errors
    /// Returns [`PerpsError::AddressMismatch`] if a compile-time singleton
    /// address no longer matches its seed derivation.
    pub fn new(store: S, config: FetcherConfig) -> Result<Self, PerpsError> {
        verify_well_known_addresses()?;
        Ok(Self {
            store,
            commitment: config.commitment,
            cache_ttl: config.cache_ttl,
            cache: Mutex::new(HashMap::new()),
            inflight: tokio::sync::Mutex::new(HashMap::new()),
        })
    }

    /// Drop every cached record. The only invalidation besides TTL expiry.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Number of live cached records. Expired entries are swept on insert
    /// and on lookup, so this tracks real retention, not history.
    pub fn cached_records(&self) -> usize {
        self.lock_cache().len()
    }

    /// Number of per-address retrieval gates currently held. Zero when no
    /// fetch is in flight.
    pub async fn inflight_gates(&self) -> usize {
        self.inflight.lock().await.len()
    }

    // Entries are whole-value replacements, so a poisoned lock still guards
    // consistent state; recover rather than propagate the panic.
    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<Pubkey, CacheEntry>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetch and decode one account, consulting the cache first.
    ///
    /// # Errors
    /// [`PerpsError::AccountNotFound`] when the account is absent,
    /// [`PerpsError::Decode`] when its bytes are not a valid `T`, or
    /// [`PerpsError::Transport`] from the store.
    pub async fn fetch<T: AccountRecord>(&self, address: &Pubkey) -> Result<T, PerpsError> {
        if self.cache_ttl.is_zero() {
            return self.load::<T>(address).await;
        }

        if let Some(hit) = self.cache_lookup::<T>(address) {
            debug!(%address, record = T::NAME, "cache hit");
            return Ok(hit);
        }

        // One retrieval per address at a time; losers of the race find the
        // winner's entry on the recheck.
        let gate = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(inflight.entry(*address).or_default())
        };
        let result = {
            let _held = gate.lock().await;
            match self.cache_lookup::<T>(address) {
                Some(hit) => Ok(hit),
                None => {
                    debug!(%address, record = T::NAME, "cache miss");
                    let value = self.load::<T>(address).await;
                    if let Ok(value) = &value {
                        self.cache_insert(address, value.clone());
                    }
                    value
                }
            }
        };

        // Drop the gate once no other caller holds a clone. Clones are only
        // handed out under the map lock, so the count cannot change under us.
        let mut inflight = self.inflight.lock().await;
        if Arc::strong_count(&gate) == 2 {
            inflight.remove(address);
        }
        drop(inflight);

        result
    }

    async fn load<T: AccountRecord>(&self, address: &Pubkey) -> Result<T, PerpsError> {
        let bytes = self
            .store
            .fetch_bytes(address, self.commitment)
            .await?
            .ok_or(PerpsError::AccountNotFound(*address))?;
        Ok(T::decode(&bytes)?)
    }

    fn cache_lookup<T: AccountRecord>(&self, address: &Pubkey) -> Option<T> {
        let mut cache = self.lock_cache();
        let entry = cache.get(address)?;
        if Instant::now() >= entry.expires_at {
            cache.remove(address);
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    fn cache_insert<T: AccountRecord>(&self, address: &Pubkey, value: T) {
        let entry = CacheEntry {
            value: Arc::new(value),
            expires_at: Instant::now() + self.cache_ttl,
        };
        let mut cache = self.lock_cache();
        // Sweep dead entries here so the map only ever tracks live records.
        let now = Instant::now();
        cache.retain(|_, e| now < e.expires_at);
        cache.insert(*address, entry);
    }

    /// Fetch the global program state.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn perpetuals(&self) -> Result<Perpetuals, PerpsError> {
        self.fetch(&PERPETUALS_ADDRESS).await
    }

    /// Fetch a pool.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn pool(&self, address: &Pubkey) -> Result<Pool, PerpsError> {
        self.fetch(address).await
    }

    /// Fetch a custody.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn custody(&self, address: &Pubkey) -> Result<Custody, PerpsError> {
        self.fetch(address).await
    }

    /// Fetch a position.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn position(&self, address: &Pubkey) -> Result<Position, PerpsError> {
        self.fetch(address).await
    }

    /// Fetch a position request.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn position_request(&self, address: &Pubkey) -> Result<PositionRequest, PerpsError> {
        self.fetch(address).await
    }

    /// Fetch a borrow position.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn borrow_position(&self, address: &Pubkey) -> Result<BorrowPosition, PerpsError> {
        self.fetch(address).await
    }

    /// Fetch a token ledger.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn token_ledger(&self, address: &Pubkey) -> Result<TokenLedger, PerpsError> {
        self.fetch(address).await
    }
}
