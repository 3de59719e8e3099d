//! Composite read helpers over the fetcher.
//!
//! These compose multiple fetches and PDA derivations into domain-shaped
//! results. Only [`PerpsError::AccountNotFound`] is interpreted (an absent
//! account becomes `None` or is skipped); decode and transport errors always
//! propagate.

use futures::future::try_join_all;
use solana_sdk::pubkey::Pubkey;

use crate::constants::{JLP_POOL_ADDRESS, KNOWN_CUSTODIES};
use crate::error::PerpsError;
use crate::fetch::{AccountFetcher, AccountStore};
use crate::pda::{find_borrow_position_address, find_custody_address, find_position_address};
use crate::state::{BorrowPosition, Custody, Pool, Position};

fn absent_to_none<T>(result: Result<T, PerpsError>) -> Result<Option<T>, PerpsError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(PerpsError::AccountNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// A pool with every custody it lists, in listing order.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    /// The pool's address.
    pub address: Pubkey,
    /// The pool record.
    pub pool: Pool,
    /// The pool's custodies, keyed by address, in listing order.
    pub custodies: Vec<(Pubkey, Custody)>,
}

/// A position joined with the custody it trades.
#[derive(Debug, Clone)]
pub struct PositionView {
    /// The position's address.
    pub address: Pubkey,
    /// The position record.
    pub position: Position,
    /// The custody of the traded instrument.
    pub custody: Custody,
}

/// Pool-level reads.
pub struct PoolReader<'a, S> {
    fetcher: &'a AccountFetcher<S>,
}

impl<'a, S: AccountStore> PoolReader<'a, S> {
    /// Read through `fetcher`.
    pub fn new(fetcher: &'a AccountFetcher<S>) -> Self {
        Self { fetcher }
    }

    /// Fetch a pool.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn pool(&self, address: &Pubkey) -> Result<Pool, PerpsError> {
        self.fetcher.pool(address).await
    }

    /// Fetch a custody.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn custody(&self, address: &Pubkey) -> Result<Custody, PerpsError> {
        self.fetcher.custody(address).await
    }

    /// Fetch the custody of `mint` in the pool at `pool_address`, by PDA.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`]; also
    /// [`PerpsError::DerivationExhausted`] from the PDA derivation.
    pub async fn custody_by_mint(
        &self,
        pool_address: &Pubkey,
        mint: &Pubkey,
    ) -> Result<Custody, PerpsError> {
        let (address, _) = find_custody_address(pool_address, mint)?;
        self.fetcher.custody(&address).await
    }

    /// Fetch every custody the pool lists, concurrently, preserving the
    /// pool's listing order.
    ///
    /// # Errors
    /// Fails on the first custody that cannot be fetched or decoded.
    pub async fn all_custodies(
        &self,
        pool_address: &Pubkey,
    ) -> Result<Vec<(Pubkey, Custody)>, PerpsError> {
        let pool = self.fetcher.pool(pool_address).await?;
        self.custodies_of(&pool).await
    }

    /// Fetch a pool and all of its custodies.
    ///
    /// # Errors
    /// Fails on the first account that cannot be fetched or decoded.
    pub async fn pool_with_custodies(
        &self,
        pool_address: &Pubkey,
    ) -> Result<PoolSnapshot, PerpsError> {
        let pool = self.fetcher.pool(pool_address).await?;
        let custodies = self.custodies_of(&pool).await?;
        Ok(PoolSnapshot { address: *pool_address, pool, custodies })
    }

    /// Fetch the five fixed JLP instruments, keyed by symbol.
    ///
    /// # Errors
    /// Fails on the first custody that cannot be fetched or decoded.
    pub async fn known_custodies(&self) -> Result<Vec<(&'static str, Custody)>, PerpsError> {
        let fetches = KNOWN_CUSTODIES
            .iter()
            .map(|(symbol, address)| async move {
                Ok::<_, PerpsError>((*symbol, self.fetcher.custody(address).await?))
            });
        try_join_all(fetches).await
    }

    async fn custodies_of(&self, pool: &Pool) -> Result<Vec<(Pubkey, Custody)>, PerpsError> {
        let fetches = pool.custodies.iter().map(|address| async move {
            Ok::<_, PerpsError>((*address, self.fetcher.custody(address).await?))
        });
        try_join_all(fetches).await
    }
}

/// Position-level reads.
pub struct PositionReader<'a, S> {
    fetcher: &'a AccountFetcher<S>,
}

impl<'a, S: AccountStore> PositionReader<'a, S> {
    /// Read through `fetcher`.
    pub fn new(fetcher: &'a AccountFetcher<S>) -> Self {
        Self { fetcher }
    }

    /// Fetch a position joined with its custody.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn position(&self, address: &Pubkey) -> Result<PositionView, PerpsError> {
        let position = self.fetcher.position(address).await?;
        let custody = self.fetcher.custody(&position.custody).await?;
        Ok(PositionView { address: *address, position, custody })
    }

    /// Fetch the position of `owner` on `(pool, custody)`, `None` when the
    /// account does not exist.
    ///
    /// # Errors
    /// Decode and transport errors propagate; only an absent account maps to
    /// `None`.
    pub async fn position_by_owner(
        &self,
        owner: &Pubkey,
        pool: &Pubkey,
        custody: &Pubkey,
    ) -> Result<Option<Position>, PerpsError> {
        let (address, _) = find_position_address(pool, custody, owner)?;
        absent_to_none(self.fetcher.position(&address).await)
    }

    /// Fetch every open position of `owner` across the known JLP custodies.
    ///
    /// Absent position accounts and empty positions (`size_usd == 0`) are
    /// skipped.
    ///
    /// # Errors
    /// Decode and transport errors propagate.
    pub async fn positions_by_owner(
        &self,
        owner: &Pubkey,
    ) -> Result<Vec<PositionView>, PerpsError> {
        let mut views = Vec::new();
        for (_, custody_address) in &KNOWN_CUSTODIES {
            let (address, _) =
                find_position_address(&JLP_POOL_ADDRESS, custody_address, owner)?;
            let Some(position) = absent_to_none(self.fetcher.position(&address).await)? else {
                continue;
            };
            if position.size_usd == 0 {
                continue;
            }
            let custody = self.fetcher.custody(&position.custody).await?;
            views.push(PositionView { address, position, custody });
        }
        Ok(views)
    }
}

/// Borrow-market reads.
pub struct BorrowReader<'a, S> {
    fetcher: &'a AccountFetcher<S>,
}

impl<'a, S: AccountStore> BorrowReader<'a, S> {
    /// Read through `fetcher`.
    pub fn new(fetcher: &'a AccountFetcher<S>) -> Self {
        Self { fetcher }
    }

    /// Fetch a borrow position.
    ///
    /// # Errors
    /// See [`AccountFetcher::fetch`].
    pub async fn borrow_position(&self, address: &Pubkey) -> Result<BorrowPosition, PerpsError> {
        self.fetcher.borrow_position(address).await
    }

    /// Fetch the borrow position of `owner` on `(pool, custody)`, `None`
    /// when the account does not exist.
    ///
    /// # Errors
    /// Decode and transport errors propagate; only an absent account maps to
    /// `None`.
    pub async fn borrow_position_by_owner(
        &self,
        owner: &Pubkey,
        pool: &Pubkey,
        custody: &Pubkey,
    ) -> Result<Option<BorrowPosition>, PerpsError> {
        let (address, _) = find_borrow_position_address(pool, custody, owner)?;
        absent_to_none(self.fetcher.borrow_position(&address).await)
    }
}
