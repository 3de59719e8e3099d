//! Typed client bindings for the Jupiter Perpetuals on-chain program.
//!
//! The program's account and instruction wire formats are fixed and
//! versioned; this crate is the binding layer between them and application
//! code:
//!
//! - [`codec`] — the Borsh-compatible cursor engine shared by every schema
//! - [`discriminator`] — 8-byte schema tags and the static registry
//! - [`state`] — the typed account records and their sub-structures
//! - [`pda`] — deterministic address derivation for every account family
//! - [`instructions`] — pure builders producing ready-to-send instructions
//! - [`fetch`] — typed fetching with TTL caching and request coalescing
//! - [`subscribe`] — push-based typed account watching
//! - [`queries`] — composite readers joining pools, custodies and positions
//!
//! Nothing here signs or submits transactions, and nothing validates
//! business rules; the program itself is the arbiter of what executes.

pub mod codec;
pub mod constants;
pub mod discriminator;
pub mod error;
pub mod fetch;
pub mod instructions;
pub mod pda;
pub mod queries;
pub mod state;
pub mod subscribe;

pub use error::{DecodeError, DecodeErrorKind, PerpsError};
pub use fetch::{AccountFetcher, AccountStore, FetcherConfig, RpcAccountStore};
pub use queries::{BorrowReader, PoolReader, PoolSnapshot, PositionReader, PositionView};
pub use state::AccountRecord;
pub use subscribe::{AccountChannel, PubsubAccountChannel, Subscription, Subscriptions};
