//! Push-based account watching.
//!
//! [`AccountChannel`] is the seam to the websocket transport; the production
//! implementation wraps the nonblocking pubsub client. [`Subscriptions`]
//! layers typed decoding and callback dispatch on top.
//!
//! Failure semantics: a frame that fails to decode reports the error and the
//! subscription keeps listening; a transport error or unexpected stream end
//! reports exactly one error and ends the subscription. There is no
//! automatic reconnect, a caller that wants one opens a new watch.

use std::sync::{Arc, Mutex};

use futures::{Stream, StreamExt};
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::pubsub_client::PubsubClient;
use solana_client::rpc_config::RpcAccountInfoConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use crate::error::PerpsError;
use crate::state::{AccountRecord, BorrowPosition, Custody, Pool, Position, PositionRequest};

const CHANNEL_CAPACITY: usize = 64;

/// Push channel delivering raw account snapshots.
pub trait AccountChannel: Send + Sync + 'static {
    /// The per-address update stream.
    type Updates: Stream<Item = Result<Vec<u8>, PerpsError>> + Send + Unpin + 'static;

    /// Open a stream of raw updates for one account.
    fn open(
        &self,
        address: Pubkey,
        commitment: CommitmentConfig,
    ) -> impl std::future::Future<Output = Result<Self::Updates, PerpsError>> + Send;
}

/// [`AccountChannel`] over the nonblocking pubsub client.
pub struct PubsubAccountChannel {
    client: Arc<PubsubClient>,
}

impl PubsubAccountChannel {
    /// Connect to a websocket endpoint.
    ///
    /// # Errors
    /// Returns [`PerpsError::Transport`] if the connection fails.
    pub async fn connect(ws_url: &str) -> Result<Self, PerpsError> {
        let client = PubsubClient::new(ws_url)
            .await
            .map_err(|e| PerpsError::Transport(e.to_string()))?;
        Ok(Self { client: Arc::new(client) })
    }
}

impl AccountChannel for PubsubAccountChannel {
    type Updates = ReceiverStream<Result<Vec<u8>, PerpsError>>;

    async fn open(
        &self,
        address: Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Self::Updates, PerpsError> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let client = Arc::clone(&self.client);

        // The websocket stream borrows the client, so drive it from a task
        // that owns a handle and forward into an owned channel. Dropping the
        // receiver tears the task down and unsubscribes.
        tokio::spawn(async move {
            let config = RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                data_slice: None,
                commitment: Some(commitment),
                min_context_slot: None,
            };
            match client.account_subscribe(&address, Some(config)).await {
                Ok((mut stream, unsubscribe)) => {
                    loop {
                        tokio::select! {
                            () = tx.closed() => break,
                            update = stream.next() => match update {
                                Some(response) => {
                                    let frame = response.value.data.decode().ok_or_else(|| {
                                        PerpsError::Transport(
                                            "account notification was not binary".to_owned(),
                                        )
                                    });
                                    if tx.send(frame).await.is_err() {
                                        break;
                                    }
                                }
                                None => {
                                    let _ = tx.send(Err(PerpsError::ChannelClosed)).await;
                                    break;
                                }
                            },
                        }
                    }
                    unsubscribe().await;
                }
                Err(e) => {
                    let _ = tx.send(Err(PerpsError::Transport(e.to_string()))).await;
                }
            }
        });

        Ok(ReceiverStream::new(rx))
    }
}

/// Handle to an active watch. Cancelling is idempotent and also happens on
/// drop; a cancelled subscription reports no further errors.
pub struct Subscription {
    cancel: Mutex<Option<oneshot::Sender<()>>>,
}

impl Subscription {
    /// Stop the watch.
    pub fn cancel(&self) {
        let sender = self.cancel.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(sender) = sender {
            let _ = sender.send(());
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Typed account watching over any [`AccountChannel`].
pub struct Subscriptions<C> {
    channel: Arc<C>,
    commitment: CommitmentConfig,
}

impl<C: AccountChannel> Subscriptions<C> {
    /// Build over `channel`, watching at `commitment`.
    pub fn new(channel: C, commitment: CommitmentConfig) -> Self {
        Self { channel: Arc::new(channel), commitment }
    }

    /// Watch one account as `T`, dispatching decoded snapshots to
    /// `on_update` and failures to `on_error`.
    pub fn watch<T, F, E>(&self, address: Pubkey, on_update: F, on_error: E) -> Subscription
    where
        T: AccountRecord,
        F: FnMut(T) + Send + 'static,
        E: FnMut(PerpsError) + Send + 'static,
    {
        let channel = Arc::clone(&self.channel);
        let commitment = self.commitment;
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let mut on_update = on_update;
            let mut on_error = on_error;

            let mut updates = match channel.open(address, commitment).await {
                Ok(updates) => updates,
                Err(e) => {
                    on_error(e);
                    return;
                }
            };
            debug!(%address, record = T::NAME, "watch opened");

            loop {
                tokio::select! {
                    // Checked first so a cancel that races the stream never
                    // surfaces as an error.
                    biased;
                    _ = &mut cancel_rx => {
                        debug!(%address, record = T::NAME, "watch cancelled");
                        break;
                    }
                    update = updates.next() => match update {
                        Some(Ok(frame)) => match T::decode(&frame) {
                            Ok(value) => on_update(value),
                            Err(e) => {
                                warn!(%address, record = T::NAME, error = %e, "bad frame");
                                on_error(e.into());
                            }
                        },
                        Some(Err(e)) => {
                            on_error(e);
                            break;
                        }
                        None => {
                            on_error(PerpsError::ChannelClosed);
                            break;
                        }
                    },
                }
            }
        });

        Subscription { cancel: Mutex::new(Some(cancel_tx)) }
    }

    /// Watch a pool.
    pub fn watch_pool<F, E>(&self, address: Pubkey, on_update: F, on_error: E) -> Subscription
    where
        F: FnMut(Pool) + Send + 'static,
        E: FnMut(PerpsError) + Send + 'static,
    {
        self.watch::<Pool, _, _>(address, on_update, on_error)
    }

    /// Watch a custody.
    pub fn watch_custody<F, E>(&self, address: Pubkey, on_update: F, on_error: E) -> Subscription
    where
        F: FnMut(Custody) + Send + 'static,
        E: FnMut(PerpsError) + Send + 'static,
    {
        self.watch::<Custody, _, _>(address, on_update, on_error)
    }

    /// Watch a position.
    pub fn watch_position<F, E>(&self, address: Pubkey, on_update: F, on_error: E) -> Subscription
    where
        F: FnMut(Position) + Send + 'static,
        E: FnMut(PerpsError) + Send + 'static,
    {
        self.watch::<Position, _, _>(address, on_update, on_error)
    }

    /// Watch a position request.
    pub fn watch_position_request<F, E>(
        &self,
        address: Pubkey,
        on_update: F,
        on_error: E,
    ) -> Subscription
    where
        F: FnMut(PositionRequest) + Send + 'static,
        E: FnMut(PerpsError) + Send + 'static,
    {
        self.watch::<PositionRequest, _, _>(address, on_update, on_error)
    }

    /// Watch a borrow position.
    pub fn watch_borrow_position<F, E>(
        &self,
        address: Pubkey,
        on_update: F,
        on_error: E,
    ) -> Subscription
    where
        F: FnMut(BorrowPosition) + Send + 'static,
        E: FnMut(PerpsError) + Send + 'static,
    {
        self.watch::<BorrowPosition, _, _>(address, on_update, on_error)
    }
}
