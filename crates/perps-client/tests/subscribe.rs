//! Watch lifecycle: typed delivery, per-frame error recovery, terminal
//! errors, and cancellation.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{pk, sample_custody, sample_pool, sample_position, MockChannel};
use solana_sdk::commitment_config::CommitmentConfig;

use perps_client::error::PerpsError;
use perps_client::state::{AccountRecord, Pool, Position};
use perps_client::subscribe::Subscriptions;

fn subscriptions(channel: &MockChannel) -> Subscriptions<MockChannel> {
    Subscriptions::new(channel.clone(), CommitmentConfig::confirmed())
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[derive(Clone, Default)]
struct Collector<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> Collector<T> {
    fn new() -> Self {
        Self { items: Arc::new(Mutex::new(Vec::new())) }
    }

    fn push_fn(&self) -> impl FnMut(T) + Send + 'static
    where
        T: Send + 'static,
    {
        let items = Arc::clone(&self.items);
        move |item| items.lock().unwrap().push(item)
    }

    fn take(&self) -> Vec<T> {
        self.items.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn updates_are_decoded_and_delivered_in_order() {
    let channel = MockChannel::new();
    let address = pk(1);
    let script = channel.script(address);

    let updates = Collector::<Pool>::new();
    let errors = Collector::<String>::new();
    let errors_sink = errors.clone();
    let subs = subscriptions(&channel);
    let _watch = subs.watch_pool(address, updates.push_fn(), move |e| {
        errors_sink.items.lock().unwrap().push(e.to_string());
    });

    script.send(Ok(sample_pool("JLP", vec![]).encode())).await.unwrap();
    script.send(Ok(sample_pool("JLP", vec![pk(2)]).encode())).await.unwrap();
    settle().await;

    let seen = updates.take();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].custodies.is_empty());
    assert_eq!(seen[1].custodies, vec![pk(2)]);
    assert!(errors.take().is_empty());
}

#[tokio::test]
async fn bad_frame_reports_and_the_watch_continues() {
    let channel = MockChannel::new();
    let address = pk(1);
    let script = channel.script(address);

    let updates = Collector::<Position>::new();
    let errors = Collector::<String>::new();
    let errors_sink = errors.clone();
    let subs = subscriptions(&channel);
    let _watch = subs.watch_position(address, updates.push_fn(), move |e| {
        errors_sink.items.lock().unwrap().push(e.to_string());
    });

    // A custody frame on a position watch fails the discriminator check.
    script.send(Ok(sample_custody(pk(2), pk(3)).encode())).await.unwrap();
    script
        .send(Ok(sample_position(pk(7), pk(2), pk(3), 1_000).encode()))
        .await
        .unwrap();
    settle().await;

    assert_eq!(errors.take().len(), 1);
    let seen = updates.take();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].size_usd, 1_000);
}

#[tokio::test]
async fn transport_error_ends_the_watch_after_one_report() {
    let channel = MockChannel::new();
    let address = pk(1);
    let script = channel.script(address);

    let updates = Collector::<Pool>::new();
    let errors = Collector::<String>::new();
    let errors_sink = errors.clone();
    let subs = subscriptions(&channel);
    let _watch = subs.watch_pool(address, updates.push_fn(), move |e| {
        errors_sink.items.lock().unwrap().push(e.to_string());
    });

    script.send(Err(PerpsError::Transport("socket dropped".to_owned()))).await.unwrap();
    // Frames after a transport error are never delivered.
    script.send(Ok(sample_pool("JLP", vec![]).encode())).await.unwrap();
    settle().await;

    assert!(updates.take().is_empty());
    let reported = errors.take();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].contains("socket dropped"));
}

#[tokio::test]
async fn stream_end_reports_channel_closed_once() {
    let channel = MockChannel::new();
    let address = pk(1);
    let script = channel.script(address);

    let updates = Collector::<Pool>::new();
    let errors = Collector::<String>::new();
    let errors_sink = errors.clone();
    let subs = subscriptions(&channel);
    let _watch = subs.watch_pool(address, updates.push_fn(), move |e| {
        errors_sink.items.lock().unwrap().push(e.to_string());
    });

    script.send(Ok(sample_pool("JLP", vec![]).encode())).await.unwrap();
    drop(script);
    settle().await;

    assert_eq!(updates.take().len(), 1);
    let reported = errors.take();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].contains("closed"));
}

#[tokio::test]
async fn open_failure_reports_once() {
    let channel = MockChannel::new();
    // No script registered for this address.
    let errors = Collector::<String>::new();
    let errors_sink = errors.clone();
    let subs = subscriptions(&channel);
    let _watch = subs.watch_pool(pk(1), |_| {}, move |e| {
        errors_sink.items.lock().unwrap().push(e.to_string());
    });
    settle().await;

    let reported = errors.take();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].contains("no script"));
}

#[tokio::test]
async fn cancel_is_idempotent_and_silent() {
    let channel = MockChannel::new();
    let address = pk(1);
    let script = channel.script(address);

    let updates = Collector::<Pool>::new();
    let errors = Collector::<String>::new();
    let errors_sink = errors.clone();
    let subs = subscriptions(&channel);
    let watch = subs.watch_pool(address, updates.push_fn(), move |e| {
        errors_sink.items.lock().unwrap().push(e.to_string());
    });

    script.send(Ok(sample_pool("JLP", vec![]).encode())).await.unwrap();
    settle().await;

    watch.cancel();
    watch.cancel();
    settle().await;

    // Frames after cancellation are dropped without callbacks, and dropping
    // the handle after an explicit cancel is a no-op.
    let _ = script.send(Ok(sample_pool("JLP", vec![]).encode())).await;
    drop(watch);
    settle().await;

    assert_eq!(updates.take().len(), 1);
    assert!(errors.take().is_empty());
}

#[tokio::test]
async fn dropping_the_handle_cancels_the_watch() {
    let channel = MockChannel::new();
    let address = pk(1);
    let script = channel.script(address);

    let updates = Collector::<Pool>::new();
    let errors = Collector::<String>::new();
    let errors_sink = errors.clone();
    let subs = subscriptions(&channel);
    let watch = subs.watch_pool(address, updates.push_fn(), move |e| {
        errors_sink.items.lock().unwrap().push(e.to_string());
    });

    script.send(Ok(sample_pool("JLP", vec![]).encode())).await.unwrap();
    settle().await;
    drop(watch);
    settle().await;

    let _ = script.send(Ok(sample_pool("JLP", vec![]).encode())).await;
    settle().await;

    assert_eq!(updates.take().len(), 1);
    assert!(errors.take().is_empty());
}

#[tokio::test]
async fn independent_watches_do_not_interfere() {
    let channel = MockChannel::new();
    let pool_address = pk(1);
    let position_address = pk(2);
    let pool_script = channel.script(pool_address);
    let position_script = channel.script(position_address);

    let pools = Collector::<Pool>::new();
    let positions = Collector::<Position>::new();
    let subs = subscriptions(&channel);
    let _pool_watch = subs.watch_pool(pool_address, pools.push_fn(), |_| {});
    let _position_watch = subs.watch_position(position_address, positions.push_fn(), |_| {});

    pool_script.send(Ok(sample_pool("JLP", vec![]).encode())).await.unwrap();
    position_script
        .send(Ok(sample_position(pk(7), pk(3), pk(4), 500).encode()))
        .await
        .unwrap();
    settle().await;

    assert_eq!(pools.take().len(), 1);
    assert_eq!(positions.take().len(), 1);
}
