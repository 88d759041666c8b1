//! Broadcast bridge: fans a table's state out to every subscribed client.
//!
//! Each subscriber registers for a `table_id` and, optionally, a seat (to
//! receive that seat's hole cards) or `None` (a rail/spectator view with all
//! hole cards elided). `broadcast` is called with an already-personalized
//! `StateView` — the registry builds one snapshot per distinct viewer before
//! handing it here — so this module only has to fan the same envelope out
//! to every subscriber registered for that (table, seat) pair.
//!
//! Sending never blocks: a subscriber whose channel is full is assumed to be
//! gone or stalled and is dropped rather than stalling the table's worker.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tokio::sync::mpsc;

use axiomind_engine::engine::StateView;
use axiomind_engine::player::Seat;

const EVENT_CHANNEL_BUFFER: usize = 1000;

pub type EventSender = mpsc::Sender<BroadcastEnvelope>;
pub type EventReceiver = mpsc::Receiver<BroadcastEnvelope>;

/// What a subscriber actually receives: the viewer's own seat number (if
/// any) alongside the state view built for that viewer.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastEnvelope {
    pub your_seat: Option<Seat>,
    #[serde(flatten)]
    pub state: StateView,
}

type SubscriberKey = (String, Option<Seat>);

pub struct TableEventSubscription {
    bus: TableEventBus,
    key: SubscriberKey,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl TableEventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }
}

impl Drop for TableEventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.key, self.subscriber_id);
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableEventBus {
    inner: Arc<TableEventBusInner>,
}

#[derive(Debug, Default)]
struct TableEventBusInner {
    subscribers: RwLock<HashMap<SubscriberKey, Vec<(usize, EventSender)>>>,
    next_id: AtomicUsize,
}

impl TableEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `table_id`'s broadcasts as the given seat, or as a
    /// spectator if `seat` is `None`.
    pub fn subscribe(&self, table_id: impl Into<String>, seat: Option<Seat>) -> TableEventSubscription {
        let key = (table_id.into(), seat);
        let (subscriber_id, receiver) = self.subscribe_raw(key.clone());
        TableEventSubscription {
            bus: self.clone(),
            key,
            subscriber_id,
            receiver,
        }
    }

    fn subscribe_raw(&self, key: SubscriberKey) -> (usize, EventReceiver) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        let mut guard = self.inner.subscribers.write().expect("subscriber lock poisoned");
        guard.entry(key.clone()).or_default().push((id, tx));

        tracing::info!(
            table_id = %key.0,
            seat = ?key.1,
            subscriber_id = id,
            "client subscribed to table events"
        );

        (id, rx)
    }

    /// Sends `state` to every subscriber registered for `(table_id, seat)`.
    /// `seat` should be `Some` for a per-player personalized view or `None`
    /// for the shared spectator/rail view.
    pub fn broadcast(&self, table_id: &str, seat: Option<Seat>, state: StateView) {
        let key = (table_id.to_string(), seat);
        let subscribers = {
            let guard = self.inner.subscribers.read().expect("subscriber lock poisoned");
            guard.get(&key).cloned()
        };

        let Some(list) = subscribers else {
            return;
        };

        let envelope = BroadcastEnvelope {
            your_seat: seat,
            state,
        };

        let mut failed = Vec::new();
        for (id, sender) in list {
            if let Err(err) = sender.try_send(envelope.clone()) {
                tracing::warn!(
                    table_id = %key.0,
                    subscriber_id = id,
                    error = ?err,
                    "failed to send event to subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(&key, &failed);
        }
    }

    pub fn unsubscribe(&self, key: &SubscriberKey, subscriber_id: usize) {
        self.remove_subscribers(key, &[subscriber_id]);
    }

    /// Drops every subscriber registered for any seat/spectator view of
    /// `table_id`. Called when a table is removed from the registry.
    pub fn drop_table(&self, table_id: &str) {
        let mut guard = self.inner.subscribers.write().expect("subscriber lock poisoned");
        guard.retain(|(id, _), _| id != table_id);
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = self.inner.subscribers.read().expect("subscriber lock poisoned");
        guard.values().map(|list| list.len()).sum()
    }

    fn remove_subscribers(&self, key: &SubscriberKey, ids: &[usize]) {
        let mut guard = self.inner.subscribers.write().expect("subscriber lock poisoned");
        if let Some(list) = guard.get_mut(key) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(key);
            }
        }
    }
}
