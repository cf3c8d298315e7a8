use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Per-subscriber backlog limit. Events are applied before every session read, so
/// only a page that never touches the wallet gets near it.
pub const MAX_QUEUED_EVENTS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderEventKind {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEvent {
    pub sequence: u64,
    pub kind: ProviderEventKind,
}

/// Fan-out point for provider notifications. Adapters publish into it; every live
/// [`Subscription`] gets its own queue.
#[derive(Debug, Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<HubState>>,
}

#[derive(Debug, Default)]
struct HubState {
    next_subscriber: u64,
    sequence: u64,
    queues: HashMap<u64, VecDeque<ProviderEvent>>,
}

impl EventHub {
    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self) -> Subscription {
        let mut g = self.lock();
        g.next_subscriber = g.next_subscriber.saturating_add(1);
        let id = g.next_subscriber;
        g.queues.insert(id, VecDeque::new());
        Subscription {
            id,
            hub: self.clone(),
        }
    }

    /// Queues the event for every current subscriber and returns its sequence number.
    pub fn publish(&self, kind: ProviderEventKind) -> u64 {
        let mut g = self.lock();
        g.sequence = g.sequence.saturating_add(1);
        let event = ProviderEvent {
            sequence: g.sequence,
            kind,
        };
        for queue in g.queues.values_mut() {
            if queue.len() >= MAX_QUEUED_EVENTS {
                make_room(queue);
            }
            queue.push_back(event.clone());
        }
        event.sequence
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().queues.len()
    }
}

/// Drops the oldest event, skipping empty account lists while anything else can go:
/// those end the session and must not be lost.
fn make_room(queue: &mut VecDeque<ProviderEvent>) {
    let victim = queue
        .iter()
        .position(|e| !matches!(&e.kind, ProviderEventKind::AccountsChanged(a) if a.is_empty()))
        .unwrap_or(0);
    if let Some(dropped) = queue.remove(victim) {
        warn!(sequence = dropped.sequence, "provider event queue full; dropping oldest event");
    }
}

/// Scoped handle on the provider's event stream. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    hub: EventHub,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn drain(&self) -> Vec<ProviderEvent> {
        self.hub
            .lock()
            .queues
            .get_mut(&self.id)
            .map(|q| q.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.lock().queues.remove(&self.id);
    }
}
