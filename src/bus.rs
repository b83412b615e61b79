//! In-process publish/subscribe message bus.
//!
//! Delivery is synchronous: `publish` calls every handler subscribed to the
//! message's topic, in subscription order, before returning. The subscriber
//! list is snapshotted before dispatch, so handlers added or removed while a
//! publish is running only affect later publishes. A failing handler (error
//! or panic) is logged and skipped; it never reaches the publisher and never
//! stops delivery to the remaining handlers.
//!
//! The bus lives on the UI task and is deliberately `!Send`.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::model::FilterState;

/// Message channels shared by publishers and subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    MattersFiltered,
    MatterSelected,
}

impl Topic {
    pub fn name(self) -> &'static str {
        match self {
            Topic::MattersFiltered => "MattersFiltered__c",
            Topic::MatterSelected => "MattersSelected__c",
        }
    }
}

/// Payloads carried on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "topic", rename_all = "camelCase")]
pub enum Message {
    #[serde(rename_all = "camelCase")]
    FiltersChanged { filters: FilterState },
    #[serde(rename_all = "camelCase")]
    ItemSelected { item_id: Option<String> },
}

impl Message {
    pub fn topic(&self) -> Topic {
        match self {
            Message::FiltersChanged { .. } => Topic::MattersFiltered,
            Message::ItemSelected { .. } => Topic::MatterSelected,
        }
    }
}

pub type SubscriptionId = u64;

type Handler = Rc<dyn Fn(&Message) -> anyhow::Result<()>>;

struct Subscriber {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler,
}

#[derive(Default)]
struct BusInner {
    next_id: SubscriptionId,
    subscribers: Vec<Subscriber>,
}

/// Cheaply cloneable handle to a shared bus.
#[derive(Clone, Default)]
pub struct MessageBus {
    inner: Rc<RefCell<BusInner>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`. The handler stays registered until
    /// the returned [`Subscription`] is unsubscribed.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Message) -> anyhow::Result<()> + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.subscribers.push(Subscriber {
            id,
            topic,
            handler: Rc::new(handler),
        });
        log::debug!("Bus: subscription {} added for {}", id, topic.name());

        Subscription {
            id,
            topic,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `message` to every current subscriber of its topic.
    ///
    /// Returns the number of handlers that completed successfully.
    pub fn publish(&self, message: Message) -> usize {
        let topic = message.topic();
        let handlers: Vec<(SubscriptionId, Handler)> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.topic == topic)
            .map(|s| (s.id, Rc::clone(&s.handler)))
            .collect();

        if handlers.is_empty() {
            log::trace!("Bus: no subscribers for {}", topic.name());
            return 0;
        }

        let mut delivered = 0;
        for (id, handler) in handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(&message))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    log::error!("Bus: subscriber {} failed on {}: {:#}", id, topic.name(), e);
                }
                Err(payload) => {
                    log::error!(
                        "Bus: subscriber {} panicked on {}: {}",
                        id,
                        topic.name(),
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
        delivered
    }

    /// Number of live subscriptions for `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.inner.borrow().subscribers.iter().filter(|s| s.topic == topic).count()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Token returned by [`MessageBus::subscribe`].
#[must_use = "dropping a subscription keeps the handler registered; call unsubscribe() to remove it"]
pub struct Subscription {
    id: SubscriptionId,
    topic: Topic,
    bus: Weak<RefCell<BusInner>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Remove the handler from the bus. A no-op if the bus is gone.
    pub fn unsubscribe(self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().subscribers.retain(|s| s.id != self.id);
            log::debug!("Bus: subscription {} removed from {}", self.id, self.topic.name());
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .finish()
    }
}
