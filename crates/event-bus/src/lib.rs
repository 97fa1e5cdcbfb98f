//! Application event bus.
//!
//! The storefront UI raises custom events (loyalty prompt lifecycle, cart
//! adds) that the assistant reacts to. They travel over a broadcast bus so the
//! UI side never needs to know who is listening.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use voicecart_core_types::AssistError;

pub mod app;

pub use app::{AppEvent, BusError, CustomEvent};

/// Trait implemented by payload types that can be carried on the bus.
pub trait Event: Clone + Send + Sync + std::fmt::Debug + 'static {}

impl<T> Event for T where T: Clone + Send + Sync + std::fmt::Debug + 'static {}

#[async_trait]
pub trait EventBus<E>: Send + Sync
where
    E: Event,
{
    async fn publish(&self, event: E) -> Result<(), AssistError>;
    fn subscribe(&self) -> broadcast::Receiver<E>;
}

/// In-memory broadcast bus.
///
/// Publishing with no subscriber is not an error: UI events raised while the
/// assistant is unmounted are simply unobserved.
pub struct InMemoryBus<E>
where
    E: Event,
{
    sender: broadcast::Sender<E>,
}

impl<E> InMemoryBus<E>
where
    E: Event,
{
    pub fn new(capacity: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self { sender })
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl<E> EventBus<E> for InMemoryBus<E>
where
    E: Event,
{
    async fn publish(&self, event: E) -> Result<(), AssistError> {
        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(receivers, "event published");
                Ok(())
            }
            Err(broadcast::error::SendError(event)) => {
                debug!(?event, "event published with no listeners");
                Ok(())
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_without_subscribers_is_ok() {
        let bus = InMemoryBus::<AppEvent>::new(4);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(AppEvent::RewardsPromptShow).await.unwrap();
    }

    #[tokio::test]
    async fn subscribers_see_events_in_order() {
        let bus = InMemoryBus::<AppEvent>::new(8);
        let mut rx = bus.subscribe();
        bus.publish(AppEvent::RewardsPromptShow).await.unwrap();
        bus.publish(AppEvent::ItemAddedToCart {
            is_authenticated: true,
        })
        .await
        .unwrap();

        assert_eq!(rx.recv().await.unwrap(), AppEvent::RewardsPromptShow);
        assert_eq!(
            rx.recv().await.unwrap(),
            AppEvent::ItemAddedToCart {
                is_authenticated: true
            }
        );
    }
}
