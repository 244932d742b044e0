//! Stateless pub-sub for engine events.
//!
//! Subscribers receive the event and nothing else; they get no access to the engine's state. Handlers are async and
//! each event is handled on its own task.
use std::{
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use log::*;
use tokio::sync::mpsc;

pub type Handler<E> = Arc<dyn Fn(E) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

pub struct EventHandler<E: Send + Sync + 'static> {
    listener: mpsc::Receiver<E>,
    sender: mpsc::Sender<E>,
    handler: Handler<E>,
}

impl<E: Send + Sync + 'static> EventHandler<E> {
    pub fn new(buffer_size: usize, handler: Handler<E>) -> Self {
        let (sender, listener) = mpsc::channel(buffer_size.max(1));
        Self { listener, sender, handler }
    }

    pub fn subscribe(&self) -> EventProducer<E> {
        EventProducer::new(self.sender.clone())
    }

    /// Runs until every producer has been dropped, then waits for in-flight handlers before returning.
    pub async fn start_handler(mut self) {
        debug!("📬️ Starting event handler");
        // Only producers may keep the channel open
        drop(self.sender);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let mut tasks = tokio::task::JoinSet::new();
        while let Some(ev) = self.listener.recv().await {
            let handler = Arc::clone(&self.handler);
            let counter = Arc::clone(&in_flight);
            counter.fetch_add(1, Ordering::SeqCst);
            tasks.spawn(async move {
                (handler)(ev).await;
                counter.fetch_sub(1, Ordering::SeqCst);
            });
            // Reap whatever has already finished so the set does not grow without bound
            while tasks.try_join_next().is_some() {}
        }
        if in_flight.load(Ordering::SeqCst) > 0 {
            debug!("📬️ Waiting for {} handlers to complete", in_flight.load(Ordering::SeqCst));
        }
        while let Some(res) = tasks.join_next().await {
            if let Err(e) = res {
                warn!("📬️ An event handler panicked or was cancelled. {e}");
            }
        }
        debug!("📬️ Event handler has shut down");
    }
}

#[derive(Clone)]
pub struct EventProducer<E: Send + Sync> {
    sender: mpsc::Sender<E>,
}

impl<E: Send + Sync> EventProducer<E> {
    pub fn new(sender: mpsc::Sender<E>) -> Self {
        Self { sender }
    }

    pub async fn publish_event(&self, event: E) {
        if let Err(e) = self.sender.send(event).await {
            error!("📬️ Failed to publish event: {e}");
        }
    }
}
