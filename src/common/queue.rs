//! Point-to-point message queue.

use std::sync::Arc;

use crate::{KisanflowError, Result};

/// Bounded multi-producer queue drained by its readers.
///
/// Used for the notification queue where every notice is consumed by exactly
/// one reader. Backed by flume for high-performance message passing.
#[derive(Clone)]
pub struct Queue<T> {
    receiver: Arc<flume::Receiver<T>>,
    sender: Arc<flume::Sender<T>>,
}

impl<T> Queue<T> {
    /// create a new queue
    pub fn new(cap: usize) -> Arc<Self> {
        let (tx, rx) = flume::bounded(cap);

        Arc::new(Self {
            receiver: Arc::new(rx),
            sender: Arc::new(tx),
        })
    }

    /// take every message currently queued
    pub fn drain(&self) -> Vec<T> {
        self.receiver.drain().collect()
    }

    /// send a message, failing instead of blocking when the queue is full
    pub fn try_send(
        &self,
        msg: T,
    ) -> Result<()> {
        self.sender.try_send(msg).map_err(|e| KisanflowError::Store(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}
