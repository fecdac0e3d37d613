//! User-visible notices.
//!
//! Failures caught at the portal edge end up here instead of propagating.
//! The queue is bounded; when nobody drains it the newest notices are dropped.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{KisanflowError, common::Queue};

const NOTIFICATION_CAPACITY: usize = 64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl From<&KisanflowError> for Notification {
    fn from(error: &KisanflowError) -> Self {
        let level = match error {
            KisanflowError::ConfigurationMissing(_) => Level::Info,
            KisanflowError::NetworkFailure(_) | KisanflowError::Validation(_) | KisanflowError::NotFound(_) => Level::Warning,
            _ => Level::Error,
        };
        Self {
            level,
            message: error.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Notifier {
    queue: Arc<Queue<Notification>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            queue: Queue::new(NOTIFICATION_CAPACITY),
        }
    }

    pub fn notify(
        &self,
        level: Level,
        message: impl Into<String>,
    ) {
        let notification = Notification {
            level,
            message: message.into(),
        };
        info!("notify: [{}] {}", notification.level.as_ref(), notification.message);
        if let Err(e) = self.queue.try_send(notification) {
            debug!("notify: dropped notification: {}", e);
        }
    }

    pub fn success(
        &self,
        message: impl Into<String>,
    ) {
        self.notify(Level::Success, message);
    }

    pub fn error(
        &self,
        error: &KisanflowError,
    ) {
        let notification = Notification::from(error);
        self.notify(notification.level, notification.message);
    }

    /// Takes every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.drain()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
