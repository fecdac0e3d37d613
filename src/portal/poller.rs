//! Fixed-interval refresh of remote data.
//!
//! A [`Poller`] fetches once right away, then every interval until stopped
//! or dropped. The latest result is published on a watch channel; a failed
//! fetch keeps the previous data and records the error.

use std::{pin::pin, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{runtime::Handle, sync::watch, time::MissedTickBehavior};
use tracing::{debug, warn};

use crate::{
    KisanflowError, Result,
    common::Shutdown,
    notify::Notifier,
    services::{
        sensor::{SensorData, SensorService},
        weather::{WeatherData, WeatherService},
    },
    utils,
};

/// Something a [`Poller`] can refresh.
#[async_trait]
pub trait Source: Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Self::Output>;
}

#[async_trait]
impl Source for WeatherService {
    type Output = WeatherData;

    fn name(&self) -> &'static str {
        "weather"
    }

    async fn fetch(&self) -> Result<WeatherData> {
        Ok(WeatherService::fetch(self).await)
    }
}

#[async_trait]
impl Source for SensorService {
    type Output = SensorData;

    fn name(&self) -> &'static str {
        "sensor"
    }

    async fn fetch(&self) -> Result<SensorData> {
        self.fetch_data().await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: Option<T>,
    pub error: Option<KisanflowError>,
    /// unix millis of the last attempt, 0 before the first one
    pub updated_at: i64,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            updated_at: 0,
        }
    }
}

struct Inner<S: Source> {
    source: Arc<S>,
    state: watch::Sender<Snapshot<S::Output>>,
    notifier: Option<Notifier>,
}

impl<S: Source> Inner<S> {
    async fn poll_once(&self) -> Snapshot<S::Output> {
        let result = self.source.fetch().await;
        self.state.send_modify(|snapshot| {
            snapshot.updated_at = utils::time_millis();
            match result {
                Ok(data) => {
                    snapshot.data = Some(data);
                    snapshot.error = None;
                }
                Err(e) => {
                    warn!("poller: {} fetch failed: {}", self.source.name(), e);
                    if let Some(notifier) = &self.notifier {
                        notifier.error(&e);
                    }
                    snapshot.error = Some(e);
                }
            }
        });
        self.state.borrow().clone()
    }
}

pub struct Poller<S: Source> {
    inner: Arc<Inner<S>>,
    shutdown: Arc<Shutdown>,
}

impl<S: Source> Poller<S> {
    /// Starts polling `source` every `interval` on `runtime`, or on the
    /// current runtime when none is given.
    pub fn spawn(
        source: Arc<S>,
        interval: Duration,
        notifier: Option<Notifier>,
        runtime: Option<Handle>,
    ) -> Result<Self> {
        if interval.is_zero() {
            return Err(KisanflowError::Config(format!("{} poll interval must be positive", source.name())));
        }
        let runtime = match runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|e| KisanflowError::Config(format!("polling needs a tokio runtime: {}", e)))?,
        };

        let (state, _) = watch::channel(Snapshot::default());
        let inner = Arc::new(Inner {
            source,
            state,
            notifier,
        });
        let shutdown = Arc::new(Shutdown::new());

        let task = inner.clone();
        let stopped = shutdown.wait();
        runtime.spawn(async move {
            let mut stopped = pin!(stopped);
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        task.poll_once().await;
                    }
                }
            }
            debug!("poller: {} stopped", task.source.name());
        });

        Ok(Self {
            inner,
            shutdown,
        })
    }

    pub fn latest(&self) -> Snapshot<S::Output> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every fetch attempt.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<S::Output>> {
        self.inner.state.subscribe()
    }

    /// Fetches now, outside the schedule.
    pub async fn refetch(&self) -> Snapshot<S::Output> {
        self.inner.poll_once().await
    }

    pub fn stop(&self) {
        self.shutdown.shutdown();
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_shutdown()
    }
}

impl<S: Source> Drop for Poller<S> {
    fn drop(&mut self) {
        self.shutdown.shutdown();
    }
}
