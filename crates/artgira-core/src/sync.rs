//! Synchronization loop
//!
//! Every tick compares `target` with `current`, pushes the difference to the
//! automation system and, once the push succeeded, commits the pushed
//! snapshot as the new `current`. The push runs without holding the lock so
//! the frame receiver is never blocked by an HTTP round trip.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::channels::ChannelTable;
use crate::client::AutomationClient;
use crate::diff::diff;
use crate::universe::SharedUniverse;
use crate::{error::CoreError, Result};

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed since the last successful push
    Idle,
    /// This many values were pushed
    Synchronized(usize),
}

/// Drives diff and push on a fixed interval
pub struct SyncEngine<C> {
    table: Arc<ChannelTable>,
    universe: Arc<SharedUniverse>,
    client: C,
    interval: Duration,
    push_timeout: Duration,
    verbose: bool,
}

impl<C: AutomationClient> SyncEngine<C> {
    pub fn new(table: Arc<ChannelTable>, universe: Arc<SharedUniverse>, client: C) -> Self {
        Self {
            table,
            universe,
            client,
            interval: Duration::from_secs(1),
            push_timeout: Duration::from_secs(5),
            verbose: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Bound on a single push; a timeout counts as a failed push
    pub fn with_push_timeout(mut self, timeout: Duration) -> Self {
        self.push_timeout = timeout;
        self
    }

    /// Log every pushed value
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run a single synchronization step.
    ///
    /// On error `current` is left alone, so the next tick diffs against the
    /// then-latest `target` and retries.
    pub async fn tick(&self) -> Result<TickOutcome> {
        let (body, snapshot) = {
            let state = self.universe.lock();
            match diff(&self.table, &state.current, &state.target) {
                Some(body) => (body, state.target),
                None => return Ok(TickOutcome::Idle),
            }
        };

        match tokio::time::timeout(self.push_timeout, self.client.set(&body)).await {
            Ok(result) => result?,
            Err(_) => return Err(CoreError::PushTimeout(self.push_timeout)),
        }

        self.universe.lock().current = snapshot;

        info!("{} channels updated", body.len());
        if self.verbose {
            for value in &body.values {
                info!("{} -> {}", value.uid, value.value);
            }
        }

        Ok(TickOutcome::Synchronized(body.len()))
    }

    /// Tick until `shutdown` resolves. The first tick happens one interval
    /// after the call.
    pub async fn run<F: Future<Output = ()>>(&self, shutdown: F) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick of a tokio interval completes immediately
        interval.tick().await;

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("sync loop stopped");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.tick().await {
                        error!("could not update channels: {}", e);
                    }
                }
            }
        }
    }
}
