//! Network reachability guard.
//!
//! Each stage asks the guard before talking to a remote API. The guard probes
//! a well-known public address with a bare TCP connect and, while the probe
//! fails, sleeps with exponential backoff.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;

use crate::error::SyncError;
use crate::retry::BackoffConfig;

/// Cheap reachability check. Never errors; `false` means "unreachable".
#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    async fn check_connectivity(&self, timeout: Duration) -> bool;
}

/// Probes by opening (and immediately dropping) a TCP connection.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: SocketAddr,
}

impl TcpProbe {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

#[async_trait::async_trait]
impl Probe for TcpProbe {
    async fn check_connectivity(&self, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::debug!("Connectivity probe to {} failed: {}", self.addr, e);
                false
            }
            Err(_) => {
                tracing::debug!(
                    "Connectivity probe to {} timed out after {}s",
                    self.addr,
                    timeout.as_secs()
                );
                false
            }
        }
    }
}

pub struct ConnectivityGuard {
    probe: Box<dyn Probe>,
    probe_timeout: Duration,
    backoff: BackoffConfig,
}

impl std::fmt::Debug for ConnectivityGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectivityGuard")
            .field("probe_timeout", &self.probe_timeout)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

impl ConnectivityGuard {
    pub fn new(probe: Box<dyn Probe>, probe_timeout: Duration, backoff: BackoffConfig) -> Self {
        Self {
            probe,
            probe_timeout,
            backoff,
        }
    }

    /// Block until the probe succeeds.
    ///
    /// Returns `false` once `max_retries` retries have failed; with no limit
    /// configured this only returns once the network is back.
    pub async fn wait_for_connectivity(&self) -> bool {
        let mut retries = 0u32;
        loop {
            if self.probe.check_connectivity(self.probe_timeout).await {
                if retries > 0 {
                    tracing::info!("Connectivity restored after {} retries", retries);
                }
                return true;
            }
            if !self.backoff.allows_retry(retries) {
                tracing::error!("No network connectivity after {} retries, giving up", retries);
                return false;
            }
            let delay = self.backoff.delay_for_retry(retries);
            retries += 1;
            match self.backoff.max_retries {
                Some(max) => tracing::warn!(
                    "No network connectivity (retry {}/{}), retrying in {}s",
                    retries,
                    max,
                    delay.as_secs()
                ),
                None => tracing::warn!(
                    "No network connectivity (retry {}), retrying in {}s",
                    retries,
                    delay.as_secs()
                ),
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// Run `operation`; if it fails for lack of network, wait for
    /// connectivity and run it exactly once more.
    ///
    /// Any other error, or a second failure, is returned to the caller.
    /// Only for idempotent reads: a timed-out request is sent again.
    pub async fn retry_on_disconnect<T, F, Fut>(&self, operation: F) -> Result<T, SyncError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, SyncError>>,
    {
        self.retry_once_if(operation, SyncError::is_connectivity).await
    }

    /// Like [`retry_on_disconnect`](Self::retry_on_disconnect), but only
    /// retries when the request never left this host. A timeout is returned
    /// as is, since the server may already have applied it.
    pub async fn retry_if_unsent<T, F, Fut>(&self, operation: F) -> Result<T, SyncError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, SyncError>>,
    {
        self.retry_once_if(operation, SyncError::is_unsent).await
    }

    async fn retry_once_if<T, F, Fut>(
        &self,
        operation: F,
        retryable: fn(&SyncError) -> bool,
    ) -> Result<T, SyncError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, SyncError>>,
    {
        match operation().await {
            Err(e) if retryable(&e) => {
                tracing::warn!("{}; waiting for connectivity before retrying", e);
                if self.wait_for_connectivity().await {
                    operation().await
                } else {
                    Err(e)
                }
            }
            other => other,
        }
    }
}
