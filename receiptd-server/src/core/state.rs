use std::sync::Arc;
use std::time::Duration;

use receiptd_printer::{Device, RawDevice};
use tokio::sync::{Mutex, watch};

use crate::core::Config;

/// Outcome of the one-shot device probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Probe still in flight
    Pending,
    /// Device opened; jobs may print
    Ready,
    /// Device open failed; cached for the process lifetime, never retried
    Failed,
}

/// Server state - shared by every request handler
///
/// Holds the process-wide device handle, the readiness latch and a global
/// print lock. Cloning is shallow (Arc fields).
///
/// # Usage
///
/// ```ignore
/// let state = ServerState::initialize(&config);
/// if state.await_ready().await {
///     // device opened, jobs can print
/// }
/// ```
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Printer device transport
    device: Arc<dyn Device>,
    /// Readiness latch, resolved exactly once
    readiness: watch::Receiver<Readiness>,
    /// Serializes jobs so concurrent requests cannot interleave on the wire
    print_lock: Arc<Mutex<()>>,
}

impl ServerState {
    /// Build state around the configured device node and start the probe
    pub fn initialize(config: &Config) -> Self {
        let device = RawDevice::new(&config.printer_device)
            .with_timeout(Duration::from_millis(config.write_timeout_ms));
        Self::with_device(config.clone(), Arc::new(device))
    }

    /// Build state around any device transport
    ///
    /// Used by [`initialize`](Self::initialize) and by tests substituting a
    /// fake device. Spawns the one-shot open probe; the outcome is cached
    /// for the process lifetime.
    pub fn with_device(config: Config, device: Arc<dyn Device>) -> Self {
        let (tx, readiness) = watch::channel(Readiness::Pending);

        let probe = device.clone();
        tokio::spawn(async move {
            let outcome = match probe.open().await {
                Ok(()) => Readiness::Ready,
                Err(e) => {
                    tracing::error!(error = %e, "Printer device open failed");
                    Readiness::Failed
                }
            };
            let _ = tx.send(outcome);
        });

        Self {
            config,
            device,
            readiness,
            print_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get a handle to the device transport
    pub fn device(&self) -> Arc<dyn Device> {
        self.device.clone()
    }

    /// Current readiness snapshot (does not wait for the probe)
    pub fn readiness(&self) -> Readiness {
        *self.readiness.borrow()
    }

    /// Await the cached probe outcome; true when the device opened
    pub async fn await_ready(&self) -> bool {
        let mut rx = self.readiness.clone();
        match rx.wait_for(|r| *r != Readiness::Pending).await {
            Ok(outcome) => *outcome == Readiness::Ready,
            // Probe task dropped without resolving
            Err(_) => false,
        }
    }

    /// Global print lock; held across interpret + flush
    pub fn print_lock(&self) -> &Mutex<()> {
        &self.print_lock
    }
}
