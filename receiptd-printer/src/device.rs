//! Device transport for sending ESC/POS data
//!
//! The production transport is a raw printer device node (e.g. `/dev/usb/lp0`
//! for a USB-attached printer). The OS driver owns the USB plumbing; this
//! module only opens the node and writes complete job buffers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use crate::error::{PrintError, PrintResult};

/// Trait for printer device transports
#[async_trait]
pub trait Device: Send + Sync {
    /// Probe the device once; the outcome decides service readiness
    async fn open(&self) -> PrintResult<()>;

    /// Send one complete ESC/POS job buffer to the device
    async fn write(&self, data: &[u8]) -> PrintResult<()>;
}

/// Raw device-node printer
///
/// Writes job buffers to a printer character device. Each job opens the node,
/// writes everything and flushes, so a job hits the wire as one contiguous
/// write.
#[derive(Debug, Clone)]
pub struct RawDevice {
    path: PathBuf,
    timeout: Duration,
}

impl RawDevice {
    /// Create a printer on the given device node
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set the per-operation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the device node path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn open_node(&self) -> PrintResult<tokio::fs::File> {
        let mut options = tokio::fs::OpenOptions::new();
        let open = options.write(true).open(&self.path);

        tokio::time::timeout(self.timeout, open)
            .await
            .map_err(|_| PrintError::Timeout(format!("Open timeout: {}", self.path.display())))?
            .map_err(|e| PrintError::Open(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl Device for RawDevice {
    #[instrument(fields(path = %self.path.display()))]
    async fn open(&self) -> PrintResult<()> {
        match self.open_node().await {
            Ok(_) => {
                info!("Printer device ready");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Printer device unavailable");
                Err(e)
            }
        }
    }

    #[instrument(skip(data), fields(path = %self.path.display(), data_len = data.len()))]
    async fn write(&self, data: &[u8]) -> PrintResult<()> {
        let mut node = self.open_node().await?;

        info!("Sending {} bytes", data.len());

        tokio::time::timeout(self.timeout, node.write_all(data))
            .await
            .map_err(|_| PrintError::Timeout(format!("Write timeout: {}", self.path.display())))?
            .map_err(|e| {
                PrintError::Io(std::io::Error::new(e.kind(), format!("Write failed: {}", e)))
            })?;

        node.flush().await?;

        info!("Print job sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_device_path() {
        let dev = RawDevice::new("/dev/usb/lp0");
        assert_eq!(dev.path(), Path::new("/dev/usb/lp0"));
    }

    #[tokio::test]
    async fn test_open_missing_node_fails() {
        let dev = RawDevice::new("/nonexistent/printer-node");
        assert!(dev.open().await.is_err());
    }

    #[tokio::test]
    async fn test_write_to_file_node() {
        // A plain file stands in for the character device
        let file = tempfile::NamedTempFile::new().unwrap();
        let dev = RawDevice::new(file.path());

        dev.open().await.unwrap();
        dev.write(b"\x1B\x40hello\n").await.unwrap();

        let written = std::fs::read(file.path()).unwrap();
        assert_eq!(written, b"\x1B\x40hello\n");
    }
}
