/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | PRINTER_DEVICE | /dev/usb/lp0 | Printer device node |
/// | WRITE_TIMEOUT_MS | 5000 | Device open/write timeout (ms) |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | (unset) | Daily-rolling log file directory |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// PRINTER_DEVICE=/dev/usb/lp1 HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Printer character-device node
    pub printer_device: String,
    /// Device open/write timeout in milliseconds
    pub write_timeout_ms: u64,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Optional directory for daily-rolling log files
    pub log_dir: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            printer_device: std::env::var("PRINTER_DEVICE")
                .unwrap_or_else(|_| "/dev/usb/lp0".into()),
            write_timeout_ms: std::env::var("WRITE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the device node and port
    ///
    /// Mostly used in tests.
    pub fn with_overrides(printer_device: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.printer_device = printer_device.into();
        config.http_port = http_port;
        config
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
